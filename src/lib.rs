//! Event planner — an event-planning agent persona for agent runtimes.
//!
//! Bundles a system prompt with a registry of mock planning tools, and
//! advertises those tools to the runtime through a JSON manifest.

pub mod agent;
pub mod config;
pub mod memory;
pub mod runtime;
pub mod tools;
pub mod types;
