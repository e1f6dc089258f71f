//! Configuration schema for planner.toml.

use serde::{Deserialize, Serialize};

/// Which agent runtime registers the persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeKind {
    /// In-process definitions, no network.
    #[default]
    Local,
    /// Remote runtime over HTTP.
    Http,
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Agent runtime used by `create`.
    pub runtime: RuntimeKind,

    /// Base URL of the HTTP agent runtime.
    pub runtime_url: String,

    /// Bearer key for the HTTP agent runtime.
    pub runtime_api_key: String,

    /// Persona override; empty uses the built-in event planner persona.
    pub system_message: String,

    /// Conversation memory store endpoint.
    pub memory_endpoint: String,

    pub memory_database: String,

    pub memory_container: String,

    /// Log level (debug, info, warn, error).
    pub log_level: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeKind::Local,
            runtime_url: "http://localhost:8000".into(),
            runtime_api_key: String::new(),
            system_message: String::new(),
            memory_endpoint: "http://localhost:8081".into(),
            memory_database: "macae".into(),
            memory_container: "memory".into(),
            log_level: "info".into(),
        }
    }
}

impl PlannerConfig {
    /// System message override, if one is set.
    pub fn system_message_override(&self) -> Option<String> {
        if self.system_message.trim().is_empty() {
            None
        } else {
            Some(self.system_message.clone())
        }
    }
}
