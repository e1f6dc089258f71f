//! External agent runtime: where personas are registered before use.

pub mod client;
pub mod local;

pub use client::HttpAgentRuntime;
pub use local::LocalRuntime;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Registration request for a persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDefinitionRequest {
    pub name: String,
    pub instructions: String,
    pub temperature: f64,
    /// Structured response schema; `None` means free-form text.
    pub response_format: Option<serde_json::Value>,
}

/// Opaque handle to a persona registered with the runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default = "chrono::Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Agent runtime request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Agent runtime returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode agent definition: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Agent registration rejected: {0}")]
    Rejected(String),
}

/// Registers persona definitions with an agent runtime.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    async fn create_agent_definition(
        &self,
        request: &AgentDefinitionRequest,
    ) -> Result<AgentDefinition, RuntimeError>;
}
