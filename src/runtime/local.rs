//! In-process runtime for local runs and tests.

use super::{AgentDefinition, AgentDefinitionRequest, AgentRuntime, RuntimeError};
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

/// Mints definitions locally without contacting any service.
#[derive(Debug, Clone, Default)]
pub struct LocalRuntime;

impl LocalRuntime {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AgentRuntime for LocalRuntime {
    async fn create_agent_definition(
        &self,
        request: &AgentDefinitionRequest,
    ) -> Result<AgentDefinition, RuntimeError> {
        if request.name.is_empty() {
            return Err(RuntimeError::Rejected("agent name is empty".into()));
        }

        let definition = AgentDefinition {
            id: format!("agent_{}", ulid::Ulid::new()),
            name: request.name.clone(),
            instructions: request.instructions.clone(),
            temperature: request.temperature,
            created_at: Utc::now(),
        };
        debug!("Created local definition {} for {}", definition.id, definition.name);
        Ok(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> AgentDefinitionRequest {
        AgentDefinitionRequest {
            name: name.into(),
            instructions: "Plan events.".into(),
            temperature: 0.0,
            response_format: None,
        }
    }

    #[tokio::test]
    async fn mints_unique_definitions() {
        let runtime = LocalRuntime::new();
        let a = runtime.create_agent_definition(&request("Planner")).await.unwrap();
        let b = runtime.create_agent_definition(&request("Planner")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("agent_"));
        assert_eq!(a.instructions, "Plan events.");
    }

    #[tokio::test]
    async fn rejects_empty_name() {
        let err = LocalRuntime::new()
            .create_agent_definition(&request(""))
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Rejected(_)));
    }
}
