//! HTTP client for a remote agent runtime.

use super::{AgentDefinition, AgentDefinitionRequest, AgentRuntime, RuntimeError};
use async_trait::async_trait;
use tracing::debug;

/// Agent runtime reached over HTTP (`POST {base}/agents`).
#[derive(Debug, Clone)]
pub struct HttpAgentRuntime {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl HttpAgentRuntime {
    /// Create a new runtime client. An empty key sends no authorization.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AgentRuntime for HttpAgentRuntime {
    async fn create_agent_definition(
        &self,
        request: &AgentDefinitionRequest,
    ) -> Result<AgentDefinition, RuntimeError> {
        let url = format!("{}/agents", self.base_url);
        debug!("Registering agent '{}' at {}", request.name, url);

        let mut req = self.http.post(&url).json(request);
        if !self.api_key.is_empty() {
            req = req.bearer_auth(&self.api_key);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(RuntimeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(RuntimeError::Decode)
    }
}
