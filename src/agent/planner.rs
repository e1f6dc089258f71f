//! Event planner agent descriptor.
//!
//! The descriptor bundles the persona (name and system message) with the
//! tools the runtime may call. It is built either directly, or through
//! [`EventPlannerAgent::create`], which first registers the persona with an
//! external agent runtime and attaches the returned definition.

use crate::agent::system_prompt;
use crate::memory::MemoryContext;
use crate::runtime::{AgentDefinition, AgentDefinitionRequest, AgentRuntime, RuntimeError};
use crate::tools::{self, Tool, ToolError, ToolRegistry};
use crate::types::{AgentType, ToolCall, ToolResult};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info};

/// Sampling temperature sent when registering the persona.
pub const TEMPERATURE: f64 = 0.0;

/// Inputs for building an [`EventPlannerAgent`].
#[derive(Clone)]
pub struct AgentOptions {
    pub session_id: String,
    pub user_id: String,
    pub memory: MemoryContext,
    /// Explicit tool list. `None` or empty means every registry tool.
    pub tools: Option<Vec<Arc<dyn Tool>>>,
    /// Persona override. `None` or blank means the built-in persona.
    pub system_message: Option<String>,
    pub client: Option<Arc<dyn AgentRuntime>>,
    pub definition: Option<AgentDefinition>,
}

impl AgentOptions {
    pub fn new(session_id: impl Into<String>, user_id: impl Into<String>, memory: MemoryContext) -> Self {
        Self {
            session_id: session_id.into(),
            user_id: user_id.into(),
            memory,
            tools: None,
            system_message: None,
            client: None,
            definition: None,
        }
    }

    pub fn with_tools(mut self, tools: Vec<Arc<dyn Tool>>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn with_system_message(mut self, message: impl Into<String>) -> Self {
        self.system_message = Some(message.into());
        self
    }

    pub fn with_client(mut self, client: Arc<dyn AgentRuntime>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn with_definition(mut self, definition: AgentDefinition) -> Self {
        self.definition = Some(definition);
        self
    }
}

/// The event planner persona as handed to the runtime.
#[derive(Clone)]
pub struct EventPlannerAgent {
    agent_name: &'static str,
    session_id: String,
    user_id: String,
    memory: MemoryContext,
    registry: Arc<ToolRegistry>,
    tools: Vec<Arc<dyn Tool>>,
    system_message: String,
    client: Option<Arc<dyn AgentRuntime>>,
    definition: Option<AgentDefinition>,
}

impl EventPlannerAgent {
    /// Build the descriptor without contacting the runtime.
    pub fn new(registry: Arc<ToolRegistry>, options: AgentOptions) -> Self {
        let tools = match options.tools {
            Some(tools) if !tools.is_empty() => tools,
            _ => registry.exposed().cloned().collect(),
        };

        Self {
            agent_name: AgentType::EventPlanner.as_str(),
            session_id: options.session_id,
            user_id: options.user_id,
            memory: options.memory,
            registry,
            tools,
            system_message: system_prompt::resolve_system_message(options.system_message),
            client: options.client,
            definition: options.definition,
        }
    }

    /// Register the persona with `runtime`, then build the descriptor with
    /// the returned definition attached.
    ///
    /// Registration errors are logged and returned unchanged. Nothing is
    /// retried and nothing is kept on failure.
    pub async fn create(
        registry: Arc<ToolRegistry>,
        runtime: Arc<dyn AgentRuntime>,
        mut options: AgentOptions,
    ) -> Result<Self, RuntimeError> {
        let agent_name = AgentType::EventPlanner.as_str();
        let instructions = system_prompt::resolve_system_message(options.system_message.take());

        info!("Initializing {} via agent runtime registration", agent_name);

        let request = AgentDefinitionRequest {
            name: agent_name.to_string(),
            instructions: instructions.clone(),
            temperature: TEMPERATURE,
            response_format: None,
        };

        let definition = match runtime.create_agent_definition(&request).await {
            Ok(definition) => definition,
            Err(e) => {
                error!("Failed to create agent definition for {}: {}", agent_name, e);
                return Err(e);
            }
        };
        info!("Registered {} as {}", agent_name, definition.id);

        options.system_message = Some(instructions);
        options.definition = Some(definition);
        if options.client.is_none() {
            options.client = Some(runtime);
        }
        Ok(Self::new(registry, options))
    }

    pub fn agent_name(&self) -> &str {
        self.agent_name
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn memory(&self) -> &MemoryContext {
        &self.memory
    }

    pub fn system_message(&self) -> &str {
        &self.system_message
    }

    /// Tools this agent carries, in the order they were supplied.
    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    pub fn client(&self) -> Option<&Arc<dyn AgentRuntime>> {
        self.client.as_ref()
    }

    pub fn definition(&self) -> Option<&AgentDefinition> {
        self.definition.as_ref()
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Every exposed registry tool by name.
    pub fn plugins(&self) -> BTreeMap<String, Arc<dyn Tool>> {
        self.registry.collect_callables()
    }

    /// JSON manifest of the registry's tools.
    pub fn manifest(&self) -> String {
        self.registry.build_manifest()
    }

    /// Run a tool call against this agent's own tools.
    pub async fn execute(&self, call: &ToolCall) -> ToolResult {
        let result = match self.tools.iter().find(|t| t.name() == call.name && t.exposed()) {
            Some(tool) => tool.execute(call.arguments.clone()).await,
            None => Err(ToolError::UnknownTool(call.name.clone())),
        };
        tools::tool_result(call, result)
    }
}

impl fmt::Debug for EventPlannerAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventPlannerAgent")
            .field("agent_name", &self.agent_name)
            .field("session_id", &self.session_id)
            .field("user_id", &self.user_id)
            .field("tools", &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>())
            .field("definition", &self.definition)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryTarget;
    use crate::runtime::LocalRuntime;
    use crate::tools::event_planner;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Mutex;
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    fn memory() -> MemoryContext {
        MemoryContext::new(MemoryTarget {
            endpoint: "https://memory.local".into(),
            database: "planner".into(),
            container: "memory".into(),
            session_id: "session-1".into(),
            user_id: "user-1".into(),
        })
    }

    fn registry() -> Arc<ToolRegistry> {
        Arc::new(event_planner::registry().unwrap())
    }

    fn options() -> AgentOptions {
        AgentOptions::new("session-1", "user-1", memory())
    }

    /// Runtime that records requests and answers with a fixed outcome.
    struct StubRuntime {
        fail: bool,
        requests: Mutex<Vec<AgentDefinitionRequest>>,
    }

    impl StubRuntime {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl AgentRuntime for StubRuntime {
        async fn create_agent_definition(
            &self,
            request: &AgentDefinitionRequest,
        ) -> Result<AgentDefinition, RuntimeError> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(RuntimeError::Status {
                    status: 503,
                    body: "runtime unavailable".into(),
                });
            }
            Ok(AgentDefinition {
                id: "def-42".into(),
                name: request.name.clone(),
                instructions: request.instructions.clone(),
                temperature: request.temperature,
                created_at: chrono::Utc::now(),
            })
        }
    }

    /// Collects every event as (level, message).
    #[derive(Clone, Default)]
    struct CaptureLayer {
        events: Arc<Mutex<Vec<(Level, String)>>>,
    }

    struct MessageVisitor(String);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{:?}", value);
            }
        }
    }

    impl<S: Subscriber> Layer<S> for CaptureLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);
            self.events
                .lock()
                .unwrap()
                .push((*event.metadata().level(), visitor.0));
        }
    }

    #[test]
    fn new_defaults_to_registry_tools_and_persona() {
        let agent = EventPlannerAgent::new(registry(), options());
        assert_eq!(agent.agent_name(), "Event_Planner_Agent");
        assert_eq!(agent.system_message(), system_prompt::DEFAULT_SYSTEM_MESSAGE);
        assert_eq!(agent.tools().len(), 8);
        assert_eq!(agent.session_id(), "session-1");
        assert_eq!(agent.user_id(), "user-1");
        assert!(agent.definition().is_none());
        assert!(agent.client().is_none());
        assert_eq!(agent.plugins().len(), 8);
    }

    #[test]
    fn explicit_tools_and_prompt_are_kept() {
        let registry = registry();
        let track = registry.get("track_order").unwrap().clone();
        let agent = EventPlannerAgent::new(
            registry.clone(),
            options()
                .with_tools(vec![track])
                .with_system_message("Only track orders."),
        );
        let names: Vec<&str> = agent.tools().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["track_order"]);
        assert_eq!(agent.system_message(), "Only track orders.");
        // plugins always reflect the whole registry
        assert_eq!(agent.plugins().len(), 8);
    }

    #[test]
    fn empty_tool_list_means_all_tools() {
        let agent = EventPlannerAgent::new(registry(), options().with_tools(Vec::new()));
        assert_eq!(agent.tools().len(), 8);
    }

    #[test]
    fn memory_handle_is_passed_through() {
        let memory = memory();
        let agent = EventPlannerAgent::new(
            registry(),
            AgentOptions::new("s", "u", memory.clone()),
        );
        assert!(agent.memory().same_store(&memory));
    }

    #[tokio::test]
    async fn create_registers_persona() {
        let runtime = StubRuntime::new(false);
        let agent = EventPlannerAgent::create(registry(), runtime.clone(), options())
            .await
            .unwrap();

        let requests = runtime.requests.lock().unwrap().clone();
        assert_eq!(
            requests,
            vec![AgentDefinitionRequest {
                name: "Event_Planner_Agent".into(),
                instructions: system_prompt::DEFAULT_SYSTEM_MESSAGE.into(),
                temperature: 0.0,
                response_format: None,
            }]
        );
        assert_eq!(agent.definition().map(|d| d.id.as_str()), Some("def-42"));
        assert!(agent.client().is_some());
    }

    #[tokio::test]
    async fn create_with_local_runtime() {
        let agent = EventPlannerAgent::create(
            registry(),
            Arc::new(LocalRuntime::new()),
            options().with_system_message("Plan the offsite."),
        )
        .await
        .unwrap();
        let definition = agent.definition().unwrap();
        assert_eq!(definition.instructions, "Plan the offsite.");
        assert_eq!(agent.system_message(), "Plan the offsite.");
    }

    #[tokio::test]
    async fn create_logs_then_returns_registration_error() {
        let capture = CaptureLayer::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let _guard = tracing::subscriber::set_default(subscriber);

        let runtime = StubRuntime::new(true);
        let err = EventPlannerAgent::create(registry(), runtime.clone(), options())
            .await
            .unwrap_err();

        assert!(matches!(err, RuntimeError::Status { status: 503, .. }));
        assert_eq!(runtime.requests.lock().unwrap().len(), 1);

        let events = capture.events.lock().unwrap();
        let logged = events
            .iter()
            .find(|(level, _)| *level == Level::ERROR)
            .map(|(_, message)| message.clone())
            .unwrap();
        assert!(logged.contains("Failed to create agent definition"));
        assert!(logged.contains("runtime unavailable"));
    }

    #[tokio::test]
    async fn execute_uses_agent_tools_only() {
        let registry = registry();
        let track = registry.get("track_order").unwrap().clone();
        let agent = EventPlannerAgent::new(registry, options().with_tools(vec![track]));

        let ok = agent
            .execute(&ToolCall {
                id: "1".into(),
                name: "track_order".into(),
                arguments: json!({ "order_number": "77" }),
            })
            .await;
        assert!(ok.success);
        assert!(ok.output.contains("Order 77 is currently in transit."));

        let missing = agent
            .execute(&ToolCall {
                id: "2".into(),
                name: "planning".into(),
                arguments: json!({}),
            })
            .await;
        assert!(!missing.success);
        assert_eq!(missing.output, "Error: Unknown tool: planning");
    }
}
