//! Tool registry: explicit registration, dispatch, and advertisement.
//!
//! Tools are registered by name into an immutable-after-build
//! [`ToolRegistry`]. Members that are not tagged for exposure (helpers) or
//! whose names are reserved are never handed out by
//! [`ToolRegistry::collect_callables`], so they cannot be dispatched or
//! advertised.

pub mod event_planner;
pub mod manifest;
pub mod traits;

pub use manifest::{decode_arguments, ArgumentDescriptor, ManifestEntry};
pub use traits::{Tool, ToolDefinition, ToolError, ToolParameter};

use crate::types::{ParamType, ToolCall, ToolResult};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Names starting with this prefix are private and never exposed.
pub const RESERVED_PREFIX: char = '_';

/// Names of the registry's own introspection routines.
pub const INTROSPECTION_NAMES: &[&str] = &["collect_callables", "build_manifest"];

/// Parameter names denoting an implicit receiver; skipped in advertisements.
pub const RECEIVER_PARAMS: &[&str] = &["self", "cls"];

fn is_reserved(name: &str) -> bool {
    name.starts_with(RESERVED_PREFIX) || INTROSPECTION_NAMES.contains(&name)
}

// ---------------------------------------------------------------------------
// Static tools
// ---------------------------------------------------------------------------

/// Validated arguments handed to a tool handler.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    values: Map<String, Value>,
}

impl Arguments {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// String argument by name; empty when absent.
    pub fn str(&self, name: &str) -> &str {
        self.values
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

/// Handler producing a tool's text output.
pub type Handler = fn(&Arguments) -> String;

/// A tool whose body is a plain function over its validated arguments.
#[derive(Clone)]
pub struct StaticTool {
    name: String,
    description: Option<String>,
    doc: Option<String>,
    parameters: Vec<ToolParameter>,
    exposed: bool,
    handler: Handler,
}

impl StaticTool {
    /// A tool tagged for exposure, with no description or parameters yet.
    pub fn new(name: impl Into<String>, handler: Handler) -> Self {
        Self {
            name: name.into(),
            description: None,
            doc: None,
            parameters: Vec::new(),
            exposed: true,
            handler,
        }
    }

    /// A plain helper: registered, but never advertised or dispatched.
    pub fn helper(name: impl Into<String>, handler: Handler) -> Self {
        Self {
            exposed: false,
            ..Self::new(name, handler)
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn param(mut self, parameter: ToolParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    fn validate(&self, args: Value) -> Result<Arguments, ToolError> {
        let mut provided = match args {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let mut values = Map::new();
        for param in &self.parameters {
            if RECEIVER_PARAMS.contains(&param.name.as_str()) {
                continue;
            }
            let value = provided
                .remove(&param.name)
                .ok_or_else(|| ToolError::MissingArgument {
                    tool: self.name.clone(),
                    argument: param.name.clone(),
                })?;

            let expected = param.resolved_type();
            let matches = match expected {
                ParamType::String => value.is_string(),
                ParamType::Int => value.is_i64() || value.is_u64(),
                ParamType::Float => value.is_number(),
                ParamType::Boolean => value.is_boolean(),
            };
            if !matches {
                return Err(ToolError::InvalidArgument {
                    tool: self.name.clone(),
                    argument: param.name.clone(),
                    expected,
                });
            }
            values.insert(param.name.clone(), value);
        }

        if !provided.is_empty() {
            debug!(
                "Ignoring {} undeclared argument(s) for {}",
                provided.len(),
                self.name
            );
        }

        Ok(Arguments { values })
    }
}

impl fmt::Debug for StaticTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .field("exposed", &self.exposed)
            .finish()
    }
}

#[async_trait]
impl Tool for StaticTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    fn parameters(&self) -> &[ToolParameter] {
        &self.parameters
    }

    fn exposed(&self) -> bool {
        self.exposed
    }

    async fn execute(&self, args: Value) -> Result<String, ToolError> {
        let args = self.validate(args)?;
        Ok((self.handler)(&args))
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Registered members of one agent, keyed by name.
///
/// Enumeration is alphabetical by name, so the manifest and callable
/// mapping are stable for an unchanged registry.
#[derive(Clone)]
pub struct ToolRegistry {
    agent: String,
    members: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Empty registry owned by the given agent identifier.
    pub fn new(agent: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            members: BTreeMap::new(),
        }
    }

    /// Build a registry from an explicit list of tools.
    pub fn from_tools(
        agent: impl Into<String>,
        tools: impl IntoIterator<Item = Arc<dyn Tool>>,
    ) -> Result<Self, ToolError> {
        let mut registry = Self::new(agent);
        for tool in tools {
            registry.register_arc(tool)?;
        }
        Ok(registry)
    }

    /// Register a tool. Names must be unique.
    pub fn register(&mut self, tool: impl Tool + 'static) -> Result<&mut Self, ToolError> {
        self.register_arc(Arc::new(tool))
    }

    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) -> Result<&mut Self, ToolError> {
        let name = tool.name().to_string();
        if self.members.contains_key(&name) {
            return Err(ToolError::Duplicate(name));
        }
        if is_reserved(&name) {
            warn!("Registered reserved name {}; it will not be exposed", name);
        }
        debug!("Registered {} for {}", name, self.agent);
        self.members.insert(name, tool);
        Ok(self)
    }

    /// Agent identifier that owns these tools.
    pub fn agent(&self) -> &str {
        &self.agent
    }

    /// Number of registered members, helpers included.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// All tagged, non-reserved tools by name.
    pub fn collect_callables(&self) -> BTreeMap<String, Arc<dyn Tool>> {
        self.exposed()
            .map(|tool| (tool.name().to_string(), tool.clone()))
            .collect()
    }

    /// Tagged, non-reserved tools in enumeration order.
    pub fn exposed(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.members
            .iter()
            .filter(|(name, tool)| !is_reserved(name) && tool.exposed())
            .map(|(_, tool)| tool)
    }

    /// Look up an exposed tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.members
            .get(name)
            .filter(|tool| !is_reserved(name) && tool.exposed())
    }

    /// Invoke an exposed tool by name.
    pub async fn invoke(&self, name: &str, args: Value) -> Result<String, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        tool.execute(args).await
    }

    /// Execute a model-issued tool call, folding failures into the result.
    pub async fn execute(&self, call: &ToolCall) -> ToolResult {
        let result = self.invoke(&call.name, call.arguments.clone()).await;
        tool_result(call, result)
    }

    /// Function-calling definitions for the exposed tools.
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.exposed()
            .map(|tool| {
                let mut properties = Map::new();
                let mut required = Vec::new();
                for param in advertised_params(tool.as_ref()) {
                    let description = param
                        .description
                        .clone()
                        .unwrap_or_else(|| param.name.clone());
                    properties.insert(
                        param.name.clone(),
                        json!({
                            "type": param.resolved_type().json_schema_type(),
                            "description": description,
                        }),
                    );
                    required.push(Value::String(param.name.clone()));
                }

                ToolDefinition {
                    name: tool.name().to_string(),
                    description: resolve_description(tool.as_ref()).to_string(),
                    parameters: json!({
                        "type": "object",
                        "properties": properties,
                        "required": required,
                    }),
                }
            })
            .collect()
    }

    /// Manifest entries for the exposed tools, in enumeration order.
    pub fn manifest_entries(&self) -> Vec<ManifestEntry> {
        self.exposed()
            .map(|tool| ManifestEntry::for_tool(&self.agent, tool.as_ref()))
            .collect()
    }

    /// JSON manifest advertising the exposed tools.
    pub fn build_manifest(&self) -> String {
        manifest::render(&self.manifest_entries())
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("agent", &self.agent)
            .field("members", &self.members.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Fold a tool outcome into the result reported back to the model.
pub fn tool_result(call: &ToolCall, result: Result<String, ToolError>) -> ToolResult {
    match result {
        Ok(output) => ToolResult {
            tool_call_id: call.id.clone(),
            output,
            success: true,
        },
        Err(e) => {
            warn!("Tool {} failed: {}", call.name, e);
            ToolResult {
                tool_call_id: call.id.clone(),
                output: format!("Error: {}", e),
                success: false,
            }
        }
    }
}

/// Description from the exposure tag, else the doc text, else empty.
pub fn resolve_description(tool: &dyn Tool) -> &str {
    tool.description()
        .filter(|d| !d.is_empty())
        .or_else(|| tool.doc().map(str::trim))
        .unwrap_or_default()
}

/// Parameters as advertised: receiver parameters are skipped.
pub(crate) fn advertised_params(tool: &dyn Tool) -> impl Iterator<Item = &ToolParameter> {
    tool.parameters()
        .iter()
        .filter(|p| !RECEIVER_PARAMS.contains(&p.name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn echo(args: &Arguments) -> String {
        format!("echo {}", args.str("text"))
    }

    fn constant(_: &Arguments) -> String {
        "constant".into()
    }

    fn sample_registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new("Test_Agent");
        registry
            .register(
                StaticTool::new("echo", echo)
                    .describe("Echo text back.")
                    .param(ToolParameter::new("text", ParamType::String)),
            )
            .unwrap()
            .register(StaticTool::new("constant", constant).with_doc("  Doc only.  "))
            .unwrap()
            .register(StaticTool::helper("format_helper", constant))
            .unwrap()
            .register(StaticTool::new("_private", constant))
            .unwrap()
            .register(StaticTool::new("collect_callables", constant))
            .unwrap()
            .register(StaticTool::new("build_manifest", constant))
            .unwrap();
        registry
    }

    #[test]
    fn collect_callables_keeps_only_tagged_public_tools() {
        let registry = sample_registry();
        let names: Vec<String> = registry.collect_callables().into_keys().collect();
        assert_eq!(names, vec!["constant".to_string(), "echo".to_string()]);
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn collect_callables_is_stable() {
        let registry = sample_registry();
        let first: Vec<String> = registry.collect_callables().into_keys().collect();
        let second: Vec<String> = registry.collect_callables().into_keys().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = sample_registry();
        let err = registry
            .register(StaticTool::new("echo", constant))
            .unwrap_err();
        assert!(matches!(err, ToolError::Duplicate(name) if name == "echo"));
    }

    #[tokio::test]
    async fn invoke_dispatches_by_name() {
        let registry = sample_registry();
        let out = registry
            .invoke("echo", json!({ "text": "hi" }))
            .await
            .unwrap();
        assert_eq!(out, "echo hi");
    }

    #[tokio::test]
    async fn invoke_rejects_hidden_and_unknown_tools() {
        let registry = sample_registry();
        for name in ["format_helper", "_private", "build_manifest", "missing"] {
            let err = registry.invoke(name, json!({})).await.unwrap_err();
            assert!(matches!(err, ToolError::UnknownTool(_)), "{name}");
        }
    }

    #[tokio::test]
    async fn invoke_validates_arguments() {
        let registry = sample_registry();
        let err = registry.invoke("echo", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument { .. }));

        let err = registry
            .invoke("echo", json!({ "text": 5 }))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ToolError::InvalidArgument {
                expected: ParamType::String,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn execute_folds_errors_into_result() {
        let registry = sample_registry();
        let call = ToolCall {
            id: "call_1".into(),
            name: "nope".into(),
            arguments: json!({}),
        };
        let result = registry.execute(&call).await;
        assert!(!result.success);
        assert_eq!(result.tool_call_id, "call_1");
        assert_eq!(result.output, "Error: Unknown tool: nope");
    }

    #[test]
    fn description_falls_back_to_doc() {
        let registry = sample_registry();
        let documented = registry.get("constant").unwrap();
        assert_eq!(resolve_description(documented.as_ref()), "Doc only.");

        let bare = StaticTool::new("bare", constant);
        assert_eq!(resolve_description(&bare), "");
    }

    #[test]
    fn doc_only_tool_lists_like_its_manifest_entry() {
        let registry = sample_registry();
        let entries = registry.manifest_entries();
        for (name, tool) in registry.collect_callables() {
            let entry = entries.iter().find(|e| e.function == name).unwrap();
            assert_eq!(resolve_description(tool.as_ref()), entry.description);
        }
        let documented = entries.iter().find(|e| e.function == "constant").unwrap();
        assert_eq!(documented.description, "Doc only.");
    }

    #[test]
    fn tool_definitions_use_json_schema_types() {
        let mut registry = ToolRegistry::new("Test_Agent");
        registry
            .register(
                StaticTool::new("book", constant)
                    .describe("Book seats.")
                    .param(ToolParameter::untyped("self"))
                    .param(ToolParameter::new("seats", ParamType::Int))
                    .param(ToolParameter::new("vip", ParamType::Boolean)),
            )
            .unwrap();

        let defs = registry.tool_definitions();
        assert_eq!(defs.len(), 1);
        assert_eq!(
            defs[0].parameters,
            json!({
                "type": "object",
                "properties": {
                    "seats": { "type": "integer", "description": "seats" },
                    "vip": { "type": "boolean", "description": "vip" },
                },
                "required": ["seats", "vip"],
            })
        );
    }
}
