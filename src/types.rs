//! Shared types used across the event planner agent.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Agent identity
// ---------------------------------------------------------------------------

/// Agent personas known to the orchestration runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentType {
    #[serde(rename = "Event_Planner_Agent")]
    EventPlanner,
}

impl AgentType {
    /// Identifier the runtime uses for this persona.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EventPlanner => "Event_Planner_Agent",
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tool parameter types
// ---------------------------------------------------------------------------

/// Normalized parameter type advertised in the tool manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ParamType {
    #[default]
    String,
    Int,
    Float,
    Boolean,
}

impl ParamType {
    /// Coerce a textual type name (`"int"`, `"Optional[float]"`, `"bool"`, ...).
    ///
    /// Matching is by substring on the lowercased name, checked in the order
    /// int, float, bool. Anything unrecognized is a string.
    pub fn from_type_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("int") {
            Self::Int
        } else if lower.contains("float") {
            Self::Float
        } else if lower.contains("bool") {
            Self::Boolean
        } else {
            Self::String
        }
    }

    /// Name used in the tool manifest.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Boolean => "boolean",
        }
    }

    /// JSON Schema type used for function-calling definitions.
    pub fn json_schema_type(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "integer",
            Self::Float => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl From<String> for ParamType {
    fn from(name: String) -> Self {
        Self::from_type_name(&name)
    }
}

impl From<&str> for ParamType {
    fn from(name: &str) -> Self {
        Self::from_type_name(name)
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tool calls
// ---------------------------------------------------------------------------

/// A tool call requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

/// Result of executing a tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub output: String,
    pub success: bool,
}
