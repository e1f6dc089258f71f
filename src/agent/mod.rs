pub mod planner;
pub mod system_prompt;

pub use planner::{AgentOptions, EventPlannerAgent};
pub use system_prompt::{default_system_message, DEFAULT_SYSTEM_MESSAGE};
