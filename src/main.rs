//! Event planner agent CLI.
//!
//! Usage:
//!   event-planner init [--force]              Write a default planner.toml
//!   event-planner tools                       List the exposed tools
//!   event-planner manifest                    Print the tool manifest JSON
//!   event-planner definitions                 Print function-calling definitions
//!   event-planner prompt                      Print the system message
//!   event-planner invoke <tool> [arg]         Invoke a tool
//!   event-planner create --session S --user U Register the persona

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use event_planner::agent::{AgentOptions, EventPlannerAgent};
use event_planner::config::{self, PlannerConfig, RuntimeKind};
use event_planner::memory::{MemoryContext, MemoryTarget};
use event_planner::runtime::{AgentRuntime, HttpAgentRuntime, LocalRuntime};
use event_planner::tools::{self, ToolRegistry};
use event_planner::types::ToolCall;

/// User recorded for commands run outside a runtime session.
const LOCAL_USER: &str = "local";

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "event-planner")]
#[command(version = "0.1.0")]
#[command(about = "Event planning agent persona and tool manifest")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the home directory holding planner.toml.
    #[arg(long)]
    home: Option<String>,

    /// Log level (debug, info, warn, error). Overrides the config file.
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default planner.toml into the home directory.
    Init {
        /// Overwrite an existing config file.
        #[arg(long)]
        force: bool,
    },

    /// List the exposed tools.
    Tools,

    /// Print the tool manifest JSON.
    Manifest,

    /// Print function-calling tool definitions.
    Definitions,

    /// Print the agent's system message.
    Prompt,

    /// Invoke a tool by name.
    Invoke {
        /// Tool name.
        tool: String,

        /// Value for the tool's parameter, if it takes one.
        arg: Option<String>,
    },

    /// Register the persona with the configured agent runtime.
    Create {
        #[arg(long)]
        session: String,

        #[arg(long)]
        user: String,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let home_dir = config::resolve_home_dir(cli.home.as_deref());
    // `init` may be replacing an unreadable file, so it starts from defaults.
    let cfg = match cli.command {
        Commands::Init { .. } => PlannerConfig::default(),
        _ => config::load_config(&config::config_path(&home_dir))
            .with_context(|| format!("Failed to load config from {}", home_dir.display()))?,
    };

    // Initialize logging
    let level = cli.log_level.as_deref().unwrap_or(&cfg.log_level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let registry = Arc::new(tools::event_planner::registry()?);

    match cli.command {
        Commands::Init { force } => cmd_init(&home_dir, force),
        Commands::Tools => cmd_tools(&registry),
        Commands::Manifest => {
            println!("{}", registry.build_manifest());
            Ok(())
        }
        Commands::Definitions => {
            let defs = registry.tool_definitions();
            println!("{}", serde_json::to_string_pretty(&defs)?);
            Ok(())
        }
        Commands::Prompt => {
            let agent = local_agent(registry, &cfg);
            println!("{}", agent.system_message());
            Ok(())
        }
        Commands::Invoke { tool, arg } => cmd_invoke(registry, &cfg, &tool, arg).await,
        Commands::Create { session, user } => cmd_create(registry, &cfg, &session, &user).await,
    }
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

fn cmd_init(home_dir: &Path, force: bool) -> Result<()> {
    let path = config::init_config(home_dir, force)?;
    println!("{} Wrote {}", ">>>".green().bold(), path.display());
    Ok(())
}

fn cmd_tools(registry: &ToolRegistry) -> Result<()> {
    println!();
    println!("{}", format!("=== {} tools ===", registry.agent()).bold());
    println!();
    for (name, tool) in registry.collect_callables() {
        let params: Vec<&str> = tool.parameters().iter().map(|p| p.name.as_str()).collect();
        println!(
            "  {}({})  {}",
            name.green().bold(),
            params.join(", "),
            tools::resolve_description(tool.as_ref()).dimmed(),
        );
    }
    println!();
    Ok(())
}

async fn cmd_invoke(
    registry: Arc<ToolRegistry>,
    cfg: &PlannerConfig,
    name: &str,
    arg: Option<String>,
) -> Result<()> {
    let Some(tool) = registry.get(name) else {
        bail!("Unknown tool: {}", name);
    };

    let mut arguments = Map::new();
    if let (Some(param), Some(value)) = (tool.parameters().first(), arg) {
        arguments.insert(param.name.clone(), Value::String(value));
    }

    let agent = local_agent(registry.clone(), cfg);
    let call = ToolCall {
        id: format!("call_{}", ulid::Ulid::new()),
        name: name.to_string(),
        arguments: Value::Object(arguments),
    };
    info!("Invoking {} ({})", call.name, call.id);

    let result = agent.execute(&call).await;
    if !result.success {
        bail!("{}", result.output);
    }
    println!("{}", result.output);
    Ok(())
}

async fn cmd_create(
    registry: Arc<ToolRegistry>,
    cfg: &PlannerConfig,
    session: &str,
    user: &str,
) -> Result<()> {
    let runtime: Arc<dyn AgentRuntime> = match cfg.runtime {
        RuntimeKind::Local => Arc::new(LocalRuntime::new()),
        RuntimeKind::Http => Arc::new(HttpAgentRuntime::new(
            &cfg.runtime_url,
            &cfg.runtime_api_key,
        )),
    };

    let mut options = AgentOptions::new(session, user, memory_context(cfg, session, user));
    options.system_message = cfg.system_message_override();

    let agent = EventPlannerAgent::create(registry, runtime, options)
        .await
        .context("Failed to register event planner agent")?;

    println!(
        "{} Registered '{}' for session {} ({} tools)",
        ">>>".green().bold(),
        agent.agent_name(),
        agent.session_id(),
        agent.tools().len(),
    );
    if let Some(definition) = agent.definition() {
        println!("    Definition: {}", definition.id.bold());
        println!("    Created:    {}", definition.created_at.to_rfc3339());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn memory_context(cfg: &PlannerConfig, session: &str, user: &str) -> MemoryContext {
    MemoryContext::new(MemoryTarget {
        endpoint: cfg.memory_endpoint.clone(),
        database: cfg.memory_database.clone(),
        container: cfg.memory_container.clone(),
        session_id: session.to_string(),
        user_id: user.to_string(),
    })
}

/// Descriptor for one-off local commands, outside any runtime session.
fn local_agent(registry: Arc<ToolRegistry>, cfg: &PlannerConfig) -> EventPlannerAgent {
    let session = format!("local-{}", ulid::Ulid::new());
    let memory = memory_context(cfg, &session, LOCAL_USER);
    let mut options = AgentOptions::new(session, LOCAL_USER, memory);
    options.system_message = cfg.system_message_override();
    EventPlannerAgent::new(registry, options)
}
