//! # Codebase Bridge CLI (`codebase-bridge`)
//!
//! Command-line front end to the bridge, for hosts that run hooks as shell
//! commands and for checking a workspace by hand.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `codebase-bridge launch --dir <D>` | Start `codebase-graph --watch --dir <D>` in the background |
//! | `codebase-bridge inject --dir <D>` | Print the system-prompt segments the injector would add |
//! | `codebase-bridge status --dir <D>` | Show the briefing path, its state, and the indexer program |
//!
//! ## Examples
//!
//! ```bash
//! # As a prompt hook: emits hookSpecificOutput JSON, or nothing at all
//! codebase-bridge inject --dir "$PWD" --format json
//!
//! # Use a custom indexer binary
//! codebase-bridge --config ./bridge.toml launch --dir .
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};

use codebase_bridge::briefing::inspect_briefing;
use codebase_bridge::config::{self, BridgeConfig};
use codebase_bridge::hooks::{
    HookRegistry, IncomingContext, SystemPromptOutput, SYSTEM_TRANSFORM_HOOK,
};
use codebase_bridge::injector::ContextInjector;
use codebase_bridge::launcher::{try_launch_indexer, IndexerCommand, ProcessSpawner};
use codebase_bridge::workspace::Workspace;

/// Codebase Bridge: inject a live codebase briefing into chat system prompts.
#[derive(Parser)]
#[command(
    name = "codebase-bridge",
    about = "Codebase Bridge — inject a live codebase briefing into chat system prompts",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Optional. Without it the bridge runs `codebase-graph` and reads
    /// `.codebase.md` from the workspace root.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the indexer in watch mode for a workspace.
    ///
    /// Returns as soon as the process is spawned. Fails only if the
    /// executable could not be started.
    Launch {
        /// Workspace directory (defaults to the current directory).
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Run the system-prompt transform hook and print what it adds.
    ///
    /// Always exits successfully; a missing or unreadable briefing simply
    /// produces no output.
    Inject {
        /// Workspace directory (defaults to the current directory).
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Output format.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// `hookEventName` reported in JSON output.
        #[arg(long, default_value = "UserPromptSubmit")]
        event: String,
    },

    /// Show briefing and indexer settings for a workspace.
    Status {
        /// Workspace directory (defaults to the current directory).
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Raw segments, separated by blank lines.
    Text,
    /// `{"hookSpecificOutput": {...}}` for command-hook hosts.
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Launch { dir } => {
            let cfg = load(cli.config.as_deref())?;
            let workspace = Workspace::resolve(&dir)?;
            let cmd = IndexerCommand::watch(&cfg.indexer.program, &workspace);
            try_launch_indexer(&ProcessSpawner, &cmd)?;
            println!("Started: {}", cmd.display());
        }
        Commands::Inject { dir, format, event } => {
            // The hook must not fail on configuration problems.
            let cfg = match load(cli.config.as_deref()) {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("Warning: {:#}; using defaults", e);
                    BridgeConfig::minimal()
                }
            };
            let workspace = match Workspace::resolve(&dir) {
                Ok(ws) => ws,
                Err(_) => return Ok(()),
            };
            run_inject(&cfg, &workspace, format, &event).await?;
        }
        Commands::Status { dir } => {
            let cfg = load(cli.config.as_deref())?;
            let workspace = Workspace::resolve(&dir)?;
            let path = workspace.briefing_path(&cfg.briefing);
            println!("{:<12} {}", "WORKSPACE", workspace.dir().display());
            println!("{:<12} {}", "BRIEFING", path.display());
            println!("{:<12} {}", "STATE", inspect_briefing(&path));
            println!(
                "{:<12} {}{}",
                "INDEXER",
                IndexerCommand::watch(&cfg.indexer.program, &workspace).display(),
                if cfg.indexer.enabled { "" } else { " (disabled)" }
            );
        }
    }

    Ok(())
}

fn load(path: Option<&Path>) -> anyhow::Result<BridgeConfig> {
    match path {
        Some(p) => config::load_config(p),
        None => Ok(BridgeConfig::minimal()),
    }
}

async fn run_inject(
    cfg: &BridgeConfig,
    workspace: &Workspace,
    format: OutputFormat,
    event: &str,
) -> anyhow::Result<()> {
    // Only the injector; spawning is `launch`'s job.
    let mut registry = HookRegistry::new();
    registry.register(Box::new(ContextInjector::new(
        workspace.briefing_path(&cfg.briefing),
    )));

    let mut output = SystemPromptOutput::default();
    registry
        .dispatch(SYSTEM_TRANSFORM_HOOK, &IncomingContext::default(), &mut output)
        .await;

    if output.system.is_empty() {
        return Ok(());
    }

    // Write errors (e.g. a closed pipe) are ignored: the hook always succeeds.
    let mut stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Text => {
            let _ = write!(stdout, "{}", output.system.join("\n\n"));
        }
        OutputFormat::Json => {
            let out = serde_json::json!({
                "hookSpecificOutput": {
                    "hookEventName": event,
                    "additionalContext": output.system.join("\n\n"),
                }
            });
            let _ = writeln!(stdout, "{}", serde_json::to_string(&out)?);
        }
    }
    let _ = stdout.flush();

    Ok(())
}
