//! Starts the external indexer in watch mode.
//!
//! The indexer is an opaque executable (`codebase-graph` by default) that
//! keeps the briefing file up to date. The bridge starts it once per
//! activation and then forgets about it:
//!
//! ```text
//! activate() ──▶ launch_indexer() ──▶ codebase-graph --watch --dir <workspace>
//!                      │                        │
//!                      ▼                        ▼ (writes over time)
//!                 returns ()              <workspace>/.codebase.md
//! ```
//!
//! All three standard streams of the child go to the null device. The child
//! stays in the caller's process group and is never monitored or restarted;
//! a detached thread waits on it only so that an exited indexer is reaped
//! instead of lingering as a zombie. Every activation spawns a fresh
//! process; nothing de-duplicates indexers watching the same workspace.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::process::{Command, Stdio};

use crate::workspace::Workspace;

/// A fully-resolved indexer invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerCommand {
    pub program: String,
    pub args: Vec<OsString>,
}

impl IndexerCommand {
    /// `<program> --watch --dir <workspace>`
    pub fn watch(program: &str, workspace: &Workspace) -> Self {
        Self {
            program: program.to_string(),
            args: vec![
                OsString::from("--watch"),
                OsString::from("--dir"),
                workspace.dir().as_os_str().to_os_string(),
            ],
        }
    }

    /// Human-readable form for CLI output.
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

/// Starts an [`IndexerCommand`] without waiting on it.
///
/// [`ProcessSpawner`] is the real implementation; tests substitute one
/// that records invocations.
pub trait Spawner: Send + Sync {
    fn spawn(&self, cmd: &IndexerCommand) -> std::io::Result<()>;
}

/// Spawns the indexer as an OS child process with null stdio.
pub struct ProcessSpawner;

impl Spawner for ProcessSpawner {
    fn spawn(&self, cmd: &IndexerCommand) -> std::io::Result<()> {
        let mut child = Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        std::thread::spawn(move || {
            let _ = child.wait();
        });
        Ok(())
    }
}

/// Fire-and-forget launch. Spawn failures are swallowed.
pub fn launch_indexer(spawner: &dyn Spawner, cmd: &IndexerCommand) {
    let _ = spawner.spawn(cmd);
}

/// Same as [`launch_indexer`] but reports why the spawn failed.
///
/// Only the CLI uses this; plugin activation goes through
/// [`launch_indexer`].
pub fn try_launch_indexer(spawner: &dyn Spawner, cmd: &IndexerCommand) -> Result<()> {
    spawner.spawn(cmd).with_context(|| {
        format!(
            "Failed to start '{}'. Is it installed and on PATH?",
            cmd.program
        )
    })
}
