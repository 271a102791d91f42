//! # Codebase Bridge
//!
//! Feeds a live codebase briefing into a chat assistant's system prompt.
//!
//! An external indexer (`codebase-graph`) watches the workspace and keeps a
//! briefing file (`.codebase.md`) up to date. The bridge starts that indexer
//! when the plugin is activated and, on every chat turn, appends the current
//! briefing to the system prompt. Both halves are best-effort: if the indexer
//! cannot start or the briefing cannot be read, the chat turn goes ahead
//! without it and nothing is reported.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐  spawn (fire-and-forget)  ┌────────────────┐
//! │ activate() │──────────────────────────▶│ codebase-graph │
//! └─────┬──────┘                           │  --watch --dir │
//!       │ HookRegistry                     └───────┬────────┘
//!       ▼                                          │ writes
//! ┌─────────────────┐   read each turn    ┌────────▼───────┐
//! │ ContextInjector │◀────────────────────│  .codebase.md  │
//! └─────┬───────────┘                     └────────────────┘
//!       │ push_segment
//!       ▼
//!  host system prompt
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! codebase-bridge launch --dir .            # start the indexer in watch mode
//! codebase-bridge inject --dir . --format json
//! codebase-bridge status --dir .
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`workspace`] | Workspace directory and briefing path |
//! | [`launcher`] | Indexer process launch |
//! | [`briefing`] | Briefing file reads |
//! | [`hooks`] | Host hook contract and registry |
//! | [`injector`] | System-prompt transform hook |
//! | [`plugin`] | Plugin activation |

pub mod briefing;
pub mod config;
pub mod hooks;
pub mod injector;
pub mod launcher;
pub mod plugin;
pub mod workspace;
