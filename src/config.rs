use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct BridgeConfig {
    #[serde(default)]
    pub indexer: IndexerConfig,
    #[serde(default)]
    pub briefing: BriefingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IndexerConfig {
    /// Executable looked up on `PATH` and started in watch mode.
    #[serde(default = "default_program")]
    pub program: String,
    /// When false, activation registers the injector but never spawns.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            enabled: true,
        }
    }
}

fn default_program() -> String {
    "codebase-graph".to_string()
}
fn default_enabled() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct BriefingConfig {
    /// Briefing file name, relative to the workspace root.
    #[serde(default = "default_briefing_file")]
    pub file: PathBuf,
}

impl Default for BriefingConfig {
    fn default() -> Self {
        Self {
            file: default_briefing_file(),
        }
    }
}

fn default_briefing_file() -> PathBuf {
    PathBuf::from(".codebase.md")
}

impl BridgeConfig {
    /// Built-in settings: `codebase-graph` writing `.codebase.md`.
    pub fn minimal() -> Self {
        Self::default()
    }
}

pub fn load_config(path: &Path) -> Result<BridgeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: BridgeConfig =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;
    Ok(config)
}

fn validate(config: &BridgeConfig) -> Result<()> {
    if config.indexer.program.trim().is_empty() {
        anyhow::bail!("indexer.program must not be empty");
    }

    let file = &config.briefing.file;
    if file.as_os_str().is_empty() {
        anyhow::bail!("briefing.file must not be empty");
    }
    if file.is_absolute() {
        anyhow::bail!(
            "briefing.file must be relative to the workspace, got '{}'",
            file.display()
        );
    }
    if file.components().any(|c| matches!(c, Component::ParentDir)) {
        anyhow::bail!(
            "briefing.file must stay inside the workspace, got '{}'",
            file.display()
        );
    }

    Ok(())
}
