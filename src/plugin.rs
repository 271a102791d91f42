//! Plugin activation.
//!
//! The host activates the bridge once per open workspace. Activation starts
//! the indexer (fire-and-forget) and returns the hook registry right away,
//! without waiting for the child process to come up.

use std::path::PathBuf;

use crate::config::BridgeConfig;
use crate::hooks::HookRegistry;
use crate::injector::ContextInjector;
use crate::launcher::{launch_indexer, IndexerCommand, ProcessSpawner, Spawner};
use crate::workspace::Workspace;

/// What the host hands the plugin at activation.
#[derive(Debug, Clone)]
pub struct PluginContext {
    pub directory: PathBuf,
}

impl PluginContext {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

/// Activate with the real process spawner.
pub fn activate(ctx: &PluginContext, config: &BridgeConfig) -> HookRegistry {
    activate_with(ctx, config, &ProcessSpawner)
}

/// Activate with a caller-supplied spawner.
///
/// Never fails: a spawn error is dropped and the injector is registered
/// regardless, since it already copes with a briefing that never appears.
pub fn activate_with(
    ctx: &PluginContext,
    config: &BridgeConfig,
    spawner: &dyn Spawner,
) -> HookRegistry {
    let workspace = Workspace::new(ctx.directory.clone());

    if config.indexer.enabled {
        let cmd = IndexerCommand::watch(&config.indexer.program, &workspace);
        launch_indexer(spawner, &cmd);
    }

    let mut registry = HookRegistry::new();
    registry.register(Box::new(ContextInjector::new(
        workspace.briefing_path(&config.briefing),
    )));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::SYSTEM_TRANSFORM_HOOK;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting(AtomicUsize);

    impl Spawner for Counting {
        fn spawn(&self, _cmd: &IndexerCommand) -> std::io::Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_disabled_indexer_skips_spawn() {
        let mut cfg = BridgeConfig::minimal();
        cfg.indexer.enabled = false;
        let spawner = Counting(AtomicUsize::new(0));

        let registry = activate_with(&PluginContext::new("/w"), &cfg, &spawner);

        assert_eq!(spawner.0.load(Ordering::SeqCst), 0);
        assert!(registry.find(SYSTEM_TRANSFORM_HOOK).is_some());
    }

    #[test]
    fn test_repeated_activation_spawns_each_time() {
        let cfg = BridgeConfig::minimal();
        let spawner = Counting(AtomicUsize::new(0));
        let ctx = PluginContext::new("/w");

        activate_with(&ctx, &cfg, &spawner);
        activate_with(&ctx, &cfg, &spawner);

        assert_eq!(spawner.0.load(Ordering::SeqCst), 2);
    }
}
