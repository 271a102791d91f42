//! Host hook contract.
//!
//! The chat host calls plugin hooks by key while it assembles each turn. The
//! bridge only cares about one of them, [`SYSTEM_TRANSFORM_HOOK`], which
//! hands the plugin the ordered list of system-prompt segments so it can
//! append more.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │              HookRegistry                │
//! │   "experimental.chat.system.transform"   │
//! │            └─▶ ContextInjector           │
//! └──────────────┬───────────────────────────┘
//!                ▼
//!   dispatch(key, incoming, &mut output)
//! ```
//!
//! Hooks return nothing. A handler that hits a problem deals with it
//! internally and leaves `output` as it found it; nothing escapes to the host.
//!
//! # Usage
//!
//! ```rust
//! use codebase_bridge::hooks::{HookRegistry, IncomingContext, SystemPromptOutput};
//!
//! # async fn run(registry: HookRegistry) {
//! let mut output = SystemPromptOutput::new(vec!["You are a helpful assistant.".into()]);
//! registry
//!     .dispatch(
//!         codebase_bridge::hooks::SYSTEM_TRANSFORM_HOOK,
//!         &IncomingContext::default(),
//!         &mut output,
//!     )
//!     .await;
//! # }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key of the pre-dispatch system-prompt transform hook.
pub const SYSTEM_TRANSFORM_HOOK: &str = "experimental.chat.system.transform";

/// Whatever the host passes about the incoming message. Opaque to the bridge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncomingContext {
    pub payload: Value,
}

/// The mutable half of the transform hook: the system prompt being built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemPromptOutput {
    pub system: Vec<String>,
}

impl SystemPromptOutput {
    pub fn new(system: Vec<String>) -> Self {
        Self { system }
    }

    /// Append a segment after everything already present.
    pub fn push_segment(&mut self, segment: String) {
        self.system.push(segment);
    }
}

/// A handler the host invokes under [`key`](Hook::key).
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use codebase_bridge::hooks::{Hook, IncomingContext, SystemPromptOutput};
///
/// pub struct Signature;
///
/// #[async_trait]
/// impl Hook for Signature {
///     fn key(&self) -> &str { codebase_bridge::hooks::SYSTEM_TRANSFORM_HOOK }
///
///     async fn call(&self, _incoming: &IncomingContext, output: &mut SystemPromptOutput) {
///         output.push_segment("Answer tersely.".to_string());
///     }
/// }
/// ```
#[async_trait]
pub trait Hook: Send + Sync {
    /// The hook key this handler is registered under.
    fn key(&self) -> &str;

    /// Run the handler. Must not panic; failures leave `output` untouched.
    async fn call(&self, incoming: &IncomingContext, output: &mut SystemPromptOutput);
}

/// The mapping returned from plugin activation.
pub struct HookRegistry {
    hooks: Vec<Box<dyn Hook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    pub fn register(&mut self, hook: Box<dyn Hook>) {
        self.hooks.push(hook);
    }

    pub fn hooks(&self) -> &[Box<dyn Hook>] {
        &self.hooks
    }

    /// First handler registered under `key`.
    pub fn find(&self, key: &str) -> Option<&dyn Hook> {
        self.hooks
            .iter()
            .find(|h| h.key() == key)
            .map(|h| h.as_ref())
    }

    /// Distinct keys in registration order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for hook in &self.hooks {
            if !keys.contains(&hook.key()) {
                keys.push(hook.key());
            }
        }
        keys
    }

    /// Run every handler registered under `key`, in registration order.
    ///
    /// Returns `false` when nothing is registered under `key`.
    pub async fn dispatch(
        &self,
        key: &str,
        incoming: &IncomingContext,
        output: &mut SystemPromptOutput,
    ) -> bool {
        let mut matched = false;
        for hook in self.hooks.iter().filter(|h| h.key() == key) {
            hook.call(incoming, output).await;
            matched = true;
        }
        matched
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
