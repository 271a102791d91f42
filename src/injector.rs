use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::briefing::read_briefing;
use crate::hooks::{Hook, IncomingContext, SystemPromptOutput, SYSTEM_TRANSFORM_HOOK};

/// Appends the current briefing to the system prompt on every turn.
///
/// The file is re-read on each call; there is no cache and no mtime check.
/// A missing or unreadable briefing contributes nothing, while an empty one
/// contributes one empty segment.
pub struct ContextInjector {
    briefing_path: PathBuf,
}

impl ContextInjector {
    pub fn new(briefing_path: PathBuf) -> Self {
        Self { briefing_path }
    }

    pub fn briefing_path(&self) -> &Path {
        &self.briefing_path
    }

    pub fn briefing(&self) -> Option<String> {
        read_briefing(&self.briefing_path)
    }
}

#[async_trait]
impl Hook for ContextInjector {
    fn key(&self) -> &str {
        SYSTEM_TRANSFORM_HOOK
    }

    async fn call(&self, _incoming: &IncomingContext, output: &mut SystemPromptOutput) {
        if let Some(briefing) = self.briefing() {
            output.push_segment(briefing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn injector(tmp: &TempDir) -> ContextInjector {
        ContextInjector::new(tmp.path().join(".codebase.md"))
    }

    #[tokio::test]
    async fn test_missing_briefing_adds_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut output = SystemPromptOutput::new(vec!["base".into()]);
        injector(&tmp)
            .call(&IncomingContext::default(), &mut output)
            .await;
        assert_eq!(output.system, vec!["base"]);
    }

    #[tokio::test]
    async fn test_empty_briefing_adds_empty_segment() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".codebase.md"), "").unwrap();
        let mut output = SystemPromptOutput::default();
        injector(&tmp)
            .call(&IncomingContext::default(), &mut output)
            .await;
        assert_eq!(output.system, vec![String::new()]);
    }

    #[tokio::test]
    async fn test_picks_up_rewrites_between_calls() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".codebase.md");
        let hook = injector(&tmp);
        let mut output = SystemPromptOutput::default();

        fs::write(&path, "v1").unwrap();
        hook.call(&IncomingContext::default(), &mut output).await;
        fs::write(&path, "v2").unwrap();
        hook.call(&IncomingContext::default(), &mut output).await;

        assert_eq!(output.system, vec!["v1", "v2"]);
    }

    #[test]
    fn test_registered_under_transform_key() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(injector(&tmp).key(), SYSTEM_TRANSFORM_HOOK);
    }
}
