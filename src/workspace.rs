//! The workspace directory a bridge instance is bound to.
//!
//! A [`Workspace`] is fixed at activation and never changes afterwards. It
//! is handed to the indexer as its `--dir` argument and used as the base for
//! the briefing file path. Existence and permissions are not checked here;
//! the indexer and the briefing reader each deal with that on their own.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::BriefingConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    /// Bind to `dir` exactly as given.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Make a user-supplied path absolute against the current directory.
    ///
    /// Symlinks are not resolved and the path need not exist.
    pub fn resolve(dir: &Path) -> Result<Self> {
        if dir.is_absolute() {
            return Ok(Self::new(dir));
        }
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Ok(Self::new(cwd.join(dir)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn briefing_path(&self, briefing: &BriefingConfig) -> PathBuf {
        self.dir.join(&briefing.file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_briefing_path_joins_default_file() {
        let ws = Workspace::new("/home/dev/project");
        let path = ws.briefing_path(&BriefingConfig::default());
        assert_eq!(path, PathBuf::from("/home/dev/project/.codebase.md"));
    }

    #[test]
    fn test_briefing_path_nested_file() {
        let ws = Workspace::new("/srv/app");
        let briefing = BriefingConfig {
            file: PathBuf::from("docs/map.md"),
        };
        assert_eq!(ws.briefing_path(&briefing), PathBuf::from("/srv/app/docs/map.md"));
    }

    #[test]
    fn test_resolve_keeps_absolute() {
        let ws = Workspace::resolve(Path::new("/does/not/exist")).unwrap();
        assert_eq!(ws.dir(), Path::new("/does/not/exist"));
    }

    #[test]
    fn test_resolve_relative_against_cwd() {
        let ws = Workspace::resolve(Path::new("sub/dir")).unwrap();
        assert!(ws.dir().is_absolute());
        assert!(ws.dir().ends_with("sub/dir"));
    }
}
