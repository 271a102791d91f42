//! Reading the briefing file written by the indexer.
//!
//! The bridge never writes, locks or validates the briefing. Each read is a
//! single `fs::read`, so a read that races the indexer may observe a
//! partially written file. Bytes that are not valid UTF-8 (for instance a
//! multi-byte character cut by such a race) decode to U+FFFD instead of
//! discarding the briefing.

use chrono::{DateTime, Utc};
use std::path::Path;

/// Read the whole briefing as UTF-8, lossily.
///
/// Every I/O failure (missing file, permission denied, a directory in its
/// place, anything else) collapses to `None`. An empty file is `Some("")`,
/// not `None`.
pub fn read_briefing(path: &Path) -> Option<String> {
    std::fs::read(path)
        .ok()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

/// Diagnostic view of the briefing file for `codebase-bridge status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BriefingStatus {
    Missing,
    Unreadable(String),
    Present {
        bytes: usize,
        modified: Option<DateTime<Utc>>,
    },
}

pub fn inspect_briefing(path: &Path) -> BriefingStatus {
    let meta = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BriefingStatus::Missing,
        Err(e) => return BriefingStatus::Unreadable(e.to_string()),
    };

    match std::fs::read(path) {
        Ok(bytes) => BriefingStatus::Present {
            bytes: bytes.len(),
            modified: meta.modified().ok().map(DateTime::<Utc>::from),
        },
        Err(e) => BriefingStatus::Unreadable(e.to_string()),
    }
}

impl std::fmt::Display for BriefingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BriefingStatus::Missing => write!(f, "missing"),
            BriefingStatus::Unreadable(reason) => write!(f, "unreadable ({})", reason),
            BriefingStatus::Present { bytes, modified } => {
                write!(f, "present, {} bytes", bytes)?;
                if let Some(ts) = modified {
                    write!(f, ", modified {}", ts.format("%Y-%m-%d %H:%M:%S UTC"))?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_is_none() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(read_briefing(&tmp.path().join(".codebase.md")), None);
    }

    #[test]
    fn test_empty_is_some_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".codebase.md");
        fs::write(&path, "").unwrap();
        assert_eq!(read_briefing(&path), Some(String::new()));
    }

    #[test]
    fn test_content_verbatim() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".codebase.md");
        let body = "# project\n\n  src/main.rs  fn main()\n";
        fs::write(&path, body).unwrap();
        assert_eq!(read_briefing(&path).as_deref(), Some(body));
    }

    #[test]
    fn test_directory_is_none() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".codebase.md");
        fs::create_dir(&path).unwrap();
        assert_eq!(read_briefing(&path), None);
    }

    #[test]
    fn test_truncated_utf8_decodes_lossily() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".codebase.md");
        // "café" cut after the first byte of 'é'
        fs::write(&path, b"Project: caf\xC3").unwrap();
        assert_eq!(
            read_briefing(&path).as_deref(),
            Some("Project: caf\u{FFFD}")
        );
    }

    #[test]
    fn test_inspect_states() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".codebase.md");
        assert_eq!(inspect_briefing(&path), BriefingStatus::Missing);
        assert_eq!(inspect_briefing(&path).to_string(), "missing");

        fs::write(&path, "abc").unwrap();
        match inspect_briefing(&path) {
            BriefingStatus::Present { bytes, modified } => {
                assert_eq!(bytes, 3);
                assert!(modified.is_some());
            }
            other => panic!("expected Present, got {:?}", other),
        }
        assert!(inspect_briefing(&path)
            .to_string()
            .starts_with("present, 3 bytes"));
    }

    #[test]
    fn test_inspect_directory_unreadable() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".codebase.md");
        fs::create_dir(&path).unwrap();
        assert!(matches!(
            inspect_briefing(&path),
            BriefingStatus::Unreadable(_)
        ));
    }
}
