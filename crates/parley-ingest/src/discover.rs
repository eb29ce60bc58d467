//! Finding transcript files under a root directory.

use crate::error::{IngestError, IngestResult};
use glob::Pattern;
use parley_config::IngestConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File filter built from the ingest settings.
#[derive(Debug, Clone)]
pub struct DiscoveryFilter {
    extensions: Vec<String>,
    ignore_patterns: Vec<Pattern>,
    follow_links: bool,
}

impl DiscoveryFilter {
    pub fn from_config(config: &IngestConfig) -> IngestResult<Self> {
        let ignore_patterns = config
            .ignore_patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| IngestError::InvalidPattern {
                    pattern: p.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<IngestResult<Vec<_>>>()?;

        Ok(Self {
            extensions: config.extensions.iter().map(|e| e.to_lowercase()).collect(),
            ignore_patterns,
            follow_links: config.follow_links,
        })
    }

    /// Whether a file path names a transcript that should be read.
    pub fn accepts(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        if self.ignore_patterns.iter().any(|p| p.matches(name)) {
            return false;
        }

        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

/// All accepted files under `root`, sorted by path.
pub fn discover_documents(root: &Path, config: &IngestConfig) -> IngestResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(IngestError::DirectoryNotFound(root.to_path_buf()));
    }

    let filter = DiscoveryFilter::from_config(config)?;
    let mut paths = Vec::new();

    for entry in walkdir::WalkDir::new(root)
        .follow_links(filter.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if filter.accepts(path) {
            paths.push(path.to_path_buf());
        } else {
            debug!("Skipping non-transcript file: {:?}", path);
        }
    }

    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_discover_skips_hidden_lock_and_foreign_files() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir(root.join("batch2")).unwrap();

        for name in [
            "b.docx",
            "a.docx",
            ".hidden.docx",
            "~$a.docx",
            "notes.pdf",
            "batch2/c.DOCX",
        ] {
            std::fs::write(root.join(name), "x").unwrap();
        }

        let found = discover_documents(root, &IngestConfig::default()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(names, vec!["a.docx", "b.docx", "batch2/c.DOCX"]);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let result = discover_documents(Path::new("/no/such/dir"), &IngestConfig::default());
        assert!(matches!(result, Err(IngestError::DirectoryNotFound(_))));
    }

    #[test]
    fn test_custom_extensions() {
        let config = IngestConfig {
            extensions: vec!["txt".to_string(), "md".to_string()],
            ..IngestConfig::default()
        };
        let filter = DiscoveryFilter::from_config(&config).unwrap();

        assert!(filter.accepts(Path::new("/x/interview.txt")));
        assert!(filter.accepts(Path::new("/x/interview.MD")));
        assert!(!filter.accepts(Path::new("/x/interview.docx")));
        assert!(!filter.accepts(Path::new("/x/.draft.txt")));
    }

    #[test]
    fn test_invalid_pattern() {
        let config = IngestConfig {
            ignore_patterns: vec!["[".to_string()],
            ..IngestConfig::default()
        };
        assert!(matches!(
            DiscoveryFilter::from_config(&config),
            Err(IngestError::InvalidPattern { .. })
        ));
    }
}
