//! Application paths management.

use directories::ProjectDirs;
use std::path::PathBuf;

/// Manages application paths following platform conventions.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl AppPaths {
    /// Create paths using platform-specific directories.
    pub fn new() -> Option<Self> {
        let proj_dirs = ProjectDirs::from("org", "parley", "parley")?;
        let config_dir = proj_dirs.config_dir().to_path_buf();

        Some(Self {
            config_file: config_dir.join("config.toml"),
            config_dir,
        })
    }

    /// Create the configuration directory.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config_dir)
    }

    /// Check if a config file has been written.
    pub fn is_initialized(&self) -> bool {
        self.config_file.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_paths_creation() {
        let paths = AppPaths::new();
        assert!(paths.is_some());

        let paths = paths.unwrap();
        assert!(paths.config_file.to_string_lossy().contains("config.toml"));
        assert!(paths.config_file.starts_with(&paths.config_dir));
    }
}
