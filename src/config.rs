//! Application path resolution.
//!
//! Priority for every path:
//! 1. CLI --data-dir argument
//! 2. CHALKBOOK_DATA_DIR environment variable
//! 3. Local folder IF chalkbook files exist there (portable mode)
//! 4. Platform-specific directories from dirs-next
//!
//! Platform defaults:
//! - Linux: ~/.local/share/chalkbook
//! - macOS: ~/Library/Application Support/chalkbook
//! - Windows: %APPDATA%\chalkbook

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Configuration for overriding default application paths
#[derive(Debug, Clone)]
pub struct PathConfig {
    /// Custom data directory (from CLI or ENV)
    pub data_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Create PathConfig from CLI arguments and environment variables
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let data_dir =
            cli_dir.or_else(|| std::env::var("CHALKBOOK_DATA_DIR").ok().map(PathBuf::from));
        Self { data_dir }
    }
}

/// Path to a configuration file (window state, log file).
pub fn config_file(name: &str, config: &PathConfig) -> PathBuf {
    base_dir(config).join(name)
}

/// Directory holding the JSON content records (one file per storage key).
pub fn content_dir(config: &PathConfig) -> PathBuf {
    base_dir(config).join("content")
}

/// Ensure the application directories exist.
pub fn ensure_dirs(config: &PathConfig) -> Result<()> {
    let base = base_dir(config);
    if !base.exists() {
        std::fs::create_dir_all(&base)
            .with_context(|| format!("Failed to create data directory: {}", base.display()))?;
    }
    let content = content_dir(config);
    if !content.exists() {
        std::fs::create_dir_all(&content)
            .with_context(|| format!("Failed to create content directory: {}", content.display()))?;
    }
    Ok(())
}

/// Check if chalkbook files exist in the given directory (portable mode)
fn has_local_files(dir: &PathBuf) -> bool {
    let markers = ["chalkbook.json", "chalkbook.log", "content"];
    markers.iter().any(|f| dir.join(f).exists())
}

fn base_dir(config: &PathConfig) -> PathBuf {
    // Priority 1: Custom directory from CLI or ENV
    if let Some(dir) = &config.data_dir {
        return dir.clone();
    }

    // Priority 2: Local folder IF chalkbook files exist there
    if let Ok(current_dir) = std::env::current_dir() {
        if has_local_files(&current_dir) {
            return current_dir;
        }
    }

    // Priority 3: Platform-specific data directory
    if let Some(dir) = dirs_next::data_dir() {
        return dir.join("chalkbook");
    }

    // Fallback: "." if everything else fails
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_with_custom_dir() {
        let config = PathConfig { data_dir: Some(PathBuf::from("/custom")) };
        assert_eq!(config_file("chalkbook.json", &config), PathBuf::from("/custom/chalkbook.json"));
    }

    #[test]
    fn test_content_dir_nests_under_custom_dir() {
        let config = PathConfig { data_dir: Some(PathBuf::from("/custom")) };
        assert_eq!(content_dir(&config), PathBuf::from("/custom/content"));
    }

    #[test]
    fn test_env_var_used_when_cli_absent() {
        // from_env_and_cli prefers the CLI value when both are present
        let config = PathConfig::from_env_and_cli(Some(PathBuf::from("/cli")));
        assert_eq!(config.data_dir, Some(PathBuf::from("/cli")));
    }

    #[test]
    fn test_platform_defaults_mention_app_name() {
        let config = PathConfig { data_dir: None };
        let path = config_file("chalkbook.json", &config);
        let s = path.to_string_lossy();
        assert!(s.contains("chalkbook"));
    }
}
