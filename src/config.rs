//! Configuration for petflix paths.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (PETFLIX_HOME, PETFLIX_CATALOG)
//! 2. Config file (.petflix/config.yaml)
//! 3. Defaults (~/.petflix, bundled catalog)
//!
//! Config file discovery:
//! - Searches current directory and parents for .petflix/config.yaml
//! - Paths in config file are relative to the config file's parent directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Profile directory (relative to config file)
    pub home: Option<String>,
    /// Catalog override file (relative to config file)
    pub catalog: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to the profile directory (ledger documents)
    pub home: PathBuf,
    /// Catalog override file; None means the bundled catalog
    pub catalog: Option<PathBuf>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".petflix").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    // Default profile directory
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".petflix");

    // Check for config file
    let config_file = find_config_file();

    let (home, catalog) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        // Paths in the file are relative to the .petflix/ directory
        let base_dir = config_path.parent().unwrap_or(Path::new("."));

        let home = if let Ok(env_home) = std::env::var("PETFLIX_HOME") {
            PathBuf::from(env_home)
        } else if let Some(ref home_path) = config.paths.home {
            resolve_path(base_dir, home_path)
        } else {
            default_home.clone()
        };

        let catalog = if let Ok(env_catalog) = std::env::var("PETFLIX_CATALOG") {
            Some(PathBuf::from(env_catalog))
        } else {
            config
                .paths
                .catalog
                .as_ref()
                .map(|catalog_path| resolve_path(base_dir, catalog_path))
        };

        (home, catalog)
    } else {
        // No config file - use env vars or defaults
        let home = std::env::var("PETFLIX_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_home.clone());

        let catalog = std::env::var("PETFLIX_CATALOG").map(PathBuf::from).ok();

        (home, catalog)
    };

    Ok(ResolvedConfig {
        home,
        catalog,
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

/// Get the petflix profile directory (ledger documents).
pub fn petflix_home() -> Result<PathBuf> {
    Ok(config()?.home.clone())
}

/// Get the catalog override path, if one is configured
pub fn catalog_override() -> Result<Option<PathBuf>> {
    Ok(config()?.catalog.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "version: \"1\"").unwrap();
        writeln!(file, "paths:").unwrap();
        writeln!(file, "  home: ./profile").unwrap();
        writeln!(file, "  catalog: ./videos.json").unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1");
        assert_eq!(config.paths.home.as_deref(), Some("./profile"));
        assert_eq!(config.paths.catalog.as_deref(), Some("./videos.json"));
    }

    #[test]
    fn test_config_file_without_paths_section() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.yaml");
        std::fs::write(&config_path, "version: \"1\"\n").unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert!(config.paths.home.is_none());
        assert!(config.paths.catalog.is_none());
    }

    #[test]
    fn test_resolve_path_keeps_absolute_paths() {
        let base = Path::new("/somewhere/else");
        let absolute = if cfg!(windows) { "C:\\data" } else { "/data" };
        assert_eq!(resolve_path(base, absolute), PathBuf::from(absolute));
    }

    #[test]
    fn test_resolve_path_joins_relative_paths() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("profile")).unwrap();

        let resolved = resolve_path(temp.path(), "profile");
        assert!(resolved.ends_with("profile"));
    }
}
