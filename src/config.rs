use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

/// On-disk settings. Everything is optional; an absent file means the
/// remote responder against the production endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    /// Reply source: "api" (default) or "offline".
    pub responder: Option<String>,
    /// Override for the assistant API base URL.
    pub api_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("nido").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert!(config.responder.is_none());
        assert!(config.api_url.is_none());
    }

    #[test]
    fn test_load_reads_both_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"responder": "offline", "api_url": "http://localhost:8787"}"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.responder.as_deref(), Some("offline"));
        assert_eq!(config.api_url.as_deref(), Some("http://localhost:8787"));
    }

    #[test]
    fn test_partial_file_leaves_rest_unset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"responder": "api"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.responder.as_deref(), Some("api"));
        assert!(config.api_url.is_none());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "responder = offline").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
