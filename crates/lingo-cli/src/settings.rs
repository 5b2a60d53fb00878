//! Config file and credential resolution.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use lingo_core::ClientConfig;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub jwt: Option<String>,
    pub api_base: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lingo").join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Load an explicit path, or the default path if it exists.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!("Using config file {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// Args > env (folded into args by clap) > config file.
pub fn resolve_jwt(arg: Option<&str>, file: &FileConfig) -> Result<String> {
    arg.map(str::to_string)
        .or_else(|| file.jwt.clone())
        .filter(|jwt| !jwt.trim().is_empty())
        .context("No JWT specified. Use --jwt, LINGO_JWT env, or `jwt` in the config file.")
}

pub fn client_config(api_base: Option<&str>, timeout: Option<u64>, file: &FileConfig) -> ClientConfig {
    let mut config = ClientConfig::new();
    if let Some(base) = api_base.or(file.api_base.as_deref()) {
        config = config.with_base_url(base);
    }
    if let Some(secs) = timeout.or(file.timeout_secs) {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "jwt = \"a.b.c\"\ntimeout_secs = 5").unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.jwt.as_deref(), Some("a.b.c"));
        assert_eq!(config.timeout_secs, Some(5));
        assert_eq!(config.api_base, None);
    }

    #[test]
    fn test_invalid_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "jwt = ").unwrap();
        assert!(FileConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_jwt_precedence() {
        let file = FileConfig {
            jwt: Some("from-file".into()),
            ..Default::default()
        };
        assert_eq!(resolve_jwt(Some("from-arg"), &file).unwrap(), "from-arg");
        assert_eq!(resolve_jwt(None, &file).unwrap(), "from-file");
        assert!(resolve_jwt(None, &FileConfig::default()).is_err());
    }

    #[test]
    fn test_client_config_overrides() {
        let file = FileConfig {
            api_base: Some("http://file".into()),
            timeout_secs: Some(9),
            ..Default::default()
        };
        let config = client_config(Some("http://arg/"), None, &file);
        assert_eq!(config.api_base, "http://arg");
        assert_eq!(config.legacy_base, "http://arg");
        assert_eq!(config.timeout.as_secs(), 9);
    }
}
