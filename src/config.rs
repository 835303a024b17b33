use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const BASE_URL_ENV: &str = "COINSIFT_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub reapply_filters_on_load: bool,
}

fn default_timeout() -> u64 {
    15
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            request_timeout_secs: default_timeout(),
            log_level: default_log_level(),
            theme: default_theme(),
            reapply_filters_on_load: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Reads `path`, writing a default file there first if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let mut cfg: Config = serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            if cfg.request_timeout_secs == 0 {
                cfg.request_timeout_secs = 1;
            }
            Ok(cfg)
        } else {
            let cfg = Config::default();
            cfg.save_to(path)?;
            Ok(cfg)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Environment wins over the file; an explicit flag wins over both.
    pub fn resolve_base_url(&mut self, env_value: Option<String>, flag: Option<String>) {
        if let Some(url) = flag.or(env_value) {
            self.api_base_url = Some(url);
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn config_dir() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("coinsift");
        path
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let cfg = Config::load_from(&path).unwrap();

        assert_eq!(cfg, Config::default());
        assert!(path.exists());
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "api_base_url: https://example.com/coins\nrequest_timeout_secs: 0\n",
        )
        .unwrap();

        let cfg = Config::load_from(&path).unwrap();

        assert_eq!(cfg.api_base_url.as_deref(), Some("https://example.com/coins"));
        assert_eq!(cfg.request_timeout_secs, 1);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.theme, "dark");
        assert!(!cfg.reapply_filters_on_load);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "request_timeout_secs: [not a number]\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn flag_beats_env_beats_file() {
        let mut cfg = Config {
            api_base_url: Some("https://file".into()),
            ..Config::default()
        };
        cfg.resolve_base_url(None, None);
        assert_eq!(cfg.api_base_url.as_deref(), Some("https://file"));

        cfg.resolve_base_url(Some("https://env".into()), None);
        assert_eq!(cfg.api_base_url.as_deref(), Some("https://env"));

        cfg.resolve_base_url(Some("https://env".into()), Some("https://flag".into()));
        assert_eq!(cfg.api_base_url.as_deref(), Some("https://flag"));
    }
}
