use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use directories::BaseDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::utils::normalize_url;

/// Production backend, used unless a flag, env var, or config file overrides it.
pub const DEFAULT_BASE_URL: &str = "https://hse-go-backend-39f0717351cb.herokuapp.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    fn config_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("hsego.toml"))
    }

    /// Normalize and validate a user-supplied base URL.
    pub fn with_base_url(url: &str) -> anyhow::Result<Self> {
        let base_url = normalize_url(url);
        Url::parse(&base_url).with_context(|| format!("invalid base URL {url:?}"))?;
        Ok(Self { base_url })
    }

    /// Effective config: an explicit override (flag or environment) wins,
    /// then the config file, then the built-in default host. The result is
    /// passed into the client explicitly; nothing below `main` reads the
    /// process environment.
    pub fn resolve(override_url: Option<&str>) -> anyhow::Result<Self> {
        match override_url {
            Some(url) => Self::with_base_url(url),
            None => Self::with_base_url(&Self::load().base_url),
        }
    }

    /// Read the config file, falling back to defaults when it is missing or
    /// unreadable.
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if let Ok(text) = fs::read_to_string(&path) {
                match toml::from_str::<AppConfig>(&text) {
                    Ok(config) => return config,
                    Err(e) => warn!("ignoring malformed config at {}: {e}", path.display()),
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) -> std::io::Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let toml = toml::to_string_pretty(self)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
            fs::write(path, toml)
        } else {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "No config dir"))
        }
    }
}
