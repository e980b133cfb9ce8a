use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub resolver: ResolverConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Candidate dumps requested from the store per batch.
    pub remote_dump_limit: usize,
    /// Page size used when the caller does not ask for one.
    pub default_page_limit: usize,
    pub max_page_limit: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            remote_dump_limit: 20,
            default_page_limit: 100,
            max_page_limit: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_dir: PathBuf,
    /// Filter used when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            log_dir: home.join(".codenav/logs"),
            default_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Read a JSON config file; missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Defaults overridden by `CODENAV_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(limit) = lookup("CODENAV_REMOTE_DUMP_LIMIT").and_then(|v| v.parse().ok()) {
            self.resolver.remote_dump_limit = limit;
        }
        if let Some(limit) = lookup("CODENAV_PAGE_LIMIT").and_then(|v| v.parse().ok()) {
            self.resolver.default_page_limit = limit;
        }
        if let Some(dir) = lookup("CODENAV_LOG_DIR").filter(|v| !v.is_empty()) {
            self.logging.log_dir = PathBuf::from(dir);
        }
        self
    }
}
