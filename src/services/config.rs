use crate::domain::constants::{
    DEFAULT_BIND, DEFAULT_DETAIL_URL, DEFAULT_DOWNLOAD_URL, DEFAULT_FAILURE_LOG,
    DEFAULT_INTERFACE_URL, DEFAULT_SUMMARY_PATH, DEFAULT_THREADS, DEFAULT_TIMEOUT_SECS,
};
use crate::gallery::{Endpoints, Gallery, HttpTransport};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Process-wide settings.
///
/// Resolved in order, later wins:
/// - built-in defaults
/// - TOML file (`--config <file>` or `~/.config/appgallery/config.toml`)
/// - `APPGALLERY_*` environment variables
/// - CLI flags (applied by the command handlers)
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub interface_url: String,
    pub detail_url: String,
    pub download_url: String,
    pub timeout_secs: u64,
    pub threads: usize,
    pub summary_path: PathBuf,
    pub failure_log: PathBuf,
    pub bind: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interface_url: DEFAULT_INTERFACE_URL.to_string(),
            detail_url: DEFAULT_DETAIL_URL.to_string(),
            download_url: DEFAULT_DOWNLOAD_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            threads: DEFAULT_THREADS,
            summary_path: PathBuf::from(DEFAULT_SUMMARY_PATH),
            failure_log: PathBuf::from(DEFAULT_FAILURE_LOG),
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config/appgallery/config.toml"))
}

impl Settings {
    /// An explicit path must exist; the default path is optional.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let base = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        Ok(base.apply_env(|key| std::env::var(key).ok()))
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read config {}: {}", path.display(), e))?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn apply_env(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = var("APPGALLERY_INTERFACE_URL") {
            self.interface_url = v;
        }
        if let Some(v) = var("APPGALLERY_DETAIL_URL") {
            self.detail_url = v;
        }
        if let Some(v) = var("APPGALLERY_DOWNLOAD_URL") {
            self.download_url = v;
        }
        if let Some(v) = var("APPGALLERY_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.timeout_secs = v;
        }
        if let Some(v) = var("APPGALLERY_THREADS").and_then(|v| v.parse().ok()) {
            self.threads = v;
        }
        if let Some(v) = var("APPGALLERY_SUMMARY_PATH") {
            self.summary_path = PathBuf::from(v);
        }
        if let Some(v) = var("APPGALLERY_FAILURE_LOG") {
            self.failure_log = PathBuf::from(v);
        }
        if let Some(v) = var("APPGALLERY_BIND") {
            self.bind = v;
        }
        self
    }

    pub fn workers(&self) -> usize {
        self.threads.max(1)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            interface_url: self.interface_url.clone(),
            detail_url: self.detail_url.clone(),
            download_url: self.download_url.clone(),
        }
    }

    pub fn gallery(&self) -> anyhow::Result<Gallery> {
        Ok(Gallery::new(
            HttpTransport::new(self.timeout())?,
            self.endpoints(),
        ))
    }
}
