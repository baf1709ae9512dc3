use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::path::PathPrefixer;
use crate::transport::DEFAULT_API_BASE_URL;
use crate::upload::UploadPolicy;

pub const DEFAULT_BASE_PATH: &str = "/me/drive/root";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Construction-time settings of a OneDrive adapter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Drive item every logical path hangs off.
    pub base_path: String,
    pub subdirectory: String,
    /// Address items by path (`root:/a/b`) rather than by id.
    pub use_path: bool,
    pub upload: UploadPolicy,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            subdirectory: String::new(),
            use_path: true,
            upload: UploadPolicy::default(),
        }
    }
}

impl AdapterConfig {
    pub fn prefixer(&self) -> PathPrefixer {
        PathPrefixer::new(&self.base_path, &self.subdirectory, self.use_path)
    }
}

/// Settings of the command-line front end, read from
/// `~/.config/graphfs/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Prefix `ls` entries with Nerd Font icons.
    #[serde(default)]
    pub nerd_font: bool,
    #[serde(default)]
    pub adapter: AdapterConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        let mut cfg = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            Self::from_toml(&raw)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        } else {
            Self::default()
        };
        cfg.apply_overrides(
            env::var("GRAPHFS_ACCESS_TOKEN").ok(),
            env::var("GRAPHFS_API_BASE_URL").ok(),
        );
        Ok(cfg)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("invalid config toml")
    }

    /// Environment values win over the file when set and non-empty.
    pub fn apply_overrides(&mut self, access_token: Option<String>, api_base_url: Option<String>) {
        if let Some(token) = access_token.filter(|t| !t.trim().is_empty()) {
            self.access_token = Some(token);
        }
        if let Some(url) = api_base_url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = Some(url);
        }
    }

    pub fn access_token(&self) -> Result<&str> {
        self.access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                anyhow!("no access token. Set GRAPHFS_ACCESS_TOKEN or access_token in config.toml")
            })
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    /// `request_timeout_secs = 0` disables the timeout.
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let base = home_config_dir().ok_or_else(|| anyhow!("unable to locate config dir"))?;
    Ok(base.join("graphfs").join("config.toml"))
}

/// Returns ~/.config on all platforms instead of platform-specific config dirs.
fn home_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_defaults() {
        let cfg = AdapterConfig::default();
        assert_eq!(cfg.base_path, "/me/drive/root");
        assert_eq!(cfg.subdirectory, "");
        assert!(cfg.use_path);
        assert_eq!(cfg.upload.threshold, 4_000_000);
        assert_eq!(cfg.upload.chunk_size, 62_914_560);
        assert_eq!(cfg.prefixer().to_remote("a"), "/me/drive/root:/a");
    }

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(cfg.adapter, AdapterConfig::default());
        assert!(cfg.access_token().is_err());
    }

    #[test]
    fn partial_adapter_table() {
        let cfg = AppConfig::from_toml(
            r#"
access_token = "tok"
request_timeout_secs = 0
nerd_font = true

[adapter]
base_path = "/drives/abc/root"
use_path = false

[adapter.upload]
threshold = 1024
"#,
        )
        .unwrap();
        assert_eq!(cfg.access_token().unwrap(), "tok");
        assert_eq!(cfg.request_timeout(), None);
        assert!(cfg.nerd_font);
        assert_eq!(cfg.adapter.base_path, "/drives/abc/root");
        assert!(!cfg.adapter.use_path);
        assert_eq!(cfg.adapter.upload.threshold, 1024);
        assert_eq!(cfg.adapter.upload.chunk_size, 62_914_560);
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut cfg = AppConfig::from_toml(r#"access_token = "from-file""#).unwrap();
        cfg.apply_overrides(Some("from-env".into()), Some(" ".into()));
        assert_eq!(cfg.access_token().unwrap(), "from-env");
        assert_eq!(cfg.api_base_url(), DEFAULT_API_BASE_URL);
    }
}
