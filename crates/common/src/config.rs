//! SDK configuration types and loading
//!
//! Precedence: env vars > config file > defaults. The management key is read
//! from `DESCOPE_MANAGEMENT_KEY` or `management.key_file`, never from the
//! TOML directly, so it cannot leak through a checked-in config.

use crate::error::{Error, Result};
use crate::secret::Secret;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Project identifier override.
pub const ENV_PROJECT_ID: &str = "DESCOPE_PROJECT_ID";
/// Management key (bearer component for management calls).
pub const ENV_MANAGEMENT_KEY: &str = "DESCOPE_MANAGEMENT_KEY";
/// Base URL override.
pub const ENV_BASE_URL: &str = "DESCOPE_BASE_URL";

const DEFAULT_BASE_URL: &str = "https://api.descope.com";
const DEFAULT_CONFIG_FILE: &str = "descope.toml";

/// Root configuration
#[derive(Debug, Default, Deserialize)]
pub struct SdkConfig {
    #[serde(default)]
    pub client: ClientSection,
    #[serde(default)]
    pub management: ManagementSection,
    /// Extra headers sent on every request
    #[serde(default)]
    pub headers: Vec<HeaderEntry>,
}

/// Connection settings for the transport client
#[derive(Debug, Deserialize)]
pub struct ClientSection {
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    #[serde(default = "default_max_idle")]
    pub max_idle_per_host: usize,
}

/// Management credentials
#[derive(Debug, Default, Deserialize)]
pub struct ManagementSection {
    #[serde(skip)]
    pub key: Option<Secret<String>>,
    /// File containing the management key (alternative to the env var)
    #[serde(default)]
    pub key_file: Option<PathBuf>,
}

/// Default header entry
#[derive(Debug, Clone, Deserialize)]
pub struct HeaderEntry {
    pub name: String,
    pub value: String,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_connections: default_max_connections(),
            max_idle_per_host: default_max_idle(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_max_connections() -> usize {
    100
}

fn default_max_idle() -> usize {
    100
}

impl SdkConfig {
    /// Load configuration from a TOML file, then overlay environment variables.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: SdkConfig = toml::from_str(&contents)?;
        config.overlay_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from defaults and environment variables only.
    pub fn from_env() -> Result<Self> {
        let mut config = SdkConfig::default();
        config.overlay_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve config file path from CLI arg or CONFIG_PATH env var.
    pub fn resolve_path(cli_path: Option<&str>) -> PathBuf {
        if let Some(p) = cli_path {
            return PathBuf::from(p);
        }
        if let Ok(p) = std::env::var("CONFIG_PATH") {
            return PathBuf::from(p);
        }
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }

    fn overlay_env(&mut self) -> Result<()> {
        if let Ok(project_id) = std::env::var(ENV_PROJECT_ID) {
            self.client.project_id = project_id;
        }
        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            self.client.base_url = base_url;
        }

        // Management key: env var takes precedence over file
        if let Ok(key) = std::env::var(ENV_MANAGEMENT_KEY) {
            self.management.key = Some(Secret::new(key));
        } else if let Some(ref key_file) = self.management.key_file {
            let key = std::fs::read_to_string(key_file).map_err(|e| {
                Error::Config(format!(
                    "failed to read management key_file {}: {e}",
                    key_file.display()
                ))
            })?;
            let key = key.trim().to_owned();
            if !key.is_empty() {
                self.management.key = Some(Secret::new(key));
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.client.project_id.trim().is_empty() {
            return Err(Error::Config(format!(
                "project_id is required (set client.project_id or {ENV_PROJECT_ID})"
            )));
        }

        if !self.client.base_url.starts_with("http://")
            && !self.client.base_url.starts_with("https://")
        {
            return Err(Error::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                self.client.base_url
            )));
        }

        if self.client.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than 0".into()));
        }

        if self.client.max_connections == 0 {
            return Err(Error::Config(
                "max_connections must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}
