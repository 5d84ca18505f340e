//! Roster configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::client::ApiEndpoint;
use crate::error::{Error, Result};
use crate::form::ResetPolicy;

/// Roster configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Remote players API
    pub api: ApiConfig,

    /// Web console
    pub web: WebConfig,

    /// New-player form behaviour
    pub form: FormConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL; the collection lives at `{base_url}/{cohort}/players`
    pub base_url: String,

    /// Cohort path segment
    pub cohort: String,

    /// Request timeout. Unset means the transport default (none).
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://fsa-puppy-bowl.herokuapp.com/api".to_string(),
            cohort: "2403-ftb-et-web-pt".to_string(),
            request_timeout_secs: None,
        }
    }
}

/// Web console configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Listen address
    pub listen: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Form configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub reset_policy: ResetPolicy,
}

impl RosterConfig {
    /// Load configuration from file, falling back to defaults if it is absent
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `ROSTER_*` environment overrides
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = value("ROSTER_API_URL") {
            self.api.base_url = url;
        }
        if let Some(cohort) = value("ROSTER_COHORT") {
            self.api.cohort = cohort;
        }
        if let Some(secs) = value("ROSTER_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|_| {
                Error::InvalidConfig(format!("ROSTER_TIMEOUT_SECS must be an integer, got '{}'", secs))
            })?;
            self.api.request_timeout_secs = Some(secs);
        }
        if let Some(addr) = value("ROSTER_WEB_ADDR") {
            self.web.listen = addr;
        }
        if let Some(policy) = value("ROSTER_RESET_POLICY") {
            self.form.reset_policy = policy.parse()?;
        }
        Ok(())
    }

    /// Check the configuration and build the API endpoint from it
    pub fn endpoint(&self) -> Result<ApiEndpoint> {
        ApiEndpoint::new(&self.api.base_url, &self.api.cohort)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.api.request_timeout_secs.map(Duration::from_secs)
    }
}
