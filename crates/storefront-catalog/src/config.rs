//! # Catalog Configuration
//!
//! Where the catalog service lives and how patient we are with it.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_API_URL=http://localhost:3000                           │
//! │     STOREFRONT_API_TIMEOUT_SECS=5                                      │
//! │     STOREFRONT_USER_AGENT=storefront-ci                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.storefront.storefront/... (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     https://fakestoreapi.in, 15 s timeout                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "https://fakestoreapi.in"
//! timeout_secs = 15
//! user_agent = "storefront/0.1.0"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{CatalogError, CatalogResult};

/// Default catalog service.
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.in";

// =============================================================================
// API Settings
// =============================================================================

/// HTTP settings for the catalog service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Scheme + host (+ optional path prefix) of the catalog service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    concat!("storefront/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

// =============================================================================
// Catalog Configuration
// =============================================================================

/// Complete catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub api: ApiSettings,
}

impl CatalogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults pointed at `base_url`. Mostly for tests and local mocks.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.api.base_url = base_url.into();
        config
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CatalogResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading catalog config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());

        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CatalogResult<()> {
        let url = Url::parse(&self.api.base_url)
            .map_err(|e| CatalogError::InvalidConfig(format!("base_url: {}", e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(CatalogError::InvalidConfig(format!(
                "base_url must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(CatalogError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `STOREFRONT_*` overrides, reading variables through `lookup`.
    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("STOREFRONT_API_URL") {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup("STOREFRONT_API_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric STOREFRONT_API_TIMEOUT_SECS"),
            }
        }

        if let Some(agent) = lookup("STOREFRONT_USER_AGENT") {
            self.api.user_agent = agent;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    /// Base URL with a trailing slash, so relative endpoint paths keep any
    /// path prefix.
    pub fn base_url(&self) -> CatalogResult<Url> {
        let mut raw = self.api.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Ok(Url::parse(&raw)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert!(config.api.user_agent.starts_with("storefront/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = CatalogConfig::with_base_url("ftp://catalog.local");
        assert!(config.validate().is_err());

        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "http://localhost:3000".to_string();
        assert!(config.validate().is_ok());

        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_partial_file() {
        let config: CatalogConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://localhost:8080/mock"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://localhost:8080/mock");
        assert_eq!(config.api.timeout_secs, 15);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("STOREFRONT_API_URL", "http://127.0.0.1:9000"),
            ("STOREFRONT_API_TIMEOUT_SECS", "3"),
            ("STOREFRONT_USER_AGENT", "ci"),
        ]
        .into_iter()
        .collect();

        let mut config = CatalogConfig::default();
        config.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.api.user_agent, "ci");
    }

    #[test]
    fn test_bad_timeout_env_is_ignored() {
        let mut config = CatalogConfig::default();
        config.apply_env_overrides(|k| {
            (k == "STOREFRONT_API_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert_eq!(config.api.timeout_secs, 15);
    }

    #[test]
    fn test_base_url_keeps_prefix() {
        let config = CatalogConfig::with_base_url("http://localhost:8080/mock");
        let base = config.base_url().unwrap();
        assert_eq!(base.as_str(), "http://localhost:8080/mock/");
        assert_eq!(
            base.join("api/products").unwrap().as_str(),
            "http://localhost:8080/mock/api/products"
        );
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config =
            CatalogConfig::load(Some(PathBuf::from("/nonexistent/storefront.toml"))).unwrap();
        assert!(config.validate().is_ok());
    }
}
