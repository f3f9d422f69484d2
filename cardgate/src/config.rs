//! Gateway connection settings.
//!
//! Loaded from TOML:
//!
//! ```toml
//! url = "https://gateway.example.com/gateway/creditcard/processor.do"
//! merchant_id = 1001
//! api_token = "abc123"
//! store_id = "store-7"
//! market_segment = "internet"
//! ```
//!
//! `secured` defaults to `true`, which requires an `https` URL.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::{MarketSegment, Merchant};

/// Errors raised while loading a [`GatewayConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML or is missing required keys.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Endpoint and merchant credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Gateway processor URL.
    pub url: String,
    /// Whether the URL must use `https`.
    #[serde(default = "default_secured")]
    pub secured: bool,
    /// Merchant id.
    pub merchant_id: i32,
    /// Merchant API token.
    pub api_token: String,
    /// Store id, if the merchant has several stores.
    #[serde(default)]
    pub store_id: Option<String>,
    /// Market segment override for the request header.
    #[serde(default)]
    pub market_segment: Option<MarketSegment>,
}

const fn default_secured() -> bool {
    true
}

impl GatewayConfig {
    /// Creates a config for a secured endpoint.
    #[must_use]
    pub fn new(url: impl Into<String>, merchant_id: i32, api_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            secured: default_secured(),
            merchant_id,
            api_token: api_token.into(),
            store_id: None,
            market_segment: None,
        }
    }

    /// Sets whether the URL must use `https`.
    #[must_use]
    pub const fn with_secured(mut self, secured: bool) -> Self {
        self.secured = secured;
        self
    }

    /// Sets the store id.
    #[must_use]
    pub fn with_store_id(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = Some(store_id.into());
        self
    }

    /// Sets the market segment.
    #[must_use]
    pub const fn with_market_segment(mut self, market_segment: MarketSegment) -> Self {
        self.market_segment = Some(market_segment);
        self
    }

    /// Parses TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is invalid.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// The merchant credentials.
    #[must_use]
    pub fn merchant(&self) -> Merchant {
        Merchant {
            merchant_id: self.merchant_id,
            api_token: self.api_token.clone(),
            store_id: self.store_id.clone(),
        }
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("url", &self.url)
            .field("secured", &self.secured)
            .field("merchant_id", &self.merchant_id)
            .field("api_token", &"<redacted>")
            .field("store_id", &self.store_id)
            .field("market_segment", &self.market_segment)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config = GatewayConfig::from_toml_str(
            r#"
            url = "https://gw.example.com/processor.do"
            merchant_id = 1001
            api_token = "secret"
            "#,
        )
        .unwrap();
        assert!(config.secured);
        assert_eq!(config.store_id, None);
        assert_eq!(config.market_segment, None);
        assert_eq!(config.merchant(), Merchant::new(1001, "secret"));
    }

    #[test]
    fn test_full_toml() {
        let config = GatewayConfig::from_toml_str(
            r#"
            url = "http://localhost:8080/processor.do"
            secured = false
            merchant_id = 7
            api_token = "t"
            store_id = "s-1"
            market_segment = "retail"
            "#,
        )
        .unwrap();
        assert!(!config.secured);
        assert_eq!(config.market_segment, Some(MarketSegment::Retail));
        assert_eq!(config.merchant().store_id.as_deref(), Some("s-1"));
    }

    #[test]
    fn test_missing_token_is_error() {
        let err = GatewayConfig::from_toml_str("url = \"https://x\"\nmerchant_id = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = GatewayConfig::new("https://x", 1, "secret-token");
        assert!(!format!("{config:?}").contains("secret-token"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GatewayConfig::load_from("/nonexistent/cardgate.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
