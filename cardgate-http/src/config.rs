//! Transport settings and the combined client configuration.
//!
//! A client file carries the gateway keys at the top level and an optional
//! `[transport]` table:
//!
//! ```toml
//! url = "https://gateway.example.com/gateway/creditcard/processor.do"
//! merchant_id = 1001
//! api_token = "abc123"
//!
//! [transport]
//! total_timeout = 60000
//! min_read_timeout = 30000
//! ```

use std::path::Path;
use std::time::Duration;

use cardgate::{ConfigError, GatewayConfig};
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};

use crate::constants::{DEFAULT_MIN_READ_TIMEOUT, DEFAULT_TOTAL_TIMEOUT};

/// Time limits of one exchange. Durations are written in milliseconds.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Total budget for connecting and reading.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(default = "default_total_timeout")]
    pub total_timeout: Duration,

    /// Floor for the connect and read timeouts.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(default = "default_min_read_timeout")]
    pub min_read_timeout: Duration,
}

const fn default_total_timeout() -> Duration {
    DEFAULT_TOTAL_TIMEOUT
}

const fn default_min_read_timeout() -> Duration {
    DEFAULT_MIN_READ_TIMEOUT
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            total_timeout: DEFAULT_TOTAL_TIMEOUT,
            min_read_timeout: DEFAULT_MIN_READ_TIMEOUT,
        }
    }
}

impl TransportConfig {
    /// Sets the total budget.
    #[must_use]
    pub const fn with_total_timeout(mut self, timeout: Duration) -> Self {
        self.total_timeout = timeout;
        self
    }

    /// Sets the timeout floor.
    #[must_use]
    pub const fn with_min_read_timeout(mut self, timeout: Duration) -> Self {
        self.min_read_timeout = timeout;
        self
    }
}

/// Gateway settings plus transport limits, loadable from one TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Endpoint and merchant credentials.
    #[serde(flatten)]
    pub gateway: GatewayConfig,

    /// Time limits.
    #[serde(default)]
    pub transport: TransportConfig,
}

impl ClientConfig {
    /// Combines gateway settings with default transport limits.
    #[must_use]
    pub fn new(gateway: GatewayConfig) -> Self {
        Self {
            gateway,
            transport: TransportConfig::default(),
        }
    }

    /// Replaces the transport limits.
    #[must_use]
    pub const fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_table_is_optional() {
        let config = ClientConfig::from_toml_str(
            r#"
            url = "https://gw.example.com/processor.do"
            merchant_id = 1001
            api_token = "secret"
            "#,
        )
        .unwrap();
        assert_eq!(config.gateway.merchant_id, 1001);
        assert_eq!(config.transport, TransportConfig::default());
    }

    #[test]
    fn test_transport_millis() {
        let config = ClientConfig::from_toml_str(
            r#"
            url = "http://localhost:9000/processor.do"
            secured = false
            merchant_id = 1
            api_token = "t"
            market_segment = "mail_or_telephone_order"

            [transport]
            total_timeout = 1500
            "#,
        )
        .unwrap();
        assert!(!config.gateway.secured);
        assert_eq!(config.transport.total_timeout, Duration::from_millis(1500));
        assert_eq!(config.transport.min_read_timeout, DEFAULT_MIN_READ_TIMEOUT);
    }

    #[test]
    fn test_builders() {
        let transport = TransportConfig::default()
            .with_total_timeout(Duration::ZERO)
            .with_min_read_timeout(Duration::from_millis(10));
        let config = ClientConfig::new(GatewayConfig::new("https://x", 1, "t")).with_transport(transport);
        assert_eq!(config.transport.total_timeout, Duration::ZERO);
        assert_eq!(config.transport.min_read_timeout, Duration::from_millis(10));
    }
}
