#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP transport for the cardgate payment gateway client.
//!
//! [`HttpTransport`] implements [`cardgate::Transport`] with `reqwest`. Every
//! exchange opens its own connection, bounds connect and read by a shared
//! time budget, and classifies failures with the gateway [`ErrorCode`]s so a
//! service can turn them into receipts.
//!
//! ```ignore
//! use cardgate::CreditCardService;
//! use cardgate_http::{ClientConfig, HttpTransport};
//!
//! let config = ClientConfig::load_from("cardgate.toml")?;
//! let service = CreditCardService::from_config(&config.gateway, HttpTransport::from_config(&config));
//! ```
//!
//! # Modules
//!
//! - [`budget`] - Split connect/read time budget
//! - [`config`] - Transport limits and the combined TOML configuration
//! - [`constants`] - Defaults and failure messages
//! - [`endpoint`] - URL and scheme validation
//! - [`hooks`] - Before-send and after-receive observers
//! - [`transport`] - The `reqwest` transport
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing spans and events for each exchange
//!
//! [`ErrorCode`]: cardgate::ErrorCode

pub mod budget;
pub mod config;
pub mod constants;
pub mod endpoint;
pub mod hooks;
pub mod transport;

pub use config::{ClientConfig, TransportConfig};
pub use endpoint::Endpoint;
pub use hooks::{AfterReceiveContext, BeforeSendContext, ExchangeHooks};
pub use transport::HttpTransport;
