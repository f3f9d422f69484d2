#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Client for the cardgate payment gateway.
//!
//! The gateway takes form-encoded `POST` requests and answers with flat
//! `KEY=VALUE` text. This crate turns typed operations into request bodies,
//! hands them to a [`Transport`](exchange::Transport), and decodes the answer
//! into a receipt. A service call never fails: local validation errors,
//! network failures and malformed responses all come back as receipts with
//! `approved == false` and a classified error code.
//!
//! Request values are percent-encoded (see [`cardgate_proto::form`]), so a
//! value holding `&`, `=` or a space goes on the wire as `%26`, `%3D` or `+`.
//!
//! # Overview
//!
//! ```ignore
//! use cardgate::{CreditCardService, model::{CreditCard, Merchant}};
//!
//! let service = CreditCardService::new(Merchant::new(1001, "api-token"), transport);
//! let receipt = service
//!     .single_purchase("order-1", CreditCard::new("4242424242424242", 2512), 1000, None)
//!     .await;
//! if receipt.is_approved() {
//!     println!("{:?}", receipt.approval_info());
//! }
//! ```
//!
//! The HTTP transport lives in the `cardgate-http` crate.
//!
//! # Modules
//!
//! - [`config`] - TOML-loadable endpoint and merchant settings
//! - [`encode`] - Field order of composite request values
//! - [`error`] - Request and response field errors
//! - [`exchange`] - The transport seam and its failure classification
//! - [`model`] - Cards, profiles, verification and recurring values
//! - [`receipt`] - Decoded outcomes
//! - [`request`] - One request type per gateway operation
//! - [`service`] - Credit and debit card services
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation of exchanges and decoding

pub mod config;
pub mod encode;
pub mod error;
pub mod exchange;
pub mod model;
pub mod receipt;
pub mod request;
pub mod service;

pub use cardgate_proto::{ErrorCode, FormBody, PropertyMap};
pub use config::{ConfigError, GatewayConfig};
pub use exchange::{BoxFuture, Exchange, ExchangeFailure, Transport};
pub use receipt::{CreditCardReceipt, DebitCardReceipt, GatewayReceipt, Receipt, StorageReceipt};
pub use request::Operation;
pub use service::{CreditCardService, DebitCardService};
