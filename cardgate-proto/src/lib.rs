#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Wire formats for the cardgate payment gateway protocol.
//!
//! The gateway speaks two flat text formats: requests are
//! `application/x-www-form-urlencoded` bodies sent with `POST`, and responses
//! are property-file style `KEY=VALUE` lines. This crate owns both encodings
//! plus the numeric error taxonomy shared by every layer of the stack. It has
//! no networking dependencies.
//!
//! # Modules
//!
//! - [`form`] - Ordered `name=value` request bodies ([`FormBody`])
//! - [`properties`] - Property-file parser for gateway responses ([`PropertyMap`])
//! - [`codes`] - Client-side error classification ([`ErrorCode`])

pub mod codes;
pub mod form;
pub mod properties;

pub use codes::ErrorCode;
pub use form::{DATE_FORMAT, FormBody, FormError, FormValue};
pub use properties::{PropertiesError, PropertyMap, write_entry};
