//! Gateway operations.
//!
//! Every business action is one request type implementing [`Operation`]. An
//! operation validates its own required identifiers, then writes its fields
//! after the header produced by a [`RequestHeader`]:
//!
//! ```text
//! requestCode, merchantId, apiToken, <header extras>, storeId, [operationCode], <operation fields>
//! ```
//!
//! # Operations
//!
//! - [`credit`] - Purchases, authorizations, refunds, voids and lookups
//! - [`recurring`] - Recurring purchase create, query, execute and update
//! - [`storage`] - Secure storage of payment profiles
//! - [`lodging`] - Hotel check-in, incremental and check-out
//! - [`debit`] - US debit purchases and refunds

pub mod credit;
pub mod debit;
mod header;
pub mod lodging;
pub mod recurring;
pub mod storage;

pub use credit::*;
pub use debit::*;
pub use header::*;
pub use lodging::*;
pub use recurring::*;
pub use storage::*;

use cardgate_proto::{FormBody, FormError};

use crate::encode::FormEncode;
use crate::error::RequestError;
use crate::model::CardSpecifier;
use crate::receipt::GatewayReceipt;

/// A single gateway request.
pub trait Operation: Send + Sync {
    /// Receipt type the gateway response decodes into.
    type Receipt: GatewayReceipt;

    /// Value of the `requestCode` field.
    fn request_code(&self) -> &'static str;

    /// Value of the `operationCode` field, for request codes that group
    /// several operations.
    fn operation_code(&self) -> Option<&'static str> {
        None
    }

    /// Checks the identifiers the gateway requires before anything is encoded.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] naming the first missing value.
    fn validate(&self) -> Result<(), RequestError> {
        Ok(())
    }

    /// Writes the operation-specific fields, after the header.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] if a field cannot be written.
    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError>;

    /// Validates and encodes the full request body.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if validation or encoding fails.
    fn build<H: RequestHeader + ?Sized>(&self, header: &H) -> Result<FormBody, RequestError> {
        self.validate()?;
        let mut body = FormBody::new();
        header.write(self.request_code(), &mut body)?;
        body.append("operationCode", self.operation_code())?;
        self.encode_fields(&mut body)?;
        Ok(body)
    }
}

/// Fails with `name is required` when `value` is empty.
pub(crate) fn require(value: &str, name: &'static str) -> Result<(), RequestError> {
    if value.is_empty() {
        Err(RequestError::Missing(name))
    } else {
        Ok(())
    }
}

/// Like [`require`], for optional values.
pub(crate) fn require_some(value: Option<&str>, name: &'static str) -> Result<(), RequestError> {
    require(value.unwrap_or_default(), name)
}

/// A stored token must not be empty.
pub(crate) fn require_card(card: &CardSpecifier) -> Result<(), RequestError> {
    match card {
        CardSpecifier::Card(_) => Ok(()),
        CardSpecifier::Token(token) => require(token, "storageTokenId"),
    }
}

/// Encodes `value` through its [`FormEncode`] impl.
pub(crate) fn encode<T: FormEncode + ?Sized>(
    value: &T,
    body: &mut FormBody,
) -> Result<(), FormError> {
    value.encode(body)
}
