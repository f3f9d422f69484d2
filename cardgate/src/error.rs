//! Error types for request building and response decoding.
//!
//! None of these errors ever reaches the caller of a service method: each one
//! is folded into a receipt at the boundary where it occurs.

use cardgate_proto::FormError;

/// A request that cannot be sent as built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// A required identifier or value was not supplied.
    #[error("{0} is required")]
    Missing(&'static str),

    /// A field could not be written to the request body.
    #[error("could not encode request: {0}")]
    Encode(#[from] FormError),
}

impl RequestError {
    /// Returns `true` if this error was raised while writing the body rather
    /// than by validation.
    #[must_use]
    pub const fn is_encoding(&self) -> bool {
        matches!(self, Self::Encode(_))
    }
}

/// A response field that was present but could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The value does not parse as the expected type.
    #[error("field {field} has invalid {expected} value [{value}]")]
    Invalid {
        /// Response key.
        field: String,
        /// Human-readable name of the expected type.
        expected: &'static str,
        /// The raw value.
        value: String,
    },

    /// The value is a number that names no known code.
    #[error("the code [{value}] in field {field} does not correspond to any {kind}")]
    UnknownCode {
        /// Response key.
        field: String,
        /// Name of the code table.
        kind: &'static str,
        /// The raw value.
        value: String,
    },

    /// A field required by an "available" flag is absent.
    #[error("field {0} is required")]
    Missing(String),
}

impl FieldError {
    pub(crate) fn invalid(field: &str, expected: &'static str, value: &str) -> Self {
        Self::Invalid {
            field: field.to_owned(),
            expected,
            value: value.to_owned(),
        }
    }
}
