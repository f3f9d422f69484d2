//! Decoded gateway outcomes.
//!
//! Every exchange ends in exactly one receipt, built either from the gateway's
//! response text or from a local failure. A receipt is never half-decoded: if
//! any field fails to convert, the whole receipt collapses into a response
//! error and only the raw text and field map survive.
//!
//! # Receipt types
//!
//! - [`Receipt`] - Fields common to every response
//! - [`CreditCardReceipt`] - Approval, AVS, CVV2, recurring and fraud results
//! - [`DebitCardReceipt`] - Approval results of debit transactions
//! - [`StorageReceipt`] - Secure storage token and stored profile

mod credit;
mod debit;
mod storage;

pub use credit::*;
pub use debit::*;
pub use storage::*;

use std::fmt;

use cardgate_proto::{DATE_FORMAT, ErrorCode, PropertyMap, write_entry};
use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::error::FieldError;

/// Pattern of `PROCESSED_DATE` followed by `PROCESSED_TIME`.
pub const PROCESSED_FORMAT: &str = "%y%m%d%H%M%S";

const EMPTY_RESPONSE: &str = "null or empty response received.";
const UNPARSABLE_RESPONSE: &str = "could not parse response.";
const INVALID_FIELDS: &str =
    "could not parse response, one or more fields were in an invalid format.";

/// Fields shared by every gateway response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Receipt {
    approved: bool,
    transaction_id: Option<i64>,
    order_id: Option<String>,
    processed_date_time: Option<NaiveDateTime>,
    error_code: Option<String>,
    error_message: Option<String>,
    debug_message: Option<String>,
    response: Option<String>,
    fields: Option<PropertyMap>,
}

impl Receipt {
    /// Builds an error receipt for a failure that happened on this side of the
    /// wire, together with an equivalent response text.
    #[must_use]
    pub fn from_failure(code: ErrorCode, message: impl Into<String>, debug: Option<String>) -> Self {
        let now = Local::now().naive_local();
        let message = message.into();
        let code = code.to_string();

        let mut response = String::new();
        write_entry(&mut response, "APPROVED", "false");
        write_entry(&mut response, "ERROR_CODE", &code);
        write_entry(&mut response, "ERROR_MESSAGE", &message);
        write_entry(&mut response, "DEBUG_MESSAGE", debug.as_deref().unwrap_or_default());
        write_entry(
            &mut response,
            "PROCESSED_DATE",
            &now.format("%y%m%d").to_string(),
        );
        write_entry(
            &mut response,
            "PROCESSED_TIME",
            &now.format("%H%M%S").to_string(),
        );

        Self {
            processed_date_time: Some(now),
            error_code: Some(code),
            error_message: Some(message),
            debug_message: debug,
            response: Some(response),
            ..Self::default()
        }
    }

    /// Decodes the common fields of a response.
    #[must_use]
    pub fn decode(text: &str) -> Self {
        Self::decode_with(text, |_, _| Ok(())).0
    }

    /// Decodes the common fields, then runs `extract` for the type-specific
    /// ones. Returns `None` for the extras whenever the receipt is an error
    /// produced here, so no partial extraction is ever exposed.
    pub(crate) fn decode_with<T, F>(text: &str, extract: F) -> (Self, Option<T>)
    where
        F: FnOnce(&Fields<'_>, bool) -> Result<T, FieldError>,
    {
        if text.is_empty() {
            return (Self::local_error(EMPTY_RESPONSE, None), None);
        }

        let map = match PropertyMap::parse(text) {
            Ok(map) => map,
            Err(err) => {
                #[cfg(feature = "telemetry")]
                tracing::event!(tracing::Level::WARN, error = %err, "unparsable gateway response");
                let mut receipt = Self::local_error(UNPARSABLE_RESPONSE, Some(err.to_string()));
                receipt.response = Some(text.to_owned());
                return (receipt, None);
            }
        };

        let fields = Fields::new(&map);
        let decoded = Self::extract_common(&fields)
            .and_then(|common| extract(&fields, common.approved).map(|extra| (common, extra)));

        match decoded {
            Ok((mut common, extra)) => {
                common.response = Some(text.to_owned());
                common.fields = Some(map);
                (common, Some(extra))
            }
            Err(err) => {
                #[cfg(feature = "telemetry")]
                tracing::event!(tracing::Level::WARN, error = %err, "malformed gateway response field");
                let mut receipt = Self::local_error(INVALID_FIELDS, Some(err.to_string()));
                receipt.response = Some(text.to_owned());
                receipt.fields = Some(map);
                (receipt, None)
            }
        }
    }

    fn local_error(message: &str, debug: Option<String>) -> Self {
        Self {
            processed_date_time: Some(Local::now().naive_local()),
            error_code: Some(ErrorCode::ResponseError.to_string()),
            error_message: Some(message.to_owned()),
            debug_message: debug,
            ..Self::default()
        }
    }

    fn extract_common(fields: &Fields<'_>) -> Result<Self, FieldError> {
        let error_code = fields.string("ERROR_CODE");
        let processed_date_time = match (
            fields.string("PROCESSED_DATE"),
            fields.string("PROCESSED_TIME"),
        ) {
            (Some(date), Some(time)) => {
                let stamp = format!("{date}{time}");
                Some(
                    NaiveDateTime::parse_from_str(&stamp, PROCESSED_FORMAT)
                        .map_err(|_| FieldError::invalid("PROCESSED_DATE", "timestamp", &stamp))?,
                )
            }
            _ => None,
        };

        Ok(Self {
            approved: fields.flag("APPROVED") && error_code.is_none(),
            transaction_id: fields.i64("TRANSACTION_ID")?,
            order_id: fields.string("ORDER_ID"),
            processed_date_time,
            error_code,
            error_message: fields.string("ERROR_MESSAGE"),
            debug_message: fields.string("DEBUG_MESSAGE"),
            response: None,
            fields: None,
        })
    }

    /// Whether the gateway approved the transaction.
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        self.approved
    }

    /// Gateway transaction id.
    #[must_use]
    pub const fn transaction_id(&self) -> Option<i64> {
        self.transaction_id
    }

    /// Order id echoed by the gateway.
    #[must_use]
    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    /// When the gateway processed the request, or when a local error occurred.
    #[must_use]
    pub const fn processed_date_time(&self) -> Option<NaiveDateTime> {
        self.processed_date_time
    }

    /// Raw error code. Negative codes are local; see [`error_kind`](Self::error_kind).
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.error_code.as_deref()
    }

    /// The error code as a local classification, when it is one.
    #[must_use]
    pub fn error_kind(&self) -> Option<ErrorCode> {
        self.error_code
            .as_deref()
            .and_then(|code| code.parse::<ErrorCode>().ok())
    }

    /// Human-readable error.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Diagnostic detail.
    #[must_use]
    pub fn debug_message(&self) -> Option<&str> {
        self.debug_message.as_deref()
    }

    /// The raw response text, or the text synthesized for a local failure.
    #[must_use]
    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    /// Every decoded response field.
    #[must_use]
    pub const fn fields(&self) -> Option<&PropertyMap> {
        self.fields.as_ref()
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(fields) = &self.fields {
            return fmt::Display::fmt(fields, f);
        }
        if let Some(response) = &self.response {
            return f.write_str(response);
        }
        write!(
            f,
            "APPROVED={}\nERROR_CODE={}\nERROR_MESSAGE={}\nDEBUG_MESSAGE={}",
            self.approved,
            self.error_code.as_deref().unwrap_or_default(),
            self.error_message.as_deref().unwrap_or_default(),
            self.debug_message.as_deref().unwrap_or_default(),
        )
    }
}

/// A receipt type an operation decodes its response into.
pub trait GatewayReceipt: fmt::Display + Send + Sized {
    /// Builds the receipt for a local failure.
    fn from_failure(code: ErrorCode, message: String, debug: Option<String>) -> Self;

    /// Decodes response text.
    fn decode(text: &str) -> Self;

    /// Common fields.
    fn receipt(&self) -> &Receipt;

    /// Whether the gateway approved the transaction.
    fn is_approved(&self) -> bool {
        self.receipt().is_approved()
    }

    /// Raw error code.
    fn error_code(&self) -> Option<&str> {
        self.receipt().error_code()
    }

    /// Human-readable error.
    fn error_message(&self) -> Option<&str> {
        self.receipt().error_message()
    }
}

impl GatewayReceipt for Receipt {
    fn from_failure(code: ErrorCode, message: String, debug: Option<String>) -> Self {
        Self::from_failure(code, message, debug)
    }

    fn decode(text: &str) -> Self {
        Self::decode(text)
    }

    fn receipt(&self) -> &Receipt {
        self
    }
}

/// Typed lookups over decoded response fields.
///
/// Absent and empty values read as `None`; a value that is present but does
/// not convert is a [`FieldError`].
pub(crate) struct Fields<'a> {
    map: &'a PropertyMap,
}

impl<'a> Fields<'a> {
    pub(crate) const fn new(map: &'a PropertyMap) -> Self {
        Self { map }
    }

    pub(crate) fn string(&self, key: &str) -> Option<String> {
        self.map.get_non_empty(key).map(str::to_owned)
    }

    /// Any value other than `true`, in any case, reads as `false`.
    pub(crate) fn boolean(&self, key: &str) -> Option<bool> {
        self.map
            .get_non_empty(key)
            .map(|value| value.eq_ignore_ascii_case("true"))
    }

    /// `true` only when the flag is present and true.
    pub(crate) fn flag(&self, key: &str) -> bool {
        self.boolean(key).unwrap_or(false)
    }

    pub(crate) fn i16(&self, key: &str) -> Result<Option<i16>, FieldError> {
        self.number(key, "short")
    }

    pub(crate) fn i32(&self, key: &str) -> Result<Option<i32>, FieldError> {
        self.number(key, "integer")
    }

    pub(crate) fn i64(&self, key: &str) -> Result<Option<i64>, FieldError> {
        self.number(key, "long")
    }

    pub(crate) fn date(&self, key: &str) -> Result<Option<NaiveDate>, FieldError> {
        self.map
            .get_non_empty(key)
            .map(|value| {
                NaiveDate::parse_from_str(value, DATE_FORMAT)
                    .map_err(|_| FieldError::invalid(key, "date", value))
            })
            .transpose()
    }

    fn number<N: std::str::FromStr>(
        &self,
        key: &str,
        expected: &'static str,
    ) -> Result<Option<N>, FieldError> {
        self.map
            .get_non_empty(key)
            .map(|value| {
                value
                    .parse::<N>()
                    .map_err(|_| FieldError::invalid(key, expected, value))
            })
            .transpose()
    }
}
