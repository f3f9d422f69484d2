//! Client-side error classification.
//!
//! Every failure that happens before a gateway decision is available is
//! reported with one of these codes. The numeric values are stable and are
//! the ones written into synthesized receipts (`ERROR_CODE=-5`, ...), so they
//! must never be renumbered.

use std::fmt;
use std::str::FromStr;

/// Classification of a failure that happened on the client side of an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The configured gateway URL could not be parsed.
    MalformedUrl,
    /// Writing the request body failed.
    PostError,
    /// Reading or decoding the gateway response failed.
    ResponseError,
    /// The connection could not be established, timed out, or the URL scheme
    /// did not match the configured mode.
    ConnectionFailed,
    /// The request was rejected locally before any network activity.
    InvalidRequest,
}

impl ErrorCode {
    /// All codes, in numeric order from `-1` downwards.
    pub const ALL: [Self; 5] = [
        Self::MalformedUrl,
        Self::PostError,
        Self::ResponseError,
        Self::ConnectionFailed,
        Self::InvalidRequest,
    ];

    /// Returns the stable wire value of this code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::MalformedUrl => -1,
            Self::PostError => -2,
            Self::ResponseError => -4,
            Self::ConnectionFailed => -5,
            Self::InvalidRequest => -6,
        }
    }

    /// Looks up the code with the given wire value.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error returned when a string is not one of the client-side error codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown client error code: {0}")]
pub struct UnknownErrorCode(pub String);

impl FromStr for ErrorCode {
    type Err = UnknownErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i32>()
            .ok()
            .and_then(Self::from_code)
            .ok_or_else(|| UnknownErrorCode(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ErrorCode::MalformedUrl.code(), -1);
        assert_eq!(ErrorCode::PostError.code(), -2);
        assert_eq!(ErrorCode::ResponseError.code(), -4);
        assert_eq!(ErrorCode::ConnectionFailed.code(), -5);
        assert_eq!(ErrorCode::InvalidRequest.code(), -6);
    }

    #[test]
    fn test_from_code_unknown() {
        assert_eq!(ErrorCode::from_code(-3), None);
        assert_eq!(ErrorCode::from_code(0), None);
    }

    #[test]
    fn test_parse_from_display() {
        for code in ErrorCode::ALL {
            assert_eq!(code.to_string().parse::<ErrorCode>().unwrap(), code);
        }
        assert!("1002".parse::<ErrorCode>().is_err());
        assert!("abc".parse::<ErrorCode>().is_err());
    }
}
