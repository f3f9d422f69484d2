use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use cardgate_proto::FormValue;
use serde::{Deserialize, Serialize};

/// Merchant credentials sent in the header of every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Merchant {
    /// Gateway-assigned merchant id.
    pub merchant_id: i32,
    /// API token paired with the merchant id.
    pub api_token: String,
    /// Optional store identifier for multi-store merchants.
    pub store_id: Option<String>,
}

impl Merchant {
    /// Creates credentials without a store id.
    #[must_use]
    pub fn new(merchant_id: i32, api_token: impl Into<String>) -> Self {
        Self {
            merchant_id,
            api_token: api_token.into(),
            store_id: None,
        }
    }

    /// Sets the store id.
    #[must_use]
    pub fn with_store_id(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = Some(store_id.into());
        self
    }
}

impl fmt::Debug for Merchant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Merchant")
            .field("merchant_id", &self.merchant_id)
            .field("api_token", &"<redacted>")
            .field("store_id", &self.store_id)
            .finish()
    }
}

/// Channel through which the transaction was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketSegment {
    /// Card-not-present internet sale (`I`).
    Internet,
    /// Mail or telephone order (`M`).
    MailOrTelephoneOrder,
    /// Card-present retail sale (`G`).
    Retail,
}

impl MarketSegment {
    /// Returns the one-letter wire code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Internet => "I",
            Self::MailOrTelephoneOrder => "M",
            Self::Retail => "G",
        }
    }

    /// Looks up a segment by wire code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "I" => Some(Self::Internet),
            "M" => Some(Self::MailOrTelephoneOrder),
            "G" => Some(Self::Retail),
            _ => None,
        }
    }
}

impl FromStr for MarketSegment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("unknown market segment code '{s}'"))
    }
}

impl FormValue for MarketSegment {
    fn form_value(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let merchant = Merchant::new(10, "secret-token").with_store_id("s1");
        let debug = format!("{merchant:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("s1"));
    }

    #[test]
    fn test_market_segment_codes() {
        for segment in [
            MarketSegment::Internet,
            MarketSegment::MailOrTelephoneOrder,
            MarketSegment::Retail,
        ] {
            assert_eq!(segment.code().parse::<MarketSegment>().unwrap(), segment);
        }
        assert!("X".parse::<MarketSegment>().is_err());
    }
}
