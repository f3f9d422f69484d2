use cardgate_proto::{FormBody, FormError};

use crate::model::{MarketSegment, Merchant};

/// Produces the mandatory header fields of every request.
///
/// The header always starts with `requestCode`, `merchantId` and `apiToken`.
/// Implementations add their own mandatory fields through
/// [`append_extras`](RequestHeader::append_extras); `storeId` comes last.
pub trait RequestHeader: Send + Sync {
    /// Credentials to send.
    fn merchant(&self) -> &Merchant;

    /// Hook for additional mandatory header fields.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] if a field cannot be written.
    fn append_extras(&self, _body: &mut FormBody) -> Result<(), FormError> {
        Ok(())
    }

    /// Whether the merchant's store id is sent.
    fn includes_store_id(&self) -> bool {
        true
    }

    /// Writes the header for `request_code`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] if a field cannot be written.
    fn write(&self, request_code: &str, body: &mut FormBody) -> Result<(), FormError> {
        let merchant = self.merchant();
        body.push("requestCode", request_code)?
            .push("merchantId", merchant.merchant_id)?
            .push("apiToken", merchant.api_token.as_str())?;
        self.append_extras(body)?;
        if self.includes_store_id() {
            body.append("storeId", merchant.store_id.as_deref())?;
        }
        Ok(())
    }
}

/// Header of credit card requests: credentials, market segment, store id.
#[derive(Debug, Clone)]
pub struct CreditCardHeader {
    merchant: Merchant,
    market_segment: MarketSegment,
}

impl CreditCardHeader {
    /// Market segment sent unless configured otherwise.
    pub const DEFAULT_MARKET_SEGMENT: MarketSegment = MarketSegment::Internet;

    /// Creates a header for `merchant` in the internet segment.
    #[must_use]
    pub const fn new(merchant: Merchant) -> Self {
        Self {
            merchant,
            market_segment: Self::DEFAULT_MARKET_SEGMENT,
        }
    }

    /// Overrides the market segment.
    #[must_use]
    pub const fn with_market_segment(mut self, market_segment: MarketSegment) -> Self {
        self.market_segment = market_segment;
        self
    }

    /// Returns the market segment.
    #[must_use]
    pub const fn market_segment(&self) -> MarketSegment {
        self.market_segment
    }
}

impl RequestHeader for CreditCardHeader {
    fn merchant(&self) -> &Merchant {
        &self.merchant
    }

    fn append_extras(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("marketSegmentCode", self.market_segment)?;
        Ok(())
    }
}

/// Header of debit card requests: credentials and market segment, no store id.
#[derive(Debug, Clone)]
pub struct DebitCardHeader {
    merchant: Merchant,
    market_segment: MarketSegment,
}

impl DebitCardHeader {
    /// Market segment sent unless configured otherwise.
    pub const DEFAULT_MARKET_SEGMENT: MarketSegment = MarketSegment::Retail;

    /// Creates a header for `merchant` in the retail segment.
    #[must_use]
    pub const fn new(merchant: Merchant) -> Self {
        Self {
            merchant,
            market_segment: Self::DEFAULT_MARKET_SEGMENT,
        }
    }

    /// Overrides the market segment.
    #[must_use]
    pub const fn with_market_segment(mut self, market_segment: MarketSegment) -> Self {
        self.market_segment = market_segment;
        self
    }

    /// Returns the market segment.
    #[must_use]
    pub const fn market_segment(&self) -> MarketSegment {
        self.market_segment
    }
}

impl RequestHeader for DebitCardHeader {
    fn merchant(&self) -> &Merchant {
        &self.merchant
    }

    fn append_extras(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("marketSegmentCode", self.market_segment)?;
        Ok(())
    }

    fn includes_store_id(&self) -> bool {
        false
    }
}
