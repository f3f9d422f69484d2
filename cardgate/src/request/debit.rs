//! US debit purchases and refunds.

use cardgate_proto::{FormBody, FormError};

use super::{Operation, encode, require};
use crate::error::RequestError;
use crate::model::{CreditCardIndicator, UsDebitCard};
use crate::receipt::DebitCardReceipt;

/// Debits a PIN-verified card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebitPurchase {
    /// Merchant order id.
    pub order_id: String,
    /// Card and PIN pad data.
    pub card: UsDebitCard,
    /// Amount in cents.
    pub amount: i64,
    /// Surcharge in cents.
    pub surcharge_amount: Option<i64>,
    /// Cash back in cents.
    pub cashback_amount: Option<i64>,
    /// Transaction flags.
    pub indicators: Vec<CreditCardIndicator>,
}

impl DebitPurchase {
    /// Creates a purchase with no surcharge or cash back.
    #[must_use]
    pub fn new(order_id: impl Into<String>, card: UsDebitCard, amount: i64) -> Self {
        Self {
            order_id: order_id.into(),
            card,
            amount,
            surcharge_amount: None,
            cashback_amount: None,
            indicators: Vec::new(),
        }
    }

    /// Adds a surcharge.
    #[must_use]
    pub const fn with_surcharge(mut self, amount: i64) -> Self {
        self.surcharge_amount = Some(amount);
        self
    }

    /// Adds cash back.
    #[must_use]
    pub const fn with_cashback(mut self, amount: i64) -> Self {
        self.cashback_amount = Some(amount);
        self
    }
}

impl Operation for DebitPurchase {
    type Receipt = DebitCardReceipt;

    fn request_code(&self) -> &'static str {
        "singleDebitPurchase"
    }

    fn validate(&self) -> Result<(), RequestError> {
        require(&self.order_id, "orderId")
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("orderId", self.order_id.as_str())?;
        encode(&self.card, body)?;
        body.push("amount", self.amount)?
            .append("surchargeAmount", self.surcharge_amount)?
            .append("cashbackAmount", self.cashback_amount)?;
        encode(self.indicators.as_slice(), body)
    }
}

/// Refunds to a PIN-verified card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebitRefund {
    /// Merchant order id.
    pub order_id: String,
    /// Card and PIN pad data.
    pub card: UsDebitCard,
    /// Amount in cents.
    pub amount: i64,
}

impl Operation for DebitRefund {
    type Receipt = DebitCardReceipt;

    fn request_code(&self) -> &'static str {
        "singleDebitRefund"
    }

    fn validate(&self) -> Result<(), RequestError> {
        require(&self.order_id, "orderId")
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("orderId", self.order_id.as_str())?;
        encode(&self.card, body)?;
        body.push("amount", self.amount)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccountType, KeyPointer, Merchant};
    use crate::request::DebitCardHeader;

    fn header() -> DebitCardHeader {
        DebitCardHeader::new(Merchant::new(3, "t").with_store_id("ignored"))
    }

    fn card() -> UsDebitCard {
        UsDebitCard::new("MAG", "PIN", "KSN", KeyPointer::TripleDes, AccountType::Checking)
    }

    #[test]
    fn test_purchase_fields() {
        let op = DebitPurchase::new("d-1", card(), 2000)
            .with_cashback(500)
            .with_surcharge(150);
        assert_eq!(
            op.build(&header()).unwrap().as_str(),
            "requestCode=singleDebitPurchase&merchantId=3&apiToken=t&marketSegmentCode=G\
             &orderId=d-1&accountType=0&manageticData=MAG&dukptValue=KSN&pinBlock=PIN\
             &requestKeyPTR=T&amount=2000&surchargeAmount=150&cashbackAmount=500"
        );
    }

    #[test]
    fn test_refund_requires_order_id() {
        let op = DebitRefund {
            order_id: String::new(),
            card: card(),
            amount: 10,
        };
        assert_eq!(
            op.build(&header()).unwrap_err(),
            RequestError::Missing("orderId")
        );
    }
}
