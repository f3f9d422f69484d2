//! Hotel stays: check-in authorization, incremental extension, check-out.

use cardgate_proto::{FormBody, FormError};

use super::{Operation, encode, require};
use crate::error::RequestError;
use crate::model::{CreditCard, LodgingRequest, VerificationRequest};
use crate::receipt::CreditCardReceipt;

const REQUEST_CODE: &str = "lodging";

/// Authorizes the expected cost of a stay at check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LodgingCheckin {
    /// Merchant order id of the stay.
    pub order_id: String,
    /// Guest card.
    pub card: CreditCard,
    /// Amount in cents.
    pub amount: i64,
    /// Stay details.
    pub lodging: Option<LodgingRequest>,
    /// Verification services.
    pub verification: Option<VerificationRequest>,
}

impl Operation for LodgingCheckin {
    type Receipt = CreditCardReceipt;

    fn request_code(&self) -> &'static str {
        REQUEST_CODE
    }

    fn operation_code(&self) -> Option<&'static str> {
        Some("checkin")
    }

    fn validate(&self) -> Result<(), RequestError> {
        require(&self.order_id, "orderId")
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("orderId", self.order_id.as_str())?;
        encode(&self.card, body)?;
        body.push("amount", self.amount)?;
        encode(&self.lodging, body)?;
        encode(&self.verification, body)
    }
}

/// Extends the authorization of a stay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LodgingIncremental {
    /// Transaction id of the check-in.
    pub transaction_id: i64,
    /// Merchant order id of the stay.
    pub order_id: String,
    /// Additional amount in cents.
    pub amount: i64,
    /// Stay details, usually [`LodgingRequest::incremental`].
    pub lodging: Option<LodgingRequest>,
}

impl Operation for LodgingIncremental {
    type Receipt = CreditCardReceipt;

    fn request_code(&self) -> &'static str {
        REQUEST_CODE
    }

    fn operation_code(&self) -> Option<&'static str> {
        Some("incremental")
    }

    fn validate(&self) -> Result<(), RequestError> {
        require(&self.order_id, "orderId")
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("transactionId", self.transaction_id)?
            .push("orderId", self.order_id.as_str())?
            .push("amount", self.amount)?;
        encode(&self.lodging, body)
    }
}

/// Settles the final cost of a stay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LodgingCheckout {
    /// Transaction id of the check-in.
    pub transaction_id: i64,
    /// Merchant order id of the stay.
    pub order_id: String,
    /// Final amount in cents.
    pub amount: i64,
    /// Stay details, usually [`LodgingRequest::checkout`].
    pub lodging: Option<LodgingRequest>,
}

impl Operation for LodgingCheckout {
    type Receipt = CreditCardReceipt;

    fn request_code(&self) -> &'static str {
        REQUEST_CODE
    }

    fn operation_code(&self) -> Option<&'static str> {
        Some("checkout")
    }

    fn validate(&self) -> Result<(), RequestError> {
        require(&self.order_id, "orderId")
    }

    // The gateway expects amount before orderId here, unlike incremental.
    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("transactionId", self.transaction_id)?
            .push("amount", self.amount)?
            .push("orderId", self.order_id.as_str())?;
        encode(&self.lodging, body)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::{ExtraCharge, Merchant};
    use crate::request::CreditCardHeader;

    const HEADER: &str = "requestCode=lodging&merchantId=5&apiToken=t&marketSegmentCode=I";

    fn header() -> CreditCardHeader {
        CreditCardHeader::new(Merchant::new(5, "t"))
    }

    #[test]
    fn test_checkin() {
        let op = LodgingCheckin {
            order_id: "stay-1".into(),
            card: CreditCard::new("4242424242424242", 2512),
            amount: 45000,
            lodging: Some(LodgingRequest::checkin(
                NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
                3,
                None,
                Some(412),
                Some(15000),
            )),
            verification: None,
        };
        assert_eq!(
            op.build(&header()).unwrap().as_str(),
            format!(
                "{HEADER}&operationCode=checkin&orderId=stay-1\
                 &creditCardNumber=4242424242424242&expiryDate=2512&amount=45000\
                 &lodging_checkinTime=2026-10-20&lodging_dayOfStay=3\
                 &lodging_roomNumber=412&lodging_roomRate=15000"
            )
        );
    }

    #[test]
    fn test_incremental_and_checkout_order() {
        let incremental = LodgingIncremental {
            transaction_id: 90,
            order_id: "stay-1".into(),
            amount: 15000,
            lodging: Some(LodgingRequest::incremental(1)),
        };
        assert_eq!(
            incremental.build(&header()).unwrap().as_str(),
            format!(
                "{HEADER}&operationCode=incremental&transactionId=90&orderId=stay-1\
                 &amount=15000&lodging_dayOfStay=1"
            )
        );

        let checkout = LodgingCheckout {
            transaction_id: 90,
            order_id: "stay-1".into(),
            amount: 61000,
            lodging: Some(LodgingRequest::checkout(
                NaiveDate::from_ymd_opt(2026, 10, 24).unwrap(),
                Some(ExtraCharge::MiniBar),
            )),
        };
        assert_eq!(
            checkout.build(&header()).unwrap().as_str(),
            format!(
                "{HEADER}&operationCode=checkout&transactionId=90&amount=61000&orderId=stay-1\
                 &lodging_checkoutTime=2026-10-24&lodging_extraCharge=3"
            )
        );
    }

    #[test]
    fn test_order_id_required() {
        let op = LodgingCheckout {
            transaction_id: 1,
            order_id: String::new(),
            amount: 1,
            lodging: None,
        };
        assert_eq!(
            op.build(&header()).unwrap_err(),
            RequestError::Missing("orderId")
        );
    }
}
