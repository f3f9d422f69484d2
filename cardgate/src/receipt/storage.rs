use std::fmt;

use cardgate_proto::ErrorCode;

use super::{Fields, GatewayReceipt, Receipt};
use crate::error::FieldError;
use crate::model::{CreditCard, CustomerProfile, PaymentProfile};

/// Outcome of a secure storage operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageReceipt {
    receipt: Receipt,
    storage_token_id: Option<String>,
    payment_profile: Option<PaymentProfile>,
}

impl StorageReceipt {
    /// Token of the stored profile.
    #[must_use]
    pub fn storage_token_id(&self) -> Option<&str> {
        self.storage_token_id.as_deref()
    }

    /// Stored profile. The card number, if any, is masked.
    #[must_use]
    pub const fn payment_profile(&self) -> Option<&PaymentProfile> {
        self.payment_profile.as_ref()
    }

    fn extract(fields: &Fields<'_>, _approved: bool) -> Result<Self, FieldError> {
        let payment_profile = if fields.flag("PAYMENT_PROFILE_AVAILABLE") {
            let credit_card = if fields.flag("CREDIT_CARD_AVAILABLE") {
                Some(extract_card(fields)?)
            } else {
                None
            };
            let customer_profile = fields
                .flag("CUSTOMER_PROFILE_AVAILABLE")
                .then(|| extract_customer(fields));
            Some(PaymentProfile::new(credit_card, customer_profile))
        } else {
            None
        };

        Ok(Self {
            receipt: Receipt::default(),
            storage_token_id: fields.string("STORAGE_TOKEN_ID"),
            payment_profile,
        })
    }
}

fn extract_card(fields: &Fields<'_>) -> Result<CreditCard, FieldError> {
    const NUMBER: &str = "CREDIT_CARD_NUMBER";
    const EXPIRY: &str = "EXPIRY_DATE";

    let number = fields
        .string(NUMBER)
        .ok_or_else(|| FieldError::Missing(NUMBER.to_owned()))?;
    if !number.chars().all(|c| c.is_ascii_digit() || c == '*') {
        return Err(FieldError::invalid(NUMBER, "masked card number", &number));
    }
    let expiry = fields
        .i16(EXPIRY)?
        .ok_or_else(|| FieldError::Missing(EXPIRY.to_owned()))?;
    Ok(CreditCard::new(number, expiry))
}

fn extract_customer(fields: &Fields<'_>) -> CustomerProfile {
    let field = |suffix: &str| fields.string(&format!("CUSTOMER_PROFILE_{suffix}"));
    CustomerProfile {
        legal_name: field("LEGAL_NAME"),
        trade_name: field("TRADE_NAME"),
        website: field("WEBSITE"),
        first_name: field("FIRST_NAME"),
        last_name: field("LAST_NAME"),
        phone_number: field("PHONE_NUMBER"),
        fax_number: field("FAX_NUMBER"),
        address1: field("ADDRESS1"),
        address2: field("ADDRESS2"),
        city: field("CITY"),
        province: field("PROVINCE"),
        postal: field("POSTAL"),
        country: field("COUNTRY"),
    }
}

impl GatewayReceipt for StorageReceipt {
    fn from_failure(code: ErrorCode, message: String, debug: Option<String>) -> Self {
        Self {
            receipt: Receipt::from_failure(code, message, debug),
            ..Self::default()
        }
    }

    fn decode(text: &str) -> Self {
        let (receipt, decoded) = Receipt::decode_with(text, Self::extract);
        Self {
            receipt,
            ..decoded.unwrap_or_default()
        }
    }

    fn receipt(&self) -> &Receipt {
        &self.receipt
    }
}

impl fmt::Display for StorageReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.receipt, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_with_full_profile() {
        let receipt = StorageReceipt::decode(
            "APPROVED=true\nSTORAGE_TOKEN_ID=tok-1\nPAYMENT_PROFILE_AVAILABLE=true\n\
             CREDIT_CARD_AVAILABLE=true\nCREDIT_CARD_NUMBER=************4242\nEXPIRY_DATE=2512\n\
             CUSTOMER_PROFILE_AVAILABLE=true\nCUSTOMER_PROFILE_FIRST_NAME=Ada\n\
             CUSTOMER_PROFILE_CITY=Montreal",
        );
        assert!(receipt.is_approved());
        assert_eq!(receipt.storage_token_id(), Some("tok-1"));

        let profile = receipt.payment_profile().unwrap();
        let card = profile.credit_card.as_ref().unwrap();
        assert_eq!(card.number.as_deref(), Some("************4242"));
        assert_eq!(card.expiry_date, Some(2512));

        let customer = profile.customer_profile.as_ref().unwrap();
        assert_eq!(customer.first_name.as_deref(), Some("Ada"));
        assert_eq!(customer.city.as_deref(), Some("Montreal"));
        assert_eq!(customer.last_name, None);
    }

    #[test]
    fn test_profile_flag_absent() {
        let receipt = StorageReceipt::decode(
            "APPROVED=true\nSTORAGE_TOKEN_ID=tok-1\nCREDIT_CARD_AVAILABLE=true",
        );
        assert!(receipt.payment_profile().is_none());
    }

    #[test]
    fn test_customer_only_profile() {
        let receipt = StorageReceipt::decode(
            "APPROVED=true\nPAYMENT_PROFILE_AVAILABLE=true\nCUSTOMER_PROFILE_AVAILABLE=true\n\
             CUSTOMER_PROFILE_LEGAL_NAME=Acme Inc",
        );
        let profile = receipt.payment_profile().unwrap();
        assert!(profile.credit_card.is_none());
        assert_eq!(
            profile.customer_profile.as_ref().unwrap().legal_name.as_deref(),
            Some("Acme Inc")
        );
    }

    #[test]
    fn test_missing_expiry_collapses() {
        let receipt = StorageReceipt::decode(
            "APPROVED=true\nSTORAGE_TOKEN_ID=tok-1\nPAYMENT_PROFILE_AVAILABLE=true\n\
             CREDIT_CARD_AVAILABLE=true\nCREDIT_CARD_NUMBER=****4242",
        );
        assert!(!receipt.is_approved());
        assert!(receipt.storage_token_id().is_none());
        assert!(receipt.payment_profile().is_none());
        assert_eq!(
            receipt.receipt().debug_message(),
            Some("field EXPIRY_DATE is required")
        );
    }

    #[test]
    fn test_bad_card_number_collapses() {
        let receipt = StorageReceipt::decode(
            "APPROVED=true\nPAYMENT_PROFILE_AVAILABLE=true\nCREDIT_CARD_AVAILABLE=true\n\
             CREDIT_CARD_NUMBER=4242-xxxx\nEXPIRY_DATE=2512",
        );
        assert!(receipt.payment_profile().is_none());
        assert_eq!(receipt.error_code(), Some("-4"));
    }
}
