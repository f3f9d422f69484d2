//! Secure storage of payment profiles.

use cardgate_proto::{FormBody, FormError};

use super::{Operation, encode, require};
use crate::error::RequestError;
use crate::model::PaymentProfile;
use crate::receipt::StorageReceipt;

const REQUEST_CODE: &str = "secureStorage";

fn require_profile(profile: &PaymentProfile) -> Result<(), RequestError> {
    if profile.credit_card.is_none() && profile.customer_profile.is_none() {
        return Err(RequestError::Missing("paymentProfile"));
    }
    Ok(())
}

/// Stores a payment profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageAdd {
    /// Token to store under; the gateway assigns one when absent.
    pub storage_token_id: Option<String>,
    /// Card and customer data to store.
    pub payment_profile: PaymentProfile,
}

impl Operation for StorageAdd {
    type Receipt = StorageReceipt;

    fn request_code(&self) -> &'static str {
        REQUEST_CODE
    }

    fn operation_code(&self) -> Option<&'static str> {
        Some("create")
    }

    fn validate(&self) -> Result<(), RequestError> {
        require_profile(&self.payment_profile)
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.append("storageTokenId", self.storage_token_id.as_deref())?;
        encode(&self.payment_profile, body)
    }
}

/// Replaces the payment profile stored under a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageUpdate {
    /// Token of the stored profile.
    pub storage_token_id: String,
    /// New card and customer data.
    pub payment_profile: PaymentProfile,
}

impl Operation for StorageUpdate {
    type Receipt = StorageReceipt;

    fn request_code(&self) -> &'static str {
        REQUEST_CODE
    }

    fn operation_code(&self) -> Option<&'static str> {
        Some("update")
    }

    fn validate(&self) -> Result<(), RequestError> {
        require(&self.storage_token_id, "storageTokenId")?;
        require_profile(&self.payment_profile)
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("storageTokenId", self.storage_token_id.as_str())?;
        encode(&self.payment_profile, body)
    }
}

/// Fetches the payment profile stored under a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageQuery {
    /// Token of the stored profile.
    pub storage_token_id: String,
}

impl Operation for StorageQuery {
    type Receipt = StorageReceipt;

    fn request_code(&self) -> &'static str {
        REQUEST_CODE
    }

    fn operation_code(&self) -> Option<&'static str> {
        Some("query")
    }

    fn validate(&self) -> Result<(), RequestError> {
        require(&self.storage_token_id, "storageTokenId")
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("storageTokenId", self.storage_token_id.as_str())?;
        Ok(())
    }
}

/// Deletes the payment profile stored under a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageDelete {
    /// Token of the stored profile.
    pub storage_token_id: String,
}

impl Operation for StorageDelete {
    type Receipt = StorageReceipt;

    fn request_code(&self) -> &'static str {
        REQUEST_CODE
    }

    fn operation_code(&self) -> Option<&'static str> {
        Some("delete")
    }

    fn validate(&self) -> Result<(), RequestError> {
        require(&self.storage_token_id, "storageTokenId")
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("storageTokenId", self.storage_token_id.as_str())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CreditCard, CustomerProfile, Merchant};
    use crate::request::CreditCardHeader;

    const HEADER: &str =
        "requestCode=secureStorage&merchantId=5&apiToken=t&marketSegmentCode=I&storeId=st";

    fn header() -> CreditCardHeader {
        CreditCardHeader::new(Merchant::new(5, "t").with_store_id("st"))
    }

    #[test]
    fn test_add_with_card_and_customer() {
        let customer = CustomerProfile {
            first_name: Some("Ada".into()),
            city: Some("Montreal".into()),
            ..CustomerProfile::default()
        };
        let op = StorageAdd {
            storage_token_id: Some("tok-1".into()),
            payment_profile: PaymentProfile::new(
                Some(CreditCard::new("4242424242424242", 2512)),
                Some(customer),
            ),
        };
        assert_eq!(
            op.build(&header()).unwrap().as_str(),
            format!(
                "{HEADER}&operationCode=create&storageTokenId=tok-1\
                 &creditCardNumber=4242424242424242&expiryDate=2512\
                 &profileFirstName=Ada&profileCity=Montreal"
            )
        );
    }

    #[test]
    fn test_add_without_token_lets_gateway_assign() {
        let op = StorageAdd {
            storage_token_id: None,
            payment_profile: PaymentProfile::new(Some(CreditCard::new("4242", 2512)), None),
        };
        let body = op.build(&header()).unwrap();
        assert!(!body.contains("storageTokenId"));
    }

    #[test]
    fn test_empty_profile_rejected() {
        let op = StorageAdd {
            storage_token_id: None,
            payment_profile: PaymentProfile::default(),
        };
        assert_eq!(
            op.build(&header()).unwrap_err().to_string(),
            "paymentProfile is required"
        );
    }

    #[test]
    fn test_query_delete_update() {
        let query = StorageQuery {
            storage_token_id: "tok-1".into(),
        };
        assert_eq!(
            query.build(&header()).unwrap().as_str(),
            format!("{HEADER}&operationCode=query&storageTokenId=tok-1")
        );

        let delete = StorageDelete {
            storage_token_id: String::new(),
        };
        assert_eq!(
            delete.build(&header()).unwrap_err(),
            RequestError::Missing("storageTokenId")
        );

        let update = StorageUpdate {
            storage_token_id: "tok-1".into(),
            payment_profile: PaymentProfile::default(),
        };
        assert_eq!(
            update.build(&header()).unwrap_err(),
            RequestError::Missing("paymentProfile")
        );
    }
}
