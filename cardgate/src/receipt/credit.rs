use std::fmt;

use cardgate_proto::ErrorCode;

use super::{Fields, GatewayReceipt, Receipt};
use crate::error::FieldError;
use crate::model::{PeriodicPurchaseInfo, State};

/// Authorization details of an approved transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovalInfo {
    /// Amount actually authorized, in cents.
    pub authorized_amount: Option<i64>,
    /// Issuer approval code.
    pub approval_code: Option<String>,
    /// Processor trace number.
    pub trace_number: Option<i32>,
    /// Processor reference number.
    pub reference_number: Option<String>,
}

impl ApprovalInfo {
    pub(crate) fn extract(fields: &Fields<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            authorized_amount: fields.i64("AUTHORIZED_AMOUNT")?,
            approval_code: fields.string("APPROVAL_CODE"),
            trace_number: fields.i32("TRACE_NUMBER")?,
            reference_number: fields.string("REFERENCE_NUMBER"),
        })
    }
}

/// Address verification result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvsResponse {
    /// Processor AVS result code.
    pub code: Option<String>,
    /// Street comparison, `None` if the street could not be compared.
    pub street_matched: Option<bool>,
    /// Zip comparison, `None` if the zip could not be compared.
    pub zip_matched: Option<bool>,
    /// Zip format reported by the processor.
    pub zip_type: Option<String>,
    /// Error code if AVS could not be performed.
    pub avs_error_code: Option<String>,
    /// Error message if AVS could not be performed.
    pub avs_error_message: Option<String>,
}

impl AvsResponse {
    /// Returns `true` if the processor ran the check.
    #[must_use]
    pub const fn is_avs_performed(&self) -> bool {
        self.avs_error_code.is_none() && self.avs_error_message.is_none()
    }

    /// Returns `true` if the street could be compared.
    #[must_use]
    pub const fn is_street_format_valid(&self) -> bool {
        self.street_matched.is_some()
    }

    /// Returns `true` if the street was compared and matched.
    #[must_use]
    pub fn is_street_format_valid_and_matched(&self) -> bool {
        self.street_matched == Some(true)
    }

    /// Returns `true` if the zip could be compared.
    #[must_use]
    pub const fn is_zip_format_valid(&self) -> bool {
        self.zip_matched.is_some()
    }

    /// Returns `true` if the zip was compared and matched.
    #[must_use]
    pub fn is_zip_format_valid_and_matched(&self) -> bool {
        self.zip_matched == Some(true)
    }

    fn extract(fields: &Fields<'_>) -> Self {
        Self {
            code: fields.string("AVS_RESPONSE_CODE"),
            street_matched: fields.boolean("STREET_MATCHED"),
            zip_matched: fields.boolean("ZIP_MATCHED"),
            zip_type: fields.string("ZIP_TYPE"),
            avs_error_code: fields.string("AVS_ERROR_CODE"),
            avs_error_message: fields.string("AVS_ERROR_MESSAGE"),
        }
    }
}

/// Security code verification result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cvv2Response {
    /// Processor CVV2 result code.
    pub code: Option<String>,
    /// Processor CVV2 result message.
    pub message: Option<String>,
}

/// Outcome of a credit card operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreditCardReceipt {
    receipt: Receipt,
    approval_info: Option<ApprovalInfo>,
    avs_response: Option<AvsResponse>,
    cvv2_response: Option<Cvv2Response>,
    periodic_purchase_info: Option<PeriodicPurchaseInfo>,
    sanitized_card_number: Option<String>,
    storage_token_expiry: Option<i16>,
    response_hash: Option<String>,
    card_brand: Option<i32>,
    storage_token_id: Option<String>,
    fraud_score: Option<i32>,
    fraud_decision: Option<String>,
    fraud_session_id: Option<String>,
}

impl CreditCardReceipt {
    fn extract(fields: &Fields<'_>, approved: bool) -> Result<Self, FieldError> {
        let approval_info = if approved {
            Some(ApprovalInfo::extract(fields)?)
        } else {
            None
        };
        let avs_response = fields
            .flag("AVS_RESPONSE_AVAILABLE")
            .then(|| AvsResponse::extract(fields));
        let cvv2_response = fields.flag("CVV2_RESPONSE_AVAILABLE").then(|| Cvv2Response {
            code: fields.string("CVV2_RESPONSE_CODE"),
            message: fields.string("CVV2_RESPONSE_MESSAGE"),
        });
        let periodic_purchase_info = match fields.i64("PERIODIC_TRANSACTION_ID")? {
            Some(id) => Some(Self::extract_periodic(fields, id)?),
            None => None,
        };

        Ok(Self {
            receipt: Receipt::default(),
            approval_info,
            avs_response,
            cvv2_response,
            periodic_purchase_info,
            sanitized_card_number: fields.string("CARD_NUMBER"),
            storage_token_expiry: fields.i16("STORAGE_TOKEN_EXPIRY")?,
            response_hash: fields.string("RESPONSE_HASH"),
            card_brand: fields.i32("CARD_BRAND")?,
            storage_token_id: fields.string("STORAGE_TOKEN_ID"),
            fraud_score: fields.i32("FRAUD_SCORE")?,
            fraud_decision: fields.string("FRAUD_DECISION"),
            fraud_session_id: fields.string("FRAUD_SESSION_ID"),
        })
    }

    fn extract_periodic(
        fields: &Fields<'_>,
        periodic_transaction_id: i64,
    ) -> Result<PeriodicPurchaseInfo, FieldError> {
        const STATE: &str = "PERIODIC_TRANSACTION_STATE";
        let state = match fields.i16(STATE)? {
            Some(code) => Some(State::from_code(code).ok_or_else(|| FieldError::UnknownCode {
                field: STATE.to_owned(),
                kind: "recurring purchase state",
                value: code.to_string(),
            })?),
            None => None,
        };
        Ok(PeriodicPurchaseInfo {
            periodic_transaction_id: Some(periodic_transaction_id),
            state,
            next_payment_date: fields.date("PERIODIC_NEXT_PAYMENT_DATE")?,
            last_payment_id: fields.i64("PERIODIC_LAST_PAYMENT_ID")?,
            ..PeriodicPurchaseInfo::default()
        })
    }

    /// Authorization details; present only on approved receipts.
    #[must_use]
    pub const fn approval_info(&self) -> Option<&ApprovalInfo> {
        self.approval_info.as_ref()
    }

    /// Address verification result.
    #[must_use]
    pub const fn avs_response(&self) -> Option<&AvsResponse> {
        self.avs_response.as_ref()
    }

    /// Security code verification result.
    #[must_use]
    pub const fn cvv2_response(&self) -> Option<&Cvv2Response> {
        self.cvv2_response.as_ref()
    }

    /// Recurring purchase state, for recurring operations.
    #[must_use]
    pub const fn periodic_purchase_info(&self) -> Option<&PeriodicPurchaseInfo> {
        self.periodic_purchase_info.as_ref()
    }

    /// Masked card number.
    #[must_use]
    pub fn sanitized_card_number(&self) -> Option<&str> {
        self.sanitized_card_number.as_deref()
    }

    /// Expiry of the stored card, as `YYMM`.
    #[must_use]
    pub const fn storage_token_expiry(&self) -> Option<i16> {
        self.storage_token_expiry
    }

    /// Response signature.
    #[must_use]
    pub fn response_hash(&self) -> Option<&str> {
        self.response_hash.as_deref()
    }

    /// Gateway card brand code.
    #[must_use]
    pub const fn card_brand(&self) -> Option<i32> {
        self.card_brand
    }

    /// Token the card was stored under.
    #[must_use]
    pub fn storage_token_id(&self) -> Option<&str> {
        self.storage_token_id.as_deref()
    }

    /// Fraud screening score.
    #[must_use]
    pub const fn fraud_score(&self) -> Option<i32> {
        self.fraud_score
    }

    /// Fraud screening decision.
    #[must_use]
    pub fn fraud_decision(&self) -> Option<&str> {
        self.fraud_decision.as_deref()
    }

    /// Fraud screening session id.
    #[must_use]
    pub fn fraud_session_id(&self) -> Option<&str> {
        self.fraud_session_id.as_deref()
    }
}

impl GatewayReceipt for CreditCardReceipt {
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

impl fmt::Display for CreditCardReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.receipt, f)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_approved_with_approval_info() {
        let receipt = CreditCardReceipt::decode(
            "APPROVED=true\nTRANSACTION_ID=555\nAUTHORIZED_AMOUNT=1000\nAPPROVAL_CODE=OK1",
        );
        assert!(receipt.is_approved());
        assert_eq!(receipt.receipt().transaction_id(), Some(555));
        let approval = receipt.approval_info().unwrap();
        assert_eq!(approval.approval_code.as_deref(), Some("OK1"));
        assert_eq!(approval.authorized_amount, Some(1000));
        assert_eq!(approval.trace_number, None);
    }

    #[test]
    fn test_avs_without_approved_flag() {
        let receipt = CreditCardReceipt::decode(
            "AVS_RESPONSE_AVAILABLE=true\nAVS_RESPONSE_CODE=Y\nSTREET_MATCHED=true\nZIP_MATCHED=false",
        );
        assert!(!receipt.is_approved());
        assert!(receipt.approval_info().is_none());

        let avs = receipt.avs_response().unwrap();
        assert_eq!(avs.code.as_deref(), Some("Y"));
        assert!(avs.is_avs_performed());
        assert!(avs.is_street_format_valid_and_matched());
        assert!(avs.is_zip_format_valid());
        assert!(!avs.is_zip_format_valid_and_matched());
    }

    #[test]
    fn test_cvv2_and_fraud_fields() {
        let receipt = CreditCardReceipt::decode(
            "APPROVED=false\nCVV2_RESPONSE_AVAILABLE=true\nCVV2_RESPONSE_CODE=N\n\
             CVV2_RESPONSE_MESSAGE=no match\nFRAUD_SCORE=87\nFRAUD_DECISION=review\n\
             CARD_NUMBER=************4242\nCARD_BRAND=1",
        );
        assert_eq!(
            receipt.cvv2_response(),
            Some(&Cvv2Response {
                code: Some("N".into()),
                message: Some("no match".into()),
            })
        );
        assert_eq!(receipt.fraud_score(), Some(87));
        assert_eq!(receipt.fraud_decision(), Some("review"));
        assert_eq!(receipt.sanitized_card_number(), Some("************4242"));
        assert_eq!(receipt.card_brand(), Some(1));
        assert_eq!(receipt.storage_token_expiry(), None);
    }

    #[test]
    fn test_flags_must_be_true() {
        let receipt = CreditCardReceipt::decode(
            "APPROVED=true\nAVS_RESPONSE_AVAILABLE=false\nAVS_RESPONSE_CODE=Y",
        );
        assert!(receipt.avs_response().is_none());
        assert!(receipt.cvv2_response().is_none());
    }

    #[test]
    fn test_periodic_purchase_info() {
        let receipt = CreditCardReceipt::decode(
            "APPROVED=true\nPERIODIC_TRANSACTION_ID=42\nPERIODIC_TRANSACTION_STATE=3\n\
             PERIODIC_NEXT_PAYMENT_DATE=2026-11-01\nPERIODIC_LAST_PAYMENT_ID=900",
        );
        let info = receipt.periodic_purchase_info().unwrap();
        assert_eq!(info.periodic_transaction_id, Some(42));
        assert_eq!(info.state, Some(State::OnHold));
        assert_eq!(
            info.next_payment_date,
            Some(NaiveDate::from_ymd_opt(2026, 11, 1).unwrap())
        );
        assert_eq!(info.last_payment_id, Some(900));
    }

    #[test]
    fn test_unknown_state_collapses_everything() {
        let receipt = CreditCardReceipt::decode(
            "APPROVED=true\nAUTHORIZED_AMOUNT=10\nAVS_RESPONSE_AVAILABLE=true\n\
             PERIODIC_TRANSACTION_ID=42\nPERIODIC_TRANSACTION_STATE=8",
        );
        assert!(!receipt.is_approved());
        assert!(receipt.approval_info().is_none());
        assert!(receipt.avs_response().is_none());
        assert!(receipt.periodic_purchase_info().is_none());
        assert_eq!(
            receipt.receipt().error_kind(),
            Some(ErrorCode::ResponseError)
        );
        assert!(
            receipt
                .receipt()
                .debug_message()
                .unwrap()
                .contains("PERIODIC_TRANSACTION_STATE")
        );
    }

    #[test]
    fn test_bad_date_collapses() {
        let receipt = CreditCardReceipt::decode(
            "APPROVED=true\nPERIODIC_TRANSACTION_ID=42\nPERIODIC_NEXT_PAYMENT_DATE=11/01/2026",
        );
        assert!(!receipt.is_approved());
        assert_eq!(
            receipt.receipt().debug_message(),
            Some("field PERIODIC_NEXT_PAYMENT_DATE has invalid date value [11/01/2026]")
        );
    }

    #[test]
    fn test_from_failure() {
        let receipt = CreditCardReceipt::from_failure(
            ErrorCode::InvalidRequest,
            "orderId is required".to_owned(),
            None,
        );
        assert!(!receipt.is_approved());
        assert_eq!(receipt.error_code(), Some("-6"));
        assert_eq!(receipt.error_message(), Some("orderId is required"));
        assert!(receipt.to_string().starts_with("APPROVED=false\nERROR_CODE=-6\n"));
    }
}
