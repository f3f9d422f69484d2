//! Card purchases, authorizations, refunds, voids and lookups.

use cardgate_proto::{FormBody, FormError};
use chrono::NaiveDate;

use super::{Operation, encode, require, require_card};
use crate::error::RequestError;
use crate::model::{
    CardSpecifier, CreditCard, CreditCardIndicator, PurchaseCardRequest, VerificationRequest,
};
use crate::receipt::CreditCardReceipt;

/// Charges a card or a stored token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinglePurchase {
    /// Merchant order id.
    pub order_id: String,
    /// Card or storage token to charge.
    pub card: CardSpecifier,
    /// Amount in cents.
    pub amount: i64,
    /// Also store the card in secure storage. Ignored for tokens.
    pub add_to_storage: bool,
    /// Token to store the card under; the gateway assigns one when absent.
    pub storage_token_id: Option<String>,
    /// Verification services.
    pub verification: Option<VerificationRequest>,
    /// Level II data.
    pub purchase_card: Option<PurchaseCardRequest>,
    /// Transaction flags.
    pub indicators: Vec<CreditCardIndicator>,
}

impl SinglePurchase {
    /// Creates a purchase with no optional data.
    #[must_use]
    pub fn new(order_id: impl Into<String>, card: impl Into<CardSpecifier>, amount: i64) -> Self {
        Self {
            order_id: order_id.into(),
            card: card.into(),
            amount,
            add_to_storage: false,
            storage_token_id: None,
            verification: None,
            purchase_card: None,
            indicators: Vec::new(),
        }
    }

    /// Stores the card after charging it, under `storage_token_id` if given.
    #[must_use]
    pub fn add_to_storage(mut self, storage_token_id: Option<String>) -> Self {
        self.add_to_storage = true;
        self.storage_token_id = storage_token_id;
        self
    }

    /// Requests verification services.
    #[must_use]
    pub fn with_verification(mut self, verification: VerificationRequest) -> Self {
        self.verification = Some(verification);
        self
    }

    /// Adds Level II data.
    #[must_use]
    pub fn with_purchase_card(mut self, purchase_card: PurchaseCardRequest) -> Self {
        self.purchase_card = Some(purchase_card);
        self
    }

    /// Sets the transaction flags.
    #[must_use]
    pub fn with_indicators(
        mut self,
        indicators: impl IntoIterator<Item = CreditCardIndicator>,
    ) -> Self {
        self.indicators = indicators.into_iter().collect();
        self
    }
}

impl Operation for SinglePurchase {
    type Receipt = CreditCardReceipt;

    fn request_code(&self) -> &'static str {
        "singlePurchase"
    }

    fn validate(&self) -> Result<(), RequestError> {
        require(&self.order_id, "orderId")?;
        require_card(&self.card)
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("orderId", self.order_id.as_str())?;
        match &self.card {
            CardSpecifier::Card(card) => {
                if self.add_to_storage {
                    body.push("addToStorage", true)?
                        .append("storageTokenId", self.storage_token_id.as_deref())?;
                }
                encode(card, body)?;
            }
            token @ CardSpecifier::Token(_) => encode(token, body)?,
        }
        body.push("amount", self.amount)?;
        encode(&self.verification, body)?;
        encode(&self.purchase_card, body)?;
        encode(self.indicators.as_slice(), body)
    }
}

/// Authorizes an amount without capturing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreAuth {
    /// Merchant order id.
    pub order_id: String,
    /// Card or storage token.
    pub card: CardSpecifier,
    /// Amount in cents.
    pub amount: i64,
    /// Verification services.
    pub verification: Option<VerificationRequest>,
    /// Transaction flags.
    pub indicators: Vec<CreditCardIndicator>,
}

impl PreAuth {
    /// Creates an authorization.
    #[must_use]
    pub fn new(order_id: impl Into<String>, card: impl Into<CardSpecifier>, amount: i64) -> Self {
        Self {
            order_id: order_id.into(),
            card: card.into(),
            amount,
            verification: None,
            indicators: Vec::new(),
        }
    }

    /// Requests verification services.
    #[must_use]
    pub fn with_verification(mut self, verification: VerificationRequest) -> Self {
        self.verification = Some(verification);
        self
    }

    /// Sets the transaction flags.
    #[must_use]
    pub fn with_indicators(
        mut self,
        indicators: impl IntoIterator<Item = CreditCardIndicator>,
    ) -> Self {
        self.indicators = indicators.into_iter().collect();
        self
    }
}

impl Operation for PreAuth {
    type Receipt = CreditCardReceipt;

    fn request_code(&self) -> &'static str {
        "preAuth"
    }

    fn validate(&self) -> Result<(), RequestError> {
        require(&self.order_id, "orderId")?;
        require_card(&self.card)
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("orderId", self.order_id.as_str())?;
        encode(&self.card, body)?;
        body.push("amount", self.amount)?;
        encode(&self.verification, body)?;
        encode(self.indicators.as_slice(), body)
    }
}

/// Captures a previous authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Transaction id of the authorization.
    pub transaction_id: i64,
    /// Order id of the authorization.
    pub transaction_order_id: String,
    /// Amount to capture in cents.
    pub amount: i64,
}

impl Capture {
    /// Creates a capture.
    #[must_use]
    pub fn new(transaction_id: i64, transaction_order_id: impl Into<String>, amount: i64) -> Self {
        Self {
            transaction_id,
            transaction_order_id: transaction_order_id.into(),
            amount,
        }
    }
}

impl Operation for Capture {
    type Receipt = CreditCardReceipt;

    fn request_code(&self) -> &'static str {
        "capture"
    }

    fn validate(&self) -> Result<(), RequestError> {
        require(&self.transaction_order_id, "purchaseOrderId")
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("transactionId", self.transaction_id)?
            .push("transactionOrderId", self.transaction_order_id.as_str())?
            .push("amount", self.amount)?;
        Ok(())
    }
}

/// Refunds all or part of a purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refund {
    /// Transaction id of the purchase.
    pub transaction_id: i64,
    /// Order id of the purchase.
    pub transaction_order_id: String,
    /// Order id of the refund itself.
    pub refund_order_id: Option<String>,
    /// Amount to refund in cents.
    pub amount: i64,
}

impl Refund {
    /// Creates a refund.
    #[must_use]
    pub fn new(
        transaction_id: i64,
        transaction_order_id: impl Into<String>,
        refund_order_id: Option<String>,
        amount: i64,
    ) -> Self {
        Self {
            transaction_id,
            transaction_order_id: transaction_order_id.into(),
            refund_order_id,
            amount,
        }
    }
}

impl Operation for Refund {
    type Receipt = CreditCardReceipt;

    fn request_code(&self) -> &'static str {
        "refund"
    }

    fn validate(&self) -> Result<(), RequestError> {
        require(&self.transaction_order_id, "purchaseOrderId")
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("transactionId", self.transaction_id)?
            .push("transactionOrderId", self.transaction_order_id.as_str())?
            .append("orderId", self.refund_order_id.as_deref())?
            .push("amount", self.amount)?;
        Ok(())
    }
}

/// Credits a card without a prior purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleCredit {
    /// Merchant order id.
    pub order_id: String,
    /// Card or storage token.
    pub card: CardSpecifier,
    /// Amount in cents.
    pub amount: i64,
    /// Verification services.
    pub verification: Option<VerificationRequest>,
}

impl SingleCredit {
    /// Creates a credit.
    #[must_use]
    pub fn new(order_id: impl Into<String>, card: impl Into<CardSpecifier>, amount: i64) -> Self {
        Self {
            order_id: order_id.into(),
            card: card.into(),
            amount,
            verification: None,
        }
    }

    /// Requests verification services.
    #[must_use]
    pub fn with_verification(mut self, verification: VerificationRequest) -> Self {
        self.verification = Some(verification);
        self
    }
}

impl Operation for SingleCredit {
    type Receipt = CreditCardReceipt;

    fn request_code(&self) -> &'static str {
        "singleCredit"
    }

    fn validate(&self) -> Result<(), RequestError> {
        require(&self.order_id, "orderId")?;
        require_card(&self.card)
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("orderId", self.order_id.as_str())?;
        encode(&self.card, body)?;
        body.push("amount", self.amount)?;
        encode(&self.verification, body)
    }
}

/// Posts a purchase authorized outside the gateway, for example by voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForcePurchase {
    /// Merchant order id.
    pub order_id: String,
    /// Card or storage token.
    pub card: CardSpecifier,
    /// Amount in cents.
    pub amount: i64,
    /// Approval code obtained from the issuer.
    pub approval_code: String,
    /// Verification services.
    pub verification: Option<VerificationRequest>,
}

impl ForcePurchase {
    /// Creates a forced purchase.
    #[must_use]
    pub fn new(
        order_id: impl Into<String>,
        card: impl Into<CardSpecifier>,
        amount: i64,
        approval_code: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            card: card.into(),
            amount,
            approval_code: approval_code.into(),
            verification: None,
        }
    }

    /// Requests verification services.
    #[must_use]
    pub fn with_verification(mut self, verification: VerificationRequest) -> Self {
        self.verification = Some(verification);
        self
    }
}

impl Operation for ForcePurchase {
    type Receipt = CreditCardReceipt;

    fn request_code(&self) -> &'static str {
        "force"
    }

    fn validate(&self) -> Result<(), RequestError> {
        require(&self.order_id, "orderId")?;
        require_card(&self.card)
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("orderId", self.order_id.as_str())?;
        encode(&self.card, body)?;
        body.push("amount", self.amount)?
            .push("approvalCode", self.approval_code.as_str())?;
        encode(&self.verification, body)
    }
}

/// Charges the first of a fixed number of equal installments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallmentPurchase {
    /// Merchant order id.
    pub order_id: String,
    /// Card to charge.
    pub card: CreditCard,
    /// Amount of each installment in cents.
    pub per_installment_amount: i64,
    /// Date of the first installment.
    pub start_date: NaiveDate,
    /// Number of installments.
    pub total_number_installments: i32,
    /// Verification services.
    pub verification: Option<VerificationRequest>,
}

impl InstallmentPurchase {
    /// Creates an installment purchase without verification.
    #[must_use]
    pub fn new(
        order_id: impl Into<String>,
        card: CreditCard,
        per_installment_amount: i64,
        start_date: NaiveDate,
        total_number_installments: i32,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            card,
            per_installment_amount,
            start_date,
            total_number_installments,
            verification: None,
        }
    }

    /// Requests verification services.
    #[must_use]
    pub fn with_verification(mut self, verification: VerificationRequest) -> Self {
        self.verification = Some(verification);
        self
    }
}

impl Operation for InstallmentPurchase {
    type Receipt = CreditCardReceipt;

    fn request_code(&self) -> &'static str {
        "installmentPurchase"
    }

    fn validate(&self) -> Result<(), RequestError> {
        require(&self.order_id, "orderId")
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("orderId", self.order_id.as_str())?;
        encode(&self.card, body)?;
        body.push("amount", self.per_installment_amount)?
            .push("startDate", self.start_date)?
            .push("totalNumberInstallments", self.total_number_installments)?;
        encode(&self.verification, body)
    }
}

/// Identifies a previous transaction by id and order id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRef {
    /// Transaction id.
    pub transaction_id: i64,
    /// Order id of the transaction.
    pub transaction_order_id: String,
}

impl TransactionRef {
    /// Creates a reference.
    #[must_use]
    pub fn new(transaction_id: i64, transaction_order_id: impl Into<String>) -> Self {
        Self {
            transaction_id,
            transaction_order_id: transaction_order_id.into(),
        }
    }

    fn validate(&self) -> Result<(), RequestError> {
        require(&self.transaction_order_id, "transactionOrderId")
    }

    fn encode(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("transactionId", self.transaction_id)?
            .push("transactionOrderId", self.transaction_order_id.as_str())?;
        Ok(())
    }
}

/// Voids a transaction of the open batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Void(pub TransactionRef);

impl Operation for Void {
    type Receipt = CreditCardReceipt;

    fn request_code(&self) -> &'static str {
        "void"
    }

    fn validate(&self) -> Result<(), RequestError> {
        self.0.validate()
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        self.0.encode(body)
    }
}

/// Reverses an authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reversal(pub TransactionRef);

impl Operation for Reversal {
    type Receipt = CreditCardReceipt;

    fn request_code(&self) -> &'static str {
        "reversal"
    }

    fn validate(&self) -> Result<(), RequestError> {
        self.0.validate()
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        self.0.encode(body)
    }
}

/// Looks up the outcome of a previous transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyTransaction {
    /// By transaction id only.
    ById(i64),
    /// By order id only.
    ByOrderId(String),
    /// By transaction id and order id.
    ByIdAndOrderId(TransactionRef),
}

impl Operation for VerifyTransaction {
    type Receipt = CreditCardReceipt;

    fn request_code(&self) -> &'static str {
        "verifyTransaction"
    }

    fn validate(&self) -> Result<(), RequestError> {
        match self {
            Self::ById(_) => Ok(()),
            Self::ByOrderId(order_id) => require(order_id, "transactionOrderId"),
            Self::ByIdAndOrderId(reference) => reference.validate(),
        }
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        match self {
            Self::ById(id) => {
                body.push("transactionId", *id)?;
            }
            Self::ByOrderId(order_id) => {
                body.push("transactionOrderId", order_id.as_str())?;
            }
            Self::ByIdAndOrderId(reference) => reference.encode(body)?,
        }
        Ok(())
    }
}

/// Runs verification services against a card without charging it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCreditCard {
    /// Card or storage token.
    pub card: CardSpecifier,
    /// Also store the card in secure storage. Ignored for tokens.
    pub add_to_storage: bool,
    /// Token to store the card under.
    pub storage_token_id: Option<String>,
    /// Verification services; required.
    pub verification: Option<VerificationRequest>,
}

impl VerifyCreditCard {
    /// Creates a verification.
    #[must_use]
    pub fn new(card: impl Into<CardSpecifier>, verification: VerificationRequest) -> Self {
        Self {
            card: card.into(),
            add_to_storage: false,
            storage_token_id: None,
            verification: Some(verification),
        }
    }

    /// Stores the card after verifying it, under `storage_token_id` if given.
    #[must_use]
    pub fn add_to_storage(mut self, storage_token_id: Option<String>) -> Self {
        self.add_to_storage = true;
        self.storage_token_id = storage_token_id;
        self
    }
}

impl Operation for VerifyCreditCard {
    type Receipt = CreditCardReceipt;

    fn request_code(&self) -> &'static str {
        "verifyCreditCard"
    }

    fn validate(&self) -> Result<(), RequestError> {
        require_card(&self.card)?;
        if self.verification.is_none() {
            return Err(RequestError::Missing("verificationRequest"));
        }
        Ok(())
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        if self.add_to_storage && matches!(self.card, CardSpecifier::Card(_)) {
            body.push("addToStorage", true)?
                .append("storageTokenId", self.storage_token_id.as_deref())?;
        }
        encode(&self.card, body)?;
        encode(&self.verification, body)
    }
}

/// Closes the open settlement batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchClose;

impl Operation for BatchClose {
    type Receipt = CreditCardReceipt;

    fn request_code(&self) -> &'static str {
        "batch"
    }

    fn operation_code(&self) -> Option<&'static str> {
        Some("close")
    }

    fn encode_fields(&self, _body: &mut FormBody) -> Result<(), FormError> {
        Ok(())
    }
}

/// Reports the merchant's fraud decision on a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FraudUpdate {
    /// Transaction id.
    pub transaction_id: Option<i64>,
    /// Fraud session id of the transaction.
    pub fraud_session_id: Option<String>,
    /// Merchant decision.
    pub auth: Option<String>,
}

impl Operation for FraudUpdate {
    type Receipt = CreditCardReceipt;

    fn request_code(&self) -> &'static str {
        "fraudUpdate"
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.append("transactionId", self.transaction_id)?
            .append("fraudSessionId", self.fraud_session_id.as_deref())?
            .append("auth", self.auth.as_deref())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AvsRequest, Merchant};
    use crate::request::CreditCardHeader;

    fn header() -> CreditCardHeader {
        CreditCardHeader::new(Merchant::new(1001, "api-token"))
    }

    const HEADER: &str = "requestCode={}&merchantId=1001&apiToken=api-token&marketSegmentCode=I";

    fn expected(request_code: &str, rest: &str) -> String {
        let head = HEADER.replace("{}", request_code);
        if rest.is_empty() {
            head
        } else {
            format!("{head}&{rest}")
        }
    }

    #[test]
    fn test_single_purchase_with_card() {
        let op = SinglePurchase::new("ord1", CreditCard::new("4242424242424242", 2512), 1000);
        let body = op.build(&header()).unwrap();
        assert_eq!(
            body.as_str(),
            expected(
                "singlePurchase",
                "orderId=ord1&creditCardNumber=4242424242424242&expiryDate=2512&amount=1000"
            )
        );
        assert!(!body.contains("avsRequestCode"));
        assert!(!body.contains("cvv2RequestCode"));
    }

    #[test]
    fn test_single_purchase_add_to_storage() {
        let op = SinglePurchase::new("ord2", CreditCard::new("4242424242424242", 2512), 5)
            .add_to_storage(Some("tok-9".into()))
            .with_indicators([CreditCardIndicator::Ecommerce]);
        assert_eq!(
            op.build(&header()).unwrap().as_str(),
            expected(
                "singlePurchase",
                "orderId=ord2&addToStorage=true&storageTokenId=tok-9\
                 &creditCardNumber=4242424242424242&expiryDate=2512&amount=5&EcommerceIndicator=1"
            )
        );
    }

    #[test]
    fn test_single_purchase_with_token_ignores_storage_flag() {
        let op = SinglePurchase::new("ord3", CardSpecifier::token("tok-1"), 700)
            .add_to_storage(None)
            .with_verification(VerificationRequest::new(Some(AvsRequest::VerifyStreetAndZip), None));
        assert_eq!(
            op.build(&header()).unwrap().as_str(),
            expected(
                "singlePurchase",
                "orderId=ord3&storageTokenId=tok-1&amount=700&avsRequestCode=0"
            )
        );
    }

    #[test]
    fn test_missing_order_id() {
        let op = SinglePurchase::new("", CreditCard::new("4242424242424242", 2512), 1);
        let err = op.build(&header()).unwrap_err();
        assert_eq!(err.to_string(), "orderId is required");
        assert!(!err.is_encoding());
    }

    #[test]
    fn test_empty_token_rejected() {
        let op = PreAuth::new("o", CardSpecifier::token(""), 1);
        assert_eq!(
            op.build(&header()).unwrap_err(),
            RequestError::Missing("storageTokenId")
        );
    }

    #[test]
    fn test_capture_and_refund() {
        let capture = Capture::new(55, "o-55", 300);
        assert_eq!(
            capture.build(&header()).unwrap().as_str(),
            expected("capture", "transactionId=55&transactionOrderId=o-55&amount=300")
        );

        let refund = Refund::new(55, "o-55", Some("r-1".into()), 100);
        assert_eq!(
            refund.build(&header()).unwrap().as_str(),
            expected(
                "refund",
                "transactionId=55&transactionOrderId=o-55&orderId=r-1&amount=100"
            )
        );

        let err = Refund::new(55, "", None, 100).build(&header()).unwrap_err();
        assert_eq!(err.to_string(), "purchaseOrderId is required");
    }

    #[test]
    fn test_force_purchase_field_order() {
        let op = ForcePurchase::new("f-1", CardSpecifier::token("tok"), 900, "AP12");
        assert_eq!(
            op.build(&header()).unwrap().as_str(),
            expected(
                "force",
                "orderId=f-1&storageTokenId=tok&amount=900&approvalCode=AP12"
            )
        );

        let verified = op.with_verification(VerificationRequest::new(
            Some(AvsRequest::VerifyStreetAndZip),
            None,
        ));
        assert_eq!(
            verified.build(&header()).unwrap().as_str(),
            expected(
                "force",
                "orderId=f-1&storageTokenId=tok&amount=900&approvalCode=AP12&avsRequestCode=0"
            )
        );
    }

    #[test]
    fn test_verify_transaction_shapes() {
        assert_eq!(
            VerifyTransaction::ById(9).build(&header()).unwrap().as_str(),
            expected("verifyTransaction", "transactionId=9")
        );
        assert_eq!(
            VerifyTransaction::ByOrderId("o-9".into())
                .build(&header())
                .unwrap()
                .as_str(),
            expected("verifyTransaction", "transactionOrderId=o-9")
        );
        assert_eq!(
            VerifyTransaction::ByIdAndOrderId(TransactionRef::new(9, "o-9"))
                .build(&header())
                .unwrap()
                .as_str(),
            expected("verifyTransaction", "transactionId=9&transactionOrderId=o-9")
        );
        assert_eq!(
            VerifyTransaction::ByOrderId(String::new())
                .build(&header())
                .unwrap_err()
                .to_string(),
            "transactionOrderId is required"
        );
    }

    #[test]
    fn test_void_and_reversal() {
        let void = Void(TransactionRef::new(3, "o-3"));
        assert_eq!(
            void.build(&header()).unwrap().as_str(),
            expected("void", "transactionId=3&transactionOrderId=o-3")
        );
        let reversal = Reversal(TransactionRef::new(3, ""));
        assert_eq!(
            reversal.build(&header()).unwrap_err(),
            RequestError::Missing("transactionOrderId")
        );
    }

    #[test]
    fn test_verify_credit_card_requires_verification() {
        let mut op = VerifyCreditCard::new(
            CreditCard::new("4242424242424242", 2512),
            VerificationRequest::new(None, Some(crate::model::Cvv2Request::Present)),
        );
        assert_eq!(
            op.build(&header()).unwrap().as_str(),
            expected(
                "verifyCreditCard",
                "creditCardNumber=4242424242424242&expiryDate=2512&cvv2RequestCode=1"
            )
        );

        op.verification = None;
        assert_eq!(
            op.build(&header()).unwrap_err().to_string(),
            "verificationRequest is required"
        );
    }

    #[test]
    fn test_batch_close() {
        assert_eq!(
            BatchClose.build(&header()).unwrap().as_str(),
            expected("batch", "operationCode=close")
        );
    }

    #[test]
    fn test_fraud_update_skips_absent() {
        let op = FraudUpdate {
            transaction_id: Some(12),
            fraud_session_id: None,
            auth: Some("accept".into()),
        };
        assert_eq!(
            op.build(&header()).unwrap().as_str(),
            expected("fraudUpdate", "transactionId=12&auth=accept")
        );
    }

    #[test]
    fn test_installment_purchase() {
        let op = InstallmentPurchase::new(
            "i-1",
            CreditCard::new("4111111111111111", 2601),
            250,
            NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            4,
        );
        assert_eq!(
            op.build(&header()).unwrap().as_str(),
            expected(
                "installmentPurchase",
                "orderId=i-1&creditCardNumber=4111111111111111&expiryDate=2601&amount=250\
                 &startDate=2026-11-01&totalNumberInstallments=4"
            )
        );

        let verified = op.with_verification(VerificationRequest::new(
            Some(AvsRequest::VerifyStreetAndZip),
            None,
        ));
        assert!(
            verified
                .build(&header())
                .unwrap()
                .as_str()
                .ends_with("&totalNumberInstallments=4&avsRequestCode=0")
        );
    }
}
