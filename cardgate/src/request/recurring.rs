//! Recurring purchase lifecycle.

use cardgate_proto::{FormBody, FormError};

use super::{Operation, encode, require_card, require_some};
use crate::error::RequestError;
use crate::model::{
    CardSpecifier, CreditCardIndicator, PeriodicPurchaseInfo, PurchaseCardRequest, State,
    VerificationRequest,
};
use crate::receipt::CreditCardReceipt;

const REQUEST_CODE: &str = "recurringPurchase";

/// Creates a recurring purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringPurchase {
    /// Schedule, amount and order id; the order id is required.
    pub info: PeriodicPurchaseInfo,
    /// Card or storage token billed on each payment.
    pub card: CardSpecifier,
    /// Verification services.
    pub verification: Option<VerificationRequest>,
    /// Level II data.
    pub purchase_card: Option<PurchaseCardRequest>,
    /// Transaction flags.
    pub indicators: Vec<CreditCardIndicator>,
}

impl RecurringPurchase {
    /// Creates the request.
    #[must_use]
    pub fn new(info: PeriodicPurchaseInfo, card: impl Into<CardSpecifier>) -> Self {
        Self {
            info,
            card: card.into(),
            verification: None,
            purchase_card: None,
            indicators: Vec::new(),
        }
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

impl Operation for RecurringPurchase {
    type Receipt = CreditCardReceipt;

    fn request_code(&self) -> &'static str {
        REQUEST_CODE
    }

    fn operation_code(&self) -> Option<&'static str> {
        Some("create")
    }

    fn validate(&self) -> Result<(), RequestError> {
        require_some(self.info.order_id.as_deref(), "orderId")?;
        require_card(&self.card)
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        encode(&self.info, body)?;
        encode(&self.card, body)?;
        encode(&self.verification, body)?;
        encode(&self.purchase_card, body)?;
        encode(self.indicators.as_slice(), body)
    }
}

/// Fetches the current state of a recurring purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurringQuery {
    /// Id of the recurring purchase.
    pub recurring_purchase_id: i64,
}

impl Operation for RecurringQuery {
    type Receipt = CreditCardReceipt;

    fn request_code(&self) -> &'static str {
        REQUEST_CODE
    }

    fn operation_code(&self) -> Option<&'static str> {
        Some("query")
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("transactionId", self.recurring_purchase_id)?;
        Ok(())
    }
}

/// Triggers the next payment of a manually executed recurring purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringExecute {
    /// Id of the recurring purchase.
    pub recurring_purchase_id: i64,
    /// Card security code, when the card requires it.
    pub cvv2: Option<String>,
}

impl Operation for RecurringExecute {
    type Receipt = CreditCardReceipt;

    fn request_code(&self) -> &'static str {
        REQUEST_CODE
    }

    fn operation_code(&self) -> Option<&'static str> {
        Some("execute")
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.append("cvv2", self.cvv2.as_deref())?
            .push("transactionId", self.recurring_purchase_id)?;
        Ok(())
    }
}

/// Changes a recurring purchase: state, amount, schedule or billing card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringUpdate {
    /// New values; `periodic_transaction_id` identifies the purchase and is
    /// required.
    pub info: PeriodicPurchaseInfo,
    /// Replacement card or token.
    pub card: Option<CardSpecifier>,
    /// Verification services for the replacement card.
    pub verification: Option<VerificationRequest>,
    /// Level II data.
    pub purchase_card: Option<PurchaseCardRequest>,
    /// Transaction flags.
    pub indicators: Vec<CreditCardIndicator>,
}

impl RecurringUpdate {
    /// Creates an update carrying `info`.
    #[must_use]
    pub const fn new(info: PeriodicPurchaseInfo) -> Self {
        Self {
            info,
            card: None,
            verification: None,
            purchase_card: None,
            indicators: Vec::new(),
        }
    }

    /// Puts the recurring purchase on hold.
    #[must_use]
    pub fn hold(recurring_purchase_id: i64) -> Self {
        Self::new(PeriodicPurchaseInfo::with_state(
            recurring_purchase_id,
            State::OnHold,
        ))
    }

    /// Resumes a recurring purchase that is on hold.
    #[must_use]
    pub fn resume(recurring_purchase_id: i64) -> Self {
        Self::new(PeriodicPurchaseInfo::with_state(
            recurring_purchase_id,
            State::InProgress,
        ))
    }

    /// Cancels the recurring purchase.
    #[must_use]
    pub fn cancel(recurring_purchase_id: i64) -> Self {
        Self::new(PeriodicPurchaseInfo::with_state(
            recurring_purchase_id,
            State::Cancelled,
        ))
    }

    /// Replaces the billing card or token.
    #[must_use]
    pub fn with_card(mut self, card: impl Into<CardSpecifier>) -> Self {
        self.card = Some(card.into());
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

impl Operation for RecurringUpdate {
    type Receipt = CreditCardReceipt;

    fn request_code(&self) -> &'static str {
        REQUEST_CODE
    }

    fn operation_code(&self) -> Option<&'static str> {
        Some("update")
    }

    fn validate(&self) -> Result<(), RequestError> {
        if self.info.periodic_transaction_id.is_none() {
            return Err(RequestError::Missing("recurringPurchaseId"));
        }
        self.card.as_ref().map_or(Ok(()), require_card)
    }

    fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.append("transactionId", self.info.periodic_transaction_id)?;
        encode(&self.info, body)?;
        encode(&self.card, body)?;
        encode(&self.verification, body)?;
        encode(&self.purchase_card, body)?;
        encode(self.indicators.as_slice(), body)
    }
}
