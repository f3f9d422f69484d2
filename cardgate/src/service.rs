//! Public entry points.
//!
//! A service owns the merchant header and a [`Transport`]. Each call builds one
//! request, sends it once and returns a receipt; failures at any stage are
//! folded into the receipt instead of being returned as errors.

use cardgate_proto::ErrorCode;
use chrono::NaiveDate;
#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::config::GatewayConfig;
use crate::error::RequestError;
use crate::exchange::Transport;
use crate::model::{
    CardSpecifier, CreditCard, LodgingRequest, MarketSegment, Merchant, PaymentProfile,
    PeriodicPurchaseInfo, UsDebitCard, VerificationRequest,
};
use crate::receipt::{CreditCardReceipt, DebitCardReceipt, GatewayReceipt, StorageReceipt};
use crate::request::{
    BatchClose, Capture, CreditCardHeader, DebitCardHeader, DebitPurchase, DebitRefund,
    ForcePurchase, FraudUpdate, InstallmentPurchase, LodgingCheckin, LodgingCheckout,
    LodgingIncremental, Operation, PreAuth, RecurringExecute, RecurringPurchase, RecurringQuery,
    RecurringUpdate, Refund, RequestHeader, Reversal, SingleCredit, SinglePurchase, StorageAdd,
    StorageDelete, StorageQuery, StorageUpdate, TransactionRef, VerifyCreditCard,
    VerifyTransaction, Void,
};

const ENCODING_FAILED: &str = "error encoding request.";

/// Builds, sends and decodes one operation.
#[cfg_attr(
    feature = "telemetry",
    instrument(
        name = "cardgate.exchange",
        skip_all,
        fields(request_code = op.request_code(), operation_code = op.operation_code())
    )
)]
async fn exchange<T, H, O>(transport: &T, header: &H, op: &O) -> O::Receipt
where
    T: Transport + ?Sized,
    H: RequestHeader + ?Sized,
    O: Operation,
{
    let body = match op.build(header) {
        Ok(body) => body,
        Err(err) => return rejected(&err),
    };

    let receipt = match transport.send(&body).await {
        Ok(text) => O::Receipt::decode(&text),
        Err(failure) => O::Receipt::from_failure(failure.code, failure.message, failure.debug),
    };
    record_outcome(&receipt);
    receipt
}

fn rejected<R: GatewayReceipt>(err: &RequestError) -> R {
    #[cfg(feature = "telemetry")]
    tracing::event!(tracing::Level::WARN, error = %err, "request rejected before sending");
    match err {
        RequestError::Encode(source) => R::from_failure(
            ErrorCode::InvalidRequest,
            ENCODING_FAILED.to_owned(),
            Some(source.to_string()),
        ),
        RequestError::Missing(_) => {
            R::from_failure(ErrorCode::InvalidRequest, err.to_string(), None)
        }
    }
}

/// Logs the outcome of an exchange. Noop if telemetry feature is off.
#[cfg(feature = "telemetry")]
fn record_outcome<R: GatewayReceipt>(receipt: &R) {
    if receipt.is_approved() {
        tracing::event!(tracing::Level::DEBUG, "gateway approved");
    } else {
        tracing::event!(
            tracing::Level::INFO,
            error_code = receipt.error_code(),
            error_message = receipt.error_message(),
            "gateway did not approve"
        );
    }
}

/// Logs the outcome of an exchange. Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
const fn record_outcome<R: GatewayReceipt>(_receipt: &R) {}

/// Credit card, recurring, storage and lodging operations.
///
/// The service is immutable and can be shared across tasks.
#[derive(Debug, Clone)]
pub struct CreditCardService<T> {
    transport: T,
    header: CreditCardHeader,
}

impl<T: Transport> CreditCardService<T> {
    /// Creates a service sending through `transport`.
    #[must_use]
    pub const fn new(merchant: Merchant, transport: T) -> Self {
        Self {
            transport,
            header: CreditCardHeader::new(merchant),
        }
    }

    /// Creates a service from loaded settings.
    #[must_use]
    pub fn from_config(config: &GatewayConfig, transport: T) -> Self {
        let mut service = Self::new(config.merchant(), transport);
        if let Some(segment) = config.market_segment {
            service = service.with_market_segment(segment);
        }
        service
    }

    /// Overrides the market segment sent in every request.
    #[must_use]
    pub fn with_market_segment(mut self, market_segment: MarketSegment) -> Self {
        self.header = self.header.with_market_segment(market_segment);
        self
    }

    /// The merchant credentials.
    #[must_use]
    pub fn merchant(&self) -> &Merchant {
        self.header.merchant()
    }

    /// The transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs any operation.
    pub async fn execute<O: Operation>(&self, op: &O) -> O::Receipt {
        exchange(&self.transport, &self.header, op).await
    }

    /// Charges a card or stored token.
    pub async fn single_purchase(
        &self,
        order_id: impl Into<String>,
        card: impl Into<CardSpecifier>,
        amount: i64,
        verification: Option<VerificationRequest>,
    ) -> CreditCardReceipt {
        let mut op = SinglePurchase::new(order_id, card, amount);
        op.verification = verification;
        self.execute(&op).await
    }

    /// Authorizes without capturing.
    pub async fn pre_auth(
        &self,
        order_id: impl Into<String>,
        card: impl Into<CardSpecifier>,
        amount: i64,
        verification: Option<VerificationRequest>,
    ) -> CreditCardReceipt {
        let mut op = PreAuth::new(order_id, card, amount);
        op.verification = verification;
        self.execute(&op).await
    }

    /// Captures an authorization.
    pub async fn capture(
        &self,
        transaction_id: i64,
        transaction_order_id: impl Into<String>,
        amount: i64,
    ) -> CreditCardReceipt {
        self.execute(&Capture::new(transaction_id, transaction_order_id, amount))
            .await
    }

    /// Refunds a purchase.
    pub async fn refund(
        &self,
        transaction_id: i64,
        transaction_order_id: impl Into<String>,
        refund_order_id: Option<String>,
        amount: i64,
    ) -> CreditCardReceipt {
        self.execute(&Refund::new(
            transaction_id,
            transaction_order_id,
            refund_order_id,
            amount,
        ))
        .await
    }

    /// Credits a card.
    pub async fn single_credit(
        &self,
        order_id: impl Into<String>,
        card: impl Into<CardSpecifier>,
        amount: i64,
        verification: Option<VerificationRequest>,
    ) -> CreditCardReceipt {
        let mut op = SingleCredit::new(order_id, card, amount);
        op.verification = verification;
        self.execute(&op).await
    }

    /// Posts a purchase authorized outside the gateway.
    pub async fn force_purchase(
        &self,
        order_id: impl Into<String>,
        card: impl Into<CardSpecifier>,
        amount: i64,
        approval_code: impl Into<String>,
        verification: Option<VerificationRequest>,
    ) -> CreditCardReceipt {
        let mut op = ForcePurchase::new(order_id, card, amount, approval_code);
        op.verification = verification;
        self.execute(&op).await
    }

    /// Charges the first of `total_number_installments` equal installments.
    pub async fn installment_purchase(
        &self,
        order_id: impl Into<String>,
        card: CreditCard,
        per_installment_amount: i64,
        start_date: NaiveDate,
        total_number_installments: i32,
        verification: Option<VerificationRequest>,
    ) -> CreditCardReceipt {
        let mut op = InstallmentPurchase::new(
            order_id,
            card,
            per_installment_amount,
            start_date,
            total_number_installments,
        );
        op.verification = verification;
        self.execute(&op).await
    }

    /// Creates a recurring purchase.
    pub async fn recurring_purchase(
        &self,
        info: PeriodicPurchaseInfo,
        card: impl Into<CardSpecifier>,
        verification: Option<VerificationRequest>,
    ) -> CreditCardReceipt {
        let mut op = RecurringPurchase::new(info, card);
        op.verification = verification;
        self.execute(&op).await
    }

    /// Puts a recurring purchase on hold.
    pub async fn hold_recurring_purchase(&self, recurring_purchase_id: i64) -> CreditCardReceipt {
        self.execute(&RecurringUpdate::hold(recurring_purchase_id))
            .await
    }

    /// Resumes a recurring purchase.
    pub async fn resume_recurring_purchase(&self, recurring_purchase_id: i64) -> CreditCardReceipt {
        self.execute(&RecurringUpdate::resume(recurring_purchase_id))
            .await
    }

    /// Cancels a recurring purchase.
    pub async fn cancel_recurring_purchase(&self, recurring_purchase_id: i64) -> CreditCardReceipt {
        self.execute(&RecurringUpdate::cancel(recurring_purchase_id))
            .await
    }

    /// Fetches a recurring purchase.
    pub async fn query_recurring_purchase(&self, recurring_purchase_id: i64) -> CreditCardReceipt {
        self.execute(&RecurringQuery {
            recurring_purchase_id,
        })
        .await
    }

    /// Triggers the next payment of a recurring purchase.
    pub async fn execute_recurring_purchase(
        &self,
        recurring_purchase_id: i64,
        cvv2: Option<String>,
    ) -> CreditCardReceipt {
        self.execute(&RecurringExecute {
            recurring_purchase_id,
            cvv2,
        })
        .await
    }

    /// Changes a recurring purchase.
    pub async fn update_recurring_purchase(&self, update: &RecurringUpdate) -> CreditCardReceipt {
        self.execute(update).await
    }

    /// Stores a payment profile.
    pub async fn add_to_storage(
        &self,
        storage_token_id: Option<String>,
        payment_profile: PaymentProfile,
    ) -> StorageReceipt {
        self.execute(&StorageAdd {
            storage_token_id,
            payment_profile,
        })
        .await
    }

    /// Replaces a stored payment profile.
    pub async fn update_storage(
        &self,
        storage_token_id: impl Into<String>,
        payment_profile: PaymentProfile,
    ) -> StorageReceipt {
        self.execute(&StorageUpdate {
            storage_token_id: storage_token_id.into(),
            payment_profile,
        })
        .await
    }

    /// Fetches a stored payment profile.
    pub async fn query_storage(&self, storage_token_id: impl Into<String>) -> StorageReceipt {
        self.execute(&StorageQuery {
            storage_token_id: storage_token_id.into(),
        })
        .await
    }

    /// Deletes a stored payment profile.
    pub async fn delete_from_storage(&self, storage_token_id: impl Into<String>) -> StorageReceipt {
        self.execute(&StorageDelete {
            storage_token_id: storage_token_id.into(),
        })
        .await
    }

    /// Runs verification services without charging.
    pub async fn verify_credit_card(
        &self,
        card: impl Into<CardSpecifier>,
        verification: VerificationRequest,
    ) -> CreditCardReceipt {
        self.execute(&VerifyCreditCard::new(card, verification))
            .await
    }

    /// Looks up a previous transaction.
    pub async fn verify_transaction(&self, lookup: VerifyTransaction) -> CreditCardReceipt {
        self.execute(&lookup).await
    }

    /// Voids a transaction.
    pub async fn void_transaction(
        &self,
        transaction_id: i64,
        transaction_order_id: impl Into<String>,
    ) -> CreditCardReceipt {
        self.execute(&Void(TransactionRef::new(
            transaction_id,
            transaction_order_id,
        )))
        .await
    }

    /// Reverses an authorization.
    pub async fn reverse_transaction(
        &self,
        transaction_id: i64,
        transaction_order_id: impl Into<String>,
    ) -> CreditCardReceipt {
        self.execute(&Reversal(TransactionRef::new(
            transaction_id,
            transaction_order_id,
        )))
        .await
    }

    /// Authorizes a hotel stay.
    pub async fn lodging_checkin(
        &self,
        order_id: impl Into<String>,
        card: CreditCard,
        amount: i64,
        lodging: Option<LodgingRequest>,
        verification: Option<VerificationRequest>,
    ) -> CreditCardReceipt {
        self.execute(&LodgingCheckin {
            order_id: order_id.into(),
            card,
            amount,
            lodging,
            verification,
        })
        .await
    }

    /// Extends a hotel stay authorization.
    pub async fn lodging_incremental(
        &self,
        transaction_id: i64,
        order_id: impl Into<String>,
        amount: i64,
        lodging: Option<LodgingRequest>,
    ) -> CreditCardReceipt {
        self.execute(&LodgingIncremental {
            transaction_id,
            order_id: order_id.into(),
            amount,
            lodging,
        })
        .await
    }

    /// Settles a hotel stay.
    pub async fn lodging_checkout(
        &self,
        transaction_id: i64,
        order_id: impl Into<String>,
        amount: i64,
        lodging: Option<LodgingRequest>,
    ) -> CreditCardReceipt {
        self.execute(&LodgingCheckout {
            transaction_id,
            order_id: order_id.into(),
            amount,
            lodging,
        })
        .await
    }

    /// Closes the open batch.
    pub async fn close_batch(&self) -> CreditCardReceipt {
        self.execute(&BatchClose).await
    }

    /// Reports a fraud decision.
    pub async fn update_fraud(
        &self,
        transaction_id: Option<i64>,
        fraud_session_id: Option<String>,
        auth: Option<String>,
    ) -> CreditCardReceipt {
        self.execute(&FraudUpdate {
            transaction_id,
            fraud_session_id,
            auth,
        })
        .await
    }
}

/// US debit card operations.
#[derive(Debug, Clone)]
pub struct DebitCardService<T> {
    transport: T,
    header: DebitCardHeader,
}

impl<T: Transport> DebitCardService<T> {
    /// Creates a service sending through `transport`.
    #[must_use]
    pub const fn new(merchant: Merchant, transport: T) -> Self {
        Self {
            transport,
            header: DebitCardHeader::new(merchant),
        }
    }

    /// Creates a service from loaded settings.
    #[must_use]
    pub fn from_config(config: &GatewayConfig, transport: T) -> Self {
        let mut service = Self::new(config.merchant(), transport);
        if let Some(segment) = config.market_segment {
            service = service.with_market_segment(segment);
        }
        service
    }

    /// Overrides the market segment sent in every request.
    #[must_use]
    pub fn with_market_segment(mut self, market_segment: MarketSegment) -> Self {
        self.header = self.header.with_market_segment(market_segment);
        self
    }

    /// The merchant credentials.
    #[must_use]
    pub fn merchant(&self) -> &Merchant {
        self.header.merchant()
    }

    /// Runs any operation.
    pub async fn execute<O: Operation>(&self, op: &O) -> O::Receipt {
        exchange(&self.transport, &self.header, op).await
    }

    /// Debits a card.
    pub async fn single_purchase(
        &self,
        order_id: impl Into<String>,
        card: UsDebitCard,
        amount: i64,
        surcharge_amount: Option<i64>,
        cashback_amount: Option<i64>,
    ) -> DebitCardReceipt {
        let mut op = DebitPurchase::new(order_id, card, amount);
        op.surcharge_amount = surcharge_amount;
        op.cashback_amount = cashback_amount;
        self.execute(&op).await
    }

    /// Refunds to a card.
    pub async fn single_credit(
        &self,
        order_id: impl Into<String>,
        card: UsDebitCard,
        amount: i64,
    ) -> DebitCardReceipt {
        self.execute(&DebitRefund {
            order_id: order_id.into(),
            card,
            amount,
        })
        .await
    }

    /// Closes the open batch.
    pub async fn close_batch(&self) -> CreditCardReceipt {
        self.execute(&BatchClose).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use cardgate_proto::{FormBody, FormError};

    use super::*;
    use crate::exchange::{BoxFuture, Exchange, ExchangeFailure};
    use crate::model::{AccountType, KeyPointer};

    /// Records every body and answers with a fixed outcome.
    struct StubTransport {
        reply: Exchange,
        sent: Mutex<Vec<String>>,
    }

    impl StubTransport {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_owned()),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn failing(failure: ExchangeFailure) -> Self {
            Self {
                reply: Err(failure),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Transport for StubTransport {
        fn send<'a>(&'a self, body: &'a FormBody) -> BoxFuture<'a, Exchange> {
            self.sent.lock().unwrap().push(body.to_string());
            let reply = self.reply.clone();
            Box::pin(async move { reply })
        }
    }

    fn service(transport: StubTransport) -> CreditCardService<StubTransport> {
        CreditCardService::new(Merchant::new(1001, "tok"), transport)
    }

    #[tokio::test]
    async fn test_single_purchase_round_trip() {
        let service = service(StubTransport::replying(
            "APPROVED=true\nTRANSACTION_ID=555\nAUTHORIZED_AMOUNT=1000\nAPPROVAL_CODE=OK1",
        ));
        let receipt = service
            .single_purchase(
                "ord1",
                CreditCard::new("4242424242424242", 2512),
                1000,
                None,
            )
            .await;

        assert!(receipt.is_approved());
        assert_eq!(receipt.approval_info().unwrap().approval_code.as_deref(), Some("OK1"));
        assert_eq!(
            service.transport().sent(),
            vec![
                "requestCode=singlePurchase&merchantId=1001&apiToken=tok&marketSegmentCode=I\
                 &orderId=ord1&creditCardNumber=4242424242424242&expiryDate=2512&amount=1000"
                    .to_owned()
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_request_is_not_sent() {
        let service = service(StubTransport::replying("APPROVED=true"));
        let receipt = service
            .single_purchase("", CardSpecifier::token("t"), 1, None)
            .await;

        assert!(!receipt.is_approved());
        assert_eq!(receipt.error_code(), Some("-6"));
        assert_eq!(receipt.error_message(), Some("orderId is required"));
        assert!(receipt.receipt().debug_message().is_none());
        assert!(service.transport().sent().is_empty());
    }

    /// Writes a field with no name, which the body refuses.
    struct NamelessField;

    impl Operation for NamelessField {
        type Receipt = CreditCardReceipt;

        fn request_code(&self) -> &'static str {
            "singlePurchase"
        }

        fn encode_fields(&self, body: &mut FormBody) -> Result<(), FormError> {
            body.push("", "value")?;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_encoding_failure_is_not_sent() {
        let service = service(StubTransport::replying("APPROVED=true"));
        let receipt = service.execute(&NamelessField).await;

        assert!(!receipt.is_approved());
        assert_eq!(receipt.error_code(), Some("-6"));
        assert_eq!(receipt.error_message(), Some("error encoding request."));
        assert_eq!(
            receipt.receipt().debug_message(),
            Some(FormError::EmptyName.to_string().as_str())
        );
        assert!(service.transport().sent().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_receipt() {
        let service = service(StubTransport::failing(ExchangeFailure::new(
            ErrorCode::ConnectionFailed,
            "timed out while connecting to the credit card gateway.",
            None,
        )));
        let receipt = service.capture(5, "o-5", 100).await;

        assert!(!receipt.is_approved());
        assert_eq!(
            receipt.receipt().error_kind(),
            Some(ErrorCode::ConnectionFailed)
        );
        assert_eq!(
            receipt.error_message(),
            Some("timed out while connecting to the credit card gateway.")
        );
        assert!(receipt.approval_info().is_none());
    }

    #[tokio::test]
    async fn test_installment_purchase_sends_schedule() {
        let service = service(StubTransport::replying("APPROVED=true\nTRANSACTION_ID=9"));
        let receipt = service
            .installment_purchase(
                "inst-1",
                CreditCard::new("4111111111111111", 2601),
                250,
                NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
                4,
                None,
            )
            .await;
        assert!(receipt.is_approved());

        let sent = service.transport().sent();
        assert!(sent[0].starts_with("requestCode=installmentPurchase&"));
        assert!(sent[0].contains("&totalNumberInstallments=4"));
    }

    #[tokio::test]
    async fn test_storage_uses_storage_receipt() {
        let service = service(StubTransport::replying(
            "APPROVED=true\nSTORAGE_TOKEN_ID=tok-1",
        ));
        let receipt = service.query_storage("tok-1").await;
        assert_eq!(receipt.storage_token_id(), Some("tok-1"));

        let receipt = service.delete_from_storage("").await;
        assert_eq!(receipt.error_message(), Some("storageTokenId is required"));
        assert_eq!(service.transport().sent().len(), 1);
    }

    #[tokio::test]
    async fn test_from_config_applies_segment_and_store() {
        let config = GatewayConfig::new("https://gw", 9, "k")
            .with_store_id("s")
            .with_market_segment(MarketSegment::MailOrTelephoneOrder);
        let service = CreditCardService::from_config(&config, StubTransport::replying("APPROVED=true"));
        service.close_batch().await;

        assert_eq!(
            service.transport().sent(),
            vec![
                "requestCode=batch&merchantId=9&apiToken=k&marketSegmentCode=M&storeId=s\
                 &operationCode=close"
                    .to_owned()
            ]
        );
    }

    #[tokio::test]
    async fn test_recurring_hold() {
        let service = service(StubTransport::replying(
            "APPROVED=true\nPERIODIC_TRANSACTION_ID=8\nPERIODIC_TRANSACTION_STATE=3",
        ));
        let receipt = service.hold_recurring_purchase(8).await;
        let info = receipt.periodic_purchase_info().unwrap();
        assert_eq!(info.state, Some(crate::model::State::OnHold));
    }

    #[tokio::test]
    async fn test_debit_service() {
        let transport = StubTransport::replying("APPROVED=true\nAUTHORIZED_AMOUNT=2000");
        let service = DebitCardService::new(Merchant::new(3, "t").with_store_id("x"), transport);
        let card = UsDebitCard::new("M", "P", "K", KeyPointer::Des, AccountType::Savings);
        let receipt = service.single_purchase("d-1", card, 2000, None, None).await;

        assert_eq!(receipt.approval_info().unwrap().authorized_amount, Some(2000));
        let sent = service.transport.sent();
        assert!(sent[0].starts_with(
            "requestCode=singleDebitPurchase&merchantId=3&apiToken=t&marketSegmentCode=G&orderId=d-1"
        ));
        assert!(!sent[0].contains("storeId"));
    }
}
