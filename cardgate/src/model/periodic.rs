use chrono::NaiveDate;

wire_codes! {
    /// Lifecycle state of a recurring purchase.
    pub enum State: i16 {
        /// Created, no payment taken yet.
        New = 0,
        /// Payments are being taken on schedule.
        InProgress = 1,
        /// All scheduled payments were taken.
        Complete = 2,
        /// Suspended by the merchant.
        OnHold = 3,
        /// Cancelled by the merchant.
        Cancelled = 4,
        /// Stopped after a failure.
        Error = 5,
    }
}

wire_codes! {
    /// Unit of a recurring purchase interval.
    pub enum ScheduleType: i16 {
        /// Monthly.
        Month = 0,
        /// Weekly.
        Week = 1,
        /// Daily.
        Day = 2,
    }
}

wire_codes! {
    /// How the payments of a recurring purchase are triggered.
    pub enum ExecutionType: i32 {
        /// Each payment is triggered by an explicit execute request.
        Manual = 1,
        /// The gateway takes payments on schedule.
        Auto = 2,
    }
}

/// Payment interval: every `interval_length` units of `schedule_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Interval unit.
    pub schedule_type: ScheduleType,
    /// Number of units between payments.
    pub interval_length: i16,
}

impl Schedule {
    /// Creates a schedule.
    #[must_use]
    pub const fn new(schedule_type: ScheduleType, interval_length: i16) -> Self {
        Self {
            schedule_type,
            interval_length,
        }
    }
}

/// A recurring purchase, as sent on create/update and as reported on receipts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodicPurchaseInfo {
    /// Gateway-assigned id of the recurring purchase.
    pub periodic_transaction_id: Option<i64>,
    /// Lifecycle state.
    pub state: Option<State>,
    /// Payment interval.
    pub schedule: Option<Schedule>,
    /// Amount of each payment in cents.
    pub per_payment_amount: Option<i64>,
    /// Merchant order id.
    pub order_id: Option<String>,
    /// Merchant customer id.
    pub customer_id: Option<String>,
    /// First payment date.
    pub start_date: Option<NaiveDate>,
    /// Last payment date.
    pub end_date: Option<NaiveDate>,
    /// Date of the next scheduled payment.
    pub next_payment_date: Option<NaiveDate>,
    /// Transaction id of the most recent payment.
    pub last_payment_id: Option<i64>,
    /// Trigger mode.
    pub execution_type: Option<ExecutionType>,
}

impl PeriodicPurchaseInfo {
    /// A new recurring purchase.
    #[must_use]
    pub fn new(
        order_id: impl Into<String>,
        schedule: Schedule,
        per_payment_amount: i64,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            order_id: Some(order_id.into()),
            schedule: Some(schedule),
            per_payment_amount: Some(per_payment_amount),
            start_date: Some(start_date),
            end_date,
            ..Self::default()
        }
    }

    /// A state change of an existing recurring purchase.
    #[must_use]
    pub fn with_state(periodic_transaction_id: i64, state: State) -> Self {
        Self {
            periodic_transaction_id: Some(periodic_transaction_id),
            state: Some(state),
            ..Self::default()
        }
    }

    /// A payment amount change of an existing recurring purchase.
    #[must_use]
    pub fn with_amount(periodic_transaction_id: i64, per_payment_amount: Option<i64>) -> Self {
        Self {
            periodic_transaction_id: Some(periodic_transaction_id),
            per_payment_amount,
            ..Self::default()
        }
    }

    /// Sets the customer id.
    #[must_use]
    pub fn customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    /// Sets the trigger mode.
    #[must_use]
    pub const fn execution_type(mut self, execution_type: ExecutionType) -> Self {
        self.execution_type = Some(execution_type);
        self
    }
}
