use std::fmt;

/// Optional transaction flags, each sent as `<name>=1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreditCardIndicator {
    /// The merchant accepts a partial approval.
    PartialAuth,
    /// Recurring mail or telephone order.
    RecurringMoto,
    /// Electronic commerce transaction.
    Ecommerce,
    /// Single mail or telephone order.
    SingleMoto,
    /// 3-D Secure authenticated transaction.
    SecureCode,
}

impl CreditCardIndicator {
    /// Returns the field name the gateway expects for this flag.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::PartialAuth => "PartialAuthIndicator",
            // The gateway spells this one with a single `r`.
            Self::RecurringMoto => "RecuringMOTOIndicator",
            Self::Ecommerce => "EcommerceIndicator",
            Self::SingleMoto => "SingleMOTOIndicator",
            Self::SecureCode => "SecureCodeIndicator",
        }
    }

    /// Returns the numeric code of the flag.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::PartialAuth => 1,
            Self::RecurringMoto => 2,
            Self::Ecommerce => 3,
            Self::SingleMoto => 4,
            Self::SecureCode => 5,
        }
    }
}

impl fmt::Display for CreditCardIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}
