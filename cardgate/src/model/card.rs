use std::fmt;

/// A card presented by number and expiry, or by swiped track data.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CreditCard {
    /// Primary account number. Receipts may carry it masked with `*`.
    pub number: Option<String>,
    /// Expiry as the gateway's four-digit `YYMM` number (`2512` for December 2025).
    pub expiry_date: Option<i16>,
    /// Raw magnetic stripe data for card-present transactions.
    pub magnetic_data: Option<String>,
    /// Card security code.
    pub cvv2: Option<String>,
    /// Billing street, used for AVS.
    pub street: Option<String>,
    /// Billing zip or postal code, used for AVS.
    pub zip: Option<String>,
    /// 3-D Secure authentication value.
    pub secure_code: Option<String>,
    /// Name printed on the card.
    pub card_holder_name: Option<String>,
}

impl CreditCard {
    /// Creates a keyed card.
    #[must_use]
    pub fn new(number: impl Into<String>, expiry_date: i16) -> Self {
        Self {
            number: Some(number.into()),
            expiry_date: Some(expiry_date),
            ..Self::default()
        }
    }

    /// Creates a swiped card from its magnetic stripe data.
    #[must_use]
    pub fn swiped(magnetic_data: impl Into<String>) -> Self {
        Self {
            magnetic_data: Some(magnetic_data.into()),
            ..Self::default()
        }
    }

    /// Sets the security code.
    #[must_use]
    pub fn with_cvv2(mut self, cvv2: impl Into<String>) -> Self {
        self.cvv2 = Some(cvv2.into());
        self
    }

    /// Sets the billing street and zip used for address verification.
    #[must_use]
    pub fn with_address(mut self, street: impl Into<String>, zip: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self.zip = Some(zip.into());
        self
    }

    /// Sets the 3-D Secure value.
    #[must_use]
    pub fn with_secure_code(mut self, secure_code: impl Into<String>) -> Self {
        self.secure_code = Some(secure_code.into());
        self
    }

    /// Sets the card holder name.
    #[must_use]
    pub fn with_card_holder_name(mut self, name: impl Into<String>) -> Self {
        self.card_holder_name = Some(name.into());
        self
    }

    /// Returns `true` if the card was presented by magnetic stripe.
    #[must_use]
    pub const fn is_swiped(&self) -> bool {
        self.magnetic_data.is_some()
    }
}

impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked = self.number.as_deref().map(mask);
        f.debug_struct("CreditCard")
            .field("number", &masked)
            .field("expiry_date", &self.expiry_date)
            .field("swiped", &self.is_swiped())
            .field("card_holder_name", &self.card_holder_name)
            .finish_non_exhaustive()
    }
}

fn mask(number: &str) -> String {
    let hidden = number.chars().count().saturating_sub(4);
    number
        .chars()
        .enumerate()
        .map(|(i, c)| if i < hidden { '*' } else { c })
        .collect()
}

/// The payment instrument of a "live card or stored token" operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardSpecifier {
    /// A card supplied with the request.
    Card(CreditCard),
    /// A token referencing a card held in secure storage.
    Token(String),
}

impl From<CreditCard> for CardSpecifier {
    fn from(card: CreditCard) -> Self {
        Self::Card(card)
    }
}

impl CardSpecifier {
    /// Creates a storage token specifier.
    #[must_use]
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }
}

wire_codes! {
    /// Account a US debit card draws from.
    pub enum AccountType: &'static str {
        /// Checking account (`0`).
        Checking = "0",
        /// Savings account (`1`).
        Savings = "1",
    }
}

wire_codes! {
    /// PIN encryption scheme for a debit transaction.
    pub enum KeyPointer: &'static str {
        /// Single DES (`D`).
        Des = "D",
        /// Triple DES (`T`).
        TripleDes = "T",
    }
}

/// A US debit card presented at a PIN pad.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsDebitCard {
    /// Account to debit.
    pub account_type: Option<AccountType>,
    /// Optional customer number.
    pub customer_number: Option<String>,
    /// Magnetic stripe data.
    pub magnetic_data: Option<String>,
    /// DUKPT key serial number.
    pub dukpt_value: Option<String>,
    /// Encrypted PIN block.
    pub pin_block: Option<String>,
    /// PIN encryption scheme.
    pub key_pointer: Option<KeyPointer>,
}

impl UsDebitCard {
    /// Creates a debit card from its swipe and PIN pad output.
    #[must_use]
    pub fn new(
        magnetic_data: impl Into<String>,
        pin_block: impl Into<String>,
        dukpt_value: impl Into<String>,
        key_pointer: KeyPointer,
        account_type: AccountType,
    ) -> Self {
        Self {
            account_type: Some(account_type),
            customer_number: None,
            magnetic_data: Some(magnetic_data.into()),
            dukpt_value: Some(dukpt_value.into()),
            pin_block: Some(pin_block.into()),
            key_pointer: Some(key_pointer),
        }
    }

    /// Sets the customer number.
    #[must_use]
    pub fn with_customer_number(mut self, customer_number: impl Into<String>) -> Self {
        self.customer_number = Some(customer_number.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_masks_number() {
        let card = CreditCard::new("4242424242424242", 2512).with_cvv2("123");
        let debug = format!("{card:?}");
        assert!(debug.contains("************4242"));
        assert!(!debug.contains("123"));
    }

    #[test]
    fn test_mask_counts_characters() {
        assert_eq!(mask("４２４２4242"), "****4242");
        assert_eq!(mask("1234"), "1234");
        assert_eq!(mask("éé12345"), "***2345");
    }

    #[test]
    fn test_swiped_card() {
        let card = CreditCard::swiped("%B4242^DOE/J^2512?");
        assert!(card.is_swiped());
        assert_eq!(card.number, None);
    }

    #[test]
    fn test_debit_codes() {
        assert_eq!(AccountType::Savings.code(), "1");
        assert_eq!(KeyPointer::from_code("T"), Some(KeyPointer::TripleDes));
        assert_eq!(KeyPointer::from_code("X"), None);
    }
}
