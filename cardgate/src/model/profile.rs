use rust_decimal::Decimal;

use super::CreditCard;

/// Customer contact details kept alongside a stored card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerProfile {
    /// Legal business name.
    pub legal_name: Option<String>,
    /// Trade name.
    pub trade_name: Option<String>,
    /// Website or e-mail.
    pub website: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Fax number.
    pub fax_number: Option<String>,
    /// Address line 1.
    pub address1: Option<String>,
    /// Address line 2.
    pub address2: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Province or state.
    pub province: Option<String>,
    /// Postal or zip code.
    pub postal: Option<String>,
    /// Country.
    pub country: Option<String>,
}

impl CustomerProfile {
    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

/// What gets written to, or read back from, secure storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentProfile {
    /// Stored card.
    pub credit_card: Option<CreditCard>,
    /// Stored customer details.
    pub customer_profile: Option<CustomerProfile>,
}

impl PaymentProfile {
    /// Creates a profile.
    #[must_use]
    pub const fn new(
        credit_card: Option<CreditCard>,
        customer_profile: Option<CustomerProfile>,
    ) -> Self {
        Self {
            credit_card,
            customer_profile,
        }
    }
}

/// Level II purchase-card data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseCardRequest {
    /// Customer reference code.
    pub customer_code: String,
    /// Sales tax amount.
    pub sales_tax: Decimal,
    /// Invoice number.
    pub invoice: Option<String>,
    /// SKU number.
    pub sku_number: Option<String>,
    /// Transaction code.
    pub tran_code: Option<String>,
}

impl PurchaseCardRequest {
    /// Creates the required part of the extension.
    #[must_use]
    pub fn new(customer_code: impl Into<String>, sales_tax: Decimal) -> Self {
        Self {
            customer_code: customer_code.into(),
            sales_tax,
            invoice: None,
            sku_number: None,
            tran_code: None,
        }
    }

    /// Sets the invoice number.
    #[must_use]
    pub fn with_invoice(mut self, invoice: impl Into<String>) -> Self {
        self.invoice = Some(invoice.into());
        self
    }

    /// Sets the SKU number.
    #[must_use]
    pub fn with_sku_number(mut self, sku_number: impl Into<String>) -> Self {
        self.sku_number = Some(sku_number.into());
        self
    }

    /// Sets the transaction code.
    #[must_use]
    pub fn with_tran_code(mut self, tran_code: impl Into<String>) -> Self {
        self.tran_code = Some(tran_code.into());
        self
    }
}
