//! Ordered `name=value` request bodies.
//!
//! A [`FormBody`] is the request buffer for exactly one gateway call. Fields
//! are appended in call order, joined with `&`, and absent values are
//! skipped so the body never carries a field the caller did not supply.
//!
//! The gateway does not care about field order, but the order is kept stable
//! so that identical requests always produce identical bodies.
//!
//! Names and values are percent-encoded with the
//! `application/x-www-form-urlencoded` rules: a space becomes `+`, and `&`,
//! `=` and other reserved bytes become `%XX`. Clients that write values raw
//! produce different bytes for such values, and an `&` or `=` inside a raw
//! value would split the field on the gateway side.

use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use url::form_urlencoded;

/// `strftime` pattern for every date sent to the gateway (`yyyy-MM-dd`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors raised while appending fields to a [`FormBody`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// A field was appended with an empty name.
    #[error("field name is required")]
    EmptyName,
}

/// A value that can be rendered as a form field.
pub trait FormValue {
    /// Returns the unescaped textual representation of the value.
    fn form_value(&self) -> Cow<'_, str>;
}

impl FormValue for str {
    fn form_value(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl FormValue for String {
    fn form_value(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl<T: FormValue + ?Sized> FormValue for &T {
    fn form_value(&self) -> Cow<'_, str> {
        (**self).form_value()
    }
}

macro_rules! display_form_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FormValue for $ty {
                fn form_value(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

display_form_value!(i16, i32, i64, u8, u16, u32, u64, bool, Decimal);

impl FormValue for NaiveDate {
    fn form_value(&self) -> Cow<'_, str> {
        Cow::Owned(self.format(DATE_FORMAT).to_string())
    }
}

/// An append-only, ordered request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBody {
    encoded: String,
    fields: usize,
}

impl FormBody {
    /// Creates an empty body.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            encoded: String::new(),
            fields: 0,
        }
    }

    /// Appends `name=value` when `value` is present, and does nothing otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::EmptyName`] if `name` is empty.
    pub fn append<V: FormValue>(
        &mut self,
        name: &str,
        value: Option<V>,
    ) -> Result<&mut Self, FormError> {
        if name.is_empty() {
            return Err(FormError::EmptyName);
        }
        if let Some(value) = value {
            if !self.encoded.is_empty() {
                self.encoded.push('&');
            }
            self.encoded
                .extend(form_urlencoded::byte_serialize(name.as_bytes()));
            self.encoded.push('=');
            self.encoded
                .extend(form_urlencoded::byte_serialize(value.form_value().as_bytes()));
            self.fields += 1;
        }
        Ok(self)
    }

    /// Appends a field whose value is always present.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::EmptyName`] if `name` is empty.
    pub fn push<V: FormValue>(&mut self, name: &str, value: V) -> Result<&mut Self, FormError> {
        self.append(name, Some(value))
    }

    /// Returns `true` if no field has been appended.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields == 0
    }

    /// Returns the number of appended fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields
    }

    /// Returns the encoded body.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// Consumes the body and returns the encoded text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.encoded
    }

    /// Iterates over the decoded `(name, value)` pairs in append order.
    pub fn fields(&self) -> impl Iterator<Item = (Cow<'_, str>, Cow<'_, str>)> {
        form_urlencoded::parse(self.encoded.as_bytes())
    }

    /// Returns the names of the appended fields in order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.fields().map(|(name, _)| name.into_owned()).collect()
    }

    /// Returns the decoded value of the first field named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        self.fields()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.into_owned())
    }

    /// Returns `true` if a field named `name` was appended.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields().any(|(n, _)| n == name)
    }
}

impl fmt::Display for FormBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl From<FormBody> for String {
    fn from(body: FormBody) -> Self {
        body.into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_append_joins_with_ampersand() {
        let mut body = FormBody::new();
        body.push("requestCode", "singlePurchase").unwrap();
        body.push("amount", 1000_i64).unwrap();
        assert_eq!(body.as_str(), "requestCode=singlePurchase&amount=1000");
        assert_eq!(body.len(), 2);
    }

    #[test]
    fn test_append_skips_absent_values() {
        let mut body = FormBody::new();
        body.append("cvv2", None::<&str>).unwrap();
        assert!(body.is_empty());
        assert_eq!(body.as_str(), "");

        body.push("orderId", "o-1").unwrap();
        body.append("zip", None::<&str>).unwrap();
        assert_eq!(body.as_str(), "orderId=o-1");
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut body = FormBody::new();
        assert_eq!(body.push("", "x").unwrap_err(), FormError::EmptyName);
        assert_eq!(
            body.append("", None::<&str>).unwrap_err(),
            FormError::EmptyName
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let mut body = FormBody::new();
        body.push("cardHolderName", "Jane Doe & Co").unwrap();
        body.push("magneticData", "%B4242^DOE/J^2512?").unwrap();
        assert!(!body.as_str().contains(' '));
        assert!(body.as_str().starts_with("cardHolderName=Jane+Doe+%26+Co&"));
        assert_eq!(body.get("cardHolderName").unwrap(), "Jane Doe & Co");
        assert_eq!(body.get("magneticData").unwrap(), "%B4242^DOE/J^2512?");
        assert_eq!(body.len(), 2);
    }

    #[test]
    fn test_dates_and_decimals() {
        let mut body = FormBody::new();
        body.push("startDate", NaiveDate::from_ymd_opt(2026, 3, 7).unwrap())
            .unwrap();
        body.push("pcii_salesTax", Decimal::from_str("12.50").unwrap())
            .unwrap();
        body.push("addToStorage", true).unwrap();
        assert_eq!(
            body.as_str(),
            "startDate=2026-03-07&pcii_salesTax=12.50&addToStorage=true"
        );
    }

    #[test]
    fn test_names_preserve_order() {
        let mut body = FormBody::new();
        body.push("b", "1").unwrap();
        body.push("a", "2").unwrap();
        body.push("c", "3").unwrap();
        assert_eq!(body.names(), vec!["b", "a", "c"]);
        assert!(body.contains("a"));
        assert!(!body.contains("d"));
    }
}
