//! Composite field encoders.
//!
//! Each domain value knows the exact field order the gateway expects. Absent
//! values are skipped, and an absent nested value contributes no field at all.

use cardgate_proto::{FormBody, FormError};

use crate::model::{
    AdvancedRiskProfile, CardSpecifier, CreditCard, CreditCardIndicator, CustomerProfile,
    LodgingRequest, PaymentProfile, PeriodicPurchaseInfo, PurchaseCardRequest, UsDebitCard,
    VerificationRequest,
};

/// A value that writes itself into a request body as one or more fields.
pub trait FormEncode {
    /// Appends this value's fields to `body`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] if a field cannot be written.
    fn encode(&self, body: &mut FormBody) -> Result<(), FormError>;
}

impl<T: FormEncode> FormEncode for Option<T> {
    fn encode(&self, body: &mut FormBody) -> Result<(), FormError> {
        match self {
            Some(value) => value.encode(body),
            None => Ok(()),
        }
    }
}

impl<T: FormEncode + ?Sized> FormEncode for &T {
    fn encode(&self, body: &mut FormBody) -> Result<(), FormError> {
        (**self).encode(body)
    }
}

impl FormEncode for CreditCard {
    fn encode(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.append("creditCardNumber", self.number.as_deref())?
            .append("expiryDate", self.expiry_date)?
            .append("magneticData", self.magnetic_data.as_deref())?
            .append("cvv2", self.cvv2.as_deref())?
            .append("street", self.street.as_deref())?
            .append("zip", self.zip.as_deref())?
            .append("secureCode", self.secure_code.as_deref())?
            .append("cardHolderName", self.card_holder_name.as_deref())?;
        Ok(())
    }
}

impl FormEncode for CardSpecifier {
    fn encode(&self, body: &mut FormBody) -> Result<(), FormError> {
        match self {
            Self::Card(card) => card.encode(body),
            Self::Token(token) => {
                body.push("storageTokenId", token.as_str())?;
                Ok(())
            }
        }
    }
}

impl FormEncode for VerificationRequest {
    fn encode(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.append("avsRequestCode", self.avs_request)?
            .append("cvv2RequestCode", self.cvv2_request)?;
        self.advanced_risk_profile.encode(body)
    }
}

impl FormEncode for AdvancedRiskProfile {
    fn encode(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("verifier", ADVANCED_RISK_VERIFIER)?
            .append("customerDomain", self.email_domain.as_deref())?
            .append("customerUsernameHash", self.username_hash.as_deref())?
            .append("customerPasswordHash", self.password_hash.as_deref())?
            .append("customerEmailHash", self.email_hash.as_deref())?
            .append("customerPhone", self.phone.as_deref())?
            .append("customerName", self.customer_name.as_deref())?
            .append("customerAnid", self.anid.as_deref())?
            .append("customerGender", self.gender)?
            .append("customerDriverLicense", self.driver_license.as_deref())?
            .append("customerUniqueId", self.unique_id.as_deref())?
            .append("fraudSessionId", self.fraud_session_id.as_deref())?
            .append("transactionSource", self.transaction_source)?
            .append("billingPhone", self.billing_phone.as_deref())?
            .append("shippingPhone", self.shipping_phone.as_deref())?
            .append("shippingName", self.shipping_name.as_deref())?
            .append("shippingType", self.shipping_type)?
            .append("billingAddress", self.billing.address.as_deref())?
            .append("billingCity", self.billing.city.as_deref())?
            .append("billingProvince", self.billing.province.as_deref())?
            .append("billingPostal", self.billing.postal.as_deref())?
            .append("billingCountry", self.billing.country.as_deref())?
            .append("shippingAddressLine", self.shipping.address.as_deref())?
            .append("shippingCity", self.shipping.city.as_deref())?
            .append("shippingProvince", self.shipping.province.as_deref())?
            .append("shippingPostal", self.shipping.postal.as_deref())?
            .append("shippingCountry", self.shipping.country.as_deref())?
            .append("browserUserAgent", self.user_agent.as_deref())?
            .append("browserLanguage", self.accepted_languages.as_deref())?
            .append("networkIP", self.ip.as_deref())?
            .append("networkProxiedIP", self.proxied_ip.as_deref())?
            .append("issuerBIN", self.issuer_bin.as_deref())?
            .append("issuerName", self.issuer_name.as_deref())?
            .append("issuerPhone", self.issuer_phone.as_deref())?;
        Ok(())
    }
}

/// Verifier handle that selects advanced risk screening.
pub const ADVANCED_RISK_VERIFIER: &str = "arp";

impl FormEncode for PurchaseCardRequest {
    fn encode(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.push("pcii_indicator", true)?
            .push("pcii_customerCode", self.customer_code.as_str())?
            .push("pcii_salesTax", self.sales_tax)?
            .append("pcii_invoice", self.invoice.as_deref())?
            .append("pcii_skuNumber", self.sku_number.as_deref())?
            .append("pcii_tranCode", self.tran_code.as_deref())?;
        Ok(())
    }
}

impl FormEncode for CustomerProfile {
    fn encode(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.append("profileLegalName", self.legal_name.as_deref())?
            .append("profileTradeName", self.trade_name.as_deref())?
            .append("profileEmail", self.website.as_deref())?
            .append("profileFirstName", self.first_name.as_deref())?
            .append("profileLastName", self.last_name.as_deref())?
            .append("profilePhoneNumber", self.phone_number.as_deref())?
            .append("profileFaxNumber", self.fax_number.as_deref())?
            .append("profileAddress1", self.address1.as_deref())?
            .append("profileAddress2", self.address2.as_deref())?
            .append("profileCity", self.city.as_deref())?
            .append("profileProvince", self.province.as_deref())?
            .append("profilePostal", self.postal.as_deref())?
            .append("profileCountry", self.country.as_deref())?;
        Ok(())
    }
}

impl FormEncode for PaymentProfile {
    fn encode(&self, body: &mut FormBody) -> Result<(), FormError> {
        self.credit_card.encode(body)?;
        self.customer_profile.encode(body)
    }
}

impl FormEncode for PeriodicPurchaseInfo {
    fn encode(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.append("amount", self.per_payment_amount)?
            .append("periodicPurchaseStateCode", self.state)?;
        if let Some(schedule) = self.schedule {
            body.push("periodicPurchaseScheduleTypeCode", schedule.schedule_type)?
                .push("periodicPurchaseIntervalLength", schedule.interval_length)?;
        }
        body.append("orderId", self.order_id.as_deref())?
            .append("customerId", self.customer_id.as_deref())?
            .append("startDate", self.start_date)?
            .append("endDate", self.end_date)?
            .append("nextPaymentDate", self.next_payment_date)?
            .append("lastPaymentId", self.last_payment_id)?
            .append("periodicPurchaseExecutionType", self.execution_type)?;
        Ok(())
    }
}

impl FormEncode for LodgingRequest {
    fn encode(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.append("lodging_checkinTime", self.checkin_time)?
            .append("lodging_checkoutTime", self.checkout_time)?
            .append("lodging_dayOfStay", self.day_of_stay)?
            .append("lodging_extraCharge", self.extra_charge)?
            .append("lodging_roomNumber", self.room_number)?
            .append("lodging_roomRate", self.room_rate)?;
        Ok(())
    }
}

impl FormEncode for UsDebitCard {
    fn encode(&self, body: &mut FormBody) -> Result<(), FormError> {
        body.append("accountType", self.account_type)?
            .append("customerNumber", self.customer_number.as_deref())?
            // Field name as spelled by the gateway.
            .append("manageticData", self.magnetic_data.as_deref())?
            .append("dukptValue", self.dukpt_value.as_deref())?
            .append("pinBlock", self.pin_block.as_deref())?
            .append("requestKeyPTR", self.key_pointer)?;
        Ok(())
    }
}

impl FormEncode for [CreditCardIndicator] {
    fn encode(&self, body: &mut FormBody) -> Result<(), FormError> {
        for indicator in self {
            body.push(indicator.field_name(), "1")?;
        }
        Ok(())
    }
}
