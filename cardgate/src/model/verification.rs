wire_codes! {
    /// Address verification mode.
    pub enum AvsRequest: i16 {
        /// Verify both street and zip.
        VerifyStreetAndZip = 0,
        /// Verify the zip only.
        VerifyZipOnly = 1,
    }
}

wire_codes! {
    /// How the card security code was presented.
    pub enum Cvv2Request: i16 {
        /// The code was not submitted.
        NotSubmitted = 0,
        /// The code is present.
        Present = 1,
        /// The code is on the card but illegible.
        PresentButIllegible = 2,
        /// The card has no code.
        CardHasNoCvv2 = 9,
    }
}

wire_codes! {
    /// Customer gender for fraud screening.
    pub enum Gender: &'static str {
        /// Male.
        Male = "M",
        /// Female.
        Female = "F",
    }
}

wire_codes! {
    /// Shipping speed for fraud screening.
    pub enum ShippingType: &'static str {
        /// Same day.
        SameDay = "SD",
        /// Next day.
        NextDay = "ND",
        /// Second day.
        SecondDay = "2D",
        /// Standard.
        Standard = "ST",
    }
}

wire_codes! {
    /// Channel the order came through, for fraud screening.
    pub enum TransactionSource: &'static str {
        /// Interactive voice response.
        Ivr = "IVR",
        /// Customer relationship management system.
        Crm = "CRM",
        /// Web self care.
        WebSelfCare = "WSC",
        /// Automated payment.
        Ap = "AP",
        /// Call center agent.
        Agent = "AGENT",
    }
}

/// A postal address used by [`AdvancedRiskProfile`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskAddress {
    /// Street line.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Province or state.
    pub province: Option<String>,
    /// Postal or zip code.
    pub postal: Option<String>,
    /// Country.
    pub country: Option<String>,
}

/// Customer, order and device data submitted for advanced fraud screening.
///
/// Hash fields are expected to be hashed by the caller; the gateway never
/// receives them in clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvancedRiskProfile {
    /// Domain of the customer e-mail address.
    pub email_domain: Option<String>,
    /// Hash of the customer user name.
    pub username_hash: Option<String>,
    /// Hash of the customer password.
    pub password_hash: Option<String>,
    /// Hash of the customer e-mail address.
    pub email_hash: Option<String>,
    /// Customer phone number.
    pub phone: Option<String>,
    /// Customer name.
    pub customer_name: Option<String>,
    /// Automatic number identification of the calling line.
    pub anid: Option<String>,
    /// Customer gender.
    pub gender: Option<Gender>,
    /// Driver license number.
    pub driver_license: Option<String>,
    /// Merchant-side customer id.
    pub unique_id: Option<String>,
    /// Session id of the device fingerprinting script.
    pub fraud_session_id: Option<String>,
    /// Order channel.
    pub transaction_source: Option<TransactionSource>,
    /// Billing phone number.
    pub billing_phone: Option<String>,
    /// Shipping phone number.
    pub shipping_phone: Option<String>,
    /// Name of the shipping recipient.
    pub shipping_name: Option<String>,
    /// Shipping speed.
    pub shipping_type: Option<ShippingType>,
    /// Billing address.
    pub billing: RiskAddress,
    /// Shipping address.
    pub shipping: RiskAddress,
    /// Browser user agent.
    pub user_agent: Option<String>,
    /// Browser `Accept-Language` value.
    pub accepted_languages: Option<String>,
    /// Client IP address.
    pub ip: Option<String>,
    /// Client IP address behind a proxy.
    pub proxied_ip: Option<String>,
    /// Card issuer BIN.
    pub issuer_bin: Option<String>,
    /// Card issuer name.
    pub issuer_name: Option<String>,
    /// Card issuer phone number.
    pub issuer_phone: Option<String>,
}

/// Verification services requested together with a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationRequest {
    /// Address verification mode, or `None` to skip AVS.
    pub avs_request: Option<AvsRequest>,
    /// Security code presence, or `None` to skip CVV2.
    pub cvv2_request: Option<Cvv2Request>,
    /// Fraud screening data, or `None` to skip it.
    pub advanced_risk_profile: Option<AdvancedRiskProfile>,
}

impl VerificationRequest {
    /// Requests AVS and CVV2 checks.
    #[must_use]
    pub const fn new(avs_request: Option<AvsRequest>, cvv2_request: Option<Cvv2Request>) -> Self {
        Self {
            avs_request,
            cvv2_request,
            advanced_risk_profile: None,
        }
    }

    /// Adds fraud screening.
    #[must_use]
    pub fn with_advanced_risk_profile(mut self, profile: AdvancedRiskProfile) -> Self {
        self.advanced_risk_profile = Some(profile);
        self
    }

    /// Returns `true` if address verification was requested.
    #[must_use]
    pub const fn is_avs_enabled(&self) -> bool {
        self.avs_request.is_some()
    }

    /// Returns `true` if security code verification was requested.
    #[must_use]
    pub const fn is_cvv2_enabled(&self) -> bool {
        self.cvv2_request.is_some()
    }

    /// Returns `true` if fraud screening was requested.
    #[must_use]
    pub const fn is_advanced_risk_enabled(&self) -> bool {
        self.advanced_risk_profile.is_some()
    }
}
