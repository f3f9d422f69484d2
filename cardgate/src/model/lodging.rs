use chrono::NaiveDate;

wire_codes! {
    /// Category of an extra charge added to a hotel folio.
    pub enum ExtraCharge: &'static str {
        /// No extra charge.
        NoCharge = " ",
        /// Restaurant.
        Restaurant = "1",
        /// Gift shop.
        GiftShop = "2",
        /// Mini bar.
        MiniBar = "3",
        /// Telephone.
        Telephone = "4",
        /// Laundry.
        Laundry = "5",
        /// Anything else.
        Other = "6",
    }
}

/// Hotel stay details attached to lodging operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LodgingRequest {
    /// Check-in date.
    pub checkin_time: Option<NaiveDate>,
    /// Check-out date.
    pub checkout_time: Option<NaiveDate>,
    /// Length of stay in days, or the additional days of an incremental.
    pub day_of_stay: Option<i32>,
    /// Extra charge category.
    pub extra_charge: Option<ExtraCharge>,
    /// Room number.
    pub room_number: Option<i32>,
    /// Nightly rate in cents.
    pub room_rate: Option<i64>,
}

impl LodgingRequest {
    /// Details for a check-in.
    #[must_use]
    pub const fn checkin(
        checkin_time: NaiveDate,
        day_of_stay: i32,
        extra_charge: Option<ExtraCharge>,
        room_number: Option<i32>,
        room_rate: Option<i64>,
    ) -> Self {
        Self {
            checkin_time: Some(checkin_time),
            checkout_time: None,
            day_of_stay: Some(day_of_stay),
            extra_charge,
            room_number,
            room_rate,
        }
    }

    /// Details for extending a stay by `additional_days`.
    #[must_use]
    pub const fn incremental(additional_days: i32) -> Self {
        Self {
            checkin_time: None,
            checkout_time: None,
            day_of_stay: Some(additional_days),
            extra_charge: None,
            room_number: None,
            room_rate: None,
        }
    }

    /// Details for a check-out.
    #[must_use]
    pub const fn checkout(checkout_time: NaiveDate, extra_charge: Option<ExtraCharge>) -> Self {
        Self {
            checkin_time: None,
            checkout_time: Some(checkout_time),
            day_of_stay: None,
            extra_charge,
            room_number: None,
            room_rate: None,
        }
    }
}
