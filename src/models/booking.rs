use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Checkedout,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
pub enum BookingType {
    Standard,
    Advance,
    LastMinute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PaymentMethod {
    Paypal,
    Cashfree,
    Netbanking,
}

/// A reservation row. Guest details are a snapshot taken at booking time and
/// never follow later profile edits.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub booking_id: String,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub address_street: String,
    pub address_city: String,
    pub address_state: String,
    pub address_zip: String,
    pub address_country: String,
    pub room_id: i64,
    pub room_quantity: i64,
    pub status: BookingStatus,
    pub check_in: chrono::NaiveDate,
    pub check_out: chrono::NaiveDate,
    pub payment_method: PaymentMethod,
    pub booking_type: BookingType,
    pub discount_coupon: Option<String>,
    pub total_balance: i64,
    pub paid_amount: i64,
    pub due_amount: i64,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GuestAddress {
    #[validate(length(min = 1, message = "street is required"))]
    pub street: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "state is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "zip code is required"))]
    pub zip_code: String,
    #[validate(length(min = 1, message = "country is required"))]
    pub country: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GuestDetails {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[validate(nested)]
    pub address: GuestAddress,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateBooking {
    #[validate(nested)]
    pub guest: GuestDetails,
    pub room_id: i64,
    #[validate(range(min = 1))]
    pub room_quantity: i64,
    pub check_in: chrono::NaiveDate,
    pub check_out: chrono::NaiveDate,
    pub payment_method: PaymentMethod,
    pub booking_type: BookingType,
    pub discount_coupon: Option<String>,
    /// Amount handed over at the desk when the booking is taken, if any.
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub paid_amount: f64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateBooking {
    pub check_in: Option<chrono::NaiveDate>,
    pub check_out: Option<chrono::NaiveDate>,
    pub booking_type: Option<BookingType>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckoutRequest {
    pub booking_id: String,
}
