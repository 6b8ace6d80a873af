use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::booking::PaymentMethod;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
}

/// One payment event against a booking. Rows are immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Payment {
    pub id: i64,
    pub booking_id: i64,
    pub payment_method: PaymentMethod,
    pub amount: i64,
    pub status: PaymentStatus,
    pub transaction_id: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RecordPayment {
    #[validate(length(min = 1, message = "booking id is required"))]
    pub booking_id: String,
    pub payment_method: PaymentMethod,
    #[validate(range(min = 1, message = "amount must be a positive whole amount"))]
    pub amount: i64,
}
