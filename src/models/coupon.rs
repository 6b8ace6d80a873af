use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Coupon {
    pub id: i64,
    pub coupon_code: String,
    pub coupon_description: String,
    pub start_date: chrono::NaiveDateTime,
    pub end_date: chrono::NaiveDateTime,
    pub discount_percentage: f64,
    pub max_discount_amount: i64,
    pub min_purchase_amount: i64,
    pub usage_limit: i64,
    pub used_count: i64,
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateCoupon {
    #[validate(length(min = 1, message = "coupon code is required"))]
    pub coupon_code: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub coupon_description: String,
    pub start_date: chrono::NaiveDateTime,
    pub end_date: chrono::NaiveDateTime,
    #[validate(range(min = 0.0, max = 100.0))]
    pub discount_percentage: f64,
    #[validate(range(min = 0))]
    pub max_discount_amount: i64,
    #[validate(range(min = 0))]
    pub min_purchase_amount: i64,
    #[serde(default = "default_usage_limit")]
    #[validate(range(min = 1))]
    pub usage_limit: i64,
}

fn default_usage_limit() -> i64 {
    1
}
