use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::errors::{ApiError, ApiResult};
use crate::models::coupon::{Coupon, CreateCoupon};

pub async fn create_coupon(
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateCoupon>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    body.validate()?;

    if body.end_date <= body.start_date {
        return Err(ApiError::Validation(
            "Coupon end date must be after the start date".to_string(),
        ));
    }

    let inserted = sqlx::query(
        r#"
        INSERT INTO coupons (coupon_code, coupon_description, start_date, end_date,
                             discount_percentage, max_discount_amount, min_purchase_amount,
                             usage_limit, used_count, is_active)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, TRUE)
        "#,
    )
    .bind(&body.coupon_code)
    .bind(&body.coupon_description)
    .bind(body.start_date)
    .bind(body.end_date)
    .bind(body.discount_percentage)
    .bind(body.max_discount_amount)
    .bind(body.min_purchase_amount)
    .bind(body.usage_limit)
    .execute(pool.get_ref())
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            ApiError::Conflict("Coupon code already exists.".to_string())
        }
        _ => ApiError::from(e),
    })?;

    let coupon = sqlx::query_as::<_, Coupon>("SELECT * FROM coupons WHERE id = ?")
        .bind(inserted.last_insert_rowid())
        .fetch_one(pool.get_ref())
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Coupon created successfully.",
        "coupon": coupon,
    })))
}

pub async fn list_coupons(pool: web::Data<SqlitePool>) -> ApiResult<HttpResponse> {
    let coupons = sqlx::query_as::<_, Coupon>("SELECT * FROM coupons ORDER BY id")
        .fetch_all(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "coupons": coupons })))
}
