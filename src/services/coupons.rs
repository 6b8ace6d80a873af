use chrono::NaiveDateTime;
use sqlx::SqliteConnection;

use crate::errors::{ApiError, ApiResult};
use crate::models::coupon::Coupon;
use crate::services::pricing;

/// Validates a coupon against the purchase and redeems one use of it.
/// Runs on the caller's transaction: the usage increment commits (or rolls
/// back) together with the booking it discounts.
pub async fn validate_and_apply(
    conn: &mut SqliteConnection,
    code: &str,
    purchase_amount: f64,
    now: NaiveDateTime,
) -> ApiResult<i64> {
    let coupon = sqlx::query_as::<_, Coupon>("SELECT * FROM coupons WHERE coupon_code = ?")
        .bind(code)
        .fetch_optional(&mut *conn)
        .await?;

    let coupon = match coupon {
        Some(c) if c.is_active => c,
        _ => return Err(ApiError::NotFound("Invalid or inactive coupon".to_string())),
    };

    if now < coupon.start_date || now > coupon.end_date {
        return Err(ApiError::Policy(
            "Coupon is not valid for the current date".to_string(),
        ));
    }

    if purchase_amount < coupon.min_purchase_amount as f64 {
        return Err(ApiError::Policy(
            "Purchase amount does not meet the minimum requirement for the coupon".to_string(),
        ));
    }

    // The cap check and the increment must stay one atomic statement.
    let redeemed = sqlx::query(
        "UPDATE coupons SET used_count = used_count + 1 WHERE id = ? AND used_count < usage_limit",
    )
    .bind(coupon.id)
    .execute(&mut *conn)
    .await?;

    if redeemed.rows_affected() == 0 {
        return Err(ApiError::Policy("Coupon usage limit exceeded".to_string()));
    }

    let discount = pricing::coupon_discount(
        purchase_amount,
        coupon.discount_percentage,
        coupon.max_discount_amount,
    );
    log::info!("coupon {} applied, discount {}", coupon.coupon_code, discount);

    Ok(discount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    async fn pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    async fn seed_coupon(pool: &SqlitePool, code: &str, usage_limit: i64, is_active: bool) {
        let now = Utc::now().naive_utc();
        sqlx::query(
            r#"
            INSERT INTO coupons (coupon_code, coupon_description, start_date, end_date,
                                 discount_percentage, max_discount_amount, min_purchase_amount,
                                 usage_limit, used_count, is_active)
            VALUES (?, '10% off', ?, ?, 10.0, 50, 100, ?, 0, ?)
            "#,
        )
        .bind(code)
        .bind(now - Duration::days(1))
        .bind(now + Duration::days(1))
        .bind(usage_limit)
        .bind(is_active)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn apply(pool: &SqlitePool, code: &str, amount: f64) -> ApiResult<i64> {
        let mut tx = pool.begin().await.unwrap();
        let result = validate_and_apply(&mut tx, code, amount, Utc::now().naive_utc()).await;
        tx.commit().await.unwrap();
        result
    }

    async fn used_count(pool: &SqlitePool, code: &str) -> i64 {
        sqlx::query_scalar("SELECT used_count FROM coupons WHERE coupon_code = ?")
            .bind(code)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn redemption_discounts_and_increments_once() {
        let pool = pool().await;
        seed_coupon(&pool, "SAVE10", 3, true).await;

        // 10% of 600 is 60, capped at 50
        assert_eq!(apply(&pool, "SAVE10", 600.0).await.unwrap(), 50);
        assert_eq!(used_count(&pool, "SAVE10").await, 1);

        assert_eq!(apply(&pool, "SAVE10", 400.0).await.unwrap(), 40);
        assert_eq!(used_count(&pool, "SAVE10").await, 2);
    }

    #[actix_web::test]
    async fn unknown_or_inactive_coupon_is_not_found() {
        let pool = pool().await;
        seed_coupon(&pool, "DISABLED", 3, false).await;

        assert!(matches!(
            apply(&pool, "NOPE", 600.0).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            apply(&pool, "DISABLED", 600.0).await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn coupon_outside_window_is_rejected() {
        let pool = pool().await;
        let now = Utc::now().naive_utc();
        sqlx::query(
            r#"
            INSERT INTO coupons (coupon_code, coupon_description, start_date, end_date,
                                 discount_percentage, max_discount_amount, min_purchase_amount,
                                 usage_limit, used_count, is_active)
            VALUES ('EXPIRED', 'old promo', ?, ?, 10.0, 50, 0, 5, 0, TRUE)
            "#,
        )
        .bind(now - Duration::days(10))
        .bind(now - Duration::days(5))
        .execute(&pool)
        .await
        .unwrap();

        let err = apply(&pool, "EXPIRED", 600.0).await.unwrap_err();
        assert!(matches!(err, ApiError::Policy(_)));
        assert_eq!(used_count(&pool, "EXPIRED").await, 0);
    }

    #[actix_web::test]
    async fn minimum_purchase_is_enforced() {
        let pool = pool().await;
        seed_coupon(&pool, "SAVE10", 3, true).await;

        let err = apply(&pool, "SAVE10", 99.0).await.unwrap_err();
        assert!(matches!(err, ApiError::Policy(_)));
        assert_eq!(used_count(&pool, "SAVE10").await, 0);
    }

    #[actix_web::test]
    async fn usage_limit_stops_redemption() {
        let pool = pool().await;
        seed_coupon(&pool, "ONCE", 1, true).await;

        assert!(apply(&pool, "ONCE", 600.0).await.is_ok());
        let err = apply(&pool, "ONCE", 600.0).await.unwrap_err();
        assert!(matches!(err, ApiError::Policy(_)));
        assert_eq!(used_count(&pool, "ONCE").await, 1);
    }
}
