use chrono::NaiveDate;
use sqlx::SqliteConnection;

use crate::errors::ApiResult;

/// Whether a room is free for the requested stay. Overlap is half-open: a
/// booking ending on the requested check-in day does not block. Cancelled
/// bookings never block; pending ones reserve the room before payment.
pub async fn is_available(
    conn: &mut SqliteConnection,
    room_id: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> ApiResult<bool> {
    let overlapping: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM bookings
        WHERE room_id = ?
          AND status != 'cancelled'
          AND check_in < ?
          AND check_out > ?
        "#,
    )
    .bind(room_id)
    .bind(check_out)
    .bind(check_in)
    .fetch_one(conn)
    .await?;

    Ok(overlapping == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::BookingStatus;
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

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    async fn seed_room(pool: &SqlitePool) -> i64 {
        sqlx::query("INSERT INTO room_types (type_name, description) VALUES ('Deluxe', 'Sea view')")
            .execute(pool)
            .await
            .unwrap();
        sqlx::query(
            r#"
            INSERT INTO rooms (room_type_id, room_number, floor, bed_type, adults, children,
                               price_per_night, tax, total_price, status)
            VALUES (1, '101', '1', 'queen', 2, 1, 100.0, 0.0, 100.0, 'available')
            "#,
        )
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
    }

    async fn seed_booking(
        pool: &SqlitePool,
        room_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        status: BookingStatus,
    ) {
        sqlx::query(
            r#"
            INSERT INTO bookings (booking_id, guest_name, guest_email, guest_phone,
                                  address_street, address_city, address_state, address_zip,
                                  address_country, room_id, room_quantity, status, check_in,
                                  check_out, payment_method, booking_type, total_balance,
                                  paid_amount, due_amount, created_at)
            VALUES (?, 'Guest', 'guest@example.com', '555-0000', 'Street', 'City', 'State',
                    '00000', 'Country', ?, 1, ?, ?, ?, 'paypal', 'standard', 300, 0, 300, ?)
            "#,
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(room_id)
        .bind(status)
        .bind(check_in)
        .bind(check_out)
        .bind(chrono::Utc::now().naive_utc())
        .execute(pool)
        .await
        .unwrap();
    }

    #[actix_web::test]
    async fn overlapping_stay_blocks() {
        let pool = pool().await;
        let room = seed_room(&pool).await;
        seed_booking(&pool, room, date(10), date(13), BookingStatus::Pending).await;

        let mut conn = pool.acquire().await.unwrap();
        assert!(!is_available(&mut conn, room, date(12), date(15)).await.unwrap());
        assert!(!is_available(&mut conn, room, date(8), date(11)).await.unwrap());
        assert!(!is_available(&mut conn, room, date(11), date(12)).await.unwrap());
    }

    #[actix_web::test]
    async fn back_to_back_stays_do_not_conflict() {
        let pool = pool().await;
        let room = seed_room(&pool).await;
        seed_booking(&pool, room, date(10), date(13), BookingStatus::Confirmed).await;

        let mut conn = pool.acquire().await.unwrap();
        // half-open intervals: ending exactly when the other begins is fine
        assert!(is_available(&mut conn, room, date(13), date(15)).await.unwrap());
        assert!(is_available(&mut conn, room, date(8), date(10)).await.unwrap());
    }

    #[actix_web::test]
    async fn cancelled_bookings_do_not_block() {
        let pool = pool().await;
        let room = seed_room(&pool).await;
        seed_booking(&pool, room, date(10), date(13), BookingStatus::Cancelled).await;

        let mut conn = pool.acquire().await.unwrap();
        assert!(is_available(&mut conn, room, date(10), date(13)).await.unwrap());
    }

    #[actix_web::test]
    async fn other_rooms_are_unaffected() {
        let pool = pool().await;
        let room = seed_room(&pool).await;
        seed_booking(&pool, room, date(10), date(13), BookingStatus::Pending).await;

        let other = sqlx::query(
            r#"
            INSERT INTO rooms (room_type_id, room_number, floor, bed_type, adults, children,
                               price_per_night, tax, total_price, status)
            VALUES (1, '102', '1', 'queen', 2, 1, 100.0, 0.0, 100.0, 'available')
            "#,
        )
        .execute(&pool)
        .await
        .unwrap()
        .last_insert_rowid();

        let mut conn = pool.acquire().await.unwrap();
        assert!(is_available(&mut conn, other, date(10), date(13)).await.unwrap());
    }
}
