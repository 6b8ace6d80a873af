use actix_web::{web, HttpResponse};
use chrono::{NaiveDateTime, Utc};
use serde_json::json;
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::errors::{ApiError, ApiResult};
use crate::models::booking::{
    Booking, BookingStatus, BookingType, CheckoutRequest, CreateBooking, UpdateBooking,
};
use crate::models::payment::Payment;
use crate::models::room::{Room, RoomStatus};
use crate::services::coupons::validate_and_apply;
use crate::services::{availability, mailer, pricing};

/// Hours elapsed between two instants, rounded up. A cancellation 20h59m
/// after creation counts as 21 hours against a 20-hour window.
fn hours_since(earlier: NaiveDateTime, now: NaiveDateTime) -> i64 {
    let seconds = (now - earlier).num_seconds().max(0);
    (seconds + 3599) / 3600
}

async fn fetch_booking(
    conn: &mut sqlx::SqliteConnection,
    booking_id: &str,
) -> ApiResult<Booking> {
    sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_id = ?")
        .bind(booking_id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))
}

pub async fn create_booking(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    body: web::Json<CreateBooking>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    body.validate()?;

    if body.check_in >= body.check_out {
        return Err(ApiError::Validation(
            "Check-out must be after check-in".to_string(),
        ));
    }

    let now = Utc::now().naive_utc();
    let mut tx = pool.begin().await?;

    let room = sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = ?")
        .bind(body.room_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound("Room not found".to_string()))?;

    if !availability::is_available(&mut tx, room.id, body.check_in, body.check_out).await? {
        return Err(ApiError::Conflict(
            "Room is not available for the selected dates.".to_string(),
        ));
    }

    let nights = pricing::nights(body.check_in, body.check_out);
    let subtotal = pricing::subtotal(room.total_price, body.room_quantity, nights);

    // A coupon failure aborts the whole creation; no booking is persisted
    // without its discount.
    let mut discount = 0;
    if let Some(code) = body.discount_coupon.as_deref() {
        discount = validate_and_apply(&mut tx, code, subtotal, now).await?;
    }

    let total_balance = pricing::total_after_discount(subtotal, discount);
    let paid_amount = body.paid_amount.round() as i64;
    let due_amount = total_balance - paid_amount;
    let booking_id = Uuid::new_v4().to_string();

    let inserted = sqlx::query(
        r#"
        INSERT INTO bookings (booking_id, guest_name, guest_email, guest_phone,
                              address_street, address_city, address_state, address_zip,
                              address_country, room_id, room_quantity, status, check_in,
                              check_out, payment_method, booking_type, discount_coupon,
                              total_balance, paid_amount, due_amount, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&booking_id)
    .bind(&body.guest.name)
    .bind(&body.guest.email)
    .bind(&body.guest.phone)
    .bind(&body.guest.address.street)
    .bind(&body.guest.address.city)
    .bind(&body.guest.address.state)
    .bind(&body.guest.address.zip_code)
    .bind(&body.guest.address.country)
    .bind(room.id)
    .bind(body.room_quantity)
    .bind(BookingStatus::Pending)
    .bind(body.check_in)
    .bind(body.check_out)
    .bind(body.payment_method)
    .bind(body.booking_type)
    .bind(&body.discount_coupon)
    .bind(total_balance)
    .bind(paid_amount)
    .bind(due_amount)
    .bind(now)
    .execute(&mut *tx)
    .await?;
    let row_id = inserted.last_insert_rowid();

    let type_name: String = sqlx::query_scalar("SELECT type_name FROM room_types WHERE id = ?")
        .bind(room.room_type_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    let advance_due = pricing::advance_due(total_balance, config.advance_payment_rate);
    let message = match body.booking_type {
        BookingType::Standard => format!(
            "Booking created successfully. Please note that you need to pay {} on the hotel premises upon check-in.",
            total_balance
        ),
        BookingType::Advance => format!(
            "Booking created successfully. Please proceed with a payment of {} to confirm your booking.",
            advance_due
        ),
        BookingType::LastMinute => "Booking created successfully.".to_string(),
    };

    // Standard bookings need no payment before arrival, so the confirmation
    // goes out right away. Advance bookings wait for the confirming payment.
    if body.booking_type == BookingType::Standard {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(row_id)
            .fetch_one(pool.get_ref())
            .await?;
        if let Err(e) = mailer::send_booking_confirmation(
            &booking,
            &room,
            &type_name,
            &booking.guest_email,
            &config.admin_email,
        )
        .await
        {
            log::warn!("failed to send booking confirmation: {e}");
        }
    }

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "bookingId": booking_id,
        "message": message,
    })))
}

pub async fn get_booking(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let booking_id = path.into_inner();

    let mut conn = pool.acquire().await?;
    let booking = fetch_booking(&mut conn, &booking_id).await?;

    let payments = sqlx::query_as::<_, Payment>(
        "SELECT * FROM payments WHERE booking_id = ? ORDER BY id",
    )
    .bind(booking.id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "booking": booking,
        "payments": payments,
    })))
}

pub async fn cancel_booking(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let booking_id = path.into_inner();
    let now = Utc::now().naive_utc();

    let mut tx = pool.begin().await?;
    let booking = fetch_booking(&mut tx, &booking_id).await?;

    match booking.status {
        BookingStatus::Pending | BookingStatus::Confirmed => {}
        _ => {
            return Err(ApiError::Policy(
                "Only pending or confirmed bookings can be cancelled.".to_string(),
            ))
        }
    }

    // Advance bookings get the tighter, non-refundable window; everything
    // else the standard one. Exactly one window applies per booking.
    let window = if booking.booking_type == BookingType::Advance {
        config.advance_cancel_window_hours
    } else {
        config.cancel_window_hours
    };
    if hours_since(booking.created_at, now) > window {
        return Err(ApiError::Policy(format!(
            "Cancellation is not allowed beyond {} hours of booking",
            window
        )));
    }

    sqlx::query("UPDATE bookings SET status = ? WHERE id = ?")
        .bind(BookingStatus::Cancelled)
        .bind(booking.id)
        .execute(&mut *tx)
        .await?;

    // Release the exact booked room, not every occupied room of the type.
    sqlx::query("UPDATE rooms SET status = ? WHERE id = ? AND status = ?")
        .bind(RoomStatus::Available)
        .bind(booking.room_id)
        .bind(RoomStatus::Occupied)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    log::info!("booking {} cancelled", booking.booking_id);

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Booking cancelled successfully",
    })))
}

pub async fn update_booking(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    path: web::Path<String>,
    body: web::Json<UpdateBooking>,
) -> ApiResult<HttpResponse> {
    let booking_id = path.into_inner();
    let body = body.into_inner();
    body.validate()?;

    let now = Utc::now().naive_utc();
    let mut tx = pool.begin().await?;
    let mut booking = fetch_booking(&mut tx, &booking_id).await?;

    match booking.status {
        BookingStatus::Pending | BookingStatus::Confirmed => {}
        _ => {
            return Err(ApiError::Policy(
                "Cancelled or checked-out bookings cannot be updated.".to_string(),
            ))
        }
    }

    if hours_since(booking.created_at, now) > config.update_window_hours {
        return Err(ApiError::Policy(format!(
            "Update not allowed after {} hours of booking",
            config.update_window_hours
        )));
    }

    let check_in = body.check_in.unwrap_or(booking.check_in);
    let check_out = body.check_out.unwrap_or(booking.check_out);
    if check_in >= check_out {
        return Err(ApiError::Validation(
            "Check-out must be after check-in".to_string(),
        ));
    }

    let room = sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = ?")
        .bind(booking.room_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound("Room not found".to_string()))?;

    let nights = pricing::nights(check_in, check_out);
    let subtotal = pricing::subtotal(room.total_price, booking.room_quantity, nights);
    let new_total = pricing::total_after_discount(subtotal, 0);
    let new_due = new_total - booking.paid_amount;
    let excess = booking.paid_amount - new_total;

    booking.check_in = check_in;
    booking.check_out = check_out;
    booking.booking_type = body.booking_type.unwrap_or(booking.booking_type);
    booking.total_balance = new_total;
    booking.due_amount = new_due;
    // Any change sends the booking back through confirmation.
    booking.status = BookingStatus::Pending;

    sqlx::query(
        r#"
        UPDATE bookings
        SET check_in = ?, check_out = ?, booking_type = ?, total_balance = ?,
            due_amount = ?, status = ?
        WHERE id = ?
        "#,
    )
    .bind(booking.check_in)
    .bind(booking.check_out)
    .bind(booking.booking_type)
    .bind(booking.total_balance)
    .bind(booking.due_amount)
    .bind(booking.status)
    .bind(booking.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let mut message = String::from("Booking updated successfully.");
    if excess > 0 {
        message.push_str(&format!(
            " You have overpaid. The refundable amount is {}. Please collect this amount from the hotel premises or email us at {}.",
            excess, config.hotel_email
        ));
    } else if booking.booking_type == BookingType::Advance {
        let required = pricing::advance_due(new_total, config.advance_payment_rate);
        if required > booking.paid_amount {
            message.push_str(&format!(
                " You need to pay {} to confirm the updated booking.",
                required - booking.paid_amount
            ));
        } else {
            message.push_str(
                " You have already paid the required advance. No additional payment is required.",
            );
        }
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "booking": booking,
        "message": message,
    })))
}

pub async fn checkout(
    pool: web::Data<SqlitePool>,
    body: web::Json<CheckoutRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();

    let mut tx = pool.begin().await?;
    let booking = fetch_booking(&mut tx, &body.booking_id).await?;

    if booking.status != BookingStatus::Confirmed {
        return Err(ApiError::Policy(
            "Only confirmed bookings can be checked out.".to_string(),
        ));
    }

    sqlx::query("UPDATE bookings SET status = ? WHERE id = ?")
        .bind(BookingStatus::Checkedout)
        .bind(booking.id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("UPDATE rooms SET status = ? WHERE id = ?")
        .bind(RoomStatus::Available)
        .bind(booking.room_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Checkout completed successfully.",
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn hours_round_up() {
        let now = Utc::now().naive_utc();
        assert_eq!(hours_since(now - Duration::minutes(30), now), 1);
        assert_eq!(hours_since(now - Duration::hours(20), now), 20);
        assert_eq!(hours_since(now - Duration::hours(20) - Duration::minutes(1), now), 21);
        assert_eq!(hours_since(now, now), 0);
    }
}
