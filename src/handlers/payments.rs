use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::errors::{ApiError, ApiResult};
use crate::models::booking::{Booking, BookingStatus, BookingType};
use crate::models::payment::{Payment, PaymentStatus, RecordPayment};
use crate::models::room::{Room, RoomStatus};
use crate::services::{mailer, pricing};

/// Simulated payment path: the record's status follows the booking-level
/// effect rather than any gateway outcome. A real gateway port must invert
/// this and drive confirmation off the gateway response.
pub async fn record_payment(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    body: web::Json<RecordPayment>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    body.validate()?;

    let now = Utc::now().naive_utc();
    let mut tx = pool.begin().await?;

    let mut booking =
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_id = ?")
            .bind(&body.booking_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))?;

    match booking.status {
        BookingStatus::Pending | BookingStatus::Confirmed => {}
        _ => {
            return Err(ApiError::Policy(
                "Payments are not accepted for cancelled or checked-out bookings.".to_string(),
            ))
        }
    }

    let advance_due = pricing::advance_due(booking.total_balance, config.advance_payment_rate);
    if booking.booking_type == BookingType::Advance
        && booking.status == BookingStatus::Pending
        && booking.paid_amount + body.amount < advance_due
    {
        return Err(ApiError::Policy(format!(
            "A minimum payment of {} is required to confirm the booking.",
            advance_due
        )));
    }

    let was_pending = booking.status == BookingStatus::Pending;
    booking.paid_amount += body.amount;
    booking.due_amount = booking.total_balance - booking.paid_amount;

    let confirmed = match booking.booking_type {
        BookingType::Advance => booking.paid_amount >= advance_due,
        _ => true,
    };
    if confirmed {
        booking.status = BookingStatus::Confirmed;
    }

    // RHS column references read the pre-update row.
    sqlx::query(
        r#"
        UPDATE bookings
        SET paid_amount = paid_amount + ?1,
            due_amount = total_balance - paid_amount - ?1,
            status = ?2
        WHERE id = ?3
        "#,
    )
    .bind(body.amount)
    .bind(booking.status)
    .bind(booking.id)
    .execute(&mut *tx)
    .await?;

    let payment_status = if booking.status == BookingStatus::Confirmed {
        PaymentStatus::Success
    } else {
        PaymentStatus::Pending
    };
    let transaction_id = format!("TRANSACTION-{}", Uuid::new_v4());

    let inserted = sqlx::query(
        r#"
        INSERT INTO payments (booking_id, payment_method, amount, status, transaction_id, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(booking.id)
    .bind(body.payment_method)
    .bind(body.amount)
    .bind(payment_status)
    .bind(&transaction_id)
    .bind(now)
    .execute(&mut *tx)
    .await?;
    let payment_row_id = inserted.last_insert_rowid();

    let confirmed_now = confirmed && was_pending;
    if confirmed_now {
        sqlx::query("UPDATE rooms SET status = ? WHERE id = ?")
            .bind(RoomStatus::Occupied)
            .bind(booking.room_id)
            .execute(&mut *tx)
            .await?;
    }

    let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = ?")
        .bind(payment_row_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    if confirmed_now {
        let room_and_type: Option<(Room, String)> = match sqlx::query_as::<_, Room>(
            "SELECT * FROM rooms WHERE id = ?",
        )
        .bind(booking.room_id)
        .fetch_optional(pool.get_ref())
        .await?
        {
            Some(room) => {
                let type_name: String =
                    sqlx::query_scalar("SELECT type_name FROM room_types WHERE id = ?")
                        .bind(room.room_type_id)
                        .fetch_one(pool.get_ref())
                        .await?;
                Some((room, type_name))
            }
            None => None,
        };

        if let Some((room, type_name)) = room_and_type {
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
    }

    let message = if booking.status == BookingStatus::Confirmed {
        "Payment successful, booking confirmed."
    } else {
        "Payment successful, awaiting confirmation."
    };

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "booking": booking,
        "payment": payment,
        "message": message,
    })))
}

#[derive(Debug, serde::Serialize, sqlx::FromRow)]
struct PaymentListRow {
    id: i64,
    booking_id: String,
    payment_method: crate::models::booking::PaymentMethod,
    amount: i64,
    status: PaymentStatus,
    transaction_id: String,
    created_at: chrono::NaiveDateTime,
    check_in: chrono::NaiveDate,
    check_out: chrono::NaiveDate,
}

pub async fn list_payments(pool: web::Data<SqlitePool>) -> ApiResult<HttpResponse> {
    let payments = sqlx::query_as::<_, PaymentListRow>(
        r#"
        SELECT p.id, b.booking_id, p.payment_method, p.amount, p.status,
               p.transaction_id, p.created_at, b.check_in, b.check_out
        FROM payments p
        JOIN bookings b ON b.id = p.booking_id
        ORDER BY p.id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "payments": payments,
    })))
}
