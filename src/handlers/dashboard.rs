use actix_web::{web, HttpResponse};
use chrono::{NaiveTime, Utc};
use serde_json::json;
use sqlx::SqlitePool;

use crate::errors::{ApiError, ApiResult};
use crate::models::booking::{Booking, BookingStatus, BookingType, PaymentMethod};
use crate::models::payment::PaymentStatus;

#[derive(Debug, sqlx::FromRow)]
struct ReservationRow {
    booking_id: String,
    guest_name: String,
    guest_email: String,
    type_name: String,
    room_type_id: i64,
    room_quantity: i64,
    check_in: chrono::NaiveDate,
    check_out: chrono::NaiveDate,
    status: BookingStatus,
    payment_method: PaymentMethod,
    booking_type: BookingType,
    total_balance: i64,
    paid_amount: i64,
    due_amount: i64,
    discount_coupon: Option<String>,
    payment_status: Option<PaymentStatus>,
}

/// Reservations overview: every booking with its room-type detail, latest
/// payment status, and a deterministic pick of available room numbers for the
/// booked quantity.
pub async fn reservations(pool: web::Data<SqlitePool>) -> ApiResult<HttpResponse> {
    let rows = sqlx::query_as::<_, ReservationRow>(
        r#"
        SELECT b.booking_id, b.guest_name, b.guest_email, rt.type_name,
               rt.id AS room_type_id, b.room_quantity, b.check_in, b.check_out,
               b.status, b.payment_method, b.booking_type, b.total_balance,
               b.paid_amount, b.due_amount, b.discount_coupon,
               (SELECT p.status FROM payments p WHERE p.booking_id = b.id
                ORDER BY p.id DESC LIMIT 1) AS payment_status
        FROM bookings b
        JOIN rooms r ON r.id = b.room_id
        JOIN room_types rt ON rt.id = r.room_type_id
        ORDER BY b.id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    let mut reservations = Vec::with_capacity(rows.len());
    for row in rows {
        let allocated_rooms: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT room_number FROM rooms
            WHERE room_type_id = ? AND status = 'available'
            ORDER BY room_number
            LIMIT ?
            "#,
        )
        .bind(row.room_type_id)
        .bind(row.room_quantity)
        .fetch_all(pool.get_ref())
        .await?;

        let payment_status = match row.payment_status {
            Some(status) => json!(status),
            None => json!("Not paid"),
        };

        reservations.push(json!({
            "bookingId": row.booking_id,
            "guestName": row.guest_name,
            "guestEmail": row.guest_email,
            "roomType": row.type_name,
            "roomQuantity": row.room_quantity,
            "allocatedRooms": allocated_rooms,
            "checkInDate": row.check_in,
            "checkOutDate": row.check_out,
            "status": row.status,
            "paymentMethod": row.payment_method,
            "paymentStatus": payment_status,
            "bookingType": row.booking_type,
            "totalAmount": row.total_balance,
            "paidAmount": row.paid_amount,
            "dueAmount": row.due_amount,
            "discountApplied": if row.discount_coupon.is_some() { "Yes" } else { "No" },
        }));
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "count": reservations.len(),
        "reservations": reservations,
    })))
}

pub async fn bookings_by_type(
    pool: web::Data<SqlitePool>,
    path: web::Path<BookingType>,
) -> ApiResult<HttpResponse> {
    let booking_type = path.into_inner();

    let bookings = sqlx::query_as::<_, Booking>(
        "SELECT * FROM bookings WHERE booking_type = ? ORDER BY id DESC",
    )
    .bind(booking_type)
    .fetch_all(pool.get_ref())
    .await?;

    if bookings.is_empty() {
        return Err(ApiError::NotFound("No bookings found.".to_string()));
    }

    Ok(HttpResponse::Ok().json(json!({ "success": true, "bookings": bookings })))
}

pub async fn total_bookings(pool: web::Data<SqlitePool>) -> ApiResult<HttpResponse> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
        .fetch_one(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "totalBookings": total,
        "message": "Total bookings retrieved successfully.",
    })))
}

pub async fn today_bookings(pool: web::Data<SqlitePool>) -> ApiResult<HttpResponse> {
    let start_of_day = Utc::now().date_naive().and_time(NaiveTime::MIN);

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE created_at >= ?")
        .bind(start_of_day)
        .fetch_one(pool.get_ref())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "totalBookings": total,
        "message": "Today's bookings counted successfully.",
    })))
}

pub async fn todays_booking_amount(pool: web::Data<SqlitePool>) -> ApiResult<HttpResponse> {
    let start_of_day = Utc::now().date_naive().and_time(NaiveTime::MIN);

    let total: i64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(amount), 0) FROM payments WHERE status = 'Success' AND created_at >= ?",
    )
    .bind(start_of_day)
    .fetch_one(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "totalAmount": total,
        "message": "Total amount for today's confirmed bookings retrieved successfully.",
    })))
}

#[derive(Debug, serde::Serialize, sqlx::FromRow)]
struct DueAmountRow {
    booking_id: String,
    guest_name: String,
    guest_email: String,
    total_balance: i64,
    paid_amount: i64,
    due_amount: i64,
}

pub async fn due_amounts(pool: web::Data<SqlitePool>) -> ApiResult<HttpResponse> {
    let due = sqlx::query_as::<_, DueAmountRow>(
        r#"
        SELECT booking_id, guest_name, guest_email, total_balance, paid_amount, due_amount
        FROM bookings
        WHERE due_amount > 0
        ORDER BY due_amount DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "dueAmounts": due,
        "message": "Due amounts retrieved successfully.",
    })))
}
