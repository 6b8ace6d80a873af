use thiserror::Error;
use uuid::Uuid;

use crate::models::booking::{Booking, BookingType};
use crate::models::room::Room;

#[derive(Debug, Error)]
#[error("mail dispatch failed: {0}")]
pub struct MailerError(pub String);

/// Hands the booking confirmation to the outbound mail transport. Delivery is
/// an external concern; this transport records the message through the log
/// facade and returns the generated message id. Callers log and drop the
/// error: a failed notification must never fail the operation that raised it.
pub async fn send_booking_confirmation(
    booking: &Booking,
    room: &Room,
    room_type_name: &str,
    user_email: &str,
    admin_email: &str,
) -> Result<String, MailerError> {
    let payment_info = match booking.booking_type {
        BookingType::Standard => {
            format!("Amount to pay at the hotel: {}", booking.due_amount)
        }
        _ => format!(
            "Amount paid: {}. Remaining due amount: {}",
            booking.paid_amount, booking.due_amount
        ),
    };

    let body = format!(
        "Booking {} confirmed for {}. Room {} ({}), floor {}. Stay {} to {}, {} room(s). Total balance: {}. {}",
        booking.booking_id,
        booking.guest_name,
        room.room_number,
        room_type_name,
        room.floor,
        booking.check_in,
        booking.check_out,
        booking.room_quantity,
        booking.total_balance,
        payment_info,
    );

    let message_id = format!("mail-{}", Uuid::new_v4());
    log::info!(
        "booking confirmation {} to {} (copy to {}): {}",
        message_id,
        user_email,
        admin_email,
        body
    );

    Ok(message_id)
}
