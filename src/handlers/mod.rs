use actix_web::web;

pub mod bookings;
pub mod coupons;
pub mod dashboard;
pub mod payments;
pub mod rooms;

/// Route table. Authentication and role checks live upstream of this service;
/// routes are grouped here by intended audience only.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg
        // guest-facing
        .route("/booking", web::post().to(bookings::create_booking))
        .route("/booking/{booking_id}", web::get().to(bookings::get_booking))
        .route(
            "/cancel-booking/{booking_id}",
            web::delete().to(bookings::cancel_booking),
        )
        .route(
            "/update-booking/{booking_id}",
            web::put().to(bookings::update_booking),
        )
        .route("/payment", web::post().to(payments::record_payment))
        .route("/rooms/filter", web::get().to(rooms::filter_rooms))
        // staff-facing
        .route("/checkout", web::post().to(bookings::checkout))
        .route("/payments", web::get().to(payments::list_payments))
        .route("/create-coupon", web::post().to(coupons::create_coupon))
        .route("/coupons", web::get().to(coupons::list_coupons))
        .route("/add-roomtypes", web::post().to(rooms::create_room_type))
        .route("/roomtypes", web::get().to(rooms::list_room_types))
        .route("/add-room", web::post().to(rooms::create_room))
        .route("/rooms", web::get().to(rooms::list_rooms))
        .route("/reservations", web::get().to(dashboard::reservations))
        .route(
            "/bookings/{booking_type}",
            web::get().to(dashboard::bookings_by_type),
        )
        .route("/total-bookings", web::get().to(dashboard::total_bookings))
        .route("/today-bookings", web::get().to(dashboard::today_bookings))
        .route(
            "/todays-booking-amount",
            web::get().to(dashboard::todays_booking_amount),
        )
        .route("/due-amounts", web::get().to(dashboard::due_amounts));
}
