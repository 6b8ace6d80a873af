use std::env;
use std::str::FromStr;

/// Runtime settings, read once at startup. Policy numbers (advance-payment
/// rate, cancellation and update windows) are deliberately environment-driven
/// rather than constants.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub admin_email: String,
    pub hotel_email: String,
    /// Fraction of the total balance an advance booking must cover to confirm.
    pub advance_payment_rate: f64,
    /// Hours after creation within which a standard booking may be cancelled.
    pub cancel_window_hours: i64,
    /// Tighter cancellation window applied to advance bookings.
    pub advance_cancel_window_hours: i64,
    /// Hours after creation within which dates/type may still be changed.
    pub update_window_hours: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "127.0.0.1"),
            port: parsed_env("PORT", 8080),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            admin_email: env_or("ADMIN_EMAIL", "admin@hotel.example"),
            hotel_email: env_or("HOTEL_EMAIL", "reception@hotel.example"),
            advance_payment_rate: parsed_env("ADVANCE_PAYMENT_RATE", 0.30),
            cancel_window_hours: parsed_env("CANCEL_WINDOW_HOURS", 20),
            advance_cancel_window_hours: parsed_env("ADVANCE_CANCEL_WINDOW_HOURS", 6),
            update_window_hours: parsed_env("UPDATE_WINDOW_HOURS", 30),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_env<T: FromStr + Copy>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
