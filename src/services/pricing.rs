//! Price arithmetic for bookings. Intermediate amounts stay `f64`; rounding
//! to whole currency units happens once, at finalization.

use chrono::NaiveDate;

/// Whole days between check-in and check-out. Callers must have rejected
/// `check_out <= check_in` beforehand.
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

pub fn subtotal(nightly_total: f64, quantity: i64, nights: i64) -> f64 {
    nightly_total * quantity as f64 * nights as f64
}

pub fn total_after_discount(subtotal: f64, discount: i64) -> i64 {
    (subtotal - discount as f64).round() as i64
}

/// Percentage discount on the purchase amount, capped at the coupon's maximum.
pub fn coupon_discount(purchase_amount: f64, percentage: f64, max_discount: i64) -> i64 {
    ((purchase_amount * percentage / 100.0).round() as i64).min(max_discount)
}

/// Minimum amount an advance booking must cover before it confirms.
pub fn advance_due(total_balance: i64, rate: f64) -> i64 {
    (total_balance as f64 * rate).round() as i64
}

/// Nightly price with tax folded in.
pub fn room_total_price(price_per_night: f64, tax: f64) -> f64 {
    price_per_night + price_per_night * tax / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn nights_counts_whole_days() {
        assert_eq!(nights(date(2026, 3, 10), date(2026, 3, 13)), 3);
        assert_eq!(nights(date(2026, 3, 10), date(2026, 3, 11)), 1);
    }

    #[test]
    fn subtotal_scales_by_quantity_and_nights() {
        // nightly total 100, quantity 2, 3 nights
        assert_eq!(subtotal(100.0, 2, 3), 600.0);
    }

    #[test]
    fn discount_is_capped_at_max() {
        // 10% of 600 is 60, capped at 50
        assert_eq!(coupon_discount(600.0, 10.0, 50), 50);
        assert_eq!(coupon_discount(400.0, 10.0, 50), 40);
    }

    #[test]
    fn total_rounds_once_at_finalization() {
        assert_eq!(total_after_discount(600.0, 50), 550);
        assert_eq!(total_after_discount(99.5, 0), 100);
        assert_eq!(total_after_discount(333.33, 33), 300);
    }

    #[test]
    fn advance_due_is_rate_of_total() {
        assert_eq!(advance_due(1000, 0.30), 300);
        assert_eq!(advance_due(550, 0.30), 165);
    }

    #[test]
    fn room_total_price_folds_tax_in() {
        assert_eq!(room_total_price(100.0, 18.0), 118.0);
        assert_eq!(room_total_price(80.0, 0.0), 80.0);
    }
}
