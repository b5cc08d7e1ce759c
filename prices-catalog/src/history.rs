use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Days of history shown for a store price
pub const HISTORY_DAYS: i64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Simulated daily history ending today. Not real data.
pub fn simulate_price_history(current_price: f64) -> Vec<PricePoint> {
    let today = Utc::now().date_naive();
    price_history_with(&mut rand::thread_rng(), current_price, today, HISTORY_DAYS)
}

/// One point per day from `days` ago through `today`, each within ±10% of
/// the current price and rounded to cents.
pub fn price_history_with<R: Rng + ?Sized>(
    rng: &mut R,
    current_price: f64,
    today: NaiveDate,
    days: i64,
) -> Vec<PricePoint> {
    (0..=days)
        .rev()
        .map(|offset| {
            let factor: f64 = rng.gen_range(0.9..1.1);
            PricePoint {
                date: today - Duration::days(offset),
                price: (current_price * factor * 100.0).round() / 100.0,
            }
        })
        .collect()
}

/// Lowest and highest price of a history, `None` when empty
pub fn price_bounds(history: &[PricePoint]) -> Option<(f64, f64)> {
    let mut points = history.iter().map(|p| p.price);
    let first = points.next()?;
    Some(points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
}
