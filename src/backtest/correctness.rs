//! Band-aware correctness of a recommendation against realized price change

use crate::models::recommendation::Band;

/// Percent change from `from` to `to`.
pub fn price_change_pct(from: f64, to: f64) -> f64 {
    (to - from) / from * 100.0
}

/// Buy-side bands are right when price did not fall, sell-side bands when it
/// did not rise, HOLD when the move stayed within the tolerance. All bounds
/// are inclusive.
pub fn is_correct(band: Band, change_pct: f64, hold_tolerance_pct: f64) -> bool {
    match band {
        Band::Buy | Band::StrongBuy => change_pct >= 0.0,
        Band::Sell | Band::StrongSell => change_pct <= 0.0,
        Band::Hold => change_pct.abs() <= hold_tolerance_pct,
    }
}

/// -1, 0 or +1
pub fn direction_of(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}
