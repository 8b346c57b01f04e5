//! Score margin, factor agreement and confidence calculation

use crate::models::recommendation::Band;
use crate::signals::thresholds::ThresholdConfig;

/// Factor values are bounded by ±1, so the composite score is too.
pub const SCORE_BOUND: f64 = 1.0;

/// A factor whose |value| is below this counts as neutral, i.e. agreeing with HOLD.
pub const NEUTRAL_FACTOR_CUTOFF: f64 = 0.25;

/// Position of `value` between `start` (0.0) and `end` (1.0), clamped.
///
/// A degenerate range counts as fully crossed once `value` reaches `start`.
pub fn fraction_between(value: f64, start: f64, end: f64) -> f64 {
    if end <= start {
        return if value >= start { 1.0 } else { 0.0 };
    }
    ((value - start) / (end - start)).clamp(0.0, 1.0)
}

/// How far the score sits inside its band, in [0, 1].
///
/// Directional bands measure from the entry threshold of their side (`buy`
/// or `sell`) out to the score bound, which accumulates the distance past
/// every crossed threshold: 0 on the entry boundary, 1 at ±1. HOLD measures
/// distance to the nearer hold boundary against half the band width.
pub fn band_margin(score: f64, band: Band, thresholds: &ThresholdConfig) -> f64 {
    match band {
        Band::Buy | Band::StrongBuy => fraction_between(score, thresholds.buy(), SCORE_BOUND),
        Band::Sell | Band::StrongSell => fraction_between(-score, -thresholds.sell(), SCORE_BOUND),
        Band::Hold => {
            let half_width = (thresholds.buy() - thresholds.sell()) / 2.0;
            let distance = (score - thresholds.sell()).min(thresholds.buy() - score);
            (distance / half_width).clamp(0.0, 1.0)
        }
    }
}

/// Fraction of factor values that point the same way as the band.
pub fn factor_agreement(values: &[f64], band: Band) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let agreeing = values
        .iter()
        .filter(|value| match band.direction() {
            1 => **value > 0.0,
            -1 => **value < 0.0,
            _ => value.abs() < NEUTRAL_FACTOR_CUTOFF,
        })
        .count();
    agreeing as f64 / values.len() as f64
}

/// Confidence in [0, 1].
///
/// The margin drives it; full agreement keeps all of it, full disagreement
/// halves it.
pub fn calculate_confidence(margin: f64, agreement: f64) -> f64 {
    (margin * (0.5 + 0.5 * agreement)).clamp(0.0, 1.0)
}
