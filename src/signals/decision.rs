//! Price levels for live recommendations

use crate::models::recommendation::{Signal, TargetLevels};

const TARGET_1_PCT: f64 = 0.05;
const TARGET_2_PCT: f64 = 0.10;
const STOP_LOSS_PCT: f64 = 0.03;
const RANGE_PCT: f64 = 0.05;

pub struct PriceTargets;

impl PriceTargets {
    /// Entry, targets and stop scaled by confidence; HOLD gets a ±5% range.
    pub fn calculate(current_price: f64, signal: Signal, confidence: f64) -> TargetLevels {
        let side = f64::from(signal.direction());
        match signal {
            Signal::Buy | Signal::Sell => TargetLevels::Directional {
                entry: round_cents(current_price),
                target_1: round_cents(current_price * (1.0 + side * TARGET_1_PCT * confidence)),
                target_2: round_cents(current_price * (1.0 + side * TARGET_2_PCT * confidence)),
                stop_loss: round_cents(current_price * (1.0 - side * STOP_LOSS_PCT * confidence)),
            },
            Signal::Hold => TargetLevels::Range {
                entry: round_cents(current_price),
                support: round_cents(current_price * (1.0 - RANGE_PCT)),
                resistance: round_cents(current_price * (1.0 + RANGE_PCT)),
            },
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
