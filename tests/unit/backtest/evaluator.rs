//! Unit tests for the walk-forward evaluator

use crate::fixtures::{daily_prices, day, factor_set, flat_prices, snapshot, uniform_factors};
use satsignal::backtest::{BacktestConfig, BacktestEvaluator};
use satsignal::error::FactorLookupFailure;
use satsignal::models::{Band, CheckpointStatus, FactorKind, IncompleteReason, PricePoint};
use satsignal::services::{provider_fn, AsOf, FactorTimeline};
use satsignal::signals::{ThresholdConfig, WeightConfig};
use std::cell::RefCell;

fn evaluator(hold_tolerance_pct: f64) -> BacktestEvaluator {
    evaluator_with(WeightConfig::tuned(), hold_tolerance_pct)
}

fn evaluator_with(weights: WeightConfig, hold_tolerance_pct: f64) -> BacktestEvaluator {
    BacktestEvaluator::new(
        weights,
        ThresholdConfig::default(),
        BacktestConfig::new(7, 7, hold_tolerance_pct).unwrap(),
    )
}

/// Day 0 at 100, a -6% drop by day 7, flat afterwards through day 14
fn six_percent_drop() -> Vec<PricePoint> {
    let mut prices = vec![100.0; 7];
    prices.extend(vec![94.0; 8]);
    daily_prices(&prices)
}

#[test]
fn test_short_series_is_insufficient() {
    let provider = provider_fn(|_: &AsOf<'_>| Ok(uniform_factors(0.0)));
    let report = evaluator(5.0).run(&flat_prices(10, 100.0), &provider);

    assert!(report.insufficient_data);
    assert!(report.checkpoints.is_empty());
    assert_eq!(report.overall.accuracy, None);
    assert_eq!(report.config.hold_tolerance_pct, 5.0);
    assert_eq!(report.per_band.len(), 5);
}

#[test]
fn test_empty_series_is_insufficient() {
    let provider = provider_fn(|_: &AsOf<'_>| Ok(uniform_factors(0.0)));
    let report = evaluator(5.0).run(&[], &provider);
    assert!(report.insufficient_data);
}

#[test]
fn test_checkpoints_step_through_series() {
    let provider = provider_fn(|_: &AsOf<'_>| Ok(uniform_factors(0.0)));
    let report = evaluator(5.0).run(&flat_prices(29, 100.0), &provider);

    let timestamps: Vec<_> = report.checkpoints.iter().map(|c| c.timestamp).collect();
    assert_eq!(timestamps, vec![day(0), day(7), day(14), day(21)]);
    assert!(report.checkpoints.iter().all(|c| c.is_resolved()));
    assert_eq!(report.resolved_count, 4);
}

#[test]
fn test_irregular_sampling_uses_next_available_sample() {
    let prices: Vec<PricePoint> = [0, 1, 2, 8, 9, 15, 16, 22]
        .iter()
        .map(|n| PricePoint::new(day(*n), 100.0 + *n as f64))
        .collect();
    let provider = provider_fn(|_: &AsOf<'_>| Ok(uniform_factors(0.5)));
    let report = evaluator(5.0).run(&prices, &provider);

    let timestamps: Vec<_> = report.checkpoints.iter().map(|c| c.timestamp).collect();
    assert_eq!(timestamps, vec![day(0), day(8), day(15)]);
    match &report.checkpoints[0].status {
        CheckpointStatus::Resolved { resolved_at, price_after_horizon, .. } => {
            assert_eq!(*resolved_at, day(8));
            assert_eq!(*price_after_horizon, 108.0);
        }
        other => panic!("unexpected status {:?}", other),
    }
}

#[test]
fn test_hold_correct_at_ten_percent_wrong_at_two() {
    let provider = provider_fn(|_: &AsOf<'_>| Ok(uniform_factors(0.0)));
    let prices = six_percent_drop();

    let loose = evaluator(10.0).run(&prices, &provider);
    let first = &loose.checkpoints[0];
    assert_eq!(first.band(), Some(Band::Hold));
    assert!((first.actual_change_pct().unwrap() + 6.0).abs() < 1e-9);
    assert_eq!(first.correct(), Some(true));
    assert_eq!(loose.config.hold_tolerance_pct, 10.0);

    let tight = evaluator(2.0).run(&prices, &provider);
    assert_eq!(tight.checkpoints[0].correct(), Some(false));
    assert_eq!(tight.config.hold_tolerance_pct, 2.0);
    assert_eq!(tight.overall.correct, 1);
    assert_eq!(tight.overall.total, 2);
}

#[test]
fn test_factor_lookup_failure_marks_checkpoint_incomplete() {
    let provider = provider_fn(|as_of: &AsOf<'_>| {
        if as_of.timestamp() == day(7) {
            Err(FactorLookupFailure::new(as_of.timestamp(), "sentiment feed offline"))
        } else {
            Ok(uniform_factors(0.4))
        }
    });
    let report = evaluator(5.0).run(&flat_prices(29, 100.0), &provider);

    assert_eq!(report.checkpoints.len(), 4);
    assert_eq!(report.incomplete_count, 1);
    assert_eq!(report.resolved_count, 3);
    assert_eq!(report.overall.total, 3);
    assert_eq!(
        report.checkpoints[1].status,
        CheckpointStatus::Incomplete {
            reason: IncompleteReason::FactorLookup("sentiment feed offline".to_string())
        }
    );
}

#[test]
fn test_missing_weighted_factor_marks_checkpoint_incomplete() {
    let provider = provider_fn(|_: &AsOf<'_>| Ok(factor_set(&[(FactorKind::Valuation, 0.5)])));
    let report = evaluator(5.0).run(&flat_prices(15, 100.0), &provider);

    assert_eq!(report.resolved_count, 0);
    assert_eq!(report.incomplete_count, 2);
    let first = &report.checkpoints[0];
    assert!(matches!(
        first.status,
        CheckpointStatus::Incomplete {
            reason: IncompleteReason::Scoring(_)
        }
    ));
    assert!(first.factors.is_some());
    assert!(first.composite.is_none());
    assert_eq!(report.overall.accuracy, None);
}

#[test]
fn test_provider_never_sees_future_prices() {
    let prices = daily_prices(&(0..29).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
    let seen = RefCell::new(Vec::new());
    let provider = provider_fn(|as_of: &AsOf<'_>| {
        let visible = as_of.prices();
        assert!(visible.iter().all(|p| p.timestamp <= as_of.timestamp()));
        seen.borrow_mut().push((as_of.timestamp(), visible.len()));
        Ok(uniform_factors(0.3))
    });

    evaluator(5.0).run(&prices, &provider);

    assert_eq!(
        seen.into_inner(),
        vec![(day(0), 1), (day(7), 8), (day(14), 15), (day(21), 22)]
    );
}

#[test]
fn test_invalid_prices_are_dropped() {
    let mut prices = flat_prices(17, 100.0);
    prices[0].price = f64::NAN;
    prices[1].price = 0.0;
    prices.reverse();
    let provider = provider_fn(|_: &AsOf<'_>| Ok(uniform_factors(0.0)));

    let report = evaluator(5.0).run(&prices, &provider);
    assert!(!report.insufficient_data);
    assert_eq!(report.checkpoints[0].timestamp, day(2));
    assert_eq!(report.checkpoints[0].price_at_checkpoint, 100.0);
}

#[test]
fn test_zero_weight_leaves_factor_directional_accuracy_unchanged() {
    let timeline = FactorTimeline::new(vec![
        snapshot(0, uniform_factors(0.4)),
        snapshot(7, factor_set(&[
            (FactorKind::Rsi, -0.6),
            (FactorKind::MovingAverage, 0.2),
            (FactorKind::Valuation, -0.3),
            (FactorKind::Momentum, 0.1),
            (FactorKind::Sentiment, 0.5),
        ])),
        snapshot(14, uniform_factors(-0.5)),
        snapshot(21, factor_set(&[
            (FactorKind::Rsi, -0.8),
            (FactorKind::MovingAverage, -0.1),
            (FactorKind::Valuation, 0.6),
            (FactorKind::Momentum, 0.7),
            (FactorKind::Sentiment, -0.2),
        ])),
    ]);
    let prices = daily_prices(&[
        100.0, 101.0, 102.0, 103.0, 104.0, 105.0, 106.0,
        108.0, 107.0, 106.0, 105.0, 104.0, 103.0, 102.0,
        101.0, 99.0, 97.0, 95.0, 93.0, 91.0, 90.0,
        89.0, 92.0, 95.0, 98.0, 100.0, 103.0, 105.0,
        107.0,
    ]);

    let weighted = evaluator(5.0).run(&prices, &timeline);
    let zeroed = evaluator_with(
        WeightConfig::tuned().with_weight(FactorKind::Rsi, 0.0).unwrap(),
        5.0,
    )
    .run(&prices, &timeline);

    assert_eq!(zeroed.config.weights.get(FactorKind::Rsi), 0.0);
    assert_eq!(weighted.per_factor[&FactorKind::Rsi], zeroed.per_factor[&FactorKind::Rsi]);
    assert_eq!(weighted.per_factor[&FactorKind::Rsi].samples, 4);
    assert_eq!(weighted.per_factor[&FactorKind::Rsi].matches, 3);
}
