//! Unit tests for the composite scorer

use crate::fixtures::{factor_set, uniform_factors, worked_example_factors};
use satsignal::models::{Band, FactorKind, Signal};
use satsignal::signals::{CompositeScorer, ThresholdConfig, WeightConfig};
use satsignal::ScoringError;

#[test]
fn test_worked_example_scores_buy() {
    let result = CompositeScorer::score(
        &worked_example_factors(),
        &WeightConfig::tuned(),
        &ThresholdConfig::default(),
    )
    .unwrap();

    assert!((result.score - 0.312).abs() < 1e-9);
    assert_eq!(result.recommendation, Band::Buy);
    assert_eq!(result.signal, Signal::Buy);
    assert!((result.contributions[&FactorKind::Valuation].contribution - 0.105).abs() < 1e-9);
    assert!((result.contributions[&FactorKind::Momentum].contribution - 0.117).abs() < 1e-9);
    assert!((result.contributions[&FactorKind::Sentiment].contribution - 0.090).abs() < 1e-9);
    assert!(result.confidence > 0.0 && result.confidence < 0.2);
}

#[test]
fn test_scoring_is_deterministic() {
    let factors = worked_example_factors();
    let weights = WeightConfig::tuned();
    let thresholds = ThresholdConfig::default();

    let first = CompositeScorer::score(&factors, &weights, &thresholds).unwrap();
    for _ in 0..10 {
        assert_eq!(CompositeScorer::score(&factors, &weights, &thresholds).unwrap(), first);
    }
}

#[test]
fn test_unnormalized_weights_give_same_result() {
    let weights = WeightConfig::new([
        (FactorKind::Valuation, 35.0),
        (FactorKind::Momentum, 30.0),
        (FactorKind::Sentiment, 15.0),
        (FactorKind::Rsi, 10.0),
        (FactorKind::MovingAverage, 10.0),
    ])
    .unwrap();
    let result = CompositeScorer::score(
        &worked_example_factors(),
        &weights,
        &ThresholdConfig::default(),
    )
    .unwrap();
    assert!((result.score - 0.312).abs() < 1e-9);
}

#[test]
fn test_all_bullish_extreme_is_strong_buy_with_high_confidence() {
    let result = CompositeScorer::score(
        &uniform_factors(1.0),
        &WeightConfig::tuned(),
        &ThresholdConfig::default(),
    )
    .unwrap();
    assert_eq!(result.recommendation, Band::StrongBuy);
    assert!(result.confidence > 0.99);
}

#[test]
fn test_all_bearish_extreme_is_strong_sell() {
    let result = CompositeScorer::score(
        &uniform_factors(-0.9),
        &WeightConfig::tuned(),
        &ThresholdConfig::default(),
    )
    .unwrap();
    assert_eq!(result.recommendation, Band::StrongSell);
    assert_eq!(result.signal, Signal::Sell);
}

#[test]
fn test_score_on_boundary_has_low_confidence() {
    let weights = WeightConfig::new([(FactorKind::Valuation, 1.0)]).unwrap();
    let factors = factor_set(&[(FactorKind::Valuation, 0.25)]);
    let result = CompositeScorer::score(&factors, &weights, &ThresholdConfig::default()).unwrap();

    assert_eq!(result.recommendation, Band::Buy);
    assert_eq!(result.confidence, 0.0);
}

#[test]
fn test_missing_factor_error() {
    let factors = factor_set(&[(FactorKind::Valuation, 0.3)]);
    let err = CompositeScorer::score(&factors, &WeightConfig::tuned(), &ThresholdConfig::default())
        .unwrap_err();
    assert!(matches!(err, ScoringError::MissingFactor(_)));
    assert!(err.to_string().contains("missing factor"));
}
