//! Unit tests for weight configuration

use satsignal::models::FactorKind;
use satsignal::signals::WeightConfig;
use satsignal::ConfigError;

#[test]
fn test_tuned_weights_sum_to_one() {
    let weights = WeightConfig::tuned();
    assert!(weights.is_normalized());
    assert_eq!(weights.get(FactorKind::Valuation), 0.35);
    assert_eq!(weights.get(FactorKind::Momentum), 0.30);
}

#[test]
fn test_normalization_sums_to_one() {
    let weights = WeightConfig::new([
        (FactorKind::Rsi, 2.0),
        (FactorKind::Valuation, 6.0),
        (FactorKind::Sentiment, 2.0),
    ])
    .unwrap();
    assert!(!weights.is_normalized());

    let normalized = weights.normalized();
    assert!((normalized.total() - 1.0).abs() < 1e-9);
    assert!((normalized.get(FactorKind::Valuation) - 0.6).abs() < 1e-12);
    assert!((weights.share(FactorKind::Rsi) - 0.2).abs() < 1e-12);
    assert_eq!(weights.share(FactorKind::Momentum), 0.0);
}

#[test]
fn test_rejects_negative_and_empty_weights() {
    assert!(matches!(
        WeightConfig::new([(FactorKind::Rsi, -0.1), (FactorKind::Valuation, 1.0)]),
        Err(ConfigError::InvalidWeights(_))
    ));
    assert!(matches!(
        WeightConfig::new([(FactorKind::Rsi, 0.0)]),
        Err(ConfigError::InvalidWeights(_))
    ));
    assert!(WeightConfig::new([(FactorKind::Rsi, f64::INFINITY)]).is_err());
}

#[test]
fn test_active_skips_zero_weights() {
    let weights = WeightConfig::tuned()
        .with_weight(FactorKind::Sentiment, 0.0)
        .unwrap();
    let active: Vec<FactorKind> = weights.active().map(|(kind, _)| kind).collect();
    assert_eq!(
        active,
        vec![
            FactorKind::Rsi,
            FactorKind::MovingAverage,
            FactorKind::Valuation,
            FactorKind::Momentum
        ]
    );
}

#[test]
fn test_weights_deserialize_through_validation() {
    let weights: WeightConfig =
        serde_json::from_str(r#"{"valuation": 0.5, "momentum": 0.5}"#).unwrap();
    assert_eq!(weights.get(FactorKind::Valuation), 0.5);
    assert!(serde_json::from_str::<WeightConfig>(r#"{"rsi": -1.0}"#).is_err());
}

#[test]
fn test_rejects_weights_whose_sum_overflows() {
    let result = WeightConfig::new([(FactorKind::Valuation, 1e308), (FactorKind::Momentum, 1e308)]);
    assert!(matches!(result, Err(ConfigError::InvalidWeights(_))));

    let large = WeightConfig::new([(FactorKind::Valuation, 1e307), (FactorKind::Momentum, 1e307)])
        .unwrap();
    assert!((large.normalized().total() - 1.0).abs() < 1e-9);
    assert!((large.share(FactorKind::Valuation) - 0.5).abs() < 1e-12);
}
