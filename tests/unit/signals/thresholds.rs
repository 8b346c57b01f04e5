//! Unit tests for band classification

use satsignal::models::Band;
use satsignal::signals::ThresholdConfig;
use satsignal::ConfigError;

#[test]
fn test_boundary_scores_belong_to_band_above() {
    let thresholds = ThresholdConfig::default();
    assert_eq!(thresholds.classify(-0.70), Band::Sell);
    assert_eq!(thresholds.classify(-0.15), Band::Hold);
    assert_eq!(thresholds.classify(0.25), Band::Buy);
    assert_eq!(thresholds.classify(0.70), Band::StrongBuy);
}

#[test]
fn test_extremes() {
    let thresholds = ThresholdConfig::default();
    assert_eq!(thresholds.classify(-0.71), Band::StrongSell);
    assert_eq!(thresholds.classify(-1.0), Band::StrongSell);
    assert_eq!(thresholds.classify(0.71), Band::StrongBuy);
    assert_eq!(thresholds.classify(1.0), Band::StrongBuy);
}

#[test]
fn test_interior_scores() {
    let thresholds = ThresholdConfig::default();
    assert_eq!(thresholds.classify(-0.40), Band::Sell);
    assert_eq!(thresholds.classify(0.0), Band::Hold);
    assert_eq!(thresholds.classify(0.312), Band::Buy);
}

#[test]
fn test_non_increasing_boundaries_rejected() {
    assert!(matches!(
        ThresholdConfig::new(-0.7, -0.15, -0.15, 0.7),
        Err(ConfigError::InvalidThresholds(_))
    ));
    assert!(matches!(
        ThresholdConfig::new(0.7, 0.25, -0.15, -0.7),
        Err(ConfigError::InvalidThresholds(_))
    ));
    assert!(ThresholdConfig::new(f64::NAN, -0.15, 0.25, 0.7).is_err());
}

#[test]
fn test_deserialize_validates_order() {
    let ok: ThresholdConfig = serde_json::from_str(
        r#"{"strong_sell": -0.6, "sell": -0.2, "buy": 0.2, "strong_buy": 0.6}"#,
    )
    .unwrap();
    assert_eq!(ok.buy(), 0.2);

    let bad = serde_json::from_str::<ThresholdConfig>(
        r#"{"strong_sell": -0.6, "sell": 0.3, "buy": 0.2, "strong_buy": 0.6}"#,
    );
    assert!(bad.is_err());
}
