//! Unit tests for checkpoint state transitions

use crate::fixtures::{day, worked_example_factors};
use satsignal::models::{BacktestCheckpoint, Band, CheckpointStatus, IncompleteReason};
use satsignal::signals::{CompositeScorer, ThresholdConfig, WeightConfig};

fn scored_buy_checkpoint() -> BacktestCheckpoint {
    let factors = worked_example_factors();
    let composite =
        CompositeScorer::score(&factors, &WeightConfig::tuned(), &ThresholdConfig::default())
            .unwrap();
    BacktestCheckpoint::pending(day(0), 100.0).scored(factors, composite)
}

#[test]
fn test_resolve_scored_checkpoint() {
    let checkpoint = scored_buy_checkpoint().resolve(103.0, day(7), 5.0);

    assert!(checkpoint.is_resolved());
    assert_eq!(checkpoint.band(), Some(Band::Buy));
    assert!((checkpoint.actual_change_pct().unwrap() - 3.0).abs() < 1e-9);
    assert_eq!(checkpoint.correct(), Some(true));
}

#[test]
fn test_resolve_unscored_checkpoint_is_incomplete() {
    let checkpoint = BacktestCheckpoint::pending(day(0), 100.0).resolve(103.0, day(7), 5.0);

    assert!(checkpoint.is_incomplete());
    assert_eq!(checkpoint.correct(), None);
}

#[test]
fn test_finalized_checkpoint_does_not_transition_again() {
    let resolved = scored_buy_checkpoint().resolve(97.0, day(7), 5.0);
    assert_eq!(resolved.correct(), Some(false));

    let again = resolved
        .clone()
        .mark_incomplete(IncompleteReason::HorizonBeyondData)
        .resolve(110.0, day(8), 5.0);
    assert_eq!(again, resolved);
}

#[test]
fn test_incomplete_checkpoint_serializes_reason() {
    let checkpoint = BacktestCheckpoint::pending(day(0), 100.0)
        .mark_incomplete(IncompleteReason::FactorLookup("feed offline".to_string()));

    let json = serde_json::to_value(&checkpoint).unwrap();
    assert_eq!(json["status"]["state"], "incomplete");
    assert_eq!(json["status"]["reason"]["reason"], "factor_lookup");
    assert_eq!(json["status"]["reason"]["detail"], "feed offline");

    let back: BacktestCheckpoint = serde_json::from_value(json).unwrap();
    assert!(matches!(
        back.status,
        CheckpointStatus::Incomplete {
            reason: IncompleteReason::FactorLookup(_)
        }
    ));
}
