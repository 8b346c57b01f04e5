//! Aggregate statistics over finalized checkpoints

use crate::backtest::correctness::direction_of;
use crate::models::backtest::{
    Accuracy, BacktestCheckpoint, FactorAccuracy, ScoreDistribution, SignalDistribution,
};
use crate::models::factor::FactorKind;
use crate::models::recommendation::{Band, Signal};
use std::collections::BTreeMap;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation; 0 for fewer than two values
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Pearson correlation; 0 when undefined
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return 0.0;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator < f64::EPSILON {
        return 0.0;
    }
    covariance / denominator
}

pub fn overall_accuracy(checkpoints: &[BacktestCheckpoint]) -> Accuracy {
    let resolved: Vec<bool> = checkpoints.iter().filter_map(|c| c.correct()).collect();
    Accuracy::from_counts(resolved.len(), resolved.iter().filter(|c| **c).count())
}

/// Accuracy for each of the five bands, empty bands included
pub fn per_band_accuracy(checkpoints: &[BacktestCheckpoint]) -> BTreeMap<Band, Accuracy> {
    let mut counts: BTreeMap<Band, (usize, usize)> = Band::ALL.iter().map(|b| (*b, (0, 0))).collect();
    for checkpoint in checkpoints {
        if let (Some(band), Some(correct)) = (checkpoint.band(), checkpoint.correct()) {
            let entry = counts.entry(band).or_insert((0, 0));
            entry.0 += 1;
            if correct {
                entry.1 += 1;
            }
        }
    }
    counts
        .into_iter()
        .map(|(band, (total, correct))| (band, Accuracy::from_counts(total, correct)))
        .collect()
}

/// Directional accuracy of each factor's own sign against the realized move.
///
/// Uses whatever factors were supplied at each resolved checkpoint, weighted
/// or not.
pub fn per_factor_accuracy(checkpoints: &[BacktestCheckpoint]) -> BTreeMap<FactorKind, FactorAccuracy> {
    let mut samples: BTreeMap<FactorKind, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for checkpoint in checkpoints {
        let (Some(factors), Some(change)) = (&checkpoint.factors, checkpoint.actual_change_pct()) else {
            continue;
        };
        for factor in factors.iter() {
            let entry = samples.entry(factor.name).or_default();
            entry.0.push(factor.value);
            entry.1.push(change);
        }
    }

    samples
        .into_iter()
        .map(|(kind, (values, changes))| {
            let matches = values
                .iter()
                .zip(changes.iter())
                .filter(|(v, c)| direction_of(**v) == direction_of(**c))
                .count();
            let directional_accuracy = Accuracy::from_counts(values.len(), matches).accuracy;
            (
                kind,
                FactorAccuracy {
                    samples: values.len(),
                    matches,
                    directional_accuracy,
                    correlation: pearson_correlation(&values, &changes),
                },
            )
        })
        .collect()
}

/// Distribution of composite scores over every scored checkpoint
pub fn score_distribution(checkpoints: &[BacktestCheckpoint]) -> Option<ScoreDistribution> {
    let scores: Vec<f64> = checkpoints.iter().filter_map(|c| c.score()).collect();
    let mean = mean(&scores)?;
    Some(ScoreDistribution {
        count: scores.len(),
        mean,
        std: std_dev(&scores),
        min: scores.iter().copied().fold(f64::INFINITY, f64::min),
        max: scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    })
}

pub fn signal_distribution(checkpoints: &[BacktestCheckpoint]) -> SignalDistribution {
    let mut distribution = SignalDistribution::default();
    for band in checkpoints.iter().filter_map(|c| c.band()) {
        match band.collapse() {
            Signal::Buy => distribution.buy += 1,
            Signal::Hold => distribution.hold += 1,
            Signal::Sell => distribution.sell += 1,
        }
    }
    distribution
}

/// Std of realized horizon changes over resolved checkpoints
pub fn horizon_volatility_pct(checkpoints: &[BacktestCheckpoint]) -> Option<f64> {
    let changes: Vec<f64> = checkpoints.iter().filter_map(|c| c.actual_change_pct()).collect();
    if changes.len() < 2 {
        return None;
    }
    Some(std_dev(&changes))
}
