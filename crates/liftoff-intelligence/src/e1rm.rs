// ABOUTME: Estimated one-rep max from a (weight, reps) pair using the Brzycki formula
// ABOUTME: Clamps unreliable rep counts and tags each estimate with a confidence band
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use std::cmp::Ordering;
use std::collections::BTreeMap;

use liftoff_core::constants::precision::round1;
use liftoff_core::constants::reps::{HIGH_CONFIDENCE_MAX_REPS, MODERATE_CONFIDENCE_MAX_REPS};
use liftoff_core::errors::DiagnosticError;
use liftoff_core::models::{E1rmEstimate, SnapshotInput};
use tracing::debug;

use crate::config::E1rmConfig;

/// e1RM estimator bound to a policy
#[derive(Debug, Clone, Copy)]
pub struct E1rmEstimator<'a> {
    config: &'a E1rmConfig,
}

impl<'a> E1rmEstimator<'a> {
    /// Create an estimator using the given policy
    #[must_use]
    pub const fn new(config: &'a E1rmConfig) -> Self {
        Self { config }
    }

    /// Estimate a one-rep max
    ///
    /// Reps above `max_reliable_reps` are clamped and the estimate drops to the
    /// low confidence band. Sets never affect the estimate.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosticError::InvalidInput`] if weight is not a positive
    /// finite number or reps is zero
    pub fn estimate(&self, weight: f64, reps: u32) -> Result<E1rmEstimate, DiagnosticError> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(DiagnosticError::invalid_input(format!(
                "weight must be a positive number, got {weight}"
            )));
        }
        if reps == 0 {
            return Err(DiagnosticError::invalid_input("reps must be at least 1"));
        }

        let reps_clamped = reps > self.config.max_reliable_reps;
        let reps_used = reps.min(self.config.max_reliable_reps);
        let denominator = self
            .config
            .formula_slope
            .mul_add(-f64::from(reps_used), self.config.formula_intercept);

        Ok(E1rmEstimate {
            value: round1(weight / denominator),
            reps_used,
            confidence: self.confidence(reps_used, reps_clamped),
            reps_clamped,
        })
    }

    /// Estimate every exercise in a batch of snapshots.
    ///
    /// When an exercise appears more than once, the heaviest weight wins, then
    /// the lowest reps, then the earliest entry.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosticError::InvalidSnapshot`] for the first snapshot with
    /// a non-positive weight, zero reps, or zero sets
    pub fn estimate_best(
        &self,
        snapshots: &[SnapshotInput],
    ) -> Result<BTreeMap<String, E1rmEstimate>, DiagnosticError> {
        let mut best: BTreeMap<&str, &SnapshotInput> = BTreeMap::new();
        for snapshot in snapshots {
            if let Some(reason) = snapshot.validation_issue() {
                return Err(DiagnosticError::invalid_snapshot(
                    snapshot.exercise_id.clone(),
                    reason,
                ));
            }
            best.entry(snapshot.exercise_id.as_str())
                .and_modify(|current| {
                    if outranks(snapshot, current) {
                        *current = snapshot;
                    }
                })
                .or_insert(snapshot);
        }

        let mut estimates = BTreeMap::new();
        for (exercise_id, snapshot) in best {
            let estimate = self.estimate(snapshot.weight, snapshot.reps)?;
            debug!(
                exercise_id,
                e1rm = estimate.value,
                reps_used = estimate.reps_used,
                "Estimated one-rep max"
            );
            estimates.insert(exercise_id.to_owned(), estimate);
        }
        Ok(estimates)
    }

    fn confidence(&self, reps_used: u32, reps_clamped: bool) -> f64 {
        if reps_clamped {
            self.config.low_confidence
        } else if reps_used <= HIGH_CONFIDENCE_MAX_REPS {
            self.config.high_confidence
        } else if reps_used <= MODERATE_CONFIDENCE_MAX_REPS {
            self.config.moderate_confidence
        } else {
            self.config.low_confidence
        }
    }
}

/// Whether `candidate` should replace `current` as the top set for one exercise.
///
/// Heavier wins; on equal weight, fewer reps wins. Anything else keeps `current`.
#[must_use]
pub fn outranks(candidate: &SnapshotInput, current: &SnapshotInput) -> bool {
    match candidate.weight.total_cmp(&current.weight) {
        Ordering::Greater => true,
        Ordering::Equal => candidate.reps < current.reps,
        Ordering::Less => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimator(config: &E1rmConfig) -> E1rmEstimator<'_> {
        E1rmEstimator::new(config)
    }

    #[test]
    fn test_brzycki_triple() {
        let config = E1rmConfig::default();
        let estimate = estimator(&config).estimate(405.0, 3).unwrap();
        assert!((estimate.value - 428.8).abs() < 1e-9);
        assert_eq!(estimate.reps_used, 3);
        assert!((estimate.confidence - 0.95).abs() < f64::EPSILON);
        assert!(!estimate.reps_clamped);
    }

    #[test]
    fn test_single_is_the_lift_itself() {
        let config = E1rmConfig::default();
        let estimate = estimator(&config).estimate(300.0, 1).unwrap();
        assert!((estimate.value - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_bands() {
        let config = E1rmConfig::default();
        let est = estimator(&config);
        let band = |reps| est.estimate(200.0, reps).unwrap().confidence;
        assert!((band(3) - 0.95).abs() < f64::EPSILON);
        assert!((band(4) - 0.85).abs() < f64::EPSILON);
        assert!((band(6) - 0.85).abs() < f64::EPSILON);
        assert!((band(7) - 0.65).abs() < f64::EPSILON);
        assert!((band(10) - 0.65).abs() < f64::EPSILON);
    }

    #[test]
    fn test_high_reps_are_clamped() {
        let config = E1rmConfig::default();
        let est = estimator(&config);
        let clamped = est.estimate(135.0, 20).unwrap();
        let ten = est.estimate(135.0, 10).unwrap();
        assert!(clamped.reps_clamped);
        assert_eq!(clamped.reps_used, 10);
        assert!((clamped.value - ten.value).abs() < f64::EPSILON);
        assert!((clamped.confidence - 0.65).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let config = E1rmConfig::default();
        let est = estimator(&config);
        assert!(matches!(
            est.estimate(0.0, 5),
            Err(DiagnosticError::InvalidInput { .. })
        ));
        assert!(est.estimate(-10.0, 5).is_err());
        assert!(est.estimate(f64::INFINITY, 5).is_err());
        assert!(est.estimate(100.0, 0).is_err());
    }

    #[test]
    fn test_best_snapshot_prefers_heaviest_then_fewest_reps() {
        let config = E1rmConfig::default();
        let snapshots = vec![
            SnapshotInput::new("squat", 315.0, 5),
            SnapshotInput::new("squat", 335.0, 3),
            SnapshotInput::new("squat", 335.0, 2),
            SnapshotInput::new("front_squat", 225.0, 3),
        ];
        let estimates = estimator(&config).estimate_best(&snapshots).unwrap();
        assert_eq!(estimates.len(), 2);
        assert_eq!(estimates["squat"].reps_used, 2);
    }

    #[test]
    fn test_sets_do_not_change_the_estimate() {
        let config = E1rmConfig::default();
        let est = estimator(&config);
        let one = est
            .estimate_best(&[SnapshotInput::new("deadlift", 405.0, 3)])
            .unwrap();
        let five = est
            .estimate_best(&[SnapshotInput::new("deadlift", 405.0, 3).with_sets(5)])
            .unwrap();
        assert_eq!(one, five);
    }

    #[test]
    fn test_invalid_snapshot_names_the_exercise() {
        let config = E1rmConfig::default();
        let err = estimator(&config)
            .estimate_best(&[
                SnapshotInput::new("squat", 315.0, 5),
                SnapshotInput::new("front_squat", 225.0, 0),
            ])
            .unwrap_err();
        assert_eq!(
            err,
            DiagnosticError::invalid_snapshot("front_squat", "reps must be at least 1")
        );
    }
}
