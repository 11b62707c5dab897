// ABOUTME: Property tests for estimator monotonicity and published orderings
// ABOUTME: Uses proptest to exercise random top sets and flag combinations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use liftoff_core::models::{SessionFlags, SnapshotInput};
use liftoff_intelligence::config::E1rmConfig;
use liftoff_intelligence::e1rm::E1rmEstimator;
use liftoff_intelligence::{DiagnosticEngine, DiagnosticRequest, LiftCatalog};
use proptest::prelude::*;

fn known_flags() -> Vec<String> {
    LiftCatalog::builtin()
        .flags
        .iter()
        .map(|definition| definition.flag.clone())
        .collect()
}

proptest! {
    #[test]
    fn e1rm_increases_with_weight(weight in 20.0_f64..800.0, extra in 1.0_f64..100.0, reps in 1_u32..=12) {
        let config = E1rmConfig::default();
        let estimator = E1rmEstimator::new(&config);
        let lighter = estimator.estimate(weight, reps).unwrap();
        let heavier = estimator.estimate(weight + extra, reps).unwrap();
        prop_assert!(heavier.value >= lighter.value);
    }

    #[test]
    fn e1rm_never_decreases_with_reps(weight in 20.0_f64..800.0, reps in 1_u32..10) {
        let config = E1rmConfig::default();
        let estimator = E1rmEstimator::new(&config);
        let fewer = estimator.estimate(weight, reps).unwrap();
        let more = estimator.estimate(weight, reps + 1).unwrap();
        prop_assert!(more.value >= fewer.value);
    }

    #[test]
    fn signals_respect_published_invariants(
        lift_index in 0_usize..3,
        mask in proptest::collection::vec(any::<bool>(), 21),
        primary in 95.0_f64..500.0,
        proxy_share in 0.3_f64..1.2,
        reps in 1_u32..15,
    ) {
        let catalog = LiftCatalog::builtin();
        let lift = &catalog.lifts[lift_index];
        let flags: SessionFlags = known_flags()
            .into_iter()
            .zip(mask)
            .filter(|(_, on)| *on)
            .collect();

        let mut request = DiagnosticRequest::new(lift.lift_id.clone())
            .with_snapshot(SnapshotInput::new(lift.primary_exercise_id.clone(), primary, reps))
            .with_bodyweight(180.0);
        for definition in &lift.indices {
            let proxy = &definition.proxies[0];
            if proxy.exercise_id != lift.primary_exercise_id {
                request = request.with_snapshot(SnapshotInput::new(
                    proxy.exercise_id.clone(),
                    primary * proxy.expected_ratio * proxy_share,
                    reps,
                ));
            }
        }
        request.flags = flags;

        let signals = DiagnosticEngine::with_defaults().compute(&request).unwrap();

        for index in signals.indices.values() {
            prop_assert!(index.confidence > 0.0);
            prop_assert!(!index.sources.is_empty());
        }

        for pair in signals.hypotheses.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if (pair[0].score - pair[1].score).abs() < f64::EPSILON {
                prop_assert!(pair[0].category.priority() <= pair[1].category.priority());
            }
        }

        let deducted: u32 = signals.efficiency.deductions.iter().map(|d| d.points).sum();
        prop_assert!(signals.efficiency.score <= 100);
        prop_assert_eq!(signals.efficiency.score + deducted, 100);

        let tie = match signals.phase_scores.as_slice() {
            [top, second, ..] => top.points == second.points && top.points > 0,
            _ => false,
        };
        prop_assert_eq!(signals.phase_tie, tie);

        for pair in signals.data_gaps.windows(2) {
            prop_assert!(pair[0].severity >= pair[1].severity);
        }
    }
}
