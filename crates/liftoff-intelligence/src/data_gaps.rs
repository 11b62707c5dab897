// ABOUTME: Detects missing inputs that limit the diagnosis and ranks them by severity
// ABOUTME: Tells the interviewer which lift, phase, or context question to ask next
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use std::collections::BTreeMap;

use liftoff_core::models::{DataGap, E1rmEstimate, GapSeverity, IndexKey, IndexScore};
use tracing::debug;

use crate::catalog::{IndexDefinition, LiftDefinition};
use crate::config::IndexConfig;
use crate::phase_scorer::PhaseAssessment;

/// Upstream state the detector inspects
#[derive(Debug, Clone, Copy)]
pub struct GapInputs<'a> {
    /// Exercise id treated as the primary lift
    pub primary_exercise_id: &'a str,
    /// Estimated maxes
    pub e1rms: &'a BTreeMap<String, E1rmEstimate>,
    /// Computed indices
    pub indices: &'a BTreeMap<IndexKey, IndexScore>,
    /// Phase assessment
    pub phases: &'a PhaseAssessment,
    /// Reported bodyweight in pounds
    pub bodyweight_lbs: Option<f64>,
}

/// Lists missing inputs, most severe first
#[derive(Debug, Clone, Copy)]
pub struct DataGapDetector<'a> {
    config: &'a IndexConfig,
}

impl<'a> DataGapDetector<'a> {
    /// Create a detector; `min_sources` decides when an index is thin
    #[must_use]
    pub const fn new(config: &'a IndexConfig) -> Self {
        Self { config }
    }

    /// Detect gaps, sorted high to low and stable within a severity
    #[must_use]
    pub fn detect(&self, lift: &LiftDefinition, inputs: GapInputs<'_>) -> Vec<DataGap> {
        let mut gaps = Vec::new();
        let has_primary = inputs.e1rms.contains_key(inputs.primary_exercise_id);

        if !has_primary {
            gaps.push(DataGap {
                key: "primary_lift".to_owned(),
                severity: GapSeverity::High,
                reason: format!(
                    "No {} top set logged; every strength index is measured against it",
                    inputs.primary_exercise_id
                ),
            });
        }

        for definition in &lift.indices {
            if inputs.indices.contains_key(&definition.key) {
                continue;
            }
            let reason = if has_primary {
                format!(
                    "No {} proxy lift logged; ask for a recent top set of {}",
                    definition.key.label_name(),
                    join_or(&unlogged_proxies(definition, inputs))
                )
            } else {
                format!(
                    "The {} index needs a {} top set before its proxies can be compared",
                    definition.key.label_name(),
                    inputs.primary_exercise_id
                )
            };
            gaps.push(DataGap {
                key: definition.key.as_str().to_owned(),
                severity: definition.criticality,
                reason,
            });
        }

        if !inputs.phases.has_signal() {
            gaps.push(DataGap {
                key: "sticking_point".to_owned(),
                severity: GapSeverity::Medium,
                reason: "No sticking-point signal; ask where in the rep the bar slows down".to_owned(),
            });
        }

        for definition in &lift.indices {
            let Some(score) = inputs.indices.get(&definition.key) else {
                continue;
            };
            if score.sources.len() >= self.config.min_sources {
                continue;
            }
            let remaining = unlogged_proxies(definition, inputs);
            let mut reason = format!(
                "The {} index rests on {} of {} proxy lifts",
                definition.key.label_name(),
                score.sources.len(),
                self.config.min_sources
            );
            if !remaining.is_empty() {
                reason.push_str(&format!("; a top set of {} would firm it up", join_or(&remaining)));
            }
            gaps.push(DataGap {
                key: format!("{}_depth", definition.key.as_str()),
                severity: GapSeverity::Low,
                reason,
            });
        }

        if !inputs
            .bodyweight_lbs
            .is_some_and(|bodyweight| bodyweight.is_finite() && bodyweight > 0.0)
        {
            gaps.push(DataGap {
                key: "bodyweight".to_owned(),
                severity: GapSeverity::Low,
                reason: "No valid bodyweight; relative strength cannot be computed".to_owned(),
            });
        }

        // Stable sort keeps detection order within a severity
        gaps.sort_by(|a, b| b.severity.cmp(&a.severity));
        debug!(lift_id = %lift.lift_id, gaps = gaps.len(), "Detected data gaps");
        gaps
    }
}

fn unlogged_proxies<'d>(definition: &'d IndexDefinition, inputs: GapInputs<'_>) -> Vec<&'d str> {
    definition
        .proxies
        .iter()
        .map(|proxy| proxy.exercise_id.as_str())
        .filter(|id| *id != inputs.primary_exercise_id && !inputs.e1rms.contains_key(*id))
        .collect()
}

/// `a`, `a or b`, `a, b, or c`
fn join_or(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => (*only).to_owned(),
        [first, second] => format!("{first} or {second}"),
        [rest @ .., last] => format!("{}, or {last}", rest.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LiftCatalog;
    use crate::phase_scorer::PhaseScorer;
    use liftoff_core::models::SessionFlags;

    fn estimate(value: f64) -> E1rmEstimate {
        E1rmEstimate {
            value,
            reps_used: 3,
            confidence: 0.95,
            reps_clamped: false,
        }
    }

    #[test]
    fn test_join_or() {
        assert_eq!(join_or(&["a"]), "a");
        assert_eq!(join_or(&["a", "b"]), "a or b");
        assert_eq!(join_or(&["a", "b", "c"]), "a, b, or c");
    }

    #[test]
    fn test_deadlift_without_proxies() {
        let config = IndexConfig::default();
        let catalog = LiftCatalog::builtin();
        let lift = catalog.lift("deadlift").unwrap();
        let e1rms = BTreeMap::from([("deadlift".to_owned(), estimate(428.8))]);
        let phases = PhaseScorer::score(lift, &SessionFlags::new());
        let gaps = DataGapDetector::new(&config).detect(
            lift,
            GapInputs {
                primary_exercise_id: "deadlift",
                e1rms: &e1rms,
                indices: &BTreeMap::new(),
                phases: &phases,
                bodyweight_lbs: Some(200.0),
            },
        );

        let keys: Vec<&str> = gaps.iter().map(|gap| gap.key.as_str()).collect();
        assert_eq!(
            keys,
            [
                "posterior_chain_index",
                "quad_index",
                "back_tension_index",
                "sticking_point"
            ]
        );
        assert_eq!(gaps[0].severity, GapSeverity::High);
        assert_eq!(
            gaps[0].reason,
            "No posterior-chain proxy lift logged; ask for a recent top set of romanian_deadlift, good_morning, or hip_thrust"
        );
    }

    #[test]
    fn test_missing_primary_and_bodyweight() {
        let config = IndexConfig::default();
        let catalog = LiftCatalog::builtin();
        let lift = catalog.lift("bench_press").unwrap();
        let flags = SessionFlags::new().with("hard_lockout");
        let phases = PhaseScorer::score(lift, &flags);
        let gaps = DataGapDetector::new(&config).detect(
            lift,
            GapInputs {
                primary_exercise_id: "bench_press",
                e1rms: &BTreeMap::new(),
                indices: &BTreeMap::new(),
                phases: &phases,
                bodyweight_lbs: Some(f64::NAN),
            },
        );
        assert_eq!(gaps[0].key, "primary_lift");
        assert_eq!(gaps[1].key, "triceps_index");
        assert_eq!(gaps.last().map(|gap| gap.key.as_str()), Some("bodyweight"));
        assert!(gaps.iter().all(|gap| gap.key != "sticking_point"));
    }

    #[test]
    fn test_thin_index_reports_depth_gap() {
        let config = IndexConfig::default();
        let catalog = LiftCatalog::builtin();
        let lift = catalog.lift("squat").unwrap();
        let e1rms = BTreeMap::from([
            ("squat".to_owned(), estimate(400.0)),
            ("front_squat".to_owned(), estimate(320.0)),
        ]);
        let indices = BTreeMap::from([(
            IndexKey::Quad,
            IndexScore {
                value: 97.6,
                confidence: 0.48,
                sources: vec!["front_squat".to_owned()],
            },
        )]);
        let phases = PhaseScorer::score(lift, &SessionFlags::new().with("knees_cave"));
        let gaps = DataGapDetector::new(&config).detect(
            lift,
            GapInputs {
                primary_exercise_id: "squat",
                e1rms: &e1rms,
                indices: &indices,
                phases: &phases,
                bodyweight_lbs: None,
            },
        );
        let depth = gaps.iter().find(|gap| gap.key == "quad_index_depth").unwrap();
        assert_eq!(depth.severity, GapSeverity::Low);
        assert_eq!(
            depth.reason,
            "The quad index rests on 1 of 2 proxy lifts; a top set of safety_bar_squat would firm it up"
        );
        // severities never increase down the list
        assert!(gaps.windows(2).all(|pair| pair[0].severity >= pair[1].severity));
    }
}
