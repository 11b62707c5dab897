// ABOUTME: Ranks the lift's known limiters using index weakness, phase share, and corroborating flags
// ABOUTME: Builds the evidence strings published with each hypothesis and applies the tie-break order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use std::cmp::Ordering;
use std::collections::BTreeMap;

use liftoff_core::constants::precision::round1;
use liftoff_core::models::{HypothesisSignal, IndexKey, IndexScore, SessionFlags};
use tracing::debug;

use crate::catalog::{HypothesisRule, LiftCatalog, LiftDefinition};
use crate::config::HypothesisConfig;
use crate::phase_scorer::PhaseAssessment;

/// Upstream signals a hypothesis can draw evidence from
#[derive(Debug, Clone, Copy)]
pub struct HypothesisInputs<'a> {
    /// Computed strength indices
    pub indices: &'a BTreeMap<IndexKey, IndexScore>,
    /// Phase assessment
    pub phases: &'a PhaseAssessment,
    /// Session flags
    pub flags: &'a SessionFlags,
}

/// Scores and orders hypotheses
#[derive(Debug, Clone, Copy)]
pub struct HypothesisRanker<'a> {
    config: &'a HypothesisConfig,
    catalog: &'a LiftCatalog,
}

impl<'a> HypothesisRanker<'a> {
    /// Create a ranker; the catalog supplies flag descriptions for evidence
    #[must_use]
    pub const fn new(config: &'a HypothesisConfig, catalog: &'a LiftCatalog) -> Self {
        Self { config, catalog }
    }

    /// Score every hypothesis with at least one piece of evidence.
    ///
    /// Ordered by score descending, then category priority, then catalog order.
    #[must_use]
    pub fn rank(&self, lift: &LiftDefinition, inputs: HypothesisInputs<'_>) -> Vec<HypothesisSignal> {
        let mut scored: Vec<(usize, HypothesisSignal)> = lift
            .hypotheses
            .iter()
            .enumerate()
            .filter_map(|(position, rule)| {
                self.score_rule(rule, inputs).map(|signal| (position, signal))
            })
            .collect();

        scored.sort_by(|(a_pos, a), (b_pos, b)| {
            published_order(a, b).then_with(|| a_pos.cmp(b_pos))
        });

        debug!(
            lift_id = %lift.lift_id,
            ranked = scored.len(),
            top = scored.first().map_or("none", |(_, signal)| signal.key.as_str()),
            "Ranked hypotheses"
        );
        scored.into_iter().map(|(_, signal)| signal).collect()
    }

    fn score_rule(&self, rule: &HypothesisRule, inputs: HypothesisInputs<'_>) -> Option<HypothesisSignal> {
        let mut score = 0.0;
        let mut evidence = Vec::new();

        if let Some((key, index)) = rule
            .index
            .and_then(|key| inputs.indices.get(&key).map(|index| (key, index)))
        {
            if index.value < 100.0 {
                let gap = 100.0 - index.value;
                score += (gap * self.config.index_weakness_multiplier)
                    .min(self.config.index_weakness_cap);
                evidence.push(format!(
                    "{key} {:.1} is {gap:.1} points below expectation (sources: {})",
                    index.value,
                    index.sources.join(", ")
                ));
            }
        }

        if let Some(phase_id) = &rule.phase {
            let points = inputs.phases.points_for(phase_id);
            let total = inputs.phases.total_points();
            if points > 0 && total > 0 {
                let share = f64::from(points) / f64::from(total);
                score += self.config.phase_weight * share;
                let pct = (share * 100.0).round() as u32;
                evidence.push(format!(
                    "phase {phase_id} carries {points} of {total} sticking-point points ({pct}%)"
                ));
            }
        }

        for flag in &rule.flags {
            if inputs.flags.is_set(flag) {
                score += self.config.flag_bonus;
                evidence.push(format!("flag {flag}: {}", self.describe(flag)));
            }
        }

        if evidence.is_empty() {
            return None;
        }

        Some(HypothesisSignal {
            key: rule.key.clone(),
            label: rule.label.clone(),
            score: round1(score.clamp(0.0, 100.0)),
            category: rule.category,
            evidence,
        })
    }

    fn describe(&self, flag: &str) -> String {
        self.catalog
            .flag_description(flag)
            .map_or_else(|| flag.replace('_', " "), str::to_owned)
    }
}

/// Score descending, then category priority; catalog order settles the rest
#[must_use]
pub fn published_order(a: &HypothesisSignal, b: &HypothesisSignal) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.category.priority().cmp(&b.category.priority()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase_scorer::PhaseScorer;
    use liftoff_core::models::HypothesisCategory;

    fn rank(lift_id: &str, indices: &BTreeMap<IndexKey, IndexScore>, flags: &SessionFlags) -> Vec<HypothesisSignal> {
        let catalog = LiftCatalog::builtin();
        let config = HypothesisConfig::default();
        let lift = catalog.lift(lift_id).unwrap();
        let phases = PhaseScorer::score(lift, flags);
        HypothesisRanker::new(&config, &catalog).rank(
            lift,
            HypothesisInputs {
                indices,
                phases: &phases,
                flags,
            },
        )
    }

    fn index(value: f64, sources: &[&str]) -> IndexScore {
        IndexScore {
            value,
            confidence: 0.9,
            sources: sources.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    #[test]
    fn test_no_evidence_no_hypotheses() {
        assert!(rank("squat", &BTreeMap::new(), &SessionFlags::new()).is_empty());
    }

    #[test]
    fn test_index_phase_and_flag_components() {
        let indices = BTreeMap::from([(IndexKey::Triceps, index(85.0, &["close_grip_bench", "floor_press"]))]);
        let flags = SessionFlags::new().with("hard_lockout");
        let ranked = rank("bench_press", &indices, &flags);

        let top = &ranked[0];
        assert_eq!(top.key, "triceps_weakness");
        // 15 * 1.2 + 30 * 3/3 + 15
        assert!((top.score - 63.0).abs() < 1e-9);
        assert_eq!(
            top.evidence,
            [
                "triceps_index 85.0 is 15.0 points below expectation (sources: close_grip_bench, floor_press)",
                "phase lockout carries 3 of 3 sticking-point points (100%)",
                "flag hard_lockout: the rep is hardest at lockout",
            ]
        );
    }

    #[test]
    fn test_index_component_is_capped() {
        let indices = BTreeMap::from([(IndexKey::Quad, index(40.0, &["front_squat"]))]);
        let ranked = rank("squat", &indices, &SessionFlags::new());
        assert!((ranked[0].score - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_strong_index_is_not_evidence() {
        let indices = BTreeMap::from([(IndexKey::Quad, index(104.0, &["front_squat"]))]);
        assert!(rank("squat", &indices, &SessionFlags::new()).is_empty());
    }

    #[test]
    fn test_equal_scores_follow_category_priority() {
        // technique_consistency and fatigue_programming each get one flag bonus
        let flags = SessionFlags::new()
            .with("fatigue_accumulated")
            .with("inconsistent_technique");
        let ranked = rank("deadlift", &BTreeMap::new(), &flags);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].category, HypothesisCategory::Technique);
        assert_eq!(ranked[1].category, HypothesisCategory::Programming);
        assert_eq!(published_order(&ranked[0], &ranked[1]), Ordering::Less);
    }

    #[test]
    fn test_shared_flag_evidences_several_hypotheses() {
        let flags = SessionFlags::new().with("elbows_flare_early");
        let ranked = rank("bench_press", &BTreeMap::new(), &flags);
        let keys: Vec<&str> = ranked.iter().map(|h| h.key.as_str()).collect();
        // bar_path_fault also holds the whole mid_range phase
        assert_eq!(keys, ["bar_path_fault", "triceps_weakness", "pec_delt_weakness"]);
        assert!((ranked[0].score - 45.0).abs() < 1e-9);
    }
}
