// ABOUTME: Technical efficiency score built from itemized deductions off a perfect 100
// ABOUTME: Applies the lift's flag and index rules plus an imbalance deduction from the archetype
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use std::collections::BTreeMap;

use liftoff_core::models::{
    Deduction, DominanceArchetype, EfficiencyScore, IndexKey, IndexScore, SessionFlags,
};
use tracing::debug;

use crate::catalog::{DeductionRule, LiftDefinition};
use crate::config::EfficiencyConfig;

const PERFECT_SCORE: u32 = 100;

/// Scores technical efficiency
#[derive(Debug, Clone, Copy)]
pub struct EfficiencyScorer<'a> {
    config: &'a EfficiencyConfig,
}

impl<'a> EfficiencyScorer<'a> {
    /// Create a scorer using the given policy
    #[must_use]
    pub const fn new(config: &'a EfficiencyConfig) -> Self {
        Self { config }
    }

    /// Apply every firing deduction in rule order, then the imbalance deduction.
    ///
    /// Points are capped as they accumulate so the score never drops below 0
    /// and `score + sum(points) == 100` always holds.
    #[must_use]
    pub fn score(
        &self,
        lift: &LiftDefinition,
        flags: &SessionFlags,
        indices: &BTreeMap<IndexKey, IndexScore>,
        archetype: Option<&DominanceArchetype>,
    ) -> EfficiencyScore {
        let mut candidates: Vec<(u32, String)> = lift
            .deductions
            .iter()
            .filter(|rule| fires(rule, flags, indices))
            .map(|rule| (rule.points, rule.reason.clone()))
            .collect();

        if let Some(archetype) = archetype {
            if archetype.delta_value >= self.config.imbalance_threshold {
                candidates.push((
                    self.config.imbalance_points,
                    format!(
                        "Index imbalance of {:.1} points ({})",
                        archetype.delta_value, archetype.delta_key
                    ),
                ));
            }
        }

        let mut remaining = PERFECT_SCORE;
        let mut deductions = Vec::with_capacity(candidates.len());
        for (points, reason) in candidates {
            let applied = points.min(remaining);
            if applied == 0 {
                debug!(reason = %reason, "Efficiency already at zero; dropping deduction");
                continue;
            }
            remaining -= applied;
            deductions.push(Deduction {
                points: applied,
                reason,
            });
        }

        let lost = PERFECT_SCORE - remaining;
        let explanation = match deductions.len() {
            0 => "No technical inefficiencies flagged".to_owned(),
            1 => format!("1 inefficiency flagged, costing {lost} points"),
            n => format!("{n} inefficiencies flagged, costing {lost} points"),
        };

        debug!(lift_id = %lift.lift_id, score = remaining, deductions = deductions.len(), "Scored efficiency");
        EfficiencyScore {
            score: remaining,
            explanation,
            deductions,
        }
    }
}

fn fires(rule: &DeductionRule, flags: &SessionFlags, indices: &BTreeMap<IndexKey, IndexScore>) -> bool {
    let flag_holds = rule.flag.as_deref().is_none_or(|flag| flags.is_set(flag));
    let index_holds = rule.index_below.as_ref().is_none_or(|threshold| {
        indices
            .get(&threshold.index)
            .is_some_and(|score| score.value < threshold.below)
    });
    flag_holds && index_holds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{LiftCatalog, LiftDefinition};

    fn bench() -> LiftDefinition {
        LiftCatalog::builtin().lift("bench_press").unwrap().clone()
    }

    fn archetype(delta_value: f64) -> DominanceArchetype {
        DominanceArchetype {
            label: "triceps-dominant, shoulder-limited".to_owned(),
            rationale: String::new(),
            delta_key: "triceps_vs_shoulder".to_owned(),
            delta_value,
            confidence: 0.8,
        }
    }

    #[test]
    fn test_clean_lift_scores_perfect() {
        let config = EfficiencyConfig::default();
        let score = EfficiencyScorer::new(&config).score(
            &bench(),
            &SessionFlags::new(),
            &BTreeMap::new(),
            None,
        );
        assert_eq!(score.score, 100);
        assert!(score.deductions.is_empty());
        assert_eq!(score.explanation, "No technical inefficiencies flagged");
    }

    #[test]
    fn test_flag_deductions_in_rule_order() {
        let config = EfficiencyConfig::default();
        let flags = SessionFlags::new()
            .with("elbows_flare_early")
            .with("bar_drifts_forward");
        let score = EfficiencyScorer::new(&config).score(&bench(), &flags, &BTreeMap::new(), None);
        assert_eq!(score.score, 82);
        let points: Vec<u32> = score.deductions.iter().map(|d| d.points).collect();
        assert_eq!(points, [12, 6]);
        assert_eq!(score.explanation, "2 inefficiencies flagged, costing 18 points");
    }

    #[test]
    fn test_index_condition_must_hold() {
        let config = EfficiencyConfig::default();
        let flags = SessionFlags::new().with("bar_drifts_forward");
        let weak_back = BTreeMap::from([(
            IndexKey::BackTension,
            IndexScore {
                value: 82.0,
                confidence: 0.9,
                sources: vec!["barbell_row".to_owned()],
            },
        )]);
        let scorer = EfficiencyScorer::new(&config);
        assert_eq!(scorer.score(&bench(), &flags, &BTreeMap::new(), None).score, 88);
        assert_eq!(scorer.score(&bench(), &flags, &weak_back, None).score, 83);
    }

    #[test]
    fn test_imbalance_deduction_threshold() {
        let config = EfficiencyConfig::default();
        let scorer = EfficiencyScorer::new(&config);
        let flags = SessionFlags::new();
        let none = BTreeMap::new();
        assert_eq!(scorer.score(&bench(), &flags, &none, Some(&archetype(24.9))).score, 100);
        let imbalanced = scorer.score(&bench(), &flags, &none, Some(&archetype(25.0)));
        assert_eq!(imbalanced.score, 90);
        assert_eq!(
            imbalanced.deductions[0].reason,
            "Index imbalance of 25.0 points (triceps_vs_shoulder)"
        );
    }

    #[test]
    fn test_deductions_are_capped_at_zero() {
        let config = EfficiencyConfig {
            imbalance_threshold: 25.0,
            imbalance_points: 90,
        };
        let flags = SessionFlags::new()
            .with("bar_drifts_forward")
            .with("elbows_flare_early")
            .with("pause_sensitive");
        let score = EfficiencyScorer::new(&config).score(
            &bench(),
            &flags,
            &BTreeMap::new(),
            Some(&archetype(40.0)),
        );
        assert_eq!(score.score, 0);
        let total: u32 = score.deductions.iter().map(|d| d.points).sum();
        assert_eq!(total, 100);
        assert_eq!(score.deductions.last().map(|d| d.points), Some(74));
    }
}
