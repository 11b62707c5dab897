// ABOUTME: Sticking-point phase scoring from interview flags via the lift's weighted rule table
// ABOUTME: Resolves primary and secondary phase, tie detection, and primary-phase confidence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use liftoff_core::constants::precision::round3;
use liftoff_core::models::{PhaseScore, SessionFlags};
use tracing::debug;

use crate::catalog::LiftDefinition;

/// Phase totals and the resolved sticking point
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseAssessment {
    /// Scored phases, highest first, ties in catalog order
    pub phase_scores: Vec<PhaseScore>,
    /// Highest-scoring phase, or the lift default when nothing scored
    pub primary_phase: String,
    /// `top / (top + second)`; 1.0 with one scored phase, 0.0 with none
    pub primary_phase_confidence: f64,
    /// Top two totals equal and non-zero
    pub phase_tie: bool,
    /// Runner-up phase
    pub secondary_phase: Option<String>,
}

impl PhaseAssessment {
    /// Sum of all phase points
    #[must_use]
    pub fn total_points(&self) -> u32 {
        self.phase_scores.iter().map(|score| score.points).sum()
    }

    /// Points held by a phase (0 when it did not score)
    #[must_use]
    pub fn points_for(&self, phase_id: &str) -> u32 {
        self.phase_scores
            .iter()
            .find(|score| score.phase_id == phase_id)
            .map_or(0, |score| score.points)
    }

    /// Whether any rule fired
    #[must_use]
    pub fn has_signal(&self) -> bool {
        !self.phase_scores.is_empty()
    }
}

/// Scores lift phases from session flags
pub struct PhaseScorer;

impl PhaseScorer {
    /// Accumulate rule points for every true flag and resolve the sticking point
    #[must_use]
    pub fn score(lift: &LiftDefinition, flags: &SessionFlags) -> PhaseAssessment {
        let mut totals = vec![0_u32; lift.phases.len()];

        for flag in flags.active() {
            let Some(rule) = lift.phase_rule(flag) else {
                debug!(flag, lift_id = %lift.lift_id, "Flag has no phase rule for this lift");
                continue;
            };
            for contribution in &rule.contributions {
                if let Some(position) = lift.phase_position(&contribution.phase_id) {
                    totals[position] += contribution.points;
                }
            }
        }

        let mut ranked: Vec<(usize, u32)> = totals
            .into_iter()
            .enumerate()
            .filter(|(_, points)| *points > 0)
            .collect();
        // Stable sort keeps catalog order within equal totals
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let phase_scores: Vec<PhaseScore> = ranked
            .iter()
            .map(|&(position, points)| PhaseScore {
                phase_id: lift.phases[position].phase_id.clone(),
                points,
            })
            .collect();

        let assessment = match phase_scores.as_slice() {
            [] => PhaseAssessment {
                phase_scores: Vec::new(),
                primary_phase: lift.default_phase.clone(),
                primary_phase_confidence: 0.0,
                phase_tie: false,
                secondary_phase: None,
            },
            [only] => PhaseAssessment {
                primary_phase: only.phase_id.clone(),
                primary_phase_confidence: 1.0,
                phase_tie: false,
                secondary_phase: None,
                phase_scores: phase_scores.clone(),
            },
            [top, second, ..] => PhaseAssessment {
                primary_phase: top.phase_id.clone(),
                primary_phase_confidence: round3(
                    f64::from(top.points) / f64::from(top.points + second.points),
                ),
                phase_tie: top.points == second.points,
                secondary_phase: Some(second.phase_id.clone()),
                phase_scores: phase_scores.clone(),
            },
        };

        debug!(
            lift_id = %lift.lift_id,
            primary_phase = %assessment.primary_phase,
            confidence = assessment.primary_phase_confidence,
            tie = assessment.phase_tie,
            "Scored sticking-point phases"
        );
        assessment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LiftCatalog;

    #[test]
    fn test_no_flags_falls_back_to_default_phase() {
        let catalog = LiftCatalog::builtin();
        let lift = catalog.lift("deadlift").unwrap();
        let assessment = PhaseScorer::score(lift, &SessionFlags::new());
        assert!(!assessment.has_signal());
        assert_eq!(assessment.primary_phase, "initial_pull");
        assert!(assessment.primary_phase_confidence.abs() < f64::EPSILON);
        assert!(!assessment.phase_tie);
        assert_eq!(assessment.secondary_phase, None);
    }

    #[test]
    fn test_single_phase_has_full_confidence() {
        let catalog = LiftCatalog::builtin();
        let lift = catalog.lift("bench_press").unwrap();
        let flags = SessionFlags::new().with("hard_lockout");
        let assessment = PhaseScorer::score(lift, &flags);
        assert_eq!(assessment.primary_phase, "lockout");
        assert!((assessment.primary_phase_confidence - 1.0).abs() < f64::EPSILON);
        assert_eq!(assessment.total_points(), 3);
    }

    #[test]
    fn test_equal_phases_tie_in_catalog_order() {
        let catalog = LiftCatalog::builtin();
        let lift = catalog.lift("bench_press").unwrap();
        let flags = SessionFlags::new().with("hard_lockout").with("hard_off_chest");
        let assessment = PhaseScorer::score(lift, &flags);
        assert!(assessment.phase_tie);
        assert_eq!(assessment.primary_phase, "bottom");
        assert_eq!(assessment.secondary_phase.as_deref(), Some("lockout"));
        assert!((assessment.primary_phase_confidence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_multi_phase_rules_accumulate() {
        let catalog = LiftCatalog::builtin();
        let lift = catalog.lift("squat").unwrap();
        let flags = SessionFlags::new()
            .with("hips_shoot_up")
            .with("chest_falls_forward")
            .with("hard_out_of_hole");
        let assessment = PhaseScorer::score(lift, &flags);
        assert_eq!(assessment.points_for("mid_range"), 4);
        assert_eq!(assessment.points_for("bottom"), 4);
        assert_eq!(assessment.points_for("lockout"), 0);
        assert!(assessment.phase_tie);
        assert_eq!(assessment.primary_phase, "bottom");
    }

    #[test]
    fn test_unknown_and_false_flags_are_ignored() {
        let catalog = LiftCatalog::builtin();
        let lift = catalog.lift("squat").unwrap();
        let flags: SessionFlags = [("grip_limiting", true), ("knees_cave", false)]
            .into_iter()
            .collect();
        assert!(!PhaseScorer::score(lift, &flags).has_signal());
    }

    #[test]
    fn test_confidence_is_top_share_of_top_two() {
        let catalog = LiftCatalog::builtin();
        let lift = catalog.lift("deadlift").unwrap();
        let flags = SessionFlags::new().with("slow_off_floor").with("back_rounds");
        let assessment = PhaseScorer::score(lift, &flags);
        assert_eq!(assessment.primary_phase, "initial_pull");
        assert!((assessment.primary_phase_confidence - 0.6).abs() < f64::EPSILON);
    }
}
