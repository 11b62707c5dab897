// ABOUTME: Computed diagnostic signal models produced by the engine on every invocation
// ABOUTME: Defines e1RM estimates, strength indices, phases, hypotheses, archetype, efficiency, tests, and gaps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::context::{Equipment, TrainingAge};

/// Estimated one-rep max for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct E1rmEstimate {
    /// Estimated one-rep max in pounds
    pub value: f64,
    /// Reps fed into the formula after clamping
    pub reps_used: u32,
    /// Reliability of the estimate (0-1)
    pub confidence: f64,
    /// Whether the reported reps exceeded the reliable range
    pub reps_clamped: bool,
}

/// Muscle-group strength indices, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IndexKey {
    /// Knee-extension strength (front squat, safety-bar squat)
    #[serde(rename = "quad_index")]
    Quad,
    /// Hip-extension strength (RDL, good morning)
    #[serde(rename = "posterior_chain_index")]
    PosteriorChain,
    /// Upper-back tension and positional strength (rows)
    #[serde(rename = "back_tension_index")]
    BackTension,
    /// Elbow-extension strength (close-grip, floor press)
    #[serde(rename = "triceps_index")]
    Triceps,
    /// Pressing shoulder strength (overhead, incline)
    #[serde(rename = "shoulder_index")]
    Shoulder,
}

impl IndexKey {
    /// Stable key used in evidence strings and serialized maps
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Quad => "quad_index",
            Self::PosteriorChain => "posterior_chain_index",
            Self::BackTension => "back_tension_index",
            Self::Triceps => "triceps_index",
            Self::Shoulder => "shoulder_index",
        }
    }

    /// Short identifier used in comparison keys (`quad_vs_posterior_chain`)
    #[must_use]
    pub const fn short_key(&self) -> &'static str {
        match self {
            Self::Quad => "quad",
            Self::PosteriorChain => "posterior_chain",
            Self::BackTension => "back_tension",
            Self::Triceps => "triceps",
            Self::Shoulder => "shoulder",
        }
    }

    /// Hyphenated name used in archetype labels
    #[must_use]
    pub const fn label_name(&self) -> &'static str {
        match self {
            Self::Quad => "quad",
            Self::PosteriorChain => "posterior-chain",
            Self::BackTension => "upper-back",
            Self::Triceps => "triceps",
            Self::Shoulder => "shoulder",
        }
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strength index relative to the primary lift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexScore {
    /// 100 means the proxies sit exactly at the expected ratio; not clamped
    pub value: f64,
    /// Mean proxy confidence, scaled down when proxies are thin (0-1)
    pub confidence: f64,
    /// Contributing exercise ids in match order
    pub sources: Vec<String>,
}

/// Sticking-point points accumulated for one phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseScore {
    /// Catalog phase id
    pub phase_id: String,
    /// Sum of fired rule points
    pub points: u32,
}

/// Limiter category, declared in tie-break priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HypothesisCategory {
    /// A muscle group is under-strength for the lift
    Muscle,
    /// Bar path or leverage fault
    Mechanical,
    /// Bracing, tightness, or positional stability
    Stability,
    /// Range-of-motion restriction
    Mobility,
    /// Inconsistent or unskilled execution
    Technique,
    /// Fatigue, volume, or intensity exposure
    Programming,
}

impl HypothesisCategory {
    /// Every category in priority order
    pub const ALL: [Self; 6] = [
        Self::Muscle,
        Self::Mechanical,
        Self::Stability,
        Self::Mobility,
        Self::Technique,
        Self::Programming,
    ];

    /// Tie-break rank; lower wins
    #[must_use]
    pub const fn priority(&self) -> u8 {
        match self {
            Self::Muscle => 0,
            Self::Mechanical => 1,
            Self::Stability => 2,
            Self::Mobility => 3,
            Self::Technique => 4,
            Self::Programming => 5,
        }
    }

    /// Stable string form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Muscle => "muscle",
            Self::Mechanical => "mechanical",
            Self::Stability => "stability",
            Self::Mobility => "mobility",
            Self::Technique => "technique",
            Self::Programming => "programming",
        }
    }
}

impl fmt::Display for HypothesisCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored, evidenced root-cause candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisSignal {
    /// Stable hypothesis key
    pub key: String,
    /// Human-readable label
    pub label: String,
    /// Score (0-100)
    pub score: f64,
    /// Limiter category
    pub category: HypothesisCategory,
    /// Evidence in index, phase, flag order
    pub evidence: Vec<String>,
}

/// Qualitative summary of the most unbalanced index pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DominanceArchetype {
    /// e.g. "quad-dominant, posterior-chain-limited"
    pub label: String,
    /// Coaching rationale for the label
    pub rationale: String,
    /// Compared pair, high side first (`quad_vs_posterior_chain`)
    pub delta_key: String,
    /// Absolute index difference
    pub delta_value: f64,
    /// Mean confidence of the two indices
    pub confidence: f64,
}

/// One itemized efficiency deduction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    /// Points removed from 100
    pub points: u32,
    /// Why the points were removed
    pub reason: String,
}

/// Technical efficiency score with itemized deductions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EfficiencyScore {
    /// Score (0-100); `score + sum(deductions) == 100`
    pub score: u32,
    /// One-line summary
    pub explanation: String,
    /// Deductions in rule order
    pub deductions: Vec<Deduction>,
}

/// Confirmatory test for the next session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationTest {
    /// What the test is
    pub description: String,
    /// Protocol to run it
    pub how_to_run: String,
    /// Hypothesis key under test (empty when no hypothesis had evidence)
    pub hypothesis_tested: String,
    /// Whether the preferred test was replaced
    pub fallback_used: bool,
    /// Why the preferred test was replaced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

/// How much a missing input limits the diagnosis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapSeverity {
    /// Nice to have
    Low,
    /// Improves confidence
    Medium,
    /// Blocks a central conclusion
    High,
}

impl GapSeverity {
    /// Stable string form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Missing input the interview should ask about next
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataGap {
    /// Gap key (index key, `primary_lift`, `sticking_point`, ...)
    pub key: String,
    /// Severity
    pub severity: GapSeverity,
    /// What to ask for and why
    pub reason: String,
}

/// Root aggregate returned by every engine invocation.
///
/// A computed view, rebuilt from scratch on each call and never mutated by the
/// engine afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticSignals {
    /// Schema version
    pub signals_version: String,
    /// Catalog version the numbers were computed against
    pub lift_config_version: String,
    /// Lift under diagnosis
    pub lift_id: String,
    /// Exercise id treated as the primary lift
    pub primary_exercise_id: String,
    /// Training age the expectations were scaled for
    pub training_age: TrainingAge,
    /// Equipment context
    pub equipment: Equipment,
    /// Estimated one-rep maxes per exercise
    pub e1rms: BTreeMap<String, E1rmEstimate>,
    /// Primary e1RM divided by bodyweight, when both are known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_strength: Option<f64>,
    /// Computed strength indices; absent keys mean insufficient data
    pub indices: BTreeMap<IndexKey, IndexScore>,
    /// Phase point totals, highest first
    pub phase_scores: Vec<PhaseScore>,
    /// Most likely sticking-point phase
    pub primary_phase: String,
    /// Share of the top two phase totals held by the primary phase
    pub primary_phase_confidence: f64,
    /// Whether the top two phases scored equally
    pub phase_tie: bool,
    /// Runner-up phase, when one scored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_phase: Option<String>,
    /// Ranked hypotheses, highest first
    pub hypotheses: Vec<HypothesisSignal>,
    /// Dominance archetype, when two or more indices exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archetype: Option<DominanceArchetype>,
    /// Technical efficiency
    pub efficiency: EfficiencyScore,
    /// Suggested confirmatory test
    pub validation_test: ValidationTest,
    /// Missing inputs, most severe first
    pub data_gaps: Vec<DataGap>,
}

impl DiagnosticSignals {
    /// Highest-ranked hypothesis
    #[must_use]
    pub fn top_hypothesis(&self) -> Option<&HypothesisSignal> {
        self.hypotheses.first()
    }

    /// Look up a computed index
    #[must_use]
    pub fn index(&self, key: IndexKey) -> Option<&IndexScore> {
        self.indices.get(&key)
    }

    /// Look up a gap by key
    #[must_use]
    pub fn gap(&self, key: &str) -> Option<&DataGap> {
        self.data_gaps.iter().find(|gap| gap.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_key_serializes_with_suffix() {
        let json = serde_json::to_string(&IndexKey::PosteriorChain).unwrap();
        assert_eq!(json, "\"posterior_chain_index\"");
    }

    #[test]
    fn test_category_priority_matches_declaration_order() {
        let priorities: Vec<u8> = HypothesisCategory::ALL
            .iter()
            .map(HypothesisCategory::priority)
            .collect();
        assert_eq!(priorities, [0, 1, 2, 3, 4, 5]);
        assert!(HypothesisCategory::Muscle < HypothesisCategory::Programming);
    }

    #[test]
    fn test_gap_severity_orders_high_last() {
        assert!(GapSeverity::High > GapSeverity::Medium);
        assert!(GapSeverity::Medium > GapSeverity::Low);
    }
}
