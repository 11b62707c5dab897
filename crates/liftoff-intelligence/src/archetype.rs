// ABOUTME: Dominance archetype from the most unbalanced pair of computed strength indices
// ABOUTME: Labels the stronger side dominant and the weaker side limited, or balanced within threshold
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use std::collections::BTreeMap;

use liftoff_core::constants::precision::{round1, round2};
use liftoff_core::models::{DominanceArchetype, IndexKey, IndexScore};
use tracing::debug;

use crate::config::ArchetypeConfig;

/// Label used when no pair exceeds the balanced threshold
pub const BALANCED_LABEL: &str = "balanced";

/// Derives the dominance archetype
#[derive(Debug, Clone, Copy)]
pub struct ArchetypeScorer<'a> {
    config: &'a ArchetypeConfig,
}

impl<'a> ArchetypeScorer<'a> {
    /// Create a scorer using the given policy
    #[must_use]
    pub const fn new(config: &'a ArchetypeConfig) -> Self {
        Self { config }
    }

    /// Classify the largest index imbalance; `None` with fewer than two indices.
    ///
    /// Pairs are visited in index order and the first pair wins equal deltas.
    #[must_use]
    pub fn classify(&self, indices: &BTreeMap<IndexKey, IndexScore>) -> Option<DominanceArchetype> {
        let entries: Vec<(IndexKey, &IndexScore)> =
            indices.iter().map(|(key, score)| (*key, score)).collect();

        let mut widest: Option<((IndexKey, &IndexScore), (IndexKey, &IndexScore), f64)> = None;
        for (i, first) in entries.iter().enumerate() {
            for second in &entries[i + 1..] {
                let delta = (first.1.value - second.1.value).abs();
                if widest.as_ref().is_none_or(|(_, _, best)| delta > *best) {
                    widest = Some((*first, *second, delta));
                }
            }
        }

        let (first, second, delta) = widest?;
        let ((high, high_score), (low, low_score)) = if second.1.value > first.1.value {
            (second, first)
        } else {
            (first, second)
        };

        let delta = round1(delta);
        let (label, rationale) = if delta < self.config.balanced_threshold {
            (
                BALANCED_LABEL.to_owned(),
                format!(
                    "Largest index gap is {delta:.1} points ({} vs {}), inside the {:.1}-point balanced band",
                    high.label_name(),
                    low.label_name(),
                    self.config.balanced_threshold
                ),
            )
        } else {
            (
                format!("{}-dominant, {}-limited", high.label_name(), low.label_name()),
                format!(
                    "{} index {:.1} exceeds {} index {:.1} by {delta:.1} points; {}, while {}",
                    high.label_name(),
                    high_score.value,
                    low.label_name(),
                    low_score.value,
                    dominant_phrase(high),
                    limited_phrase(low)
                ),
            )
        };

        debug!(label = %label, delta, "Classified dominance archetype");
        Some(DominanceArchetype {
            label,
            rationale,
            delta_key: format!("{}_vs_{}", high.short_key(), low.short_key()),
            delta_value: delta,
            confidence: round2(f64::midpoint(high_score.confidence, low_score.confidence)),
        })
    }
}

const fn dominant_phrase(key: IndexKey) -> &'static str {
    match key {
        IndexKey::Quad => "the knees and quads carry the lift",
        IndexKey::PosteriorChain => "the hips and hamstrings carry the lift",
        IndexKey::BackTension => "upper-back positioning is a strength",
        IndexKey::Triceps => "elbow extension is a strength",
        IndexKey::Shoulder => "the pressing shoulders carry the lift",
    }
}

const fn limited_phrase(key: IndexKey) -> &'static str {
    match key {
        IndexKey::Quad => "knee extension falls behind out of the bottom",
        IndexKey::PosteriorChain => "hip extension falls behind through the finish",
        IndexKey::BackTension => "the upper back struggles to hold position",
        IndexKey::Triceps => "lockout strength falls behind",
        IndexKey::Shoulder => "drive off the chest falls behind",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(value: f64, confidence: f64) -> IndexScore {
        IndexScore {
            value,
            confidence,
            sources: vec!["proxy".to_owned()],
        }
    }

    #[test]
    fn test_needs_two_indices() {
        let config = ArchetypeConfig::default();
        let indices = BTreeMap::from([(IndexKey::Quad, score(90.0, 0.9))]);
        assert!(ArchetypeScorer::new(&config).classify(&indices).is_none());
    }

    #[test]
    fn test_quad_dominant() {
        let config = ArchetypeConfig::default();
        let indices = BTreeMap::from([
            (IndexKey::Quad, score(110.0, 0.9)),
            (IndexKey::PosteriorChain, score(80.0, 0.7)),
            (IndexKey::BackTension, score(100.0, 0.5)),
        ]);
        let archetype = ArchetypeScorer::new(&config).classify(&indices).unwrap();
        assert_eq!(archetype.label, "quad-dominant, posterior-chain-limited");
        assert_eq!(archetype.delta_key, "quad_vs_posterior_chain");
        assert!((archetype.delta_value - 30.0).abs() < 1e-9);
        assert!((archetype.confidence - 0.8).abs() < 1e-9);
        assert!(archetype.rationale.starts_with("quad index 110.0 exceeds posterior-chain index 80.0"));
    }

    #[test]
    fn test_high_side_comes_first_in_delta_key() {
        let config = ArchetypeConfig::default();
        let indices = BTreeMap::from([
            (IndexKey::Quad, score(70.0, 0.9)),
            (IndexKey::PosteriorChain, score(95.0, 0.9)),
        ]);
        let archetype = ArchetypeScorer::new(&config).classify(&indices).unwrap();
        assert_eq!(archetype.delta_key, "posterior_chain_vs_quad");
    }

    #[test]
    fn test_small_gap_is_balanced() {
        let config = ArchetypeConfig::default();
        let indices = BTreeMap::from([
            (IndexKey::Triceps, score(96.0, 0.9)),
            (IndexKey::Shoulder, score(101.0, 0.9)),
        ]);
        let archetype = ArchetypeScorer::new(&config).classify(&indices).unwrap();
        assert_eq!(archetype.label, BALANCED_LABEL);
        assert_eq!(archetype.delta_key, "shoulder_vs_triceps");
    }

    #[test]
    fn test_first_pair_wins_equal_deltas() {
        let config = ArchetypeConfig::default();
        let indices = BTreeMap::from([
            (IndexKey::Quad, score(100.0, 0.9)),
            (IndexKey::PosteriorChain, score(80.0, 0.9)),
            (IndexKey::BackTension, score(120.0, 0.9)),
        ]);
        // quad/posterior = 20, quad/back = 20, posterior/back = 40
        let archetype = ArchetypeScorer::new(&config).classify(&indices).unwrap();
        assert_eq!(archetype.delta_key, "back_tension_vs_posterior_chain");

        let indices = BTreeMap::from([
            (IndexKey::Quad, score(100.0, 0.9)),
            (IndexKey::PosteriorChain, score(80.0, 0.9)),
            (IndexKey::BackTension, score(80.0, 0.9)),
        ]);
        let archetype = ArchetypeScorer::new(&config).classify(&indices).unwrap();
        assert_eq!(archetype.delta_key, "quad_vs_posterior_chain");
    }
}
