// ABOUTME: Strength indices comparing proxy-lift e1RMs with the primary lift e1RM
// ABOUTME: Scales catalog expected ratios by training age and equipment, 100 meaning on target
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use std::collections::BTreeMap;

use liftoff_core::constants::precision::{round1, round2};
use liftoff_core::models::{E1rmEstimate, Equipment, IndexKey, IndexScore, TrainingAge};
use tracing::debug;

use crate::catalog::{IndexDefinition, LiftDefinition};
use crate::config::IndexConfig;

/// Calculates per-muscle-group strength indices
#[derive(Debug, Clone, Copy)]
pub struct StrengthIndexCalculator<'a> {
    config: &'a IndexConfig,
}

/// Lifter context the expected ratios are scaled for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifterContext {
    /// Training age
    pub training_age: TrainingAge,
    /// Equipment access
    pub equipment: Equipment,
}

impl<'a> StrengthIndexCalculator<'a> {
    /// Create a calculator using the given policy
    #[must_use]
    pub const fn new(config: &'a IndexConfig) -> Self {
        Self { config }
    }

    /// Compute every index the lift defines and the data supports.
    ///
    /// An index is omitted when the primary e1RM is missing or none of its
    /// proxies were logged. A proxy equal to the primary exercise is skipped.
    #[must_use]
    pub fn compute(
        &self,
        lift: &LiftDefinition,
        primary_exercise_id: &str,
        e1rms: &BTreeMap<String, E1rmEstimate>,
        context: LifterContext,
    ) -> BTreeMap<IndexKey, IndexScore> {
        let Some(primary) = e1rms.get(primary_exercise_id) else {
            debug!(primary_exercise_id, "No primary e1RM; skipping strength indices");
            return BTreeMap::new();
        };

        let factor = self
            .config
            .ratio_factor(context.training_age, context.equipment);

        lift.indices
            .iter()
            .filter_map(|definition| {
                self.compute_index(definition, primary_exercise_id, primary.value, e1rms, factor)
                    .map(|score| (definition.key, score))
            })
            .collect()
    }

    fn compute_index(
        &self,
        definition: &IndexDefinition,
        primary_exercise_id: &str,
        primary_e1rm: f64,
        e1rms: &BTreeMap<String, E1rmEstimate>,
        factor: f64,
    ) -> Option<IndexScore> {
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        let mut confidence_sum = 0.0;
        let mut sources = Vec::new();

        for proxy in &definition.proxies {
            if proxy.exercise_id == primary_exercise_id {
                continue;
            }
            let Some(estimate) = e1rms.get(&proxy.exercise_id) else {
                continue;
            };
            let normalized = (estimate.value / primary_e1rm) / (proxy.expected_ratio * factor);
            weighted_sum += proxy.weight * normalized;
            weight_total += proxy.weight;
            confidence_sum += estimate.confidence;
            sources.push(proxy.exercise_id.clone());
        }

        if sources.is_empty() || weight_total <= 0.0 {
            return None;
        }

        let count = sources.len();
        let mut confidence = confidence_sum / count as f64;
        if count < self.config.min_sources {
            confidence *= count as f64 / self.config.min_sources as f64;
        }
        let confidence = round2(confidence);
        if confidence <= 0.0 {
            debug!(index = %definition.key, "Index confidence rounds to zero; omitting");
            return None;
        }

        let value = round1(100.0 * weighted_sum / weight_total);
        debug!(index = %definition.key, value, confidence, sources = count, "Computed strength index");
        Some(IndexScore {
            value,
            confidence,
            sources,
        })
    }
}
