// ABOUTME: Scoring policy configuration for each diagnostic stage
// ABOUTME: Holds e1RM bands, index scaling, hypothesis weights, archetype and efficiency thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

//! Scoring Configuration
//!
//! Policy constants for the diagnostic stages. The defaults are the documented
//! baseline values; every one can be overridden through `LIFTOFF_*` environment
//! variables (see [`super::DiagnosticsConfig::load`]).

use liftoff_core::constants::reps::MAX_RELIABLE_REPS;
use liftoff_core::models::{Equipment, TrainingAge};
use serde::{Deserialize, Serialize};

/// e1RM estimation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct E1rmConfig {
    /// Reps above this are clamped before estimation
    pub max_reliable_reps: u32,
    /// Brzycki denominator intercept
    pub formula_intercept: f64,
    /// Brzycki denominator slope per rep
    pub formula_slope: f64,
    /// Confidence for 1-3 reps
    pub high_confidence: f64,
    /// Confidence for 4-6 reps
    pub moderate_confidence: f64,
    /// Confidence for 7+ reps (and clamped sets)
    pub low_confidence: f64,
}

impl Default for E1rmConfig {
    fn default() -> Self {
        Self {
            max_reliable_reps: MAX_RELIABLE_REPS,
            formula_intercept: 1.0278,
            formula_slope: 0.0278,
            high_confidence: 0.95,
            moderate_confidence: 0.85,
            low_confidence: 0.65,
        }
    }
}

/// Strength index settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Proxies needed before an index keeps its full confidence
    pub min_sources: usize,
    /// Expected-ratio multiplier for beginners
    pub beginner_ratio_factor: f64,
    /// Expected-ratio multiplier for intermediates
    pub intermediate_ratio_factor: f64,
    /// Expected-ratio multiplier for advanced lifters
    pub advanced_ratio_factor: f64,
    /// Expected-ratio multiplier in a commercial gym
    pub commercial_ratio_factor: f64,
    /// Expected-ratio multiplier in a home gym
    pub home_ratio_factor: f64,
    /// Expected-ratio multiplier with limited equipment
    pub limited_ratio_factor: f64,
}

impl IndexConfig {
    /// Multiplier applied to catalog expected ratios for this context
    #[must_use]
    pub fn ratio_factor(&self, training_age: TrainingAge, equipment: Equipment) -> f64 {
        let age = match training_age {
            TrainingAge::Beginner => self.beginner_ratio_factor,
            TrainingAge::Intermediate => self.intermediate_ratio_factor,
            TrainingAge::Advanced => self.advanced_ratio_factor,
        };
        let gear = match equipment {
            Equipment::Commercial => self.commercial_ratio_factor,
            Equipment::Home => self.home_ratio_factor,
            Equipment::Limited => self.limited_ratio_factor,
        };
        age * gear
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            min_sources: 2,
            beginner_ratio_factor: 0.92,
            intermediate_ratio_factor: 1.0,
            advanced_ratio_factor: 1.04,
            commercial_ratio_factor: 1.0,
            home_ratio_factor: 0.97,
            limited_ratio_factor: 0.94,
        }
    }
}

/// Hypothesis scoring weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HypothesisConfig {
    /// Points per index point below 100
    pub index_weakness_multiplier: f64,
    /// Maximum points the index component can contribute
    pub index_weakness_cap: f64,
    /// Points for holding every phase point
    pub phase_weight: f64,
    /// Points per corroborating flag
    pub flag_bonus: f64,
}

impl Default for HypothesisConfig {
    fn default() -> Self {
        Self {
            index_weakness_multiplier: 1.2,
            index_weakness_cap: 45.0,
            phase_weight: 30.0,
            flag_bonus: 15.0,
        }
    }
}

/// Dominance archetype settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchetypeConfig {
    /// Largest index gap below this is reported as balanced
    pub balanced_threshold: f64,
}

impl Default for ArchetypeConfig {
    fn default() -> Self {
        Self {
            balanced_threshold: 8.0,
        }
    }
}

/// Efficiency score settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfficiencyConfig {
    /// Archetype gap at or above this triggers the imbalance deduction
    pub imbalance_threshold: f64,
    /// Points removed by the imbalance deduction
    pub imbalance_points: u32,
}

impl Default for EfficiencyConfig {
    fn default() -> Self {
        Self {
            imbalance_threshold: 25.0,
            imbalance_points: 10,
        }
    }
}
