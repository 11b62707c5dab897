// ABOUTME: Diagnostics configuration container with environment overrides and validation
// ABOUTME: Groups per-stage scoring policy and caches a validated global instance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

//! Diagnostics Configuration Module
//!
//! Configuration is organized per engine stage:
//! - `e1rm` - Rep clamping, formula coefficients, confidence bands
//! - `index` - Minimum proxy count and expected-ratio scaling
//! - `hypothesis` - Score component weights
//! - `archetype` - Balanced threshold
//! - `efficiency` - Imbalance deduction
//!
//! Engines take an explicit `Arc<DiagnosticsConfig>`; [`DiagnosticsConfig::global`]
//! is a convenience for callers that only want environment-driven defaults.

pub mod error;
pub mod scoring;

pub use error::ConfigError;
pub use scoring::{ArchetypeConfig, E1rmConfig, EfficiencyConfig, HypothesisConfig, IndexConfig};

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static DIAGNOSTICS_CONFIG: OnceLock<DiagnosticsConfig> = OnceLock::new();

/// Main diagnostics configuration container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// e1RM estimation policy
    #[serde(default)]
    pub e1rm: E1rmConfig,
    /// Strength index policy
    #[serde(default)]
    pub index: IndexConfig,
    /// Hypothesis scoring weights
    #[serde(default)]
    pub hypothesis: HypothesisConfig,
    /// Dominance archetype policy
    #[serde(default)]
    pub archetype: ArchetypeConfig,
    /// Efficiency scoring policy
    #[serde(default)]
    pub efficiency: EfficiencyConfig,
}

impl DiagnosticsConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        DIAGNOSTICS_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load diagnostics config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load configuration from defaults plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first out-of-range value
    pub fn validate(&self) -> Result<(), ConfigError> {
        let e1rm = &self.e1rm;
        if e1rm.max_reliable_reps == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "e1rm.max_reliable_reps must be at least 1",
            ));
        }
        // The Brzycki denominator must stay positive across the reliable range
        let worst_denominator =
            e1rm.formula_slope.mul_add(-f64::from(e1rm.max_reliable_reps), e1rm.formula_intercept);
        if !worst_denominator.is_finite() || worst_denominator <= 0.0 {
            return Err(ConfigError::InvalidRange(
                "e1rm formula denominator must stay positive up to max_reliable_reps",
            ));
        }
        for confidence in [
            e1rm.high_confidence,
            e1rm.moderate_confidence,
            e1rm.low_confidence,
        ] {
            if !(confidence > 0.0 && confidence <= 1.0) {
                return Err(ConfigError::ValueOutOfRange(
                    "e1rm confidence bands must be within (0, 1]",
                ));
            }
        }
        if e1rm.low_confidence > e1rm.moderate_confidence
            || e1rm.moderate_confidence > e1rm.high_confidence
        {
            return Err(ConfigError::InvalidRange(
                "e1rm confidence bands must satisfy low <= moderate <= high",
            ));
        }

        let index = &self.index;
        if index.min_sources == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "index.min_sources must be at least 1",
            ));
        }
        for factor in [
            index.beginner_ratio_factor,
            index.intermediate_ratio_factor,
            index.advanced_ratio_factor,
            index.commercial_ratio_factor,
            index.home_ratio_factor,
            index.limited_ratio_factor,
        ] {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(ConfigError::ValueOutOfRange(
                    "index ratio factors must be positive",
                ));
            }
        }

        let hypothesis = &self.hypothesis;
        for weight in [
            hypothesis.index_weakness_multiplier,
            hypothesis.index_weakness_cap,
            hypothesis.phase_weight,
            hypothesis.flag_bonus,
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::ValueOutOfRange(
                    "hypothesis weights must be non-negative",
                ));
            }
        }
        if hypothesis.index_weakness_cap > 100.0 || hypothesis.phase_weight > 100.0 {
            return Err(ConfigError::ValueOutOfRange(
                "hypothesis component caps must not exceed 100",
            ));
        }

        if !self.archetype.balanced_threshold.is_finite() || self.archetype.balanced_threshold < 0.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "archetype.balanced_threshold must be non-negative",
            ));
        }

        if self.efficiency.imbalance_threshold < self.archetype.balanced_threshold {
            return Err(ConfigError::InvalidRange(
                "efficiency.imbalance_threshold must be >= archetype.balanced_threshold",
            ));
        }
        if self.efficiency.imbalance_points > 100 {
            return Err(ConfigError::ValueOutOfRange(
                "efficiency.imbalance_points must not exceed 100",
            ));
        }

        Ok(())
    }

    /// Apply environment variable override for a parseable value
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var("LIFTOFF_MAX_RELIABLE_REPS", &mut self.e1rm.max_reliable_reps)?;
        Self::apply_env_var("LIFTOFF_MIN_INDEX_SOURCES", &mut self.index.min_sources)?;
        Self::apply_env_var(
            "LIFTOFF_INDEX_WEAKNESS_MULTIPLIER",
            &mut self.hypothesis.index_weakness_multiplier,
        )?;
        Self::apply_env_var(
            "LIFTOFF_INDEX_WEAKNESS_CAP",
            &mut self.hypothesis.index_weakness_cap,
        )?;
        Self::apply_env_var("LIFTOFF_PHASE_WEIGHT", &mut self.hypothesis.phase_weight)?;
        Self::apply_env_var("LIFTOFF_FLAG_BONUS", &mut self.hypothesis.flag_bonus)?;
        Self::apply_env_var(
            "LIFTOFF_BALANCED_THRESHOLD",
            &mut self.archetype.balanced_threshold,
        )?;
        Self::apply_env_var(
            "LIFTOFF_IMBALANCE_THRESHOLD",
            &mut self.efficiency.imbalance_threshold,
        )?;
        Self::apply_env_var(
            "LIFTOFF_IMBALANCE_POINTS",
            &mut self.efficiency.imbalance_points,
        )?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(DiagnosticsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_confidence_bands() {
        let mut config = DiagnosticsConfig::default();
        config.e1rm.low_confidence = 0.99;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_denominator() {
        let mut config = DiagnosticsConfig::default();
        config.e1rm.max_reliable_reps = 40;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: DiagnosticsConfig =
            serde_json::from_str(r#"{"archetype":{"balanced_threshold":5.0}}"#).unwrap();
        assert!((config.archetype.balanced_threshold - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.index, IndexConfig::default());
    }
}
