// ABOUTME: Read-only lift catalog: phases, proxy lifts, rule tables, limiter taxonomy, and tests
// ABOUTME: Ships a versioned built-in catalog and accepts validated JSON replacements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

//! Lift Catalog
//!
//! Static reference data every diagnostic stage reads from. A catalog is never
//! mutated after construction; hot reload means building a new engine around a
//! new `Arc<LiftCatalog>`.

mod builtin;
mod flags;

use std::collections::HashSet;
use std::sync::OnceLock;

use liftoff_core::constants::versions::LIFT_CONFIG_VERSION;
use liftoff_core::models::{Equipment, GapSeverity, HypothesisCategory, IndexKey};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Global built-in catalog
static BUILTIN_CATALOG: OnceLock<LiftCatalog> = OnceLock::new();

/// Versioned collection of lift definitions and known interview flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftCatalog {
    /// Stamped into every result as `lift_config_version`
    pub version: String,
    /// Supported lifts
    pub lifts: Vec<LiftDefinition>,
    /// Interview flags with the description used in evidence strings
    pub flags: Vec<FlagDefinition>,
}

/// Known interview flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagDefinition {
    /// Flag name (`elbows_flare_early`)
    pub flag: String,
    /// Plain description (`elbows flare early in the press`)
    pub description: String,
}

/// Everything the engine knows about one competition lift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftDefinition {
    /// Lift id (`bench_press`)
    pub lift_id: String,
    /// Display name
    pub name: String,
    /// Exercise id treated as the primary lift when the caller gives none
    pub primary_exercise_id: String,
    /// Phase reported when no sticking-point signal exists
    pub default_phase: String,
    /// Lift phases in catalog order
    pub phases: Vec<PhaseDefinition>,
    /// Applicable strength indices
    pub indices: Vec<IndexDefinition>,
    /// Flag to phase point contributions
    pub phase_rules: Vec<PhaseRule>,
    /// Known limiters in catalog order
    pub hypotheses: Vec<HypothesisRule>,
    /// Efficiency deduction rules in catalog order
    pub deductions: Vec<DeductionRule>,
    /// Confirmatory tests per limiter category
    pub validation_tests: Vec<ValidationTestDefinition>,
    /// Test returned when no hypothesis had evidence
    pub baseline_test: TestProtocol,
}

/// One lift phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDefinition {
    /// Phase id (`mid_range`)
    pub phase_id: String,
    /// Display name
    pub name: String,
    /// Where in the rep the phase sits
    pub description: String,
}

/// Strength index applicable to a lift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDefinition {
    /// Index computed
    pub key: IndexKey,
    /// Gap severity when the index cannot be computed
    pub criticality: GapSeverity,
    /// Proxy lifts in match order
    pub proxies: Vec<ProxyLift>,
}

/// Exercise whose e1RM is compared against the primary lift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyLift {
    /// Exercise id
    pub exercise_id: String,
    /// Proxy e1RM as a fraction of primary e1RM for a balanced intermediate lifter
    pub expected_ratio: f64,
    /// Weight in the index mean
    pub weight: f64,
}

/// Points a true flag adds to lift phases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRule {
    /// Triggering flag
    pub flag: String,
    /// Phase contributions
    pub contributions: Vec<PhaseContribution>,
}

/// Points added to one phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseContribution {
    /// Phase id
    pub phase_id: String,
    /// Points added
    pub points: u32,
}

/// Known limiter and the evidence that supports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HypothesisRule {
    /// Stable hypothesis key
    pub key: String,
    /// Human-readable label
    pub label: String,
    /// Limiter category
    pub category: HypothesisCategory,
    /// Index whose weakness supports the limiter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexKey>,
    /// Phase whose share of points supports the limiter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    /// Corroborating flags
    #[serde(default)]
    pub flags: Vec<String>,
}

/// Efficiency deduction; fires when every present condition holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionRule {
    /// Flag that must be true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    /// Index that must be computed and below the threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_below: Option<IndexThreshold>,
    /// Points removed
    pub points: u32,
    /// Reason reported with the deduction
    pub reason: String,
}

/// Index threshold condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexThreshold {
    /// Index checked
    pub index: IndexKey,
    /// Exclusive upper bound
    pub below: f64,
}

/// Preferred and fallback confirmatory tests for one limiter category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationTestDefinition {
    /// Category the tests confirm
    pub category: HypothesisCategory,
    /// Test to run when equipment allows
    pub preferred: TestProtocol,
    /// Test to run otherwise
    pub fallback: TestProtocol,
}

/// Runnable test protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestProtocol {
    /// What the test is
    pub description: String,
    /// How to run it
    pub how_to_run: String,
    /// Minimum equipment tier
    #[serde(default = "minimal_equipment")]
    pub requires: Equipment,
}

const fn minimal_equipment() -> Equipment {
    Equipment::Limited
}

impl LiftCatalog {
    /// Built-in catalog stamped with [`LIFT_CONFIG_VERSION`]
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            version: LIFT_CONFIG_VERSION.to_owned(),
            lifts: vec![
                builtin::bench_press(),
                builtin::squat(),
                builtin::deadlift(),
            ],
            flags: flags::known_flags(),
        }
    }

    /// Shared built-in catalog instance
    pub fn global() -> &'static Self {
        BUILTIN_CATALOG.get_or_init(Self::builtin)
    }

    /// Parse and validate a catalog document
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the catalog references
    /// phases, indices, or flags it does not define
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Find a lift by id
    #[must_use]
    pub fn lift(&self, lift_id: &str) -> Option<&LiftDefinition> {
        self.lifts.iter().find(|lift| lift.lift_id == lift_id)
    }

    /// Ids of every supported lift, in catalog order
    pub fn lift_ids(&self) -> impl Iterator<Item = &str> {
        self.lifts.iter().map(|lift| lift.lift_id.as_str())
    }

    /// Description of a known flag
    #[must_use]
    pub fn flag_description(&self, flag: &str) -> Option<&str> {
        self.flags
            .iter()
            .find(|definition| definition.flag == flag)
            .map(|definition| definition.description.as_str())
    }

    /// Check internal references
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCatalog`] naming the first broken reference
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version.trim().is_empty() {
            return Err(invalid("catalog version must not be empty"));
        }
        let known_flags: HashSet<&str> = self.flags.iter().map(|f| f.flag.as_str()).collect();
        if known_flags.len() != self.flags.len() {
            return Err(invalid("flag names must be unique"));
        }

        let mut lift_ids = HashSet::new();
        for lift in &self.lifts {
            if !lift_ids.insert(lift.lift_id.as_str()) {
                return Err(invalid(format!("duplicate lift '{}'", lift.lift_id)));
            }
            lift.validate(&known_flags)?;
        }
        Ok(())
    }
}

impl LiftDefinition {
    /// Position of a phase in catalog order
    #[must_use]
    pub fn phase_position(&self, phase_id: &str) -> Option<usize> {
        self.phases.iter().position(|phase| phase.phase_id == phase_id)
    }

    /// Definition of an applicable index
    #[must_use]
    pub fn index(&self, key: IndexKey) -> Option<&IndexDefinition> {
        self.indices.iter().find(|index| index.key == key)
    }

    /// Rule for a flag, when the lift has one
    #[must_use]
    pub fn phase_rule(&self, flag: &str) -> Option<&PhaseRule> {
        self.phase_rules.iter().find(|rule| rule.flag == flag)
    }

    /// Tests for a limiter category
    #[must_use]
    pub fn validation_test(&self, category: HypothesisCategory) -> Option<&ValidationTestDefinition> {
        self.validation_tests
            .iter()
            .find(|test| test.category == category)
    }

    fn validate(&self, known_flags: &HashSet<&str>) -> Result<(), ConfigError> {
        let lift = &self.lift_id;
        if self.phases.is_empty() {
            return Err(invalid(format!("lift '{lift}' defines no phases")));
        }
        if self.phase_position(&self.default_phase).is_none() {
            return Err(invalid(format!(
                "lift '{lift}' default phase '{}' is not a phase",
                self.default_phase
            )));
        }

        let mut index_keys = HashSet::new();
        for index in &self.indices {
            if !index_keys.insert(index.key) {
                return Err(invalid(format!("lift '{lift}' repeats {}", index.key)));
            }
            if index.proxies.is_empty() {
                return Err(invalid(format!("lift '{lift}' {} has no proxies", index.key)));
            }
            for proxy in &index.proxies {
                if !(proxy.expected_ratio.is_finite() && proxy.expected_ratio > 0.0)
                    || !(proxy.weight.is_finite() && proxy.weight > 0.0)
                {
                    return Err(invalid(format!(
                        "lift '{lift}' proxy '{}' needs a positive ratio and weight",
                        proxy.exercise_id
                    )));
                }
            }
        }

        for rule in &self.phase_rules {
            self.check_flag(known_flags, &rule.flag)?;
            for contribution in &rule.contributions {
                self.check_phase(&contribution.phase_id)?;
            }
        }

        let mut hypothesis_keys = HashSet::new();
        for rule in &self.hypotheses {
            if !hypothesis_keys.insert(rule.key.as_str()) {
                return Err(invalid(format!("lift '{lift}' repeats hypothesis '{}'", rule.key)));
            }
            if let Some(key) = rule.index {
                self.check_index(key)?;
            }
            if let Some(phase) = &rule.phase {
                self.check_phase(phase)?;
            }
            for flag in &rule.flags {
                self.check_flag(known_flags, flag)?;
            }
            if self.validation_test(rule.category).is_none() {
                return Err(invalid(format!(
                    "lift '{lift}' has no {} validation test",
                    rule.category
                )));
            }
        }

        for rule in &self.deductions {
            if rule.flag.is_none() && rule.index_below.is_none() {
                return Err(invalid(format!(
                    "lift '{lift}' deduction '{}' has no condition",
                    rule.reason
                )));
            }
            if let Some(flag) = &rule.flag {
                self.check_flag(known_flags, flag)?;
            }
            if let Some(threshold) = &rule.index_below {
                self.check_index(threshold.index)?;
            }
        }
        Ok(())
    }

    fn check_phase(&self, phase_id: &str) -> Result<(), ConfigError> {
        if self.phase_position(phase_id).is_some() {
            Ok(())
        } else {
            Err(invalid(format!(
                "lift '{}' references unknown phase '{phase_id}'",
                self.lift_id
            )))
        }
    }

    fn check_index(&self, key: IndexKey) -> Result<(), ConfigError> {
        if self.index(key).is_some() {
            Ok(())
        } else {
            Err(invalid(format!(
                "lift '{}' references {key} without proxies for it",
                self.lift_id
            )))
        }
    }

    fn check_flag(&self, known_flags: &HashSet<&str>, flag: &str) -> Result<(), ConfigError> {
        if known_flags.contains(flag) {
            Ok(())
        } else {
            Err(invalid(format!(
                "lift '{}' references unknown flag '{flag}'",
                self.lift_id
            )))
        }
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidCatalog(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_consistent() {
        let catalog = LiftCatalog::builtin();
        catalog.validate().unwrap();
        assert_eq!(catalog.version, LIFT_CONFIG_VERSION);
        assert_eq!(
            catalog.lift_ids().collect::<Vec<_>>(),
            ["bench_press", "squat", "deadlift"]
        );
    }

    #[test]
    fn test_every_builtin_lift_covers_all_categories() {
        for lift in &LiftCatalog::global().lifts {
            for category in HypothesisCategory::ALL {
                assert!(
                    lift.validation_test(category).is_some(),
                    "{} missing {category} test",
                    lift.lift_id
                );
            }
            for test in &lift.validation_tests {
                assert_eq!(test.fallback.requires, Equipment::Limited);
            }
        }
    }

    #[test]
    fn test_json_round_trip_preserves_catalog() {
        let catalog = LiftCatalog::builtin();
        let json = serde_json::to_string(&catalog).unwrap();
        assert_eq!(LiftCatalog::from_json(&json).unwrap(), catalog);
    }

    #[test]
    fn test_rejects_unknown_phase_reference() {
        let mut catalog = LiftCatalog::builtin();
        catalog.lifts[0].phase_rules[0].contributions[0].phase_id = "nowhere".to_owned();
        let json = serde_json::to_string(&catalog).unwrap();
        let err = LiftCatalog::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("unknown phase 'nowhere'"));
    }

    #[test]
    fn test_rejects_unknown_flag_reference() {
        let mut catalog = LiftCatalog::builtin();
        catalog.lifts[1].hypotheses[0].flags.push("wobbles".to_owned());
        assert!(matches!(
            catalog.validate(),
            Err(ConfigError::InvalidCatalog(message)) if message.contains("wobbles")
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            LiftCatalog::from_json("{\"version\":"),
            Err(ConfigError::CatalogParse(_))
        ));
    }

    #[test]
    fn test_flag_descriptions() {
        let catalog = LiftCatalog::global();
        assert_eq!(
            catalog.flag_description("elbows_flare_early"),
            Some("elbows flare early in the press")
        );
        assert_eq!(catalog.flag_description("unheard_of"), None);
    }
}
