// ABOUTME: Integration tests for diagnostics policy configuration
// ABOUTME: Validates defaults, LIFTOFF_* environment overrides, and range validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use liftoff_intelligence::{ConfigError, DiagnosticsConfig};
use serial_test::serial;

const OVERRIDES: &[&str] = &[
    "LIFTOFF_MAX_RELIABLE_REPS",
    "LIFTOFF_MIN_INDEX_SOURCES",
    "LIFTOFF_FLAG_BONUS",
    "LIFTOFF_BALANCED_THRESHOLD",
    "LIFTOFF_IMBALANCE_THRESHOLD",
];

fn clear_overrides() {
    for name in OVERRIDES {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_load_without_overrides_matches_defaults() {
    clear_overrides();
    assert_eq!(DiagnosticsConfig::load().unwrap(), DiagnosticsConfig::default());
}

#[test]
#[serial]
fn test_env_overrides_apply() {
    clear_overrides();
    env::set_var("LIFTOFF_MAX_RELIABLE_REPS", "8");
    env::set_var("LIFTOFF_FLAG_BONUS", "20");

    let config = DiagnosticsConfig::load().unwrap();
    assert_eq!(config.e1rm.max_reliable_reps, 8);
    assert!((config.hypothesis.flag_bonus - 20.0).abs() < f64::EPSILON);
    clear_overrides();
}

#[test]
#[serial]
fn test_unparseable_override_is_rejected() {
    clear_overrides();
    env::set_var("LIFTOFF_MIN_INDEX_SOURCES", "two");

    let err = DiagnosticsConfig::load().unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    clear_overrides();
}

#[test]
#[serial]
fn test_out_of_range_override_fails_validation() {
    clear_overrides();
    env::set_var("LIFTOFF_BALANCED_THRESHOLD", "40");
    env::set_var("LIFTOFF_IMBALANCE_THRESHOLD", "20");

    assert!(DiagnosticsConfig::load().is_err());
    clear_overrides();
}

#[test]
fn test_partial_json_keeps_defaults() {
    let config: DiagnosticsConfig =
        serde_json::from_str(r#"{"hypothesis":{"phase_weight":40.0}}"#).unwrap();
    assert!((config.hypothesis.phase_weight - 40.0).abs() < f64::EPSILON);
    assert_eq!(config.e1rm, DiagnosticsConfig::default().e1rm);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validation_rejects_zero_reps() {
    let mut config = DiagnosticsConfig::default();
    config.e1rm.max_reliable_reps = 0;
    assert!(config.validate().is_err());
}
