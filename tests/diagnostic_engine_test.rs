// ABOUTME: Integration tests for the diagnostic signals engine
// ABOUTME: Covers end-to-end lift scenarios, idempotent output, and input errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::Arc;

use liftoff_core::errors::{AppError, DiagnosticError, ErrorCode};
use liftoff_core::models::{
    Equipment, GapSeverity, HypothesisCategory, IndexKey, SessionFlags, SnapshotInput, TrainingAge,
};
use liftoff_intelligence::{
    compute_diagnostic_signals, DiagnosticEngine, DiagnosticRequest, LiftCatalog,
};

fn bench_with_flare() -> DiagnosticRequest {
    DiagnosticRequest::new("bench_press")
        .with_snapshot(SnapshotInput::new("bench_press", 225.0, 5))
        .with_snapshot(SnapshotInput::new("close_grip_bench", 185.0, 5))
        .with_flag("elbows_flare_early")
        .with_bodyweight(185.0)
}

#[test]
fn test_deadlift_single_top_set() {
    let signals = compute_diagnostic_signals(
        "deadlift",
        "deadlift",
        &[SnapshotInput::new("deadlift", 405.0, 3)],
        &SessionFlags::new(),
        Some(200.0),
        TrainingAge::Intermediate,
        Equipment::Commercial,
    )
    .unwrap();

    let estimate = &signals.e1rms["deadlift"];
    assert_eq!(estimate.reps_used, 3);
    assert!((estimate.confidence - 0.95).abs() < f64::EPSILON);
    assert!(!estimate.reps_clamped);
    assert!(signals.indices.is_empty());
    assert!(signals.archetype.is_none());

    let gap = signals.gap("posterior_chain_index").unwrap();
    assert_eq!(gap.severity, GapSeverity::High);
    assert!(signals.relative_strength.is_some());
    assert!(signals.gap("bodyweight").is_none());
}

#[test]
fn test_bench_flare_evidence() {
    let engine = DiagnosticEngine::with_defaults();
    let signals = engine.compute(&bench_with_flare()).unwrap();

    assert!(signals.index(IndexKey::Triceps).is_some());
    assert!(signals.index(IndexKey::Shoulder).is_some());
    assert_eq!(
        signals.index(IndexKey::Triceps).unwrap().sources,
        ["close_grip_bench"]
    );

    let flare_evidence = "flag elbows_flare_early: elbows flare early in the press";
    let cited = signals.hypotheses.iter().find(|hypothesis| {
        matches!(
            hypothesis.category,
            HypothesisCategory::Muscle | HypothesisCategory::Mechanical
        ) && hypothesis.evidence.iter().any(|line| line == flare_evidence)
    });
    assert!(cited.is_some());

    // mid-range owns every phase point, so the bar path hypothesis leads
    let top = signals.top_hypothesis().unwrap();
    assert_eq!(top.key, "bar_path_fault");
    assert!((top.score - 45.0).abs() < 1e-9);
    assert_eq!(signals.primary_phase, "mid_range");
    assert!((signals.primary_phase_confidence - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_equal_phase_points_tie() {
    let engine = DiagnosticEngine::with_defaults();
    let request = DiagnosticRequest::new("bench_press")
        .with_flag("hard_off_chest")
        .with_flag("hard_lockout");
    let signals = engine.compute(&request).unwrap();

    assert!(signals.phase_tie);
    assert!((signals.primary_phase_confidence - 0.5).abs() < f64::EPSILON);
    assert_eq!(signals.primary_phase, "bottom");
    assert_eq!(signals.secondary_phase.as_deref(), Some("lockout"));
}

#[test]
fn test_reps_above_ceiling_are_clamped() {
    let engine = DiagnosticEngine::with_defaults();
    let request =
        DiagnosticRequest::new("squat").with_snapshot(SnapshotInput::new("squat", 225.0, 15));
    let signals = engine.compute(&request).unwrap();

    let estimate = &signals.e1rms["squat"];
    assert!(estimate.reps_clamped);
    assert_eq!(estimate.reps_used, 10);
}

#[test]
fn test_identical_inputs_serialize_identically() {
    let engine = DiagnosticEngine::with_defaults();
    let request = bench_with_flare().with_flag("hard_lockout");

    let first = engine.compute(&request).unwrap();
    let second = engine.compute(&request).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_efficiency_deductions_account_for_score() {
    let engine = DiagnosticEngine::with_defaults();
    let request = DiagnosticRequest::new("squat")
        .with_snapshot(SnapshotInput::new("squat", 405.0, 3))
        .with_flag("hips_shoot_up")
        .with_flag("back_rounds")
        .with_flag("knees_cave");
    let signals = engine.compute(&request).unwrap();

    let deducted: u32 = signals
        .efficiency
        .deductions
        .iter()
        .map(|deduction| deduction.points)
        .sum();
    assert_eq!(signals.efficiency.score + deducted, 100);
    assert!(signals.efficiency.explanation.contains("inefficiencies flagged"));
}

#[test]
fn test_limited_equipment_uses_fallback_test() {
    let engine = DiagnosticEngine::with_defaults();
    let signals = engine
        .compute(&bench_with_flare().with_equipment(Equipment::Limited))
        .unwrap();

    let test = &signals.validation_test;
    assert_eq!(test.hypothesis_tested, "bar_path_fault");
    assert!(test.fallback_used);
    assert!(test.fallback_reason.as_deref().unwrap().contains("limited access"));
}

#[test]
fn test_errors_convert_to_app_errors() {
    let engine = DiagnosticEngine::with_defaults();

    let unknown = engine.compute(&DiagnosticRequest::new("clean_and_jerk")).unwrap_err();
    assert_eq!(unknown, DiagnosticError::unknown_lift("clean_and_jerk"));
    assert_eq!(AppError::from(unknown).code, ErrorCode::UnknownLift);

    let invalid = engine
        .compute(
            &DiagnosticRequest::new("squat").with_snapshot(SnapshotInput::new("squat", -100.0, 5)),
        )
        .unwrap_err();
    let app_error = AppError::from(invalid);
    assert_eq!(app_error.code, ErrorCode::InvalidSnapshot);
    assert_eq!(app_error.details["exercise_id"], "squat");
}

#[test]
fn test_replacement_catalog_is_stamped() {
    let mut catalog = LiftCatalog::builtin();
    catalog.version = "lift-config-test".to_owned();
    catalog.lifts.retain(|lift| lift.lift_id == "squat");

    let engine = DiagnosticEngine::with_defaults().with_catalog(Arc::new(catalog));
    let signals = engine.compute(&DiagnosticRequest::new("squat")).unwrap();
    assert_eq!(signals.lift_config_version, "lift-config-test");
    assert!(engine.compute(&DiagnosticRequest::new("bench_press")).is_err());
}
