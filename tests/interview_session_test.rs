// ABOUTME: Integration tests for turn-by-turn interview sessions
// ABOUTME: Validates snapshot replacement, answer classification, and recomputed diagnoses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use liftoff::flag_classifier::FlagClassifier;
use liftoff::session::InterviewSession;
use liftoff_core::errors::ErrorCode;
use liftoff_core::models::{Equipment, IndexKey, SnapshotInput, TrainingAge, WeightUnit};
use liftoff_intelligence::DiagnosticEngine;

#[test]
fn test_diagnosis_sharpens_as_the_interview_goes_on() {
    let engine = DiagnosticEngine::with_defaults();
    let mut session = InterviewSession::new("bench_press", FlagClassifier::builtin());

    session.record_snapshot(SnapshotInput::new("bench_press", 225.0, 5));
    let first = session.diagnose(&engine).unwrap();
    assert!(first.hypotheses.is_empty());
    assert!(first.gap("triceps_index").is_some());
    assert!(first.gap("sticking_point").is_some());

    session.record_snapshot(SnapshotInput::new("close_grip_bench", 185.0, 5));
    let matched = session.record_message("My elbows flare early and the lockout is slow");
    assert_eq!(matched, ["hard_lockout", "elbows_flare_early"]);

    let second = session.diagnose(&engine).unwrap();
    assert!(second.index(IndexKey::Triceps).is_some());
    assert!(second.gap("sticking_point").is_none());
    assert!(!second.hypotheses.is_empty());
    assert_eq!(second.validation_test.hypothesis_tested, second.hypotheses[0].key);
}

#[test]
fn test_retested_lift_replaces_the_old_estimate() {
    let engine = DiagnosticEngine::with_defaults();
    let mut session = InterviewSession::new("squat", FlagClassifier::builtin());
    session.record_snapshot(SnapshotInput::new("squat", 315.0, 8));
    session.record_snapshot(SnapshotInput::new("squat", 365.0, 2));

    let signals = session.diagnose(&engine).unwrap();
    assert_eq!(signals.e1rms["squat"].reps_used, 2);
}

#[test]
fn test_context_flows_into_the_result() {
    let engine = DiagnosticEngine::with_defaults();
    let mut session = InterviewSession::new("deadlift", FlagClassifier::builtin());
    session.record_snapshot(SnapshotInput::new("deadlift", WeightUnit::Kg.to_lbs(200.0), 1));
    session.set_bodyweight_in(80.0, WeightUnit::Kg).unwrap();
    session.set_training_age(TrainingAge::Advanced);
    session.set_equipment(Equipment::Home);

    let signals = session.diagnose(&engine).unwrap();
    assert_eq!(signals.training_age, TrainingAge::Advanced);
    assert_eq!(signals.equipment, Equipment::Home);
    assert_eq!(signals.relative_strength, Some(2.5));
}

#[test]
fn test_unknown_lift_surfaces_as_app_error() {
    let engine = DiagnosticEngine::with_defaults();
    let session = InterviewSession::new("overhead_press", FlagClassifier::builtin());
    let err = session.diagnose(&engine).unwrap_err();
    assert_eq!(err.code, ErrorCode::UnknownLift);
    assert_eq!(err.details["lift_id"], "overhead_press");
}
