// ABOUTME: Interview session accumulating snapshots, answers, and lifter context across turns
// ABOUTME: Classifies free-text answers into flags and recomputes signals through a supplied engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

//! Interview Session
//!
//! Holds everything the interviewer has learned so far. Each turn may add a
//! snapshot, a free-text answer, or a piece of context, and the caller then
//! recomputes the diagnosis with [`InterviewSession::diagnose`]. Computation is
//! pure, so recomputing after every turn is the intended usage.

use std::mem;

use liftoff_core::errors::{AppError, AppResult};
use liftoff_core::models::{
    DiagnosticSignals, Equipment, SessionFlags, SnapshotInput, TrainingAge, WeightUnit,
};
use liftoff_intelligence::e1rm::outranks;
use liftoff_intelligence::{DiagnosticEngine, DiagnosticRequest};
use tracing::debug;

use crate::flag_classifier::FlagClassifier;
use crate::logging::DiagnosticLogger;

/// State of one lifter interview
#[derive(Debug, Clone)]
pub struct InterviewSession {
    lift_id: String,
    primary_exercise_id: String,
    snapshots: Vec<SnapshotInput>,
    messages: Vec<String>,
    flags: SessionFlags,
    bodyweight_lbs: Option<f64>,
    training_age: TrainingAge,
    equipment: Equipment,
    classifier: FlagClassifier,
}

impl InterviewSession {
    /// Start an interview about `lift_id`, classifying answers with `classifier`
    #[must_use]
    pub fn new(lift_id: impl Into<String>, classifier: FlagClassifier) -> Self {
        Self {
            lift_id: lift_id.into(),
            primary_exercise_id: String::new(),
            snapshots: Vec::new(),
            messages: Vec::new(),
            flags: SessionFlags::new(),
            bodyweight_lbs: None,
            training_age: TrainingAge::default(),
            equipment: Equipment::default(),
            classifier,
        }
    }

    /// Lift under diagnosis
    #[must_use]
    pub fn lift_id(&self) -> &str {
        &self.lift_id
    }

    /// Override the exercise treated as the primary lift
    pub fn set_primary_exercise(&mut self, exercise_id: impl Into<String>) {
        self.primary_exercise_id = exercise_id.into();
    }

    /// Record a top set; returns the entry it replaced for the same exercise
    pub fn record_snapshot(&mut self, snapshot: SnapshotInput) -> Option<SnapshotInput> {
        if let Some(existing) = self
            .snapshots
            .iter_mut()
            .find(|existing| existing.exercise_id == snapshot.exercise_id)
        {
            debug!(exercise_id = %snapshot.exercise_id, "Replacing earlier snapshot");
            return Some(mem::replace(existing, snapshot));
        }
        self.snapshots.push(snapshot);
        None
    }

    /// Record a top set reported in `unit` alongside others from the same batch.
    ///
    /// Unlike [`Self::record_snapshot`], an earlier entry for the exercise is
    /// kept when it is the stronger set. Returns whether `snapshot` was kept.
    pub fn record_batch_snapshot_in(
        &mut self,
        mut snapshot: SnapshotInput,
        unit: WeightUnit,
    ) -> bool {
        snapshot.weight = unit.to_lbs(snapshot.weight);
        match self
            .snapshots
            .iter_mut()
            .find(|existing| existing.exercise_id == snapshot.exercise_id)
        {
            Some(existing) if outranks(&snapshot, existing) => {
                debug!(
                    exercise_id = %snapshot.exercise_id,
                    "Batch snapshot outranks earlier entry"
                );
                *existing = snapshot;
                true
            }
            Some(_) => false,
            None => {
                self.snapshots.push(snapshot);
                true
            }
        }
    }

    /// Record a free-text answer; returns the flags it matched
    pub fn record_message(&mut self, text: impl Into<String>) -> Vec<String> {
        let text = text.into();
        let matched = self.classifier.apply(&text, &mut self.flags);
        let names: Vec<&str> = matched.iter().map(String::as_str).collect();
        DiagnosticLogger::log_classification("interview", &names);
        self.messages.push(text);
        matched
    }

    /// Answer a yes/no question directly; unlike classification this can clear a flag
    pub fn set_flag(&mut self, flag: impl Into<String>, value: bool) {
        self.flags.set(flag, value);
    }

    /// Record bodyweight in pounds
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error if the value is not a positive number
    pub fn set_bodyweight(&mut self, bodyweight_lbs: f64) -> AppResult<()> {
        if !bodyweight_lbs.is_finite() || bodyweight_lbs <= 0.0 {
            return Err(AppError::invalid_input("bodyweight must be a positive number")
                .with_details(serde_json::json!({ "bodyweight": bodyweight_lbs })));
        }
        self.bodyweight_lbs = Some(bodyweight_lbs);
        Ok(())
    }

    /// Record bodyweight reported in `unit`
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error if the value is not a positive number
    pub fn set_bodyweight_in(&mut self, bodyweight: f64, unit: WeightUnit) -> AppResult<()> {
        self.set_bodyweight(unit.to_lbs(bodyweight))
    }

    /// Record training age
    pub fn set_training_age(&mut self, training_age: TrainingAge) {
        self.training_age = training_age;
    }

    /// Record equipment access
    pub fn set_equipment(&mut self, equipment: Equipment) {
        self.equipment = equipment;
    }

    /// Snapshots recorded so far, one per exercise
    #[must_use]
    pub fn snapshots(&self) -> &[SnapshotInput] {
        &self.snapshots
    }

    /// Free-text answers in the order received
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Flags gathered so far
    #[must_use]
    pub const fn flags(&self) -> &SessionFlags {
        &self.flags
    }

    /// Engine request reflecting the current state
    #[must_use]
    pub fn request(&self) -> DiagnosticRequest {
        DiagnosticRequest {
            lift_id: self.lift_id.clone(),
            primary_exercise_id: self.primary_exercise_id.clone(),
            snapshots: self.snapshots.clone(),
            flags: self.flags.clone(),
            bodyweight_lbs: self.bodyweight_lbs,
            training_age: self.training_age,
            equipment: self.equipment,
        }
    }

    /// Recompute the diagnosis from everything recorded so far
    ///
    /// # Errors
    ///
    /// Returns an `UnknownLift` or `InvalidSnapshot` error from the engine
    pub fn diagnose(&self, engine: &DiagnosticEngine) -> AppResult<DiagnosticSignals> {
        let signals = engine.compute(&self.request())?;
        DiagnosticLogger::log_diagnosis(&signals);
        Ok(signals)
    }
}
