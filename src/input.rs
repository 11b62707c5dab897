// ABOUTME: JSON diagnosis input document used by the CLI and batch callers
// ABOUTME: Normalizes kilogram loads to pounds and runs free-text notes through the flag classifier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use std::fs;
use std::path::Path;

use liftoff_core::errors::{AppError, AppResult};
use liftoff_core::models::{Equipment, SessionFlags, SnapshotInput, TrainingAge, WeightUnit};
use liftoff_intelligence::DiagnosticRequest;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::flag_classifier::FlagClassifier;
use crate::session::InterviewSession;

/// Diagnosis input as written by a user.
///
/// Loads (`snapshots[].weight` and `bodyweight`) are in `unit`. The document
/// is one batch: when an exercise is listed twice, the stronger top set is
/// used. Explicit `flags` are applied first; `notes` can only add to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisInput {
    /// Lift under diagnosis
    pub lift_id: String,
    /// Exercise treated as the primary lift; empty means the catalog default
    #[serde(default)]
    pub primary_exercise_id: String,
    /// Unit for every load in this document
    #[serde(default)]
    pub unit: WeightUnit,
    /// Reported top sets
    #[serde(default)]
    pub snapshots: Vec<SnapshotInput>,
    /// Flags answered directly
    #[serde(default)]
    pub flags: SessionFlags,
    /// Free-text interview answers
    #[serde(default)]
    pub notes: Vec<String>,
    /// Bodyweight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bodyweight: Option<f64>,
    /// Training age
    #[serde(default)]
    pub training_age: TrainingAge,
    /// Equipment access
    #[serde(default)]
    pub equipment: Equipment,
}

impl DiagnosisInput {
    /// Parse an input document
    ///
    /// # Errors
    ///
    /// Returns a `SerializationError` if the JSON does not match the document shape
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse an input document from disk
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error if the file cannot be read, or a
    /// `SerializationError` if it is not a valid document
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::invalid_input(format!("Cannot read input file {}", path.display()))
                .with_source(e)
        })?;
        debug!(path = %path.display(), bytes = contents.len(), "Loaded diagnosis input");
        Self::from_json(&contents)
    }

    /// Replay the document into an interview session
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error if the bodyweight is not a positive number
    pub fn into_session(self, classifier: FlagClassifier) -> AppResult<InterviewSession> {
        let mut session = InterviewSession::new(self.lift_id, classifier);
        session.set_primary_exercise(self.primary_exercise_id);
        for snapshot in self.snapshots {
            session.record_batch_snapshot_in(snapshot, self.unit);
        }
        for flag in self.flags.active() {
            session.set_flag(flag, true);
        }
        for note in self.notes {
            session.record_message(note);
        }
        if let Some(bodyweight) = self.bodyweight {
            session.set_bodyweight_in(bodyweight, self.unit)?;
        }
        session.set_training_age(self.training_age);
        session.set_equipment(self.equipment);
        Ok(session)
    }

    /// Engine request for this document
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error if the bodyweight is not a positive number
    pub fn into_request(self, classifier: FlagClassifier) -> AppResult<DiagnosticRequest> {
        Ok(self.into_session(classifier)?.request())
    }
}
