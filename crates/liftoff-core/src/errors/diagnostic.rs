// ABOUTME: Engine-level error types for diagnostic signal computation
// ABOUTME: Covers unknown lifts and invalid snapshots, with conversion into AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use super::{AppError, ErrorCode};

/// Errors that abort a diagnostic computation.
///
/// Sparse data is never an error: missing proxies, empty phase signal, and
/// unevidenced hypotheses are encoded in the returned signals instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DiagnosticError {
    /// The lift id has no catalog entry
    #[error("Lift '{lift_id}' is not in the catalog")]
    UnknownLift {
        /// Requested lift id
        lift_id: String,
    },

    /// A snapshot carried a non-positive or non-finite value
    #[error("Invalid snapshot for '{exercise_id}': {reason}")]
    InvalidSnapshot {
        /// Exercise the snapshot belongs to
        exercise_id: String,
        /// Which field was rejected and why
        reason: String,
    },

    /// A single (weight, reps) pair could not be estimated
    #[error("Invalid estimator input: {reason}")]
    InvalidInput {
        /// Which value was rejected
        reason: String,
    },
}

impl DiagnosticError {
    /// Create an "unknown lift" error
    #[must_use]
    pub fn unknown_lift(lift_id: impl Into<String>) -> Self {
        Self::UnknownLift {
            lift_id: lift_id.into(),
        }
    }

    /// Create an "invalid snapshot" error
    #[must_use]
    pub fn invalid_snapshot(exercise_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            exercise_id: exercise_id.into(),
            reason: reason.into(),
        }
    }

    /// Create an "invalid input" error
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Error code this failure maps to
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownLift { .. } => ErrorCode::UnknownLift,
            Self::InvalidSnapshot { .. } => ErrorCode::InvalidSnapshot,
            Self::InvalidInput { .. } => ErrorCode::InvalidInput,
        }
    }
}

impl From<DiagnosticError> for AppError {
    fn from(error: DiagnosticError) -> Self {
        let details = match &error {
            DiagnosticError::UnknownLift { lift_id } => serde_json::json!({ "lift_id": lift_id }),
            DiagnosticError::InvalidSnapshot { exercise_id, reason } => {
                serde_json::json!({ "exercise_id": exercise_id, "reason": reason })
            }
            DiagnosticError::InvalidInput { reason } => serde_json::json!({ "reason": reason }),
        };
        Self::new(error.code(), error.to_string()).with_details(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_snapshot_converts_with_details() {
        let error = DiagnosticError::invalid_snapshot("squat", "reps must be at least 1");
        let app_error = AppError::from(error);

        assert_eq!(app_error.code, ErrorCode::InvalidSnapshot);
        assert_eq!(app_error.details["exercise_id"], "squat");
        assert!(app_error.message.contains("reps must be at least 1"));
    }

    #[test]
    fn test_unknown_lift_message() {
        let error = DiagnosticError::unknown_lift("snatch");
        assert_eq!(error.to_string(), "Lift 'snatch' is not in the catalog");
        assert_eq!(error.code(), ErrorCode::UnknownLift);
    }
}
