// ABOUTME: Strength performance snapshot model for a single exercise
// ABOUTME: Carries weight in pounds, reps, and sets, with kilogram normalization helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use serde::{Deserialize, Serialize};

use crate::constants::units::LBS_PER_KG;

/// One reported top set for an exercise.
///
/// Weight is always pounds by the time it reaches the engine; use
/// [`WeightUnit::to_lbs`] when accepting user-reported kilograms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotInput {
    /// Catalog exercise id (e.g. `close_grip_bench`)
    pub exercise_id: String,
    /// Load in pounds
    pub weight: f64,
    /// Completed repetitions
    pub reps: u32,
    /// Number of sets performed at this load
    #[serde(default = "default_sets")]
    pub sets: u32,
}

const fn default_sets() -> u32 {
    1
}

impl SnapshotInput {
    /// Create a single-set snapshot
    #[must_use]
    pub fn new(exercise_id: impl Into<String>, weight: f64, reps: u32) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            weight,
            reps,
            sets: 1,
        }
    }

    /// Set the number of sets performed
    #[must_use]
    pub const fn with_sets(mut self, sets: u32) -> Self {
        self.sets = sets;
        self
    }

    /// Describe the first field that makes this snapshot unusable, if any
    #[must_use]
    pub fn validation_issue(&self) -> Option<&'static str> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            Some("weight must be a positive number")
        } else if self.reps == 0 {
            Some("reps must be at least 1")
        } else if self.sets == 0 {
            Some("sets must be at least 1")
        } else {
            None
        }
    }
}

/// Unit a user reported a load in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    /// Pounds
    #[default]
    Lbs,
    /// Kilograms
    Kg,
}

impl WeightUnit {
    /// Convert a load in this unit to pounds
    #[must_use]
    pub fn to_lbs(self, value: f64) -> f64 {
        match self {
            Self::Lbs => value,
            Self::Kg => value * LBS_PER_KG,
        }
    }

    /// Parse from a loose user-facing string
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lb" | "lbs" | "pound" | "pounds" => Some(Self::Lbs),
            "kg" | "kgs" | "kilo" | "kilos" | "kilogram" | "kilograms" => Some(Self::Kg),
            _ => None,
        }
    }
}
