// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Version stamps, rep-range limits, and unit conversions for diagnostic signals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

//! Constants module
//!
//! Constants are grouped by domain. Version stamps are constants rather than
//! wall-clock derived so that identical inputs always serialize identically.

/// Version stamps carried in every `DiagnosticSignals`
pub mod versions {
    /// Schema version of the `DiagnosticSignals` aggregate
    pub const SIGNALS_VERSION: &str = "diagnostic-signals.v1";
    /// Version of the built-in lift catalog tables
    pub const LIFT_CONFIG_VERSION: &str = "lift-catalog.2025.1";
}

/// Rep-range limits for one-rep-max estimation
pub mod reps {
    /// Rep counts above this lose reliability and are clamped
    pub const MAX_RELIABLE_REPS: u32 = 10;
    /// Upper bound of the high-confidence rep band
    pub const HIGH_CONFIDENCE_MAX_REPS: u32 = 3;
    /// Upper bound of the moderate-confidence rep band
    pub const MODERATE_CONFIDENCE_MAX_REPS: u32 = 6;
}

/// Unit conversion constants
pub mod units {
    /// Pounds per kilogram
    pub const LBS_PER_KG: f64 = 2.204_622_621_8;
}

/// Rounding helpers shared by every stage so published numbers stay stable
pub mod precision {
    /// Round to one decimal place
    #[must_use]
    pub fn round1(value: f64) -> f64 {
        (value * 10.0).round() / 10.0
    }

    /// Round to two decimal places
    #[must_use]
    pub fn round2(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }

    /// Round to three decimal places
    #[must_use]
    pub fn round3(value: f64) -> f64 {
        (value * 1000.0).round() / 1000.0
    }
}

/// Service identifiers used in structured logging
pub mod service_names {
    /// Name of the diagnostics service
    pub const LIFTOFF_DIAGNOSTICS: &str = "liftoff-diagnostics";
}
