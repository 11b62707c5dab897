// ABOUTME: Core data models for lift diagnostics
// ABOUTME: Re-exports snapshot inputs, session context, and computed signal types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

//! # Data Models
//!
//! - **Inputs**: `SnapshotInput`, `SessionFlags`, `TrainingAge`, `Equipment`
//! - **Outputs**: `DiagnosticSignals` and its parts (`E1rmEstimate`, `IndexScore`,
//!   `PhaseScore`, `HypothesisSignal`, `DominanceArchetype`, `EfficiencyScore`,
//!   `ValidationTest`, `DataGap`)
//!
//! Every output collection is either a `Vec` in a documented order or a
//! `BTreeMap`, so serializing the same signals twice yields identical bytes.

mod context;
mod signals;
mod snapshot;

pub use context::{Equipment, SessionFlags, TrainingAge};
pub use signals::{
    DataGap, Deduction, DiagnosticSignals, DominanceArchetype, E1rmEstimate, EfficiencyScore,
    GapSeverity, HypothesisCategory, HypothesisSignal, IndexKey, IndexScore, PhaseScore,
    ValidationTest,
};
pub use snapshot::{SnapshotInput, WeightUnit};
