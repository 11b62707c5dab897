// ABOUTME: Main library entry point for the LiftOff lift diagnostics toolkit
// ABOUTME: Wires the diagnostic engine to free-text flag classification, interview sessions, and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # LiftOff
//!
//! Deterministic diagnostics for the bench press, squat, and deadlift. A coach
//! (human or LLM) interviews a lifter, and this crate turns the answers into a
//! structured, reproducible `DiagnosticSignals` payload: estimated maxes,
//! strength indices, the likely sticking phase, ranked hypotheses, an
//! efficiency score, one validation test, and the next questions worth asking.
//!
//! ## Architecture
//!
//! - **`liftoff-core`**: Errors, constants, and data models
//! - **`liftoff-intelligence`**: The lift catalog, policy config, and the pure engine
//! - **`flag_classifier`**: Free-text answers to interview flags
//! - **`session`**: Turn-by-turn interview state
//! - **`input`**: JSON input documents for the CLI
//! - **`logging`**: `tracing` subscriber setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use liftoff::flag_classifier::FlagClassifier;
//! use liftoff::session::InterviewSession;
//! use liftoff_core::errors::AppResult;
//! use liftoff_core::models::SnapshotInput;
//! use liftoff_intelligence::DiagnosticEngine;
//!
//! fn main() -> AppResult<()> {
//!     let engine = DiagnosticEngine::from_environment();
//!     let mut session = InterviewSession::new("bench_press", FlagClassifier::builtin());
//!     session.record_snapshot(SnapshotInput::new("bench_press", 225.0, 5));
//!     session.record_message("My elbows flare as soon as it leaves my chest");
//!
//!     let signals = session.diagnose(&engine)?;
//!     println!("Primary phase: {}", signals.primary_phase);
//!     Ok(())
//! }
//! ```

/// Rule-based free-text to flag classification
pub mod flag_classifier;

/// JSON input documents for the CLI
pub mod input;

/// Structured logging configuration
pub mod logging;

/// Interview session state
pub mod session;

pub use flag_classifier::{FlagClassifier, FlagMatch, FlagPattern};
pub use input::DiagnosisInput;
pub use session::InterviewSession;
