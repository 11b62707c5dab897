// ABOUTME: Deterministic diagnostic signals engine for squat, bench press, and deadlift
// ABOUTME: Turns top-set snapshots and interview flags into indices, phases, hypotheses, and gaps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

#![deny(unsafe_code)]

//! # LiftOff Intelligence
//!
//! The diagnostic pipeline, leaf-first:
//!
//! - **catalog**: Versioned lift definitions (phases, proxies, rules, tests)
//! - **e1rm**: Brzycki one-rep-max estimates with confidence bands
//! - **`strength_index`**: Proxy e1RMs relative to the primary lift
//! - **`phase_scorer`**: Sticking-point phase from flag rules
//! - **`hypothesis_ranker`**: Evidenced, ranked root-cause candidates
//! - **archetype** / **efficiency**: Imbalance label and itemized efficiency score
//! - **`validation_test`**: One confirmatory test for the next session
//! - **`data_gaps`**: What to ask about next
//! - **engine**: Orchestrates the stages into a `DiagnosticSignals`
//!
//! Every stage is a pure function of its inputs. The engine holds its catalog
//! and config in `Arc` and is `Send + Sync`.

/// Dominance archetype from index imbalance
pub mod archetype;
/// Lift catalog reference data
pub mod catalog;
/// Scoring policy configuration
pub mod config;
/// Missing-input detection
pub mod data_gaps;
/// e1RM estimation
pub mod e1rm;
/// Technical efficiency scoring
pub mod efficiency;
/// Pipeline orchestration
pub mod engine;
/// Hypothesis scoring and ranking
pub mod hypothesis_ranker;
/// Sticking-point phase scoring
pub mod phase_scorer;
/// Strength index calculation
pub mod strength_index;

pub use catalog::LiftCatalog;
pub use config::{ConfigError, DiagnosticsConfig};
pub use engine::{compute_diagnostic_signals, DiagnosticEngine, DiagnosticRequest};
