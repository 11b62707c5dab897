// ABOUTME: Core types and constants for the LiftOff diagnostic signals engine
// ABOUTME: Foundation crate with error handling, session models, and versioned constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

#![deny(unsafe_code)]

//! # LiftOff Core
//!
//! Foundation crate providing shared types for the LiftOff diagnostic signals
//! engine. It changes infrequently so the engine and the outer glue can compile
//! against a stable set of models.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DiagnosticError`
//! - **constants**: Version stamps, rep limits, and unit conversions
//! - **models**: Snapshot inputs, session context, and the `DiagnosticSignals` aggregate

/// Unified error handling system with standard error codes
pub mod errors;

/// Version stamps and policy constants organized by domain
pub mod constants;

/// Input snapshots, session context, and computed signal models
pub mod models;
