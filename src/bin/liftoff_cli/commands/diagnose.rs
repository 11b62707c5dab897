// ABOUTME: Diagnose command for liftoff-cli
// ABOUTME: Loads an input document, runs the engine, and prints DiagnosticSignals as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use std::path::Path;

use liftoff::flag_classifier::FlagClassifier;
use liftoff::input::DiagnosisInput;
use liftoff_core::errors::AppResult;
use liftoff_intelligence::DiagnosticEngine;
use tracing::info;

use crate::helpers::overrides::ContextOverrides;
use crate::helpers::{catalog_source, display};

type Result<T> = AppResult<T>;

/// Diagnose the document at `input` with any command-line context applied
pub fn run(
    input: &Path,
    catalog: Option<&Path>,
    overrides: ContextOverrides,
    pretty: bool,
) -> Result<()> {
    let engine = DiagnosticEngine::from_environment().with_catalog(catalog_source::load(catalog)?);
    let mut document = DiagnosisInput::load(input)?;
    overrides.apply(&mut document);
    info!(lift_id = %document.lift_id, notes = document.notes.len(), "Diagnosing input document");

    let session = document.into_session(FlagClassifier::builtin())?;
    let signals = session.diagnose(&engine)?;
    display::print_json(&signals, pretty)
}
