// ABOUTME: Classify command for liftoff-cli
// ABOUTME: Prints the interview flags a free-text answer produces, with matched spans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use liftoff::flag_classifier::FlagClassifier;
use liftoff::logging::DiagnosticLogger;
use liftoff_core::errors::AppResult;

use crate::helpers::display;

type Result<T> = AppResult<T>;

/// Classify `text` with the built-in pattern table
pub fn run(text: &str, pretty: bool) -> Result<()> {
    let matches = FlagClassifier::builtin().classify(text);
    let flags: Vec<&str> = matches.iter().map(|found| found.flag.as_str()).collect();
    DiagnosticLogger::log_classification("cli", &flags);
    display::print_json(&matches, pretty)
}
