// ABOUTME: LiftOff CLI - command-line front end for the lift diagnostic signals engine
// ABOUTME: Diagnoses JSON input documents, classifies free text into flags, and lists the lift catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics
//!
//! Usage:
//! ```bash
//! # Diagnose a lifter from an input document
//! liftoff-cli diagnose --input lifter.json --pretty
//!
//! # Override the document's context
//! liftoff-cli diagnose --input lifter.json --training-age advanced --equipment home
//!
//! # Diagnose against a replacement catalog
//! liftoff-cli diagnose --input lifter.json --catalog my_catalog.json
//!
//! # See which flags a free-text answer produces
//! liftoff-cli classify --text "my elbows flare and it stalls halfway up"
//!
//! # List lifts, phases, and proxy exercises
//! liftoff-cli catalog
//! liftoff-cli catalog --lift squat --json
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use liftoff::logging::LoggingConfig;
use liftoff_core::errors::{AppError, AppResult};
use liftoff_core::models::{Equipment, TrainingAge, WeightUnit};

use crate::helpers::overrides::{parse_equipment, parse_training_age, parse_unit, ContextOverrides};

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "liftoff-cli",
    about = "LiftOff lift diagnostics CLI",
    long_about = "Deterministic bench press, squat, and deadlift diagnostics from top sets and interview answers."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Compute diagnostic signals for an input document
    Diagnose {
        /// Path to the JSON input document
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Replacement lift catalog (JSON)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Training age, replacing the document's value
        #[arg(long, value_parser = parse_training_age)]
        training_age: Option<TrainingAge>,

        /// Equipment access, replacing the document's value
        #[arg(long, value_parser = parse_equipment)]
        equipment: Option<Equipment>,

        /// Unit for every load in the document (lbs or kg)
        #[arg(long, value_parser = parse_unit)]
        unit: Option<WeightUnit>,
    },

    /// Classify free text into interview flags
    Classify {
        /// Text to classify
        #[arg(long, short = 't')]
        text: String,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// List lifts, phases, and proxy exercises
    Catalog {
        /// Only show this lift
        #[arg(long)]
        lift: Option<String>,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,

        /// Replacement lift catalog (JSON)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the JSON result
    LoggingConfig::for_cli(cli.verbose)
        .init()
        .map_err(|e| AppError::internal(format!("Failed to initialize logging: {e}")))?;

    match cli.command {
        Command::Diagnose {
            input,
            pretty,
            catalog,
            training_age,
            equipment,
            unit,
        } => {
            let overrides = ContextOverrides {
                training_age,
                equipment,
                unit,
            };
            commands::diagnose::run(&input, catalog.as_deref(), overrides, pretty)
        }
        Command::Classify { text, pretty } => commands::classify::run(&text, pretty),
        Command::Catalog {
            lift,
            json,
            catalog,
        } => commands::catalog::run(lift.as_deref(), catalog.as_deref(), json),
    }
}
