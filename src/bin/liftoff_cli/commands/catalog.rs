// ABOUTME: Catalog command for liftoff-cli
// ABOUTME: Lists supported lifts with their phases and proxy exercises, as text or JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use std::path::Path;

use liftoff_core::errors::{AppError, AppResult};
use liftoff_intelligence::catalog::LiftDefinition;

use crate::helpers::{catalog_source, display};

type Result<T> = AppResult<T>;

/// Print the catalog, or one lift of it
pub fn run(lift_id: Option<&str>, catalog: Option<&Path>, json: bool) -> Result<()> {
    let catalog = catalog_source::load(catalog)?;
    let lifts: Vec<&LiftDefinition> = match lift_id {
        Some(id) => vec![catalog.lift(id).ok_or_else(|| {
            AppError::invalid_input(format!(
                "Unknown lift '{id}'; expected one of: {}",
                catalog.lift_ids().collect::<Vec<_>>().join(", ")
            ))
        })?],
        None => catalog.lifts.iter().collect(),
    };

    if json {
        return display::print_json(&lifts, true);
    }

    println!("Lift catalog {}", catalog.version);
    for lift in lifts {
        display::print_lift(lift);
    }
    Ok(())
}
