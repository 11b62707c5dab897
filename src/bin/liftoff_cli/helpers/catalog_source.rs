// ABOUTME: Resolves the lift catalog for a CLI invocation
// ABOUTME: Uses the built-in catalog unless a replacement JSON file is given
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use std::fs;
use std::path::Path;
use std::sync::Arc;

use liftoff_core::errors::{AppError, AppResult};
use liftoff_intelligence::LiftCatalog;
use tracing::info;

type Result<T> = AppResult<T>;

/// Built-in catalog, or the validated catalog stored at `path`
pub fn load(path: Option<&Path>) -> Result<Arc<LiftCatalog>> {
    let Some(path) = path else {
        return Ok(Arc::new(LiftCatalog::builtin()));
    };
    let contents = fs::read_to_string(path).map_err(|e| {
        AppError::invalid_input(format!("Cannot read catalog file {}", path.display()))
            .with_source(e)
    })?;
    let catalog = LiftCatalog::from_json(&contents)?;
    info!(
        path = %path.display(),
        version = %catalog.version,
        lifts = catalog.lifts.len(),
        "Loaded replacement catalog"
    );
    Ok(Arc::new(catalog))
}
