// ABOUTME: Configuration error types for diagnostics config and catalog validation
// ABOUTME: Defines error variants for invalid ranges, parse failures, and malformed catalogs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

//! Configuration error types for diagnostics validation.

use liftoff_core::errors::{AppError, ErrorCode};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value outside acceptable range
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Failed to parse configuration value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),

    /// Lift catalog document failed to parse
    #[error("Catalog parse error: {0}")]
    CatalogParse(#[from] serde_json::Error),

    /// Lift catalog references something it does not define
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let code = match &error {
            ConfigError::Parse(_) | ConfigError::CatalogParse(_) => ErrorCode::ConfigError,
            ConfigError::InvalidRange(_)
            | ConfigError::ValueOutOfRange(_)
            | ConfigError::InvalidCatalog(_) => ErrorCode::ConfigInvalid,
        };
        Self::new(code, error.to_string())
    }
}
