// ABOUTME: Re-exports helper modules for liftoff-cli
// ABOUTME: Provides catalog loading, command-line overrides, and output formatting utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

pub mod catalog_source;
pub mod display;
pub mod overrides;
