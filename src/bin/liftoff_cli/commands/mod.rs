// ABOUTME: Re-exports command modules for liftoff-cli
// ABOUTME: Provides the diagnose, classify, and catalog subcommands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

pub mod catalog;
pub mod classify;
pub mod diagnose;
