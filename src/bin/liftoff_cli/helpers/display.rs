// ABOUTME: Output formatting helpers for liftoff-cli
// ABOUTME: Prints JSON results to stdout and renders catalog entries as plain text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use liftoff_core::errors::AppResult;
use liftoff_intelligence::catalog::LiftDefinition;
use serde::Serialize;

/// Print `value` as JSON on stdout
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> AppResult<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

/// Render one lift: phases in rep order, then indices with their proxies
pub fn print_lift(lift: &LiftDefinition) {
    println!();
    println!("{} ({})", lift.name, lift.lift_id);
    println!("{}", "=".repeat(50));
    println!("   Primary exercise: {}", lift.primary_exercise_id);

    println!("   Phases:");
    for phase in &lift.phases {
        let marker = if phase.phase_id == lift.default_phase {
            " (default)"
        } else {
            ""
        };
        println!("     {}{marker}: {}", phase.phase_id, phase.description);
    }

    println!("   Strength indices:");
    for index in &lift.indices {
        let proxies: Vec<String> = index
            .proxies
            .iter()
            .map(|proxy| format!("{} x{:.2}", proxy.exercise_id, proxy.expected_ratio))
            .collect();
        println!(
            "     {} [{}]: {}",
            index.key,
            index.criticality.as_str(),
            proxies.join(", ")
        );
    }
}
