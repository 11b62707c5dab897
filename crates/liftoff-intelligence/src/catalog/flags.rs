// ABOUTME: Known interview flags and the plain descriptions cited in hypothesis evidence
// ABOUTME: Shared by every lift in the built-in catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use super::FlagDefinition;

const KNOWN_FLAGS: &[(&str, &str)] = &[
    // bench press
    ("hard_off_chest", "the bar is hardest to move just off the chest"),
    ("bar_stalls_mid", "the bar stalls halfway up"),
    ("elbows_flare_early", "elbows flare early in the press"),
    ("loses_arch", "the arch and upper-back set-up collapse under load"),
    // squat
    ("hard_out_of_hole", "the rep is hardest coming out of the hole"),
    ("knees_cave", "knees cave inward on the way up"),
    ("chest_falls_forward", "the chest falls forward out of the bottom"),
    ("heels_rise", "heels come off the floor at depth"),
    // deadlift
    ("slow_off_floor", "the bar is slow to break the floor"),
    ("stalls_at_knees", "the bar stalls at or just below the knees"),
    ("grip_limiting", "grip gives out before the pull does"),
    // shared
    ("hard_lockout", "the rep is hardest at lockout"),
    ("bar_drifts_forward", "the bar drifts forward of the ideal path"),
    ("pause_sensitive", "paused reps are much weaker than touch-and-go"),
    ("hips_shoot_up", "hips rise faster than the shoulders"),
    ("back_rounds", "the upper back rounds under load"),
    ("loses_bracing", "bracing is lost during the rep"),
    ("mobility_restricted", "range of motion feels restricted"),
    ("inconsistent_technique", "technique changes noticeably from rep to rep"),
    ("fatigue_accumulated", "accumulated fatigue is dragging performance down"),
    ("low_top_set_exposure", "heavy top sets are rarely practised"),
];

/// Every flag the built-in catalog knows about
pub(super) fn known_flags() -> Vec<FlagDefinition> {
    KNOWN_FLAGS
        .iter()
        .map(|(flag, description)| FlagDefinition {
            flag: (*flag).to_owned(),
            description: (*description).to_owned(),
        })
        .collect()
}
