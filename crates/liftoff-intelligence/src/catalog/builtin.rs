// ABOUTME: Built-in bench press, squat, and deadlift definitions
// ABOUTME: Proxy ratios, phase rules, limiter taxonomy, deductions, and validation tests per lift
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use liftoff_core::models::{Equipment, GapSeverity, HypothesisCategory, IndexKey};

use super::{
    DeductionRule, HypothesisRule, IndexDefinition, IndexThreshold, LiftDefinition,
    PhaseContribution, PhaseDefinition, PhaseRule, ProxyLift, TestProtocol,
    ValidationTestDefinition,
};

/// Index value below which a paired mechanical fault costs extra efficiency
const SUPPORT_INDEX_FLOOR: f64 = 90.0;

pub(super) fn bench_press() -> LiftDefinition {
    LiftDefinition {
        lift_id: "bench_press".to_owned(),
        name: "Bench Press".to_owned(),
        primary_exercise_id: "bench_press".to_owned(),
        default_phase: "mid_range".to_owned(),
        phases: vec![
            phase("bottom", "Off the chest", "First few inches after the touch"),
            phase("mid_range", "Mid-range", "Halfway up, around the sticking point"),
            phase("lockout", "Lockout", "Final few inches to straight elbows"),
        ],
        indices: vec![
            index(
                IndexKey::Triceps,
                GapSeverity::High,
                vec![
                    proxy("close_grip_bench", 0.88, 1.0),
                    proxy("floor_press", 0.85, 0.8),
                    proxy("jm_press", 0.55, 0.5),
                ],
            ),
            index(
                IndexKey::Shoulder,
                GapSeverity::Medium,
                vec![
                    proxy("overhead_press", 0.62, 1.0),
                    proxy("incline_bench", 0.80, 0.8),
                    proxy("close_grip_bench", 0.88, 0.4),
                ],
            ),
            index(
                IndexKey::BackTension,
                GapSeverity::Low,
                vec![
                    proxy("barbell_row", 0.80, 1.0),
                    proxy("pendlay_row", 0.75, 0.8),
                ],
            ),
        ],
        phase_rules: vec![
            rule("hard_off_chest", &[("bottom", 3)]),
            rule("pause_sensitive", &[("bottom", 2)]),
            rule("loses_arch", &[("bottom", 1), ("mid_range", 1)]),
            rule("bar_stalls_mid", &[("mid_range", 3)]),
            rule("elbows_flare_early", &[("mid_range", 2)]),
            rule("bar_drifts_forward", &[("mid_range", 2)]),
            rule("hard_lockout", &[("lockout", 3)]),
            rule("loses_bracing", &[("bottom", 1)]),
        ],
        hypotheses: vec![
            hypothesis(
                "triceps_weakness",
                "Triceps weakness limiting lockout",
                HypothesisCategory::Muscle,
                Some(IndexKey::Triceps),
                Some("lockout"),
                &["hard_lockout", "elbows_flare_early"],
            ),
            hypothesis(
                "pec_delt_weakness",
                "Pec and front-delt weakness off the chest",
                HypothesisCategory::Muscle,
                Some(IndexKey::Shoulder),
                Some("bottom"),
                &["hard_off_chest", "elbows_flare_early"],
            ),
            hypothesis(
                "bar_path_fault",
                "Bar path drifting away from the strongest line",
                HypothesisCategory::Mechanical,
                None,
                Some("mid_range"),
                &["bar_drifts_forward", "elbows_flare_early"],
            ),
            hypothesis(
                "upper_back_instability",
                "Unstable upper-back platform",
                HypothesisCategory::Stability,
                Some(IndexKey::BackTension),
                Some("bottom"),
                &["loses_arch", "loses_bracing"],
            ),
            hypothesis(
                "shoulder_mobility",
                "Shoulder and thoracic mobility restricting set-up",
                HypothesisCategory::Mobility,
                None,
                None,
                &["mobility_restricted"],
            ),
            technique_consistency(&["inconsistent_technique", "pause_sensitive"]),
            fatigue_programming(),
        ],
        deductions: vec![
            deduction("bar_drifts_forward", 12, "Bar drifts toward the face instead of a J-curve"),
            deduction("elbows_flare_early", 6, "Elbows flare before the bar clears the chest"),
            deduction("pause_sensitive", 8, "Relies on the rebound off the chest"),
            deduction("loses_arch", 8, "Set-up tightness lost during the press"),
            deduction("inconsistent_technique", 10, "Rep-to-rep technique varies"),
            supported_deduction(
                "bar_drifts_forward",
                IndexKey::BackTension,
                5,
                "Weak upper back cannot hold the bar path",
            ),
        ],
        validation_tests: vec![
            test_set(
                HypothesisCategory::Muscle,
                protocol(
                    "Two-board press vs. competition bench comparison",
                    "Work up to a 3RM on the two-board press and compare it with your bench 3RM; a board press more than 10% stronger points to a lockout limiter",
                    Equipment::Commercial,
                ),
                protocol(
                    "Dumbbell floor press vs. dumbbell bench rep-out",
                    "Take the same pair of dumbbells to a technical rep max on the floor press and on the flat bench; a large gap in favour of the floor press points to a lockout limiter",
                    Equipment::Limited,
                ),
            ),
            test_set(
                HypothesisCategory::Mechanical,
                protocol(
                    "Filmed bar-path review with a tempo bench",
                    "Film a 3-1-1 tempo set at 75% from the side and trace the bar end; compare the path with your top set",
                    Equipment::Home,
                ),
                protocol(
                    "Slow-eccentric dumbbell press from the side",
                    "Film a set of dumbbell presses with a three-second lowering and check whether the elbows stay under the wrists",
                    Equipment::Limited,
                ),
            ),
            test_set(
                HypothesisCategory::Stability,
                protocol(
                    "Long-pause bench at 80%",
                    "Bench three singles at 80% with a three-second pause on the chest and note whether the arch or shoulder blades shift",
                    Equipment::Home,
                ),
                protocol(
                    "Paused dumbbell press",
                    "Press a moderate dumbbell pair with a three-second pause at the bottom and note whether the upper back stays pinned",
                    Equipment::Limited,
                ),
            ),
            test_set(
                HypothesisCategory::Mobility,
                protocol(
                    "Shoulder flexion and thoracic extension screen",
                    "Lie on the floor with knees bent and raise straight arms overhead; note whether the hands reach the floor without the ribs flaring",
                    Equipment::Limited,
                ),
                protocol(
                    "Wall angel screen",
                    "Stand with your back on a wall and slide the arms overhead; note where contact is lost",
                    Equipment::Limited,
                ),
            ),
            technique_tests("bench"),
            programming_tests("bench"),
        ],
        baseline_test: baseline("bench"),
    }
}

pub(super) fn squat() -> LiftDefinition {
    LiftDefinition {
        lift_id: "squat".to_owned(),
        name: "Back Squat".to_owned(),
        primary_exercise_id: "squat".to_owned(),
        default_phase: "mid_range".to_owned(),
        phases: vec![
            phase("bottom", "Out of the hole", "From depth to the first few inches of drive"),
            phase("mid_range", "Mid-range", "Thighs around parallel to the sticking point"),
            phase("lockout", "Lockout", "Final hip and knee extension"),
        ],
        indices: vec![
            index(
                IndexKey::Quad,
                GapSeverity::High,
                vec![
                    proxy("front_squat", 0.82, 1.0),
                    proxy("safety_bar_squat", 0.90, 0.7),
                ],
            ),
            index(
                IndexKey::PosteriorChain,
                GapSeverity::High,
                vec![
                    proxy("romanian_deadlift", 0.75, 1.0),
                    proxy("good_morning", 0.50, 0.7),
                    proxy("deadlift", 1.15, 0.5),
                ],
            ),
            index(
                IndexKey::BackTension,
                GapSeverity::Low,
                vec![
                    proxy("barbell_row", 0.55, 1.0),
                    proxy("pendlay_row", 0.52, 0.8),
                ],
            ),
        ],
        phase_rules: vec![
            rule("hard_out_of_hole", &[("bottom", 3)]),
            rule("knees_cave", &[("bottom", 2)]),
            rule("heels_rise", &[("bottom", 1)]),
            rule("pause_sensitive", &[("bottom", 2)]),
            rule("hips_shoot_up", &[("bottom", 1), ("mid_range", 2)]),
            rule("chest_falls_forward", &[("mid_range", 2)]),
            rule("back_rounds", &[("mid_range", 1)]),
            rule("loses_bracing", &[("mid_range", 2)]),
            rule("bar_drifts_forward", &[("mid_range", 1)]),
            rule("hard_lockout", &[("lockout", 3)]),
        ],
        hypotheses: vec![
            hypothesis(
                "quad_weakness",
                "Quad weakness out of the hole",
                HypothesisCategory::Muscle,
                Some(IndexKey::Quad),
                Some("bottom"),
                &["hard_out_of_hole", "hips_shoot_up"],
            ),
            hypothesis(
                "posterior_chain_weakness",
                "Posterior-chain weakness through mid-range",
                HypothesisCategory::Muscle,
                Some(IndexKey::PosteriorChain),
                Some("mid_range"),
                &["chest_falls_forward", "hard_lockout"],
            ),
            hypothesis(
                "knee_tracking_fault",
                "Knee tracking and balance fault",
                HypothesisCategory::Mechanical,
                None,
                Some("bottom"),
                &["knees_cave", "bar_drifts_forward"],
            ),
            hypothesis(
                "bracing_instability",
                "Trunk bracing breaks down under load",
                HypothesisCategory::Stability,
                Some(IndexKey::BackTension),
                Some("mid_range"),
                &["loses_bracing", "back_rounds"],
            ),
            hypothesis(
                "ankle_hip_mobility",
                "Ankle or hip mobility limiting depth position",
                HypothesisCategory::Mobility,
                None,
                None,
                &["mobility_restricted", "heels_rise"],
            ),
            technique_consistency(&["inconsistent_technique", "pause_sensitive"]),
            fatigue_programming(),
        ],
        deductions: vec![
            deduction("hips_shoot_up", 10, "Hips rise ahead of the chest"),
            deduction("knees_cave", 8, "Knees collapse inward under load"),
            deduction("chest_falls_forward", 8, "Torso angle collapses out of the bottom"),
            deduction("back_rounds", 10, "Upper back rounds under load"),
            deduction("loses_bracing", 8, "Brace is lost during the rep"),
            deduction("bar_drifts_forward", 8, "Bar drifts forward of mid-foot"),
            deduction("inconsistent_technique", 10, "Rep-to-rep technique varies"),
            deduction("pause_sensitive", 6, "Relies on the bounce out of the hole"),
            supported_deduction(
                "hips_shoot_up",
                IndexKey::Quad,
                5,
                "Weak quads shift the load onto the hips",
            ),
        ],
        validation_tests: vec![
            test_set(
                HypothesisCategory::Muscle,
                protocol(
                    "Safety-bar squat vs. back squat comparison",
                    "Work up to a 3RM on the safety-bar squat and compare it with your back squat 3RM; compare the front squat too if you have logged one",
                    Equipment::Commercial,
                ),
                protocol(
                    "Rear-foot elevated split squat vs. dumbbell RDL rep-out",
                    "Take the same dumbbells to a technical rep max on split squats (per leg) and on RDLs; the weaker pattern points to the limiter",
                    Equipment::Limited,
                ),
            ),
            test_set(
                HypothesisCategory::Mechanical,
                protocol(
                    "Filmed pause squat at 70%",
                    "Film a triple at 70% from the front and side with a two-second pause at depth; check knee tracking and bar-over-mid-foot balance",
                    Equipment::Home,
                ),
                protocol(
                    "Filmed goblet squat",
                    "Film a set of slow goblet squats from the front and note whether the knees track over the toes",
                    Equipment::Limited,
                ),
            ),
            test_set(
                HypothesisCategory::Stability,
                protocol(
                    "Pin squat from the sticking height",
                    "Set the pins at your sticking height and squat three singles from a dead stop; note whether the brace holds",
                    Equipment::Home,
                ),
                protocol(
                    "Tempo goblet squat brace check",
                    "Do a five-second lowering goblet squat set while holding a full brace; note where the torso shifts",
                    Equipment::Limited,
                ),
            ),
            test_set(
                HypothesisCategory::Mobility,
                protocol(
                    "Ankle dorsiflexion and deep squat hold screen",
                    "Measure the knee-to-wall distance for each ankle, then hold a bodyweight squat at depth for 30 seconds with heels down",
                    Equipment::Limited,
                ),
                protocol(
                    "Deep squat hold",
                    "Hold a bodyweight squat at depth for 30 seconds and note whether the heels lift",
                    Equipment::Limited,
                ),
            ),
            technique_tests("squat"),
            programming_tests("squat"),
        ],
        baseline_test: baseline("squat"),
    }
}

pub(super) fn deadlift() -> LiftDefinition {
    LiftDefinition {
        lift_id: "deadlift".to_owned(),
        name: "Deadlift".to_owned(),
        primary_exercise_id: "deadlift".to_owned(),
        default_phase: "initial_pull".to_owned(),
        phases: vec![
            phase("initial_pull", "Off the floor", "Breaking the bar from the floor"),
            phase("knee_level", "Knee level", "Bar passing the knees"),
            phase("lockout", "Lockout", "Hips through to standing tall"),
        ],
        indices: vec![
            index(
                IndexKey::PosteriorChain,
                GapSeverity::High,
                vec![
                    proxy("romanian_deadlift", 0.70, 1.0),
                    proxy("good_morning", 0.45, 0.7),
                    proxy("hip_thrust", 1.00, 0.5),
                ],
            ),
            index(
                IndexKey::Quad,
                GapSeverity::Medium,
                vec![proxy("squat", 0.85, 1.0), proxy("front_squat", 0.70, 0.8)],
            ),
            index(
                IndexKey::BackTension,
                GapSeverity::Medium,
                vec![
                    proxy("barbell_row", 0.50, 1.0),
                    proxy("pendlay_row", 0.47, 0.8),
                ],
            ),
        ],
        phase_rules: vec![
            rule("slow_off_floor", &[("initial_pull", 3)]),
            rule("hips_shoot_up", &[("initial_pull", 2)]),
            rule("bar_drifts_forward", &[("initial_pull", 1), ("knee_level", 1)]),
            rule("back_rounds", &[("knee_level", 2)]),
            rule("stalls_at_knees", &[("knee_level", 3)]),
            rule("loses_bracing", &[("initial_pull", 1), ("knee_level", 1)]),
            rule("hard_lockout", &[("lockout", 3)]),
            rule("grip_limiting", &[("lockout", 1)]),
        ],
        hypotheses: vec![
            hypothesis(
                "posterior_chain_weakness",
                "Posterior-chain weakness limiting the finish",
                HypothesisCategory::Muscle,
                Some(IndexKey::PosteriorChain),
                Some("lockout"),
                &["hard_lockout", "stalls_at_knees"],
            ),
            hypothesis(
                "quad_drive_weakness",
                "Quad drive weakness off the floor",
                HypothesisCategory::Muscle,
                Some(IndexKey::Quad),
                Some("initial_pull"),
                &["slow_off_floor", "hips_shoot_up"],
            ),
            hypothesis(
                "grip_limitation",
                "Grip strength capping the pull",
                HypothesisCategory::Muscle,
                None,
                None,
                &["grip_limiting"],
            ),
            hypothesis(
                "bar_path_fault",
                "Bar drifting away from the legs",
                HypothesisCategory::Mechanical,
                None,
                Some("knee_level"),
                &["bar_drifts_forward", "hips_shoot_up"],
            ),
            hypothesis(
                "upper_back_rounding",
                "Upper back losing position under load",
                HypothesisCategory::Stability,
                Some(IndexKey::BackTension),
                Some("knee_level"),
                &["back_rounds", "loses_bracing"],
            ),
            hypothesis(
                "hip_hinge_mobility",
                "Hamstring and hip mobility limiting start position",
                HypothesisCategory::Mobility,
                None,
                None,
                &["mobility_restricted"],
            ),
            technique_consistency(&["inconsistent_technique"]),
            fatigue_programming(),
        ],
        deductions: vec![
            deduction("hips_shoot_up", 10, "Hips rise before the bar breaks the floor"),
            deduction("bar_drifts_forward", 12, "Bar drifts away from the legs"),
            deduction("back_rounds", 10, "Upper back rounds under load"),
            deduction("loses_bracing", 8, "Brace is lost during the pull"),
            deduction("grip_limiting", 5, "Grip ends sets before the legs and back do"),
            deduction("inconsistent_technique", 10, "Rep-to-rep technique varies"),
            supported_deduction(
                "back_rounds",
                IndexKey::BackTension,
                5,
                "Weak upper back cannot hold position",
            ),
        ],
        validation_tests: vec![
            test_set(
                HypothesisCategory::Muscle,
                protocol(
                    "Block pull vs. deficit deadlift comparison",
                    "Work up to a 3RM from a 3-inch block and from a 1-inch deficit; the larger drop from your deadlift points to the weak range",
                    Equipment::Commercial,
                ),
                protocol(
                    "Single-leg RDL vs. split squat rep-out",
                    "Take the same dumbbells to a technical rep max on single-leg RDLs and split squats (per leg); the weaker pattern points to the limiter",
                    Equipment::Limited,
                ),
            ),
            test_set(
                HypothesisCategory::Mechanical,
                protocol(
                    "Filmed paused deadlift at knee height",
                    "Film a triple at 70% from the side with a one-second pause just below the knee; check whether the bar stays over mid-foot",
                    Equipment::Home,
                ),
                protocol(
                    "Filmed dumbbell RDL from the side",
                    "Film a slow set of dumbbell RDLs and check whether the weights stay against the legs",
                    Equipment::Limited,
                ),
            ),
            test_set(
                HypothesisCategory::Stability,
                protocol(
                    "Paused deadlift at 70%",
                    "Pull three singles at 70% with a two-second pause just off the floor; note whether the upper back holds its shape",
                    Equipment::Home,
                ),
                protocol(
                    "Suitcase carry brace check",
                    "Carry a heavy dumbbell in one hand for 30 metres per side and note whether the trunk stays square",
                    Equipment::Limited,
                ),
            ),
            test_set(
                HypothesisCategory::Mobility,
                protocol(
                    "Hinge and hamstring screen",
                    "Perform an active straight-leg raise on each side and a dowel hip hinge; note where the spine loses neutral",
                    Equipment::Limited,
                ),
                protocol(
                    "Toe-touch screen",
                    "Stand with feet together and reach for the toes with straight legs; note the distance and where tightness appears",
                    Equipment::Limited,
                ),
            ),
            technique_tests("deadlift"),
            programming_tests("deadlift"),
        ],
        baseline_test: baseline("deadlift"),
    }
}

fn phase(phase_id: &str, name: &str, description: &str) -> PhaseDefinition {
    PhaseDefinition {
        phase_id: phase_id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
    }
}

fn index(key: IndexKey, criticality: GapSeverity, proxies: Vec<ProxyLift>) -> IndexDefinition {
    IndexDefinition {
        key,
        criticality,
        proxies,
    }
}

fn proxy(exercise_id: &str, expected_ratio: f64, weight: f64) -> ProxyLift {
    ProxyLift {
        exercise_id: exercise_id.to_owned(),
        expected_ratio,
        weight,
    }
}

fn rule(flag: &str, contributions: &[(&str, u32)]) -> PhaseRule {
    PhaseRule {
        flag: flag.to_owned(),
        contributions: contributions
            .iter()
            .map(|(phase_id, points)| PhaseContribution {
                phase_id: (*phase_id).to_owned(),
                points: *points,
            })
            .collect(),
    }
}

fn hypothesis(
    key: &str,
    label: &str,
    category: HypothesisCategory,
    index: Option<IndexKey>,
    phase: Option<&str>,
    flags: &[&str],
) -> HypothesisRule {
    HypothesisRule {
        key: key.to_owned(),
        label: label.to_owned(),
        category,
        index,
        phase: phase.map(str::to_owned),
        flags: flags.iter().map(|flag| (*flag).to_owned()).collect(),
    }
}

fn technique_consistency(flags: &[&str]) -> HypothesisRule {
    hypothesis(
        "technique_consistency",
        "Inconsistent technique under heavy load",
        HypothesisCategory::Technique,
        None,
        None,
        flags,
    )
}

fn fatigue_programming() -> HypothesisRule {
    hypothesis(
        "fatigue_programming",
        "Fatigue or low top-set exposure in programming",
        HypothesisCategory::Programming,
        None,
        None,
        &["fatigue_accumulated", "low_top_set_exposure"],
    )
}

fn deduction(flag: &str, points: u32, reason: &str) -> DeductionRule {
    DeductionRule {
        flag: Some(flag.to_owned()),
        index_below: None,
        points,
        reason: reason.to_owned(),
    }
}

fn supported_deduction(flag: &str, index: IndexKey, points: u32, reason: &str) -> DeductionRule {
    DeductionRule {
        index_below: Some(IndexThreshold {
            index,
            below: SUPPORT_INDEX_FLOOR,
        }),
        ..deduction(flag, points, reason)
    }
}

fn protocol(description: &str, how_to_run: &str, requires: Equipment) -> TestProtocol {
    TestProtocol {
        description: description.to_owned(),
        how_to_run: how_to_run.to_owned(),
        requires,
    }
}

fn test_set(
    category: HypothesisCategory,
    preferred: TestProtocol,
    fallback: TestProtocol,
) -> ValidationTestDefinition {
    ValidationTestDefinition {
        category,
        preferred,
        fallback,
    }
}

fn technique_tests(lift: &str) -> ValidationTestDefinition {
    test_set(
        HypothesisCategory::Technique,
        protocol(
            &format!("Three filmed {lift} singles at 85%"),
            &format!(
                "Film three {lift} singles at 85% from the same angle and compare set-up, bar path, and tempo across reps"
            ),
            Equipment::Home,
        ),
        protocol(
            &format!("Filmed {lift} pattern practice"),
            &format!(
                "Film three sets of a light {lift} pattern variation from the same angle and compare rep to rep"
            ),
            Equipment::Limited,
        ),
    )
}

fn programming_tests(lift: &str) -> ValidationTestDefinition {
    test_set(
        HypothesisCategory::Programming,
        protocol(
            &format!("Top-set {lift} retest after a short deload"),
            &format!(
                "Cut volume by half for four days, then repeat your last {lift} top set and compare the RPE"
            ),
            Equipment::Home,
        ),
        protocol(
            "RPE check after a short deload",
            "Cut volume by half for four days, then repeat a familiar dumbbell set and compare the RPE",
            Equipment::Limited,
        ),
    )
}

fn baseline(lift: &str) -> TestProtocol {
    protocol(
        &format!("Film a {lift} top set from the side"),
        &format!(
            "Record your next {lift} top set from the side at hip height and note where the rep slows down"
        ),
        Equipment::Limited,
    )
}
