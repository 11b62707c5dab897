// ABOUTME: Rule-based free-text to interview-flag classifier with a documented regex table
// ABOUTME: Suppresses negated matches and merges results into SessionFlags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

//! Flag Classifier
//!
//! Turns interview answers such as "my elbows flare and the bar stalls halfway"
//! into [`SessionFlags`] the diagnostic engine understands. Matching is
//! case-insensitive and one flag is reported at most once per text. A match is
//! dropped when one of the last few words of its clause is a negation ("I don't
//! struggle at lockout"), or when a negation sits inside the match after its
//! opening word ("my knees never cave"). Patterns may open with a negation of
//! their own ("never go heavy").
//!
//! Classification only ever sets flags to true; clearing a flag is a decision
//! for the caller.

use std::sync::LazyLock;

use liftoff_core::errors::{AppError, AppResult};
use liftoff_core::models::SessionFlags;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Words inspected before a match when looking for a negation
const NEGATION_WINDOW_WORDS: usize = 3;

/// Built-in pattern table: (flag, pattern, description)
const PATTERN_TABLE: &[(&str, &str, &str)] = &[
    (
        "hard_off_chest",
        r"(?:hard|tough|slow|stuck|struggl\w*|weak)[^.;]{0,25}off (?:the|my) chest|off (?:the|my) chest[^.;]{0,20}(?:hard|tough|slow|weak)",
        "difficulty breaking the bar off the chest",
    ),
    (
        "bar_stalls_mid",
        r"(?:stall|stuck|slow|grind)\w*[^.;]{0,20}(?:halfway|mid[- ]?(?:way|range|point)|middle)",
        "the bar stalling around the middle of the press",
    ),
    (
        "hard_lockout",
        r"(?:hard|tough|slow|stall\w*|struggl\w*|fail\w*|miss\w*)[^.;]{0,20}(?:lock ?out|locking (?:it )?out)|lock ?out[^.;]{0,15}(?:hard|tough|slow|weak)",
        "difficulty finishing the rep at lockout",
    ),
    (
        "elbows_flare_early",
        r"elbows?[^.;]{0,15}flar\w*|flar\w*[^.;]{0,10}elbows?",
        "elbows flaring during the press",
    ),
    (
        "bar_drifts_forward",
        r"bar\b[^.;]{0,20}(?:drift|swing|mov|travel)\w*[^.;]{0,12}(?:forward|away from|toward|out front)",
        "the bar drifting off its path",
    ),
    (
        "loses_arch",
        r"(?:los\w*|lost|collaps\w*|flatten\w*)[^.;]{0,15}arch|arch[^.;]{0,15}(?:collaps\w*|flatten\w*|disappear\w*)",
        "the bench arch collapsing",
    ),
    (
        "pause_sensitive",
        r"paus\w*[^.;]{0,25}(?:weaker|harder|much less|kill\w*)|(?:weaker|worse)[^.;]{0,20}paus\w*",
        "paused reps being much weaker",
    ),
    (
        "hard_out_of_hole",
        r"(?:hard|tough|slow|stuck|struggl\w*|weak)[^.;]{0,25}(?:out of the hole|out of the bottom|from the bottom)|out of the (?:hole|bottom)[^.;]{0,15}(?:hard|tough|slow|weak)",
        "difficulty driving out of the bottom of a squat",
    ),
    (
        "knees_cave",
        r"knees?[^.;]{0,15}(?:cave|caving|caved|collaps\w*|buckl\w*|go(?:es)? in)|valgus",
        "knees collapsing inward",
    ),
    (
        "chest_falls_forward",
        r"(?:chest|torso)\s+(?:falls?|fell|drops?|dropped|caves?|collapses?|tips?)|good ?morning\w* (?:the|my) squat",
        "the torso tipping forward out of the hole",
    ),
    (
        "heels_rise",
        r"heels?[^.;]{0,15}(?:rise|rising|lift\w*|come up|coming up|come off|raise)",
        "heels leaving the floor",
    ),
    (
        "slow_off_floor",
        r"(?:slow|hard|tough|stuck|struggl\w*)[^.;]{0,20}off the (?:floor|ground)|break\w*[^.;]{0,10}(?:floor|ground)[^.;]{0,15}(?:hard|slow|tough)",
        "a slow break from the floor",
    ),
    (
        "stalls_at_knees",
        r"(?:stall|stuck|slow|die|dies|fail)\w*[^.;]{0,20}(?:at|below|around|near) (?:my |the )?knees?",
        "the pull stalling at knee height",
    ),
    (
        "grip_limiting",
        r"grip[^.;]{0,20}(?:gives? out|gave out|fail\w*|slip\w*|limit\w*|weak)|bar (?:rolls|slips) (?:out of|in) my hands?",
        "grip giving out before the pull",
    ),
    (
        "hips_shoot_up",
        r"hips?\s+(?:shoot|shot|rise|rising|fly|flying|pop)\w*",
        "hips rising ahead of the chest",
    ),
    (
        "back_rounds",
        r"(?:back|spine)[^.;]{0,15}(?:round\w*|hunch\w*)|round\w*[^.;]{0,12}(?:back|spine)",
        "the back rounding under load",
    ),
    (
        "loses_bracing",
        r"(?:los\w*|lost|break\w*|leak\w*)[^.;]{0,12}(?:brace|bracing|tightness)|brace[^.;]{0,12}(?:fails|breaks|goes)",
        "bracing breaking down",
    ),
    (
        "mobility_restricted",
        r"(?:tight|stiff|limited|poor|restricted)[^.;]{0,15}(?:mobility|hips|ankles?|shoulders?|hamstrings?|range of motion)|mobility[^.;]{0,15}(?:issue|problem|limit\w*|poor)",
        "restricted mobility",
    ),
    (
        "inconsistent_technique",
        r"(?:technique|form|reps?|groove)[^.;]{0,20}(?:inconsistent|varies|vary|all over the place|different every)|inconsistent[^.;]{0,15}(?:technique|form|reps?)",
        "technique varying between reps",
    ),
    (
        "fatigue_accumulated",
        r"tired|exhausted|fatigued|beat up|run down|burnt? out|overtrain\w*|not recovering",
        "accumulated fatigue",
    ),
    (
        "low_top_set_exposure",
        r"(?:rarely|never|seldom)[^.;]{0,20}(?:go heavy|lift heavy|max|work up|top sets?|singles)|only (?:do |train )?(?:high reps|sets of (?:8|10|12)|volume)",
        "little heavy top-set practice",
    ),
];

/// Compiled built-in table, shared by every classifier
static BUILTIN_PATTERNS: LazyLock<Vec<CompiledPattern>> = LazyLock::new(|| {
    PATTERN_TABLE
        .iter()
        .filter_map(|(flag, pattern, description)| {
            let definition = FlagPattern::new(*flag, *pattern, *description);
            match definition.compile() {
                Ok(compiled) => Some(compiled),
                Err(e) => {
                    warn!(flag, error = %e, "Skipping flag pattern that failed to compile");
                    None
                }
            }
        })
        .collect()
});

static NEGATION_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: not, no, never, isn't, doesnt, don't, didn't, wasn't, without
    Regex::new(r"(?i)\b(?:not|no|never|isn'?t|doesn'?t|don'?t|didn'?t|wasn'?t|without)\b").ok()
});

/// One row of the pattern table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagPattern {
    /// Flag set when the pattern matches
    pub flag: String,
    /// Regular expression, matched case-insensitively
    pub pattern: String,
    /// What the pattern is meant to catch
    pub description: String,
}

impl FlagPattern {
    /// Create a table row
    #[must_use]
    pub fn new(
        flag: impl Into<String>,
        pattern: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            flag: flag.into(),
            pattern: pattern.into(),
            description: description.into(),
        }
    }

    fn compile(self) -> AppResult<CompiledPattern> {
        let regex = Regex::new(&format!("(?i){}", self.pattern)).map_err(|e| {
            AppError::invalid_format(format!("Invalid pattern for flag '{}'", self.flag))
                .with_source(e)
        })?;
        Ok(CompiledPattern {
            definition: self,
            regex,
        })
    }
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    definition: FlagPattern,
    regex: Regex,
}

/// A flag found in text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagMatch {
    /// Matched flag
    pub flag: String,
    /// Text that triggered the match
    pub matched_text: String,
    /// Byte offset of the match start
    pub start: usize,
    /// Byte offset of the match end
    pub end: usize,
}

/// Classifies free text into interview flags
#[derive(Debug, Clone)]
pub struct FlagClassifier {
    patterns: Vec<CompiledPattern>,
}

impl Default for FlagClassifier {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FlagClassifier {
    /// Classifier over the built-in pattern table
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            patterns: BUILTIN_PATTERNS.clone(),
        }
    }

    /// Classifier over a custom pattern table
    ///
    /// # Errors
    ///
    /// Returns an `InvalidFormat` error naming the first pattern that fails to compile
    pub fn from_patterns(patterns: Vec<FlagPattern>) -> AppResult<Self> {
        let patterns = patterns
            .into_iter()
            .map(FlagPattern::compile)
            .collect::<AppResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// The pattern table in match order
    pub fn patterns(&self) -> impl Iterator<Item = &FlagPattern> {
        self.patterns.iter().map(|compiled| &compiled.definition)
    }

    /// Find every flag the text supports, in table order
    #[must_use]
    pub fn classify(&self, text: &str) -> Vec<FlagMatch> {
        let mut matches: Vec<FlagMatch> = Vec::new();
        for compiled in &self.patterns {
            let flag = &compiled.definition.flag;
            if matches.iter().any(|found| &found.flag == flag) {
                continue;
            }
            let hit = compiled
                .regex
                .find_iter(text)
                .find(|m| !is_negated(&text[..m.start()]) && !negated_within(m.as_str()));
            if let Some(m) = hit {
                matches.push(FlagMatch {
                    flag: flag.clone(),
                    matched_text: m.as_str().to_owned(),
                    start: m.start(),
                    end: m.end(),
                });
            }
        }
        debug!(matches = matches.len(), "Classified text into flags");
        matches
    }

    /// Classify text and set every matched flag on `flags`; returns the matched names
    pub fn apply(&self, text: &str, flags: &mut SessionFlags) -> Vec<String> {
        self.classify(text)
            .into_iter()
            .map(|found| {
                flags.set(found.flag.clone(), true);
                found.flag
            })
            .collect()
    }
}

/// Whether the clause before a match ends in a negation
fn is_negated(prefix: &str) -> bool {
    let Some(negation) = NEGATION_PATTERN.as_ref() else {
        return false;
    };
    let clause = prefix
        .rsplit(['.', ',', ';', '!', '?'])
        .next()
        .unwrap_or_default()
        .replace('\u{2019}', "'");
    clause
        .split_whitespace()
        .rev()
        .take(NEGATION_WINDOW_WORDS)
        .any(|word| negation.is_match(word))
}

/// Whether a negation appears in the matched text past its opening word
fn negated_within(matched: &str) -> bool {
    let Some(negation) = NEGATION_PATTERN.as_ref() else {
        return false;
    };
    matched
        .replace('\u{2019}', "'")
        .split_whitespace()
        .skip(1)
        .any(|word| negation.is_match(word))
}
