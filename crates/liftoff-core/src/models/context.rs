// ABOUTME: Interview context models: training age, equipment access, and session flags
// ABOUTME: Session flags are an ordered boolean map where an unset flag reads as false
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Lifter experience bracket used to scale expected proxy ratios
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingAge {
    /// Under roughly one year of structured training
    Beginner,
    /// One to several years of structured training
    #[default]
    Intermediate,
    /// Many years of structured training, near genetic ceiling
    Advanced,
}

impl TrainingAge {
    /// Stable string form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse from a string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" | "novice" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" | "elite" => Some(Self::Advanced),
            _ => None,
        }
    }
}

impl fmt::Display for TrainingAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equipment the lifter can access, ordered from least to most
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    /// Dumbbells, bands, or bodyweight only
    Limited,
    /// Barbell, plates, rack, and bench
    Home,
    /// Full commercial gym (boards, specialty bars, cables, machines)
    #[default]
    Commercial,
}

impl Equipment {
    /// Stable string form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Limited => "limited",
            Self::Home => "home",
            Self::Commercial => "commercial",
        }
    }

    /// Whether this setup covers equipment needing at least `required`
    #[must_use]
    pub fn provides(self, required: Self) -> bool {
        self >= required
    }

    /// Parse from a string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "limited" | "minimal" => Some(Self::Limited),
            "home" | "garage" => Some(Self::Home),
            "commercial" | "gym" => Some(Self::Commercial),
            _ => None,
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named boolean interview flags.
///
/// Produced by free-text classification upstream. An absent flag is false,
/// never "unknown".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionFlags(BTreeMap<String, bool>);

impl SessionFlags {
    /// Create an empty flag set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `flag` is set to true
    #[must_use]
    pub fn is_set(&self, flag: &str) -> bool {
        self.0.get(flag).copied().unwrap_or(false)
    }

    /// Set a flag value
    pub fn set(&mut self, flag: impl Into<String>, value: bool) {
        self.0.insert(flag.into(), value);
    }

    /// Builder-style variant of [`Self::set`] with value `true`
    #[must_use]
    pub fn with(mut self, flag: impl Into<String>) -> Self {
        self.set(flag, true);
        self
    }

    /// Names of every flag set to true, in sorted order
    pub fn active(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, value)| **value)
            .map(|(name, _)| name.as_str())
    }

    /// Number of flags set to true
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active().count()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for SessionFlags {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_flag_reads_false() {
        let flags = SessionFlags::new().with("hard_off_chest");
        assert!(flags.is_set("hard_off_chest"));
        assert!(!flags.is_set("hips_shoot_up"));
    }

    #[test]
    fn test_equipment_ordering() {
        assert!(Equipment::Commercial.provides(Equipment::Home));
        assert!(Equipment::Home.provides(Equipment::Home));
        assert!(!Equipment::Limited.provides(Equipment::Home));
    }
}
