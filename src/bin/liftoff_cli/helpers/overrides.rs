// ABOUTME: Command-line overrides for diagnosis input documents
// ABOUTME: Parses loose training-age, equipment, and unit names for clap and applies them to a document
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use liftoff::input::DiagnosisInput;
use liftoff_core::models::{Equipment, TrainingAge, WeightUnit};
use tracing::debug;

/// Context given on the command line; each set field replaces the document's value
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextOverrides {
    /// Training age
    pub training_age: Option<TrainingAge>,
    /// Equipment access
    pub equipment: Option<Equipment>,
    /// Unit for every load in the document
    pub unit: Option<WeightUnit>,
}

impl ContextOverrides {
    /// Write the given fields into `document`
    pub fn apply(self, document: &mut DiagnosisInput) {
        if let Some(training_age) = self.training_age {
            debug!(%training_age, "Overriding training age");
            document.training_age = training_age;
        }
        if let Some(equipment) = self.equipment {
            debug!(%equipment, "Overriding equipment");
            document.equipment = equipment;
        }
        if let Some(unit) = self.unit {
            debug!(?unit, "Overriding load unit");
            document.unit = unit;
        }
    }
}

/// clap value parser for `--training-age`
pub fn parse_training_age(value: &str) -> Result<TrainingAge, String> {
    TrainingAge::parse(value)
        .ok_or_else(|| format!("unknown training age '{value}' (beginner, intermediate, advanced)"))
}

/// clap value parser for `--equipment`
pub fn parse_equipment(value: &str) -> Result<Equipment, String> {
    Equipment::parse(value)
        .ok_or_else(|| format!("unknown equipment '{value}' (limited, home, commercial)"))
}

/// clap value parser for `--unit`
pub fn parse_unit(value: &str) -> Result<WeightUnit, String> {
    WeightUnit::parse(value).ok_or_else(|| format!("unknown unit '{value}' (lbs, kg)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_only_given_fields() {
        let mut document =
            DiagnosisInput::from_json(r#"{"lift_id":"squat","equipment":"home"}"#).unwrap();
        ContextOverrides {
            training_age: parse_training_age("Elite").ok(),
            unit: parse_unit("kilos").ok(),
            ..ContextOverrides::default()
        }
        .apply(&mut document);

        assert_eq!(document.training_age, TrainingAge::Advanced);
        assert_eq!(document.equipment, Equipment::Home);
        assert_eq!(document.unit, WeightUnit::Kg);
    }

    #[test]
    fn test_unknown_values_are_rejected() {
        assert!(parse_equipment("spaceship").is_err());
        assert_eq!(parse_equipment("garage"), Ok(Equipment::Home));
        assert!(parse_unit("stone").is_err());
    }
}
