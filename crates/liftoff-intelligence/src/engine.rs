// ABOUTME: Diagnostic engine orchestrating every stage into one immutable DiagnosticSignals
// ABOUTME: Pure and synchronous; holds its catalog and config in Arc and evaluates batches with rayon
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 LiftOff Diagnostics

use std::sync::{Arc, OnceLock};

use liftoff_core::constants::precision::round2;
use liftoff_core::constants::versions::SIGNALS_VERSION;
use liftoff_core::errors::DiagnosticError;
use liftoff_core::models::{
    DiagnosticSignals, Equipment, SessionFlags, SnapshotInput, TrainingAge,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::archetype::ArchetypeScorer;
use crate::catalog::LiftCatalog;
use crate::config::DiagnosticsConfig;
use crate::data_gaps::{DataGapDetector, GapInputs};
use crate::e1rm::E1rmEstimator;
use crate::efficiency::EfficiencyScorer;
use crate::hypothesis_ranker::{HypothesisInputs, HypothesisRanker};
use crate::phase_scorer::PhaseScorer;
use crate::strength_index::{LifterContext, StrengthIndexCalculator};
use crate::validation_test::ValidationTestSelector;

/// Engine built from the built-in catalog and default policy
static DEFAULT_ENGINE: OnceLock<DiagnosticEngine> = OnceLock::new();

/// Everything one diagnosis is computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticRequest {
    /// Lift under diagnosis (`bench_press`, `squat`, `deadlift`)
    pub lift_id: String,
    /// Exercise treated as the primary lift; empty means the catalog default
    #[serde(default)]
    pub primary_exercise_id: String,
    /// Reported top sets, weights in pounds
    #[serde(default)]
    pub snapshots: Vec<SnapshotInput>,
    /// Interview flags
    #[serde(default)]
    pub flags: SessionFlags,
    /// Bodyweight in pounds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bodyweight_lbs: Option<f64>,
    /// Training age
    #[serde(default)]
    pub training_age: TrainingAge,
    /// Equipment access
    #[serde(default)]
    pub equipment: Equipment,
}

impl DiagnosticRequest {
    /// Request for a lift with no data yet
    #[must_use]
    pub fn new(lift_id: impl Into<String>) -> Self {
        Self {
            lift_id: lift_id.into(),
            primary_exercise_id: String::new(),
            snapshots: Vec::new(),
            flags: SessionFlags::new(),
            bodyweight_lbs: None,
            training_age: TrainingAge::default(),
            equipment: Equipment::default(),
        }
    }

    /// Override the primary exercise
    #[must_use]
    pub fn with_primary_exercise(mut self, exercise_id: impl Into<String>) -> Self {
        self.primary_exercise_id = exercise_id.into();
        self
    }

    /// Add a snapshot
    #[must_use]
    pub fn with_snapshot(mut self, snapshot: SnapshotInput) -> Self {
        self.snapshots.push(snapshot);
        self
    }

    /// Set a flag to true
    #[must_use]
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.set(flag, true);
        self
    }

    /// Set bodyweight in pounds
    #[must_use]
    pub const fn with_bodyweight(mut self, bodyweight_lbs: f64) -> Self {
        self.bodyweight_lbs = Some(bodyweight_lbs);
        self
    }

    /// Set training age
    #[must_use]
    pub const fn with_training_age(mut self, training_age: TrainingAge) -> Self {
        self.training_age = training_age;
        self
    }

    /// Set equipment access
    #[must_use]
    pub const fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = equipment;
        self
    }
}

/// Deterministic diagnostic signals engine.
///
/// Cloning is cheap; every clone shares the same catalog and config.
#[derive(Debug, Clone)]
pub struct DiagnosticEngine {
    catalog: Arc<LiftCatalog>,
    config: Arc<DiagnosticsConfig>,
}

impl DiagnosticEngine {
    /// Create an engine over an explicit catalog and policy
    #[must_use]
    pub const fn new(catalog: Arc<LiftCatalog>, config: Arc<DiagnosticsConfig>) -> Self {
        Self { catalog, config }
    }

    /// Built-in catalog with default policy
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(LiftCatalog::builtin()),
            Arc::new(DiagnosticsConfig::default()),
        )
    }

    /// Built-in catalog with policy loaded from `LIFTOFF_*` environment variables
    #[must_use]
    pub fn from_environment() -> Self {
        Self::new(
            Arc::new(LiftCatalog::builtin()),
            Arc::new(DiagnosticsConfig::global().clone()),
        )
    }

    /// Same policy over a replacement catalog
    #[must_use]
    pub fn with_catalog(&self, catalog: Arc<LiftCatalog>) -> Self {
        Self::new(catalog, Arc::clone(&self.config))
    }

    /// Catalog in use
    #[must_use]
    pub fn catalog(&self) -> &LiftCatalog {
        &self.catalog
    }

    /// Policy in use
    #[must_use]
    pub fn config(&self) -> &DiagnosticsConfig {
        &self.config
    }

    /// Compute the full diagnostic signals for one request
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosticError::UnknownLift`] if the lift is not in the
    /// catalog, or [`DiagnosticError::InvalidSnapshot`] if any snapshot has a
    /// non-positive weight, zero reps, or zero sets
    #[instrument(
        skip(self, request),
        fields(lift_id = %request.lift_id, snapshots = request.snapshots.len())
    )]
    pub fn compute(&self, request: &DiagnosticRequest) -> Result<DiagnosticSignals, DiagnosticError> {
        let lift = self
            .catalog
            .lift(&request.lift_id)
            .ok_or_else(|| DiagnosticError::unknown_lift(request.lift_id.clone()))?;
        let primary_exercise_id = if request.primary_exercise_id.trim().is_empty() {
            lift.primary_exercise_id.clone()
        } else {
            request.primary_exercise_id.trim().to_owned()
        };
        let config = &*self.config;

        let e1rms = E1rmEstimator::new(&config.e1rm).estimate_best(&request.snapshots)?;
        debug!(estimates = e1rms.len(), "e1RM stage complete");

        let relative_strength = e1rms.get(&primary_exercise_id).and_then(|primary| {
            request
                .bodyweight_lbs
                .filter(|bodyweight| bodyweight.is_finite() && *bodyweight > 0.0)
                .map(|bodyweight| round2(primary.value / bodyweight))
        });

        let context = LifterContext {
            training_age: request.training_age,
            equipment: request.equipment,
        };
        let indices = StrengthIndexCalculator::new(&config.index).compute(
            lift,
            &primary_exercise_id,
            &e1rms,
            context,
        );
        debug!(indices = indices.len(), "Strength index stage complete");

        let phases = PhaseScorer::score(lift, &request.flags);

        let hypotheses = HypothesisRanker::new(&config.hypothesis, &self.catalog).rank(
            lift,
            HypothesisInputs {
                indices: &indices,
                phases: &phases,
                flags: &request.flags,
            },
        );

        let archetype = ArchetypeScorer::new(&config.archetype).classify(&indices);
        let efficiency = EfficiencyScorer::new(&config.efficiency).score(
            lift,
            &request.flags,
            &indices,
            archetype.as_ref(),
        );

        let validation_test =
            ValidationTestSelector::select(lift, hypotheses.first(), request.equipment);

        let data_gaps = DataGapDetector::new(&config.index).detect(
            lift,
            GapInputs {
                primary_exercise_id: &primary_exercise_id,
                e1rms: &e1rms,
                indices: &indices,
                phases: &phases,
                bodyweight_lbs: request.bodyweight_lbs,
            },
        );

        info!(
            lift_id = %lift.lift_id,
            primary_phase = %phases.primary_phase,
            top_hypothesis = hypotheses.first().map_or("none", |h| h.key.as_str()),
            efficiency = efficiency.score,
            data_gaps = data_gaps.len(),
            "Computed diagnostic signals"
        );

        Ok(DiagnosticSignals {
            signals_version: SIGNALS_VERSION.to_owned(),
            lift_config_version: self.catalog.version.clone(),
            lift_id: lift.lift_id.clone(),
            primary_exercise_id,
            training_age: request.training_age,
            equipment: request.equipment,
            e1rms,
            relative_strength,
            indices,
            phase_scores: phases.phase_scores,
            primary_phase: phases.primary_phase,
            primary_phase_confidence: phases.primary_phase_confidence,
            phase_tie: phases.phase_tie,
            secondary_phase: phases.secondary_phase,
            hypotheses,
            archetype,
            efficiency,
            validation_test,
            data_gaps,
        })
    }

    /// Compute many requests in parallel; results keep input order
    #[must_use]
    pub fn compute_batch(
        &self,
        requests: &[DiagnosticRequest],
    ) -> Vec<Result<DiagnosticSignals, DiagnosticError>> {
        requests
            .par_iter()
            .map(|request| self.compute(request))
            .collect()
    }
}

/// Compute diagnostic signals with the built-in catalog and default policy
///
/// # Errors
///
/// Returns [`DiagnosticError::UnknownLift`] or [`DiagnosticError::InvalidSnapshot`]
pub fn compute_diagnostic_signals(
    lift_id: &str,
    primary_exercise_id: &str,
    snapshots: &[SnapshotInput],
    flags: &SessionFlags,
    bodyweight_lbs: Option<f64>,
    training_age: TrainingAge,
    equipment: Equipment,
) -> Result<DiagnosticSignals, DiagnosticError> {
    let request = DiagnosticRequest {
        lift_id: lift_id.to_owned(),
        primary_exercise_id: primary_exercise_id.to_owned(),
        snapshots: snapshots.to_vec(),
        flags: flags.clone(),
        bodyweight_lbs,
        training_age,
        equipment,
    };
    DEFAULT_ENGINE
        .get_or_init(DiagnosticEngine::with_defaults)
        .compute(&request)
}
