//! Diagnostic events emitted by the construction initializer.

use std::time::Duration;

use planforge_core::domain::DemandSolution;
use planforge_core::error::PlanForgeError;
use tracing::{debug, info, warn};

use super::InitializationSummary;

const PHASE: &str = "Construction Heuristic";

/// Receives the initializer's diagnostic events.
///
/// The sink is passed into [`ConstructionInitializer::initialize`]; it is
/// the only channel through which the initializer reports progress.
///
/// [`ConstructionInitializer::initialize`]: super::ConstructionInitializer::initialize
pub trait InitializerEventSink<S: DemandSolution> {
    /// Called once before the first entity is minted.
    fn on_phase_started(&mut self, _demand_count: usize, _entity_count: usize) {}

    /// Called once per committed assignment.
    fn on_entity_committed(&mut self, entity_id: usize, value: &S::Value, score: &S::Score);

    /// Called when a candidate's score evaluation fails and it is skipped.
    fn on_candidate_skipped(&mut self, _entity_id: usize, _value: &S::Value, _error: &PlanForgeError) {
    }

    /// Called once after the entity list is installed.
    fn on_phase_ended(&mut self, _summary: &InitializationSummary<S::Score>, _duration: Duration) {}
}

/// Forwards every event to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl<S: DemandSolution> InitializerEventSink<S> for TracingEventSink {
    fn on_phase_started(&mut self, demand_count: usize, entity_count: usize) {
        info!(
            event = "phase_start",
            phase = PHASE,
            phase_index = 0,
            demand_count,
            entity_count,
        );
    }

    fn on_entity_committed(&mut self, entity_id: usize, value: &S::Value, score: &S::Score) {
        debug!(
            event = "entity_committed",
            entity_id,
            value = ?value,
            score = %score,
        );
    }

    fn on_candidate_skipped(&mut self, entity_id: usize, value: &S::Value, error: &PlanForgeError) {
        warn!(
            event = "candidate_skipped",
            entity_id,
            value = ?value,
            error = %error,
        );
    }

    fn on_phase_ended(&mut self, summary: &InitializationSummary<S::Score>, duration: Duration) {
        let seconds = duration.as_secs_f64();
        let speed = if seconds > 0.0 {
            (summary.entities_assigned as f64 / seconds) as u64
        } else {
            0
        };
        info!(
            event = "phase_end",
            phase = PHASE,
            phase_index = 0,
            duration_ms = duration.as_millis() as u64,
            steps = summary.entities_assigned as u64,
            speed,
            skipped = summary.skipped_candidates,
            terminated = summary.terminated,
            score = %summary.score,
        );
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl<S: DemandSolution> InitializerEventSink<S> for NoopEventSink {
    fn on_entity_committed(&mut self, _entity_id: usize, _value: &S::Value, _score: &S::Score) {}
}
