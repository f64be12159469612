//! Greedy best-fit initializer over demand units.

use planforge_core::domain::{initialization_order, DemandSolution, PlanningId};
use planforge_core::error::{PlanForgeError, Result};
use planforge_core::score::Score;
use planforge_scoring::ScoreDirector;

use super::InitializerEventSink;
use crate::scope::PhaseScope;
use crate::termination::{AnyTermination, Termination};

/// Outcome of a completed initialization.
#[derive(Debug, Clone, PartialEq)]
pub struct InitializationSummary<Sc> {
    /// Entities minted and committed.
    pub entities_assigned: usize,
    /// Candidates whose score evaluation failed.
    pub skipped_candidates: usize,
    /// Score of the solution after the entity list is installed.
    pub score: Sc,
    /// True when a termination stopped the run before every entity was built.
    pub terminated: bool,
}

/// Builds a fully assigned solution from its demand units.
///
/// Demand units are processed in [`initialization_order`]: earliest date
/// first, then larger demand, then discriminator, then demand index. Each
/// unit requiring K staff mints K entities with sequential ids. Every entity
/// is appended, then each candidate value is assigned in turn and scored;
/// the strictly best candidate is committed before the next entity, so
/// later entities are scored against the committed ones. When all entities
/// are committed the entity list is installed sorted by id.
///
/// Terminations are checked before every entity. A terminated run still
/// installs the entities built so far.
///
/// # Example
///
/// ```
/// use planforge_scoring::SimpleScoreDirector;
/// use planforge_solver::phase::construction::{ConstructionInitializer, NoopEventSink};
/// use planforge_test::roster::{calculate_roster_score, NurseRoster, ShiftKind};
///
/// let roster = NurseRoster::builder()
///     .employee("Ann")
///     .employee("Beth")
///     .shift(1, ShiftKind::Early, 2)
///     .build();
/// let mut director = SimpleScoreDirector::new(roster, calculate_roster_score);
///
/// let summary = ConstructionInitializer::new()
///     .initialize(&mut director, &mut NoopEventSink)
///     .unwrap();
///
/// assert_eq!(summary.entities_assigned, 2);
/// assert!(!summary.terminated);
/// ```
#[derive(Debug, Default)]
pub struct ConstructionInitializer {
    termination: AnyTermination,
    descriptor_index: usize,
    variable_name: &'static str,
}

impl ConstructionInitializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names the assigned variable in score director notifications.
    pub fn with_variable(mut self, descriptor_index: usize, variable_name: &'static str) -> Self {
        self.descriptor_index = descriptor_index;
        self.variable_name = variable_name;
        self
    }

    /// Adds a termination checked before every entity.
    pub fn with_termination(mut self, termination: impl Termination + 'static) -> Self {
        self.termination.push(termination);
        self
    }

    /// Runs the initializer against the score director's working solution.
    ///
    /// # Errors
    ///
    /// Returns [`PlanForgeError::Initialization`] when no candidate of an
    /// entity scores above [`Score::min_value`], either because the demand
    /// unit has no candidate values or because every evaluation failed. The
    /// failing entity is left unassigned and nothing after it is built.
    ///
    /// Transient score errors skip the candidate; any other score error is
    /// returned as is.
    pub fn initialize<S, D, E>(
        &self,
        score_director: &mut D,
        sink: &mut E,
    ) -> Result<InitializationSummary<S::Score>>
    where
        S: DemandSolution,
        D: ScoreDirector<S> + ?Sized,
        E: InitializerEventSink<S> + ?Sized,
    {
        let mut phase_scope = PhaseScope::new(0);

        let solution = score_director.working_solution();
        let mut weights: Vec<_> = (0..solution.demand_count())
            .map(|demand| solution.initialization_weight(demand))
            .collect();
        weights.sort_by(initialization_order);
        let entity_count: usize = weights.iter().map(|w| w.required_count).sum();

        sink.on_phase_started(weights.len(), entity_count);

        let mut skipped_candidates = 0;
        let mut terminated = false;
        let mut next_id = 0;

        'demands: for weight in &weights {
            for _ in 0..weight.required_count {
                if self.termination.is_terminated(&phase_scope) {
                    terminated = true;
                    break 'demands;
                }

                let entity_id = next_id;
                next_id += 1;
                let entity_index =
                    self.add_entity(score_director, entity_id, weight.demand_index);

                let candidates = score_director
                    .working_solution()
                    .candidate_values(weight.demand_index);
                let mut best: Option<S::Value> = None;
                let mut best_score = S::Score::min_value();

                for value in candidates {
                    self.assign(score_director, entity_index, Some(value.clone()));
                    match score_director.try_calculate_score() {
                        Ok(score) => {
                            if score > best_score {
                                best_score = score;
                                best = Some(value);
                            }
                        }
                        Err(error) if error.is_transient() => {
                            skipped_candidates += 1;
                            sink.on_candidate_skipped(entity_id, &value, &error);
                        }
                        Err(error) => {
                            self.assign(score_director, entity_index, None);
                            return Err(error);
                        }
                    }
                }

                let Some(value) = best else {
                    self.assign(score_director, entity_index, None);
                    return Err(PlanForgeError::Initialization {
                        entity_id,
                        message: format!(
                            "no candidate value for demand {} scored above the minimum",
                            weight.demand_index
                        ),
                    });
                };

                self.assign(score_director, entity_index, Some(value.clone()));
                phase_scope.increment_step_count();
                sink.on_entity_committed(entity_id, &value, &best_score);
            }
        }

        let mut entities = score_director.working_solution().entities().to_vec();
        entities.sort_by_key(|entity| entity.planning_id());
        score_director.working_solution_mut().set_entities(entities);
        // Reordering the entity list bypasses the notification protocol.
        score_director.reset();

        let score = score_director.calculate_score();
        score_director.working_solution_mut().set_score(Some(score));

        let summary = InitializationSummary {
            entities_assigned: phase_scope.step_count() as usize,
            skipped_candidates,
            score,
            terminated,
        };
        sink.on_phase_ended(&summary, phase_scope.elapsed());
        Ok(summary)
    }

    fn add_entity<S, D>(&self, score_director: &mut D, entity_id: usize, demand_index: usize) -> usize
    where
        S: DemandSolution,
        D: ScoreDirector<S> + ?Sized,
    {
        let solution = score_director.working_solution_mut();
        let entity = solution.mint_entity(entity_id, demand_index);
        let entity_index = solution.push_entity(entity);
        score_director.after_entity_added(self.descriptor_index, entity_index);
        entity_index
    }

    fn assign<S, D>(&self, score_director: &mut D, entity_index: usize, value: Option<S::Value>)
    where
        S: DemandSolution,
        D: ScoreDirector<S> + ?Sized,
    {
        score_director.before_variable_changed(self.descriptor_index, entity_index, self.variable_name);
        score_director
            .working_solution_mut()
            .assign(entity_index, value);
        score_director.after_variable_changed(self.descriptor_index, entity_index, self.variable_name);
    }
}
