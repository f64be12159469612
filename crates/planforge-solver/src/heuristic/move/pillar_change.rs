//! Moving a whole pillar to another value.
//!
//! A pillar is a set of entities holding the same value, such as every
//! shift one nurse works. Changing it as one move keeps that grouping.

use std::fmt::Debug;

use planforge_core::domain::{BasicVariable, PlanningSolution};
use planforge_core::error::{PlanForgeError, Result};
use planforge_scoring::ScoreDirector;
use smallvec::SmallVec;

use super::Move;

/// Entity indices of a pillar.
pub type PillarIndices = SmallVec<[usize; 8]>;

/// Reassigns every entity of a pillar to `to_value`.
pub struct PillarChangeMove<S, V> {
    variable: BasicVariable<S, V>,
    pillar: PillarIndices,
    to_value: Option<V>,
}

impl<S, V: Clone> Clone for PillarChangeMove<S, V> {
    fn clone(&self) -> Self {
        Self {
            variable: self.variable,
            pillar: self.pillar.clone(),
            to_value: self.to_value.clone(),
        }
    }
}

impl<S, V: Debug> Debug for PillarChangeMove<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PillarChangeMove")
            .field("variable", &self.variable.variable_name())
            .field("pillar", &self.pillar.as_slice())
            .field("to_value", &self.to_value)
            .finish()
    }
}

impl<S, V> PillarChangeMove<S, V>
where
    V: Clone + PartialEq + Debug,
{
    /// Validates the pillar against `solution` first.
    ///
    /// # Errors
    ///
    /// Returns [`PlanForgeError::Structural`] when the pillar is empty,
    /// repeats an entity, or its entities do not share one assigned value.
    pub fn try_new(
        solution: &S,
        entity_indices: &[usize],
        to_value: Option<V>,
        variable: &BasicVariable<S, V>,
    ) -> Result<Self> {
        check_pillar(solution, entity_indices, variable)?;
        Ok(Self {
            variable: *variable,
            pillar: entity_indices.iter().copied().collect(),
            to_value,
        })
    }

    pub fn pillar_size(&self) -> usize {
        self.pillar.len()
    }

    pub fn to_value(&self) -> Option<&V> {
        self.to_value.as_ref()
    }
}

/// Checks that a pillar is non-empty, duplicate-free and shares one assigned value.
pub(crate) fn check_pillar<S, V>(
    solution: &S,
    entity_indices: &[usize],
    variable: &BasicVariable<S, V>,
) -> Result<()>
where
    V: PartialEq + Debug,
{
    let first = entity_indices
        .first()
        .ok_or_else(|| PlanForgeError::Structural("empty pillar".to_string()))?;
    let entity_count = variable.entity_count(solution);
    if entity_indices.iter().any(|&e| e >= entity_count) {
        return Err(PlanForgeError::Structural(format!(
            "pillar {:?} refers to unknown entities",
            entity_indices
        )));
    }
    for (i, e) in entity_indices.iter().enumerate() {
        if entity_indices[..i].contains(e) {
            return Err(PlanForgeError::Structural(format!(
                "pillar {:?} repeats entity {}",
                entity_indices, e
            )));
        }
    }
    let value = variable.get(solution, *first);
    if value.is_none() {
        return Err(PlanForgeError::Structural(format!(
            "pillar {:?} contains unassigned entity {}",
            entity_indices, first
        )));
    }
    if let Some(other) = entity_indices
        .iter()
        .find(|&&e| variable.get(solution, e) != value)
    {
        return Err(PlanForgeError::Structural(format!(
            "pillar {:?} is inconsistent: entity {} does not hold {:?}",
            entity_indices, other, value
        )));
    }
    Ok(())
}

impl<S, V> Move<S> for PillarChangeMove<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    type Undo = PillarChangeMove<S, V>;

    /// False once the pillar's entities no longer share a value.
    fn is_doable<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> bool {
        let solution = score_director.working_solution();
        let Some((&head, rest)) = self.pillar.split_first() else {
            return false;
        };
        let shared = self.variable.get(solution, head);
        shared != self.to_value
            && rest
                .iter()
                .all(|&entity| self.variable.get(solution, entity) == shared)
    }

    fn do_move<D: ScoreDirector<S> + ?Sized>(&self, score_director: &mut D) {
        let variable = self.variable;
        let (descriptor, name) = (variable.descriptor_index(), variable.variable_name());
        let previous: Vec<(usize, Option<V>)> = self
            .pillar
            .iter()
            .map(|&entity| (entity, variable.get(score_director.working_solution(), entity)))
            .collect();

        for &entity in &self.pillar {
            score_director.before_variable_changed(descriptor, entity, name);
        }
        let solution = score_director.working_solution_mut();
        for &entity in &self.pillar {
            variable.set(solution, entity, self.to_value.clone());
        }
        for &entity in &self.pillar {
            score_director.after_variable_changed(descriptor, entity, name);
        }

        score_director.register_undo(Box::new(move |solution: &mut S| {
            for (entity, value) in previous {
                variable.set(solution, entity, value);
            }
        }));
    }

    fn undo_move<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> Self::Undo {
        let solution = score_director.working_solution();
        let current = self
            .pillar
            .first()
            .and_then(|&head| self.variable.get(solution, head));
        Self {
            variable: self.variable,
            pillar: self.pillar.clone(),
            to_value: current,
        }
    }

    fn descriptor_index(&self) -> usize {
        self.variable.descriptor_index()
    }

    fn entity_indices(&self) -> &[usize] {
        &self.pillar
    }

    fn variable_name(&self) -> &str {
        self.variable.variable_name()
    }
}
