//! Trading values between two pillars.

use std::fmt::Debug;

use planforge_core::domain::{BasicVariable, PlanningSolution};
use planforge_core::error::{PlanForgeError, Result};
use planforge_scoring::ScoreDirector;

use super::pillar_change::{check_pillar, PillarIndices};
use super::Move;

/// Gives the left pillar the right pillar's value and vice versa.
///
/// Its own inverse.
pub struct PillarSwapMove<S, V> {
    variable: BasicVariable<S, V>,
    // Left pillar first, then right; `split` marks the boundary.
    entities: PillarIndices,
    split: usize,
}

impl<S, V> Clone for PillarSwapMove<S, V> {
    fn clone(&self) -> Self {
        Self {
            variable: self.variable,
            entities: self.entities.clone(),
            split: self.split,
        }
    }
}

impl<S, V> Debug for PillarSwapMove<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PillarSwapMove")
            .field("variable", &self.variable.variable_name())
            .field("left", &self.left_indices())
            .field("right", &self.right_indices())
            .finish()
    }
}

impl<S, V> PillarSwapMove<S, V>
where
    V: Clone + PartialEq + Debug,
{
    /// Validates both pillars against `solution` first.
    ///
    /// # Errors
    ///
    /// Returns [`PlanForgeError::Structural`] when either pillar is invalid
    /// or the two share an entity.
    pub fn try_new(
        solution: &S,
        left: &[usize],
        right: &[usize],
        variable: &BasicVariable<S, V>,
    ) -> Result<Self> {
        check_pillar(solution, left, variable)?;
        check_pillar(solution, right, variable)?;
        if let Some(shared) = left.iter().find(|e| right.contains(e)) {
            return Err(PlanForgeError::Structural(format!(
                "pillars {:?} and {:?} overlap at entity {}",
                left, right, shared
            )));
        }
        Ok(Self {
            variable: *variable,
            entities: left.iter().chain(right).copied().collect(),
            split: left.len(),
        })
    }
}

impl<S, V> PillarSwapMove<S, V> {
    pub fn left_indices(&self) -> &[usize] {
        &self.entities[..self.split]
    }

    pub fn right_indices(&self) -> &[usize] {
        &self.entities[self.split..]
    }
}

impl<S, V: PartialEq> PillarSwapMove<S, V> {
    /// The value shared by `pillar`, or `None` when it has drifted apart.
    fn shared_value(&self, solution: &S, pillar: &[usize]) -> Option<Option<V>> {
        let (&head, rest) = pillar.split_first()?;
        let value = self.variable.get(solution, head);
        rest.iter()
            .all(|&entity| self.variable.get(solution, entity) == value)
            .then_some(value)
    }
}

impl<S, V> Move<S> for PillarSwapMove<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    type Undo = PillarSwapMove<S, V>;

    fn is_doable<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> bool {
        let solution = score_director.working_solution();
        let left = self.shared_value(solution, self.left_indices());
        let right = self.shared_value(solution, self.right_indices());
        matches!((left, right), (Some(l), Some(r)) if l != r)
    }

    fn do_move<D: ScoreDirector<S> + ?Sized>(&self, score_director: &mut D) {
        let variable = self.variable;
        let (descriptor, name) = (variable.descriptor_index(), variable.variable_name());
        let (Some(&left_head), Some(&right_head)) =
            (self.left_indices().first(), self.right_indices().first())
        else {
            return;
        };
        let left_value = variable.get(score_director.working_solution(), left_head);
        let right_value = variable.get(score_director.working_solution(), right_head);

        for &entity in &self.entities {
            score_director.before_variable_changed(descriptor, entity, name);
        }
        let solution = score_director.working_solution_mut();
        for (position, &entity) in self.entities.iter().enumerate() {
            let value = if position < self.split { &right_value } else { &left_value };
            variable.set(solution, entity, value.clone());
        }
        for &entity in &self.entities {
            score_director.after_variable_changed(descriptor, entity, name);
        }

        let entities = self.entities.clone();
        let split = self.split;
        score_director.register_undo(Box::new(move |solution: &mut S| {
            for (position, &entity) in entities.iter().enumerate() {
                let value = if position < split { &left_value } else { &right_value };
                variable.set(solution, entity, value.clone());
            }
        }));
    }

    fn undo_move<D: ScoreDirector<S> + ?Sized>(&self, _score_director: &D) -> Self::Undo {
        self.clone()
    }

    fn descriptor_index(&self) -> usize {
        self.variable.descriptor_index()
    }

    fn entity_indices(&self) -> &[usize] {
        &self.entities
    }

    fn variable_name(&self) -> &str {
        self.variable.variable_name()
    }
}
