//! Reassigning one entity.

use std::fmt::Debug;

use planforge_core::domain::{BasicVariable, PlanningSolution};
use planforge_scoring::ScoreDirector;

use super::Move;

/// Sets one entity's variable to `to_value`, or unassigns it with `None`.
pub struct ChangeMove<S, V> {
    variable: BasicVariable<S, V>,
    entity_index: usize,
    to_value: Option<V>,
}

impl<S, V: Clone> Clone for ChangeMove<S, V> {
    fn clone(&self) -> Self {
        Self {
            variable: self.variable,
            entity_index: self.entity_index,
            to_value: self.to_value.clone(),
        }
    }
}

impl<S, V: Debug> Debug for ChangeMove<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeMove")
            .field("variable", &self.variable.variable_name())
            .field("entity_index", &self.entity_index)
            .field("to_value", &self.to_value)
            .finish()
    }
}

impl<S, V> ChangeMove<S, V> {
    pub fn for_variable(
        variable: &BasicVariable<S, V>,
        entity_index: usize,
        to_value: Option<V>,
    ) -> Self {
        Self {
            variable: *variable,
            entity_index,
            to_value,
        }
    }

    pub fn entity_index(&self) -> usize {
        self.entity_index
    }

    pub fn to_value(&self) -> Option<&V> {
        self.to_value.as_ref()
    }
}

impl<S, V> Move<S> for ChangeMove<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    type Undo = ChangeMove<S, V>;

    /// Assigning the value an entity already holds changes nothing.
    fn is_doable<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> bool {
        self.variable
            .get(score_director.working_solution(), self.entity_index)
            != self.to_value
    }

    fn do_move<D: ScoreDirector<S> + ?Sized>(&self, score_director: &mut D) {
        let variable = self.variable;
        let entity_index = self.entity_index;
        let previous = variable.get(score_director.working_solution(), entity_index);

        let (descriptor, name) = (variable.descriptor_index(), variable.variable_name());
        score_director.before_variable_changed(descriptor, entity_index, name);
        variable.set(
            score_director.working_solution_mut(),
            entity_index,
            self.to_value.clone(),
        );
        score_director.after_variable_changed(descriptor, entity_index, name);

        score_director.register_undo(Box::new(move |solution: &mut S| {
            variable.set(solution, entity_index, previous);
        }));
    }

    fn undo_move<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> Self::Undo {
        let current = self
            .variable
            .get(score_director.working_solution(), self.entity_index);
        Self::for_variable(&self.variable, self.entity_index, current)
    }

    fn descriptor_index(&self) -> usize {
        self.variable.descriptor_index()
    }

    fn entity_indices(&self) -> &[usize] {
        std::slice::from_ref(&self.entity_index)
    }

    fn variable_name(&self) -> &str {
        self.variable.variable_name()
    }
}
