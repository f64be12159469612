//! Exchanging the values of two entities.

use std::fmt::Debug;

use planforge_core::domain::{BasicVariable, PlanningSolution};
use planforge_scoring::ScoreDirector;

use super::Move;

/// Swaps one variable between two entities. Its own inverse.
///
/// ```
/// use planforge_core::domain::{BasicVariable, PlanningSolution};
/// use planforge_core::score::HardSoftScore;
/// use planforge_scoring::{ScoreDirector, SimpleScoreDirector};
/// use planforge_solver::heuristic::r#move::{Move, SwapMove};
///
/// #[derive(Clone)]
/// struct Desk { owners: Vec<Option<i32>>, score: Option<HardSoftScore> }
///
/// impl PlanningSolution for Desk {
///     type Score = HardSoftScore;
///     fn score(&self) -> Option<Self::Score> { self.score }
///     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
/// }
///
/// fn count(d: &Desk) -> usize { d.owners.len() }
/// fn get(d: &Desk, i: usize) -> Option<i32> { d.owners.get(i).copied().flatten() }
/// fn set(d: &mut Desk, i: usize, v: Option<i32>) { if let Some(o) = d.owners.get_mut(i) { *o = v; } }
/// fn range(_: &Desk) -> Vec<i32> { vec![1, 2] }
///
/// let owner = BasicVariable::new("owner", 0, count, get, set, range);
/// let desk = Desk { owners: vec![Some(1), Some(2)], score: None };
/// let mut director = SimpleScoreDirector::new(desk, |_: &Desk| HardSoftScore::ZERO);
///
/// let swap = SwapMove::for_variable(&owner, 0, 1);
/// assert!(swap.is_doable(&director));
/// swap.do_move(&mut director);
/// assert_eq!(director.working_solution().owners, vec![Some(2), Some(1)]);
/// ```
pub struct SwapMove<S, V> {
    variable: BasicVariable<S, V>,
    // [left, right]
    entities: [usize; 2],
}

impl<S, V> Clone for SwapMove<S, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, V> Copy for SwapMove<S, V> {}

impl<S, V> Debug for SwapMove<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapMove")
            .field("variable", &self.variable.variable_name())
            .field("left", &self.entities[0])
            .field("right", &self.entities[1])
            .finish()
    }
}

impl<S, V> SwapMove<S, V> {
    pub fn for_variable(variable: &BasicVariable<S, V>, left: usize, right: usize) -> Self {
        Self {
            variable: *variable,
            entities: [left, right],
        }
    }

    pub fn left_entity_index(&self) -> usize {
        self.entities[0]
    }

    pub fn right_entity_index(&self) -> usize {
        self.entities[1]
    }
}

impl<S, V> Move<S> for SwapMove<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    type Undo = SwapMove<S, V>;

    fn is_doable<D: ScoreDirector<S> + ?Sized>(&self, score_director: &D) -> bool {
        let [left, right] = self.entities;
        let solution = score_director.working_solution();
        left != right && self.variable.get(solution, left) != self.variable.get(solution, right)
    }

    fn do_move<D: ScoreDirector<S> + ?Sized>(&self, score_director: &mut D) {
        let variable = self.variable;
        let [left, right] = self.entities;
        let (descriptor, name) = (variable.descriptor_index(), variable.variable_name());
        let left_value = variable.get(score_director.working_solution(), left);
        let right_value = variable.get(score_director.working_solution(), right);

        for entity in self.entities {
            score_director.before_variable_changed(descriptor, entity, name);
        }
        let solution = score_director.working_solution_mut();
        variable.set(solution, left, right_value.clone());
        variable.set(solution, right, left_value.clone());
        for entity in self.entities {
            score_director.after_variable_changed(descriptor, entity, name);
        }

        score_director.register_undo(Box::new(move |solution: &mut S| {
            variable.set(solution, left, left_value);
            variable.set(solution, right, right_value);
        }));
    }

    fn undo_move<D: ScoreDirector<S> + ?Sized>(&self, _score_director: &D) -> Self::Undo {
        *self
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
