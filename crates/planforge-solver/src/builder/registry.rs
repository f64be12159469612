//! Named factories referenced from selector configuration.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::heuristic::r#move::GenericMove;
use crate::heuristic::selector::{
    MoveIteratorFactory, MoveListFactory, SelectionProbabilityWeightFactory,
};

/// Registry of user-supplied factories, looked up by the names that
/// `factory` and `selector_probability_weight_factory` config fields use.
///
/// # Example
///
/// ```
/// use planforge_solver::builder::FactoryRegistry;
/// use planforge_solver::heuristic::r#move::GenericMove;
/// use planforge_test::task::TaskSolution;
///
/// let registry = FactoryRegistry::<TaskSolution, i32>::new()
///     .with_weight_factory("favour_first", |_: &TaskSolution, child: usize| {
///         if child == 0 { 3.0 } else { 1.0 }
///     })
///     .with_move_list_factory("nothing", |_: &TaskSolution| -> Vec<GenericMove<TaskSolution, i32>> {
///         Vec::new()
///     });
///
/// assert!(registry.weight_factory("favour_first").is_some());
/// assert!(registry.move_list_factory("nothing").is_some());
/// assert!(registry.move_iterator_factory("nothing").is_none());
/// ```
pub struct FactoryRegistry<S, V> {
    move_lists: HashMap<String, Arc<dyn MoveListFactory<S, GenericMove<S, V>>>>,
    move_iterators: HashMap<String, Arc<dyn MoveIteratorFactory<S, GenericMove<S, V>>>>,
    weights: HashMap<String, Arc<dyn SelectionProbabilityWeightFactory<S>>>,
}

impl<S, V> Default for FactoryRegistry<S, V> {
    fn default() -> Self {
        Self {
            move_lists: HashMap::new(),
            move_iterators: HashMap::new(),
            weights: HashMap::new(),
        }
    }
}

impl<S, V> Debug for FactoryRegistry<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut move_lists: Vec<_> = self.move_lists.keys().collect();
        let mut move_iterators: Vec<_> = self.move_iterators.keys().collect();
        let mut weights: Vec<_> = self.weights.keys().collect();
        move_lists.sort();
        move_iterators.sort();
        weights.sort();
        f.debug_struct("FactoryRegistry")
            .field("move_lists", &move_lists)
            .field("move_iterators", &move_iterators)
            .field("weights", &weights)
            .finish()
    }
}

impl<S, V> FactoryRegistry<S, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a move list factory, replacing any factory of the same name.
    pub fn with_move_list_factory(
        mut self,
        name: &str,
        factory: impl MoveListFactory<S, GenericMove<S, V>> + 'static,
    ) -> Self {
        self.move_lists.insert(name.to_string(), Arc::new(factory));
        self
    }

    /// Registers a move iterator factory, replacing any factory of the same name.
    pub fn with_move_iterator_factory(
        mut self,
        name: &str,
        factory: impl MoveIteratorFactory<S, GenericMove<S, V>> + 'static,
    ) -> Self {
        self.move_iterators.insert(name.to_string(), Arc::new(factory));
        self
    }

    /// Registers a union weight factory, replacing any factory of the same name.
    pub fn with_weight_factory(
        mut self,
        name: &str,
        factory: impl SelectionProbabilityWeightFactory<S> + 'static,
    ) -> Self {
        self.weights.insert(name.to_string(), Arc::new(factory));
        self
    }

    pub fn move_list_factory(
        &self,
        name: &str,
    ) -> Option<Arc<dyn MoveListFactory<S, GenericMove<S, V>>>> {
        self.move_lists.get(name).cloned()
    }

    pub fn move_iterator_factory(
        &self,
        name: &str,
    ) -> Option<Arc<dyn MoveIteratorFactory<S, GenericMove<S, V>>>> {
        self.move_iterators.get(name).cloned()
    }

    pub fn weight_factory(&self, name: &str) -> Option<Arc<dyn SelectionProbabilityWeightFactory<S>>> {
        self.weights.get(name).cloned()
    }
}
