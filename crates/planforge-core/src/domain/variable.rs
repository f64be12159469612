//! Typed accessors for planning variables.
//!
//! Variables are described by plain function pointers over the solution, so
//! moves and selectors read and write values without any type erasure.

use std::fmt;

/// Reads and writes one basic planning variable of solution `S`.
///
/// `Copy`, so moves embed it by value.
pub struct BasicVariable<S, V> {
    variable_name: &'static str,
    descriptor_index: usize,
    entity_count: fn(&S) -> usize,
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    value_range: fn(&S) -> Vec<V>,
}

impl<S, V> Clone for BasicVariable<S, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, V> Copy for BasicVariable<S, V> {}

impl<S, V> fmt::Debug for BasicVariable<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicVariable")
            .field("variable_name", &self.variable_name)
            .field("descriptor_index", &self.descriptor_index)
            .finish()
    }
}

impl<S, V> BasicVariable<S, V> {
    /// `value_range` must list candidates in a stable order; selectors in
    /// original order enumerate it as given.
    pub fn new(
        variable_name: &'static str,
        descriptor_index: usize,
        entity_count: fn(&S) -> usize,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        value_range: fn(&S) -> Vec<V>,
    ) -> Self {
        Self {
            variable_name,
            descriptor_index,
            entity_count,
            getter,
            setter,
            value_range,
        }
    }

    pub fn variable_name(&self) -> &'static str {
        self.variable_name
    }

    pub fn descriptor_index(&self) -> usize {
        self.descriptor_index
    }

    #[inline]
    pub fn entity_count(&self, solution: &S) -> usize {
        (self.entity_count)(solution)
    }

    #[inline]
    pub fn get(&self, solution: &S, entity_index: usize) -> Option<V> {
        (self.getter)(solution, entity_index)
    }

    #[inline]
    pub fn set(&self, solution: &mut S, entity_index: usize, value: Option<V>) {
        (self.setter)(solution, entity_index, value)
    }

    pub fn values(&self, solution: &S) -> Vec<V> {
        (self.value_range)(solution)
    }
}

/// Target of a chained variable: either a chain root or another entity.
///
/// Chained variables model problems like vehicle routing, where each
/// entity points at its predecessor:
///
/// ```text
/// Anchor(0) <- Entity(3) <- Entity(1) <- Entity(4)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChainLink {
    /// An anchor (problem fact) at the start of a chain.
    Anchor(usize),
    /// Another planning entity of the same chain.
    Entity(usize),
}

/// Accessor for a chained planning variable.
pub struct ChainedVariable<S> {
    variable_name: &'static str,
    descriptor_index: usize,
    entity_count: fn(&S) -> usize,
    anchor_count: fn(&S) -> usize,
    getter: fn(&S, usize) -> Option<ChainLink>,
    setter: fn(&mut S, usize, Option<ChainLink>),
}

impl<S> Clone for ChainedVariable<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for ChainedVariable<S> {}

impl<S> fmt::Debug for ChainedVariable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedVariable")
            .field("variable_name", &self.variable_name)
            .field("descriptor_index", &self.descriptor_index)
            .finish()
    }
}

impl<S> ChainedVariable<S> {
    /// Creates a new chained variable accessor.
    pub fn new(
        variable_name: &'static str,
        descriptor_index: usize,
        entity_count: fn(&S) -> usize,
        anchor_count: fn(&S) -> usize,
        getter: fn(&S, usize) -> Option<ChainLink>,
        setter: fn(&mut S, usize, Option<ChainLink>),
    ) -> Self {
        Self {
            variable_name,
            descriptor_index,
            entity_count,
            anchor_count,
            getter,
            setter,
        }
    }

    pub fn variable_name(&self) -> &'static str {
        self.variable_name
    }

    pub fn descriptor_index(&self) -> usize {
        self.descriptor_index
    }

    pub fn setter(&self) -> fn(&mut S, usize, Option<ChainLink>) {
        self.setter
    }

    #[inline]
    pub fn entity_count(&self, solution: &S) -> usize {
        (self.entity_count)(solution)
    }

    #[inline]
    pub fn anchor_count(&self, solution: &S) -> usize {
        (self.anchor_count)(solution)
    }

    /// Returns the predecessor link of the entity.
    #[inline]
    pub fn get(&self, solution: &S, entity_index: usize) -> Option<ChainLink> {
        (self.getter)(solution, entity_index)
    }

    /// Writes the predecessor link of the entity.
    #[inline]
    pub fn set(&self, solution: &mut S, entity_index: usize, link: Option<ChainLink>) {
        (self.setter)(solution, entity_index, link)
    }
}
