//! Demand-driven working solutions.
//!
//! A demand unit (e.g. a shift requiring K staff) is expanded into K
//! planning entities, each of which receives one planning value.

use std::cmp::Ordering;
use std::fmt::Debug;

use super::traits::{PlanningId, PlanningSolution};

/// Ordering key of one demand unit, alive for a single sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializationWeight<D, T> {
    /// Index of the demand unit in the solution.
    pub demand_index: usize,
    /// Temporal position; earlier units are processed first.
    pub date: D,
    /// Number of entities the unit expands into; larger units go first.
    pub required_count: usize,
    /// Secondary discriminator (e.g. shift type) for determinism.
    pub discriminator: T,
}

/// Total order used to process demand units, hardest first.
///
/// Keys, in order:
/// 1. `date` ascending
/// 2. `required_count` descending
/// 3. `discriminator` ascending
/// 4. `demand_index` ascending
///
/// # Example
///
/// ```
/// use planforge_core::domain::{initialization_order, InitializationWeight};
///
/// let mut units = vec![
///     InitializationWeight { demand_index: 0, date: 2, required_count: 1, discriminator: 0 },
///     InitializationWeight { demand_index: 1, date: 1, required_count: 3, discriminator: 0 },
///     InitializationWeight { demand_index: 2, date: 1, required_count: 2, discriminator: 0 },
/// ];
/// units.sort_by(initialization_order);
///
/// let order: Vec<usize> = units.iter().map(|w| w.demand_index).collect();
/// assert_eq!(order, vec![1, 2, 0]);
/// ```
pub fn initialization_order<D: Ord, T: Ord>(
    a: &InitializationWeight<D, T>,
    b: &InitializationWeight<D, T>,
) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| b.required_count.cmp(&a.required_count))
        .then_with(|| a.discriminator.cmp(&b.discriminator))
        .then_with(|| a.demand_index.cmp(&b.demand_index))
}

/// Working solution accessor consumed by the construction initializer.
///
/// Exposes the demand units, the candidate values, the entity list, and a
/// setter to install the finalized entity list.
pub trait DemandSolution: PlanningSolution {
    /// The planning entity minted per required slot.
    type Entity: PlanningId<Id = usize> + Clone + Debug + Send + Sync;
    /// The planning value assigned to entities.
    type Value: Clone + PartialEq + Debug + Send + Sync;
    /// Temporal key of a demand unit.
    type Date: Ord + Clone + Debug;
    /// Secondary ordering key of a demand unit.
    type Discriminator: Ord + Clone + Debug;

    /// Returns the number of demand units.
    fn demand_count(&self) -> usize;

    /// Returns the ordering key of a demand unit.
    fn initialization_weight(
        &self,
        demand_index: usize,
    ) -> InitializationWeight<Self::Date, Self::Discriminator>;

    /// Returns the candidate values for entities of a demand unit, in stable order.
    fn candidate_values(&self, demand_index: usize) -> Vec<Self::Value>;

    /// Creates an unassigned entity with the given stable id.
    fn mint_entity(&self, id: usize, demand_index: usize) -> Self::Entity;

    /// Returns the current entity list.
    fn entities(&self) -> &[Self::Entity];

    /// Appends an entity and returns its index.
    fn push_entity(&mut self, entity: Self::Entity) -> usize;

    /// Returns the value assigned to the entity at the index.
    fn assigned_value(&self, entity_index: usize) -> Option<Self::Value>;

    /// Assigns a value to the entity at the index.
    fn assign(&mut self, entity_index: usize, value: Option<Self::Value>);

    /// Installs the finalized entity list.
    fn set_entities(&mut self, entities: Vec<Self::Entity>);
}
