//! Chained routing test fixtures.
//!
//! Each vehicle is an anchor; each visit points at its predecessor, which is
//! either a vehicle or another visit.
//!
//! # Example
//!
//! ```
//! use planforge_test::routing::RoutingSolution;
//!
//! // Vehicle 0: 0 -> 1 -> 2, vehicle 1: 3
//! let solution = RoutingSolution::from_chains(&[&[0, 1, 2], &[3]], 4);
//! assert_eq!(solution.chains(), vec![vec![0, 1, 2], vec![3]]);
//! ```

use planforge_core::domain::{ChainIndex, ChainLink, ChainedVariable, PlanningSolution};
use planforge_core::score::HardSoftScore;

/// A customer visit chained behind a vehicle or another visit.
#[derive(Clone, Debug, PartialEq)]
pub struct Visit {
    pub id: usize,
    /// Position on a line; travel cost is the distance between positions.
    pub location: i64,
    pub previous: Option<ChainLink>,
}

/// Routing solution with one chain per vehicle.
#[derive(Clone, Debug)]
pub struct RoutingSolution {
    /// Depot location of each vehicle.
    pub depots: Vec<i64>,
    pub visits: Vec<Visit>,
    pub score: Option<HardSoftScore>,
}

impl RoutingSolution {
    /// Builds a solution from vehicle chains; visits absent from every chain
    /// stay unassigned. Visit `i` is located at `10 * (i + 1)` and every
    /// depot at `0`.
    pub fn from_chains(chains: &[&[usize]], visit_count: usize) -> Self {
        let mut visits: Vec<Visit> = (0..visit_count)
            .map(|id| Visit {
                id,
                location: 10 * (id as i64 + 1),
                previous: None,
            })
            .collect();

        for (vehicle, chain) in chains.iter().enumerate() {
            let mut previous = ChainLink::Anchor(vehicle);
            for &visit in chain.iter() {
                visits[visit].previous = Some(previous);
                previous = ChainLink::Entity(visit);
            }
        }

        Self {
            depots: vec![0; chains.len()],
            visits,
            score: None,
        }
    }

    /// Returns the visit ids of each vehicle's chain, in chain order.
    ///
    /// Returns an empty list if the chains are malformed.
    pub fn chains(&self) -> Vec<Vec<usize>> {
        ChainIndex::build(self, &previous_variable())
            .map(|index| index.chains().to_vec())
            .unwrap_or_default()
    }

    /// Returns the predecessor links, in visit order.
    pub fn links(&self) -> Vec<Option<ChainLink>> {
        self.visits.iter().map(|v| v.previous).collect()
    }
}

impl PlanningSolution for RoutingSolution {
    type Score = HardSoftScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }

    fn is_initialized(&self) -> bool {
        self.visits.iter().all(|v| v.previous.is_some())
    }
}

/// Returns the number of visits.
pub fn visit_count(s: &RoutingSolution) -> usize {
    s.visits.len()
}

/// Returns the number of vehicles.
pub fn vehicle_count(s: &RoutingSolution) -> usize {
    s.depots.len()
}

/// Gets the predecessor link of a visit.
pub fn get_previous(s: &RoutingSolution, idx: usize) -> Option<ChainLink> {
    s.visits.get(idx).and_then(|v| v.previous)
}

/// Sets the predecessor link of a visit.
pub fn set_previous(s: &mut RoutingSolution, idx: usize, link: Option<ChainLink>) {
    if let Some(visit) = s.visits.get_mut(idx) {
        visit.previous = link;
    }
}

/// Creates the accessor for the chained `previous` variable.
pub fn previous_variable() -> ChainedVariable<RoutingSolution> {
    ChainedVariable::new(
        "previous",
        0,
        visit_count,
        vehicle_count,
        get_previous,
        set_previous,
    )
}

/// Penalizes unassigned visits (hard) and the total travel distance (soft).
pub fn calculate_distance_score(s: &RoutingSolution) -> HardSoftScore {
    let mut unassigned = 0;
    let mut distance = 0;
    for visit in &s.visits {
        let from = match visit.previous {
            None => {
                unassigned += 1;
                continue;
            }
            Some(ChainLink::Anchor(vehicle)) => s.depots.get(vehicle).copied().unwrap_or(0),
            Some(ChainLink::Entity(previous)) => {
                s.visits.get(previous).map(|p| p.location).unwrap_or(0)
            }
        };
        distance += (visit.location - from).abs();
    }
    HardSoftScore::of(-unassigned, -distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_chains() {
        let solution = RoutingSolution::from_chains(&[&[2, 0], &[1]], 4);

        assert_eq!(solution.visits[2].previous, Some(ChainLink::Anchor(0)));
        assert_eq!(solution.visits[0].previous, Some(ChainLink::Entity(2)));
        assert_eq!(solution.visits[1].previous, Some(ChainLink::Anchor(1)));
        assert_eq!(solution.visits[3].previous, None);
        assert_eq!(solution.chains(), vec![vec![2, 0], vec![1]]);
    }

    #[test]
    fn test_distance_score() {
        // 0 -> 10 -> 20 and one unassigned visit
        let solution = RoutingSolution::from_chains(&[&[0, 1]], 3);
        assert_eq!(calculate_distance_score(&solution), HardSoftScore::of(-1, -20));
    }
}
