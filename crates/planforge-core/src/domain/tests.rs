//! Tests for domain accessors, chain index, and initialization ordering.

use super::*;

// ============================================================================
// Chain Index Tests
// ============================================================================

mod chain_index_tests {
    use super::*;
    use crate::error::PlanForgeError;

    #[derive(Clone, Debug)]
    struct Routes {
        anchors: usize,
        previous: Vec<Option<ChainLink>>,
    }

    fn entity_count(s: &Routes) -> usize {
        s.previous.len()
    }

    fn anchor_count(s: &Routes) -> usize {
        s.anchors
    }

    fn get_previous(s: &Routes, idx: usize) -> Option<ChainLink> {
        s.previous.get(idx).copied().flatten()
    }

    fn set_previous(s: &mut Routes, idx: usize, link: Option<ChainLink>) {
        if let Some(slot) = s.previous.get_mut(idx) {
            *slot = link;
        }
    }

    fn variable() -> ChainedVariable<Routes> {
        ChainedVariable::new(
            "previous",
            0,
            entity_count,
            anchor_count,
            get_previous,
            set_previous,
        )
    }

    // Anchor 0 <- 2 <- 0 <- 3 ; Anchor 1 <- 1 ; entity 4 unassigned
    fn routes() -> Routes {
        Routes {
            anchors: 2,
            previous: vec![
                Some(ChainLink::Entity(2)),
                Some(ChainLink::Anchor(1)),
                Some(ChainLink::Anchor(0)),
                Some(ChainLink::Entity(0)),
                None,
            ],
        }
    }

    #[test]
    fn test_build_orders_chains() {
        let index = ChainIndex::build(&routes(), &variable()).unwrap();

        assert_eq!(index.anchor_count(), 2);
        assert_eq!(index.chain(0), &[2, 0, 3]);
        assert_eq!(index.chain(1), &[1]);
        assert_eq!(index.chain(7), &[] as &[usize]);
    }

    #[test]
    fn test_lookups() {
        let index = ChainIndex::build(&routes(), &variable()).unwrap();

        assert_eq!(index.locate(0), Some((0, 1)));
        assert_eq!(index.anchor_of(3), Some(0));
        assert_eq!(index.anchor_of(4), None);
        assert_eq!(index.next(2), Some(0));
        assert_eq!(index.next(3), None);
        assert_eq!(index.previous_link(2), Some(ChainLink::Anchor(0)));
        assert_eq!(index.previous_link(3), Some(ChainLink::Entity(0)));
        assert_eq!(index.split_point(ChainLink::Anchor(1)), Some((1, 0)));
        assert_eq!(index.split_point(ChainLink::Entity(0)), Some((0, 2)));
        assert_eq!(index.split_point(ChainLink::Anchor(9)), None);
    }

    #[test]
    fn test_branching_is_rejected() {
        let mut solution = routes();
        solution.previous[1] = Some(ChainLink::Entity(2));

        let err = ChainIndex::build(&solution, &variable()).unwrap_err();
        assert!(matches!(err, PlanForgeError::Structural(_)));
    }

    #[test]
    fn test_cycle_is_rejected() {
        let solution = Routes {
            anchors: 1,
            previous: vec![Some(ChainLink::Entity(1)), Some(ChainLink::Entity(0))],
        };

        let err = ChainIndex::build(&solution, &variable()).unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn test_following_unassigned_entity_is_rejected() {
        let mut solution = routes();
        solution.previous[1] = Some(ChainLink::Entity(4));

        assert!(ChainIndex::build(&solution, &variable()).is_err());
    }

    #[test]
    fn test_unknown_anchor_is_rejected() {
        let mut solution = routes();
        solution.previous[1] = Some(ChainLink::Anchor(5));

        assert!(ChainIndex::build(&solution, &variable()).is_err());
    }

    #[test]
    fn test_locate_sub_chain() {
        let index = ChainIndex::build(&routes(), &variable()).unwrap();

        assert_eq!(
            index.locate_sub_chain(&SubChain::new(vec![0, 3])).unwrap(),
            (0, 1)
        );
        assert!(index.locate_sub_chain(&SubChain::new(vec![2, 3])).is_err());
        assert!(index.locate_sub_chain(&SubChain::new(vec![3, 0])).is_err());
        assert!(index.locate_sub_chain(&SubChain::new(vec![])).is_err());
        assert!(index.locate_sub_chain(&SubChain::new(vec![4])).is_err());
    }

    #[test]
    fn test_sub_chain_overlap() {
        let a = SubChain::new(vec![1, 2]);
        let b = SubChain::new(vec![2, 3]);
        let c = SubChain::new(vec![4]);

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert_eq!(a.first(), Some(1));
        assert_eq!(a.last(), Some(2));
    }
}

// ============================================================================
// Initialization Order Tests
// ============================================================================

mod initialization_order_tests {
    use super::*;
    use std::cmp::Ordering;

    fn weight(
        demand_index: usize,
        date: u32,
        required_count: usize,
        discriminator: &'static str,
    ) -> InitializationWeight<u32, &'static str> {
        InitializationWeight {
            demand_index,
            date,
            required_count,
            discriminator,
        }
    }

    #[test]
    fn test_earlier_date_first() {
        assert_eq!(
            initialization_order(&weight(0, 1, 1, "b"), &weight(1, 2, 5, "a")),
            Ordering::Less
        );
    }

    #[test]
    fn test_larger_requirement_first_on_same_date() {
        assert_eq!(
            initialization_order(&weight(0, 1, 3, "b"), &weight(1, 1, 2, "a")),
            Ordering::Less
        );
    }

    #[test]
    fn test_discriminator_then_index_break_ties() {
        assert_eq!(
            initialization_order(&weight(5, 1, 2, "day"), &weight(0, 1, 2, "night")),
            Ordering::Less
        );
        assert_eq!(
            initialization_order(&weight(0, 1, 2, "day"), &weight(1, 1, 2, "day")),
            Ordering::Less
        );
    }

    #[test]
    fn test_documented_example() {
        let mut units = vec![weight(0, 2, 1, "a"), weight(1, 1, 3, "a"), weight(2, 1, 2, "a")];
        units.sort_by(initialization_order);

        let order: Vec<(u32, usize)> = units.iter().map(|w| (w.date, w.required_count)).collect();
        assert_eq!(order, vec![(1, 3), (1, 2), (2, 1)]);
    }
}

// ============================================================================
// Variable Accessor Tests
// ============================================================================

mod variable_tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Plan {
        slots: Vec<Option<i32>>,
    }

    fn count(s: &Plan) -> usize {
        s.slots.len()
    }

    fn get(s: &Plan, idx: usize) -> Option<i32> {
        s.slots.get(idx).copied().flatten()
    }

    fn set(s: &mut Plan, idx: usize, v: Option<i32>) {
        if let Some(slot) = s.slots.get_mut(idx) {
            *slot = v;
        }
    }

    fn values(_: &Plan) -> Vec<i32> {
        vec![10, 20, 30]
    }

    #[test]
    fn test_basic_variable_accessors() {
        let variable = BasicVariable::new("slot", 0, count, get, set, values);
        let mut plan = Plan {
            slots: vec![Some(10), None],
        };

        assert_eq!(variable.entity_count(&plan), 2);
        assert_eq!(variable.get(&plan, 0), Some(10));
        assert_eq!(variable.get(&plan, 1), None);
        assert_eq!(variable.values(&plan), vec![10, 20, 30]);

        variable.set(&mut plan, 1, Some(30));
        assert_eq!(variable.get(&plan, 1), Some(30));
        assert_eq!(variable.variable_name(), "slot");
    }
}
