//! Tests for CompositeMove and GenericMove.

use super::*;

fn change(entity: usize, value: i32) -> ChangeMove<TaskSolution, i32> {
    ChangeMove::for_variable(&priority_variable(), entity, Some(value))
}

#[test]
fn test_composite_applies_components_in_order() {
    let mut director = task_director(&[1, 1, 1]);

    let m = CompositeMove::new(vec![change(0, 2), change(2, 3)]);
    assert_eq!(m.len(), 2);
    assert_eq!(m.entity_indices(), &[0, 2]);
    m.do_move(&mut director);

    assert_eq!(
        director.working_solution().assigned(),
        vec![Some(2), Some(1), Some(3)]
    );
}

#[test]
fn test_composite_is_doable_when_any_component_is() {
    let director = task_director(&[1, 2]);

    let partly = CompositeMove::new(vec![change(0, 1), change(1, 3)]);
    assert!(partly.is_doable(&director));

    let none = CompositeMove::new(vec![change(0, 1), change(1, 2)]);
    assert!(!none.is_doable(&director));
}

#[test]
fn test_composite_undo_runs_in_reverse() {
    let mut director = task_director(&[1, 2]);

    // Both components touch entity 0; the undo must restore the original value.
    let m = CompositeMove::new(vec![change(0, 2), change(0, 3)]);
    let undo = m.undo_move(&director);
    assert_eq!(undo.moves()[0].to_value(), Some(&2));
    assert_eq!(undo.moves()[1].to_value(), Some(&1));

    assert_undo_restores_tasks(&mut director, &m);
}

#[test]
fn test_generic_composite_of_mixed_moves() {
    let mut director = task_director(&[1, 2, 3]);
    let variable = priority_variable();

    let m: GenericMove<TaskSolution, i32> = GenericMove::Composite(CompositeMove::new(vec![
        SwapMove::for_variable(&variable, 0, 1).into(),
        ChangeMove::for_variable(&variable, 2, None).into(),
    ]));
    assert!(m.is_doable(&director));

    let undo = m.undo_move(&director);
    m.do_move(&mut director);
    assert_eq!(
        director.working_solution().assigned(),
        vec![Some(2), Some(1), None]
    );

    undo.do_move(&mut director);
    assert_eq!(
        director.working_solution().assigned(),
        vec![Some(1), Some(2), Some(3)]
    );
}

#[test]
fn test_generic_chain_move_undo_is_chain_restore() {
    let mut director = routing_director(&[&[0, 1], &[2]], 3);
    let m: GenericMove<RoutingSolution, usize> = SubChainChangeMove::try_new(
        director.working_solution(),
        previous_variable(),
        SubChain::new(vec![1]),
        ChainLink::Entity(2),
        false,
    )
    .unwrap()
    .into();

    let undo = m.undo_move(&director);
    assert!(matches!(undo, GenericMove::ChainRestore(_)));

    assert_undo_restores_links(&mut director, &m);
}
