//! Tests for PillarChangeMove and PillarSwapMove operations.

use super::*;
use planforge_core::PlanForgeError;

// =============================================================================
// PillarChangeMove Tests
// =============================================================================

#[test]
fn test_pillar_change_move_changes_every_entity() {
    let mut director = task_director(&[1, 2, 1, 1]);

    let m =
        PillarChangeMove::try_new(director.working_solution(), &[0, 2, 3], Some(3), &priority_variable())
            .unwrap();
    assert_eq!(m.pillar_size(), 3);
    assert!(m.is_doable(&director));
    m.do_move(&mut director);

    assert_eq!(
        director.working_solution().assigned(),
        vec![Some(3), Some(2), Some(3), Some(3)]
    );
}

#[test]
fn test_pillar_change_move_to_current_value_is_not_doable() {
    let director = task_director(&[1, 1]);

    let m = PillarChangeMove::try_new(director.working_solution(), &[0, 1], Some(1), &priority_variable())
        .unwrap();
    assert!(!m.is_doable(&director));
}

#[test]
fn test_pillar_change_move_rejects_inconsistent_pillar() {
    let solution = TaskSolution::from_priorities(&[1, 2]);

    let result = PillarChangeMove::try_new(&solution, &[0, 1], Some(3), &priority_variable());
    assert!(matches!(result, Err(PlanForgeError::Structural(_))));
}

#[test]
fn test_pillar_change_move_rejects_empty_and_duplicate_pillars() {
    let solution = TaskSolution::from_priorities(&[1, 1]);

    let empty = PillarChangeMove::try_new(&solution, &[], Some(3), &priority_variable());
    assert!(matches!(empty, Err(PlanForgeError::Structural(_))));

    let duplicate = PillarChangeMove::try_new(&solution, &[0, 0], Some(3), &priority_variable());
    assert!(matches!(duplicate, Err(PlanForgeError::Structural(_))));
}

#[test]
fn test_pillar_change_move_stale_pillar_is_not_doable() {
    let mut director = task_director(&[1, 1]);
    let m = PillarChangeMove::try_new(director.working_solution(), &[0, 1], Some(3), &priority_variable())
        .unwrap();

    ChangeMove::for_variable(&priority_variable(), 1, Some(2)).do_move(&mut director);
    assert!(!m.is_doable(&director));
}

#[test]
fn test_pillar_change_move_undo() {
    let mut director = task_director(&[2, 3, 2]);
    let m = PillarChangeMove::try_new(director.working_solution(), &[0, 2], Some(1), &priority_variable())
        .unwrap();

    let undo = m.undo_move(&director);
    assert_eq!(undo.to_value(), Some(&2));

    assert_undo_restores_tasks(&mut director, &m);
}

// =============================================================================
// PillarSwapMove Tests
// =============================================================================

#[test]
fn test_pillar_swap_move_do_move() {
    let mut director = task_director(&[1, 3, 1, 3, 2]);

    let m = PillarSwapMove::try_new(
        director.working_solution(),
        &[0, 2],
        &[1, 3],
        &priority_variable(),
    )
    .unwrap();
    assert!(m.is_doable(&director));
    assert_eq!(m.entity_indices(), &[0, 2, 1, 3]);
    m.do_move(&mut director);

    assert_eq!(
        director.working_solution().assigned(),
        vec![Some(3), Some(1), Some(3), Some(1), Some(2)]
    );
}

#[test]
fn test_pillar_swap_move_rejects_overlap() {
    let solution = TaskSolution::from_priorities(&[1, 1, 1]);

    let result = PillarSwapMove::try_new(&solution, &[0, 1], &[1, 2], &priority_variable());
    assert!(matches!(result, Err(PlanForgeError::Structural(_))));
}

#[test]
fn test_pillar_swap_move_same_values_is_not_doable() {
    let director = task_director(&[2, 2, 2]);

    let m = PillarSwapMove::try_new(director.working_solution(), &[0], &[1, 2], &priority_variable())
        .unwrap();
    assert!(!m.is_doable(&director));
}

#[test]
fn test_pillar_swap_move_undo() {
    let mut director = task_director(&[1, 2, 1, 2]);
    let m = PillarSwapMove::try_new(
        director.working_solution(),
        &[0, 2],
        &[1, 3],
        &priority_variable(),
    )
    .unwrap();

    assert_undo_restores_tasks(&mut director, &m);
}
