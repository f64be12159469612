//! Tests for the chained moves.

use super::*;
use planforge_core::PlanForgeError;

fn sub(entities: &[usize]) -> SubChain {
    SubChain::new(entities.to_vec())
}

// =============================================================================
// SubChainChangeMove Tests
// =============================================================================

#[test]
fn test_sub_chain_change_to_other_chain() {
    let mut director = routing_director(&[&[0, 1, 2], &[3]], 4);

    let m = SubChainChangeMove::try_new(
        director.working_solution(),
        previous_variable(),
        sub(&[1, 2]),
        ChainLink::Entity(3),
        false,
    )
    .unwrap();
    assert!(m.is_doable(&director));
    m.do_move(&mut director);

    assert_eq!(
        director.working_solution().chains(),
        vec![vec![0], vec![3, 1, 2]]
    );
}

#[test]
fn test_sub_chain_change_reversing() {
    let mut director = routing_director(&[&[0, 1, 2], &[3]], 4);

    let m = SubChainChangeMove::try_new(
        director.working_solution(),
        previous_variable(),
        sub(&[1, 2]),
        ChainLink::Entity(3),
        true,
    )
    .unwrap();
    m.do_move(&mut director);

    assert_eq!(
        director.working_solution().chains(),
        vec![vec![0], vec![3, 2, 1]]
    );
}

#[test]
fn test_sub_chain_change_within_chain_reconnects_successor() {
    let mut director = routing_director(&[&[0, 1, 2, 3]], 4);

    let m = SubChainChangeMove::try_new(
        director.working_solution(),
        previous_variable(),
        sub(&[1]),
        ChainLink::Entity(2),
        false,
    )
    .unwrap();
    m.do_move(&mut director);

    assert_eq!(director.working_solution().chains(), vec![vec![0, 2, 1, 3]]);
}

#[test]
fn test_sub_chain_change_to_empty_anchor() {
    let mut director = routing_director(&[&[0, 1], &[]], 2);

    let m = SubChainChangeMove::try_new(
        director.working_solution(),
        previous_variable(),
        sub(&[1]),
        ChainLink::Anchor(1),
        false,
    )
    .unwrap();
    m.do_move(&mut director);

    assert_eq!(director.working_solution().chains(), vec![vec![0], vec![1]]);
}

#[test]
fn test_sub_chain_change_to_current_position_is_not_doable() {
    let director = routing_director(&[&[0, 1, 2]], 3);

    let m = SubChainChangeMove::try_new(
        director.working_solution(),
        previous_variable(),
        sub(&[1, 2]),
        ChainLink::Entity(0),
        false,
    )
    .unwrap();
    assert!(!m.is_doable(&director));

    // Reversing in place still changes the chain.
    let reversing = SubChainChangeMove::try_new(
        director.working_solution(),
        previous_variable(),
        sub(&[1, 2]),
        ChainLink::Entity(0),
        true,
    )
    .unwrap();
    assert!(reversing.is_doable(&director));
}

#[test]
fn test_sub_chain_change_into_itself_is_structural() {
    let solution = RoutingSolution::from_chains(&[&[0, 1, 2]], 3);

    let result = SubChainChangeMove::try_new(
        &solution,
        previous_variable(),
        sub(&[0, 1]),
        ChainLink::Entity(1),
        false,
    );
    assert!(matches!(result, Err(PlanForgeError::Structural(_))));
}

#[test]
fn test_sub_chain_change_rejects_non_contiguous_segment() {
    let solution = RoutingSolution::from_chains(&[&[0, 1, 2]], 3);

    let result = SubChainChangeMove::try_new(
        &solution,
        previous_variable(),
        sub(&[0, 2]),
        ChainLink::Anchor(0),
        false,
    );
    assert!(matches!(result, Err(PlanForgeError::Structural(_))));
}

#[test]
fn test_sub_chain_change_rejects_malformed_chains() {
    let mut solution = RoutingSolution::from_chains(&[&[0, 1], &[2]], 3);
    // Two visits behind the same predecessor.
    routing::set_previous(&mut solution, 2, Some(ChainLink::Entity(0)));

    let result = SubChainChangeMove::try_new(
        &solution,
        previous_variable(),
        sub(&[1]),
        ChainLink::Anchor(1),
        false,
    );
    assert!(matches!(result, Err(PlanForgeError::Structural(_))));
}

#[test]
fn test_sub_chain_change_undo() {
    let mut director = routing_director(&[&[0, 1, 2], &[3, 4]], 5);
    let m = SubChainChangeMove::try_new(
        director.working_solution(),
        previous_variable(),
        sub(&[0, 1]),
        ChainLink::Entity(3),
        true,
    )
    .unwrap();

    assert_undo_restores_links(&mut director, &m);
}

// =============================================================================
// SubChainSwapMove Tests
// =============================================================================

#[test]
fn test_sub_chain_swap_across_chains() {
    let mut director = routing_director(&[&[0, 1, 2], &[3, 4]], 5);

    let m = SubChainSwapMove::try_new(
        director.working_solution(),
        previous_variable(),
        sub(&[1]),
        sub(&[3, 4]),
        false,
    )
    .unwrap();
    m.do_move(&mut director);

    assert_eq!(
        director.working_solution().chains(),
        vec![vec![0, 3, 4, 2], vec![1]]
    );
}

#[test]
fn test_sub_chain_swap_within_chain() {
    let mut director = routing_director(&[&[0, 1, 2, 3, 4]], 5);

    let m = SubChainSwapMove::try_new(
        director.working_solution(),
        previous_variable(),
        sub(&[3, 4]),
        sub(&[0]),
        false,
    )
    .unwrap();
    m.do_move(&mut director);

    assert_eq!(director.working_solution().chains(), vec![vec![3, 4, 1, 2, 0]]);
}

#[test]
fn test_sub_chain_swap_adjacent_segments() {
    let mut director = routing_director(&[&[0, 1, 2]], 3);

    let m = SubChainSwapMove::try_new(
        director.working_solution(),
        previous_variable(),
        sub(&[0]),
        sub(&[1]),
        false,
    )
    .unwrap();
    m.do_move(&mut director);

    assert_eq!(director.working_solution().chains(), vec![vec![1, 0, 2]]);
}

#[test]
fn test_sub_chain_swap_reversing() {
    let mut director = routing_director(&[&[0, 1, 2, 3, 4]], 5);

    let m = SubChainSwapMove::try_new(
        director.working_solution(),
        previous_variable(),
        sub(&[0, 1]),
        sub(&[3, 4]),
        true,
    )
    .unwrap();
    m.do_move(&mut director);

    assert_eq!(director.working_solution().chains(), vec![vec![4, 3, 2, 1, 0]]);
}

#[test]
fn test_sub_chain_swap_rejects_overlap() {
    let solution = RoutingSolution::from_chains(&[&[0, 1, 2]], 3);

    let result = SubChainSwapMove::try_new(
        &solution,
        previous_variable(),
        sub(&[0, 1]),
        sub(&[1, 2]),
        false,
    );
    assert!(matches!(result, Err(PlanForgeError::Structural(_))));
}

#[test]
fn test_sub_chain_swap_undo() {
    let mut director = routing_director(&[&[0, 1, 2, 3, 4]], 5);
    let m = SubChainSwapMove::try_new(
        director.working_solution(),
        previous_variable(),
        sub(&[0]),
        sub(&[2, 3]),
        true,
    )
    .unwrap();

    assert_undo_restores_links(&mut director, &m);
}

// =============================================================================
// TailChainSwapMove Tests
// =============================================================================

#[test]
fn test_tail_chain_swap_across_chains() {
    let mut director = routing_director(&[&[0, 1, 2], &[3, 4]], 5);

    let m = TailChainSwapMove::try_new(
        director.working_solution(),
        previous_variable(),
        1,
        ChainLink::Entity(3),
    )
    .unwrap();
    m.do_move(&mut director);

    assert_eq!(
        director.working_solution().chains(),
        vec![vec![0, 4], vec![3, 1, 2]]
    );
}

#[test]
fn test_tail_chain_swap_with_anchor() {
    let mut director = routing_director(&[&[0, 1, 2], &[3, 4]], 5);

    let m = TailChainSwapMove::try_new(
        director.working_solution(),
        previous_variable(),
        1,
        ChainLink::Anchor(1),
    )
    .unwrap();
    m.do_move(&mut director);

    assert_eq!(
        director.working_solution().chains(),
        vec![vec![0, 3, 4], vec![1, 2]]
    );
}

#[test]
fn test_tail_chain_swap_same_chain_reverses_segment() {
    let mut director = routing_director(&[&[0, 1, 2, 3, 4]], 5);

    let forward = TailChainSwapMove::try_new(
        director.working_solution(),
        previous_variable(),
        1,
        ChainLink::Entity(3),
    )
    .unwrap();
    forward.do_move(&mut director);
    assert_eq!(director.working_solution().chains(), vec![vec![0, 3, 2, 1, 4]]);

    let backward = TailChainSwapMove::try_new(
        director.working_solution(),
        previous_variable(),
        4,
        ChainLink::Entity(3),
    )
    .unwrap();
    backward.do_move(&mut director);
    assert_eq!(director.working_solution().chains(), vec![vec![0, 3, 1, 2, 4]]);
}

#[test]
fn test_tail_chain_swap_with_previous_link_is_not_doable() {
    let director = routing_director(&[&[0, 1, 2]], 3);

    let m = TailChainSwapMove::try_new(
        director.working_solution(),
        previous_variable(),
        1,
        ChainLink::Entity(0),
    )
    .unwrap();
    assert!(!m.is_doable(&director));
}

#[test]
fn test_tail_chain_swap_after_itself_is_structural() {
    let solution = RoutingSolution::from_chains(&[&[0, 1, 2]], 3);

    let result = TailChainSwapMove::try_new(&solution, previous_variable(), 1, ChainLink::Entity(1));
    assert!(matches!(result, Err(PlanForgeError::Structural(_))));
}

#[test]
fn test_tail_chain_swap_undo() {
    let mut director = routing_director(&[&[0, 1, 2], &[3, 4]], 5);
    let m = TailChainSwapMove::try_new(
        director.working_solution(),
        previous_variable(),
        2,
        ChainLink::Anchor(1),
    )
    .unwrap();

    assert_undo_restores_links(&mut director, &m);
}

// =============================================================================
// ChainRestoreMove Tests
// =============================================================================

#[test]
fn test_chain_restore_undo_of_undo_redoes_move() {
    let mut director = routing_director(&[&[0, 1, 2], &[3]], 4);
    let m = SubChainChangeMove::try_new(
        director.working_solution(),
        previous_variable(),
        sub(&[1]),
        ChainLink::Entity(3),
        false,
    )
    .unwrap();

    let undo = m.undo_move(&director);
    m.do_move(&mut director);
    let after = director.working_solution().links();

    let redo = undo.undo_move(&director);
    undo.do_move(&mut director);
    assert_eq!(director.working_solution().chains(), vec![vec![0, 1, 2], vec![3]]);

    assert!(redo.is_doable(&director));
    redo.do_move(&mut director);
    assert_eq!(director.working_solution().links(), after);
}

#[test]
fn test_chain_move_recording_undo_and_score() {
    let mut director = routing_director(&[&[0, 1, 2], &[3]], 4);
    let before_score = director.calculate_score();
    let m = TailChainSwapMove::try_new(
        director.working_solution(),
        previous_variable(),
        1,
        ChainLink::Entity(3),
    )
    .unwrap();

    {
        let mut recording = RecordingScoreDirector::new(&mut director);
        m.do_move(&mut recording);
        assert_ne!(recording.calculate_score(), before_score);
        recording.undo_changes();
    }

    assert_eq!(director.working_solution().chains(), vec![vec![0, 1, 2], vec![3]]);
    assert_eq!(director.calculate_score(), before_score);
}
