use std::sync::Arc;

use super::*;

type TaskNode = MoveSelectorNode<TaskSolution, i32>;
type TaskMove = GenericMove<TaskSolution, i32>;
type TaskUnion = UnionMoveSelector<TaskSolution, TaskMove, TaskNode>;
type TaskProduct = CartesianProductMoveSelector<TaskSolution, TaskMove, TaskNode>;

fn change_node() -> TaskNode {
    MoveSelectorNode::Change(ChangeMoveSelector::new(priority_variable()))
}

fn swap_node() -> TaskNode {
    MoveSelectorNode::Swap(SwapMoveSelector::new(vec![priority_variable()]))
}

fn random_change_node(seed: u64) -> TaskNode {
    MoveSelectorNode::Change(
        ChangeMoveSelector::new(priority_variable())
            .with_order(SelectionOrder::Random, SelectorRng::new(seed)),
    )
}

fn random_swap_node(seed: u64) -> TaskNode {
    MoveSelectorNode::Swap(
        SwapMoveSelector::new(vec![priority_variable()])
            .with_order(SelectionOrder::Random, SelectorRng::new(seed)),
    )
}

#[test]
fn original_union_yields_every_child_move_exactly_once() {
    let director = task_director(&[1, 2, 3]);
    let union = TaskUnion::new(vec![change_node(), swap_node()]);

    let mut expected = debug_all(change_node().iter_moves(&director));
    expected.extend(debug_all(swap_node().iter_moves(&director)));

    assert_eq!(debug_all(union.iter_moves(&director)), expected);
    assert_eq!(union.size(&director), 9 + 3);
    assert!(!union.is_never_ending());
}

#[test]
fn nested_unions_flatten_in_order() {
    let director = task_director(&[1, 2]);
    let inner = MoveSelectorNode::Union(UnionMoveSelector::new(vec![swap_node(), change_node()]));
    let outer = TaskUnion::new(vec![change_node(), inner]);

    let moves: Vec<_> = outer.iter_moves(&director).collect();

    assert_eq!(moves.len(), 6 + 1 + 6);
    assert!(matches!(moves[6], GenericMove::Swap(_)));
}

#[test]
fn random_union_samples_every_child() {
    let director = task_director(&[1, 2, 3]);
    let union = TaskUnion::new(vec![random_change_node(1), random_swap_node(2)])
        .with_order(SelectionOrder::Random, SelectorRng::new(3));

    let moves: Vec<_> = union.iter_moves(&director).take(500).collect();

    assert!(union.is_never_ending());
    assert_eq!(moves.len(), 500);
    assert!(moves.iter().any(|m| matches!(m, GenericMove::Change(_))));
    assert!(moves.iter().any(|m| matches!(m, GenericMove::Swap(_))));
}

#[test]
fn random_union_honors_fixed_weights() {
    let director = task_director(&[1, 2, 3]);
    let union = TaskUnion::new(vec![random_change_node(1), random_swap_node(2)])
        .with_order(SelectionOrder::Random, SelectorRng::new(3))
        .with_fixed_weights(vec![0.0, 1.0]);

    assert!(union
        .iter_moves(&director)
        .take(100)
        .all(|m| matches!(m, GenericMove::Swap(_))));
}

#[test]
fn weight_factory_overrides_fixed_weights() {
    let director = task_director(&[1, 2, 3]);
    let only_first = |_: &TaskSolution, child: usize| if child == 0 { 1.0 } else { 0.0 };
    let union = TaskUnion::new(vec![random_change_node(1), random_swap_node(2)])
        .with_order(SelectionOrder::Random, SelectorRng::new(3))
        .with_fixed_weights(vec![0.0, 1.0])
        .with_weight_factory(Arc::new(only_first));

    assert!(union
        .iter_moves(&director)
        .take(100)
        .all(|m| matches!(m, GenericMove::Change(_))));
}

#[test]
fn random_union_samples_with_huge_fixed_weights() {
    let director = task_director(&[1, 2, 3]);
    let union = TaskUnion::new(vec![random_change_node(1), random_swap_node(2)])
        .with_order(SelectionOrder::Random, SelectorRng::new(3))
        .with_fixed_weights(vec![f64::MAX, f64::MAX]);

    let moves: Vec<_> = union.iter_moves(&director).take(300).collect();

    assert_eq!(moves.len(), 300);
    assert!(moves.iter().any(|m| matches!(m, GenericMove::Change(_))));
    assert!(moves.iter().any(|m| matches!(m, GenericMove::Swap(_))));
}

#[test]
fn random_union_skips_non_finite_factory_weights() {
    let director = task_director(&[1, 2, 3]);
    let weights = |_: &TaskSolution, child: usize| match child {
        0 => f64::INFINITY,
        1 => f64::NAN,
        _ => 1.0,
    };
    let union = TaskUnion::new(vec![
        random_change_node(1),
        random_change_node(2),
        random_swap_node(3),
    ])
    .with_order(SelectionOrder::Random, SelectorRng::new(4))
    .with_weight_factory(Arc::new(weights));

    assert!(union
        .iter_moves(&director)
        .take(100)
        .all(|m| matches!(m, GenericMove::Swap(_))));
}

#[test]
fn random_union_drops_exhausted_children() {
    let director = task_director(&[1, 2]);
    let union = TaskUnion::new(vec![change_node(), swap_node()])
        .with_order(SelectionOrder::Random, SelectorRng::new(8));

    // Finite children: every move comes out once, in some interleaving.
    let mut moves = debug_all(union.iter_moves(&director));
    let mut expected = debug_all(change_node().iter_moves(&director));
    expected.extend(debug_all(swap_node().iter_moves(&director)));
    moves.sort();
    expected.sort();

    assert_eq!(moves, expected);
}

#[test]
fn random_union_is_reproducible_for_a_seed() {
    let director = task_director(&[1, 2, 3, 2]);
    let sample = |seed: u64| {
        let union = TaskUnion::new(vec![random_change_node(seed), random_swap_node(seed + 1)])
            .with_order(SelectionOrder::Random, SelectorRng::new(seed + 2));
        debug_all(union.iter_moves(&director).take(60))
    };

    assert_eq!(sample(10), sample(10));
}

#[test]
fn cartesian_product_yields_m_times_n_composites() {
    let director = task_director(&[1, 2, 3]);
    let product = TaskProduct::new(vec![change_node(), swap_node()]);

    let moves: Vec<_> = product.iter_moves(&director).collect();

    assert_eq!(moves.len(), 9 * 3);
    assert_eq!(product.size(&director), 27);
    assert!(moves.iter().all(|m| m.len() == 2));
    assert!(moves
        .iter()
        .all(|m| matches!(m.moves(), [GenericMove::Change(_), GenericMove::Swap(_)])));
}

#[test]
fn cartesian_product_with_an_empty_child_is_empty() {
    let director = task_director(&[1]);
    let product = TaskProduct::new(vec![change_node(), swap_node()]);

    assert_eq!(product.iter_moves(&director).count(), 0);
    assert_eq!(product.size(&director), 0);
}

#[test]
fn cartesian_product_can_ignore_empty_children() {
    let director = task_director(&[1]);
    let product = TaskProduct::new(vec![change_node(), swap_node()])
        .with_ignore_empty_child_iterators(true);

    let moves: Vec<_> = product.iter_moves(&director).collect();

    assert_eq!(moves.len(), 3);
    assert!(moves.iter().all(|m| m.len() == 1));
    assert_eq!(product.size(&director), 3);
}

#[test]
fn cartesian_product_applies_children_atomically() {
    let mut director = task_director(&[1, 2, 3]);
    let product = TaskProduct::new(vec![change_node(), swap_node()]);
    let m = product
        .iter_moves(&director)
        .find(|m| m.is_doable(&director))
        .unwrap();
    let before = director.working_solution().assigned();

    let undo = m.undo_move(&director);
    m.do_move(&mut director);
    assert_ne!(director.working_solution().assigned(), before);
    undo.do_move(&mut director);

    assert_eq!(director.working_solution().assigned(), before);
}

#[test]
fn nested_cartesian_product_moves_undo_through_generic_move() {
    let mut director = task_director(&[1, 2, 3]);
    let inner = MoveSelectorNode::CartesianProduct(TaskProduct::new(vec![
        change_node(),
        swap_node(),
    ]));
    let outer = MoveSelectorNode::CartesianProduct(TaskProduct::new(vec![inner, change_node()]));
    let moves: Vec<TaskMove> = outer.iter_moves(&director).take(20).collect();
    let before = director.working_solution().assigned();

    for m in &moves {
        if !m.is_doable(&director) {
            continue;
        }
        let undo = m.undo_move(&director);
        m.do_move(&mut director);
        undo.do_move(&mut director);
        assert_eq!(director.working_solution().assigned(), before, "after {:?}", m);
    }
}

#[test]
fn random_cartesian_product_is_never_ending_when_children_are() {
    let director = task_director(&[1, 2, 3]);
    let product = TaskProduct::new(vec![random_change_node(4), random_swap_node(5)])
        .with_order(SelectionOrder::Random);

    assert!(product.is_never_ending());
    assert_eq!(product.iter_moves(&director).take(200).count(), 200);
}

#[test]
fn count_limit_caps_moves_and_size() {
    let director = task_director(&[1, 2, 3]);
    let limited = change_node().limited(4);

    assert_eq!(limited.iter_moves(&director).count(), 4);
    assert_eq!(limited.size(&director), 4);
    assert_eq!(limited.kind(), "change");
}

#[test]
fn count_limit_ends_never_ending_selectors() {
    let director = task_director(&[1, 2, 3]);
    let limited = random_change_node(1).limited(25);

    assert!(!limited.is_never_ending());
    assert_eq!(limited.iter_moves(&director).count(), 25);
}

#[test]
fn count_limit_above_size_returns_everything() {
    let director = task_director(&[1, 2]);
    let limited = swap_node().limited(10);

    assert_eq!(limited.iter_moves(&director).count(), 1);
    assert_eq!(limited.size(&director), 1);
}
