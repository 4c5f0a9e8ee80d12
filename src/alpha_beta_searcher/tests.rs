//! Domain-agnostic tests for the search algorithms using Nim and explicit game trees.
//!
//! Test coverage:
//! - Basic search functionality (winning moves, losing positions, game completion)
//! - Static evaluation (zero depth, terminal roots, positions without moves)
//! - Agreement with plain minimax (scores, chosen moves, leaf counts)
//! - Tie-breaking and pruning boundaries
//! - Fault isolation (rejected moves, NaN evaluations)
//! - Extensions (branching limit, deadline, parallel root)

use super::*;
use crate::games::random_tree::{RandomTree, RandomTreeError, TreeNode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid move")]
struct InvalidMove;

/// Nim: players take 1-3 objects, last to take wins.
#[derive(Clone, Debug, PartialEq)]
struct NimState {
    pile: u8,
    last_taker: Option<Side>,
}

impl NimState {
    fn new(pile: u8) -> Self {
        Self {
            pile,
            last_taker: None,
        }
    }
}

#[derive(Default)]
struct Nim {
    generate_calls: AtomicUsize,
}

impl GameModel for Nim {
    type State = NimState;
    type Move = u8;
    type Error = InvalidMove;

    fn generate_moves(&self, state: &NimState, _side: Side) -> Vec<u8> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        (1..=std::cmp::min(3, state.pile)).collect()
    }

    fn apply_move(&self, state: &NimState, take: &u8, side: Side) -> Result<NimState, InvalidMove> {
        if *take > state.pile || *take == 0 || *take > 3 {
            return Err(InvalidMove);
        }
        Ok(NimState {
            pile: state.pile - take,
            last_taker: Some(side),
        })
    }

    fn is_terminal(&self, state: &NimState) -> bool {
        state.pile == 0
    }

    fn evaluate(&self, state: &NimState) -> Score {
        match (state.pile, state.last_taker) {
            (0, Some(side)) => side.sign() * 1000.0,
            _ => 0.0,
        }
    }
}

/// A tree that refuses to apply some moves and cannot evaluate some nodes.
struct FaultyTree {
    tree: RandomTree,
    rejected: Vec<usize>,
    unevaluable: Vec<usize>,
}

impl FaultyTree {
    fn new(tree: RandomTree) -> Self {
        Self {
            tree,
            rejected: Vec::new(),
            unevaluable: Vec::new(),
        }
    }
}

impl GameModel for FaultyTree {
    type State = usize;
    type Move = usize;
    type Error = RandomTreeError;

    fn generate_moves(&self, state: &usize, side: Side) -> Vec<usize> {
        self.tree.generate_moves(state, side)
    }

    fn apply_move(&self, state: &usize, child: &usize, side: Side) -> Result<usize, RandomTreeError> {
        if self.rejected.contains(child) {
            return Err(RandomTreeError::NotAChild {
                node: *state,
                child: *child,
            });
        }
        self.tree.apply_move(state, child, side)
    }

    fn is_terminal(&self, state: &usize) -> bool {
        self.tree.is_terminal(state)
    }

    fn evaluate(&self, state: &usize) -> Score {
        if self.unevaluable.contains(state) {
            Score::NAN
        } else {
            self.tree.evaluate(state)
        }
    }
}

/// A position that is not over but offers no moves.
struct Stuck;

impl GameModel for Stuck {
    type State = ();
    type Move = u8;
    type Error = InvalidMove;

    fn generate_moves(&self, _state: &(), _side: Side) -> Vec<u8> {
        Vec::new()
    }

    fn apply_move(&self, _state: &(), _game_move: &u8, _side: Side) -> Result<(), InvalidMove> {
        Err(InvalidMove)
    }

    fn is_terminal(&self, _state: &()) -> bool {
        false
    }

    fn evaluate(&self, _state: &()) -> Score {
        7.0
    }
}

/// Builds a tree from `(score, children)` pairs. Node 0 is the root.
fn tree(nodes: &[(Score, &[usize])]) -> RandomTree {
    RandomTree::from_nodes(
        nodes
            .iter()
            .map(|(score, children)| TreeNode {
                score: *score,
                children: children.to_vec(),
            })
            .collect(),
    )
}

/// Root maximizer with two minimizer children: the first is worth 5, the second is refuted
/// by its first leaf.
fn cutoff_tree() -> RandomTree {
    tree(&[
        (0.0, &[1, 2]),
        (0.0, &[3, 4]),
        (0.0, &[5, 6]),
        (5.0, &[]),
        (6.0, &[]),
        (3.0, &[]),
        (9.0, &[]),
    ])
}

#[test]
fn test_nim_finds_winning_move_from_5() {
    let result = best_move(&Nim::default(), &NimState::new(5), 10, Side::Maximizer).unwrap();

    assert_eq!(
        result.best_move,
        Some(1),
        "From pile of 5, should take 1 to leave opponent with 4"
    );
    assert_eq!(result.score, 1000.0);
}

#[test]
fn test_nim_minimizer_finds_winning_move_from_7() {
    let result = best_move(&Nim::default(), &NimState::new(7), 10, Side::Minimizer).unwrap();

    assert_eq!(
        result.best_move,
        Some(3),
        "From pile of 7, should take 3 to leave opponent with 4"
    );
    assert_eq!(result.score, -1000.0);
}

#[test]
fn test_nim_exhaustive_winning_positions() {
    for pile in 1..=9u8 {
        if pile % 4 == 0 {
            continue;
        }

        let result = best_move(&Nim::default(), &NimState::new(pile), pile, Side::Maximizer)
            .unwrap();

        let take = result.best_move.expect("a move should be chosen");
        assert_eq!(
            (pile - take) % 4,
            0,
            "From pile {}, taking {} leaves {} which should be a multiple of 4",
            pile,
            take,
            pile - take
        );
    }
}

#[test]
fn test_nim_losing_position_takes_first_move() {
    let result = best_move(&Nim::default(), &NimState::new(4), 10, Side::Maximizer).unwrap();

    assert_eq!(result.best_move, Some(1));
    assert_eq!(result.score, -1000.0);
}

#[test]
fn test_nim_game_to_completion() {
    let model = Nim::default();
    let mut state = NimState::new(5);
    let mut context = SearchContext::new(12);
    let mut side = Side::Maximizer;
    let mut move_count = 0;

    while !model.is_terminal(&state) {
        let result = alpha_beta_search(&mut context, &model, &state, side).unwrap();
        let take = result.best_move.expect("a live game always has a move");

        state = model.apply_move(&state, &take, side).unwrap();
        side = side.opponent();
        move_count += 1;

        assert!(move_count < 20, "Game should not exceed 20 moves");
    }

    assert_eq!(state.last_taker, Some(Side::Maximizer));
}

#[test]
fn test_zero_depth_evaluates_root_without_generating_moves() {
    let model = Nim::default();
    let state = NimState::new(5);

    let result = best_move(&model, &state, 0, Side::Maximizer).unwrap();

    assert_eq!(result, SearchResult::leaf(model.evaluate(&state)));
    assert_eq!(model.generate_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_terminal_root_is_evaluated_without_generating_moves() {
    let model = Nim::default();
    let state = NimState {
        pile: 0,
        last_taker: Some(Side::Minimizer),
    };

    let result = best_move(&model, &state, 5, Side::Maximizer).unwrap();

    assert_eq!(result.best_move, None);
    assert_eq!(result.score, -1000.0);
    assert_eq!(model.generate_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_no_moves_falls_back_to_static_evaluation() {
    let mut context = SearchContext::new(3);

    let result = alpha_beta_search(&mut context, &Stuck, &(), Side::Minimizer).unwrap();

    assert_eq!(result, SearchResult::leaf(7.0));
    assert_eq!(result.best_move_or(9), 9);
}

#[test]
fn test_search_is_deterministic() {
    let tree = RandomTree::generate(17, 2..=4, 4);

    let first = best_move(&tree, &RandomTree::ROOT, 4, Side::Maximizer).unwrap();
    let second = best_move(&tree, &RandomTree::ROOT, 4, Side::Maximizer).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_alpha_beta_matches_minimax_on_random_trees() {
    for seed in 0..40 {
        for depth in 1..=4u8 {
            let tree = RandomTree::generate(seed, 2..=4, depth);

            for side in ALL_SIDES {
                let mut pruned = SearchContext::new(depth);
                let mut full = SearchContext::new(depth);

                let expected = minimax_search(&mut full, &tree, &RandomTree::ROOT, side).unwrap();
                let result =
                    alpha_beta_search(&mut pruned, &tree, &RandomTree::ROOT, side).unwrap();

                assert_eq!(
                    result, expected,
                    "seed {}, depth {}, {} to move",
                    seed, depth, side
                );
                assert!(pruned.leaf_count() <= full.leaf_count());
                assert!(pruned.searched_position_count() <= full.searched_position_count());
            }
        }
    }
}

#[test]
fn test_chosen_move_is_generated_at_the_root() {
    for seed in 0..20 {
        let tree = RandomTree::generate(seed, 1..=5, 3);
        let moves = tree.generate_moves(&RandomTree::ROOT, Side::Minimizer);

        let result = best_move(&tree, &RandomTree::ROOT, 3, Side::Minimizer).unwrap();

        let chosen = result.best_move.expect("the root has children");
        assert!(moves.contains(&chosen));
    }
}

#[test]
fn test_minimax_visits_every_node() {
    let tree = RandomTree::generate(9, 3..=3, 3);
    let mut context = SearchContext::new(3);

    let _ = minimax_search(&mut context, &tree, &RandomTree::ROOT, Side::Maximizer).unwrap();

    assert_eq!(context.searched_position_count(), tree.len());
    assert_eq!(context.leaf_count(), tree.leaf_count());
}

#[test]
fn test_alpha_beta_prunes_refuted_sibling() {
    let tree = cutoff_tree();
    let mut context = SearchContext::new(2);

    let result = alpha_beta_search(&mut context, &tree, &RandomTree::ROOT, Side::Maximizer)
        .unwrap();

    assert_eq!(result.best_move, Some(1));
    assert_eq!(result.score, 5.0);
    assert_eq!(context.cutoff_count(), 1);
    assert_eq!(context.leaf_count(), 3);
}

#[test]
fn test_minimizer_root_prunes_refuted_sibling() {
    let tree = cutoff_tree();
    let mut context = SearchContext::new(2);

    let result = alpha_beta_search(&mut context, &tree, &RandomTree::ROOT, Side::Minimizer)
        .unwrap();

    assert_eq!(result.best_move, Some(1));
    assert_eq!(result.score, 6.0);
    assert_eq!(context.cutoff_count(), 1);
}

#[test]
fn test_ties_keep_the_first_move() {
    let tree = tree(&[(0.0, &[1, 2, 3]), (4.0, &[]), (4.0, &[]), (-4.0, &[])]);

    let max = best_move(&tree, &RandomTree::ROOT, 1, Side::Maximizer).unwrap();
    let min = best_move(&tree, &RandomTree::ROOT, 1, Side::Minimizer).unwrap();

    assert_eq!(max.best_move, Some(1));
    assert_eq!(max.score, 4.0);
    assert_eq!(min.best_move, Some(3));
    assert_eq!(min.score, -4.0);
}

#[test]
fn test_hopeless_positions_still_pick_the_first_move() {
    let lost = tree(&[
        (0.0, &[1, 2]),
        (Score::NEG_INFINITY, &[]),
        (Score::NEG_INFINITY, &[]),
    ]);
    let won = tree(&[(0.0, &[1, 2]), (Score::INFINITY, &[]), (Score::INFINITY, &[])]);

    let max = best_move(&lost, &RandomTree::ROOT, 1, Side::Maximizer).unwrap();
    let min = best_move(&won, &RandomTree::ROOT, 1, Side::Minimizer).unwrap();
    let mut context = SearchContext::new(1);
    let reference = minimax_search(&mut context, &lost, &RandomTree::ROOT, Side::Maximizer)
        .unwrap();

    assert_eq!(max.best_move, Some(1));
    assert_eq!(max.score, Score::NEG_INFINITY);
    assert_eq!(min.best_move, Some(1));
    assert_eq!(min.score, Score::INFINITY);
    assert_eq!(reference, max);
}

#[test]
fn test_equal_score_sibling_is_pruned() {
    // The second minimizer node can do no better than 5 once its first leaf equals alpha.
    let tree = tree(&[
        (0.0, &[1, 2]),
        (0.0, &[3]),
        (0.0, &[4, 5]),
        (5.0, &[]),
        (5.0, &[]),
        (100.0, &[]),
    ]);
    let mut context = SearchContext::new(2);

    let result = alpha_beta_search(&mut context, &tree, &RandomTree::ROOT, Side::Maximizer)
        .unwrap();

    assert_eq!(result.best_move, Some(1));
    assert_eq!(result.score, 5.0);
    assert_eq!(context.cutoff_count(), 1);
    assert_eq!(context.leaf_count(), 2);
}

#[test]
fn test_rejected_move_is_skipped() {
    let mut model = FaultyTree::new(tree(&[(0.0, &[1, 2]), (10.0, &[]), (1.0, &[])]));
    model.rejected.push(1);
    let mut context = SearchContext::new(1);

    let result = alpha_beta_search(&mut context, &model, &RandomTree::ROOT, Side::Maximizer)
        .unwrap();

    assert_eq!(result.best_move, Some(2));
    assert_eq!(result.score, 1.0);
    assert_eq!(context.skipped_branch_count(), 1);
}

#[test]
fn test_nan_subtree_is_skipped() {
    let mut model = FaultyTree::new(tree(&[(0.0, &[1, 2]), (10.0, &[]), (1.0, &[])]));
    model.unevaluable.push(1);
    let mut context = SearchContext::new(1);

    let result = alpha_beta_search(&mut context, &model, &RandomTree::ROOT, Side::Maximizer)
        .unwrap();

    assert_eq!(result.best_move, Some(2));
    assert_eq!(result.score, 1.0);
    assert_eq!(context.skipped_branch_count(), 1);
}

#[test]
fn test_all_branches_skipped_falls_back_to_root_evaluation() {
    let mut model = FaultyTree::new(tree(&[(3.0, &[1, 2]), (10.0, &[]), (1.0, &[])]));
    model.rejected.push(1);
    model.unevaluable.push(2);

    let result = best_move(&model, &RandomTree::ROOT, 2, Side::Minimizer).unwrap();

    assert_eq!(result, SearchResult::leaf(3.0));
}

#[test]
fn test_unevaluable_root_is_an_error() {
    let mut model = FaultyTree::new(tree(&[(3.0, &[])]));
    model.unevaluable.push(0);

    assert_eq!(
        best_move(&model, &RandomTree::ROOT, 2, Side::Maximizer),
        Err(SearchError::InvalidEvaluation)
    );
}

#[test]
fn test_max_branching_keeps_the_first_moves() {
    let tree = tree(&[(0.0, &[1, 2, 3]), (1.0, &[]), (2.0, &[]), (3.0, &[])]);
    let mut context = SearchContext::new(1).with_max_branching(2);

    let result = alpha_beta_search(&mut context, &tree, &RandomTree::ROOT, Side::Maximizer)
        .unwrap();

    assert_eq!(result.best_move, Some(2));
    assert_eq!(result.score, 2.0);
    assert_eq!(context.leaf_count(), 2);
}

#[test]
fn test_expired_deadline_evaluates_the_root() {
    let tree = RandomTree::generate(4, 2..=3, 3);
    let mut context = SearchContext::new(3).with_time_limit(Duration::ZERO);

    let result = alpha_beta_search(&mut context, &tree, &RandomTree::ROOT, Side::Maximizer)
        .unwrap();

    assert_eq!(result, SearchResult::leaf(tree.evaluate(&RandomTree::ROOT)));
}

#[test]
fn test_generous_deadline_does_not_change_the_result() {
    let tree = RandomTree::generate(4, 2..=3, 3);
    let mut context = SearchContext::new(3).with_time_limit(Duration::from_secs(60));

    let timed = alpha_beta_search(&mut context, &tree, &RandomTree::ROOT, Side::Maximizer)
        .unwrap();
    let untimed = best_move(&tree, &RandomTree::ROOT, 3, Side::Maximizer).unwrap();

    assert_eq!(timed, untimed);
}

#[test]
fn test_parallel_vs_sequential_same_result() {
    for seed in 0..20 {
        let tree = RandomTree::generate(seed, 2..=4, 3);

        for side in ALL_SIDES {
            let mut sequential = SearchContext::new(3);
            let mut parallel = SearchContext::new(3).with_parallel(true);

            let expected =
                alpha_beta_search(&mut sequential, &tree, &RandomTree::ROOT, side).unwrap();
            let result = alpha_beta_search(&mut parallel, &tree, &RandomTree::ROOT, side).unwrap();

            assert_eq!(result, expected, "seed {}, {} to move", seed, side);
        }
    }
}

#[test]
fn test_parallel_search_skips_rejected_root_moves() {
    let mut model = FaultyTree::new(tree(&[(0.0, &[1, 2]), (10.0, &[]), (1.0, &[])]));
    model.rejected.push(1);
    let mut context = SearchContext::new(1).with_parallel(true);

    let result = alpha_beta_search(&mut context, &model, &RandomTree::ROOT, Side::Maximizer)
        .unwrap();

    assert_eq!(result.best_move, Some(2));
    assert_eq!(context.skipped_branch_count(), 1);
}

#[test]
fn test_stats_are_reset_between_searches() {
    let tree = RandomTree::generate(2, 2..=2, 2);
    let mut context = SearchContext::new(2);

    let first = alpha_beta_search(&mut context, &tree, &RandomTree::ROOT, Side::Maximizer)
        .unwrap();
    let first_count = context.searched_position_count();
    let _ = alpha_beta_search(&mut context, &tree, &RandomTree::ROOT, Side::Maximizer).unwrap();

    assert!(first_count > 0);
    assert_eq!(context.searched_position_count(), first_count);
    assert_eq!(context.last_score(), Some(first.score));
    assert!(context.last_search_duration().is_some());
}

#[test]
fn test_side_parsing_and_display() {
    assert_eq!("max".parse::<Side>(), Ok(Side::Maximizer));
    assert_eq!("minimizer".parse::<Side>(), Ok(Side::Minimizer));
    assert!("white".parse::<Side>().is_err());
    assert_eq!(Side::Minimizer.to_string(), "minimizer");
    assert_eq!(Side::Maximizer.opponent(), Side::Minimizer);
    assert_eq!(Side::Minimizer.sign(), -1.0);
}
