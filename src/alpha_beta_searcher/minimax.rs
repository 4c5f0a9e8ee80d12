//! Plain minimax without pruning.
//!
//! Walks the full tree to the configured depth. Alpha-beta must always agree with it on the
//! root score; it is also the "count everything" baseline for node statistics.

use log::debug;

use super::search::{search_branch, update_best, worst_score};
use super::{GameModel, SearchContext, SearchError, SearchResult, Side};

/// Searches every move to the context's depth and returns the best one for `side`.
///
/// Tie-breaking, branching limit, and branch skipping behave exactly as in
/// [`alpha_beta_search`](super::alpha_beta_search). The parallel and deadline options are
/// ignored.
#[must_use = "search returns the best move found"]
pub fn minimax_search<G: GameModel>(
    context: &mut SearchContext,
    model: &G,
    state: &G::State,
    side: Side,
) -> Result<SearchResult<G::Move>, SearchError> {
    let depth = context.search_depth();
    debug!("minimax search depth: {}, side: {}", depth, side);

    context.reset_stats();
    let start = context.start_clock();
    let result = minimax(context, model, state, depth, side)?;
    context.finish(result.score, start);

    Ok(result)
}

fn minimax<G: GameModel>(
    context: &SearchContext,
    model: &G,
    state: &G::State,
    depth: u8,
    side: Side,
) -> Result<SearchResult<G::Move>, SearchError> {
    context.increment_position_count();

    if depth == 0 || model.is_terminal(state) {
        return context.evaluate_leaf(model, state);
    }

    let candidates = context.candidate_moves(model, state, side);

    let mut best_score = worst_score(side);
    let mut best_move = None;

    for game_move in candidates.iter() {
        let score = search_branch(context, model, state, game_move, side, |child| {
            minimax(context, model, child, depth - 1, side.opponent())
        });
        if let Some(score) = score {
            update_best(score, game_move, side, &mut best_score, &mut best_move);
        }
    }

    if best_move.is_none() {
        return context.evaluate_leaf(model, state);
    }

    Ok(SearchResult {
        score: best_score,
        best_move,
    })
}
