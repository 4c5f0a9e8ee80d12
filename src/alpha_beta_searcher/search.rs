//! Alpha-beta search algorithm implementation.
//!
//! # Core Algorithm
//!
//! Alpha-beta pruning is an optimization of minimax search that maintains a window [alpha, beta]
//! representing the range of scores that matter. Moves that fall outside this window can be
//! pruned without affecting the final result. The algorithm guarantees the same root score as
//! minimax but explores fewer nodes.
//!
//! Layers alternate by ply: the side passed to the search moves first, and every child is
//! searched for the opponent. Scores are always relative to `Side::Maximizer`.
//!
//! # Tie-breaking
//!
//! A move only replaces the best-so-far when it is strictly better, so among equal scores the
//! first move in generation order wins. Cutoffs happen as soon as `beta <= alpha`, which means
//! equal-score siblings are pruned as well.
//!
//! # Fault isolation
//!
//! A move the model refuses to apply, or a subtree whose evaluation is not a number, is logged
//! and skipped. It never counts as a result. If every branch at a node is skipped, the node
//! falls back to its own static evaluation.
//!
//! # Extensions
//!
//! ## Branching limit
//! `SearchConfig::max_branching` keeps only the first N generated moves at every node.
//!
//! ## Deadline
//! `SearchConfig::time_limit` is checked once per visited node. After it expires every node is
//! treated as a depth cutoff, so the search unwinds with the best moves found so far.
//!
//! ## Parallel Search
//! Root moves can be searched in parallel on the rayon pool. Each root child is searched with
//! a full window and the results are folded in generation order, so the chosen move and score
//! match the sequential search.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use log::{debug, trace, warn};
use rayon::prelude::*;
use thiserror::Error;

use super::{GameModel, Score, Side};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("evaluation of the searched position is not a number")]
    InvalidEvaluation,
}

/// Search configuration parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Maximum number of plies to explore. `0` evaluates the root immediately.
    pub depth: u8,
    /// Search root moves on the rayon thread pool.
    pub parallel: bool,
    /// Only consider the first N generated moves at every node.
    pub max_branching: Option<usize>,
    /// Stop descending once this much time has passed since the search started.
    pub time_limit: Option<Duration>,
}

impl SearchConfig {
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            parallel: false,
            max_branching: None,
            time_limit: None,
        }
    }
}

/// Statistics collected during search.
struct SearchStats {
    node_count: AtomicUsize,
    leaf_count: AtomicUsize,
    cutoff_count: AtomicUsize,
    skipped_branch_count: AtomicUsize,
    last_score: Option<Score>,
    last_duration: Option<Duration>,
}

impl SearchStats {
    fn new() -> Self {
        Self {
            node_count: AtomicUsize::new(0),
            leaf_count: AtomicUsize::new(0),
            cutoff_count: AtomicUsize::new(0),
            skipped_branch_count: AtomicUsize::new(0),
            last_score: None,
            last_duration: None,
        }
    }

    fn reset(&mut self) {
        self.last_score = None;
        self.last_duration = None;
        self.node_count.store(0, Ordering::SeqCst);
        self.leaf_count.store(0, Ordering::SeqCst);
        self.cutoff_count.store(0, Ordering::SeqCst);
        self.skipped_branch_count.store(0, Ordering::SeqCst);
    }

    fn record_result(&mut self, score: Score, duration: Duration) {
        self.last_score = Some(score);
        self.last_duration = Some(duration);
    }
}

/// The outcome of a search: a maximizer-relative score and the move achieving it.
///
/// `best_move` is `None` when the node was evaluated statically: depth cutoff, terminal
/// state, or no legal moves.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult<M> {
    pub score: Score,
    pub best_move: Option<M>,
}

impl<M> SearchResult<M> {
    pub fn leaf(score: Score) -> Self {
        Self {
            score,
            best_move: None,
        }
    }

    /// The chosen move, or `default` when the search had nothing to choose from.
    /// Hosts use this to fall back to their idle action.
    pub fn best_move_or(self, default: M) -> M {
        self.best_move.unwrap_or(default)
    }
}

/// Per-call search state: configuration plus counters.
///
/// The context never holds game state, so one context can be reused across calls; counters
/// are reset at the start of every search.
pub struct SearchContext {
    config: SearchConfig,
    stats: SearchStats,
    deadline: Option<Instant>,
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::with_config(SearchConfig::default())
    }
}

impl SearchContext {
    pub fn new(depth: u8) -> Self {
        Self::with_config(SearchConfig::new(depth))
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::new(),
            deadline: None,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    pub fn with_max_branching(mut self, max_branching: usize) -> Self {
        self.config.max_branching = Some(max_branching);
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.config.time_limit = Some(time_limit);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn search_depth(&self) -> u8 {
        self.config.depth
    }

    pub fn set_search_depth(&mut self, depth: u8) {
        self.config.depth = depth;
    }

    pub fn is_parallel(&self) -> bool {
        self.config.parallel
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
        self.deadline = None;
    }

    /// Number of nodes visited, leaves included.
    pub fn searched_position_count(&self) -> usize {
        self.stats.node_count.load(Ordering::SeqCst)
    }

    /// Number of static evaluations performed.
    pub fn leaf_count(&self) -> usize {
        self.stats.leaf_count.load(Ordering::SeqCst)
    }

    pub fn cutoff_count(&self) -> usize {
        self.stats.cutoff_count.load(Ordering::SeqCst)
    }

    /// Number of branches dropped because the move could not be applied or its subtree
    /// could not be evaluated.
    pub fn skipped_branch_count(&self) -> usize {
        self.stats.skipped_branch_count.load(Ordering::SeqCst)
    }

    pub fn last_score(&self) -> Option<Score> {
        self.stats.last_score
    }

    pub fn last_search_duration(&self) -> Option<Duration> {
        self.stats.last_duration
    }

    pub(crate) fn start_clock(&mut self) -> Instant {
        let start = Instant::now();
        self.deadline = self.config.time_limit.map(|limit| start + limit);
        start
    }

    pub(crate) fn finish(&mut self, score: Score, start: Instant) {
        self.stats.record_result(score, start.elapsed());
    }

    pub(crate) fn deadline_passed(&self) -> bool {
        self.deadline
            .map_or(false, |deadline| Instant::now() >= deadline)
    }

    /// Generates moves for `side`, applying the branching limit.
    pub(crate) fn candidate_moves<G: GameModel>(
        &self,
        model: &G,
        state: &G::State,
        side: Side,
    ) -> Vec<G::Move> {
        let mut moves = model.generate_moves(state, side);
        if let Some(limit) = self.config.max_branching {
            moves.truncate(limit);
        }
        moves
    }

    pub(crate) fn increment_position_count(&self) {
        self.stats.node_count.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn increment_cutoff_count(&self) {
        self.stats.cutoff_count.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn increment_skipped_branch_count(&self) {
        self.stats.skipped_branch_count.fetch_add(1, Ordering::SeqCst);
    }

    /// Statically evaluates `state`, rejecting scores that cannot be ordered.
    pub(crate) fn evaluate_leaf<G: GameModel>(
        &self,
        model: &G,
        state: &G::State,
    ) -> Result<SearchResult<G::Move>, SearchError> {
        self.stats.leaf_count.fetch_add(1, Ordering::SeqCst);
        let score = model.evaluate(state);
        if score.is_nan() {
            return Err(SearchError::InvalidEvaluation);
        }
        Ok(SearchResult::leaf(score))
    }
}

/// The worst possible score for `side`, used to seed the best-so-far.
pub(crate) fn worst_score(side: Side) -> Score {
    if side.is_maximizing() {
        Score::NEG_INFINITY
    } else {
        Score::INFINITY
    }
}

/// Updates best score and move if new score is strictly better.
/// The first searched move is always taken so a node never reports a sentinel score.
/// Returns true if best_score was updated.
pub(crate) fn update_best<M: Clone>(
    score: Score,
    candidate_move: &M,
    side: Side,
    best_score: &mut Score,
    best_move: &mut Option<M>,
) -> bool {
    let is_better = best_move.is_none()
        || if side.is_maximizing() {
            score > *best_score
        } else {
            score < *best_score
        };

    if is_better {
        *best_score = score;
        *best_move = Some(candidate_move.clone());
    }
    is_better
}

/// Applies `game_move` and searches the resulting subtree with `search`.
///
/// Returns `None` when the branch has to be skipped: the model rejected the move, or the
/// subtree could not be evaluated.
pub(crate) fn search_branch<G, F>(
    context: &SearchContext,
    model: &G,
    state: &G::State,
    game_move: &G::Move,
    side: Side,
    search: F,
) -> Option<Score>
where
    G: GameModel,
    F: FnOnce(&G::State) -> Result<SearchResult<G::Move>, SearchError>,
{
    let child = match model.apply_move(state, game_move, side) {
        Ok(child) => child,
        Err(error) => {
            warn!("skipping {:?} for {}: {}", game_move, side, error);
            context.increment_skipped_branch_count();
            return None;
        }
    };

    match search(&child) {
        Ok(result) => Some(result.score),
        Err(error) => {
            warn!("skipping {:?} for {}: {}", game_move, side, error);
            context.increment_skipped_branch_count();
            None
        }
    }
}

/// Searches `depth` plies (from the context) for the best move of `side`.
///
/// This is the main entry point for the search algorithm.
///
/// # Returns
///
/// - `Ok(result)` - The maximizer-relative score and, unless the root was evaluated
///   statically, the move achieving it
/// - `Err(SearchError::InvalidEvaluation)` - If the root itself could not be evaluated
///
/// # Examples
///
/// ```ignore
/// let mut context = SearchContext::new(3);
/// let result = alpha_beta_search(&mut context, &model, &state, Side::Maximizer)?;
/// let decision = result.best_move_or(AgeOfWarMove::Wait);
/// ```
#[must_use = "search returns the best move found"]
pub fn alpha_beta_search<G: GameModel>(
    context: &mut SearchContext,
    model: &G,
    state: &G::State,
    side: Side,
) -> Result<SearchResult<G::Move>, SearchError> {
    let depth = context.search_depth();
    debug!("alpha-beta search depth: {}, side: {}", depth, side);

    context.reset_stats();
    let start = context.start_clock();

    let result = if context.is_parallel() && depth > 0 && !model.is_terminal(state) {
        search_root_parallel(context, model, state, depth, side)?
    } else {
        alpha_beta_minimax(
            context,
            model,
            state,
            depth,
            Score::NEG_INFINITY,
            Score::INFINITY,
            side,
        )?
    };

    context.finish(result.score, start);
    debug!(
        "best move: {:?}, score: {}, positions: {}, cutoffs: {}, skipped: {}",
        result.best_move,
        result.score,
        context.searched_position_count(),
        context.cutoff_count(),
        context.skipped_branch_count()
    );

    Ok(result)
}

/// One-shot search with the default configuration at the given depth.
#[must_use = "search returns the best move found"]
pub fn best_move<G: GameModel>(
    model: &G,
    state: &G::State,
    depth: u8,
    side: Side,
) -> Result<SearchResult<G::Move>, SearchError> {
    let mut context = SearchContext::new(depth);
    alpha_beta_search(&mut context, model, state, side)
}

fn search_root_parallel<G: GameModel>(
    context: &SearchContext,
    model: &G,
    state: &G::State,
    depth: u8,
    side: Side,
) -> Result<SearchResult<G::Move>, SearchError> {
    context.increment_position_count();
    let candidates = context.candidate_moves(model, state, side);

    if candidates.is_empty() {
        return context.evaluate_leaf(model, state);
    }

    let scores: Vec<Option<Score>> = candidates
        .par_iter()
        .map(|game_move| {
            search_branch(context, model, state, game_move, side, |child| {
                alpha_beta_minimax(
                    context,
                    model,
                    child,
                    depth - 1,
                    Score::NEG_INFINITY,
                    Score::INFINITY,
                    side.opponent(),
                )
            })
        })
        .collect();

    let mut best_score = worst_score(side);
    let mut best_move = None;
    for (score, game_move) in scores.into_iter().zip(candidates.iter()) {
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

/// Core alpha-beta minimax search with pruning.
///
/// Recursively searches the game tree using alpha-beta pruning. The [alpha, beta] window
/// represents the range of scores that matter - moves outside this window can be pruned.
///
/// # Parameters
///
/// - `depth` - Remaining search depth (decrements each ply)
/// - `alpha` - Best score the maximizer can already guarantee
/// - `beta` - Best score the minimizer can already guarantee
/// - `side` - The side to move at this node
fn alpha_beta_minimax<G: GameModel>(
    context: &SearchContext,
    model: &G,
    state: &G::State,
    depth: u8,
    mut alpha: Score,
    mut beta: Score,
    side: Side,
) -> Result<SearchResult<G::Move>, SearchError> {
    context.increment_position_count();

    if depth == 0 || model.is_terminal(state) || context.deadline_passed() {
        return context.evaluate_leaf(model, state);
    }

    let candidates = context.candidate_moves(model, state, side);
    if candidates.is_empty() {
        trace!("no moves for {} with {} plies left", side, depth);
        return context.evaluate_leaf(model, state);
    }

    let mut best_score = worst_score(side);
    let mut best_move = None;

    for game_move in candidates.iter() {
        let score = search_branch(context, model, state, game_move, side, |child| {
            alpha_beta_minimax(
                context,
                model,
                child,
                depth - 1,
                alpha,
                beta,
                side.opponent(),
            )
        });
        let score = match score {
            Some(score) => score,
            None => continue,
        };

        update_best(score, game_move, side, &mut best_score, &mut best_move);

        if side.is_maximizing() {
            alpha = alpha.max(score);
        } else {
            beta = beta.min(score);
        }

        if beta <= alpha {
            trace!("cutoff after {:?} at depth {}", game_move, depth);
            context.increment_cutoff_count();
            break;
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
