//! Generic minimax search with alpha-beta pruning over any [`GameModel`].

mod minimax;
mod search;
mod traits;

#[cfg(test)]
mod tests;

pub use minimax::minimax_search;
pub use search::{
    alpha_beta_search, best_move, SearchConfig, SearchContext, SearchError, SearchResult,
};
pub use traits::{GameModel, Score, Side, Snapshot, ALL_SIDES};
