//! Shared utilities for CLI commands.

use std::time::Duration;

use adversary::alpha_beta_searcher::{SearchConfig, SearchContext};

pub(crate) fn create_context(
    depth: u8,
    parallel: bool,
    max_branching: Option<usize>,
    time_limit_ms: Option<u64>,
) -> SearchContext {
    SearchContext::with_config(SearchConfig {
        depth,
        parallel,
        max_branching,
        time_limit: time_limit_ms.map(Duration::from_millis),
    })
}

pub(crate) fn print_search_stats(context: &SearchContext) {
    println!(
        "positions: {}, leaves: {}, cutoffs: {}, skipped: {}, duration: {:?}",
        context.searched_position_count(),
        context.leaf_count(),
        context.cutoff_count(),
        context.skipped_branch_count(),
        context.last_search_duration().unwrap_or_default()
    );
}
