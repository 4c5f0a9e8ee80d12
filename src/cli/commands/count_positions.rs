//! Count positions command - count searched positions in a random tree at every depth.

use std::str::FromStr;
use std::time::{Duration, Instant};

use adversary::alpha_beta_searcher::{
    alpha_beta_search, minimax_search, SearchContext, SearchError, Side,
};
use adversary::games::random_tree::RandomTree;
use structopt::StructOpt;

use super::Command;

#[derive(Debug)]
pub enum CountPositionsStrategy {
    All,
    AlphaBeta,
}

impl FromStr for CountPositionsStrategy {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(CountPositionsStrategy::All),
            "alpha-beta" => Ok(CountPositionsStrategy::AlphaBeta),
            _ => Err("invalid strategy; options are: all, alpha-beta"),
        }
    }
}

#[derive(StructOpt)]
pub struct CountPositionsArgs {
    #[structopt(short, long, default_value = "4")]
    pub depth: u8,
    #[structopt(short, long, default_value = "4", help = "Children of every interior node")]
    pub branching: usize,
    #[structopt(long, default_value = "7")]
    pub seed: u64,
    #[structopt(short, long, default_value = "all")]
    pub strategy: CountPositionsStrategy,
}

fn count_positions(
    tree: &RandomTree,
    depth: u8,
    strategy: &CountPositionsStrategy,
) -> Result<usize, SearchError> {
    let mut context = SearchContext::new(depth);
    match strategy {
        CountPositionsStrategy::All => {
            minimax_search(&mut context, tree, &RandomTree::ROOT, Side::Maximizer)?;
        }
        CountPositionsStrategy::AlphaBeta => {
            alpha_beta_search(&mut context, tree, &RandomTree::ROOT, Side::Maximizer)?;
        }
    }
    Ok(context.searched_position_count())
}

impl Command for CountPositionsArgs {
    fn execute(self) {
        let tree = RandomTree::generate(self.seed, self.branching..=self.branching, self.depth);

        let mut total_positions = 0;
        let mut total_duration = Duration::from_secs(0);

        for depth in 1..=self.depth {
            let starting_time = Instant::now();
            let count = match count_positions(&tree, depth, &self.strategy) {
                Ok(count) => count,
                Err(error) => {
                    eprintln!("search failed at depth {}: {}", depth, error);
                    return;
                }
            };
            let duration = starting_time.elapsed();
            let positions_per_second = count as f64 / duration.as_secs_f64();

            total_positions += count;
            total_duration += duration;

            println!(
                "depth: {}, positions: {}, positions per second: {}",
                depth, count, positions_per_second
            );
        }

        println!(
            "total positions: {}, total duration: {:?}, positions per second: {}",
            total_positions,
            total_duration,
            total_positions as f64 / total_duration.as_secs_f64()
        );
    }
}
