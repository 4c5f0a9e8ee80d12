//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{
    age_of_war::AgeOfWarArgs, count_positions::CountPositionsArgs, scrabble::ScrabbleArgs,
};

#[derive(StructOpt)]
#[structopt(
    name = "adversary",
    about = "Minimax search with alpha-beta pruning for two-player games"
)]
pub enum Adversary {
    #[structopt(
        name = "age-of-war",
        about = "Decide the next Age of War action for `--side` (default: maximizer) at the given `--depth` (default: 3). Both sides start with the given gold and age; `--turns` plays that many rounds with both sides searching, granting income after each round."
    )]
    AgeOfWar(AgeOfWarArgs),
    #[structopt(
        name = "scrabble",
        about = "Find the best Scrabble move for `--rack` against `--opponent-rack` at the given `--depth` (default: 2). Words already on the board are given with `--placed WORD:row,col,h|v`; only the first `--max-branching` (default: 20) moves are searched at every node."
    )]
    Scrabble(ScrabbleArgs),
    #[structopt(
        name = "count-positions",
        about = "Count the positions searched in a random game tree for every depth up to `--depth` (default: 4), and report the time it took to do so. By default, this searches all positions. The routine can be run with alpha-beta pruning by selecting `--strategy alpha-beta`."
    )]
    CountPositions(CountPositionsArgs),
}

impl crate::cli::commands::Command for Adversary {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            AgeOfWar(cmd),
            Scrabble(cmd),
            CountPositions(cmd),
        }
    }
}
