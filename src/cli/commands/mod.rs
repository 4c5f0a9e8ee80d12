//! CLI command implementations.

pub trait Command {
    fn execute(self);
}

pub mod age_of_war;
pub mod count_positions;
pub mod scrabble;

// Shared utilities for commands
pub(crate) mod util;
