//! Game models the search engine plays.

pub mod age_of_war;
pub mod random_tree;
pub mod scrabble;
