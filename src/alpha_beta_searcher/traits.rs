//! Core traits for generic alpha-beta search.

use std::error::Error;
use std::fmt::{self, Debug};
use std::str::FromStr;

/// Static evaluation score. Higher scores favor `Side::Maximizer`.
///
/// Scores must be totally ordered; a NaN is treated as an evaluation fault.
pub type Score = f64;

/// One of the two players of a zero-sum game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Maximizer,
    Minimizer,
}

pub const ALL_SIDES: [Side; 2] = [Side::Maximizer, Side::Minimizer];

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Maximizer => Side::Minimizer,
            Side::Minimizer => Side::Maximizer,
        }
    }

    pub fn is_maximizing(self) -> bool {
        self == Side::Maximizer
    }

    /// `1.0` for the maximizer, `-1.0` for the minimizer.
    pub fn sign(self) -> Score {
        match self {
            Side::Maximizer => 1.0,
            Side::Minimizer => -1.0,
        }
    }

    /// Index into per-side arrays.
    pub fn index(self) -> usize {
        match self {
            Side::Maximizer => 0,
            Side::Minimizer => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Maximizer => write!(f, "maximizer"),
            Side::Minimizer => write!(f, "minimizer"),
        }
    }
}

impl FromStr for Side {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "maximizer" | "max" => Ok(Side::Maximizer),
            "minimizer" | "min" => Ok(Side::Minimizer),
            _ => Err("invalid side; options are: maximizer, minimizer"),
        }
    }
}

/// Everything the search needs to know about a two-player game.
///
/// The search never mutates a state: `apply_move` borrows the parent and
/// returns an owned child, so sibling branches cannot observe each other.
pub trait GameModel: Sync {
    type State: Clone + Send + Sync;
    type Move: Clone + PartialEq + Debug + Send + Sync;
    type Error: Error;

    /// Generates the moves available to `side`, in a stable order.
    ///
    /// Implementations should always include a pass-style move so the list
    /// is never empty in a live game. Every generated move must be legal to
    /// apply to the same state.
    fn generate_moves(&self, state: &Self::State, side: Side) -> Vec<Self::Move>;

    /// Returns the state reached by `side` playing `game_move`.
    ///
    /// Affordability and entitlement are re-checked here; a violation is
    /// reported as the model's illegal-move error.
    fn apply_move(
        &self,
        state: &Self::State,
        game_move: &Self::Move,
        side: Side,
    ) -> Result<Self::State, Self::Error>;

    /// Returns true once the game is decided.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Heuristic evaluation from the maximizer's point of view.
    fn evaluate(&self, state: &Self::State) -> Score;
}

/// Copies a host's live, mutable game into an owned search state.
///
/// This is the only place a search state is built from live game objects,
/// so nothing the search does can write back into the running game.
pub trait Snapshot {
    type State;

    fn snapshot(&self) -> Self::State;
}
