//! Scrabble: two players placing words from their racks onto a shared board.
//!
//! Both racks are part of the search state, so the search plays with open racks. There is no
//! bag inside the search: tiles drawn after a move are the host's concern.

mod board;
mod dictionary;
mod moves;


use std::fmt;

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use smallvec::SmallVec;
use thiserror::Error;

use crate::alpha_beta_searcher::{
    alpha_beta_search, GameModel, Score, SearchContext, SearchError, Side, Snapshot, ALL_SIDES,
};
use crate::evaluate::ScoreCard;

pub use board::{
    letter_value, Board, Orientation, Premium, Tile, ALL_ORIENTATIONS, BLANK, BOARD_SIZE, CENTER,
};
pub use dictionary::{letter_counts, Dictionary, Entry, LetterCounts, STANDARD_WORDS};
pub use moves::{score_placement, PlacedTile, Placement};

pub const RACK_SIZE: usize = 7;
pub const BINGO_BONUS: u32 = 50;
/// Two passes in a row per player end the game.
pub const MAX_CONSECUTIVE_PASSES: u8 = 4;
/// Letters worth a bonus when played from the rack.
pub const HARD_LETTERS: &str = "JKQWXYZ";

pub type Rack = SmallVec<[char; RACK_SIZE]>;

/// Letter distribution of the bag. `*` is the blank.
const LETTER_DISTRIBUTION: [(char, usize); 27] = [
    ('A', 9),
    ('B', 2),
    ('C', 2),
    ('D', 3),
    ('E', 15),
    ('F', 2),
    ('G', 2),
    ('H', 2),
    ('I', 8),
    ('J', 1),
    ('K', 1),
    ('L', 5),
    ('M', 3),
    ('N', 6),
    ('O', 6),
    ('P', 2),
    ('Q', 1),
    ('R', 6),
    ('S', 6),
    ('T', 6),
    ('U', 6),
    ('V', 2),
    ('W', 1),
    ('X', 1),
    ('Y', 1),
    ('Z', 1),
    (BLANK, 2),
];

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrabbleMove {
    Place(Placement),
    Pass,
}

impl fmt::Display for ScrabbleMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrabbleMove::Place(placement) => write!(f, "{}", placement),
            ScrabbleMove::Pass => write!(f, "pass"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScrabbleError {
    #[error("a placement needs at least one new tile")]
    EmptyPlacement,
    #[error("square ({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("square ({row}, {col}) is already occupied")]
    SquareOccupied { row: usize, col: usize },
    #[error("rack has no `{letter}` tile")]
    MissingTile { letter: char },
    #[error("a rack holds at most {max} tiles, got {len}", max = RACK_SIZE)]
    RackTooLong { len: usize },
    #[error("cannot exchange {needed} tiles with {remaining} left in the bag")]
    BagTooSmall { needed: usize, remaining: usize },
}

fn check_rack(rack: &Rack) -> Result<(), ScrabbleError> {
    if rack.len() > RACK_SIZE {
        return Err(ScrabbleError::RackTooLong { len: rack.len() });
    }
    Ok(())
}

/// Parses a rack like `"CHAT*E"`. Letters are uppercased; anything but `A..=Z` and `*` is
/// dropped.
pub fn rack_from_str(letters: &str) -> Rack {
    letters
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|&c| c.is_ascii_uppercase() || c == BLANK)
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrabbleState {
    board: Board,
    racks: [Rack; 2],
    scores: [u32; 2],
    tiles_played: [u32; 2],
    hard_letters_played: [u32; 2],
    consecutive_passes: u8,
}

impl ScrabbleState {
    /// Fails when either rack holds more than `RACK_SIZE` tiles.
    pub fn new(
        board: Board,
        maximizer_rack: Rack,
        minimizer_rack: Rack,
    ) -> Result<Self, ScrabbleError> {
        check_rack(&maximizer_rack)?;
        check_rack(&minimizer_rack)?;
        Ok(Self {
            board,
            racks: [maximizer_rack, minimizer_rack],
            scores: [0, 0],
            tiles_played: [0, 0],
            hard_letters_played: [0, 0],
            consecutive_passes: 0,
        })
    }

    /// An empty board with the given racks.
    pub fn opening(maximizer_rack: &str, minimizer_rack: &str) -> Result<Self, ScrabbleError> {
        Self::new(
            Board::new(),
            rack_from_str(maximizer_rack),
            rack_from_str(minimizer_rack),
        )
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn rack(&self, side: Side) -> &Rack {
        &self.racks[side.index()]
    }

    pub fn rack_mut(&mut self, side: Side) -> &mut Rack {
        &mut self.racks[side.index()]
    }

    pub fn score(&self, side: Side) -> u32 {
        self.scores[side.index()]
    }

    /// Rack tiles `side` has put on the board so far.
    pub fn tiles_played(&self, side: Side) -> u32 {
        self.tiles_played[side.index()]
    }

    /// Non-blank tiles from `HARD_LETTERS` that `side` has played so far.
    pub fn hard_letters_played(&self, side: Side) -> u32 {
        self.hard_letters_played[side.index()]
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    /// The first word must cover the center square.
    pub fn is_first_move(&self) -> bool {
        self.board.is_empty()
    }

    /// Writes `word` onto the board without touching racks or scores. Used to set up
    /// positions; squares that already hold the same letter are left as they are.
    pub fn place_word(
        &mut self,
        word: &str,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), ScrabbleError> {
        let mut squares = Vec::with_capacity(word.len());
        for (i, letter) in word.chars().map(|c| c.to_ascii_uppercase()).enumerate() {
            let (r, c) = orientation
                .offset(row, col, i as isize)
                .ok_or(ScrabbleError::OutOfBounds { row, col })?;
            match self.board.get(r, c) {
                Some(existing) if existing.letter == letter => {}
                Some(_) => return Err(ScrabbleError::SquareOccupied { row: r, col: c }),
                None => squares.push((r, c, letter)),
            }
        }

        for (r, c, letter) in squares {
            self.board.put(r, c, Tile::letter(letter));
        }
        Ok(())
    }
}

/// Weights of the static evaluation, counted for the maximizer and against the minimizer.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationWeights {
    pub points: Score,
    /// Per rack tile put on the board.
    pub tile_played: Score,
    /// Per hard letter put on the board.
    pub hard_letter: Score,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self {
            points: 1.0,
            tile_played: 0.0,
            hard_letter: 0.0,
        }
    }
}

impl EvaluationWeights {
    /// Points plus 2 per tile played and 5 per hard letter, favoring long plays that get rid
    /// of awkward tiles.
    pub fn rack_turnover() -> Self {
        Self {
            points: 1.0,
            tile_played: 2.0,
            hard_letter: 5.0,
        }
    }
}

/// Rules and evaluation for Scrabble.
#[derive(Clone, Debug, Default)]
pub struct Scrabble {
    dictionary: Dictionary,
    weights: EvaluationWeights,
}

impl Scrabble {
    pub fn new(dictionary: Dictionary) -> Self {
        Self {
            dictionary,
            weights: EvaluationWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: EvaluationWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn weights(&self) -> &EvaluationWeights {
        &self.weights
    }
}

fn take_from_rack(rack: &mut Rack, letter: char) -> Result<(), ScrabbleError> {
    let position = rack
        .iter()
        .position(|&c| c == letter)
        .ok_or(ScrabbleError::MissingTile { letter })?;
    rack.remove(position);
    Ok(())
}

impl GameModel for Scrabble {
    type State = ScrabbleState;
    type Move = ScrabbleMove;
    type Error = ScrabbleError;

    fn generate_moves(&self, state: &ScrabbleState, side: Side) -> Vec<ScrabbleMove> {
        let mut moves: Vec<ScrabbleMove> =
            moves::generate_placements(&self.dictionary, state.board(), state.rack(side))
                .into_iter()
                .map(ScrabbleMove::Place)
                .collect();
        moves.push(ScrabbleMove::Pass);
        moves
    }

    /// Word validity is established when placements are generated; applying only re-checks
    /// that the squares are free and the tiles are on the rack.
    fn apply_move(
        &self,
        state: &ScrabbleState,
        game_move: &ScrabbleMove,
        side: Side,
    ) -> Result<ScrabbleState, ScrabbleError> {
        let mut next = state.clone();

        let placement = match game_move {
            ScrabbleMove::Pass => {
                next.consecutive_passes = next.consecutive_passes.saturating_add(1);
                return Ok(next);
            }
            ScrabbleMove::Place(placement) => placement,
        };

        if placement.tiles.is_empty() {
            return Err(ScrabbleError::EmptyPlacement);
        }

        for placed in placement.tiles.iter() {
            let (row, col) = (placed.row, placed.col);
            if row >= BOARD_SIZE || col >= BOARD_SIZE {
                return Err(ScrabbleError::OutOfBounds { row, col });
            }
            if next.board.is_occupied(row, col) {
                return Err(ScrabbleError::SquareOccupied { row, col });
            }
            take_from_rack(next.rack_mut(side), placed.tile.rack_letter())?;
            next.board.put(row, col, placed.tile);

            next.tiles_played[side.index()] += 1;
            if !placed.tile.blank && HARD_LETTERS.contains(placed.tile.letter) {
                next.hard_letters_played[side.index()] += 1;
            }
        }

        next.scores[side.index()] += score_placement(&next.board, placement);
        next.consecutive_passes = 0;
        Ok(next)
    }

    fn is_terminal(&self, state: &ScrabbleState) -> bool {
        state.consecutive_passes >= MAX_CONSECUTIVE_PASSES
            || state.racks.iter().any(|rack| rack.is_empty())
    }

    fn evaluate(&self, state: &ScrabbleState) -> Score {
        let weights = &self.weights;
        let mut card = ScoreCard::new();
        for side in ALL_SIDES {
            card.add_for(side, weights.points, state.score(side) as Score)
                .add_for(side, weights.tile_played, state.tiles_played(side) as Score)
                .add_for(side, weights.hard_letter, state.hard_letters_played(side) as Score);
        }
        card.total()
    }
}

/// The live game: the shared position plus the bag racks are refilled from.
#[derive(Clone, Debug)]
pub struct ScrabbleTable {
    state: ScrabbleState,
    bag: Vec<char>,
    rng: StdRng,
}

impl ScrabbleTable {
    /// Shuffles a full bag with `seed` and deals both racks.
    pub fn new(seed: u64) -> Self {
        let mut bag: Vec<char> = LETTER_DISTRIBUTION
            .iter()
            .flat_map(|&(letter, count)| std::iter::repeat(letter).take(count))
            .collect();
        let mut rng = StdRng::seed_from_u64(seed);
        bag.shuffle(&mut rng);

        let mut table = Self {
            state: ScrabbleState {
                board: Board::new(),
                racks: [Rack::new(), Rack::new()],
                scores: [0, 0],
                tiles_played: [0, 0],
                hard_letters_played: [0, 0],
                consecutive_passes: 0,
            },
            bag,
            rng,
        };
        table.refill(Side::Maximizer);
        table.refill(Side::Minimizer);
        table
    }

    pub fn state(&self) -> &ScrabbleState {
        &self.state
    }

    pub fn bag_len(&self) -> usize {
        self.bag.len()
    }

    fn refill(&mut self, side: Side) {
        let missing = RACK_SIZE.saturating_sub(self.state.rack(side).len());
        let drawn = self.bag.len().saturating_sub(missing);
        let tiles: Vec<char> = self.bag.drain(drawn..).rev().collect();
        self.state.rack_mut(side).extend(tiles);
    }

    /// Plays a decided move and tops the rack back up from the bag.
    pub fn execute(
        &mut self,
        model: &Scrabble,
        side: Side,
        game_move: &ScrabbleMove,
    ) -> Result<(), ScrabbleError> {
        self.state = model.apply_move(&self.state, game_move, side)?;
        self.refill(side);
        Ok(())
    }

    /// Swaps `letters` from `side`'s rack for as many tiles from the bag, then returns them
    /// to the bag and reshuffles it. Ends the current run of passes.
    pub fn exchange(&mut self, side: Side, letters: &str) -> Result<(), ScrabbleError> {
        let letters = rack_from_str(letters);
        if self.bag.len() < letters.len() {
            return Err(ScrabbleError::BagTooSmall {
                needed: letters.len(),
                remaining: self.bag.len(),
            });
        }

        let mut rack = self.state.rack(side).clone();
        for &letter in letters.iter() {
            take_from_rack(&mut rack, letter)?;
        }

        let drawn = self.bag.len() - letters.len();
        rack.extend(self.bag.drain(drawn..).rev());
        self.bag.extend(letters.iter().copied());
        self.bag.shuffle(&mut self.rng);

        *self.state.rack_mut(side) = rack;
        self.state.consecutive_passes = 0;
        debug!("{} exchanged {} tiles", side, letters.len());
        Ok(())
    }

    pub fn is_over(&self) -> bool {
        self.state.consecutive_passes >= MAX_CONSECUTIVE_PASSES
            || (self.bag.is_empty() && self.state.racks.iter().any(|rack| rack.is_empty()))
    }

    /// Searches a snapshot of the table for `side`'s move, passing when nothing is found.
    pub fn decide(
        &self,
        model: &Scrabble,
        context: &mut SearchContext,
        side: Side,
    ) -> Result<ScrabbleMove, SearchError> {
        let state = self.snapshot();
        let result = alpha_beta_search(context, model, &state, side)?;
        debug!(
            "{} decided {:?} (score {}, {} positions)",
            side,
            result.best_move,
            result.score,
            context.searched_position_count()
        );
        Ok(result.best_move_or(ScrabbleMove::Pass))
    }
}

impl Snapshot for ScrabbleTable {
    type State = ScrabbleState;

    fn snapshot(&self) -> ScrabbleState {
        self.state.clone()
    }
}
