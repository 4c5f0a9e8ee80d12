//! Placement generation and scoring.
//!
//! Generation is anchor based: once the board has tiles, every candidate word must run
//! through an empty square next to an existing tile. Words are tried in dictionary order, so
//! the output order only depends on the board, the rack, and the dictionary.

use std::fmt;

use rustc_hash::FxHashSet;

use super::board::{Board, Orientation, Premium, Tile, ALL_ORIENTATIONS, BLANK, CENTER};
use super::dictionary::{letter_counts, Dictionary};
use super::{Rack, BINGO_BONUS, RACK_SIZE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlacedTile {
    pub row: usize,
    pub col: usize,
    pub tile: Tile,
}

/// A word laid on the board starting at (`row`, `col`). `tiles` are only the tiles taken
/// from the rack; letters already on the board are part of `word` but not of `tiles`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    pub word: String,
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
    pub tiles: Vec<PlacedTile>,
}

impl Placement {
    /// Squares covered by the main word.
    pub fn squares(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.word.len())
            .filter_map(move |i| self.orientation.offset(self.row, self.col, i as isize))
    }

    fn is_new(&self, row: usize, col: usize) -> bool {
        self.tiles
            .iter()
            .any(|placed| placed.row == row && placed.col == col)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{},{},{}",
            self.word, self.row, self.col, self.orientation
        )
    }
}

/// All legal placements of `rack` on `board`, deduplicated, in generation order.
pub fn generate_placements(dictionary: &Dictionary, board: &Board, rack: &Rack) -> Vec<Placement> {
    if rack.is_empty() {
        return Vec::new();
    }

    let blanks = rack.iter().filter(|&&c| c == BLANK).count();
    let blanks = u8::try_from(blanks).unwrap_or(u8::MAX);
    let rack_counts = letter_counts(rack.iter().copied());

    // (anchor, orientation) pairs to grow words through
    let lines: Vec<(usize, usize, Orientation)> = if board.is_empty() {
        ALL_ORIENTATIONS
            .iter()
            .map(|&orientation| (CENTER, CENTER, orientation))
            .collect()
    } else {
        board
            .anchors()
            .into_iter()
            .flat_map(|(row, col)| {
                ALL_ORIENTATIONS
                    .iter()
                    .map(move |&orientation| (row, col, orientation))
            })
            .collect()
    };

    let mut seen = FxHashSet::default();
    let mut placements = Vec::new();

    for (row, col, orientation) in lines {
        let mut available = rack_counts;
        for (count, line) in available
            .iter_mut()
            .zip(letter_counts(board.line_letters(row, col, orientation)).iter())
        {
            *count = count.saturating_add(*line);
        }

        for entry in dictionary.entries() {
            if !entry.fits(&available, blanks) {
                continue;
            }

            for offset in 0..entry.word.len() {
                let start = match orientation.offset(row, col, -(offset as isize)) {
                    Some(start) => start,
                    None => break,
                };
                let placement = match try_placement(
                    dictionary,
                    board,
                    rack,
                    &entry.word,
                    start,
                    orientation,
                ) {
                    Some(placement) => placement,
                    None => continue,
                };
                let key = (
                    placement.row,
                    placement.col,
                    placement.orientation,
                    placement.word.clone(),
                );
                if seen.insert(key) {
                    placements.push(placement);
                }
            }
        }
    }

    placements
}

fn take(rack: &mut Rack, letter: char) -> bool {
    match rack.iter().position(|&c| c == letter) {
        Some(position) => {
            rack.remove(position);
            true
        }
        None => false,
    }
}

/// Checks that `word` can be laid from `start` and returns the placement if it is legal.
///
/// Legal means: on the board, not touching other tiles at either end, consistent with the
/// letters already there, spelled with the rack (blanks fill in), uses at least one rack
/// tile, covers the center on an empty board or touches an existing tile otherwise, and
/// every cross word formed is in the dictionary.
fn try_placement(
    dictionary: &Dictionary,
    board: &Board,
    rack: &Rack,
    word: &str,
    start: (usize, usize),
    orientation: Orientation,
) -> Option<Placement> {
    let (row, col) = start;
    let len = word.len() as isize;

    orientation.offset(row, col, len - 1)?;
    for beyond in [-1, len] {
        if let Some((r, c)) = orientation.offset(row, col, beyond) {
            if board.is_occupied(r, c) {
                return None;
            }
        }
    }

    let mut rack = rack.clone();
    let mut tiles = Vec::new();
    let mut connected = false;
    let mut covers_center = false;

    for (i, letter) in word.chars().enumerate() {
        let (r, c) = orientation.offset(row, col, i as isize)?;
        covers_center |= (r, c) == (CENTER, CENTER);

        match board.get(r, c) {
            Some(existing) => {
                if existing.letter != letter {
                    return None;
                }
                connected = true;
            }
            None => {
                let tile = if take(&mut rack, letter) {
                    Tile::letter(letter)
                } else if take(&mut rack, BLANK) {
                    Tile::blank(letter)
                } else {
                    return None;
                };
                connected |= board.has_neighbor(r, c);
                tiles.push(PlacedTile {
                    row: r,
                    col: c,
                    tile,
                });
            }
        }
    }

    if tiles.is_empty() {
        return None;
    }

    if board.is_empty() {
        if !covers_center {
            return None;
        }
    } else if !connected {
        return None;
    }

    for placed in tiles.iter() {
        let run = board.run_through(placed.row, placed.col, orientation.cross());
        if run.len() < 2 {
            continue;
        }
        let cross_word: String = run
            .iter()
            .filter_map(|&(r, c)| {
                if (r, c) == (placed.row, placed.col) {
                    Some(placed.tile.letter)
                } else {
                    board.get(r, c).map(|tile| tile.letter)
                }
            })
            .collect();
        if !dictionary.contains(&cross_word) {
            return None;
        }
    }

    Some(Placement {
        word: word.to_string(),
        row,
        col,
        orientation,
        tiles,
    })
}

/// Score of one word. Premiums only count under tiles placed this turn.
fn word_score<I>(board: &Board, placement: &Placement, squares: I) -> u32
where
    I: IntoIterator<Item = (usize, usize)>,
{
    let mut total = 0;
    let mut word_multiplier = 1;

    for (row, col) in squares {
        let value = board.get(row, col).map_or(0, |tile| tile.value());
        if placement.is_new(row, col) {
            let premium = Premium::at(row, col);
            total += value * premium.letter_multiplier();
            word_multiplier *= premium.word_multiplier();
        } else {
            total += value;
        }
    }

    total * word_multiplier
}

/// Points earned by `placement` on `board`, which must already hold the placed tiles: the
/// main word, every cross word, and the bonus for emptying a full rack.
pub fn score_placement(board: &Board, placement: &Placement) -> u32 {
    let mut total = word_score(board, placement, placement.squares());

    for placed in placement.tiles.iter() {
        let run = board.run_through(placed.row, placed.col, placement.orientation.cross());
        if run.len() > 1 {
            total += word_score(board, placement, run);
        }
    }

    if placement.tiles.len() == RACK_SIZE {
        total += BINGO_BONUS;
    }

    total
}
