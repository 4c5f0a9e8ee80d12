//! The 15x15 board, tiles, premium squares, and letter values.

use std::fmt;

pub const BOARD_SIZE: usize = 15;
pub const CENTER: usize = 7;
pub const BLANK: char = '*';

const TRIPLE_WORD: [(usize, usize); 8] = [
    (0, 0),
    (0, 7),
    (0, 14),
    (7, 0),
    (7, 14),
    (14, 0),
    (14, 7),
    (14, 14),
];

const DOUBLE_WORD: [(usize, usize); 17] = [
    (1, 1),
    (2, 2),
    (3, 3),
    (4, 4),
    (1, 13),
    (2, 12),
    (3, 11),
    (4, 10),
    (13, 1),
    (12, 2),
    (11, 3),
    (10, 4),
    (13, 13),
    (12, 12),
    (11, 11),
    (10, 10),
    (7, 7),
];

const TRIPLE_LETTER: [(usize, usize); 12] = [
    (1, 5),
    (1, 9),
    (5, 1),
    (5, 5),
    (5, 9),
    (5, 13),
    (9, 1),
    (9, 5),
    (9, 9),
    (9, 13),
    (13, 5),
    (13, 9),
];

const DOUBLE_LETTER: [(usize, usize); 24] = [
    (0, 3),
    (0, 11),
    (2, 6),
    (2, 8),
    (3, 0),
    (3, 7),
    (3, 14),
    (6, 2),
    (6, 6),
    (6, 8),
    (6, 12),
    (7, 3),
    (7, 11),
    (8, 2),
    (8, 6),
    (8, 8),
    (8, 12),
    (11, 0),
    (11, 7),
    (11, 14),
    (12, 6),
    (12, 8),
    (14, 3),
    (14, 11),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Premium {
    None,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
}

impl Premium {
    pub fn at(row: usize, col: usize) -> Self {
        let square = (row, col);
        if TRIPLE_WORD.contains(&square) {
            Premium::TripleWord
        } else if DOUBLE_WORD.contains(&square) {
            Premium::DoubleWord
        } else if TRIPLE_LETTER.contains(&square) {
            Premium::TripleLetter
        } else if DOUBLE_LETTER.contains(&square) {
            Premium::DoubleLetter
        } else {
            Premium::None
        }
    }

    pub fn letter_multiplier(self) -> u32 {
        match self {
            Premium::DoubleLetter => 2,
            Premium::TripleLetter => 3,
            _ => 1,
        }
    }

    pub fn word_multiplier(self) -> u32 {
        match self {
            Premium::DoubleWord => 2,
            Premium::TripleWord => 3,
            _ => 1,
        }
    }
}

/// French letter values. Blanks and unknown characters are worth nothing.
pub fn letter_value(letter: char) -> u32 {
    match letter {
        'A' | 'E' | 'I' | 'L' | 'N' | 'O' | 'R' | 'S' | 'T' | 'U' => 1,
        'D' | 'G' | 'M' => 2,
        'B' | 'C' | 'P' => 3,
        'F' | 'H' | 'V' => 4,
        'J' | 'Q' => 8,
        'K' | 'W' | 'X' | 'Y' | 'Z' => 10,
        _ => 0,
    }
}

/// A tile on the board. A blank shows the letter it stands for but scores nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    pub letter: char,
    pub blank: bool,
}

impl Tile {
    pub fn letter(letter: char) -> Self {
        Self {
            letter,
            blank: false,
        }
    }

    pub fn blank(letter: char) -> Self {
        Self {
            letter,
            blank: true,
        }
    }

    pub fn value(&self) -> u32 {
        if self.blank {
            0
        } else {
            letter_value(self.letter)
        }
    }

    /// The rack character this tile was played from.
    pub fn rack_letter(&self) -> char {
        if self.blank {
            BLANK
        } else {
            self.letter
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

pub const ALL_ORIENTATIONS: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

impl Orientation {
    pub fn cross(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// The square `offset` steps from (`row`, `col`) along this orientation, if on the board.
    pub fn offset(self, row: usize, col: usize, offset: isize) -> Option<(usize, usize)> {
        let (row, col) = match self {
            Orientation::Horizontal => (row as isize, col as isize + offset),
            Orientation::Vertical => (row as isize + offset, col as isize),
        };
        if (0..BOARD_SIZE as isize).contains(&row) && (0..BOARD_SIZE as isize).contains(&col) {
            Some((row as usize, col as usize))
        } else {
            None
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "h"),
            Orientation::Vertical => write!(f, "v"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Tile>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some()
    }

    pub fn put(&mut self, row: usize, col: usize, tile: Tile) {
        self.cells[row][col] = Some(tile);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_none)
    }

    /// True when any orthogonal neighbor holds a tile.
    pub fn has_neighbor(&self, row: usize, col: usize) -> bool {
        ALL_ORIENTATIONS.iter().any(|orientation| {
            [-1, 1].iter().any(|&step| {
                orientation
                    .offset(row, col, step)
                    .map_or(false, |(r, c)| self.is_occupied(r, c))
            })
        })
    }

    /// Empty squares next to a tile, in row-major order.
    pub fn anchors(&self) -> Vec<(usize, usize)> {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
            .filter(|&(row, col)| !self.is_occupied(row, col) && self.has_neighbor(row, col))
            .collect()
    }

    /// Letters in the row or column through (`row`, `col`).
    pub fn line_letters(
        &self,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> impl Iterator<Item = char> + '_ {
        (0..BOARD_SIZE).filter_map(move |i| match orientation {
            Orientation::Horizontal => self.get(row, i),
            Orientation::Vertical => self.get(i, col),
        })
        .map(|tile| tile.letter)
    }

    /// The run of tiles through (`row`, `col`) along `orientation`, treating (`row`, `col`) as
    /// occupied. Returns the squares of the run in order.
    pub fn run_through(
        &self,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Vec<(usize, usize)> {
        let mut start = 0;
        while let Some((r, c)) = orientation.offset(row, col, start - 1) {
            if !self.is_occupied(r, c) {
                break;
            }
            start -= 1;
        }

        let mut run = Vec::new();
        let mut i = start;
        while let Some((r, c)) = orientation.offset(row, col, i) {
            if i != 0 && !self.is_occupied(r, c) {
                break;
            }
            run.push((r, c));
            i += 1;
        }
        run
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            for cell in row.iter() {
                match cell {
                    Some(tile) if tile.blank => write!(f, "{}", tile.letter.to_ascii_lowercase())?,
                    Some(tile) => write!(f, "{}", tile.letter)?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_premium_squares() {
        assert_eq!(Premium::at(0, 0), Premium::TripleWord);
        assert_eq!(Premium::at(CENTER, CENTER), Premium::DoubleWord);
        assert_eq!(Premium::at(1, 5), Premium::TripleLetter);
        assert_eq!(Premium::at(0, 3), Premium::DoubleLetter);
        assert_eq!(Premium::at(7, 8), Premium::None);
    }

    #[test]
    fn test_blank_tiles_score_nothing() {
        assert_eq!(Tile::letter('Z').value(), 10);
        assert_eq!(Tile::blank('Z').value(), 0);
        assert_eq!(Tile::blank('Z').rack_letter(), BLANK);
    }

    #[test]
    fn test_offset_stays_on_board() {
        assert_eq!(Orientation::Horizontal.offset(3, 0, -1), None);
        assert_eq!(Orientation::Vertical.offset(14, 2, 1), None);
        assert_eq!(Orientation::Vertical.offset(3, 2, 2), Some((5, 2)));
    }

    #[test]
    fn test_anchors_surround_tiles() {
        let mut board = Board::new();
        board.put(CENTER, CENTER, Tile::letter('A'));

        assert_eq!(
            board.anchors(),
            vec![
                (CENTER - 1, CENTER),
                (CENTER, CENTER - 1),
                (CENTER, CENTER + 1),
                (CENTER + 1, CENTER)
            ]
        );
    }

    #[test]
    fn test_run_through_joins_neighbors() {
        let mut board = Board::new();
        board.put(4, 3, Tile::letter('L'));
        board.put(4, 5, Tile::letter('S'));

        assert_eq!(
            board.run_through(4, 4, Orientation::Horizontal),
            vec![(4, 3), (4, 4), (4, 5)]
        );
        assert_eq!(board.run_through(4, 4, Orientation::Vertical), vec![(4, 4)]);
    }
}
