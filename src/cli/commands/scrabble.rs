//! Scrabble command - find the best move for a rack on a given board.

use std::fs;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use adversary::alpha_beta_searcher::{alpha_beta_search, GameModel, Side};
use adversary::games::scrabble::{
    rack_from_str, Board, Dictionary, Orientation, Scrabble, ScrabbleMove, ScrabbleState,
};
use structopt::StructOpt;
use thiserror::Error;

use super::util::{create_context, print_search_stats};
use super::Command;

#[derive(Error, Debug, PartialEq)]
pub enum ParsePlacementError {
    #[error("expected WORD:row,col,h or WORD:row,col,v")]
    InvalidFormat,
    #[error("invalid coordinate `{0}`")]
    InvalidCoordinate(String),
    #[error("invalid orientation `{0}`; options are: h, v")]
    InvalidOrientation(String),
}

/// A word already on the board, written `WORD:row,col,h` or `WORD:row,col,v`.
#[derive(Debug, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

impl FromStr for PlacedWord {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (word, position) = s.split_once(':').ok_or(ParsePlacementError::InvalidFormat)?;
        let parts: Vec<&str> = position.split(',').map(str::trim).collect();
        let (row, col, orientation) = match parts.as_slice() {
            [row, col, orientation] => (*row, *col, *orientation),
            _ => return Err(ParsePlacementError::InvalidFormat),
        };

        let coordinate = |value: &str| {
            value
                .parse::<usize>()
                .map_err(|_| ParsePlacementError::InvalidCoordinate(value.to_string()))
        };
        let orientation = match orientation {
            "h" | "H" => Orientation::Horizontal,
            "v" | "V" => Orientation::Vertical,
            other => return Err(ParsePlacementError::InvalidOrientation(other.to_string())),
        };

        if word.is_empty() {
            return Err(ParsePlacementError::InvalidFormat);
        }

        Ok(PlacedWord {
            word: word.to_ascii_uppercase(),
            row: coordinate(row)?,
            col: coordinate(col)?,
            orientation,
        })
    }
}

#[derive(StructOpt)]
pub struct ScrabbleArgs {
    #[structopt(long, help = "Letters on the deciding side's rack; `*` is a blank")]
    pub rack: String,
    #[structopt(long = "opponent-rack")]
    pub opponent_rack: String,
    #[structopt(long = "placed", help = "Word already on the board: WORD:row,col,h|v")]
    pub placed: Vec<PlacedWord>,
    #[structopt(short, long, default_value = "2")]
    pub depth: u8,
    #[structopt(long = "max-branching", default_value = "20")]
    pub max_branching: usize,
    #[structopt(long, default_value = "maximizer", help = "The side to decide for")]
    pub side: Side,
    #[structopt(
        long,
        parse(from_os_str),
        help = "Whitespace-separated word list replacing the built-in dictionary"
    )]
    pub dictionary: Option<PathBuf>,
    #[structopt(long, help = "Search root moves in parallel")]
    pub parallel: bool,
    #[structopt(long = "time-limit", help = "Search time limit in milliseconds")]
    pub time_limit_ms: Option<u64>,
}

fn load_dictionary(path: &Option<PathBuf>) -> Dictionary {
    let path = match path {
        Some(path) => path,
        None => return Dictionary::default(),
    };
    match fs::read_to_string(path) {
        Ok(contents) => Dictionary::from_words(contents.split_whitespace()),
        Err(error) => {
            eprintln!("could not read {}: {}", path.display(), error);
            process::exit(1);
        }
    }
}

impl Command for ScrabbleArgs {
    fn execute(self) {
        let model = Scrabble::new(load_dictionary(&self.dictionary));
        let (maximizer_rack, minimizer_rack) = match self.side {
            Side::Maximizer => (&self.rack, &self.opponent_rack),
            Side::Minimizer => (&self.opponent_rack, &self.rack),
        };
        let mut state = match ScrabbleState::new(
            Board::new(),
            rack_from_str(maximizer_rack),
            rack_from_str(minimizer_rack),
        ) {
            Ok(state) => state,
            Err(error) => {
                eprintln!("invalid rack: {}", error);
                process::exit(1);
            }
        };

        for placed in self.placed.iter() {
            if let Err(error) =
                state.place_word(&placed.word, placed.row, placed.col, placed.orientation)
            {
                eprintln!("could not place {}: {}", placed.word, error);
                process::exit(1);
            }
        }

        println!("{}", state.board());

        let mut context = create_context(
            self.depth,
            self.parallel,
            Some(self.max_branching),
            self.time_limit_ms,
        );
        match alpha_beta_search(&mut context, &model, &state, self.side) {
            Ok(result) => {
                let score = result.score;
                let best_move = result.best_move_or(ScrabbleMove::Pass);
                match model.apply_move(&state, &best_move, self.side) {
                    Ok(next) => println!(
                        "{} (worth {}, search score {})",
                        best_move,
                        next.score(self.side),
                        score
                    ),
                    Err(error) => eprintln!("could not apply {}: {}", best_move, error),
                }
                print_search_stats(&context);
            }
            Err(error) => eprintln!("search failed: {}", error),
        }
    }
}
