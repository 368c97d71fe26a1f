//! This crate generates crossword puzzles. Given a list of words and clues, it
//! lays a subset of them out on a square grid so that every word after the first
//! crosses a word that is already on the grid, numbers the clues, and exports the
//! result as JSON.
//!
//! The pieces, leaves first:
//!
//! - [Grid] holds the letters and clue numbers.
//! - [Catalog] is the ordered list of candidate [WordEntry] values.
//! - [placement] decides whether a word fits at a given spot.
//! - [placer] is the randomized backtracking search.
//! - [numbering] assigns clue numbers once every word is placed.
//! - [export] turns a [PlacedPuzzle] into the wire [Document].
//!
//! [generate] ties these together. The [Puzzle] type wraps a finished layout so
//! it can be solved interactively; see `crosstui` for a terminal front end.

use Direction::{Across, Down};
use std::ops::Not;

pub mod catalog;
pub mod export;
pub mod game;
mod generator;
pub mod grid;
pub mod logging;
pub mod numbering;
pub mod placement;
pub mod placer;
mod puzzle;

pub use catalog::{Catalog, WordEntry};
pub use export::{Document, export_puzzle};
pub use generator::{GeneratorConfig, PlacedPuzzle, PlacedWord, generate, generate_static};
pub use grid::{Grid, Square};
pub use numbering::NumberingOrder;
pub use placement::Placement;
pub use puzzle::{Puzzle, SquareStyle};

/// The largest supported grid side.
pub const MAX_GRID_SIZE: usize = 16;

/// The largest number of words a single generation run will try to place.
pub const MAX_WORDS: usize = 45;

/// The two crossword directions: `Across` and `Down`
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, PartialOrd, Ord)]
pub enum Direction {
  Across,
  Down,
}

impl Direction {
  /// The single-letter tag used in exported documents.
  pub fn tag(self) -> &'static str {
    match self {
      Across => "A",
      Down => "D",
    }
  }
}

impl Not for Direction {
  type Output = Self;
  fn not(self) -> Self {
    match self {
      Across => Down,
      Down => Across,
    }
  }
}

/// A position in a grid: (row, column)
pub type Pos = (usize, usize);

/// The errors that may be produced by functions in this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// An [I/O error](std::io::Error) occurred, e.g. the word list could not be read.
  #[error("could not read word list: {0}")]
  IoError(#[from] std::io::Error),
  /// The word list was neither valid UTF-8 nor decodable as ISO-8859-1.
  #[error("could not decode word list: {0}")]
  EncodingError(String),
  /// Every attempt in the retry budget failed to place the whole catalog.
  #[error("Failed to generate crossword after {attempts} attempts.")]
  GenerationExhausted { attempts: usize },
  /// The catalog has more words than a single run supports.
  #[error("catalog has {count} words but at most {max} are supported")]
  CatalogTooLarge { count: usize, max: usize },
  /// The requested grid is empty or larger than [MAX_GRID_SIZE].
  #[error("grid size {size} is out of range (1..={max})")]
  GridSizeOutOfRange { size: usize, max: usize },
  /// A document or game record could not be serialized or parsed.
  #[error("JSON error: {0}")]
  JsonError(#[from] serde_json::Error),
  /// A puzzle with no words cannot be solved interactively.
  #[error("the puzzle has no words to solve")]
  NothingToSolve,
}
