//! Deciding whether a word may be written at a given spot.

use crate::Direction::{self, Across, Down};
use crate::{Grid, Pos};

/// Where a word goes: the position of its first letter and its direction.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Placement {
  pub row: usize,
  pub col: usize,
  pub direction: Direction,
}

impl Placement {
  pub fn new(row: usize, col: usize, direction: Direction) -> Self {
    Self {
      row,
      col,
      direction,
    }
  }

  pub fn anchor(&self) -> Pos {
    (self.row, self.col)
  }

  /// The positions covered by a word of `len` letters at this placement.
  pub fn cells(&self, len: usize) -> impl Iterator<Item = Pos> + use<> {
    let Placement {
      row,
      col,
      direction,
    } = *self;
    (0..len).map(move |i| match direction {
      Across => (row, col + i),
      Down => (row + i, col),
    })
  }

  /// Whether a word of `len` letters fits inside a grid of side `size`.
  pub fn fits(&self, len: usize, size: usize) -> bool {
    let (end_row, end_col) = match self.direction {
      Across => (self.row + 1, self.col + len),
      Down => (self.row + len, self.col + 1),
    };
    end_row <= size && end_col <= size
  }
}

/// Counts how many of the word's letters land on matching letters already in
/// the grid. Returns `None` if the word runs off the grid or any letter
/// disagrees with one already there.
pub fn intersections(grid: &Grid, letters: &[char], placement: Placement) -> Option<usize> {
  if !placement.fits(letters.len(), grid.size()) {
    return None;
  }

  let mut count = 0;
  for (pos, &letter) in placement.cells(letters.len()).zip(letters) {
    match grid.get(pos).letter() {
      None => {}
      Some(existing) if existing == letter => count += 1,
      Some(_) => return None,
    }
  }
  Some(count)
}

/// Whether the word may be written at `placement`. Every word but the first
/// must cross at least one letter already on the grid.
pub fn can_place(grid: &Grid, letters: &[char], placement: Placement, is_first_word: bool) -> bool {
  match intersections(grid, letters, placement) {
    None => false,
    Some(0) => is_first_word,
    Some(_) => true,
  }
}
