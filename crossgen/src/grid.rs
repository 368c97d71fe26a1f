//! The square letter grid and its parallel buffer of clue numbers.

use crate::Pos;
use std::fmt::Debug;
use std::fmt::Display;

/// A square in a crossword grid.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Square {
  /// No letter has been written here.
  Blank,
  /// A square with a letter written in it.
  Letter(char),
}

impl Square {
  /// Whether this is [Square::Blank].
  pub fn is_blank(&self) -> bool {
    *self == Self::Blank
  }

  /// The letter in this square, if any.
  pub fn letter(&self) -> Option<char> {
    match self {
      Self::Blank => None,
      Self::Letter(c) => Some(*c),
    }
  }
}

impl Debug for Square {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Blank => write!(f, " "),
      Self::Letter(c) => write!(f, "{}", c),
    }
  }
}

impl Display for Square {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:?}", self)
  }
}

/// A step from one square to its neighbour.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Step {
  Up,
  Down,
  Left,
  Right,
}

/// An N×N grid of squares, plus the clue number printed in each square (0 for none).
#[derive(Clone, Eq, PartialEq)]
pub struct Grid {
  squares: Vec<Vec<Square>>,
  clue_numbers: Vec<Vec<u32>>,
}

impl Grid {
  /// Creates an all-blank grid with the given side length.
  pub fn new(size: usize) -> Self {
    Self {
      squares: vec![vec![Square::Blank; size]; size],
      clue_numbers: vec![vec![0; size]; size],
    }
  }

  /// The side length of this grid.
  pub fn size(&self) -> usize {
    self.squares.len()
  }

  /// Whether `pos` lies inside the grid.
  pub fn contains(&self, (r, c): Pos) -> bool {
    r < self.size() && c < self.size()
  }

  /// Clears every square to blank and every clue number to zero.
  pub fn reset(&mut self) {
    self.squares.iter_mut().flatten().for_each(|sq| *sq = Square::Blank);
    self.clear_clue_numbers();
  }

  /// Returns the [Square] at the given [Pos].
  pub fn get(&self, pos: Pos) -> Square {
    self.check_bounds(pos);
    let (r, c) = pos;
    self.squares[r][c]
  }

  pub fn is_blank(&self, pos: Pos) -> bool {
    self.get(pos).is_blank()
  }

  pub(crate) fn set(&mut self, pos: Pos, square: Square) {
    self.check_bounds(pos);
    let (r, c) = pos;
    self.squares[r][c] = square;
  }

  /// The clue number printed in the square at `pos`, or 0.
  pub fn clue_number(&self, pos: Pos) -> u32 {
    self.check_bounds(pos);
    let (r, c) = pos;
    self.clue_numbers[r][c]
  }

  pub(crate) fn set_clue_number(&mut self, pos: Pos, number: u32) {
    self.check_bounds(pos);
    let (r, c) = pos;
    self.clue_numbers[r][c] = number;
  }

  pub(crate) fn clear_clue_numbers(&mut self) {
    self.clue_numbers.iter_mut().flatten().for_each(|n| *n = 0);
  }

  /// Rows of squares, top to bottom.
  pub fn rows(&self) -> impl Iterator<Item = &[Square]> {
    self.squares.iter().map(Vec::as_slice)
  }

  /// Rows of clue numbers, top to bottom.
  pub fn clue_number_rows(&self) -> impl Iterator<Item = &[u32]> {
    self.clue_numbers.iter().map(Vec::as_slice)
  }

  /// An iterator over all the positions of this grid, from left to right and top to bottom.
  pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
    let size = self.size();
    (0..size).flat_map(move |r| (0..size).map(move |c| (r, c)))
  }

  /// Returns the position of the next lettered square from `pos` in the given
  /// direction, skipping blank squares.
  pub(crate) fn next_letter(&self, pos: Pos, step: Step) -> Option<Pos> {
    let mut pos = pos;
    loop {
      pos = self.neighbor(pos, step)?;
      if !self.is_blank(pos) {
        return Some(pos);
      }
    }
  }

  fn neighbor(&self, (row, col): Pos, step: Step) -> Option<Pos> {
    let next = match step {
      Step::Up => (row.checked_sub(1)?, col),
      Step::Down => (row + 1, col),
      Step::Left => (row, col.checked_sub(1)?),
      Step::Right => (row, col + 1),
    };
    self.contains(next).then_some(next)
  }

  fn check_bounds(&self, pos: Pos) {
    assert!(
      self.contains(pos),
      "position {:?} is outside a {}x{} grid",
      pos,
      self.size(),
      self.size()
    );
  }
}

impl Debug for Grid {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for row in &self.squares {
      for sq in row {
        write!(f, "{}", sq)?;
      }
      writeln!(f)?;
    }
    Ok(())
  }
}

impl Display for Grid {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "\n{:?}", self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn lettered_grid() -> Grid {
    let mut grid = Grid::new(4);
    grid.set((0, 0), Square::Letter('A'));
    grid.set((0, 1), Square::Letter('B'));
    grid.set((2, 1), Square::Letter('C'));
    grid.set((3, 3), Square::Letter('D'));
    grid.set_clue_number((0, 0), 1);
    grid.set_clue_number((2, 1), 2);

    #[rustfmt::skip]
    assert_eq!(
      grid.to_string(),
      concat!(
        "\n",
        "AB  \n",
        "    \n",
        " C  \n",
        "   D\n",
      )
    );

    grid
  }

  #[test]
  fn new_grid_is_blank() {
    let grid = Grid::new(3);
    assert_eq!(grid.size(), 3);
    assert!(grid.positions().all(|p| grid.is_blank(p) && grid.clue_number(p) == 0));
  }

  #[test]
  fn reset_clears_everything() {
    let mut grid = lettered_grid();
    grid.reset();
    assert_eq!(grid, Grid::new(4));

    // Resetting twice is the same as resetting once.
    grid.reset();
    assert_eq!(grid, Grid::new(4));
  }

  #[test]
  fn positions_are_row_major() {
    let grid = Grid::new(2);
    let positions: Vec<Pos> = grid.positions().collect();
    assert_eq!(positions, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
  }

  #[test]
  fn next_letter_skips_blanks() {
    let grid = lettered_grid();
    assert_eq!(grid.next_letter((0, 1), Step::Down), Some((2, 1)));
    assert_eq!(grid.next_letter((2, 1), Step::Up), Some((0, 1)));
    assert_eq!(grid.next_letter((0, 0), Step::Right), Some((0, 1)));
    assert_eq!(grid.next_letter((0, 1), Step::Right), None);
    assert_eq!(grid.next_letter((0, 0), Step::Left), None);
    assert_eq!(grid.next_letter((0, 0), Step::Up), None);
  }

  #[test]
  #[should_panic(expected = "outside a 4x4 grid")]
  fn out_of_bounds_access_panics() {
    let grid = Grid::new(4);
    grid.get((4, 0));
  }
}
