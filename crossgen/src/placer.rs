//! The randomized backtracking search that lays words out on the grid.
//!
//! Words are placed in order. For each word every legal placement is
//! collected, the list is shuffled, and each placement is tried in turn with
//! the remaining words placed recursively after it. A placement that leads to
//! a dead end is undone by writing back the squares it overwrote.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::Direction::{Across, Down};
use crate::placement::{Placement, can_place};
use crate::{Grid, Square, WordEntry};

/// Writes `letters` at `placement` and returns the squares that were there before.
pub fn place_word_on_grid(grid: &mut Grid, letters: &[char], placement: Placement) -> Vec<Square> {
  placement
    .cells(letters.len())
    .zip(letters)
    .map(|(pos, &letter)| {
      let previous = grid.get(pos);
      grid.set(pos, Square::Letter(letter));
      previous
    })
    .collect()
}

/// Undoes [place_word_on_grid], given the squares it returned.
pub fn remove_word_from_grid(grid: &mut Grid, placement: Placement, overwritten: &[Square]) {
  for (pos, &square) in placement.cells(overwritten.len()).zip(overwritten) {
    grid.set(pos, square);
  }
}

/// Every legal placement of `letters` on the grid, in row-major order with
/// Across tried before Down at each square.
pub fn candidates(grid: &Grid, letters: &[char], is_first_word: bool) -> Vec<Placement> {
  grid
    .positions()
    .flat_map(|(row, col)| [Placement::new(row, col, Across), Placement::new(row, col, Down)])
    .filter(|&p| can_place(grid, letters, p, is_first_word))
    .collect()
}

/// One attempt at placing a fixed sequence of words. Owns the grid for the
/// duration of the attempt.
pub struct Placer<'a, R: Rng> {
  grid: Grid,
  words: &'a [WordEntry],
  placements: Vec<Placement>,
  rng: &'a mut R,
  steps: u64,
  step_limit: Option<u64>,
}

impl<'a, R: Rng> Placer<'a, R> {
  pub fn new(size: usize, words: &'a [WordEntry], rng: &'a mut R) -> Self {
    Self {
      grid: Grid::new(size),
      words,
      placements: Vec::with_capacity(words.len()),
      rng,
      steps: 0,
      step_limit: None,
    }
  }

  /// Gives up on the attempt after this many tentative placements.
  pub fn with_step_limit(mut self, step_limit: Option<u64>) -> Self {
    self.step_limit = step_limit;
    self
  }

  /// The number of tentative placements made so far.
  pub fn steps(&self) -> u64 {
    self.steps
  }

  pub fn grid(&self) -> &Grid {
    &self.grid
  }

  /// Runs the search from the first word. On success returns the filled grid
  /// and the placement of each word, in word order.
  pub fn run(mut self) -> Option<(Grid, Vec<Placement>)> {
    if self.place(0) {
      Some((self.grid, self.placements))
    } else {
      None
    }
  }

  /// Places `words[index..]`, assuming the earlier words are already on the grid.
  /// Leaves the grid exactly as it found it when returning false.
  pub fn place(&mut self, index: usize) -> bool {
    let words = self.words;
    if index == words.len() {
      return true;
    }

    let word = &words[index];
    let mut candidates = candidates(&self.grid, word.letters(), index == 0);
    candidates.shuffle(&mut *self.rng);

    for placement in candidates {
      if self.out_of_steps() {
        return false;
      }
      self.steps += 1;

      log::trace!("Placing {} at {:?}", word.word(), placement);
      let overwritten = place_word_on_grid(&mut self.grid, word.letters(), placement);
      self.placements.push(placement);

      if self.place(index + 1) {
        return true;
      }

      log::trace!("Backtracking {} from {:?}", word.word(), placement);
      self.placements.pop();
      remove_word_from_grid(&mut self.grid, placement, &overwritten);
    }

    false
  }

  fn out_of_steps(&self) -> bool {
    self.step_limit.is_some_and(|limit| self.steps >= limit)
  }
}
