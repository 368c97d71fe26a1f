//! Clue numbering.
//!
//! Each distinct starting square gets its own number, counting up from 1. An
//! Across word and a Down word that start on the same square share a number.

use crate::{Grid, PlacedWord};

/// The order in which starting squares are handed their numbers.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, clap::ValueEnum)]
pub enum NumberingOrder {
  /// The order the words were placed in.
  #[default]
  Placement,
  /// Top to bottom, then left to right, as printed crosswords do.
  RowMajor,
}

/// Clears all clue numbers, then numbers every word and stamps each number
/// onto the grid at the word's first square.
pub fn assign_clue_numbers(grid: &mut Grid, words: &mut [PlacedWord], order: NumberingOrder) {
  grid.clear_clue_numbers();
  for word in words.iter_mut() {
    word.clue_number = 0;
  }

  let mut visit: Vec<usize> = (0..words.len()).collect();
  if order == NumberingOrder::RowMajor {
    visit.sort_by_key(|&i| words[i].placement.anchor());
  }

  let mut clue_number = 1;
  for (k, &i) in visit.iter().enumerate() {
    if words[i].clue_number != 0 {
      continue;
    }

    let anchor = words[i].placement.anchor();
    words[i].clue_number = clue_number;
    grid.set_clue_number(anchor, clue_number);

    for &j in &visit[k + 1..] {
      if words[j].placement.anchor() == anchor {
        words[j].clue_number = clue_number;
      }
    }
    clue_number += 1;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Direction::{Across, Down};
  use crate::{Placement, WordEntry};
  use std::collections::HashMap;

  fn placed(id: u32, word: &str, row: usize, col: usize, direction: crate::Direction) -> PlacedWord {
    PlacedWord {
      entry: WordEntry::new(id, word, "clue"),
      placement: Placement::new(row, col, direction),
      clue_number: 99,
    }
  }

  fn words() -> Vec<PlacedWord> {
    vec![
      placed(1, "EMPTY", 2, 0, Across),
      placed(2, "AGENT", 0, 0, Across),
      placed(3, "AGE", 0, 0, Down),
      placed(4, "GAME", 0, 1, Down),
    ]
  }

  fn numbers(words: &[PlacedWord]) -> Vec<u32> {
    words.iter().map(|w| w.clue_number).collect()
  }

  #[test]
  fn numbers_follow_placement_order() {
    let mut grid = Grid::new(5);
    let mut words = words();
    assign_clue_numbers(&mut grid, &mut words, NumberingOrder::Placement);

    assert_eq!(numbers(&words), vec![1, 2, 2, 3]);
    assert_eq!(grid.clue_number((2, 0)), 1);
    assert_eq!(grid.clue_number((0, 0)), 2);
    assert_eq!(grid.clue_number((0, 1)), 3);
    assert_eq!(grid.positions().filter(|&p| grid.clue_number(p) != 0).count(), 3);
  }

  #[test]
  fn row_major_numbering() {
    let mut grid = Grid::new(5);
    let mut words = words();
    assign_clue_numbers(&mut grid, &mut words, NumberingOrder::RowMajor);

    assert_eq!(numbers(&words), vec![3, 1, 1, 2]);
    assert_eq!(grid.clue_number((0, 0)), 1);
    assert_eq!(grid.clue_number((0, 1)), 2);
    assert_eq!(grid.clue_number((2, 0)), 3);
  }

  #[test]
  fn shared_anchor_shares_number_and_distinct_anchors_do_not() {
    for order in [NumberingOrder::Placement, NumberingOrder::RowMajor] {
      let mut grid = Grid::new(5);
      let mut words = words();
      assign_clue_numbers(&mut grid, &mut words, order);

      let mut by_number: HashMap<u32, (usize, usize)> = HashMap::new();
      for w in &words {
        assert_ne!(w.clue_number, 0);
        let anchor = w.placement.anchor();
        let seen = by_number.entry(w.clue_number).or_insert(anchor);
        assert_eq!(*seen, anchor);
      }
    }
  }

  #[test]
  fn renumbering_clears_stale_numbers() {
    let mut grid = Grid::new(5);
    grid.set_clue_number((4, 4), 7);
    let mut words = words();
    assign_clue_numbers(&mut grid, &mut words, NumberingOrder::Placement);
    assert_eq!(grid.clue_number((4, 4)), 0);
  }
}
