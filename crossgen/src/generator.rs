use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use crate::Direction::{self, Across, Down};
use crate::numbering::assign_clue_numbers;
use crate::placement::can_place;
use crate::placer::{Placer, place_word_on_grid};
use crate::{Catalog, Error, Grid, MAX_GRID_SIZE, MAX_WORDS, NumberingOrder, Placement, Pos, WordEntry};

/// Settings for [generate].
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
  /// Side length of the square grid.
  pub grid_size: usize,
  /// How many times to reshuffle and search from scratch before giving up.
  pub attempts: usize,
  /// Abandon an attempt after this many tentative placements.
  pub step_limit: Option<u64>,
  pub numbering: NumberingOrder,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self {
      grid_size: MAX_GRID_SIZE,
      attempts: 10,
      step_limit: None,
      numbering: NumberingOrder::Placement,
    }
  }
}

/// A word that has been laid out on the grid.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PlacedWord {
  pub entry: WordEntry,
  pub placement: Placement,
  /// 0 until clue numbers have been assigned.
  pub clue_number: u32,
}

impl PlacedWord {
  pub fn direction(&self) -> Direction {
    self.placement.direction
  }

  /// The squares this word covers, first letter first.
  pub fn cells(&self) -> impl Iterator<Item = Pos> + use<> {
    self.placement.cells(self.entry.len())
  }

  pub fn contains(&self, pos: Pos) -> bool {
    self.cells().any(|p| p == pos)
  }
}

/// A finished layout: the filled grid and every word on it, numbered.
#[derive(Debug, Clone)]
pub struct PlacedPuzzle {
  grid: Grid,
  words: Vec<PlacedWord>,
}

impl PlacedPuzzle {
  fn new(mut grid: Grid, mut words: Vec<PlacedWord>, numbering: NumberingOrder) -> Self {
    assign_clue_numbers(&mut grid, &mut words, numbering);
    Self { grid, words }
  }

  pub fn grid(&self) -> &Grid {
    &self.grid
  }

  /// The placed words, in the order they were placed.
  pub fn words(&self) -> &[PlacedWord] {
    &self.words
  }

  /// The first word running in `direction` that covers `pos`.
  pub fn word_at(&self, pos: Pos, direction: Direction) -> Option<&PlacedWord> {
    self.word_index_at(pos, direction).map(|i| &self.words[i])
  }

  /// Like [PlacedPuzzle::word_at], but returns the word's index in [PlacedPuzzle::words].
  pub fn word_index_at(&self, pos: Pos, direction: Direction) -> Option<usize> {
    self
      .words
      .iter()
      .position(|w| w.direction() == direction && w.contains(pos))
  }

  pub fn word_by_id(&self, id: u32) -> Option<&PlacedWord> {
    self.words.iter().find(|w| w.entry.id() == id)
  }
}

/// Lays out every word of the catalog on a fresh grid.
///
/// Words longer than the grid and repeats of an earlier word are dropped
/// first. Each attempt shuffles the remaining words and runs the backtracking
/// search; if every attempt dead-ends, [Error::GenerationExhausted] is returned.
/// An empty catalog succeeds immediately with a blank grid.
pub fn generate(
  catalog: &Catalog,
  config: &GeneratorConfig,
  rng: &mut impl Rng,
) -> Result<PlacedPuzzle, Error> {
  let size = config.grid_size;
  if size == 0 || size > MAX_GRID_SIZE {
    return Err(Error::GridSizeOutOfRange {
      size,
      max: MAX_GRID_SIZE,
    });
  }
  if catalog.len() > MAX_WORDS {
    return Err(Error::CatalogTooLarge {
      count: catalog.len(),
      max: MAX_WORDS,
    });
  }

  let mut words = usable_words(catalog, size);
  if words.is_empty() {
    log::debug!("No usable words, returning a blank grid");
    return Ok(PlacedPuzzle::new(Grid::new(size), Vec::new(), config.numbering));
  }

  for attempt in 1..=config.attempts {
    log::debug!("Generation attempt {} with {} words", attempt, words.len());
    words.shuffle(&mut *rng);

    let placer = Placer::new(size, &words, &mut *rng).with_step_limit(config.step_limit);
    if let Some((grid, placements)) = placer.run() {
      log::debug!("Placed all words on attempt {}", attempt);
      let placed = words
        .iter()
        .zip(placements)
        .map(|(entry, placement)| PlacedWord {
          entry: entry.clone(),
          placement,
          clue_number: 0,
        })
        .collect();
      return Ok(PlacedPuzzle::new(grid, placed, config.numbering));
    }
  }

  Err(Error::GenerationExhausted {
    attempts: config.attempts,
  })
}

/// The fixed three-word layout: AGENT across the top, GAME down from its G,
/// and EMPTY across the third row.
pub fn generate_static() -> PlacedPuzzle {
  let layout = [
    Placement::new(0, 0, Across),
    Placement::new(0, 1, Down),
    Placement::new(2, 0, Across),
  ];

  let mut grid = Grid::new(MAX_GRID_SIZE);
  let mut words = Vec::with_capacity(layout.len());
  for (i, (entry, placement)) in Catalog::demo().iter().zip(layout).enumerate() {
    assert!(
      can_place(&grid, entry.letters(), placement, i == 0),
      "fixed layout cannot place {} at {:?}",
      entry.word(),
      placement
    );
    place_word_on_grid(&mut grid, entry.letters(), placement);
    words.push(PlacedWord {
      entry: entry.clone(),
      placement,
      clue_number: 0,
    });
  }

  PlacedPuzzle::new(grid, words, NumberingOrder::Placement)
}

fn usable_words(catalog: &Catalog, size: usize) -> Vec<WordEntry> {
  let mut seen = HashSet::new();
  catalog
    .iter()
    .filter(|entry| {
      if entry.is_empty() || entry.len() > size {
        log::debug!("Dropping {}: does not fit a {}x{} grid", entry.word(), size, size);
        return false;
      }
      if !entry.letters().iter().all(|c| c.is_alphabetic()) {
        log::debug!("Dropping {}: only letters can be placed", entry.word());
        return false;
      }
      if !seen.insert(entry.word()) {
        log::debug!("Dropping duplicate word {}", entry.word());
        return false;
      }
      true
    })
    .cloned()
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::SeedableRng;
  use rand::rngs::StdRng;

  fn catalog(words: &[&str]) -> Catalog {
    let mut catalog = Catalog::new();
    for w in words {
      catalog.push(w, &format!("Clue for {}", w));
    }
    catalog
  }

  fn config(grid_size: usize) -> GeneratorConfig {
    GeneratorConfig {
      grid_size,
      ..GeneratorConfig::default()
    }
  }

  #[test]
  fn static_layout() {
    let puzzle = generate_static();
    let grid = puzzle.grid();

    let row = |r: usize| -> String { (0..5).map(|c| grid.get((r, c)).to_string()).collect() };
    assert_eq!(row(0), "AGENT");
    assert_eq!(row(1), " A   ");
    assert_eq!(row(2), "EMPTY");
    assert_eq!(row(3), " E   ");

    let numbers: Vec<u32> = puzzle.words().iter().map(|w| w.clue_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(grid.clue_number((0, 0)), 1);
    assert_eq!(grid.clue_number((0, 1)), 2);
    assert_eq!(grid.clue_number((2, 0)), 3);
  }

  #[test]
  fn every_word_reads_back_and_crosses_another() {
    let catalog = catalog(&["AGENT", "GAME", "EMPTY", "TEA", "MEAT", "NET"]);
    let mut rng = StdRng::seed_from_u64(2024);
    let puzzle = generate(&catalog, &config(12), &mut rng).unwrap();
    let grid = puzzle.grid();

    assert_eq!(puzzle.words().len(), 6);
    for (i, word) in puzzle.words().iter().enumerate() {
      assert!(word.placement.fits(word.entry.len(), 12));
      let read: String = word.cells().map(|p| grid.get(p).to_string()).collect();
      assert_eq!(read, word.entry.word());

      if i > 0 {
        let crosses = puzzle.words()[..i]
          .iter()
          .any(|earlier| word.cells().any(|p| earlier.contains(p)));
        assert!(crosses, "{} does not cross an earlier word", word.entry.word());
      }
    }
  }

  #[test]
  fn too_long_word_is_dropped() {
    let catalog = catalog(&["ELEPHANT"]);
    let mut rng = StdRng::seed_from_u64(1);
    let puzzle = generate(&catalog, &config(5), &mut rng).unwrap();
    assert!(puzzle.words().is_empty());
    assert_eq!(*puzzle.grid(), Grid::new(5));
  }

  #[test]
  fn empty_catalog_is_immediate_success() {
    let mut rng = StdRng::seed_from_u64(1);
    let puzzle = generate(&Catalog::new(), &GeneratorConfig::default(), &mut rng).unwrap();
    assert!(puzzle.words().is_empty());
    assert_eq!(puzzle.grid().size(), MAX_GRID_SIZE);
    assert!(puzzle.grid().positions().all(|p| puzzle.grid().is_blank(p)));
  }

  #[test]
  fn empty_catalog_succeeds_without_attempts() {
    let config = GeneratorConfig {
      attempts: 0,
      ..config(6)
    };
    let mut rng = StdRng::seed_from_u64(1);
    let puzzle = generate(&Catalog::new(), &config, &mut rng).unwrap();
    assert!(puzzle.words().is_empty());
    assert_eq!(*puzzle.grid(), Grid::new(6));
  }

  #[test]
  fn words_with_non_letters_never_reach_the_grid() {
    let catalog = catalog(&["ICE CREAM", "ICE", "T-REX"]);
    let mut rng = StdRng::seed_from_u64(1);
    let puzzle = generate(&catalog, &config(10), &mut rng).unwrap();

    let words: Vec<&str> = puzzle.words().iter().map(|w| w.entry.word()).collect();
    assert_eq!(words, vec!["ICE"]);
    let grid = puzzle.grid();
    assert!(
      grid
        .positions()
        .all(|p| grid.get(p).letter().is_none_or(char::is_alphabetic))
    );
  }

  #[test]
  fn no_possible_overlap_exhausts_attempts() {
    let catalog = catalog(&["ABC", "XYZ"]);
    let mut rng = StdRng::seed_from_u64(9);
    let result = generate(&catalog, &config(5), &mut rng);
    assert!(matches!(result, Err(Error::GenerationExhausted { attempts: 10 })));
  }

  #[test]
  fn duplicates_are_placed_once() {
    let catalog = catalog(&["GAME", "GAME", "AGENT"]);
    let mut rng = StdRng::seed_from_u64(5);
    let puzzle = generate(&catalog, &config(8), &mut rng).unwrap();
    let mut words: Vec<&str> = puzzle.words().iter().map(|w| w.entry.word()).collect();
    words.sort();
    assert_eq!(words, vec!["AGENT", "GAME"]);
  }

  #[test]
  fn bounds_are_enforced() {
    let mut rng = StdRng::seed_from_u64(1);
    let result = generate(&Catalog::demo(), &config(17), &mut rng);
    assert!(matches!(result, Err(Error::GridSizeOutOfRange { size: 17, max: 16 })));
    let result = generate(&Catalog::demo(), &config(0), &mut rng);
    assert!(matches!(result, Err(Error::GridSizeOutOfRange { size: 0, .. })));

    let mut big = Catalog::new();
    for _ in 0..46 {
      big.push("CAT", "Pet");
    }
    let result = generate(&big, &config(16), &mut rng);
    assert!(matches!(result, Err(Error::CatalogTooLarge { count: 46, max: 45 })));
  }

  #[test]
  fn word_lookup() {
    let puzzle = generate_static();
    assert_eq!(puzzle.word_at((0, 1), Across).unwrap().entry.word(), "AGENT");
    assert_eq!(puzzle.word_at((0, 1), Down).unwrap().entry.word(), "GAME");
    assert_eq!(puzzle.word_at((2, 1), Across).unwrap().entry.word(), "EMPTY");
    assert!(puzzle.word_at((0, 0), Down).is_none());
    assert_eq!(puzzle.word_by_id(3).unwrap().entry.word(), "EMPTY");
  }
}
