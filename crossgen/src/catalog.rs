//! The word catalog: candidate words and their clues, in the order the search
//! will try to place them.
//!
//! Word lists are plain text with one `WORD,CLUE TEXT` entry per line. The word
//! is everything before the first comma and the clue is the rest of the line.
//! Lines without a comma are skipped, as are words that are empty, longer
//! than the grid, or contain anything other than letters.

use std::fs;
use std::path::Path;

use encoding::DecoderTrap::Strict;
use encoding::Encoding;
use encoding::all::ISO_8859_1;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::Error;

/// A candidate word. The identifier is fixed when the entry is created and is
/// never reused within a catalog.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct WordEntry {
  id: u32,
  word: String,
  letters: Vec<char>,
  clue: String,
}

impl WordEntry {
  pub fn new(id: u32, word: &str, clue: &str) -> Self {
    Self {
      id,
      word: word.to_string(),
      letters: word.chars().collect(),
      clue: clue.to_string(),
    }
  }

  pub fn id(&self) -> u32 {
    self.id
  }

  pub fn word(&self) -> &str {
    &self.word
  }

  pub fn clue(&self) -> &str {
    &self.clue
  }

  pub fn letters(&self) -> &[char] {
    &self.letters
  }

  /// The number of letters in the word.
  pub fn len(&self) -> usize {
    self.letters.len()
  }

  pub fn is_empty(&self) -> bool {
    self.letters.is_empty()
  }
}

/// An ordered list of [WordEntry] values.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
  entries: Vec<WordEntry>,
  next_id: u32,
}

impl Catalog {
  pub fn new() -> Self {
    Self {
      entries: Vec::new(),
      next_id: 1,
    }
  }

  /// The three-word set used by the fixed demonstration layout.
  pub fn demo() -> Self {
    let mut catalog = Self::new();
    catalog.push("AGENT", "Spy");
    catalog.push("GAME", "Fun activity");
    catalog.push("EMPTY", "Containing nothing");
    catalog
  }

  /// Appends an entry and returns the identifier it was given.
  pub fn push(&mut self, word: &str, clue: &str) -> u32 {
    let id = self.next_id.max(1);
    self.entries.push(WordEntry::new(id, word, clue));
    self.next_id = id + 1;
    id
  }

  /// Parses a word list. Words are trimmed and upper-cased; words longer than
  /// `max_len` letters or holding non-letters (`ICE CREAM`, `T-REX`) are dropped.
  pub fn parse_from_str(contents: &str, max_len: usize) -> Self {
    let mut catalog = Self::new();
    for line in contents.lines() {
      let line = line.strip_suffix('\r').unwrap_or(line);
      let Some((word, clue)) = line.split_once(',') else {
        continue;
      };
      let word = word.trim().to_uppercase();
      let len = word.chars().count();
      if len == 0 || len > max_len {
        log::debug!("Skipping word {:?} ({} letters, limit {})", word, len, max_len);
        continue;
      }
      if !word.chars().all(char::is_alphabetic) {
        log::debug!("Skipping word {:?}: only letters can be placed", word);
        continue;
      }
      catalog.push(&word, clue);
    }
    catalog
  }

  /// Reads and parses a word list from disk. See [Catalog::parse_from_str].
  pub fn load_from_path(path: impl AsRef<Path>, max_len: usize) -> Result<Self, Error> {
    let data = fs::read(path.as_ref())?;
    let contents = decode_word_list(data)?;
    let catalog = Self::parse_from_str(&contents, max_len);
    log::debug!(
      "Loaded {} words from {}",
      catalog.len(),
      path.as_ref().display()
    );
    Ok(catalog)
  }

  /// If there are more than `max` entries, keeps a uniformly random subset of
  /// `max` of them. Identifiers are kept as they are.
  pub fn select(&mut self, max: usize, rng: &mut impl Rng) {
    if self.entries.len() <= max {
      return;
    }
    let chosen: Vec<WordEntry> = self.entries.choose_multiple(rng, max).cloned().collect();
    self.entries = chosen;
  }

  /// Randomly reorders the entries.
  pub fn shuffle(&mut self, rng: &mut impl Rng) {
    self.entries.shuffle(rng);
  }

  pub fn entries(&self) -> &[WordEntry] {
    &self.entries
  }

  pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
    self.entries.iter()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl From<Vec<WordEntry>> for Catalog {
  fn from(entries: Vec<WordEntry>) -> Self {
    let next_id = entries.iter().map(WordEntry::id).max().unwrap_or(0) + 1;
    Self { entries, next_id }
  }
}

/// Word lists are usually UTF-8, but older ones are ISO-8859-1.
fn decode_word_list(data: Vec<u8>) -> Result<String, Error> {
  match String::from_utf8(data) {
    Ok(s) => Ok(s),
    Err(e) => {
      let bytes = e.into_bytes();
      log::debug!("Word list is not UTF-8, decoding as ISO-8859-1");
      ISO_8859_1
        .decode(&bytes, Strict)
        .map_err(|e| Error::EncodingError(format!("Failed decoding word list as ISO-8859-1: {}", e)))
    }
  }
}
