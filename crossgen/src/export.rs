//! The JSON document produced for a finished puzzle.

use serde::{Deserialize, Serialize};

use crate::{Error, PlacedPuzzle};

/// A finished puzzle as sent to clients.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Document {
  /// One single-character string per square, `" "` for blank squares.
  pub grid: Vec<Vec<String>>,
  #[serde(rename = "clueNumbers")]
  pub clue_numbers: Vec<Vec<u32>>,
  pub clues: Vec<Clue>,
}

/// One numbered clue.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Clue {
  pub number: u32,
  /// `"A"` or `"D"`
  pub dir: String,
  /// The clue text.
  pub text: String,
  pub word_id: u32,
  pub length: usize,
  pub row: usize,
  pub col: usize,
  /// The answer.
  pub word: String,
}

/// Projects a puzzle into its wire form. Words without a clue number are left out.
pub fn export_puzzle(puzzle: &PlacedPuzzle) -> Document {
  let grid = puzzle
    .grid()
    .rows()
    .map(|row| row.iter().map(|sq| sq.to_string()).collect())
    .collect();

  let clue_numbers = puzzle
    .grid()
    .clue_number_rows()
    .map(|row| row.to_vec())
    .collect();

  let clues = puzzle
    .words()
    .iter()
    .filter(|w| w.clue_number > 0)
    .map(|w| Clue {
      number: w.clue_number,
      dir: w.direction().tag().to_string(),
      text: w.entry.clue().to_string(),
      word_id: w.entry.id(),
      length: w.entry.len(),
      row: w.placement.row,
      col: w.placement.col,
      word: w.entry.word().to_string(),
    })
    .collect();

  Document {
    grid,
    clue_numbers,
    clues,
  }
}

impl Document {
  pub fn to_json(&self, pretty: bool) -> Result<String, Error> {
    let json = if pretty {
      serde_json::to_string_pretty(self)?
    } else {
      serde_json::to_string(self)?
    };
    Ok(json)
  }

  pub fn from_json(json: &str) -> Result<Self, Error> {
    Ok(serde_json::from_str(json)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::generate_static;
  use std::collections::HashSet;

  #[test]
  fn static_document() {
    let doc = export_puzzle(&generate_static());

    assert_eq!(doc.grid.len(), 16);
    assert!(doc.grid.iter().all(|row| row.len() == 16));
    assert_eq!(doc.grid[0][..5].concat(), "AGENT");
    assert_eq!(doc.grid[2][..5].concat(), "EMPTY");
    assert_eq!(doc.grid[15][15], " ");

    assert_eq!(doc.clue_numbers[0][0], 1);
    assert_eq!(doc.clue_numbers[0][1], 2);
    assert_eq!(doc.clue_numbers[2][0], 3);

    assert_eq!(doc.clues.len(), 3);
    let numbers: HashSet<u32> = doc.clues.iter().map(|c| c.number).collect();
    assert_eq!(numbers.len(), 3);

    assert_eq!(
      doc.clues[1],
      Clue {
        number: 2,
        dir: "D".to_string(),
        text: "Fun activity".to_string(),
        word_id: 2,
        length: 4,
        row: 0,
        col: 1,
        word: "GAME".to_string(),
      }
    );
  }

  #[test]
  fn json_field_names() {
    let json = export_puzzle(&generate_static()).to_json(false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert!(value["clueNumbers"].is_array());
    assert_eq!(value["grid"][0][0], "A");
    assert_eq!(
      value["clues"][0],
      serde_json::json!({
        "number": 1,
        "dir": "A",
        "text": "Spy",
        "word_id": 1,
        "length": 5,
        "row": 0,
        "col": 0,
        "word": "AGENT",
      })
    );
  }

  #[test]
  fn parses_its_own_output() {
    let doc = export_puzzle(&generate_static());
    let json = doc.to_json(true).unwrap();
    assert_eq!(Document::from_json(&json).unwrap(), doc);
  }
}
