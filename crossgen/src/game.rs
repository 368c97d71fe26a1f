//! Scoring answers and saving finished games.

use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::Error;

/// How many games the leaderboard shows by default.
pub const LEADERBOARD_SIZE: usize = 10;

/// Points awarded for a correct answer.
pub const POINTS_PER_WORD: u32 = 10;

/// The outcome of checking one answer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct AnswerCheck {
  pub correct: bool,
  #[serde(rename = "scoreDelta")]
  pub score_delta: u32,
}

/// Compares a player's answer with the solution, ignoring ASCII case.
pub fn check_answer(user_word: &str, correct_word: &str) -> AnswerCheck {
  let correct = user_word.trim().eq_ignore_ascii_case(correct_word.trim());
  AnswerCheck {
    correct,
    score_delta: if correct { POINTS_PER_WORD } else { 0 },
  }
}

/// A completed game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
  pub player_name: String,
  pub score: u32,
  /// Seconds from the start of the game to the end.
  pub time_taken: u64,
  pub words_solved: serde_json::Value,
}

/// Somewhere to keep finished games.
pub trait GameStore {
  fn save(&mut self, record: &GameRecord) -> Result<(), Error>;
}

/// Writes each record to the log and nothing else.
#[derive(Debug, Default)]
pub struct LogStore;

impl GameStore for LogStore {
  fn save(&mut self, record: &GameRecord) -> Result<(), Error> {
    log::info!(
      "Saving game: Player={}, Score={}, Time={}, WordsSolved={}",
      record.player_name,
      record.score,
      record.time_taken,
      record.words_solved
    );
    Ok(())
  }
}

/// Appends each record to a file as one line of JSON.
#[derive(Debug)]
pub struct JsonLinesStore {
  path: PathBuf,
}

impl JsonLinesStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// The best `n` saved games: highest score first, faster games first on a
  /// tie. A store that has never been written to is empty.
  pub fn top_scores(&self, n: usize) -> Result<Vec<GameRecord>, Error> {
    let contents = match fs::read_to_string(&self.path) {
      Ok(contents) => contents,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
      Err(e) => return Err(e.into()),
    };

    let mut records = contents
      .lines()
      .filter(|line| !line.trim().is_empty())
      .map(serde_json::from_str::<GameRecord>)
      .collect::<Result<Vec<GameRecord>, _>>()?;
    records.sort_by_key(|r| (std::cmp::Reverse(r.score), r.time_taken));
    records.truncate(n);
    Ok(records)
  }
}

impl GameStore for JsonLinesStore {
  fn save(&mut self, record: &GameRecord) -> Result<(), Error> {
    let mut line = serde_json::to_string(record)?;
    line.push('\n');
    let mut file = OpenOptions::new()
      .create(true)
      .append(true)
      .open(&self.path)?;
    file.write_all(line.as_bytes())?;
    log::debug!("Saved game for {} to {}", record.player_name, self.path.display());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;

  #[test]
  fn answers_are_scored() {
    assert_eq!(
      check_answer("agent", "AGENT"),
      AnswerCheck {
        correct: true,
        score_delta: 10
      }
    );
    assert_eq!(
      check_answer("AGENTS", "AGENT"),
      AnswerCheck {
        correct: false,
        score_delta: 0
      }
    );
  }

  #[test]
  fn answer_json_uses_camel_case_delta() {
    let json = serde_json::to_string(&check_answer("GAME", "GAME")).unwrap();
    assert_eq!(json, r#"{"correct":true,"scoreDelta":10}"#);
  }

  #[test]
  fn json_lines_store_appends() {
    let path = std::env::temp_dir().join(format!("crossgen-games-{}.jsonl", std::process::id()));
    let _ = fs::remove_file(&path);

    let mut store = JsonLinesStore::new(&path);
    let record = GameRecord {
      player_name: "sam".to_string(),
      score: 20,
      time_taken: 95,
      words_solved: serde_json::json!(["AGENT", "GAME"]),
    };
    store.save(&record).unwrap();
    store.save(&record).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<GameRecord> = contents
      .lines()
      .map(|l| serde_json::from_str(l).unwrap())
      .collect();
    assert_eq!(lines, vec![record.clone(), record]);
    fs::remove_file(&path).unwrap();
  }

  fn record(player_name: &str, score: u32, time_taken: u64) -> GameRecord {
    GameRecord {
      player_name: player_name.to_string(),
      score,
      time_taken,
      words_solved: serde_json::json!([]),
    }
  }

  #[test]
  fn top_scores_ranks_by_score_then_time() {
    let path = std::env::temp_dir().join(format!("crossgen-top-{}.jsonl", std::process::id()));
    let _ = fs::remove_file(&path);

    let mut store = JsonLinesStore::new(&path);
    assert!(store.top_scores(LEADERBOARD_SIZE).unwrap().is_empty());

    for r in [record("ana", 20, 90), record("bo", 40, 300), record("cy", 20, 45), record("di", 10, 5)] {
      store.save(&r).unwrap();
    }
    let names: Vec<String> = store
      .top_scores(3)
      .unwrap()
      .into_iter()
      .map(|r| r.player_name)
      .collect();
    assert_eq!(names, vec!["bo", "cy", "ana"]);
    assert_eq!(store.top_scores(LEADERBOARD_SIZE).unwrap().len(), 4);
    fs::remove_file(&path).unwrap();
  }

  #[test]
  fn log_store_accepts_records() {
    let record = GameRecord {
      player_name: "sam".to_string(),
      score: 0,
      time_taken: 1,
      words_solved: serde_json::json!([]),
    };
    assert!(LogStore.save(&record).is_ok());
  }
}
