use crate::game::{AnswerCheck, GameRecord, check_answer};
use crate::grid::Step;
use crate::{Direction, Error, Grid, PlacedPuzzle, PlacedWord, Pos, Square};

/// A generated puzzle being solved, plus a cursor. When implementing a
/// front end, this is the main structure you will use.
#[derive(Debug)]
pub struct Puzzle {
  solution: PlacedPuzzle,
  /// The player's letters.
  entries: Grid,
  cursor: Cursor,
  score: u32,
  /// Ids of the words checked correct so far, in the order they were solved.
  solved: Vec<u32>,
}

impl Puzzle {
  /// Starts solving `solution` from an empty grid. Fails if there are no words.
  pub fn new(solution: PlacedPuzzle) -> Result<Self, Error> {
    let cursor = Cursor::from_puzzle(&solution).ok_or(Error::NothingToSolve)?;
    let entries = Grid::new(solution.grid().size());
    Ok(Self {
      solution,
      entries,
      cursor,
      score: 0,
      solved: Vec::new(),
    })
  }

  pub fn solution(&self) -> &PlacedPuzzle {
    &self.solution
  }

  /// Returns a reference to the player's letters.
  pub fn grid(&self) -> &Grid {
    &self.entries
  }

  pub fn cursor_pos(&self) -> Pos {
    self.cursor.pos
  }

  pub fn cursor_direction(&self) -> Direction {
    self.cursor.direction
  }

  pub fn score(&self) -> u32 {
    self.score
  }

  /// Whether every lettered square has been filled in correctly.
  pub fn is_solved(&self) -> bool {
    let solution = self.solution.grid();
    solution
      .positions()
      .all(|pos| solution.get(pos) == self.entries.get(pos))
  }

  /// Determines how a particular square should be styled.
  /// See [SquareStyle].
  pub fn square_style(&self, pos: Pos) -> SquareStyle {
    if self.solution.grid().is_blank(pos) {
      SquareStyle::Blank
    } else if pos == self.cursor.pos {
      SquareStyle::Cursor
    } else if self.current_word().contains(pos) {
      SquareStyle::Word
    } else {
      SquareStyle::Standard
    }
  }

  /// The word the cursor is in.
  pub fn current_word(&self) -> &PlacedWord {
    self.cursor.word(&self.solution)
  }

  /// Returns the text of the clue under the cursor.
  pub fn current_clue(&self) -> &str {
    self.current_word().entry.clue()
  }

  /// Writes the given letter to the current square.
  pub fn add_letter(&mut self, letter: char) {
    assert!(letter.is_alphabetic());

    let upper = letter.to_uppercase().next().unwrap_or(letter);
    self.entries.set(self.cursor.pos, Square::Letter(upper));
  }

  /// Sets the current square to [Blank](Square::Blank).
  pub fn erase_letter(&mut self) {
    self.entries.set(self.cursor.pos, Square::Blank);
  }

  /// Moves the cursor back one square within the current word, if possible.
  pub fn backup_cursor(&mut self) {
    self.cursor.backup(&self.solution);
  }

  /// Moves the cursor to the next empty square in the current word, or if there are no
  /// empty squares left, to the start of the next word.
  pub fn move_cursor_to_next_empty_in_current_word(&mut self) {
    self
      .cursor
      .move_to_next_empty_in_current_word(&self.solution, &self.entries);
  }

  /// Moves the cursor to the next word in the puzzle.
  pub fn advance_cursor_to_next_word(&mut self) {
    self.cursor.advance_to_next_word(&self.solution);
  }

  /// Attempts to swap the cursor direction. If the current square is only
  /// part of an Across word, the direction stays Across, and vice versa.
  pub fn swap_cursor_direction(&mut self) {
    self.cursor.direction = !self.cursor.direction;
    self.cursor.adjust_direction(&self.solution);
  }

  pub fn cursor_up(&mut self) {
    self.cursor.step(&self.solution, Step::Up);
  }
  pub fn cursor_down(&mut self) {
    self.cursor.step(&self.solution, Step::Down);
  }
  pub fn cursor_left(&mut self) {
    self.cursor.step(&self.solution, Step::Left);
  }
  pub fn cursor_right(&mut self) {
    self.cursor.step(&self.solution, Step::Right);
  }

  /// Checks the letters entered for the current word. A word only scores the
  /// first time it is checked correct.
  pub fn check_current_word(&mut self) -> AnswerCheck {
    let word = self.cursor.word(&self.solution);
    let guess: String = word
      .cells()
      .map(|pos| self.entries.get(pos).letter().unwrap_or(' '))
      .collect();
    let id = word.entry.id();

    let mut check = check_answer(&guess, word.entry.word());
    if check.correct {
      if self.solved.contains(&id) {
        check.score_delta = 0;
      } else {
        self.solved.push(id);
        self.score += check.score_delta;
      }
    }
    check
  }

  /// The answers checked correct so far, in the order they were solved.
  pub fn words_solved(&self) -> Vec<&str> {
    self
      .solved
      .iter()
      .filter_map(|&id| self.solution.word_by_id(id))
      .map(|w| w.entry.word())
      .collect()
  }

  /// A record of the game so far, ready to be saved.
  pub fn game_record(&self, player_name: &str, time_taken: u64) -> GameRecord {
    GameRecord {
      player_name: player_name.to_string(),
      score: self.score,
      time_taken,
      words_solved: serde_json::json!(self.words_solved()),
    }
  }
}

/// Indicates how a particular square should look. For instance, [Standard](Self::Standard)
/// might map to white, [Cursor](Self::Cursor) to red, and [Word](Self::Word) to yellow.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SquareStyle {
  /// No word passes through this square.
  Blank,
  /// Default styling
  Standard,
  /// The cursor is positioned on this square.
  Cursor,
  /// The cursor is not on this square, but the word indicated by the cursor includes this square.
  Word,
}

/// Indices of the words in the order Tab visits them: Across by clue number, then Down.
fn clue_order(puzzle: &PlacedPuzzle) -> Vec<usize> {
  let words = puzzle.words();
  let mut order: Vec<usize> = (0..words.len()).collect();
  order.sort_by_key(|&i| (words[i].direction(), words[i].clue_number));
  order
}

/// Represents the position of the player's currently-highlighted square, the
/// `Direction` of the word they are currently entering, and which word that is.
/// Words may share squares, so the word is tracked rather than looked up.
#[derive(Debug, PartialEq, Eq)]
struct Cursor {
  /// The position of the currently-highlighted square.
  pos: Pos,
  /// The current direction.
  direction: Direction,
  /// Index into [PlacedPuzzle::words]. That word runs in `direction` through `pos`.
  word: usize,
}

impl Cursor {
  fn from_puzzle(puzzle: &PlacedPuzzle) -> Option<Self> {
    let first = *clue_order(puzzle).first()?;
    Some(Self::at_start_of(puzzle, first))
  }

  fn at_start_of(puzzle: &PlacedPuzzle, word: usize) -> Self {
    let w = &puzzle.words()[word];
    Self {
      pos: w.placement.anchor(),
      direction: w.direction(),
      word,
    }
  }

  fn word<'a>(&self, puzzle: &'a PlacedPuzzle) -> &'a PlacedWord {
    &puzzle.words()[self.word]
  }

  /// Picks the word under the cursor after `pos` or `direction` changed. Keeps
  /// the current word if it still fits, otherwise prefers a word in the current
  /// direction, then the current word, then a word in the other direction.
  fn adjust_direction(&mut self, puzzle: &PlacedPuzzle) {
    let current = self.word(puzzle);
    if current.direction() == self.direction && current.contains(self.pos) {
      return;
    }

    if let Some(i) = puzzle.word_index_at(self.pos, self.direction) {
      self.word = i;
    } else if current.contains(self.pos) {
      self.direction = current.direction();
    } else if let Some(i) = puzzle.word_index_at(self.pos, !self.direction) {
      self.direction = !self.direction;
      self.word = i;
    }
  }

  /// Moves the cursor to the next empty square starting from the current one,
  /// in the current word.
  ///
  /// If there are no empty squares at or after the current one, moves to the
  /// first empty square in the current word.
  ///
  /// If there are no empty squares anywhere in the word, advances to start of the next word.
  fn move_to_next_empty_in_current_word(&mut self, puzzle: &PlacedPuzzle, entries: &Grid) {
    let cells: Vec<Pos> = self.word(puzzle).cells().collect();
    let i = cells.iter().position(|&p| p == self.pos).unwrap_or(0);

    match cells[i..]
      .iter()
      .chain(&cells[..i])
      .find(|&&p| entries.is_blank(p))
    {
      Some(&pos) => self.pos = pos,
      None => self.advance_to_next_word(puzzle),
    }
  }

  /// Moves the cursor to the start of the next word after the current one that is in
  /// the same direction as the cursor. If we are already on the last `Across`
  /// word, moves to the start of the first `Down` word, and vice versa.
  fn advance_to_next_word(&mut self, puzzle: &PlacedPuzzle) {
    let order = clue_order(puzzle);
    let i = order.iter().position(|&w| w == self.word).unwrap_or(0);
    *self = Self::at_start_of(puzzle, order[(i + 1) % order.len()]);
  }

  fn backup(&mut self, puzzle: &PlacedPuzzle) {
    let cells: Vec<Pos> = self.word(puzzle).cells().collect();
    if let Some(i) = cells.iter().position(|&p| p == self.pos) {
      if i > 0 {
        self.pos = cells[i - 1];
      }
    }
  }

  fn step(&mut self, puzzle: &PlacedPuzzle, step: Step) {
    if let Some(pos) = puzzle.grid().next_letter(self.pos, step) {
      self.pos = pos;
      self.adjust_direction(puzzle);
    }
  }
}
