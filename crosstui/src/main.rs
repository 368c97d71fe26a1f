use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use crossgen::Direction::{Across, Down};
use crossgen::game::{AnswerCheck, GameStore, JsonLinesStore, LogStore};
use crossgen::{Catalog, GeneratorConfig, MAX_GRID_SIZE, MAX_WORDS, Pos, Puzzle, SquareStyle};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{
  DefaultTerminal, Frame,
  buffer::Buffer,
  layout::{Constraint, Flex, Layout, Rect},
  style::{Color, Modifier, Style, Stylize},
  text::Line,
  widgets::{Block, Padding, Paragraph, Widget},
};
use ratatui_macros::{horizontal, line, vertical};

const SQUARE_WIDTH: u16 = 5;
const SQUARE_HEIGHT: u16 = 2;

/// Generate a crossword and solve it in your terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Word list with one `WORD,CLUE` per line
  #[arg(short, long)]
  words: Option<PathBuf>,

  /// Side length of the grid
  #[arg(short, long, default_value_t = MAX_GRID_SIZE)]
  size: usize,

  /// Play the fixed three-word demonstration puzzle
  #[arg(long = "static")]
  fixed: bool,

  /// Seed for a reproducible layout
  #[arg(long)]
  seed: Option<u64>,

  /// Name recorded with the final score
  #[arg(short, long, default_value = "player")]
  player: String,

  /// Append the finished game to this file
  #[arg(long)]
  store: Option<PathBuf>,
}

fn main() -> ExitCode {
  crossgen::logging::init_logger(crossgen::logging::debug_requested());
  let cli = Cli::parse();

  let puzzle = new_puzzle(&cli).unwrap_or_else(|e| {
    eprintln!("Failed to generate a crossword: {}", e);
    std::process::exit(2);
  });

  let app = App::new(puzzle);
  let terminal = ratatui::init();
  let result = app.run(terminal);
  ratatui::restore();

  let app = match result {
    Ok(app) => app,
    Err(e) => {
      eprintln!("{:?}", e);
      return ExitCode::FAILURE;
    }
  };

  log::debug!(
    "Solved {} of {} words",
    app.puzzle.words_solved().len(),
    app.puzzle.solution().words().len()
  );
  let record = app
    .puzzle
    .game_record(&cli.player, app.started.elapsed().as_secs());
  let saved = match &cli.store {
    Some(path) => JsonLinesStore::new(path).save(&record),
    None => LogStore.save(&record),
  };
  if let Err(e) = saved {
    eprintln!("Failed to save game: {}", e);
    return ExitCode::FAILURE;
  }

  println!("Final score: {}, time: {}s", record.score, record.time_taken);
  ExitCode::SUCCESS
}

fn new_puzzle(cli: &Cli) -> Result<Puzzle, crossgen::Error> {
  if cli.fixed {
    return Puzzle::new(crossgen::generate_static());
  }

  let mut rng = match cli.seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_rng(&mut rand::rng()),
  };

  let mut catalog = match &cli.words {
    Some(path) => Catalog::load_from_path(path, cli.size)?,
    None => Catalog::demo(),
  };
  catalog.select(MAX_WORDS, &mut rng);

  let config = GeneratorConfig {
    grid_size: cli.size,
    ..GeneratorConfig::default()
  };
  Puzzle::new(crossgen::generate(&catalog, &config, &mut rng)?)
}

fn style_for(style: SquareStyle) -> Style {
  let base_style = match style {
    SquareStyle::Blank => Style::new().bg(Color::Black),
    SquareStyle::Standard => Style::new().bg(Color::White),
    SquareStyle::Cursor => Style::new().bg(Color::LightRed),
    SquareStyle::Word => Style::new().bg(Color::LightYellow),
  };
  base_style.fg(Color::Black).add_modifier(Modifier::BOLD)
}

#[derive(Debug)]
pub struct App {
  puzzle: Puzzle,
  started: Instant,
  last_check: Option<(String, AnswerCheck)>,
  running: bool,
}

impl App {
  fn new(puzzle: Puzzle) -> Self {
    Self {
      puzzle,
      started: Instant::now(),
      last_check: None,
      running: true,
    }
  }

  pub fn run(mut self, mut terminal: DefaultTerminal) -> io::Result<Self> {
    self.running = true;
    while self.running {
      terminal.draw(|frame| self.draw(frame))?;
      self.handle_crossterm_events()?;
    }
    Ok(self)
  }

  fn draw(&self, frame: &mut Frame) {
    frame.render_widget(self, frame.area());
  }

  /// Reads the crossterm events and updates the state of [`App`]. Polls with a
  /// timeout so the clock keeps ticking while the player thinks.
  fn handle_crossterm_events(&mut self) -> io::Result<()> {
    if !event::poll(Duration::from_millis(500))? {
      return Ok(());
    }
    match event::read()? {
      // it's important to check KeyEventKind::Press to avoid handling key release events
      Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
      Event::Mouse(_) => {}
      Event::Resize(_, _) => {}
      _ => {}
    }
    Ok(())
  }

  /// Handles the key events and updates the state of [`App`].
  fn on_key_event(&mut self, key: KeyEvent) {
    match (key.modifiers, key.code) {
      (_, KeyCode::Esc) | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => {
        self.quit()
      }
      (_, KeyCode::Char(' ')) => self.puzzle.swap_cursor_direction(),
      (_, KeyCode::Char(c)) if c.is_alphabetic() => {
        self.puzzle.add_letter(c);
        self.puzzle.move_cursor_to_next_empty_in_current_word();
      }
      (_, KeyCode::Backspace) => {
        self.puzzle.erase_letter();
        self.puzzle.backup_cursor();
      }
      (_, KeyCode::Enter) => {
        let word = self.puzzle.current_word().entry.word().to_string();
        let check = self.puzzle.check_current_word();
        self.last_check = Some((word, check));
        if self.puzzle.is_solved() {
          self.quit();
        }
      }
      (_, KeyCode::Tab) => self.puzzle.advance_cursor_to_next_word(),
      (_, KeyCode::Up) => self.puzzle.cursor_up(),
      (_, KeyCode::Down) => self.puzzle.cursor_down(),
      (_, KeyCode::Left) => self.puzzle.cursor_left(),
      (_, KeyCode::Right) => self.puzzle.cursor_right(),
      _ => {}
    }
  }

  /// Set running to false to quit the application.
  fn quit(&mut self) {
    self.running = false;
  }

  fn clue_label(&self) -> String {
    let word = self.puzzle.current_word();
    let direction = match word.direction() {
      Across => "Across",
      Down => "Down",
    };
    format!("{} {}", word.clue_number, direction)
  }

  fn status(&self) -> Vec<Line<'_>> {
    let elapsed = self.started.elapsed().as_secs();
    let mut lines = vec![
      line!["Score: ".bold(), self.puzzle.score().to_string()],
      line!["Time: ".bold(), format!("{}:{:02}", elapsed / 60, elapsed % 60)],
    ];
    if let Some((word, check)) = &self.last_check {
      lines.push(if check.correct {
        line![
          format!("{} is correct! +{}", word, check.score_delta).green()
        ]
      } else {
        line!["Not quite, try again.".red()]
      });
    }
    lines
  }

  fn render_square(&self, pos: Pos, square_area: Rect, buf: &mut Buffer) {
    let style = self.puzzle.square_style(pos);
    if style == SquareStyle::Blank {
      Block::new().style(style_for(style)).render(square_area, buf);
      return;
    }

    let number = match self.puzzle.solution().grid().clue_number(pos) {
      0 => String::new(),
      n => n.to_string(),
    };
    let letter = self.puzzle.grid().get(pos).to_string();
    Paragraph::new(vec![Line::from(number).left_aligned(), Line::from(letter).centered()])
      .block(Block::new().style(style_for(style)))
      .render(square_area, buf);
  }
}

impl Widget for &App {
  fn render(self, area: Rect, buf: &mut Buffer) {
    let [title_area, main_area] = vertical![==2, *=1].areas(area);

    let title = Line::from(vec![
      "Ratatui Crossword".bold().blue(),
      ": ".bold(),
      "Enter checks a word, Tab moves on, Esc finishes".into(),
    ])
    .centered();
    title.render(title_area, buf);

    let [puzzle_area, side_area] = horizontal![*=1, ==45].areas(main_area);

    let size = self.puzzle.grid().size() as u16;
    let puzzle_area = center(
      puzzle_area,
      Constraint::Length(size * (1 + SQUARE_WIDTH)),
      Constraint::Length(size * (1 + SQUARE_HEIGHT)),
    );

    let mut square_area = Rect {
      x: puzzle_area.x,
      y: puzzle_area.y,
      width: SQUARE_WIDTH,
      height: SQUARE_HEIGHT,
    };
    for row in 0..self.puzzle.grid().size() {
      for col in 0..self.puzzle.grid().size() {
        let visible = square_area.intersection(area);
        if visible.width > 0 && visible.height > 0 {
          self.render_square((row, col), visible, buf);
        }
        square_area.x += SQUARE_WIDTH + 1;
      }
      square_area.x = puzzle_area.x;
      square_area.y += SQUARE_HEIGHT + 1;
    }

    let [clue_area, status_area] = vertical![*=1, ==7].areas(side_area);

    Paragraph::new(self.puzzle.current_clue())
      .block(
        Block::bordered()
          .title(Line::from(self.clue_label()).centered())
          .padding(Padding::uniform(2)),
      )
      .render(clue_area, buf);

    Paragraph::new(self.status())
      .block(Block::bordered().padding(Padding::horizontal(1)))
      .render(status_area, buf);
  }
}

/// https://ratatui.rs/recipes/layout/center-a-widget/
fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
  let [area] = Layout::horizontal([horizontal])
    .flex(Flex::Center)
    .areas(area);
  let [area] = Layout::vertical([vertical]).flex(Flex::Center).areas(area);
  area
}
