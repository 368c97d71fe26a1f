use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crossgen::game::{GameRecord, GameStore, JsonLinesStore, LEADERBOARD_SIZE, LogStore, check_answer};
use crossgen::{
  Catalog, Error, GeneratorConfig, MAX_GRID_SIZE, MAX_WORDS, NumberingOrder, export_puzzle, generate,
  generate_static,
};

/// Crossword generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Lay out a random selection of words from a word list
  Generate(GenerateArgs),
  /// Print the fixed three-word demonstration puzzle
  GenerateStatic {
    #[arg(long)]
    pretty: bool,
  },
  /// Compare an answer with the correct word
  CheckAnswer {
    word_id: u32,
    user_word: String,
    correct_word: String,
  },
  /// Save the result of a finished game
  EndGame {
    player_name: String,
    score: u32,
    time_taken: u64,
    /// JSON describing the words the player solved
    words_json: String,
    /// Append the record to this file instead of only logging it
    #[arg(long)]
    store: Option<PathBuf>,
  },
  /// Print the best saved games, highest score first
  Leaderboard {
    /// File the games were appended to by `end-game --store`
    #[arg(long)]
    store: PathBuf,
    #[arg(short = 'n', long, default_value_t = LEADERBOARD_SIZE)]
    limit: usize,
    #[arg(long)]
    pretty: bool,
  },
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
  /// Word list with one `WORD,CLUE` per line
  #[arg(
    short,
    long,
    default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/words.txt")
  )]
  words: PathBuf,

  /// Side length of the grid
  #[arg(short, long, default_value_t = MAX_GRID_SIZE)]
  size: usize,

  /// Number of attempts before giving up
  #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
  attempts: u64,

  /// Seed for a reproducible layout
  #[arg(long)]
  seed: Option<u64>,

  /// Abandon an attempt after this many tentative placements
  #[arg(long)]
  max_steps: Option<u64>,

  #[arg(long, value_enum, default_value_t = NumberingOrder::Placement)]
  numbering: NumberingOrder,

  #[arg(long)]
  pretty: bool,
}

fn main() -> ExitCode {
  crossgen::logging::init_logger(crossgen::logging::debug_requested());

  match run(Cli::parse()) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> Result<(), Error> {
  match cli.command {
    Command::Generate(args) => {
      let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
      };

      let mut catalog = Catalog::load_from_path(&args.words, args.size)?;
      catalog.select(MAX_WORDS, &mut rng);

      let config = GeneratorConfig {
        grid_size: args.size,
        attempts: args.attempts as usize,
        step_limit: args.max_steps,
        numbering: args.numbering,
      };
      let puzzle = generate(&catalog, &config, &mut rng)?;
      println!("{}", export_puzzle(&puzzle).to_json(args.pretty)?);
    }
    Command::GenerateStatic { pretty } => {
      println!("{}", export_puzzle(&generate_static()).to_json(pretty)?);
    }
    Command::CheckAnswer {
      word_id,
      user_word,
      correct_word,
    } => {
      log::debug!("Checking answer for word {}", word_id);
      let check = check_answer(&user_word, &correct_word);
      println!("{}", serde_json::to_string(&check)?);
    }
    Command::EndGame {
      player_name,
      score,
      time_taken,
      words_json,
      store,
    } => {
      let record = GameRecord {
        player_name,
        score,
        time_taken,
        words_solved: serde_json::from_str(&words_json)?,
      };
      match store {
        Some(path) => JsonLinesStore::new(path).save(&record)?,
        None => LogStore.save(&record)?,
      }
      println!("{}", serde_json::json!({ "status": "Game saved successfully." }));
    }
    Command::Leaderboard {
      store,
      limit,
      pretty,
    } => {
      let top = JsonLinesStore::new(store).top_scores(limit)?;
      if pretty {
        println!("{}", serde_json::to_string_pretty(&top)?);
      } else {
        println!("{}", serde_json::to_string(&top)?);
      }
    }
  }
  Ok(())
}
