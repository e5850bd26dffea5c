//! pairlink: command-line driver for the pairing engine.
//!
//! Generates boards, inspects save files and replays scripted moves.
//! Set `RUST_LOG=debug` to watch the engine's decisions.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use pairlink::path::find_connectable_pair;
use pairlink::{Direction, Game, GameConfig, Mode, PlayerId};

#[derive(Debug, Parser)]
#[command(
    name = "pairlink",
    version,
    about = "Connect-the-pair puzzle engine: generate boards, replay moves, inspect saves.",
    long_about = "Two blocks of the same type are removed when a path of open cells joins \
        them with at most two turns.\n\n\
        SCRIPT STEPS (play):\n  L R U D     Move player 1\n  a d w s     Move player 2 (left right up down)\n  \
        .           Advance the clock one unit\n  p           Toggle pause\n  \
        space , _   Ignored separators"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a board and print it.
    New {
        #[command(flatten)]
        source: Source,

        /// Also write the game to this save file.
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Print a saved game.
    Show {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the pair a Hint prop would highlight.
    Hint {
        #[command(flatten)]
        source: Source,
    },

    /// Replay a script of moves and ticks, then print the board.
    Play {
        #[command(flatten)]
        source: Source,

        /// Steps to run, e.g. "RRD..D".
        #[arg(value_name = "SCRIPT")]
        script: String,

        /// Write the final state to this save file.
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

/// Where the starting game comes from.
#[derive(Debug, Args)]
struct Source {
    /// RNG seed for generation, shuffles and spawns.
    #[arg(short, long, default_value = "0")]
    seed: u64,

    /// Board rows, border included (max 15).
    #[arg(long, default_value = "14", value_name = "ROWS")]
    rows: usize,

    /// Board columns, border included (max 15).
    #[arg(long, default_value = "14", value_name = "COLS")]
    cols: usize,

    /// Two-player mode.
    #[arg(short = 't', long)]
    two_player: bool,

    /// Start from a save file instead of a fresh board.
    #[arg(short, long, value_name = "FILE")]
    from: Option<PathBuf>,
}

impl Source {
    fn game(&self) -> Result<Game> {
        let config = GameConfig::default()
            .with_size(self.rows, self.cols)
            .with_mode(Mode::from_two_player(self.two_player));
        let mut game = Game::new(config, self.seed).context("invalid board settings")?;
        if let Some(path) = &self.from {
            game.load(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
        }
        Ok(game)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match Cli::parse().command {
        Command::New { source, out } => {
            let game = source.game()?;
            print!("{}", game.snapshot());
            save(&game, out)?;
        }
        Command::Show { file } => {
            let mut game = Game::new(GameConfig::default(), 0)?;
            game.load(&file)
                .with_context(|| format!("failed to load {}", file.display()))?;
            print!("{}", game.snapshot());
        }
        Command::Hint { source } => {
            let game = source.game()?;
            match find_connectable_pair(game.board()) {
                Some((a, b, path)) => {
                    println!("{} -> {} ({} turns)", a, b, path.turns());
                }
                None => println!("no connectable pair"),
            }
        }
        Command::Play { source, script, out } => {
            let mut game = source.game()?;
            for (i, step) in script.chars().enumerate() {
                run_step(&mut game, step).with_context(|| format!("step {} ({:?})", i + 1, step))?;
                if game.is_finished() {
                    break;
                }
            }
            print!("{}", game.snapshot());
            save(&game, out)?;
        }
    }
    Ok(())
}

fn run_step(game: &mut Game, step: char) -> Result<()> {
    let (player, dir) = match step {
        'L' => (PlayerId::ONE, Direction::Left),
        'R' => (PlayerId::ONE, Direction::Right),
        'U' => (PlayerId::ONE, Direction::Up),
        'D' => (PlayerId::ONE, Direction::Down),
        'a' => (PlayerId::TWO, Direction::Left),
        'd' => (PlayerId::TWO, Direction::Right),
        'w' => (PlayerId::TWO, Direction::Up),
        's' => (PlayerId::TWO, Direction::Down),
        '.' => {
            let report = game.tick();
            if let Some(prop) = report.spawned {
                println!("spawned {} at {}", prop.kind, prop.pos);
            }
            return Ok(());
        }
        'p' => {
            let paused = game.toggle_pause()?;
            println!("{}", if paused { "paused" } else { "resumed" });
            return Ok(());
        }
        ' ' | ',' | '_' => return Ok(()),
        other => bail!("unknown script step {:?}", other),
    };

    let outcome = game.move_player(player, dir)?;
    println!("{} {:?}: {:?}", player, dir, outcome);
    Ok(())
}

fn save(game: &Game, out: Option<PathBuf>) -> Result<()> {
    if let Some(path) = out {
        game.save(&path)
            .with_context(|| format!("failed to save {}", path.display()))?;
        println!("saved to {}", path.display());
    }
    Ok(())
}
