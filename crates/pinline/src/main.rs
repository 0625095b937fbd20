//! pinline command-line front end
//!
//! Commands:
//! - uci: line-based protocol loop on stdin/stdout
//! - bestmove, moves, eval, perft: one-shot queries on a FEN
//! - selfplay: play a game out with the search on both sides
//! - toy: watch the search play one of the toy games

mod commands;
mod config;
mod selfplay;
mod uci;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pinline_core::{Position, START_FEN};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::commands::ToyGame;
use crate::config::{Config, clamp_depth};
use crate::uci::UciSession;

#[derive(Parser)]
#[command(name = "pinline", version)]
#[command(about = "Pin-aware chess move generation and alpha-beta search")]
struct Cli {
    /// TOML config file; a missing file means defaults
    #[arg(long, global = true, default_value = "pinline.toml")]
    config: PathBuf,
    /// Search depth in plies, overriding the config file
    #[arg(long, global = true)]
    depth: Option<u32>,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Speak the UCI protocol on stdin/stdout
    Uci,
    /// Search a position and print the best move
    Bestmove {
        #[arg(long, default_value = START_FEN)]
        fen: String,
    },
    /// List the legal moves of a position
    Moves {
        #[arg(long, default_value = START_FEN)]
        fen: String,
    },
    /// Static evaluation of a position, in pawns
    Eval {
        #[arg(long, default_value = START_FEN)]
        fen: String,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        plies: u8,
        #[arg(long, default_value = START_FEN)]
        fen: String,
        /// Print counts per root move
        #[arg(long)]
        divide: bool,
    },
    /// Play a game against itself
    Selfplay {
        #[arg(long, default_value = START_FEN)]
        fen: String,
        #[arg(long, default_value = "300")]
        max_plies: usize,
    },
    /// Watch the search play a toy game
    Toy {
        #[arg(value_enum)]
        game: ToyGame,
    },
}

fn parse_fen(fen: &str) -> anyhow::Result<Position> {
    Position::from_fen(fen).with_context(|| format!("invalid FEN {fen:?}"))
}

fn init_tracing(level: &str) {
    // RUST_LOG wins over the config file.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    init_tracing(&config.log.level);

    let depth = cli.depth.map_or(config.search.depth, clamp_depth);
    let json = cli.json;
    // Not locked: the UCI search thread writes to stdout too.
    let mut out = io::stdout();

    match cli.command {
        Commands::Uci => {
            info!(depth, "starting UCI session");
            UciSession::new(depth, io::stdout()).run(io::stdin().lock())?;
        }
        Commands::Bestmove { fen } => commands::bestmove(&mut out, &parse_fen(&fen)?, depth, json)?,
        Commands::Moves { fen } => commands::moves(&mut out, &parse_fen(&fen)?, json)?,
        Commands::Eval { fen } => commands::eval(&mut out, &parse_fen(&fen)?, json)?,
        Commands::Perft { plies, fen, divide } => {
            commands::run_perft(&mut out, &parse_fen(&fen)?, plies, divide)?
        }
        Commands::Selfplay { fen, max_plies } => {
            info!(depth, max_plies, "starting self-play");
            commands::run_selfplay(&mut out, &parse_fen(&fen)?, depth, max_plies, json)?
        }
        Commands::Toy { game } => commands::run_toy(&mut out, game, depth)?,
    }
    Ok(())
}
