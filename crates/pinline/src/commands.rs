//! One-shot subcommands. Each writes its result to `out`, as text or JSON.

use std::fmt::Display;
use std::io::Write;
use std::time::Instant;

use game_tree::{Game, StopSignal, search};
use pinline_core::{Position, divide, evaluate, legal_moves, perft, status};
use serde::Serialize;
use toy_games::{ConnectFour, CountingGame, TicTacToe};
use tracing::info;

use crate::selfplay::{play_out, selfplay};

/// Toy games that can loop (the counting game allows endless passing) stop here.
const TOY_PLY_LIMIT: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ToyGame {
    Tictactoe,
    ConnectFour,
    Counting,
}

/// Outcome of a single root search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub fen: String,
    pub depth: u32,
    /// `None` when the side to move has no legal move
    pub best: Option<String>,
    pub value: Option<f32>,
    pub nodes: u64,
    pub elapsed_ms: u128,
}

pub fn run_search(pos: &Position, depth: u32) -> SearchReport {
    let started = Instant::now();
    let outcome = search(pos, depth, &StopSignal::new());
    let report = SearchReport {
        fen: pos.to_fen(),
        depth,
        best: outcome.best.as_ref().map(|b| b.action.to_string()),
        value: outcome.best.as_ref().map(|b| b.value),
        nodes: outcome.nodes,
        elapsed_ms: started.elapsed().as_millis(),
    };
    info!(best = ?report.best, nodes = report.nodes, elapsed_ms = report.elapsed_ms as u64, "search finished");
    report
}

pub fn bestmove<W: Write>(out: &mut W, pos: &Position, depth: u32, json: bool) -> anyhow::Result<()> {
    let report = run_search(pos, depth);
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }
    match (&report.best, report.value) {
        (Some(best), Some(value)) => writeln!(out, "bestmove {best} ({value:+.2})")?,
        _ => writeln!(out, "bestmove 0000 ({:?})", status(pos))?,
    }
    Ok(())
}

pub fn moves<W: Write>(out: &mut W, pos: &Position, json: bool) -> anyhow::Result<()> {
    let moves: Vec<String> = legal_moves(pos).iter().map(ToString::to_string).collect();
    if json {
        writeln!(out, "{}", serde_json::to_string(&moves)?)?;
    } else {
        writeln!(out, "{}", moves.join(" "))?;
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
struct EvalReport {
    fen: String,
    status: String,
    value: f32,
}

pub fn eval<W: Write>(out: &mut W, pos: &Position, json: bool) -> anyhow::Result<()> {
    let report = EvalReport {
        fen: pos.to_fen(),
        status: format!("{:?}", status(pos)),
        value: evaluate(pos),
    };
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(out, "{}", pos.board)?;
        writeln!(out, "{} {:+.2}", report.status, report.value)?;
    }
    Ok(())
}

pub fn run_perft<W: Write>(out: &mut W, pos: &Position, depth: u8, split: bool) -> anyhow::Result<()> {
    let started = Instant::now();
    let nodes = if split {
        let mut total = 0;
        for (action, count) in divide(pos, depth) {
            writeln!(out, "{action}: {count}")?;
            total += count;
        }
        total
    } else {
        perft(pos, depth)
    };
    let elapsed = started.elapsed();
    info!(depth, nodes, elapsed_ms = elapsed.as_millis() as u64, "perft finished");
    writeln!(out, "perft({depth}) = {nodes}")?;
    Ok(())
}

pub fn run_selfplay<W: Write>(
    out: &mut W,
    pos: &Position,
    depth: u32,
    max_plies: usize,
    json: bool,
) -> anyhow::Result<()> {
    let report = selfplay(pos, depth, max_plies);
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(out, "{} {}", report.moves.join(" "), report.result.as_str())?;
        writeln!(out, "{}", report.final_fen)?;
    }
    Ok(())
}

pub fn run_toy<W: Write>(out: &mut W, game: ToyGame, depth: u32) -> anyhow::Result<()> {
    match game {
        ToyGame::Tictactoe => show_game(out, TicTacToe::new(), depth),
        ToyGame::ConnectFour => show_game(out, ConnectFour::new(), depth),
        ToyGame::Counting => show_game(out, CountingGame::new(), depth),
    }
}

/// Prints every state of a game played out by the search.
fn show_game<W, G>(out: &mut W, start: G, depth: u32) -> anyhow::Result<()>
where
    W: Write,
    G: Game + Clone + Display,
    G::Action: Display,
{
    writeln!(out, "{start}")?;
    let line = play_out(start, depth, TOY_PLY_LIMIT);
    for (action, state) in &line {
        writeln!(out, "> {action}")?;
        writeln!(out, "{state}")?;
    }
    if let Some((_, last)) = line.last() {
        writeln!(out, "final score {:+.1}", last.evaluate())?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
