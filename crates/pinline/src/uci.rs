//! Line-based UCI-style protocol over any reader/writer pair.
//!
//! `go` searches on a worker thread so `stop`, `isready` and `quit` are read
//! while it runs. Other commands wait for the running search first.

use std::fmt::Write as _;
use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use anyhow::{Context, anyhow};
use game_tree::{SearchOutcome, StopSignal, search};
use pinline_core::{Action, Position, divide, evaluate, legal_moves, position_from_uci};
use tracing::{debug, info, warn};

use crate::config::{MAX_DEPTH, clamp_depth};

const ENGINE_NAME: &str = concat!("pinline ", env!("CARGO_PKG_VERSION"));

pub struct UciSession<W> {
    pos: Position,
    depth: u32,
    stop: StopSignal,
    /// Shared with the search thread, which writes `bestmove` itself.
    out: Arc<Mutex<W>>,
    worker: Option<JoinHandle<()>>,
}

/// Writes `text` in one piece and flushes.
fn send<W: Write>(out: &Mutex<W>, text: &str) -> anyhow::Result<()> {
    let mut out = out.lock().map_err(|_| anyhow!("output lock poisoned"))?;
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// `info` and `bestmove` lines for a finished or stopped search.
fn search_report(pos: &Position, depth: u32, outcome: &SearchOutcome<Action>) -> String {
    let mut text = String::new();
    match &outcome.best {
        Some(best) => {
            info!(
                depth,
                nodes = outcome.nodes,
                value = best.value,
                stopped = outcome.stopped,
                "search finished"
            );
            let _ = writeln!(
                text,
                "info depth {depth} nodes {} score {:.2}",
                outcome.nodes, best.value
            );
            let _ = writeln!(text, "bestmove {}", best.action);
        }
        // Stopped before any root move finished: any legal move will do.
        None => match legal_moves(pos).first() {
            Some(mv) => {
                let _ = writeln!(text, "bestmove {mv}");
            }
            None => text.push_str("bestmove 0000\n"),
        },
    }
    text
}

impl<W: Write + Send + 'static> UciSession<W> {
    pub fn new(depth: u32, out: W) -> Self {
        Self {
            pos: Position::startpos(),
            depth: clamp_depth(depth),
            stop: StopSignal::new(),
            out: Arc::new(Mutex::new(out)),
            worker: None,
        }
    }

    /// Reads commands until `quit` or end of input. At end of input a running
    /// search is allowed to finish.
    pub fn run<R: BufRead>(&mut self, input: R) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read command")?;
            if !self.handle(&line)? {
                break;
            }
        }
        self.wait_for_search()
    }

    /// Executes one command line. Returns `false` once the session should end.
    pub fn handle(&mut self, line: &str) -> anyhow::Result<bool> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Ok(true);
        };

        match command {
            "isready" => send(&self.out, "readyok\n")?,
            "stop" => {
                self.stop.stop();
                self.wait_for_search()?;
            }
            "quit" => {
                self.stop.stop();
                self.wait_for_search()?;
                return Ok(false);
            }
            _ => {
                self.wait_for_search()?;
                let reply = self.execute(command, args)?;
                if !reply.is_empty() {
                    send(&self.out, &reply)?;
                }
            }
        }
        Ok(true)
    }

    /// Commands that run with no search in flight. Returns the reply text.
    fn execute(&mut self, command: &str, args: &[&str]) -> anyhow::Result<String> {
        let mut reply = String::new();
        match command {
            "uci" => {
                writeln!(reply, "id name {ENGINE_NAME}")?;
                writeln!(reply, "id author pinline developers")?;
                writeln!(
                    reply,
                    "option name Depth type spin default {} min 1 max {MAX_DEPTH}",
                    self.depth
                )?;
                writeln!(reply, "uciok")?;
            }
            "ucinewgame" => self.pos = Position::startpos(),
            "setoption" => self.set_option(args),
            "position" => match position_from_uci(args) {
                Ok(pos) => self.pos = pos,
                // The previous position stays in place.
                Err(e) => warn!(error = %e, "rejected position command"),
            },
            "go" => self.go(args),
            "d" => {
                writeln!(reply, "{}", self.pos.board)?;
                writeln!(reply, "Fen: {}", self.pos.to_fen())?;
            }
            "eval" => writeln!(reply, "eval {:.2}", evaluate(&self.pos))?,
            "perft" => {
                let depth = args.first().and_then(|d| d.parse::<u8>().ok()).unwrap_or(1);
                let mut total = 0;
                for (action, nodes) in divide(&self.pos, depth) {
                    writeln!(reply, "{action}: {nodes}")?;
                    total += nodes;
                }
                writeln!(reply)?;
                writeln!(reply, "Nodes searched: {total}")?;
            }
            _ => debug!(command, "ignoring unknown command"),
        }
        Ok(reply)
    }

    /// `setoption name Depth value N`
    fn set_option(&mut self, args: &[&str]) {
        match args {
            ["name", name, "value", value] if name.eq_ignore_ascii_case("depth") => {
                match value.parse::<u32>() {
                    Ok(d) => self.depth = clamp_depth(d),
                    Err(_) => warn!(value, "Depth must be a number"),
                }
            }
            _ => debug!(?args, "ignoring option"),
        }
    }

    /// `go [depth N]`. Time controls are accepted and ignored.
    fn go(&mut self, args: &[&str]) {
        let depth = args
            .iter()
            .position(|&a| a == "depth")
            .and_then(|i| args.get(i + 1))
            .and_then(|d| d.parse::<u32>().ok())
            .map_or(self.depth, clamp_depth);

        self.stop.reset();
        let pos = self.pos.clone();
        let stop = self.stop.clone();
        let out = Arc::clone(&self.out);
        self.worker = Some(thread::spawn(move || {
            let outcome = search(&pos, depth, &stop);
            if let Err(e) = send(&out, &search_report(&pos, depth, &outcome)) {
                warn!(error = %e, "failed to write search result");
            }
        }));
    }

    fn wait_for_search(&mut self) -> anyhow::Result<()> {
        match self.worker.take() {
            Some(worker) => worker.join().map_err(|_| anyhow!("search thread panicked")),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
