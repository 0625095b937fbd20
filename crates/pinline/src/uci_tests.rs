use super::*;
use std::time::{Duration, Instant};

/// Output sink the test keeps a handle on while the session owns a clone.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl SharedBuf {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn session(depth: u32) -> (UciSession<SharedBuf>, SharedBuf) {
    let buf = SharedBuf::default();
    (UciSession::new(depth, buf.clone()), buf)
}

fn run_script(script: &str) -> (UciSession<SharedBuf>, String) {
    let (mut session, buf) = session(2);
    session.run(script.as_bytes()).unwrap();
    (session, buf.text())
}

#[test]
fn test_handshake() {
    let (_, out) = run_script("uci\nisready\n");
    assert!(out.starts_with("id name pinline"));
    assert!(out.contains("option name Depth type spin default 2 min 1 max 8\n"));
    assert!(out.contains("uciok\nreadyok\n"));
}

#[test]
fn test_position_with_moves() {
    let (session, _) = run_script("position startpos moves e2e4 e7e5 g1f3\n");
    assert_eq!(
        session.pos.to_fen(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
    );
}

#[test]
fn test_bad_position_keeps_previous() {
    let (session, _) = run_script("position startpos moves e2e4\nposition startpos moves e2e5\n");
    assert_eq!(
        session.pos.to_fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );
}

#[test]
fn test_go_finds_mate_in_one() {
    let (_, out) = run_script("position fen 6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1\ngo depth 1\n");
    assert!(out.ends_with("bestmove a1a8\n"));
}

#[test]
fn test_go_without_moves_reports_null_move() {
    let (_, out) = run_script("position fen R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1\ngo\n");
    assert_eq!(out, "bestmove 0000\n");
}

#[test]
fn test_stop_ends_deep_search_promptly() {
    let started = Instant::now();
    let (_, out) = run_script("position startpos\ngo depth 8\nstop\n");
    assert!(started.elapsed() < Duration::from_secs(5));

    let best = out
        .lines()
        .find_map(|l| l.strip_prefix("bestmove "))
        .expect("bestmove line");
    let legal: Vec<String> = legal_moves(&Position::startpos())
        .iter()
        .map(ToString::to_string)
        .collect();
    assert!(legal.iter().any(|m| m == best), "{best}");
}

#[test]
fn test_isready_answers_during_search() {
    let (mut session, buf) = session(2);
    session.handle("go depth 8").unwrap();
    session.handle("isready").unwrap();
    assert!(buf.text().contains("readyok\n"));
    assert!(!session.handle("quit").unwrap());
    assert!(buf.text().contains("bestmove "));
}

#[test]
fn test_commands_wait_for_running_search() {
    let (mut session, buf) = session(2);
    session.handle("position fen 6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    session.handle("go depth 2").unwrap();
    session.handle("eval").unwrap();
    let out = buf.text();
    let best_at = out.find("bestmove a1a8").expect("search result");
    let eval_at = out.find("eval ").expect("eval reply");
    assert!(best_at < eval_at);
}

#[test]
fn test_setoption_clamps_depth() {
    let (mut session, buf) = session(4);
    session.handle("setoption name Depth value 99").unwrap();
    session.handle("uci").unwrap();
    assert!(buf.text().contains("default 8 min 1"));
}

#[test]
fn test_perft_command() {
    let (_, out) = run_script("perft 2\n");
    assert_eq!(out.lines().count(), 20 + 2);
    assert!(out.ends_with("Nodes searched: 400\n"));
}

#[test]
fn test_quit_stops_reading() {
    let (_, out) = run_script("quit\nisready\n");
    assert!(out.is_empty());
}

#[test]
fn test_display_and_eval() {
    let (_, out) = run_script("ucinewgame\nd\neval\n");
    assert!(out.contains("Fen: rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1\n"));
    assert!(out.ends_with("eval 0.00\n"));
}

#[test]
fn test_unknown_and_blank_lines_are_ignored() {
    let (_, out) = run_script("\nbogus command\nisready\n");
    assert_eq!(out, "readyok\n");
}
