use super::*;

fn capture<F>(f: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> anyhow::Result<()>,
{
    let mut out = Vec::new();
    f(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn mate_in_one() -> Position {
    Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap()
}

#[test]
fn test_bestmove_text() {
    let out = capture(|out| bestmove(out, &mate_in_one(), 1, false));
    assert!(out.starts_with("bestmove a1a8 (+"));
}

#[test]
fn test_bestmove_json() {
    let out = capture(|out| bestmove(out, &mate_in_one(), 2, true));
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["best"], "a1a8");
    assert_eq!(report["depth"], 2);
    assert!(report["value"].as_f64().unwrap() >= 1000.0);
}

#[test]
fn test_bestmove_when_mated() {
    let mated = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1").unwrap();
    let out = capture(|out| bestmove(out, &mated, 3, false));
    assert_eq!(out, "bestmove 0000 (Checkmate)\n");
}

#[test]
fn test_moves_lists_start_moves() {
    let out = capture(|out| moves(out, &Position::startpos(), false));
    assert_eq!(out.split_whitespace().count(), 20);
    assert!(out.split_whitespace().any(|m| m == "g1f3"));

    let json = capture(|out| moves(out, &Position::startpos(), true));
    let list: Vec<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(list.len(), 20);
}

#[test]
fn test_eval_json() {
    let out = capture(|out| eval(out, &Position::startpos(), true));
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["status"], "Ongoing");
    assert_eq!(report["value"], 0.0);
}

#[test]
fn test_perft_total() {
    let out = capture(|out| run_perft(out, &Position::startpos(), 3, false));
    assert_eq!(out, "perft(3) = 8902\n");

    let split = capture(|out| run_perft(out, &Position::startpos(), 2, true));
    assert_eq!(split.lines().count(), 21);
    assert!(split.ends_with("perft(2) = 400\n"));
}

#[test]
fn test_selfplay_text() {
    let out = capture(|out| run_selfplay(out, &mate_in_one(), 1, 10, false));
    assert_eq!(out, "a1a8 1-0\nR5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1\n");
}

#[test]
fn test_toy_counting_game_finishes() {
    let out = capture(|out| run_toy(out, ToyGame::Counting, 4));
    assert!(out.starts_with("0 - 0, first to move\n"));
    assert!(out.contains("final score"));
}
