use super::*;
use toy_games::TicTacToe;

#[test]
fn test_selfplay_finds_back_rank_mate() {
    let start = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    let report = selfplay(&start, 1, 10);
    assert_eq!(report.moves, vec!["a1a8"]);
    assert_eq!(report.result, GameResult::WhiteWins);
    assert_eq!(report.final_fen, "R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1");
}

#[test]
fn test_ply_limit_leaves_game_unfinished() {
    let report = selfplay(&Position::startpos(), 1, 0);
    assert!(report.moves.is_empty());
    assert_eq!(report.result, GameResult::Unfinished);
    assert_eq!(report.start_fen, report.final_fen);
}

#[test]
fn test_result_of_finished_positions() {
    let stalemate = Position::from_fen("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(GameResult::of(&stalemate), GameResult::Draw);
    let mated = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1").unwrap();
    assert_eq!(GameResult::of(&mated), GameResult::WhiteWins);
    assert_eq!(GameResult::BlackWins.as_str(), "0-1");
}

#[test]
fn test_report_serializes_result_notation() {
    let report = selfplay(&Position::startpos(), 1, 0);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["result"], "*");
}

#[test]
fn test_tictactoe_self_play_is_drawn() {
    let line = play_out(TicTacToe::new(), 9, 20);
    assert_eq!(line.len(), 9);
    let (_, last) = line.last().unwrap();
    assert!(last.is_over());
    assert_eq!(last.winner(), None);
}
