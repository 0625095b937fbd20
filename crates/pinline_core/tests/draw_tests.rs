//! Tests for game-end detection
//!
//! This module covers:
//! - Stalemate
//! - The 150-ply move cap
//! - Checkmate versus plain check

use pinline_core::{
    Color, GameStatus, PLY_CAP, Position, children, evaluate, legal_moves, parse_uci_move, status,
};

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap_or_else(|e| panic!("bad FEN '{fen}': {e}"))
}

// =============================================================================
// Stalemate Tests
// =============================================================================

#[test]
fn test_stalemate_king_in_corner() {
    // Black king on a8, White queen on b6, White king on c7
    let pos = pos("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");

    assert!(legal_moves(&pos).is_empty(), "Stalemate position should have no legal moves");
    assert!(!pos.in_check(), "Stalemate means king is not in check");
    assert_eq!(status(&pos), GameStatus::Stalemate);
}

#[test]
fn test_stalemate_king_and_pawn_endgame() {
    // White king on g6, white pawn on g7, black king on g8
    let pos = pos("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1");

    assert!(legal_moves(&pos).is_empty(), "Stalemate position should have no legal moves");
    assert_eq!(status(&pos), GameStatus::Stalemate);
    assert_eq!(evaluate(&pos), 0.0);
}

#[test]
fn test_stalemate_by_pinned_piece() {
    // The black bishop is pinned on the a-file and the king has no squares.
    let pos = pos("k7/b1K5/8/8/8/8/8/R7 b - - 0 1");
    let moves = legal_moves(&pos);
    assert!(moves.is_empty(), "Pinned bishop may not move: {moves:?}");
    assert_eq!(status(&pos), GameStatus::Stalemate);
}

// =============================================================================
// Move Cap Tests
// =============================================================================

#[test]
fn test_move_cap_at_150_halfmoves() {
    let pos = pos("8/8/8/4k3/8/4K3/8/8 w - - 150 90");

    assert!(pos.is_ply_cap_reached());
    assert!(children(&pos).is_empty(), "No children once the cap is reached");
    assert_eq!(status(&pos), GameStatus::MoveLimitDraw);
    assert_eq!(evaluate(&pos), 0.0);
}

#[test]
fn test_move_cap_at_149_halfmoves() {
    let pos = pos("8/8/8/4k3/8/4K3/8/8 w - - 149 90");

    assert!(!pos.is_ply_cap_reached());
    assert!(!children(&pos).is_empty());
    assert_eq!(status(&pos), GameStatus::Ongoing);
}

#[test]
fn test_move_cap_reset_on_pawn_move() {
    let pos = pos("8/8/8/4k3/8/3K4/4P3/8 w - - 149 60");
    let next = pos.apply(parse_uci_move(&pos, "e2e4").expect("legal"));

    assert_eq!(next.halfmove_clock, 0, "Halfmove clock should be 0 after pawn move");
    assert_eq!(status(&next), GameStatus::Ongoing);
}

#[test]
fn test_move_cap_reached_by_quiet_move() {
    let pos = pos("8/8/8/4k3/8/3K4/4P3/8 w - - 149 60");
    let next = pos.apply(parse_uci_move(&pos, "d3c3").expect("legal"));

    assert_eq!(next.halfmove_clock, PLY_CAP);
    assert_eq!(status(&next), GameStatus::MoveLimitDraw);
}

// =============================================================================
// Integration Tests - Not Checkmate Scenarios
// =============================================================================

#[test]
fn test_checkmate_is_not_stalemate() {
    // Scholar's mate position - this is checkmate, not stalemate
    let pos = pos("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");

    assert!(legal_moves(&pos).is_empty(), "Checkmate position should have no legal moves");
    assert!(pos.in_check(), "Checkmate means king IS in check");
    assert_eq!(status(&pos), GameStatus::Checkmate);
    assert_eq!(pos.side_to_move, Color::Black);
}

#[test]
fn test_check_is_not_checkmate() {
    // Simple check position - not checkmate
    let pos = pos("rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2");

    assert!(!legal_moves(&pos).is_empty(), "Check position should have legal moves");
    assert!(pos.in_check(), "Black king should be in check");
    assert_eq!(status(&pos), GameStatus::Ongoing);
}

#[test]
fn test_checkmate_at_move_cap_is_still_mate() {
    let pos = pos("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 150 4");
    assert_eq!(status(&pos), GameStatus::Checkmate);
}
