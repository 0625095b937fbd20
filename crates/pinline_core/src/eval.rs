//! Static evaluation in pawns, from White's point of view.
//!
//! Decided positions score ±[`WIN_VALUE`] (mate) or 0 (stalemate, move limit).
//! Everything else is material plus a piece-square bonus, so the score of an
//! undecided position stays far below `WIN_VALUE`.

use game_tree::WIN_VALUE;

use crate::movegen::{GameStatus, status};
use crate::position::Position;
use crate::types::*;

// Piece-square tables in centipawns, drawn with rank 8 on top from White's
// side. Black reads them mirrored by rank.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_TABLE: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

const TABLES: [&[i32; 64]; 6] = [
    &PAWN_TABLE,
    &KNIGHT_TABLE,
    &BISHOP_TABLE,
    &ROOK_TABLE,
    &QUEEN_TABLE,
    &KING_TABLE,
];

/// Score of `pos` in pawns, positive when White is better.
pub fn evaluate(pos: &Position) -> f32 {
    match status(pos) {
        GameStatus::Checkmate => match pos.side_to_move {
            Color::White => -WIN_VALUE,
            Color::Black => WIN_VALUE,
        },
        GameStatus::Stalemate | GameStatus::MoveLimitDraw => 0.0,
        GameStatus::Ongoing => material_and_placement(pos) as f32 / 100.0,
    }
}

/// Material and piece-square bonus in centipawns, White minus Black.
pub fn material_and_placement(pos: &Position) -> i32 {
    let mut total = 0;
    for (sq, piece) in pos.board.pieces() {
        let kind = piece.kind();
        // Tables are drawn rank 8 first; White reads row (7 - rank).
        let row = match piece.color() {
            Color::White => 7 - sq.rank,
            Color::Black => sq.rank,
        };
        let idx = row as usize * 8 + sq.file as usize;
        let value = kind.material() * 100 + TABLES[kind.idx()][idx];
        match piece.color() {
            Color::White => total += value,
            Color::Black => total -= value,
        }
    }
    total
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
