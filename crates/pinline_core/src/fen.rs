//! Forsyth-Edwards Notation parsing and formatting for [`Position`].
//!
//! Parsing accepts four to six fields; a missing halfmove clock reads as 0 and
//! a missing fullmove number as 1. Formatting always writes all six, so any
//! six-field input in canonical form round-trips unchanged.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::Board;
use crate::geometry::Coord;
use crate::position::{CastleRights, Position};
use crate::types::*;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 4 to 6 fields, found {0}")]
    FieldCount(usize),
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("malformed rank {rank}: {text:?}")]
    Rank { rank: usize, text: String },
    #[error("invalid piece symbol '{0}'")]
    PieceSymbol(char),
    #[error("invalid side to move {0:?}")]
    SideToMove(String),
    #[error("invalid castling field {0:?}")]
    Castling(String),
    #[error("invalid en passant square {0:?}")]
    EnPassant(String),
    #[error("invalid halfmove clock {0:?}")]
    HalfmoveClock(String),
    #[error("invalid fullmove number {0:?}")]
    FullmoveNumber(String),
    #[error("expected exactly one {color:?} king, found {count}")]
    KingCount { color: Color, count: usize },
}

impl Position {
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&parts.len()) {
            return Err(FenError::FieldCount(parts.len()));
        }

        let board = parse_board(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        let castling = parse_castling(parts[2])?;

        let en_passant = match parts[3] {
            "-" => None,
            text => Some(
                Coord::from_algebraic(text)
                    .filter(|&sq| is_en_passant_target(&board, side_to_move, sq))
                    .ok_or_else(|| FenError::EnPassant(text.to_string()))?,
            ),
        };

        let halfmove_clock = match parts.get(4) {
            Some(text) => text
                .parse()
                .map_err(|_| FenError::HalfmoveClock(text.to_string()))?,
            None => 0,
        };
        let fullmove_number = match parts.get(5) {
            Some(text) => text
                .parse()
                .map_err(|_| FenError::FullmoveNumber(text.to_string()))?,
            None => 1,
        };

        Ok(Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    pub fn to_fen(&self) -> String {
        self.to_string()
    }
}

/// The square a pawn of the side that just moved skipped over: empty, on
/// that side's third rank, with the pawn right in front of it.
fn is_en_passant_target(board: &Board, side_to_move: Color, sq: Coord) -> bool {
    let pusher = side_to_move.other();
    let skipped_rank = pusher.pawn_start_rank() + pusher.pawn_direction();
    let pawn_sq = Coord::new(sq.rank + pusher.pawn_direction(), sq.file);
    sq.rank == skipped_rank
        && board.get(sq).is_none()
        && board.get(pawn_sq) == Some(Piece::new(pusher, PieceKind::Pawn))
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

fn parse_board(text: &str) -> Result<Board, FenError> {
    let ranks: Vec<&str> = text.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut board = Board::empty();
    // FEN lists rank 8 .. 1
    for (i, rank_text) in ranks.iter().enumerate() {
        let rank = 7 - i as i8;
        let malformed = || FenError::Rank {
            rank: rank as usize + 1,
            text: rank_text.to_string(),
        };

        let mut file: i8 = 0;
        let mut after_digit = false;
        for ch in rank_text.chars() {
            if let Some(d) = ch.to_digit(10) {
                // Adjacent digits ("44") have no canonical spelling.
                if !(1..=8).contains(&d) || after_digit {
                    return Err(malformed());
                }
                file += d as i8;
                after_digit = true;
            } else {
                let piece = Piece::from_symbol(ch).ok_or(FenError::PieceSymbol(ch))?;
                if file >= 8 {
                    return Err(malformed());
                }
                board.set(Coord::new(rank, file), Some(piece));
                file += 1;
                after_digit = false;
            }
            if file > 8 {
                return Err(malformed());
            }
        }
        if file != 8 {
            return Err(malformed());
        }
    }

    for color in [Color::White, Color::Black] {
        let king = Piece::new(color, PieceKind::King);
        let count = board.pieces().filter(|&(_, p)| p == king).count();
        if count != 1 {
            return Err(FenError::KingCount { color, count });
        }
    }
    Ok(board)
}

/// `-` or a non-empty subsequence of `KQkq`, in that order.
fn parse_castling(text: &str) -> Result<[CastleRights; 2], FenError> {
    let mut rights = [CastleRights::NONE; 2];
    if text == "-" {
        return Ok(rights);
    }
    let invalid = || FenError::Castling(text.to_string());
    if text.is_empty() {
        return Err(invalid());
    }

    let mut next_allowed = 0;
    for ch in text.chars() {
        let slot = "KQkq".find(ch).ok_or_else(invalid)?;
        if slot < next_allowed {
            return Err(invalid());
        }
        next_allowed = slot + 1;
        let side = &mut rights[slot / 2];
        if slot % 2 == 0 {
            side.kingside = true;
        } else {
            side.queenside = true;
        }
    }
    Ok(rights)
}

/// Six-field FEN.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.board.get(Coord::new(rank, file)) {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.symbol())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }

        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        write!(f, " {side} ")?;

        let [white, black] = self.castling;
        let flags = [
            (white.kingside, 'K'),
            (white.queenside, 'Q'),
            (black.kingside, 'k'),
            (black.queenside, 'q'),
        ];
        let mut any = false;
        for (set, c) in flags {
            if set {
                write!(f, "{c}")?;
                any = true;
            }
        }
        if !any {
            write!(f, "-")?;
        }

        match self.en_passant {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }
        write!(f, " {} {}", self.halfmove_clock, self.fullmove_number)
    }
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
