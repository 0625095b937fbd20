//! Long algebraic move text (`e2e4`, `e7e8q`) and the `position` command.

use std::fmt;

use thiserror::Error;

use crate::fen::FenError;
use crate::geometry::Coord;
use crate::movegen::legal_moves;
use crate::position::Position;
use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("malformed move text {0:?}")]
    Syntax(String),
    #[error("{mv} is not legal in {fen}")]
    Illegal { mv: String, fen: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UciError {
    #[error("expected `startpos` or `fen <fields>`, found {0:?}")]
    PositionSyntax(String),
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error(transparent)]
    Move(#[from] MoveParseError),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.symbol())?;
        }
        Ok(())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.action.fmt(f)
    }
}

/// Reads move text without a position; castling and en passant are not
/// distinguishable until matched with [`parse_uci_move`].
pub fn parse_action(txt: &str) -> Result<Action, MoveParseError> {
    let syntax = || MoveParseError::Syntax(txt.to_string());
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return Err(syntax());
    }
    let from = Coord::from_algebraic(&txt[0..2]).ok_or_else(syntax)?;
    let to = Coord::from_algebraic(&txt[2..4]).ok_or_else(syntax)?;
    let promotion = match txt[4..].chars().next() {
        None => None,
        Some(c) => match PieceKind::from_symbol(c) {
            Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
            _ => return Err(syntax()),
        },
    };
    Ok(Action {
        from,
        to,
        promotion,
    })
}

/// Resolves move text to the legal move it names. A promotion must spell out
/// its piece.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Result<Move, MoveParseError> {
    let action = parse_action(txt)?;
    legal_moves(pos)
        .into_iter()
        .find(|m| m.action == action)
        .ok_or_else(|| MoveParseError::Illegal {
            mv: txt.to_string(),
            fen: pos.to_fen(),
        })
}

/// Builds a position from the arguments of a `position` command:
/// `startpos [moves ...]` or `fen <4-6 fields> [moves ...]`.
pub fn position_from_uci(args: &[&str]) -> Result<Position, UciError> {
    let moves_at = args.iter().position(|&a| a == "moves").unwrap_or(args.len());
    let (setup, moves) = args.split_at(moves_at);

    let mut pos = match setup {
        ["startpos"] => Position::startpos(),
        ["fen", fields @ ..] if !fields.is_empty() => Position::from_fen(&fields.join(" "))?,
        _ => return Err(UciError::PositionSyntax(setup.join(" "))),
    };

    for txt in moves.iter().skip(1) {
        let mv = parse_uci_move(&pos, txt)?;
        pos = pos.apply(mv);
    }
    Ok(pos)
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
