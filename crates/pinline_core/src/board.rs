use std::fmt;

use crate::geometry::{Coord, DIAGONAL_DIRECTIONS, KING_DIRECTIONS, KNIGHT_OFFSETS, STRAIGHT_DIRECTIONS};
use crate::types::*;

/// 8x8 grid of optional pieces, indexed a1 = 0 .. h8 = 63.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self { cells: [None; 64] }
    }

    #[inline]
    pub fn get(&self, pos: Coord) -> Option<Piece> {
        self.cells[pos.index()]
    }

    #[inline]
    pub fn set(&mut self, pos: Coord, piece: Option<Piece>) {
        self.cells[pos.index()] = piece;
    }

    /// Moves whatever stands on `from` to `to`, replacing any occupant.
    pub fn move_piece(&mut self, from: Coord, to: Coord) {
        let piece = self.cells[from.index()].take();
        self.cells[to.index()] = piece;
    }

    /// Occupied squares with their pieces, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.map(|p| (Coord::from_index(i), p)))
    }

    pub fn try_find_king(&self, color: Color) -> Option<Coord> {
        let king = Piece::new(color, PieceKind::King);
        self.pieces().find(|&(_, p)| p == king).map(|(pos, _)| pos)
    }

    /// Square of `color`'s king.
    ///
    /// # Panics
    /// If the king is missing; positions are validated on construction so this
    /// means the board was corrupted.
    pub fn find_king(&self, color: Color) -> Coord {
        self.try_find_king(color)
            .unwrap_or_else(|| panic!("no {color:?} king on the board"))
    }

    /// Whether any piece of `by` attacks `target` on this exact board.
    ///
    /// A direct probe used to verify moves the pin scan cannot see, such as en
    /// passant captures that empty two squares of one rank.
    pub fn is_attacked(&self, target: Coord, by: Color) -> bool {
        // A pawn of `by` attacks `target` from one rank behind it.
        let back = -by.pawn_direction();
        let pawn = Piece::new(by, PieceKind::Pawn);
        for side in [-1, 1] {
            if let Some(pc) = self.occupant(target + Coord::new(back, side))
                && pc == pawn
            {
                return true;
            }
        }

        let knight = Piece::new(by, PieceKind::Knight);
        for offset in KNIGHT_OFFSETS {
            if let Some(pc) = self.occupant(target + offset)
                && pc == knight
            {
                return true;
            }
        }

        let king = Piece::new(by, PieceKind::King);
        for dir in KING_DIRECTIONS {
            if let Some(pc) = self.occupant(target + dir)
                && pc == king
            {
                return true;
            }
        }

        // Sliding: bishop/rook/queen
        self.slider_reaches(target, by, &DIAGONAL_DIRECTIONS, PieceKind::Bishop)
            || self.slider_reaches(target, by, &STRAIGHT_DIRECTIONS, PieceKind::Rook)
    }

    /// Piece on `pos`, or `None` when empty or off the board.
    fn occupant(&self, pos: Coord) -> Option<Piece> {
        if pos.is_valid() { self.get(pos) } else { None }
    }

    fn slider_reaches(&self, target: Coord, by: Color, dirs: &[Coord], kind: PieceKind) -> bool {
        for &dir in dirs {
            let mut cur = target + dir;
            while cur.is_valid() {
                if let Some(pc) = self.get(cur) {
                    if pc.color() == by && (pc.kind() == kind || pc.kind() == PieceKind::Queen) {
                        return true;
                    }
                    break;
                }
                cur += dir;
            }
        }
        false
    }
}

/// Diagram with rank 8 on top, `.` for empty squares.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = self.get(Coord::new(rank, file)).map_or('.', Piece::symbol);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
