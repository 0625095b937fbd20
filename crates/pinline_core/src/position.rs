use crate::attacks::{Attacks, compute_attacks};
use crate::board::Board;
use crate::geometry::Coord;
use crate::types::*;

/// Plies without a capture or pawn move after which play stops.
pub const PLY_CAP: u16 = 150;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastleRights {
    pub kingside: bool,
    pub queenside: bool,
}

impl CastleRights {
    pub const NONE: CastleRights = CastleRights {
        kingside: false,
        queenside: false,
    };
    pub const BOTH: CastleRights = CastleRights {
        kingside: true,
        queenside: true,
    };
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub side_to_move: Color,
    /// Indexed by [`Color::idx`].
    pub castling: [CastleRights; 2],
    /// Square passed over by a pawn that just advanced two ranks.
    pub en_passant: Option<Coord>,
    pub halfmove_clock: u16,
    pub fullmove_number: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        let mut board = Board::empty();

        // Pawns
        for file in 0..8 {
            board.set(Coord::new(1, file), Some(Piece::new(Color::White, PieceKind::Pawn)));
            board.set(Coord::new(6, file), Some(Piece::new(Color::Black, PieceKind::Pawn)));
        }
        // Back ranks
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, &kind) in back.iter().enumerate() {
            board.set(Coord::new(0, file as i8), Some(Piece::new(Color::White, kind)));
            board.set(Coord::new(7, file as i8), Some(Piece::new(Color::Black, kind)));
        }

        Position {
            board,
            side_to_move: Color::White,
            castling: [CastleRights::BOTH; 2],
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn castle_rights(&self, color: Color) -> CastleRights {
        self.castling[color.idx()]
    }

    /// King of the side to move.
    pub fn king(&self) -> Coord {
        self.board.find_king(self.side_to_move)
    }

    /// Checks, pins and king threats against the side to move.
    pub fn attacks(&self) -> Attacks {
        compute_attacks(&self.board, self.king(), self.side_to_move)
    }

    pub fn in_check(&self) -> bool {
        self.attacks().checks > 0
    }

    pub fn is_ply_cap_reached(&self) -> bool {
        self.halfmove_clock >= PLY_CAP
    }

    /// The position after `mv`. The move must be legal here.
    pub fn apply(&self, mv: Move) -> Position {
        let Action { from, to, promotion } = mv.action;
        let mover = self.side_to_move;
        let moved = self
            .board
            .get(from)
            .unwrap_or_else(|| panic!("no piece on {from} for {mv:?}"));
        let captured = self.board.get(to).is_some() || mv.kind == MoveKind::EnPassant;

        let mut next = self.clone();
        next.side_to_move = mover.other();
        next.en_passant = None;
        if mover == Color::Black {
            next.fullmove_number = next.fullmove_number.saturating_add(1);
        }

        next.board.move_piece(from, to);
        match mv.kind {
            MoveKind::EnPassant => next.board.set(Coord::new(from.rank, to.file), None),
            MoveKind::DoublePush => {
                next.en_passant = Some(Coord::new((from.rank + to.rank) / 2, from.file));
            }
            MoveKind::Castle => {
                let (rook_from, rook_to) = castle_rook_squares(from, to);
                next.board.move_piece(rook_from, rook_to);
            }
            MoveKind::Quiet | MoveKind::Capture => {}
        }
        if let Some(kind) = promotion {
            next.board.set(to, Some(Piece::new(mover, kind)));
        }

        next.halfmove_clock = if moved.kind() == PieceKind::Pawn || captured {
            0
        } else {
            self.halfmove_clock.saturating_add(1).min(PLY_CAP)
        };

        if moved.kind() == PieceKind::King {
            next.castling[mover.idx()] = CastleRights::NONE;
        }
        // A rook leaving its corner, or anything landing on one.
        next.revoke_corner(from);
        next.revoke_corner(to);
        next
    }

    fn revoke_corner(&mut self, sq: Coord) {
        for color in [Color::White, Color::Black] {
            if sq.rank != color.home_rank() {
                continue;
            }
            let rights = &mut self.castling[color.idx()];
            match sq.file {
                0 => rights.queenside = false,
                7 => rights.kingside = false,
                _ => {}
            }
        }
    }
}

/// Rook origin and destination for a castling king move.
pub(crate) fn castle_rook_squares(king_from: Coord, king_to: Coord) -> (Coord, Coord) {
    let rank = king_from.rank;
    if king_to.file > king_from.file {
        (Coord::new(rank, 7), Coord::new(rank, 5))
    } else {
        (Coord::new(rank, 0), Coord::new(rank, 3))
    }
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod position_tests;
