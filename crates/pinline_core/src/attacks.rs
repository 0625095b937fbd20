//! Single-pass attack analysis around one king.
//!
//! Every enemy piece is visited once. The scan yields:
//! - how many pieces give check, and how the first one can be answered
//!   (capture it, or block its line)
//! - friendly pieces pinned to the king, with the line they may not leave
//! - which squares around the king, and which castling destinations, are
//!   attacked, treating the king itself as transparent to sliders
//!
//! Move generation filters candidates against this summary instead of playing
//! each move and testing the resulting position.

use tracing::trace;

use crate::board::Board;
use crate::geometry::{Coord, KING_DIRECTIONS, Line, is_knight_hop, king_slot};
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub fn idx(self) -> usize {
        match self {
            CastleSide::Kingside => 0,
            CastleSide::Queenside => 1,
        }
    }

    /// File the king lands on.
    pub fn king_file(self) -> i8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }
}

/// Attacked squares near the king.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KingThreats {
    /// Slots follow [`KING_DIRECTIONS`]. Off-board slots are never consulted.
    pub neighbors: [bool; 8],
    /// Castling destinations (g- and c-file), indexed by [`CastleSide::idx`].
    /// Only filled in while the king stands on its starting square.
    pub castle_targets: [bool; 2],
}

impl KingThreats {
    pub fn neighbor(&self, dir: Coord) -> bool {
        king_slot(dir).is_some_and(|slot| self.neighbors[slot])
    }

    pub fn castle_target(&self, side: CastleSide) -> bool {
        self.castle_targets[side.idx()]
    }

    /// Records `sq` as attacked if it is one of the tracked squares.
    fn mark(&mut self, king: Coord, sq: Coord) {
        let delta = sq - king;
        if let Some(slot) = king_slot(delta) {
            self.neighbors[slot] = true;
        } else if delta.rank == 0 && delta.file == 2 {
            self.castle_targets[CastleSide::Kingside.idx()] = true;
        } else if delta.rank == 0 && delta.file == -2 {
            self.castle_targets[CastleSide::Queenside.idx()] = true;
        }
    }
}

/// Summary of enemy pressure on one king.
#[derive(Clone, Debug)]
pub struct Attacks {
    pub king: Coord,
    /// Number of checking pieces.
    pub checks: u32,
    /// With a single contact check (pawn or knight): the checker's square.
    /// Every non-king move must capture there.
    pub must_kill: Option<Coord>,
    /// With a single slider check: king to checker. Every non-king move must
    /// land on it.
    pub must_block: Option<Line>,
    /// Pinned friendly pieces and the line each may move along.
    pub pins: Vec<(Coord, Line)>,
    pub threats: KingThreats,
}

impl Attacks {
    fn new(king: Coord) -> Self {
        Self {
            king,
            checks: 0,
            must_kill: None,
            must_block: None,
            pins: Vec::new(),
            threats: KingThreats::default(),
        }
    }

    pub fn is_double_check(&self) -> bool {
        self.checks >= 2
    }

    pub fn pin_line(&self, pos: Coord) -> Option<&Line> {
        self.pins
            .iter()
            .find(|(pinned, _)| *pinned == pos)
            .map(|(_, line)| line)
    }

    fn add_contact_check(&mut self, checker: Coord) {
        self.checks += 1;
        if self.checks == 1 {
            self.must_kill = Some(checker);
        }
    }

    fn add_slider_check(&mut self, line: Line) {
        self.checks += 1;
        if self.checks == 1 {
            self.must_block = Some(line);
        }
    }
}

/// Outcome of looking along the line from a king to an enemy slider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStatus {
    /// Blocked by an enemy piece or by two or more friendly pieces.
    Clear,
    /// Nothing in between: the slider gives check.
    Attacked,
    /// Exactly one friendly piece in between, and it is pinned.
    Pinned(Coord),
}

/// Walks from `king` toward `attacker`, both excluded.
pub fn classify_line(board: &Board, king: Coord, attacker: Coord, us: Color) -> LineStatus {
    let step = (attacker - king).step();
    let mut blocker = None;
    let mut cur = king + step;
    while cur != attacker {
        if let Some(piece) = board.get(cur) {
            if piece.color() != us || blocker.is_some() {
                return LineStatus::Clear;
            }
            blocker = Some(cur);
        }
        cur += step;
    }
    match blocker {
        Some(pinned) => LineStatus::Pinned(pinned),
        None => LineStatus::Attacked,
    }
}

/// Marks every tracked square a slider on `attacker` reaches on its way to
/// `target`. The defending king does not block the ray, so squares behind it
/// stay attacked.
pub fn check_guarded(
    board: &Board,
    attacker: Coord,
    target: Coord,
    king: Coord,
    threats: &mut KingThreats,
) {
    let step = (target - attacker).step();
    let mut cur = attacker + step;
    loop {
        threats.mark(king, cur);
        if cur == target || (cur != king && board.get(cur).is_some()) {
            return;
        }
        cur += step;
    }
}

/// Squares whose safety the king cares about: on-board neighbors, plus both
/// castling destinations while it stands on its starting square.
fn watched_squares(king: Coord, us: Color) -> Vec<Coord> {
    let mut squares: Vec<Coord> = KING_DIRECTIONS
        .iter()
        .map(|&dir| king + dir)
        .filter(|sq| sq.is_valid())
        .collect();
    if king == Coord::new(us.home_rank(), 4) {
        for side in [CastleSide::Kingside, CastleSide::Queenside] {
            squares.push(Coord::new(king.rank, side.king_file()));
        }
    }
    squares
}

/// Analyse the pressure on `us`'s king standing at `king`.
pub fn compute_attacks(board: &Board, king: Coord, us: Color) -> Attacks {
    let mut attacks = Attacks::new(king);
    let watched = watched_squares(king, us);

    for (pos, piece) in board.pieces() {
        if piece.color() == us {
            continue;
        }
        match piece.kind() {
            PieceKind::Pawn => {
                let dir = piece.color().pawn_direction();
                let hits = |sq: Coord| {
                    let d = sq - pos;
                    d.rank == dir && d.file.abs() == 1
                };
                if hits(king) {
                    attacks.add_contact_check(pos);
                }
                for &sq in &watched {
                    if hits(sq) {
                        attacks.threats.mark(king, sq);
                    }
                }
            }
            PieceKind::Knight => {
                if is_knight_hop(pos, king) {
                    attacks.add_contact_check(pos);
                }
                for &sq in &watched {
                    if is_knight_hop(pos, sq) {
                        attacks.threats.mark(king, sq);
                    }
                }
            }
            PieceKind::King => {
                for &sq in &watched {
                    if (sq - pos).inf_norm() == 1 {
                        attacks.threats.mark(king, sq);
                    }
                }
            }
            kind @ (PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen) => {
                let reaches = |delta: Coord| match kind {
                    PieceKind::Bishop => delta.is_diagonal(),
                    PieceKind::Rook => delta.is_straight(),
                    _ => delta.is_diagonal() || delta.is_straight(),
                };

                if reaches(king - pos) {
                    match classify_line(board, king, pos, us) {
                        LineStatus::Attacked => {
                            attacks.add_slider_check(Line::new(king, pos));
                            // Neither stepping back along the line nor toward
                            // the checker (unless capturing it) escapes.
                            let step = (king - pos).step();
                            attacks.threats.mark(king, king + step);
                            if king - step != pos {
                                attacks.threats.mark(king, king - step);
                            }
                        }
                        LineStatus::Pinned(pinned) => {
                            attacks.pins.push((pinned, Line::new(king, pos)));
                        }
                        LineStatus::Clear => {}
                    }
                }

                for &sq in &watched {
                    if sq != pos && reaches(sq - pos) {
                        check_guarded(board, pos, sq, king, &mut attacks.threats);
                    }
                }
            }
        }
    }

    if attacks.is_double_check() {
        attacks.must_kill = None;
        attacks.must_block = None;
    }
    trace!(
        king = %king,
        checks = attacks.checks,
        pins = attacks.pins.len(),
        "attacks computed"
    );
    attacks
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
