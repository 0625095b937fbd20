use std::cmp::Reverse;
use std::ops::ControlFlow;

use crate::attacks::{Attacks, CastleSide};
use crate::geometry::{
    Coord, DIAGONAL_DIRECTIONS, KING_DIRECTIONS, KNIGHT_OFFSETS, STRAIGHT_DIRECTIONS,
};
use crate::position::Position;
use crate::types::*;

/// How a position stands for the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
    /// The halfmove clock hit its cap with legal moves still available.
    MoveLimitDraw,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }
}

/// Receives generated moves. Returning `Break` ends generation early.
trait MoveSink {
    fn push(&mut self, mv: Move) -> ControlFlow<()>;
}

impl MoveSink for Vec<Move> {
    fn push(&mut self, mv: Move) -> ControlFlow<()> {
        Vec::push(self, mv);
        ControlFlow::Continue(())
    }
}

/// Stops at the first legal move.
struct AnyMove;

impl MoveSink for AnyMove {
    fn push(&mut self, _mv: Move) -> ControlFlow<()> {
        ControlFlow::Break(())
    }
}

/// Generate all legal moves. Empty once the halfmove clock hits its cap.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    if pos.is_ply_cap_reached() {
        return Vec::new();
    }
    let attacks = pos.attacks();
    let mut out = Vec::with_capacity(64);
    let _ = Generator::new(pos, &attacks).generate(&mut out);
    out
}

/// Whether the side to move has any legal move, ignoring the halfmove cap.
pub fn has_legal_move(pos: &Position) -> bool {
    let attacks = pos.attacks();
    Generator::new(pos, &attacks).generate(&mut AnyMove).is_break()
}

pub fn status(pos: &Position) -> GameStatus {
    let attacks = pos.attacks();
    let can_move = Generator::new(pos, &attacks).generate(&mut AnyMove).is_break();
    match (can_move, attacks.checks > 0) {
        (false, true) => GameStatus::Checkmate,
        (false, false) => GameStatus::Stalemate,
        (true, _) if pos.is_ply_cap_reached() => GameStatus::MoveLimitDraw,
        (true, _) => GameStatus::Ongoing,
    }
}

/// Successor positions with the action leading to each, promising moves first.
pub fn children(pos: &Position) -> Vec<(Position, Action)> {
    let mut moves = legal_moves(pos);
    order_moves(pos, &mut moves);
    moves
        .into_iter()
        .map(|mv| {
            let child = pos.apply(mv);
            debug_assert!(
                !child
                    .board
                    .is_attacked(child.board.find_king(pos.side_to_move), child.side_to_move),
                "generated move {mv:?} leaves the king attacked in {pos}"
            );
            (child, mv.action)
        })
        .collect()
}

// =============================================================================
// Ordering
// =============================================================================

/// Sorts captures (most valuable victim, cheapest attacker), promotions and
/// direct checks ahead of quiet moves. The sort is stable, so equal scores keep
/// generation order.
pub fn order_moves(pos: &Position, moves: &mut [Move]) {
    let enemy_king = pos.board.try_find_king(pos.side_to_move.other());
    moves.sort_by_key(|mv| Reverse(order_score(pos, mv, enemy_king)));
}

fn order_score(pos: &Position, mv: &Move, enemy_king: Option<Coord>) -> i32 {
    let Some(mover) = pos.board.get(mv.from()) else {
        return 0;
    };
    let mut score = 0;

    let victim = match mv.kind {
        MoveKind::EnPassant => Some(PieceKind::Pawn),
        _ => pos.board.get(mv.to()).map(Piece::kind),
    };
    if let Some(victim) = victim {
        score += 100 + 10 * victim.material() - mover.kind().material();
    }
    if let Some(promo) = mv.action.promotion {
        score += 10 * promo.material();
    }
    let lands_as = mv.action.promotion.unwrap_or(mover.kind());
    if let Some(king) = enemy_king
        && gives_direct_check(pos, lands_as, mv.from(), mv.to(), king)
    {
        score += 50;
    }
    score
}

/// Whether a `kind` arriving on `to` from `from` attacks `king` directly.
fn gives_direct_check(pos: &Position, kind: PieceKind, from: Coord, to: Coord, king: Coord) -> bool {
    let delta = king - to;
    let along = match kind {
        PieceKind::Pawn => {
            return delta.rank == pos.side_to_move.pawn_direction() && delta.file.abs() == 1;
        }
        PieceKind::Knight => return crate::geometry::is_knight_hop(to, king),
        PieceKind::King => return false,
        PieceKind::Bishop => delta.is_diagonal(),
        PieceKind::Rook => delta.is_straight(),
        PieceKind::Queen => delta.is_diagonal() || delta.is_straight(),
    };
    if !along {
        return false;
    }
    let step = delta.step();
    let mut cur = to + step;
    while cur != king {
        if cur != from && pos.board.get(cur).is_some() {
            return false;
        }
        cur += step;
    }
    true
}

// =============================================================================
// Generation
// =============================================================================

/// Legal move generator for the side to move, driven by a precomputed
/// [`Attacks`] summary.
struct Generator<'a> {
    pos: &'a Position,
    attacks: &'a Attacks,
    us: Color,
}

impl<'a> Generator<'a> {
    fn new(pos: &'a Position, attacks: &'a Attacks) -> Self {
        Self {
            pos,
            attacks,
            us: pos.side_to_move,
        }
    }

    fn generate<S: MoveSink>(&self, sink: &mut S) -> ControlFlow<()> {
        // Only the king can answer two checkers.
        if self.attacks.is_double_check() {
            return self.king(self.attacks.king, sink);
        }

        for (from, piece) in self.pos.board.pieces() {
            if piece.color() != self.us {
                continue;
            }
            match piece.kind() {
                PieceKind::Pawn => self.pawn(from, sink)?,
                PieceKind::Knight => self.knight(from, sink)?,
                PieceKind::Bishop => self.slider(from, &DIAGONAL_DIRECTIONS, sink)?,
                PieceKind::Rook => self.slider(from, &STRAIGHT_DIRECTIONS, sink)?,
                PieceKind::Queen => self.slider(from, &KING_DIRECTIONS, sink)?,
                PieceKind::King => {
                    self.king(from, sink)?;
                    self.castle(from, sink)?;
                }
            }
        }
        ControlFlow::Continue(())
    }

    /// Check and pin constraints for a non-king move. `victim` is the square
    /// whose occupant is removed, which differs from `to` only for en passant.
    fn allowed(&self, from: Coord, to: Coord, victim: Coord) -> bool {
        if let Some(kill) = self.attacks.must_kill
            && victim != kill
        {
            return false;
        }
        if let Some(line) = &self.attacks.must_block
            && !line.contains(to)
        {
            return false;
        }
        if let Some(line) = self.attacks.pin_line(from)
            && !line.contains(to)
        {
            return false;
        }
        true
    }

    fn pawn<S: MoveSink>(&self, from: Coord, sink: &mut S) -> ControlFlow<()> {
        let board = &self.pos.board;
        let dir = self.us.pawn_direction();

        for side in [-1, 1] {
            let to = from + Coord::new(dir, side);
            if !to.is_valid() {
                continue;
            }
            match board.get(to) {
                Some(target) if target.color() != self.us => {
                    if self.allowed(from, to, to) {
                        self.pawn_move(Move::new(from, to, MoveKind::Capture), sink)?;
                    }
                }
                None if self.pos.en_passant == Some(to) => {
                    let victim = Coord::new(from.rank, to.file);
                    if self.allowed(from, to, victim) && self.en_passant_is_safe(from, to, victim) {
                        sink.push(Move::new(from, to, MoveKind::EnPassant))?;
                    }
                }
                _ => {}
            }
        }

        let one = from + Coord::new(dir, 0);
        if !one.is_valid() || board.get(one).is_some() {
            return ControlFlow::Continue(());
        }
        if self.allowed(from, one, one) {
            self.pawn_move(Move::new(from, one, MoveKind::Quiet), sink)?;
        }
        if from.rank == self.us.pawn_start_rank() {
            let two = one + Coord::new(dir, 0);
            if board.get(two).is_none() && self.allowed(from, two, two) {
                sink.push(Move::new(from, two, MoveKind::DoublePush))?;
            }
        }
        ControlFlow::Continue(())
    }

    /// Emits a pawn move, expanded into the four promotions on the last rank.
    fn pawn_move<S: MoveSink>(&self, mv: Move, sink: &mut S) -> ControlFlow<()> {
        if mv.to().rank != self.us.promotion_rank() {
            return sink.push(mv);
        }
        for kind in PieceKind::PROMOTIONS {
            sink.push(mv.with_promotion(kind))?;
        }
        ControlFlow::Continue(())
    }

    /// En passant empties two squares on one rank at once, which can expose
    /// the king to a rook or queen the pin scan saw as doubly blocked. Replay
    /// it on a scratch board and probe the king directly.
    fn en_passant_is_safe(&self, from: Coord, to: Coord, victim: Coord) -> bool {
        let mut board = self.pos.board.clone();
        board.move_piece(from, to);
        board.set(victim, None);
        !board.is_attacked(self.attacks.king, self.us.other())
    }

    fn knight<S: MoveSink>(&self, from: Coord, sink: &mut S) -> ControlFlow<()> {
        for offset in KNIGHT_OFFSETS {
            let to = from + offset;
            if !to.is_valid() {
                continue;
            }
            let kind = match self.pos.board.get(to) {
                Some(p) if p.color() == self.us => continue,
                Some(_) => MoveKind::Capture,
                None => MoveKind::Quiet,
            };
            if self.allowed(from, to, to) {
                sink.push(Move::new(from, to, kind))?;
            }
        }
        ControlFlow::Continue(())
    }

    fn slider<S: MoveSink>(&self, from: Coord, dirs: &[Coord], sink: &mut S) -> ControlFlow<()> {
        for &dir in dirs {
            let mut to = from + dir;
            while to.is_valid() {
                match self.pos.board.get(to) {
                    None => {
                        if self.allowed(from, to, to) {
                            sink.push(Move::new(from, to, MoveKind::Quiet))?;
                        }
                    }
                    Some(p) => {
                        if p.color() != self.us && self.allowed(from, to, to) {
                            sink.push(Move::new(from, to, MoveKind::Capture))?;
                        }
                        break;
                    }
                }
                to += dir;
            }
        }
        ControlFlow::Continue(())
    }

    fn king<S: MoveSink>(&self, from: Coord, sink: &mut S) -> ControlFlow<()> {
        for (slot, &dir) in KING_DIRECTIONS.iter().enumerate() {
            let to = from + dir;
            if !to.is_valid() || self.attacks.threats.neighbors[slot] {
                continue;
            }
            let kind = match self.pos.board.get(to) {
                Some(p) if p.color() == self.us => continue,
                Some(_) => MoveKind::Capture,
                None => MoveKind::Quiet,
            };
            sink.push(Move::new(from, to, kind))?;
        }
        ControlFlow::Continue(())
    }

    fn castle<S: MoveSink>(&self, from: Coord, sink: &mut S) -> ControlFlow<()> {
        let rank = self.us.home_rank();
        if self.attacks.checks > 0 || from != Coord::new(rank, 4) {
            return ControlFlow::Continue(());
        }
        let rights = self.pos.castle_rights(self.us);
        let board = &self.pos.board;
        let rook = Some(Piece::new(self.us, PieceKind::Rook));
        let empty = |files: &[i8]| files.iter().all(|&f| board.get(Coord::new(rank, f)).is_none());
        let threats = &self.attacks.threats;

        if rights.kingside
            && board.get(Coord::new(rank, 7)) == rook
            && empty(&[5, 6])
            && !threats.neighbor(Coord::new(0, 1))
            && !threats.castle_target(CastleSide::Kingside)
        {
            let to = Coord::new(rank, CastleSide::Kingside.king_file());
            sink.push(Move::new(from, to, MoveKind::Castle))?;
        }
        if rights.queenside
            && board.get(Coord::new(rank, 0)) == rook
            && empty(&[1, 2, 3])
            && !threats.neighbor(Coord::new(0, -1))
            && !threats.castle_target(CastleSide::Queenside)
        {
            let to = Coord::new(rank, CastleSide::Queenside.king_file());
            sink.push(Move::new(from, to, MoveKind::Castle))?;
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
