//! Board geometry: coordinates, deltas and line segments.
//!
//! A [`Coord`] doubles as a delta between two squares, so the same type
//! carries both positions and directions.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

/// A (rank, file) pair. On-board squares have both components in `0..8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub rank: i8,
    pub file: i8,
}

/// Offset alias used where a `Coord` is a direction rather than a square.
pub type Delta = Coord;

impl Coord {
    pub const fn new(rank: i8, file: i8) -> Self {
        Self { rank, file }
    }

    pub const fn is_valid(self) -> bool {
        self.rank >= 0 && self.rank < 8 && self.file >= 0 && self.file < 8
    }

    /// Index into a 64-cell board, a1 = 0, h8 = 63.
    #[inline]
    pub fn index(self) -> usize {
        debug_assert!(self.is_valid(), "off-board coordinate {self:?}");
        (self.rank as usize) * 8 + self.file as usize
    }

    pub const fn from_index(index: usize) -> Self {
        Self::new((index / 8) as i8, (index % 8) as i8)
    }

    /// Chebyshev length: the number of king steps the delta spans.
    pub const fn inf_norm(self) -> i8 {
        let r = self.rank.abs();
        let f = self.file.abs();
        if r > f { r } else { f }
    }

    /// Exactly one of rank and file is zero.
    pub const fn is_straight(self) -> bool {
        (self.rank == 0) != (self.file == 0)
    }

    pub const fn is_diagonal(self) -> bool {
        self.rank != 0 && self.rank.abs() == self.file.abs()
    }

    /// Unit step along a straight or diagonal delta.
    pub fn step(self) -> Delta {
        debug_assert!(
            self.is_straight() || self.is_diagonal(),
            "step of a delta that is neither straight nor diagonal: {self:?}"
        );
        let n = self.inf_norm();
        Self::new(self.rank / n, self.file / n)
    }

    /// Parse a square in file-rank form, e.g. `e4`.
    pub fn from_algebraic(text: &str) -> Option<Self> {
        let &[f, r] = text.as_bytes() else {
            return None;
        };
        if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
            return None;
        }
        Some(Self::new((r - b'1') as i8, (f - b'a') as i8))
    }
}

impl Add for Coord {
    type Output = Coord;
    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.rank + rhs.rank, self.file + rhs.file)
    }
}

impl AddAssign for Coord {
    fn add_assign(&mut self, rhs: Coord) {
        self.rank += rhs.rank;
        self.file += rhs.file;
    }
}

impl Sub for Coord {
    type Output = Coord;
    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.rank - rhs.rank, self.file - rhs.file)
    }
}

impl Neg for Coord {
    type Output = Coord;
    fn neg(self) -> Coord {
        Coord::new(-self.rank, -self.file)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' as i8 + self.file) as u8 as char;
        write!(f, "{}{}", file, self.rank + 1)
    }
}

// =============================================================================
// Direction tables
// =============================================================================

/// Unit deltas around a king, in the canonical slot order used by
/// [`crate::attacks::KingThreats`]: N, NE, E, SE, S, SW, W, NW.
pub const KING_DIRECTIONS: [Delta; 8] = [
    Coord::new(1, 0),
    Coord::new(1, 1),
    Coord::new(0, 1),
    Coord::new(-1, 1),
    Coord::new(-1, 0),
    Coord::new(-1, -1),
    Coord::new(0, -1),
    Coord::new(1, -1),
];

pub const STRAIGHT_DIRECTIONS: [Delta; 4] = [
    Coord::new(1, 0),
    Coord::new(0, 1),
    Coord::new(-1, 0),
    Coord::new(0, -1),
];

pub const DIAGONAL_DIRECTIONS: [Delta; 4] = [
    Coord::new(1, 1),
    Coord::new(-1, 1),
    Coord::new(-1, -1),
    Coord::new(1, -1),
];

pub const KNIGHT_OFFSETS: [Delta; 8] = [
    Coord::new(2, 1),
    Coord::new(1, 2),
    Coord::new(-1, 2),
    Coord::new(-2, 1),
    Coord::new(-2, -1),
    Coord::new(-1, -2),
    Coord::new(1, -2),
    Coord::new(2, -1),
];

/// Slot of a unit delta in [`KING_DIRECTIONS`].
pub fn king_slot(delta: Delta) -> Option<usize> {
    KING_DIRECTIONS.iter().position(|&d| d == delta)
}

/// Whether a knight standing at `from` attacks `to`.
#[inline]
pub fn is_knight_hop(from: Coord, to: Coord) -> bool {
    let d = to - from;
    (d.rank as i32 * d.file as i32).abs() == 2
}

// =============================================================================
// Line segments
// =============================================================================

/// A straight or diagonal segment that excludes `start` and includes its end.
///
/// Used for check lines (king to checker) and pin lines (king to pinner): a
/// move that must stay on the line passes `contains(to)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line {
    start: Coord,
    step: Delta,
    max_steps: i8,
}

impl Line {
    /// `start` and `end` must be distinct and share a rank, file or diagonal.
    pub fn new(start: Coord, end: Coord) -> Self {
        let delta = end - start;
        debug_assert!(
            delta.is_straight() || delta.is_diagonal(),
            "line endpoints {start} and {end} are not co-linear"
        );
        Self {
            start,
            step: delta.step(),
            max_steps: delta.inf_norm(),
        }
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn end(&self) -> Coord {
        Coord::new(
            self.start.rank + self.step.rank * self.max_steps,
            self.start.file + self.step.file * self.max_steps,
        )
    }

    pub fn step(&self) -> Delta {
        self.step
    }

    pub fn contains(&self, pos: Coord) -> bool {
        let d = pos - self.start;
        let n = d.inf_norm();
        n > 0
            && n <= self.max_steps
            && d.rank == self.step.rank * n
            && d.file == self.step.file * n
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod geometry_tests;
