use std::fmt;
use std::num::NonZeroU8;

use crate::geometry::Coord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Rank delta of a single pawn push.
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank holding this side's king and rooks at the start.
    pub fn home_rank(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub fn pawn_start_rank(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    pub fn promotion_rank(self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceKind {
    /// Promotion choices, strongest first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub fn from_raw(raw: u8) -> Option<PieceKind> {
        Some(match raw {
            1 => PieceKind::Pawn,
            2 => PieceKind::Knight,
            3 => PieceKind::Bishop,
            4 => PieceKind::Rook,
            5 => PieceKind::Queen,
            6 => PieceKind::King,
            _ => return None,
        })
    }

    /// Zero-based table index, pawn = 0.
    pub fn idx(self) -> usize {
        self as usize - 1
    }

    /// Material in pawns: 1/3/3/5/9, king 0.
    pub const fn material(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    pub fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Lowercase letter used in FEN and move notation.
    pub fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_symbol(c: char) -> Option<PieceKind> {
        Some(match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        })
    }
}

const WHITE_BIT: u8 = 0b1000;
const KIND_MASK: u8 = 0b0111;

/// A colored piece packed into one byte: kind in the low bits, white flag above.
///
/// The zero byte is never a piece, so `Option<Piece>` stays one byte wide and
/// an empty board cell costs nothing extra.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece(NonZeroU8);

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Piece {
        let color_bit = match color {
            Color::White => WHITE_BIT,
            Color::Black => 0,
        };
        match NonZeroU8::new(kind as u8 | color_bit) {
            Some(raw) => Piece(raw),
            None => unreachable!(),
        }
    }

    pub fn color(self) -> Color {
        if self.0.get() & WHITE_BIT != 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Decodes the kind bits. A byte outside the six kinds is a corrupted
    /// board and aborts.
    pub fn kind(self) -> PieceKind {
        let raw = self.0.get();
        PieceKind::from_raw(raw & KIND_MASK)
            .unwrap_or_else(|| panic!("unrecognized piece encoding {raw:#04x}"))
    }

    pub fn raw(self) -> u8 {
        self.0.get()
    }

    /// FEN letter: uppercase for white.
    pub fn symbol(self) -> char {
        let c = self.kind().symbol();
        match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_symbol(c: char) -> Option<Piece> {
        let kind = PieceKind::from_symbol(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(color, kind))
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?}", self.color(), self.kind())
    }
}

/// What a player chose: origin, destination and promotion piece.
///
/// Two actions are equal when all three fields are equal; this is the value
/// handed to search callers and matched against typed move text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Action {
    pub from: Coord,
    pub to: Coord,
    pub promotion: Option<PieceKind>,
}

impl Action {
    pub fn new(from: Coord, to: Coord) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    Quiet,
    Capture,
    /// Pawn advance of two ranks; sets the en passant target.
    DoublePush,
    EnPassant,
    /// King move of two files; the rook is moved alongside.
    Castle,
}

/// A generated move: the action plus how to carry it out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub action: Action,
    pub kind: MoveKind,
}

impl Move {
    pub fn new(from: Coord, to: Coord, kind: MoveKind) -> Self {
        Self {
            action: Action::new(from, to),
            kind,
        }
    }

    pub fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.action.promotion = Some(kind);
        self
    }

    pub fn from(&self) -> Coord {
        self.action.from
    }

    pub fn to(&self) -> Coord {
        self.action.to
    }
}
