pub mod attacks;
pub mod board;
pub mod eval;
pub mod fen;
pub mod geometry;
pub mod movegen;
pub mod perft;
pub mod position;
pub mod types;
pub mod uci;

// Re-export core game logic
pub use attacks::{Attacks, CastleSide, KingThreats, LineStatus, compute_attacks};
pub use board::Board;
pub use eval::evaluate;
pub use fen::{FenError, START_FEN};
pub use geometry::{Coord, Delta, Line};
pub use movegen::{GameStatus, children, has_legal_move, legal_moves, status};
pub use perft::{divide, perft};
pub use position::{CastleRights, PLY_CAP, Position};
pub use types::*;
pub use uci::{MoveParseError, UciError, parse_action, parse_uci_move, position_from_uci};

// =============================================================================
// Search integration
// =============================================================================

/// Chess as a two-player game tree. White is the first player.
impl game_tree::Game for Position {
    type Action = Action;

    fn first_player_to_move(&self) -> bool {
        self.side_to_move == Color::White
    }

    fn children(&self) -> Vec<(Self, Action)> {
        movegen::children(self)
    }

    fn evaluate(&self) -> f32 {
        eval::evaluate(self)
    }
}
