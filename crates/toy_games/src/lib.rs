//! Small games used to exercise the shared game-tree search.

pub mod connect_four;
pub mod counting;
pub mod tictactoe;

pub use connect_four::{ConnectFour, Disc, Drop};
pub use counting::{CountingGame, Turn};
pub use tictactoe::{Mark, Placement, TicTacToe};
