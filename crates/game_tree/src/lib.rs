//! Game-tree search shared by every game in the workspace.
//!
//! A game only has to describe how a state expands into children and how a
//! state scores statically; the negamax driver in [`search`] does the rest.

pub mod search;
pub mod stop;

pub use search::{Evaluation, SearchOutcome, best_action, best_child, search};
pub use stop::StopSignal;

use std::fmt;

/// Magnitude at and above which a static score means the game is decided.
///
/// Heuristic scores must stay strictly inside `(-WIN_VALUE, WIN_VALUE)`.
pub const WIN_VALUE: f32 = 1000.0;

// =============================================================================
// Game trait: implemented by chess and the toy games
// =============================================================================

/// A two-player, zero-sum, perfect-information game state.
///
/// Scores are always reported from the first player's point of view
/// (White in chess, X in noughts-and-crosses). The search flips the sign
/// itself based on [`Game::first_player_to_move`].
pub trait Game: Sized {
    /// Move descriptor paired with every generated child.
    type Action: fmt::Debug;

    /// Whether the first player (the one scores are relative to) moves next.
    fn first_player_to_move(&self) -> bool;

    /// All successor states with the action leading to each.
    ///
    /// Terminal states return an empty list. Ordering only affects how much
    /// the search can prune, never the result.
    fn children(&self) -> Vec<(Self, Self::Action)>;

    /// Static score from the first player's perspective.
    ///
    /// Decided positions score `WIN_VALUE` (first player won) or
    /// `-WIN_VALUE` (first player lost); draws score 0.
    fn evaluate(&self) -> f32;
}
