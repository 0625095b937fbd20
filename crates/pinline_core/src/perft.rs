use crate::{movegen::legal_moves, position::Position, types::Action};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(pos: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(pos);
    // Bulk count at the frontier: no need to build the leaf positions.
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|mv| perft(&pos.apply(mv), depth - 1))
        .sum()
}

/// Per-root-move node counts, in generation order.
pub fn divide(pos: &Position, depth: u8) -> Vec<(Action, u64)> {
    let child_depth = depth.saturating_sub(1);
    legal_moves(pos)
        .into_iter()
        .map(|mv| (mv.action, perft(&pos.apply(mv), child_depth)))
        .collect()
}
