//! Negamax search with alpha-beta pruning

use tracing::debug;

use crate::{Game, StopSignal, WIN_VALUE};

/// The move chosen at the root together with its negamax value.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<A> {
    pub action: A,
    /// Value from the perspective of the side to move at the root.
    pub value: f32,
}

/// Result from [`search`] indicating whether search completed or was stopped.
#[derive(Debug, Clone)]
pub struct SearchOutcome<A> {
    /// Best move found (None if the root has no children)
    pub best: Option<Evaluation<A>>,
    /// Number of nodes visited, root excluded
    pub nodes: u64,
    /// True if the stop signal cut the search short
    pub stopped: bool,
}

/// Searches `state` to `depth` plies and returns the best action.
///
/// Convenience wrapper around [`search`] without cancellation.
pub fn best_action<G: Game>(state: &G, depth: u32) -> Option<Evaluation<G::Action>> {
    search(state, depth, &StopSignal::new()).best
}

/// Searches `state` to `depth` plies and returns the chosen child state
/// together with the action and value that led to it.
pub fn best_child<G: Game>(state: &G, depth: u32) -> Option<(G, Evaluation<G::Action>)> {
    let (outcome, child) = search_root(state, depth, &StopSignal::new());
    child.zip(outcome.best)
}

/// Searches the state and returns the best action with its value.
///
/// # Arguments
/// * `state` - The root state; it should not be terminal
/// * `depth` - Search depth in plies (0 is searched as 1)
/// * `stop` - Cooperative cancellation, checked between siblings
///
/// # Returns
/// `SearchOutcome` with the best action (if any) and whether search was stopped.
/// A stopped search still reports the best fully searched root move.
pub fn search<G: Game>(state: &G, depth: u32, stop: &StopSignal) -> SearchOutcome<G::Action> {
    search_root(state, depth, stop).0
}

/// Root loop shared by [`search`] and [`best_child`]. The winning child is
/// kept instead of being regenerated by the caller.
fn search_root<G: Game>(
    state: &G,
    depth: u32,
    stop: &StopSignal,
) -> (SearchOutcome<G::Action>, Option<G>) {
    let depth = depth.max(1);
    let mut nodes = 0u64;
    let mut best: Option<Evaluation<G::Action>> = None;
    let mut best_state: Option<G> = None;
    let mut stopped = false;

    for (child, action) in state.children() {
        if stop.is_stopped() {
            stopped = true;
            break;
        }

        let alpha = best.as_ref().map_or(f32::NEG_INFINITY, |b| b.value);
        let Some(score) = negamax(
            &child,
            depth - 1,
            f32::NEG_INFINITY,
            -alpha,
            &mut nodes,
            stop,
        ) else {
            stopped = true;
            break;
        };
        let value = -score;
        debug!(?action, value, "root move searched");

        if best.as_ref().is_none_or(|b| value > b.value) {
            best = Some(Evaluation { action, value });
            best_state = Some(child);
        }
    }

    let outcome = SearchOutcome {
        best,
        nodes,
        stopped,
    };
    (outcome, best_state)
}

/// Recursive negamax search with alpha-beta pruning.
///
/// Returns the value from the side to move's perspective, or `None` if the
/// stop signal was raised before the node finished.
fn negamax<G: Game>(
    state: &G,
    depth: u32,
    mut alpha: f32,
    beta: f32,
    nodes: &mut u64,
    stop: &StopSignal,
) -> Option<f32> {
    *nodes += 1;

    if depth == 0 {
        return Some(leaf_value(state, 0));
    }

    let children = state.children();
    if children.is_empty() {
        return Some(leaf_value(state, depth));
    }

    let mut value = f32::NEG_INFINITY;
    for (child, _) in children {
        if stop.is_stopped() {
            return None;
        }

        value = value.max(-negamax(&child, depth - 1, -beta, -alpha, nodes, stop)?);
        alpha = alpha.max(value);
        if alpha >= beta {
            break; // Beta cutoff
        }
    }
    Some(value)
}

/// Static evaluation signed for the side to move.
///
/// Decided scores grow with the remaining depth, so a mate found nearer the
/// root outranks a later one and a loss is postponed as long as possible.
fn leaf_value<G: Game>(state: &G, depth: u32) -> f32 {
    let eval = state.evaluate();
    let biased = if eval >= WIN_VALUE {
        eval + depth as f32
    } else if eval <= -WIN_VALUE {
        eval - depth as f32
    } else {
        eval
    };

    if state.first_player_to_move() {
        biased
    } else {
        -biased
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
