use super::*;
use game_tree::best_action;

fn play(moves: &[(usize, usize)]) -> TicTacToe {
    moves.iter().fold(TicTacToe::new(), |state, &(x, y)| {
        state.place(Placement { x, y }).expect("free cell")
    })
}

#[test]
fn test_empty_board_has_nine_children() {
    assert_eq!(TicTacToe::new().children().len(), 9);
}

#[test]
fn test_taken_cell_rejected() {
    let state = play(&[(1, 1)]);
    assert!(state.place(Placement { x: 1, y: 1 }).is_none());
    assert!(state.place(Placement { x: 3, y: 0 }).is_none());
}

#[test]
fn test_winning_child_ordered_first() {
    // X: (0,0) (1,0); O: (0,1) (1,1)
    let state = play(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
    let kids = state.children();
    assert_eq!(kids[0].1, Placement { x: 2, y: 0 });
    assert_eq!(kids[0].0.winner(), Some(Mark::X));
}

#[test]
fn test_takes_immediate_win() {
    let state = play(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
    let best = best_action(&state, 2).expect("moves available");
    assert_eq!(best.action, Placement { x: 2, y: 0 });
    assert!(best.value >= WIN_VALUE);
}

#[test]
fn test_blocks_open_line() {
    // O threatens the middle row.
    let state = play(&[(0, 0), (1, 1), (2, 2), (0, 1)]);
    let best = best_action(&state, 2).expect("moves available");
    assert_eq!(best.action, Placement { x: 2, y: 1 });
}

#[test]
fn test_perfect_play_is_a_draw() {
    let best = best_action(&TicTacToe::new(), 9).expect("moves available");
    assert_eq!(best.value, 0.0);
}

#[test]
fn test_finished_game_has_no_children() {
    let won = play(&[(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)]);
    assert!(won.is_over());
    assert!(won.children().is_empty());
    assert_eq!(won.evaluate(), WIN_VALUE);
}

#[test]
fn test_display() {
    let state = play(&[(1, 1), (0, 0)]);
    assert_eq!(state.to_string(), "To move: X\nO..\n.X.\n...\n");
}
