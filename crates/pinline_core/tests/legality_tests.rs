//! Random playouts checking generator invariants at every visited position.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use pinline_core::{
    Coord, GameStatus, MoveKind, PieceKind, Position, START_FEN, has_legal_move, legal_moves,
    status,
};

const STARTS: &[&str] = &[
    START_FEN,
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
];
const GAMES_PER_START: u64 = 6;
const MAX_PLIES: usize = 250;

fn check_invariants(pos: &Position) {
    let fen = pos.to_fen();
    let us = pos.side_to_move;
    let attacks = pos.attacks();
    let king = pos.king();
    let moves = legal_moves(pos);

    assert_eq!(
        attacks.checks > 0,
        pos.board.is_attacked(king, us.other()),
        "check detection disagrees with direct probe in {fen}"
    );
    assert_eq!(has_legal_move(pos), !moves.is_empty(), "{fen}");
    assert_eq!(Position::from_fen(&fen).as_ref(), Ok(pos), "FEN round trip of {fen}");

    for mv in &moves {
        let child = pos.apply(*mv);
        let our_king = child.board.find_king(us);
        assert!(
            !child.board.is_attacked(our_king, us.other()),
            "{mv} leaves the king attacked in {fen}"
        );

        if mv.from() == king {
            continue;
        }
        assert!(attacks.checks < 2, "non-king move {mv} under double check in {fen}");
        if let Some(line) = attacks.must_block {
            assert!(line.contains(mv.to()), "{mv} ignores the check line in {fen}");
        }
        if let Some(target) = attacks.must_kill {
            let captured = if mv.kind == MoveKind::EnPassant {
                Coord::new(mv.from().rank, mv.to().file)
            } else {
                mv.to()
            };
            assert_eq!(captured, target, "{mv} ignores the contact check in {fen}");
        }
        if let Some(line) = attacks.pin_line(mv.from()) {
            assert!(line.contains(mv.to()), "pinned piece leaves its line with {mv} in {fen}");
        }
    }

    let promotions = moves.iter().filter(|m| m.action.promotion.is_some()).count();
    assert_eq!(promotions % 4, 0, "promotions come in fours in {fen}");

    match status(pos) {
        GameStatus::Checkmate => assert!(moves.is_empty() && attacks.checks > 0),
        GameStatus::Stalemate => assert!(moves.is_empty() && attacks.checks == 0),
        GameStatus::MoveLimitDraw => assert!(pos.is_ply_cap_reached()),
        GameStatus::Ongoing => assert!(!moves.is_empty()),
    }
}

#[test]
fn random_playouts_respect_legality() {
    for (i, start) in STARTS.iter().enumerate() {
        for game in 0..GAMES_PER_START {
            let mut rng = StdRng::seed_from_u64(i as u64 * 1000 + game);
            let mut pos = Position::from_fen(start).expect("valid fen");

            for _ in 0..MAX_PLIES {
                check_invariants(&pos);
                let moves = legal_moves(&pos);
                let Some(&mv) = moves.choose(&mut rng) else {
                    break;
                };
                pos = pos.apply(mv);
            }
        }
    }
}

#[test]
fn kings_never_disappear() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut pos = Position::startpos();
    for _ in 0..MAX_PLIES {
        let moves = legal_moves(&pos);
        let Some(&mv) = moves.choose(&mut rng) else {
            break;
        };
        pos = pos.apply(mv);
        let kings = pos
            .board
            .pieces()
            .filter(|(_, p)| p.kind() == PieceKind::King)
            .count();
        assert_eq!(kings, 2);
    }
}
