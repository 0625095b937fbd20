use super::*;
use crate::fen::START_FEN;

#[test]
fn test_action_display() {
    let action = parse_action("e7e8q").expect("well-formed");
    assert_eq!(action.promotion, Some(PieceKind::Queen));
    assert_eq!(action.to_string(), "e7e8q");
    assert_eq!(parse_action("g1f3").expect("well-formed").to_string(), "g1f3");
}

#[test]
fn test_parse_action_rejects_garbage() {
    for txt in ["", "e2", "e2e9", "e2e4x", "e7e8k", "e2e4qq", "é2e4"] {
        assert!(
            matches!(parse_action(txt), Err(MoveParseError::Syntax(_))),
            "{txt:?}"
        );
    }
}

#[test]
fn test_parse_resolves_castling_kind() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("valid fen");
    let mv = parse_uci_move(&pos, "e1g1").expect("legal");
    assert_eq!(mv.kind, MoveKind::Castle);
}

#[test]
fn test_parse_rejects_illegal_move() {
    let pos = Position::startpos();
    assert!(matches!(
        parse_uci_move(&pos, "e2e5"),
        Err(MoveParseError::Illegal { .. })
    ));
}

#[test]
fn test_promotion_piece_required() {
    let pos = Position::from_fen("8/4P3/8/8/8/8/8/k3K3 w - - 0 1").expect("valid fen");
    assert!(parse_uci_move(&pos, "e7e8").is_err());
    assert_eq!(
        parse_uci_move(&pos, "e7e8n").expect("legal").action.promotion,
        Some(PieceKind::Knight)
    );
}

#[test]
fn test_position_startpos_with_moves() {
    let pos = position_from_uci(&["startpos", "moves", "e2e4", "e7e5", "g1f3"]).expect("valid");
    assert_eq!(
        pos.to_fen(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
    );
}

#[test]
fn test_position_from_fen_tokens() {
    let tokens: Vec<&str> = std::iter::once("fen")
        .chain(START_FEN.split_whitespace())
        .chain(["moves", "d2d4"])
        .collect();
    let pos = position_from_uci(&tokens).expect("valid");
    assert_eq!(pos.en_passant, Coord::from_algebraic("d3"));
}

#[test]
fn test_position_errors() {
    assert!(matches!(
        position_from_uci(&["nonsense"]),
        Err(UciError::PositionSyntax(_))
    ));
    assert!(matches!(position_from_uci(&["fen"]), Err(UciError::PositionSyntax(_))));
    assert!(matches!(
        position_from_uci(&["fen", "8/8", "w", "-", "-"]),
        Err(UciError::Fen(_))
    ));
    assert!(matches!(
        position_from_uci(&["startpos", "moves", "e2e5"]),
        Err(UciError::Move(_))
    ));
}
