//! 规则引擎整体性质测试

use xiangqi_core::{
    Fen, GameState, MoveGenerator, Piece, PieceId, PieceType, Position, RuleValidator, Side,
    INITIAL_PIECE_COUNT,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn piece(id: u8, piece_type: PieceType, side: Side, x: u8, y: u8) -> Piece {
    Piece::new(PieceId(id), piece_type, side, Position::new_unchecked(x, y))
}

#[test]
fn out_of_bounds_destinations_are_never_valid() {
    let state = GameState::new();
    let outside: Vec<(i32, i32)> = (-2..=11)
        .flat_map(|x| (-2..=12).map(move |y| (x, y)))
        .filter(|&(x, y)| !(0..=8).contains(&x) || !(0..=9).contains(&y))
        .collect();

    for p in state.pieces() {
        for &(x, y) in &outside {
            assert!(!state.is_valid_move(p.id, x, y), "{} -> ({}, {})", p, x, y);
        }
    }
}

#[test]
fn pieces_never_capture_own_side() {
    let state = GameState::new();
    for a in state.pieces() {
        for b in state.pieces().iter().filter(|b| b.side == a.side) {
            assert!(!state.is_valid_move(a.id, b.x() as i32, b.y() as i32));
        }
    }
}

#[test]
fn undo_reverses_every_opening_move() {
    init_tracing();
    let state = GameState::new();
    for side in [Side::Red, Side::Black] {
        for mv in MoveGenerator::generate(&state, side) {
            let next = state.move_piece_direct(mv.piece.id, mv.to.x as i32, mv.to.y as i32);
            assert_ne!(next, state, "合法走法应该生效: {}", mv);
            assert_eq!(next.move_history().len(), 1);

            let undone = next.undo_move();
            assert_eq!(undone.pieces(), state.pieces());
            assert_eq!(undone.side_to_move(), state.side_to_move());
            assert_eq!(undone.move_history().len(), 0);
            assert_eq!(undone.winner(), None);
        }
    }
}

#[test]
fn undo_walks_back_a_long_game() {
    init_tracing();
    let mut states = vec![GameState::new()];
    for ply in 0..60 {
        let current = states.last().cloned().unwrap_or_default();
        if current.is_over() {
            break;
        }
        let moves = MoveGenerator::generate(&current, current.side_to_move());
        if moves.is_empty() {
            break;
        }
        let mv = moves[(ply * 7) % moves.len()];
        let next = current.move_piece_direct(mv.piece.id, mv.to.x as i32, mv.to.y as i32);
        assert_eq!(next.move_history().len(), ply + 1);
        states.push(next);
    }

    let mut current = states.pop().unwrap_or_default();
    while let Some(previous) = states.pop() {
        current = current.undo_move();
        assert_eq!(current.pieces(), previous.pieces());
        assert_eq!(current.side_to_move(), previous.side_to_move());
        assert_eq!(current.move_history(), previous.move_history());
    }
    assert_eq!(current, GameState::new());
}

#[test]
fn cannon_needs_exactly_one_screen() {
    let state = GameState::from_pieces(
        vec![
            piece(0, PieceType::Cannon, Side::Red, 0, 0),
            piece(1, PieceType::Pawn, Side::Black, 0, 3),
            piece(2, PieceType::Pawn, Side::Black, 0, 6),
        ],
        Side::Red,
    )
    .expect("布局有效");

    assert!(state.is_valid_move(PieceId(0), 0, 6));
    assert!(!state.is_valid_move(PieceId(0), 0, 9));
}

#[test]
fn elephant_cannot_cross_river() {
    let board = xiangqi_core::Board::from_pieces(&[
        piece(0, PieceType::Elephant, Side::Red, 2, 9),
        piece(1, PieceType::Elephant, Side::Red, 2, 5),
    ]);
    let home = board.get(Position::new_unchecked(2, 9)).expect("相在 (2,9)");
    let riverbank = board.get(Position::new_unchecked(2, 5)).expect("相在 (2,5)");

    assert!(RuleValidator::is_legal(&board, &home, 0, 7));
    assert!(!RuleValidator::is_legal(&board, &riverbank, 0, 3));
}

#[test]
fn horse_leg_blocks_only_its_direction() {
    let state = GameState::from_pieces(
        vec![
            piece(0, PieceType::Horse, Side::Black, 0, 0),
            piece(1, PieceType::Pawn, Side::Red, 0, 1),
        ],
        Side::Black,
    )
    .expect("布局有效");

    assert!(!state.is_valid_move(PieceId(0), 1, 2));
    assert!(state.is_valid_move(PieceId(0), 2, 1));
}

#[test]
fn king_capture_sets_winner_on_the_next_state_only() {
    let state = Fen::parse("4k4/9/9/9/4R4/9/9/9/9/3K5 r").expect("FEN 有效");
    let rook = state.piece_at(4, 4).map(|p| p.id).expect("车在 (4,4)");

    let selected = state.select_piece(rook);
    assert_eq!(selected.winner(), None);

    let next = selected.move_piece(4, 0);
    assert_eq!(next.winner(), Some(Side::Red));
    assert_eq!(
        next.last_move().and_then(|m| m.captured).map(|c| c.piece_type),
        Some(PieceType::King)
    );
}

#[test]
fn black_wins_by_capturing_red_king() {
    let state = Fen::parse("3k5/9/9/9/9/9/9/9/4c4/4K4 b").expect("FEN 有效");
    let cannon = state.piece_at(4, 8).map(|p| p.id).expect("炮在 (4,8)");
    // 炮与帅相邻，没有炮架，不能直接吃
    assert_eq!(state.move_piece_direct(cannon, 4, 9), state);

    let with_screen = Fen::parse("3k5/9/9/9/9/4c4/9/9/4P4/4K4 b").expect("FEN 有效");
    let cannon = with_screen.piece_at(4, 5).map(|p| p.id).expect("炮在 (4,5)");
    let next = with_screen.move_piece_direct(cannon, 4, 9);
    assert_eq!(next.winner(), Some(Side::Black));
}

#[test]
fn starting_position() {
    let state = GameState::new();
    assert_eq!(state.pieces().len(), INITIAL_PIECE_COUNT);
    assert_eq!(state.side_to_move(), Side::Red);
    assert!(state.move_history().is_empty());
    assert_eq!(state.winner(), None);
}

#[test]
fn state_snapshot_survives_json() {
    let state = GameState::new();
    let cannon = state.piece_at(7, 7).map(|p| p.id).expect("炮在 (7,7)");
    let played = state.select_piece(cannon).move_piece(4, 7);

    let json = serde_json::to_string(&played).expect("序列化");
    let restored: GameState = serde_json::from_str(&json).expect("反序列化");
    assert_eq!(restored, played);
    assert_eq!(restored.undo_move(), state);
}
