// SPDX-License-Identifier: MIT OR Apache-2.0

use gambit_core::{
    Board, BoardConfig, CaptureEntry, Facing, Interaction, InteractionKind, PieceFactory,
    PieceKind, Position, Suit,
};

fn build(config: BoardConfig) -> Board {
    Board::new(config, &PieceFactory::standard()).unwrap()
}

fn castling_board() -> Board {
    build(
        BoardConfig::empty(8, 8)
            .with_piece(4, 7, "king", "white")
            .with_piece(0, 7, "rook", "white")
            .with_piece(7, 7, "rook", "white")
            .with_piece(4, 0, "king", "black")
            .with_piece(7, 0, "rook", "black"),
    )
}

#[test]
fn same_interaction_twice_is_the_same_instance() {
    let mut board = build(BoardConfig::empty(4, 4));
    assert!(board.interactions().is_empty());

    let first: *const Interaction = board.interaction(InteractionKind::Castling);
    let second: *const Interaction = board.interaction(InteractionKind::Castling);
    assert_eq!(first, second);
    assert_eq!(board.interactions().len(), 1);
    assert_eq!(board.interaction(InteractionKind::Castling).kind(), InteractionKind::Castling);

    board.castling().enlist(Position::new(0, 0), Suit::white());
    let castling = board.find_castling().unwrap();
    assert!(castling.has_right(Position::new(0, 0), &Suit::white()));
}

#[test]
fn king_sees_both_castling_targets() {
    let board = castling_board();
    let king = board.at(Position::new(4, 7)).unwrap();
    assert!(king.trajectory().contains(&Position::new(6, 7)));
    assert!(king.trajectory().contains(&Position::new(2, 7)));

    let black = board.at(Position::new(4, 0)).unwrap();
    assert!(black.trajectory().contains(&Position::new(6, 0)));
    assert!(!black.trajectory().contains(&Position::new(2, 0)));
}

#[test]
fn kingside_castle_moves_the_rook() {
    let mut board = castling_board();
    assert!(board.move_piece(Position::new(4, 7), Position::new(6, 7)));

    let king = board.at(Position::new(6, 7)).unwrap();
    assert_eq!(king.kind(), PieceKind::King);
    assert_eq!(king.moves(), 1);

    let rook = board.at(Position::new(5, 7)).unwrap();
    assert_eq!(rook.kind(), PieceKind::Rook);
    assert_eq!(rook.moves(), 1);
    assert!(board.at(Position::new(7, 7)).is_none());
    assert!(board.at(Position::new(4, 7)).is_none());

    // The other rook is untouched but can no longer castle
    assert_eq!(board.at(Position::new(0, 7)).unwrap().moves(), 0);
    let castling = board.find_castling().unwrap();
    assert_eq!(castling.rights(&Suit::white()).count(), 0);
    assert!(castling.has_right(Position::new(7, 0), &Suit::black()));

    // The relocated rook's trajectory is fresh
    let rook = board.at(Position::new(5, 7)).unwrap();
    assert!(rook.trajectory().contains(&Position::new(5, 0)));
    assert!(!rook.trajectory().contains(&Position::new(6, 7)));
}

#[test]
fn queenside_castle_moves_the_far_rook() {
    let mut board = castling_board();
    assert!(board.move_piece(Position::new(4, 7), Position::new(2, 7)));

    assert_eq!(board.at(Position::new(2, 7)).unwrap().kind(), PieceKind::King);
    assert_eq!(board.at(Position::new(3, 7)).unwrap().kind(), PieceKind::Rook);
    assert!(board.at(Position::new(0, 7)).is_none());
    assert_eq!(board.at(Position::new(7, 7)).unwrap().moves(), 0);
}

#[test]
fn blocked_path_prevents_castling() {
    let board = build(
        BoardConfig::empty(8, 8)
            .with_piece(4, 7, "king", "white")
            .with_piece(0, 7, "rook", "white")
            .with_piece(1, 7, "knight", "white")
            .with_piece(7, 7, "rook", "white"),
    );
    let king = board.at(Position::new(4, 7)).unwrap();
    assert!(!king.trajectory().contains(&Position::new(2, 7)));
    assert!(king.trajectory().contains(&Position::new(6, 7)));
}

#[test]
fn opposing_rook_does_not_castle() {
    let board = build(
        BoardConfig::empty(8, 8)
            .with_piece(4, 7, "king", "white")
            .with_piece(7, 7, "rook", "black"),
    );
    let king = board.at(Position::new(4, 7)).unwrap();
    assert!(!king.trajectory().contains(&Position::new(6, 7)));
}

#[test]
fn moved_rook_loses_its_right() {
    let mut board = castling_board();
    assert!(board.move_piece(Position::new(7, 7), Position::new(7, 6)));
    assert!(board.move_piece(Position::new(7, 6), Position::new(7, 7)));

    let king = board.at(Position::new(4, 7)).unwrap();
    assert!(!king.trajectory().contains(&Position::new(6, 7)));
    assert!(king.trajectory().contains(&Position::new(2, 7)));
}

#[test]
fn moved_king_loses_every_right() {
    let mut board = castling_board();
    assert!(board.move_piece(Position::new(4, 7), Position::new(4, 6)));
    assert!(board.move_piece(Position::new(4, 6), Position::new(4, 7)));

    let king = board.at(Position::new(4, 7)).unwrap();
    assert!(!king.trajectory().contains(&Position::new(6, 7)));
    assert!(!king.trajectory().contains(&Position::new(2, 7)));
}

#[test]
fn captured_rook_loses_its_right() {
    let mut board = build(
        BoardConfig::empty(8, 8)
            .with_piece(4, 7, "king", "white")
            .with_piece(7, 7, "rook", "white")
            .with_piece(7, 0, "rook", "black"),
    );
    let victim = board.at(Position::new(7, 7)).unwrap().id();
    assert!(board.capture(Position::new(7, 0), CaptureEntry::new(victim, Position::new(7, 7))));

    let castling = board.find_castling().unwrap();
    assert!(!castling.has_right(Position::new(7, 7), &Suit::white()));
    let king = board.at(Position::new(4, 7)).unwrap();
    assert!(!king.trajectory().contains(&Position::new(6, 7)));
}

fn en_passant_board() -> Board {
    build(
        BoardConfig::empty(8, 8)
            .with_facing("black", Facing::South)
            .with_facing("white", Facing::North)
            .with_piece(4, 3, "pawn", "white")
            .with_piece(3, 1, "pawn", "black")
            .with_piece(7, 7, "king", "white"),
    )
}

#[test]
fn double_step_registers_skipped_tile() {
    let mut board = en_passant_board();
    assert!(board.move_piece(Position::new(3, 1), Position::new(3, 3)));

    let black = board.at(Position::new(3, 3)).unwrap();
    assert_eq!(black.en_passant_tile(), Some(Position::new(3, 2)));
    let tiles = board.capturable_tiles(black.id()).unwrap();
    assert!(tiles.contains(&Position::new(3, 3)));
    assert!(tiles.contains(&Position::new(3, 2)));

    let white = board.at(Position::new(4, 3)).unwrap();
    assert!(white.captures().contains(&Position::new(3, 2)));
}

#[test]
fn en_passant_capture_removes_the_pawn() {
    let mut board = en_passant_board();
    assert!(board.move_piece(Position::new(3, 1), Position::new(3, 3)));
    let victim = board.at(Position::new(3, 3)).unwrap().id();

    let entries = board.captures_for(Position::new(4, 3));
    assert_eq!(entries, vec![CaptureEntry::new(victim, Position::new(3, 2))]);
    assert!(board.capture(Position::new(4, 3), entries[0]));

    assert!(board.at(Position::new(3, 3)).is_none());
    assert!(board.at(Position::new(4, 3)).is_none());
    let white = board.at(Position::new(3, 2)).unwrap();
    assert_eq!(white.moves(), 1);
    assert!(board.capturable_tiles(victim).is_none());
    assert_eq!(board.len(), 2);
}

#[test]
fn en_passant_expires_after_another_move() {
    let mut board = en_passant_board();
    assert!(board.move_piece(Position::new(3, 1), Position::new(3, 3)));
    assert!(board.move_piece(Position::new(7, 7), Position::new(7, 6)));

    let black = board.at(Position::new(3, 3)).unwrap();
    assert_eq!(black.en_passant_tile(), None);
    assert_eq!(
        board.capturable_tiles(black.id()).unwrap().iter().copied().collect::<Vec<_>>(),
        vec![Position::new(3, 3)]
    );

    let victim = black.id();
    let white = board.at(Position::new(4, 3)).unwrap();
    assert!(!white.captures().contains(&Position::new(3, 2)));
    assert!(!board.capture(Position::new(4, 3), CaptureEntry::new(victim, Position::new(3, 2))));
}

#[test]
fn single_step_offers_no_en_passant() {
    let mut board = en_passant_board();
    assert!(board.move_piece(Position::new(3, 1), Position::new(3, 2)));

    let black = board.at(Position::new(3, 2)).unwrap();
    assert_eq!(black.en_passant_tile(), None);
    assert_eq!(board.capturable_tiles(black.id()).unwrap().len(), 1);

    // Plain diagonal capture is still there
    let white = board.at(Position::new(4, 3)).unwrap();
    assert_eq!(white.captures().iter().copied().collect::<Vec<_>>(), vec![Position::new(3, 2)]);
}
