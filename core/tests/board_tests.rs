// SPDX-License-Identifier: MIT OR Apache-2.0

use gambit_core::res::ResourceCache;
use gambit_core::{
    Board, BoardConfig, BoardError, CaptureEntry, PieceFactory, PieceKind, Position, Suit,
};
use std::collections::BTreeSet;

fn build(config: BoardConfig) -> Board {
    Board::new(config, &PieceFactory::standard()).unwrap()
}

/// Own-tile entry for every live piece and nothing for anything else
fn assert_index_consistent(board: &Board) {
    let live: BTreeSet<_> = board.pieces().map(|piece| piece.id()).collect();
    for entry in board.capture_index() {
        assert!(live.contains(&entry.piece), "index names dead piece {}", entry.piece);
    }
    for piece in board.pieces() {
        let tiles = board.capturable_tiles(piece.id()).unwrap();
        assert!(tiles.contains(&piece.position()), "{} missing own entry", piece);
    }
}

#[test]
fn move_requires_a_piece_on_source() {
    let mut board = build(BoardConfig::empty(8, 8).with_piece(0, 0, "rook", "white"));
    assert!(!board.move_piece(Position::new(1, 1), Position::new(1, 2)));
    assert!(board.at(Position::new(1, 2)).is_none());
}

#[test]
fn move_requires_target_in_trajectory() {
    let mut board = build(BoardConfig::empty(8, 8).with_piece(0, 0, "rook", "white"));
    assert!(!board.move_piece(Position::new(0, 0), Position::new(1, 1)));
    assert!(!board.move_piece(Position::new(0, 0), Position::new(0, 0)));
    assert!(!board.move_piece(Position::new(0, 0), Position::new(0, 9)));

    let rook = board.at(Position::new(0, 0)).unwrap();
    assert_eq!(rook.moves(), 0);
}

#[test]
fn successful_move_vacates_source() {
    let mut board = build(BoardConfig::standard());
    let id = board.at(Position::new(6, 7)).unwrap().id();

    assert!(board.move_piece(Position::new(6, 7), Position::new(5, 5)));

    assert!(board.at(Position::new(6, 7)).is_none());
    let knight = board.at(Position::new(5, 5)).unwrap();
    assert_eq!(knight.id(), id);
    assert_eq!(knight.kind(), PieceKind::Knight);
    assert_eq!(knight.moves(), 1);
    assert_eq!(board.position_of(id), Some(Position::new(5, 5)));
    assert_index_consistent(&board);
}

#[test]
fn move_is_not_a_capture() {
    let mut board = build(
        BoardConfig::empty(8, 8)
            .with_piece(0, 0, "rook", "white")
            .with_piece(0, 5, "knight", "black"),
    );
    assert!(!board.move_piece(Position::new(0, 0), Position::new(0, 5)));
    assert_eq!(board.len(), 2);
}

#[test]
fn other_pieces_see_the_new_occupancy() {
    let mut board = build(
        BoardConfig::empty(8, 8)
            .with_piece(0, 0, "rook", "white")
            .with_piece(3, 5, "knight", "black"),
    );
    // Knight jumps into the rook's file
    assert!(board.move_piece(Position::new(3, 5), Position::new(1, 4)));
    assert!(board.move_piece(Position::new(1, 4), Position::new(0, 2)));

    let rook = board.at(Position::new(0, 0)).unwrap();
    assert_eq!(rook.captures().iter().copied().collect::<Vec<_>>(), vec![Position::new(0, 2)]);
    assert!(!rook.trajectory().contains(&Position::new(0, 3)));
}

#[test]
fn capture_removes_victim_and_its_entries() {
    let mut board = build(
        BoardConfig::empty(8, 8)
            .with_piece(0, 0, "rook", "white")
            .with_piece(0, 5, "knight", "black"),
    );
    let victim = board.at(Position::new(0, 5)).unwrap().id();
    let entry = CaptureEntry::new(victim, Position::new(0, 5));

    assert_eq!(board.captures_for(Position::new(0, 0)), vec![entry]);
    assert!(board.capture(Position::new(0, 0), entry));

    assert_eq!(board.len(), 1);
    assert_eq!(board.position_of(victim), None);
    assert!(board.capturable_tiles(victim).is_none());
    assert!(board.capture_index().all(|e| e.piece != victim));

    let rook = board.at(Position::new(0, 5)).unwrap();
    assert_eq!(rook.moves(), 1);
    assert!(rook.trajectory().contains(&Position::new(0, 7)));
    assert!(board.at(Position::new(0, 0)).is_none());
    assert_index_consistent(&board);
}

#[test]
fn capture_rejections_change_nothing() {
    let mut board = build(
        BoardConfig::empty(8, 8)
            .with_piece(0, 0, "rook", "white")
            .with_piece(0, 5, "knight", "black")
            .with_piece(7, 7, "knight", "black")
            .with_piece(0, 6, "bishop", "white"),
    );
    let near = board.at(Position::new(0, 5)).unwrap().id();
    let far = board.at(Position::new(7, 7)).unwrap().id();
    let friend = board.at(Position::new(0, 6)).unwrap().id();
    let before: Vec<_> = board.capture_index().collect();

    // Empty source
    assert!(!board.capture(Position::new(3, 3), CaptureEntry::new(near, Position::new(0, 5))));
    // Tile not in the rook's capture set
    assert!(!board.capture(Position::new(0, 0), CaptureEntry::new(far, Position::new(7, 7))));
    // Entry that does not exist in the index
    assert!(!board.capture(Position::new(0, 0), CaptureEntry::new(far, Position::new(0, 5))));
    // Own suit
    assert!(!board.capture(Position::new(0, 0), CaptureEntry::new(friend, Position::new(0, 6))));

    assert_eq!(board.len(), 4);
    assert_eq!(before, board.capture_index().collect::<Vec<_>>());
    assert_eq!(board.at(Position::new(0, 0)).unwrap().moves(), 0);
}

#[test]
fn capture_index_follows_every_move() {
    let mut board = build(BoardConfig::standard());
    assert!(board.move_piece(Position::new(4, 6), Position::new(4, 4)));
    assert!(board.move_piece(Position::new(3, 1), Position::new(3, 3)));
    assert_index_consistent(&board);

    let pawn = board.at(Position::new(4, 4)).unwrap();
    assert!(pawn.captures().contains(&Position::new(3, 3)));

    let victim = board.at(Position::new(3, 3)).unwrap().id();
    assert!(board.capture(Position::new(4, 4), CaptureEntry::new(victim, Position::new(3, 3))));
    assert_eq!(board.len(), 31);
    assert_index_consistent(&board);
}

#[test]
fn capturable_at_lists_entries_for_a_tile() {
    let board = build(BoardConfig::standard());
    let king = board.at(Position::new(4, 0)).unwrap().id();
    assert_eq!(
        board.capturable_at(Position::new(4, 0)),
        vec![CaptureEntry::new(king, Position::new(4, 0))]
    );
    assert!(board.capturable_at(Position::new(4, 4)).is_empty());
}

#[test]
fn unknown_kind_is_rejected() {
    let config = BoardConfig::empty(8, 8).with_piece(0, 0, "archbishop", "white");
    let result = Board::new(config, &PieceFactory::standard());
    assert!(matches!(result, Err(BoardError::UnknownPieceKind(kind)) if kind == "archbishop"));
}

#[test]
fn layout_outside_board_is_rejected() {
    let config = BoardConfig::empty(4, 4).with_piece(4, 0, "rook", "white");
    let result = Board::new(config, &PieceFactory::standard());
    assert!(matches!(result, Err(BoardError::OutOfBounds(pos)) if pos == Position::new(4, 0)));
}

#[test]
fn duplicate_slot_is_rejected() {
    let config = BoardConfig::empty(4, 4)
        .with_piece(1, 1, "rook", "white")
        .with_piece(1, 1, "king", "black");
    let result = Board::new(config, &PieceFactory::standard());
    assert!(matches!(result, Err(BoardError::DuplicatePosition(_))));
}

#[test]
fn empty_extent_is_rejected() {
    let result = Board::new(BoardConfig::empty(0, 8), &PieceFactory::standard());
    assert!(matches!(result, Err(BoardError::InvalidExtent(_))));
}

#[test]
fn oversized_extent_is_rejected() {
    let result = Board::new(BoardConfig::empty(u32::MAX, 1), &PieceFactory::standard());
    assert!(matches!(result, Err(BoardError::InvalidExtent(_))));
    let result = Board::new(BoardConfig::empty(1, 1 << 31), &PieceFactory::standard());
    assert!(matches!(result, Err(BoardError::InvalidExtent(_))));
}

#[test]
fn constructor_must_place_piece_on_its_slot() {
    let factory = PieceFactory::standard().with("shifty", |board, _pos, suit| {
        PieceFactory::standard()
            .construct("rook", board, Position::new(3, 3), suit)
            .unwrap()
    });
    let config = BoardConfig::empty(8, 8).with_piece(0, 0, "shifty", "white");
    let result = Board::new(config, &factory);
    assert!(matches!(
        result,
        Err(BoardError::MisplacedPiece { slot, actual })
            if slot == Position::new(0, 0) && actual == Position::new(3, 3)
    ));
}

#[test]
fn custom_factory_tags() {
    let factory = PieceFactory::new().with("tower", |board, pos, suit| {
        PieceFactory::standard()
            .construct("rook", board, pos, suit)
            .unwrap()
    });
    let config = BoardConfig::empty(3, 3).with_piece(1, 1, "tower", "white");
    let board = Board::new(config, &factory).unwrap();
    assert_eq!(board.at(Position::new(1, 1)).unwrap().kind(), PieceKind::Rook);

    let config = BoardConfig::empty(3, 3).with_piece(1, 1, "rook", "white");
    assert!(Board::new(config, &factory).is_err());
}

#[test]
fn three_suits_share_a_board() {
    let board = build(
        BoardConfig::empty(5, 5)
            .with_piece(2, 2, "queen", "red")
            .with_piece(2, 0, "rook", "green")
            .with_piece(0, 2, "rook", "blue")
            .with_piece(4, 4, "rook", "red"),
    );
    let queen = board.at(Position::new(2, 2)).unwrap();
    assert_eq!(queen.suit(), &Suit::new("red"));
    assert!(queen.captures().contains(&Position::new(2, 0)));
    assert!(queen.captures().contains(&Position::new(0, 2)));
    assert!(!queen.captures().contains(&Position::new(4, 4)));
    assert_eq!(board.captures_for(Position::new(2, 2)).len(), 2);
}

#[test]
fn textures_resolve_through_cache() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("pieces/white")).unwrap();
    std::fs::write(dir.path().join("pieces/white/rook.png"), b"png").unwrap();

    let board = build(BoardConfig::standard());
    let cache = ResourceCache::new(dir.path());

    let first = board.texture(Position::new(0, 7), &cache).unwrap();
    let second = board.texture(Position::new(7, 7), &cache).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(first.bytes(), b"png");

    assert!(matches!(
        board.texture(Position::new(3, 3), &cache),
        Err(BoardError::EmptyTile(_))
    ));
    assert!(matches!(
        board.texture(Position::new(0, 0), &cache),
        Err(BoardError::Resource { .. })
    ));
}

#[test]
fn missing_texture_entry() {
    let board = build(BoardConfig::empty(2, 2).with_piece(0, 0, "king", "white"));
    let piece = board.at(Position::new(0, 0)).unwrap();
    assert!(matches!(
        piece.texture(board.config()),
        Err(BoardError::MissingTexture { .. })
    ));
}

#[test]
fn config_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.json");

    let config = BoardConfig::standard();
    config.save_to_file(&path).unwrap();
    let loaded = BoardConfig::load_from_file(&path).unwrap();
    assert_eq!(config, loaded);

    let board = build(loaded);
    assert_eq!(board.len(), 32);
}
