// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared access to one board from several threads
//!
//! A move is several steps (occupancy, capture index, trajectories, ticks).
//! The session holds the write lock across all of them, so a reader never
//! sees a piece that has moved while the capture index is stale.

use crate::board::{Board, CaptureEntry};
use crate::position::Position;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info_span;
use uuid::Uuid;

/// A board behind a single writer
#[derive(Debug, Clone)]
pub struct GameSession {
    id: Uuid,
    board: Arc<RwLock<Board>>,
}

impl GameSession {
    pub fn new(board: Board) -> Self {
        Self {
            id: Uuid::new_v4(),
            board: Arc::new(RwLock::new(board)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// See [`Board::move_piece`]
    pub fn move_piece(&self, source: Position, target: Position) -> bool {
        let _span = info_span!("move", session = %self.id).entered();
        self.board.write().move_piece(source, target)
    }

    /// See [`Board::capture`]
    pub fn capture(&self, source: Position, entry: CaptureEntry) -> bool {
        let _span = info_span!("capture", session = %self.id).entered();
        self.board.write().capture(source, entry)
    }

    /// Run `f` against a consistent view of the board
    pub fn read<R>(&self, f: impl FnOnce(&Board) -> R) -> R {
        f(&self.board.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::factory::PieceFactory;
    use std::thread;

    #[test]
    fn readers_see_whole_moves() {
        let board = Board::new(BoardConfig::standard(), &PieceFactory::standard()).unwrap();
        let session = GameSession::new(board);

        let writer = {
            let session = session.clone();
            thread::spawn(move || {
                assert!(session.move_piece(Position::new(4, 6), Position::new(4, 4)));
                assert!(session.move_piece(Position::new(4, 1), Position::new(4, 3)));
            })
        };

        for _ in 0..100 {
            session.read(|board| {
                for piece in board.pieces() {
                    let tiles = board.capturable_tiles(piece.id()).unwrap();
                    assert!(tiles.contains(&piece.position()));
                }
            });
        }

        writer.join().unwrap();
        session.read(|board| {
            assert!(board.at(Position::new(4, 4)).is_some());
            assert!(board.at(Position::new(4, 3)).is_some());
        });
    }
}
