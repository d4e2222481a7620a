// SPDX-License-Identifier: MIT OR Apache-2.0

//! Piece construction from layout tags

use crate::board::Board;
use crate::piece::Piece;
use crate::pieces::{Behavior, Bishop, King, Knight, Pawn, Queen, Rook};
use crate::position::Position;
use crate::{BoardError, Suit};
use std::collections::BTreeMap;
use std::fmt;

/// Builds a piece for a board that is still being populated
pub type Constructor = fn(&mut Board, Position, Suit) -> Piece;

/// Maps layout kind tags to piece constructors
#[derive(Clone, Default)]
pub struct PieceFactory {
    constructors: BTreeMap<String, Constructor>,
}

impl fmt::Debug for PieceFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.constructors.keys()).finish()
    }
}

impl PieceFactory {
    /// A factory that knows no tags
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory for the six standard kinds
    pub fn standard() -> Self {
        Self::new()
            .with("pawn", pawn)
            .with("rook", rook)
            .with("knight", knight)
            .with("bishop", bishop)
            .with("queen", queen)
            .with("king", king)
    }

    /// Register (or replace) the constructor for `tag`
    pub fn register(&mut self, tag: &str, constructor: Constructor) {
        self.constructors.insert(tag.to_string(), constructor);
    }

    pub fn with(mut self, tag: &str, constructor: Constructor) -> Self {
        self.register(tag, constructor);
        self
    }

    pub fn knows(&self, tag: &str) -> bool {
        self.constructors.contains_key(tag)
    }

    /// Construct the piece registered under `tag`
    pub fn construct(
        &self,
        tag: &str,
        board: &mut Board,
        pos: Position,
        suit: Suit,
    ) -> Result<Piece, BoardError> {
        let constructor = self
            .constructors
            .get(tag)
            .ok_or_else(|| BoardError::UnknownPieceKind(tag.to_string()))?;
        Ok(constructor(board, pos, suit))
    }
}

fn pawn(board: &mut Board, pos: Position, suit: Suit) -> Piece {
    let behavior = Behavior::Pawn(Pawn::new(board, &suit));
    Piece::new(pos, suit, behavior)
}

fn rook(board: &mut Board, pos: Position, suit: Suit) -> Piece {
    let behavior = Behavior::Rook(Rook::new(board, pos, &suit));
    Piece::new(pos, suit, behavior)
}

fn knight(_board: &mut Board, pos: Position, suit: Suit) -> Piece {
    Piece::new(pos, suit, Behavior::Knight(Knight))
}

fn bishop(_board: &mut Board, pos: Position, suit: Suit) -> Piece {
    Piece::new(pos, suit, Behavior::Bishop(Bishop))
}

fn queen(_board: &mut Board, pos: Position, suit: Suit) -> Piece {
    Piece::new(pos, suit, Behavior::Queen(Queen))
}

fn king(board: &mut Board, pos: Position, suit: Suit) -> Piece {
    Piece::new(pos, suit, Behavior::King(King::new(board)))
}
