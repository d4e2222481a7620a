// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gambit Core - Board, Pieces and Move Generation
//!
//! This crate provides the engine of a chess-like game for two or more
//! suits:
//! - board occupancy and the capture index derived from it
//! - per-kind trajectory calculation (which tiles a piece can reach)
//! - interactions for rules spanning several pieces, such as castling
//! - board configuration and a resource cache for piece textures

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod config;
pub mod factory;
pub mod interaction;
pub mod piece;
pub mod pieces;
pub mod position;
pub mod res;
pub mod session;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub use board::{Board, CaptureEntry};
pub use config::{BoardConfig, LayoutSlot};
pub use factory::PieceFactory;
pub use interaction::{Castling, Interaction, InteractionKind};
pub use piece::{Piece, PieceId, PieceKind, PosList};
pub use position::{Extent, Facing, Position, Step};
pub use session::GameSession;

/// One of the opposing sides in a game
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Suit(String);

impl Suit {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn white() -> Self {
        Self::new("white")
    }

    pub fn black() -> Self {
        Self::new("black")
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Suit {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Errors from building a board or loading its configuration and resources.
///
/// Illegal moves are not errors: [`Board::move_piece`] and
/// [`Board::capture`] report them by returning `false`.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The layout names a kind the factory has no constructor for
    #[error("Unknown piece kind: {0}")]
    UnknownPieceKind(String),

    /// A layout slot lies outside the board
    #[error("Position {0} is outside the board")]
    OutOfBounds(Position),

    /// Two layout slots share a tile
    #[error("Position {0} is listed twice in the layout")]
    DuplicatePosition(Position),

    /// A constructor built a piece somewhere other than its layout slot
    #[error("Piece built for {slot} claims to stand on {actual}")]
    MisplacedPiece { slot: Position, actual: Position },

    /// The board has no tiles, or more than coordinates can address
    #[error("Invalid board extent {}x{}", .0.width, .0.height)]
    InvalidExtent(Extent),

    /// No piece stands on the tile
    #[error("No piece at {0}")]
    EmptyTile(Position),

    /// The texture table has no entry for a piece
    #[error("No texture configured for {suit} {kind}")]
    MissingTexture { kind: String, suit: Suit },

    /// A resource file could not be loaded
    #[error("Failed to load resource {}: {source}", .path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
