// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concrete piece kinds
//!
//! Every kind implements [`PieceBehavior`]. [`Behavior`] is the closed set
//! of kinds stored inside a [`Piece`](crate::piece::Piece) and dispatches to
//! the right implementation.

mod king;
mod knight;
mod pawn;
mod slider;

pub use king::King;
pub use knight::Knight;
pub use pawn::Pawn;
pub use slider::{Bishop, Queen, Rook};

use crate::interaction::InteractionRegistry;
use crate::piece::{PieceKind, TrajectoryContext};
use crate::position::Position;
use crate::Suit;

/// The behavior contract every piece kind fulfils
pub trait PieceBehavior {
    fn kind(&self) -> PieceKind;

    /// Report reachable tiles through the context's `add_*` primitives
    fn calc_trajectory(&self, cx: &mut TrajectoryContext<'_>);

    /// Called after this piece itself moved from `from` to `to`
    fn move_update(
        &mut self,
        _suit: &Suit,
        _from: Position,
        _to: Position,
        _interactions: &mut InteractionRegistry,
    ) {
    }

    /// Called after any piece on the board moved to `moved`, including this
    /// one. `own` is this piece's current tile.
    fn tick(&mut self, _own: Position, _moved: Position) {}
}

/// Per-kind state of a piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Behavior {
    Pawn(Pawn),
    Rook(Rook),
    Knight(Knight),
    Bishop(Bishop),
    Queen(Queen),
    King(King),
}

impl Behavior {
    fn inner(&self) -> &dyn PieceBehavior {
        match self {
            Behavior::Pawn(p) => p,
            Behavior::Rook(p) => p,
            Behavior::Knight(p) => p,
            Behavior::Bishop(p) => p,
            Behavior::Queen(p) => p,
            Behavior::King(p) => p,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn PieceBehavior {
        match self {
            Behavior::Pawn(p) => p,
            Behavior::Rook(p) => p,
            Behavior::Knight(p) => p,
            Behavior::Bishop(p) => p,
            Behavior::Queen(p) => p,
            Behavior::King(p) => p,
        }
    }
}

impl PieceBehavior for Behavior {
    fn kind(&self) -> PieceKind {
        self.inner().kind()
    }

    fn calc_trajectory(&self, cx: &mut TrajectoryContext<'_>) {
        self.inner().calc_trajectory(cx)
    }

    fn move_update(
        &mut self,
        suit: &Suit,
        from: Position,
        to: Position,
        interactions: &mut InteractionRegistry,
    ) {
        self.inner_mut().move_update(suit, from, to, interactions)
    }

    fn tick(&mut self, own: Position, moved: Position) {
        self.inner_mut().tick(own, moved)
    }
}
