// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pieces that slide along rays until blocked

use super::PieceBehavior;
use crate::board::Board;
use crate::interaction::InteractionRegistry;
use crate::piece::{PieceKind, TrajectoryContext};
use crate::position::{Position, Step};
use crate::Suit;

/// Slides orthogonally; takes part in castling
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rook;

impl Rook {
    /// Create a rook standing on `pos` and register its castling right
    pub fn new(board: &mut Board, pos: Position, suit: &Suit) -> Self {
        board.castling().enlist(pos, suit.clone());
        Rook
    }
}

impl PieceBehavior for Rook {
    fn kind(&self) -> PieceKind {
        PieceKind::Rook
    }

    fn calc_trajectory(&self, cx: &mut TrajectoryContext<'_>) {
        for step in Step::ORTHOGONAL {
            cx.slide(step);
        }
    }

    fn move_update(
        &mut self,
        _suit: &Suit,
        from: Position,
        _to: Position,
        interactions: &mut InteractionRegistry,
    ) {
        interactions.castling().revoke(from);
    }
}

/// Slides diagonally
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bishop;

impl PieceBehavior for Bishop {
    fn kind(&self) -> PieceKind {
        PieceKind::Bishop
    }

    fn calc_trajectory(&self, cx: &mut TrajectoryContext<'_>) {
        for step in Step::DIAGONAL {
            cx.slide(step);
        }
    }
}

/// Slides in all eight directions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queen;

impl PieceBehavior for Queen {
    fn kind(&self) -> PieceKind {
        PieceKind::Queen
    }

    fn calc_trajectory(&self, cx: &mut TrajectoryContext<'_>) {
        for step in Step::ALL {
            cx.slide(step);
        }
    }
}
