// SPDX-License-Identifier: MIT OR Apache-2.0

use super::PieceBehavior;
use crate::board::Board;
use crate::interaction::InteractionRegistry;
use crate::piece::{PieceKind, TrajectoryContext};
use crate::position::{Facing, Position};
use crate::Suit;

/// Advances toward its facing, captures on the forward diagonals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pawn {
    facing: Facing,
    /// Tile skipped by the last double step, capturable until the next move
    en_passant: Option<Position>,
}

impl Pawn {
    /// Create a pawn facing the direction configured for its suit
    pub fn new(board: &Board, suit: &Suit) -> Self {
        Self::facing(board.config().facing(suit))
    }

    pub fn facing(facing: Facing) -> Self {
        Self {
            facing,
            en_passant: None,
        }
    }

    pub fn en_passant_tile(&self) -> Option<Position> {
        self.en_passant
    }
}

impl PieceBehavior for Pawn {
    fn kind(&self) -> PieceKind {
        PieceKind::Pawn
    }

    fn calc_trajectory(&self, cx: &mut TrajectoryContext<'_>) {
        let board = cx.board();
        let forward = self.facing.step();
        let one = cx.position() + forward;

        if board.valid(one) && board.at(one).is_none() {
            cx.add_trajectory(one);
            let two = one + forward;
            if cx.moves() == 0 && board.valid(two) && board.at(two).is_none() {
                cx.add_trajectory(two);
            }
        }

        let side = forward.perpendicular();
        for tile in [one + side, one - side] {
            let en_passant = board
                .pieces()
                .any(|other| other.suit() != cx.suit() && other.en_passant_tile() == Some(tile));
            if en_passant || cx.is_opponent(tile) {
                cx.add_capturing(tile);
            }
        }

        if let Some(skipped) = self.en_passant {
            cx.add_capturable(skipped);
        }
    }

    fn move_update(
        &mut self,
        _suit: &Suit,
        from: Position,
        to: Position,
        _interactions: &mut InteractionRegistry,
    ) {
        let forward = self.facing.step();
        self.en_passant = (to == from + forward.times(2)).then(|| from + forward);
    }

    fn tick(&mut self, own: Position, moved: Position) {
        if moved != own {
            self.en_passant = None;
        }
    }
}
