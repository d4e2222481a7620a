// SPDX-License-Identifier: MIT OR Apache-2.0

use super::PieceBehavior;
use crate::board::Board;
use crate::interaction::InteractionRegistry;
use crate::piece::{PieceKind, TrajectoryContext};
use crate::position::{Position, Step};
use crate::Suit;

/// Steps one tile in any direction; castles with an unmoved rook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct King;

impl King {
    pub fn new(board: &mut Board) -> Self {
        // The castling coordinator must exist before the first trajectory pass
        board.castling();
        King
    }

    fn castling_targets(cx: &mut TrajectoryContext<'_>) {
        let board = cx.board();
        let Some(castling) = board.find_castling() else {
            return;
        };
        let origin = cx.position();

        for step in [Step::EAST, Step::WEST] {
            let mut tile = origin + step;
            let mut distance = 1;
            while board.valid(tile) && board.at(tile).is_none() {
                tile = tile + step;
                distance += 1;
            }

            let Some(rook) = board.at(tile) else {
                continue;
            };
            if distance >= 3
                && rook.kind() == PieceKind::Rook
                && rook.suit() == cx.suit()
                && rook.moves() == 0
                && castling.has_right(tile, cx.suit())
            {
                cx.add_trajectory(origin + step.times(2));
            }
        }
    }
}

impl PieceBehavior for King {
    fn kind(&self) -> PieceKind {
        PieceKind::King
    }

    fn calc_trajectory(&self, cx: &mut TrajectoryContext<'_>) {
        for step in Step::ALL {
            cx.leap(step);
        }
        if cx.moves() == 0 {
            Self::castling_targets(cx);
        }
    }

    fn move_update(
        &mut self,
        suit: &Suit,
        from: Position,
        to: Position,
        interactions: &mut InteractionRegistry,
    ) {
        interactions.castling().king_moved(suit, from, to);
    }
}
