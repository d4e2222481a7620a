// SPDX-License-Identifier: MIT OR Apache-2.0

use super::PieceBehavior;
use crate::piece::{PieceKind, TrajectoryContext};
use crate::position::Step;

/// Jumps in an L shape, ignoring anything in between
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Knight;

impl PieceBehavior for Knight {
    fn kind(&self) -> PieceKind {
        PieceKind::Knight
    }

    fn calc_trajectory(&self, cx: &mut TrajectoryContext<'_>) {
        for step in Step::KNIGHT {
            cx.leap(step);
        }
    }
}
