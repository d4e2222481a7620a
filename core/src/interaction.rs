// SPDX-License-Identifier: MIT OR Apache-2.0

//! Coordinators for rules that span more than one piece
//!
//! A single piece cannot express a move like castling on its own: the king
//! needs to know about the rook, and the rook has to be moved as part of the
//! king's move. Interactions are the shared place where such state lives.
//! The board owns exactly one instance per [`InteractionKind`], created the
//! first time it is requested.

use crate::position::{Extent, Position};
use crate::Suit;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every kind of interaction the board knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InteractionKind {
    Castling,
}

/// A relocation requested by an interaction to complete a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowUp {
    pub from: Position,
    pub to: Position,
}

/// A live interaction instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    Castling(Castling),
}

impl Interaction {
    fn new(kind: InteractionKind, extent: Extent) -> Self {
        match kind {
            InteractionKind::Castling => Interaction::Castling(Castling::new(extent)),
        }
    }

    pub fn kind(&self) -> InteractionKind {
        match self {
            Interaction::Castling(_) => InteractionKind::Castling,
        }
    }

    pub fn as_castling(&self) -> Option<&Castling> {
        match self {
            Interaction::Castling(castling) => Some(castling),
        }
    }

    /// Relocations queued since the last call
    fn take_follow_ups(&mut self) -> Vec<FollowUp> {
        match self {
            Interaction::Castling(castling) => std::mem::take(&mut castling.pending),
        }
    }

    /// Notification that the piece on `pos` was captured
    fn piece_removed(&mut self, pos: Position) {
        match self {
            Interaction::Castling(castling) => castling.revoke(pos),
        }
    }
}

/// Board-owned table of interactions, one per kind
#[derive(Debug, Clone)]
pub struct InteractionRegistry {
    extent: Extent,
    interactions: BTreeMap<InteractionKind, Interaction>,
}

impl InteractionRegistry {
    pub fn new(extent: Extent) -> Self {
        Self {
            extent,
            interactions: BTreeMap::new(),
        }
    }

    /// The single instance of `kind`, created on first request
    pub fn get(&mut self, kind: InteractionKind) -> &mut Interaction {
        let extent = self.extent;
        self.interactions.entry(kind).or_insert_with(|| {
            tracing::debug!(?kind, "Creating interaction");
            Interaction::new(kind, extent)
        })
    }

    /// The instance of `kind` if it has been created
    pub fn find(&self, kind: InteractionKind) -> Option<&Interaction> {
        self.interactions.get(&kind)
    }

    /// Typed access to the castling coordinator, created on first request
    pub fn castling(&mut self) -> &mut Castling {
        match self.get(InteractionKind::Castling) {
            Interaction::Castling(castling) => castling,
        }
    }

    /// Number of live interactions
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    pub(crate) fn drain_follow_ups(&mut self) -> Vec<FollowUp> {
        self.interactions
            .values_mut()
            .flat_map(Interaction::take_follow_ups)
            .collect()
    }

    pub(crate) fn piece_removed(&mut self, pos: Position) {
        for interaction in self.interactions.values_mut() {
            interaction.piece_removed(pos);
        }
    }
}

/// Castling rights and the rook half of a castling move
///
/// Rooks enlist their starting tile. A right is revoked when the rook moves,
/// when it is captured, or when its king moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Castling {
    extent: Extent,
    rights: BTreeMap<Position, Suit>,
    pending: Vec<FollowUp>,
}

impl Castling {
    fn new(extent: Extent) -> Self {
        Self {
            extent,
            rights: BTreeMap::new(),
            pending: Vec::new(),
        }
    }

    /// Register an unmoved rook of `suit` on `rook`
    pub fn enlist(&mut self, rook: Position, suit: Suit) {
        if rook.within(Position::ORIGIN, self.extent) {
            self.rights.insert(rook, suit);
        }
    }

    /// Drop the right attached to `rook`, if any
    pub fn revoke(&mut self, rook: Position) {
        self.rights.remove(&rook);
    }

    /// Drop every right of `suit`
    pub fn revoke_suit(&mut self, suit: &Suit) {
        self.rights.retain(|_, owner| owner != suit);
    }

    pub fn has_right(&self, rook: Position, suit: &Suit) -> bool {
        self.rights.get(&rook) == Some(suit)
    }

    /// Rook tiles still eligible for `suit`
    pub fn rights(&self, suit: &Suit) -> impl Iterator<Item = Position> + '_ {
        let suit = suit.clone();
        self.rights
            .iter()
            .filter(move |(_, owner)| **owner == suit)
            .map(|(pos, _)| *pos)
    }

    /// React to a king move. A two-tile horizontal move is a castle: the
    /// nearest eligible rook beyond the king is queued to the crossed tile.
    pub fn king_moved(&mut self, suit: &Suit, from: Position, to: Position) {
        let step = to.offset_from(from);
        if step.dy == 0 && step.dx.abs() == 2 {
            let dir = step.dx.signum();
            let rook = self
                .rights(suit)
                .filter(|rook| rook.y == from.y && (rook.x - from.x).signum() == dir)
                .min_by_key(|rook| (rook.x - from.x).abs());
            if let Some(rook) = rook {
                let crossed = Position::new(from.x + dir, from.y);
                tracing::debug!(%suit, %rook, %crossed, "Castling");
                self.pending.push(FollowUp { from: rook, to: crossed });
            }
        }
        self.revoke_suit(suit);
    }
}
