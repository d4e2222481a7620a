// SPDX-License-Identifier: MIT OR Apache-2.0

//! Piece state and the trajectory calculation protocol
//!
//! A [`Piece`] holds what every kind shares: identity, position, suit, move
//! counter and the two reachable-tile sets. Kind-specific logic lives in
//! [`crate::pieces::Behavior`]. Pieces never hold a reference to their board;
//! everything a behavior needs is passed in through a context.

use crate::board::Board;
use crate::config::BoardConfig;
use crate::interaction::InteractionRegistry;
use crate::pieces::{Behavior, PieceBehavior};
use crate::position::{Position, Step};
use crate::{BoardError, Suit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Set of tiles, ordered for deterministic iteration
pub type PosList = BTreeSet<Position>;

/// Stable identity of a piece for the lifetime of its board
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PieceId(pub(crate) u32);

impl PieceId {
    pub(crate) const UNASSIGNED: PieceId = PieceId(u32::MAX);

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The closed set of piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// Tag used by the factory and the texture table
    pub fn tag(&self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Rook => "rook",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    /// Single-letter symbol in algebraic notation (`P` for pawns)
    pub fn symbol(&self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A piece on the board
#[derive(Debug, Clone)]
pub struct Piece {
    id: PieceId,
    pos: Position,
    suit: Suit,
    moves: usize,
    trajectory: PosList,
    captures: PosList,
    behavior: Behavior,
}

impl Piece {
    /// Create a piece that has not been placed on a board yet. The board
    /// assigns its id when it adopts the piece.
    pub fn new(pos: Position, suit: Suit, behavior: Behavior) -> Self {
        Self {
            id: PieceId::UNASSIGNED,
            pos,
            suit,
            moves: 0,
            trajectory: PosList::new(),
            captures: PosList::new(),
            behavior,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn suit(&self) -> &Suit {
        &self.suit
    }

    /// Number of moves this piece has made
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Tiles reachable without capturing
    pub fn trajectory(&self) -> &PosList {
        &self.trajectory
    }

    /// Tiles reachable by capturing
    pub fn captures(&self) -> &PosList {
        &self.captures
    }

    pub fn kind(&self) -> PieceKind {
        self.behavior.kind()
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// Tile an opposing pawn may capture this piece on by en passant
    pub fn en_passant_tile(&self) -> Option<Position> {
        match &self.behavior {
            Behavior::Pawn(pawn) => pawn.en_passant_tile(),
            _ => None,
        }
    }

    /// Texture path configured for this piece's kind and suit
    pub fn texture<'c>(&self, config: &'c BoardConfig) -> Result<&'c str, BoardError> {
        config
            .texture(self.kind().tag(), &self.suit)
            .ok_or_else(|| BoardError::MissingTexture {
                kind: self.kind().tag().to_string(),
                suit: self.suit.clone(),
            })
    }

    pub(crate) fn assign_id(&mut self, id: PieceId) {
        self.id = id;
    }

    pub(crate) fn behavior_mut(&mut self) -> &mut Behavior {
        &mut self.behavior
    }

    /// Record a relocation: position first, then the kind's reaction, then
    /// the counter. The caller recomputes the trajectory afterwards.
    pub(crate) fn relocate(&mut self, to: Position, interactions: &mut InteractionRegistry) {
        let from = std::mem::replace(&mut self.pos, to);
        self.behavior.move_update(&self.suit, from, to, interactions);
        self.moves += 1;
    }

    pub(crate) fn store(&mut self, computed: Computed) -> PosList {
        self.trajectory = computed.trajectory;
        self.captures = computed.captures;
        computed.capturable
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} at {} having made {} moves",
            self.suit,
            self.kind(),
            self.id,
            self.pos,
            self.moves
        )
    }
}

/// Output of one trajectory calculation
#[derive(Debug, Default)]
pub(crate) struct Computed {
    pub trajectory: PosList,
    pub captures: PosList,
    pub capturable: PosList,
}

/// What a behavior sees and writes while calculating its trajectory
pub struct TrajectoryContext<'a> {
    board: &'a Board,
    piece: &'a Piece,
    out: Computed,
}

impl<'a> TrajectoryContext<'a> {
    pub(crate) fn new(board: &'a Board, piece: &'a Piece) -> Self {
        Self {
            board,
            piece,
            out: Computed::default(),
        }
    }

    pub fn board(&self) -> &'a Board {
        self.board
    }

    pub fn position(&self) -> Position {
        self.piece.pos
    }

    pub fn suit(&self) -> &'a Suit {
        &self.piece.suit
    }

    pub fn moves(&self) -> usize {
        self.piece.moves
    }

    /// Add a tile reachable without capturing; off-board tiles are dropped
    pub fn add_trajectory(&mut self, tile: Position) {
        if self.board.valid(tile) {
            self.out.trajectory.insert(tile);
        }
    }

    pub fn remove_trajectory(&mut self, tile: Position) {
        self.out.trajectory.remove(&tile);
    }

    /// Add a tile reachable by capturing; off-board tiles are dropped
    pub fn add_capturing(&mut self, tile: Position) {
        if self.board.valid(tile) {
            self.out.captures.insert(tile);
        }
    }

    pub fn remove_capturing(&mut self, tile: Position) {
        self.out.captures.remove(&tile);
    }

    /// Make this piece capturable from `tile`; off-board tiles are dropped
    pub fn add_capturable(&mut self, tile: Position) {
        if self.board.valid(tile) {
            self.out.capturable.insert(tile);
        }
    }

    /// Withdraw a capture-index entry of this piece, including the default
    /// one on its own tile
    pub fn remove_capturable(&mut self, tile: Position) {
        self.out.capturable.remove(&tile);
    }

    /// Whether `tile` holds a piece of another suit
    pub fn is_opponent(&self, tile: Position) -> bool {
        self.board
            .at(tile)
            .is_some_and(|other| other.suit() != self.suit())
    }

    /// Walk from the piece along `step` until the edge or the first
    /// occupant. Empty tiles are trajectory; an opposing occupant is a
    /// capture.
    pub fn slide(&mut self, step: Step) {
        let mut tile = self.position() + step;
        while self.board.valid(tile) {
            if self.board.at(tile).is_some() {
                if self.is_opponent(tile) {
                    self.add_capturing(tile);
                }
                return;
            }
            self.add_trajectory(tile);
            tile = tile + step;
        }
    }

    /// Single jump to `position + step` with the same occupancy rule as
    /// [`slide`](Self::slide)
    pub fn leap(&mut self, step: Step) {
        let tile = self.position() + step;
        match self.board.at(tile) {
            None => self.add_trajectory(tile),
            Some(_) if self.is_opponent(tile) => self.add_capturing(tile),
            Some(_) => {}
        }
    }

    pub(crate) fn finish(self) -> Computed {
        self.out
    }
}
