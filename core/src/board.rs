// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and manipulation
//!
//! The board owns every piece (keyed by the tile it stands on), the capture
//! index derived from the pieces' trajectories, and the interaction
//! registry. All state changes go through [`Board::move_piece`] and
//! [`Board::capture`]; both either reject without touching anything or apply
//! the whole move, follow-ups and tick broadcast included.

use crate::config::{BoardConfig, LayoutSlot};
use crate::factory::PieceFactory;
use crate::interaction::{Castling, Interaction, InteractionKind, InteractionRegistry};
use crate::piece::{Computed, Piece, PieceId, PosList, TrajectoryContext};
use crate::pieces::PieceBehavior;
use crate::position::{Extent, Position};
use crate::res::{ResourceCache, Texture};
use crate::{BoardError, Suit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One row of the capture index: `piece` can be captured by moving onto
/// `tile`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CaptureEntry {
    pub piece: PieceId,
    pub tile: Position,
}

impl CaptureEntry {
    pub fn new(piece: PieceId, tile: Position) -> Self {
        Self { piece, tile }
    }
}

/// Represents a game board with its pieces
#[derive(Debug, Clone)]
pub struct Board {
    config: BoardConfig,
    /// Occupancy, at most one piece per tile
    pieces: BTreeMap<Position, Piece>,
    /// Tile of each live piece, kept in step with `pieces`
    locations: BTreeMap<PieceId, Position>,
    /// Tiles each live piece is capturable from
    captures: BTreeMap<PieceId, PosList>,
    interactions: InteractionRegistry,
    next_id: u32,
}

impl Board {
    /// Build a board from a configuration, constructing every piece of the
    /// initial layout through `factory`.
    ///
    /// Pieces are constructed in position order. Trajectories are only
    /// computed once every piece is on the board, since some kinds look at
    /// their siblings.
    pub fn new(config: BoardConfig, factory: &PieceFactory) -> Result<Self, BoardError> {
        let extent = config.board;
        // Every tile must be addressable with i32 coordinates
        let addressable =
            i32::try_from(extent.width).is_ok() && i32::try_from(extent.height).is_ok();
        if extent.area() == 0 || !addressable {
            return Err(BoardError::InvalidExtent(extent));
        }

        let mut layout = config.layout.clone();
        layout.sort_by_key(LayoutSlot::position);
        let mut board = Self {
            config,
            pieces: BTreeMap::new(),
            locations: BTreeMap::new(),
            captures: BTreeMap::new(),
            interactions: InteractionRegistry::new(extent),
            next_id: 0,
        };

        for slot in &layout {
            let pos = slot.position();
            if !board.valid(pos) {
                return Err(BoardError::OutOfBounds(pos));
            }
            if board.pieces.contains_key(&pos) {
                return Err(BoardError::DuplicatePosition(pos));
            }
            let piece = factory.construct(&slot.kind, &mut board, pos, slot.suit.clone())?;
            if piece.position() != pos {
                return Err(BoardError::MisplacedPiece {
                    slot: pos,
                    actual: piece.position(),
                });
            }
            board.adopt(pos, piece);
        }

        board.refresh();
        info!(
            width = extent.width,
            height = extent.height,
            pieces = board.pieces.len(),
            "Board ready"
        );
        Ok(board)
    }

    /// Check if a position is a tile on this board
    pub fn valid(&self, pos: Position) -> bool {
        pos.within(Position::ORIGIN, self.config.board)
    }

    pub fn extent(&self) -> Extent {
        self.config.board
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// The piece on `pos`, if any
    pub fn at(&self, pos: Position) -> Option<&Piece> {
        self.pieces.get(&pos)
    }

    /// All live pieces in position order
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.values()
    }

    /// Number of live pieces
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Where the piece with `id` currently stands
    pub fn position_of(&self, id: PieceId) -> Option<Position> {
        self.locations.get(&id).copied()
    }

    /// Every row of the capture index
    pub fn capture_index(&self) -> impl Iterator<Item = CaptureEntry> + '_ {
        self.captures
            .iter()
            .flat_map(|(id, tiles)| tiles.iter().map(move |tile| CaptureEntry::new(*id, *tile)))
    }

    /// Tiles the piece with `id` is capturable from
    pub fn capturable_tiles(&self, id: PieceId) -> Option<&PosList> {
        self.captures.get(&id)
    }

    /// Capture-index rows naming `tile`
    pub fn capturable_at(&self, tile: Position) -> Vec<CaptureEntry> {
        self.capture_index().filter(|entry| entry.tile == tile).collect()
    }

    /// Captures the piece on `source` may currently make
    pub fn captures_for(&self, source: Position) -> Vec<CaptureEntry> {
        let Some(piece) = self.at(source) else {
            return Vec::new();
        };
        self.capture_index()
            .filter(|entry| piece.captures().contains(&entry.tile))
            .filter(|entry| {
                self.position_of(entry.piece)
                    .and_then(|pos| self.at(pos))
                    .is_some_and(|victim| victim.suit() != piece.suit())
            })
            .collect()
    }

    /// Live pieces of `suit`
    pub fn pieces_of<'a>(&'a self, suit: &'a Suit) -> impl Iterator<Item = &'a Piece> + 'a {
        self.pieces().filter(move |piece| piece.suit() == suit)
    }

    /// The single instance of an interaction kind, created on first request
    pub fn interaction(&mut self, kind: InteractionKind) -> &mut Interaction {
        self.interactions.get(kind)
    }

    pub fn interactions(&self) -> &InteractionRegistry {
        &self.interactions
    }

    /// The castling coordinator, created on first request
    pub fn castling(&mut self) -> &mut Castling {
        self.interactions.castling()
    }

    /// The castling coordinator if something has requested it
    pub fn find_castling(&self) -> Option<&Castling> {
        self.interactions
            .find(InteractionKind::Castling)
            .and_then(Interaction::as_castling)
    }

    /// Load the texture of the piece on `pos` through `cache`
    pub fn texture(
        &self,
        pos: Position,
        cache: &ResourceCache,
    ) -> Result<Arc<Texture>, BoardError> {
        let piece = self.at(pos).ok_or(BoardError::EmptyTile(pos))?;
        let path = piece.texture(&self.config)?;
        cache.get::<Texture>(&[path])
    }

    /// Move the piece on `source` to `target` without capturing.
    ///
    /// Returns `false`, leaving the board untouched, unless `source` holds a
    /// piece whose trajectory contains `target`.
    pub fn move_piece(&mut self, source: Position, target: Position) -> bool {
        let Some(piece) = self.pieces.get(&source) else {
            debug!(%source, "Move rejected: no piece on source");
            return false;
        };
        if !piece.trajectory().contains(&target) {
            debug!(%source, %target, "Move rejected: target not in trajectory");
            return false;
        }

        debug!(piece = %piece, %target, "Moving");
        self.relocate(source, target);
        self.complete(target);
        true
    }

    /// Capture with the piece on `source` as described by `entry`.
    ///
    /// Returns `false`, leaving the board untouched, unless `source` holds a
    /// piece whose capture set contains `entry.tile` and `entry` names a
    /// live piece of another suit that is capturable from that tile.
    pub fn capture(&mut self, source: Position, entry: CaptureEntry) -> bool {
        let Some(capturer) = self.pieces.get(&source) else {
            debug!(%source, "Capture rejected: no piece on source");
            return false;
        };
        if !capturer.captures().contains(&entry.tile) {
            debug!(%source, tile = %entry.tile, "Capture rejected: tile not in capture set");
            return false;
        }
        if !self
            .captures
            .get(&entry.piece)
            .is_some_and(|tiles| tiles.contains(&entry.tile))
        {
            debug!(
                victim = %entry.piece,
                tile = %entry.tile,
                "Capture rejected: no such capture entry"
            );
            return false;
        }
        let Some(victim_pos) = self.position_of(entry.piece) else {
            return false;
        };
        if self.pieces.get(&victim_pos).map(Piece::suit) == Some(capturer.suit()) {
            debug!(%source, victim = %entry.piece, "Capture rejected: same suit");
            return false;
        }
        if self
            .pieces
            .get(&entry.tile)
            .is_some_and(|occupant| occupant.id() != entry.piece)
        {
            debug!(tile = %entry.tile, "Capture rejected: landing tile held by another piece");
            return false;
        }

        if let Some(victim) = self.pieces.remove(&victim_pos) {
            info!(capturer = %source, victim = %victim, "Capturing");
        }
        self.locations.remove(&entry.piece);
        self.captures.remove(&entry.piece);
        self.interactions.piece_removed(victim_pos);

        self.relocate(source, entry.tile);
        self.complete(entry.tile);
        true
    }

    /// Broadcast that a piece landed on `moved`: every live piece gets its
    /// tick, then every trajectory is recomputed, both in position order.
    pub fn update(&mut self, moved: Position) {
        for (pos, piece) in self.pieces.iter_mut() {
            piece.behavior_mut().tick(*pos, moved);
        }
        self.refresh();
    }

    /// Recompute the trajectory and capture sets of the piece on `pos` and
    /// rebuild its capture-index entries. Returns `false` for an empty tile.
    pub fn recompute_trajectory(&mut self, pos: Position) -> bool {
        let Some(piece) = self.pieces.get(&pos) else {
            return false;
        };
        let id = piece.id();

        let mut cx = TrajectoryContext::new(self, piece);
        cx.add_capturable(pos);
        piece.behavior().calc_trajectory(&mut cx);
        let computed = cx.finish();
        self.store(pos, id, computed);
        true
    }

    /// Write a calculation result back into the piece and the capture index
    fn store(&mut self, pos: Position, id: PieceId, computed: Computed) {
        let Some(piece) = self.pieces.get_mut(&pos) else {
            return;
        };
        let capturable = piece.store(computed);
        if capturable.is_empty() {
            self.captures.remove(&id);
        } else {
            self.captures.insert(id, capturable);
        }
    }

    /// Recompute every piece in position order
    fn refresh(&mut self) {
        let tiles: Vec<Position> = self.pieces.keys().copied().collect();
        for pos in tiles {
            self.recompute_trajectory(pos);
        }
    }

    fn adopt(&mut self, pos: Position, mut piece: Piece) {
        piece.assign_id(PieceId(self.next_id));
        self.next_id += 1;
        self.locations.insert(piece.id(), pos);
        self.pieces.insert(pos, piece);
    }

    /// Hand the piece on `source` over to `target`, then apply the move to it
    fn relocate(&mut self, source: Position, target: Position) {
        if let Some(piece) = self.pieces.remove(&source) {
            self.locations.insert(piece.id(), target);
            self.pieces.insert(target, piece);
            self.apply_move(target);
        }
    }

    /// Update the piece's own position, let it react, count the move and
    /// recompute its trajectory, in that order
    fn apply_move(&mut self, to: Position) {
        if let Some(piece) = self.pieces.get_mut(&to) {
            piece.relocate(to, &mut self.interactions);
        }
        self.recompute_trajectory(to);
    }

    /// Run queued interaction follow-ups, then broadcast the move
    fn complete(&mut self, moved: Position) {
        loop {
            let follow_ups = self.interactions.drain_follow_ups();
            if follow_ups.is_empty() {
                break;
            }
            for follow_up in follow_ups {
                let stale = !self.pieces.contains_key(&follow_up.from)
                    || self.pieces.contains_key(&follow_up.to);
                if stale {
                    warn!(
                        from = %follow_up.from,
                        to = %follow_up.to,
                        "Dropping follow-up that no longer applies"
                    );
                    continue;
                }
                self.relocate(follow_up.from, follow_up.to);
            }
        }
        self.update(moved);
    }

}
