// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board configuration: extents, initial layout, textures and pawn facings
//!
//! Configurations are stored as JSON:
//!
//! ```json
//! {
//!   "board": { "width": 8, "height": 8 },
//!   "layout": [ { "x": 0, "y": 0, "kind": "rook", "suit": "black" } ],
//!   "textures": { "black": { "rook": "pieces/black/rook.png" } },
//!   "facing": { "black": "south" }
//! }
//! ```

use crate::position::{Extent, Facing, Position};
use crate::{BoardError, Suit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One initial piece placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSlot {
    pub x: i32,
    pub y: i32,
    /// Factory tag, e.g. `"rook"`
    pub kind: String,
    pub suit: Suit,
}

impl LayoutSlot {
    pub fn new(x: i32, y: i32, kind: &str, suit: Suit) -> Self {
        Self {
            x,
            y,
            kind: kind.to_string(),
            suit,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Complete configuration for one board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Board extent
    pub board: Extent,
    /// Initial piece placements
    pub layout: Vec<LayoutSlot>,
    /// Texture path per suit, then per piece kind tag
    #[serde(default)]
    pub textures: BTreeMap<Suit, BTreeMap<String, String>>,
    /// Pawn advance direction per suit
    #[serde(default)]
    pub facing: BTreeMap<Suit, Facing>,
}

impl BoardConfig {
    /// An empty board of the given size
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            board: Extent::new(width, height),
            layout: Vec::new(),
            textures: BTreeMap::new(),
            facing: BTreeMap::new(),
        }
    }

    /// Add a piece to the initial layout
    pub fn with_piece(mut self, x: i32, y: i32, kind: &str, suit: impl Into<Suit>) -> Self {
        self.layout.push(LayoutSlot::new(x, y, kind, suit.into()));
        self
    }

    /// Set the pawn facing of a suit
    pub fn with_facing(mut self, suit: impl Into<Suit>, facing: Facing) -> Self {
        self.facing.insert(suit.into(), facing);
        self
    }

    /// The classic 8x8 setup: black on rows 0-1 facing south, white on rows
    /// 6-7 facing north
    pub fn standard() -> Self {
        const BACK_RANK: [&str; 8] = [
            "rook", "knight", "bishop", "queen", "king", "bishop", "knight", "rook",
        ];

        let mut config = Self::empty(8, 8)
            .with_facing(Suit::black(), Facing::South)
            .with_facing(Suit::white(), Facing::North);

        for (x, kind) in (0..).zip(BACK_RANK) {
            config = config
                .with_piece(x, 0, kind, Suit::black())
                .with_piece(x, 1, "pawn", Suit::black())
                .with_piece(x, 6, "pawn", Suit::white())
                .with_piece(x, 7, kind, Suit::white());
        }

        for suit in [Suit::black(), Suit::white()] {
            let table = ["pawn", "rook", "knight", "bishop", "queen", "king"]
                .into_iter()
                .map(|kind| (kind.to_string(), format!("pieces/{}/{}.png", suit, kind)))
                .collect();
            config.textures.insert(suit, table);
        }

        config
    }

    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, BoardError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), BoardError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn board_width(&self) -> u32 {
        self.board.width
    }

    pub fn board_height(&self) -> u32 {
        self.board.height
    }

    pub fn initial_layout(&self) -> &[LayoutSlot] {
        &self.layout
    }

    /// Texture path configured for a piece kind tag of a suit
    pub fn texture(&self, kind: &str, suit: &Suit) -> Option<&str> {
        self.textures
            .get(suit)
            .and_then(|table| table.get(kind))
            .map(String::as_str)
    }

    /// Pawn facing of a suit; north when unset
    pub fn facing(&self, suit: &Suit) -> Facing {
        self.facing.get(suit).copied().unwrap_or_default()
    }
}
