// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board coordinates, extents and step offsets

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A tile on the board. Rows grow southward, so `y = 0` is the top row.
///
/// Coordinates are signed so that a trajectory calculation can step off the
/// board and have the candidate discarded by the bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Position {
    /// The top-left tile
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    /// Create a new position
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Check whether this position lies in the rectangle starting at
    /// `origin` and spanning `extent`
    pub fn within(&self, origin: Position, extent: Extent) -> bool {
        let dx = i64::from(self.x) - i64::from(origin.x);
        let dy = i64::from(self.y) - i64::from(origin.y);
        dx >= 0 && dy >= 0 && dx < i64::from(extent.width) && dy < i64::from(extent.height)
    }

    /// Offset from `other` to `self`
    pub fn offset_from(&self, other: Position) -> Step {
        Step::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add<Step> for Position {
    type Output = Position;

    /// Saturates at the coordinate limits, which are never on a board
    fn add(self, rhs: Step) -> Position {
        Position::new(self.x.saturating_add(rhs.dx), self.y.saturating_add(rhs.dy))
    }
}

impl Sub<Step> for Position {
    type Output = Position;

    fn sub(self, rhs: Step) -> Position {
        Position::new(self.x.saturating_sub(rhs.dx), self.y.saturating_sub(rhs.dy))
    }
}

/// Size of a rectangular board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of tiles covered
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// A relative move between two tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub dx: i32,
    pub dy: i32,
}

impl Step {
    pub const NORTH: Step = Step::new(0, -1);
    pub const SOUTH: Step = Step::new(0, 1);
    pub const EAST: Step = Step::new(1, 0);
    pub const WEST: Step = Step::new(-1, 0);
    pub const NORTH_EAST: Step = Step::new(1, -1);
    pub const NORTH_WEST: Step = Step::new(-1, -1);
    pub const SOUTH_EAST: Step = Step::new(1, 1);
    pub const SOUTH_WEST: Step = Step::new(-1, 1);

    /// Rook rays
    pub const ORTHOGONAL: [Step; 4] = [Step::NORTH, Step::EAST, Step::SOUTH, Step::WEST];

    /// Bishop rays
    pub const DIAGONAL: [Step; 4] = [
        Step::NORTH_EAST,
        Step::SOUTH_EAST,
        Step::SOUTH_WEST,
        Step::NORTH_WEST,
    ];

    /// Queen rays and king steps
    pub const ALL: [Step; 8] = [
        Step::NORTH,
        Step::NORTH_EAST,
        Step::EAST,
        Step::SOUTH_EAST,
        Step::SOUTH,
        Step::SOUTH_WEST,
        Step::WEST,
        Step::NORTH_WEST,
    ];

    /// Knight jumps
    pub const KNIGHT: [Step; 8] = [
        Step::new(1, -2),
        Step::new(2, -1),
        Step::new(2, 1),
        Step::new(1, 2),
        Step::new(-1, 2),
        Step::new(-2, 1),
        Step::new(-2, -1),
        Step::new(-1, -2),
    ];

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Multiply both components by `n`
    pub const fn times(self, n: i32) -> Self {
        Self::new(self.dx * n, self.dy * n)
    }

    /// Rotate a quarter turn; applied twice this gives the opposite step
    pub const fn perpendicular(self) -> Self {
        Self::new(-self.dy, self.dx)
    }
}

/// Direction a suit's pawns advance in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    #[default]
    North,
    East,
    South,
    West,
}

impl Facing {
    /// The single forward step for this facing
    pub fn step(self) -> Step {
        match self {
            Facing::North => Step::NORTH,
            Facing::East => Step::EAST,
            Facing::South => Step::SOUTH,
            Facing::West => Step::WEST,
        }
    }
}
