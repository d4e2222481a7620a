// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tile and move notation.
//!
//! A tile is a column letter followed by a 1-based row number, so `a1` is
//! the top-left tile `(0, 0)`. A move joins two tiles (`e7e5`); a capture
//! puts an `x` between them (`d1xh5`).

use anyhow::{anyhow, bail, Result};
use gambit_core::Position;

/// A move as typed by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ply {
    Move { from: Position, to: Position },
    Capture { from: Position, to: Position },
}

/// Parse a tile such as `e7`
pub fn parse_tile(input: &str) -> Result<Position> {
    let input = input.trim().to_lowercase();
    let mut chars = input.chars();
    let col = chars
        .next()
        .filter(char::is_ascii_lowercase)
        .ok_or_else(|| anyhow!("Invalid tile '{input}': expected a column letter"))?;
    let row: i32 = chars
        .as_str()
        .parse()
        .map_err(|_| anyhow!("Invalid tile '{input}': expected a row number"))?;
    if row < 1 {
        bail!("Invalid tile '{input}': rows start at 1");
    }
    Ok(Position::new(col as i32 - 'a' as i32, row - 1))
}

/// Format a position the way [`parse_tile`] reads it
pub fn format_tile(pos: Position) -> String {
    match u8::try_from(pos.x).ok().filter(|x| *x < 26) {
        Some(x) if pos.y >= 0 => format!("{}{}", (b'a' + x) as char, pos.y + 1),
        _ => pos.to_string(),
    }
}

/// Parse a move (`e7e5`) or capture (`d1xh5`)
pub fn parse_ply(input: &str) -> Result<Ply> {
    let input = input.trim().to_lowercase();
    if let Some((from, to)) = input.split_once('x') {
        return Ok(Ply::Capture {
            from: parse_tile(from)?,
            to: parse_tile(to)?,
        });
    }

    // Second tile starts at the second letter
    let split = input
        .char_indices()
        .skip(1)
        .find(|(_, c)| c.is_ascii_alphabetic())
        .map(|(i, _)| i)
        .ok_or_else(|| anyhow!("Invalid move '{input}'. Examples: 'e7e5', 'd1xh5'"))?;
    let (from, to) = input.split_at(split);
    Ok(Ply::Move {
        from: parse_tile(from)?,
        to: parse_tile(to)?,
    })
}
