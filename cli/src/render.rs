// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board rendering for the CLI.

use gambit_core::{Board, Piece, PosList, Position};

/// Render the board as ASCII art, row 1 at the top
pub fn render_board(board: &Board) -> String {
    render_with_marks(board, &PosList::new())
}

/// Render the board, drawing `*` on empty tiles in `marks`
pub fn render_with_marks(board: &Board, marks: &PosList) -> String {
    let extent = board.extent();
    let rows = i32::try_from(extent.height).unwrap_or(i32::MAX);
    let cols = i32::try_from(extent.width).unwrap_or(i32::MAX);
    let mut output = String::new();

    push_column_labels(&mut output, extent.width);
    for row in 0..rows {
        output.push_str(&format!("{:2} ", row + 1));
        for col in 0..cols {
            let pos = Position::new(col, row);
            let symbol = match board.at(pos) {
                Some(piece) => piece_symbol(piece),
                None if marks.contains(&pos) => "*".to_string(),
                None => ".".to_string(),
            };
            output.push_str(&format!(" {:>2}", symbol));
        }
        output.push_str(&format!(" {}", row + 1));
        output.push('\n');
    }
    push_column_labels(&mut output, extent.width);

    output
}

fn push_column_labels(output: &mut String, width: u32) {
    output.push_str("   ");
    for col in 0..width {
        output.push_str(&format!(" {:>2}", column_char(col)));
    }
    output.push('\n');
}

/// Column letter, `?` past the alphabet
fn column_char(col: u32) -> char {
    u8::try_from(col)
        .ok()
        .filter(|col| *col < 26)
        .map_or('?', |col| (b'a' + col) as char)
}

/// White pieces in upper case, black in lower case, any other suit prefixed
/// with its initial
pub fn piece_symbol(piece: &Piece) -> String {
    let symbol = piece.kind().symbol();
    match piece.suit().name() {
        "white" => symbol.to_string(),
        "black" => symbol.to_ascii_lowercase().to_string(),
        other => {
            let initial = other.chars().next().unwrap_or('?').to_ascii_lowercase();
            format!("{initial}{symbol}")
        }
    }
}
