//! Plain-text views of tiles and boards. Read-only; nothing here touches game state.

use std::fmt::Write as _;

use crate::board::Board;
use crate::tiles::Tile;
use crate::types::{Orientation, Pose, Rotation};

/// Height of a tile glyph in text rows.
pub const GLYPH_ROWS: usize = 5;

/// Five text rows drawing `tile` in `pose`. Board glyphs are padded so that neighbouring
/// Up and Down cells interlock; solo glyphs are centred for display on their own.
pub fn tile_glyph(tile: &Tile, pose: Pose, solo: bool) -> [String; GLYPH_ROWS] {
    let k = tile.corners(pose);
    let (l, m, r) = (k.left, k.middle, k.right);
    let edge = if solo { "-------" } else { " ------- " };
    match pose.orientation {
        Orientation::Down => {
            let pad = |n: usize| if solo { " ".repeat(n) } else { String::new() };
            [
                edge.to_string(),
                format!("\\{l}   {r}/"),
                format!("{}\\   /", pad(1)),
                format!("{}\\{m}/", pad(2)),
                format!("{}v", pad(3)),
            ]
        }
        Orientation::Up => {
            let pad = |n: usize| if solo { " ".repeat(n) } else { String::new() };
            [
                format!("{}^", pad(3)),
                format!("{}/{m}\\", pad(2)),
                format!("{}/   \\", pad(1)),
                format!("/{l}   {r}\\"),
                edge.to_string(),
            ]
        }
    }
}

/// A tray drawn as a strip of upright tiles.
pub fn render_tray(tiles: &[Tile]) -> String {
    if tiles.is_empty() {
        return "  [<empty>]\n".to_string();
    }
    let mut rows: [String; GLYPH_ROWS] = Default::default();
    for tile in tiles {
        let glyph = tile_glyph(tile, Pose::new(Orientation::Up, Rotation::R0), true);
        for (row, part) in rows.iter_mut().zip(glyph) {
            row.push_str("  ");
            row.push_str(&part);
        }
    }
    let mut out = String::new();
    for row in rows {
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}

// Fill for an empty cell, narrowing towards the point of the triangle.
const DOWN_FILL: [&str; GLYPH_ROWS] = ["+++++++++", "+++++++", "+++++", "+++", "+"];
const UP_FILL: [&str; GLYPH_ROWS] = ["=", "===", "=====", "=======", "========="];
// Half-cell margins so the first and last cells of a row line up.
const UP_HALF: [&str; GLYPH_ROWS] = ["=", "==", "===", "====", "====="];
const DOWN_HALF: [&str; GLYPH_ROWS] = ["+++++", "++++", "+++", "++", "+"];

/// The smallest rectangle of the board holding every placed tile, with row and column scales.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    let Some(b) = board.bounds() else {
        out.push_str("Board:\n  Played Piece Count:0\n");
        return out;
    };
    let _ = writeln!(
        out,
        "Board:\n  Played Piece Count:{}\n  Boundaries:({},{},{},{})",
        board.filled_count(),
        b.top,
        b.bottom,
        b.left,
        b.right
    );

    let width = b.right - b.left + 1;
    let rule = format!("------{}", "-".repeat(width * 9));
    out.push_str(&rule);
    out.push_str("\n        ");
    for col in b.left..=b.right {
        let _ = write!(out, " {col:>3} ");
    }
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for row in b.top..=b.bottom {
        let mut lines: [String; GLYPH_ROWS] = Default::default();
        let lead = match Board::orientation_at(row, b.left) {
            Orientation::Down => UP_HALF,
            Orientation::Up => DOWN_HALF,
        };
        for (i, line) in lines.iter_mut().enumerate() {
            if i == 2 {
                let _ = write!(line, "|{row:>3} |{}", lead[i]);
            } else {
                let _ = write!(line, "|    |{}", lead[i]);
            }
        }

        for col in b.left..=b.right {
            let cell: [String; GLYPH_ROWS] = match board.get(row, col) {
                Some(p) => tile_glyph(&p.tile, p.pose, false),
                None => {
                    let fill = match Board::orientation_at(row, col) {
                        Orientation::Down => DOWN_FILL,
                        Orientation::Up => UP_FILL,
                    };
                    fill.map(str::to_string)
                }
            };
            for (line, part) in lines.iter_mut().zip(cell) {
                line.push_str(&part);
            }
        }

        let trail = match Board::orientation_at(row, b.right) {
            Orientation::Down => UP_HALF,
            Orientation::Up => DOWN_HALF,
        };
        for (line, part) in lines.iter_mut().zip(trail) {
            line.push_str(part);
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}
