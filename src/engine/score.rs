use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::state::Choice;
use crate::types::Orientation;

/// Score of a legal placement, broken down by where the points came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub score: i32,
    pub tile_value: i32,
    pub hexagon: bool,
    pub bridge: bool,
    /// Positional bonus actually awarded (bridge replaces hexagon when both apply).
    pub shape_bonus: i32,
    pub start_bonus: i32,
}

/// Five cells that, together with the candidate, close a hexagon around one vertex.
struct HexPattern {
    name: &'static str,
    offsets: [(isize, isize); 5],
}

const UP_LEFT: HexPattern = HexPattern {
    name: "up-left",
    offsets: [(0, -1), (0, -2), (1, -2), (1, -1), (1, 0)],
};
const UP_RIGHT: HexPattern = HexPattern {
    name: "up-right",
    offsets: [(1, 0), (1, 1), (1, 2), (0, 2), (0, 1)],
};
const UP_MIDDLE: HexPattern = HexPattern {
    name: "up-middle",
    offsets: [(0, -1), (-1, -1), (-1, 0), (-1, 1), (0, 1)],
};
const DOWN_LEFT: HexPattern = HexPattern {
    name: "down-left",
    offsets: [(0, -1), (0, -2), (-1, -2), (-1, -1), (-1, 0)],
};
const DOWN_RIGHT: HexPattern = HexPattern {
    name: "down-right",
    offsets: [(-1, 0), (-1, 1), (-1, 2), (0, 2), (0, 1)],
};
const DOWN_MIDDLE: HexPattern = HexPattern {
    name: "down-middle",
    offsets: [(0, -1), (1, -1), (1, 0), (1, 1), (0, 1)],
};

fn pattern_complete(board: &Board, row: usize, col: usize, pattern: &HexPattern) -> bool {
    let complete = pattern
        .offsets
        .iter()
        .all(|&(dr, dc)| board.get_offset(row, col, dr, dc).is_some());
    if complete {
        log::trace!("  completed hexagon with {} pattern @ ({row},{col})", pattern.name);
    }
    complete
}

fn completes_hexagon(board: &Board, row: usize, col: usize, orientation: Orientation) -> bool {
    let (rows, cols) = (board.rows(), board.cols());
    // Guards mirror the scoring table: a pattern is only considered where all of it can exist.
    let candidates: [(bool, &HexPattern); 3] = match orientation {
        Orientation::Up => [
            (row + 1 < rows && col > 1, &UP_LEFT),
            (row + 1 < rows && col + 2 < cols, &UP_RIGHT),
            (row > 1 && col > 1 && col + 1 < cols, &UP_MIDDLE),
        ],
        Orientation::Down => [
            (row > 0 && col > 1, &DOWN_LEFT),
            (row > 0 && col + 2 < cols, &DOWN_RIGHT),
            (row + 1 < rows && col > 1 && col + 1 < cols, &DOWN_MIDDLE),
        ],
    };
    candidates
        .iter()
        .any(|&(guard, pattern)| guard && pattern_complete(board, row, col, pattern))
}

fn any_occupied(board: &Board, row: usize, col: usize, cells: &[(isize, isize)]) -> bool {
    cells
        .iter()
        .any(|&(dr, dc)| board.get_offset(row, col, dr, dc).is_some())
}

fn completes_bridge(board: &Board, row: usize, col: usize, orientation: Orientation) -> bool {
    let empty_at = |dr: isize, dc: isize| -> bool {
        crate::types::offset_cell(row, col, dr, dc, board.rows(), board.cols())
            .is_some_and(|(r, c)| !board.is_occupied(r, c))
    };
    // v points away from the middle face: up for Up tiles, down for Down tiles.
    let v: isize = match orientation {
        Orientation::Up => -1,
        Orientation::Down => 1,
    };
    let left_open = empty_at(0, -1);
    let right_open = empty_at(0, 1);
    let middle_open = empty_at(-v, 0);

    let anchor_vertex = any_occupied(board, row, col, &[(v, -1), (v, 0), (v, 1)]);
    let anchor_left = any_occupied(board, row, col, &[(0, -2), (-v, -2), (-v, -1)]);
    let anchor_right = any_occupied(board, row, col, &[(0, 2), (-v, 2), (-v, 1)]);

    (left_open && anchor_vertex && anchor_left)
        || (right_open && anchor_vertex && anchor_right)
        || (middle_open && anchor_left && anchor_right)
}

/// Score the candidate would earn: tile value plus shape and opening bonuses.
/// Assumes the candidate has already passed `piece_fits`.
pub fn calculate_score(board: &Board, choice: &Choice<'_>) -> Placement {
    let rules = board.rules();
    let (row, col) = (choice.row, choice.col);
    let orientation = choice.pose.orientation;

    let hexagon = completes_hexagon(board, row, col, orientation);
    let bridge = completes_bridge(board, row, col, orientation);

    let mut shape_bonus = 0;
    if hexagon {
        shape_bonus = rules.hexagon_bonus;
    }
    // Bridge overwrites hexagon, even though it is worth less.
    if bridge {
        shape_bonus = rules.bridge_bonus;
    }

    let mut start_bonus = 0;
    if board.is_empty() {
        if choice.tile.is_zero_triplet() {
            start_bonus = rules.zero_triplet_start_bonus;
        } else if choice.tile.is_triplet() {
            start_bonus = rules.triplet_start_bonus;
        }
    }

    let tile_value = choice.tile.value();
    Placement {
        score: tile_value + shape_bonus + start_bonus,
        tile_value,
        hexagon,
        bridge,
        shape_bonus,
        start_bonus,
    }
}
