use crate::board::{Board, PlacedTile};
use crate::state::Choice;
use crate::tiles::PosedCorners;
use crate::types::{Orientation, Side};

/// Which corner of a neighbouring tile touches the vertex under test.
#[derive(Debug, Clone, Copy)]
enum Corner {
    Left,
    Middle,
    Right,
}

#[inline]
fn corner_of(p: &PlacedTile, which: Corner) -> u8 {
    let k = p.tile.corners(p.pose);
    match which {
        Corner::Left => k.left,
        Corner::Middle => k.middle,
        Corner::Right => k.right,
    }
}

/// Every occupied cell in `probes` must show `expected` on the listed corner.
/// Returns the label of the first probe that disagrees.
fn corner_probes_agree(
    board: &Board,
    row: usize,
    col: usize,
    expected: u8,
    probes: &[(isize, isize, Corner, &'static str)],
) -> Result<(), &'static str> {
    for &(dr, dc, which, label) in probes {
        if let Some(p) = board.get_offset(row, col, dr, dc) {
            if corner_of(p, which) != expected {
                return Err(label);
            }
        }
    }
    Ok(())
}

fn face_fits(board: &Board, choice: &Choice<'_>, side: Side) -> bool {
    let (dr, dc) = side.offset(choice.pose.orientation);
    let Some(neighbour) = board.get_offset(choice.row, choice.col, dr, dc) else {
        return true;
    };
    if neighbour.pose.orientation == choice.pose.orientation {
        return false;
    }
    let theirs = neighbour.tile.face(side.facing(), neighbour.pose);
    let ours = choice.tile.face(side, choice.pose);
    theirs.matches(ours)
}

fn left_corner_fits(board: &Board, choice: &Choice<'_>, k: PosedCorners) -> Result<(), &'static str> {
    let v = if choice.pose.orientation == Orientation::Up { 1 } else { -1 };
    corner_probes_agree(
        board,
        choice.row,
        choice.col,
        k.left,
        &[
            (0, -1, Corner::Middle, "left"),
            (0, -2, Corner::Right, "far-left"),
            (v, -1, Corner::Middle, "vertical & left"),
            (v, -2, Corner::Right, "vertical & far-left"),
        ],
    )
}

fn middle_corner_fits(board: &Board, choice: &Choice<'_>, k: PosedCorners) -> Result<(), &'static str> {
    let probes: [(isize, isize, Corner, &'static str); 3] = match choice.pose.orientation {
        Orientation::Down => [
            (0, 1, Corner::Left, "right"),
            (1, 0, Corner::Middle, "down"),
            (1, -1, Corner::Right, "down & left"),
        ],
        Orientation::Up => [
            (-1, -1, Corner::Right, "up & left"),
            (-1, 0, Corner::Middle, "up"),
            (-1, 1, Corner::Left, "up & right"),
        ],
    };
    corner_probes_agree(board, choice.row, choice.col, k.middle, &probes)
}

fn right_corner_fits(board: &Board, choice: &Choice<'_>, k: PosedCorners) -> Result<(), &'static str> {
    let v = if choice.pose.orientation == Orientation::Up { 1 } else { -1 };
    corner_probes_agree(
        board,
        choice.row,
        choice.col,
        k.right,
        &[
            (0, 1, Corner::Middle, "right"),
            (0, 2, Corner::Left, "far-right"),
            (v, 2, Corner::Left, "vertical & far-right"),
            (v, 1, Corner::Middle, "vertical & right"),
        ],
    )
}

/// Edge and vertex compatibility of a candidate with everything already around it.
/// Does not look at whether the target cell itself is free.
pub fn piece_fits(board: &Board, choice: &Choice<'_>) -> bool {
    for side in Side::all() {
        if !face_fits(board, choice, side) {
            log::trace!(
                "  tile '{}' @ ({},{}) fails {:?} face test",
                choice.tile,
                choice.row,
                choice.col,
                side
            );
            return false;
        }
    }

    let k = choice.tile.corners(choice.pose);
    let corners = [
        ("left", left_corner_fits(board, choice, k)),
        ("middle", middle_corner_fits(board, choice, k)),
        ("right", right_corner_fits(board, choice, k)),
    ];
    for (corner, verdict) in corners {
        if let Err(why) = verdict {
            log::trace!(
                "  tile '{}' @ ({},{}) fails {corner} corner test - {why}",
                choice.tile,
                choice.row,
                choice.col
            );
            return false;
        }
    }
    true
}
