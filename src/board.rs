use serde::Serialize;

use crate::engine::fit::piece_fits;
use crate::engine::score::{calculate_score, Placement};
use crate::error::{PlaceError, Rejected};
use crate::rules::Rules;
use crate::state::Choice;
use crate::tiles::Tile;
use crate::types::{offset_cell, Orientation, PlayerId, Pose, Rotation, Side};

/// A tile on the board together with the pose it was committed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedTile {
    pub tile: Tile,
    pub pose: Pose,
    pub placed_by: Option<PlayerId>,
}

/// Smallest rectangle holding every placed tile (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

/// Triangular grid addressed (row, col). Cells where row + col is even point down,
/// odd cells point up, so horizontal neighbours always have opposite orientations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rules: Rules,
    // rows * cols, row-major
    cells: Vec<Option<PlacedTile>>,
    filled: usize,
}

impl Board {
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            cells: vec![None; rules.board_rows * rules.board_cols],
            filled: 0,
        }
    }

    #[inline]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rules.board_rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.rules.board_cols
    }

    /// Orientation a tile is forced into at (row, col).
    #[inline]
    pub fn orientation_at(row: usize, col: usize) -> Orientation {
        if (row + col) % 2 == 0 {
            Orientation::Down
        } else {
            Orientation::Up
        }
    }

    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&PlacedTile> {
        if !self.in_bounds(row, col) {
            return None;
        }
        self.cells[row * self.cols() + col].as_ref()
    }

    /// Tile at (row+dr, col+dc); off-board reads as empty.
    #[inline]
    pub fn get_offset(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<&PlacedTile> {
        let (r, c) = offset_cell(row, col, dr, dc, self.rows(), self.cols())?;
        self.get(r, c)
    }

    #[inline]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some()
    }

    #[inline]
    pub fn filled_count(&self) -> usize {
        self.filled
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Iterates occupied cells in row-major order.
    pub fn placed(&self) -> impl Iterator<Item = (usize, usize, &PlacedTile)> {
        let cols = self.cols();
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_ref().map(|p| (i / cols, i % cols, p)))
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut acc: Option<Bounds> = None;
        for (r, c, _) in self.placed() {
            acc = Some(match acc {
                None => Bounds {
                    top: r,
                    bottom: r,
                    left: c,
                    right: c,
                },
                Some(b) => Bounds {
                    top: b.top.min(r),
                    bottom: b.bottom.max(r),
                    left: b.left.min(c),
                    right: b.right.max(c),
                },
            });
        }
        acc
    }

    /// Cell across `side` of a tile at (row, col), if it is on the board.
    #[inline]
    pub fn neighbour_cell(&self, row: usize, col: usize, side: Side) -> Option<(usize, usize)> {
        let (dr, dc) = side.offset(Self::orientation_at(row, col));
        offset_cell(row, col, dr, dc, self.rows(), self.cols())
    }

    /// Whether the placed tile at (row, col) could still be extended across `side`.
    #[inline]
    pub fn side_is_open(&self, row: usize, col: usize, side: Side) -> bool {
        match self.neighbour_cell(row, col, side) {
            Some((r, c)) => !self.is_occupied(r, c),
            None => false,
        }
    }

    #[inline]
    pub fn has_open_side(&self, row: usize, col: usize) -> bool {
        Side::all()
            .into_iter()
            .any(|side| self.side_is_open(row, col, side))
    }

    /// Pure legality and score check. No state changes, no logging above trace level.
    pub fn evaluate(&self, choice: &Choice<'_>) -> Option<Placement> {
        if !self.in_bounds(choice.row, choice.col) || self.is_occupied(choice.row, choice.col) {
            return None;
        }
        if !piece_fits(self, choice) {
            return None;
        }
        Some(calculate_score(self, choice))
    }

    /// Commits a tile at (row, col) in the cell's canonical orientation.
    /// On refusal the board is untouched and the tile is handed back.
    pub fn place(
        &mut self,
        tile: Tile,
        row: usize,
        col: usize,
        rotation: Rotation,
        placed_by: Option<PlayerId>,
    ) -> Result<Placement, Rejected> {
        if !self.in_bounds(row, col) {
            return Err(Rejected {
                tile,
                reason: PlaceError::OutOfBounds { row, col },
            });
        }
        if self.is_occupied(row, col) {
            return Err(Rejected {
                tile,
                reason: PlaceError::Occupied { row, col },
            });
        }
        let pose = Pose::new(Self::orientation_at(row, col), rotation);
        let verdict = self.evaluate(&Choice {
            tile: &tile,
            row,
            col,
            pose,
        });
        let Some(placement) = verdict else {
            return Err(Rejected {
                tile,
                reason: PlaceError::DoesNotFit { row, col },
            });
        };
        let idx = row * self.cols() + col;
        self.cells[idx] = Some(PlacedTile {
            tile,
            pose,
            placed_by,
        });
        self.filled += 1;
        Ok(placement)
    }
}
