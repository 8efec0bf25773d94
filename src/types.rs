use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a player in the game's seating order (0-based).
pub type PlayerId = usize;

/// Stable tile identifier, 1..=56 in pool generation order.
pub type TileId = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Up,
    Down,
}

impl Orientation {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Orientation::Up => Orientation::Down,
            Orientation::Down => Orientation::Up,
        }
    }

    /// Row step from a tile towards the neighbour sharing its middle face.
    #[inline]
    pub fn middle_step(self) -> isize {
        match self {
            Orientation::Up => 1,
            Orientation::Down => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    R0,
    R120,
    R240,
}

impl Rotation {
    #[inline]
    pub fn all() -> [Rotation; 3] {
        [Rotation::R0, Rotation::R120, Rotation::R240]
    }

    #[inline]
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::R0 => 0,
            Rotation::R120 => 120,
            Rotation::R240 => 240,
        }
    }
}

/// Transient or committed placement of a tile: which way it points and how it is turned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pose {
    pub orientation: Orientation,
    pub rotation: Rotation,
}

impl Pose {
    #[inline]
    pub const fn new(orientation: Orientation, rotation: Rotation) -> Self {
        Self {
            orientation,
            rotation,
        }
    }
}

/// One of the three edges of a placed triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    Middle,
}

impl Side {
    /// Search order used everywhere: left, right, middle.
    #[inline]
    pub fn all() -> [Side; 3] {
        [Side::Left, Side::Right, Side::Middle]
    }

    /// The side of a neighbour that touches this side.
    #[inline]
    pub fn facing(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Middle => Side::Middle,
        }
    }

    /// (row, col) offset of the neighbour across this side for a tile of the given orientation.
    #[inline]
    pub fn offset(self, orientation: Orientation) -> (isize, isize) {
        match self {
            Side::Left => (0, -1),
            Side::Right => (0, 1),
            Side::Middle => (orientation.middle_step(), 0),
        }
    }
}

/// An edge seen from outside its tile: (outward left corner, outward right corner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face {
    pub left: u8,
    pub right: u8,
}

impl Face {
    #[inline]
    pub const fn new(left: u8, right: u8) -> Self {
        Self { left, right }
    }

    /// Two faces can touch when one is the exact reversal of the other.
    #[inline]
    pub fn matches(self, other: Face) -> bool {
        self.left == other.right && self.right == other.left
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.left, self.right)
    }
}

/// Board indexing helper: applies a signed offset, returning None when it leaves the grid.
#[inline]
pub fn offset_cell(
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
    rows: usize,
    cols: usize,
) -> Option<(usize, usize)> {
    let r = row.checked_add_signed(dr)?;
    let c = col.checked_add_signed(dc)?;
    if r < rows && c < cols {
        Some((r, c))
    } else {
        None
    }
}
