use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Face, Orientation, Pose, Rotation, Side, TileId};

/// Number of tiles in a full pool.
pub const POOL_SIZE: usize = 56;

/// Highest corner value printed on a tile.
pub const MAX_CORNER: u8 = 5;

/// A triangular tile. Corners A, B and C run clockwise:
///
/// ```text
///      A
///     / \
///    /   \
///   C-----B
/// ```
///
/// Deliberately not `Copy`: a tile moves between pool, tray and board, it is never duplicated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub a: u8,
    pub b: u8,
    pub c: u8,
}

/// Corner values at the left, middle and right positions for a given pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosedCorners {
    pub left: u8,
    pub middle: u8,
    pub right: u8,
}

impl Tile {
    #[inline]
    pub const fn new(id: TileId, a: u8, b: u8, c: u8) -> Self {
        Self { id, a, b, c }
    }

    #[inline]
    pub fn value(&self) -> i32 {
        i32::from(self.a) + i32::from(self.b) + i32::from(self.c)
    }

    #[inline]
    pub fn is_triplet(&self) -> bool {
        self.a == self.b && self.b == self.c
    }

    #[inline]
    pub fn is_zero_triplet(&self) -> bool {
        self.is_triplet() && self.a == 0
    }

    /// Maps A/B/C onto the left/middle/right positions.
    pub fn corners(&self, pose: Pose) -> PosedCorners {
        let (a, b, c) = (self.a, self.b, self.c);
        let (left, middle, right) = match (pose.rotation, pose.orientation) {
            (Rotation::R0, Orientation::Up) => (c, a, b),
            (Rotation::R0, Orientation::Down) => (b, a, c),
            (Rotation::R120, Orientation::Up) => (b, c, a),
            (Rotation::R120, Orientation::Down) => (a, c, b),
            (Rotation::R240, Orientation::Up) => (a, b, c),
            (Rotation::R240, Orientation::Down) => (c, b, a),
        };
        PosedCorners {
            left,
            middle,
            right,
        }
    }

    /// The outward-facing edge on `side`. Outward order reverses between Up and Down tiles.
    pub fn face(&self, side: Side, pose: Pose) -> Face {
        let k = self.corners(pose);
        match (side, pose.orientation) {
            (Side::Left, Orientation::Down) => Face::new(k.middle, k.left),
            (Side::Left, Orientation::Up) => Face::new(k.left, k.middle),
            (Side::Right, Orientation::Down) => Face::new(k.right, k.middle),
            (Side::Right, Orientation::Up) => Face::new(k.middle, k.right),
            (Side::Middle, Orientation::Down) => Face::new(k.left, k.right),
            (Side::Middle, Orientation::Up) => Face::new(k.right, k.left),
        }
    }

    /// Corner multiset in ascending order; two tiles are the same piece iff these agree.
    #[inline]
    pub fn canonical(&self) -> [u8; 3] {
        let mut k = [self.a, self.b, self.c];
        k.sort_unstable();
        k
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.a, self.b, self.c)
    }
}

/// Checks that a pool holds every corner multiset exactly once and that ids are 1..=56.
pub fn validate_pool(tiles: &[Tile]) -> Result<(), String> {
    if tiles.len() != POOL_SIZE {
        return Err(format!(
            "pool has {} tiles, expected {POOL_SIZE}",
            tiles.len()
        ));
    }
    let mut seen: HashSet<[u8; 3]> = HashSet::with_capacity(POOL_SIZE);
    let mut ids: HashSet<TileId> = HashSet::with_capacity(POOL_SIZE);
    for t in tiles {
        if t.a > MAX_CORNER || t.b > MAX_CORNER || t.c > MAX_CORNER {
            return Err(format!("tile {} '{t}' has a corner above {MAX_CORNER}", t.id));
        }
        if !seen.insert(t.canonical()) {
            return Err(format!("duplicate corner set '{t}' (tile id {})", t.id));
        }
        if t.id == 0 || usize::from(t.id) > POOL_SIZE || !ids.insert(t.id) {
            return Err(format!("tile '{t}' has bad or repeated id {}", t.id));
        }
    }
    Ok(())
}

/// Generates the full 56-tile pool in canonical order (0-0-0 first, 5-5-5 last).
///
/// Panics if the generated set is malformed; that is a programming error, not a game event.
pub fn generate_pool() -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(POOL_SIZE);
    let mut id: TileId = 1;
    for a in 0..=MAX_CORNER {
        for b in a..=MAX_CORNER {
            for c in b..=MAX_CORNER {
                tiles.push(Tile::new(id, a, b, c));
                id += 1;
            }
        }
    }
    if let Err(e) = validate_pool(&tiles) {
        panic!("tile pool generation is broken: {e}");
    }
    tiles
}
