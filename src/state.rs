use serde::Serialize;

use crate::tiles::Tile;
use crate::types::{PlayerId, Pose, TileId};

/// A candidate placement: which tray tile, where, and in which trial pose.
/// Borrowing the tile keeps the tray as its only owner while the search runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice<'t> {
    pub tile: &'t Tile,
    pub row: usize,
    pub col: usize,
    pub pose: Pose,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Cumulative across rounds.
    pub score: i32,
    pub rounds_won: u32,
    tray: Vec<Tile>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
            rounds_won: 0,
            tray: Vec::with_capacity(crate::tiles::POOL_SIZE),
        }
    }

    /// Default seat names: "Player A", "Player B", ...
    pub fn seat_name(id: PlayerId) -> String {
        let letter = (b'A' + (id % 26) as u8) as char;
        format!("Player {letter}")
    }

    #[inline]
    pub fn tray(&self) -> &[Tile] {
        &self.tray
    }

    #[inline]
    pub fn has_empty_tray(&self) -> bool {
        self.tray.is_empty()
    }

    /// Sum of the values still held.
    #[inline]
    pub fn tray_value(&self) -> i32 {
        self.tray.iter().map(Tile::value).sum()
    }

    #[inline]
    pub fn holds(&self, id: TileId) -> bool {
        self.tray.iter().any(|t| t.id == id)
    }

    /// Adds a drawn tile to the end of the tray.
    #[inline]
    pub fn receive(&mut self, tile: Tile) {
        self.tray.push(tile);
    }

    /// Removes a tile from the tray, returning it with its tray position.
    pub fn take_from_tray(&mut self, id: TileId) -> Option<(usize, Tile)> {
        let pos = self.tray.iter().position(|t| t.id == id)?;
        Some((pos, self.tray.remove(pos)))
    }

    /// Puts a tile back where `take_from_tray` found it.
    pub fn restore_to_tray(&mut self, pos: usize, tile: Tile) {
        let pos = pos.min(self.tray.len());
        self.tray.insert(pos, tile);
    }

    /// Empties the tray, handing the tiles back.
    pub fn clear_tray(&mut self) -> Vec<Tile> {
        std::mem::take(&mut self.tray)
    }
}
