use crate::tiles::Tile;

/// Why a tile could not go where it was asked to.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaceError {
    #[error("cell ({row},{col}) is off the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("cell ({row},{col}) is already occupied")]
    Occupied { row: usize, col: usize },
    #[error("tile does not fit at ({row},{col})")]
    DoesNotFit { row: usize, col: usize },
}

/// A refused placement. The tile comes back so the caller can return it to its tray.
#[derive(thiserror::Error, Debug)]
#[error("tile {tile} rejected: {reason}")]
pub struct Rejected {
    pub tile: Tile,
    pub reason: PlaceError,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("a game needs 2 to 4 players, got {0}")]
    PlayerCount(usize),
    #[error("invalid rules: {0}")]
    Rules(String),
}
