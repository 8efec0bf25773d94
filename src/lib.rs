#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

pub mod types;
pub mod error;
pub mod rules;
pub mod tiles;
pub mod board;
pub mod state;
pub mod events;
pub mod rng;
pub mod round;
pub mod game;
pub mod render;

pub mod engine {
    pub mod fit;
    pub mod score;
    pub mod search;
}

// Re-exports: stable minimal API surface for external callers
pub use crate::board::{Board, Bounds, PlacedTile};
pub use crate::engine::score::Placement;
pub use crate::engine::search::{determine_first_tile, who_is_first, StartKind};
pub use crate::error::{PlaceError, Rejected, SetupError};
pub use crate::events::{Event, EventSink, JsonLines, NullSink, PenaltyReason};
pub use crate::game::{game_winner, Game, GameOutcome};
pub use crate::rng::{rng_for_round, seed_for_game};
pub use crate::round::{Phase, Round, RoundResult, TileStatus, TurnOutcome};
pub use crate::rules::Rules;
pub use crate::state::{Choice, Player};
pub use crate::tiles::{generate_pool, Tile};
pub use crate::types::{Face, Orientation, PlayerId, Pose, Rotation, Side, TileId};
