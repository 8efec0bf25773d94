use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::engine::score::Placement;
use crate::engine::search::StartKind;
use crate::types::{PlayerId, Pose, TileId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyReason {
    /// No legal move; a tile was drawn from the pool.
    Draw,
    /// No legal move and nothing left to draw.
    Blocked,
}

/// Everything observable that happens during a game, as plain data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    GameStarted {
        players: Vec<String>,
        seed: u64,
    },
    RoundStarted {
        round: u32,
        first_draws: usize,
    },
    FirstPlayerChosen {
        round: u32,
        player: PlayerId,
        tile: TileId,
        kind: StartKind,
    },
    TileDrawn {
        round: u32,
        player: PlayerId,
        tile: TileId,
    },
    TilePlaced {
        round: u32,
        player: PlayerId,
        tile: TileId,
        row: usize,
        col: usize,
        pose: Pose,
        placement: Placement,
    },
    PenaltyApplied {
        round: u32,
        player: PlayerId,
        points: i32,
        reason: PenaltyReason,
    },
    RoundEnded {
        round: u32,
        winner: PlayerId,
        empty_tray: bool,
        bonus: i32,
        scores: Vec<i32>,
    },
    GameEnded {
        rounds: u32,
        winner: Option<PlayerId>,
        scores: Vec<i32>,
    },
}

/// Receives game events. Injected into rounds and games; never global.
pub trait EventSink {
    fn emit(&mut self, event: &Event);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    #[inline]
    fn emit(&mut self, _event: &Event) {}
}

impl EventSink for Vec<Event> {
    fn emit(&mut self, event: &Event) {
        self.push(event.clone());
    }
}

/// Writes one JSON object per line. The first write error is kept and later events are dropped.
pub struct JsonLines<W: Write> {
    out: W,
    written: u64,
    error: Option<io::Error>,
}

impl<W: Write> JsonLines<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            written: 0,
            error: None,
        }
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.written
    }

    fn write_line(&mut self, event: &Event) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")
    }

    /// Flushes and hands back the writer, or the first error seen.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> EventSink for JsonLines<W> {
    fn emit(&mut self, event: &Event) {
        if self.error.is_some() {
            return;
        }
        match self.write_line(event) {
            Ok(()) => self.written += 1,
            Err(e) => {
                log::error!("event log write failed: {e}");
                self.error = Some(e);
            }
        }
    }
}
