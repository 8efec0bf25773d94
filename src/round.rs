use hashbrown::HashMap;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::VecDeque;

use crate::board::Board;
use crate::engine::search::{play_best, who_is_first, Committed, StartKind};
use crate::events::{Event, EventSink, PenaltyReason};
use crate::rules::Rules;
use crate::state::Player;
use crate::tiles::{generate_pool, Tile};
use crate::types::{PlayerId, TileId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Setup,
    Playing,
    Over,
}

/// Where a tile currently lives. Exactly one holds for every tile of the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TileStatus {
    InPool,
    InTray(PlayerId),
    Placed { row: usize, col: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Placed(Committed),
    /// No move; penalised and drew `tile`. The same player goes again.
    Drew { tile: TileId },
    /// No move and an empty pool; penalised and passed.
    Blocked,
    /// The round is not in play.
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundResult {
    pub round: u32,
    pub winner: PlayerId,
    /// True when the winner emptied their tray, false when they merely held the fewest tiles.
    pub empty_tray: bool,
    pub bonus: i32,
    pub turns: u32,
    pub tiles_placed: usize,
}

/// One playthrough of the pool. Owns the board and the pool, borrows the players for its lifetime
/// so that scores accumulate across rounds.
pub struct Round<'p> {
    number: u32,
    rules: Rules,
    board: Board,
    players: &'p mut [Player],
    pool: VecDeque<Tile>,
    played: Vec<TileId>,
    open_faced: Vec<(usize, usize)>,
    total_tiles: usize,
    current: PlayerId,
    blocked: usize,
    turns: u32,
    phase: Phase,
    opener: Option<(PlayerId, TileId, StartKind)>,
}

impl<'p> Round<'p> {
    /// New round over a fresh, unshuffled 56-tile pool.
    pub fn new(number: u32, rules: Rules, players: &'p mut [Player]) -> Self {
        Self::with_pool(number, rules, players, generate_pool())
    }

    /// New round over an explicit pool, dealt in the given order.
    /// Each player's id is reset to its seat index.
    pub fn with_pool(number: u32, rules: Rules, players: &'p mut [Player], pool: Vec<Tile>) -> Self {
        for (seat, p) in players.iter_mut().enumerate() {
            p.id = seat;
            p.clear_tray();
        }
        let total_tiles = pool.len();
        Self {
            number,
            rules,
            board: Board::new(rules),
            players,
            pool: pool.into(),
            played: Vec::with_capacity(total_tiles),
            open_faced: Vec::new(),
            total_tiles,
            current: 0,
            blocked: 0,
            turns: 0,
            phase: Phase::Setup,
            opener: None,
        }
    }

    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Consumes the round, keeping its final board.
    pub fn into_board(self) -> Board {
        self.board
    }

    #[inline]
    pub fn players(&self) -> &[Player] {
        &*self.players
    }

    #[inline]
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Tile ids in the order they were placed.
    #[inline]
    pub fn played(&self) -> &[TileId] {
        &self.played
    }

    #[inline]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Who opened the round and with what, once dealt.
    #[inline]
    pub fn opener(&self) -> Option<(PlayerId, TileId, StartKind)> {
        self.opener
    }

    /// Shuffles the undealt pool. Only meaningful before `deal`.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pool.make_contiguous().shuffle(rng);
    }

    /// Deals the opening hands round-robin and picks the first player.
    pub fn deal(&mut self, sink: &mut dyn EventSink) {
        if self.phase != Phase::Setup {
            return;
        }
        let n = self.players.len();
        let draws = self.rules.draws_for(n);
        sink.emit(&Event::RoundStarted {
            round: self.number,
            first_draws: draws,
        });
        log::info!("Round {}: dealing {draws} tiles to {n} players", self.number);

        let round = self.number;
        'deal: for _ in 0..draws {
            for (seat, p) in self.players.iter_mut().enumerate() {
                let Some(tile) = self.pool.pop_front() else {
                    break 'deal;
                };
                sink.emit(&Event::TileDrawn {
                    round,
                    player: seat,
                    tile: tile.id,
                });
                p.receive(tile);
            }
        }

        self.phase = Phase::Playing;
        match who_is_first(&*self.players) {
            Some((seat, tile, kind)) => {
                log::info!(
                    "  player '{}' goes first ({kind:?})",
                    self.players[seat].name
                );
                self.current = seat;
                self.opener = Some((seat, tile, kind));
                sink.emit(&Event::FirstPlayerChosen {
                    round: self.number,
                    player: seat,
                    tile,
                    kind,
                });
            }
            None => log::warn!("  nobody holds a tile, round {} ends unplayed", self.number),
        }
        self.check_over();
    }

    fn check_over(&mut self) {
        let n = self.players.len();
        if self.players.iter().any(Player::has_empty_tray) || self.blocked >= n {
            self.phase = Phase::Over;
        }
    }

    fn advance(&mut self) {
        self.current = (self.current + 1) % self.players.len();
    }

    /// Plays one attempt by the current player.
    pub fn take_turn(&mut self, sink: &mut dyn EventSink) -> TurnOutcome {
        if self.phase != Phase::Playing {
            return TurnOutcome::Idle;
        }
        self.turns += 1;
        let seat = self.current;
        let round = self.number;

        let outcome = match play_best(&mut self.board, &mut self.players[seat], &mut self.open_faced) {
            Some(committed) => {
                let player = &self.players[seat];
                log::info!(
                    "  '{}' placed {} @ ({},{}) {:?}/{} for {} points",
                    player.name,
                    committed.tile_id,
                    committed.row,
                    committed.col,
                    committed.pose.orientation,
                    committed.pose.rotation.degrees(),
                    committed.placement.score
                );
                self.played.push(committed.tile_id);
                self.blocked = 0;
                sink.emit(&Event::TilePlaced {
                    round,
                    player: seat,
                    tile: committed.tile_id,
                    row: committed.row,
                    col: committed.col,
                    pose: committed.pose,
                    placement: committed.placement,
                });
                self.advance();
                TurnOutcome::Placed(committed)
            }
            None => match self.pool.pop_front() {
                Some(tile) => {
                    let points = self.rules.draw_penalty;
                    let player = &mut self.players[seat];
                    log::info!(
                        "  '{}' cannot play, deducting {points} points and drawing a tile",
                        player.name
                    );
                    player.score -= points;
                    let id = tile.id;
                    player.receive(tile);
                    sink.emit(&Event::PenaltyApplied {
                        round,
                        player: seat,
                        points,
                        reason: PenaltyReason::Draw,
                    });
                    sink.emit(&Event::TileDrawn {
                        round,
                        player: seat,
                        tile: id,
                    });
                    TurnOutcome::Drew { tile: id }
                }
                None => {
                    let points = self.rules.blocked_penalty;
                    let player = &mut self.players[seat];
                    log::info!(
                        "  '{}' is blocked with an empty pool, deducting {points} points",
                        player.name
                    );
                    player.score -= points;
                    self.blocked += 1;
                    sink.emit(&Event::PenaltyApplied {
                        round,
                        player: seat,
                        points,
                        reason: PenaltyReason::Blocked,
                    });
                    self.advance();
                    TurnOutcome::Blocked
                }
            },
        };
        self.check_over();
        outcome
    }

    /// Deals if needed, plays until the round stops, then settles it.
    pub fn play(&mut self, sink: &mut dyn EventSink) -> RoundResult {
        self.deal(sink);
        while self.phase == Phase::Playing {
            self.take_turn(sink);
        }
        self.resolve(sink)
    }

    /// Awards the end-of-round bonus. An emptied tray wins outright; otherwise the fewest tiles wins.
    pub fn resolve(&mut self, sink: &mut dyn EventSink) -> RoundResult {
        self.phase = Phase::Over;

        let emptied = self.players.iter().position(Player::has_empty_tray);
        let (winner, empty_tray) = match emptied {
            Some(seat) => (seat, true),
            None => {
                let mut fewest = 0;
                for (seat, p) in self.players.iter().enumerate() {
                    if p.tray().len() < self.players[fewest].tray().len() {
                        fewest = seat;
                    }
                }
                (fewest, false)
            }
        };

        let others: i32 = self
            .players
            .iter()
            .enumerate()
            .filter(|&(seat, _)| seat != winner)
            .map(|(_, p)| p.tray_value())
            .sum();
        let bonus = if empty_tray {
            self.rules.empty_tray_bonus + others
        } else {
            others
        };

        let w = &mut self.players[winner];
        w.score += bonus;
        if empty_tray {
            w.rounds_won += 1;
            log::info!("  '{}' won round {} by playing all of their tiles (+{bonus})", w.name, self.number);
        } else {
            log::info!(
                "  '{}' won round {} with the fewest tiles remaining (+{bonus})",
                w.name,
                self.number
            );
        }

        let scores = self.players.iter().map(|p| p.score).collect();
        sink.emit(&Event::RoundEnded {
            round: self.number,
            winner,
            empty_tray,
            bonus,
            scores,
        });

        RoundResult {
            round: self.number,
            winner,
            empty_tray,
            bonus,
            turns: self.turns,
            tiles_placed: self.played.len(),
        }
    }

    /// Where the tile with `id` is right now, or None if it is not part of this round.
    pub fn status_of(&self, id: TileId) -> Option<TileStatus> {
        if self.pool.iter().any(|t| t.id == id) {
            return Some(TileStatus::InPool);
        }
        if let Some(seat) = self.players.iter().position(|p| p.holds(id)) {
            return Some(TileStatus::InTray(seat));
        }
        self.board
            .placed()
            .find(|(_, _, p)| p.tile.id == id)
            .map(|(row, col, _)| TileStatus::Placed { row, col })
    }

    /// Verifies that every tile of the round is in exactly one place.
    pub fn check_ownership(&self) -> Result<(), String> {
        let mut seen: HashMap<TileId, TileStatus> = HashMap::with_capacity(self.total_tiles);
        let mut record = |id: TileId, at: TileStatus| -> Result<(), String> {
            match seen.insert(id, at) {
                Some(prev) => Err(format!("tile {id} is both {prev:?} and {at:?}")),
                None => Ok(()),
            }
        };
        for t in &self.pool {
            record(t.id, TileStatus::InPool)?;
        }
        for (seat, p) in self.players.iter().enumerate() {
            for t in p.tray() {
                record(t.id, TileStatus::InTray(seat))?;
            }
        }
        for (row, col, placed) in self.board.placed() {
            record(placed.tile.id, TileStatus::Placed { row, col })?;
        }
        if seen.len() != self.total_tiles {
            return Err(format!(
                "expected {} tiles, found {}",
                self.total_tiles,
                seen.len()
            ));
        }
        if self.played.len() != self.board.filled_count() {
            return Err(format!(
                "{} tiles recorded as played but {} on the board",
                self.played.len(),
                self.board.filled_count()
            ));
        }
        Ok(())
    }
}
