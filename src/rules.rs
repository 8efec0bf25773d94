use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::SetupError;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;
/// Largest accepted board side.
pub const MAX_BOARD_DIM: usize = 1024;

/// Every tunable constant of the game. Any field missing from a rules file keeps its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub board_rows: usize,
    pub board_cols: usize,
    pub hexagon_bonus: i32,
    pub bridge_bonus: i32,
    pub triplet_start_bonus: i32,
    pub zero_triplet_start_bonus: i32,
    pub empty_tray_bonus: i32,
    pub draw_penalty: i32,
    pub blocked_penalty: i32,
    pub win_threshold: i32,
    pub two_player_draws: usize,
    pub multi_player_draws: usize,
    /// Safety cap on the number of rounds in one game.
    pub max_rounds: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            board_rows: 112,
            board_cols: 112,
            hexagon_bonus: 50,
            bridge_bonus: 40,
            triplet_start_bonus: 10,
            zero_triplet_start_bonus: 30,
            empty_tray_bonus: 25,
            draw_penalty: 5,
            blocked_penalty: 10,
            win_threshold: 400,
            two_player_draws: 9,
            multi_player_draws: 7,
            max_rounds: 100,
        }
    }
}

impl Rules {
    /// Opening hand size for the given table size.
    #[inline]
    pub fn draws_for(&self, players: usize) -> usize {
        if players <= 2 {
            self.two_player_draws
        } else {
            self.multi_player_draws
        }
    }

    /// Cell where the opening tile goes.
    #[inline]
    pub fn center(&self) -> (usize, usize) {
        (self.board_rows / 2, self.board_cols / 2)
    }

    pub fn check_player_count(players: usize) -> Result<(), SetupError> {
        if (MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
            Ok(())
        } else {
            Err(SetupError::PlayerCount(players))
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.board_rows < 3 || self.board_cols < 3 {
            return Err(format!(
                "board must be at least 3x3, got {}x{}",
                self.board_rows, self.board_cols
            ));
        }
        if self.board_rows > MAX_BOARD_DIM || self.board_cols > MAX_BOARD_DIM {
            return Err(format!(
                "board must be at most {MAX_BOARD_DIM}x{MAX_BOARD_DIM}, got {}x{}",
                self.board_rows, self.board_cols
            ));
        }
        if self.two_player_draws == 0 || self.multi_player_draws == 0 {
            return Err("opening draw counts must be positive".to_string());
        }
        if self.two_player_draws.saturating_mul(MIN_PLAYERS) > crate::tiles::POOL_SIZE
            || self.multi_player_draws.saturating_mul(MAX_PLAYERS) > crate::tiles::POOL_SIZE
        {
            return Err("opening draws exceed the tile pool".to_string());
        }
        Ok(())
    }

    /// Load a rules override file (JSON). Unlisted fields keep their defaults.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Rules, String> {
        let data = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read rules JSON: {e}"))?;
        let rules: Rules =
            serde_json::from_str(&data).map_err(|e| format!("Failed to parse rules JSON: {e}"))?;
        rules.validate()?;
        Ok(rules)
    }
}
