use serde::Serialize;

use crate::board::Board;
use crate::error::SetupError;
use crate::events::{Event, EventSink};
use crate::rng::rng_for_round;
use crate::round::{Round, RoundResult};
use crate::rules::Rules;
use crate::state::Player;
use crate::types::PlayerId;

/// Final standing of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    /// None when the round cap was hit before anyone crossed the threshold.
    pub winner: Option<PlayerId>,
    pub rounds: Vec<RoundResult>,
    pub scores: Vec<i32>,
    pub rounds_won: Vec<u32>,
}

impl GameOutcome {
    #[inline]
    pub fn rounds_played(&self) -> u32 {
        self.rounds.len() as u32
    }
}

/// Decides the game after a round. Among the players at or over `threshold`: a single one wins;
/// several are settled by the round winner if present, else by the highest score (earliest seat on ties).
/// Players are identified by seat index.
pub fn game_winner(players: &[Player], round_winner: PlayerId, threshold: i32) -> Option<PlayerId> {
    let over: Vec<(PlayerId, &Player)> = players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.score >= threshold)
        .collect();
    match over.as_slice() {
        [] => None,
        [(seat, _)] => Some(*seat),
        many => {
            if many.iter().any(|&(seat, _)| seat == round_winner) {
                return Some(round_winner);
            }
            let mut best = many[0];
            for &(seat, p) in &many[1..] {
                if p.score > best.1.score {
                    best = (seat, p);
                }
            }
            Some(best.0)
        }
    }
}

/// A sequence of rounds sharing players and cumulative scores.
pub struct Game {
    rules: Rules,
    seed: u64,
    players: Vec<Player>,
    rounds: Vec<RoundResult>,
    last_board: Option<Board>,
    winner: Option<PlayerId>,
}

impl Game {
    /// Seats `players` players named "Player A", "Player B", ...
    pub fn new(players: usize, rules: Rules, seed: u64) -> Result<Self, SetupError> {
        let names = (0..players).map(Player::seat_name).collect();
        Self::with_names(names, rules, seed)
    }

    pub fn with_names(names: Vec<String>, rules: Rules, seed: u64) -> Result<Self, SetupError> {
        Rules::check_player_count(names.len())?;
        rules.validate().map_err(SetupError::Rules)?;
        let players = names
            .into_iter()
            .enumerate()
            .map(|(id, name)| Player::new(id, name))
            .collect();
        Ok(Self {
            rules,
            seed,
            players,
            rounds: Vec::new(),
            last_board: None,
            winner: None,
        })
    }

    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[inline]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn rounds(&self) -> &[RoundResult] {
        &self.rounds
    }

    /// Board as it stood at the end of the latest round.
    #[inline]
    pub fn last_board(&self) -> Option<&Board> {
        self.last_board.as_ref()
    }

    #[inline]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.winner.is_some() || self.rounds.len() as u32 >= self.rules.max_rounds
    }

    /// Plays the next round on a freshly shuffled pool and checks for a game winner.
    pub fn play_round(&mut self, sink: &mut dyn EventSink) -> RoundResult {
        let number = self.rounds.len() as u32 + 1;
        let mut rng = rng_for_round(self.seed, number);
        let mut round = Round::new(number, self.rules, &mut self.players);
        round.shuffle(&mut rng);
        let result = round.play(sink);
        debug_assert!(round.check_ownership().is_ok());
        self.last_board = Some(round.into_board());
        self.rounds.push(result);

        self.winner = game_winner(&self.players, result.winner, self.rules.win_threshold);
        if let Some(w) = self.winner {
            let p = &self.players[w];
            log::info!("'{}' has won the game by scoring {} points!", p.name, p.score);
        }
        result
    }

    /// Plays rounds until someone wins or the round cap is reached.
    pub fn play(&mut self, sink: &mut dyn EventSink) -> GameOutcome {
        self.play_observed(sink, |_, _| {})
    }

    /// Like `play`, calling `after_round` with the game and the result once each round settles.
    pub fn play_observed<F>(&mut self, sink: &mut dyn EventSink, mut after_round: F) -> GameOutcome
    where
        F: FnMut(&Game, &RoundResult),
    {
        sink.emit(&Event::GameStarted {
            players: self.players.iter().map(|p| p.name.clone()).collect(),
            seed: self.seed,
        });
        while !self.is_over() {
            let result = self.play_round(sink);
            after_round(self, &result);
        }
        if self.winner.is_none() {
            log::warn!("no winner after {} rounds", self.rounds.len());
        }
        let outcome = self.outcome();
        sink.emit(&Event::GameEnded {
            rounds: outcome.rounds_played(),
            winner: outcome.winner,
            scores: outcome.scores.clone(),
        });
        outcome
    }

    pub fn outcome(&self) -> GameOutcome {
        GameOutcome {
            winner: self.winner,
            rounds: self.rounds.clone(),
            scores: self.players.iter().map(|p| p.score).collect(),
            rounds_won: self.players.iter().map(|p| p.rounds_won).collect(),
        }
    }
}
