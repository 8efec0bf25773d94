use std::io::Write;

use triominos::{game_winner, Event, Game, NullSink, Player, Rules, SetupError};

fn scored(scores: &[i32]) -> Vec<Player> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let mut p = Player::new(i, Player::seat_name(i));
            p.score = s;
            p
        })
        .collect()
}

#[test]
fn game_winner_resolution() {
    assert_eq!(game_winner(&scored(&[100, 399]), 1, 400), None);
    assert_eq!(game_winner(&scored(&[400, 399]), 1, 400), Some(0), "a lone player at the threshold wins");
    assert_eq!(
        game_winner(&scored(&[420, 410, 50]), 1, 400),
        Some(1),
        "the round winner wins among several"
    );
    assert_eq!(
        game_winner(&scored(&[420, 450, 50]), 2, 400),
        Some(1),
        "otherwise the highest score"
    );
    assert_eq!(game_winner(&scored(&[450, 450, 10]), 2, 400), Some(0), "ties go to the earlier seat");
}

#[test]
fn game_winner_answers_with_seats() {
    let mut players = scored(&[120, 410, 430]);
    for (p, id) in players.iter_mut().zip([5, 8, 3]) {
        p.id = id;
    }
    assert_eq!(game_winner(&players[..2], 0, 400), Some(1));
    assert_eq!(game_winner(&players, 1, 400), Some(1), "round winner by seat");
    assert_eq!(game_winner(&players, 0, 400), Some(2), "highest score by seat");
}

#[test]
fn setup_rejects_bad_player_counts_and_rules() {
    assert!(matches!(Game::new(1, Rules::default(), 0), Err(SetupError::PlayerCount(1))));
    assert!(matches!(Game::new(5, Rules::default(), 0), Err(SetupError::PlayerCount(5))));
    let tiny = Rules {
        board_rows: 2,
        ..Rules::default()
    };
    assert!(matches!(Game::new(2, tiny, 0), Err(SetupError::Rules(_))));
    let huge = Rules {
        board_rows: usize::MAX,
        board_cols: usize::MAX,
        ..Rules::default()
    };
    assert!(matches!(Game::new(2, huge, 0), Err(SetupError::Rules(_))));
    let greedy = Rules {
        two_player_draws: usize::MAX,
        ..Rules::default()
    };
    assert!(greedy.validate().is_err());
    assert!(Game::new(4, Rules::default(), 0).is_ok());
}

#[test]
fn seeded_games_are_reproducible() {
    let mut a = Game::new(3, Rules::default(), 42).expect("setup");
    let mut b = Game::new(3, Rules::default(), 42).expect("setup");
    let mut ev_a: Vec<Event> = Vec::new();
    let mut ev_b: Vec<Event> = Vec::new();
    let out_a = a.play(&mut ev_a);
    let out_b = b.play(&mut ev_b);
    assert_eq!(out_a, out_b);
    assert_eq!(ev_a, ev_b);
}

#[test]
fn a_game_ends_with_a_winner_over_the_threshold_or_at_the_cap() {
    for seed in [3u64, 11, 2024] {
        let rules = Rules::default();
        let mut game = Game::new(2, rules, seed).expect("setup");
        let mut events: Vec<Event> = Vec::new();
        let outcome = game.play(&mut events);

        assert!(outcome.rounds_played() >= 1);
        assert!(outcome.rounds_played() <= rules.max_rounds);
        match outcome.winner {
            Some(w) => assert!(outcome.scores[w] >= rules.win_threshold),
            None => assert_eq!(outcome.rounds_played(), rules.max_rounds),
        }
        assert!(matches!(events.first(), Some(Event::GameStarted { seed: s, .. }) if *s == seed));
        assert!(matches!(events.last(), Some(Event::GameEnded { .. })));
        let ended = events
            .iter()
            .filter(|e| matches!(e, Event::RoundEnded { .. }))
            .count();
        assert_eq!(ended as u32, outcome.rounds_played());
        assert!(game.last_board().is_some_and(|b| !b.is_empty()));
    }
}

#[test]
fn round_cap_stops_the_game_without_a_winner() {
    let rules = Rules {
        max_rounds: 1,
        win_threshold: i32::MAX,
        ..Rules::default()
    };
    let mut game = Game::new(2, rules, 9).expect("setup");
    let outcome = game.play(&mut NullSink);
    assert_eq!(outcome.rounds_played(), 1);
    assert_eq!(outcome.winner, None);
    assert!(game.is_over());
}

#[test]
fn rules_file_overrides_only_listed_fields() {
    let mut f = tempfile::NamedTempFile::new().expect("temp file");
    write!(f, r#"{{ "win_threshold": 250, "draw_penalty": 7 }}"#).expect("write");
    let rules = Rules::load_json(f.path()).expect("valid rules");
    assert_eq!(rules.win_threshold, 250);
    assert_eq!(rules.draw_penalty, 7);
    assert_eq!(rules.hexagon_bonus, 50);
    assert_eq!(rules.board_rows, 112);

    let mut bad = tempfile::NamedTempFile::new().expect("temp file");
    write!(bad, "not json").expect("write");
    assert!(Rules::load_json(bad.path()).is_err());

    let mut invalid = tempfile::NamedTempFile::new().expect("temp file");
    write!(invalid, r#"{{ "two_player_draws": 40 }}"#).expect("write");
    assert!(Rules::load_json(invalid.path()).is_err(), "two hands of 40 exceed the pool");

    let mut wide = tempfile::NamedTempFile::new().expect("temp file");
    write!(wide, r#"{{ "board_cols": 100000000 }}"#).expect("write");
    assert!(Rules::load_json(wide.path()).is_err(), "board too large");

    let mut largest = tempfile::NamedTempFile::new().expect("temp file");
    write!(largest, r#"{{ "board_rows": 1024, "board_cols": 1024 }}"#).expect("write");
    assert!(Rules::load_json(largest.path()).is_ok());
}
