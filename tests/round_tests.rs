use triominos::{
    generate_pool, rng_for_round, Event, NullSink, PenaltyReason, Phase, Player, Round, Rules, StartKind,
    Tile, TileStatus, TurnOutcome,
};

fn seats(n: usize) -> Vec<Player> {
    (0..n).map(|i| Player::new(i, Player::seat_name(i))).collect()
}

#[test]
fn zero_triplet_opens_for_30() {
    let mut players = seats(2);
    let mut events: Vec<Event> = Vec::new();
    // Unshuffled pool: seat 0 is dealt 0-0-0 first.
    let mut round = Round::new(1, Rules::default(), &mut players);
    round.deal(&mut events);

    assert_eq!(round.opener(), Some((0, 1, StartKind::ZeroTriplet)));
    assert_eq!(round.players()[0].tray().len(), 9);
    assert_eq!(round.players()[1].tray().len(), 9);
    assert_eq!(round.pool_len(), 56 - 18);

    match round.take_turn(&mut events) {
        TurnOutcome::Placed(c) => {
            assert_eq!(c.tile_id, 1);
            assert_eq!((c.row, c.col), (56, 56));
            assert_eq!(c.placement.score, 30);
            assert_eq!(c.placement.start_bonus, 30);
        }
        other => panic!("expected a placement, got {other:?}"),
    }
    assert_eq!(round.players()[0].score, 30);
    assert_eq!(round.status_of(1), Some(TileStatus::Placed { row: 56, col: 56 }));
    assert_eq!(round.current_player(), 1);
    assert!(matches!(
        events.first(),
        Some(Event::RoundStarted { round: 1, first_draws: 9 })
    ));
}

#[test]
fn four_players_are_dealt_seven_each() {
    let mut players = seats(4);
    let mut round = Round::new(1, Rules::default(), &mut players);
    round.deal(&mut NullSink);
    for p in round.players() {
        assert_eq!(p.tray().len(), 7);
    }
    assert_eq!(round.pool_len(), 56 - 28);
    assert!(round.check_ownership().is_ok());
}

#[test]
fn shuffled_round_terminates_and_conserves_tiles() {
    for players in 2..=4 {
        for seed in [1u64, 7, 0xC0FFEE] {
            let mut seated = seats(players);
            let mut round = Round::new(1, Rules::default(), &mut seated);
            round.shuffle(&mut rng_for_round(seed, 1));
            round.deal(&mut NullSink);
            assert!(round.check_ownership().is_ok());

            let mut turns = 0;
            while round.phase() == Phase::Playing {
                round.take_turn(&mut NullSink);
                turns += 1;
                if let Err(e) = round.check_ownership() {
                    panic!("seed {seed}, {players} players, turn {turns}: {e}");
                }
                assert!(turns < 1_000, "round did not terminate");
            }
            assert_eq!(round.take_turn(&mut NullSink), TurnOutcome::Idle);

            let result = round.resolve(&mut NullSink);
            assert_eq!(result.tiles_placed, round.played().len());
            assert_eq!(round.phase(), Phase::Over);
        }
    }
}

fn tiny_rules(draws: usize) -> Rules {
    Rules {
        two_player_draws: draws,
        ..Rules::default()
    }
}

#[test]
fn emptying_the_tray_wins_25_plus_the_others_trays() {
    let mut players = seats(2);
    let pool = vec![Tile::new(1, 5, 5, 5), Tile::new(2, 0, 0, 1), Tile::new(3, 0, 1, 2)];
    let mut events = Vec::new();
    let mut round = Round::with_pool(1, tiny_rules(1), &mut players, pool);
    let result = round.play(&mut events);

    assert_eq!(result.winner, 0);
    assert!(result.empty_tray);
    assert_eq!(result.bonus, 25 + 1);
    assert_eq!(round.players()[0].score, 25 + 26, "opening triplet 15+10, then the round bonus");
    assert_eq!(round.players()[0].rounds_won, 1);
    assert_eq!(round.status_of(3), Some(TileStatus::InPool));
    assert!(matches!(
        events.last(),
        Some(Event::RoundEnded { winner: 0, empty_tray: true, bonus: 26, .. })
    ));
}

#[test]
fn penalties_then_fewest_tiles_wins() {
    let mut players = seats(2);
    // Seat 0: 5-5-5, 4-4-4. Seat 1: 0-0-1, 0-1-1. Left in the pool: 0-0-2.
    let pool = vec![
        Tile::new(1, 5, 5, 5),
        Tile::new(2, 0, 0, 1),
        Tile::new(3, 4, 4, 4),
        Tile::new(4, 0, 1, 1),
        Tile::new(5, 0, 0, 2),
    ];
    let mut events = Vec::new();
    let mut round = Round::with_pool(1, tiny_rules(2), &mut players, pool);
    round.deal(&mut events);
    assert_eq!(round.opener(), Some((0, 1, StartKind::Triplet)));
    assert_eq!(round.status_of(2), Some(TileStatus::InTray(1)));
    assert_eq!(round.status_of(99), None);

    assert!(matches!(round.take_turn(&mut events), TurnOutcome::Placed(_)));
    assert_eq!(round.take_turn(&mut events), TurnOutcome::Drew { tile: 5 });
    assert_eq!(round.current_player(), 1, "a player who drew tries again");
    assert_eq!(round.take_turn(&mut events), TurnOutcome::Blocked);
    assert_eq!(round.phase(), Phase::Playing);
    assert_eq!(round.take_turn(&mut events), TurnOutcome::Blocked);
    assert_eq!(round.phase(), Phase::Over, "everyone blocked in a row");
    assert!(round.check_ownership().is_ok());

    let result = round.resolve(&mut events);
    assert_eq!(result.winner, 0);
    assert!(!result.empty_tray);
    assert_eq!(result.bonus, 1 + 2 + 2, "seat 1 still holds 0-0-1, 0-1-1, 0-0-2");
    assert_eq!(round.players()[0].score, 25 - 10 + 5);
    assert_eq!(round.players()[1].score, -5 - 10);
    assert_eq!(round.players()[0].rounds_won, 0);

    let penalties: Vec<(usize, i32, PenaltyReason)> = events
        .iter()
        .filter_map(|e| match e {
            Event::PenaltyApplied { player, points, reason, .. } => Some((*player, *points, *reason)),
            _ => None,
        })
        .collect();
    assert_eq!(
        penalties,
        vec![
            (1, 5, PenaltyReason::Draw),
            (1, 10, PenaltyReason::Blocked),
            (0, 10, PenaltyReason::Blocked),
        ]
    );
}

#[test]
fn fewest_tiles_tie_goes_to_the_earliest_seat() {
    let mut players = seats(3);
    let rules = Rules {
        multi_player_draws: 2,
        ..Rules::default()
    };
    let pool: Vec<Tile> = generate_pool().into_iter().skip(10).take(6).collect();
    let others: i32 = {
        let mut round = Round::with_pool(1, rules, &mut players, pool);
        round.deal(&mut NullSink);
        let held: i32 = round.players()[1..].iter().map(Player::tray_value).sum();
        let result = round.resolve(&mut NullSink);
        assert_eq!(result.winner, 0);
        assert!(!result.empty_tray);
        assert_eq!(result.bonus, held);
        held
    };
    assert_eq!(players[0].score, others);
}

#[test]
fn new_round_clears_leftover_trays() {
    let mut players = seats(2);
    players[0].receive(Tile::new(40, 1, 1, 1));
    let round = Round::new(2, Rules::default(), &mut players);
    assert!(round.players().iter().all(Player::has_empty_tray));
    assert!(round.check_ownership().is_ok());
}

#[test]
fn the_opening_deal_reports_every_drawn_tile() {
    let mut players = seats(2);
    let mut events: Vec<Event> = Vec::new();
    let mut round = Round::new(1, Rules::default(), &mut players);
    round.deal(&mut events);

    let drawn: Vec<(usize, u8)> = events
        .iter()
        .filter_map(|e| match e {
            Event::TileDrawn { round: 1, player, tile } => Some((*player, *tile)),
            _ => None,
        })
        .collect();
    assert_eq!(drawn.len(), 18);
    // Unshuffled pool, dealt one tile per seat in turn.
    assert_eq!(&drawn[..4], &[(0, 1), (1, 2), (0, 3), (1, 4)]);
    for (seat, tile) in drawn {
        assert_eq!(round.status_of(tile), Some(TileStatus::InTray(seat)));
    }
    assert!(matches!(events.first(), Some(Event::RoundStarted { .. })));
}

#[test]
fn tray_status_uses_seat_indices() {
    let mut players = vec![Player::new(7, "Ann"), Player::new(9, "Bob")];
    let mut round = Round::new(1, Rules::default(), &mut players);
    round.deal(&mut NullSink);

    assert_eq!(round.players()[0].id, 0);
    assert_eq!(round.players()[1].id, 1);
    assert_eq!(round.status_of(1), Some(TileStatus::InTray(0)));
    assert_eq!(round.status_of(2), Some(TileStatus::InTray(1)));
    assert!(round.check_ownership().is_ok());
}
