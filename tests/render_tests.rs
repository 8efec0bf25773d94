use triominos::render::{render_board, render_tray, tile_glyph, GLYPH_ROWS};
use triominos::{Board, Event, JsonLines, Orientation, Pose, Rotation, Rules, Tile};

#[test]
fn glyphs_show_posed_corners() {
    let t = Tile::new(1, 1, 2, 3);
    let down = tile_glyph(&t, Pose::new(Orientation::Down, Rotation::R0), false);
    assert_eq!(down.len(), GLYPH_ROWS);
    assert_eq!(down[1], "\\2   3/");
    assert_eq!(down[3], "\\1/");
    assert_eq!(down[4], "v");

    let up = tile_glyph(&t, Pose::new(Orientation::Up, Rotation::R0), true);
    assert_eq!(up[0], "   ^");
    assert_eq!(up[1], "  /1\\");
    assert_eq!(up[3], "/3   2\\");
}

#[test]
fn board_glyph_rows_interlock() {
    let t = Tile::new(1, 1, 2, 3);
    let down = tile_glyph(&t, Pose::new(Orientation::Down, Rotation::R0), false);
    let up = tile_glyph(&t, Pose::new(Orientation::Up, Rotation::R0), false);
    for i in 0..GLYPH_ROWS {
        assert_eq!(down[i].len() + up[i].len(), 10, "row {i}");
    }
}

#[test]
fn board_render_covers_the_bounding_box() {
    let mut b = Board::new(Rules::default());
    assert!(render_board(&b).contains("Played Piece Count:0"));

    b.place(Tile::new(1, 1, 2, 3), 56, 56, Rotation::R0, None).expect("opening");
    b.place(Tile::new(2, 3, 4, 1), 56, 57, Rotation::R0, None).expect("second");
    let text = render_board(&b);
    assert!(text.contains("Boundaries:(56,56,56,57)"));
    assert!(text.contains("  56 "));
    assert!(text.contains("\\2   3/"));
    assert!(text.contains("/1   4\\"));
}

#[test]
fn tray_render_lists_every_tile_upright() {
    let tray = vec![Tile::new(1, 0, 0, 0), Tile::new(2, 5, 4, 3)];
    let text = render_tray(&tray);
    assert_eq!(text.lines().count(), GLYPH_ROWS);
    assert!(text.contains("/0\\") && text.contains("/5\\"));
    assert_eq!(render_tray(&[]), "  [<empty>]\n");
}

#[test]
fn json_lines_sink_writes_one_object_per_event() {
    let mut sink = JsonLines::new(Vec::new());
    let events = [
        Event::GameStarted {
            players: vec!["Player A".into(), "Player B".into()],
            seed: 7,
        },
        Event::GameEnded {
            rounds: 3,
            winner: Some(1),
            scores: vec![120, 410],
        },
    ];
    for e in &events {
        triominos::EventSink::emit(&mut sink, e);
    }
    assert_eq!(sink.written(), 2);
    let bytes = sink.finish().expect("in-memory writes succeed");
    let text = String::from_utf8(bytes).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    let first: serde_json::Value = serde_json::from_str(lines[0]).expect("json");
    assert_eq!(first["event"], "game_started");
    assert_eq!(first["seed"], 7);
    let back: Event = serde_json::from_str(lines[1]).expect("round trip");
    assert_eq!(back, events[1]);
}
