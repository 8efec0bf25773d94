use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;
use triominos::render::{render_board, render_tray};
use triominos::{EventSink, Game, JsonLines, NullSink, Rules};

#[derive(Debug, Parser)]
#[command(name = "triominos", about = "Play one seeded game of Triominos")]
struct Args {
    /// Number of players (2..=4)
    #[arg(long, default_value_t = 2)]
    players: usize,

    /// Seed for shuffling the pool each round (deterministic)
    #[arg(long, default_value_t = 0x00C0FFEEu64)]
    seed: u64,

    /// Optional rules override file (JSON); unlisted fields keep their defaults
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Override the safety cap on the number of rounds
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Write every game event as one JSON object per line
    #[arg(long)]
    events: Option<PathBuf>,

    /// Skip printing the board and trays after each round
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut rules = match &args.rules {
        Some(path) => Rules::load_json(path).map_err(|e| format!("Rules load error: {e}"))?,
        None => Rules::default(),
    };
    if let Some(cap) = args.max_rounds {
        rules.max_rounds = cap;
    }

    let mut game =
        Game::new(args.players, rules, args.seed).map_err(|e| format!("Setup error: {e}"))?;
    println!(
        "[triominos] {} players, seed {:#x}, first to {} points",
        args.players, args.seed, rules.win_threshold
    );

    let mut json_sink = match &args.events {
        Some(path) => Some(JsonLines::new(BufWriter::new(File::create(path)?))),
        None => None,
    };
    let mut null_sink = NullSink;
    let sink: &mut dyn EventSink = match json_sink.as_mut() {
        Some(s) => s,
        None => &mut null_sink,
    };

    let quiet = args.quiet;
    let outcome = game.play_observed(sink, |game, result| {
        let winner = &game.players()[result.winner];
        println!(
            "[triominos] Round {}: '{}' won {} (+{}), {} tiles placed in {} turns",
            result.round,
            winner.name,
            if result.empty_tray { "by emptying their tray" } else { "with the fewest tiles" },
            result.bonus,
            result.tiles_placed,
            result.turns
        );
        if quiet {
            return;
        }
        if let Some(board) = game.last_board() {
            print!("{}", render_board(board));
        }
        for p in game.players() {
            println!("{} ({} tiles, score {}):", p.name, p.tray().len(), p.score);
            print!("{}", render_tray(p.tray()));
        }
    });

    println!("[triominos] Final scores after {} round(s):", outcome.rounds_played());
    for (p, won) in game.players().iter().zip(&outcome.rounds_won) {
        println!("  {:<10} {:>5}  (rounds won: {won})", p.name, p.score);
    }
    match outcome.winner {
        Some(w) => println!("[triominos] Winner: {}", game.players()[w].name),
        None => println!("[triominos] No winner within {} rounds", rules.max_rounds),
    }

    if let Some(sink) = json_sink {
        let written = sink.written();
        sink.finish()?;
        if let Some(path) = &args.events {
            println!("[triominos] Wrote {written} events to {}", path.display());
        }
    }
    Ok(())
}
