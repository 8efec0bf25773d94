use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use triominos::{seed_for_game, Game, GameOutcome, NullSink, Rules};

#[derive(Debug, Parser)]
#[command(name = "simulate", about = "Play many seeded Triominos games in parallel and summarise them")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: u64,

    /// Number of players per game (2..=4)
    #[arg(long, default_value_t = 2)]
    players: usize,

    /// Base seed; game i uses a seed derived from (seed, i)
    #[arg(long, default_value_t = 0x00C0FFEEu64)]
    seed: u64,

    /// Optional rules override file (JSON)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Worker threads (defaults to rayon's choice)
    #[arg(long)]
    threads: Option<usize>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    no_progress: bool,
}

#[derive(Debug, Default)]
struct Summary {
    games: u64,
    wins: Vec<u64>,
    no_winner: u64,
    rounds: u64,
    max_rounds: u32,
    empty_tray_rounds: u64,
}

impl Summary {
    fn new(players: usize) -> Self {
        Self {
            wins: vec![0; players],
            ..Self::default()
        }
    }

    fn add(&mut self, outcome: &GameOutcome) {
        self.games += 1;
        match outcome.winner {
            Some(w) => self.wins[w] += 1,
            None => self.no_winner += 1,
        }
        self.rounds += u64::from(outcome.rounds_played());
        self.max_rounds = self.max_rounds.max(outcome.rounds_played());
        self.empty_tray_rounds += outcome.rounds.iter().filter(|r| r.empty_tray).count() as u64;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let rules = match &args.rules {
        Some(path) => Rules::load_json(path).map_err(|e| format!("Rules load error: {e}"))?,
        None => Rules::default(),
    };
    Rules::check_player_count(args.players).map_err(|e| format!("Setup error: {e}"))?;
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new().num_threads(n).build_global()?;
    }

    let pb = if args.no_progress {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(args.games)
    };
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] games {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let start = Instant::now();
    let outcomes: Vec<GameOutcome> = (0..args.games)
        .into_par_iter()
        .map(|i| -> Result<GameOutcome, triominos::SetupError> {
            let mut game = Game::new(args.players, rules, seed_for_game(args.seed, i))?;
            let outcome = game.play(&mut NullSink);
            pb.inc(1);
            Ok(outcome)
        })
        .collect::<Result<_, _>>()?;
    pb.finish_with_message("done");

    let mut summary = Summary::new(args.players);
    for o in &outcomes {
        summary.add(o);
    }

    let elapsed = start.elapsed().as_secs_f64().max(1e-6);
    println!(
        "[simulate] {} games, {} players, base seed {:#x}, {:.1} games/s",
        summary.games,
        args.players,
        args.seed,
        summary.games as f64 / elapsed
    );
    for (seat, wins) in summary.wins.iter().enumerate() {
        let pct = if summary.games == 0 { 0.0 } else { 100.0 * *wins as f64 / summary.games as f64 };
        println!("  {:<10} wins {:>6} ({pct:.1}%)", triominos::Player::seat_name(seat), wins);
    }
    if summary.no_winner > 0 {
        println!("  no winner   {:>6} (round cap {})", summary.no_winner, rules.max_rounds);
    }
    let avg = if summary.games == 0 { 0.0 } else { summary.rounds as f64 / summary.games as f64 };
    println!(
        "[simulate] rounds per game: avg {avg:.2}, max {}; rounds won by emptying a tray: {}",
        summary.max_rounds, summary.empty_tray_rounds
    );
    Ok(())
}
