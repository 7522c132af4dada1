//! Flappy Ball headless runner
//!
//! Plays runs with the autopilot (or idle input) and reports results. Windowing
//! and rendering are not part of this binary.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use flappy_ball::platform::FixedTicker;
use flappy_ball::sim::{Control, GameEvent, GameMode, GamePhase, InputEvent, autopilot};
use flappy_ball::{Game, Settings, Tuning};

#[derive(Debug, Parser)]
#[command(name = "flappy-ball", about = "Run Flappy Ball simulations headlessly")]
struct Args {
    /// Mode: 1 Easy, 2 Medium, 3 Hard, 4 Time Trial
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=4))]
    mode: u8,

    /// RNG seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum ticks per run
    #[arg(long, default_value_t = 60 * 60 * 5)]
    ticks: u64,

    /// Number of runs to play back to back
    #[arg(long, default_value_t = 1)]
    runs: u32,

    /// Balance sheet JSON
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Player settings JSON
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Pace ticks at the nominal 16ms instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Never flap (the ball just falls)
    #[arg(long)]
    no_autopilot: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let mut settings = args
        .settings
        .as_ref()
        .map(Settings::load)
        .unwrap_or_default();
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    let mut game = Game::from_settings(&settings, tuning);
    log::info!("Flappy Ball starting (seed {})", game.state().seed);

    for run in 1..=args.runs {
        let input = if game.state().phase == GamePhase::GameOver {
            InputEvent::Restart
        } else {
            InputEvent::SelectMode(args.mode)
        };
        game.push_input(input);

        if play_run(&mut game, &args) == Control::Quit {
            break;
        }

        let state = game.state();
        println!(
            "run {:>3}: {:<10} score {:>4}  lives {}  ticks {:>6}  {}",
            run,
            state.mode().as_str(),
            state.score,
            state.lives,
            state.time_ticks,
            if state.phase == GamePhase::GameOver {
                "game over"
            } else {
                "time limit"
            }
        );

        // A run cut off by the tick limit is abandoned before the next one
        if state.phase != GamePhase::GameOver {
            game.push_input(InputEvent::ReturnToMenu);
        }
    }

    let high_scores = game.high_scores();
    println!("best score: {}", game.state().best_score);
    if high_scores.is_empty() {
        println!("no scores on the leaderboard");
    }
    let mode_best = GameMode::from_selection(args.mode).and_then(|mode| high_scores.best_for(mode));
    if let Some(best) = mode_best {
        println!(
            "best {} run: {} in {} ticks",
            best.mode.as_str(),
            best.score,
            best.ticks
        );
    }
    for (rank, entry) in high_scores.entries.iter().enumerate() {
        println!(
            "  #{:<2} {:>4}  {:<10} {} ticks",
            rank + 1,
            entry.score,
            entry.mode.as_str(),
            entry.ticks
        );
    }

    game.push_input(InputEvent::Quit);
    game.step();
    Ok(())
}

/// Step until game over, the tick limit, or quit
fn play_run(game: &mut Game, args: &Args) -> Control {
    let mut ticker = FixedTicker::default();
    let mut last = Instant::now();

    loop {
        let due = if args.realtime {
            std::thread::sleep(ticker.until_next());
            let now = Instant::now();
            let due = ticker.advance(now - last);
            last = now;
            due
        } else {
            1
        };

        for _ in 0..due {
            if !args.no_autopilot && autopilot::wants_flap(game.state()) {
                game.push_input(InputEvent::Flap);
            }
            if game.step() == Control::Quit {
                return Control::Quit;
            }
            for event in game.last_events() {
                log_event(event);
            }

            let state = game.state();
            if state.phase == GamePhase::GameOver || state.time_ticks >= args.ticks {
                return Control::Continue;
            }
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::LifeLost { remaining, cause } => {
            log::info!("Lost a life to {:?}, {} left", cause, remaining)
        }
        GameEvent::PowerUpCollected(kind) => log::info!("Picked up {}", kind.label()),
        GameEvent::Scored { total, .. } => log::debug!("Score {}", total),
        _ => {}
    }
}
