//! Simulated game between computer players.
//!
//! ```text
//! RUST_LOG=info cargo run --example simulate -- [players] [seconds]
//! ```

use std::env;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use setrs::{Game, GameOptions, LogReporter};

fn arg(index: usize, default: u64) -> u64 {
    env::args()
        .nth(index)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let players = arg(1, 3) as usize;
    let limit = Duration::from_secs(arg(2, 30));
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let options = GameOptions::default()
        .with_computer_players(players)
        .with_round_duration(Duration::from_secs(20))
        .with_hints(true);
    let game = match Game::new(options, seed) {
        Ok(game) => game.with_reporter(Arc::new(LogReporter)),
        Err(err) => {
            eprintln!("invalid options: {err}");
            return;
        }
    };

    let handle = match Arc::new(game).start() {
        Ok(handle) => handle,
        Err(err) => {
            eprintln!("could not start game: {err}");
            return;
        }
    };

    let started = Instant::now();
    while !handle.is_finished() && started.elapsed() < limit {
        thread::sleep(Duration::from_millis(100));
    }
    if !handle.is_finished() {
        println!("Time limit reached, stopping.");
        handle.terminate();
    }

    match handle.join() {
        Ok(report) => {
            for (player, score) in report.scores.iter().enumerate() {
                println!("player {player}: {score}");
            }
            println!("winners: {:?}", report.winners);
        }
        Err(err) => eprintln!("{err}"),
    }
}
