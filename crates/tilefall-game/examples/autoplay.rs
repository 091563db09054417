//! Example driving headless games to measure engine behavior.
//!
//! This example shows how to:
//! - Create a `BoardController` and start seeded games
//! - Resolve turns without a presentation layer (the `()` observer)
//! - Aggregate shuffle and deadlock statistics over many games
//!
//! # Usage
//!
//! ```sh
//! cargo run --example autoplay
//! ```
//!
//! Sweep a thousand 4x4 games with a 3-color palette:
//!
//! ```sh
//! cargo run --example autoplay -- --games 1000 --width 4 --height 4 --palette 3
//! ```
//!
//! Cap the number of turns simulated per game (default: 200):
//!
//! ```sh
//! cargo run --example autoplay -- --turns 50
//! ```

use std::process;

use clap::Parser;
use rayon::prelude::*;
use tilefall_board::BoardConfig;
use tilefall_game::{BoardController, GameConfig, SelectionOutcome};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Number of games to simulate.
    #[arg(long, value_name = "COUNT", default_value_t = 100)]
    games: u64,

    /// Maximum turns to play per game.
    #[arg(long, value_name = "COUNT", default_value_t = 200)]
    turns: usize,

    /// Board width in columns.
    #[arg(long, value_name = "CELLS", default_value_t = 8)]
    width: u32,

    /// Board height in rows.
    #[arg(long, value_name = "CELLS", default_value_t = 8)]
    height: u32,

    /// Number of colors in play (2-6).
    #[arg(long, value_name = "COLORS", default_value_t = 6)]
    palette: usize,
}

#[derive(Debug, Default)]
struct Stats {
    turns: u64,
    tiles_cleared: u64,
    shuffles: u64,
    unresolved_deadlocks: u64,
}

impl Stats {
    fn merge(mut self, other: Self) -> Self {
        self.turns += other.turns;
        self.tiles_cleared += other.tiles_cleared;
        self.shuffles += other.shuffles;
        self.unresolved_deadlocks += other.unresolved_deadlocks;
        self
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = GameConfig {
        board: BoardConfig {
            width: args.width,
            height: args.height,
            palette_size: args.palette,
            ..BoardConfig::default()
        },
        ..GameConfig::default()
    };
    if let Err(err) = BoardController::new(config) {
        eprintln!("invalid configuration: {err}");
        process::exit(2);
    }

    let stats = (0..args.games)
        .into_par_iter()
        .map(|seed| play_one_game(config, seed, args.turns))
        .reduce(Stats::default, Stats::merge);

    println!("Configuration:");
    println!(
        "  {}x{} board, {} colors, {} games, up to {} turns each",
        args.width, args.height, args.palette, args.games, args.turns
    );
    println!();
    println!("Results:");
    println!("  turns played: {}", stats.turns);
    println!("  tiles cleared: {}", stats.tiles_cleared);
    println!("  shuffles: {}", stats.shuffles);
    println!("  unresolved deadlocks: {}", stats.unresolved_deadlocks);
}

/// Plays one seeded game by always selecting the first clearable group in
/// row-major order.
fn play_one_game(config: GameConfig, seed: u64, max_turns: usize) -> Stats {
    let mut controller = BoardController::new(config).expect("configuration checked in main");
    controller.start_new_game_with_seed(seed, &mut ());

    let mut stats = Stats::default();
    for _ in 0..max_turns {
        let board = controller.board().expect("game started");
        let Some(target) = board
            .grid()
            .positions()
            .find(|&coord| board.connected_group(coord).len() >= 2)
        else {
            break;
        };

        match controller.try_select(target, &mut ()) {
            SelectionOutcome::Cleared(report) => {
                stats.turns += 1;
                stats.tiles_cleared += report.cleared as u64;
                stats.shuffles += u64::from(report.shuffled);
                if report.deadlock_unresolved {
                    stats.unresolved_deadlocks += 1;
                    break;
                }
            }
            outcome => unreachable!("a clearable group was selected, got {outcome:?}"),
        }
    }
    stats
}
