//! Skirmish runner
//!
//! Plays the sample skirmish AI vs AI and prints either the full battle log
//! or a JSON summary.

use std::path::PathBuf;

use clap::Parser;
use grid_tactics::battle::{auto_battle, skirmish};
use grid_tactics::core::config::BattleConfig;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Grid Tactics skirmish runner
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Play the sample skirmish with both teams under AI control")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum turns before the battle is called off
    #[arg(long, default_value_t = 500)]
    max_turns: u32,

    /// Battle configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,

    /// Log every battle event
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Serialize)]
struct Survivor {
    name: String,
    team: String,
    hp: i32,
    mp: i32,
}

/// JSON output structure
#[derive(Serialize)]
struct BattleSummary {
    outcome: String,
    turns: u32,
    seed: u64,
    events: usize,
    survivors: Vec<Survivor>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "grid_tactics=debug"
    } else {
        "grid_tactics=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => BattleConfig::load(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Using default battle config");
            BattleConfig::default()
        }),
        None => BattleConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "Dwayne & Elizabeth vs Two Goblin Archers!");

    let mut battle = skirmish(config, seed);
    let outcome = auto_battle(&mut battle, args.max_turns);

    let survivors = battle
        .roster()
        .living()
        .map(|c| Survivor {
            name: c.name().to_string(),
            team: c.team().to_string(),
            hp: c.hp(),
            mp: c.mp(),
        })
        .collect();
    let summary = BattleSummary {
        outcome: outcome.to_string(),
        turns: battle.turn(),
        seed,
        events: battle.events().len(),
        survivors,
    };

    match args.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        other => {
            if other != "text" {
                tracing::warn!(format = other, "Unknown format, defaulting to text");
            }
            for event in battle.events().iter() {
                println!("[turn {:>3}] {}", event.turn, event.description);
            }
            println!();
            print!("{}", battle.grid().render(battle.roster()));
            println!();
            println!("Outcome: {}", summary.outcome);
            println!("Turns: {}", summary.turns);
            println!("Seed: {}", summary.seed);
            for s in &summary.survivors {
                println!("  {} [{}] HP {} MP {}", s.name, s.team, s.hp, s.mp);
            }
        }
    }
    Ok(())
}
