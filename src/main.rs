//! Headless auto-battle runner.
//!
//! Both sides are driven by the random AI and every line is acknowledged
//! automatically.
//!
//! # Usage
//!
//! ```bash
//! # A wild battle on the meadow table
//! cargo run -- --seed 7
//!
//! # Three fish from the glacier, as JSON events
//! cargo run -- --encounter glacier --fishing --enemies 3 --json
//!
//! # A boss party
//! cargo run -- --boss lake_guardian
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use spectra_adventure::battle::ai::RandomAI;
use spectra_adventure::frontend::HeadlessFrontend;
use spectra_adventure::{
    validate_tables, BattleConfig, BattleRng, BattleSession, Encounter, Item, Player,
    PlayerControl, Result, Species, Spectra,
};

const MAX_FRAMES: usize = 2_000_000;

#[derive(Parser, Debug)]
#[command(name = "spectra-adventure")]
#[command(about = "Runs a headless auto-battle")]
#[command(version)]
struct Cli {
    /// Seed for every random decision; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Encounter table to roll wild enemies from
    #[arg(long, default_value = "meadow")]
    encounter: String,

    /// Fight a boss party instead of wild enemies
    #[arg(long, conflicts_with_all = ["fishing", "enemies"])]
    boss: Option<String>,

    /// Number of wild enemies
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
    enemies: u8,

    /// Use the table's fishing entries
    #[arg(long)]
    fishing: bool,

    /// RON file with engine settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print battle events as JSON lines instead of text
    #[arg(long)]
    json: bool,
}

fn starter_player() -> Result<Player> {
    let mut player = Player::new("Player");
    player.add_spectra(Spectra::new(Species::Coalshark, 12)?)?;
    player.add_spectra(Spectra::new(Species::Puzzle, 10)?)?;
    player.add_spectra(Spectra::new(Species::Jayraptor, 11)?)?;
    player.add_item(Item::Potion, 3)?;
    player.add_item(Item::Serum, 2)?;
    Ok(player)
}

fn run(cli: Cli) -> Result<()> {
    validate_tables()?;
    let config = match &cli.config {
        Some(path) => BattleConfig::load(path)?,
        None => BattleConfig::default(),
    };
    let rng = match cli.seed {
        Some(seed) => BattleRng::new_seeded(seed),
        None => BattleRng::new_random(),
    };
    let encounter = match cli.boss {
        Some(name) => Encounter::Boss(name),
        None => Encounter::Wild {
            table: cli.encounter,
            fishing: cli.fishing,
            count: cli.enemies as usize,
        },
    };

    let mut frontend = HeadlessFrontend::new(&config);
    let mut session = BattleSession::begin_encounter(
        starter_player()?,
        &encounter,
        PlayerControl::Ai(Box::new(RandomAI::new())),
        rng,
        config,
    )?;
    let outcome = frontend.run_to_end(&mut session, MAX_FRAMES);

    if cli.json {
        for event in session.events().events() {
            println!("{}", serde_json::to_string(event)?);
        }
    } else {
        for line in &frontend.shown {
            println!("{}", line);
        }
    }
    info!(?outcome, frames = frontend.frames, "done");
    let player = session.into_player();
    info!(party = player.party.len(), money = player.money, "roster after battle");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
