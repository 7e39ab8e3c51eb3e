use std::{fs, fs::OpenOptions, io::BufWriter, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use parlor_execution::{EngineConfig, EntropyRng, GameRng, RngSource};
use parlor_simulator::{Simulation, Wallet};
use parlor_types::casino::GameId;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Rounds to play per game
    #[arg(short, long, default_value_t = 10_000)]
    rounds: u64,

    /// Hex seed for reproducible runs (platform entropy when omitted)
    #[arg(short, long)]
    seed: Option<String>,

    /// Game to play, or "all"
    #[arg(short, long, default_value = "all")]
    game: String,

    /// Starting (and recharge) balance
    #[arg(long, default_value_t = 100_000)]
    balance: u64,

    /// Stake per round
    #[arg(long, default_value_t = 100)]
    bet: u64,

    /// YAML engine configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured tick interval
    #[arg(long)]
    tick_interval_ms: Option<u64>,

    /// Override the configured Mines grid side
    #[arg(long)]
    mines_grid_side: Option<u8>,

    /// Append every encoded settlement to this file
    #[arg(long)]
    round_log: Option<PathBuf>,

    #[arg(long, default_value_t = Level::WARN)]
    log_level: Level,
}

fn load_config(args: &Args) -> anyhow::Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_yaml::from_str(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    if let Some(interval) = args.tick_interval_ms {
        config.tick_interval_ms = interval;
    }
    if let Some(side) = args.mines_grid_side {
        config.mines_grid_side = side;
    }
    Ok(config)
}

fn parse_games(game: &str) -> anyhow::Result<Vec<GameId>> {
    if game.eq_ignore_ascii_case("all") {
        return Ok(GameId::ALL.to_vec());
    }
    let game = game.parse::<GameId>().map_err(anyhow::Error::msg)?;
    Ok(vec![game])
}

fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();

    // Create logger
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    let config = load_config(&args)?;
    let games = parse_games(&args.game)?;

    // Deterministic when seeded
    let rng: Box<dyn RngSource> = match &args.seed {
        Some(seed) => {
            let bytes = commonware_utils::from_hex(seed).context("invalid seed hex format")?;
            Box::new(GameRng::new(&bytes, 0))
        }
        None => Box::new(EntropyRng::new()),
    };

    let mut simulation = Simulation::new(config, Wallet::new(args.balance), rng, args.bet)?;
    if let Some(seed) = &args.seed {
        simulation = simulation.with_seed(seed.clone());
    }
    if let Some(path) = &args.round_log {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        simulation = simulation.with_round_log(BufWriter::new(file));
    }

    info!(rounds = args.rounds, games = games.len(), "starting simulation");
    let summary = simulation.run(&games, args.rounds)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("failed to encode summary")?
    );
    Ok(())
}
