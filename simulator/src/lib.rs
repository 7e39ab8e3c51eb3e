//! Round simulator.
//!
//! Plays many rounds of each game through the engine against an in-memory
//! wallet and tallies what was wagered and returned.

use std::{collections::BTreeMap, io};

use anyhow::{bail, Context};
use commonware_codec::Encode;
use parlor_execution::{
    BalanceLedger, Bet, Engine, EngineConfig, RngSource, RoundResult, SessionState,
};
use parlor_types::casino::GameId;
use serde::Serialize;
use tracing::{debug, info};

pub mod strategy;

/// Upper bound on sub-decisions in one round.
const MAX_DECISIONS: usize = 10_000;

/// In-memory balance that tops itself back up when it runs dry.
#[derive(Clone, Debug)]
pub struct Wallet {
    balance: u64,
    top_up: u64,
    recharges: u64,
}

impl Wallet {
    pub fn new(balance: u64) -> Self {
        Self {
            balance,
            top_up: balance,
            recharges: 0,
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn recharges(&self) -> u64 {
        self.recharges
    }

    /// Restore the starting balance if it cannot cover `stake`.
    pub fn cover(&mut self, stake: u64) {
        if self.balance < stake {
            self.balance = self.top_up.max(stake);
            self.recharges += 1;
            debug!(balance = self.balance, "wallet recharged");
        }
    }
}

impl BalanceLedger for Wallet {
    fn apply_balance_delta(&mut self, delta: i64) {
        self.balance = self.balance.saturating_add_signed(delta);
    }
}

/// Running totals for one game.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GameStats {
    pub rounds: u64,
    pub wins: u64,
    pub wagered: u64,
    pub returned: u64,
    /// Returned over wagered.
    pub rtp: f64,
}

impl GameStats {
    fn record(&mut self, result: &RoundResult) {
        let settlement = &result.settlement;
        self.rounds += 1;
        self.wagered = self.wagered.saturating_add(settlement.amount);
        self.returned = self.returned.saturating_add(settlement.credited);
        if settlement.is_win() {
            self.wins += 1;
        }
        self.rtp = if self.wagered == 0 {
            0.0
        } else {
            self.returned as f64 / self.wagered as f64
        };
    }

    fn merge(&mut self, other: &GameStats) {
        self.rounds += other.rounds;
        self.wins += other.wins;
        self.wagered = self.wagered.saturating_add(other.wagered);
        self.returned = self.returned.saturating_add(other.returned);
        self.rtp = if self.wagered == 0 {
            0.0
        } else {
            self.returned as f64 / self.wagered as f64
        };
    }
}

/// Report printed at the end of a run.
#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    pub seed: Option<String>,
    pub bet: u64,
    pub balance: u64,
    pub recharges: u64,
    pub games: BTreeMap<String, GameStats>,
    pub total: GameStats,
}

pub struct Simulation<R: RngSource> {
    engine: Engine<Wallet, R>,
    bet: u64,
    seed: Option<String>,
    round_log: Option<Box<dyn io::Write>>,
    stats: BTreeMap<GameId, GameStats>,
}

impl<R: RngSource> Simulation<R> {
    pub fn new(config: EngineConfig, wallet: Wallet, rng: R, bet: u64) -> anyhow::Result<Self> {
        if bet == 0 {
            bail!("bet must be positive");
        }
        let engine = Engine::new(config, wallet, rng).context("invalid engine config")?;
        Ok(Self {
            engine,
            bet,
            seed: None,
            round_log: None,
            stats: BTreeMap::new(),
        })
    }

    /// Label the run with the seed it was started from.
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Append every settlement, encoded, to `log`.
    pub fn with_round_log(mut self, log: impl io::Write + 'static) -> Self {
        self.round_log = Some(Box::new(log));
        self
    }

    pub fn wallet(&self) -> &Wallet {
        self.engine.ledger()
    }

    /// Play one round of `game` with the fixed strategy.
    pub fn play_round(&mut self, game: GameId) -> anyhow::Result<RoundResult> {
        self.engine.ledger_mut().cover(self.bet);
        let balance = self.engine.ledger().balance();
        let bet = Bet::new(self.bet, strategy::choice(game));
        let start = self
            .engine
            .start_round(game, bet, balance)
            .with_context(|| format!("failed to start {game}"))?;

        let mut state = start.state;
        let mut decisions = 0;
        while let SessionState::Resolving(round) = &state {
            decisions += 1;
            if decisions > MAX_DECISIONS {
                bail!("{game} round {} did not resolve", start.session_id);
            }
            let decision = strategy::decide(round);
            state = self
                .engine
                .apply_sub_decision(start.session_id, decision)
                .with_context(|| format!("{game} rejected {decision:?}"))?
                .state;
        }

        let result = self.engine.result(start.session_id)?;
        self.engine.reset(start.session_id)?;
        if let Some(log) = self.round_log.as_mut() {
            log.write_all(&result.settlement.encode())
                .context("failed to append to round log")?;
        }
        self.stats.entry(game).or_default().record(&result);
        Ok(result)
    }

    /// Play `rounds` rounds of every game in `games`.
    pub fn run(&mut self, games: &[GameId], rounds: u64) -> anyhow::Result<Summary> {
        for &game in games {
            for _ in 0..rounds {
                self.play_round(game)?;
            }
            if let Some(stats) = self.stats.get(&game) {
                info!(%game, rounds = stats.rounds, rtp = stats.rtp, "game finished");
            }
        }
        if let Some(log) = self.round_log.as_mut() {
            log.flush().context("failed to flush round log")?;
        }
        Ok(self.summary())
    }

    pub fn summary(&self) -> Summary {
        let mut total = GameStats::default();
        for stats in self.stats.values() {
            total.merge(stats);
        }
        Summary {
            seed: self.seed.clone(),
            bet: self.bet,
            balance: self.wallet().balance(),
            recharges: self.wallet().recharges(),
            games: self
                .stats
                .iter()
                .map(|(game, stats)| (game.name().to_string(), stats.clone()))
                .collect(),
            total,
        }
    }
}
