//! Keno implementation.
//!
//! The ticket carries exactly ten distinct numbers in 1..=80. Numbers are
//! called one per scheduled tick, without replacement; once the configured
//! number of calls (20 by default) is reached the round pays on the match
//! count.

use std::collections::BTreeSet;

use tracing::debug;

use super::deck::draw_without_replacement;
use super::schedule::TickSchedule;
use super::{paytable, CasinoGame, Decision, Opening, Outcome, Resolution, RngSource, RoundState, Step};
use crate::{EngineConfig, EngineError};
use parlor_types::casino::{KENO_PICKS, KENO_POOL};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KenoState {
    pub picks: Vec<u8>,
    pub called: Vec<u8>,
    pub calls: u8,
    pub schedule: TickSchedule,
}

impl KenoState {
    pub fn matches(&self) -> usize {
        self.called.iter().filter(|n| self.picks.contains(n)).count()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KenoOutcome {
    pub picks: Vec<u8>,
    pub called: Vec<u8>,
    pub matches: usize,
}

/// Ten distinct numbers chosen at random.
pub fn quick_pick(rng: &mut dyn RngSource) -> Result<Vec<u8>, EngineError> {
    let pool: Vec<u8> = (1..=KENO_POOL).collect();
    let mut picks = draw_without_replacement(rng, &pool, KENO_PICKS)?;
    picks.sort_unstable();
    Ok(picks)
}

pub struct Keno;

impl CasinoGame for Keno {
    type Choice = Vec<u8>;
    type State = KenoState;

    fn validate(picks: &Vec<u8>, _config: &EngineConfig) -> Result<(), EngineError> {
        if picks.len() != KENO_PICKS {
            return Err(EngineError::InvalidBet(format!(
                "keno needs {KENO_PICKS} picks, got {}",
                picks.len()
            )));
        }
        if picks.iter().any(|n| !(1..=KENO_POOL).contains(n)) {
            return Err(EngineError::InvalidBet("keno picks must be in 1..=80".into()));
        }
        if picks.iter().collect::<BTreeSet<_>>().len() != picks.len() {
            return Err(EngineError::InvalidBet("keno picks must be distinct".into()));
        }
        Ok(())
    }

    fn init(
        picks: &Vec<u8>,
        config: &EngineConfig,
        _rng: &mut dyn RngSource,
    ) -> Result<Opening, EngineError> {
        Ok(Opening::Resolving(RoundState::Keno(KenoState {
            picks: picks.clone(),
            called: Vec::with_capacity(config.keno_calls as usize),
            calls: config.keno_calls,
            schedule: TickSchedule::new(config.tick_interval_ms),
        })))
    }

    fn process_move(
        state: &mut KenoState,
        decision: Decision,
        rng: &mut dyn RngSource,
    ) -> Result<Step, EngineError> {
        if decision != Decision::Tick {
            return Err(EngineError::InvalidDecision("keno calls numbers on tick only"));
        }
        state.schedule.advance()?;

        let remaining: Vec<u8> = (1..=KENO_POOL)
            .filter(|n| !state.called.contains(n))
            .collect();
        let number = draw_without_replacement(rng, &remaining, 1)?[0];
        debug!(number, call = state.called.len() + 1, "keno call");
        state.called.push(number);

        if state.called.len() < state.calls as usize {
            return Ok(Step::Continue);
        }
        state.schedule.cancel();
        let matches = state.matches();
        let outcome = KenoOutcome {
            picks: state.picks.clone(),
            called: state.called.clone(),
            matches,
        };
        Ok(Step::Resolved(Resolution::new(
            Outcome::Keno(outcome),
            paytable::keno(matches)?,
        )))
    }
}
