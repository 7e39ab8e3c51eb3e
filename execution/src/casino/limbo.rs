//! Limbo implementation.
//!
//! The player names a target `T` (at least 1.01x). The crash point is drawn
//! uniformly in [1, T) and the displayed multiplier rises as
//! `2^(progress * log2 T)` over three seconds, so it always reaches the crash
//! point before the target. Cashing out during the rise pays the multiplier
//! shown; reaching the crash point loses.

use parlor_types::casino::{Multiplier, LIMBO_MAX_TARGET, LIMBO_MIN_TARGET, LIMBO_RISE_MS};
use tracing::debug;

use super::crash::CurveFinish;
use super::schedule::TickSchedule;
use super::{paytable, CasinoGame, Decision, Opening, Outcome, Resolution, RngSource, RoundState, Step};
use crate::{EngineConfig, EngineError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LimboState {
    pub target: Multiplier,
    pub crash_point: Multiplier,
    pub current: Multiplier,
    pub schedule: TickSchedule,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LimboOutcome {
    pub finish: CurveFinish,
    pub target: Multiplier,
    pub crash_point: Multiplier,
    pub reached: Multiplier,
}

/// Multiplier shown after `elapsed_ms` on the way to `target`.
pub fn curve(target: Multiplier, elapsed_ms: u64) -> Multiplier {
    if elapsed_ms >= LIMBO_RISE_MS {
        return target;
    }
    let progress = elapsed_ms as f64 / LIMBO_RISE_MS as f64;
    let shown = (progress * target.as_f64().log2()).exp2();
    Multiplier::from_f64(shown).clamp(Multiplier::ONE, target)
}

fn resolve(state: &mut LimboState, finish: CurveFinish) -> Step {
    state.schedule.cancel();
    let multiplier = match finish {
        CurveFinish::CashedOut => state.current,
        CurveFinish::Crashed => paytable::LOSS,
    };
    let outcome = LimboOutcome {
        finish,
        target: state.target,
        crash_point: state.crash_point,
        reached: state.current,
    };
    Step::Resolved(Resolution::new(Outcome::Limbo(outcome), multiplier))
}

pub struct Limbo;

impl CasinoGame for Limbo {
    type Choice = Multiplier;
    type State = LimboState;

    fn validate(target: &Multiplier, _config: &EngineConfig) -> Result<(), EngineError> {
        if !(LIMBO_MIN_TARGET..=LIMBO_MAX_TARGET).contains(&target.bps()) {
            return Err(EngineError::InvalidBet(format!(
                "limbo target {target} outside 1.01x..=10000.00x"
            )));
        }
        Ok(())
    }

    fn init(
        target: &Multiplier,
        config: &EngineConfig,
        rng: &mut dyn RngSource,
    ) -> Result<Opening, EngineError> {
        // Crash point stays strictly below the target
        let ceiling = Multiplier::from_bps(target.bps().saturating_sub(1)).max(Multiplier::ONE);
        let crash_point =
            Multiplier::from_f64(rng.uniform(1.0, target.as_f64())).clamp(Multiplier::ONE, ceiling);
        debug!(%target, %crash_point, "limbo crash point drawn");
        Ok(Opening::Resolving(RoundState::Limbo(LimboState {
            target: *target,
            crash_point,
            current: Multiplier::ONE,
            schedule: TickSchedule::new(config.tick_interval_ms),
        })))
    }

    fn process_move(
        state: &mut LimboState,
        decision: Decision,
        _rng: &mut dyn RngSource,
    ) -> Result<Step, EngineError> {
        match decision {
            Decision::Tick => {
                let elapsed = state.schedule.advance()?;
                state.current = curve(state.target, elapsed);
                if state.current >= state.crash_point {
                    return Ok(resolve(state, CurveFinish::Crashed));
                }
                Ok(Step::Continue)
            }
            Decision::CashOut => Ok(resolve(state, CurveFinish::CashedOut)),
            _ => Err(EngineError::InvalidDecision("limbo accepts tick or cash out")),
        }
    }
}
