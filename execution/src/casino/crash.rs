//! Crash implementation.
//!
//! The crash point is drawn once on commit: 30% of rounds crash uniformly in
//! [1, 3), the rest uniformly in [1, 10). The displayed multiplier grows as
//! `1 + 0.5t` (t in seconds) one scheduled tick at a time. Reaching the crash
//! point loses; cashing out first pays the multiplier shown at that moment.

use tracing::debug;

use super::schedule::TickSchedule;
use super::{paytable, CasinoGame, Decision, Opening, Outcome, Resolution, RngSource, RoundState, Step};
use crate::{EngineConfig, EngineError};
use parlor_types::casino::{Multiplier, BASIS_POINTS};

/// Curve growth: 0.5x per second is 5 basis points per millisecond.
const GROWTH_BPS_PER_MS: u64 = BASIS_POINTS / 2 / 1_000;

/// Chance of a low (below 3x) crash.
const LOW_CRASH_CHANCE: f64 = 0.3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrashState {
    pub crash_point: Multiplier,
    pub current: Multiplier,
    pub schedule: TickSchedule,
}

/// How a curve round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveFinish {
    CashedOut,
    Crashed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrashOutcome {
    pub finish: CurveFinish,
    pub crash_point: Multiplier,
    /// Multiplier shown when the round ended.
    pub reached: Multiplier,
    pub elapsed_ms: u64,
}

/// Multiplier shown after `elapsed_ms`.
pub fn curve(elapsed_ms: u64) -> Multiplier {
    Multiplier::ONE.saturating_add(Multiplier::from_bps(
        elapsed_ms.saturating_mul(GROWTH_BPS_PER_MS),
    ))
}

fn draw_crash_point(rng: &mut dyn RngSource) -> Multiplier {
    let point = if rng.next_f64() < LOW_CRASH_CHANCE {
        rng.uniform(1.0, 3.0)
    } else {
        rng.uniform(1.0, 10.0)
    };
    Multiplier::from_f64(point).max(Multiplier::ONE)
}

fn resolve(state: &mut CrashState, finish: CurveFinish) -> Step {
    state.schedule.cancel();
    let multiplier = match finish {
        CurveFinish::CashedOut => state.current,
        CurveFinish::Crashed => paytable::LOSS,
    };
    let outcome = CrashOutcome {
        finish,
        crash_point: state.crash_point,
        reached: state.current,
        elapsed_ms: state.schedule.elapsed_ms(),
    };
    Step::Resolved(Resolution::new(Outcome::Crash(outcome), multiplier))
}

pub struct Crash;

impl CasinoGame for Crash {
    type Choice = ();
    type State = CrashState;

    fn init(
        _choice: &(),
        config: &EngineConfig,
        rng: &mut dyn RngSource,
    ) -> Result<Opening, EngineError> {
        let crash_point = draw_crash_point(rng);
        debug!(%crash_point, "crash point drawn");
        Ok(Opening::Resolving(RoundState::Crash(CrashState {
            crash_point,
            current: Multiplier::ONE,
            schedule: TickSchedule::new(config.tick_interval_ms),
        })))
    }

    fn process_move(
        state: &mut CrashState,
        decision: Decision,
        _rng: &mut dyn RngSource,
    ) -> Result<Step, EngineError> {
        match decision {
            Decision::Tick => {
                let elapsed = state.schedule.advance()?;
                state.current = curve(elapsed);
                if state.current >= state.crash_point {
                    return Ok(resolve(state, CurveFinish::Crashed));
                }
                Ok(Step::Continue)
            }
            Decision::CashOut => Ok(resolve(state, CurveFinish::CashedOut)),
            _ => Err(EngineError::InvalidDecision("crash accepts tick or cash out")),
        }
    }
}
