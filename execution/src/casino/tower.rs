//! Tower implementation.
//!
//! A ball falls one floor per scheduled tick, starting at the top floor
//! (index 0). Every floor it lands on after that adds its multiplier to the
//! accrued total; landing on the last floor ends the round and pays the
//! total. Cashing out between ticks locks in what has accrued so far.

use parlor_types::casino::Multiplier;
use tracing::debug;

use super::schedule::TickSchedule;
use super::{paytable, CasinoGame, Decision, Opening, Outcome, Resolution, RngSource, RoundState, Step};
use crate::{EngineConfig, EngineError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TowerState {
    pub floor: usize,
    pub accrued: Multiplier,
    pub schedule: TickSchedule,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TowerFinish {
    Bottom,
    CashedOut,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TowerOutcome {
    pub finish: TowerFinish,
    pub floor: usize,
    pub accrued: Multiplier,
}

fn resolve(state: &mut TowerState, finish: TowerFinish) -> Step {
    state.schedule.cancel();
    let outcome = TowerOutcome {
        finish,
        floor: state.floor,
        accrued: state.accrued,
    };
    Step::Resolved(Resolution::new(Outcome::Tower(outcome), state.accrued))
}

pub struct Tower;

impl CasinoGame for Tower {
    type Choice = ();
    type State = TowerState;

    fn init(
        _choice: &(),
        config: &EngineConfig,
        _rng: &mut dyn RngSource,
    ) -> Result<Opening, EngineError> {
        Ok(Opening::Resolving(RoundState::Tower(TowerState {
            floor: 0,
            accrued: Multiplier::ZERO,
            schedule: TickSchedule::new(config.tick_interval_ms),
        })))
    }

    fn process_move(
        state: &mut TowerState,
        decision: Decision,
        _rng: &mut dyn RngSource,
    ) -> Result<Step, EngineError> {
        match decision {
            Decision::Tick => {
                state.schedule.advance()?;
                state.floor += 1;
                let bonus = paytable::TOWER_FLOORS[state.floor];
                state.accrued = state.accrued.saturating_add(bonus);
                debug!(floor = state.floor, accrued = %state.accrued, "tower floor");
                if state.floor == paytable::TOWER_FLOORS.len() - 1 {
                    return Ok(resolve(state, TowerFinish::Bottom));
                }
                Ok(Step::Continue)
            }
            Decision::CashOut => Ok(resolve(state, TowerFinish::CashedOut)),
            _ => Err(EngineError::InvalidDecision("tower accepts tick or cash out")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::ScriptedRng;

    fn open() -> TowerState {
        let mut rng = ScriptedRng::new();
        match Tower::init(&(), &EngineConfig::default(), &mut rng).unwrap() {
            Opening::Resolving(RoundState::Tower(state)) => state,
            other => panic!("tower waits for ticks, got {other:?}"),
        }
    }

    #[test]
    fn test_first_floor_not_credited() {
        let state = open();
        assert_eq!(state.floor, 0);
        assert_eq!(state.accrued, Multiplier::ZERO);
    }

    #[test]
    fn test_accrues_per_floor() {
        let mut state = open();
        let mut rng = ScriptedRng::new();
        Tower::process_move(&mut state, Decision::Tick, &mut rng).unwrap();
        assert_eq!(state.accrued, Multiplier::from_bps(15_000));
        Tower::process_move(&mut state, Decision::Tick, &mut rng).unwrap();
        assert_eq!(state.accrued, Multiplier::from_bps(35_000));
    }

    #[test]
    fn test_bottom_pays_total() {
        let mut state = open();
        let mut rng = ScriptedRng::new();
        for _ in 0..8 {
            assert_eq!(
                Tower::process_move(&mut state, Decision::Tick, &mut rng).unwrap(),
                Step::Continue
            );
        }
        let Step::Resolved(resolution) =
            Tower::process_move(&mut state, Decision::Tick, &mut rng).unwrap()
        else {
            panic!("last floor resolves");
        };
        // 1.5 + 2 + 3 + 5 + 10 + 20 + 50 + 100 + 1000
        assert_eq!(resolution.multiplier, Multiplier::from_bps(11_915_000));
        assert_eq!(
            Tower::process_move(&mut state, Decision::Tick, &mut rng),
            Err(EngineError::InvalidStateTransition)
        );
    }

    #[test]
    fn test_cash_out_locks_accrued() {
        let mut state = open();
        let mut rng = ScriptedRng::new();
        for _ in 0..3 {
            Tower::process_move(&mut state, Decision::Tick, &mut rng).unwrap();
        }
        let Step::Resolved(resolution) =
            Tower::process_move(&mut state, Decision::CashOut, &mut rng).unwrap()
        else {
            panic!("cash out resolves");
        };
        assert_eq!(resolution.multiplier, Multiplier::from_bps(65_000));
        assert_eq!(resolution.outcome.category(), "CashedOut");
    }
}
