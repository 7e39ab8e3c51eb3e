//! Craps (pass line).
//!
//! The come-out roll happens on commit: 7 or 11 wins, 2, 3 or 12 loses, and
//! any other total becomes the point. In the point phase every `Roll` rolls
//! two dice; the point wins, a 7 loses, anything else changes nothing.

use tracing::debug;

use super::{paytable, CasinoGame, Decision, Opening, Outcome, Resolution, RngSource, RoundState, Step};
use crate::{EngineConfig, EngineError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrapsState {
    pub point: u8,
    pub last_roll: [u8; 2],
    pub rolls: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrapsFinish {
    /// 7 or 11 on the come-out
    Natural,
    /// 2, 3 or 12 on the come-out
    Craps,
    PointMade,
    SevenOut,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrapsOutcome {
    pub finish: CrapsFinish,
    pub point: Option<u8>,
    pub last_roll: [u8; 2],
    pub rolls: u32,
}

fn roll(rng: &mut dyn RngSource) -> [u8; 2] {
    [rng.roll_die(), rng.roll_die()]
}

fn resolve(finish: CrapsFinish, point: Option<u8>, last_roll: [u8; 2], rolls: u32) -> Resolution {
    let multiplier = match finish {
        CrapsFinish::Natural | CrapsFinish::PointMade => paytable::CRAPS_WIN,
        CrapsFinish::Craps | CrapsFinish::SevenOut => paytable::LOSS,
    };
    let outcome = CrapsOutcome {
        finish,
        point,
        last_roll,
        rolls,
    };
    Resolution::new(Outcome::Craps(outcome), multiplier)
}

pub struct Craps;

impl CasinoGame for Craps {
    type Choice = ();
    type State = CrapsState;

    fn init(
        _choice: &(),
        _config: &EngineConfig,
        rng: &mut dyn RngSource,
    ) -> Result<Opening, EngineError> {
        let dice = roll(rng);
        let total = dice[0] + dice[1];
        debug!(total, "come-out roll");
        Ok(match total {
            7 | 11 => Opening::Resolved(resolve(CrapsFinish::Natural, None, dice, 1)),
            2 | 3 | 12 => Opening::Resolved(resolve(CrapsFinish::Craps, None, dice, 1)),
            point => Opening::Resolving(RoundState::Craps(CrapsState {
                point,
                last_roll: dice,
                rolls: 1,
            })),
        })
    }

    fn process_move(
        state: &mut CrapsState,
        decision: Decision,
        rng: &mut dyn RngSource,
    ) -> Result<Step, EngineError> {
        if decision != Decision::Roll {
            return Err(EngineError::InvalidDecision("craps accepts roll"));
        }
        let dice = roll(rng);
        let total = dice[0] + dice[1];
        state.last_roll = dice;
        state.rolls += 1;
        debug!(total, point = state.point, "point roll");

        let finish = if total == state.point {
            CrapsFinish::PointMade
        } else if total == 7 {
            CrapsFinish::SevenOut
        } else {
            return Ok(Step::Continue);
        };
        Ok(Step::Resolved(resolve(
            finish,
            Some(state.point),
            dice,
            state.rolls,
        )))
    }
}
