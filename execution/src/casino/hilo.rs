//! HiLo implementation.
//!
//! One card is face up. The player guesses whether the next card (top of a
//! fresh shuffled deck) ranks strictly higher or strictly lower. Every
//! correct guess multiplies the running multiplier by 1.5; a wrong guess or
//! an equal rank loses the round. Cashing out pays the running multiplier.

use tracing::debug;

use super::deck::{draw_fresh_card, rank};
use super::{paytable, CasinoGame, Decision, Opening, Outcome, Resolution, RngSource, RoundState, Step};
use crate::{EngineConfig, EngineError};
use parlor_types::casino::Multiplier;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HiLoState {
    pub current: u8,
    pub multiplier: Multiplier,
    pub streak: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HiLoFinish {
    CashedOut,
    Missed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HiLoOutcome {
    pub finish: HiLoFinish,
    pub last_card: u8,
    pub streak: u32,
}

/// Get the rank of a card for HiLo comparison (1-13).
/// Ace = 1, 2 = 2, ..., K = 13
pub fn card_rank(card: u8) -> u8 {
    rank(card) + 1
}

fn resolve(state: &HiLoState, finish: HiLoFinish, last_card: u8, multiplier: Multiplier) -> Step {
    let outcome = HiLoOutcome {
        finish,
        last_card,
        streak: state.streak,
    };
    Step::Resolved(Resolution::new(Outcome::HiLo(outcome), multiplier))
}

pub struct HiLo;

impl CasinoGame for HiLo {
    type Choice = ();
    type State = HiLoState;

    fn init(
        _choice: &(),
        _config: &EngineConfig,
        rng: &mut dyn RngSource,
    ) -> Result<Opening, EngineError> {
        let state = HiLoState {
            current: draw_fresh_card(rng),
            multiplier: Multiplier::ONE,
            streak: 0,
        };
        Ok(Opening::Resolving(RoundState::HiLo(state)))
    }

    fn process_move(
        state: &mut HiLoState,
        decision: Decision,
        rng: &mut dyn RngSource,
    ) -> Result<Step, EngineError> {
        let current = card_rank(state.current);
        let higher = match decision {
            Decision::Higher if current == 13 => {
                return Err(EngineError::InvalidDecision("nothing ranks higher than a king"));
            }
            Decision::Lower if current == 1 => {
                return Err(EngineError::InvalidDecision("nothing ranks lower than an ace"));
            }
            Decision::Higher => true,
            Decision::Lower => false,
            Decision::CashOut => {
                return Ok(resolve(state, HiLoFinish::CashedOut, state.current, state.multiplier));
            }
            _ => return Err(EngineError::InvalidDecision("hilo accepts higher, lower or cash out")),
        };

        let card = draw_fresh_card(rng);
        let next = card_rank(card);
        debug!(current, next, higher, "hilo guess");
        let correct = if higher { next > current } else { next < current };
        if !correct {
            return Ok(resolve(state, HiLoFinish::Missed, card, paytable::LOSS));
        }

        state.current = card;
        state.multiplier = state.multiplier.compound(paytable::HILO_STEP);
        state.streak += 1;
        Ok(Step::Continue)
    }
}
