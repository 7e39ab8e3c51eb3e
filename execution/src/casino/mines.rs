//! Mines implementation.
//!
//! `k` mines are hidden among the cells of a square grid (5x5 by default).
//! Each safe reveal raises the multiplier to
//! `prod (n - i) / (n - k - i)` over the reveals so far; hitting a mine loses
//! the round. Revealing every safe cell cashes out automatically.

use tracing::debug;

use super::deck::draw_without_replacement;
use super::{paytable, CasinoGame, Decision, Opening, Outcome, Resolution, RngSource, RoundState, Step};
use crate::{EngineConfig, EngineError};
use parlor_types::casino::Multiplier;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinesState {
    pub side: u8,
    pub mine_count: u8,
    /// Bit per cell, row-major
    pub mines: u64,
    /// Bit per cell, row-major
    pub revealed: u64,
}

impl MinesState {
    pub fn cells(&self) -> u8 {
        self.side * self.side
    }

    pub fn safe_revealed(&self) -> u8 {
        self.revealed.count_ones() as u8
    }

    /// Multiplier a cash-out would pay right now.
    pub fn multiplier(&self) -> Multiplier {
        paytable::mines(self.cells(), self.mine_count, self.safe_revealed())
    }

    fn mine_cells(&self) -> Vec<u8> {
        (0..self.cells())
            .filter(|cell| self.mines & (1u64 << cell) != 0)
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MinesFinish {
    CashedOut,
    Cleared,
    HitMine,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinesOutcome {
    pub finish: MinesFinish,
    pub safe_revealed: u8,
    pub mines: Vec<u8>,
}

fn resolve(state: &MinesState, finish: MinesFinish) -> Step {
    let multiplier = match finish {
        MinesFinish::HitMine => paytable::LOSS,
        MinesFinish::CashedOut | MinesFinish::Cleared => state.multiplier(),
    };
    let outcome = MinesOutcome {
        finish,
        safe_revealed: state.safe_revealed(),
        mines: state.mine_cells(),
    };
    Step::Resolved(Resolution::new(Outcome::Mines(outcome), multiplier))
}

pub struct Mines;

impl CasinoGame for Mines {
    type Choice = u8;
    type State = MinesState;

    fn validate(mines: &u8, config: &EngineConfig) -> Result<(), EngineError> {
        let cells = config.mines_cells();
        if *mines == 0 || *mines >= cells {
            return Err(EngineError::InvalidBet(format!(
                "mine count {mines} outside 1..{cells}"
            )));
        }
        Ok(())
    }

    fn init(
        mines: &u8,
        config: &EngineConfig,
        rng: &mut dyn RngSource,
    ) -> Result<Opening, EngineError> {
        let pool: Vec<u8> = (0..config.mines_cells()).collect();
        let placed = draw_without_replacement(rng, &pool, *mines as usize)?;
        let bits = placed.iter().fold(0u64, |bits, cell| bits | (1u64 << cell));
        Ok(Opening::Resolving(RoundState::Mines(MinesState {
            side: config.mines_grid_side,
            mine_count: *mines,
            mines: bits,
            revealed: 0,
        })))
    }

    fn process_move(
        state: &mut MinesState,
        decision: Decision,
        _rng: &mut dyn RngSource,
    ) -> Result<Step, EngineError> {
        match decision {
            Decision::Reveal { row, col } => {
                if row >= state.side || col >= state.side {
                    return Err(EngineError::InvalidDecision("cell outside the grid"));
                }
                let bit = 1u64 << (row * state.side + col);
                if state.revealed & bit != 0 {
                    return Ok(Step::Continue);
                }
                if state.mines & bit != 0 {
                    debug!(row, col, "mine hit");
                    return Ok(resolve(state, MinesFinish::HitMine));
                }
                state.revealed |= bit;
                if state.safe_revealed() == state.cells() - state.mine_count {
                    return Ok(resolve(state, MinesFinish::Cleared));
                }
                Ok(Step::Continue)
            }
            Decision::CashOut => Ok(resolve(state, MinesFinish::CashedOut)),
            _ => Err(EngineError::InvalidDecision("mines accepts reveal or cash out")),
        }
    }
}
