//! Sic Bo implementation.
//!
//! Three dice, one bet, resolved on commit.
//!
//! Bet types:
//! - Small (total 4-10) and Big (total 11-17) pay 1x
//! - Odd and Even total pay 1x
//! - Total of N (4-17) pays from the exact-sum table

use super::{paytable, CasinoGame, Opening, Outcome, Resolution, RngSource};
use crate::{EngineConfig, EngineError};
use parlor_types::casino::Multiplier;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SicBoBet {
    Small,
    Big,
    Odd,
    Even,
    Total(u8),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SicBoOutcome {
    pub bet: SicBoBet,
    pub dice: [u8; 3],
    pub total: u8,
}

/// Multiplier for a bet against a rolled total.
fn calculate_bet_payout(bet: SicBoBet, total: u8) -> Result<Multiplier, EngineError> {
    let won = match bet {
        SicBoBet::Small => (4..=10).contains(&total),
        SicBoBet::Big => (11..=17).contains(&total),
        SicBoBet::Odd => total % 2 == 1,
        SicBoBet::Even => total % 2 == 0,
        SicBoBet::Total(n) => {
            if n != total {
                return Ok(paytable::LOSS);
            }
            return paytable::sic_bo_total(n);
        }
    };
    Ok(if won {
        paytable::SIC_BO_EVEN_MONEY
    } else {
        paytable::LOSS
    })
}

pub struct SicBo;

impl CasinoGame for SicBo {
    type Choice = SicBoBet;
    type State = std::convert::Infallible;

    fn validate(bet: &SicBoBet, _config: &EngineConfig) -> Result<(), EngineError> {
        if let SicBoBet::Total(n) = bet {
            if !(4..=17).contains(n) {
                return Err(EngineError::InvalidBet(format!("sic bo total {n} outside 4..=17")));
            }
        }
        Ok(())
    }

    fn init(
        bet: &SicBoBet,
        _config: &EngineConfig,
        rng: &mut dyn RngSource,
    ) -> Result<Opening, EngineError> {
        let dice = [rng.roll_die(), rng.roll_die(), rng.roll_die()];
        let total = dice.iter().sum();
        let multiplier = calculate_bet_payout(*bet, total)?;
        let outcome = SicBoOutcome {
            bet: *bet,
            dice,
            total,
        };
        Ok(Opening::Resolved(Resolution::new(Outcome::SicBo(outcome), multiplier)))
    }
}
