//! Roulette on a single-zero (37 pockets) or double-zero (38 pockets) wheel.
//!
//! One uniform pocket per spin. On the double-zero wheel pocket 37 is "00".
//!
//! Bet types:
//! - Red / Black (2x)
//! - Green, covering 0 and 00 (35x)
//! - Straight number 0-36 (35x)

use parlor_types::casino::{Multiplier, AMERICAN_POCKETS, DOUBLE_ZERO, EUROPEAN_POCKETS};

use super::{paytable, CasinoGame, Opening, Outcome, Resolution, RngSource};
use crate::{EngineConfig, EngineError};

/// Red numbers on a standard roulette wheel.
const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouletteBet {
    Red,
    Black,
    Green,
    Number(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
    Green,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spin {
    pub bet: RouletteBet,
    pub pocket: u8,
    pub color: Color,
}

impl Spin {
    /// Pocket as printed on the wheel.
    pub fn label(&self) -> String {
        if self.pocket == DOUBLE_ZERO {
            "00".to_string()
        } else {
            self.pocket.to_string()
        }
    }
}

/// Colour of a pocket. 0 and 00 are green.
pub fn color(pocket: u8) -> Color {
    if pocket == 0 || pocket == DOUBLE_ZERO {
        Color::Green
    } else if RED_NUMBERS.contains(&pocket) {
        Color::Red
    } else {
        Color::Black
    }
}

fn payout(bet: RouletteBet, pocket: u8) -> Multiplier {
    let won = match bet {
        RouletteBet::Red => color(pocket) == Color::Red,
        RouletteBet::Black => color(pocket) == Color::Black,
        RouletteBet::Green => color(pocket) == Color::Green,
        RouletteBet::Number(n) => n == pocket,
    };
    if !won {
        return paytable::LOSS;
    }
    match bet {
        RouletteBet::Red | RouletteBet::Black => paytable::ROULETTE_COLOR,
        RouletteBet::Green => paytable::ROULETTE_GREEN,
        RouletteBet::Number(_) => paytable::ROULETTE_STRAIGHT,
    }
}

fn validate_bet(bet: &RouletteBet) -> Result<(), EngineError> {
    match bet {
        RouletteBet::Number(n) if *n > 36 => Err(EngineError::InvalidBet(format!(
            "roulette number {n} outside 0..=36"
        ))),
        _ => Ok(()),
    }
}

fn spin(bet: RouletteBet, pockets: u8, rng: &mut dyn RngSource) -> Resolution {
    let pocket = rng.next_int(0, pockets as u32 - 1) as u8;
    let landed = Spin {
        bet,
        pocket,
        color: color(pocket),
    };
    let multiplier = payout(bet, pocket);
    let outcome = if pockets == AMERICAN_POCKETS {
        Outcome::AmericanRoulette(landed)
    } else {
        Outcome::Roulette(landed)
    };
    Resolution::new(outcome, multiplier)
}

/// Single-zero wheel.
pub struct Roulette;

impl CasinoGame for Roulette {
    type Choice = RouletteBet;
    type State = std::convert::Infallible;

    fn validate(bet: &RouletteBet, _config: &EngineConfig) -> Result<(), EngineError> {
        validate_bet(bet)
    }

    fn init(
        bet: &RouletteBet,
        _config: &EngineConfig,
        rng: &mut dyn RngSource,
    ) -> Result<Opening, EngineError> {
        Ok(Opening::Resolved(spin(*bet, EUROPEAN_POCKETS, rng)))
    }
}

/// Double-zero wheel.
pub struct AmericanRoulette;

impl CasinoGame for AmericanRoulette {
    type Choice = RouletteBet;
    type State = std::convert::Infallible;

    fn validate(bet: &RouletteBet, _config: &EngineConfig) -> Result<(), EngineError> {
        validate_bet(bet)
    }

    fn init(
        bet: &RouletteBet,
        _config: &EngineConfig,
        rng: &mut dyn RngSource,
    ) -> Result<Opening, EngineError> {
        Ok(Opening::Resolved(spin(*bet, AMERICAN_POCKETS, rng)))
    }
}
