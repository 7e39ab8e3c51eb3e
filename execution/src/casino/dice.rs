//! Dice (roll-over).
//!
//! The player picks a target in 1..=99. One roll in 0..=99 wins when it is at
//! least the target, paying `100 / (100 - target)` rounded to two decimals.

use super::{paytable, CasinoGame, Opening, Outcome, Resolution, RngSource};
use crate::{EngineConfig, EngineError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiceCategory {
    Over,
    Under,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiceOutcome {
    pub category: DiceCategory,
    pub target: u8,
    pub roll: u8,
}

pub struct Dice;

impl CasinoGame for Dice {
    type Choice = u8;
    type State = std::convert::Infallible;

    fn validate(target: &u8, _config: &EngineConfig) -> Result<(), EngineError> {
        if !(1..=99).contains(target) {
            return Err(EngineError::InvalidBet(format!(
                "dice target {target} outside 1..=99"
            )));
        }
        Ok(())
    }

    fn init(
        target: &u8,
        _config: &EngineConfig,
        rng: &mut dyn RngSource,
    ) -> Result<Opening, EngineError> {
        let roll = rng.next_int(0, 99) as u8;
        let (category, multiplier) = if roll >= *target {
            (DiceCategory::Over, paytable::dice(*target)?)
        } else {
            (DiceCategory::Under, paytable::LOSS)
        };
        let outcome = DiceOutcome {
            category,
            target: *target,
            roll,
        };
        Ok(Opening::Resolved(Resolution::new(Outcome::Dice(outcome), multiplier)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::ScriptedRng;
    use parlor_types::casino::Multiplier;

    fn roll(target: u8, value: u32) -> Resolution {
        let mut rng = ScriptedRng::ints([value]);
        match Dice::init(&target, &EngineConfig::default(), &mut rng).unwrap() {
            Opening::Resolved(resolution) => resolution,
            Opening::Resolving(_) => panic!("dice resolves on commit"),
        }
    }

    #[test]
    fn test_roll_on_target_wins() {
        let resolution = roll(50, 50);
        assert_eq!(resolution.multiplier, Multiplier::whole(2));
        assert_eq!(resolution.outcome.category(), "Over");
    }

    #[test]
    fn test_roll_below_target_loses() {
        let resolution = roll(50, 49);
        assert_eq!(resolution.multiplier, Multiplier::ZERO);
    }

    #[test]
    fn test_extreme_targets() {
        assert_eq!(roll(1, 1).multiplier, Multiplier::from_bps(10_100));
        assert_eq!(roll(1, 0).multiplier, Multiplier::ZERO);
        assert_eq!(roll(99, 99).multiplier, Multiplier::whole(100));
    }

    #[test]
    fn test_validate_target() {
        let config = EngineConfig::default();
        assert!(Dice::validate(&0, &config).is_err());
        assert!(Dice::validate(&100, &config).is_err());
        assert!(Dice::validate(&1, &config).is_ok());
        assert!(Dice::validate(&99, &config).is_ok());
    }
}
