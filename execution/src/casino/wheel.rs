//! Wheel of fortune: one uniform pick among eight payout segments.

use super::{paytable, CasinoGame, Opening, Outcome, Resolution, RngSource};
use crate::{EngineConfig, EngineError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WheelOutcome {
    pub segment: u8,
}

pub struct Wheel;

impl CasinoGame for Wheel {
    type Choice = ();
    type State = std::convert::Infallible;

    fn init(
        _choice: &(),
        _config: &EngineConfig,
        rng: &mut dyn RngSource,
    ) -> Result<Opening, EngineError> {
        let segment = rng.next_index(paytable::WHEEL_SEGMENTS.len());
        Ok(Opening::Resolved(Resolution::new(
            Outcome::Wheel(WheelOutcome {
                segment: segment as u8,
            }),
            paytable::WHEEL_SEGMENTS[segment],
        )))
    }
}
