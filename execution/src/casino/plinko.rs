//! Plinko: eight rows of pegs over nine buckets.
//!
//! The ball starts above the centre bucket and moves one bucket left or
//! right at each row with equal probability, clamped at the walls.

use parlor_types::casino::{PLINKO_BUCKETS, PLINKO_ROWS};

use super::{paytable, CasinoGame, Opening, Outcome, Resolution, RngSource};
use crate::{EngineConfig, EngineError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlinkoOutcome {
    /// Bucket position after each row.
    pub path: Vec<u8>,
    pub bucket: u8,
}

/// Drop a ball and return the bucket after each row.
fn drop_ball(rng: &mut dyn RngSource) -> Vec<u8> {
    let last = PLINKO_BUCKETS as u8 - 1;
    let mut position = last / 2;
    let mut path = Vec::with_capacity(PLINKO_ROWS);
    for _ in 0..PLINKO_ROWS {
        position = if rng.next_f64() < 0.5 {
            position.saturating_sub(1)
        } else {
            (position + 1).min(last)
        };
        path.push(position);
    }
    path
}

pub struct Plinko;

impl CasinoGame for Plinko {
    type Choice = ();
    type State = std::convert::Infallible;

    fn init(
        _choice: &(),
        _config: &EngineConfig,
        rng: &mut dyn RngSource,
    ) -> Result<Opening, EngineError> {
        let path = drop_ball(rng);
        let bucket = path.last().copied().unwrap_or(PLINKO_BUCKETS as u8 / 2);
        Ok(Opening::Resolved(Resolution::new(
            Outcome::Plinko(PlinkoOutcome { path, bucket }),
            paytable::PLINKO_BUCKETS[bucket as usize],
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{seeded_rng, ScriptedRng};
    use parlor_types::casino::Multiplier;

    const LEFT: f64 = 0.1;
    const RIGHT: f64 = 0.9;

    #[test]
    fn test_all_left_clamps_at_wall() {
        let mut rng = ScriptedRng::floats([LEFT; 8]);
        let path = drop_ball(&mut rng);
        assert_eq!(path, vec![3, 2, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_zigzag_lands_centre() {
        let mut rng = ScriptedRng::floats([LEFT, RIGHT, LEFT, RIGHT, LEFT, RIGHT, LEFT, RIGHT]);
        let Opening::Resolved(resolution) =
            Plinko::init(&(), &EngineConfig::default(), &mut rng).unwrap()
        else {
            panic!("plinko resolves on commit");
        };
        assert_eq!(resolution.multiplier, Multiplier::whole(5));
        assert_eq!(resolution.outcome.category(), "Bucket(4)");
    }

    #[test]
    fn test_half_credit_bucket() {
        let mut rng = ScriptedRng::floats([LEFT, LEFT, LEFT, LEFT, LEFT, RIGHT, RIGHT, LEFT]);
        let Opening::Resolved(resolution) =
            Plinko::init(&(), &EngineConfig::default(), &mut rng).unwrap()
        else {
            panic!("plinko resolves on commit");
        };
        // 4 -> 3 -> 2 -> 1 -> 0 -> 0 -> 1 -> 2 -> 1
        assert_eq!(resolution.multiplier, Multiplier::from_bps(5_000));
        // Half credit rounds down
        assert_eq!(resolution.multiplier.apply(15), 7);
    }

    #[test]
    fn test_path_stays_on_board() {
        let mut rng = seeded_rng(4);
        for _ in 0..500 {
            let path = drop_ball(&mut rng);
            assert_eq!(path.len(), PLINKO_ROWS);
            assert!(path.iter().all(|p| (*p as usize) < PLINKO_BUCKETS));
        }
    }
}
