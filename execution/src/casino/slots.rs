//! Three-reel slots.
//!
//! Each reel lands on one of six symbols with equal probability. Three of a
//! kind pays from the symbol table; anything else loses.

use super::{paytable, CasinoGame, Opening, Outcome, Resolution, RngSource};
use crate::{EngineConfig, EngineError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    Cherry,
    Lemon,
    Orange,
    Grape,
    Diamond,
    Seven,
}

impl Symbol {
    pub const ALL: [Symbol; 6] = [
        Symbol::Cherry,
        Symbol::Lemon,
        Symbol::Orange,
        Symbol::Grape,
        Symbol::Diamond,
        Symbol::Seven,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotsCategory {
    Triple(Symbol),
    NoMatch,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotsOutcome {
    pub category: SlotsCategory,
    pub reels: [Symbol; 3],
}

fn spin_reel(rng: &mut dyn RngSource) -> Symbol {
    Symbol::ALL[rng.next_index(Symbol::ALL.len())]
}

pub struct Slots;

impl CasinoGame for Slots {
    type Choice = ();
    type State = std::convert::Infallible;

    fn init(
        _choice: &(),
        _config: &EngineConfig,
        rng: &mut dyn RngSource,
    ) -> Result<Opening, EngineError> {
        let reels = [spin_reel(rng), spin_reel(rng), spin_reel(rng)];
        let (category, multiplier) = if reels[0] == reels[1] && reels[1] == reels[2] {
            (
                SlotsCategory::Triple(reels[0]),
                paytable::slots_triple(reels[0]),
            )
        } else {
            (SlotsCategory::NoMatch, paytable::LOSS)
        };
        Ok(Opening::Resolved(Resolution::new(
            Outcome::Slots(SlotsOutcome { category, reels }),
            multiplier,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{seeded_rng, ScriptedRng};
    use parlor_types::casino::Multiplier;

    fn pull(reels: [u32; 3]) -> Resolution {
        let mut rng = ScriptedRng::ints(reels);
        match Slots::init(&(), &EngineConfig::default(), &mut rng).unwrap() {
            Opening::Resolved(resolution) => resolution,
            Opening::Resolving(_) => panic!("slots resolve on commit"),
        }
    }

    #[test]
    fn test_triples_pay() {
        assert_eq!(pull([5, 5, 5]).multiplier, Multiplier::whole(50));
        assert_eq!(pull([0, 0, 0]).multiplier, Multiplier::whole(10));
        assert_eq!(pull([4, 4, 4]).outcome.category(), "Triple(Diamond)");
    }

    #[test]
    fn test_pairs_lose() {
        let resolution = pull([5, 5, 4]);
        assert_eq!(resolution.multiplier, Multiplier::ZERO);
        assert_eq!(resolution.outcome.category(), "NoMatch");
    }

    #[test]
    fn test_reels_cover_all_symbols() {
        let mut rng = seeded_rng(6);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(spin_reel(&mut rng));
        }
        assert_eq!(seen.len(), 6);
    }
}
