//! Payout tables, category -> multiplier.
//!
//! Lookups are pure. Keyed lookups outside their table fail with
//! [`EngineError::UnknownOutcomeCategory`].

use parlor_types::casino::{Multiplier, KENO_PICKS};

use super::slots::Symbol;
use super::video_poker::Hand;
use crate::EngineError;

pub const LOSS: Multiplier = Multiplier::ZERO;
pub const PUSH: Multiplier = Multiplier::ONE;

pub const BLACKJACK_WIN: Multiplier = Multiplier::whole(2);

pub const BACCARAT_PLAYER: Multiplier = Multiplier::whole(2);
/// Even money less a 5% commission
pub const BACCARAT_BANKER: Multiplier = Multiplier::from_bps(19_500);
pub const BACCARAT_TIE: Multiplier = Multiplier::whole(8);

pub const ROULETTE_COLOR: Multiplier = Multiplier::whole(2);
pub const ROULETTE_STRAIGHT: Multiplier = Multiplier::whole(35);
pub const ROULETTE_GREEN: Multiplier = Multiplier::whole(35);

/// Big, small, odd and even.
pub const SIC_BO_EVEN_MONEY: Multiplier = Multiplier::ONE;

pub const CRAPS_WIN: Multiplier = Multiplier::whole(2);

pub const BINGO_LINE: Multiplier = Multiplier::whole(5);

/// Applied to the running Hi-Lo multiplier on every correct guess.
pub const HILO_STEP: Multiplier = Multiplier::from_bps(15_000);

pub const WHEEL_SEGMENTS: [Multiplier; 8] = [
    Multiplier::whole(2),
    Multiplier::whole(3),
    Multiplier::whole(5),
    Multiplier::whole(10),
    Multiplier::whole(20),
    Multiplier::whole(50),
    Multiplier::whole(100),
    Multiplier::ZERO,
];

pub const PLINKO_BUCKETS: [Multiplier; 9] = [
    Multiplier::ZERO,
    Multiplier::from_bps(5_000),
    Multiplier::ONE,
    Multiplier::whole(2),
    Multiplier::whole(5),
    Multiplier::whole(2),
    Multiplier::ONE,
    Multiplier::from_bps(5_000),
    Multiplier::ZERO,
];

pub const TOWER_FLOORS: [Multiplier; 10] = [
    Multiplier::from_bps(12_000),
    Multiplier::from_bps(15_000),
    Multiplier::whole(2),
    Multiplier::whole(3),
    Multiplier::whole(5),
    Multiplier::whole(10),
    Multiplier::whole(20),
    Multiplier::whole(50),
    Multiplier::whole(100),
    Multiplier::whole(1000),
];

/// Exact-sum bet on three dice.
pub fn sic_bo_total(total: u8) -> Result<Multiplier, EngineError> {
    let times = match total {
        4 | 17 => 60,
        5 | 16 => 30,
        6 | 15 => 17,
        7 | 14 => 12,
        8 | 13 => 8,
        9..=12 => 6,
        _ => return Err(EngineError::UnknownOutcomeCategory(format!("sic bo total {total}"))),
    };
    Ok(Multiplier::whole(times))
}

/// Three of a kind on the reels. Anything else pays [`LOSS`].
pub fn slots_triple(symbol: Symbol) -> Multiplier {
    match symbol {
        Symbol::Cherry => Multiplier::whole(10),
        Symbol::Lemon => Multiplier::whole(8),
        Symbol::Orange => Multiplier::whole(6),
        Symbol::Grape => Multiplier::whole(4),
        Symbol::Diamond => Multiplier::whole(20),
        Symbol::Seven => Multiplier::whole(50),
    }
}

/// Matches on a ten-pick Keno ticket.
pub fn keno(matches: usize) -> Result<Multiplier, EngineError> {
    let times = match matches {
        10 => 100,
        9 => 50,
        8 => 20,
        7 => 10,
        6 => 5,
        5 => 2,
        m if m <= KENO_PICKS => 0,
        _ => return Err(EngineError::UnknownOutcomeCategory(format!("keno matches {matches}"))),
    };
    Ok(Multiplier::whole(times))
}

pub fn video_poker(hand: Hand) -> Multiplier {
    let times = match hand {
        Hand::HighCard => 0,
        Hand::OnePair => 1,
        Hand::TwoPair => 2,
        Hand::ThreeOfAKind => 3,
        Hand::Straight => 4,
        Hand::Flush => 6,
        Hand::FullHouse => 9,
        Hand::FourOfAKind => 25,
        Hand::StraightFlush => 50,
        Hand::RoyalFlush => 250,
    };
    Multiplier::whole(times)
}

/// Roll-over multiplier for `target` in 1..=99: `100 / (100 - target)`,
/// rounded to two decimals.
pub fn dice(target: u8) -> Result<Multiplier, EngineError> {
    if !(1..=99).contains(&target) {
        return Err(EngineError::UnknownOutcomeCategory(format!("dice target {target}")));
    }
    let span = 100 - target as u64;
    let hundredths = (10_000 + span / 2) / span;
    Ok(Multiplier::from_bps(hundredths * 100))
}

/// Mines multiplier after `revealed` safe picks on a grid of `cells` holding
/// `mines`: `prod (cells - i) / (cells - mines - i)`, never below 1.0x.
pub fn mines(cells: u8, mines: u8, revealed: u8) -> Multiplier {
    let cells = cells as u128;
    let mines = mines as u128;
    let mut num: u128 = 1;
    let mut den: u128 = 1;
    for i in 0..revealed as u128 {
        if cells < mines + i + 1 {
            break;
        }
        num *= cells - i;
        den *= cells - mines - i;
        let divisor = gcd(num, den);
        num /= divisor;
        den /= divisor;
    }
    Multiplier::from_ratio(num, den).max(Multiplier::ONE)
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sic_bo_table_is_symmetric() {
        for total in 4..=17u8 {
            assert_eq!(sic_bo_total(total), sic_bo_total(21 - total));
        }
        assert_eq!(sic_bo_total(4).unwrap(), Multiplier::whole(60));
        assert_eq!(sic_bo_total(10).unwrap(), Multiplier::whole(6));
    }

    #[test]
    fn test_sic_bo_outside_table() {
        assert!(matches!(
            sic_bo_total(3),
            Err(EngineError::UnknownOutcomeCategory(_))
        ));
        assert!(sic_bo_total(18).is_err());
    }

    #[test]
    fn test_keno_table() {
        assert_eq!(keno(10).unwrap(), Multiplier::whole(100));
        assert_eq!(keno(5).unwrap(), Multiplier::whole(2));
        assert_eq!(keno(4).unwrap(), LOSS);
        assert_eq!(keno(0).unwrap(), LOSS);
        assert!(keno(11).is_err());
    }

    #[test]
    fn test_video_poker_pays_monotonic() {
        let hands = [
            Hand::HighCard,
            Hand::OnePair,
            Hand::TwoPair,
            Hand::ThreeOfAKind,
            Hand::Straight,
            Hand::Flush,
            Hand::FullHouse,
            Hand::FourOfAKind,
            Hand::StraightFlush,
            Hand::RoyalFlush,
        ];
        for pair in hands.windows(2) {
            assert!(video_poker(pair[0]) < video_poker(pair[1]));
        }
        assert_eq!(video_poker(Hand::RoyalFlush), Multiplier::whole(250));
    }

    #[test]
    fn test_dice_multiplier() {
        assert_eq!(dice(50).unwrap(), Multiplier::whole(2));
        assert_eq!(dice(1).unwrap(), Multiplier::from_bps(10_100));
        assert_eq!(dice(99).unwrap(), Multiplier::whole(100));
        // 100 / 33 = 3.0303..
        assert_eq!(dice(67).unwrap(), Multiplier::from_bps(30_300));
        assert!(dice(0).is_err());
        assert!(dice(100).is_err());
    }

    #[test]
    fn test_mines_multiplier() {
        assert_eq!(mines(25, 3, 0), Multiplier::ONE);
        // 25 / 22 = 1.13636..
        assert_eq!(mines(25, 3, 1), Multiplier::from_bps(11_363));
        // (25 * 24) / (22 * 21) = 1.29870..
        assert_eq!(mines(25, 3, 2), Multiplier::from_bps(12_987));
        // Every safe cell on a one-mine board: 25 / 1
        assert_eq!(mines(25, 1, 24), Multiplier::whole(25));
    }

    #[test]
    fn test_mines_multiplier_large_grid() {
        // C(64, 32) is past the u64 range in basis points
        assert_eq!(mines(64, 32, 32), Multiplier::from_bps(u64::MAX));
        assert_eq!(mines(64, 63, 1), Multiplier::whole(64));
    }

    #[test]
    fn test_tables_shape() {
        assert_eq!(WHEEL_SEGMENTS[7], LOSS);
        assert_eq!(PLINKO_BUCKETS[4], Multiplier::whole(5));
        assert_eq!(PLINKO_BUCKETS[0], PLINKO_BUCKETS[8]);
        assert!(TOWER_FLOORS.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(slots_triple(Symbol::Seven), Multiplier::whole(50));
    }
}
