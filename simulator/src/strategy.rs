//! Fixed, simple play for every game.
//!
//! Nothing here tries to be optimal. Each game gets one reasonable line of
//! play so that long runs measure the tables rather than the player.

use parlor_execution::casino::{
    baccarat::Wager,
    blackjack::hand_value,
    deck::rank,
    hilo::card_rank,
    mines::MinesState,
    roulette::RouletteBet,
    sic_bo::SicBoBet,
    video_poker::{evaluate_hand, Hand},
    Choice, Decision, RoundState,
};
use parlor_types::casino::{GameId, Multiplier};

/// Curve games cash out once the shown multiplier reaches this.
pub const CASH_OUT_AT: Multiplier = Multiplier::from_bps(15_000);

/// Safe cells to uncover before cashing out of Mines.
pub const MINES_REVEALS: u8 = 3;

/// Correct HiLo guesses to bank before cashing out.
pub const HILO_STREAK: u32 = 2;

/// Tower floors to ride before cashing out.
pub const TOWER_FLOORS: usize = 3;

/// Blackjack: hit below this total, stand on it or above.
pub const STAND_ON: u8 = 17;

/// Choice backed by every bet on `game`.
pub fn choice(game: GameId) -> Choice {
    match game {
        GameId::Blackjack => Choice::Blackjack,
        GameId::Roulette => Choice::Roulette(RouletteBet::Red),
        GameId::AmericanRoulette => Choice::AmericanRoulette(RouletteBet::Red),
        GameId::Slots => Choice::Slots,
        GameId::Crash => Choice::Crash,
        GameId::Mines => Choice::Mines { mines: 3 },
        GameId::Baccarat => Choice::Baccarat(Wager::Banker),
        GameId::Keno => Choice::Keno {
            picks: vec![3, 11, 19, 27, 35, 43, 51, 59, 67, 75],
        },
        GameId::Bingo => Choice::Bingo,
        GameId::Plinko => Choice::Plinko,
        GameId::Limbo => Choice::Limbo {
            target: Multiplier::whole(2),
        },
        GameId::HiLo => Choice::HiLo,
        GameId::Dice => Choice::Dice { target: 50 },
        GameId::Craps => Choice::Craps,
        GameId::SicBo => Choice::SicBo(SicBoBet::Big),
        GameId::Wheel => Choice::Wheel,
        GameId::Tower => Choice::Tower,
        GameId::VideoPoker => Choice::VideoPoker,
    }
}

/// Next sub-decision for a resolving round.
pub fn decide(round: &RoundState) -> Decision {
    match round {
        RoundState::Blackjack(state) => {
            if hand_value(&state.player).0 < STAND_ON {
                Decision::Hit
            } else {
                Decision::Stand
            }
        }
        RoundState::HiLo(state) => {
            if state.streak >= HILO_STREAK {
                Decision::CashOut
            } else if card_rank(state.current) <= 7 {
                Decision::Higher
            } else {
                Decision::Lower
            }
        }
        RoundState::VideoPoker(state) => Decision::Hold {
            mask: hold_mask(&state.cards),
        },
        RoundState::Mines(state) => match next_cell(state) {
            Some((row, col)) if state.safe_revealed() < MINES_REVEALS => {
                Decision::Reveal { row, col }
            }
            _ => Decision::CashOut,
        },
        RoundState::Craps(_) => Decision::Roll,
        RoundState::Keno(_) => Decision::Tick,
        RoundState::Crash(state) => cash_out_or_tick(state.current),
        RoundState::Limbo(state) => cash_out_or_tick(state.current),
        RoundState::Tower(state) => {
            if state.floor >= TOWER_FLOORS {
                Decision::CashOut
            } else {
                Decision::Tick
            }
        }
    }
}

fn cash_out_or_tick(current: Multiplier) -> Decision {
    if current >= CASH_OUT_AT {
        Decision::CashOut
    } else {
        Decision::Tick
    }
}

/// Keep made hands from a straight up; otherwise keep paired ranks.
fn hold_mask(cards: &[u8; 5]) -> u8 {
    if evaluate_hand(cards) >= Hand::Straight {
        return 0b11111;
    }
    let mut mask = 0;
    for (i, card) in cards.iter().enumerate() {
        let pairs = cards.iter().filter(|other| rank(**other) == rank(*card)).count();
        if pairs > 1 {
            mask |= 1 << i;
        }
    }
    mask
}

/// First unrevealed cell in row-major order.
fn next_cell(state: &MinesState) -> Option<(u8, u8)> {
    (0..state.cells())
        .find(|cell| state.revealed & (1u64 << cell) == 0)
        .map(|cell| (cell / state.side, cell % state.side))
}
