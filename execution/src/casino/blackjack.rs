//! Blackjack implementation.
//!
//! Single hand against the dealer. The opening deal comes from one shuffled
//! deck (player gets cards 0 and 2, dealer 1 and 3); every later card is the
//! top of a fresh shuffled deck.
//!
//! Rules:
//! - Ace counts 11, reduced to 1 while the hand is over 21
//! - Dealer draws while under 17
//! - Win pays 2x, push returns the stake, no bonus for a natural

use tracing::debug;

use super::deck::{draw_fresh_card, rank, shuffled_deck};
use super::{paytable, CasinoGame, Decision, Opening, Outcome, Resolution, RngSource, RoundState, Step};
use crate::{EngineConfig, EngineError};

/// Dealer stands on this total or higher.
const DEALER_STANDS_ON: u8 = 17;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlackjackState {
    pub player: Vec<u8>,
    pub dealer: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    PlayerWin,
    DealerBust,
    Push,
    DealerWin,
    PlayerBust,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlackjackOutcome {
    pub verdict: Verdict,
    pub player: Vec<u8>,
    pub dealer: Vec<u8>,
    pub player_total: u8,
    pub dealer_total: u8,
}

/// Calculate the value of a blackjack hand.
pub fn hand_value(cards: &[u8]) -> (u8, bool) {
    let mut value: u16 = 0;
    let mut aces: u8 = 0;

    for &card in cards {
        let rank = rank(card); // 0=Ace, 1-8 = 2-9, 9-12 = 10/J/Q/K
        if rank == 0 {
            aces += 1;
            value += 11;
        } else if rank >= 9 {
            value += 10;
        } else {
            value += rank as u16 + 1;
        }
    }

    while value > 21 && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    let is_soft = aces > 0 && value <= 21;
    (value.min(255) as u8, is_soft)
}

fn settle(state: &BlackjackState, verdict: Verdict) -> Resolution {
    let multiplier = match verdict {
        Verdict::PlayerWin | Verdict::DealerBust => paytable::BLACKJACK_WIN,
        Verdict::Push => paytable::PUSH,
        Verdict::DealerWin | Verdict::PlayerBust => paytable::LOSS,
    };
    let outcome = BlackjackOutcome {
        verdict,
        player: state.player.clone(),
        dealer: state.dealer.clone(),
        player_total: hand_value(&state.player).0,
        dealer_total: hand_value(&state.dealer).0,
    };
    Resolution::new(Outcome::Blackjack(outcome), multiplier)
}

/// Play out the dealer's hand and compare.
fn dealer_play(state: &mut BlackjackState, rng: &mut dyn RngSource) -> Verdict {
    while hand_value(&state.dealer).0 < DEALER_STANDS_ON {
        let card = draw_fresh_card(rng);
        debug!(card, "dealer draws");
        state.dealer.push(card);
    }

    let player = hand_value(&state.player).0;
    let dealer = hand_value(&state.dealer).0;
    if dealer > 21 {
        Verdict::DealerBust
    } else if player > dealer {
        Verdict::PlayerWin
    } else if player < dealer {
        Verdict::DealerWin
    } else {
        Verdict::Push
    }
}

pub struct Blackjack;

impl CasinoGame for Blackjack {
    type Choice = ();
    type State = BlackjackState;

    fn init(
        _choice: &(),
        _config: &EngineConfig,
        rng: &mut dyn RngSource,
    ) -> Result<Opening, EngineError> {
        let deck = shuffled_deck(rng);
        let state = BlackjackState {
            player: vec![deck[0], deck[2]],
            dealer: vec![deck[1], deck[3]],
        };
        Ok(Opening::Resolving(RoundState::Blackjack(state)))
    }

    fn process_move(
        state: &mut BlackjackState,
        decision: Decision,
        rng: &mut dyn RngSource,
    ) -> Result<Step, EngineError> {
        match decision {
            Decision::Hit => {
                let card = draw_fresh_card(rng);
                debug!(card, "player hits");
                state.player.push(card);
                if hand_value(&state.player).0 > 21 {
                    return Ok(Step::Resolved(settle(state, Verdict::PlayerBust)));
                }
                Ok(Step::Continue)
            }
            Decision::Stand => {
                let verdict = dealer_play(state, rng);
                Ok(Step::Resolved(settle(state, verdict)))
            }
            _ => Err(EngineError::InvalidDecision("blackjack accepts hit or stand")),
        }
    }
}
