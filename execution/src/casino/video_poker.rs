//! Video Poker implementation.
//!
//! Five cards are dealt from a shuffled deck. The player answers with a hold
//! mask (bit 0 = first card .. bit 4 = fifth card); every card not held is
//! replaced from a deck that excludes the five dealt cards, and the final
//! hand is ranked and paid.

use tracing::debug;

use super::deck::{deck_excluding, rank, shuffled_deck, suit};
use super::{paytable, CasinoGame, Decision, Opening, Outcome, Resolution, RngSource, RoundState, Step};
use crate::{EngineConfig, EngineError};

/// Poker hand rankings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Hand {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoPokerState {
    pub cards: [u8; 5],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoPokerOutcome {
    pub hand: Hand,
    pub cards: [u8; 5],
    pub held: u8,
}

/// Get card rank (1-13, Ace = 1).
fn card_rank(card: u8) -> u8 {
    rank(card) + 1
}

/// Evaluate a 5-card poker hand.
pub fn evaluate_hand(cards: &[u8; 5]) -> Hand {
    let mut ranks = [0u8; 5];
    let mut suits = [0u8; 5];
    for i in 0..5 {
        ranks[i] = card_rank(cards[i]);
        suits[i] = suit(cards[i]);
    }
    ranks.sort_unstable();

    let is_flush = suits.iter().all(|&s| s == suits[0]);
    let has_duplicates = ranks.windows(2).any(|w| w[0] == w[1]);

    // Check for straight (including A-2-3-4-5 and 10-J-Q-K-A)
    let is_royal = ranks == [1, 10, 11, 12, 13];
    let is_straight = if has_duplicates {
        false
    } else if is_royal || ranks == [1, 2, 3, 4, 5] {
        true
    } else {
        ranks[4] - ranks[0] == 4
    };

    // Count rank occurrences
    let mut counts = [0u8; 14];
    for &r in &ranks {
        counts[r as usize] += 1;
    }

    let mut pairs = 0u8;
    let mut three_kind = false;
    let mut four_kind = false;
    for &count in counts.iter() {
        match count {
            2 => pairs += 1,
            3 => three_kind = true,
            4 => four_kind = true,
            _ => {}
        }
    }

    if is_royal && is_flush {
        Hand::RoyalFlush
    } else if is_straight && is_flush {
        Hand::StraightFlush
    } else if four_kind {
        Hand::FourOfAKind
    } else if three_kind && pairs == 1 {
        Hand::FullHouse
    } else if is_flush {
        Hand::Flush
    } else if is_straight {
        Hand::Straight
    } else if three_kind {
        Hand::ThreeOfAKind
    } else if pairs == 2 {
        Hand::TwoPair
    } else if pairs == 1 {
        Hand::OnePair
    } else {
        Hand::HighCard
    }
}

pub struct VideoPoker;

impl CasinoGame for VideoPoker {
    type Choice = ();
    type State = VideoPokerState;

    fn init(
        _choice: &(),
        _config: &EngineConfig,
        rng: &mut dyn RngSource,
    ) -> Result<Opening, EngineError> {
        let deck = shuffled_deck(rng);
        let cards = [deck[0], deck[1], deck[2], deck[3], deck[4]];
        Ok(Opening::Resolving(RoundState::VideoPoker(VideoPokerState {
            cards,
        })))
    }

    fn process_move(
        state: &mut VideoPokerState,
        decision: Decision,
        rng: &mut dyn RngSource,
    ) -> Result<Step, EngineError> {
        let Decision::Hold { mask } = decision else {
            return Err(EngineError::InvalidDecision("video poker accepts a hold mask"));
        };
        if mask > 0b1_1111 {
            return Err(EngineError::InvalidDecision("hold mask covers five cards"));
        }

        // Replacements never repeat a dealt card, held or discarded
        let mut replacements = deck_excluding(rng, &state.cards).into_iter();
        for (i, card) in state.cards.iter_mut().enumerate() {
            if mask & (1 << i) == 0 {
                if let Some(replacement) = replacements.next() {
                    *card = replacement;
                }
            }
        }

        let hand = evaluate_hand(&state.cards);
        debug!(?hand, mask, "video poker draw");
        let outcome = VideoPokerOutcome {
            hand,
            cards: state.cards,
            held: mask,
        };
        Ok(Step::Resolved(Resolution::new(
            Outcome::VideoPoker(outcome),
            paytable::video_poker(hand),
        )))
    }
}
