//! Baccarat implementation.
//!
//! One shuffled deck, dealt player/banker/player/banker, third cards from the
//! next positions in the deck. Resolves on commit.
//!
//! Payouts: player 2x, banker 1.95x (5% commission), tie 8x. A wager that
//! does not match the winner loses, including player/banker on a tie.

use super::deck::{rank, shuffled_deck};
use super::{paytable, CasinoGame, Opening, Outcome, Resolution, RngSource};
use crate::{EngineConfig, EngineError};
use parlor_types::casino::Multiplier;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wager {
    Player,
    Banker,
    Tie,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winner {
    Player,
    Banker,
    Tie,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaccaratOutcome {
    pub wager: Wager,
    pub winner: Winner,
    pub player: Vec<u8>,
    pub banker: Vec<u8>,
    pub player_total: u8,
    pub banker_total: u8,
}

/// Get baccarat card value (0-9).
fn card_value(card: u8) -> u8 {
    let rank = rank(card); // 0=Ace, 1-8 = 2-9, 9-12 = 10/J/Q/K
    if rank >= 9 {
        0
    } else {
        rank + 1
    }
}

/// Calculate hand total (mod 10).
fn hand_total(cards: &[u8]) -> u8 {
    cards.iter().map(|&c| card_value(c)).sum::<u8>() % 10
}

/// Determine if player should draw third card.
/// Player draws on 0-5, stands on 6-7.
fn player_draws(player_total: u8) -> bool {
    player_total <= 5
}

/// Determine if banker should draw third card.
/// Depends on banker's total and player's third card (if any).
fn banker_draws(banker_total: u8, player_third_card: Option<u8>) -> bool {
    let third = player_third_card.map(card_value);
    match (banker_total, third) {
        (0..=2, _) => true,
        (3..=5, None) => true,
        (3, Some(v)) => v != 8,
        (4, Some(v)) => (2..=7).contains(&v),
        (5, Some(v)) => (4..=7).contains(&v),
        (6, Some(v)) => v == 6 || v == 7,
        _ => false, // 6 without a player draw, 7-9 stand
    }
}

/// Play a coup from the top of `deck`, returning (player, banker) hands.
fn deal(deck: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let mut player = vec![deck[0], deck[2]];
    let mut banker = vec![deck[1], deck[3]];
    let mut next = 4;

    // Naturals stand
    if hand_total(&player) >= 8 || hand_total(&banker) >= 8 {
        return (player, banker);
    }

    let mut player_third = None;
    if player_draws(hand_total(&player)) {
        player_third = Some(deck[next]);
        player.push(deck[next]);
        next += 1;
    }
    if banker_draws(hand_total(&banker), player_third) {
        banker.push(deck[next]);
    }
    (player, banker)
}

fn payout(wager: Wager, winner: Winner) -> Multiplier {
    match (wager, winner) {
        (Wager::Player, Winner::Player) => paytable::BACCARAT_PLAYER,
        (Wager::Banker, Winner::Banker) => paytable::BACCARAT_BANKER,
        (Wager::Tie, Winner::Tie) => paytable::BACCARAT_TIE,
        _ => paytable::LOSS,
    }
}

pub struct Baccarat;

impl CasinoGame for Baccarat {
    type Choice = Wager;
    type State = std::convert::Infallible;

    fn init(
        wager: &Wager,
        _config: &EngineConfig,
        rng: &mut dyn RngSource,
    ) -> Result<Opening, EngineError> {
        let deck = shuffled_deck(rng);
        let (player, banker) = deal(&deck);
        let player_total = hand_total(&player);
        let banker_total = hand_total(&banker);
        let winner = match player_total.cmp(&banker_total) {
            std::cmp::Ordering::Greater => Winner::Player,
            std::cmp::Ordering::Less => Winner::Banker,
            std::cmp::Ordering::Equal => Winner::Tie,
        };
        let outcome = BaccaratOutcome {
            wager: *wager,
            winner,
            player,
            banker,
            player_total,
            banker_total,
        };
        Ok(Opening::Resolved(Resolution::new(
            Outcome::Baccarat(outcome),
            payout(*wager, winner),
        )))
    }
}
