//! Deck and draw utilities shared by the card and grid games.
//!
//! Card ids run 0..52: `rank = card % 13` (0 = Ace .. 12 = King) and
//! `suit = card / 13`. Each game maps ranks to its own values.

use parlor_types::casino::{DECK_SIZE, RANKS_PER_SUIT};

use super::RngSource;
use crate::EngineError;

/// Get card rank (0-12, Ace = 0).
pub fn rank(card: u8) -> u8 {
    card % RANKS_PER_SUIT
}

/// Get card suit (0-3).
pub fn suit(card: u8) -> u8 {
    card / RANKS_PER_SUIT
}

/// An ordered deck of 52 unique cards.
pub fn fresh_deck() -> Vec<u8> {
    (0..DECK_SIZE as u8).collect()
}

/// Fisher-Yates shuffle.
pub fn shuffle<T>(rng: &mut dyn RngSource, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}

pub fn shuffled_deck(rng: &mut dyn RngSource) -> Vec<u8> {
    let mut deck = fresh_deck();
    shuffle(rng, &mut deck);
    deck
}

/// Top card of a freshly shuffled deck.
pub fn draw_fresh_card(rng: &mut dyn RngSource) -> u8 {
    // Same distribution as the top of shuffled_deck()
    rng.next_index(DECK_SIZE) as u8
}

/// Create a shuffled deck excluding specific cards.
pub fn deck_excluding(rng: &mut dyn RngSource, excluded: &[u8]) -> Vec<u8> {
    // Use u64 as bit-set for 52 cards (cards 0-51)
    let mut used: u64 = 0;
    for &card in excluded {
        if (card as usize) < DECK_SIZE {
            used |= 1u64 << card;
        }
    }

    let mut deck: Vec<u8> = (0..DECK_SIZE as u8)
        .filter(|&c| used & (1u64 << c) == 0)
        .collect();
    shuffle(rng, &mut deck);
    deck
}

/// Draw `count` distinct items from `pool`.
pub fn draw_without_replacement<T: Clone>(
    rng: &mut dyn RngSource,
    pool: &[T],
    count: usize,
) -> Result<Vec<T>, EngineError> {
    if count > pool.len() {
        return Err(EngineError::InsufficientPool {
            requested: count,
            available: pool.len(),
        });
    }
    // Partial Fisher-Yates over the front of the pool
    let mut items = pool.to_vec();
    for i in 0..count {
        let j = i + rng.next_index(items.len() - i);
        items.swap(i, j);
    }
    items.truncate(count);
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::seeded_rng;
    use proptest::prelude::*;

    #[test]
    fn test_rank_and_suit() {
        assert_eq!(rank(0), 0); // Ace of suit 0
        assert_eq!(rank(12), 12); // King
        assert_eq!(rank(13), 0);
        assert_eq!(suit(12), 0);
        assert_eq!(suit(13), 1);
        assert_eq!(suit(51), 3);
    }

    #[test]
    fn test_fresh_deck_is_ordered() {
        let deck = fresh_deck();
        assert_eq!(deck.len(), 52);
        assert!(deck.iter().enumerate().all(|(i, &c)| i as u8 == c));
    }

    #[test]
    fn test_deck_excluding() {
        let mut rng = seeded_rng(1);
        let deck = deck_excluding(&mut rng, &[0, 5, 51, 200]);
        assert_eq!(deck.len(), 49);
        assert!(!deck.contains(&0));
        assert!(!deck.contains(&5));
        assert!(!deck.contains(&51));
    }

    #[test]
    fn test_draw_without_replacement_distinct() {
        let mut rng = seeded_rng(2);
        let pool: Vec<u8> = (1..=80).collect();
        let drawn = draw_without_replacement(&mut rng, &pool, 20).unwrap();
        assert_eq!(drawn.len(), 20);
        let mut sorted = drawn.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 20);
        assert!(drawn.iter().all(|n| (1..=80).contains(n)));
    }

    #[test]
    fn test_draw_whole_pool() {
        let mut rng = seeded_rng(3);
        let pool = [7u8, 8, 9];
        let mut drawn = draw_without_replacement(&mut rng, &pool, 3).unwrap();
        drawn.sort_unstable();
        assert_eq!(drawn, vec![7, 8, 9]);
    }

    #[test]
    fn test_draw_over_capacity() {
        let mut rng = seeded_rng(4);
        let pool = [1u8, 2, 3];
        assert_eq!(
            draw_without_replacement(&mut rng, &pool, 4),
            Err(EngineError::InsufficientPool {
                requested: 4,
                available: 3
            })
        );
    }

    #[test]
    fn test_draw_fresh_card_in_deck() {
        let mut rng = seeded_rng(5);
        for _ in 0..200 {
            assert!(draw_fresh_card(&mut rng) < 52);
        }
    }

    proptest! {
        #[test]
        fn shuffle_is_a_permutation(seed in any::<u64>()) {
            let mut rng = seeded_rng(seed);
            let mut deck = shuffled_deck(&mut rng);
            prop_assert_eq!(deck.len(), 52);
            deck.sort_unstable();
            prop_assert_eq!(deck, fresh_deck());
        }

        #[test]
        fn draws_stay_distinct(seed in any::<u64>(), count in 0usize..=25) {
            let mut rng = seeded_rng(seed);
            let pool: Vec<u8> = (0..25).collect();
            let mut drawn = draw_without_replacement(&mut rng, &pool, count).unwrap();
            drawn.sort_unstable();
            drawn.dedup();
            prop_assert_eq!(drawn.len(), count);
        }
    }
}
