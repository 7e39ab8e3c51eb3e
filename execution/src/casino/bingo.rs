//! Bingo implementation.
//!
//! A 5x5 card where column `c` holds five distinct numbers from
//! `15c+1..=15c+15` and the centre is a free space. Numbers are called from
//! 1..=75 without replacement until a row, column or diagonal is complete
//! (5x) or the call quota runs out. Resolves on commit.

use parlor_types::casino::{BINGO_POOL, BINGO_SIDE};

use super::deck::draw_without_replacement;
use super::{paytable, CasinoGame, Opening, Outcome, Resolution, RngSource};
use crate::{EngineConfig, EngineError};

/// Marker for the free centre square.
pub const FREE: u8 = 0;

/// Numbers per column range.
const COLUMN_SPAN: u8 = 15;

pub type Card = [[u8; BINGO_SIDE]; BINGO_SIDE];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BingoLine {
    Row(u8),
    Column(u8),
    /// Top-left to bottom-right
    Diagonal,
    /// Top-right to bottom-left
    AntiDiagonal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BingoOutcome {
    /// Indexed `[row][col]`
    pub card: Card,
    pub called: Vec<u8>,
    pub line: Option<BingoLine>,
}

/// Build a card, column by column.
pub fn generate_card(rng: &mut dyn RngSource) -> Result<Card, EngineError> {
    let mut card = [[FREE; BINGO_SIDE]; BINGO_SIDE];
    for col in 0..BINGO_SIDE {
        let low = col as u8 * COLUMN_SPAN + 1;
        let range: Vec<u8> = (low..low + COLUMN_SPAN).collect();
        let numbers = draw_without_replacement(rng, &range, BINGO_SIDE)?;
        for (row, number) in numbers.into_iter().enumerate() {
            card[row][col] = number;
        }
    }
    let centre = BINGO_SIDE / 2;
    card[centre][centre] = FREE;
    Ok(card)
}

/// First completed line on a marking grid, if any.
fn completed_line(marked: &[[bool; BINGO_SIDE]; BINGO_SIDE]) -> Option<BingoLine> {
    for i in 0..BINGO_SIDE {
        if marked[i].iter().all(|m| *m) {
            return Some(BingoLine::Row(i as u8));
        }
        if marked.iter().all(|row| row[i]) {
            return Some(BingoLine::Column(i as u8));
        }
    }
    if (0..BINGO_SIDE).all(|i| marked[i][i]) {
        return Some(BingoLine::Diagonal);
    }
    if (0..BINGO_SIDE).all(|i| marked[i][BINGO_SIDE - 1 - i]) {
        return Some(BingoLine::AntiDiagonal);
    }
    None
}

/// Call numbers in order until a line completes.
fn play(card: &Card, calls: &[u8]) -> (Vec<u8>, Option<BingoLine>) {
    let mut marked = [[false; BINGO_SIDE]; BINGO_SIDE];
    for (row, cells) in card.iter().enumerate() {
        for (col, &number) in cells.iter().enumerate() {
            marked[row][col] = number == FREE;
        }
    }

    let mut called = Vec::new();
    for &number in calls {
        called.push(number);
        for (row, cells) in card.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == number {
                    marked[row][col] = true;
                }
            }
        }
        if let Some(line) = completed_line(&marked) {
            return (called, Some(line));
        }
    }
    (called, None)
}

pub struct Bingo;

impl CasinoGame for Bingo {
    type Choice = ();
    type State = std::convert::Infallible;

    fn init(
        _choice: &(),
        config: &EngineConfig,
        rng: &mut dyn RngSource,
    ) -> Result<Opening, EngineError> {
        let card = generate_card(rng)?;
        let pool: Vec<u8> = (1..=BINGO_POOL).collect();
        let calls = draw_without_replacement(rng, &pool, config.bingo_call_quota as usize)?;
        let (called, line) = play(&card, &calls);
        let multiplier = if line.is_some() {
            paytable::BINGO_LINE
        } else {
            paytable::LOSS
        };
        Ok(Opening::Resolved(Resolution::new(
            Outcome::Bingo(BingoOutcome { card, called, line }),
            multiplier,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::seeded_rng;
    use parlor_types::casino::Multiplier;

    fn fixed_card() -> Card {
        let mut card = [[FREE; 5]; 5];
        for (row, cells) in card.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = col as u8 * 15 + row as u8 + 1;
            }
        }
        card[2][2] = FREE;
        card
    }

    #[test]
    fn test_card_columns() {
        let mut rng = seeded_rng(2);
        let card = generate_card(&mut rng).unwrap();
        for col in 0..5 {
            let low = col as u8 * 15 + 1;
            let mut column: Vec<u8> = (0..5).map(|row| card[row][col]).collect();
            if col == 2 {
                assert_eq!(column[2], FREE);
                column.remove(2);
            }
            assert!(column.iter().all(|n| (low..low + 15).contains(n)));
            let len = column.len();
            column.sort_unstable();
            column.dedup();
            assert_eq!(column.len(), len);
        }
    }

    #[test]
    fn test_row_completes() {
        // Row 0 is 1, 16, 31, 46, 61
        let (called, line) = play(&fixed_card(), &[1, 16, 70, 31, 46, 61, 2]);
        assert_eq!(line, Some(BingoLine::Row(0)));
        assert_eq!(called.len(), 6);
    }

    #[test]
    fn test_free_centre_counts() {
        // Column 2 is 31, 32, FREE, 34, 35
        let (_, line) = play(&fixed_card(), &[31, 32, 34, 35]);
        assert_eq!(line, Some(BingoLine::Column(2)));
        // Diagonal 1, 17, FREE, 49, 65
        let (_, line) = play(&fixed_card(), &[1, 17, 49, 65]);
        assert_eq!(line, Some(BingoLine::Diagonal));
    }

    #[test]
    fn test_no_line() {
        let (called, line) = play(&fixed_card(), &[1, 2, 3, 4]);
        assert_eq!(called.len(), 4);
        assert_eq!(line, None);
    }

    #[test]
    fn test_full_quota_always_wins() {
        let mut rng = seeded_rng(30);
        let Opening::Resolved(resolution) =
            Bingo::init(&(), &EngineConfig::default(), &mut rng).unwrap()
        else {
            panic!("bingo resolves on commit");
        };
        assert_eq!(resolution.multiplier, Multiplier::whole(5));
    }

    #[test]
    fn test_small_quota_can_lose() {
        let config = EngineConfig {
            bingo_call_quota: 3,
            ..EngineConfig::default()
        };
        let mut rng = seeded_rng(30);
        let Opening::Resolved(resolution) = Bingo::init(&(), &config, &mut rng).unwrap() else {
            panic!("bingo resolves on commit");
        };
        // Four numbers are the shortest line, through the centre
        assert_eq!(resolution.multiplier, Multiplier::ZERO);
        assert_eq!(resolution.outcome.category(), "NoLine");
    }
}
