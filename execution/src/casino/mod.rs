//! Casino game execution module.
//!
//! This module contains the outcome and payout logic for every game:
//! - Card comparison: Blackjack, Baccarat, Video Poker, HiLo
//! - Dice: Dice (roll-over), Craps, Sic Bo
//! - Wheel/segment: Roulette, American Roulette, Wheel, Slots
//! - Grid reveal: Mines, Keno, Bingo, Plinko
//! - Continuous curve: Crash, Limbo, Tower
//!
//! Resolvers are pure functions of the bet, the player's decisions and the
//! draws they pull from an [`RngSource`]. Balance handling lives in
//! [`crate::session`].

pub mod baccarat;
pub mod bingo;
pub mod blackjack;
pub mod crash;
pub mod craps;
pub mod deck;
pub mod dice;
pub mod hilo;
pub mod keno;
pub mod limbo;
pub mod mines;
pub mod paytable;
pub mod plinko;
pub mod roulette;
pub mod schedule;
pub mod sic_bo;
pub mod slots;
pub mod tower;
pub mod video_poker;
pub mod wheel;

use commonware_cryptography::sha256::Sha256;
use commonware_cryptography::Hasher;
use parlor_types::casino::{GameId, Multiplier};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{EngineConfig, EngineError};
use schedule::TickSchedule;

/// Source of every random draw made by a resolver.
///
/// Each call is one independent draw; nothing is cached or replayed.
pub trait RngSource {
    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `[min, max]` (inclusive). Returns `min` when
    /// `min >= max`.
    fn next_int(&mut self, min: u32, max: u32) -> u32;

    /// Uniform index in `[0, len)`.
    fn next_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let max = u32::try_from(len - 1).unwrap_or(u32::MAX);
        self.next_int(0, max) as usize
    }

    /// Roll a single die (1-6).
    fn roll_die(&mut self) -> u8 {
        self.next_int(1, 6) as u8
    }

    /// Uniform float in `[low, high)`.
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_f64() * (high - low)
    }
}

impl<R: RngSource + ?Sized> RngSource for Box<R> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn next_int(&mut self, min: u32, max: u32) -> u32 {
        (**self).next_int(min, max)
    }
}

impl<R: RngSource + ?Sized> RngSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn next_int(&mut self, min: u32, max: u32) -> u32 {
        (**self).next_int(min, max)
    }
}

/// Deterministic random number generator.
///
/// Uses SHA256 hash chains to generate random numbers deterministically
/// from a seed and a stream number. Two generators built from the same
/// inputs produce the same draws.
#[derive(Clone)]
pub struct GameRng {
    state: [u8; 32],
    index: usize,
}

impl GameRng {
    /// Create a new RNG from a seed and a stream number.
    pub fn new(seed: &[u8], stream: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(seed);
        hasher.update(&stream.to_be_bytes());
        Self {
            state: hasher.finalize().0,
            index: 0,
        }
    }

    /// Get the next random byte.
    fn next_byte(&mut self) -> u8 {
        if self.index >= 32 {
            // Rehash to get more bytes
            let mut hasher = Sha256::new();
            hasher.update(&self.state);
            self.state = hasher.finalize().0;
            self.index = 0;
        }
        let result = self.state[self.index];
        self.index += 1;
        result
    }

    /// Get a random u32 value.
    pub fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        for byte in bytes.iter_mut() {
            *byte = self.next_byte();
        }
        u32::from_be_bytes(bytes)
    }

    /// Get a random u64 value.
    pub fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        for byte in bytes.iter_mut() {
            *byte = self.next_byte();
        }
        u64::from_be_bytes(bytes)
    }
}

impl RngSource for GameRng {
    fn next_f64(&mut self) -> f64 {
        // 53 random mantissa bits
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn next_int(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = (max - min) as u64 + 1;
        // Rejection sampling for an unbiased distribution
        let zone = (1u64 << 32) - ((1u64 << 32) % span);
        loop {
            let value = self.next_u32() as u64;
            if value < zone {
                return min + (value % span) as u32;
            }
        }
    }
}

/// Platform randomness, seeded from the operating system.
///
/// No seed is retained, so rounds cannot be replayed.
pub struct EntropyRng {
    rng: StdRng,
}

impl EntropyRng {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for EntropyRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RngSource for EntropyRng {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn next_int(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

/// A player's choice, fixed when the bet is committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Choice {
    Blackjack,
    Roulette(roulette::RouletteBet),
    AmericanRoulette(roulette::RouletteBet),
    Slots,
    Crash,
    Mines { mines: u8 },
    Baccarat(baccarat::Wager),
    Keno { picks: Vec<u8> },
    Bingo,
    Plinko,
    Limbo { target: Multiplier },
    HiLo,
    Dice { target: u8 },
    Craps,
    SicBo(sic_bo::SicBoBet),
    Wheel,
    Tower,
    VideoPoker,
}

impl Choice {
    /// The game this choice belongs to.
    pub fn game(&self) -> GameId {
        match self {
            Choice::Blackjack => GameId::Blackjack,
            Choice::Roulette(_) => GameId::Roulette,
            Choice::AmericanRoulette(_) => GameId::AmericanRoulette,
            Choice::Slots => GameId::Slots,
            Choice::Crash => GameId::Crash,
            Choice::Mines { .. } => GameId::Mines,
            Choice::Baccarat(_) => GameId::Baccarat,
            Choice::Keno { .. } => GameId::Keno,
            Choice::Bingo => GameId::Bingo,
            Choice::Plinko => GameId::Plinko,
            Choice::Limbo { .. } => GameId::Limbo,
            Choice::HiLo => GameId::HiLo,
            Choice::Dice { .. } => GameId::Dice,
            Choice::Craps => GameId::Craps,
            Choice::SicBo(_) => GameId::SicBo,
            Choice::Wheel => GameId::Wheel,
            Choice::Tower => GameId::Tower,
            Choice::VideoPoker => GameId::VideoPoker,
        }
    }
}

/// A stake and the choice it backs. Immutable once committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bet {
    pub amount: u64,
    pub choice: Choice,
}

impl Bet {
    pub fn new(amount: u64, choice: Choice) -> Self {
        Self { amount, choice }
    }
}

/// Sub-decisions accepted while a round is resolving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Blackjack: take another card.
    Hit,
    /// Blackjack: hand over to the dealer.
    Stand,
    /// HiLo: next card ranks higher.
    Higher,
    /// HiLo: next card ranks lower.
    Lower,
    /// Video Poker: keep the cards whose bits are set (bit 0 = first card),
    /// replace the rest.
    Hold { mask: u8 },
    /// Mines: uncover a cell.
    Reveal { row: u8, col: u8 },
    /// Craps: roll for the point.
    Roll,
    /// Scheduled games: advance one tick.
    Tick,
    /// Lock in the current multiplier.
    CashOut,
}

/// Resolved outcome of a round, per game.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Blackjack(blackjack::BlackjackOutcome),
    Roulette(roulette::Spin),
    AmericanRoulette(roulette::Spin),
    Slots(slots::SlotsOutcome),
    Crash(crash::CrashOutcome),
    Mines(mines::MinesOutcome),
    Baccarat(baccarat::BaccaratOutcome),
    Keno(keno::KenoOutcome),
    Bingo(bingo::BingoOutcome),
    Plinko(plinko::PlinkoOutcome),
    Limbo(limbo::LimboOutcome),
    HiLo(hilo::HiLoOutcome),
    Dice(dice::DiceOutcome),
    Craps(craps::CrapsOutcome),
    SicBo(sic_bo::SicBoOutcome),
    Wheel(wheel::WheelOutcome),
    Tower(tower::TowerOutcome),
    VideoPoker(video_poker::VideoPokerOutcome),
}

impl Outcome {
    pub fn game(&self) -> GameId {
        match self {
            Outcome::Blackjack(_) => GameId::Blackjack,
            Outcome::Roulette(_) => GameId::Roulette,
            Outcome::AmericanRoulette(_) => GameId::AmericanRoulette,
            Outcome::Slots(_) => GameId::Slots,
            Outcome::Crash(_) => GameId::Crash,
            Outcome::Mines(_) => GameId::Mines,
            Outcome::Baccarat(_) => GameId::Baccarat,
            Outcome::Keno(_) => GameId::Keno,
            Outcome::Bingo(_) => GameId::Bingo,
            Outcome::Plinko(_) => GameId::Plinko,
            Outcome::Limbo(_) => GameId::Limbo,
            Outcome::HiLo(_) => GameId::HiLo,
            Outcome::Dice(_) => GameId::Dice,
            Outcome::Craps(_) => GameId::Craps,
            Outcome::SicBo(_) => GameId::SicBo,
            Outcome::Wheel(_) => GameId::Wheel,
            Outcome::Tower(_) => GameId::Tower,
            Outcome::VideoPoker(_) => GameId::VideoPoker,
        }
    }

    /// Outcome category, as used for logging and reports.
    pub fn category(&self) -> String {
        match self {
            Outcome::Blackjack(o) => format!("{:?}", o.verdict),
            Outcome::Roulette(o) | Outcome::AmericanRoulette(o) => format!("{:?}", o.color),
            Outcome::Slots(o) => format!("{:?}", o.category),
            Outcome::Crash(o) => format!("{:?}", o.finish),
            Outcome::Mines(o) => format!("{:?}", o.finish),
            Outcome::Baccarat(o) => format!("{:?}", o.winner),
            Outcome::Keno(o) => format!("Matches({})", o.matches),
            Outcome::Bingo(o) => match o.line {
                Some(line) => format!("{:?}", line),
                None => "NoLine".to_string(),
            },
            Outcome::Plinko(o) => format!("Bucket({})", o.bucket),
            Outcome::Limbo(o) => format!("{:?}", o.finish),
            Outcome::HiLo(o) => format!("{:?}", o.finish),
            Outcome::Dice(o) => format!("{:?}", o.category),
            Outcome::Craps(o) => format!("{:?}", o.finish),
            Outcome::SicBo(o) => format!("Total({})", o.total),
            Outcome::Wheel(o) => format!("Segment({})", o.segment),
            Outcome::Tower(o) => format!("{:?}", o.finish),
            Outcome::VideoPoker(o) => format!("{:?}", o.hand),
        }
    }
}

/// An outcome together with the multiplier it pays.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub outcome: Outcome,
    pub multiplier: Multiplier,
}

impl Resolution {
    pub fn new(outcome: Outcome, multiplier: Multiplier) -> Self {
        Self {
            outcome,
            multiplier,
        }
    }
}

/// In-flight state for games with a multi-step resolving phase.
#[derive(Clone, Debug, PartialEq)]
pub enum RoundState {
    Blackjack(blackjack::BlackjackState),
    HiLo(hilo::HiLoState),
    VideoPoker(video_poker::VideoPokerState),
    Mines(mines::MinesState),
    Keno(keno::KenoState),
    Craps(craps::CrapsState),
    Crash(crash::CrashState),
    Limbo(limbo::LimboState),
    Tower(tower::TowerState),
}

impl RoundState {
    /// Tick schedule driving this round, if it is time-based.
    pub fn schedule(&self) -> Option<&TickSchedule> {
        match self {
            RoundState::Keno(state) => Some(&state.schedule),
            RoundState::Crash(state) => Some(&state.schedule),
            RoundState::Limbo(state) => Some(&state.schedule),
            RoundState::Tower(state) => Some(&state.schedule),
            RoundState::Blackjack(_)
            | RoundState::HiLo(_)
            | RoundState::VideoPoker(_)
            | RoundState::Mines(_)
            | RoundState::Craps(_) => None,
        }
    }
}

/// Result of opening a round.
#[derive(Clone, Debug, PartialEq)]
pub enum Opening {
    /// The round waits for sub-decisions.
    Resolving(RoundState),
    /// The round resolved immediately.
    Resolved(Resolution),
}

/// Result of processing a sub-decision.
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// Round is still in progress, state updated.
    Continue,
    /// Round reached a terminal outcome.
    Resolved(Resolution),
}

/// Trait for casino game implementations.
pub trait CasinoGame {
    /// What the player commits to with the bet.
    type Choice;
    /// State carried between sub-decisions.
    type State;

    /// Reject choices the game cannot honour. Runs before any debit.
    fn validate(_choice: &Self::Choice, _config: &EngineConfig) -> Result<(), EngineError> {
        Ok(())
    }

    /// Open a round: deal, spin or roll, and either resolve or wait for
    /// sub-decisions.
    fn init(
        choice: &Self::Choice,
        config: &EngineConfig,
        rng: &mut dyn RngSource,
    ) -> Result<Opening, EngineError>;

    /// Process a sub-decision. Games that resolve inside `init` keep the
    /// default, which accepts nothing.
    fn process_move(
        _state: &mut Self::State,
        _decision: Decision,
        _rng: &mut dyn RngSource,
    ) -> Result<Step, EngineError> {
        Err(EngineError::InvalidStateTransition)
    }
}

/// Dispatch choice validation to the appropriate game module.
pub fn validate_choice(choice: &Choice, config: &EngineConfig) -> Result<(), EngineError> {
    match choice {
        Choice::Roulette(bet) => roulette::Roulette::validate(bet, config),
        Choice::AmericanRoulette(bet) => roulette::AmericanRoulette::validate(bet, config),
        Choice::Mines { mines } => mines::Mines::validate(mines, config),
        Choice::Keno { picks } => keno::Keno::validate(picks, config),
        Choice::Limbo { target } => limbo::Limbo::validate(target, config),
        Choice::Dice { target } => dice::Dice::validate(target, config),
        Choice::SicBo(bet) => sic_bo::SicBo::validate(bet, config),
        Choice::Blackjack
        | Choice::Slots
        | Choice::Crash
        | Choice::Baccarat(_)
        | Choice::Bingo
        | Choice::Plinko
        | Choice::HiLo
        | Choice::Craps
        | Choice::Wheel
        | Choice::Tower
        | Choice::VideoPoker => Ok(()),
    }
}

/// Dispatch round opening to the appropriate game module.
pub fn init_game(
    choice: &Choice,
    config: &EngineConfig,
    rng: &mut dyn RngSource,
) -> Result<Opening, EngineError> {
    match choice {
        Choice::Blackjack => blackjack::Blackjack::init(&(), config, rng),
        Choice::Roulette(bet) => roulette::Roulette::init(bet, config, rng),
        Choice::AmericanRoulette(bet) => roulette::AmericanRoulette::init(bet, config, rng),
        Choice::Slots => slots::Slots::init(&(), config, rng),
        Choice::Crash => crash::Crash::init(&(), config, rng),
        Choice::Mines { mines } => mines::Mines::init(mines, config, rng),
        Choice::Baccarat(wager) => baccarat::Baccarat::init(wager, config, rng),
        Choice::Keno { picks } => keno::Keno::init(picks, config, rng),
        Choice::Bingo => bingo::Bingo::init(&(), config, rng),
        Choice::Plinko => plinko::Plinko::init(&(), config, rng),
        Choice::Limbo { target } => limbo::Limbo::init(target, config, rng),
        Choice::HiLo => hilo::HiLo::init(&(), config, rng),
        Choice::Dice { target } => dice::Dice::init(target, config, rng),
        Choice::Craps => craps::Craps::init(&(), config, rng),
        Choice::SicBo(bet) => sic_bo::SicBo::init(bet, config, rng),
        Choice::Wheel => wheel::Wheel::init(&(), config, rng),
        Choice::Tower => tower::Tower::init(&(), config, rng),
        Choice::VideoPoker => video_poker::VideoPoker::init(&(), config, rng),
    }
}

/// Dispatch sub-decision processing to the appropriate game module.
pub fn process_game_move(
    state: &mut RoundState,
    decision: Decision,
    rng: &mut dyn RngSource,
) -> Result<Step, EngineError> {
    match state {
        RoundState::Blackjack(s) => blackjack::Blackjack::process_move(s, decision, rng),
        RoundState::HiLo(s) => hilo::HiLo::process_move(s, decision, rng),
        RoundState::VideoPoker(s) => video_poker::VideoPoker::process_move(s, decision, rng),
        RoundState::Mines(s) => mines::Mines::process_move(s, decision, rng),
        RoundState::Keno(s) => keno::Keno::process_move(s, decision, rng),
        RoundState::Craps(s) => craps::Craps::process_move(s, decision, rng),
        RoundState::Crash(s) => crash::Crash::process_move(s, decision, rng),
        RoundState::Limbo(s) => limbo::Limbo::process_move(s, decision, rng),
        RoundState::Tower(s) => tower::Tower::process_move(s, decision, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_rng_deterministic() {
        let mut rng1 = GameRng::new(b"seed", 1);
        let mut rng2 = GameRng::new(b"seed", 1);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_game_rng_different_streams() {
        let mut rng1 = GameRng::new(b"seed", 1);
        let mut rng2 = GameRng::new(b"seed", 2);

        let seq1: Vec<u32> = (0..10).map(|_| rng1.next_u32()).collect();
        let seq2: Vec<u32> = (0..10).map(|_| rng2.next_u32()).collect();
        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_game_rng_int_in_range() {
        let mut rng = GameRng::new(b"seed", 1);
        for _ in 0..1000 {
            let value = rng.next_int(3, 9);
            assert!((3..=9).contains(&value));
        }
        assert_eq!(rng.next_int(5, 5), 5);
    }

    #[test]
    fn test_game_rng_int_covers_range() {
        let mut rng = GameRng::new(b"cover", 0);
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[(rng.roll_die() - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_game_rng_float_in_unit_interval() {
        let mut rng = GameRng::new(b"seed", 1);
        for _ in 0..1000 {
            let value = rng.next_f64();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_entropy_rng_bounds() {
        let mut rng = EntropyRng::new();
        for _ in 0..1000 {
            assert!((0.0..1.0).contains(&rng.next_f64()));
            assert!((1..=6).contains(&rng.roll_die()));
        }
    }

    #[test]
    fn test_boxed_rng_delegates() {
        let mut boxed: Box<dyn RngSource> = Box::new(GameRng::new(b"seed", 1));
        let mut plain = GameRng::new(b"seed", 1);
        for _ in 0..10 {
            assert_eq!(boxed.next_int(0, 100), plain.next_int(0, 100));
        }
    }

    #[test]
    fn test_choice_maps_to_game() {
        assert_eq!(Choice::Mines { mines: 3 }.game(), GameId::Mines);
        assert_eq!(
            Choice::AmericanRoulette(roulette::RouletteBet::Green).game(),
            GameId::AmericanRoulette
        );
        assert_eq!(Choice::VideoPoker.game(), GameId::VideoPoker);
    }
}
