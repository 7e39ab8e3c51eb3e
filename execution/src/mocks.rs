//! Test helpers: deterministic and scripted randomness, and a ledger that
//! records every balance delta it receives.

use std::collections::VecDeque;

use crate::{BalanceLedger, Engine, EngineConfig, GameRng, RngSource};

/// Creates a deterministic RNG from a numeric seed.
pub fn seeded_rng(seed: u64) -> GameRng {
    GameRng::new(&seed.to_be_bytes(), 0)
}

/// Replays a fixed sequence of draws.
///
/// Integer and float draws are scripted separately and consumed in order.
/// Running out of script, or scripting an integer outside the requested
/// range, is a bug in the test and panics.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    ints: VecDeque<u32>,
    floats: VecDeque<f64>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ints(values: impl IntoIterator<Item = u32>) -> Self {
        Self::new().with_ints(values)
    }

    pub fn floats(values: impl IntoIterator<Item = f64>) -> Self {
        Self::new().with_floats(values)
    }

    pub fn with_ints(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.ints.extend(values);
        self
    }

    pub fn with_floats(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.floats.extend(values);
        self
    }

    /// Draws not yet consumed, as (ints, floats).
    pub fn remaining(&self) -> (usize, usize) {
        (self.ints.len(), self.floats.len())
    }
}

impl RngSource for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        self.floats.pop_front().expect("scripted floats exhausted")
    }

    fn next_int(&mut self, min: u32, max: u32) -> u32 {
        let value = self.ints.pop_front().expect("scripted ints exhausted");
        assert!(
            (min..=max.max(min)).contains(&value),
            "scripted int {value} outside {min}..={max}"
        );
        value
    }
}

/// Ledger that keeps every delta it was handed.
#[derive(Clone, Debug, Default)]
pub struct RecordingLedger {
    pub deltas: Vec<i64>,
}

impl RecordingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all deltas.
    pub fn net(&self) -> i64 {
        self.deltas.iter().sum()
    }

    pub fn debits(&self) -> Vec<i64> {
        self.deltas.iter().copied().filter(|d| *d < 0).collect()
    }

    pub fn credits(&self) -> Vec<i64> {
        self.deltas.iter().copied().filter(|d| *d > 0).collect()
    }
}

impl BalanceLedger for RecordingLedger {
    fn apply_balance_delta(&mut self, delta: i64) {
        self.deltas.push(delta);
    }
}

/// Engine with default configuration, a recording ledger and the given RNG.
pub fn create_engine<R: RngSource>(rng: R) -> Engine<RecordingLedger, R> {
    Engine::new(EngineConfig::default(), RecordingLedger::new(), rng)
        .expect("default config is valid")
}

/// Engine driven by a seeded [`GameRng`].
pub fn seeded_engine(seed: u64) -> Engine<RecordingLedger, GameRng> {
    create_engine(seeded_rng(seed))
}
