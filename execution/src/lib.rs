pub mod casino;
pub mod config;
pub mod session;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

mod error;

pub use casino::{Bet, Choice, Decision, EntropyRng, GameRng, Outcome, RngSource};
pub use config::EngineConfig;
pub use error::EngineError;
pub use session::{BalanceLedger, Engine, RoundResult, RoundStart, SessionState, Transition};
