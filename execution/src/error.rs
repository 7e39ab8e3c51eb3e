use thiserror::Error;

/// Errors raised by the game session engine.
///
/// None of these ever leave the external balance half-updated: validation
/// happens before the debit and credits only follow a resolved outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Stake is zero, exceeds the balance, or the choice does not fit the game.
    #[error("invalid bet: {0}")]
    InvalidBet(String),
    /// Action attempted outside the state that accepts it. Nothing changed.
    #[error("action not valid in the current session state")]
    InvalidStateTransition,
    /// The game does not accept this decision (or forbids it right now).
    #[error("decision not accepted: {0}")]
    InvalidDecision(&'static str),
    /// A draw asked for more items than the pool holds.
    #[error("cannot draw {requested} items from a pool of {available}")]
    InsufficientPool { requested: usize, available: usize },
    /// A keyed payout lookup fell outside its table.
    #[error("no payout entry for {0}")]
    UnknownOutcomeCategory(String),
    #[error("unknown session: {0}")]
    UnknownSession(u64),
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
