//! Round lifecycle.
//!
//! A round moves `Idle -> Committed -> (Resolving ->)* Resolved -> Idle`.
//! `start_round` validates the bet, opens the round, debits the stake and,
//! for one-shot games, settles immediately. Multi-step games then take
//! sub-decisions until they resolve. `reset` drops a resolved round.
//!
//! The engine never reads the balance after commit. It only reports signed
//! deltas through [`BalanceLedger`]: exactly one debit per committed round
//! and at most one credit, after it resolves.

use std::collections::{BTreeMap, HashMap};

use parlor_types::casino::{GameId, Multiplier, Settlement};
use tracing::{debug, info, warn};

use crate::casino::{
    init_game, process_game_move, validate_choice, Bet, Decision, Opening, Outcome, Resolution,
    RngSource, RoundState, Step,
};
use crate::{EngineConfig, EngineError};

/// Receives every balance change the engine makes.
pub trait BalanceLedger {
    fn apply_balance_delta(&mut self, delta: i64);
}

/// Session state as seen by callers. A session that does not exist is idle.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    /// Bet debited, waiting for sub-decisions.
    Resolving(RoundState),
    /// Outcome applied to the balance. Only `result` and `reset` remain.
    Resolved(RoundResult),
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Resolved(_))
    }
}

/// A resolved round.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundResult {
    pub outcome: Outcome,
    pub settlement: Settlement,
}

impl RoundResult {
    pub fn session_id(&self) -> u64 {
        self.settlement.session_id
    }

    pub fn game(&self) -> GameId {
        self.settlement.game
    }

    pub fn category(&self) -> String {
        self.outcome.category()
    }

    pub fn multiplier(&self) -> Multiplier {
        self.settlement.multiplier
    }

    /// Net balance change over the whole round (credit minus stake).
    pub fn balance_delta(&self) -> i64 {
        self.settlement.balance_delta
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoundStart {
    pub session_id: u64,
    pub state: SessionState,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: SessionState,
    pub terminal: bool,
}

struct Session {
    bet: Bet,
    state: SessionState,
}

/// Game session engine.
///
/// Holds at most one unreset session per game. Single-threaded: every call
/// runs to completion before the next.
pub struct Engine<L: BalanceLedger, R: RngSource> {
    config: EngineConfig,
    ledger: L,
    rng: R,
    sessions: BTreeMap<u64, Session>,
    active: HashMap<GameId, u64>,
    next_session_id: u64,
}

impl<L: BalanceLedger, R: RngSource> Engine<L, R> {
    pub fn new(config: EngineConfig, ledger: L, rng: R) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            ledger,
            rng,
            sessions: BTreeMap::new(),
            active: HashMap::new(),
            next_session_id: 1,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Session holding `game`, if one is open or awaiting reset.
    pub fn active_session(&self, game: GameId) -> Option<u64> {
        self.active.get(&game).copied()
    }

    pub fn session_state(&self, session_id: u64) -> Option<&SessionState> {
        self.sessions.get(&session_id).map(|s| &s.state)
    }

    pub fn bet(&self, session_id: u64) -> Option<&Bet> {
        self.sessions.get(&session_id).map(|s| &s.bet)
    }

    /// Whether the session is waiting on scheduled ticks.
    pub fn is_scheduled(&self, session_id: u64) -> bool {
        match self.session_state(session_id) {
            Some(SessionState::Resolving(round)) => round
                .schedule()
                .is_some_and(|schedule| !schedule.is_cancelled()),
            _ => false,
        }
    }

    /// Commit a bet and open a round.
    ///
    /// Nothing is debited unless the whole call succeeds.
    pub fn start_round(
        &mut self,
        game: GameId,
        bet: Bet,
        balance: u64,
    ) -> Result<RoundStart, EngineError> {
        if let Some(existing) = self.active_session(game) {
            warn!(%game, existing, "round already active");
            return Err(EngineError::InvalidStateTransition);
        }
        if let Err(err) = self.validate_bet(game, &bet, balance) {
            warn!(%game, amount = bet.amount, balance, %err, "bet rejected");
            return Err(err);
        }
        let stake = i64::try_from(bet.amount)
            .map_err(|_| EngineError::InvalidBet("stake exceeds the ledger range".into()))?;

        let opening = init_game(&bet.choice, &self.config, &mut self.rng)?;

        let session_id = self.next_session_id;
        self.next_session_id += 1;
        self.ledger.apply_balance_delta(-stake);
        info!(session_id, %game, amount = bet.amount, "round committed");

        let state = match opening {
            Opening::Resolving(round) => SessionState::Resolving(round),
            Opening::Resolved(resolution) => {
                SessionState::Resolved(self.settle(session_id, &bet, resolution))
            }
        };
        self.sessions.insert(
            session_id,
            Session {
                bet,
                state: state.clone(),
            },
        );
        self.active.insert(game, session_id);
        Ok(RoundStart { session_id, state })
    }

    /// Apply a sub-decision to a resolving round.
    ///
    /// A rejected decision leaves the session and the balance unchanged.
    pub fn apply_sub_decision(
        &mut self,
        session_id: u64,
        decision: Decision,
    ) -> Result<Transition, EngineError> {
        let session = self
            .sessions
            .get(&session_id)
            .ok_or(EngineError::UnknownSession(session_id))?;
        let SessionState::Resolving(round) = &session.state else {
            warn!(session_id, ?decision, "decision after resolution");
            return Err(EngineError::InvalidStateTransition);
        };

        // Work on a copy so a rejected decision cannot leave partial changes
        let mut next = round.clone();
        let bet = session.bet.clone();
        debug!(session_id, ?decision, "sub-decision");
        let step = match process_game_move(&mut next, decision, &mut self.rng) {
            Ok(step) => step,
            Err(err) => {
                warn!(session_id, ?decision, %err, "decision rejected");
                return Err(err);
            }
        };

        let state = match step {
            Step::Continue => SessionState::Resolving(next),
            Step::Resolved(resolution) => {
                SessionState::Resolved(self.settle(session_id, &bet, resolution))
            }
        };
        if let Some(session) = self.sessions.get_mut(&session_id) {
            session.state = state.clone();
        }
        Ok(Transition {
            terminal: state.is_terminal(),
            state,
        })
    }

    /// Result of a resolved round.
    pub fn result(&self, session_id: u64) -> Result<RoundResult, EngineError> {
        match self.session_state(session_id) {
            Some(SessionState::Resolved(result)) => Ok(result.clone()),
            Some(SessionState::Resolving(_)) => Err(EngineError::InvalidStateTransition),
            None => Err(EngineError::UnknownSession(session_id)),
        }
    }

    /// Drop a resolved round, freeing its game for the next one.
    pub fn reset(&mut self, session_id: u64) -> Result<(), EngineError> {
        let session = self
            .sessions
            .get(&session_id)
            .ok_or(EngineError::UnknownSession(session_id))?;
        if !session.state.is_terminal() {
            warn!(session_id, "reset before resolution");
            return Err(EngineError::InvalidStateTransition);
        }
        let game = session.bet.choice.game();
        self.sessions.remove(&session_id);
        if self.active.get(&game) == Some(&session_id) {
            self.active.remove(&game);
        }
        debug!(session_id, %game, "session reset");
        Ok(())
    }

    fn validate_bet(&self, game: GameId, bet: &Bet, balance: u64) -> Result<(), EngineError> {
        if bet.amount == 0 {
            return Err(EngineError::InvalidBet("stake must be positive".into()));
        }
        if bet.amount > balance {
            return Err(EngineError::InvalidBet(format!(
                "stake {} exceeds balance {balance}",
                bet.amount
            )));
        }
        if bet.choice.game() != game {
            return Err(EngineError::InvalidBet(format!(
                "{} choice placed on {game}",
                bet.choice.game()
            )));
        }
        validate_choice(&bet.choice, &self.config)
    }

    /// Credit the payout for a resolved round.
    fn settle(&mut self, session_id: u64, bet: &Bet, resolution: Resolution) -> RoundResult {
        let settlement = Settlement::new(
            session_id,
            bet.choice.game(),
            bet.amount,
            resolution.multiplier,
        );
        if settlement.credited > 0 {
            let credit = i64::try_from(settlement.credited).unwrap_or(i64::MAX);
            self.ledger.apply_balance_delta(credit);
        }
        info!(
            session_id,
            game = %settlement.game,
            category = %resolution.outcome.category(),
            multiplier = %settlement.multiplier,
            delta = settlement.balance_delta,
            "round settled"
        );
        RoundResult {
            outcome: resolution.outcome,
            settlement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::casino::{baccarat::Wager, roulette::RouletteBet, Choice};
    use crate::mocks::{create_engine, seeded_engine, ScriptedRng};

    fn dice(amount: u64, target: u8) -> Bet {
        Bet::new(amount, Choice::Dice { target })
    }

    #[test]
    fn test_one_shot_round_debits_then_credits() {
        // Roll 75 over a target of 50 pays 2x
        let mut engine = create_engine(ScriptedRng::ints([75]));
        let start = engine.start_round(GameId::Dice, dice(100, 50), 1_000).unwrap();
        assert!(start.state.is_terminal());
        assert_eq!(engine.ledger().deltas, vec![-100, 200]);

        let result = engine.result(start.session_id).unwrap();
        assert_eq!(result.multiplier(), Multiplier::whole(2));
        assert_eq!(result.balance_delta(), 100);
        assert_eq!(result.category(), "Over");
    }

    #[test]
    fn test_losing_round_has_single_debit() {
        let mut engine = create_engine(ScriptedRng::ints([10]));
        let start = engine.start_round(GameId::Dice, dice(100, 50), 100).unwrap();
        assert_eq!(engine.ledger().deltas, vec![-100]);
        assert_eq!(engine.result(start.session_id).unwrap().balance_delta(), -100);
    }

    #[test]
    fn test_invalid_bets_do_not_debit() {
        let mut engine = seeded_engine(1);
        assert!(matches!(
            engine.start_round(GameId::Dice, dice(0, 50), 100),
            Err(EngineError::InvalidBet(_))
        ));
        assert!(matches!(
            engine.start_round(GameId::Dice, dice(101, 50), 100),
            Err(EngineError::InvalidBet(_))
        ));
        assert!(matches!(
            engine.start_round(GameId::Roulette, dice(10, 50), 100),
            Err(EngineError::InvalidBet(_))
        ));
        assert!(matches!(
            engine.start_round(GameId::Dice, dice(10, 0), 100),
            Err(EngineError::InvalidBet(_))
        ));
        assert!(matches!(
            engine.start_round(GameId::Mines, Bet::new(10, Choice::Mines { mines: 25 }), 100),
            Err(EngineError::InvalidBet(_))
        ));
        assert!(engine.ledger().deltas.is_empty());
        assert_eq!(engine.active_session(GameId::Dice), None);
    }

    #[test]
    fn test_stake_equal_to_balance_allowed() {
        let mut engine = seeded_engine(2);
        assert!(engine
            .start_round(GameId::Roulette, Bet::new(50, Choice::Roulette(RouletteBet::Red)), 50)
            .is_ok());
    }

    #[test]
    fn test_one_active_round_per_game() {
        let mut engine = seeded_engine(3);
        let first = engine
            .start_round(GameId::Baccarat, Bet::new(10, Choice::Baccarat(Wager::Banker)), 100)
            .unwrap();
        assert_eq!(
            engine.start_round(GameId::Baccarat, Bet::new(10, Choice::Baccarat(Wager::Banker)), 100),
            Err(EngineError::InvalidStateTransition)
        );
        // Other games are unaffected
        assert!(engine
            .start_round(GameId::Wheel, Bet::new(10, Choice::Wheel), 100)
            .is_ok());

        engine.reset(first.session_id).unwrap();
        assert!(engine
            .start_round(GameId::Baccarat, Bet::new(10, Choice::Baccarat(Wager::Tie)), 100)
            .is_ok());
    }

    #[test]
    fn test_multi_step_round() {
        // Come-out 4, then 2+3, then 2+2 makes the point
        let mut engine = create_engine(ScriptedRng::ints([1, 3, 2, 3, 2, 2]));
        let start = engine
            .start_round(GameId::Craps, Bet::new(40, Choice::Craps), 40)
            .unwrap();
        assert!(!start.state.is_terminal());
        assert_eq!(engine.ledger().deltas, vec![-40]);
        assert_eq!(
            engine.result(start.session_id),
            Err(EngineError::InvalidStateTransition)
        );
        assert_eq!(
            engine.reset(start.session_id),
            Err(EngineError::InvalidStateTransition)
        );

        let transition = engine.apply_sub_decision(start.session_id, Decision::Roll).unwrap();
        assert!(!transition.terminal);
        let transition = engine.apply_sub_decision(start.session_id, Decision::Roll).unwrap();
        assert!(transition.terminal);
        assert_eq!(engine.ledger().deltas, vec![-40, 80]);

        // Settles exactly once
        assert_eq!(
            engine.apply_sub_decision(start.session_id, Decision::Roll),
            Err(EngineError::InvalidStateTransition)
        );
        assert_eq!(engine.ledger().deltas, vec![-40, 80]);
    }

    #[test]
    fn test_rejected_decision_changes_nothing() {
        let mut engine = seeded_engine(4);
        let start = engine
            .start_round(GameId::Mines, Bet::new(10, Choice::Mines { mines: 3 }), 100)
            .unwrap();
        let before = engine.session_state(start.session_id).cloned();
        assert!(matches!(
            engine.apply_sub_decision(start.session_id, Decision::Hit),
            Err(EngineError::InvalidDecision(_))
        ));
        assert!(engine
            .apply_sub_decision(start.session_id, Decision::Reveal { row: 9, col: 0 })
            .is_err());
        assert_eq!(engine.session_state(start.session_id).cloned(), before);
        assert_eq!(engine.ledger().deltas, vec![-10]);
    }

    #[test]
    fn test_scheduled_round_stops_after_resolution() {
        let mut engine = seeded_engine(5);
        let start = engine
            .start_round(GameId::Tower, Bet::new(10, Choice::Tower), 10)
            .unwrap();
        assert!(engine.is_scheduled(start.session_id));
        engine.apply_sub_decision(start.session_id, Decision::Tick).unwrap();
        let transition = engine
            .apply_sub_decision(start.session_id, Decision::CashOut)
            .unwrap();
        assert!(transition.terminal);
        assert!(!engine.is_scheduled(start.session_id));
        // 10 at 1.5x
        assert_eq!(engine.ledger().deltas, vec![-10, 15]);

        assert_eq!(
            engine.apply_sub_decision(start.session_id, Decision::Tick),
            Err(EngineError::InvalidStateTransition)
        );
        assert_eq!(engine.ledger().deltas, vec![-10, 15]);
    }

    #[test]
    fn test_unknown_session() {
        let mut engine = seeded_engine(6);
        assert_eq!(
            engine.apply_sub_decision(42, Decision::Tick),
            Err(EngineError::UnknownSession(42))
        );
        assert_eq!(engine.result(42), Err(EngineError::UnknownSession(42)));
        assert_eq!(engine.reset(42), Err(EngineError::UnknownSession(42)));
    }

    #[test]
    fn test_reset_forgets_session() {
        let mut engine = seeded_engine(7);
        let start = engine
            .start_round(GameId::Slots, Bet::new(5, Choice::Slots), 5)
            .unwrap();
        engine.reset(start.session_id).unwrap();
        assert!(engine.session_state(start.session_id).is_none());
        assert_eq!(engine.active_session(GameId::Slots), None);
        assert_eq!(
            engine.result(start.session_id),
            Err(EngineError::UnknownSession(start.session_id))
        );
    }

    #[test]
    fn test_session_ids_increase() {
        let mut engine = seeded_engine(8);
        let a = engine.start_round(GameId::Wheel, Bet::new(1, Choice::Wheel), 1).unwrap();
        let b = engine.start_round(GameId::Slots, Bet::new(1, Choice::Slots), 1).unwrap();
        assert_eq!(a.session_id, 1);
        assert_eq!(b.session_id, 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            tick_interval_ms: 0,
            ..EngineConfig::default()
        };
        assert!(Engine::new(config, crate::mocks::RecordingLedger::new(), ScriptedRng::new()).is_err());
    }
}
