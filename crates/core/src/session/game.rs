//! Human-versus-engine game session
//!
//! Sequences a human move, the engine's reply and the terminal check, and
//! owns the shared countdown clock. The session never reads wall-clock time:
//! the caller reports elapsed time through [`GameSession::tick`].

use tracing::{debug, info, warn};

use super::clock::Countdown;
use super::snapshot::SessionSnapshot;
use super::state::{PendingReply, ReplyDisposition, SessionOutcome, SessionState, TurnReport};
use crate::board::{Color, PieceKind, Position, Square};
use crate::config::EngineConfig;
use crate::engine::{Evaluator, MaterialEvaluator, SearchEngine};
use crate::error::{Error, Result};
use crate::movegen::Move;
use crate::rules::classify_with;

pub struct GameSession<E = MaterialEvaluator> {
    config: EngineConfig,
    engine: SearchEngine<E>,
    state: SessionState,
    position: Position,
    /// Every position of the game, current one last
    history: Vec<Position>,
    moves: Vec<Move>,
    clock: Countdown,
    /// Bumped by every start and abandon so replies never cross games
    game: u64,
}

impl GameSession<MaterialEvaluator> {
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_engine(config, SearchEngine::new())
    }
}

impl<E: Evaluator> GameSession<E> {
    pub fn with_engine(config: EngineConfig, engine: SearchEngine<E>) -> Result<Self> {
        config.validate()?;
        let clock = Countdown::new(config.clock_budget);
        Ok(Self {
            config,
            engine,
            state: SessionState::NotStarted,
            position: Position::initial(),
            history: Vec::new(),
            moves: Vec::new(),
            clock,
            game: 0,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn history(&self) -> &[Position] {
        &self.history
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn remaining(&self) -> u32 {
        self.clock.remaining()
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.state.outcome()
    }

    pub fn outcome_label(&self) -> Option<&'static str> {
        self.outcome().map(|o| o.label())
    }

    pub fn human_color(&self) -> Color {
        self.config.human_color
    }

    pub fn engine_color(&self) -> Color {
        self.config.engine_color()
    }

    /// Starts a fresh game from the initial position with a full clock.
    ///
    /// When the engine has White it plays its first move right away.
    pub fn start(&mut self) -> TurnReport {
        self.position = Position::initial();
        self.history.clear();
        self.history.push(self.position.clone());
        self.moves.clear();
        self.clock = Countdown::new(self.config.clock_budget);
        self.state = SessionState::InProgress;
        self.game += 1;
        info!(
            human = self.human_color().name(),
            depth = self.config.search_depth,
            budget = self.config.clock_budget,
            "game started"
        );

        let engine_move = if self.position.side_to_move() == self.engine_color() {
            self.engine_turn()
        } else {
            None
        };
        TurnReport {
            human_move: None,
            engine_move,
            state: self.state,
        }
    }

    /// Drops the current game and returns to the not-started state
    pub fn abandon(&mut self) {
        if self.state != SessionState::NotStarted {
            info!(plies = self.moves.len(), "game abandoned");
        }
        self.state = SessionState::NotStarted;
        self.position = Position::initial();
        self.history.clear();
        self.moves.clear();
        self.clock.reset();
        self.game += 1;
    }

    /// Plays the human move and, if the game goes on, the engine's reply
    pub fn apply_human_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<TurnReport> {
        let mut report = self.play_human_move(from, to, promotion)?;
        if self.state.is_active() {
            report.engine_move = self.engine_turn();
            report.state = self.state;
        }
        Ok(report)
    }

    /// [`GameSession::apply_human_move`] taking coordinate notation (`e2e4`)
    pub fn apply_human_uci(&mut self, text: &str) -> Result<TurnReport> {
        self.ensure_active()?;
        let mv = self.position.parse_move(text)?;
        self.apply_human_move(mv.from, mv.to, mv.promotion)
    }

    /// Plays only the human move, leaving the engine reply to the caller
    /// through [`GameSession::prepare_engine_reply`] and
    /// [`GameSession::commit_engine_reply`].
    pub fn play_human_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<TurnReport> {
        self.ensure_active()?;
        if self.position.side_to_move() != self.human_color() {
            return Err(Error::IllegalMove(format!(
                "{}{} played while {} is to move",
                from,
                to,
                self.position.side_to_move().name()
            )));
        }
        let mv = self.position.find_move(from, to, promotion)?;
        self.play(mv)?;
        Ok(TurnReport {
            human_move: Some(mv),
            engine_move: None,
            state: self.state,
        })
    }

    /// Searches the engine's reply on a private copy of the current position
    pub fn prepare_engine_reply(&self) -> Result<PendingReply> {
        self.ensure_active()?;
        let engine_color = self.engine_color();
        if self.position.side_to_move() != engine_color {
            return Err(Error::IllegalMove(format!(
                "engine plays {} but {} is to move",
                engine_color.name(),
                self.position.side_to_move().name()
            )));
        }
        let result = self
            .engine
            .best_move(&self.position, self.config.search_depth, engine_color);
        Ok(PendingReply {
            game: self.game,
            ply: self.moves.len(),
            result,
        })
    }

    /// Applies a reply from [`GameSession::prepare_engine_reply`] if the same
    /// game is still in progress at the ply it was computed for; otherwise the
    /// reply is discarded. A timeout therefore always beats an unapplied reply.
    pub fn commit_engine_reply(&mut self, pending: PendingReply) -> Result<ReplyDisposition> {
        if !self.state.is_active() {
            warn!(state = self.state.as_str(), "discarding engine reply, session ended");
            return Ok(ReplyDisposition::Discarded);
        }
        if pending.game != self.game || pending.ply != self.moves.len() {
            warn!(
                computed_in = pending.game,
                game = self.game,
                computed_at = pending.ply,
                current = self.moves.len(),
                "discarding stale engine reply"
            );
            return Ok(ReplyDisposition::Discarded);
        }
        match pending.result.best_move {
            Some(mv) => {
                self.play(mv)?;
                Ok(ReplyDisposition::Applied(mv))
            }
            None => Ok(ReplyDisposition::Discarded),
        }
    }

    /// Advances the shared clock; running out finishes the game on the spot
    pub fn tick(&mut self, elapsed: u32) -> Result<SessionState> {
        self.ensure_active()?;
        if self.clock.tick(elapsed) == 0 {
            self.finish(SessionOutcome::Timeout);
        }
        Ok(self.state)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            fen: self.position.serialize(),
            state: self.state.as_str().to_string(),
            outcome: self.outcome_label().map(str::to_string),
            remaining: self.clock.remaining(),
            side_to_move: self.position.side_to_move(),
            in_check: self.position.is_check(),
            moves: self.moves.iter().map(Move::to_uci).collect(),
        }
    }

    fn ensure_active(&self) -> Result<()> {
        if self.state.is_active() {
            Ok(())
        } else {
            Err(Error::SessionNotActive)
        }
    }

    fn engine_turn(&mut self) -> Option<Move> {
        let pending = self.prepare_engine_reply().ok()?;
        match self.commit_engine_reply(pending) {
            Ok(ReplyDisposition::Applied(mv)) => Some(mv),
            _ => None,
        }
    }

    fn play(&mut self, mv: Move) -> Result<()> {
        self.position = self.position.apply(&mv)?;
        self.moves.push(mv);
        self.history.push(self.position.clone());
        if self.history.len() > self.config.history_limit {
            let excess = self.history.len() - self.config.history_limit;
            self.history.drain(..excess);
        }
        debug!(mv = %mv, fen = %self.position, "move applied");

        let outcome = classify_with(&self.position, &self.history, self.config.draw_rules());
        if outcome.is_terminal() {
            self.finish(SessionOutcome::Rules(outcome));
        }
        Ok(())
    }

    fn finish(&mut self, outcome: SessionOutcome) {
        self.state = SessionState::Finished(outcome);
        info!(
            outcome = outcome.label(),
            plies = self.moves.len(),
            remaining = self.clock.remaining(),
            "game finished"
        );
    }
}
