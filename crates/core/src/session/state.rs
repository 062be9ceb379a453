//! Session lifecycle types

use serde::{Deserialize, Serialize};

use crate::engine::SearchResult;
use crate::movegen::Move;
use crate::rules::Outcome;

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    /// Ended by the rules of chess
    Rules(Outcome),
    /// The shared clock ran out
    Timeout,
}

impl SessionOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            SessionOutcome::Rules(outcome) => outcome.label(),
            SessionOutcome::Timeout => "Time expired",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    InProgress,
    Finished(SessionOutcome),
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::InProgress)
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        match self {
            SessionState::Finished(outcome) => Some(*outcome),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::NotStarted => "not_started",
            SessionState::InProgress => "in_progress",
            SessionState::Finished(_) => "finished",
        }
    }
}

/// Moves made by one inbound call and the state it left behind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub human_move: Option<Move>,
    pub engine_move: Option<Move>,
    pub state: SessionState,
}

/// An engine reply computed but not yet applied.
///
/// Tied to the game and ply it was computed for; committing it after the
/// game moved on, ended or was restarted discards it.
#[derive(Debug, Clone)]
pub struct PendingReply {
    pub(crate) game: u64,
    pub(crate) ply: usize,
    pub(crate) result: SearchResult,
}

impl PendingReply {
    pub fn result(&self) -> &SearchResult {
        &self.result
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyDisposition {
    Applied(Move),
    Discarded,
}
