//! Serializable view of a running session

use serde::Serialize;

use crate::board::Color;

/// Everything a front end needs to draw the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub fen: String,
    pub state: String,
    /// Human-readable result once the game is over
    pub outcome: Option<String>,
    pub remaining: u32,
    pub side_to_move: Color,
    pub in_check: bool,
    /// Moves played so far in coordinate notation
    pub moves: Vec<String>,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::session::GameSession;

    #[test]
    fn test_snapshot_of_fresh_session() {
        let mut session = GameSession::new(EngineConfig::default()).unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.state, "not_started");
        assert_eq!(snapshot.outcome, None);

        session.start();
        session.apply_human_uci("e2e4").unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.state, "in_progress");
        assert_eq!(snapshot.moves.len(), 2);
        assert_eq!(snapshot.moves[0], "e2e4");
        assert_eq!(snapshot.side_to_move, Color::White);
        assert_eq!(snapshot.remaining, 300);
    }

    #[test]
    fn test_snapshot_json_fields() {
        let mut session = GameSession::new(EngineConfig {
            clock_budget: 1,
            ..EngineConfig::default()
        })
        .unwrap();
        session.start();
        session.tick(1).unwrap();

        let json = session.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["state"], "finished");
        assert_eq!(value["outcome"], "Time expired");
        assert_eq!(value["side_to_move"], "white");
        assert_eq!(value["remaining"], 0);
        assert_eq!(value["in_check"], false);
    }
}
