//! Chess Engine Core Library
//!
//! Rules authority and opponent for a human-versus-engine chess game:
//! position model with FEN support, legal move generation, terminal
//! detection, a material evaluator with alpha-beta search, and a game
//! session with a shared countdown clock.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod movegen;
pub mod rules;
pub mod session;

pub use board::{Color, Piece, PieceKind, Position, Square, STARTING_FEN};
pub use config::EngineConfig;
pub use engine::{Evaluator, MaterialEvaluator, SearchEngine, SearchResult};
pub use error::{Error, Result};
pub use movegen::{perft, Move, MoveKind, Undo};
pub use rules::{classify, Outcome};
pub use session::{GameSession, SessionOutcome, SessionSnapshot, SessionState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fools_mate_end_to_end() {
        let mut position = Position::initial();
        let mut history = vec![position.clone()];
        for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            let mv = position.parse_move(uci).unwrap();
            position = position.apply(&mv).unwrap();
            history.push(position.clone());
        }
        assert_eq!(
            classify(&position, &history),
            Outcome::Checkmate { loser: Color::White }
        );
        assert_eq!(MaterialEvaluator::new().score(&position, Color::Black), 1000);
    }
}
