//! Types for representing search results

use std::fmt;

use crate::movegen::Move;

/// Outcome of a fixed-depth search.
///
/// Valid only for the position and depth that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, or `None` when the position has no legal moves
    pub best_move: Option<Move>,
    /// Score from the maximizing color's point of view
    pub score: i32,
    /// Depth searched in plies
    pub depth: u8,
    /// Nodes visited
    pub nodes: u64,
}

impl SearchResult {
    /// Returns true if the score is a forced mate for either side
    pub fn is_mate_score(&self) -> bool {
        self.score.abs() >= super::evaluator::MATE_SCORE
    }

    /// Returns a brief summary of the search
    pub fn summary(&self) -> String {
        format!(
            "Best: {} | Score: {} | Depth: {} | Nodes: {}",
            self.best_move
                .map(|m| m.to_uci())
                .unwrap_or_else(|| "none".to_string()),
            self.score,
            self.depth,
            self.nodes
        )
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.best_move {
            Some(mv) => write!(f, "{} (score {})", mv, self.score),
            None => write!(f, "none (score {})", self.score),
        }
    }
}
