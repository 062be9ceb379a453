//! Static position evaluation

use crate::board::{Color, Position};
use crate::rules::{classify, Outcome};

/// Score for a checkmated position, signed by perspective
pub const MATE_SCORE: i32 = 1000;

/// Scores a position from one side's point of view; positive favors `perspective`
pub trait Evaluator {
    fn score(&self, position: &Position, perspective: Color) -> i32;
}

/// Material count with standard piece values.
///
/// Checkmate overrides material with [`MATE_SCORE`] and drawn terminal
/// positions score zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Own material minus the opponent's
    pub fn material(position: &Position, perspective: Color) -> i32 {
        position
            .pieces()
            .map(|(_, piece)| {
                let value = piece.kind.value();
                if piece.color == perspective {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }
}

impl Evaluator for MaterialEvaluator {
    fn score(&self, position: &Position, perspective: Color) -> i32 {
        match classify(position, &[]) {
            Outcome::Checkmate { loser } if loser == perspective => -MATE_SCORE,
            Outcome::Checkmate { .. } => MATE_SCORE,
            outcome if outcome.is_draw() => 0,
            _ => Self::material(position, perspective),
        }
    }
}
