//! Game outcome types

use serde::{Deserialize, Serialize};

use crate::board::Color;

/// Classification of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Ongoing,
    /// Side to move has no legal moves and is in check
    Checkmate { loser: Color },
    /// Side to move has no legal moves and is not in check
    Stalemate,
    InsufficientMaterial,
    /// Same position seen three times
    Repetition,
    /// Hundred halfmoves without a pawn move or capture (opt-in)
    FiftyMoveRule,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            Outcome::Stalemate
                | Outcome::InsufficientMaterial
                | Outcome::Repetition
                | Outcome::FiftyMoveRule
        )
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            Outcome::Checkmate { loser } => Some(loser.opposite()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Ongoing => "ongoing",
            Outcome::Checkmate { .. } => "checkmate",
            Outcome::Stalemate => "stalemate",
            Outcome::InsufficientMaterial => "insufficient_material",
            Outcome::Repetition => "repetition",
            Outcome::FiftyMoveRule => "fifty_move_rule",
        }
    }

    /// Human-readable label for banners
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Ongoing => "Game in progress",
            Outcome::Checkmate { loser: Color::Black } => "White wins by checkmate",
            Outcome::Checkmate { loser: Color::White } => "Black wins by checkmate",
            Outcome::Stalemate => "Draw by stalemate",
            Outcome::InsufficientMaterial => "Draw by insufficient material",
            Outcome::Repetition => "Draw by threefold repetition",
            Outcome::FiftyMoveRule => "Draw by fifty-move rule",
        }
    }
}
