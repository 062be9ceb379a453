//! Terminal-state detection

use super::outcome::Outcome;
use crate::board::{PieceKind, Position};

/// Optional draw rules layered on top of the mandatory ones
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawRules {
    pub fifty_move_rule: bool,
}

/// Classifies `position` with the default draw rules.
///
/// `history` holds every position of the game so far, the current one
/// included; it is only consulted for repetition.
pub fn classify(position: &Position, history: &[Position]) -> Outcome {
    classify_with(position, history, DrawRules::default())
}

pub fn classify_with(position: &Position, history: &[Position], rules: DrawRules) -> Outcome {
    if !position.has_legal_moves() {
        return if position.is_check() {
            Outcome::Checkmate {
                loser: position.side_to_move(),
            }
        } else {
            Outcome::Stalemate
        };
    }
    if is_insufficient_material(position) {
        return Outcome::InsufficientMaterial;
    }
    if repetition_count(position, history) >= 3 {
        return Outcome::Repetition;
    }
    if rules.fifty_move_rule && position.halfmove_clock() >= 100 {
        return Outcome::FiftyMoveRule;
    }
    Outcome::Ongoing
}

/// Neither side can possibly deliver mate: bare kings, a single minor piece,
/// or bishops only with all of them on squares of one color.
pub fn is_insufficient_material(position: &Position) -> bool {
    let mut minors = 0;
    let mut bishops_on_light = 0;
    let mut bishops_on_dark = 0;

    for (square, piece) in position.pieces() {
        match piece.kind {
            PieceKind::King => {}
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            PieceKind::Knight => minors += 1,
            PieceKind::Bishop => {
                minors += 1;
                if square.is_light() {
                    bishops_on_light += 1;
                } else {
                    bishops_on_dark += 1;
                }
            }
        }
    }

    let bishops = bishops_on_light + bishops_on_dark;
    minors <= 1 || (bishops == minors && (bishops_on_light == 0 || bishops_on_dark == 0))
}

/// How many entries of `history` repeat `position`, ignoring move counters
pub fn repetition_count(position: &Position, history: &[Position]) -> usize {
    let key = position.repetition_key();
    history.iter().filter(|p| p.repetition_key() == key).count()
}
