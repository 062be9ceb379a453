//! Applying and reverting moves
//!
//! Two paths are exposed. [`Position::apply`] checks legality and returns a
//! fresh position, which is what a caller applying a single real move wants.
//! [`Position::apply_in_place`] and [`Position::revert`] mutate one position
//! and undo the change exactly; they allocate nothing and are the only pair
//! meant to be called at search frequency.

use super::moves::{Move, MoveKind, Undo};
use crate::board::{Color, Piece, PieceKind, Position, Square};
use crate::error::{Error, Result};

impl Position {
    /// Applies a legal move and returns the resulting position
    pub fn apply(&self, mv: &Move) -> Result<Position> {
        if !self.legal_moves().contains(mv) {
            return Err(Error::IllegalMove(format!("{} in {}", mv, self.serialize())));
        }
        let mut next = self.clone();
        next.apply_in_place(*mv);
        Ok(next)
    }

    /// Applies `mv` without a legality check.
    ///
    /// `mv` must come from move generation on this exact position; the
    /// returned [`Undo`] restores it through [`Position::revert`].
    pub fn apply_in_place(&mut self, mv: Move) -> Undo {
        let us = self.side_to_move;
        let mut undo = Undo {
            mv,
            moved: None,
            captured: None,
            side_to_move: us,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        };

        let Some(piece) = self.take(mv.from) else {
            return undo;
        };
        undo.moved = Some(piece);

        undo.captured = match mv.kind {
            MoveKind::EnPassant => en_passant_victim(mv, us).and_then(|sq| self.take(sq)),
            _ => self.take(mv.to),
        };

        let placed = match mv.promotion {
            Some(kind) => Piece::new(us, kind),
            None => piece,
        };
        self.put(mv.to, placed);

        if let MoveKind::Castle(side) = mv.kind {
            if let Some(rook) = self.take(side.rook_square(us)) {
                self.put(side.rook_destination(us), rook);
            }
        }

        if piece.kind == PieceKind::King {
            self.castling.clear_color(us);
        }
        self.castling.clear_rook_square(mv.from);
        self.castling.clear_rook_square(mv.to);

        self.en_passant = match mv.kind {
            MoveKind::DoublePush => mv.from.offset(0, us.forward()),
            _ => None,
        };

        if piece.kind == PieceKind::Pawn || undo.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if us == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = us.opposite();

        undo
    }

    /// Restores the position exactly as it was before the matching
    /// [`Position::apply_in_place`]
    pub fn revert(&mut self, undo: Undo) {
        let mv = undo.mv;
        if let Some(moved) = undo.moved {
            let mover = moved.color;
            self.take(mv.to);
            self.put(mv.from, moved);

            if let MoveKind::Castle(side) = mv.kind {
                if let Some(rook) = self.take(side.rook_destination(mover)) {
                    self.put(side.rook_square(mover), rook);
                }
            }

            if let Some(captured) = undo.captured {
                let square = match mv.kind {
                    MoveKind::EnPassant => en_passant_victim(mv, mover),
                    _ => Some(mv.to),
                };
                if let Some(square) = square {
                    self.put(square, captured);
                }
            }
        }

        self.side_to_move = undo.side_to_move;
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
    }
}

/// The pawn taken en passant stands beside the mover, behind the target square
fn en_passant_victim(mv: Move, mover: Color) -> Option<Square> {
    mv.to.offset(0, -mover.forward())
}
