//! Move and undo records

use std::fmt;

use crate::board::{CastleSide, CastlingRights, Color, Piece, PieceKind, Square};

/// How a move interacts with the board beyond moving one piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Quiet,
    Capture,
    /// Pawn advancing two squares from its starting rank
    DoublePush,
    EnPassant,
    Castle(CastleSide),
}

/// A move, meaningful only for the position it was generated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub kind: MoveKind,
}

impl Move {
    pub fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Self {
            from,
            to,
            promotion: None,
            kind,
        }
    }

    pub fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }

    pub fn is_capture(&self) -> bool {
        matches!(self.kind, MoveKind::Capture | MoveKind::EnPassant)
    }

    pub fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::Castle(_))
    }

    /// Coordinate notation, e.g. `e2e4` or `e7e8q`
    pub fn to_uci(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

/// Everything [`Position::revert`](crate::board::Position::revert) needs to
/// restore the position a move was applied to.
#[derive(Debug, Clone)]
pub struct Undo {
    pub(crate) mv: Move,
    pub(crate) moved: Option<Piece>,
    pub(crate) captured: Option<Piece>,
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Undo {
    pub fn mv(&self) -> Move {
        self.mv
    }

    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }
}
