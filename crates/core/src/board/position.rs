//! Position representation
//!
//! A [`Position`] is a plain value: an 8x8 mailbox of optional pieces plus the
//! side to move, castling rights, en-passant target and the two move counters.
//! Equality and hashing deliberately ignore the move counters, so two positions
//! reached by different move orders compare equal when the board state agrees.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::types::{Color, Piece, PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// Home square of the rook that castles on this side
    pub fn rook_square(self, color: Color) -> Square {
        let file = match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        };
        Square::at(file, color.home_rank())
    }

    /// Square the king lands on
    pub fn king_destination(self, color: Color) -> Square {
        let file = match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        };
        Square::at(file, color.home_rank())
    }

    /// Square the rook lands on
    pub fn rook_destination(self, color: Color) -> Square {
        let file = match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        };
        Square::at(file, color.home_rank())
    }
}

/// Per-color castling availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    pub fn has(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.white_kingside,
            (Color::White, CastleSide::Queenside) => self.white_queenside,
            (Color::Black, CastleSide::Kingside) => self.black_kingside,
            (Color::Black, CastleSide::Queenside) => self.black_queenside,
        }
    }

    pub fn set(&mut self, color: Color, side: CastleSide, value: bool) {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.white_kingside = value,
            (Color::White, CastleSide::Queenside) => self.white_queenside = value,
            (Color::Black, CastleSide::Kingside) => self.black_kingside = value,
            (Color::Black, CastleSide::Queenside) => self.black_queenside = value,
        }
    }

    pub fn clear_color(&mut self, color: Color) {
        self.set(color, CastleSide::Kingside, false);
        self.set(color, CastleSide::Queenside, false);
    }

    /// Drops whichever right depends on a rook standing on `square`
    pub fn clear_rook_square(&mut self, square: Square) {
        for color in Color::ALL {
            for side in [CastleSide::Kingside, CastleSide::Queenside] {
                if side.rook_square(color) == square {
                    self.set(color, side, false);
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == CastlingRights::NONE
    }
}

/// The identity of a position for repetition counting.
///
/// The en-passant target only counts when a pawn of the side to move could
/// actually capture onto it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepetitionKey {
    board: [Option<Piece>; 64],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
}

#[derive(Debug, Clone)]
pub struct Position {
    pub(crate) board: [Option<Piece>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Position {
    /// An empty board with White to move and no rights
    pub(crate) fn empty() -> Self {
        Self {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// The standard starting position
    pub fn initial() -> Self {
        let mut position = Self::empty();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            for color in Color::ALL {
                let pawn_rank = (color.home_rank() as i8 + color.forward()) as u8;
                position.put(Square::at(file, color.home_rank()), Piece::new(color, *kind));
                position.put(Square::at(file, pawn_rank), Piece::new(color, PieceKind::Pawn));
            }
        }
        position.castling = CastlingRights::ALL;
        position
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.index()]
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// All occupied squares with their pieces, a1 to h8
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.board[sq.index()].map(|p| (sq, p)))
    }

    pub fn piece_count(&self) -> usize {
        self.board.iter().filter(|p| p.is_some()).count()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.color == color && p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    pub(crate) fn put(&mut self, square: Square, piece: Piece) {
        self.board[square.index()] = Some(piece);
    }

    pub(crate) fn take(&mut self, square: Square) -> Option<Piece> {
        self.board[square.index()].take()
    }

    /// True when a pawn of the side to move stands ready to capture en passant
    pub fn en_passant_capturable(&self) -> bool {
        let Some(target) = self.en_passant else {
            return false;
        };
        let us = self.side_to_move;
        [-1i8, 1].iter().any(|&df| {
            target
                .offset(df, -us.forward())
                .and_then(|sq| self.piece_at(sq))
                .map_or(false, |p| p.color == us && p.kind == PieceKind::Pawn)
        })
    }

    pub fn repetition_key(&self) -> RepetitionKey {
        RepetitionKey {
            board: self.board,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: if self.en_passant_capturable() {
                self.en_passant
            } else {
                None
            },
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.board.hash(state);
        self.side_to_move.hash(state);
        self.castling.hash(state);
        self.en_passant.hash(state);
    }
}
