//! Attack detection

use crate::board::{Color, PieceKind, Position, Square};

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

impl Position {
    /// Whether any piece of color `by` attacks `square`.
    ///
    /// Works backwards from the target: a square is attacked by a knight if a
    /// knight stands a knight's jump away, by a rook if the first piece along a
    /// rank or file is a rook or queen, and so on.
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        let is = |sq: Option<Square>, kinds: &[PieceKind]| {
            sq.and_then(|s| self.piece_at(s))
                .map_or(false, |p| p.color == by && kinds.contains(&p.kind))
        };

        // Pawns of `by` capture toward their forward direction
        for df in [-1, 1] {
            if is(square.offset(df, -by.forward()), &[PieceKind::Pawn]) {
                return true;
            }
        }

        if KNIGHT_OFFSETS
            .iter()
            .any(|&(df, dr)| is(square.offset(df, dr), &[PieceKind::Knight]))
        {
            return true;
        }

        if KING_OFFSETS
            .iter()
            .any(|&(df, dr)| is(square.offset(df, dr), &[PieceKind::King]))
        {
            return true;
        }

        self.slider_attacks(square, by, &ROOK_DIRECTIONS, PieceKind::Rook)
            || self.slider_attacks(square, by, &BISHOP_DIRECTIONS, PieceKind::Bishop)
    }

    fn slider_attacks(
        &self,
        square: Square,
        by: Color,
        directions: &[(i8, i8)],
        kind: PieceKind,
    ) -> bool {
        for &(df, dr) in directions {
            let mut cursor = square.offset(df, dr);
            while let Some(sq) = cursor {
                if let Some(piece) = self.piece_at(sq) {
                    if piece.color == by && (piece.kind == kind || piece.kind == PieceKind::Queen) {
                        return true;
                    }
                    break;
                }
                cursor = sq.offset(df, dr);
            }
        }
        false
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .map_or(false, |king| self.is_square_attacked(king, color.opposite()))
    }

    /// Whether the side to move is in check
    pub fn is_check(&self) -> bool {
        self.is_in_check(self.side_to_move())
    }
}
