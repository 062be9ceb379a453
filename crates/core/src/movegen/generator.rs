//! Pseudo-legal generation and the check-safety filter

use super::attacks::{BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS};
use super::moves::{Move, MoveKind};
use crate::board::{CastleSide, Color, Piece, PieceKind, Position, Square};
use crate::error::{Error, Result};

/// All moves obeying piece movement rules, including ones that leave the
/// mover's own king attacked. Castling is only emitted when the king is not
/// in check and does not pass over an attacked square.
pub fn pseudo_legal_moves(position: &Position, moves: &mut Vec<Move>) {
    let us = position.side_to_move();
    for (from, piece) in position.pieces().filter(|(_, p)| p.color == us) {
        match piece.kind {
            PieceKind::Pawn => pawn_moves(position, from, us, moves),
            PieceKind::Knight => step_moves(position, from, us, &KNIGHT_OFFSETS, moves),
            PieceKind::Bishop => slide_moves(position, from, us, &BISHOP_DIRECTIONS, moves),
            PieceKind::Rook => slide_moves(position, from, us, &ROOK_DIRECTIONS, moves),
            PieceKind::Queen => {
                slide_moves(position, from, us, &ROOK_DIRECTIONS, moves);
                slide_moves(position, from, us, &BISHOP_DIRECTIONS, moves);
            }
            PieceKind::King => {
                step_moves(position, from, us, &KING_OFFSETS, moves);
                castle_moves(position, from, us, moves);
            }
        }
    }
}

/// Strictly legal moves, freshly generated for every call
pub fn legal_moves(position: &Position) -> Vec<Move> {
    let mut pseudo = Vec::with_capacity(48);
    pseudo_legal_moves(position, &mut pseudo);

    let us = position.side_to_move();
    let mut scratch = position.clone();
    pseudo.retain(|&mv| {
        let undo = scratch.apply_in_place(mv);
        let safe = !scratch.is_in_check(us);
        scratch.revert(undo);
        safe
    });
    pseudo
}

fn push_pawn_move(from: Square, to: Square, kind: MoveKind, us: Color, moves: &mut Vec<Move>) {
    let last_rank = us.opposite().home_rank();
    if to.rank() == last_rank {
        for promo in PieceKind::PROMOTIONS {
            moves.push(Move::new(from, to, kind).with_promotion(promo));
        }
    } else {
        moves.push(Move::new(from, to, kind));
    }
}

fn pawn_moves(position: &Position, from: Square, us: Color, moves: &mut Vec<Move>) {
    let forward = us.forward();
    let start_rank = (us.home_rank() as i8 + forward) as u8;

    if let Some(one) = from.offset(0, forward) {
        if position.piece_at(one).is_none() {
            push_pawn_move(from, one, MoveKind::Quiet, us, moves);
            if from.rank() == start_rank {
                if let Some(two) = one.offset(0, forward) {
                    if position.piece_at(two).is_none() {
                        moves.push(Move::new(from, two, MoveKind::DoublePush));
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(target) = from.offset(df, forward) else {
            continue;
        };
        match position.piece_at(target) {
            Some(victim) if victim.color != us => {
                push_pawn_move(from, target, MoveKind::Capture, us, moves);
            }
            None if position.en_passant() == Some(target) => {
                moves.push(Move::new(from, target, MoveKind::EnPassant));
            }
            _ => {}
        }
    }
}

fn step_moves(
    position: &Position,
    from: Square,
    us: Color,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(df, dr) in offsets {
        let Some(to) = from.offset(df, dr) else {
            continue;
        };
        match position.piece_at(to) {
            None => moves.push(Move::new(from, to, MoveKind::Quiet)),
            Some(p) if p.color != us => moves.push(Move::new(from, to, MoveKind::Capture)),
            Some(_) => {}
        }
    }
}

fn slide_moves(
    position: &Position,
    from: Square,
    us: Color,
    directions: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(df, dr) in directions {
        let mut cursor = from.offset(df, dr);
        while let Some(to) = cursor {
            match position.piece_at(to) {
                None => moves.push(Move::new(from, to, MoveKind::Quiet)),
                Some(p) => {
                    if p.color != us {
                        moves.push(Move::new(from, to, MoveKind::Capture));
                    }
                    break;
                }
            }
            cursor = to.offset(df, dr);
        }
    }
}

fn castle_moves(position: &Position, from: Square, us: Color, moves: &mut Vec<Move>) {
    let them = us.opposite();
    let king_home = Square::at(4, us.home_rank());
    if from != king_home || position.is_square_attacked(from, them) {
        return;
    }

    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        if !position.castling().has(us, side) {
            continue;
        }
        let rook_from = side.rook_square(us);
        if position.piece_at(rook_from) != Some(Piece::new(us, PieceKind::Rook)) {
            continue;
        }

        // Every square strictly between king and rook must be empty
        let (lo, hi) = if rook_from < from {
            (rook_from.file() + 1, from.file())
        } else {
            (from.file() + 1, rook_from.file())
        };
        let path_clear =
            (lo..hi).all(|file| position.piece_at(Square::at(file, us.home_rank())).is_none());
        if !path_clear {
            continue;
        }

        // The king may not cross or land on an attacked square
        let king_to = side.king_destination(us);
        let crossed = side.rook_destination(us);
        if position.is_square_attacked(crossed, them)
            || position.is_square_attacked(king_to, them)
        {
            continue;
        }

        moves.push(Move::new(from, king_to, MoveKind::Castle(side)));
    }
}

impl Position {
    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(self)
    }

    pub fn has_legal_moves(&self) -> bool {
        let mut pseudo = Vec::with_capacity(48);
        pseudo_legal_moves(self, &mut pseudo);
        let us = self.side_to_move();
        let mut scratch = self.clone();
        pseudo.into_iter().any(|mv| {
            let undo = scratch.apply_in_place(mv);
            let safe = !scratch.is_in_check(us);
            scratch.revert(undo);
            safe
        })
    }

    /// Looks up the legal move matching origin, destination and promotion.
    ///
    /// A pawn reaching the last rank without an explicit promotion piece
    /// promotes to a queen.
    pub fn find_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Move> {
        let promotion_needed = self
            .piece_at(from)
            .map_or(false, |p| p.kind == PieceKind::Pawn && (to.rank() == 0 || to.rank() == 7));
        let wanted = match (promotion, promotion_needed) {
            (None, true) => Some(PieceKind::Queen),
            (p, _) => p,
        };

        self.legal_moves()
            .into_iter()
            .find(|mv| mv.from == from && mv.to == to && mv.promotion == wanted)
            .ok_or_else(|| {
                let promo = wanted.map(|k| k.to_char().to_string()).unwrap_or_default();
                Error::IllegalMove(format!("{}{}{} in {}", from, to, promo, self.serialize()))
            })
    }

    /// Resolves coordinate notation (`e2e4`, `e7e8q`) against the legal moves
    pub fn parse_move(&self, text: &str) -> Result<Move> {
        let text = text.trim();
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(Error::InvalidNotation(format!("bad move '{}'", text)));
        }
        let from: Square = text[0..2].parse()?;
        let to: Square = text[2..4].parse()?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_char(c) {
                Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
                _ => return Err(Error::InvalidNotation(format!("bad promotion in '{}'", text))),
            },
        };
        self.find_move(from, to, promotion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn uci_set(position: &Position) -> Vec<String> {
        let mut v: Vec<String> = position.legal_moves().iter().map(|m| m.to_uci()).collect();
        v.sort();
        v
    }

    #[test]
    fn test_initial_position_has_twenty_moves() {
        let moves = Position::initial().legal_moves();
        assert_eq!(moves.len(), 20);
        assert_eq!(moves.iter().filter(|m| m.kind == MoveKind::DoublePush).count(), 8);
    }

    #[test]
    fn test_pinned_piece_cannot_leave_the_line() {
        // Knight on e2 pinned by the rook on e8
        let pos = Position::parse("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        assert!(pos.legal_moves().iter().all(|m| m.from != sq("e2")));
    }

    #[test]
    fn test_must_answer_check() {
        let pos = Position::parse("4k3/8/8/8/8/8/3P4/r3K3 w - - 0 1").unwrap();
        let moves = uci_set(&pos);
        assert_eq!(moves, vec!["e1e2", "e1f2"]);
    }

    #[test]
    fn test_castling_both_sides() {
        let pos = Position::parse("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let castles: Vec<_> = pos.legal_moves().into_iter().filter(|m| m.is_castle()).collect();
        assert_eq!(castles.len(), 2);
        assert!(castles.iter().any(|m| m.to == Square::G1));
        assert!(castles.iter().any(|m| m.to == Square::C1));
    }

    #[test]
    fn test_no_castling_through_attack_or_out_of_check() {
        // Black rook on f8 covers f1
        let through = Position::parse("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let moves = through.legal_moves();
        assert!(!moves.iter().any(|m| m.kind == MoveKind::Castle(CastleSide::Kingside)));
        assert!(moves.iter().any(|m| m.kind == MoveKind::Castle(CastleSide::Queenside)));

        // In check from the e8 rook
        let checked = Position::parse("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert!(!checked.legal_moves().iter().any(|m| m.is_castle()));
    }

    #[test]
    fn test_queenside_castle_allowed_when_only_b_file_attacked() {
        // b1 is attacked but the king never crosses it
        let pos = Position::parse("1r4k1/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        assert!(pos
            .legal_moves()
            .iter()
            .any(|m| m.kind == MoveKind::Castle(CastleSide::Queenside)));

        // A piece standing on b1 blocks it
        let blocked = Position::parse("6k1/8/8/8/8/8/8/RN2K3 w Q - 0 1").unwrap();
        assert!(!blocked.legal_moves().iter().any(|m| m.is_castle()));
    }

    #[test]
    fn test_no_castling_without_rights() {
        let pos = Position::parse("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        assert!(!pos.legal_moves().iter().any(|m| m.is_castle()));
    }

    #[test]
    fn test_en_passant_generated() {
        let pos = Position::parse("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        let ep: Vec<_> = pos
            .legal_moves()
            .into_iter()
            .filter(|m| m.kind == MoveKind::EnPassant)
            .collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to_uci(), "e5d6");
    }

    #[test]
    fn test_en_passant_discovering_check_is_illegal() {
        // Taking on d6 would open the fifth rank to the rook on a5
        let pos = Position::parse("8/8/8/r2pP2K/8/8/8/4k3 w - d6 0 2").unwrap();
        assert!(!pos.legal_moves().iter().any(|m| m.kind == MoveKind::EnPassant));
    }

    #[test]
    fn test_promotions_expand_to_four_pieces() {
        let pos = Position::parse("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        let promos: Vec<_> = pos.legal_moves().into_iter().filter(|m| m.from == sq("e7")).collect();
        assert_eq!(promos.len(), 4);
        assert!(promos.iter().all(|m| m.promotion.is_some()));
    }

    #[test]
    fn test_find_move_defaults_to_queen() {
        let pos = Position::parse("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        let mv = pos.find_move(sq("e7"), Square::E8, None).unwrap();
        assert_eq!(mv.promotion, Some(PieceKind::Queen));
        let rook = pos.find_move(sq("e7"), Square::E8, Some(PieceKind::Rook)).unwrap();
        assert_eq!(rook.promotion, Some(PieceKind::Rook));
    }

    #[test]
    fn test_parse_move_errors() {
        let pos = Position::initial();
        assert_eq!(pos.parse_move("e2e4").unwrap().kind, MoveKind::DoublePush);
        assert!(matches!(pos.parse_move("e2e5"), Err(Error::IllegalMove(_))));
        assert!(matches!(pos.parse_move("e7e5"), Err(Error::IllegalMove(_))));
        assert!(matches!(pos.parse_move("e2"), Err(Error::InvalidNotation(_))));
        assert!(matches!(pos.parse_move("z2e4"), Err(Error::InvalidNotation(_))));
        assert!(matches!(pos.parse_move("e2e4k"), Err(Error::InvalidNotation(_))));
    }

    #[test]
    fn test_has_legal_moves_matches_generation() {
        let stalemate = Position::parse("8/8/8/8/8/kq6/8/K7 w - - 0 1").unwrap();
        assert!(!stalemate.has_legal_moves());
        assert!(stalemate.legal_moves().is_empty());
        assert!(Position::initial().has_legal_moves());
    }
}
