//! FEN serialization for positions

use std::fmt;
use std::str::FromStr;

use super::position::{CastleSide, CastlingRights, Position};
use super::types::{Color, Piece, PieceKind, Square};
use crate::error::{Error, Result};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn malformed(msg: impl Into<String>) -> Error {
    Error::MalformedPosition(msg.into())
}

impl Position {
    /// Parses a six-field FEN string.
    ///
    /// Beyond syntax this enforces the structural invariants the rest of the
    /// crate relies on: one king per side, no pawns on the back ranks, castling
    /// rights backed by an unmoved king and rook, a plausible en-passant target,
    /// and the side that just moved not being left in check.
    pub fn parse(text: &str) -> Result<Position> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(malformed(format!(
                "expected 6 fields, found {}",
                fields.len()
            )));
        }

        let mut position = Position::empty();
        parse_placement(fields[0], &mut position)?;

        position.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(malformed(format!("bad side to move '{}'", other))),
        };

        position.castling = parse_castling(fields[2])?;
        position.en_passant = parse_en_passant(fields[3], position.side_to_move)?;

        position.halfmove_clock = fields[4]
            .parse()
            .map_err(|_| malformed(format!("bad halfmove clock '{}'", fields[4])))?;
        position.fullmove_number = fields[5]
            .parse()
            .map_err(|_| malformed(format!("bad fullmove number '{}'", fields[5])))?;
        if position.fullmove_number == 0 {
            return Err(malformed("fullmove number must start at 1"));
        }

        validate(&position)?;
        Ok(position)
    }

    /// Serializes to FEN; the inverse of [`Position::parse`]
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(90);

        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(Square::at(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        if self.castling.is_empty() {
            out.push('-');
        } else {
            for (flag, c) in [
                (self.castling.white_kingside, 'K'),
                (self.castling.white_queenside, 'Q'),
                (self.castling.black_kingside, 'k'),
                (self.castling.black_queenside, 'q'),
            ] {
                if flag {
                    out.push(c);
                }
            }
        }

        out.push(' ');
        match self.en_passant {
            Some(sq) => out.push_str(&sq.to_string()),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }
}

fn parse_placement(field: &str, position: &mut Position) -> Result<()> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(malformed(format!("expected 8 ranks, found {}", ranks.len())));
    }

    for (i, row) in ranks.iter().enumerate() {
        let rank = 7 - i as u8;
        let mut file = 0u8;
        for c in row.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(malformed(format!("bad empty-square count '{}'", c)));
                }
                file += skip as u8;
            } else {
                let piece = Piece::from_fen_char(c)
                    .ok_or_else(|| malformed(format!("illegal piece letter '{}'", c)))?;
                let square = Square::new(file, rank)
                    .ok_or_else(|| malformed(format!("rank {} overflows", rank + 1)))?;
                position.put(square, piece);
                file += 1;
            }
            if file > 8 {
                return Err(malformed(format!("rank {} overflows", rank + 1)));
            }
        }
        if file != 8 {
            return Err(malformed(format!("rank {} has {} squares", rank + 1, file)));
        }
    }
    Ok(())
}

fn parse_castling(field: &str) -> Result<CastlingRights> {
    let mut rights = CastlingRights::NONE;
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        let (color, side) = match c {
            'K' => (Color::White, CastleSide::Kingside),
            'Q' => (Color::White, CastleSide::Queenside),
            'k' => (Color::Black, CastleSide::Kingside),
            'q' => (Color::Black, CastleSide::Queenside),
            other => return Err(malformed(format!("bad castling flag '{}'", other))),
        };
        if rights.has(color, side) {
            return Err(malformed(format!("duplicate castling flag '{}'", c)));
        }
        rights.set(color, side, true);
    }
    Ok(rights)
}

fn parse_en_passant(field: &str, side_to_move: Color) -> Result<Option<Square>> {
    if field == "-" {
        return Ok(None);
    }
    let square: Square = field
        .parse()
        .map_err(|_| malformed(format!("bad en-passant square '{}'", field)))?;
    // Target sits behind a pawn the opponent just pushed two squares
    let expected_rank = match side_to_move {
        Color::White => 5,
        Color::Black => 2,
    };
    if square.rank() != expected_rank {
        return Err(malformed(format!(
            "en-passant square {} impossible with {} to move",
            square,
            side_to_move.name()
        )));
    }
    Ok(Some(square))
}

fn validate(position: &Position) -> Result<()> {
    for color in Color::ALL {
        let kings = position
            .pieces()
            .filter(|(_, p)| p.color == color && p.kind == PieceKind::King)
            .count();
        if kings != 1 {
            return Err(malformed(format!(
                "{} has {} kings",
                color.name(),
                kings
            )));
        }

        for side in [CastleSide::Kingside, CastleSide::Queenside] {
            if !position.castling.has(color, side) {
                continue;
            }
            let king_home = position.piece_at(Square::at(4, color.home_rank()))
                == Some(Piece::new(color, PieceKind::King));
            let rook_home = position.piece_at(side.rook_square(color))
                == Some(Piece::new(color, PieceKind::Rook));
            if !king_home || !rook_home {
                return Err(malformed(format!(
                    "{} {:?} castling without king and rook at home",
                    color.name(),
                    side
                )));
            }
        }
    }

    if position
        .pieces()
        .any(|(sq, p)| p.kind == PieceKind::Pawn && (sq.rank() == 0 || sq.rank() == 7))
    {
        return Err(malformed("pawn on first or last rank"));
    }

    if let Some(target) = position.en_passant {
        let them = position.side_to_move.opposite();
        let pushed = target.offset(0, them.forward());
        let origin = target.offset(0, -them.forward());
        let pawn_there = pushed
            .and_then(|sq| position.piece_at(sq))
            .map_or(false, |p| p == Piece::new(them, PieceKind::Pawn));
        let origin_empty = origin.map_or(false, |sq| position.piece_at(sq).is_none());
        if !pawn_there || !origin_empty || position.piece_at(target).is_some() {
            return Err(malformed(format!(
                "en-passant square {} has no double-pushed pawn",
                target
            )));
        }
    }

    let waiting = position.side_to_move.opposite();
    if position.is_in_check(waiting) {
        return Err(malformed(format!(
            "{} is in check but not to move",
            waiting.name()
        )));
    }

    Ok(())
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Position::parse(s)
    }
}
