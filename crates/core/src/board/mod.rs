//! Board representation and FEN serialization

mod fen;
mod position;
mod types;

pub use fen::STARTING_FEN;
pub use position::{CastleSide, CastlingRights, Position, RepetitionKey};
pub use types::{Color, Piece, PieceKind, Square};
