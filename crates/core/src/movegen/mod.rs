//! Move generation
//!
//! Generates strictly legal moves for a [`Position`] and applies or reverts
//! them. Legality is decided by generating pseudo-legal moves and discarding
//! any that leave the mover's king attacked.

mod attacks;
mod generator;
mod make;
pub mod moves;

pub use generator::{legal_moves, pseudo_legal_moves};
pub use moves::{Move, MoveKind, Undo};

use crate::board::Position;

/// Counts leaf nodes of the legal move tree to `depth` plies
pub fn perft(position: &Position, depth: u32) -> u64 {
    let mut scratch = position.clone();
    perft_inner(&mut scratch, depth)
}

fn perft_inner(position: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in moves {
        let undo = position.apply_in_place(mv);
        nodes += perft_inner(position, depth - 1);
        position.revert(undo);
    }
    nodes
}
