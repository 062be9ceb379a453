//! Move generator checks against published perft counts and against shakmaty

use std::collections::BTreeSet;

use chess_engine_core::{perft, Position, STARTING_FEN};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position as _};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

fn check_perft(fen: &str, expected: &[u64]) {
    let position = Position::parse(fen).unwrap();
    for (depth, &nodes) in expected.iter().enumerate() {
        let depth = depth as u32 + 1;
        assert_eq!(perft(&position, depth), nodes, "{} depth {}", fen, depth);
    }
}

fn reference_moves(fen: &str) -> BTreeSet<String> {
    let setup: Fen = fen.parse().unwrap();
    let chess: Chess = setup.into_position(CastlingMode::Standard).unwrap();
    chess
        .legal_moves()
        .iter()
        .map(|m| m.to_uci(CastlingMode::Standard).to_string())
        .collect()
}

fn our_moves(position: &Position) -> BTreeSet<String> {
    position.legal_moves().iter().map(|m| m.to_uci()).collect()
}

#[test]
fn test_perft_starting_position() {
    check_perft(STARTING_FEN, &[20, 400, 8902]);
}

#[test]
fn test_perft_kiwipete() {
    check_perft(KIWIPETE, &[48, 2039]);
}

#[test]
fn test_perft_endgame_with_en_passant_pins() {
    check_perft(POSITION_3, &[14, 191, 2812]);
}

#[test]
fn test_perft_promotions_and_castling() {
    check_perft(POSITION_4, &[6, 264, 9467]);
    check_perft(POSITION_5, &[44, 1486]);
}

#[test]
fn test_legal_moves_match_shakmaty() {
    for fen in [STARTING_FEN, KIWIPETE, POSITION_3, POSITION_4, POSITION_5] {
        let position = Position::parse(fen).unwrap();
        assert_eq!(our_moves(&position), reference_moves(fen), "{}", fen);
    }
}

#[test]
fn test_random_games_match_shakmaty() {
    for seed in 0..8u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let start = if seed % 2 == 0 { STARTING_FEN } else { KIWIPETE };
        let mut position = Position::parse(start).unwrap();

        for _ in 0..80 {
            let fen = position.serialize();
            assert_eq!(our_moves(&position), reference_moves(&fen), "seed {} at {}", seed, fen);

            let moves = position.legal_moves();
            let Some(&mv) = moves.choose(&mut rng) else {
                break;
            };

            // Reverting must restore every field, counters included
            let before = position.clone();
            let undo = position.apply_in_place(mv);
            let after = position.serialize();
            position.revert(undo);
            assert_eq!(position.serialize(), fen, "seed {} revert {}", seed, mv);
            assert_eq!(position, before);

            position = position.apply(&mv).unwrap();
            assert_eq!(position.serialize(), after);
        }
    }
}
