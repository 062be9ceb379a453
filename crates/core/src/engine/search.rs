//! Fixed-depth minimax search with alpha-beta pruning
//!
//! The search explores a single private copy of the root position using
//! apply/revert backtracking. Moves are tried in generation order and a move
//! only replaces the current best when it scores strictly better, so the
//! result is deterministic for a given position and depth.

use tracing::debug;

use super::analysis::SearchResult;
use super::evaluator::{Evaluator, MaterialEvaluator};
use crate::board::{Color, Position};
use crate::movegen::{legal_moves, Move};
use crate::rules::is_insufficient_material;

/// Root window bound; every evaluator score lies strictly inside it
pub const SCORE_BOUND: i32 = 10_000;

pub struct SearchEngine<E = MaterialEvaluator> {
    evaluator: E,
}

impl SearchEngine<MaterialEvaluator> {
    pub fn new() -> Self {
        Self {
            evaluator: MaterialEvaluator::new(),
        }
    }
}

impl Default for SearchEngine<MaterialEvaluator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Evaluator> SearchEngine<E> {
    pub fn with_evaluator(evaluator: E) -> Self {
        Self { evaluator }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Searches `depth` plies and returns the best move for the side to move.
    ///
    /// Scores are always computed from `maximizing`'s point of view: layers
    /// where `maximizing` is to move take the highest child score, the others
    /// the lowest. When the root has no legal moves the result carries no
    /// move and the static score of the root.
    pub fn best_move(&self, position: &Position, depth: u8, maximizing: Color) -> SearchResult {
        let mut searcher = Searcher {
            evaluator: &self.evaluator,
            perspective: maximizing,
            nodes: 0,
        };
        let mut scratch = position.clone();
        let root_maximizing = position.side_to_move() == maximizing;
        let (best_move, score) =
            searcher.alpha_beta(&mut scratch, depth, -SCORE_BOUND, SCORE_BOUND, root_maximizing);

        let result = SearchResult {
            best_move,
            score,
            depth,
            nodes: searcher.nodes,
        };
        debug!(
            best = %result,
            depth,
            nodes = result.nodes,
            "search finished"
        );
        result
    }
}

struct Searcher<'a, E> {
    evaluator: &'a E,
    perspective: Color,
    nodes: u64,
}

impl<E: Evaluator> Searcher<'_, E> {
    fn alpha_beta(
        &mut self,
        position: &mut Position,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (Option<Move>, i32) {
        self.nodes += 1;

        if depth == 0 {
            return (None, self.evaluator.score(position, self.perspective));
        }
        let moves = legal_moves(position);
        if moves.is_empty() || is_insufficient_material(position) {
            return (None, self.evaluator.score(position, self.perspective));
        }

        let mut best_move = None;
        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };

        for mv in moves {
            let undo = position.apply_in_place(mv);
            let (_, score) = self.alpha_beta(position, depth - 1, alpha, beta, !maximizing);
            position.revert(undo);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(score);
            }
            if alpha >= beta {
                break;
            }
        }

        (best_move, best_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluator::MATE_SCORE;

    /// Unpruned reference search
    fn minimax(position: &Position, depth: u8, maximizing: bool, perspective: Color) -> i32 {
        let eval = MaterialEvaluator::new();
        let moves = position.legal_moves();
        if depth == 0 || moves.is_empty() || is_insufficient_material(position) {
            return eval.score(position, perspective);
        }
        let scores = moves.iter().map(|mv| {
            let next = position.apply(mv).unwrap();
            minimax(&next, depth - 1, !maximizing, perspective)
        });
        if maximizing {
            scores.max().unwrap()
        } else {
            scores.min().unwrap()
        }
    }

    #[test]
    fn test_only_move_captures_queen() {
        // The king must take the unprotected queen on g2
        let pos = Position::parse("k7/p7/8/8/8/8/6q1/1R5K w - - 0 1").unwrap();
        assert_eq!(pos.legal_moves().len(), 1);

        let result = SearchEngine::new().best_move(&pos, 1, Color::White);
        assert_eq!(result.best_move.unwrap().to_uci(), "h1g2");
        assert_eq!(result.score, 4);
    }

    #[test]
    fn test_depth_one_grabs_free_queen() {
        let pos = Position::parse("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").unwrap();
        let result = SearchEngine::new().best_move(&pos, 1, Color::White);
        assert_eq!(result.best_move.unwrap().to_uci(), "d2d5");
        assert_eq!(result.score, 5);
    }

    #[test]
    fn test_depth_two_avoids_defended_pawn() {
        let pos = Position::parse("4k3/8/4p3/3p4/8/8/8/3QK3 w - - 0 1").unwrap();
        let engine = SearchEngine::new();

        let greedy = engine.best_move(&pos, 1, Color::White);
        assert_eq!(greedy.best_move.unwrap().to_uci(), "d1d5");

        let careful = engine.best_move(&pos, 2, Color::White);
        assert_ne!(careful.best_move.unwrap().to_uci(), "d1d5");
        assert_eq!(careful.score, 7);
    }

    #[test]
    fn test_finds_mate_in_one() {
        let pos = Position::parse(
            "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
        )
        .unwrap();
        let result = SearchEngine::new().best_move(&pos, 2, Color::White);
        assert_eq!(result.best_move.unwrap().to_uci(), "h5f7");
        assert_eq!(result.score, MATE_SCORE);
        assert!(result.is_mate_score());
    }

    #[test]
    fn test_black_engine_minimizes_white_and_maximizes_itself() {
        // Black to move can take the hanging rook on d1
        let pos = Position::parse("3rk3/8/8/8/8/8/8/3RK3 b - - 0 1").unwrap();
        let result = SearchEngine::new().best_move(&pos, 1, Color::Black);
        assert_eq!(result.best_move.unwrap().to_uci(), "d8d1");
        assert_eq!(result.score, 5);
    }

    #[test]
    fn test_no_moves_returns_static_score() {
        let mated =
            Position::parse("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        let result = SearchEngine::new().best_move(&mated, 2, Color::White);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -MATE_SCORE);
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn test_ties_keep_first_generated_move() {
        let pos = Position::initial();
        let result = SearchEngine::new().best_move(&pos, 1, Color::White);
        assert_eq!(result.score, 0);
        assert_eq!(result.best_move, Some(pos.legal_moves()[0]));
    }

    #[test]
    fn test_alpha_beta_matches_minimax() {
        let positions = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "r1bq1rk1/ppp2ppp/2np1n2/2b1p3/2B1P3/2NP1N2/PPP2PPP/R1BQ1RK1 b - - 0 7",
        ];
        let engine = SearchEngine::new();
        for fen in positions {
            let pos = Position::parse(fen).unwrap();
            let me = pos.side_to_move();
            let result = engine.best_move(&pos, 2, me);
            let expected = minimax(&pos, 2, true, me);
            assert_eq!(result.score, expected, "{}", fen);

            // The chosen move must itself achieve the optimal value
            let after = pos.apply(&result.best_move.unwrap()).unwrap();
            assert_eq!(minimax(&after, 1, false, me), expected, "{}", fen);
        }
    }

    #[test]
    fn test_search_leaves_root_untouched() {
        let pos = Position::parse(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        let before = pos.clone();
        SearchEngine::new().best_move(&pos, 2, Color::White);
        assert_eq!(pos, before);
        assert_eq!(pos.serialize(), before.serialize());
    }
}
