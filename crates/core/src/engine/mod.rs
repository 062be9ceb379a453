//! Move selection
//!
//! Static evaluation plus a fixed-depth alpha-beta search over the rules core.

pub mod analysis;
pub mod evaluator;
pub mod search;

// Re-export main types for convenience
pub use analysis::SearchResult;
pub use evaluator::{Evaluator, MaterialEvaluator, MATE_SCORE};
pub use search::{SearchEngine, SCORE_BOUND};
