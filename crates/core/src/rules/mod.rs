//! Game termination rules

mod outcome;
mod terminal;

pub use outcome::Outcome;
pub use terminal::{classify, classify_with, is_insufficient_material, repetition_count, DrawRules};
