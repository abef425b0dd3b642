pub mod aggregate;
pub mod evaluator;
pub mod logic;
pub mod merge;
pub mod pattern;
