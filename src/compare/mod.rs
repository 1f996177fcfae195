//! Merge-compare of two path-ordered entry streams.
//!
//! Both streams are consumed in lockstep. Paths present on one side only are
//! reported as such, and paths present on both sides have their extended
//! attributes diffed.

mod differ;
mod engine;
mod finding;
mod progress;

pub use engine::{AbortPolicy, CompareError, ComparisonSummary, MergeCompare};
pub use finding::Finding;
pub use progress::Progress;
