//! Assignment model and the events a verification run emits.

pub mod assignment;
pub mod events;

#[cfg(test)]
mod tests;

pub use assignment::{Assignment, AssignmentVerification, ComparisonResult, Topic};
pub use events::{AssignmentCompared, AssignmentStored, AssignmentVerified, SentenceCompared};
