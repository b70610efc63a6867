//! Stateless narrowing of profile snapshots.

mod filter;

pub use filter::{ProfileFilter, filter_by_location, filter_by_skill, filter_by_text};
