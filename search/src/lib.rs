//! Sift concurrent fuzzy matcher.
//!
//! # Design
//!
//! - One loop thread serializes search requests; a newer request never
//!   queues behind an older one, it replaces it.
//! - Each scan splits the chunk snapshot into contiguous partitions and
//!   scores them on scoped worker threads, one reusable [`Slab`] per
//!   partition.
//! - Completed results are cached per query string until the item count,
//!   sort mode or revision changes.
//!
//! # API
//!
//! - [`Matcher::run`]: Drives the request loop (blocks the calling thread)
//! - [`MatcherHandle::reset`]: Submits a query, optionally aborting the current scan
//! - [`MatcherHandle::stop`]: Ends the loop
//! - Results arrive as [`sift_core::Event`]s on the caller's event box

mod config;
mod engine;
mod pattern;
mod slab;

pub use engine::{Matcher, MatcherHandle};
pub use pattern::{FuzzyPattern, FuzzyPatternBuilder, Pattern, PatternBuilder};
pub use slab::Slab;
