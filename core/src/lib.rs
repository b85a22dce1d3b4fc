//! Core data model for the sift matching engine.
//!
//! Items live in append-only [`ChunkList`]s and are handed to the matcher as
//! shared [`Chunk`] snapshots. Completed scans are wrapped in a [`Merger`],
//! and every cross-thread signal goes through a coalescing [`EventBox`].

mod chunk_cache;
mod chunk_list;
mod error;
mod event;
mod merger;
pub mod types;

pub use chunk_cache::{ChunkCache, QUERY_CACHE_MAX};
pub use chunk_list::ChunkList;
pub use error::{ConfigError, Error, Result};
pub use event::{Event, EventBox, EventKind, Events, Signal};
pub use merger::{MERGER_CACHE_MAX, Merger};
pub use types::{
    CHUNK_SIZE, CaseMatching, Chunk, EngineConfig, Item, MatchResult, MatcherConfig,
    MatchingConfig, MaxPartitions, PartitionMultiplier, Revision, count_items,
};
