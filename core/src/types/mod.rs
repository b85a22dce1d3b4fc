pub(crate) mod config;
pub use config::{
    CaseMatching, EngineConfig, MatcherConfig, MatchingConfig, MaxPartitions, PartitionMultiplier,
};

pub(crate) mod item;
pub use item::{CHUNK_SIZE, Chunk, Item, count_items};

pub(crate) mod result;
pub use result::MatchResult;

pub(crate) mod revision;
pub use revision::Revision;

#[cfg(test)]
mod tests;
