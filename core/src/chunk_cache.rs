use crate::types::{CHUNK_SIZE, Chunk, MatchResult};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

/// Longest match list worth remembering for one chunk and query.
pub const QUERY_CACHE_MAX: usize = CHUNK_SIZE / 5;

/// Per-chunk memo of `query -> matches`.
///
/// Only full chunks are cached since partial chunks still grow. Entries are
/// keyed by the chunk's first item index, which stays stable across
/// compatible revisions.
#[derive(Debug, Default)]
pub struct ChunkCache {
    entries: Mutex<HashMap<usize, HashMap<String, Vec<MatchResult>>>>,
}

impl ChunkCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, chunk: &Chunk, query: &str, matches: &[MatchResult]) {
        if !chunk.is_full() || matches.len() > QUERY_CACHE_MAX {
            return;
        }
        let Some(key) = chunk.first_index() else {
            return;
        };
        self.entries
            .lock()
            .entry(key)
            .or_default()
            .insert(query.to_owned(), matches.to_vec());
    }

    pub fn lookup(&self, chunk: &Chunk, query: &str) -> Option<Vec<MatchResult>> {
        if !chunk.is_full() {
            return None;
        }
        let key = chunk.first_index()?;
        self.entries.lock().get(&key)?.get(query).cloned()
    }

    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        debug!(chunks = entries.len(), "clearing chunk cache");
        entries.clear();
    }

    /// Number of chunks with at least one cached query.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
