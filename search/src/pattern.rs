//! Compiled queries.

use crate::config::{case_matching, normalization};
use crate::slab::Slab;
use nucleo::pattern::{CaseMatching, Normalization, Pattern as NucleoPattern};
use parking_lot::Mutex;
use sift_core::{Chunk, ChunkCache, MatchResult, MatchingConfig};
use std::collections::HashMap;
use std::sync::Arc;

/// A compiled query the matcher can score chunks with.
pub trait Pattern: Send + Sync {
    /// An empty pattern matches everything without scoring.
    fn is_empty(&self) -> bool;

    /// Stable key of the compiled query, used for result caching.
    fn as_str(&self) -> &str;

    /// Whether ranking by score is meaningful for this query.
    fn sortable(&self) -> bool;

    /// Returns the matching items of `chunk`, in chunk order.
    fn match_chunk(&self, chunk: &Chunk, slab: &mut Slab) -> Vec<MatchResult>;
}

/// Compiles query text into a [`Pattern`].
pub trait PatternBuilder: Send + Sync {
    fn build(&self, query: &str) -> Arc<dyn Pattern>;

    /// Forgets memoised patterns. Called when the item collection is
    /// replaced by an incompatible revision.
    fn clear(&self) {}
}

impl<F> PatternBuilder for F
where
    F: Fn(&str) -> Arc<dyn Pattern> + Send + Sync,
{
    fn build(&self, query: &str) -> Arc<dyn Pattern> {
        self(query)
    }
}

/// Fuzzy pattern backed by nucleo.
pub struct FuzzyPattern {
    query: String,
    pattern: NucleoPattern,
    sortable: bool,
    chunk_cache: Option<Arc<ChunkCache>>,
}

impl FuzzyPattern {
    pub fn new(
        query: &str,
        case_matching: CaseMatching,
        normalization: Normalization,
        chunk_cache: Option<Arc<ChunkCache>>,
    ) -> Self {
        let pattern = NucleoPattern::parse(query, case_matching, normalization);
        // Scores of a purely negated query carry no ranking information.
        let sortable = pattern.atoms.iter().any(|atom| !atom.negative);

        Self {
            query: query.to_owned(),
            pattern,
            sortable,
            chunk_cache,
        }
    }
}

impl Pattern for FuzzyPattern {
    fn is_empty(&self) -> bool {
        self.pattern.atoms.is_empty()
    }

    fn as_str(&self) -> &str {
        &self.query
    }

    fn sortable(&self) -> bool {
        self.sortable
    }

    fn match_chunk(&self, chunk: &Chunk, slab: &mut Slab) -> Vec<MatchResult> {
        if let Some(cached) = self
            .chunk_cache
            .as_ref()
            .and_then(|cache| cache.lookup(chunk, &self.query))
        {
            return cached;
        }

        let matches: Vec<MatchResult> = chunk
            .items()
            .iter()
            .filter_map(|item| {
                slab.score(&self.pattern, item.text())
                    .map(|score| MatchResult::new(item.clone(), score))
            })
            .collect();

        if let Some(cache) = &self.chunk_cache {
            cache.add(chunk, &self.query, &matches);
        }
        matches
    }
}

/// Builds [`FuzzyPattern`]s and memoises them by query text.
///
/// Typing back and forth over the same prefix hands out the same compiled
/// pattern instead of re-parsing it.
pub struct FuzzyPatternBuilder {
    case_matching: sift_core::CaseMatching,
    unicode_normalization: bool,
    chunk_cache: Arc<ChunkCache>,
    compiled: Mutex<HashMap<String, Arc<FuzzyPattern>>>,
}

impl FuzzyPatternBuilder {
    pub fn new(config: &MatchingConfig, chunk_cache: Arc<ChunkCache>) -> Self {
        Self {
            case_matching: config.case_matching,
            unicode_normalization: config.unicode_normalization,
            chunk_cache,
            compiled: Mutex::new(HashMap::new()),
        }
    }
}

impl PatternBuilder for FuzzyPatternBuilder {
    fn build(&self, query: &str) -> Arc<dyn Pattern> {
        let mut compiled = self.compiled.lock();
        if let Some(pattern) = compiled.get(query) {
            return Arc::clone(pattern) as Arc<dyn Pattern>;
        }

        let pattern = Arc::new(FuzzyPattern::new(
            query,
            case_matching(self.case_matching),
            normalization(self.unicode_normalization),
            Some(Arc::clone(&self.chunk_cache)),
        ));
        compiled.insert(query.to_owned(), Arc::clone(&pattern));
        pattern
    }

    fn clear(&self) {
        self.compiled.lock().clear();
    }
}
