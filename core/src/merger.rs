//! Aggregated result of one scan.

use crate::types::{Chunk, MatchResult, Revision};
use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Mergers with this many results or more are not worth caching.
pub const MERGER_CACHE_MAX: usize = 100_000;

#[derive(Debug)]
enum Source {
    Empty,
    /// Every item of every chunk, unscored.
    PassThrough {
        chunks: Vec<Arc<Chunk>>,
        offsets: Vec<usize>,
    },
    /// Per-partition lists in partition order.
    Unsorted {
        lists: Vec<Vec<MatchResult>>,
        offsets: Vec<usize>,
    },
    /// Per-partition lists, each already in relevance order.
    Sorted {
        lists: Vec<Vec<MatchResult>>,
        merged: OnceLock<Vec<MatchResult>>,
    },
}

/// Ranked view over the results of one scan.
///
/// Published as `Arc<Merger>` and shared read-only afterwards. Sorted
/// results are k-way merged on first access; the other layouts are indexed
/// in place.
#[derive(Debug)]
pub struct Merger {
    query: String,
    source: Source,
    count: usize,
    tac: bool,
    is_final: AtomicBool,
    revision: Revision,
    min_index: usize,
    max_index: usize,
}

/// Create operations.
impl Merger {
    /// Result of scanning an empty collection.
    pub fn empty(revision: Revision) -> Self {
        Self {
            query: String::new(),
            source: Source::Empty,
            count: 0,
            tac: false,
            is_final: AtomicBool::new(false),
            revision,
            min_index: 0,
            max_index: 0,
        }
    }

    /// Result of an empty query: every item matches, in input order.
    pub fn pass_through(chunks: Vec<Arc<Chunk>>, tac: bool, revision: Revision) -> Self {
        let offsets = offsets(chunks.iter().map(|chunk| chunk.len()));
        let count = chunks.iter().map(|chunk| chunk.len()).sum();
        let min_index = chunks.first().and_then(|c| c.first_index()).unwrap_or(0);
        let max_index = chunks
            .last()
            .and_then(|c| c.last_index())
            .unwrap_or(min_index);

        Self {
            query: String::new(),
            source: Source::PassThrough { chunks, offsets },
            count,
            tac,
            is_final: AtomicBool::new(false),
            revision,
            min_index,
            max_index,
        }
    }

    /// Result of a completed scan.
    ///
    /// `lists` must be in partition order. When `sorted` is set each list
    /// must already be in relevance order for the given `tac` mode.
    pub fn new(
        query: &str,
        lists: Vec<Vec<MatchResult>>,
        sorted: bool,
        tac: bool,
        revision: Revision,
        min_index: usize,
        max_index: usize,
    ) -> Self {
        let count = lists.iter().map(Vec::len).sum();
        let source = if sorted {
            Source::Sorted {
                lists,
                merged: OnceLock::new(),
            }
        } else {
            let offsets = offsets(lists.iter().map(Vec::len));
            Source::Unsorted { lists, offsets }
        };

        Self {
            query: query.to_owned(),
            source,
            count,
            tac,
            is_final: AtomicBool::new(false),
            revision,
            min_index,
            max_index,
        }
    }
}

/// Accessors.
impl Merger {
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the result at rank `idx`.
    pub fn get(&self, idx: usize) -> Option<MatchResult> {
        if idx >= self.count {
            return None;
        }
        match &self.source {
            Source::Empty => None,
            Source::PassThrough { chunks, offsets } => {
                let (chunk, offset) = locate(offsets, self.input_position(idx));
                let item = chunks[chunk].items()[offset].clone();
                Some(MatchResult::new(item, 0))
            }
            Source::Unsorted { lists, offsets } => {
                let (list, offset) = locate(offsets, self.input_position(idx));
                Some(lists[list][offset].clone())
            }
            Source::Sorted { lists, merged } => merged
                .get_or_init(|| merge_sorted(lists, self.tac))
                .get(idx)
                .cloned(),
        }
    }

    /// Iterates over all results in rank order.
    pub fn iter(&self) -> impl Iterator<Item = MatchResult> + '_ {
        (0..self.count).filter_map(|idx| self.get(idx))
    }

    /// Only mergers of completed, non-trivial scans are worth caching.
    pub fn cacheable(&self) -> bool {
        matches!(
            self.source,
            Source::Sorted { .. } | Source::Unsorted { .. }
        ) && self.count < MERGER_CACHE_MAX
    }

    pub fn is_sorted(&self) -> bool {
        matches!(self.source, Source::Sorted { .. })
    }

    pub fn is_final(&self) -> bool {
        self.is_final.load(Ordering::Relaxed)
    }

    pub fn set_final(&self, is_final: bool) {
        self.is_final.store(is_final, Ordering::Relaxed);
    }

    /// Query string the scan ran with; empty for pass-through results.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn min_index(&self) -> usize {
        self.min_index
    }

    pub fn max_index(&self) -> usize {
        self.max_index
    }

    fn input_position(&self, idx: usize) -> usize {
        if self.tac { self.count - idx - 1 } else { idx }
    }
}

fn offsets(lens: impl Iterator<Item = usize>) -> Vec<usize> {
    lens.scan(0, |start, len| {
        let current = *start;
        *start += len;
        Some(current)
    })
    .collect()
}

/// Maps a flat position to `(list, offset)` given each list's start offset.
fn locate(offsets: &[usize], position: usize) -> (usize, usize) {
    // The last list starting at or before `position` is the non-empty one
    // holding it; empty lists share their start with the next list.
    let list = offsets.partition_point(|&start| start <= position) - 1;
    (list, position - offsets[list])
}

fn merge_sorted(lists: &[Vec<MatchResult>], tac: bool) -> Vec<MatchResult> {
    let total = lists.iter().map(Vec::len).sum();
    let mut cursors = vec![0; lists.len()];
    let mut merged = Vec::with_capacity(total);

    while merged.len() < total {
        let mut best: Option<usize> = None;
        for (list, items) in lists.iter().enumerate() {
            let Some(candidate) = items.get(cursors[list]) else {
                continue;
            };
            best = match best {
                Some(current)
                    if lists[current][cursors[current]].cmp_relevance(candidate, tac)
                        != CmpOrdering::Greater =>
                {
                    Some(current)
                }
                _ => Some(list),
            };
        }
        let Some(list) = best else {
            break;
        };
        merged.push(lists[list][cursors[list]].clone());
        cursors[list] += 1;
    }

    merged
}

#[cfg(test)]
mod tests;
