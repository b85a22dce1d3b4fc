//! One scan: partition, fan out, collect.

use super::Matcher;
use super::partition::partition;
use super::request::{MatchRequest, RequestKind};
use crate::pattern::Pattern;
use crate::slab::Slab;
use crossbeam_channel::{self as channel, Sender};
use sift_core::{Chunk, Event, MatchResult, Merger};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;
use tracing::{debug, trace};

pub(crate) enum ScanOutcome {
    Completed(Merger),
    /// A reset request arrived mid-scan. Nothing is published.
    Cancelled,
}

struct PartialResult {
    index: usize,
    matches: Vec<MatchResult>,
}

/// Scores one partition's slice of chunks.
struct ScanWorker<'a> {
    index: usize,
    chunks: &'a [Arc<Chunk>],
    pattern: &'a dyn Pattern,
    sorted: bool,
    tac: bool,
    cancelled: &'a AtomicBool,
    progress: Sender<usize>,
    results: Sender<PartialResult>,
}

impl ScanWorker<'_> {
    fn run(self, slab: &mut Slab) {
        let mut matches = Vec::new();
        for chunk in self.chunks {
            let found = self.pattern.match_chunk(chunk, slab);
            let found_count = found.len();
            matches.extend(found);

            if self.cancelled.load(Ordering::Relaxed) {
                return;
            }
            if self.progress.send(found_count).is_err() {
                return;
            }
        }

        if self.sorted {
            matches.sort_unstable_by(|a, b| a.cmp_relevance(b, self.tac));
        }
        if self.results.send(PartialResult { index: self.index, matches }).is_err() {
            trace!(partition = self.index, "scan result dropped");
        }
    }
}

impl Matcher {
    pub(super) fn scan(&mut self, request: &MatchRequest) -> ScanOutcome {
        let started_at = Instant::now();

        let total = request.chunks.len();
        if total == 0 {
            return ScanOutcome::Completed(Merger::empty(request.revision));
        }
        let pattern = request.pattern.as_ref();
        if pattern.is_empty() {
            return ScanOutcome::Completed(Merger::pass_through(
                request.chunks.clone(),
                self.tac,
                request.revision,
            ));
        }

        let min_index = request.chunks[0].first_index().unwrap_or(0);
        let max_index = request.chunks[total - 1]
            .last_index()
            .unwrap_or(min_index);
        let sorted = request.sort && pattern.sortable();
        let tac = self.tac;
        let progress_min_duration = self.progress_min_duration;

        let ranges = partition(total, self.partitions);
        let num_slices = ranges.len();
        let cancelled = AtomicBool::new(false);
        let (progress_tx, progress_rx) = channel::bounded(total);
        let (result_tx, result_rx) = channel::bounded(num_slices);

        let requests = &self.requests;
        let events = &self.events;
        let slabs = self
            .slabs
            .iter_mut()
            .map(|slot| slot.get_or_insert_with(Slab::new));

        debug!(
            query = pattern.as_str(),
            chunks = total,
            partitions = num_slices,
            "scan dispatched"
        );

        let lists = thread::scope(|scope| {
            for (index, (range, slab)) in ranges.into_iter().zip(slabs).enumerate() {
                let worker = ScanWorker {
                    index,
                    chunks: &request.chunks[range],
                    pattern,
                    sorted,
                    tac,
                    cancelled: &cancelled,
                    progress: progress_tx.clone(),
                    results: result_tx.clone(),
                };
                scope.spawn(move || worker.run(slab));
            }
            drop(progress_tx);
            drop(result_tx);

            let mut completed = 0;
            let mut matched = 0;
            for found in &progress_rx {
                completed += 1;
                matched += found;
                if completed == total {
                    break;
                }

                if requests.peek(RequestKind::Reset) {
                    // Leaving the scope joins every worker before the slabs
                    // can be handed out again.
                    cancelled.store(true, Ordering::Relaxed);
                    debug!(completed, total, "scan cancelled");
                    return None;
                }

                if started_at.elapsed() >= progress_min_duration {
                    let ratio = completed as f32 / total as f32;
                    trace!(ratio, "scan progress");
                    events.set(Event::SearchProgress(ratio));
                }
            }
            assert_eq!(
                completed, total,
                "scan workers stopped reporting before every chunk was scored"
            );
            if started_at.elapsed() >= progress_min_duration {
                events.set(Event::SearchProgress(1.0));
            }

            let mut lists: Vec<Vec<MatchResult>> = (0..num_slices).map(|_| Vec::new()).collect();
            for _ in 0..num_slices {
                let partial = result_rx
                    .recv()
                    .expect("scan worker exited without delivering its partition");
                lists[partial.index] = partial.matches;
            }
            debug!(matched, elapsed = ?started_at.elapsed(), "scan completed");
            Some(lists)
        });

        match lists {
            Some(lists) => ScanOutcome::Completed(Merger::new(
                pattern.as_str(),
                lists,
                sorted,
                tac,
                request.revision,
                min_index,
                max_index,
            )),
            None => ScanOutcome::Cancelled,
        }
    }
}
