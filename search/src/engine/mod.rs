pub(crate) mod partition;
mod request;
mod scan;

use crate::pattern::{FuzzyPatternBuilder, PatternBuilder};
use crate::slab::Slab;
use request::{MatchRequest, Request};
use scan::ScanOutcome;
use sift_core::{
    Chunk, ChunkCache, Event, EventBox, Events, MatcherConfig, Merger, Revision, count_items,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Request-serializing scan scheduler.
///
/// `run` processes one request at a time on the calling thread and fans each
/// scan out over a fixed number of partitions. Callers talk to a running
/// matcher through a [`MatcherHandle`] and receive [`Event`]s on the event
/// box passed to [`Matcher::new`].
pub struct Matcher {
    chunk_cache: Arc<ChunkCache>,
    builder: Arc<dyn PatternBuilder>,
    sort: bool,
    tac: bool,
    events: Arc<EventBox<Event>>,
    requests: Arc<EventBox<Request>>,
    partitions: usize,
    slabs: Vec<Option<Slab>>,
    merger_cache: HashMap<String, Arc<Merger>>,
    revision: Revision,
    progress_min_duration: Duration,
}

/// Cloneable control surface of a [`Matcher`].
#[derive(Clone)]
pub struct MatcherHandle {
    builder: Arc<dyn PatternBuilder>,
    requests: Arc<EventBox<Request>>,
}

/// Create operations.
impl Matcher {
    pub fn new(
        config: &MatcherConfig,
        chunk_cache: Arc<ChunkCache>,
        builder: Arc<dyn PatternBuilder>,
        events: Arc<EventBox<Event>>,
        revision: Revision,
    ) -> Self {
        let partitions = config.engine.partitions();

        Self {
            chunk_cache,
            builder,
            sort: config.matching.sort,
            tac: config.matching.tac,
            events,
            requests: Arc::new(EventBox::new()),
            partitions,
            slabs: (0..partitions).map(|_| None).collect(),
            merger_cache: HashMap::new(),
            revision,
            progress_min_duration: config.engine.progress_min_duration(),
        }
    }

    /// Creates a matcher scoring with nucleo fuzzy patterns.
    pub fn fuzzy(
        config: &MatcherConfig,
        events: Arc<EventBox<Event>>,
        revision: Revision,
    ) -> Self {
        let chunk_cache = Arc::new(ChunkCache::new());
        let builder = Arc::new(FuzzyPatternBuilder::new(
            &config.matching,
            Arc::clone(&chunk_cache),
        ));
        Self::new(config, chunk_cache, builder, events, revision)
    }

    pub fn handle(&self) -> MatcherHandle {
        MatcherHandle {
            builder: Arc::clone(&self.builder),
            requests: Arc::clone(&self.requests),
        }
    }

    pub fn chunk_cache(&self) -> &Arc<ChunkCache> {
        &self.chunk_cache
    }

    pub fn partitions(&self) -> usize {
        self.partitions
    }
}

/// Request loop.
impl Matcher {
    /// Processes requests until [`MatcherHandle::stop`] is called.
    pub fn run(mut self) {
        info!(partitions = self.partitions, "matcher started");
        let mut prev_count = 0;

        while let Some(request) = self.requests.wait(latest_request) {
            let mut cache_cleared = false;
            if request.sort != self.sort || request.revision != self.revision {
                let previous = self.revision;
                self.sort = request.sort;
                self.revision = request.revision;
                self.merger_cache = HashMap::new();
                if !request.revision.compatible(&previous) {
                    debug!(?previous, revision = ?request.revision, "incompatible revision");
                    self.chunk_cache.clear();
                    self.builder.clear();
                }
                cache_cleared = true;
            }

            let key = request.pattern.as_str();
            let count = count_items(&request.chunks);
            let mut cached = None;

            if cache_cleared {
                prev_count = count;
            } else if count == prev_count {
                cached = self
                    .merger_cache
                    .get(key)
                    .filter(|merger| merger.is_final() == request.is_final)
                    .cloned();
            } else {
                debug!(prev_count, count, "item count changed, dropping merger cache");
                prev_count = count;
                self.merger_cache = HashMap::new();
            }

            let merger = match cached {
                Some(merger) => {
                    debug!(query = key, "merger cache hit");
                    merger
                }
                None => match self.scan(&request) {
                    ScanOutcome::Completed(merger) => Arc::new(merger),
                    ScanOutcome::Cancelled => continue,
                },
            };

            if merger.cacheable() {
                self.merger_cache.insert(key.to_owned(), Arc::clone(&merger));
            }
            merger.set_final(request.is_final);
            self.events.set(Event::SearchFin(merger));
        }

        info!("matcher stopped");
    }
}

/// Picks the request to act on from one wake-up. `None` means quit.
fn latest_request(events: Events<Request>) -> Option<MatchRequest> {
    let mut latest = None;
    for (_, request) in events {
        match request {
            Request::Quit => return None,
            Request::Retry(request) | Request::Reset(request) => latest = Some(request),
        }
    }
    latest
}

impl MatcherHandle {
    /// Compiles `query` and submits it against `chunks`.
    ///
    /// With `cancel` set, a scan in progress is aborted; otherwise it is left
    /// to finish first. Either way only the latest submission runs.
    pub fn reset(
        &self,
        chunks: Vec<Arc<Chunk>>,
        query: &str,
        cancel: bool,
        is_final: bool,
        sort: bool,
        revision: Revision,
    ) {
        let request = MatchRequest {
            chunks,
            pattern: self.builder.build(query),
            is_final,
            sort,
            revision,
        };
        self.requests.set(if cancel {
            Request::Reset(request)
        } else {
            Request::Retry(request)
        });
    }

    /// Asks the loop to exit after its current wait returns.
    pub fn stop(&self) {
        self.requests.set(Request::Quit);
    }
}

#[cfg(test)]
mod tests;
