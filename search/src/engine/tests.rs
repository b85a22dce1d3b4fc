use super::Matcher;
use super::request::{MatchRequest, Request};
use super::scan::ScanOutcome;
use crate::slab::Slab;
use sift_core::{
    Chunk, ChunkList, EventBox, MatcherConfig, MaxPartitions, Merger, PartitionMultiplier,
    Revision,
};
use std::sync::Arc;

fn matcher(partitions: usize) -> Matcher {
    let mut config = MatcherConfig::default();
    config.engine.partition_multiplier = PartitionMultiplier::try_new(partitions).unwrap();
    config.engine.max_partitions = MaxPartitions::try_new(partitions).unwrap();
    Matcher::fuzzy(&config, Arc::new(EventBox::new()), Revision::default())
}

fn paths(n: usize) -> Vec<Arc<Chunk>> {
    let mut list = ChunkList::new();
    list.extend((0..n).map(|i| format!("src/module_{}/file_{i}.rs", i % 17)));
    list.snapshot().0
}

fn request(matcher: &Matcher, chunks: &[Arc<Chunk>], query: &str) -> MatchRequest {
    MatchRequest {
        chunks: chunks.to_vec(),
        pattern: matcher.builder.build(query),
        is_final: true,
        sort: true,
        revision: Revision::default(),
    }
}

fn completed(outcome: ScanOutcome) -> Merger {
    match outcome {
        ScanOutcome::Completed(merger) => merger,
        ScanOutcome::Cancelled => panic!("scan was cancelled"),
    }
}

fn ranked(merger: &Merger) -> Vec<(usize, u32)> {
    merger
        .iter()
        .map(|r| (r.item().index(), r.score()))
        .collect()
}

/// Haystacks scored by every slab the matcher holds.
fn scored(matcher: &Matcher) -> usize {
    matcher.slabs.iter().flatten().map(Slab::scored).sum()
}

#[test]
fn slabs_are_created_once_and_kept() {
    let mut matcher = matcher(4);
    let chunks = paths(1_000);
    assert!(matcher.slabs.iter().all(Option::is_none));

    let first = request(&matcher, &chunks, "mod");
    completed(matcher.scan(&first));
    assert_eq!(matcher.slabs.iter().flatten().count(), 4);
    assert_eq!(scored(&matcher), 1_000);

    let second = request(&matcher, &chunks, "file");
    completed(matcher.scan(&second));
    assert_eq!(scored(&matcher), 2_000);
}

#[test]
fn short_scans_leave_spare_slots_empty() {
    let mut matcher = matcher(4);
    let chunks = paths(150);

    let req = request(&matcher, &chunks, "mod");
    completed(matcher.scan(&req));

    assert_eq!(matcher.slabs.iter().flatten().count(), 2);
    assert!(matcher.slabs[2..].iter().all(Option::is_none));
}

#[test]
fn cancelled_scan_leaves_slabs_reusable() {
    let mut matcher = matcher(4);
    let chunks = paths(2_000);

    let slow = request(&matcher, &chunks, "src");
    matcher.requests.set(Request::Reset(slow.clone()));
    assert!(matches!(matcher.scan(&slow), ScanOutcome::Cancelled));
    matcher.requests.wait(|_| ());
    let after_cancel = scored(&matcher);

    let req = request(&matcher, &chunks, "mod3fil");
    let reused = completed(matcher.scan(&req));

    let mut fresh = self::matcher(4);
    let fresh_req = request(&fresh, &chunks, "mod3fil");
    let expected = completed(fresh.scan(&fresh_req));

    assert!(!reused.is_empty());
    assert_eq!(ranked(&reused), ranked(&expected));
    assert_eq!(scored(&matcher), after_cancel + 2_000);
}
