use crate::pattern::Pattern;
use sift_core::{Chunk, Revision, Signal};
use std::sync::Arc;

/// One search to run against a snapshot of the item collection.
#[derive(Clone)]
pub(crate) struct MatchRequest {
    pub(crate) chunks: Vec<Arc<Chunk>>,
    pub(crate) pattern: Arc<dyn Pattern>,
    pub(crate) is_final: bool,
    pub(crate) sort: bool,
    pub(crate) revision: Revision,
}

/// Input of the matcher loop.
pub(crate) enum Request {
    /// Run after the current scan finishes.
    Retry(MatchRequest),
    /// Abort the current scan, then run.
    Reset(MatchRequest),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum RequestKind {
    Retry,
    Reset,
    Quit,
}

impl Signal for Request {
    type Kind = RequestKind;

    fn kind(&self) -> RequestKind {
        match self {
            Request::Retry(_) => RequestKind::Retry,
            Request::Reset(_) => RequestKind::Reset,
            Request::Quit => RequestKind::Quit,
        }
    }
}
