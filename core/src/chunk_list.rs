use crate::types::{Chunk, Item};
use std::sync::Arc;

/// Append-only item storage handing out immutable chunk snapshots.
///
/// Only the last chunk is ever partial. Pushing into it while a snapshot
/// still holds it copies the chunk first, so snapshots never change.
#[derive(Debug, Default)]
pub struct ChunkList {
    chunks: Vec<Arc<Chunk>>,
    count: usize,
}

impl ChunkList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item and returns its index.
    pub fn push(&mut self, text: impl Into<Arc<str>>) -> usize {
        let index = self.count;
        let item = Item::new(index, text);

        match self.chunks.last_mut() {
            Some(last) if !last.is_full() => Arc::make_mut(last).push(item),
            _ => self.chunks.push(Arc::new(Chunk::from_items(vec![item]))),
        }

        self.count += 1;
        index
    }

    pub fn extend<I, S>(&mut self, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        for text in texts {
            self.push(text);
        }
    }

    /// Returns the current chunks and item count.
    pub fn snapshot(&self) -> (Vec<Arc<Chunk>>, usize) {
        (self.chunks.clone(), self.count)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Drops every item. Indexes restart at zero, so callers must also bump
    /// the major revision.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.count = 0;
    }
}
