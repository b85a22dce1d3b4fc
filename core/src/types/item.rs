use std::sync::Arc;

/// Maximum number of items held by one chunk.
pub const CHUNK_SIZE: usize = 100;

/// One searchable line of text and its position in the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    index: usize,
    text: Arc<str>,
}

impl Item {
    pub fn new(index: usize, text: impl Into<Arc<str>>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Fixed-capacity batch of items, the unit of partitioning.
///
/// A full chunk never changes again, which is what makes it safe to key
/// [`ChunkCache`](crate::ChunkCache) entries on it.
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    items: Vec<Item>,
}

impl Chunk {
    /// Builds a chunk from already indexed items.
    ///
    /// Items beyond [`CHUNK_SIZE`] are a caller bug.
    pub fn from_items(items: Vec<Item>) -> Self {
        debug_assert!(items.len() <= CHUNK_SIZE);
        Self { items }
    }

    pub(crate) fn push(&mut self, item: Item) {
        debug_assert!(!self.is_full());
        self.items.push(item);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= CHUNK_SIZE
    }

    pub fn first_index(&self) -> Option<usize> {
        self.items.first().map(Item::index)
    }

    pub fn last_index(&self) -> Option<usize> {
        self.items.last().map(Item::index)
    }
}

/// Total number of items across `chunks`.
pub fn count_items(chunks: &[Arc<Chunk>]) -> usize {
    chunks.iter().map(|chunk| chunk.len()).sum()
}
