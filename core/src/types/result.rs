use super::Item;
use std::cmp::Ordering;

/// A matched item and its score against the active pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    item: Item,
    score: u32,
}

impl MatchResult {
    pub fn new(item: Item, score: u32) -> Self {
        Self { item, score }
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Relevance order: higher score, then shorter text, then item index.
    ///
    /// Index ties break ascending, or descending when `tac` is set.
    pub fn cmp_relevance(&self, other: &Self, tac: bool) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.item.text().len().cmp(&other.item.text().len()))
            .then_with(|| {
                if tac {
                    other.item.index().cmp(&self.item.index())
                } else {
                    self.item.index().cmp(&other.item.index())
                }
            })
    }
}
