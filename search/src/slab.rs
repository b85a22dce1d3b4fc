use nucleo::pattern::Pattern as NucleoPattern;
use nucleo::{Config as NucleoConfig, Matcher, Utf32Str};

/// Reusable scoring workspace owned by one scan partition.
///
/// Holds the nucleo matrix memory and the char buffer used to decode
/// haystacks, so scoring allocates nothing once the slab is warm.
pub struct Slab {
    matcher: Matcher,
    chars: Vec<char>,
    scored: usize,
}

impl Default for Slab {
    fn default() -> Self {
        Self::new()
    }
}

impl Slab {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(NucleoConfig::DEFAULT),
            chars: Vec::new(),
            scored: 0,
        }
    }

    /// Scores `text` against a compiled nucleo pattern.
    pub fn score(&mut self, pattern: &NucleoPattern, text: &str) -> Option<u32> {
        self.scored += 1;
        let haystack = Utf32Str::new(text, &mut self.chars);
        pattern.score(haystack, &mut self.matcher)
    }

    /// Number of haystacks scored since the slab was created.
    pub fn scored(&self) -> usize {
        self.scored
    }
}
