/// Generation token of an item collection.
///
/// Minor bumps mark append-only growth, so results computed against an older
/// minor revision stay meaningful. Major bumps mark a reload that may reuse
/// item indexes for different text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Revision {
    major: u32,
    minor: u32,
}

impl Revision {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    /// Returns true if per-chunk caches built under `other` are still valid.
    pub fn compatible(&self, other: &Revision) -> bool {
        self.major == other.major
    }

    pub fn bump_major(&mut self) {
        self.major += 1;
        self.minor = 0;
    }

    pub fn bump_minor(&mut self) {
        self.minor += 1;
    }
}
