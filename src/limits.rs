/// Width of a trigram, in characters.
pub const TRIGRAM_LEN: usize = 3;

// Exact sets are limited to MAX_EXACT strings. Past that, simplify rewrites
// the info to use prefix and suffix sets instead. Three case-insensitive
// letters (8 strings) are enough to trigger a flush.
pub const MAX_EXACT: usize = 7;

// Prefix and suffix sets are limited to MAX_SET strings. Must stay at least
// 2^3 so a case-insensitive "abc" is representable exactly.
pub const MAX_SET: usize = 20;

/// Character classes larger than this are treated as "any character".
pub const MAX_CLASS: usize = 100;

/// Size bounds applied while analyzing a regex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_exact: usize,
    pub max_set: usize,
    pub max_class: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_exact: MAX_EXACT,
            max_set: MAX_SET,
            max_class: MAX_CLASS,
        }
    }
}
