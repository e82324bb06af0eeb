//! # Common Types

/// A vocabulary token; compared by exact equality, never normalized.
pub type Token = compact_str::CompactString;

/// A token occurrence count.
pub type Frequency = u64;

/// Sentinel frequency carried by special tokens.
///
/// Special tokens are always retained by pruning; this value is never
/// written as a count.
pub const SPECIAL_FREQUENCY: Frequency = Frequency::MAX;

/// Token to position map.
pub type TokenIndexMap = ahash::AHashMap<Token, usize>;
