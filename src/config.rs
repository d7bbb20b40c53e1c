//! Library configuration and constants

// === Embedding Layout ===
pub const EMBEDDING_DIM: usize = 128;

// === Attribute Input ===
pub const RESTRICTION_SEPARATOR: char = ',';

// === Sub-vector Encoding ===
/// Weight written into the slots adjacent to an ordinal token's own slot,
/// so neighboring categories (e.g. fair/light) keep nonzero similarity.
pub const ADJACENT_BLEED: f32 = 0.4;

/// Allowed drift from unit length before a stored vector is renormalized.
pub const NORM_TOLERANCE: f32 = 1e-4;

// === Ranking Defaults ===
pub const DEFAULT_TOP_K: usize = 10;

// === Text Fallback ===
/// Minimum token length accepted by the tf-idf tokenizer.
pub const MIN_TOKEN_LEN: usize = 2;
