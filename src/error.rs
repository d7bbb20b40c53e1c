//! Error types for embedding and matching

use thiserror::Error;

/// Failures that can escape the matching core.
///
/// Attribute-level problems (unknown tokens, empty answers) never surface
/// here; they degrade to zero sub-vectors inside composition instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
	/// Two vectors from different layout versions were compared.
	#[error("embedding dimension mismatch: expected {expected}, got {actual}")]
	DimensionMismatch { expected: usize, actual: usize },

	/// No documents (or no usable tokens) were given to the tf-idf builder.
	#[error("cannot build a vector space from an empty corpus")]
	EmptyCorpus,
}
