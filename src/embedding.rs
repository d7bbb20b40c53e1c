//! Embedding vector types and shared vector math
//!
//! The two schemes are distinct types on purpose. A [`ProfileEmbedding`]
//! comes from the fixed feature layout and is stable across sessions; a
//! [`CorpusVector`] is relative to one tf-idf corpus and meaningless
//! outside it. Keeping them apart makes cross-scheme comparison a type
//! error instead of a silently wrong score.

use serde::{Deserialize, Serialize};

use crate::config::NORM_TOLERANCE;
use crate::error::MatchError;

/// Fixed-layout, unit-normalized embedding of a product or a user profile.
///
/// Immutable once produced; a changed attribute record means recomposing a
/// new embedding. Serializable verbatim for the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileEmbedding {
	vector: Vec<f32>,
	nonzero: usize,
	degenerate: bool,
}

impl ProfileEmbedding {
	/// Normalizes raw composed data into an embedding.
	///
	/// An all-zero input (every attribute empty or unrecognized) is kept as
	/// the exact zero vector and flagged degenerate.
	pub(crate) fn from_raw(mut vector: Vec<f32>) -> Self {
		let norm = l2_normalize(&mut vector);
		let nonzero = vector.iter().filter(|v| **v != 0.0).count();
		Self {
			vector,
			nonzero,
			degenerate: norm == 0.0,
		}
	}

	/// Rebuilds an embedding from stored data.
	///
	/// Stored vectors are expected to be unit-length already; ranking
	/// treats dot products as cosine similarity on that assumption. A
	/// vector whose norm drifted beyond [`NORM_TOLERANCE`] (lossy channel,
	/// buggy writer) is renormalized here rather than trusted.
	pub fn from_stored(mut vector: Vec<f32>) -> Self {
		let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
		if norm > 0.0 && (norm - 1.0).abs() > NORM_TOLERANCE {
			for x in vector.iter_mut() {
				*x /= norm;
			}
		}
		let nonzero = vector.iter().filter(|v| **v != 0.0).count();
		Self {
			vector,
			nonzero,
			degenerate: norm == 0.0,
		}
	}

	/// The raw components.
	pub fn as_slice(&self) -> &[f32] {
		&self.vector
	}

	/// Embedding length (the layout's total length).
	pub fn len(&self) -> usize {
		self.vector.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vector.is_empty()
	}

	/// Count of non-zero components, for diagnosing sparse inputs.
	pub fn nonzero_count(&self) -> usize {
		self.nonzero
	}

	/// True when every attribute was empty or unrecognized. A degenerate
	/// query scores 0 against everything; callers usually short-circuit.
	pub fn is_degenerate(&self) -> bool {
		self.degenerate
	}
}

/// One document's tf-idf vector, relative to a single corpus build.
///
/// Deliberately not serializable: the dimensions shift whenever the corpus
/// changes, so persisted copies would go stale silently. Consumers needing
/// stable vectors use the fixed-layout composer instead.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusVector {
	vector: Vec<f32>,
	degenerate: bool,
}

impl CorpusVector {
	pub(crate) fn from_raw(mut vector: Vec<f32>) -> Self {
		let norm = l2_normalize(&mut vector);
		Self {
			vector,
			degenerate: norm == 0.0,
		}
	}

	pub fn as_slice(&self) -> &[f32] {
		&self.vector
	}

	pub fn len(&self) -> usize {
		self.vector.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vector.is_empty()
	}

	/// True when the document had no usable tokens.
	pub fn is_degenerate(&self) -> bool {
		self.degenerate
	}
}

/// Common surface the ranking engine needs from an embedding.
///
/// Both vector types implement it; because [`crate::ranking::rank`] is
/// generic over one `V`, a query and its candidates are forced to come
/// from the same scheme.
pub trait SimilarityVector {
	fn components(&self) -> &[f32];
}

impl SimilarityVector for ProfileEmbedding {
	fn components(&self) -> &[f32] {
		&self.vector
	}
}

impl SimilarityVector for CorpusVector {
	fn components(&self) -> &[f32] {
		&self.vector
	}
}

/// Cosine similarity of two same-scheme vectors.
///
/// Both sides are unit-normalized at construction, so this is a plain dot
/// product; a zero vector scores 0 against anything.
pub fn similarity<V: SimilarityVector>(a: &V, b: &V) -> Result<f32, MatchError> {
	let (a, b) = (a.components(), b.components());
	if a.len() != b.len() {
		return Err(MatchError::DimensionMismatch {
			expected: a.len(),
			actual: b.len(),
		});
	}
	Ok(dot(a, b))
}

/// Dot product of two equal-length slices.
pub(crate) fn dot(a: &[f32], b: &[f32]) -> f32 {
	a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Normalizes a vector to unit length in place, returning the original
/// norm. A zero vector is left untouched.
pub(crate) fn l2_normalize(v: &mut [f32]) -> f32 {
	let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
	if norm > 0.0 {
		for x in v.iter_mut() {
			*x /= norm;
		}
	}
	norm
}
