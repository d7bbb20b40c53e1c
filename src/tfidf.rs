// Tf-idf fallback - corpus-relative vectors for free-text descriptions
//
// Used when records carry no fixed category scheme, e.g. ad hoc product
// blurbs. The vector space is rebuilt from scratch per corpus: dimensions
// are vocabulary terms, so adding one document changes every vector.
// Vectors from one build are only comparable with each other, never with
// fixed-layout embeddings; the type system enforces both rules.

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::config::MIN_TOKEN_LEN;
use crate::embedding::CorpusVector;
use crate::error::MatchError;

/// One tf-idf vector space and the document vectors built inside it.
pub struct CorpusSpace {
	vocabulary: Vec<String>,
	vectors: Vec<CorpusVector>,
}

impl CorpusSpace {
	/// Builds a vector space over one document collection.
	///
	/// Term weights are raw counts scaled by smoothed inverse document
	/// frequency, `ln((1 + n) / (1 + df)) + 1`, then each document vector
	/// is l2-normalized. Fails with [`MatchError::EmptyCorpus`] when the
	/// collection is empty or yields no tokens at all; a single tokenless
	/// document inside a usable corpus just gets a degenerate zero vector.
	pub fn build<S: AsRef<str>>(documents: &[S]) -> Result<Self, MatchError> {
		if documents.is_empty() {
			return Err(MatchError::EmptyCorpus);
		}

		let token_counts: Vec<HashMap<String, usize>> = documents
			.iter()
			.map(|doc| count_tokens(doc.as_ref()))
			.collect();

		// BTreeMap keeps the vocabulary sorted, so term order (and thus
		// vector dimensions) is deterministic for a given corpus.
		let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
		for counts in &token_counts {
			for term in counts.keys() {
				*doc_freq.entry(term).or_insert(0) += 1;
			}
		}
		if doc_freq.is_empty() {
			return Err(MatchError::EmptyCorpus);
		}

		let n_docs = documents.len() as f32;
		let vocabulary: Vec<String> = doc_freq.keys().map(|t| t.to_string()).collect();
		let idf: Vec<f32> = doc_freq
			.values()
			.map(|&df| ((1.0 + n_docs) / (1.0 + df as f32)).ln() + 1.0)
			.collect();
		let term_index: HashMap<&str, usize> = vocabulary
			.iter()
			.enumerate()
			.map(|(i, term)| (term.as_str(), i))
			.collect();

		let vectors: Vec<CorpusVector> = token_counts
			.iter()
			.map(|counts| {
				let mut vector = vec![0.0; vocabulary.len()];
				for (term, count) in counts {
					if let Some(&i) = term_index.get(term.as_str()) {
						vector[i] = *count as f32 * idf[i];
					}
				}
				CorpusVector::from_raw(vector)
			})
			.collect();

		debug!(
			"built corpus space: {} documents, {} terms",
			vectors.len(),
			vocabulary.len()
		);

		Ok(Self { vocabulary, vectors })
	}

	/// Sorted vocabulary; index i is dimension i of every vector.
	pub fn vocabulary(&self) -> &[String] {
		&self.vocabulary
	}

	/// One vector per input document, in input order.
	pub fn vectors(&self) -> &[CorpusVector] {
		&self.vectors
	}

	/// Vector for one document by its input position.
	pub fn vector(&self, doc: usize) -> Option<&CorpusVector> {
		self.vectors.get(doc)
	}

	/// Dimensionality of this space (vocabulary size).
	pub fn dimension(&self) -> usize {
		self.vocabulary.len()
	}
}

fn count_tokens(text: &str) -> HashMap<String, usize> {
	let mut counts = HashMap::new();
	for token in tokenize(text) {
		*counts.entry(token).or_insert(0) += 1;
	}
	counts
}

/// Lowercased alphanumeric runs of at least [`MIN_TOKEN_LEN`] characters.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
	text.split(|c: char| !c.is_alphanumeric())
		.filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
		.map(|t| t.to_lowercase())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::embedding::similarity;

	#[test]
	fn empty_corpus_is_an_error() {
		let docs: Vec<String> = Vec::new();
		assert!(matches!(
			CorpusSpace::build(&docs),
			Err(MatchError::EmptyCorpus)
		));
	}

	#[test]
	fn tokenless_corpus_is_an_error() {
		assert!(matches!(
			CorpusSpace::build(&["  ", "!!", "a"]),
			Err(MatchError::EmptyCorpus)
		));
	}

	#[test]
	fn dimension_equals_vocabulary_size() {
		let space = CorpusSpace::build(&["soft matte blush", "dewy blush"]).unwrap();
		assert_eq!(space.dimension(), space.vocabulary().len());
		assert!(space.vectors().iter().all(|v| v.len() == space.dimension()));
	}

	#[test]
	fn shared_terms_score_higher_within_one_space() {
		let space = CorpusSpace::build(&[
			"creamy coral blush with satin finish",
			"coral blush, creamy texture",
			"waterproof black mascara",
		])
		.unwrap();

		let coral = similarity(space.vector(0).unwrap(), space.vector(1).unwrap()).unwrap();
		let mascara = similarity(space.vector(0).unwrap(), space.vector(2).unwrap()).unwrap();
		assert!(coral > mascara);
	}

	#[test]
	fn tokenless_document_gets_a_degenerate_vector() {
		let space = CorpusSpace::build(&["rosy glow highlighter", "?!"]).unwrap();
		assert!(!space.vector(0).unwrap().is_degenerate());
		assert!(space.vector(1).unwrap().is_degenerate());
	}

	#[test]
	fn adding_a_document_changes_the_space() {
		let small = CorpusSpace::build(&["shimmer bronzer", "matte bronzer"]).unwrap();
		let grown = CorpusSpace::build(&["shimmer bronzer", "matte bronzer", "glitter gloss"]).unwrap();
		assert_ne!(small.dimension(), grown.dimension());
	}

	#[test]
	fn vocabulary_is_sorted_and_deduplicated() {
		let space = CorpusSpace::build(&["velvet velvet blush", "airy blush"]).unwrap();
		let vocab = space.vocabulary();
		assert_eq!(vocab, &["airy", "blush", "velvet"]);
	}
}
