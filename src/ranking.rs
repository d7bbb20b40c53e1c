// Ranking - orders candidate embeddings by similarity to a query
//
// Scores are dot products; both sides are unit-normalized at construction
// so this is cosine similarity. Candidates from a different layout version
// (wrong length) are skipped and counted, never fatal to the batch.

use std::cmp::Ordering;

use log::warn;
use rayon::prelude::*;
use serde::Serialize;

use crate::config::DEFAULT_TOP_K;
use crate::embedding::{dot, SimilarityVector};

/// One ranked candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMatch<I> {
	pub id: I,
	pub score: f32,
}

/// Ranked results for one query, descending by score.
///
/// `skipped` counts candidates excluded for dimension mismatch; callers
/// surface it so a half-reindexed store doesn't fail silently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMatches<I> {
	pub matches: Vec<ScoredMatch<I>>,
	pub skipped: usize,
}

/// Ranks candidates by similarity to the query.
///
/// Equal scores keep candidate input order (stable sort). `top_k` of
/// `None` or `Some(0)` returns everything. A degenerate (all-zero) query
/// is allowed and scores 0 against every candidate; callers should check
/// [`crate::ProfileEmbedding::is_degenerate`] first if that is not useful.
pub fn rank<I, V>(query: &V, candidates: &[(I, V)], top_k: Option<usize>) -> RankedMatches<I>
where
	I: Clone + Send + Sync,
	V: SimilarityVector + Sync,
{
	let dim = query.components().len();

	let scores: Vec<Option<f32>> = candidates
		.par_iter()
		.map(|(_, candidate)| {
			let components = candidate.components();
			(components.len() == dim).then(|| dot(query.components(), components))
		})
		.collect();

	let mut matches = Vec::with_capacity(candidates.len());
	let mut skipped = 0;
	for ((id, _), score) in candidates.iter().zip(scores) {
		match score {
			Some(score) => matches.push(ScoredMatch {
				id: id.clone(),
				score,
			}),
			None => skipped += 1,
		}
	}
	if skipped > 0 {
		warn!("skipped {skipped} candidate(s) with mismatched embedding dimensions");
	}

	// Vec::sort_by is stable, which is what preserves tie order.
	matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

	if let Some(k) = top_k.filter(|k| *k > 0) {
		matches.truncate(k);
	}

	RankedMatches { matches, skipped }
}

/// [`rank`] with the default result limit.
pub fn rank_top<I, V>(query: &V, candidates: &[(I, V)]) -> RankedMatches<I>
where
	I: Clone + Send + Sync,
	V: SimilarityVector + Sync,
{
	rank(query, candidates, Some(DEFAULT_TOP_K))
}
