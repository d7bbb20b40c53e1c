// Attribute mapping - static tables from recognized tokens to sub-vectors
//
// Tables are built once at startup and never mutated. Unknown or empty
// tokens map to a zero sub-vector of the kind's length; malformed user
// input must never abort embedding construction.

use std::collections::HashMap;

use crate::attributes::AttributeKind;
use crate::config::{ADJACENT_BLEED, RESTRICTION_SEPARATOR};

/// Token lookup table for one attribute kind.
///
/// Every sub-vector in one table has the same length; the layout relies on
/// this when carving regions out of the full embedding.
struct MappingTable {
	len: usize,
	entries: HashMap<&'static str, Vec<f32>>,
}

impl MappingTable {
	/// One-hot encoding: each token lights exactly its own slot.
	fn one_hot(tokens: &[&'static str]) -> Self {
		let len = tokens.len();
		let mut entries = HashMap::with_capacity(len);
		for (i, token) in tokens.iter().enumerate() {
			let mut sub = vec![0.0; len];
			sub[i] = 1.0;
			entries.insert(*token, sub);
		}
		Self { len, entries }
	}

	/// Ordinal encoding: 1.0 at the token's slot with bleed into neighbors,
	/// so adjacent categories stay partially similar after composition.
	fn ramp(tokens: &[&'static str]) -> Self {
		let len = tokens.len();
		let mut entries = HashMap::with_capacity(len);
		for (i, token) in tokens.iter().enumerate() {
			let mut sub = vec![0.0; len];
			sub[i] = 1.0;
			if i > 0 {
				sub[i - 1] = ADJACENT_BLEED;
			}
			if i + 1 < len {
				sub[i + 1] = ADJACENT_BLEED;
			}
			entries.insert(*token, sub);
		}
		Self { len, entries }
	}

	/// Replaces one token's sub-vector, for categories that are blends.
	fn with_blend(mut self, token: &'static str, sub: Vec<f32>) -> Self {
		debug_assert_eq!(sub.len(), self.len);
		self.entries.insert(token, sub);
		self
	}
}

/// The full set of token tables, one per attribute kind.
pub struct AttributeMappings {
	tables: HashMap<AttributeKind, MappingTable>,
}

impl AttributeMappings {
	/// Builds the built-in tables covering the original quiz vocabulary.
	pub fn builtin() -> Self {
		let mut tables = HashMap::new();

		tables.insert(
			AttributeKind::SkinTone,
			MappingTable::ramp(&["fair", "light", "medium", "tan", "deep", "very-deep"]),
		);
		tables.insert(
			AttributeKind::Undertone,
			MappingTable::one_hot(&["cool", "warm", "neutral"])
				.with_blend("neutral", vec![ADJACENT_BLEED, ADJACENT_BLEED, 1.0]),
		);
		tables.insert(
			AttributeKind::CoverageLevel,
			MappingTable::ramp(&["sheer", "medium", "full"]),
		);
		tables.insert(
			AttributeKind::SkinType,
			MappingTable::one_hot(&["oily", "dry", "combination", "normal"])
				.with_blend("combination", vec![ADJACENT_BLEED, ADJACENT_BLEED, 1.0, 0.0]),
		);
		tables.insert(
			AttributeKind::Restrictions,
			MappingTable::one_hot(&["acne", "aging", "dark-spots", "redness", "pores", "texture"]),
		);
		tables.insert(
			AttributeKind::LipProduct,
			MappingTable::one_hot(&["lipstick", "gloss", "stain", "balm"]),
		);
		tables.insert(
			AttributeKind::EyeColor,
			MappingTable::one_hot(&["brown", "hazel", "green", "blue", "gray"])
				.with_blend("hazel", vec![ADJACENT_BLEED, 1.0, ADJACENT_BLEED, 0.0, 0.0]),
		);
		tables.insert(
			AttributeKind::MakeupStyle,
			MappingTable::one_hot(&["natural", "minimal", "glam", "experimental"])
				.with_blend("natural", vec![1.0, ADJACENT_BLEED, 0.0, 0.0])
				.with_blend("minimal", vec![ADJACENT_BLEED, 1.0, 0.0, 0.0]),
		);
		tables.insert(
			AttributeKind::MakeupFrequency,
			MappingTable::ramp(&["daily", "few-times", "occasionally", "rarely"]),
		);

		Self { tables }
	}

	/// An empty mapping set, for callers bringing their own vocabulary.
	pub fn empty() -> Self {
		Self {
			tables: HashMap::new(),
		}
	}

	/// Adds or replaces one kind's table.
	///
	/// Panics if the entries disagree on sub-vector length; that is a
	/// construction-time programming error, not a runtime condition.
	pub fn set_table(&mut self, kind: AttributeKind, entries: Vec<(&'static str, Vec<f32>)>) {
		let len = entries.first().map(|(_, sub)| sub.len()).unwrap_or(0);
		assert!(
			entries.iter().all(|(_, sub)| sub.len() == len),
			"sub-vectors for {kind} must share one length"
		);
		self.tables.insert(
			kind,
			MappingTable {
				len,
				entries: entries.into_iter().collect(),
			},
		);
	}

	/// Length of the sub-vector produced for a kind.
	pub fn sub_vector_len(&self, kind: AttributeKind) -> usize {
		self.tables.get(&kind).map(|t| t.len).unwrap_or(0)
	}

	/// Maps a raw attribute value to its sub-vector.
	///
	/// Multi-valued kinds are split on commas and combined per-token with
	/// element-wise max, so order and duplicates don't matter. Unrecognized
	/// tokens contribute nothing.
	pub fn sub_vector(&self, kind: AttributeKind, raw: &str) -> Vec<f32> {
		let Some(table) = self.tables.get(&kind) else {
			return Vec::new();
		};

		if kind.is_multi_valued() {
			let mut combined: Vec<f32> = vec![0.0; table.len];
			for token in raw.split(RESTRICTION_SEPARATOR) {
				if let Some(sub) = table.entries.get(normalize_token(token).as_str()) {
					for (slot, value) in combined.iter_mut().zip(sub) {
						*slot = slot.max(*value);
					}
				}
			}
			combined
		} else {
			table
				.entries
				.get(normalize_token(raw).as_str())
				.cloned()
				.unwrap_or_else(|| vec![0.0; table.len])
		}
	}
}

/// Canonical token form: trimmed, lowercased, inner whitespace hyphenated
/// ("Very Deep" and "very-deep" are the same answer).
fn normalize_token(raw: &str) -> String {
	raw.trim()
		.to_lowercase()
		.split_whitespace()
		.collect::<Vec<_>>()
		.join("-")
}
