// Feature layout - fixed offsets and per-attribute weights
//
// Products and user queries share the same layout; that is what makes
// their vectors comparable at all. Regions are carved contiguously from
// offset 0, the tail of the 128-float vector stays reserved (zero).

use std::collections::HashMap;

use log::warn;

use crate::attributes::AttributeKind;
use crate::config::EMBEDDING_DIM;
use crate::mapping::AttributeMappings;

/// One attribute kind's slice of the full embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
	pub offset: usize,
	pub len: usize,
}

/// Fixed schema assigning each attribute kind a region of the embedding.
pub struct FeatureLayout {
	regions: HashMap<AttributeKind, Region>,
	total_len: usize,
}

impl FeatureLayout {
	/// Builds the layout from a mapping set, in [`AttributeKind::ALL`] order.
	///
	/// Panics at startup if the regions would exceed [`EMBEDDING_DIM`];
	/// that is a programming error in the tables, not a runtime condition.
	pub fn builtin(mappings: &AttributeMappings) -> Self {
		Self::with_total_len(mappings, EMBEDDING_DIM)
	}

	/// Builds a layout with a caller-chosen total length (tests, migrations).
	pub fn with_total_len(mappings: &AttributeMappings, total_len: usize) -> Self {
		let mut regions = HashMap::new();
		let mut offset = 0;

		for kind in AttributeKind::ALL {
			let len = mappings.sub_vector_len(kind);
			if len == 0 {
				continue;
			}
			regions.insert(kind, Region { offset, len });
			offset += len;
		}

		assert!(
			offset <= total_len,
			"attribute regions ({offset} floats) exceed embedding length {total_len}"
		);

		Self { regions, total_len }
	}

	/// Region for a kind, if the layout covers it.
	pub fn region(&self, kind: AttributeKind) -> Option<Region> {
		self.regions.get(&kind).copied()
	}

	/// Full embedding length, reserved tail included.
	pub fn total_len(&self) -> usize {
		self.total_len
	}
}

/// Per-attribute scalar weights applied during composition.
///
/// The built-in numbers are tuning policy, not structural invariants:
/// primary matching axes (skin tone, undertone) dominate cosine similarity,
/// secondary signals (makeup frequency) are kept but down-weighted so they
/// only break ties. Changing them changes ranking taste, not correctness.
pub struct WeightTable {
	weights: HashMap<AttributeKind, f32>,
}

impl WeightTable {
	/// The built-in weight policy.
	pub fn builtin() -> Self {
		let mut table = Self {
			weights: HashMap::new(),
		};
		table.set(AttributeKind::SkinTone, 2.0);
		table.set(AttributeKind::Undertone, 1.8);
		table.set(AttributeKind::SkinType, 1.5);
		table.set(AttributeKind::Restrictions, 1.4);
		table.set(AttributeKind::CoverageLevel, 1.2);
		table.set(AttributeKind::MakeupStyle, 1.0);
		table.set(AttributeKind::LipProduct, 0.8);
		table.set(AttributeKind::EyeColor, 0.6);
		table.set(AttributeKind::MakeupFrequency, 0.4);
		table
	}

	/// A table with no overrides; every kind weighs 1.0.
	pub fn uniform() -> Self {
		Self {
			weights: HashMap::new(),
		}
	}

	/// Weight for a kind; 1.0 when not explicitly configured.
	pub fn weight(&self, kind: AttributeKind) -> f32 {
		self.weights.get(&kind).copied().unwrap_or(1.0)
	}

	/// Sets a kind's weight. Negative values are clamped to 0.0, which
	/// excludes the attribute from similarity entirely.
	pub fn set(&mut self, kind: AttributeKind, weight: f32) {
		let clamped = if weight < 0.0 {
			warn!("negative weight {weight} for {kind} clamped to 0.0");
			0.0
		} else {
			weight
		};
		self.weights.insert(kind, clamped);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn regions_are_contiguous_and_disjoint() {
		let mappings = AttributeMappings::builtin();
		let layout = FeatureLayout::builtin(&mappings);

		let mut regions: Vec<Region> = AttributeKind::ALL
			.iter()
			.filter_map(|kind| layout.region(*kind))
			.collect();
		regions.sort_by_key(|r| r.offset);

		let mut expected_offset = 0;
		for region in &regions {
			assert_eq!(region.offset, expected_offset);
			expected_offset += region.len;
		}
		assert!(expected_offset <= layout.total_len());
		assert_eq!(layout.total_len(), crate::config::EMBEDDING_DIM);
	}

	#[test]
	fn skin_tone_sits_at_the_front() {
		let mappings = AttributeMappings::builtin();
		let layout = FeatureLayout::builtin(&mappings);
		let region = layout.region(AttributeKind::SkinTone).unwrap();
		assert_eq!(region.offset, 0);
		assert_eq!(region.len, 6);
	}

	#[test]
	fn unconfigured_weight_defaults_to_one() {
		let weights = WeightTable::uniform();
		assert_eq!(weights.weight(AttributeKind::EyeColor), 1.0);
	}

	#[test]
	fn negative_weight_is_clamped() {
		let mut weights = WeightTable::uniform();
		weights.set(AttributeKind::LipProduct, -3.0);
		assert_eq!(weights.weight(AttributeKind::LipProduct), 0.0);
	}

	#[test]
	fn builtin_weights_emphasize_primary_axes() {
		let weights = WeightTable::builtin();
		assert!(weights.weight(AttributeKind::SkinTone) > weights.weight(AttributeKind::MakeupFrequency));
	}
}
