// Vector composer - assembles weighted sub-vectors into one embedding

use log::debug;

use crate::attributes::{AttributeKind, AttributeRecord};
use crate::embedding::ProfileEmbedding;
use crate::layout::{FeatureLayout, WeightTable};
use crate::mapping::AttributeMappings;

/// Composes attribute records into fixed-layout embeddings.
///
/// Holds the immutable lookup tables (mappings, layout, weights) built at
/// startup. Composition is pure and allocation-per-call; a single composer
/// can be shared freely across threads.
pub struct FeatureComposer {
	mappings: AttributeMappings,
	layout: FeatureLayout,
	weights: WeightTable,
}

impl FeatureComposer {
	/// Composer over the built-in vocabulary, layout and weight policy.
	pub fn builtin() -> Self {
		let mappings = AttributeMappings::builtin();
		let layout = FeatureLayout::builtin(&mappings);
		Self {
			mappings,
			layout,
			weights: WeightTable::builtin(),
		}
	}

	/// Composer over caller-supplied tables.
	pub fn new(mappings: AttributeMappings, layout: FeatureLayout, weights: WeightTable) -> Self {
		Self {
			mappings,
			layout,
			weights,
		}
	}

	pub fn layout(&self) -> &FeatureLayout {
		&self.layout
	}

	/// Encodes one attribute record into a unit-normalized embedding.
	///
	/// Each layout region is written at most once: sub-vector times the
	/// kind's weight, at the kind's fixed offset. Empty or unrecognized
	/// answers leave their region zero. If everything was empty the result
	/// is the exact zero vector, flagged degenerate.
	pub fn compose(&self, record: &AttributeRecord) -> ProfileEmbedding {
		let mut vector = vec![0.0; self.layout.total_len()];

		for kind in AttributeKind::ALL {
			let Some(region) = self.layout.region(kind) else {
				continue;
			};
			let sub = self.mappings.sub_vector(kind, record.value(kind));
			debug_assert_eq!(sub.len(), region.len);

			let weight = self.weights.weight(kind);
			for (i, value) in sub.iter().take(region.len).enumerate() {
				vector[region.offset + i] = value * weight;
			}
		}

		let embedding = ProfileEmbedding::from_raw(vector);
		if embedding.is_degenerate() {
			debug!("composed a degenerate embedding; record had no recognized attributes");
		}
		embedding
	}
}

impl Default for FeatureComposer {
	fn default() -> Self {
		Self::builtin()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::EMBEDDING_DIM;

	fn record(skin_tone: &str) -> AttributeRecord {
		AttributeRecord {
			skin_tone: skin_tone.to_string(),
			..AttributeRecord::default()
		}
	}

	/// Minimal scheme: one attribute, 3 of 10 floats, weight 2.0.
	fn tiny_composer() -> FeatureComposer {
		let mut mappings = AttributeMappings::empty();
		mappings.set_table(AttributeKind::SkinTone, vec![("fair", vec![1.0, 0.0, 0.0])]);
		let layout = FeatureLayout::with_total_len(&mappings, 10);
		let mut weights = WeightTable::uniform();
		weights.set(AttributeKind::SkinTone, 2.0);
		FeatureComposer::new(mappings, layout, weights)
	}

	#[test]
	fn weight_is_applied_once_then_normalized_away() {
		let embedding = tiny_composer().compose(&record("fair"));
		// Raw vector is [2,0,0,0,0,0,0,0,0,0]; unit norm collapses it back.
		let mut expected = vec![0.0; 10];
		expected[0] = 1.0;
		assert_eq!(embedding.as_slice(), expected.as_slice());
		assert_eq!(embedding.nonzero_count(), 1);
		assert!(!embedding.is_degenerate());
	}

	#[test]
	fn distinct_weights_scale_regions_proportionally() {
		let mut mappings = AttributeMappings::empty();
		mappings.set_table(AttributeKind::SkinTone, vec![("fair", vec![1.0])]);
		mappings.set_table(AttributeKind::Undertone, vec![("cool", vec![1.0])]);
		let layout = FeatureLayout::with_total_len(&mappings, 4);
		let mut weights = WeightTable::uniform();
		weights.set(AttributeKind::SkinTone, 2.0);
		let composer = FeatureComposer::new(mappings, layout, weights);

		let record = AttributeRecord {
			skin_tone: "fair".to_string(),
			under_tone: "cool".to_string(),
			..AttributeRecord::default()
		};
		let embedding = composer.compose(&record);

		// Raw vector is [2, 1, 0, 0]. The ratio between the two regions
		// survives normalization and would read 4.0 if the skin-tone
		// weight were applied twice.
		let ratio = embedding.as_slice()[0] / embedding.as_slice()[1];
		assert!((ratio - 2.0).abs() < 1e-6);
	}

	#[test]
	fn unknown_token_composes_to_degenerate_zero() {
		let embedding = tiny_composer().compose(&record("unknown-token"));
		assert_eq!(embedding.as_slice(), vec![0.0; 10].as_slice());
		assert!(embedding.is_degenerate());
	}

	#[test]
	fn output_length_is_fixed_regardless_of_input() {
		let composer = FeatureComposer::builtin();
		assert_eq!(composer.compose(&AttributeRecord::default()).len(), EMBEDDING_DIM);
		assert_eq!(composer.compose(&record("deep")).len(), EMBEDDING_DIM);
	}

	#[test]
	fn nonempty_input_yields_unit_norm() {
		let composer = FeatureComposer::builtin();
		let full = AttributeRecord {
			skin_tone: "medium".to_string(),
			under_tone: "warm".to_string(),
			coverage_level: "full".to_string(),
			skin_type: "combination".to_string(),
			restrictions: "acne,pores".to_string(),
			lip_product: "gloss".to_string(),
			eye_color: "brown".to_string(),
			makeup_style: "glam".to_string(),
			makeup_frequency: "daily".to_string(),
		};
		let embedding = composer.compose(&full);
		let norm: f32 = embedding.as_slice().iter().map(|x| x * x).sum::<f32>().sqrt();
		assert!((norm - 1.0).abs() < 1e-6);
	}

	#[test]
	fn empty_record_is_the_exact_zero_vector() {
		let composer = FeatureComposer::builtin();
		let embedding = composer.compose(&AttributeRecord::default());
		assert!(embedding.is_degenerate());
		assert_eq!(embedding.nonzero_count(), 0);
		assert!(embedding.as_slice().iter().all(|v| *v == 0.0));
	}

	#[test]
	fn unrecognized_attribute_leaves_its_region_zero() {
		let composer = FeatureComposer::builtin();
		let mixed = AttributeRecord {
			skin_tone: "fair".to_string(),
			eye_color: "violet".to_string(),
			..AttributeRecord::default()
		};
		let embedding = composer.compose(&mixed);
		let region = composer.layout().region(AttributeKind::EyeColor).unwrap();
		let slice = &embedding.as_slice()[region.offset..region.offset + region.len];
		assert!(slice.iter().all(|v| *v == 0.0));
		assert!(!embedding.is_degenerate());
	}

	#[test]
	fn similar_profiles_score_higher_than_distant_ones() {
		let composer = FeatureComposer::builtin();
		let user = composer.compose(&record("fair"));
		let near = composer.compose(&record("light"));
		let far = composer.compose(&record("very-deep"));

		let near_score = crate::embedding::similarity(&user, &near).unwrap();
		let far_score = crate::embedding::similarity(&user, &far).unwrap();
		assert!(near_score > far_score);
	}
}
