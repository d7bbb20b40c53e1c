// Attributes - the nine quiz/product attribute types and their raw records

use serde::{Deserialize, Serialize};

/// The closed set of attribute types covered by the feature layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
	SkinTone,
	Undertone,
	CoverageLevel,
	SkinType,
	Restrictions,
	LipProduct,
	EyeColor,
	MakeupStyle,
	MakeupFrequency,
}

impl AttributeKind {
	/// All kinds in layout order. The order is part of the layout contract:
	/// regions are assigned contiguously by iterating this array.
	pub const ALL: [AttributeKind; 9] = [
		AttributeKind::SkinTone,
		AttributeKind::Undertone,
		AttributeKind::CoverageLevel,
		AttributeKind::SkinType,
		AttributeKind::Restrictions,
		AttributeKind::LipProduct,
		AttributeKind::EyeColor,
		AttributeKind::MakeupStyle,
		AttributeKind::MakeupFrequency,
	];

	/// Column name used by the upstream store.
	pub fn as_str(&self) -> &'static str {
		match self {
			AttributeKind::SkinTone => "skin_tone",
			AttributeKind::Undertone => "under_tone",
			AttributeKind::CoverageLevel => "coverage_level",
			AttributeKind::SkinType => "skin_type",
			AttributeKind::Restrictions => "restrictions",
			AttributeKind::LipProduct => "lip_product",
			AttributeKind::EyeColor => "eye_color",
			AttributeKind::MakeupStyle => "makeup_style",
			AttributeKind::MakeupFrequency => "makeup_frequency",
		}
	}

	/// Whether the raw value holds several comma-separated tokens.
	pub fn is_multi_valued(&self) -> bool {
		matches!(self, AttributeKind::Restrictions)
	}
}

impl std::fmt::Display for AttributeKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// One raw attribute row as delivered by the quiz or product store.
///
/// Every field defaults to the empty string, and unknown fields in the
/// incoming JSON are ignored, so a partially answered quiz or a product row
/// with extra columns still deserializes cleanly. Validation stops at
/// trimming and lowercasing; unrecognized values degrade to zero
/// sub-vectors during composition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRecord {
	#[serde(default)]
	pub skin_tone: String,
	#[serde(default)]
	pub under_tone: String,
	#[serde(default)]
	pub coverage_level: String,
	#[serde(default)]
	pub skin_type: String,
	#[serde(default)]
	pub restrictions: String,
	#[serde(default)]
	pub lip_product: String,
	#[serde(default)]
	pub eye_color: String,
	#[serde(default)]
	pub makeup_style: String,
	#[serde(default)]
	pub makeup_frequency: String,
}

impl AttributeRecord {
	/// Raw value for one attribute kind; empty string when unanswered.
	pub fn value(&self, kind: AttributeKind) -> &str {
		match kind {
			AttributeKind::SkinTone => &self.skin_tone,
			AttributeKind::Undertone => &self.under_tone,
			AttributeKind::CoverageLevel => &self.coverage_level,
			AttributeKind::SkinType => &self.skin_type,
			AttributeKind::Restrictions => &self.restrictions,
			AttributeKind::LipProduct => &self.lip_product,
			AttributeKind::EyeColor => &self.eye_color,
			AttributeKind::MakeupStyle => &self.makeup_style,
			AttributeKind::MakeupFrequency => &self.makeup_frequency,
		}
	}

	/// True when every attribute is empty or whitespace.
	pub fn is_empty(&self) -> bool {
		AttributeKind::ALL
			.iter()
			.all(|kind| self.value(*kind).trim().is_empty())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn deserializes_partial_record_with_extra_fields() {
		let json = r#"{
			"skin_tone": "fair",
			"under_tone": "cool",
			"price": 24.99,
			"image": "https://example.com/p.jpg"
		}"#;

		let record: AttributeRecord = serde_json::from_str(json).unwrap();
		assert_eq!(record.skin_tone, "fair");
		assert_eq!(record.under_tone, "cool");
		assert_eq!(record.coverage_level, "");
		assert!(!record.is_empty());
	}

	#[test]
	fn empty_record_reports_empty() {
		let record = AttributeRecord::default();
		assert!(record.is_empty());

		let mut answered = AttributeRecord::default();
		answered.eye_color = "hazel".to_string();
		assert!(!answered.is_empty());
	}

	#[test]
	fn kind_names_match_store_columns() {
		assert_eq!(AttributeKind::Undertone.as_str(), "under_tone");
		assert_eq!(AttributeKind::MakeupFrequency.as_str(), "makeup_frequency");
		assert!(AttributeKind::Restrictions.is_multi_valued());
		assert!(!AttributeKind::SkinTone.is_multi_valued());
	}
}
