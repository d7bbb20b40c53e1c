//! # Shadematch
//!
//! Feature-embedding and similarity matching for cosmetic product
//! recommendations. Quiz answers and product attributes are encoded into
//! fixed-layout unit vectors, then candidates are ranked by cosine
//! similarity against a user's vector.
//!
//! Two embedding schemes exist and are deliberately kept apart at the type
//! level: [`ProfileEmbedding`] (fixed layout, stable across sessions) and
//! [`CorpusVector`] (tf-idf, only meaningful within one [`CorpusSpace`]).

pub mod attributes;
pub mod composer;
pub mod config;
pub mod embedding;
pub mod error;
pub mod layout;
pub mod mapping;
pub mod ranking;
pub mod tfidf;

pub use attributes::{AttributeKind, AttributeRecord};
pub use composer::FeatureComposer;
pub use embedding::{similarity, CorpusVector, ProfileEmbedding, SimilarityVector};
pub use error::MatchError;
pub use layout::{FeatureLayout, Region, WeightTable};
pub use mapping::AttributeMappings;
pub use ranking::{rank, rank_top, RankedMatches, ScoredMatch};
pub use tfidf::CorpusSpace;
