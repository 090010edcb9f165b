//! Biome identifiers and the caches derived from the configured biome list.

pub mod id;
pub mod filter_cache;
pub mod ocean;

pub use id::{BiomeId, DEFAULT_NAMESPACE};
pub use filter_cache::FilterCache;
pub use ocean::{OceanClassifier, CANONICAL_OCEANS, is_canonical_ocean};
