//! Ocean classifier: which biomes count as ocean-like for flattening.

use std::collections::HashSet;

use crate::biome::id::BiomeId;

/// Vanilla ocean biome paths, always classified as ocean.
pub const CANONICAL_OCEANS: [&str; 9] = [
    "ocean",
    "deep_ocean",
    "warm_ocean",
    "lukewarm_ocean",
    "deep_lukewarm_ocean",
    "cold_ocean",
    "deep_cold_ocean",
    "frozen_ocean",
    "deep_frozen_ocean",
];

/// Name fragment that marks a configured biome as ocean-like (case-sensitive).
const OCEAN_MARKER: &str = "ocean";

/// True for the nine vanilla ocean biomes.
pub fn is_canonical_ocean(id: &BiomeId) -> bool {
    id.is_vanilla() && CANONICAL_OCEANS.contains(&id.path())
}

/// Derived set of ocean-like biomes from the configured list.
#[derive(Clone, Debug, Default)]
pub struct OceanClassifier {
    derived: HashSet<BiomeId>,
}

impl OceanClassifier {
    /// Flag every configured biome that is canonical or whose path mentions "ocean".
    pub fn rebuild<'a>(configured: impl IntoIterator<Item = &'a BiomeId>) -> Self {
        let derived = configured
            .into_iter()
            .filter(|id| is_canonical_ocean(id) || id.path().contains(OCEAN_MARKER))
            .cloned()
            .collect();
        Self { derived }
    }

    /// Canonical oceans classify as ocean whether or not they were configured.
    pub fn is_ocean(&self, id: &BiomeId) -> bool {
        is_canonical_ocean(id) || self.derived.contains(id)
    }

    /// Number of configured biomes flagged ocean-like.
    pub fn len(&self) -> usize {
        self.derived.len()
    }

    pub fn is_empty(&self) -> bool {
        self.derived.is_empty()
    }
}
