//! Category filter cache: the parsed biome list plus a set for membership.
//!
//! Rebuilt wholesale from the raw configured strings on every settings load.
//! Malformed entries are dropped with a warning and never fail the rebuild.

use std::collections::HashSet;

use crate::biome::id::BiomeId;
use crate::config::FilterMode;

/// Parsed biome list in configured order, with O(1) membership.
#[derive(Clone, Debug, Default)]
pub struct FilterCache {
    set: HashSet<BiomeId>,
    list: Vec<BiomeId>,
}

impl FilterCache {
    /// Build from raw identifier strings.
    pub fn rebuild<S: AsRef<str>>(entries: &[S]) -> Self {
        let mut set = HashSet::with_capacity(entries.len());
        let mut list = Vec::with_capacity(entries.len());

        for entry in entries {
            let raw = entry.as_ref();
            match BiomeId::parse(raw) {
                Some(id) => {
                    set.insert(id.clone());
                    list.push(id);
                }
                None => log::warn!("Ignoring invalid biome identifier {:?}", raw),
            }
        }

        Self { set, list }
    }

    /// Build from already-parsed identifiers.
    pub fn from_ids(ids: impl IntoIterator<Item = BiomeId>) -> Self {
        let list: Vec<BiomeId> = ids.into_iter().collect();
        let set = list.iter().cloned().collect();
        Self { set, list }
    }

    /// Number of distinct biomes.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn contains(&self, id: &BiomeId) -> bool {
        self.set.contains(id)
    }

    /// Biomes in configured order (duplicates preserved).
    pub fn list(&self) -> &[BiomeId] {
        &self.list
    }

    /// First configured biome, the default fallback in whitelist mode.
    pub fn first(&self) -> Option<&BiomeId> {
        self.list.first()
    }

    /// Filtering only applies with a non-disabled mode and a non-empty list.
    pub fn is_filtering_active(&self, mode: FilterMode) -> bool {
        mode != FilterMode::Disabled && !self.is_empty()
    }

    /// Whether `id` may generate under `mode`.
    pub fn is_allowed(&self, id: &BiomeId, mode: FilterMode) -> bool {
        if !self.is_filtering_active(mode) {
            return true;
        }
        match mode {
            FilterMode::Whitelist => self.contains(id),
            FilterMode::Blacklist => !self.contains(id),
            FilterMode::Disabled => true,
        }
    }
}
