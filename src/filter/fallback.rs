//! Fallback resolution: find the host's handle for the configured fallback
//! biome and remember it.
//!
//! Each biome source owns one resolver. The memo is keyed by the snapshot
//! generation as well as the identifier, so a reload always forces a fresh
//! lookup even when the fallback identifier did not change.

use std::sync::{PoisonError, RwLock};

use crate::biome::BiomeId;
use crate::filter::FilterSnapshot;
use crate::generation::source::{BiomeHandle, BiomeSource};

#[derive(Debug)]
struct Memo<B> {
    generation: u64,
    key: BiomeId,
    biome: B,
}

/// Memoizing lookup of the fallback biome handle.
#[derive(Debug)]
pub struct FallbackResolver<B> {
    memo: RwLock<Option<Memo<B>>>,
}

impl<B: BiomeHandle> Default for FallbackResolver<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: BiomeHandle> FallbackResolver<B> {
    pub fn new() -> Self {
        Self { memo: RwLock::new(None) }
    }

    /// Resolve the snapshot's fallback biome among `source`'s possible biomes.
    pub fn resolve<S>(&self, snapshot: &FilterSnapshot, source: &S) -> Option<B>
    where
        S: BiomeSource<Biome = B> + ?Sized,
    {
        self.resolve_with(snapshot.fallback_biome(), snapshot.generation(), || {
            source.possible_biomes()
        })
    }

    /// Resolve `configured` for snapshot `generation`.
    ///
    /// `available` is only called on a memo miss. A miss that finds nothing
    /// logs a warning, returns `None` and leaves the memo empty.
    pub fn resolve_with<'a, F>(&self, configured: &BiomeId, generation: u64, available: F) -> Option<B>
    where
        F: FnOnce() -> &'a [B],
        B: 'a,
    {
        if let Some(hit) = self.cached(configured, generation) {
            return Some(hit);
        }

        let found = available()
            .iter()
            .find(|biome| biome.biome_id() == Some(configured))
            .cloned();

        match found {
            Some(biome) => {
                let mut memo = self.memo.write().unwrap_or_else(PoisonError::into_inner);
                *memo = Some(Memo {
                    generation,
                    key: configured.clone(),
                    biome: biome.clone(),
                });
                Some(biome)
            }
            None => {
                log::warn!(
                    "Fallback biome {} not found in biome source's possible biomes",
                    configured
                );
                None
            }
        }
    }

    /// Drop the memoized handle.
    pub fn invalidate(&self) {
        *self.memo.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn cached(&self, configured: &BiomeId, generation: u64) -> Option<B> {
        let memo = self.memo.read().unwrap_or_else(PoisonError::into_inner);
        memo.as_ref()
            .filter(|m| m.generation == generation && m.key == *configured)
            .map(|m| m.biome.clone())
    }
}
