//! Hook registration: the two seams the host wires into its pipeline.
//!
//! 1. Biome selection: generate from [`GenerationHooks::wrap_source`] instead of
//!    the raw biome source.
//! 2. Post-fill: call [`GenerationHooks::after_fill`] once per chunk after the
//!    initial terrain fill and before decoration.

use std::sync::Arc;

use crate::filter::{select_biome, FallbackResolver, FilterEngine, FilteredBiomeSource};
use crate::generation::chunk::ChunkAccess;
use crate::generation::flatten::{flatten_chunk, FlattenPalette};
use crate::generation::source::BiomeSource;

/// Generation callbacks bound to one filter engine and block palette.
pub struct GenerationHooks<B> {
    engine: Arc<FilterEngine>,
    palette: FlattenPalette<B>,
}

impl<B: Clone> GenerationHooks<B> {
    pub fn new(engine: Arc<FilterEngine>, palette: FlattenPalette<B>) -> Self {
        Self { engine, palette }
    }

    pub fn engine(&self) -> &Arc<FilterEngine> {
        &self.engine
    }

    pub fn palette(&self) -> &FlattenPalette<B> {
        &self.palette
    }

    /// Selection hook for hosts that intercept each selection themselves
    /// rather than generating from a wrapped source.
    ///
    /// `resolver` should live as long as `source` so the fallback memo is reused.
    pub fn on_biome_selected<S: BiomeSource + ?Sized>(
        &self,
        resolver: &FallbackResolver<S::Biome>,
        source: &S,
        original: S::Biome,
    ) -> S::Biome {
        select_biome(&self.engine.snapshot(), resolver, source, original).into_biome()
    }

    /// Selection hook: wrap a host biome source so every selection is filtered.
    pub fn wrap_source<S: BiomeSource>(&self, source: S) -> FilteredBiomeSource<S> {
        FilteredBiomeSource::new(source, Arc::clone(&self.engine))
    }

    /// Post-fill hook: flatten ocean columns of a freshly filled chunk.
    ///
    /// `source` should be the same (filtered) source the host filled from.
    /// Returns the number of columns rewritten.
    pub fn after_fill<C, S>(
        &self,
        chunk: &mut C,
        source: &S,
        sampler: &S::Sampler,
        host_sea_level: i32,
    ) -> usize
    where
        C: ChunkAccess<Block = B>,
        S: BiomeSource + ?Sized,
    {
        let snapshot = self.engine.snapshot();
        flatten_chunk(&snapshot, chunk, source, sampler, host_sea_level, &self.palette)
    }
}
