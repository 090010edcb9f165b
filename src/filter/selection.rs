//! Biome selection filter, applied to every biome the host selects.
//!
//! Fail-open: a biome the filter cannot identify, or a fallback it cannot
//! find, leaves the host's original choice in place.

use std::sync::Arc;

use crate::filter::{FallbackResolver, FilterEngine, FilterSnapshot};
use crate::generation::source::{BiomeHandle, BiomeSource};

/// Outcome of filtering one selected biome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection<B> {
    /// Original biome kept.
    PassThrough(B),
    /// Original biome was disallowed and replaced by the fallback.
    Substituted(B),
}

impl<B> Selection<B> {
    pub fn into_biome(self) -> B {
        match self {
            Selection::PassThrough(biome) | Selection::Substituted(biome) => biome,
        }
    }

    pub fn is_substituted(&self) -> bool {
        matches!(self, Selection::Substituted(_))
    }
}

/// Filter `original`, which `source` selected.
///
/// The fallback is searched among `source`'s own possible biomes.
pub fn select_biome<S>(
    snapshot: &FilterSnapshot,
    resolver: &FallbackResolver<S::Biome>,
    source: &S,
    original: S::Biome,
) -> Selection<S::Biome>
where
    S: BiomeSource + ?Sized,
{
    if !snapshot.is_filtering_active() {
        return Selection::PassThrough(original);
    }

    let allowed = match original.biome_id() {
        Some(id) => snapshot.is_biome_allowed(id),
        None => true,
    };
    if allowed {
        return Selection::PassThrough(original);
    }

    match resolver.resolve(snapshot, source) {
        Some(fallback) => Selection::Substituted(fallback),
        None => Selection::PassThrough(original),
    }
}

/// A biome source whose selections pass through the filter.
///
/// This is the selection hook: the host generates from the wrapped source
/// instead of its own.
pub struct FilteredBiomeSource<S: BiomeSource> {
    inner: S,
    engine: Arc<FilterEngine>,
    resolver: FallbackResolver<S::Biome>,
}

impl<S: BiomeSource> FilteredBiomeSource<S> {
    pub fn new(inner: S, engine: Arc<FilterEngine>) -> Self {
        Self {
            inner,
            engine,
            resolver: FallbackResolver::new(),
        }
    }

    /// The unfiltered source.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn engine(&self) -> &Arc<FilterEngine> {
        &self.engine
    }

    /// Filter a biome the inner source already selected.
    pub fn filter(&self, original: S::Biome) -> S::Biome {
        let snapshot = self.engine.snapshot();
        select_biome(&snapshot, &self.resolver, &self.inner, original).into_biome()
    }
}

impl<S: BiomeSource> BiomeSource for FilteredBiomeSource<S> {
    type Biome = S::Biome;
    type Sampler = S::Sampler;

    fn noise_biome(&self, quart_x: i32, quart_y: i32, quart_z: i32, sampler: &Self::Sampler) -> Self::Biome {
        let original = self.inner.noise_biome(quart_x, quart_y, quart_z, sampler);
        self.filter(original)
    }

    fn possible_biomes(&self) -> &[Self::Biome] {
        self.inner.possible_biomes()
    }
}
