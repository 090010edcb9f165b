//! Filter engine: immutable snapshots built from settings and swapped
//! atomically on reload.
//!
//! Generation workers call [`FilterEngine::snapshot`] and work against that
//! snapshot for the rest of the call. A reload builds the complete next
//! snapshot first and only then publishes it, so no reader ever sees a new
//! biome list paired with a stale ocean set.

pub mod fallback;
pub mod selection;

pub use fallback::FallbackResolver;
pub use selection::{select_biome, FilteredBiomeSource, Selection};

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::biome::{BiomeId, FilterCache, OceanClassifier};
use crate::config::{FilterMode, FilterSettings, WorldSettings, DEFAULT_SEA_LEVEL};
use crate::core::Result;

/// Fallback used when neither the settings nor the whitelist provide one.
pub const DEFAULT_FALLBACK_BIOME: &str = "plains";

/// Everything derived from one settings load. Read-only once built.
#[derive(Debug)]
pub struct FilterSnapshot {
    generation: u64,
    mode: FilterMode,
    biomes: FilterCache,
    oceans: OceanClassifier,
    fallback: BiomeId,
    force_flat_ocean: bool,
    ocean_floor_level: i32,
    world: WorldSettings,
    floor_warned: AtomicBool,
}

impl FilterSnapshot {
    /// Build a snapshot. Invalid biome identifiers are dropped with a warning.
    pub fn build(settings: &FilterSettings, generation: u64) -> Self {
        let biomes = FilterCache::rebuild(settings.biomes.as_slice());
        let oceans = OceanClassifier::rebuild(biomes.list());
        let fallback = select_fallback(settings, &biomes);

        if !biomes.is_allowed(&fallback, settings.mode) {
            log::warn!(
                "Fallback biome {} is itself filtered out by {:?} mode",
                fallback, settings.mode
            );
        }

        log::info!(
            "Biome filter loaded - generation: {}, mode: {:?}, biomes: {}, oceans: {}, fallback: {}, flat ocean: {} (floor {}), sea: {}, bedrock: {}, max height: {}",
            generation,
            settings.mode,
            biomes.len(),
            oceans.len(),
            fallback,
            settings.force_flat_ocean,
            settings.ocean_floor_level,
            settings.world.sea_level,
            settings.world.bedrock_level,
            settings.world.max_height,
        );

        Self {
            generation,
            mode: settings.mode,
            biomes,
            oceans,
            fallback,
            force_flat_ocean: settings.force_flat_ocean,
            ocean_floor_level: settings.ocean_floor_level,
            world: settings.world.clone(),
            floor_warned: AtomicBool::new(false),
        }
    }

    /// Build number; increases with every reload of the owning engine.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn biomes(&self) -> &FilterCache {
        &self.biomes
    }

    pub fn oceans(&self) -> &OceanClassifier {
        &self.oceans
    }

    /// Filtering is active unless the mode is disabled or the list is empty.
    pub fn is_filtering_active(&self) -> bool {
        self.biomes.is_filtering_active(self.mode)
    }

    pub fn is_biome_allowed(&self, id: &BiomeId) -> bool {
        self.biomes.is_allowed(id, self.mode)
    }

    pub fn is_ocean_biome(&self, id: &BiomeId) -> bool {
        self.oceans.is_ocean(id)
    }

    /// Biome substituted for disallowed ones.
    pub fn fallback_biome(&self) -> &BiomeId {
        &self.fallback
    }

    pub fn is_flat_ocean_enabled(&self) -> bool {
        self.force_flat_ocean
    }

    pub fn ocean_floor_level(&self) -> i32 {
        self.ocean_floor_level
    }

    /// Warn, once per snapshot, when the ocean floor sits above the sea level
    /// flattening resolved to. Validation only covers the configured sea level.
    pub(crate) fn check_floor_below(&self, sea_level: i32) {
        if self.ocean_floor_level > sea_level && !self.floor_warned.swap(true, Ordering::Relaxed) {
            log::warn!(
                "Ocean floor {} is above resolved sea level {}, flattened oceans will have no water or floor",
                self.ocean_floor_level, sea_level
            );
        }
    }

    pub fn world(&self) -> &WorldSettings {
        &self.world
    }

    /// Sea level to generate with: the configured value when it differs from
    /// vanilla, otherwise whatever the host resolved.
    pub fn resolve_sea_level(&self, host_sea_level: i32) -> i32 {
        if self.world.sea_level != DEFAULT_SEA_LEVEL {
            self.world.sea_level
        } else {
            host_sea_level
        }
    }
}

/// Explicit fallback if it parses and is allowed, else the first whitelisted
/// biome, else `minecraft:plains`.
fn select_fallback(settings: &FilterSettings, biomes: &FilterCache) -> BiomeId {
    if let Some(raw) = settings.fallback_biome.as_deref() {
        match BiomeId::parse(raw) {
            Some(id) if biomes.is_allowed(&id, settings.mode) => return id,
            Some(id) => log::warn!("Fallback biome {} is not allowed, ignoring it", id),
            None => log::warn!("Ignoring invalid fallback biome identifier {:?}", raw),
        }
    }

    if settings.mode == FilterMode::Whitelist {
        if let Some(first) = biomes.first() {
            return first.clone();
        }
    }

    BiomeId::vanilla(DEFAULT_FALLBACK_BIOME)
}

/// Owner of the current snapshot.
pub struct FilterEngine {
    current: RwLock<Arc<FilterSnapshot>>,
    generation: AtomicU64,
}

impl FilterEngine {
    /// Create an engine from validated settings.
    pub fn new(settings: &FilterSettings) -> Result<Self> {
        settings.validate()?;
        let snapshot = FilterSnapshot::build(settings, 1);
        Ok(Self {
            current: RwLock::new(Arc::new(snapshot)),
            generation: AtomicU64::new(1),
        })
    }

    /// Load settings from a JSON file and create an engine.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::new(&FilterSettings::load(path)?)
    }

    /// The snapshot current at call time.
    pub fn snapshot(&self) -> Arc<FilterSnapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Rebuild from `settings` and publish the result.
    ///
    /// Invalid settings leave the current snapshot in place.
    pub fn reload(&self, settings: &FilterSettings) -> Result<Arc<FilterSnapshot>> {
        settings.validate()?;

        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        let snapshot = Arc::new(FilterSnapshot::build(settings, generation));

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        // Concurrent reloads may finish out of order; newest build wins
        if snapshot.generation > current.generation {
            *current = Arc::clone(&snapshot);
        }
        drop(current);

        log::info!("Biome filter reloaded (generation {})", generation);
        Ok(snapshot)
    }

    /// Reload from a JSON settings file.
    pub fn reload_from_file(&self, path: &Path) -> Result<Arc<FilterSnapshot>> {
        match FilterSettings::load(path) {
            Ok(settings) => self.reload(&settings),
            Err(e) => {
                log::warn!("Keeping previous biome filter, failed to load {}: {}", path.display(), e);
                Err(e)
            }
        }
    }

    pub fn is_filtering_active(&self) -> bool {
        self.snapshot().is_filtering_active()
    }

    pub fn is_biome_allowed(&self, id: &BiomeId) -> bool {
        self.snapshot().is_biome_allowed(id)
    }

    pub fn is_ocean_biome(&self, id: &BiomeId) -> bool {
        self.snapshot().is_ocean_biome(id)
    }

    pub fn fallback_biome(&self) -> BiomeId {
        self.snapshot().fallback_biome().clone()
    }
}
