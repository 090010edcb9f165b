//! Host seam for biome selection.
//!
//! The host's biome source is reached through [`BiomeSource`]; the handles it
//! returns are opaque to the filter except for an optional identifier.

use crate::biome::BiomeId;

/// A biome value as handed out by the host.
///
/// `biome_id` returns `None` for handles the host never registered; such
/// biomes are always allowed and never classified as ocean.
pub trait BiomeHandle: Clone + Send + Sync {
    fn biome_id(&self) -> Option<&BiomeId>;
}

impl BiomeHandle for BiomeId {
    fn biome_id(&self) -> Option<&BiomeId> {
        Some(self)
    }
}

/// A source of biomes: the host's per-coordinate selection plus the list of
/// biomes it can ever produce.
///
/// Coordinates are in quart (4-block) units, as in chunk biome storage.
pub trait BiomeSource: Send + Sync {
    type Biome: BiomeHandle;
    /// Deterministic sampler the host threads through selection.
    type Sampler: ?Sized;

    /// Biome at quart coordinates.
    fn noise_biome(&self, quart_x: i32, quart_y: i32, quart_z: i32, sampler: &Self::Sampler) -> Self::Biome;

    /// Every biome this source can produce.
    fn possible_biomes(&self) -> &[Self::Biome];
}

impl<S: BiomeSource + ?Sized> BiomeSource for &S {
    type Biome = S::Biome;
    type Sampler = S::Sampler;

    fn noise_biome(&self, quart_x: i32, quart_y: i32, quart_z: i32, sampler: &Self::Sampler) -> Self::Biome {
        (**self).noise_biome(quart_x, quart_y, quart_z, sampler)
    }

    fn possible_biomes(&self) -> &[Self::Biome] {
        (**self).possible_biomes()
    }
}

/// Block to quart coordinate conversion.
pub mod quart {
    /// Quart coordinate containing block coordinate `block`.
    pub fn from_block(block: i32) -> i32 {
        block >> 2
    }

    /// First block coordinate of quart `quart`.
    pub fn to_block(quart: i32) -> i32 {
        quart << 2
    }
}

/// Registry-backed biome handle: a numeric registry index plus the
/// identifier it was registered under, if any.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RegistryBiome {
    index: u16,
    id: Option<BiomeId>,
}

impl RegistryBiome {
    pub fn registered(index: u16, id: BiomeId) -> Self {
        Self { index, id: Some(id) }
    }

    /// A direct (unregistered) biome with no identifier.
    pub fn unregistered(index: u16) -> Self {
        Self { index, id: None }
    }

    pub fn index(&self) -> u16 {
        self.index
    }
}

impl BiomeHandle for RegistryBiome {
    fn biome_id(&self) -> Option<&BiomeId> {
        self.id.as_ref()
    }
}

/// Source returning one biome everywhere. Used for single-biome worlds and tests.
#[derive(Clone, Debug)]
pub struct FixedBiomeSource<B> {
    biome: [B; 1],
}

impl<B: BiomeHandle> FixedBiomeSource<B> {
    pub fn new(biome: B) -> Self {
        Self { biome: [biome] }
    }
}

impl<B: BiomeHandle> BiomeSource for FixedBiomeSource<B> {
    type Biome = B;
    type Sampler = ();

    fn noise_biome(&self, _quart_x: i32, _quart_y: i32, _quart_z: i32, _sampler: &()) -> B {
        self.biome[0].clone()
    }

    fn possible_biomes(&self) -> &[B] {
        &self.biome
    }
}
