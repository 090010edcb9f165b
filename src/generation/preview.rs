//! Noise-driven stand-in host used by the preview tool, tests and benches.
//!
//! It plays the part of the host generator: a biome source keyed on terrain
//! height, temperature and moisture, plus a base fill (bedrock, deepslate,
//! stone, water). Output is deterministic per seed.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use crate::biome::BiomeId;
use crate::config::{WorldSettings, DEFAULT_SEA_LEVEL};
use crate::filter::FilterSnapshot;
use crate::generation::chunk::{ChunkAccess, ChunkPos, ProtoChunk, CHUNK_WIDTH};
use crate::generation::source::{quart, BiomeSource, RegistryBiome};

/// Biomes the preview source can produce, in registry order.
pub const PREVIEW_BIOMES: [&str; 18] = [
    "plains",
    "forest",
    "desert",
    "savanna",
    "jungle",
    "swamp",
    "taiga",
    "snowy_plains",
    "beach",
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

/// Parameters controlling the preview terrain
#[derive(Clone, Debug)]
pub struct PreviewParams {
    pub seed: u32,
    pub scale: f64,        // Horizontal scale (larger = smoother)
    pub base_height: i32,  // Lowest terrain height
    pub height_scale: f64, // Height range above base
    pub octaves: usize,    // FBM octaves
    pub sea_level: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Default for PreviewParams {
    fn default() -> Self {
        let world = WorldSettings::default();
        Self {
            seed: 12345,
            scale: 400.0,
            base_height: 20,
            height_scale: 100.0,
            octaves: 5,
            sea_level: DEFAULT_SEA_LEVEL,
            min_y: world.min_y(),
            max_y: world.max_y(),
        }
    }
}

impl PreviewParams {
    /// Params for a host running under `snapshot`: the configured build
    /// height and the sea level flattening will use.
    pub fn for_snapshot(snapshot: &FilterSnapshot, host_sea_level: i32, seed: u32) -> Self {
        Self {
            seed,
            sea_level: snapshot.resolve_sea_level(host_sea_level),
            min_y: snapshot.world().min_y(),
            max_y: snapshot.world().max_y(),
            ..Self::default()
        }
    }
}

/// Stand-in host world: biome source plus base terrain fill.
pub struct PreviewWorld {
    params: PreviewParams,
    terrain: Fbm<Perlin>,
    temperature: Perlin,
    moisture: Perlin,
    biomes: Vec<RegistryBiome>,
}

impl PreviewWorld {
    pub fn new(params: PreviewParams) -> Self {
        let terrain = Fbm::<Perlin>::new(params.seed)
            .set_octaves(params.octaves)
            .set_persistence(0.5)
            .set_lacunarity(2.0);
        let biomes = PREVIEW_BIOMES
            .iter()
            .enumerate()
            .map(|(i, path)| RegistryBiome::registered(i as u16, BiomeId::vanilla(path)))
            .collect();

        Self {
            temperature: Perlin::new(params.seed.wrapping_add(1000)),
            moisture: Perlin::new(params.seed.wrapping_add(2000)),
            params,
            terrain,
            biomes,
        }
    }

    pub fn params(&self) -> &PreviewParams {
        &self.params
    }

    /// Terrain surface height at block (x, z)
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        let nx = x as f64 / self.params.scale;
        let nz = z as f64 / self.params.scale;
        let normalized = ((self.terrain.get([nx, nz]) + 1.0) * 0.5).clamp(0.0, 1.0);
        self.params.base_height + (normalized * self.params.height_scale) as i32
    }

    /// Temperature at block (x, z), -1 cold to 1 hot
    fn temperature_at(&self, x: i32, z: i32) -> f64 {
        self.temperature.get([x as f64 * 0.002, z as f64 * 0.002])
    }

    /// Moisture at block (x, z), 0 dry to 1 wet
    fn moisture_at(&self, x: i32, z: i32) -> f64 {
        (self.moisture.get([x as f64 * 0.003, z as f64 * 0.003]) + 1.0) * 0.5
    }

    fn biome(&self, path: &str) -> RegistryBiome {
        let index = PREVIEW_BIOMES.iter().position(|p| *p == path).unwrap_or(0);
        self.biomes[index].clone()
    }

    /// Biome path at block (x, z) from height, temperature and moisture.
    fn biome_path_at(&self, x: i32, z: i32) -> &'static str {
        let height = self.height_at(x, z);
        let sea = self.params.sea_level;
        let temp = self.temperature_at(x, z);
        let moisture = self.moisture_at(x, z);

        if height < sea - 2 {
            let deep = height < sea - 20;
            return match (temp, deep) {
                (t, false) if t < -0.4 => "frozen_ocean",
                (t, true) if t < -0.4 => "deep_frozen_ocean",
                (t, false) if t < -0.1 => "cold_ocean",
                (t, true) if t < -0.1 => "deep_cold_ocean",
                (t, _) if t > 0.4 => "warm_ocean",
                (t, false) if t > 0.15 => "lukewarm_ocean",
                (t, true) if t > 0.15 => "deep_lukewarm_ocean",
                (_, false) => "ocean",
                (_, true) => "deep_ocean",
            };
        }
        if height <= sea + 1 {
            return "beach";
        }

        match (temp, moisture) {
            (t, m) if t < -0.3 => if m > 0.5 { "taiga" } else { "snowy_plains" },
            (t, m) if t > 0.3 => {
                if m > 0.6 {
                    "jungle"
                } else if m > 0.3 {
                    "savanna"
                } else {
                    "desert"
                }
            }
            (_, m) => {
                if m > 0.7 {
                    "swamp"
                } else if m > 0.45 {
                    "forest"
                } else {
                    "plains"
                }
            }
        }
    }

    /// Empty chunk spanning the world's build height.
    pub fn new_chunk(&self, pos: ChunkPos) -> ProtoChunk<&'static str> {
        ProtoChunk::new(pos, self.params.min_y, self.params.max_y, "minecraft:air")
    }

    /// Base fill: bedrock floor, deepslate below 0, stone to the surface,
    /// water up to sea level.
    pub fn fill_chunk(&self, chunk: &mut ProtoChunk<&'static str>) {
        let pos = chunk.pos();
        let min_y = chunk.min_build_height();
        let sea = self.params.sea_level;

        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                let height = self.height_at(pos.min_block_x() + x as i32, pos.min_block_z() + z as i32);
                chunk.set_block(x, min_y, z, "minecraft:bedrock");
                chunk.fill_column(x, z, min_y + 1, 0.min(height + 1), "minecraft:deepslate");
                chunk.fill_column(x, z, 0.max(min_y + 1), height + 1, "minecraft:stone");
                if height < sea {
                    chunk.fill_column(x, z, height + 1, sea + 1, "minecraft:water");
                }
            }
        }
    }
}

impl BiomeSource for PreviewWorld {
    type Biome = RegistryBiome;
    type Sampler = ();

    fn noise_biome(&self, quart_x: i32, _quart_y: i32, quart_z: i32, _sampler: &()) -> RegistryBiome {
        // Sample at the centre of the quart cell
        let x = quart::to_block(quart_x) + 2;
        let z = quart::to_block(quart_z) + 2;
        self.biome(self.biome_path_at(x, z))
    }

    fn possible_biomes(&self) -> &[RegistryBiome] {
        &self.biomes
    }
}
