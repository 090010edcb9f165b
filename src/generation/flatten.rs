//! Ocean column flattening, run after a chunk's initial fill.
//!
//! Every column whose biome at sea level is ocean-like is rewritten top-down:
//! air above sea level, water down to just above the floor, one layer of floor
//! material at the floor level. Blocks below the floor keep whatever the base
//! generator placed there.

use crate::filter::FilterSnapshot;
use crate::generation::chunk::{ChunkAccess, CHUNK_WIDTH};
use crate::generation::source::{quart, BiomeHandle, BiomeSource};

/// Blocks per quart cell side.
const QUART_SIZE: usize = 4;
/// Quart cells per chunk side.
const QUARTS_PER_CHUNK: usize = CHUNK_WIDTH / QUART_SIZE;

/// Materials written into flattened columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlattenPalette<B> {
    pub air: B,
    pub water: B,
    pub floor: B,
}

impl FlattenPalette<&'static str> {
    /// Vanilla block names: air, water and a gravel floor.
    pub fn vanilla() -> Self {
        Self {
            air: "minecraft:air",
            water: "minecraft:water",
            floor: "minecraft:gravel",
        }
    }
}

/// What a flattened column holds at one height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Air,
    Water,
    Floor,
    /// Below the floor: left as generated
    Keep,
}

impl Layer {
    /// Layer at `y` for the given sea level and floor.
    pub fn at(y: i32, sea_level: i32, ocean_floor: i32) -> Self {
        if y > sea_level {
            Layer::Air
        } else if y > ocean_floor {
            Layer::Water
        } else if y == ocean_floor {
            Layer::Floor
        } else {
            Layer::Keep
        }
    }

    fn block<'p, B>(&self, palette: &'p FlattenPalette<B>) -> Option<&'p B> {
        match self {
            Layer::Air => Some(&palette.air),
            Layer::Water => Some(&palette.water),
            Layer::Floor => Some(&palette.floor),
            Layer::Keep => None,
        }
    }
}

/// Rewrite one column. Heights outside the chunk's build range are never touched.
pub fn flatten_column<C: ChunkAccess>(
    chunk: &mut C,
    x: usize,
    z: usize,
    sea_level: i32,
    ocean_floor: i32,
    palette: &FlattenPalette<C::Block>,
) {
    let min_y = chunk.min_build_height();
    let max_y = chunk.max_build_height();

    for y in (ocean_floor.max(min_y)..max_y).rev() {
        if let Some(block) = Layer::at(y, sea_level, ocean_floor).block(palette) {
            chunk.set_block(x, y, z, block.clone());
        }
    }
}

/// Flatten every ocean column of `chunk`.
///
/// Biomes are sampled from `source` at the resolved sea level, once per quart
/// cell since all columns in a cell share a biome. Does nothing unless the
/// snapshot enables flat oceans. Returns the number of columns rewritten.
pub fn flatten_chunk<C, S>(
    snapshot: &FilterSnapshot,
    chunk: &mut C,
    source: &S,
    sampler: &S::Sampler,
    host_sea_level: i32,
    palette: &FlattenPalette<C::Block>,
) -> usize
where
    C: ChunkAccess,
    S: BiomeSource + ?Sized,
{
    if !snapshot.is_flat_ocean_enabled() {
        return 0;
    }

    let sea_level = snapshot.resolve_sea_level(host_sea_level);
    let ocean_floor = snapshot.ocean_floor_level();
    snapshot.check_floor_below(sea_level);
    let pos = chunk.pos();
    let quart_y = quart::from_block(sea_level);

    let mut ocean = [[false; QUARTS_PER_CHUNK]; QUARTS_PER_CHUNK];
    for (qx, row) in ocean.iter_mut().enumerate() {
        for (qz, cell) in row.iter_mut().enumerate() {
            let biome = source.noise_biome(
                quart::from_block(pos.min_block_x() + (qx * QUART_SIZE) as i32),
                quart_y,
                quart::from_block(pos.min_block_z() + (qz * QUART_SIZE) as i32),
                sampler,
            );
            *cell = biome.biome_id().is_some_and(|id| snapshot.is_ocean_biome(id));
        }
    }

    let mut flattened = 0;
    for x in 0..CHUNK_WIDTH {
        for z in 0..CHUNK_WIDTH {
            if ocean[x / QUART_SIZE][z / QUART_SIZE] {
                flatten_column(chunk, x, z, sea_level, ocean_floor, palette);
                flattened += 1;
            }
        }
    }

    log::debug!(
        "Flattened {} ocean columns in chunk ({}, {})",
        flattened, pos.x, pos.z
    );
    flattened
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::BiomeId;
    use crate::config::FilterSettings;
    use crate::core::logging::capture;
    use crate::generation::chunk::{ChunkPos, ProtoChunk};
    use crate::generation::source::{FixedBiomeSource, RegistryBiome};

    const MIN_Y: i32 = -64;
    const MAX_Y: i32 = 320;

    fn flat_settings(floor: i32) -> FilterSnapshot {
        let mut settings = FilterSettings::default();
        settings.force_flat_ocean = true;
        settings.ocean_floor_level = floor;
        FilterSnapshot::build(&settings, 1)
    }

    /// Host-style fill: stone up to y=80, deepslate below 0.
    fn filled_chunk(pos: ChunkPos) -> ProtoChunk<&'static str> {
        let mut chunk = ProtoChunk::new(pos, MIN_Y, MAX_Y, "minecraft:air");
        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                chunk.fill_column(x, z, MIN_Y, 0, "minecraft:deepslate");
                chunk.fill_column(x, z, 0, 81, "minecraft:stone");
            }
        }
        chunk
    }

    /// Ocean where block x < 8, plains elsewhere.
    struct HalfOceanSource {
        biomes: [BiomeId; 2],
    }

    impl BiomeSource for HalfOceanSource {
        type Biome = BiomeId;
        type Sampler = ();

        fn noise_biome(&self, quart_x: i32, _quart_y: i32, _quart_z: i32, _sampler: &()) -> BiomeId {
            if quart::to_block(quart_x).rem_euclid(16) < 8 {
                self.biomes[0].clone()
            } else {
                self.biomes[1].clone()
            }
        }

        fn possible_biomes(&self) -> &[BiomeId] {
            &self.biomes
        }
    }

    #[test]
    fn test_layer_rule() {
        assert_eq!(Layer::at(64, 63, 48), Layer::Air);
        assert_eq!(Layer::at(63, 63, 48), Layer::Water);
        assert_eq!(Layer::at(49, 63, 48), Layer::Water);
        assert_eq!(Layer::at(48, 63, 48), Layer::Floor);
        assert_eq!(Layer::at(47, 63, 48), Layer::Keep);
        // Floor at sea level: no water layer
        assert_eq!(Layer::at(63, 63, 63), Layer::Floor);
    }

    #[test]
    fn test_ocean_column_layers() {
        let snapshot = flat_settings(48);
        let before = filled_chunk(ChunkPos::new(3, -2));
        let mut chunk = before.clone();
        let source = FixedBiomeSource::new(BiomeId::vanilla("deep_ocean"));

        let count = flatten_chunk(&snapshot, &mut chunk, &source, &(), 63, &FlattenPalette::vanilla());
        assert_eq!(count, 256);

        for (x, z) in [(0, 0), (7, 9), (15, 15)] {
            for y in 64..MAX_Y {
                assert_eq!(chunk.block(x, y, z), Some("minecraft:air"), "y={}", y);
            }
            for y in 49..=63 {
                assert_eq!(chunk.block(x, y, z), Some("minecraft:water"), "y={}", y);
            }
            assert_eq!(chunk.block(x, 48, z), Some("minecraft:gravel"));
            for y in MIN_Y..48 {
                assert_eq!(chunk.block(x, y, z), before.block(x, y, z), "y={}", y);
            }
        }
    }

    #[test]
    fn test_land_columns_untouched() {
        let snapshot = flat_settings(48);
        let before = filled_chunk(ChunkPos::new(0, 0));
        let mut chunk = before.clone();
        let source = FixedBiomeSource::new(BiomeId::vanilla("plains"));

        let count = flatten_chunk(&snapshot, &mut chunk, &source, &(), 63, &FlattenPalette::vanilla());
        assert_eq!(count, 0);
        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                assert_eq!(chunk.column(x, z), before.column(x, z));
            }
        }
    }

    #[test]
    fn test_disabled_toggle_does_nothing() {
        let snapshot = FilterSnapshot::build(&FilterSettings::default(), 1);
        let before = filled_chunk(ChunkPos::new(0, 0));
        let mut chunk = before.clone();
        let source = FixedBiomeSource::new(BiomeId::vanilla("ocean"));

        let count = flatten_chunk(&snapshot, &mut chunk, &source, &(), 63, &FlattenPalette::vanilla());
        assert_eq!(count, 0);
        assert_eq!(chunk.column(4, 4), before.column(4, 4));
    }

    #[test]
    fn test_mixed_chunk_flattens_ocean_half() {
        let snapshot = flat_settings(40);
        let before = filled_chunk(ChunkPos::new(-1, 5));
        let mut chunk = before.clone();
        let source = HalfOceanSource {
            biomes: [BiomeId::vanilla("cold_ocean"), BiomeId::vanilla("plains")],
        };

        let count = flatten_chunk(&snapshot, &mut chunk, &source, &(), 63, &FlattenPalette::vanilla());
        assert_eq!(count, 8 * 16);
        assert_eq!(chunk.block(3, 40, 3), Some("minecraft:gravel"));
        assert_eq!(chunk.block(3, 70, 3), Some("minecraft:air"));
        assert_eq!(chunk.block(12, 40, 3), Some("minecraft:stone"));
        assert_eq!(chunk.block(12, 70, 3), Some("minecraft:stone"));
    }

    #[test]
    fn test_nothing_written_below_floor() {
        let snapshot = flat_settings(10);
        let mut before = filled_chunk(ChunkPos::new(0, 0));
        for y in MIN_Y..10 {
            before.set_block(2, y, 2, if y % 2 == 0 { "minecraft:diorite" } else { "minecraft:coal_ore" });
        }
        let mut chunk = before.clone();
        let source = FixedBiomeSource::new(BiomeId::vanilla("warm_ocean"));

        flatten_chunk(&snapshot, &mut chunk, &source, &(), 63, &FlattenPalette::vanilla());
        assert_eq!(&chunk.column(2, 2)[..(10 - MIN_Y) as usize], &before.column(2, 2)[..(10 - MIN_Y) as usize]);
    }

    #[test]
    fn test_configured_sea_level_override() {
        let mut settings = FilterSettings::default();
        settings.force_flat_ocean = true;
        settings.world.sea_level = 80;
        settings.ocean_floor_level = 50;
        let snapshot = FilterSnapshot::build(&settings, 1);
        let mut chunk = filled_chunk(ChunkPos::new(0, 0));
        let source = FixedBiomeSource::new(BiomeId::vanilla("ocean"));

        flatten_chunk(&snapshot, &mut chunk, &source, &(), 63, &FlattenPalette::vanilla());
        assert_eq!(chunk.block(0, 80, 0), Some("minecraft:water"));
        assert_eq!(chunk.block(0, 81, 0), Some("minecraft:air"));
    }

    #[test]
    fn test_respects_chunk_height_bounds() {
        let snapshot = flat_settings(-10);
        // Short chunk that ends below sea level and starts above the floor
        let mut chunk = ProtoChunk::new(ChunkPos::new(0, 0), 0, 32, "minecraft:stone");
        let source = FixedBiomeSource::new(BiomeId::vanilla("ocean"));

        flatten_chunk(&snapshot, &mut chunk, &source, &(), 63, &FlattenPalette::vanilla());
        assert!(chunk.column(5, 5).iter().all(|&b| b == "minecraft:water"));
    }

    #[test]
    fn test_unregistered_biome_is_not_ocean() {
        let snapshot = flat_settings(48);
        let before = filled_chunk(ChunkPos::new(0, 0));
        let mut chunk = before.clone();
        let source = FixedBiomeSource::new(RegistryBiome::unregistered(0));

        let count = flatten_chunk(&snapshot, &mut chunk, &source, &(), 63, &FlattenPalette::vanilla());
        assert_eq!(count, 0);
    }

    #[test]
    fn test_configured_modded_ocean_is_flattened() {
        let mut settings = FilterSettings::whitelist(&["mymod:kelp_ocean"], None);
        settings.force_flat_ocean = true;
        let snapshot = FilterSnapshot::build(&settings, 1);
        let mut chunk = filled_chunk(ChunkPos::new(0, 0));
        let source = FixedBiomeSource::new(BiomeId::parse("mymod:kelp_ocean").unwrap());

        let count = flatten_chunk(&snapshot, &mut chunk, &source, &(), 63, &FlattenPalette::vanilla());
        assert_eq!(count, 256);
    }

    #[test]
    fn test_floor_above_host_sea_level_warns_once() {
        let snapshot = flat_settings(48);
        let source = FixedBiomeSource::new(BiomeId::vanilla("ocean"));
        capture::start();

        let mut chunk = filled_chunk(ChunkPos::new(0, 0));
        flatten_chunk(&snapshot, &mut chunk, &source, &(), 40, &FlattenPalette::vanilla());
        let mut chunk = filled_chunk(ChunkPos::new(1, 0));
        flatten_chunk(&snapshot, &mut chunk, &source, &(), 40, &FlattenPalette::vanilla());

        let warnings = capture::warnings();
        assert_eq!(warnings.len(), 1, "{:?}", warnings);
        assert!(warnings[0].contains("48"));
        // Air above the host sea level, host blocks below it
        assert_eq!(chunk.block(0, 48, 0), Some("minecraft:air"));
        assert_eq!(chunk.block(0, 41, 0), Some("minecraft:air"));
        assert_eq!(chunk.block(0, 40, 0), Some("minecraft:stone"));
    }

    #[test]
    fn test_floor_below_sea_level_does_not_warn() {
        let snapshot = flat_settings(48);
        let source = FixedBiomeSource::new(BiomeId::vanilla("ocean"));
        capture::start();

        let mut chunk = filled_chunk(ChunkPos::new(0, 0));
        flatten_chunk(&snapshot, &mut chunk, &source, &(), 63, &FlattenPalette::vanilla());
        assert!(capture::warnings().is_empty());
    }
}
