//! Configuration model: filter mode, biome list, ocean flattening and world bounds.

pub mod settings;

pub use settings::{
    FilterMode, FilterSettings, WorldSettings, DEFAULT_BEDROCK_LEVEL, DEFAULT_MAX_HEIGHT,
    DEFAULT_OCEAN_FLOOR_LEVEL, DEFAULT_SEA_LEVEL,
};
