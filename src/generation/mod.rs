//! Generation-side integration: the host abstractions the filter plugs into,
//! ocean flattening, and the hooks wiring both into a pipeline.
//!
//! A host generates from [`GenerationHooks::wrap_source`] and calls
//! [`GenerationHooks::after_fill`] after each chunk's base fill. The
//! [`preview`] module provides a noise-based stand-in host.

pub mod chunk;
pub mod flatten;
pub mod hooks;
pub mod preview;
pub mod source;

pub use chunk::{ChunkAccess, ChunkPos, ProtoChunk, CHUNK_WIDTH};
pub use flatten::{flatten_chunk, flatten_column, FlattenPalette, Layer};
pub use hooks::GenerationHooks;
pub use preview::{PreviewParams, PreviewWorld, PREVIEW_BIOMES};
pub use source::{quart, BiomeHandle, BiomeSource, FixedBiomeSource, RegistryBiome};
