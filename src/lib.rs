//! Biome filter - whitelist/blacklist biome selection and flat ocean
//! generation for procedural worlds.

pub mod core;
pub mod config;
pub mod biome;
pub mod filter;
pub mod generation;
