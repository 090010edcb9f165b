//! Biome filter preview — runs the filter hooks over a noise-generated area
//! and reports which biomes were selected and how many columns were flattened.
//!
//! Usage: cargo run --release --bin preview_filter -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>      Filter settings JSON (default: built-in defaults)
//!   --preset <NAME>      Built-in preset instead of a file: endless_ocean
//!   --write-config <P>   Save the effective settings to P and continue
//!   --seed <SEED>        Noise seed (default: 12345)
//!   --radius <CHUNKS>    Area radius in chunks around the origin (default: 8)
//!   --sea-level <Y>      Host sea level (default: 63)
//!   --jobs <N>           Worker threads (default: 4)

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use biome_filter::biome::BiomeId;
use biome_filter::config::{FilterSettings, DEFAULT_SEA_LEVEL};
use biome_filter::core::logging;
use biome_filter::filter::FilterEngine;
use biome_filter::generation::{
    quart, BiomeHandle, BiomeSource, ChunkPos, FlattenPalette, GenerationHooks, PreviewParams,
    PreviewWorld,
};

/// Per-chunk outcome gathered by the workers.
struct ChunkReport {
    biomes: Vec<BiomeId>,
    flattened: usize,
}

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let config = parse_str_arg(&args, "--config").map(PathBuf::from);
    let preset = parse_str_arg(&args, "--preset");
    let write_config = parse_str_arg(&args, "--write-config").map(PathBuf::from);
    let seed = parse_u32_arg(&args, "--seed").unwrap_or(12345);
    let radius = parse_i32_arg(&args, "--radius").unwrap_or(8).max(0);
    let sea_level = parse_i32_arg(&args, "--sea-level").unwrap_or(DEFAULT_SEA_LEVEL);
    let jobs = parse_usize_arg(&args, "--jobs").unwrap_or(4);

    if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(jobs).build_global() {
        log::warn!("Could not configure thread pool, using rayon defaults: {}", e);
    }

    let settings = match (&config, preset.as_deref()) {
        (Some(path), _) => match FilterSettings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        (None, Some("endless_ocean")) => FilterSettings::endless_ocean(),
        (None, Some(other)) => {
            log::error!("Unknown preset {:?} (available: endless_ocean)", other);
            return ExitCode::FAILURE;
        }
        (None, None) => FilterSettings::default(),
    };

    if let Some(path) = &write_config {
        if let Err(e) = settings.save(path) {
            log::error!("Failed to write {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
        log::info!("Wrote settings to {}", path.display());
    }

    let engine = match FilterEngine::new(&settings) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            log::error!("Invalid filter settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let snapshot = engine.snapshot();
    let world = PreviewWorld::new(PreviewParams::for_snapshot(&snapshot, sea_level, seed));
    let hooks = GenerationHooks::new(Arc::clone(&engine), FlattenPalette::vanilla());
    let source = hooks.wrap_source(&world);

    let side = radius * 2 + 1;
    println!("=== Biome Filter Preview ===");
    println!("Mode:      {:?} ({} biomes)", snapshot.mode(), snapshot.biomes().len());
    println!("Fallback:  {}", snapshot.fallback_biome());
    println!("Flat ocean: {} (floor {})", snapshot.is_flat_ocean_enabled(), snapshot.ocean_floor_level());
    println!("Sea level: {} (host {})", snapshot.resolve_sea_level(sea_level), sea_level);
    println!("Build:     {}..{} ({} blocks)", snapshot.world().min_y(), snapshot.world().max_y(), snapshot.world().height());
    println!("Seed:      {}", seed);
    println!("Area:      {} x {} chunks", side, side);
    println!();

    let positions: Vec<ChunkPos> = (-radius..=radius)
        .flat_map(|x| (-radius..=radius).map(move |z| ChunkPos::new(x, z)))
        .collect();

    let start = Instant::now();
    let reports: Vec<ChunkReport> = positions
        .par_iter()
        .map(|&pos| {
            let mut chunk = world.new_chunk(pos);
            world.fill_chunk(&mut chunk);
            let flattened = hooks.after_fill(&mut chunk, &source, &(), sea_level);

            // One sample per quart column at the surface
            let quart_y = quart::from_block(snapshot.resolve_sea_level(sea_level));
            let qx0 = quart::from_block(pos.min_block_x());
            let qz0 = quart::from_block(pos.min_block_z());
            let biomes = (0..4)
                .flat_map(|dx| (0..4).map(move |dz| (dx, dz)))
                .filter_map(|(dx, dz)| {
                    source
                        .noise_biome(qx0 + dx, quart_y, qz0 + dz, &())
                        .biome_id()
                        .cloned()
                })
                .collect();

            ChunkReport { biomes, flattened }
        })
        .collect();
    let elapsed = start.elapsed();

    let mut histogram: BTreeMap<String, usize> = BTreeMap::new();
    let mut flattened_columns = 0;
    let mut flattened_chunks = 0;
    for report in &reports {
        for biome in &report.biomes {
            *histogram.entry(biome.to_string()).or_insert(0) += 1;
        }
        flattened_columns += report.flattened;
        if report.flattened > 0 {
            flattened_chunks += 1;
        }
    }

    let samples: usize = histogram.values().sum();
    println!("Biomes ({} samples):", samples);
    let mut rows: Vec<_> = histogram.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    for (name, count) in rows {
        let allowed = BiomeId::parse(&name).is_some_and(|id| snapshot.is_biome_allowed(&id));
        println!(
            "  {:<32} {:>6} ({:>5.1}%){}",
            name,
            count,
            count as f64 * 100.0 / samples.max(1) as f64,
            if allowed { "" } else { "  [filtered]" }
        );
    }

    println!();
    println!(
        "Flattened: {} columns in {} of {} chunks",
        flattened_columns,
        flattened_chunks,
        reports.len()
    );
    println!(
        "Time:      {:.2}s ({:.0} chunks/sec)",
        elapsed.as_secs_f64(),
        reports.len() as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );

    ExitCode::SUCCESS
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_i32_arg(args: &[String], flag: &str) -> Option<i32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
