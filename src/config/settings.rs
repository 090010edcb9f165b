//! Filter settings, loaded from and saved to JSON.
//!
//! Settings are plain data: the filter engine turns them into an immutable
//! snapshot on every load or reload. Range and cross-field rules are checked
//! here so the generation hooks can trust the values they read.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::biome::{BiomeId, CANONICAL_OCEANS};
use crate::core::{Error, Result};

/// Vanilla sea level.
pub const DEFAULT_SEA_LEVEL: i32 = 63;
/// Vanilla bottom of the world.
pub const DEFAULT_BEDROCK_LEVEL: i32 = -64;
/// Vanilla-compatible top of the world used by the settings defaults.
pub const DEFAULT_MAX_HEIGHT: i32 = 512;
/// Default gravel floor height for flattened ocean columns.
pub const DEFAULT_OCEAN_FLOOR_LEVEL: i32 = 48;

const SEA_LEVEL_RANGE: RangeInclusive<i32> = -1999..=1999;
const HEIGHT_RANGE: RangeInclusive<i32> = -2000..=2000;

/// Section height; world bounds snap to multiples of this.
const SECTION_HEIGHT: i32 = 16;

/// How the biome list is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// No filtering, all biomes generate normally
    #[default]
    #[serde(alias = "DISABLED")]
    Disabled,
    /// Only listed biomes may generate
    #[serde(alias = "WHITELIST")]
    Whitelist,
    /// Every biome except the listed ones may generate
    #[serde(alias = "BLACKLIST")]
    Blacklist,
}

/// World height and water level overrides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Y of the water surface.
    pub sea_level: i32,
    /// Bottom of the world, rounded down to a multiple of 16.
    pub bedrock_level: i32,
    /// Top of the world, rounded up to a multiple of 16.
    pub max_height: i32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            sea_level: DEFAULT_SEA_LEVEL,
            bedrock_level: DEFAULT_BEDROCK_LEVEL,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }
}

impl WorldSettings {
    /// Lowest buildable Y (bedrock level snapped down to a section boundary).
    pub fn min_y(&self) -> i32 {
        self.bedrock_level.div_euclid(SECTION_HEIGHT) * SECTION_HEIGHT
    }

    /// Exclusive top Y (max height snapped up to a section boundary).
    pub fn max_y(&self) -> i32 {
        (self.max_height + SECTION_HEIGHT - 1).div_euclid(SECTION_HEIGHT) * SECTION_HEIGHT
    }

    /// Total buildable height in blocks.
    pub fn height(&self) -> i32 {
        self.max_y() - self.min_y()
    }

    /// True when any value differs from the vanilla defaults.
    pub fn is_modified(&self) -> bool {
        self.sea_level != DEFAULT_SEA_LEVEL
            || self.bedrock_level != DEFAULT_BEDROCK_LEVEL
            || self.max_height != DEFAULT_MAX_HEIGHT
    }

    /// Check ranges and ordering: bedrock < sea level < max height.
    pub fn validate(&self) -> Result<()> {
        check_range("sea_level", self.sea_level, &SEA_LEVEL_RANGE)?;
        check_range("bedrock_level", self.bedrock_level, &HEIGHT_RANGE)?;
        check_range("max_height", self.max_height, &HEIGHT_RANGE)?;

        if self.sea_level <= self.bedrock_level {
            return Err(invalid(
                "sea_level",
                format!("must be above bedrock level ({})", self.bedrock_level),
            ));
        }
        if self.sea_level >= self.max_height {
            return Err(invalid(
                "sea_level",
                format!("must be below max height ({})", self.max_height),
            ));
        }
        Ok(())
    }
}

/// Complete filter configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Filtering mode
    pub mode: FilterMode,
    /// Biome identifiers, first entry is the whitelist fallback
    pub biomes: Vec<String>,
    /// Explicit fallback biome, used when it is itself allowed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_biome: Option<String>,
    /// Rewrite ocean columns into a flat floor after the initial fill
    pub force_flat_ocean: bool,
    /// Y of the gravel floor in flattened ocean columns
    pub ocean_floor_level: i32,
    /// World height and water level
    pub world: WorldSettings,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            mode: FilterMode::Disabled,
            biomes: canonical_ocean_list(),
            fallback_biome: None,
            force_flat_ocean: false,
            ocean_floor_level: DEFAULT_OCEAN_FLOOR_LEVEL,
            world: WorldSettings::default(),
        }
    }
}

impl FilterSettings {
    /// Whitelist-only settings (the single-mode variant).
    pub fn whitelist(biomes: &[&str], fallback_biome: Option<&str>) -> Self {
        Self {
            mode: FilterMode::Whitelist,
            biomes: biomes.iter().map(|s| s.to_string()).collect(),
            fallback_biome: fallback_biome.map(str::to_string),
            ..Self::default()
        }
    }

    /// Blacklist settings.
    pub fn blacklist(biomes: &[&str]) -> Self {
        Self {
            mode: FilterMode::Blacklist,
            biomes: biomes.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Ocean-only world with flattened sea floor.
    pub fn endless_ocean() -> Self {
        Self {
            mode: FilterMode::Whitelist,
            biomes: canonical_ocean_list(),
            force_flat_ocean: true,
            ..Self::default()
        }
    }

    /// Validate world bounds and the ocean floor.
    ///
    /// Malformed biome identifiers are not an error here; the filter cache
    /// drops them with a warning.
    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;

        if self.ocean_floor_level < self.world.bedrock_level
            || self.ocean_floor_level > self.world.sea_level
        {
            return Err(invalid(
                "ocean_floor_level",
                format!(
                    "must be between bedrock level ({}) and sea level ({})",
                    self.world.bedrock_level, self.world.sea_level
                ),
            ));
        }
        Ok(())
    }

    /// Load and validate settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }
}

fn canonical_ocean_list() -> Vec<String> {
    CANONICAL_OCEANS
        .iter()
        .map(|path| BiomeId::vanilla(path).to_string())
        .collect()
}

fn check_range(field: &'static str, value: i32, range: &RangeInclusive<i32>) -> Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(invalid(
            field,
            format!("{} is outside {}..={}", value, range.start(), range.end()),
        ))
    }
}

fn invalid(field: &'static str, reason: String) -> Error {
    Error::InvalidSetting { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = FilterSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.mode, FilterMode::Disabled);
        assert_eq!(settings.biomes.len(), 9);
        assert!(!settings.world.is_modified());
    }

    #[test]
    fn test_world_rounding() {
        let world = WorldSettings {
            sea_level: 10,
            bedrock_level: -70,
            max_height: 300,
        };
        assert_eq!(world.min_y(), -80);
        assert_eq!(world.max_y(), 304);
        assert_eq!(world.height(), 384);

        let aligned = WorldSettings::default();
        assert_eq!(aligned.min_y(), -64);
        assert_eq!(aligned.max_y(), 512);
    }

    #[test]
    fn test_world_is_modified() {
        let mut world = WorldSettings::default();
        assert!(!world.is_modified());
        world.sea_level = 80;
        assert!(world.is_modified());
    }

    #[test]
    fn test_sea_level_must_be_above_bedrock() {
        let mut settings = FilterSettings::default();
        settings.world.sea_level = -64;
        settings.ocean_floor_level = -64;
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidSetting { field: "sea_level", .. }));
    }

    #[test]
    fn test_sea_level_must_be_below_max_height() {
        let mut settings = FilterSettings::default();
        settings.world.max_height = 60;
        assert!(matches!(
            settings.validate(),
            Err(Error::InvalidSetting { field: "sea_level", .. })
        ));
    }

    #[test]
    fn test_range_checks() {
        let mut settings = FilterSettings::default();
        settings.world.max_height = 2500;
        assert!(matches!(
            settings.validate(),
            Err(Error::InvalidSetting { field: "max_height", .. })
        ));

        let mut settings = FilterSettings::default();
        settings.world.sea_level = 2000;
        assert!(matches!(
            settings.validate(),
            Err(Error::InvalidSetting { field: "sea_level", .. })
        ));
    }

    #[test]
    fn test_ocean_floor_bounds() {
        let mut settings = FilterSettings::default();
        settings.ocean_floor_level = 64;
        assert!(matches!(
            settings.validate(),
            Err(Error::InvalidSetting { field: "ocean_floor_level", .. })
        ));

        settings.ocean_floor_level = -65;
        assert!(settings.validate().is_err());

        settings.ocean_floor_level = 63;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let ocean = FilterSettings::endless_ocean();
        assert_eq!(ocean.mode, FilterMode::Whitelist);
        assert!(ocean.force_flat_ocean);
        assert!(ocean.biomes.contains(&"minecraft:deep_frozen_ocean".to_string()));

        let legacy = FilterSettings::whitelist(&["minecraft:plains"], Some("minecraft:plains"));
        assert_eq!(legacy.mode, FilterMode::Whitelist);
        assert_eq!(legacy.fallback_biome.as_deref(), Some("minecraft:plains"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: FilterSettings =
            serde_json::from_str(r#"{ "mode": "blacklist", "biomes": ["minecraft:desert"] }"#).unwrap();
        assert_eq!(settings.mode, FilterMode::Blacklist);
        assert_eq!(settings.biomes, vec!["minecraft:desert".to_string()]);
        assert_eq!(settings.ocean_floor_level, DEFAULT_OCEAN_FLOOR_LEVEL);
        assert_eq!(settings.world, WorldSettings::default());
    }

    #[test]
    fn test_mode_accepts_uppercase() {
        let mode: FilterMode = serde_json::from_str(r#""WHITELIST""#).unwrap();
        assert_eq!(mode, FilterMode::Whitelist);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("nested").join("biome_filter.json");

        let mut settings = FilterSettings::whitelist(&["minecraft:plains", "minecraft:river"], None);
        settings.force_flat_ocean = true;
        settings.ocean_floor_level = 40;
        settings.save(&path).expect("save failed");

        let loaded = FilterSettings::load(&path).expect("load failed");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "ocean_floor_level": 100 }"#).unwrap();

        assert!(matches!(
            FilterSettings::load(&path),
            Err(Error::InvalidSetting { field: "ocean_floor_level", .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let result = FilterSettings::load(&temp_dir.path().join("absent.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
