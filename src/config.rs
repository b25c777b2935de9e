use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::GridSize;
use crate::snake::{INITIAL_HEAD, INITIAL_LENGTH};

const APP_DIR_NAME: &str = "canvas-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Default board width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 30;

/// Default board height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// How much each speed-up shortens the tick interval.
pub const SPEED_STEP_MS: u64 = 5;

/// The game speeds up every time the score reaches a multiple of this.
pub const SPEED_THRESHOLD_POINTS: u32 = 20;

/// Points awarded per food eaten.
pub const POINTS_PER_FOOD: u32 = 10;

/// Largest accepted board side, in cells.
pub const MAX_GRID_SIDE: u16 = 512;

/// Validated tuning values the engine runs with.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EngineConfig {
    pub grid: GridSize,
    pub tick_interval: Duration,
    pub min_tick_interval: Duration,
    pub speed_step: Duration,
    pub speed_threshold: u32,
    pub points_per_food: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::new(DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT),
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            min_tick_interval: Duration::from_millis(MIN_TICK_INTERVAL_MS),
            speed_step: Duration::from_millis(SPEED_STEP_MS),
            speed_threshold: SPEED_THRESHOLD_POINTS,
            points_per_food: POINTS_PER_FOOD,
        }
    }
}

impl EngineConfig {
    /// Checks the values against what the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min_width = INITIAL_HEAD.x + 1;
        let min_height = INITIAL_HEAD.y + 1;
        if i32::from(self.grid.width) < min_width || i32::from(self.grid.height) < min_height {
            return Err(ConfigError::Invalid(format!(
                "grid {}x{} cannot hold the {INITIAL_LENGTH}-cell starting snake (need at least {min_width}x{min_height})",
                self.grid.width, self.grid.height,
            )));
        }
        if self.grid.width > MAX_GRID_SIDE || self.grid.height > MAX_GRID_SIDE {
            return Err(ConfigError::Invalid(format!(
                "grid {}x{} exceeds the maximum side of {MAX_GRID_SIDE} cells",
                self.grid.width, self.grid.height,
            )));
        }
        if self.min_tick_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "minimum tick interval must be positive".into(),
            ));
        }
        if self.tick_interval < self.min_tick_interval {
            return Err(ConfigError::Invalid(format!(
                "tick interval {:?} is below the minimum {:?}",
                self.tick_interval, self.min_tick_interval,
            )));
        }
        if self.points_per_food == 0 {
            return Err(ConfigError::Invalid(
                "points per food must be positive".into(),
            ));
        }
        if self.speed_threshold == 0 || self.speed_threshold % self.points_per_food != 0 {
            return Err(ConfigError::Invalid(format!(
                "speed threshold {} must be a positive multiple of points per food {}",
                self.speed_threshold, self.points_per_food,
            )));
        }
        // Filling every cell must not overflow the score.
        let max_score = u64::try_from(self.grid.total_cells())
            .ok()
            .and_then(|cells| cells.checked_mul(u64::from(self.points_per_food)));
        if !max_score.is_some_and(|score| score <= u64::from(u32::MAX)) {
            return Err(ConfigError::Invalid(format!(
                "{} points per food overflows the score on a {}x{} board",
                self.points_per_food, self.grid.width, self.grid.height,
            )));
        }
        Ok(())
    }
}

/// On-disk settings. Every field is optional and falls back to the defaults.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub grid_width: u16,
    pub grid_height: u16,
    pub tick_interval_ms: u64,
    pub min_tick_interval_ms: u64,
    pub speed_step_ms: u64,
    pub speed_threshold: u32,
    pub points_per_food: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            min_tick_interval_ms: MIN_TICK_INTERVAL_MS,
            speed_step_ms: SPEED_STEP_MS,
            speed_threshold: SPEED_THRESHOLD_POINTS,
            points_per_food: POINTS_PER_FOOD,
        }
    }
}

impl Settings {
    /// Returns the platform-correct settings file path, if one exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Reads settings from `path`.
    ///
    /// With `allow_missing` set, a file that does not exist yields the
    /// defaults instead of an error.
    pub fn load(path: &Path, allow_missing: bool) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound && allow_missing => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Converts to the engine's representation, validating along the way.
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let config = EngineConfig {
            grid: GridSize::new(self.grid_width, self.grid_height),
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            min_tick_interval: Duration::from_millis(self.min_tick_interval_ms),
            speed_step: Duration::from_millis(self.speed_step_ms),
            speed_threshold: self.speed_threshold,
            points_per_food: self.points_per_food,
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid settings: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use super::{
        ConfigError, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, EngineConfig, MAX_GRID_SIDE, Settings,
    };
    use crate::grid::GridSize;

    #[test]
    fn default_settings_match_default_engine_config() {
        let config = Settings::default()
            .engine_config()
            .expect("defaults should validate");

        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.grid, GridSize::new(30, 20));
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert_eq!(config.min_tick_interval, Duration::from_millis(50));
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let path = unique_test_path("partial");
        write_test_file(&path, r#"{ "grid_width": 40, "speed_step_ms": 10 }"#);

        let settings = Settings::load(&path, false).expect("load should succeed");

        assert_eq!(settings.grid_width, 40);
        assert_eq!(settings.speed_step_ms, 10);
        assert_eq!(settings.grid_height, Settings::default().grid_height);
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_file_is_default_only_when_allowed() {
        let path = unique_test_path("missing");

        let loaded = Settings::load(&path, true).expect("missing file should be allowed");
        assert_eq!(loaded, Settings::default());

        assert!(matches!(
            Settings::load(&path, false),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let path = unique_test_path("unknown");
        write_test_file(&path, r#"{ "theme": "neon" }"#);

        assert!(matches!(
            Settings::load(&path, false),
            Err(ConfigError::Parse { .. })
        ));
        cleanup_test_path(&path);
    }

    #[test]
    fn grid_too_small_for_starting_snake_is_invalid() {
        let settings = Settings {
            grid_width: 5,
            ..Settings::default()
        };

        assert!(matches!(
            settings.engine_config(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn tick_floor_above_base_interval_is_invalid() {
        let settings = Settings {
            tick_interval_ms: 40,
            min_tick_interval_ms: 50,
            ..Settings::default()
        };

        assert!(matches!(
            settings.engine_config(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn points_that_overflow_the_score_are_invalid() {
        let settings = Settings {
            points_per_food: 1 << 31,
            speed_threshold: 1 << 31,
            ..Settings::default()
        };

        assert!(matches!(
            settings.engine_config(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn largest_safe_points_per_food_is_accepted() {
        let cells = u32::from(DEFAULT_GRID_WIDTH) * u32::from(DEFAULT_GRID_HEIGHT);
        let points = u32::MAX / cells;
        let settings = Settings {
            points_per_food: points,
            speed_threshold: points,
            ..Settings::default()
        };

        assert!(settings.engine_config().is_ok());
    }

    #[test]
    fn oversized_grid_is_invalid() {
        let settings = Settings {
            grid_width: u16::MAX,
            grid_height: u16::MAX,
            ..Settings::default()
        };

        assert!(matches!(
            settings.engine_config(),
            Err(ConfigError::Invalid(_))
        ));

        let widest = Settings {
            grid_width: MAX_GRID_SIDE,
            ..Settings::default()
        };
        assert!(widest.engine_config().is_ok());
    }

    #[test]
    fn unreachable_speed_threshold_is_invalid() {
        let settings = Settings {
            speed_threshold: 25,
            ..Settings::default()
        };

        assert!(matches!(
            settings.engine_config(),
            Err(ConfigError::Invalid(_))
        ));
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("canvas-snake-settings-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
