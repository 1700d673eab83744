//! Game configuration.
//!
//! Every field has a default matching the stock game, so an empty or partial
//! TOML file is valid.  CLI flags are applied on top by `cli::CliArgs`.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub gameplay: GameplayConfig,
    pub sprites: SpriteConfig,
    pub audio: AudioConfig,
    pub timing: TimingConfig,
}

/// Logical window.  The simulation always runs in these units; the terminal
/// renderer scales them to the available grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Player speed in units per second along each axis.
    pub player_speed: f32,
    pub laser_speed: f32,
    pub meteor_speed: f32,
    /// Distance from the bottom edge to the player's starting centre.
    pub player_start_offset: f32,
    /// Meteor-to-player centre distance that ends the round.
    pub collision_threshold: f32,
    pub spawn_interval_ms: u64,
    pub spawn_batch: u32,
    pub star_count: u32,
}

/// Sprite sizes in world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteConfig {
    pub player: [f32; 2],
    pub laser: [f32; 2],
    pub meteor: [f32; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub laser_volume: f32,
    pub explosion_volume: f32,
    pub music_volume: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Frame cap.  0 means uncapped.
    pub max_fps: u32,
    /// Longest delta time fed to the simulation in one step, in milliseconds.
    pub max_frame_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            gameplay: GameplayConfig::default(),
            sprites: SpriteConfig::default(),
            audio: AudioConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Space Shooter".to_string(),
        }
    }
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            player_speed: 800.0,
            laser_speed: 1000.0,
            meteor_speed: 600.0,
            player_start_offset: 50.0,
            collision_threshold: 50.0,
            spawn_interval_ms: 900,
            spawn_batch: 4,
            star_count: 40,
        }
    }
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            player: [112.0, 75.0],
            laser: [9.0, 54.0],
            meteor: [101.0, 84.0],
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            laser_volume: 0.5,
            explosion_volume: 1.0,
            music_volume: 1.0,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            max_fps: 60,
            max_frame_ms: 100,
        }
    }
}

impl GameConfig {
    /// Load a TOML config file.  Missing fields fall back to defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: GameConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".into()));
        }
        let g = &self.gameplay;
        for (name, value) in [
            ("player_speed", g.player_speed),
            ("laser_speed", g.laser_speed),
            ("meteor_speed", g.meteor_speed),
            ("collision_threshold", g.collision_threshold),
            ("player_start_offset", g.player_start_offset),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if g.spawn_interval_ms == 0 {
            return Err(ConfigError::Invalid("spawn_interval_ms must be non-zero".into()));
        }
        if self.timing.max_frame_ms == 0 {
            return Err(ConfigError::Invalid("max_frame_ms must be non-zero".into()));
        }
        for (name, [w, h]) in [
            ("player", self.sprites.player),
            ("laser", self.sprites.laser),
            ("meteor", self.sprites.meteor),
        ] {
            if !(w > 0.0 && h > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} sprite size must be positive")));
            }
        }
        Ok(())
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.gameplay.spawn_interval_ms)
    }

    /// `None` when the frame rate is uncapped.
    pub fn frame_budget(&self) -> Option<Duration> {
        (self.timing.max_fps > 0)
            .then(|| Duration::from_secs_f64(1.0 / f64::from(self.timing.max_fps)))
    }

    pub fn max_frame_dt(&self) -> f32 {
        self.timing.max_frame_ms as f32 / 1000.0
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
