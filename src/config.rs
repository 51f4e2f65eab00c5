/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::warn;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::render::SinkKind;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub building: BuildingConfig,
    pub render: RenderConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub tick_interval_ms: u64,
    pub dwell_time_ms: u64,
    pub speed: i32,
    pub reversal_probability: f64,
    pub seed: Option<u64>,
    pub max_ticks: Option<u64>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BuildingConfig {
    pub n_floors: u8,
    pub window_width: i32,
    pub window_height: i32,
    pub floor_height: i32,
    pub car_width: i32,
    pub car_height: i32,
    pub max_capacity: u32,
    pub passengers_to_remove: u32,
    pub credits: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub sink: SinkKind,
    pub frame_interval: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            tick_interval_ms: 10,
            dwell_time_ms: 3000,
            speed: 2,
            reversal_probability: 0.2,
            seed: None,
            max_ticks: None,
        }
    }
}

impl Default for BuildingConfig {
    fn default() -> Self {
        BuildingConfig {
            n_floors: 5,
            window_width: 400,
            window_height: 600,
            floor_height: 100,
            car_width: 50,
            car_height: 50,
            max_capacity: 5,
            passengers_to_remove: 1,
            credits: "Developed by Laurence Lesmoras, Mc Curvin Royeras".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            sink: SinkKind::Log,
            frame_interval: 1,
        }
    }
}

impl Config {
    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        let building = &self.building;

        if building.n_floors < 2 {
            return Err(ConfigError::Invalid(format!(
                "n_floors must be at least 2, got {}",
                building.n_floors
            )));
        }
        if building.max_capacity == 0 {
            return Err(ConfigError::Invalid("max_capacity must be positive".into()));
        }
        if building.floor_height <= 0 || building.car_height <= 0 || building.car_width <= 0 {
            return Err(ConfigError::Invalid(
                "floor_height, car_height and car_width must be positive".into(),
            ));
        }
        let shaft_height = (building.n_floors as i32)
            .checked_mul(building.floor_height)
            .and_then(|floors| floors.checked_add(building.car_height));
        if shaft_height.map_or(true, |height| height > building.window_height) {
            return Err(ConfigError::Invalid(format!(
                "{} floors of {} px do not fit a window of height {}",
                building.n_floors, building.floor_height, building.window_height
            )));
        }
        if sim.speed <= 0 {
            return Err(ConfigError::Invalid(format!(
                "speed must be positive, got {}",
                sim.speed
            )));
        }
        if sim.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive".into()));
        }
        if !(0.0..=1.0).contains(&sim.reversal_probability) {
            return Err(ConfigError::Invalid(format!(
                "reversal_probability must lie in [0, 1], got {}",
                sim.reversal_probability
            )));
        }
        if self.render.frame_interval == 0 {
            return Err(ConfigError::Invalid("frame_interval must be positive".into()));
        }
        Ok(())
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        warn!("No configuration file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

/***************************************/
/*             Unit tests              */
/***************************************/
