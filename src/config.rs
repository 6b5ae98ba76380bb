use std::path::PathBuf;
use std::time::Duration;

use crate::sim::constants::time::{MAX_SPEED, MIN_SPEED};
use crate::sim::constants::{debris, radar, time, viewport};
use crate::sim::controls::AiMode;

/// Invalid configuration values
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("sim_speed must be within {min}-{max}, got {value}")]
    SpeedOutOfBounds { value: f32, min: f32, max: f32 },
    #[error("radar_range must be within {min}-{max}, got {value}")]
    RadarRangeOutOfBounds { value: f32, min: f32, max: f32 },
    #[error("viewport must be at least 1x1, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
    #[error("frame_ms must be at least 1")]
    InvalidFrameInterval,
}

/// Simulator configuration
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Debris particles generated at start
    pub debris_count: usize,
    /// Initial radar range setting (5-30)
    pub radar_range: f32,
    /// Initial speed multiplier
    pub sim_speed: f32,
    /// Initial AI mode
    pub ai_mode: AiMode,
    /// Render surface width in pixels
    pub viewport_width: f32,
    /// Render surface height in pixels
    pub viewport_height: f32,
    /// Animation frame period for the headless runner
    pub frame_ms: u64,
    /// Stop after this long; None runs until Ctrl+C
    pub run_for: Option<Duration>,
    /// Seed for reproducible debris fields and telemetry
    pub seed: Option<u64>,
    /// Print dashboard snapshots as JSON lines on each classification pass
    pub json_snapshots: bool,
    /// Write a Prometheus-format metrics dump here on shutdown
    pub metrics_file: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            debris_count: debris::DEFAULT_COUNT,
            radar_range: radar::DEFAULT_RANGE,
            sim_speed: 1.0,
            ai_mode: AiMode::Off,
            viewport_width: viewport::DEFAULT_WIDTH,
            viewport_height: viewport::DEFAULT_HEIGHT,
            frame_ms: time::FRAME_MS,
            run_for: None,
            seed: None,
            json_snapshots: false,
            metrics_file: None,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Invalid {} '{}', using default", key, raw);
            None
        }
    }
}

/// Positive, representable run length; anything else runs until Ctrl+C
fn parse_run_duration(seconds: f64) -> Option<Duration> {
    if seconds <= 0.0 {
        tracing::warn!("RUN_SECONDS must be > 0, running until interrupted");
        return None;
    }
    match Duration::try_from_secs_f64(seconds) {
        Ok(duration) => Some(duration),
        Err(e) => {
            tracing::warn!("Invalid RUN_SECONDS {}: {}, running until interrupted", seconds, e);
            None
        }
    }
}

impl SimConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        let mut config = Self::default();

        if let Some(count) = parse_env::<usize>("DEBRIS_COUNT") {
            if count <= 10_000 {
                config.debris_count = count;
            } else {
                tracing::warn!("DEBRIS_COUNT must be 0-10000, using default");
            }
        }

        if let Some(range) = parse_env::<f32>("RADAR_RANGE") {
            if (radar::MIN_RANGE..=radar::MAX_RANGE).contains(&range) {
                config.radar_range = range;
            } else {
                tracing::warn!(
                    "RADAR_RANGE must be {}-{}, using default",
                    radar::MIN_RANGE,
                    radar::MAX_RANGE
                );
            }
        }

        if let Some(speed) = parse_env::<f32>("SIM_SPEED") {
            if (MIN_SPEED..=MAX_SPEED).contains(&speed) {
                config.sim_speed = speed;
            } else {
                tracing::warn!("SIM_SPEED must be {}-{}, using default", MIN_SPEED, MAX_SPEED);
            }
        }

        if let Some(mode) = parse_env::<AiMode>("AI_MODE") {
            config.ai_mode = mode;
        }

        if let Some(width) = parse_env::<f32>("VIEWPORT_WIDTH") {
            config.viewport_width = width;
        }

        if let Some(height) = parse_env::<f32>("VIEWPORT_HEIGHT") {
            config.viewport_height = height;
        }

        if let Some(frame_ms) = parse_env::<u64>("FRAME_MS") {
            if frame_ms > 0 {
                config.frame_ms = frame_ms;
            } else {
                tracing::warn!("FRAME_MS must be > 0, using default");
            }
        }

        if let Some(seconds) = parse_env::<f64>("RUN_SECONDS") {
            config.run_for = parse_run_duration(seconds);
        }

        config.seed = parse_env::<u64>("SIM_SEED");

        if let Some(json) = parse_env::<bool>("JSON_SNAPSHOTS") {
            config.json_snapshots = json;
        }

        if let Ok(path) = std::env::var("METRICS_FILE") {
            config.metrics_file = Some(PathBuf::from(path));
        }

        config
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.sim_speed) {
            return Err(ConfigError::SpeedOutOfBounds {
                value: self.sim_speed,
                min: MIN_SPEED,
                max: MAX_SPEED,
            });
        }
        if !(radar::MIN_RANGE..=radar::MAX_RANGE).contains(&self.radar_range) {
            return Err(ConfigError::RadarRangeOutOfBounds {
                value: self.radar_range,
                min: radar::MIN_RANGE,
                max: radar::MAX_RANGE,
            });
        }
        if !(self.viewport_width >= 1.0 && self.viewport_height >= 1.0) {
            return Err(ConfigError::InvalidViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        if self.frame_ms == 0 {
            return Err(ConfigError::InvalidFrameInterval);
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}
