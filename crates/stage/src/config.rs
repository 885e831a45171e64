//! Stage configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use action_scheduler::SchedulerConfig;
use serde::Serialize;

use crate::error::{ConfigError, Result};

/// Configuration for a [`FrameDriver`](crate::FrameDriver) and the demo binary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StageConfig {
    /// Frames per second used for the fixed frame delta.
    pub frame_rate: u32,
    /// Upper bound on a single frame's delta, in seconds.
    pub max_frame_delta: f32,
    /// Multiplier applied to every frame delta after clamping.
    pub time_scale: f32,
    /// Frames the demo runs before reporting.
    pub frames: u64,
    pub scheduler: SchedulerConfig,
    /// Directory for the demo's log file; stderr only when unset.
    #[serde(skip)]
    pub log_dir: Option<PathBuf>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            frame_rate: Self::DEFAULT_FRAME_RATE,
            max_frame_delta: Self::DEFAULT_MAX_FRAME_DELTA,
            time_scale: 1.0,
            frames: Self::DEFAULT_FRAMES,
            scheduler: SchedulerConfig::default(),
            log_dir: None,
        }
    }
}

impl StageConfig {
    pub const DEFAULT_FRAME_RATE: u32 = 60;
    pub const DEFAULT_MAX_FRAME_DELTA: f32 = 0.25;
    pub const DEFAULT_FRAMES: u64 = 180;

    /// Seconds per frame at the configured frame rate.
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.frame_rate as f32
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `STAGE_FRAME_RATE` - Frames per second (default: 60)
    /// - `STAGE_MAX_DT` - Longest frame delta in seconds (default: 0.25)
    /// - `STAGE_TIME_SCALE` - Time multiplier (default: 1.0)
    /// - `STAGE_FRAMES` - Frames the demo runs (default: 180)
    /// - `STAGE_LOG_DIR` - Log file directory (default: none)
    /// - `SCHEDULER_ACTION_CAPACITY` - Slots reserved per action list (default: 4)
    /// - `SCHEDULER_TARGET_CAPACITY` - Targets reserved up front (default: 64)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(rate) = read::<u32>(&lookup, "STAGE_FRAME_RATE", "frame rate")? {
            if rate == 0 {
                return Err(out_of_range("STAGE_FRAME_RATE", rate, "must be positive"));
            }
            config.frame_rate = rate;
        }

        if let Some(max_dt) = read::<f32>(&lookup, "STAGE_MAX_DT", "number of seconds")? {
            if !(max_dt.is_finite() && max_dt > 0.0) {
                return Err(out_of_range("STAGE_MAX_DT", max_dt, "must be positive"));
            }
            config.max_frame_delta = max_dt;
        }

        if let Some(scale) = read::<f32>(&lookup, "STAGE_TIME_SCALE", "number")? {
            if !(scale.is_finite() && scale >= 0.0) {
                return Err(out_of_range("STAGE_TIME_SCALE", scale, "must not be negative"));
            }
            config.time_scale = scale;
        }

        if let Some(frames) = read::<u64>(&lookup, "STAGE_FRAMES", "frame count")? {
            config.frames = frames;
        }

        config.log_dir = lookup("STAGE_LOG_DIR").map(PathBuf::from);

        if let Some(capacity) = read::<usize>(&lookup, "SCHEDULER_ACTION_CAPACITY", "capacity")? {
            config.scheduler.action_capacity = capacity.max(1);
        }
        if let Some(capacity) = read::<usize>(&lookup, "SCHEDULER_TARGET_CAPACITY", "capacity")? {
            config.scheduler.target_capacity = capacity;
        }

        Ok(config)
    }
}

/// Reads and parses `key`. Missing or blank values are `None`.
fn read<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    expected: &'static str,
) -> Result<Option<T>>
where
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| ConfigError::Unparsable {
        key,
        value: raw.clone(),
        expected,
    })
}

fn out_of_range(key: &'static str, value: impl ToString, reason: &'static str) -> ConfigError {
    ConfigError::OutOfRange {
        key,
        value: value.to_string(),
        reason,
    }
}
