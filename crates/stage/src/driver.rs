//! Frame driver.
//!
//! [`FrameDriver`] owns the scene's [`ActionManager`] and turns raw frame
//! deltas into exactly one `update` call per tick.

use action_scheduler::ActionManager;
use tracing::{debug, trace};

use crate::config::StageConfig;
use crate::node::NodeRef;

/// Drives an [`ActionManager`] once per frame.
#[derive(Debug)]
pub struct FrameDriver {
    manager: ActionManager<NodeRef>,
    config: StageConfig,
    frame: u64,
    elapsed: f64,
}

impl FrameDriver {
    pub fn new(config: StageConfig) -> Self {
        Self {
            manager: ActionManager::with_config(config.scheduler.clone()),
            config,
            frame: 0,
            elapsed: 0.0,
        }
    }

    pub fn manager(&self) -> &ActionManager<NodeRef> {
        &self.manager
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Frames ticked so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Scaled time fed to the manager so far, in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Advances one frame of `raw_dt` seconds and returns the delta the
    /// manager actually received.
    ///
    /// The raw delta is clamped to `[0, max_frame_delta]` and then scaled by
    /// `time_scale`.
    pub fn tick(&mut self, raw_dt: f32) -> f32 {
        let clamped = raw_dt.clamp(0.0, self.config.max_frame_delta);
        if clamped != raw_dt {
            debug!(
                target: "stage::driver",
                frame = self.frame,
                raw_dt,
                clamped,
                "frame delta clamped"
            );
        }
        let dt = clamped * self.config.time_scale;

        self.manager.update(dt);
        self.frame += 1;
        self.elapsed += f64::from(dt);

        trace!(
            target: "stage::driver",
            frame = self.frame,
            dt,
            actions = self.manager.number_of_running_actions(),
            "frame ticked"
        );
        dt
    }

    /// Ticks `frames` frames at the configured frame rate.
    pub fn run(&mut self, frames: u64) {
        let dt = self.config.frame_delta();
        for _ in 0..frames {
            self.tick(dt);
        }
    }

    /// Ticks until the manager has no actions left or `limit` frames pass.
    /// Returns the number of frames ticked.
    pub fn run_until_idle(&mut self, limit: u64) -> u64 {
        let dt = self.config.frame_delta();
        let start = self.frame;
        while self.frame - start < limit && self.manager.number_of_running_actions() > 0 {
            self.tick(dt);
        }
        self.frame - start
    }
}
