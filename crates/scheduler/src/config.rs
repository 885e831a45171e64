/// Scheduler capacity tuning.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulerConfig {
    /// Slots reserved when a target's action list grows from empty.
    pub action_capacity: usize,
    /// Targets the registry reserves room for up front.
    pub target_capacity: usize,
}

impl SchedulerConfig {
    pub const DEFAULT_ACTION_CAPACITY: usize = 4;
    pub const DEFAULT_TARGET_CAPACITY: usize = 64;

    pub const fn new() -> Self {
        Self {
            action_capacity: Self::DEFAULT_ACTION_CAPACITY,
            target_capacity: Self::DEFAULT_TARGET_CAPACITY,
        }
    }

    #[must_use]
    pub const fn with_action_capacity(mut self, action_capacity: usize) -> Self {
        self.action_capacity = action_capacity;
        self
    }

    #[must_use]
    pub const fn with_target_capacity(mut self, target_capacity: usize) -> Self {
        self.target_capacity = target_capacity;
        self
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}
