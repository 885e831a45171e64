/// Errors raised while loading a [`StageConfig`](crate::StageConfig).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key}={value:?} is not a valid {expected}")]
    Unparsable {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{key}={value} is out of range: {reason}")]
    OutOfRange {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
