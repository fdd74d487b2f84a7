use thiserror::Error;

/// A stop configuration that can never be evaluated.
///
/// Raised once, by the validation pass that runs against the first loss
/// snapshot. These are caller mistakes, so nothing retries them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("stop condition needs at least one prior data point (max_mem = {max_mem})")]
    EmptyWindow { max_mem: usize },

    #[error("unrecognized stop condition: {name}")]
    UnrecognizedLoss { name: String },

    #[error("wrong stop condition: {name} bounds must be in order and not equal ({lower} >= {upper})")]
    UnorderedBounds { name: String, lower: f64, upper: f64 },

    #[error("wrong stop condition: {name} upper bound cannot be negative or zero ({upper})")]
    NonPositiveUpperBound { name: String, upper: f64 },

    #[error("wrong stop condition: {name} max change cannot be negative or zero ({max_change})")]
    NonPositiveMaxChange { name: String, max_change: f64 },
}

impl ConfigError {
    /// Loss the error refers to, if it concerns a single condition.
    pub fn loss_name(&self) -> Option<&str> {
        match self {
            ConfigError::EmptyWindow { .. } => None,
            ConfigError::UnrecognizedLoss { name }
            | ConfigError::UnorderedBounds { name, .. }
            | ConfigError::NonPositiveUpperBound { name, .. }
            | ConfigError::NonPositiveMaxChange { name, .. } => Some(name),
        }
    }
}

/// Failure of a single `evaluate` call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StopError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("loss {name} missing from snapshot")]
    MissingLoss { name: String },

    #[error("loss {name} is not finite: {value}")]
    NonFiniteLoss { name: String, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseConditionError {
    #[error("empty stop condition")]
    Empty,

    #[error("invalid number in stop condition: {0:?}")]
    InvalidNumber(String),

    #[error("stop condition takes one value or a lower:upper pair, got {0} values")]
    WrongArity(usize),

    #[error("expected name=condition, got {0:?}")]
    MissingName(String),
}
