pub mod condition;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod snapshot;
pub mod window;

pub use condition::StopCondition;
pub use config::StopConfig;
pub use error::{ConfigError, ParseConditionError, StopError};
pub use evaluator::EarlyStopEvaluator;
pub use snapshot::{LossSnapshot, LossSource};
pub use window::LossWindow;
