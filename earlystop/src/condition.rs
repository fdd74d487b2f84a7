use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, ParseConditionError};
use crate::window::LossWindow;

/// Stop criterion attached to one monitored loss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopCondition {
    /// Window extremes checked against a lower/upper bound pair.
    Range { lower: f64, upper: f64 },
    /// Largest allowed half-spread of the window.
    MaxDelta(f64),
}

impl StopCondition {
    pub fn range(lower: f64, upper: f64) -> Self {
        StopCondition::Range { lower, upper }
    }

    pub fn max_delta(max_change: f64) -> Self {
        StopCondition::MaxDelta(max_change)
    }

    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        match *self {
            StopCondition::Range { lower, upper } => {
                if lower.is_nan() || upper.is_nan() || lower >= upper {
                    return Err(ConfigError::UnorderedBounds {
                        name: name.to_string(),
                        lower,
                        upper,
                    });
                }
                if upper <= 0.0 {
                    return Err(ConfigError::NonPositiveUpperBound {
                        name: name.to_string(),
                        upper,
                    });
                }
            }
            StopCondition::MaxDelta(max_change) => {
                if max_change.is_nan() || max_change <= 0.0 {
                    return Err(ConfigError::NonPositiveMaxChange {
                        name: name.to_string(),
                        max_change,
                    });
                }
            }
        }
        Ok(())
    }

    /// Checks the condition against the extremes of a window.
    ///
    /// The range check is `hi > lower && lo < upper`: the largest value must
    /// clear the lower bound and the smallest must stay under the upper one.
    pub fn is_satisfied_by(&self, hi: f64, lo: f64) -> bool {
        match *self {
            StopCondition::Range { lower, upper } => hi > lower && lo < upper,
            StopCondition::MaxDelta(max_change) => (hi - lo).abs() <= 2.0 * max_change,
        }
    }

    /// Evaluates the condition on a window, or returns false during warm-up.
    pub fn check(&self, window: &LossWindow) -> bool {
        if !window.is_full() {
            return false;
        }

        match (window.max(), window.min()) {
            (Some(hi), Some(lo)) => self.is_satisfied_by(hi, lo),
            _ => false,
        }
    }
}

impl FromStr for StopCondition {
    type Err = ParseConditionError;

    /// Parses `0.05` as a max delta and `0.1:0.9`, `0.1,0.9`, `[0.1, 0.9]`
    /// or `(0.1, 0.9)` as a range.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .or_else(|| {
                trimmed
                    .strip_prefix('(')
                    .and_then(|rest| rest.strip_suffix(')'))
            })
            .unwrap_or(trimmed)
            .trim();

        if inner.is_empty() {
            return Err(ParseConditionError::Empty);
        }

        let values = inner
            .split([':', ','])
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>()
                    .map_err(|_| ParseConditionError::InvalidNumber(part.to_string()))
            })
            .collect::<Result<Vec<f64>, _>>()?;

        match values.as_slice() {
            [max_change] => Ok(StopCondition::MaxDelta(*max_change)),
            [lower, upper] => Ok(StopCondition::Range {
                lower: *lower,
                upper: *upper,
            }),
            other => Err(ParseConditionError::WrongArity(other.len())),
        }
    }
}

impl fmt::Display for StopCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopCondition::Range { lower, upper } => write!(f, "{}:{}", lower, upper),
            StopCondition::MaxDelta(max_change) => write!(f, "{}", max_change),
        }
    }
}
