use crate::condition::StopCondition;
use crate::error::{ConfigError, ParseConditionError};
use crate::snapshot::LossSnapshot;

/// Which stop conditions are monitored and how their results combine.
#[derive(Debug, Clone, PartialEq)]
pub struct StopConfig {
    conditions: Vec<(String, StopCondition)>,
    max_mem: usize,
    stop_on_all: bool,
}

impl StopConfig {
    /// Creates a configuration without conditions, which never stops.
    ///
    /// `max_mem` is the number of recent values each window keeps. With
    /// `stop_on_all` every condition must hold before stopping, otherwise one
    /// is enough.
    pub fn new(max_mem: usize, stop_on_all: bool) -> Self {
        Self {
            conditions: Vec::new(),
            max_mem,
            stop_on_all,
        }
    }

    pub fn with_condition(mut self, name: impl Into<String>, condition: StopCondition) -> Self {
        self.insert(name, condition);
        self
    }

    /// Adds a condition, replacing an existing one for the same loss in place.
    pub fn insert(&mut self, name: impl Into<String>, condition: StopCondition) {
        let name = name.into();
        match self.conditions.iter().position(|(existing, _)| *existing == name) {
            Some(index) => self.conditions[index].1 = condition,
            None => self.conditions.push((name, condition)),
        }
    }

    pub fn condition(&self, name: &str) -> Option<&StopCondition> {
        self.conditions
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, condition)| condition)
    }

    /// Conditions in the order they were added.
    pub fn conditions(&self) -> impl Iterator<Item = (&str, &StopCondition)> {
        self.conditions
            .iter()
            .map(|(name, condition)| (name.as_str(), condition))
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn max_mem(&self) -> usize {
        self.max_mem
    }

    pub fn stop_on_all(&self) -> bool {
        self.stop_on_all
    }

    /// Parses a `name=condition` assignment, e.g. `val_loss=0.01` or `train_loss=0.1:0.9`.
    pub fn parse_assignment(input: &str) -> Result<(String, StopCondition), ParseConditionError> {
        let Some((name, condition)) = input.split_once('=') else {
            return Err(ParseConditionError::MissingName(input.to_string()));
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(ParseConditionError::MissingName(input.to_string()));
        }

        Ok((name.to_string(), condition.parse()?))
    }

    /// Checks the configuration against the losses the training loop reports.
    pub fn validate<S: LossSnapshot + ?Sized>(&self, snapshot: &S) -> Result<(), ConfigError> {
        if self.is_empty() {
            return Ok(());
        }

        if self.max_mem == 0 {
            return Err(ConfigError::EmptyWindow {
                max_mem: self.max_mem,
            });
        }

        for (name, condition) in self.conditions() {
            if !snapshot.contains(name) {
                return Err(ConfigError::UnrecognizedLoss {
                    name: name.to_string(),
                });
            }
            condition.validate(name)?;
        }

        Ok(())
    }
}

impl<N: Into<String>> Extend<(N, StopCondition)> for StopConfig {
    fn extend<I: IntoIterator<Item = (N, StopCondition)>>(&mut self, iter: I) {
        for (name, condition) in iter {
            self.insert(name, condition);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order_and_replaces_in_place() {
        let config = StopConfig::new(3, true)
            .with_condition("train", StopCondition::max_delta(0.1))
            .with_condition("val", StopCondition::range(0.1, 0.9))
            .with_condition("train", StopCondition::max_delta(0.2));

        let names: Vec<&str> = config.conditions().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["train", "val"]);
        assert_eq!(config.condition("train"), Some(&StopCondition::max_delta(0.2)));
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            StopConfig::parse_assignment("val_loss=0.01"),
            Ok(("val_loss".to_string(), StopCondition::max_delta(0.01)))
        );
        assert_eq!(
            StopConfig::parse_assignment(" train = [0.1, 0.9]"),
            Ok(("train".to_string(), StopCondition::range(0.1, 0.9)))
        );
        assert!(matches!(
            StopConfig::parse_assignment("0.01"),
            Err(ParseConditionError::MissingName(_))
        ));
        assert!(matches!(
            StopConfig::parse_assignment("=0.01"),
            Err(ParseConditionError::MissingName(_))
        ));
        assert!(matches!(
            StopConfig::parse_assignment("loss=x"),
            Err(ParseConditionError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_validate_window_size_first() {
        let config = StopConfig::new(0, true).with_condition("missing", StopCondition::max_delta(0.0));
        let snapshot = [("train", 1.0)];

        assert_eq!(
            config.validate(&snapshot),
            Err(ConfigError::EmptyWindow { max_mem: 0 })
        );
    }

    #[test]
    fn test_validate_unrecognized_loss() {
        let config = StopConfig::new(3, true)
            .with_condition("train", StopCondition::max_delta(0.1))
            .with_condition("val", StopCondition::max_delta(0.1));
        let snapshot = [("train", 1.0)];

        assert_eq!(
            config.validate(&snapshot),
            Err(ConfigError::UnrecognizedLoss {
                name: "val".to_string()
            })
        );
    }

    #[test]
    fn test_validate_reports_first_bad_condition() {
        let config = StopConfig::new(3, false)
            .with_condition("a", StopCondition::range(0.9, 0.1))
            .with_condition("b", StopCondition::max_delta(0.0));
        let snapshot = [("a", 1.0), ("b", 1.0)];

        let err = config.validate(&snapshot).unwrap_err();
        assert_eq!(err.loss_name(), Some("a"));
    }

    #[test]
    fn test_empty_config_is_always_valid() {
        let config = StopConfig::new(0, true);
        assert!(config.validate(&[("train", 1.0)]).is_ok());
    }

    #[test]
    fn test_extend() {
        let mut config = StopConfig::new(2, true);
        config.extend([
            ("a", StopCondition::max_delta(0.1)),
            ("b", StopCondition::range(0.0, 1.0)),
        ]);
        assert_eq!(config.len(), 2);
        assert!(config.stop_on_all());
        assert_eq!(config.max_mem(), 2);
    }
}
