use ahash::AHashMap;

use crate::condition::StopCondition;
use crate::config::StopConfig;
use crate::error::StopError;
use crate::snapshot::{LossSnapshot, LossSource};
use crate::window::LossWindow;

/// Decides once per training step whether training should halt.
///
/// Every monitored loss keeps a rolling window of its last `max_mem` values.
/// A loss's condition is only checked once its window is full; the per-loss
/// results are then combined with AND (`stop_on_all`) or OR.
///
/// The configuration is validated lazily against the first snapshot passed to
/// [`evaluate`](Self::evaluate). Once a value has been recorded the evaluator
/// is validated for the rest of its life.
#[derive(Debug, Clone)]
pub struct EarlyStopEvaluator {
    config: StopConfig,
    history: AHashMap<String, LossWindow>,
}

impl EarlyStopEvaluator {
    pub fn new(config: StopConfig) -> Self {
        Self {
            config,
            history: AHashMap::new(),
        }
    }

    pub fn from_parts<I, N>(conditions: I, max_mem: usize, stop_on_all: bool) -> Self
    where
        I: IntoIterator<Item = (N, StopCondition)>,
        N: Into<String>,
    {
        let mut config = StopConfig::new(max_mem, stop_on_all);
        config.extend(conditions);
        Self::new(config)
    }

    pub fn config(&self) -> &StopConfig {
        &self.config
    }

    /// Returns false when no conditions are configured and the evaluator never stops.
    pub fn is_enabled(&self) -> bool {
        !self.config.is_empty()
    }

    pub fn is_validated(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history(&self, name: &str) -> Option<&LossWindow> {
        self.history.get(name)
    }

    /// Records the current losses and returns whether training should stop.
    ///
    /// The first call validates the configuration against `current_losses`.
    /// A configuration error records nothing, so the evaluator stays
    /// unvalidated and the next call validates again.
    pub fn evaluate<S: LossSnapshot + ?Sized>(
        &mut self,
        current_losses: &S,
    ) -> Result<bool, StopError> {
        if !self.is_enabled() {
            return Ok(false);
        }

        if !self.is_validated() {
            self.config.validate(current_losses)?;
            log::debug!(
                "Early stop configured on {} loss(es), window of {}",
                self.config.len(),
                self.config.max_mem()
            );
        }

        // Read everything up front so a bad snapshot leaves the history untouched
        let values = self
            .config
            .conditions()
            .map(|(name, _)| read_loss(current_losses, name))
            .collect::<Result<Vec<f64>, StopError>>()?;

        let max_mem = self.config.max_mem();
        let mut fulfilled = Vec::with_capacity(values.len());

        for ((name, condition), value) in self.config.conditions().zip(values) {
            let window = self
                .history
                .entry(name.to_string())
                .or_insert_with(|| LossWindow::new(max_mem));
            window.push(value);

            let satisfied = condition.check(window);
            log::trace!(
                "{}: {:.6} ({}/{}) satisfied: {}",
                name,
                value,
                window.len(),
                max_mem,
                satisfied
            );
            fulfilled.push(satisfied);
        }

        if self.config.stop_on_all() {
            if fulfilled.iter().all(|&satisfied| satisfied) {
                log::info!("all stop criteria fulfilled : stop");
                return Ok(true);
            }
        } else if fulfilled.iter().any(|&satisfied| satisfied) {
            log::info!("at least one stop criterion fulfilled : stop");
            return Ok(true);
        }

        Ok(false)
    }

    /// Asks `source` for its current losses and evaluates them.
    pub fn check<M: LossSource + ?Sized>(&mut self, source: &M) -> Result<bool, StopError> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let losses = source.current_losses();
        self.evaluate(&losses)
    }
}

fn read_loss<S: LossSnapshot + ?Sized>(snapshot: &S, name: &str) -> Result<f64, StopError> {
    let value = snapshot.loss(name).ok_or_else(|| StopError::MissingLoss {
        name: name.to_string(),
    })?;

    if !value.is_finite() {
        return Err(StopError::NonFiniteLoss {
            name: name.to_string(),
            value,
        });
    }

    Ok(value)
}
