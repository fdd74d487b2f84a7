use indicatif::{ProgressBar, ProgressStyle};

use crate::losslog::Step;

pub struct ReplayProgressBar {
    bar: ProgressBar,
}

impl ReplayProgressBar {
    pub fn new(num_steps: usize, visible: bool) -> Result<Self, Box<dyn std::error::Error>> {
        let bar = if visible {
            ProgressBar::new(num_steps as u64)
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} {pos}/{len} [{wide_bar:.cyan/blue}] | {msg}")?,
        );
        Ok(Self { bar })
    }

    pub fn update(&self, step: &Step) {
        let losses = step
            .iter()
            .map(|(name, value)| format!("{}: {:.5}", name, value))
            .collect::<Vec<_>>()
            .join(", ");
        self.bar.set_message(losses);
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
