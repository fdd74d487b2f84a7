mod args;
mod losslog;
mod progress;

use args::Args;
use clap::Parser;
use earlystop::{EarlyStopEvaluator, ParseConditionError, StopConfig};
use log::LevelFilter;
use losslog::LossLog;
use progress::ReplayProgressBar;
use simplelog::{Config, SimpleLogger};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let args = init()?;

    let config = build_config(&args)?;
    for (name, condition) in config.conditions() {
        log::info!("Monitoring {} with {}", name, condition);
    }

    let losses = LossLog::open(&args.log)?;
    if losses.is_empty() {
        log::warn!("No steps found in {}", args.log.display());
    } else {
        log::info!("Loaded {} steps from {}", losses.len(), args.log.display());
    }

    let mut evaluator = EarlyStopEvaluator::new(config);
    match replay(&mut evaluator, &losses, args.progress)? {
        Some(step) => log::info!("Early stopping after {} steps", step),
        None => log::info!("No stop triggered in {} steps", losses.len()),
    }

    Ok(())
}

fn init() -> Result<Args, Box<dyn Error>> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    SimpleLogger::init(level, Config::default())?;

    Ok(args)
}

fn build_config(args: &Args) -> Result<StopConfig, ParseConditionError> {
    let mut config = StopConfig::new(args.max_mem, !args.any);
    for assignment in &args.conditions {
        let (name, condition) = StopConfig::parse_assignment(assignment)?;
        config.insert(name, condition);
    }
    Ok(config)
}

/// Feeds every step to the evaluator, returning the 1-based step that triggered a stop.
fn replay(
    evaluator: &mut EarlyStopEvaluator,
    losses: &LossLog,
    show_progress: bool,
) -> Result<Option<usize>, Box<dyn Error>> {
    let progress = ReplayProgressBar::new(losses.len(), show_progress)?;

    for (index, step) in losses.steps.iter().enumerate() {
        progress.update(step);

        if evaluator.evaluate(step)? {
            progress.finish();
            return Ok(Some(index + 1));
        }
    }

    progress.finish();
    Ok(None)
}
