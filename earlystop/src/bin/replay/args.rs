use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "Early Stop Replay")]
#[command(author = "Jørgen Hanssen <jorgen@hanssen.io>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Loss log with one step per line of `name=value` pairs.
    #[arg(short, long)]
    pub log: PathBuf,

    /// Stop condition as `name=max_change` or `name=lower:upper`. Repeatable.
    #[arg(short, long = "condition", required = true)]
    pub conditions: Vec<String>,

    /// Number of recent values each condition looks at.
    #[arg(long, default_value_t = 5)]
    pub max_mem: usize,

    /// Stop when any condition holds instead of all of them.
    #[arg(long)]
    pub any: bool,

    /// Show a progress bar while replaying.
    #[arg(long)]
    pub progress: bool,

    /// Log per-step window details.
    #[arg(short, long)]
    pub verbose: bool,
}
