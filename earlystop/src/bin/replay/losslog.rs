use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub type Step = Vec<(String, f64)>;

/// Losses recorded by a training run, one entry per step.
#[derive(Clone, Debug, Default)]
pub struct LossLog {
    pub steps: Vec<Step>,
}

impl LossLog {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Reads lines of whitespace separated `name=value` pairs.
    /// Blank lines and lines starting with `#` are skipped.
    pub fn read<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut steps = Vec::new();

        for (index, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let step = line
                .split_whitespace()
                .map(|token| parse_token(token, index + 1))
                .collect::<io::Result<Step>>()?;

            steps.push(step);
        }

        Ok(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

fn parse_token(token: &str, line: usize) -> io::Result<(String, f64)> {
    let (name, value) = token.split_once('=').ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Line {}: expected name=value, got '{}'", line, token),
        )
    })?;

    let value: f64 = value.parse().map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Line {}: loss '{}' is not a valid float", line, name),
        )
    })?;

    Ok((name.to_string(), value))
}
