//! Histogram command implementation

use crate::histogram::DegreeHistograms;
use anyhow::{Context, Result};
use std::path::Path;

/// Execute the histogram command
pub fn run_histogram_command(path: &Path, bins: usize) -> Result<()> {
    if bins == 0 {
        anyhow::bail!("--bins must be at least 1");
    }
    let histograms = DegreeHistograms::from_path(path, bins)
        .with_context(|| format!("Failed to build histograms from {}", path.display()))?;
    print!("{histograms}");
    Ok(())
}
