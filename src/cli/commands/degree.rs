//! Degree command implementation

use crate::config::{Config, DegreeOverrides};
use crate::degree;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// Execute the degree command
pub fn run_degree_command(
    input: &Path,
    output: &Path,
    config: &Config,
    overrides: &DegreeOverrides,
) -> Result<()> {
    let (options, json) = config
        .degree_options(overrides)
        .context("Invalid degree job settings")?;
    info!(
        "Running degree job on {} with {} reducer(s), {:?} summary",
        input.display(),
        options.reducers,
        options.summary
    );

    OutputWriter::check_target(output)?;
    let result = degree::run(input, &options)
        .with_context(|| format!("Degree job failed on {}", input.display()))?;
    let writer = OutputWriter::create(output)
        .with_context(|| format!("Cannot create output directory {}", output.display()))?;

    writer
        .write_parts(&result.parts)
        .context("Failed to write part files")?;
    match &result.summary {
        Some(summary) => writer
            .write_summary(summary, json)
            .context("Failed to write summary")?,
        None if json => warn!("--json is ignored with per-partition summaries"),
        None => {}
    }
    let dir = writer.commit()?;

    println!("Degree output written to {}", dir.display());
    Ok(())
}
