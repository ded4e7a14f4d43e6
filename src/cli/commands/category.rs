//! Category command implementation

use crate::category;
use crate::config::{CategoryOverrides, Config};
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Execute the category command
pub fn run_category_command(
    input: &Path,
    output: &Path,
    config: &Config,
    overrides: &CategoryOverrides,
) -> Result<()> {
    let options = config
        .category_options(overrides)
        .context("Invalid category job settings")?;
    info!(
        "Running category job on {} (column {}, {} reducer(s))",
        input.display(),
        options.column,
        options.reducers
    );

    OutputWriter::check_target(output)?;
    let parts = category::run(input, &options)
        .with_context(|| format!("Category job failed on {}", input.display()))?;
    let writer = OutputWriter::create(output)
        .with_context(|| format!("Cannot create output directory {}", output.display()))?;
    writer
        .write_parts(&parts)
        .context("Failed to write part files")?;
    let dir = writer.commit()?;

    println!("Category output written to {}", dir.display());
    Ok(())
}
