//! Command routing and execution

use crate::cli::args::Commands;
use crate::cli::commands::*;
use crate::config::{CategoryOverrides, Config, DegreeOverrides};
use anyhow::{Context, Result};
use std::path::Path;

/// Execute a CLI command based on the parsed arguments
pub fn execute_command(command: Commands, config_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Degree {
            input,
            output,
            reducers,
            summary,
            json,
        } => {
            let config = load_config(config_path)?;
            let overrides = DegreeOverrides {
                reducers,
                summary,
                json,
            };
            run_degree_command(&input, &output, &config, &overrides)
        }
        Commands::Category {
            input,
            output,
            reducers,
            column,
            header_marker,
        } => {
            let config = load_config(config_path)?;
            let overrides = CategoryOverrides {
                reducers,
                column,
                header_marker,
            };
            run_category_command(&input, &output, &config, &overrides)
        }
        Commands::Histogram { path, bins } => run_histogram_command(&path, bins),
        Commands::CategoryReport { path, top } => run_category_report_command(&path, top),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    Config::load(path).context("Failed to load configuration")
}
