//! CLI argument structures
//!
//! This module defines the main CLI structure and all subcommand definitions.

use crate::degree::SummaryMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Degree and category statistics over tab-separated relation graphs
#[derive(Parser, Debug)]
#[command(name = "relgraph")]
#[command(about = "relgraph - Degree and category statistics over tab-separated relation graphs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a relgraph.toml configuration file
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute in-degree and out-degree of every node plus summary statistics
    #[command(name = "degree")]
    Degree {
        /// Relation file, or directory of relation files
        input: PathBuf,

        /// Output directory (must not exist)
        output: PathBuf,

        /// Number of reduce partitions
        #[arg(short = 'r', long)]
        reducers: Option<usize>,

        /// Where summary statistics are written
        #[arg(long, value_enum)]
        summary: Option<SummaryMode>,

        /// Also write summary.json
        #[arg(long)]
        json: bool,
    },

    /// Count how many records fall into each category
    #[command(name = "category")]
    Category {
        /// Record file, or directory of record files
        input: PathBuf,

        /// Output directory (must not exist)
        output: PathBuf,

        /// Number of reduce partitions
        #[arg(short = 'r', long)]
        reducers: Option<usize>,

        /// Zero-based index of the category column
        #[arg(long)]
        column: Option<usize>,

        /// Lines containing this text are treated as headers and skipped
        #[arg(long, value_name = "TEXT")]
        header_marker: Option<String>,
    },

    /// Print in-degree, out-degree and combined degree histograms of a degree output
    #[command(name = "histogram")]
    Histogram {
        /// Degree output directory or part file
        path: PathBuf,

        /// Number of equal-width bins
        #[arg(long, default_value = "20")]
        bins: usize,
    },

    /// Rank categories of a category output by frequency
    #[command(name = "category-report")]
    CategoryReport {
        /// Category output directory or part file
        path: PathBuf,

        /// Show only the N most frequent categories
        #[arg(long, value_name = "N")]
        top: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_degree_flags() {
        let cli = Cli::parse_from([
            "relgraph",
            "-vv",
            "degree",
            "in.tsv",
            "out",
            "-r",
            "4",
            "--summary",
            "per-partition",
            "--json",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Degree {
                reducers,
                summary,
                json,
                ..
            } => {
                assert_eq!(reducers, Some(4));
                assert_eq!(summary, Some(SummaryMode::PerPartition));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_histogram_default_bins() {
        let cli = Cli::parse_from(["relgraph", "histogram", "out"]);
        assert!(matches!(cli.command, Commands::Histogram { bins: 20, .. }));
    }

    #[test]
    fn test_parse_category_report_top() {
        let cli = Cli::parse_from(["relgraph", "category-report", "out", "--top", "5"]);
        assert!(matches!(
            cli.command,
            Commands::CategoryReport { top: Some(5), .. }
        ));
    }
}
