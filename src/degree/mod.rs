//! Degree job
//!
//! Computes the in-degree and out-degree of every node named by a relation
//! file, plus average, maximum and minimum of degree, in-degree and
//! out-degree.
//!
//! - `parser` - Field splitting and the related-node predicate
//! - `record` - `DegreeRecord` and its eight-byte wire format
//! - `emitter` - Emit hook turning lines into degree records
//! - `aggregator` - Group hook summing records per node
//! - `stats` - Running statistics and the nine summary lines

pub mod aggregator;
pub mod emitter;
pub mod parser;
pub mod record;
pub mod stats;

pub use aggregator::DegreeAggregator;
pub use emitter::DegreeEmitter;
pub use record::DegreeRecord;
pub use stats::{DegreeSummary, StatsAccumulator};

use crate::engine::{LocalRunner, OutputPair, PartitionRun};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Where the end-of-partition statistics go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryMode {
    /// Merge every partition's statistics into one global summary.
    #[default]
    Merged,
    /// Append each partition's own statistics to its output.
    PerPartition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeOptions {
    pub reducers: usize,
    pub summary: SummaryMode,
}

impl Default for DegreeOptions {
    fn default() -> Self {
        Self {
            reducers: 1,
            summary: SummaryMode::Merged,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DegreeOutput {
    /// Output lines of each partition, in partition order.
    pub parts: Vec<Vec<OutputPair>>,
    /// The global summary, present in merged mode.
    pub summary: Option<DegreeSummary>,
}

/// Run the degree job over a file or directory of relation records.
pub fn run(input: &Path, options: &DegreeOptions) -> Result<DegreeOutput> {
    let runner = runner_for(options);
    let runs = runner.run(input, &DegreeEmitter, |_| DegreeAggregator::new())?;
    Ok(finish(runs, options.summary))
}

/// Run the degree job over lines already in memory.
pub fn run_lines(lines: &[&str], options: &DegreeOptions) -> Result<DegreeOutput> {
    let runner = runner_for(options);
    let shuffles = runner.map_lines(&DegreeEmitter, lines);
    let runs = runner.reduce_partitions(shuffles, |_| DegreeAggregator::new())?;
    Ok(finish(runs, options.summary))
}

fn runner_for(options: &DegreeOptions) -> LocalRunner {
    if options.summary == SummaryMode::PerPartition && options.reducers > 1 {
        warn!(
            "Per-partition summaries with {} reducers describe only their own partition",
            options.reducers
        );
    }
    LocalRunner::new(options.reducers)
}

fn finish(runs: Vec<PartitionRun<DegreeAggregator>>, mode: SummaryMode) -> DegreeOutput {
    match mode {
        SummaryMode::PerPartition => {
            let parts = runs
                .into_iter()
                .map(|run| {
                    let mut pairs = run.pairs;
                    pairs.extend(run.reducer.finalize());
                    pairs
                })
                .collect();
            DegreeOutput {
                parts,
                summary: None,
            }
        }
        SummaryMode::Merged => {
            let mut parts = Vec::with_capacity(runs.len());
            let mut accumulators = Vec::with_capacity(runs.len());
            for run in runs {
                parts.push(run.pairs);
                accumulators.push(run.reducer.into_stats());
            }
            let summary = StatsAccumulator::merge_all(accumulators).summary();
            info!("Computed degrees for {} nodes", summary.node_count);
            DegreeOutput {
                parts,
                summary: Some(summary),
            }
        }
    }
}
