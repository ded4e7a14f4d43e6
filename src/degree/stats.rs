//! Running degree statistics
//!
//! A `StatsAccumulator` is owned by exactly one aggregator. Accumulators from
//! different partitions combine with [`StatsAccumulator::merge`], which is
//! associative and commutative with [`StatsAccumulator::new`] as identity, so
//! merging per-partition state gives the same answer as one big partition.

use crate::engine::OutputPair;
use rayon::prelude::*;
use serde::Serialize;

/// Rendered in place of every summary value when no node was observed.
pub const UNDEFINED: &str = "undefined";

/// Total, maximum and minimum of one measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureStats {
    pub total: i64,
    pub max: i32,
    pub min: i32,
}

impl MeasureStats {
    pub fn new() -> Self {
        Self {
            total: 0,
            max: i32::MIN,
            min: i32::MAX,
        }
    }

    pub fn observe(&mut self, value: i32) {
        self.total += i64::from(value);
        self.max = self.max.max(value);
        self.min = self.min.min(value);
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            max: self.max.max(other.max),
            min: self.min.min(other.min),
        }
    }

    fn summarize(&self, count: u64) -> Option<MeasureSummary> {
        if count == 0 {
            return None;
        }
        Some(MeasureSummary {
            average: self.total as f64 / count as f64,
            max: self.max,
            min: self.min,
            total: self.total,
        })
    }
}

impl Default for MeasureStats {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsAccumulator {
    pub degree: MeasureStats,
    pub in_degree: MeasureStats,
    pub out_degree: MeasureStats,
    pub node_count: u64,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one node's summed in- and out-degree.
    pub fn observe(&mut self, in_degree: i32, out_degree: i32) {
        self.degree.observe(in_degree.saturating_add(out_degree));
        self.in_degree.observe(in_degree);
        self.out_degree.observe(out_degree);
        self.node_count += 1;
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            degree: self.degree.merge(other.degree),
            in_degree: self.in_degree.merge(other.in_degree),
            out_degree: self.out_degree.merge(other.out_degree),
            node_count: self.node_count + other.node_count,
        }
    }

    /// Merge any number of accumulators in parallel.
    pub fn merge_all(accumulators: Vec<StatsAccumulator>) -> StatsAccumulator {
        accumulators
            .into_par_iter()
            .reduce(StatsAccumulator::new, StatsAccumulator::merge)
    }

    pub fn summary(&self) -> DegreeSummary {
        DegreeSummary {
            node_count: self.node_count,
            degree: self.degree.summarize(self.node_count),
            in_degree: self.in_degree.summarize(self.node_count),
            out_degree: self.out_degree.summarize(self.node_count),
        }
    }
}

/// Finished statistics for one measure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeasureSummary {
    pub average: f64,
    pub max: i32,
    pub min: i32,
    pub total: i64,
}

/// Finished statistics for all three measures. A measure is `None` when no
/// node was observed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DegreeSummary {
    pub node_count: u64,
    pub degree: Option<MeasureSummary>,
    pub in_degree: Option<MeasureSummary>,
    pub out_degree: Option<MeasureSummary>,
}

impl DegreeSummary {
    /// The nine summary lines: average, max and min of degree, in-degree and
    /// out-degree, in that order.
    pub fn to_pairs(&self) -> Vec<OutputPair> {
        let measures = [
            ("Degree", &self.degree),
            ("In-Degree", &self.in_degree),
            ("Out-Degree", &self.out_degree),
        ];

        let mut pairs = Vec::with_capacity(9);
        for (name, measure) in measures {
            let (average, max, min) = match measure {
                Some(m) => (
                    format_average(m.average),
                    m.max.to_string(),
                    m.min.to_string(),
                ),
                None => (UNDEFINED.into(), UNDEFINED.into(), UNDEFINED.into()),
            };
            pairs.push(OutputPair::new(format!("Average {name}"), average));
            pairs.push(OutputPair::new(format!("Max {name}"), max));
            pairs.push(OutputPair::new(format!("Min {name}"), min));
        }
        pairs
    }
}

/// Shortest round-trip form, always with a fractional part (`2.0`, `2.5`).
fn format_average(value: f64) -> String {
    format!("{value:?}")
}
