use super::record::DegreeRecord;
use super::stats::StatsAccumulator;
use crate::engine::{OutputPair, Reducer};

/// Group hook of the degree job.
///
/// Sums every record of a node, emits the node's line and folds the sums
/// into the partition's running statistics. The aggregator ends its life in
/// exactly one of two ways: [`finalize`](Self::finalize) renders the
/// statistics as summary lines, [`into_stats`](Self::into_stats) hands them
/// over for a cross-partition merge.
#[derive(Debug, Default)]
pub struct DegreeAggregator {
    stats: StatsAccumulator,
}

impl DegreeAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &StatsAccumulator {
        &self.stats
    }

    pub fn aggregate<I>(&mut self, node: &str, records: I) -> OutputPair
    where
        I: IntoIterator<Item = DegreeRecord>,
    {
        let total: DegreeRecord = records.into_iter().sum();
        self.stats.observe(total.in_degree, total.out_degree);
        OutputPair::new(
            node,
            format!(
                "In-Degree: {}, Out-Degree: {}",
                total.in_degree, total.out_degree
            ),
        )
    }

    pub fn finalize(self) -> Vec<OutputPair> {
        self.stats.summary().to_pairs()
    }

    pub fn into_stats(self) -> StatsAccumulator {
        self.stats
    }
}

impl Reducer for DegreeAggregator {
    type Value = DegreeRecord;

    fn reduce(&mut self, key: &str, values: Vec<DegreeRecord>) -> OutputPair {
        self.aggregate(key, values)
    }
}
