//! Category frequency job
//!
//! Counts how many records carry each value of a categorical column. Header
//! lines are recognised by a marker substring and skipped.
//!
//! - `report` - Ranked frequency table built from the job's output

pub mod report;

pub use report::CategoryReport;

use crate::engine::{LocalRunner, Mapper, OutputPair, Reducer};
use crate::error::Result;
use std::path::Path;
use tracing::info;

pub const DEFAULT_COLUMN: usize = 3;
pub const DEFAULT_HEADER_MARKER: &str = "video_id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOptions {
    pub reducers: usize,
    pub column: usize,
    pub header_marker: String,
}

impl Default for CategoryOptions {
    fn default() -> Self {
        Self {
            reducers: 1,
            column: DEFAULT_COLUMN,
            header_marker: DEFAULT_HEADER_MARKER.to_string(),
        }
    }
}

/// Emits `(category, 1)` for every data line long enough to have the column.
#[derive(Debug, Clone)]
pub struct CategoryMapper {
    column: usize,
    header_marker: String,
}

impl CategoryMapper {
    pub fn new(column: usize, header_marker: impl Into<String>) -> Self {
        Self {
            column,
            header_marker: header_marker.into(),
        }
    }

    fn is_header(&self, line: &str) -> bool {
        !self.header_marker.is_empty() && line.contains(self.header_marker.as_str())
    }
}

impl Default for CategoryMapper {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMN, DEFAULT_HEADER_MARKER)
    }
}

impl Mapper for CategoryMapper {
    type Value = i32;

    fn map(&self, line: &str, emit: &mut dyn FnMut(&str, i32)) {
        if self.is_header(line) {
            return;
        }
        if let Some(category) = line.split('\t').nth(self.column) {
            emit(category, 1);
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryCounter;

impl Reducer for CategoryCounter {
    type Value = i32;

    fn reduce(&mut self, key: &str, values: Vec<i32>) -> OutputPair {
        let total = values.into_iter().fold(0i32, i32::saturating_add);
        OutputPair::new(key, total.to_string())
    }
}

/// Run the category job; returns each partition's lines in partition order.
pub fn run(input: &Path, options: &CategoryOptions) -> Result<Vec<Vec<OutputPair>>> {
    let mapper = CategoryMapper::new(options.column, options.header_marker.clone());
    let runs = LocalRunner::new(options.reducers).run(input, &mapper, |_| CategoryCounter)?;
    let parts: Vec<Vec<OutputPair>> = runs.into_iter().map(|run| run.pairs).collect();
    info!(
        "Counted {} categories",
        parts.iter().map(Vec::len).sum::<usize>()
    );
    Ok(parts)
}
