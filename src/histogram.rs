//! Degree distribution histograms
//!
//! Reads the per-node lines of a degree job output and buckets in-degree,
//! out-degree and combined degree into equal-width bins.

use crate::engine::runner::read_input;
use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_BINS: usize = 20;

/// Parse `"<node>\tIn-Degree: <i>, Out-Degree: <o>"`.
///
/// Returns `None` for summary lines and anything else not shaped like a
/// node line. The node may be empty or all whitespace, so only the line
/// ending is stripped before splitting.
pub fn parse_degree_line(line: &str) -> Option<(i64, i64)> {
    let (_node, value) = line.trim_end_matches(['\r', '\n']).split_once('\t')?;
    if !(value.starts_with("In-Degree") && value.contains("Out-Degree")) {
        return None;
    }
    let mut parts = value.split(',');
    let in_degree = labelled_number(parts.next()?)?;
    let out_degree = labelled_number(parts.next()?)?;
    Some((in_degree, out_degree))
}

fn labelled_number(part: &str) -> Option<i64> {
    part.split(':').nth(1)?.trim().parse().ok()
}

/// Equal-width histogram over `[min, max]`; the last bin is closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub title: String,
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl Histogram {
    pub fn build(title: impl Into<String>, values: &[i64], bins: usize) -> Self {
        let bins = bins.max(1);
        let title = title.into();
        let (Some(&lo), Some(&hi)) = (values.iter().min(), values.iter().max()) else {
            return Self {
                title,
                edges: Vec::new(),
                counts: Vec::new(),
            };
        };

        let (start, end) = if lo == hi {
            (lo as f64 - 0.5, hi as f64 + 0.5)
        } else {
            (lo as f64, hi as f64)
        };
        let width = (end - start) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| start + width * i as f64).collect();

        let mut counts = vec![0u64; bins];
        for &v in values {
            let slot = ((v as f64 - start) / width).floor() as usize;
            counts[slot.min(bins - 1)] += 1;
        }

        Self {
            title,
            edges,
            counts,
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if self.counts.is_empty() {
            return writeln!(f, "  (no data)");
        }
        for (i, count) in self.counts.iter().enumerate() {
            writeln!(
                f,
                "  {:>12.2} .. {:<12.2} {:>10}",
                self.edges[i],
                self.edges[i + 1],
                count
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DegreeHistograms {
    pub in_degree: Histogram,
    pub out_degree: Histogram,
    pub combined: Histogram,
}

impl DegreeHistograms {
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>, bins: usize) -> Self {
        let mut ins = Vec::new();
        let mut outs = Vec::new();
        for line in lines {
            match parse_degree_line(line) {
                Some((i, o)) => {
                    ins.push(i);
                    outs.push(o);
                }
                None => debug!("Skipping non-degree line: {}", line),
            }
        }
        let combined: Vec<i64> = ins.iter().zip(&outs).map(|(i, o)| i + o).collect();

        Self {
            in_degree: Histogram::build("In-Degree", &ins, bins),
            out_degree: Histogram::build("Out-Degree", &outs, bins),
            combined: Histogram::build("Combined Degree", &combined, bins),
        }
    }

    /// Read a degree output file, or every part file of an output directory.
    pub fn from_path(path: &Path, bins: usize) -> Result<Self> {
        let contents = read_input(path)?;
        let histograms = Self::from_lines(contents.iter().flat_map(|c| c.lines()), bins);
        if histograms.in_degree.total() == 0 {
            return Err(Error::InvalidInput(format!(
                "no degree lines found in {}",
                path.display()
            )));
        }
        Ok(histograms)
    }
}

impl fmt::Display for DegreeHistograms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}\n{}", self.in_degree, self.out_degree, self.combined)
    }
}
