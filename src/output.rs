//! Job output directory
//!
//! Layout: one `part-r-NNNNN` file per partition, `summary.tsv` (and
//! optionally `summary.json`) for a merged degree summary, and an empty
//! `_SUCCESS` marker written last.

use crate::degree::DegreeSummary;
use crate::engine::OutputPair;
use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const SUCCESS_MARKER: &str = "_SUCCESS";
pub const SUMMARY_FILE: &str = "summary.tsv";
pub const SUMMARY_JSON_FILE: &str = "summary.json";

pub fn part_file_name(index: usize) -> String {
    format!("part-r-{index:05}")
}

#[derive(Debug)]
pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    /// Fail early when `dir` is already taken.
    pub fn check_target(dir: &Path) -> Result<()> {
        if dir.exists() {
            return Err(Error::OutputExists(dir.to_path_buf()));
        }
        Ok(())
    }

    /// Create the output directory. It must not exist yet.
    pub fn create(dir: &Path) -> Result<Self> {
        Self::check_target(dir)?;
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write_parts(&self, parts: &[Vec<OutputPair>]) -> Result<Vec<PathBuf>> {
        parts
            .iter()
            .enumerate()
            .map(|(index, pairs)| {
                let path = self.dir.join(part_file_name(index));
                write_pairs(&path, pairs)?;
                debug!("Wrote {} lines to {}", pairs.len(), path.display());
                Ok(path)
            })
            .collect()
    }

    pub fn write_summary(&self, summary: &DegreeSummary, json: bool) -> Result<()> {
        write_pairs(&self.dir.join(SUMMARY_FILE), &summary.to_pairs())?;
        if json {
            let mut writer = BufWriter::new(File::create(self.dir.join(SUMMARY_JSON_FILE))?);
            serde_json::to_writer_pretty(&mut writer, summary)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Mark the output complete.
    pub fn commit(self) -> Result<PathBuf> {
        File::create(self.dir.join(SUCCESS_MARKER))?;
        Ok(self.dir)
    }
}

fn write_pairs(path: &Path, pairs: &[OutputPair]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for pair in pairs {
        writeln!(writer, "{pair}")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::degree::StatsAccumulator;
    use tempfile::TempDir;

    #[test]
    fn test_part_file_names_are_zero_padded() {
        assert_eq!(part_file_name(0), "part-r-00000");
        assert_eq!(part_file_name(12), "part-r-00012");
    }

    #[test]
    fn test_existing_directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        let err = OutputWriter::create(dir.path()).unwrap_err();
        assert!(matches!(err, Error::OutputExists(_)));
    }

    #[test]
    fn test_writes_parts_summary_and_marker() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let writer = OutputWriter::create(&out).unwrap();

        let parts = vec![
            vec![OutputPair::new("a", "In-Degree: 1, Out-Degree: 0")],
            Vec::new(),
        ];
        let paths = writer.write_parts(&parts).unwrap();
        assert_eq!(paths.len(), 2);

        let mut acc = StatsAccumulator::new();
        acc.observe(1, 0);
        writer.write_summary(&acc.summary(), true).unwrap();
        writer.commit().unwrap();

        assert_eq!(
            fs::read_to_string(out.join("part-r-00000")).unwrap(),
            "a\tIn-Degree: 1, Out-Degree: 0\n"
        );
        assert_eq!(fs::read_to_string(out.join("part-r-00001")).unwrap(), "");
        let summary = fs::read_to_string(out.join(SUMMARY_FILE)).unwrap();
        assert!(summary.starts_with("Average Degree\t1.0\n"));
        assert_eq!(summary.lines().count(), 9);

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join(SUMMARY_JSON_FILE)).unwrap())
                .unwrap();
        assert_eq!(json["node_count"], 1);
        assert_eq!(json["in_degree"]["max"], 1);
        assert!(out.join(SUCCESS_MARKER).exists());
    }
}
