//! Category frequency report
//!
//! Reads the output of the category job, decodes HTML entities left in
//! category names, merges the duplicates that decoding reveals and ranks the
//! result by frequency.

use crate::engine::runner::read_input;
use crate::error::{Error, Result};
use html_escape::decode_html_entities;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Split `"<category>\t<count>"`, or `"<category>  <count>"` when the line
/// has no tab. The category is returned as written.
pub fn parse_category_line(line: &str) -> Option<(&str, u64)> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (category, count) = match line.rsplit_once('\t') {
        Some(split) => split,
        None => {
            let (category, count) = line.trim_end().rsplit_once("  ")?;
            (category.trim_end(), count)
        }
    };
    let count = count.trim().parse().ok()?;
    Some((category, count))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub category: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryReport {
    entries: Vec<CategoryEntry>,
    total: u64,
}

impl CategoryReport {
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for line in lines {
            let Some((raw, count)) = parse_category_line(line) else {
                debug!("Skipping non-count line: {}", line);
                continue;
            };
            let category = decode_html_entities(raw);
            if category != raw {
                debug!("Decoded category '{}' as '{}'", raw, category);
            }
            let slot = counts.entry(category.into_owned()).or_default();
            *slot = slot.saturating_add(count);
        }

        let total = counts.values().fold(0u64, |acc, &c| acc.saturating_add(c));
        let mut entries: Vec<CategoryEntry> = counts
            .into_iter()
            .map(|(category, count)| CategoryEntry { category, count })
            .collect();
        entries.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.category.cmp(&b.category))
        });

        Self { entries, total }
    }

    /// Read a category output file, or every part file of an output directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = read_input(path)?;
        let report = Self::from_lines(contents.iter().flat_map(|c| c.lines()));
        if report.entries.is_empty() {
            return Err(Error::InvalidInput(format!(
                "no category counts found in {}",
                path.display()
            )));
        }
        Ok(report)
    }

    /// Entries by descending count.
    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    /// Sum of all counts, including entries dropped by `truncate`.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Keep only the `n` most frequent categories.
    pub fn truncate(&mut self, n: usize) {
        self.entries.truncate(n);
    }
}

impl fmt::Display for CategoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .entries
            .iter()
            .map(|e| e.category.chars().count())
            .max()
            .unwrap_or(0)
            .max("category".len());

        writeln!(f, "Category Frequency")?;
        writeln!(
            f,
            "  {:>4}  {:<width$}  {:>10}  {:>7}",
            "rank", "category", "count", "share"
        )?;
        for (rank, entry) in self.entries.iter().enumerate() {
            let share = if self.total == 0 {
                0.0
            } else {
                entry.count as f64 * 100.0 / self.total as f64
            };
            writeln!(
                f,
                "  {:>4}  {:<width$}  {:>10}  {:>6.2}%",
                rank + 1,
                entry.category,
                entry.count,
                share
            )?;
        }
        writeln!(f, "  {:>4}  {:<width$}  {:>10}", "", "total", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pairs(report: &CategoryReport) -> Vec<(&str, u64)> {
        report
            .entries()
            .iter()
            .map(|e| (e.category.as_str(), e.count))
            .collect()
    }

    #[test]
    fn test_parse_tab_and_space_separated() {
        assert_eq!(parse_category_line("Music\t12"), Some(("Music", 12)));
        assert_eq!(
            parse_category_line("Film & Animation    7\r\n"),
            Some(("Film & Animation", 7))
        );
        assert_eq!(parse_category_line("\t3"), Some(("", 3)));
        assert_eq!(parse_category_line("Music\tmany"), None);
        assert_eq!(parse_category_line("Music 4"), None);
    }

    #[test]
    fn test_entity_duplicates_are_merged() {
        let report = CategoryReport::from_lines([
            "Film &amp; Animation\t5",
            "Film & Animation\t2",
            "Music\t6",
        ]);
        assert_eq!(pairs(&report), vec![("Film & Animation", 7), ("Music", 6)]);
        assert_eq!(report.total(), 13);
    }

    #[test]
    fn test_numeric_references_decode() {
        let report = CategoryReport::from_lines(["Pets &#38; Animals\t1", "Pets &#x26; Animals\t1"]);
        assert_eq!(pairs(&report), vec![("Pets & Animals", 2)]);
    }

    #[test]
    fn test_sorted_by_count_then_name() {
        let report = CategoryReport::from_lines(["b\t2", "c\t9", "a\t2", "junk"]);
        assert_eq!(pairs(&report), vec![("c", 9), ("a", 2), ("b", 2)]);
    }

    #[test]
    fn test_truncate_keeps_total() {
        let mut report = CategoryReport::from_lines(["a\t1", "b\t3", "c\t6"]);
        report.truncate(1);
        assert_eq!(pairs(&report), vec![("c", 6)]);
        assert_eq!(report.total(), 10);

        let rendered = report.to_string();
        assert!(rendered.contains("60.00%"));
        assert!(rendered.lines().last().unwrap().contains("10"));
    }

    #[test]
    fn test_from_path_reads_part_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("part-r-00000"), "Comedy\t4\n").unwrap();
        std::fs::write(dir.path().join("part-r-00001"), "Comedy &amp; Satire\t1\nComedy\t2\n").unwrap();
        std::fs::write(dir.path().join("_SUCCESS"), "").unwrap();

        let report = CategoryReport::from_path(dir.path()).unwrap();
        assert_eq!(pairs(&report), vec![("Comedy", 6), ("Comedy & Satire", 1)]);
    }

    #[test]
    fn test_no_counts_is_invalid_input() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.tsv");
        std::fs::write(&path, "not a count line\n").unwrap();
        assert!(matches!(
            CategoryReport::from_path(&path),
            Err(Error::InvalidInput(_))
        ));
    }
}
