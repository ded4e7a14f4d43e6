//! Map, shuffle and reduce wiring for a single process

use super::{drive, Codec, InMemoryShuffle, Mapper, OutputPair, Partitioner, Reducer};
use crate::error::{Error, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// The output of one reducer after all of its groups were visited.
///
/// The reducer itself is handed back un-finalized so the caller decides how
/// its end-of-partition state is turned into output.
#[derive(Debug)]
pub struct PartitionRun<R> {
    pub index: usize,
    pub pairs: Vec<OutputPair>,
    pub reducer: R,
}

#[derive(Debug, Clone, Default)]
pub struct LocalRunner {
    partitioner: Partitioner,
}

impl LocalRunner {
    pub fn new(partitions: usize) -> Self {
        Self {
            partitioner: Partitioner::new(partitions),
        }
    }

    pub fn partitions(&self) -> usize {
        self.partitioner.partitions()
    }

    /// Read every input file and run the whole job over its lines.
    pub fn run<M, R, F>(&self, input: &Path, mapper: &M, make_reducer: F) -> Result<Vec<PartitionRun<R>>>
    where
        M: Mapper,
        R: Reducer<Value = M::Value> + Send,
        F: Fn(usize) -> R + Sync,
    {
        let contents = read_input(input)?;
        let lines: Vec<&str> = contents.iter().flat_map(|c| c.lines()).collect();
        info!(
            "Read {} lines from {} input file(s)",
            lines.len(),
            contents.len()
        );

        let shuffles = self.map_lines(mapper, &lines);
        self.reduce_partitions(shuffles, make_reducer)
    }

    /// Emit over all lines in parallel and route the encoded values to partitions.
    pub fn map_lines<M: Mapper>(&self, mapper: &M, lines: &[&str]) -> Vec<InMemoryShuffle<M::Value>> {
        let emitted: Vec<Vec<(String, Vec<u8>)>> = lines
            .par_iter()
            .map(|line| {
                let mut out = Vec::new();
                mapper.map(line, &mut |key, value| {
                    let mut buf = Vec::with_capacity(<M::Value as Codec>::WIDTH);
                    value.encode(&mut buf);
                    out.push((key.to_string(), buf));
                });
                out
            })
            .collect();

        let mut shuffles: Vec<InMemoryShuffle<M::Value>> =
            (0..self.partitions()).map(|_| InMemoryShuffle::new()).collect();
        for (key, bytes) in emitted.into_iter().flatten() {
            let index = self.partitioner.partition_for(&key);
            shuffles[index].push_encoded(&key, bytes);
        }

        for (index, shuffle) in shuffles.iter().enumerate() {
            debug!(
                "Partition {}: {} keys, {} records",
                index,
                shuffle.keys(),
                shuffle.records()
            );
        }
        shuffles
    }

    /// Drive one fresh reducer per partition, partitions running in parallel.
    pub fn reduce_partitions<V, R, F>(
        &self,
        shuffles: Vec<InMemoryShuffle<V>>,
        make_reducer: F,
    ) -> Result<Vec<PartitionRun<R>>>
    where
        V: Codec + Send,
        R: Reducer<Value = V> + Send,
        F: Fn(usize) -> R + Sync,
    {
        shuffles
            .into_par_iter()
            .enumerate()
            .map(|(index, mut shuffle)| {
                let mut reducer = make_reducer(index);
                let pairs = drive(&mut shuffle, &mut reducer)?;
                debug!("Partition {} reduced {} keys", index, pairs.len());
                Ok(PartitionRun {
                    index,
                    pairs,
                    reducer,
                })
            })
            .collect()
    }
}

/// Load a single file, or every data file directly inside a directory.
///
/// Files whose names start with `_` or `.` are markers or hidden files and
/// are skipped.
pub fn read_input(input: &Path) -> Result<Vec<String>> {
    if !input.exists() {
        return Err(Error::InputNotFound(input.to_path_buf()));
    }
    if input.is_file() {
        return Ok(vec![std::fs::read_to_string(input)?]);
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(input)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| Error::InvalidInput(e.to_string()))?;
        let name = entry.file_name().to_string_lossy();
        if entry.file_type().is_file() && !name.starts_with('_') && !name.starts_with('.') {
            files.push(entry.into_path());
        }
    }

    files
        .iter()
        .map(|path| {
            debug!("Reading input file {}", path.display());
            std::fs::read_to_string(path).map_err(Error::from)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct WordMapper;

    impl Mapper for WordMapper {
        type Value = i32;

        fn map(&self, line: &str, emit: &mut dyn FnMut(&str, i32)) {
            for word in line.split_whitespace() {
                emit(word, 1);
            }
        }
    }

    #[derive(Default)]
    struct CountingReducer {
        calls: usize,
    }

    impl Reducer for CountingReducer {
        type Value = i32;

        fn reduce(&mut self, key: &str, values: Vec<i32>) -> OutputPair {
            self.calls += 1;
            OutputPair::new(key, values.iter().sum::<i32>().to_string())
        }
    }

    #[test]
    fn test_every_key_lands_in_exactly_one_partition() {
        let runner = LocalRunner::new(3);
        let lines = ["a b c", "a d", "e a"];
        let shuffles = runner.map_lines(&WordMapper, &lines);
        assert_eq!(shuffles.len(), 3);
        assert_eq!(shuffles.iter().map(|s| s.keys()).sum::<usize>(), 5);
        assert_eq!(shuffles.iter().map(|s| s.records()).sum::<usize>(), 7);

        let runs = runner
            .reduce_partitions(shuffles, |_| CountingReducer::default())
            .unwrap();
        let calls: usize = runs.iter().map(|r| r.reducer.calls).sum();
        assert_eq!(calls, 5);

        let mut all: Vec<OutputPair> = runs.into_iter().flat_map(|r| r.pairs).collect();
        all.sort_by(|a, b| a.key.cmp(&b.key));
        assert_eq!(all[0], OutputPair::new("a", "3"));
    }

    #[test]
    fn test_runs_come_back_in_partition_order() {
        let runner = LocalRunner::new(4);
        let shuffles = runner.map_lines(&WordMapper, &["x y z w v"]);
        let runs = runner
            .reduce_partitions(shuffles, |_| CountingReducer::default())
            .unwrap();
        let indexes: Vec<usize> = runs.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_read_input_skips_marker_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.tsv"), "second\n").unwrap();
        std::fs::write(dir.path().join("a.tsv"), "first\n").unwrap();
        std::fs::write(dir.path().join("_SUCCESS"), "").unwrap();
        std::fs::write(dir.path().join(".hidden"), "nope\n").unwrap();

        let contents = read_input(dir.path()).unwrap();
        assert_eq!(contents, vec!["first\n".to_string(), "second\n".to_string()]);
    }

    #[test]
    fn test_read_input_missing_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nothing-here");
        assert!(matches!(
            read_input(&missing),
            Err(Error::InputNotFound(_))
        ));
    }

    #[test]
    fn test_run_over_single_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("words.txt");
        std::fs::write(&input, "a b\nb\n").unwrap();

        let runs = LocalRunner::new(1)
            .run(&input, &WordMapper, |_| CountingReducer::default())
            .unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(
            runs[0].pairs,
            vec![OutputPair::new("a", "1"), OutputPair::new("b", "2")]
        );
    }
}
