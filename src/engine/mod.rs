//! Local execution engine
//!
//! The engine owns everything around the jobs' three hooks: reading input,
//! running the emit hook over lines, routing encoded values to partitions,
//! grouping each partition by key and driving one reducer per partition.
//!
//! - `partition` - Stable key to partition routing
//! - `shuffle` - In-memory grouped source holding encoded values
//! - `runner` - Map, shuffle and reduce wiring

pub mod partition;
pub mod runner;
pub mod shuffle;

pub use partition::Partitioner;
pub use runner::{LocalRunner, PartitionRun};
pub use shuffle::InMemoryShuffle;

use crate::error::{DecodeError, Result};
use std::fmt;

/// Fixed-width binary encoding for values carried between map and reduce.
pub trait Codec: Sized {
    /// Number of bytes produced by `encode`.
    const WIDTH: usize;

    fn encode(&self, buf: &mut Vec<u8>);

    fn decode(bytes: &[u8]) -> std::result::Result<Self, DecodeError>;
}

impl Codec for i32 {
    const WIDTH: usize = 4;

    fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.to_be_bytes());
    }

    fn decode(bytes: &[u8]) -> std::result::Result<Self, DecodeError> {
        let raw = exact_width::<4>("count", bytes)?;
        Ok(i32::from_be_bytes(raw))
    }
}

/// Check that `bytes` is exactly `N` long and copy it out.
pub(crate) fn exact_width<const N: usize>(
    record: &'static str,
    bytes: &[u8],
) -> std::result::Result<[u8; N], DecodeError> {
    if bytes.len() < N {
        return Err(DecodeError::Truncated {
            record,
            expected: N,
            actual: bytes.len(),
        });
    }
    if bytes.len() > N {
        return Err(DecodeError::TrailingBytes {
            record,
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut raw = [0u8; N];
    raw.copy_from_slice(bytes);
    Ok(raw)
}

/// Emit hook: turns one input line into zero or more keyed values.
///
/// Implementations must be pure functions of the line so that the runner can
/// call them from many threads at once.
pub trait Mapper: Sync {
    type Value: Codec + Send;

    fn map(&self, line: &str, emit: &mut dyn FnMut(&str, Self::Value));
}

/// Group hook: called once per distinct key of a partition.
pub trait Reducer {
    type Value: Codec;

    fn reduce(&mut self, key: &str, values: Vec<Self::Value>) -> OutputPair;
}

/// Something that can hand out `(key, values)` groups one at a time.
///
/// The execution engine implements this for its shuffle output; tests can use
/// [`VecSource`] to feed a reducer without running a whole job.
pub trait GroupedSource<V> {
    fn for_each_group(&mut self, visit: &mut dyn FnMut(&str, Vec<V>) -> Result<()>) -> Result<()>;
}

/// Pre-grouped values, visited in the order given.
#[derive(Debug, Clone, Default)]
pub struct VecSource<V> {
    groups: Vec<(String, Vec<V>)>,
}

impl<V> VecSource<V> {
    pub fn new(groups: Vec<(String, Vec<V>)>) -> Self {
        Self { groups }
    }
}

impl<V> GroupedSource<V> for VecSource<V> {
    fn for_each_group(&mut self, visit: &mut dyn FnMut(&str, Vec<V>) -> Result<()>) -> Result<()> {
        for (key, values) in self.groups.drain(..) {
            visit(&key, values)?;
        }
        Ok(())
    }
}

/// Feed every group of `source` through `reducer`, collecting one pair per key.
pub fn drive<V, S, R>(source: &mut S, reducer: &mut R) -> Result<Vec<OutputPair>>
where
    S: GroupedSource<V>,
    R: Reducer<Value = V>,
{
    let mut pairs = Vec::new();
    source.for_each_group(&mut |key, values| {
        pairs.push(reducer.reduce(key, values));
        Ok(())
    })?;
    Ok(pairs)
}

/// A text key/value line of job output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPair {
    pub key: String,
    pub value: String,
}

impl OutputPair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for OutputPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.key, self.value)
    }
}
