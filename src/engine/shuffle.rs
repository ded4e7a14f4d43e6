//! In-memory shuffle
//!
//! Values arrive already encoded and stay as bytes until their group is
//! visited, so a corrupt record surfaces as a decode error at reduce time.

use super::{Codec, GroupedSource};
use crate::error::Result;
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// Encoded values of one partition, grouped by key in ascending byte order.
#[derive(Debug)]
pub struct InMemoryShuffle<V> {
    groups: BTreeMap<String, Vec<Vec<u8>>>,
    records: usize,
    _value: PhantomData<fn() -> V>,
}

impl<V> Default for InMemoryShuffle<V> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
            records: 0,
            _value: PhantomData,
        }
    }
}

impl<V: Codec> InMemoryShuffle<V> {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, key: &str, value: &V) {
        let mut buf = Vec::with_capacity(V::WIDTH);
        value.encode(&mut buf);
        self.push_encoded(key, buf);
    }

    pub fn push_encoded(&mut self, key: &str, bytes: Vec<u8>) {
        match self.groups.get_mut(key) {
            Some(values) => values.push(bytes),
            None => {
                self.groups.insert(key.to_string(), vec![bytes]);
            }
        }
        self.records += 1;
    }

    /// Number of distinct keys.
    pub fn keys(&self) -> usize {
        self.groups.len()
    }

    /// Number of values across all keys.
    pub fn records(&self) -> usize {
        self.records
    }
}

impl<V: Codec> GroupedSource<V> for InMemoryShuffle<V> {
    fn for_each_group(&mut self, visit: &mut dyn FnMut(&str, Vec<V>) -> Result<()>) -> Result<()> {
        let groups = std::mem::take(&mut self.groups);
        self.records = 0;
        for (key, encoded) in groups {
            let values = encoded
                .iter()
                .map(|bytes| V::decode(bytes))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            visit(&key, values)?;
        }
        Ok(())
    }
}
