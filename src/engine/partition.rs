//! Key routing
//!
//! Keys are routed by an md5 digest of their bytes so that placement is
//! stable across runs, platforms and thread counts.

/// Maps keys onto `0..partitions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partitioner {
    partitions: usize,
}

impl Partitioner {
    /// `partitions` is clamped to at least one.
    pub fn new(partitions: usize) -> Self {
        Self {
            partitions: partitions.max(1),
        }
    }

    pub fn partitions(&self) -> usize {
        self.partitions
    }

    pub fn partition_for(&self, key: &str) -> usize {
        if self.partitions == 1 {
            return 0;
        }
        let digest = md5::compute(key.as_bytes());
        let head = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
        head as usize % self.partitions
    }
}

impl Default for Partitioner {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_partition_routes_everything_to_zero() {
        let p = Partitioner::new(1);
        for key in ["", "a", "v1", "zzz"] {
            assert_eq!(p.partition_for(key), 0);
        }
    }

    #[test]
    fn test_zero_partitions_is_clamped() {
        assert_eq!(Partitioner::new(0).partitions(), 1);
    }

    #[test]
    fn test_routing_is_stable_and_in_range() {
        let p = Partitioner::new(7);
        for i in 0..200 {
            let key = format!("node{i}");
            let first = p.partition_for(&key);
            assert!(first < 7);
            assert_eq!(first, p.partition_for(&key));
        }
    }

    #[test]
    fn test_keys_spread_over_partitions() {
        let p = Partitioner::new(4);
        let mut seen = [false; 4];
        for i in 0..500 {
            seen[p.partition_for(&format!("k{i}"))] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
