//! Partial degree observation and its wire format
//!
//! A record is eight bytes: in-degree then out-degree, each a big-endian
//! signed 32-bit integer. There is no framing; the width is the framing.

use crate::engine::{exact_width, Codec};
use crate::error::DecodeError;
use std::iter::Sum;
use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DegreeRecord {
    pub in_degree: i32,
    pub out_degree: i32,
}

impl DegreeRecord {
    pub const WIRE_WIDTH: usize = 8;

    pub fn new(in_degree: i32, out_degree: i32) -> Self {
        Self {
            in_degree,
            out_degree,
        }
    }

    /// One unit of in-degree, emitted for every reference to a node.
    pub fn in_unit() -> Self {
        Self::new(1, 0)
    }

    /// The out-degree of a source node.
    pub fn out_count(out_degree: i32) -> Self {
        Self::new(0, out_degree)
    }

    pub fn degree(&self) -> i32 {
        self.in_degree.saturating_add(self.out_degree)
    }

    pub fn to_bytes(&self) -> [u8; 8] {
        let mut raw = [0u8; 8];
        raw[..4].copy_from_slice(&self.in_degree.to_be_bytes());
        raw[4..].copy_from_slice(&self.out_degree.to_be_bytes());
        raw
    }

    pub fn from_bytes(raw: [u8; 8]) -> Self {
        Self {
            in_degree: i32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]),
            out_degree: i32::from_be_bytes([raw[4], raw[5], raw[6], raw[7]]),
        }
    }
}

impl Add for DegreeRecord {
    type Output = DegreeRecord;

    fn add(self, other: Self) -> Self {
        Self {
            in_degree: self.in_degree.saturating_add(other.in_degree),
            out_degree: self.out_degree.saturating_add(other.out_degree),
        }
    }
}

impl Sum for DegreeRecord {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl Codec for DegreeRecord {
    const WIDTH: usize = Self::WIRE_WIDTH;

    fn encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.to_bytes());
    }

    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        exact_width::<8>("DegreeRecord", bytes).map(Self::from_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let record = DegreeRecord::new(5, 7);
        let mut buf = Vec::new();
        record.encode(&mut buf);
        assert_eq!(buf.len(), 8);
        assert_eq!(DegreeRecord::decode(&buf).unwrap(), record);
    }

    #[test]
    fn test_layout_is_in_then_out_big_endian() {
        let record = DegreeRecord::new(1, 0x0102_0304);
        assert_eq!(record.to_bytes(), [0, 0, 0, 1, 1, 2, 3, 4]);

        let negative = DegreeRecord::new(-1, 0);
        assert_eq!(negative.to_bytes(), [0xff, 0xff, 0xff, 0xff, 0, 0, 0, 0]);
    }

    #[test]
    fn test_truncated_bytes_fail() {
        let err = DegreeRecord::decode(&[0, 0, 0, 5, 0, 0, 0]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                record: "DegreeRecord",
                expected: 8,
                actual: 7
            }
        );
        assert!(DegreeRecord::decode(&[]).is_err());
    }

    #[test]
    fn test_trailing_bytes_fail() {
        let err = DegreeRecord::decode(&[0; 9]).unwrap_err();
        assert!(matches!(err, DecodeError::TrailingBytes { actual: 9, .. }));
    }

    #[test]
    fn test_sum_adds_fields_independently() {
        let total: DegreeRecord = vec![
            DegreeRecord::in_unit(),
            DegreeRecord::out_count(4),
            DegreeRecord::in_unit(),
        ]
        .into_iter()
        .sum();
        assert_eq!(total, DegreeRecord::new(2, 4));
        assert_eq!(total.degree(), 6);
    }

    #[test]
    fn test_sum_saturates() {
        let total = DegreeRecord::new(i32::MAX, 0) + DegreeRecord::in_unit();
        assert_eq!(total.in_degree, i32::MAX);
    }
}
