use super::parser::{has_related_nodes, split_fields, RELATED_START};
use super::record::DegreeRecord;
use crate::engine::Mapper;

/// Emit hook of the degree job.
///
/// A qualifying line yields the source node's out-degree, which counts every
/// related slot (empty ones too), followed by one in-degree unit for each
/// non-empty related field. Lines without related nodes yield nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DegreeEmitter;

impl DegreeEmitter {
    pub fn emit_fields<'a>(&self, fields: &[&'a str], emit: &mut dyn FnMut(&'a str, DegreeRecord)) {
        if !has_related_nodes(fields) {
            return;
        }

        let slots = i32::try_from(fields.len() - RELATED_START).unwrap_or(i32::MAX);
        emit(fields[0], DegreeRecord::out_count(slots));

        for &related in &fields[RELATED_START..] {
            if !related.is_empty() {
                emit(related, DegreeRecord::in_unit());
            }
        }
    }

    /// Collect the pairs for one line.
    pub fn emit_line<'a>(&self, line: &'a str) -> Vec<(&'a str, DegreeRecord)> {
        let mut pairs = Vec::new();
        self.emit_fields(&split_fields(line), &mut |key, record| {
            pairs.push((key, record))
        });
        pairs
    }
}

impl Mapper for DegreeEmitter {
    type Value = DegreeRecord;

    fn map(&self, line: &str, emit: &mut dyn FnMut(&str, DegreeRecord)) {
        self.emit_fields(&split_fields(line), &mut |key, record| emit(key, record));
    }
}
