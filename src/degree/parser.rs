//! Tab-separated relation lines
//!
//! Fields 0..=8 describe the node itself, fields 9 and up name related nodes.

/// Index of the first related-node field.
pub const RELATED_START: usize = 9;

/// A line must have more than this many fields to carry related nodes.
pub const MIN_RELATED_FIELDS: usize = 10;

/// Split a line on tabs. Nothing is trimmed and empty fields are kept,
/// trailing ones included.
pub fn split_fields(line: &str) -> Vec<&str> {
    line.split('\t').collect()
}

/// Whether a split line is shaped like a relation record with related nodes.
pub fn has_related_nodes(fields: &[&str]) -> bool {
    fields.len() > MIN_RELATED_FIELDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeps_empty_fields() {
        assert_eq!(split_fields("a\t\tb\t"), vec!["a", "", "b", ""]);
        assert_eq!(split_fields(""), vec![""]);
    }

    #[test]
    fn test_split_does_not_trim() {
        assert_eq!(split_fields(" a \tb "), vec![" a ", "b "]);
    }

    #[test]
    fn test_related_nodes_need_more_than_ten_fields() {
        let ten = vec!["x"; 10];
        let eleven = vec!["x"; 11];
        assert!(!has_related_nodes(&ten));
        assert!(has_related_nodes(&eleven));
    }
}
