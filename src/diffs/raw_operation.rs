use crate::diffs::DiffRange;

/// A single-token edit found by a diff search. Indices are relative to the
/// token lists handed to the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawOperation {
    /// `new[new_index]` is inserted in front of `old[old_index]`.
    Insert { old_index: usize, new_index: usize },

    /// `old[old_index]` is removed, right in front of `new[new_index]`.
    Delete { old_index: usize, new_index: usize },
}

impl RawOperation {
    /// The range the operation covers once both indices are moved by
    /// `offset`.
    pub fn range(self, offset: usize) -> DiffRange {
        match self {
            RawOperation::Insert {
                old_index,
                new_index,
            } => DiffRange {
                from_a: old_index + offset,
                to_a: old_index + offset,
                from_b: new_index + offset,
                to_b: new_index + offset + 1,
            },
            RawOperation::Delete {
                old_index,
                new_index,
            } => DiffRange {
                from_a: old_index + offset,
                to_a: old_index + offset + 1,
                from_b: new_index + offset,
                to_b: new_index + offset,
            },
        }
    }
}
