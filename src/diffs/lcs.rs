//! Diff through a table of longest common subsequence lengths.
//!
//! * time: `O(NM)`
//! * space `O(NM)`
//!
//! Slower than Myers on similar inputs but independent of the edit distance,
//! so the work is bounded by the size of the table instead.

use crate::{diffs::raw_operation::RawOperation, tokenizer::Token};

/// A cell of the table: the length of the longest common subsequence of the
/// suffixes starting at this cell, and the step that achieves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Same(u32),
    Insert(u32),
    Delete(u32),
}

impl Cell {
    fn length(self) -> u32 {
        match self {
            Cell::Same(length) | Cell::Insert(length) | Cell::Delete(length) => length,
        }
    }
}

/// Returns the single-token operations turning `old` into `new` from the
/// back of the lists to the front, or `None` if the table would need more
/// than `max_cells` cells.
pub fn lcs_diff(old: &[Token], new: &[Token], max_cells: usize) -> Option<Vec<RawOperation>> {
    let width = new.len() + 1;
    let cells = (old.len() + 1).checked_mul(width)?;
    if cells > max_cells {
        return None;
    }

    let mut table = vec![Cell::Same(0); cells];
    for i in (0..=old.len()).rev() {
        for j in (0..=new.len()).rev() {
            table[i * width + j] = if i == old.len() && j == new.len() {
                Cell::Same(0)
            } else if i == old.len() {
                Cell::Insert(0)
            } else if j == new.len() {
                Cell::Delete(0)
            } else if old[i] == new[j] {
                Cell::Same(table[(i + 1) * width + j + 1].length() + 1)
            } else {
                let deleted = table[(i + 1) * width + j].length();
                let inserted = table[i * width + j + 1].length();
                if deleted >= inserted {
                    Cell::Delete(deleted)
                } else {
                    Cell::Insert(inserted)
                }
            };
        }
    }

    let mut operations = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < old.len() || j < new.len() {
        match table[i * width + j] {
            Cell::Same(_) => {
                i += 1;
                j += 1;
            }
            Cell::Insert(_) => {
                operations.push(RawOperation::Insert {
                    old_index: i,
                    new_index: j,
                });
                j += 1;
            }
            Cell::Delete(_) => {
                operations.push(RawOperation::Delete {
                    old_index: i,
                    new_index: j,
                });
                i += 1;
            }
        }
    }

    operations.reverse();
    Some(operations)
}
