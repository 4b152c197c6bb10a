//! Myers' diff algorithm.
//!
//! * time: `O((N+M)D)`
//! * space `O((N+M)D)`
//!
//! See [the original article by Eugene W. Myers](http://www.xmailserver.org/diff2.pdf)
//! describing it.
//!
//! This is the greedy forward search. Every other frontier is kept so that
//! the edit script can be traced back once the end is reached, which is why
//! the number of edits explored is bounded: two large and completely
//! distinct inputs would otherwise take quadratic time and memory.

use std::ops::{Index, IndexMut};

use crate::{diffs::raw_operation::RawOperation, tokenizer::Token};

/// Finds the shortest edit script turning `old` into `new`.
///
/// Returns the single-token operations from the back of the lists to the
/// front, or `None` if more than `max_edits` edits would be needed.
pub fn myers_diff(old: &[Token], new: &[Token], max_edits: usize) -> Option<Vec<RawOperation>> {
    let n = old.len() as isize;
    let m = new.len() as isize;
    let max_d = max_edits.min(old.len() + new.len());
    let mut frontier = V::new(max_d);
    let mut history = Vec::new();

    for d in 0..=max_d as isize {
        for k in (-d..=d).step_by(2) {
            let next = frontier[k + 1];
            let prev = frontier[k - 1];
            let mut x = if next < prev { prev } else { next + 1 };
            let mut y = x + k;

            // Diagonals are free, follow the snake as far as it goes.
            while x < n && y < m && old[x as usize] == new[y as usize] {
                x += 1;
                y += 1;
            }

            frontier[k] = x;

            if x >= n && y >= m {
                return Some(trace_back(&frontier, &history, d, k));
            }
        }

        // Each round only reads the diagonals of one parity, so keeping
        // every other frontier is enough for the trace.
        if d % 2 == 0 {
            history.push(frontier.clone());
        }
    }

    None
}

fn trace_back(last: &V, history: &[V], d: isize, k: isize) -> Vec<RawOperation> {
    let mut operations = Vec::with_capacity(d as usize);
    let mut frontier = last;
    let mut k = k;
    for i in (0..d).rev() {
        let next = frontier[k + 1];
        let prev = frontier[k - 1];
        if next < prev {
            k -= 1;
            let x = prev;
            operations.push(RawOperation::Insert {
                old_index: x as usize,
                new_index: (x + k) as usize,
            });
        } else {
            k += 1;
            let x = next;
            operations.push(RawOperation::Delete {
                old_index: x as usize,
                new_index: (x + k) as usize,
            });
        }
        frontier = &history[(i >> 1) as usize];
    }
    operations
}

/// The furthest reaching x position per diagonal, with `-1` marking
/// diagonals that were not reached yet.
#[derive(Debug, Clone)]
struct V {
    offset: isize,
    v: Vec<isize>,
}

impl V {
    fn new(max_d: usize) -> Self {
        Self {
            offset: max_d as isize + 1,
            v: vec![-1; 2 * max_d + 3],
        }
    }
}

impl Index<isize> for V {
    type Output = isize;

    fn index(&self, index: isize) -> &Self::Output { &self.v[(index + self.offset) as usize] }
}

impl IndexMut<isize> for V {
    fn index_mut(&mut self, index: isize) -> &mut Self::Output {
        &mut self.v[(index + self.offset) as usize]
    }
}
