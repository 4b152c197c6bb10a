//! Finding the minimal changed regions between two token lists.

use log::debug;

use crate::{
    change::Change,
    config::{DiffAlgorithm, DiffOptions},
    consts::{MIN_UNCHANGED_CEILING, MIN_UNCHANGED_DIVISOR, MIN_UNCHANGED_FLOOR},
    document::Fragment,
    tokenizer::{Token, tokens},
    utils::{common_prefix_len::common_prefix_len, common_suffix_len::common_suffix_len},
};

mod fenced_nodes;
mod lcs;
mod myers;
mod raw_operation;
mod split_insertions;

use fenced_nodes::match_fenced_nodes;
use lcs::lcs_diff;
use myers::myers_diff;
use raw_operation::RawOperation;
use split_insertions::split_insertions;

/// A changed region, as token indices into the two compared lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffRange {
    pub from_a: usize,
    pub to_a: usize,
    pub from_b: usize,
    pub to_b: usize,
}

/// Diffs the old and new side of `range`, returning the parts of it that
/// actually changed.
///
/// The result is a list of slices of `range`, so the spans of each piece are
/// carried over from it.
#[must_use]
pub fn compute_diff<D>(
    frag_a: &Fragment,
    frag_b: &Fragment,
    range: &Change<D>,
    options: &DiffOptions,
) -> Vec<Change<D>>
where
    D: Clone,
{
    let encoder = options.encoder.as_ref();
    let tok_a = tokens(frag_a, range.from_a(), range.to_a(), encoder);
    let tok_b = tokens(frag_b, range.from_b(), range.to_b(), encoder);

    diff_tokens(&tok_a, &tok_b, options)
        .into_iter()
        .map(|diff| diff.slice_of(range))
        .collect()
}

/// Diffs two token lists.
///
/// Identical lists give no ranges. When the search gives up because the
/// lists differ too much, the whole region between their common prefix and
/// suffix is returned as a single range.
#[must_use]
pub fn diff_tokens(tok_a: &[Token], tok_b: &[Token], options: &DiffOptions) -> Vec<DiffRange> {
    let fenced = match_fenced_nodes(tok_a, tok_b, &options.fenced_nodes);
    let (a, b) = match &fenced {
        Some((a, b)) => (a.as_slice(), b.as_slice()),
        None => (tok_a, tok_b),
    };

    let start = common_prefix_len(a, 0..a.len(), b, 0..b.len());
    if start == a.len() && start == b.len() {
        return Vec::new();
    }
    let suffix = common_suffix_len(a, start..a.len(), b, start..b.len());
    let (end_a, end_b) = (a.len() - suffix, b.len() - suffix);
    let whole = DiffRange {
        from_a: start,
        to_a: end_a,
        from_b: start,
        to_b: end_b,
    };

    let is_trivial =
        end_a == start || end_b == start || (end_a == start + 1 && end_b == start + 1);
    let ranges = if is_trivial {
        vec![whole]
    } else {
        let old = &a[start..end_a];
        let new = &b[start..end_b];
        let operations = match options.algorithm {
            DiffAlgorithm::Myers => myers_diff(old, new, options.max_diff_size),
            DiffAlgorithm::Lcs => lcs_diff(old, new, options.max_table_cells),
        };
        if let Some(operations) = operations {
            coalesce(&operations, start, min_unchanged(old.len(), new.len()))
        } else {
            debug!(
                "Diff of {} and {} tokens exceeds the work bound, reporting it as a whole",
                old.len(),
                new.len()
            );
            vec![whole]
        }
    };

    if !options.split_insertions {
        return ranges;
    }
    ranges
        .into_iter()
        .flat_map(|range| split_insertions(range, tok_b, &options.boundary_nodes))
        .collect()
}

/// Unchanged stretches shorter than this don't separate two changes. Longer
/// replacements tolerate longer stretches.
fn min_unchanged(size_a: usize, size_b: usize) -> usize {
    (size_a.max(size_b) / MIN_UNCHANGED_DIVISOR).clamp(MIN_UNCHANGED_FLOOR, MIN_UNCHANGED_CEILING)
}

/// Joins the back-to-front single-token operations into ranges, merging
/// operations closer than `min_span` tokens.
fn coalesce(operations: &[RawOperation], offset: usize, min_span: usize) -> Vec<DiffRange> {
    let mut ranges = Vec::new();
    let mut current: Option<DiffRange> = None;
    for &operation in operations {
        let next = operation.range(offset);
        current = Some(match current {
            Some(mut range) if range.from_a < next.to_a + min_span => {
                range.from_a = next.from_a;
                range.from_b = next.from_b;
                range
            }
            Some(range) => {
                ranges.push(range);
                next
            }
            None => next,
        });
    }
    ranges.extend(current);
    ranges.reverse();
    ranges
}

impl DiffRange {
    fn slice_of<D>(self, range: &Change<D>) -> Change<D>
    where
        D: Clone,
    {
        range.slice(self.from_a, self.to_a, self.from_b, self.to_b)
    }
}
