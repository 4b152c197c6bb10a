use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    span::{Combine, Span},
    utils::shift_position::shift_position,
};

/// A replaced range, expressed both in the old document (`from_a..to_a`) and
/// in the new one (`from_b..to_b`).
///
/// The deleted spans cover the old range and the inserted spans cover the
/// new range, position for position.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change<D> {
    from_a: usize,
    to_a: usize,
    from_b: usize,
    to_b: usize,
    deleted: Vec<Span<D>>,
    inserted: Vec<Span<D>>,
}

impl<D> Change<D>
where
    D: Clone,
{
    /// # Panics
    ///
    /// If a range is inverted or the spans don't cover their range.
    #[must_use]
    pub fn new(
        from_a: usize,
        to_a: usize,
        from_b: usize,
        to_b: usize,
        deleted: Vec<Span<D>>,
        inserted: Vec<Span<D>>,
    ) -> Self {
        assert!(
            from_a <= to_a && from_b <= to_b,
            "Inverted change {from_a}..{to_a} -> {from_b}..{to_b}"
        );
        debug_assert_eq!(Span::total_length(&deleted), to_a - from_a);
        debug_assert_eq!(Span::total_length(&inserted), to_b - from_b);

        Self {
            from_a,
            to_a,
            from_b,
            to_b,
            deleted,
            inserted,
        }
    }

    #[must_use]
    pub fn from_a(&self) -> usize { self.from_a }

    #[must_use]
    pub fn to_a(&self) -> usize { self.to_a }

    #[must_use]
    pub fn from_b(&self) -> usize { self.from_b }

    #[must_use]
    pub fn to_b(&self) -> usize { self.to_b }

    #[must_use]
    pub fn deleted(&self) -> &[Span<D>] { &self.deleted }

    #[must_use]
    pub fn inserted(&self) -> &[Span<D>] { &self.inserted }

    #[must_use]
    pub fn len_a(&self) -> usize { self.to_a - self.from_a }

    #[must_use]
    pub fn len_b(&self) -> usize { self.to_b - self.from_b }

    /// The part of the change between the given offsets, which are relative
    /// to `from_a` and `from_b`.
    #[must_use]
    pub fn slice(&self, start_a: usize, end_a: usize, start_b: usize, end_b: usize) -> Self {
        if start_a == 0 && start_b == 0 && end_a == self.len_a() && end_b == self.len_b() {
            return self.clone();
        }

        Change::new(
            self.from_a + start_a,
            self.from_a + end_a,
            self.from_b + start_b,
            self.from_b + end_b,
            Span::slice(&self.deleted, start_a, end_a),
            Span::slice(&self.inserted, start_b, end_b),
        )
    }

    /// The same change with the data of every span passed through `f`.
    #[must_use]
    pub fn map_data<E>(&self, f: impl Fn(&D) -> E) -> Change<E>
    where
        E: Clone,
    {
        let map_spans = |spans: &[Span<D>]| -> Vec<Span<E>> {
            spans
                .iter()
                .map(|span| Span::new(span.length, f(&span.data)))
                .collect()
        };
        Change::new(
            self.from_a,
            self.to_a,
            self.from_b,
            self.to_b,
            map_spans(&self.deleted),
            map_spans(&self.inserted),
        )
    }

    fn shifted(&self, offset_a: isize, offset_b: isize) -> Self {
        Change {
            from_a: shift_position(self.from_a, offset_a),
            to_a: shift_position(self.to_a, offset_a),
            from_b: shift_position(self.from_b, offset_b),
            to_b: shift_position(self.to_b, offset_b),
            deleted: self.deleted.clone(),
            inserted: self.inserted.clone(),
        }
    }

    /// Merges two sequential lists of changes, where the new document of `x`
    /// is the old document of `y`, into one list going from the old
    /// document of `x` to the new document of `y`.
    ///
    /// Where changes from both lists touch, deletions come from `x` and
    /// insertions from `y`; the parts of the middle document only one side
    /// covers keep that side's spans.
    #[must_use]
    pub fn merge(x: &[Change<D>], y: &[Change<D>], combine: &Combine<D>) -> Vec<Change<D>> {
        if x.is_empty() {
            return y.to_vec();
        }
        if y.is_empty() {
            return x.to_vec();
        }

        // Length delta of everything before index `i` of a list.
        let offset_before = |list: &[Change<D>], i: usize| i.checked_sub(1).map_or(0, |previous| {
            list[previous].to_b as isize - list[previous].to_a as isize
        });

        let mut result = Vec::with_capacity(x.len() + y.len());
        let (mut i_x, mut i_y) = (0, 0);
        loop {
            let (cur_x, cur_y) = (x.get(i_x), y.get(i_y));
            match (cur_x, cur_y) {
                (None, None) => return result,
                (Some(change_x), _) if cur_y.is_none_or(|change_y| change_x.to_b < change_y.from_a) => {
                    result.push(change_x.shifted(0, offset_before(y, i_y)));
                    i_x += 1;
                }
                (_, Some(change_y)) if cur_x.is_none_or(|change_x| change_y.to_a < change_x.from_b) => {
                    result.push(change_y.shifted(-offset_before(x, i_x), 0));
                    i_y += 1;
                }
                (Some(change_x), Some(change_y)) => {
                    let mut pos = change_x.from_b.min(change_y.from_a);
                    let from_a = change_x
                        .from_a
                        .min(shift_position(change_y.from_a, -offset_before(x, i_x)));
                    let from_b = change_y
                        .from_b
                        .min(shift_position(change_x.from_b, offset_before(y, i_y)));
                    let (mut to_a, mut to_b) = (from_a, from_b);
                    let mut deleted = Vec::new();
                    let mut inserted = Vec::new();
                    let (mut entered_x, mut entered_y) = (false, false);

                    // Any number of further changes might touch this group.
                    loop {
                        let (cur_x, cur_y) = (x.get(i_x), y.get(i_y));
                        let next_x = cur_x.map_or(usize::MAX, |change| {
                            if pos >= change.from_b { change.to_b } else { change.from_b }
                        });
                        let next_y = cur_y.map_or(usize::MAX, |change| {
                            if pos >= change.from_a { change.to_a } else { change.from_a }
                        });
                        let next = next_x.min(next_y);
                        let in_x = cur_x.filter(|change| pos >= change.from_b);
                        let in_y = cur_y.filter(|change| pos >= change.from_a);

                        match (in_x, in_y) {
                            (None, None) => break,
                            (Some(change), None) => {
                                if pos == change.from_b && !entered_x {
                                    deleted = Span::join(deleted, change.deleted.clone(), combine);
                                    to_a += change.len_a();
                                    entered_x = true;
                                }
                                let from = pos - change.from_b;
                                let slice = Span::slice(&change.inserted, from, next - change.from_b);
                                inserted = Span::join(inserted, slice, combine);
                                to_b += next - pos;
                            }
                            (None, Some(change)) => {
                                if pos == change.from_a && !entered_y {
                                    inserted = Span::join(inserted, change.inserted.clone(), combine);
                                    to_b += change.len_b();
                                    entered_y = true;
                                }
                                let from = pos - change.from_a;
                                let slice = Span::slice(&change.deleted, from, next - change.from_a);
                                deleted = Span::join(deleted, slice, combine);
                                to_a += next - pos;
                            }
                            (Some(change_x), Some(change_y)) => {
                                if pos == change_x.from_b && !entered_x {
                                    deleted = Span::join(deleted, change_x.deleted.clone(), combine);
                                    to_a += change_x.len_a();
                                    entered_x = true;
                                }
                                if pos == change_y.from_a && !entered_y {
                                    inserted = Span::join(inserted, change_y.inserted.clone(), combine);
                                    to_b += change_y.len_b();
                                    entered_y = true;
                                }
                            }
                        }

                        if in_x.is_some_and(|change| next == change.to_b) {
                            i_x += 1;
                            entered_x = false;
                        }
                        if in_y.is_some_and(|change| next == change.to_a) {
                            i_y += 1;
                            entered_y = false;
                        }
                        pos = next;
                    }

                    if from_a < to_a || from_b < to_b {
                        result.push(Change::new(from_a, to_a, from_b, to_b, deleted, inserted));
                    }
                }
                (None, Some(_)) | (Some(_), None) => {
                    unreachable!("a lone change is always in front of the other list")
                }
            }
        }
    }
}

impl<D> Display for Change<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{} -> {}..{}", self.from_a, self.to_a, self.from_b, self.to_b)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn same(a: &u32, b: &u32) -> Option<u32> { (a == b).then_some(*a) }

    fn change(from_a: usize, to_a: usize, from_b: usize, to_b: usize, data: u32) -> Change<u32> {
        let spans = |length: usize| {
            if length == 0 {
                Vec::new()
            } else {
                vec![Span::new(length, data)]
            }
        };
        Change::new(from_a, to_a, from_b, to_b, spans(to_a - from_a), spans(to_b - from_b))
    }

    #[test]
    fn test_slice_of_whole_change_is_identical() {
        let original = change(2, 5, 2, 4, 1);
        assert_eq!(original.slice(0, 3, 0, 2), original);
        assert_eq!(original.slice(1, 2, 0, 0), change(3, 4, 2, 2, 1));
    }

    #[test]
    fn test_merge_with_empty_list() {
        let x = vec![change(1, 2, 1, 3, 1)];
        assert_eq!(Change::merge(&x, &[], &same), x);
        assert_eq!(Change::merge(&[], &x, &same), x);
    }

    #[test]
    fn test_merge_disjoint_changes_shifts_positions() {
        // x inserts 2 positions at 1; y deletes 10..12 of the middle document.
        let x = vec![change(1, 1, 1, 3, 1)];
        let y = vec![change(10, 12, 10, 10, 2)];
        assert_eq!(
            Change::merge(&x, &y, &same),
            vec![change(1, 1, 1, 3, 1), change(8, 10, 10, 10, 2)]
        );

        // y before x: x's new coordinates move with y's delta.
        let x = vec![change(10, 10, 10, 12, 1)];
        let y = vec![change(1, 4, 1, 1, 2)];
        assert_eq!(
            Change::merge(&x, &y, &same),
            vec![change(1, 4, 1, 1, 2), change(10, 10, 7, 9, 1)]
        );
    }

    #[test]
    fn test_merge_deleting_inserted_text() {
        // x inserts 4 positions at 2; y deletes the middle two of them.
        let x = vec![change(2, 2, 2, 6, 1)];
        let y = vec![change(3, 5, 3, 3, 2)];
        assert_eq!(Change::merge(&x, &y, &same), vec![change(2, 2, 2, 4, 1)]);
    }

    #[test]
    fn test_merge_inserting_inside_inserted_text() {
        let x = vec![change(2, 2, 2, 4, 1)];
        let y = vec![change(3, 3, 3, 4, 2)];
        assert_eq!(
            Change::merge(&x, &y, &same),
            vec![Change::new(
                2,
                2,
                2,
                5,
                Vec::new(),
                vec![Span::new(1, 1), Span::new(1, 2), Span::new(1, 1)]
            )]
        );
    }

    #[test]
    fn test_merge_overlapping_deletions() {
        // x deletes 2..4, y deletes 1..3 of the middle document (1..5 of the old).
        let x = vec![change(2, 4, 2, 2, 1)];
        let y = vec![change(1, 3, 1, 1, 2)];
        assert_eq!(
            Change::merge(&x, &y, &same),
            vec![Change::new(
                1,
                5,
                1,
                1,
                vec![Span::new(1, 2), Span::new(2, 1), Span::new(1, 2)],
                Vec::new()
            )]
        );
    }

    #[test]
    fn test_merge_is_associative() {
        let x = vec![change(0, 0, 0, 3, 1), change(5, 7, 8, 8, 1)];
        let y = vec![change(2, 4, 2, 5, 2)];
        let z = vec![change(1, 2, 1, 1, 3), change(6, 6, 5, 7, 3)];
        assert_eq!(
            Change::merge(&Change::merge(&x, &y, &same), &z, &same),
            Change::merge(&x, &Change::merge(&y, &z, &same), &same)
        );
    }

    #[test]
    fn test_map_data() {
        assert_eq!(change(1, 2, 1, 3, 4).map_data(|data| data * 2), change(1, 2, 1, 3, 8));
    }

    #[test]
    fn test_display() { assert_eq!(change(1, 2, 1, 3, 4).to_string(), "1..2 -> 1..3"); }
}
