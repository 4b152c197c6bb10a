use std::{fmt::Debug, ops::Range};

use super::ChangeSet;
use crate::{
    change::Change,
    position_map::{Bias, PositionMap},
};

/// Region a list of maps replaced, in the coordinates before and after them.
#[derive(Debug, Clone, Copy)]
struct Touched {
    from_a: usize,
    to_a: usize,
    from_b: usize,
    to_b: usize,
}

impl Touched {
    fn moved(&self) -> isize {
        (self.to_b - self.from_b) as isize - (self.to_a - self.from_a) as isize
    }
}

impl<D> ChangeSet<D>
where
    D: Clone + PartialEq + Debug + 'static,
{
    /// The range of the current document in which `other` differs from this
    /// set, assuming both describe the same document. `None` when they
    /// don't differ.
    #[must_use]
    pub fn changed_range(&self, other: &Self) -> Option<Range<usize>> {
        self.changed_range_between(other, None)
    }

    /// Like [`ChangeSet::changed_range`] for an `other` that was produced
    /// from this set by applying `maps`. The result is in the coordinates of
    /// `other`'s document and includes the region touched by the maps.
    #[must_use]
    pub fn changed_range_across<M>(&self, other: &Self, maps: &[M]) -> Option<Range<usize>>
    where
        M: PositionMap,
    {
        self.changed_range_between(other, touched_range(maps))
    }

    fn changed_range_between(&self, other: &Self, touched: Option<Touched>) -> Option<Range<usize>> {
        if self.ptr_eq(other) {
            return None;
        }

        let map = |pos: usize| match touched {
            Some(touched) if pos > touched.from_a => pos.saturating_add_signed(touched.moved()),
            _ => pos,
        };

        let mut bounds = touched.map(|touched| (touched.from_b, touched.to_b));
        let mut add = |from: usize, to: usize| {
            bounds = Some(bounds.map_or((from, to), |(start, end)| (start.min(from), end.max(to))));
        };

        let (changes_a, changes_b) = (self.changes(), other.changes());
        let (mut i_a, mut i_b) = (0, 0);
        while i_a < changes_a.len() || i_b < changes_b.len() {
            match (changes_a.get(i_a), changes_b.get(i_b)) {
                (Some(change_a), Some(change_b)) if same_ranges(change_a, change_b, map) => {
                    i_a += 1;
                    i_b += 1;
                }
                (change_a, Some(change_b))
                    if change_a.is_none_or(|change_a| map(change_a.from_b()) >= change_b.from_b()) =>
                {
                    add(change_b.from_b(), change_b.to_b());
                    i_b += 1;
                }
                (Some(change_a), _) => {
                    add(map(change_a.from_b()), map(change_a.to_b()));
                    i_a += 1;
                }
                (None, _) => unreachable!("a remaining change is always taken"),
            }
        }

        bounds.filter(|(from, to)| from <= to).map(|(from, to)| from..to)
    }
}

fn same_ranges<D>(a: &Change<D>, b: &Change<D>, map: impl Fn(usize) -> usize) -> bool
where
    D: Clone + PartialEq,
{
    map(a.from_b()) == b.from_b()
        && map(a.to_b()) == b.to_b()
        && a.deleted() == b.deleted()
        && a.inserted() == b.inserted()
}

fn touched_range<M>(maps: &[M]) -> Option<Touched>
where
    M: PositionMap,
{
    let after = end_range(maps)?;
    let inverted: Vec<M> = maps.iter().rev().map(PositionMap::invert).collect();
    let before = end_range(&inverted).unwrap_or(after.clone());
    Some(Touched {
        from_a: before.start,
        to_a: before.end,
        from_b: after.start,
        to_b: after.end,
    })
}

/// The region covering every range the maps replaced, in the coordinates
/// after the last map.
fn end_range<M>(maps: &[M]) -> Option<Range<usize>>
where
    M: PositionMap,
{
    let mut covered: Option<Range<usize>> = None;
    for map in maps {
        if let Some(range) = &mut covered {
            *range = map.map(range.start, Bias::Before)..map.map(range.end, Bias::After);
        }
        for replaced in map.ranges() {
            covered = Some(match covered {
                Some(range) => range.start.min(replaced.new_from)..range.end.max(replaced.new_to),
                None => replaced.new_from..replaced.new_to,
            });
        }
    }
    covered
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::position_map::StepMap;

    #[test]
    fn test_end_range_covers_every_map() {
        let maps = [StepMap::replace(2, 4, 1), StepMap::replace(7, 7, 1)];
        assert_eq!(end_range(&maps), Some(2..8));
        let maps = [StepMap::replace(2, 4, 1), StepMap::replace(0, 0, 3)];
        assert_eq!(end_range(&maps), Some(0..6));
        assert_eq!(end_range::<StepMap>(&[]), None);
    }

    #[test]
    fn test_touched_range() {
        let touched = touched_range(&[StepMap::replace(5, 5, 2), StepMap::replace(5, 5, 1)]);
        let touched = touched.map(|t| (t.from_a, t.to_a, t.from_b, t.to_b, t.moved()));
        assert_eq!(touched, Some((5, 5, 5, 8, 3)));
    }
}
