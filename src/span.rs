#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decides whether the data of two neighbouring spans may be merged, and if
/// so into what.
///
/// The function must behave associatively, otherwise merge results depend on
/// the order edits were folded in.
pub type Combine<D> = dyn Fn(&D, &D) -> Option<D> + Send + Sync;

/// A run of positions that share the same data, typically the edit that
/// inserted or deleted them.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<D> {
    pub length: usize,
    pub data: D,
}

impl<D> Span<D>
where
    D: Clone,
{
    #[must_use]
    pub fn new(length: usize, data: D) -> Self { Self { length, data } }

    /// The same data over a different length.
    #[must_use]
    pub fn cut(&self, length: usize) -> Self {
        if length == self.length {
            self.clone()
        } else {
            Span::new(length, self.data.clone())
        }
    }

    /// Total length covered by a list of spans.
    #[must_use]
    pub fn total_length(spans: &[Span<D>]) -> usize { spans.iter().map(|span| span.length).sum() }

    /// The spans covering `from..to` of the list, with the boundary spans cut
    /// down to size.
    ///
    /// # Panics
    ///
    /// If `from..to` is not a valid range within the spans.
    #[must_use]
    pub fn slice(spans: &[Span<D>], from: usize, to: usize) -> Vec<Span<D>> {
        assert!(from <= to, "Cannot slice spans with an inverted range {from}..{to}");
        if from == to {
            return Vec::new();
        }
        if from == 0 && to == Span::total_length(spans) {
            return spans.to_vec();
        }

        let mut result = Vec::new();
        let mut offset = 0;
        for span in spans {
            if offset >= to {
                break;
            }
            let end = offset + span.length;
            let overlap_from = from.max(offset);
            let overlap_to = to.min(end);
            if overlap_from < overlap_to {
                result.push(span.cut(overlap_to - overlap_from));
            }
            offset = end;
        }
        assert!(
            to <= offset,
            "Cannot slice {from}..{to} out of spans of length {offset}"
        );
        result
    }

    /// Concatenates two span lists, fusing the spans at the seam when
    /// `combine` accepts their data.
    #[must_use]
    pub fn join(mut a: Vec<Span<D>>, b: Vec<Span<D>>, combine: &Combine<D>) -> Vec<Span<D>> {
        let mut rest = b.into_iter();
        let Some(first) = rest.next() else {
            return a;
        };
        let fused = a
            .last()
            .and_then(|last| combine(&last.data, &first.data))
            .map(|data| (first.length, data));
        if let Some((length, data)) = fused {
            if let Some(last) = a.last_mut() {
                last.length += length;
                last.data = data;
            }
        } else {
            a.push(first);
        }
        a.extend(rest);
        a
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    fn same(a: &char, b: &char) -> Option<char> { (a == b).then_some(*a) }

    fn spans() -> Vec<Span<char>> { vec![Span::new(2, 'a'), Span::new(3, 'b'), Span::new(1, 'c')] }

    #[test_case(0, 6, vec![Span::new(2, 'a'), Span::new(3, 'b'), Span::new(1, 'c')]; "whole list")]
    #[test_case(1, 4, vec![Span::new(1, 'a'), Span::new(2, 'b')]; "cuts both ends")]
    #[test_case(2, 5, vec![Span::new(3, 'b')]; "exact span")]
    #[test_case(3, 3, vec![]; "empty range")]
    fn test_slice(from: usize, to: usize, expected: Vec<Span<char>>) {
        assert_eq!(Span::slice(&spans(), from, to), expected);
    }

    #[test]
    #[should_panic(expected = "Cannot slice")]
    fn test_slice_past_the_end() { let _ = Span::slice(&spans(), 4, 7); }

    #[test]
    fn test_join_fuses_compatible_spans() {
        let joined = Span::join(
            vec![Span::new(1, 'a'), Span::new(2, 'b')],
            vec![Span::new(4, 'b'), Span::new(1, 'c')],
            &same,
        );
        assert_eq!(
            joined,
            vec![Span::new(1, 'a'), Span::new(6, 'b'), Span::new(1, 'c')]
        );
    }

    #[test]
    fn test_join_keeps_incompatible_spans() {
        let joined = Span::join(vec![Span::new(1, 'a')], vec![Span::new(1, 'b')], &same);
        assert_eq!(joined, vec![Span::new(1, 'a'), Span::new(1, 'b')]);
        assert_eq!(Span::join(Vec::new(), spans(), &same), spans());
        assert_eq!(Span::join(spans(), Vec::new(), &same), spans());
    }

    #[test]
    fn test_total_length() {
        assert_eq!(Span::total_length(&spans()), 6);
        assert_eq!(Span::<char>::total_length(&[]), 0);
    }
}
