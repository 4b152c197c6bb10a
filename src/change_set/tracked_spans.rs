use std::fmt::Debug;

use super::ChangeSet;
use crate::document::Slice;

/// A stretch of the current document added by a tracked edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertedSpan<D> {
    pub from: usize,
    pub to: usize,
    pub data: D,
}

/// Content of the base document removed by a tracked edit. `pos` is where
/// it used to be in the current document.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedSpan<D> {
    pub pos: usize,
    pub slice: Slice,
    pub data: D,
}

impl<D> ChangeSet<D>
where
    D: Clone + PartialEq + Debug + 'static,
{
    /// Every inserted span, in document order.
    #[must_use]
    pub fn inserted_spans(&self) -> Vec<InsertedSpan<D>> {
        let mut result = Vec::new();
        for change in self.changes() {
            let mut from = change.from_b();
            for span in change.inserted() {
                result.push(InsertedSpan {
                    from,
                    to: from + span.length,
                    data: span.data.clone(),
                });
                from += span.length;
            }
        }
        result
    }

    /// Every deleted span along with the content it removed from the base
    /// document.
    #[must_use]
    pub fn deleted_spans(&self) -> Vec<DeletedSpan<D>> {
        let doc = self.start_doc();
        let mut result = Vec::new();
        for change in self.changes() {
            let mut from = change.from_a();
            for span in change.deleted() {
                result.push(DeletedSpan {
                    pos: change.from_b(),
                    slice: doc.slice(from, from + span.length),
                    data: span.data.clone(),
                });
                from += span.length;
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        change_set::Metadata,
        document::{Fragment, Node},
        position_map::StepMap,
    };

    fn paragraph(text: &str) -> Fragment {
        Fragment::new(vec![Node::container("paragraph", vec![Node::text(text)])])
    }

    #[test]
    fn test_replacement_spans() {
        let set = ChangeSet::create(paragraph("hello")).add_steps(
            &paragraph("hejujo"),
            &[StepMap::replace(3, 5, 3)],
            Metadata::Shared('x'),
        );

        assert_eq!(
            set.inserted_spans(),
            vec![InsertedSpan {
                from: 3,
                to: 6,
                data: 'x'
            }]
        );
        let deleted = set.deleted_spans();
        assert_eq!(deleted.len(), 1);
        assert_eq!(deleted[0].pos, 3);
        assert_eq!(deleted[0].slice.text(), "ll");
        assert_eq!(deleted[0].data, 'x');
    }

    #[test]
    fn test_spans_with_different_data_stay_apart() {
        let set = ChangeSet::create(paragraph("ab")).add_steps(
            &paragraph("axyb"),
            &[StepMap::replace(2, 2, 1), StepMap::replace(3, 3, 1)],
            Metadata::PerMap(vec![1, 2]),
        );
        let ranges: Vec<_> = set
            .inserted_spans()
            .into_iter()
            .map(|span| (span.from, span.to, span.data))
            .collect();
        assert_eq!(ranges, vec![(2, 3, 1), (3, 4, 2)]);
        assert!(set.deleted_spans().is_empty());
    }
}
