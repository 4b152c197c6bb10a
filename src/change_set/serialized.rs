use std::{fmt::Debug, sync::Arc};

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{ChangeSet, ChangeSetConfig};
use crate::{change::Change, document::Fragment, errors::ChangeSetError, span::Span};

/// Plain representation of a change set, without its base document and
/// configuration.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedChangeSet<D> {
    pub changes: Vec<SerializedChange<D>>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedChange<D> {
    pub from_a: usize,
    pub to_a: usize,
    pub from_b: usize,
    pub to_b: usize,
    pub deleted: Vec<Span<D>>,
    pub inserted: Vec<Span<D>>,
}

impl<D> From<&Change<D>> for SerializedChange<D>
where
    D: Clone,
{
    fn from(change: &Change<D>) -> Self {
        Self {
            from_a: change.from_a(),
            to_a: change.to_a(),
            from_b: change.from_b(),
            to_b: change.to_b(),
            deleted: change.deleted().to_vec(),
            inserted: change.inserted().to_vec(),
        }
    }
}

impl<D> ChangeSet<D>
where
    D: Clone + PartialEq + Debug + 'static,
{
    #[must_use]
    pub fn to_serialized(&self) -> SerializedChangeSet<D> {
        SerializedChangeSet {
            changes: self.changes().iter().map(SerializedChange::from).collect(),
        }
    }

    /// Rebuilds a change set on top of `doc` with the default configuration.
    ///
    /// # Errors
    ///
    /// If the changes are not a valid change list for `doc`.
    pub fn from_serialized(doc: Fragment, value: SerializedChangeSet<D>) -> Result<Self, ChangeSetError> {
        Self::from_serialized_with(ChangeSetConfig::new(doc), value)
    }

    /// Rebuilds a change set with a custom configuration.
    ///
    /// # Errors
    ///
    /// If a range is inverted, spans don't cover their range, the changes
    /// are out of order or misaligned, or a change reaches past the end of
    /// the base document.
    pub fn from_serialized_with(
        config: ChangeSetConfig<D>,
        value: SerializedChangeSet<D>,
    ) -> Result<Self, ChangeSetError> {
        let size = config.doc().size();
        let mut changes = Vec::with_capacity(value.changes.len());
        let mut previous_end = (0, 0);

        for (index, change) in value.changes.into_iter().enumerate() {
            validate(index, &change, previous_end, size)?;
            previous_end = (change.to_a, change.to_b);
            changes.push(Change::new(
                change.from_a,
                change.to_a,
                change.from_b,
                change.to_b,
                change.deleted,
                change.inserted,
            ));
        }

        debug!("Restored a change set of {} changes", changes.len());
        Ok(Self::from_parts(Arc::new(config), changes))
    }
}

fn validate<D>(
    index: usize,
    change: &SerializedChange<D>,
    (end_a, end_b): (usize, usize),
    doc_size: usize,
) -> Result<(), ChangeSetError>
where
    D: Clone,
{
    for (side, from, to, spans) in [
        ('A', change.from_a, change.to_a, &change.deleted),
        ('B', change.from_b, change.to_b, &change.inserted),
    ] {
        if from > to {
            return Err(ChangeSetError::InvertedRange { index, side, from, to });
        }
        let actual = Span::total_length(spans);
        if actual != to - from {
            return Err(ChangeSetError::SpanLengthMismatch {
                index,
                side,
                expected: to - from,
                actual,
            });
        }
    }

    if change.from_a < end_a || change.from_b < end_b {
        return Err(ChangeSetError::UnorderedChanges { index });
    }
    if change.from_a - end_a != change.from_b - end_b {
        return Err(ChangeSetError::MisalignedChange { index });
    }
    if change.to_a > doc_size {
        return Err(ChangeSetError::OutOfBounds {
            index,
            to: change.to_a,
            size: doc_size,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;
    use crate::document::Node;

    fn doc() -> Fragment { Fragment::new(vec![Node::container("paragraph", vec![Node::text("abcd")])]) }

    fn change(from_a: usize, to_a: usize, from_b: usize, to_b: usize) -> SerializedChange<u8> {
        SerializedChange {
            from_a,
            to_a,
            from_b,
            to_b,
            deleted: (from_a < to_a).then(|| Span::new(to_a - from_a, 0)).into_iter().collect(),
            inserted: (from_b < to_b).then(|| Span::new(to_b - from_b, 1)).into_iter().collect(),
        }
    }

    #[test]
    fn test_round_trip() {
        let value = SerializedChangeSet {
            changes: vec![change(1, 2, 1, 4), change(4, 5, 6, 6)],
        };
        let set = ChangeSet::from_serialized(doc(), value.clone()).unwrap();
        assert_eq!(set.changes().len(), 2);
        assert_eq!(set.to_serialized(), value);
    }

    #[test_case(vec![change(3, 2, 3, 3)], ChangeSetError::InvertedRange { index: 0, side: 'A', from: 3, to: 2 }; "inverted")]
    #[test_case(vec![change(1, 2, 1, 1), change(1, 3, 1, 1)], ChangeSetError::UnorderedChanges { index: 1 }; "unordered")]
    #[test_case(vec![change(1, 2, 1, 3), change(3, 3, 3, 4)], ChangeSetError::MisalignedChange { index: 1 }; "misaligned")]
    #[test_case(vec![change(5, 9, 5, 5)], ChangeSetError::OutOfBounds { index: 0, to: 9, size: 6 }; "out of bounds")]
    fn test_rejects_invalid_changes(changes: Vec<SerializedChange<u8>>, expected: ChangeSetError) {
        let result = ChangeSet::from_serialized(doc(), SerializedChangeSet { changes });
        assert_eq!(result.unwrap_err(), expected);
    }

    #[test]
    fn test_rejects_short_spans() {
        let mut broken = change(1, 3, 1, 3);
        broken.inserted = vec![Span::new(1, 1)];
        let result = ChangeSet::from_serialized(doc(), SerializedChangeSet { changes: vec![broken] });
        assert_eq!(
            result.unwrap_err(),
            ChangeSetError::SpanLengthMismatch {
                index: 0,
                side: 'B',
                expected: 2,
                actual: 1
            }
        );
    }
}
