//! Folding batches of edits into a minimal list of changes.

use std::{
    fmt::{self, Debug},
    sync::Arc,
};

use log::{debug, trace};

use crate::{
    change::Change,
    config::DiffOptions,
    diffs::compute_diff,
    document::Fragment,
    position_map::PositionMap,
    span::{Combine, Span},
};

mod changed_range;
mod serialized;
mod tracked_spans;

pub use serialized::{SerializedChange, SerializedChangeSet};
pub use tracked_spans::{DeletedSpan, InsertedSpan};

/// Data attached to the edits of one batch: either one value for all of
/// them or one value per position map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Metadata<D> {
    Shared(D),
    PerMap(Vec<D>),
}

impl<D> Metadata<D>
where
    D: Clone,
{
    fn for_map(&self, index: usize) -> D {
        match self {
            Metadata::Shared(data) => data.clone(),
            Metadata::PerMap(data) => {
                assert!(
                    index < data.len(),
                    "Metadata has {} entries but map {index} needs one",
                    data.len()
                );
                data[index].clone()
            }
        }
    }
}

/// Settings shared by every change set descending from the same base
/// document.
pub struct ChangeSetConfig<D> {
    doc: Fragment,
    combine: Box<Combine<D>>,
    diff_options: DiffOptions,
}

impl<D> ChangeSetConfig<D>
where
    D: Clone + PartialEq + 'static,
{
    /// Spans are merged when their data is equal.
    #[must_use]
    pub fn new(doc: Fragment) -> Self {
        Self {
            doc,
            combine: Box::new(equal_data::<D>),
            diff_options: DiffOptions::default(),
        }
    }

    #[must_use]
    pub fn with_combine(
        mut self,
        combine: impl Fn(&D, &D) -> Option<D> + Send + Sync + 'static,
    ) -> Self {
        self.combine = Box::new(combine);
        self
    }

    #[must_use]
    pub fn with_diff_options(mut self, diff_options: DiffOptions) -> Self {
        self.diff_options = diff_options;
        self
    }
}

impl<D> ChangeSetConfig<D> {
    #[must_use]
    pub fn doc(&self) -> &Fragment { &self.doc }

    #[must_use]
    pub fn combine(&self) -> &Combine<D> { self.combine.as_ref() }

    #[must_use]
    pub fn diff_options(&self) -> &DiffOptions { &self.diff_options }
}

impl<D> Debug for ChangeSetConfig<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeSetConfig")
            .field("doc", &self.doc)
            .field("diff_options", &self.diff_options)
            .finish_non_exhaustive()
    }
}

fn equal_data<D>(a: &D, b: &D) -> Option<D>
where
    D: Clone + PartialEq,
{
    (a == b).then(|| a.clone())
}

/// Tracks the changes made to a document since a base version.
///
/// Change sets are immutable. Adding steps returns a new set and leaves the
/// old one usable; both share their configuration and, where possible,
/// their change list.
#[derive(Debug)]
pub struct ChangeSet<D> {
    config: Arc<ChangeSetConfig<D>>,
    changes: Arc<Vec<Change<D>>>,
}

impl<D> Clone for ChangeSet<D> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            changes: Arc::clone(&self.changes),
        }
    }
}

impl<D> ChangeSet<D>
where
    D: Clone + PartialEq + Debug + 'static,
{
    /// An empty change set for the given base document, merging spans with
    /// equal data.
    #[must_use]
    pub fn create(doc: Fragment) -> Self { Self::with_config(ChangeSetConfig::new(doc)) }

    #[must_use]
    pub fn with_config(config: ChangeSetConfig<D>) -> Self {
        Self {
            config: Arc::new(config),
            changes: Arc::new(Vec::new()),
        }
    }

    pub(crate) fn from_parts(config: Arc<ChangeSetConfig<D>>, changes: Vec<Change<D>>) -> Self {
        Self {
            config,
            changes: Arc::new(changes),
        }
    }

    /// The base document the changes are relative to.
    #[must_use]
    pub fn start_doc(&self) -> &Fragment { &self.config.doc }

    #[must_use]
    pub fn config(&self) -> &ChangeSetConfig<D> { &self.config }

    /// Changes ordered by position, going from the base document to the
    /// current one.
    #[must_use]
    pub fn changes(&self) -> &[Change<D>] { &self.changes }

    /// Whether both sets are the same value, as opposed to merely equal.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.config, &other.config) && Arc::ptr_eq(&self.changes, &other.changes)
    }

    /// Adds the edits described by `maps`, which took the current document
    /// to `new_doc`, tagging them with `data`.
    ///
    /// Changes touched by the new edits are diffed again, so content that
    /// an edit puts back the way it was drops out of the set.
    ///
    /// # Panics
    ///
    /// If `data` holds fewer entries than there are maps.
    #[must_use]
    pub fn add_steps<M>(&self, new_doc: &Fragment, maps: &[M], data: Metadata<D>) -> Self
    where
        M: PositionMap,
    {
        let mut step_changes = Vec::new();
        for (i, map) in maps.iter().enumerate() {
            let step_data = data.for_map(i);
            let ranges = map.ranges();
            if ranges.is_empty() {
                if let Some((from, to)) = map.restyled_range().filter(|(from, to)| from < to) {
                    step_changes.push(Change::new(
                        from,
                        to,
                        from,
                        to,
                        vec![Span::new(to - from, step_data.clone())],
                        vec![Span::new(to - from, step_data)],
                    ));
                }
                continue;
            }

            // The old side of each range is expressed in the document that
            // results from the earlier ranges of the same map.
            for range in ranges {
                let spans = |length: usize| {
                    if length == 0 {
                        Vec::new()
                    } else {
                        vec![Span::new(length, step_data.clone())]
                    }
                };
                step_changes.push(Change::new(
                    range.new_from,
                    range.new_from + range.old_len(),
                    range.new_from,
                    range.new_to,
                    spans(range.old_len()),
                    spans(range.new_len()),
                ));
            }
        }

        if step_changes.is_empty() {
            return self.clone();
        }
        debug!(
            "Adding {} changes from {} position maps to a set of {} changes",
            step_changes.len(),
            maps.len(),
            self.changes.len()
        );

        let combine = self.config.combine();
        let new_changes = merge_all(&step_changes, combine);
        let merged = Change::merge(&self.changes, &new_changes, combine);

        let mut changes = Vec::with_capacity(merged.len());
        for change in merged {
            let touched = new_changes
                .iter()
                .any(|new| new.to_b() > change.from_b() && new.from_b() < change.to_b());
            if change.len_a() == 0 || change.len_b() == 0 || !touched {
                changes.push(change);
                continue;
            }

            let diff = compute_diff(&self.config.doc, new_doc, &change, &self.config.diff_options);
            if let [only] = diff.as_slice() {
                if only.len_a() == change.len_a() && only.len_b() == change.len_b() {
                    trace!("Change {change} is a complete replacement, keeping it");
                    changes.push(change);
                    continue;
                }
            }
            trace!("Change {change} shrinks to {} changes", diff.len());
            changes.extend(diff);
        }

        Self::from_parts(Arc::clone(&self.config), changes)
    }

    /// The same set with the data of every span passed through `f`.
    #[must_use]
    pub fn map(&self, f: impl Fn(&D) -> D) -> Self {
        let changes = self.changes.iter().map(|change| change.map_data(&f)).collect();
        Self::from_parts(Arc::clone(&self.config), changes)
    }
}

/// Merges the changes of one batch pairwise, halving the list each round.
fn merge_all<D>(changes: &[Change<D>], combine: &Combine<D>) -> Vec<Change<D>>
where
    D: Clone,
{
    match changes {
        [] => Vec::new(),
        [single] => vec![single.clone()],
        _ => {
            let (left, right) = changes.split_at(changes.len() / 2);
            Change::merge(&merge_all(left, combine), &merge_all(right, combine), combine)
        }
    }
}
