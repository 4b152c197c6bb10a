//! Rounding change boundaries to whole words for display.

use std::fmt::Debug;

use log::trace;

use crate::{
    change::Change,
    change_set::ChangeSet,
    config::SimplifyOptions,
    document::{Fragment, Node},
    span::{Combine, Span},
};

/// Merges changes that sit in the same word and widens replacements to
/// whole words, so that a reader isn't shown a soup of single changed
/// letters. `doc` is the current document.
///
/// Pure insertions, pure deletions and single character substitutions are
/// returned as they are.
#[must_use]
pub fn simplify_changes<D>(
    changes: &[Change<D>],
    doc: &Fragment,
    combine: &Combine<D>,
    options: &SimplifyOptions,
) -> Vec<Change<D>>
where
    D: Clone,
{
    let text = position_chars(doc);
    let mut result = Vec::with_capacity(changes.len());

    let mut i = 0;
    while i < changes.len() {
        let start = i;
        let mut end = changes[i].to_b();
        while i + 1 < changes.len() && changes[i + 1].from_b() <= end + options.max_distance {
            i += 1;
            end = changes[i].to_b();
        }
        let cluster = Cluster {
            changes: &changes[start..=i],
            text: &text,
            from: changes[start].from_b().saturating_sub(options.max_distance),
            to: (end + options.max_distance).min(text.len()),
        };
        cluster.simplify(combine, &mut result);
        i += 1;
    }

    result
}

impl<D> ChangeSet<D>
where
    D: Clone + PartialEq + Debug + 'static,
{
    /// The changes of the set rounded to whole words, using the set's own
    /// combine function. `doc` is the current document.
    #[must_use]
    pub fn simplified(&self, doc: &Fragment, options: &SimplifyOptions) -> Vec<Change<D>> {
        simplify_changes(self.changes(), doc, self.config().combine(), options)
    }
}

/// Changes close enough to be looked at together, with the window of text
/// around them.
struct Cluster<'a, D> {
    changes: &'a [Change<D>],
    text: &'a [char],
    from: usize,
    to: usize,
}

impl<D> Cluster<'_, D>
where
    D: Clone,
{
    fn is_letter(&self, pos: usize) -> bool {
        pos >= self.from && pos < self.to && self.text.get(pos).copied().is_some_and(is_word_char)
    }

    fn simplify(&self, combine: &Combine<D>, target: &mut Vec<Change<D>>) {
        let changes = self.changes;
        let mut i = 0;
        while i < changes.len() {
            let run_start = i;
            let mut deleted = changes[i].len_a();
            let mut inserted = changes[i].len_b();
            while i + 1 < changes.len() && !self.has_word_boundary(&changes[run_start], &changes[i], &changes[i + 1]) {
                i += 1;
                deleted += changes[i].len_a();
                inserted += changes[i].len_b();
            }
            let run = &changes[run_start..=i];
            i += 1;

            if deleted == 0 || inserted == 0 || (deleted == 1 && inserted == 1) {
                target.extend(run.iter().cloned());
                continue;
            }

            let mut from = run[0].from_b();
            let mut to = run[run.len() - 1].to_b();
            if self.is_letter(from) {
                while from > self.from && self.is_letter(from - 1) {
                    from -= 1;
                }
            }
            if to > 0 && self.is_letter(to - 1) {
                while to < self.to && self.is_letter(to) {
                    to += 1;
                }
            }
            from = from.max(target.last().map_or(0, Change::to_b));
            to = to.min(changes.get(i).map_or(self.to, Change::from_b));

            let Some(joined) = fill_change(run, from, to, combine) else {
                target.extend(run.iter().cloned());
                continue;
            };
            trace!("Simplified {} changes into {joined}", run.len());

            match target.pop() {
                Some(previous) if previous.to_a() == joined.from_a() => {
                    target.push(Change::new(
                        previous.from_a(),
                        joined.to_a(),
                        previous.from_b(),
                        joined.to_b(),
                        Span::join(previous.deleted().to_vec(), joined.deleted().to_vec(), combine),
                        Span::join(previous.inserted().to_vec(), joined.inserted().to_vec(), combine),
                    ));
                }
                Some(previous) => {
                    target.push(previous);
                    target.push(joined);
                }
                None => target.push(joined),
            }
        }
    }

    /// Whether the text between `last` and `next` leaves the word `last` is
    /// part of.
    fn has_word_boundary(&self, first: &Change<D>, last: &Change<D>, next: &Change<D>) -> bool {
        let mut prev_letter = last.to_b() != self.to && last.to_b() > 0 && self.is_letter(last.to_b() - 1);
        for pos in last.to_b()..next.from_b() {
            let next_letter = pos != self.to && self.is_letter(pos);
            if (!prev_letter || !next_letter) && pos != first.from_b() {
                return true;
            }
            prev_letter = next_letter;
        }
        false
    }
}

/// A single change spanning `from_b..to_b` that covers the run. The unchanged
/// text it swallows is attributed to the closest span before it.
fn fill_change<D>(run: &[Change<D>], from_b: usize, to_b: usize, combine: &Combine<D>) -> Option<Change<D>>
where
    D: Clone,
{
    let first = run.first()?;
    let last = run.last()?;
    let from_a = first.from_a() - (first.from_b() - from_b);
    let to_a = last.to_a() + (to_b - last.to_b());

    let mut deleted_data = first.deleted().first().or_else(|| first.inserted().first())?.data.clone();
    let mut inserted_data = first.inserted().first().or_else(|| first.deleted().first())?.data.clone();
    let mut deleted = Vec::new();
    let mut inserted = Vec::new();
    let (mut pos_a, mut pos_b) = (from_a, from_b);

    for next in run.iter().map(Some).chain([None]) {
        let (end_a, end_b) = next.map_or((to_a, to_b), |change| (change.from_a(), change.from_b()));
        if end_a > pos_a {
            deleted = Span::join(deleted, vec![Span::new(end_a - pos_a, deleted_data.clone())], combine);
        }
        if end_b > pos_b {
            inserted = Span::join(inserted, vec![Span::new(end_b - pos_b, inserted_data.clone())], combine);
        }
        let Some(next) = next else {
            break;
        };

        deleted = Span::join(deleted, next.deleted().to_vec(), combine);
        inserted = Span::join(inserted, next.inserted().to_vec(), combine);
        if let Some(span) = deleted.last() {
            deleted_data = span.data.clone();
        }
        if let Some(span) = inserted.last() {
            inserted_data = span.data.clone();
        }
        pos_a = next.to_a();
        pos_b = next.to_b();
    }

    Some(Change::new(from_a, to_a, from_b, to_b, deleted, inserted))
}

fn is_word_char(ch: char) -> bool { ch.is_alphanumeric() || ch == '_' }

/// One character per document position: the text itself, and a space for
/// leaves and container boundaries.
fn position_chars(doc: &Fragment) -> Vec<char> {
    fn push_chars(fragment: &Fragment, chars: &mut Vec<char>) {
        for child in fragment.children() {
            match child {
                Node::Text { text, .. } => chars.extend(text.chars()),
                Node::Leaf { .. } => chars.push(' '),
                Node::Container { content, .. } => {
                    chars.push(' ');
                    push_chars(content, chars);
                    chars.push(' ');
                }
            }
        }
    }

    let mut chars = Vec::with_capacity(doc.size());
    push_chars(doc, &mut chars);
    chars
}
