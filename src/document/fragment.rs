use crate::document::{Node, Slice};

/// An ordered list of sibling nodes with a cached total size.
///
/// Adjacent text nodes with the same marks are joined and empty text nodes
/// are dropped, so two fragments with the same content compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    children: Vec<Node>,
    size: usize,
}

impl Fragment {
    #[must_use]
    pub fn new(children: Vec<Node>) -> Self {
        let mut normalized: Vec<Node> = Vec::with_capacity(children.len());
        for child in children {
            if let Node::Text { text, marks } = &child {
                if text.is_empty() {
                    continue;
                }
                if let Some(Node::Text {
                    text: previous_text,
                    marks: previous_marks,
                }) = normalized.last_mut()
                {
                    if previous_marks == marks {
                        previous_text.push_str(text);
                        continue;
                    }
                }
            }
            normalized.push(child);
        }

        let size = normalized.iter().map(Node::size).sum();
        Self {
            children: normalized,
            size,
        }
    }

    #[must_use]
    pub fn empty() -> Self { Self::default() }

    #[must_use]
    pub fn size(&self) -> usize { self.size }

    #[must_use]
    pub fn children(&self) -> &[Node] { &self.children }

    #[must_use]
    pub fn child_count(&self) -> usize { self.children.len() }

    /// Iterates over the children together with their start offsets.
    pub fn iter_with_offsets(&self) -> impl Iterator<Item = (usize, &Node)> {
        self.children.iter().scan(0, |offset, child| {
            let start = *offset;
            *offset += child.size();
            Some((start, child))
        })
    }

    /// Concatenated text of all text nodes between `from` and `to`. Leaves
    /// and node boundaries contribute nothing.
    ///
    /// # Panics
    ///
    /// If the range does not lie within the fragment.
    #[must_use]
    pub fn text_between(&self, from: usize, to: usize) -> String {
        assert!(
            from <= to && to <= self.size,
            "Cannot read {from}..{to} out of a fragment of size {}",
            self.size
        );
        let mut text = String::new();
        self.collect_text(from, to, &mut text);
        text
    }

    fn collect_text(&self, from: usize, to: usize, target: &mut String) {
        for (offset, child) in self.iter_with_offsets() {
            if offset >= to {
                break;
            }
            let end = offset + child.size();
            if end <= from {
                continue;
            }
            match child {
                Node::Text { text, .. } => {
                    let skip = from.saturating_sub(offset);
                    target.extend(text.chars().skip(skip).take(to.min(end) - offset - skip));
                }
                Node::Leaf { .. } => {}
                Node::Container { content, .. } => {
                    let inner_from = from.saturating_sub(offset + 1);
                    let inner_to = (to - offset - 1).min(content.size());
                    if inner_from < inner_to {
                        content.collect_text(inner_from, inner_to, target);
                    }
                }
            }
        }
    }

    /// Keeps the content between `from` and `to`, cutting the nodes that
    /// straddle either end.
    ///
    /// # Panics
    ///
    /// If the range does not lie within the fragment.
    #[must_use]
    pub fn cut(&self, from: usize, to: usize) -> Fragment {
        assert!(
            from <= to && to <= self.size,
            "Cannot cut {from}..{to} out of a fragment of size {}",
            self.size
        );
        if from == 0 && to == self.size {
            return self.clone();
        }

        let mut result = Vec::new();
        for (offset, child) in self.iter_with_offsets() {
            if offset >= to {
                break;
            }
            let end = offset + child.size();
            if end <= from {
                continue;
            }
            if offset < from || end > to {
                result.push(match child {
                    Node::Text { .. } => child.cut(from.saturating_sub(offset), to.min(end) - offset),
                    Node::Leaf { .. } => child.clone(),
                    Node::Container { content, .. } => child.cut(
                        from.saturating_sub(offset + 1),
                        (to - offset - 1).min(content.size()),
                    ),
                });
            } else {
                result.push(child.clone());
            }
        }

        Fragment::new(result)
    }

    /// Takes the excerpt between `from` and `to`, recording how many levels
    /// are left open at either end.
    ///
    /// # Panics
    ///
    /// If the range does not lie within the fragment.
    #[must_use]
    pub fn slice(&self, from: usize, to: usize) -> Slice {
        assert!(
            from <= to && to <= self.size,
            "Cannot slice {from}..{to} out of a fragment of size {}",
            self.size
        );

        let (mut from, mut to) = (from, to);
        let mut fragment = self;
        while let Some((offset, inner)) = fragment.enclosing_content(from, to) {
            from -= offset + 1;
            to -= offset + 1;
            fragment = inner;
        }

        Slice::new(
            fragment.cut(from, to),
            fragment.depth_at(from),
            fragment.depth_at(to),
        )
    }

    /// The content of the child that strictly contains both positions.
    fn enclosing_content(&self, from: usize, to: usize) -> Option<(usize, &Fragment)> {
        self.iter_with_offsets()
            .find(|(offset, child)| *offset < from && to < offset + child.size())
            .and_then(|(offset, child)| child.content().map(|content| (offset, content)))
    }

    /// Number of containers the position lies inside.
    fn depth_at(&self, pos: usize) -> usize {
        let mut depth = 0;
        let mut pos = pos;
        let mut fragment = self;
        while let Some((offset, content)) = fragment
            .iter_with_offsets()
            .find(|(offset, child)| *offset < pos && pos < offset + child.size())
            .and_then(|(offset, child)| child.content().map(|content| (offset, content)))
        {
            pos -= offset + 1;
            fragment = content;
            depth += 1;
        }
        depth
    }

    /// Replaces the content between `from` and `to` with `content`.
    ///
    /// # Panics
    ///
    /// Both ends must lie in the same parent node, and the result of the
    /// replacement must be a valid tree on its own; otherwise this panics.
    #[must_use]
    pub fn replace(&self, from: usize, to: usize, content: Fragment) -> Fragment {
        assert!(
            from <= to && to <= self.size,
            "Cannot replace {from}..{to} in a fragment of size {}",
            self.size
        );

        let enclosing = self
            .iter_with_offsets()
            .enumerate()
            .find(|(_, (offset, child))| *offset < from && to < offset + child.size())
            .and_then(|(index, (offset, child))| {
                child.content().map(|inner| (index, offset, child, inner))
            });
        if let Some((index, offset, child, inner)) = enclosing {
            let mut children = self.children.clone();
            children[index] =
                child.with_content(inner.replace(from - offset - 1, to - offset - 1, content));
            return Fragment::new(children);
        }

        for (offset, child) in self.iter_with_offsets() {
            let end = offset + child.size();
            let splits = |pos: usize| offset < pos && pos < end;
            assert!(
                child.is_text() || !(splits(from) || splits(to)),
                "Replace range {from}..{to} must lie within a single parent"
            );
        }

        let mut children = self.cut(0, from).children;
        children.extend(content.children);
        children.extend(self.cut(to, self.size).children);
        Fragment::new(children)
    }
}

impl FromIterator<Node> for Fragment {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Fragment::new(iter.into_iter().collect())
    }
}
