use crate::document::{Attributes, Fragment, Mark};

/// A node of the document tree.
///
/// Text nodes hold characters, leaves are atomic inline or block nodes (an
/// image, a hard break) and containers hold further content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text {
        text: String,
        marks: Vec<Mark>,
    },
    Leaf {
        kind: String,
        attrs: Attributes,
        marks: Vec<Mark>,
    },
    Container {
        kind: String,
        attrs: Attributes,
        content: Fragment,
    },
}

impl Node {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    #[must_use]
    pub fn leaf(kind: impl Into<String>) -> Self {
        Node::Leaf {
            kind: kind.into(),
            attrs: Attributes::new(),
            marks: Vec::new(),
        }
    }

    #[must_use]
    pub fn container(kind: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Container {
            kind: kind.into(),
            attrs: Attributes::new(),
            content: Fragment::new(children),
        }
    }

    /// Returns the node with an extra attribute.
    ///
    /// # Panics
    ///
    /// Text nodes carry no attributes; calling this on one panics.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            Node::Leaf { attrs, .. } | Node::Container { attrs, .. } => {
                attrs.insert(key.into(), value.into());
            }
            Node::Text { .. } => panic!("Text nodes cannot carry attributes"),
        }
        self
    }

    /// Returns the node with the given marks.
    ///
    /// # Panics
    ///
    /// Containers carry no marks; calling this on one panics.
    #[must_use]
    pub fn with_marks(mut self, new_marks: Vec<Mark>) -> Self {
        match &mut self {
            Node::Text { marks, .. } | Node::Leaf { marks, .. } => *marks = new_marks,
            Node::Container { .. } => panic!("Containers cannot carry marks"),
        }
        self
    }

    /// Number of positions the node occupies.
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Node::Text { text, .. } => text.chars().count(),
            Node::Leaf { .. } => 1,
            Node::Container { content, .. } => content.size() + 2,
        }
    }

    /// Type name of the node, `"text"` for text nodes.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Node::Text { .. } => "text",
            Node::Leaf { kind, .. } | Node::Container { kind, .. } => kind,
        }
    }

    #[must_use]
    pub fn attrs(&self) -> Option<&Attributes> {
        match self {
            Node::Text { .. } => None,
            Node::Leaf { attrs, .. } | Node::Container { attrs, .. } => Some(attrs),
        }
    }

    #[must_use]
    pub fn marks(&self) -> &[Mark] {
        match self {
            Node::Text { marks, .. } | Node::Leaf { marks, .. } => marks,
            Node::Container { .. } => &[],
        }
    }

    #[must_use]
    pub fn content(&self) -> Option<&Fragment> {
        match self {
            Node::Container { content, .. } => Some(content),
            Node::Text { .. } | Node::Leaf { .. } => None,
        }
    }

    #[must_use]
    pub fn is_text(&self) -> bool { matches!(self, Node::Text { .. }) }

    /// Keeps the part of the node between `from` and `to`, measured from the
    /// start of the node (for containers, from the start of their content).
    pub(crate) fn cut(&self, from: usize, to: usize) -> Node {
        match self {
            Node::Text { text, marks } => Node::Text {
                text: text.chars().skip(from).take(to - from).collect(),
                marks: marks.clone(),
            },
            Node::Leaf { .. } => self.clone(),
            Node::Container {
                kind,
                attrs,
                content,
            } => Node::Container {
                kind: kind.clone(),
                attrs: attrs.clone(),
                content: content.cut(from, to),
            },
        }
    }

    pub(crate) fn with_content(&self, new_content: Fragment) -> Node {
        match self {
            Node::Container { kind, attrs, .. } => Node::Container {
                kind: kind.clone(),
                attrs: attrs.clone(),
                content: new_content,
            },
            Node::Text { .. } | Node::Leaf { .. } => self.clone(),
        }
    }
}
