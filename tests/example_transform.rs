#![allow(dead_code)]

use revision_changeset::{Fragment, Node, StepMap};

/// `ExampleTransform` applies edits to a document one after the other and
/// records the position map of each, the way an editor's transaction would.
///
/// `docs()[i]` is the document before the `i`-th edit and `doc()` the one
/// after the last.
#[derive(Debug, Clone)]
pub struct ExampleTransform {
    doc: Fragment,
    docs: Vec<Fragment>,
    maps: Vec<StepMap>,
}

impl ExampleTransform {
    #[must_use]
    pub fn new(doc: Fragment) -> Self {
        Self {
            doc,
            docs: Vec::new(),
            maps: Vec::new(),
        }
    }

    #[must_use]
    pub fn insert_text(self, pos: usize, text: &str) -> Self { self.replace_with_text(pos, pos, text) }

    #[must_use]
    pub fn delete(self, from: usize, to: usize) -> Self { self.replace_with(from, to, Fragment::empty()) }

    #[must_use]
    pub fn replace_with_text(self, from: usize, to: usize, text: &str) -> Self {
        self.replace_with(from, to, Fragment::new(vec![Node::text(text)]))
    }

    #[must_use]
    pub fn replace_with(self, from: usize, to: usize, content: Fragment) -> Self {
        let size = content.size();
        let new_doc = self.doc.replace(from, to, content);
        self.step(new_doc, StepMap::replace(from, to, size))
    }

    /// Records an edit the tree can't perform on its own, such as joining
    /// two paragraphs.
    #[must_use]
    pub fn step(mut self, new_doc: Fragment, map: StepMap) -> Self {
        let old_doc = std::mem::replace(&mut self.doc, new_doc);
        self.docs.push(old_doc);
        self.maps.push(map);
        self
    }

    #[must_use]
    pub fn doc(&self) -> &Fragment { &self.doc }

    #[must_use]
    pub fn docs(&self) -> &[Fragment] { &self.docs }

    #[must_use]
    pub fn maps(&self) -> &[StepMap] { &self.maps }
}

#[must_use]
pub fn doc(blocks: Vec<Node>) -> Fragment { Fragment::new(blocks) }

#[must_use]
pub fn p(text: &str) -> Node { Node::container("paragraph", vec![Node::text(text)]) }

#[must_use]
pub fn h1(text: &str) -> Node { Node::container("heading", vec![Node::text(text)]).with_attr("level", "1") }

#[must_use]
pub fn blockquote(blocks: Vec<Node>) -> Node { Node::container("blockquote", blocks) }
