use std::{
    collections::{BTreeSet, HashMap},
    fmt::Debug,
};

use crate::{
    consts::{DEFAULT_IGNORED_ATTRIBUTES, DEFAULT_IGNORED_MARKS},
    document::{Attributes, Mark, Node},
};

/// Decides which properties of nodes and marks make two tokens differ.
///
/// Encodings must be pure: equal inputs always give equal outputs.
pub trait TokenEncoder: Debug + Send + Sync {
    /// Canonical encoding of the marks on a character.
    fn encode_marks(&self, marks: &[Mark]) -> String;

    /// Canonical encoding of a leaf or an opening container, on top of its
    /// type name.
    fn encode_node(&self, node: &Node) -> String;

    /// Identifier put on the closing token of a container.
    fn close_id(&self, _node: &Node) -> u32 { 0 }
}

/// Maps node type names to small integer ids, starting from 1. Unknown
/// types get 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeTypeIds {
    ids: HashMap<String, u32>,
}

impl NodeTypeIds {
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ids = HashMap::new();
        for name in names {
            let next_id = ids.len() as u32 + 1;
            ids.entry(name.into()).or_insert(next_id);
        }
        Self { ids }
    }

    #[must_use]
    pub fn get(&self, kind: &str) -> u32 { self.ids.get(kind).copied().unwrap_or(0) }
}

/// The `Debug` form quotes and escapes every name, so distinct sets never
/// encode alike.
fn debug_or_empty<T: Debug>(set: &BTreeSet<T>) -> String {
    if set.is_empty() {
        String::new()
    } else {
        format!("{set:?}")
    }
}

/// Compares node types and characters only.
#[derive(Debug, Clone, Default)]
pub struct BaseEncoder {
    type_ids: NodeTypeIds,
}

impl BaseEncoder {
    #[must_use]
    pub fn new(type_ids: NodeTypeIds) -> Self { Self { type_ids } }
}

impl TokenEncoder for BaseEncoder {
    fn encode_marks(&self, _marks: &[Mark]) -> String { String::new() }

    fn encode_node(&self, _node: &Node) -> String { String::new() }

    fn close_id(&self, node: &Node) -> u32 { self.type_ids.get(node.kind()) }
}

/// Also compares the names of marks.
#[derive(Debug, Clone, Default)]
pub struct MarkEncoder {
    ignored_marks: BTreeSet<String>,
    type_ids: NodeTypeIds,
}

impl MarkEncoder {
    #[must_use]
    pub fn ignore_mark(mut self, kind: impl Into<String>) -> Self {
        self.ignored_marks.insert(kind.into());
        self
    }

    #[must_use]
    pub fn with_type_ids(mut self, type_ids: NodeTypeIds) -> Self {
        self.type_ids = type_ids;
        self
    }
}

impl TokenEncoder for MarkEncoder {
    fn encode_marks(&self, marks: &[Mark]) -> String {
        let names: BTreeSet<&str> = marks
            .iter()
            .map(Mark::kind)
            .filter(|kind| !self.ignored_marks.contains(*kind))
            .collect();
        debug_or_empty(&names)
    }

    fn encode_node(&self, node: &Node) -> String { self.encode_marks(node.marks()) }

    fn close_id(&self, node: &Node) -> u32 { self.type_ids.get(node.kind()) }
}

/// Compares attributes of nodes and marks as well, minus the ones listed as
/// ignored.
#[derive(Debug, Clone)]
pub struct AttributeEncoder {
    ignored_attributes: BTreeSet<String>,
    ignored_marks: BTreeSet<String>,
    type_ids: NodeTypeIds,
}

impl Default for AttributeEncoder {
    fn default() -> Self {
        Self {
            ignored_attributes: DEFAULT_IGNORED_ATTRIBUTES
                .iter()
                .map(|&name| name.to_owned())
                .collect(),
            ignored_marks: DEFAULT_IGNORED_MARKS
                .iter()
                .map(|&name| name.to_owned())
                .collect(),
            type_ids: NodeTypeIds::default(),
        }
    }
}

impl AttributeEncoder {
    /// An encoder that ignores nothing.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            ignored_attributes: BTreeSet::new(),
            ignored_marks: BTreeSet::new(),
            type_ids: NodeTypeIds::default(),
        }
    }

    #[must_use]
    pub fn ignore_attribute(mut self, name: impl Into<String>) -> Self {
        self.ignored_attributes.insert(name.into());
        self
    }

    #[must_use]
    pub fn ignore_mark(mut self, kind: impl Into<String>) -> Self {
        self.ignored_marks.insert(kind.into());
        self
    }

    #[must_use]
    pub fn with_type_ids(mut self, type_ids: NodeTypeIds) -> Self {
        self.type_ids = type_ids;
        self
    }

    fn encode_attributes(&self, attrs: &Attributes) -> String {
        let entries: Vec<(&str, &str)> = attrs
            .iter()
            .filter(|(key, _)| !self.ignored_attributes.contains(*key))
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        if entries.is_empty() {
            String::new()
        } else {
            format!("{entries:?}")
        }
    }
}

impl TokenEncoder for AttributeEncoder {
    fn encode_marks(&self, marks: &[Mark]) -> String {
        let encoded: BTreeSet<(&str, String)> = marks
            .iter()
            .filter(|mark| !self.ignored_marks.contains(mark.kind()))
            .map(|mark| (mark.kind(), self.encode_attributes(mark.attrs())))
            .collect();
        debug_or_empty(&encoded)
    }

    fn encode_node(&self, node: &Node) -> String {
        let attributes = node
            .attrs()
            .map(|attrs| self.encode_attributes(attrs))
            .unwrap_or_default();
        let marks = self.encode_marks(node.marks());
        if marks.is_empty() {
            attributes
        } else {
            format!("{attributes}|{marks}")
        }
    }

    fn close_id(&self, node: &Node) -> u32 { self.type_ids.get(node.kind()) }
}
