use std::collections::BTreeMap;

/// Node and mark attributes, kept sorted so that encodings are canonical.
pub type Attributes = BTreeMap<String, String>;

/// An inline annotation on text or leaf nodes, such as emphasis or a link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Mark {
    kind: String,
    attrs: Attributes,
}

impl Mark {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attrs: Attributes::new(),
        }
    }

    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn kind(&self) -> &str { &self.kind }

    #[must_use]
    pub fn attrs(&self) -> &Attributes { &self.attrs }
}
