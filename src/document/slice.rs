use crate::document::Fragment;

/// An excerpt of a document. `open_start` and `open_end` count the nodes
/// that were cut open at either end of the excerpt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Slice {
    content: Fragment,
    open_start: usize,
    open_end: usize,
}

impl Slice {
    #[must_use]
    pub fn new(content: Fragment, open_start: usize, open_end: usize) -> Self {
        Self {
            content,
            open_start,
            open_end,
        }
    }

    #[must_use]
    pub fn content(&self) -> &Fragment { &self.content }

    #[must_use]
    pub fn open_start(&self) -> usize { self.open_start }

    #[must_use]
    pub fn open_end(&self) -> usize { self.open_end }

    /// Number of positions the excerpt covered in its source document.
    #[must_use]
    pub fn size(&self) -> usize { self.content.size() - self.open_start - self.open_end }

    #[must_use]
    pub fn text(&self) -> String { self.content.text_between(0, self.content.size()) }
}
