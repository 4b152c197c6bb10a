use thiserror::Error;

/// Errors raised while rebuilding a change set from its serialized form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChangeSetError {
    #[error("Change {index} covers {expected} positions on side {side} but its spans cover {actual}")]
    SpanLengthMismatch {
        index: usize,
        side: char,
        expected: usize,
        actual: usize,
    },

    #[error("Change {index} has an inverted range on side {side}: {from} > {to}")]
    InvertedRange {
        index: usize,
        side: char,
        from: usize,
        to: usize,
    },

    #[error("Change {index} starts before the previous change ends")]
    UnorderedChanges { index: usize },

    #[error("Change {index} is preceded by unchanged stretches of different lengths in the two documents")]
    MisalignedChange { index: usize },

    #[error("Change {index} ends at {to}, past the end of the document of size {size}")]
    OutOfBounds { index: usize, to: usize, size: usize },
}
