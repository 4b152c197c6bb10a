//! Tracks which edits inserted and deleted which parts of a structured
//! document, keeping the list of changes minimal as edits pile up.

mod change;
mod change_set;
mod config;
mod consts;
mod diffs;
mod document;
mod errors;
mod position_map;
mod simplify;
mod span;
mod tokenizer;
mod utils;

pub use change::Change;
pub use change_set::{
    ChangeSet, ChangeSetConfig, DeletedSpan, InsertedSpan, Metadata, SerializedChange,
    SerializedChangeSet,
};
pub use config::{DiffAlgorithm, DiffOptions, SimplifyOptions};
pub use diffs::{DiffRange, compute_diff, diff_tokens};
pub use document::{Attributes, Fragment, Mark, Node, Slice};
pub use errors::ChangeSetError;
pub use position_map::{Bias, Mapping, PositionMap, ReplacedRange, StepMap};
pub use simplify::simplify_changes;
pub use span::{Combine, Span};
pub use tokenizer::{
    AttributeEncoder, BaseEncoder, MarkEncoder, NodeTypeIds, Token, TokenEncoder, tokens,
};
