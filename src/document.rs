//! A small read-only document tree.
//!
//! Sizes follow the usual structured-editor convention: a character and a
//! leaf node each take one position, a container takes two positions for its
//! boundaries plus the size of its content.

mod fragment;
mod mark;
mod node;
mod slice;

pub use fragment::Fragment;
pub use mark::{Attributes, Mark};
pub use node::Node;
pub use slice::Slice;
