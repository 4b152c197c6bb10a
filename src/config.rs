mod diff_options;
mod simplify_options;

pub use diff_options::{DiffAlgorithm, DiffOptions};
pub use simplify_options::SimplifyOptions;
