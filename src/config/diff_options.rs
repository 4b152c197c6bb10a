use std::sync::Arc;

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    consts::{
        DEFAULT_BOUNDARY_NODES, DEFAULT_FENCED_NODES, DEFAULT_MAX_DIFF_SIZE,
        DEFAULT_MAX_TABLE_CELLS,
    },
    tokenizer::{AttributeEncoder, TokenEncoder},
};

/// Search strategy used to find the changed regions between two token lists.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffAlgorithm {
    /// Shortest edit script search, bounded by `max_diff_size` edits.
    #[default]
    Myers,
    /// Longest common subsequence table, bounded by `max_table_cells`.
    Lcs,
}

/// Tunables of the diff engine.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct DiffOptions {
    #[cfg_attr(feature = "serde", serde(default = "default_max_diff_size"))]
    pub max_diff_size: usize,

    #[cfg_attr(feature = "serde", serde(default = "default_max_table_cells"))]
    pub max_table_cells: usize,

    #[cfg_attr(feature = "serde", serde(default = "default_algorithm"))]
    pub algorithm: DiffAlgorithm,

    #[cfg_attr(feature = "serde", serde(default = "default_split_insertions"))]
    pub split_insertions: bool,

    #[cfg_attr(feature = "serde", serde(default = "default_fenced_nodes"))]
    pub fenced_nodes: Vec<String>,

    #[cfg_attr(feature = "serde", serde(default = "default_boundary_nodes"))]
    pub boundary_nodes: Vec<String>,

    #[cfg_attr(feature = "serde", serde(skip, default = "default_encoder"))]
    pub encoder: Arc<dyn TokenEncoder>,
}

fn default_max_diff_size() -> usize {
    debug!("Using default max diff size: {DEFAULT_MAX_DIFF_SIZE}");
    DEFAULT_MAX_DIFF_SIZE
}

fn default_max_table_cells() -> usize {
    debug!("Using default max table cells: {DEFAULT_MAX_TABLE_CELLS}");
    DEFAULT_MAX_TABLE_CELLS
}

fn default_algorithm() -> DiffAlgorithm {
    debug!("Using default diff algorithm: {:?}", DiffAlgorithm::default());
    DiffAlgorithm::default()
}

fn default_split_insertions() -> bool {
    debug!("Splitting multi-node insertions by default");
    true
}

fn default_fenced_nodes() -> Vec<String> {
    debug!("Using default fenced nodes: {DEFAULT_FENCED_NODES:?}");
    DEFAULT_FENCED_NODES.iter().map(|&name| name.to_owned()).collect()
}

fn default_boundary_nodes() -> Vec<String> {
    debug!("Using default boundary nodes: {DEFAULT_BOUNDARY_NODES:?}");
    DEFAULT_BOUNDARY_NODES.iter().map(|&name| name.to_owned()).collect()
}

fn default_encoder() -> Arc<dyn TokenEncoder> {
    debug!("Using default token encoder: {:?}", AttributeEncoder::default());
    Arc::new(AttributeEncoder::default())
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            max_diff_size: default_max_diff_size(),
            max_table_cells: default_max_table_cells(),
            algorithm: default_algorithm(),
            split_insertions: default_split_insertions(),
            fenced_nodes: default_fenced_nodes(),
            boundary_nodes: default_boundary_nodes(),
            encoder: default_encoder(),
        }
    }
}

impl DiffOptions {
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: DiffAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[must_use]
    pub fn with_max_diff_size(mut self, max_diff_size: usize) -> Self {
        self.max_diff_size = max_diff_size;
        self
    }

    #[must_use]
    pub fn with_max_table_cells(mut self, max_table_cells: usize) -> Self {
        self.max_table_cells = max_table_cells;
        self
    }

    #[must_use]
    pub fn with_split_insertions(mut self, split_insertions: bool) -> Self {
        self.split_insertions = split_insertions;
        self
    }

    #[must_use]
    pub fn with_fenced_nodes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fenced_nodes = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_boundary_nodes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.boundary_nodes = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_encoder(mut self, encoder: impl TokenEncoder + 'static) -> Self {
        self.encoder = Arc::new(encoder);
        self
    }
}
