use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_MAX_SIMPLIFY_DISTANCE;

/// Tunables of the presentation pass.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplifyOptions {
    /// Changes closer than this are considered together.
    #[cfg_attr(feature = "serde", serde(default = "default_max_distance"))]
    pub max_distance: usize,
}

fn default_max_distance() -> usize {
    debug!("Using default max simplify distance: {DEFAULT_MAX_SIMPLIFY_DISTANCE}");
    DEFAULT_MAX_SIMPLIFY_DISTANCE
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            max_distance: default_max_distance(),
        }
    }
}
