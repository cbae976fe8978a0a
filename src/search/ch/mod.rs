use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};

pub mod bidirectional;
pub mod contractor;
pub mod route_retriever;
pub mod shortcut_filter;
pub mod shortcut_finder;
pub mod vertex_measures;
pub mod witness;

/// Witness search depth and the coefficients of the contraction priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractionParameters {
    pub hop_count: u32,
    pub edge_difference: i32,
    pub deleted_neighbours: i32,
    pub space_size: i32,
}

impl Default for ContractionParameters {
    fn default() -> Self {
        ContractionParameters {
            hop_count: 5,
            edge_difference: 1,
            deleted_neighbours: 1,
            space_size: 0,
        }
    }
}

impl ContractionParameters {
    pub fn validate(&self) -> Result<()> {
        if self.hop_count == 0 {
            return Err(RoutingError::InvalidArgument(
                "hop_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
