use crate::{
    error::Result,
    graphs::{edge::Edge, Weight},
};

pub mod data_index;
#[allow(clippy::module_inception)]
pub mod profile;

pub use data_index::{DataIndex, IndexKind};
pub use profile::{Profile, ProfileGenerator};

/// Where edge lengths come from. Contraction and route measurement read
/// lengths through this trait instead of caching one weighting.
pub trait LengthSource: Send + Sync {
    fn length(&self, edge: &Edge) -> Result<Weight>;
}

/// Uses the length stored in the edge.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantLength;

impl LengthSource for ConstantLength {
    fn length(&self, edge: &Edge) -> Result<Weight> {
        Ok(edge.length())
    }
}
