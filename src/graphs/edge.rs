use std::fmt;

use serde::{Deserialize, Serialize};

use super::{EdgeId, VertexId, Weight};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeType {
    Forward,
    Backward,
    Twoway,
}

impl EdgeType {
    pub fn flipped(self) -> EdgeType {
        match self {
            EdgeType::Forward => EdgeType::Backward,
            EdgeType::Backward => EdgeType::Forward,
            EdgeType::Twoway => EdgeType::Twoway,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    Basic,
    Shortcut,
}

/// An edge of the road graph or a shortcut bypassing `contracted_vertex`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    uid: EdgeId,
    from: VertexId,
    to: VertexId,
    length: Weight,
    edge_type: EdgeType,
    contracted_vertex: Option<VertexId>,
}

impl Edge {
    pub fn new(uid: EdgeId, from: VertexId, to: VertexId, length: Weight) -> Edge {
        Edge {
            uid,
            from,
            to,
            length,
            edge_type: EdgeType::Forward,
            contracted_vertex: None,
        }
    }

    pub fn twoway(uid: EdgeId, from: VertexId, to: VertexId, length: Weight) -> Edge {
        Edge::new(uid, from, to, length).with_type(EdgeType::Twoway)
    }

    /// A shortcut `from -> to` representing `from -> via -> to`.
    pub fn shortcut(
        uid: EdgeId,
        from: VertexId,
        to: VertexId,
        length: Weight,
        via: VertexId,
    ) -> Edge {
        Edge {
            uid,
            from,
            to,
            length,
            edge_type: EdgeType::Forward,
            contracted_vertex: Some(via),
        }
    }

    pub fn with_type(mut self, edge_type: EdgeType) -> Edge {
        self.edge_type = edge_type;
        self
    }

    pub fn uid(&self) -> EdgeId {
        self.uid
    }

    pub fn from(&self) -> VertexId {
        self.from
    }

    pub fn to(&self) -> VertexId {
        self.to
    }

    pub fn length(&self) -> Weight {
        self.length
    }

    pub fn set_length(&mut self, length: Weight) {
        self.length = length;
    }

    pub fn edge_type(&self) -> EdgeType {
        self.edge_type
    }

    pub fn is_forward(&self) -> bool {
        self.edge_type == EdgeType::Forward
    }

    pub fn is_backward(&self) -> bool {
        self.edge_type == EdgeType::Backward
    }

    pub fn is_twoway(&self) -> bool {
        self.edge_type == EdgeType::Twoway
    }

    pub fn contracted_vertex(&self) -> Option<VertexId> {
        self.contracted_vertex
    }

    pub fn is_shortcut(&self) -> bool {
        self.contracted_vertex.is_some()
    }

    pub fn kind(&self) -> EdgeKind {
        match self.contracted_vertex {
            Some(_) => EdgeKind::Shortcut,
            None => EdgeKind::Basic,
        }
    }

    /// Swaps the endpoints. Forward and backward flip, twoway stays twoway.
    pub fn reversed(&self) -> Edge {
        Edge {
            uid: self.uid,
            from: self.to,
            to: self.from,
            length: self.length,
            edge_type: self.edge_type.flipped(),
            contracted_vertex: self.contracted_vertex,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {} ({})", self.uid, self.from, self.to, self.length)?;
        if let Some(via) = self.contracted_vertex {
            write!(f, " via {}", via)?;
        }
        Ok(())
    }
}
