use thiserror::Error;

use crate::graphs::{EdgeId, VertexId};

#[derive(Debug, Error)]
pub enum RoutingError {
    /// Both searches ran out of vertices without meeting.
    #[error("no route from {from} to {to}")]
    RouteNotFound { from: VertexId, to: VertexId },

    /// A shortcut child or overlay edge is missing, the hierarchy is inconsistent.
    #[error("edge from {from} to {to} not found")]
    EdgeNotFound { from: VertexId, to: VertexId },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("could not parse {what}: {message}")]
    Parse { what: String, message: String },

    #[error("index {index} holds no value for edge {uid}")]
    MissingIndexValue { index: String, uid: EdgeId },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Bincode(#[from] bincode::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RoutingError>;
