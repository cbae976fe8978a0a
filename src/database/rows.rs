use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, RoutingError},
    graphs::{
        edge::{Edge, EdgeType},
        EdgeId, OrderingRank, VertexId, Weight, MAX_EDGE_LENGTH,
    },
};

/// Imported edge, `uid;geography;from;to;undirected;length[;shortcut;contracted_vertex]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRow {
    pub uid: EdgeId,
    pub geography: Option<String>,
    pub from: VertexId,
    pub to: VertexId,
    pub undirected: u8,
    pub length: f64,
    #[serde(default)]
    pub shortcut: Option<u8>,
    #[serde(default)]
    pub contracted_vertex: Option<VertexId>,
}

/// Persisted edge, `uid;from;to;twoway;length;shortcut;contracted_vertex`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedEdgeRow {
    pub uid: EdgeId,
    pub from: VertexId,
    pub to: VertexId,
    pub twoway: u8,
    pub length: Weight,
    pub shortcut: u8,
    pub contracted_vertex: VertexId,
}

/// `uid;ordering_rank`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexRow {
    pub uid: VertexId,
    pub ordering_rank: OrderingRank,
}

fn flag(value: u8, what: &str, uid: EdgeId) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(RoutingError::Parse {
            what: format!("{} of edge {}", what, uid),
            message: format!("expected 0 or 1, got {}", value),
        }),
    }
}

fn weight(length: f64, uid: EdgeId) -> Result<Weight> {
    if !length.is_finite() || length < 0.0 || length.round() > MAX_EDGE_LENGTH as f64 {
        return Err(RoutingError::Parse {
            what: format!("length of edge {}", uid),
            message: format!("{} is not a valid length", length),
        });
    }
    Ok(length.round() as Weight)
}

impl TryFrom<EdgeRow> for Edge {
    type Error = RoutingError;

    fn try_from(row: EdgeRow) -> Result<Edge> {
        let length = weight(row.length, row.uid)?;
        let shortcut = match row.shortcut {
            Some(value) => flag(value, "shortcut flag", row.uid)?,
            None => false,
        };
        let edge = match (shortcut, row.contracted_vertex) {
            (true, Some(via)) => Edge::shortcut(row.uid, row.from, row.to, length, via),
            (true, None) => {
                return Err(RoutingError::Parse {
                    what: format!("contracted vertex of edge {}", row.uid),
                    message: "shortcut without contracted vertex".to_string(),
                })
            }
            (false, _) => Edge::new(row.uid, row.from, row.to, length),
        };

        if flag(row.undirected, "undirected flag", row.uid)? {
            Ok(edge.with_type(EdgeType::Twoway))
        } else {
            Ok(edge)
        }
    }
}

impl TryFrom<SavedEdgeRow> for Edge {
    type Error = RoutingError;

    fn try_from(row: SavedEdgeRow) -> Result<Edge> {
        let edge = if flag(row.shortcut, "shortcut flag", row.uid)? {
            Edge::shortcut(row.uid, row.from, row.to, row.length, row.contracted_vertex)
        } else {
            Edge::new(row.uid, row.from, row.to, row.length)
        };

        if flag(row.twoway, "twoway flag", row.uid)? {
            Ok(edge.with_type(EdgeType::Twoway))
        } else {
            Ok(edge)
        }
    }
}

impl From<&Edge> for SavedEdgeRow {
    fn from(edge: &Edge) -> SavedEdgeRow {
        SavedEdgeRow {
            uid: edge.uid(),
            from: edge.from(),
            to: edge.to(),
            twoway: edge.is_twoway() as u8,
            length: edge.length(),
            shortcut: edge.is_shortcut() as u8,
            contracted_vertex: edge.contracted_vertex().unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> EdgeRow {
        EdgeRow {
            uid: 4,
            geography: None,
            from: 1,
            to: 2,
            undirected: 1,
            length: 12.6,
            shortcut: None,
            contracted_vertex: None,
        }
    }

    #[test]
    fn imported_rows_become_edges() {
        let edge = Edge::try_from(row()).unwrap();
        assert!(edge.is_twoway());
        assert_eq!(edge.length(), 13);
        assert!(!edge.is_shortcut());

        let shortcut = Edge::try_from(EdgeRow {
            undirected: 0,
            shortcut: Some(1),
            contracted_vertex: Some(7),
            ..row()
        })
        .unwrap();
        assert!(shortcut.is_forward());
        assert_eq!(shortcut.contracted_vertex(), Some(7));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            Edge::try_from(EdgeRow { length: -1.0, ..row() }),
            Err(RoutingError::Parse { .. })
        ));
        assert!(matches!(
            Edge::try_from(EdgeRow { undirected: 2, ..row() }),
            Err(RoutingError::Parse { .. })
        ));
    }

    #[test]
    fn shortcut_flag_is_validated() {
        assert!(matches!(
            Edge::try_from(EdgeRow {
                shortcut: Some(1),
                contracted_vertex: None,
                ..row()
            }),
            Err(RoutingError::Parse { .. })
        ));
        assert!(matches!(
            Edge::try_from(EdgeRow {
                shortcut: Some(3),
                ..row()
            }),
            Err(RoutingError::Parse { .. })
        ));

        let basic = Edge::try_from(EdgeRow {
            shortcut: Some(0),
            contracted_vertex: Some(7),
            ..row()
        })
        .unwrap();
        assert!(!basic.is_shortcut());
    }

    #[test]
    fn lengths_above_edge_maximum_are_rejected() {
        let longest = Edge::try_from(EdgeRow {
            length: MAX_EDGE_LENGTH as f64,
            ..row()
        })
        .unwrap();
        assert_eq!(longest.length(), MAX_EDGE_LENGTH);
        assert!(matches!(
            Edge::try_from(EdgeRow {
                length: MAX_EDGE_LENGTH as f64 + 1.0,
                ..row()
            }),
            Err(RoutingError::Parse { .. })
        ));
    }

    #[test]
    fn saved_row_uses_zero_for_original_edges() {
        let saved = SavedEdgeRow::from(&Edge::new(3, 1, 2, 5));
        assert_eq!((saved.shortcut, saved.contracted_vertex, saved.twoway), (0, 0, 0));
    }
}
