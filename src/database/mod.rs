//! CSV persistence of graphs: imported edge rows, saved contracted edges
//! and vertex ranks. All files are `;` separated and headerless.

use std::{io::Write, path::Path};

use csv::{ReaderBuilder, WriterBuilder};
use log::info;

use crate::{
    error::{Result, RoutingError},
    graphs::{contraction_graph::ContractionGraph, edge::Edge},
};

pub mod rows;

use rows::{EdgeRow, SavedEdgeRow, VertexRow};

fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.delimiter(b';').has_headers(false).flexible(true);
    builder
}

fn writer_builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder.delimiter(b';').has_headers(false);
    builder
}

/// Reads imported edge rows.
pub fn read_edge_rows(path: &Path) -> Result<Vec<Edge>> {
    let mut reader = reader_builder().from_path(path)?;
    reader
        .deserialize::<EdgeRow>()
        .map(|row| Edge::try_from(row?))
        .collect()
}

/// Reads rows written by [`save_edges`].
pub fn read_saved_edge_rows(path: &Path) -> Result<Vec<Edge>> {
    let mut reader = reader_builder().from_path(path)?;
    reader
        .deserialize::<SavedEdgeRow>()
        .map(|row| Edge::try_from(row?))
        .collect()
}

pub fn read_vertex_rows(path: &Path) -> Result<Vec<VertexRow>> {
    let mut reader = reader_builder().from_path(path)?;
    reader
        .deserialize::<VertexRow>()
        .map(|row| row.map_err(RoutingError::from))
        .collect()
}

/// Adds every edge to the graph. Returns the number of edges read.
pub fn load_graph_edges(
    graph: &mut ContractionGraph,
    edges: impl IntoIterator<Item = Edge>,
) -> usize {
    let mut count = 0;
    for edge in edges {
        graph.add_edge(edge);
        count += 1;
    }
    count
}

/// Backfills ordering ranks of vertices already in the graph.
pub fn load_additional_vertex_properties(
    graph: &mut ContractionGraph,
    rows: impl IntoIterator<Item = VertexRow>,
) -> Result<()> {
    for VertexRow { uid, ordering_rank } in rows {
        if !graph.contains_vertex(uid) {
            return Err(RoutingError::InvalidArgument(format!(
                "vertex row {} names a vertex without edges",
                uid
            )));
        }
        graph.set_ordering_rank(uid, ordering_rank);
    }
    Ok(())
}

/// Writes forward edges and one direction of every twoway edge. Returns the
/// number of rows written.
pub fn save_edges(graph: &ContractionGraph, writer: impl Write) -> Result<usize> {
    let mut writer = writer_builder().from_writer(writer);
    let mut count = 0;
    for edge in graph
        .edges()
        .filter(|edge| edge.is_forward() || (edge.is_twoway() && edge.from() < edge.to()))
    {
        writer.serialize(SavedEdgeRow::from(edge))?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

pub fn save_vertices(graph: &ContractionGraph, writer: impl Write) -> Result<usize> {
    let mut writer = writer_builder().from_writer(writer);
    let mut count = 0;
    for vertex in graph.vertices() {
        writer.serialize(VertexRow {
            uid: vertex.id(),
            ordering_rank: vertex.ordering_rank(),
        })?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Rebuilds a contracted graph from files written by [`save_edges`] and
/// [`save_vertices`].
pub fn load_saved_graph(edges: &Path, vertices: &Path) -> Result<ContractionGraph> {
    let mut graph = ContractionGraph::new();
    let count = load_graph_edges(&mut graph, read_saved_edge_rows(edges)?);
    load_additional_vertex_properties(&mut graph, read_vertex_rows(vertices)?)?;
    info!(
        "loaded {} saved edges and {} vertices from {}",
        count,
        graph.number_of_vertices(),
        edges.display()
    );
    Ok(graph)
}
