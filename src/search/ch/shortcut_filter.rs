use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};

use crate::graphs::{
    contraction_graph::ContractionGraph,
    edge::{Edge, EdgeType},
    EdgeId, VertexId, Weight,
};

/// Shortcuts of one contraction, split by how they enter the graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShortcutContainer {
    /// Shortcuts between vertices that have no edge yet.
    pub new_edges: Vec<Edge>,
    /// Shortcuts that are shorter than the edge already joining their endpoints.
    pub improving_edges: Vec<Edge>,
}

impl ShortcutContainer {
    pub fn len(&self) -> usize {
        self.new_edges.len() + self.improving_edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.new_edges.is_empty() && self.improving_edges.is_empty()
    }

    pub fn into_edges(self) -> Vec<Edge> {
        let mut edges = self.new_edges;
        edges.extend(self.improving_edges);
        edges
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Placement {
    New,
    Improving,
    Dominated,
}

fn placement(
    graph: &ContractionGraph,
    from: VertexId,
    to: VertexId,
    length: Weight,
) -> Placement {
    match graph.find_edge(from, to) {
        None => Placement::New,
        Some(existing) if length < existing.length() => Placement::Improving,
        Some(_) => Placement::Dominated,
    }
}

/// Sorts shortcuts into new and improving ones and drops those that are not
/// shorter than an existing edge. A twoway shortcut whose directions fall
/// into different classes is split into two forward shortcuts; the second
/// one gets its uid from `next_edge_id`.
pub fn classify_shortcuts(
    graph: &ContractionGraph,
    shortcuts: Vec<Edge>,
    mut next_edge_id: impl FnMut() -> EdgeId,
) -> ShortcutContainer {
    let mut container = ShortcutContainer::default();
    let mut place = |edge: Edge, placement: Placement| match placement {
        Placement::New => container.new_edges.push(edge),
        Placement::Improving => container.improving_edges.push(edge),
        Placement::Dominated => {}
    };

    for shortcut in shortcuts {
        let forward = placement(graph, shortcut.from(), shortcut.to(), shortcut.length());
        if !shortcut.is_twoway() {
            place(shortcut, forward);
            continue;
        }

        let backward = placement(graph, shortcut.to(), shortcut.from(), shortcut.length());
        if forward == backward {
            place(shortcut, forward);
            continue;
        }

        let via = shortcut.contracted_vertex().unwrap_or_default();
        let mut uid = Some(shortcut.uid());
        for (from, to, placement) in [
            (shortcut.from(), shortcut.to(), forward),
            (shortcut.to(), shortcut.from(), backward),
        ] {
            if placement == Placement::Dominated {
                continue;
            }
            let uid = uid.take().unwrap_or_else(&mut next_edge_id);
            place(Edge::shortcut(uid, from, to, shortcut.length(), via), placement);
        }
    }

    container
}

/// For every `(from, to)` pair keeps the cheapest shortcut. Equal lengths
/// are decided by the smaller uid. Input order is preserved.
pub fn filter_duplicate_shortcuts(shortcuts: Vec<Edge>) -> Vec<Edge> {
    let mut best: HashMap<(VertexId, VertexId), (Weight, EdgeId)> = HashMap::new();
    for shortcut in &shortcuts {
        let candidate = (shortcut.length(), shortcut.uid());
        best.entry((shortcut.from(), shortcut.to()))
            .and_modify(|current| {
                if candidate < *current {
                    *current = candidate;
                }
            })
            .or_insert(candidate);
    }

    shortcuts
        .into_iter()
        .filter(|shortcut| best[&(shortcut.from(), shortcut.to())].1 == shortcut.uid())
        .collect()
}

/// Collapses shortcut pairs `a -> b` and `b -> a` of equal length through the
/// same vertex into one twoway shortcut starting at the smaller endpoint.
pub fn merge_twoway_shortcuts(shortcuts: Vec<Edge>) -> Vec<Edge> {
    let by_endpoints: HashMap<(VertexId, VertexId), usize> = shortcuts
        .iter()
        .enumerate()
        .filter(|(_, shortcut)| shortcut.is_forward())
        .map(|(position, shortcut)| ((shortcut.from(), shortcut.to()), position))
        .collect();

    let mut merged_away = HashSet::new();
    let mut result = Vec::with_capacity(shortcuts.len());
    for (position, shortcut) in shortcuts.iter().enumerate() {
        if merged_away.contains(&position) {
            continue;
        }

        let partner = by_endpoints
            .get(&(shortcut.to(), shortcut.from()))
            .copied()
            .filter(|&other| {
                let other = &shortcuts[other];
                shortcut.is_forward()
                    && other.length() == shortcut.length()
                    && other.contracted_vertex() == shortcut.contracted_vertex()
            });

        match partner {
            Some(other) => {
                merged_away.insert(other);
                let lower = if shortcut.from() < shortcut.to() {
                    shortcut
                } else {
                    &shortcuts[other]
                };
                result.push(lower.clone().with_type(EdgeType::Twoway));
            }
            None => result.push(shortcut.clone()),
        }
    }
    result
}
