use std::{fmt::Write as _, fs, path::Path};

use hierarchy_paths::{
    config::Configuration,
    graphs::path::ShortestPathRequest,
    preprocessor::{Preprocessor, DEFAULT_PROFILE},
    reading_search_graph,
    router::Router,
    search::PathFinding,
};
use tempfile::tempdir;

const EDGES: [(u64, u32, u32, u32); 11] = [
    (0, 1, 2, 2),
    (1, 1, 3, 2),
    (2, 2, 6, 8),
    (3, 3, 4, 3),
    (4, 4, 3, 2),
    (5, 4, 5, 2),
    (6, 5, 4, 4),
    (7, 4, 6, 6),
    (8, 5, 6, 2),
    (9, 6, 5, 3),
    (10, 5, 3, 7),
];

fn write_input(directory: &Path, with_profiles: bool) {
    let mut edges = String::new();
    let mut lengths = String::new();
    for (uid, from, to, length) in EDGES {
        writeln!(edges, "{};;{};{};0;{}", uid, from, to, length).unwrap();
        writeln!(lengths, "{};{}", uid, length).unwrap();
    }
    fs::write(directory.join("edges.csv"), edges).unwrap();
    fs::write(directory.join("length.csv"), lengths).unwrap();

    let mut configuration = String::from(
        r#"
        scale_max = 8.0

        [input]
        edges = "edges.csv"

        [output]
        directory = "out"

        [algorithm]
        name = "ch"
        "#,
    );
    if with_profiles {
        configuration.push_str(
            r#"
        [[profile_properties]]
        name = "length"
        table_name = "length.csv"
        importance = [1, 2]
            "#,
        );
    }
    fs::write(directory.join("config.toml"), configuration).unwrap();
}

#[test]
fn default_profile_uses_stored_lengths() {
    let directory = tempdir().unwrap();
    write_input(directory.path(), false);

    let configuration = Configuration::from_file(&directory.path().join("config.toml")).unwrap();
    let summaries = Preprocessor::new(configuration.clone()).run().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].profile, DEFAULT_PROFILE);
    assert_eq!(summaries[0].vertices, 6);

    assert!(configuration.saved_edges_path(DEFAULT_PROFILE).exists());
    assert!(configuration.saved_vertices_path(DEFAULT_PROFILE).exists());

    let graph = reading_search_graph(&configuration.search_graph_path(DEFAULT_PROFILE)).unwrap();
    let route = graph.shortest_route(ShortestPathRequest::new(1, 6)).unwrap();
    assert_eq!(route.weight, 9);
}

#[test]
fn one_search_graph_per_profile() {
    let directory = tempdir().unwrap();
    write_input(directory.path(), true);

    let configuration = Configuration::from_file(&directory.path().join("config.toml")).unwrap();
    let summaries = Preprocessor::new(configuration.clone()).run().unwrap();
    let names: Vec<_> = summaries.iter().map(|summary| summary.profile.as_str()).collect();
    assert_eq!(names, vec!["length1", "length2"]);

    let mut router = Router::new();
    for name in names {
        router.add_profile(
            name,
            reading_search_graph(&configuration.search_graph_path(name)).unwrap(),
        );
    }

    let request = ShortestPathRequest::new(1, 6);
    assert_eq!(router.shortest_route_weight(request).unwrap(), 9);
    router.set_active("length2").unwrap();
    assert_eq!(router.shortest_route_weight(request).unwrap(), 18);
}

#[test]
fn missing_index_value_stops_preprocessing() {
    let directory = tempdir().unwrap();
    write_input(directory.path(), true);
    fs::write(directory.path().join("length.csv"), "0;2\n").unwrap();

    let configuration = Configuration::from_file(&directory.path().join("config.toml")).unwrap();
    assert!(Preprocessor::new(configuration).run().is_err());
}
