use std::{path::PathBuf, time::Instant};

use clap::Parser;
use hierarchy_paths::{
    config::Configuration,
    error::RoutingError,
    graphs::{path::ShortestPathRequest, VertexId},
    preprocessor::{Preprocessor, DEFAULT_PROFILE},
    reading_search_graph,
    search::PathFinding,
};
use indicatif::ParallelProgressIterator;
use log::{info, warn};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use rayon::prelude::*;

/// Compares the cost of CH queries against plain Dijkstra on the reweighted
/// base graph for random vertex pairs.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration in `.toml` format
    #[arg(short, long)]
    config: PathBuf,
    /// Profile to validate, as named by `preprocess`
    #[arg(short, long, default_value = DEFAULT_PROFILE)]
    profile: String,
    /// Number of random queries
    #[arg(short, long, default_value_t = 1_000)]
    queries: usize,
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let configuration = Configuration::from_file(&args.config)?;
    let preprocessor = Preprocessor::new(configuration.clone());
    let mut graph = Preprocessor::create_graph(&configuration)?;
    let length_source = preprocessor
        .length_sources()?
        .into_iter()
        .find(|(name, _)| name == &args.profile)
        .map(|(_, source)| source)
        .ok_or_else(|| RoutingError::InvalidArgument(format!("unknown profile {}", args.profile)))?;
    graph.reweight(length_source.as_ref())?;

    let search_graph = reading_search_graph(&configuration.search_graph_path(&args.profile))?;

    let vertices: Vec<VertexId> = graph.vertices().map(|vertex| vertex.id()).collect();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let requests: Vec<ShortestPathRequest> = (0..args.queries)
        .filter_map(|_| {
            let source = *vertices.choose(&mut rng)?;
            let target = *vertices.choose(&mut rng)?;
            Some(ShortestPathRequest::new(source, target))
        })
        .collect();

    let start = Instant::now();
    let mismatches: Vec<_> = requests
        .par_iter()
        .progress_count(requests.len() as u64)
        .filter_map(|&request| {
            let expected = graph.shortest_route_weight(request).ok();
            let actual = search_graph.shortest_route_weight(request).ok();
            (expected != actual).then_some((request, expected, actual))
        })
        .collect();
    info!(
        "validated {} queries in {:?}",
        requests.len(),
        start.elapsed()
    );

    for (request, expected, actual) in &mismatches {
        warn!(
            "{} -> {}: dijkstra {:?}, contraction hierarchy {:?}",
            request.source, request.target, expected, actual
        );
    }
    if !mismatches.is_empty() {
        anyhow::bail!("{} of {} queries disagree", mismatches.len(), requests.len());
    }

    println!("All {} queries correct", requests.len());
    Ok(())
}
