use std::path::PathBuf;

use clap::Parser;
use hierarchy_paths::{
    config::Configuration,
    graphs::{path::ShortestPathRequest, VertexId},
    preprocessor::DEFAULT_PROFILE,
    reading_search_graph,
    router::Router,
};

/// Answers a single query on a preprocessed graph and prints the unpacked
/// route as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration in `.toml` format
    #[arg(short, long)]
    config: PathBuf,
    /// Profile to route with, as named by `preprocess`
    #[arg(short, long, default_value = DEFAULT_PROFILE)]
    profile: String,
    #[arg(short, long)]
    source: VertexId,
    #[arg(short, long)]
    target: VertexId,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let configuration = Configuration::from_file(&args.config)?;
    let search_graph = reading_search_graph(&configuration.search_graph_path(&args.profile))?;

    let mut router = Router::new();
    router.add_profile(args.profile.clone(), search_graph);
    router.set_active(&args.profile)?;

    let route = router.calculate_shortest_route(ShortestPathRequest::new(args.source, args.target))?;
    println!("{}", serde_json::to_string_pretty(&route)?);
    Ok(())
}
