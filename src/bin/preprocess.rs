use std::{path::PathBuf, time::Instant};

use clap::Parser;
use hierarchy_paths::{config::Configuration, preprocessor::Preprocessor};
use log::info;

/// Contracts the graph named in the configuration once per profile and
/// writes edges, vertex ranks and the search graph to the output directory.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration in `.toml` format
    #[arg(short, long)]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let configuration = Configuration::from_file(&args.config)?;
    let start = Instant::now();
    let summaries = Preprocessor::new(configuration).run()?;

    for summary in &summaries {
        println!(
            "{}: {} vertices contracted, {} shortcuts",
            summary.profile, summary.vertices, summary.shortcuts
        );
    }
    info!("preprocessing took {:?}", start.elapsed());
    Ok(())
}
