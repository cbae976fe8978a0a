use std::path::Path;

use error::Result;
use graphs::search_graph::SearchGraph;
use utility::read_bincode_with_spinner;

pub mod config;
pub mod database;
pub mod error;
pub mod graphs;
pub mod preprocessor;
pub mod profile;
pub mod router;
pub mod search;
pub mod utility;

pub fn reading_search_graph(path: &Path) -> Result<SearchGraph> {
    read_bincode_with_spinner("search graph", path)
}
