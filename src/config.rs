use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    error::{Result, RoutingError},
    profile::IndexKind,
    search::ch::ContractionParameters,
};

pub const CONTRACTION_HIERARCHIES: &str = "ch";

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct InputConfig {
    /// Edge rows `uid;geography;from;to;undirected;length[;shortcut;contracted_vertex]`.
    pub edges: PathBuf,
    /// Optional `uid;ordering_rank` rows applied after the edges.
    pub vertices: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AlgorithmConfig {
    pub name: String,
    #[serde(default)]
    pub parameters: ContractionParameters,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProfilePropertyConfig {
    pub name: String,
    /// File holding `uid;value` rows of the index.
    pub table_name: PathBuf,
    pub importance: Vec<i32>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Configuration {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub algorithm: AlgorithmConfig,
    #[serde(default)]
    pub profile_properties: Vec<ProfilePropertyConfig>,
    /// Upper bound of normalized index values.
    #[serde(default = "default_scale_max")]
    pub scale_max: f64,
}

fn default_scale_max() -> f64 {
    1000.0
}

impl Configuration {
    pub fn from_file(path: &Path) -> Result<Configuration> {
        let content = fs::read_to_string(path)?;
        let mut configuration = Configuration::parse(&content)?;
        if let Some(base) = path.parent() {
            configuration.resolve_paths(base);
        }
        Ok(configuration)
    }

    pub fn parse(content: &str) -> Result<Configuration> {
        let configuration: Configuration = toml::from_str(content)?;
        configuration.validate()?;
        Ok(configuration)
    }

    /// Rejects everything that would otherwise fail late, after expensive
    /// preprocessing already started.
    pub fn validate(&self) -> Result<()> {
        if self.algorithm.name != CONTRACTION_HIERARCHIES {
            return Err(RoutingError::InvalidArgument(format!(
                "no algorithm is registered under the name {}",
                self.algorithm.name
            )));
        }
        self.algorithm.parameters.validate()?;

        for property in &self.profile_properties {
            property.name.parse::<IndexKind>()?;
            if property.importance.is_empty() {
                return Err(RoutingError::InvalidArgument(format!(
                    "profile property {} has no importance options",
                    property.name
                )));
            }
        }

        if !(self.scale_max.is_finite() && self.scale_max > 0.0) {
            return Err(RoutingError::InvalidArgument(format!(
                "scale_max must be positive, got {}",
                self.scale_max
            )));
        }
        Ok(())
    }

    /// Relative paths are taken relative to the configuration file.
    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        resolve(&mut self.input.edges);
        if let Some(vertices) = self.input.vertices.as_mut() {
            resolve(vertices);
        }
        resolve(&mut self.output.directory);
        for property in &mut self.profile_properties {
            resolve(&mut property.table_name);
        }
    }

    pub fn search_graph_path(&self, profile: &str) -> PathBuf {
        self.output.directory.join(format!("{}.bincode", profile))
    }

    pub fn saved_edges_path(&self, profile: &str) -> PathBuf {
        self.output.directory.join(format!("{}.edges.csv", profile))
    }

    pub fn saved_vertices_path(&self, profile: &str) -> PathBuf {
        self.output.directory.join(format!("{}.vertices.csv", profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIGURATION: &str = r#"
        [input]
        edges = "data/edges.csv"

        [output]
        directory = "out"

        [algorithm]
        name = "ch"

        [algorithm.parameters]
        hop_count = 5
        edge_difference = 1
        deleted_neighbours = 1
        space_size = 0

        [[profile_properties]]
        name = "length"
        table_name = "data/length.csv"
        importance = [1, 2]

        [[profile_properties]]
        name = "green"
        table_name = "data/green.csv"
        importance = [0, 3]
    "#;

    #[test]
    fn parses_full_configuration() {
        let configuration = Configuration::parse(CONFIGURATION).unwrap();
        assert_eq!(configuration.algorithm.parameters.hop_count, 5);
        assert_eq!(configuration.profile_properties.len(), 2);
        assert_eq!(configuration.profile_properties[1].importance, vec![0, 3]);
        assert_eq!(configuration.input.vertices, None);
        assert_eq!(configuration.scale_max, 1000.0);
        assert_eq!(
            configuration.search_graph_path("length1"),
            PathBuf::from("out/length1.bincode")
        );
    }

    #[test]
    fn unknown_algorithm_fails_fast() {
        let content = CONFIGURATION.replace("name = \"ch\"", "name = \"alt\"");
        assert!(matches!(
            Configuration::parse(&content),
            Err(RoutingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn unknown_index_fails_fast() {
        let content = CONFIGURATION.replace("name = \"green\"", "name = \"noise\"");
        assert!(matches!(
            Configuration::parse(&content),
            Err(RoutingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn malformed_toml_is_reported() {
        assert!(matches!(
            Configuration::parse("[input"),
            Err(RoutingError::Toml(_))
        ));
    }
}
