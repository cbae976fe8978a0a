use std::{
    fs::{self, File},
    io::BufWriter,
    time::Instant,
};

use log::info;

use crate::{
    config::Configuration,
    database::{
        load_additional_vertex_properties, load_graph_edges, read_edge_rows, read_vertex_rows,
        save_edges, save_vertices,
    },
    error::Result,
    graphs::{contraction_graph::ContractionGraph, search_graph::SearchGraph},
    profile::{ConstantLength, DataIndex, IndexKind, LengthSource, ProfileGenerator},
    search::ch::contractor::GraphContractor,
    utility::write_bincode_with_spinner,
};

pub const DEFAULT_PROFILE: &str = "default";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreprocessingSummary {
    pub profile: String,
    pub vertices: usize,
    pub shortcuts: usize,
}

pub struct Preprocessor {
    configuration: Configuration,
}

impl Preprocessor {
    pub fn new(configuration: Configuration) -> Preprocessor {
        Preprocessor { configuration }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Loads the base graph named by the configuration.
    pub fn create_graph(configuration: &Configuration) -> Result<ContractionGraph> {
        let start = Instant::now();
        let mut graph = ContractionGraph::new();
        let edges = load_graph_edges(&mut graph, read_edge_rows(&configuration.input.edges)?);
        if let Some(vertices) = &configuration.input.vertices {
            load_additional_vertex_properties(&mut graph, read_vertex_rows(vertices)?)?;
        }
        info!(
            "loaded {} edges over {} vertices in {:?}",
            edges,
            graph.number_of_vertices(),
            start.elapsed()
        );
        Ok(graph)
    }

    /// Every configured profile paired with its name. Without profile
    /// properties the stored lengths are used under the default name.
    pub fn length_sources(&self) -> Result<Vec<(String, Box<dyn LengthSource>)>> {
        let mut generator = ProfileGenerator::new();
        for property in &self.configuration.profile_properties {
            let kind: IndexKind = property.name.parse()?;
            let mut index = DataIndex::from_csv(kind, &property.table_name)?;
            index.normalize(self.configuration.scale_max);
            generator.add_index(index, property.importance.clone());
        }

        if generator.is_empty() {
            return Ok(vec![(DEFAULT_PROFILE.to_string(), Box::new(ConstantLength))]);
        }
        Ok(generator
            .generate()
            .into_iter()
            .map(|profile| {
                let source: Box<dyn LengthSource> = Box::new(profile.clone());
                (profile.name(), source)
            })
            .collect())
    }

    /// Contracts the base graph once per profile and writes the results.
    pub fn run(&self) -> Result<Vec<PreprocessingSummary>> {
        let base = Preprocessor::create_graph(&self.configuration)?;
        let length_sources = self.length_sources()?;
        fs::create_dir_all(&self.configuration.output.directory)?;

        let mut summaries = Vec::with_capacity(length_sources.len());
        for (name, source) in length_sources {
            summaries.push(self.preprocess_profile(&base, &name, source.as_ref())?);
        }
        Ok(summaries)
    }

    fn preprocess_profile(
        &self,
        base: &ContractionGraph,
        name: &str,
        source: &dyn LengthSource,
    ) -> Result<PreprocessingSummary> {
        info!("preprocessing profile {}", name);
        let start = Instant::now();

        let mut graph = base.clone();
        graph.reweight(source)?;

        let mut contractor = GraphContractor::new(&graph, self.configuration.algorithm.parameters);
        let summary = contractor.contract_graph(&mut graph);
        info!("contracting profile {} took {:?}", name, start.elapsed());

        let edges_path = self.configuration.saved_edges_path(name);
        let saved = save_edges(&graph, BufWriter::new(File::create(&edges_path)?))?;
        save_vertices(
            &graph,
            BufWriter::new(File::create(self.configuration.saved_vertices_path(name))?),
        )?;
        info!("saved {} edge rows to {}", saved, edges_path.display());

        let search_graph = SearchGraph::load(&graph);
        write_bincode_with_spinner(
            "search graph",
            &self.configuration.search_graph_path(name),
            &search_graph,
        )?;

        Ok(PreprocessingSummary {
            profile: name.to_string(),
            vertices: summary.contracted_vertices,
            shortcuts: summary.shortcuts,
        })
    }
}
