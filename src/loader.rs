//! Startup loading: dataset plus state and county boundaries.

use std::thread;

use anyhow::{anyhow, Context, Result};

use crate::{
    config::{Columns, MapConfig},
    data::Dataset,
    geom::Feature,
    io::{topojson::Topology, Fetcher},
    types::{state_name, GeoId, GeoType},
};

/// Everything loaded at startup. Immutable for the rest of the session.
#[derive(Debug, Clone)]
pub struct Atlas {
    dataset: Dataset,
    states: Vec<Feature>,
    counties: Vec<Feature>,
}

impl Atlas {
    pub fn new(dataset: Dataset, states: Vec<Feature>, counties: Vec<Feature>) -> Self {
        Self { dataset, states, counties }
    }

    /// Build an atlas from raw bytes already in memory (CSV + two TopoJSON documents).
    pub fn from_bytes(csv: &[u8], states_topo: &[u8], counties_topo: &[u8], config: &MapConfig) -> Result<Self> {
        let dataset = parse_dataset(csv, &config.columns)?;
        let states = parse_features(states_topo, &config.sources.states_object, GeoType::State)?;
        let counties = parse_features(counties_topo, &config.sources.counties_object, GeoType::County)?;
        Ok(Self::new(dataset, states, counties))
    }

    #[inline] pub fn dataset(&self) -> &Dataset { &self.dataset }

    #[inline] pub fn states(&self) -> &[Feature] { &self.states }

    #[inline] pub fn counties(&self) -> &[Feature] { &self.counties }

    /// Counties whose 5-digit id starts with the state's 2-digit code.
    pub fn counties_in<'a>(&'a self, state: &'a GeoId) -> impl Iterator<Item = &'a Feature> + 'a {
        self.counties.iter().filter(move |county| county.id.is_within(state))
    }

    /// Display name for a state: the FIPS table, the topology's own name, or "State SS".
    pub fn state_display_name(&self, state: &GeoId) -> String {
        state_name(state.id()).map(str::to_string)
            .or_else(|| self.states.iter()
                .find(|feature| &feature.id == state)
                .and_then(|feature| feature.name.clone()))
            .unwrap_or_else(|| format!("State {}", state.id()))
    }
}

/// Load everything the map needs, in order: acquire the fetcher, read the dataset, then fetch
/// both boundary topologies concurrently. Any failure aborts the whole load.
pub fn load(config: &MapConfig) -> Result<Atlas> {
    let sources = &config.sources;

    let fetcher = Fetcher::acquire().context("[loader] Boundary fetcher unavailable")?;

    log::info!("[loader] loading dataset from {}", sources.dataset);
    let dataset = parse_dataset(&fetcher.fetch(&sources.dataset)?, &config.columns)
        .with_context(|| format!("[loader] Failed to load dataset {}", sources.dataset))?;

    log::info!("[loader] loading boundaries from {} and {}", sources.states, sources.counties);
    let (states_bytes, counties_bytes) = thread::scope(|scope| {
        let states = scope.spawn(|| fetcher.fetch(&sources.states));
        let counties = scope.spawn(|| fetcher.fetch(&sources.counties));
        (join(states), join(counties))
    });

    let states = parse_features(&states_bytes?, &sources.states_object, GeoType::State)
        .with_context(|| format!("[loader] Failed to load states from {}", sources.states))?;
    let counties = parse_features(&counties_bytes?, &sources.counties_object, GeoType::County)
        .with_context(|| format!("[loader] Failed to load counties from {}", sources.counties))?;

    log::info!(
        "[loader] {} observations, {} states, {} counties",
        dataset.len(), states.len(), counties.len(),
    );

    Ok(Atlas::new(dataset, states, counties))
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, Result<T>>) -> Result<T> {
    handle.join().map_err(|_| anyhow!("[loader] fetch thread panicked"))?
}

fn parse_dataset(bytes: &[u8], columns: &Columns) -> Result<Dataset> {
    Dataset::from_csv_bytes(bytes, columns)
}

fn parse_features(bytes: &[u8], object: &str, ty: GeoType) -> Result<Vec<Feature>> {
    Topology::from_slice(bytes)?.features(object, ty)
}
