pub mod categories;
pub mod render;
pub mod summary;

use anyhow::{Context, Result};
use loanmap::{load, GeoId, GeoType, MapConfig, Source, ViewController};

use crate::cli::Cli;

/// Configuration from `--config`, with the source overrides applied.
pub fn config(cli: &Cli) -> Result<MapConfig> {
    let mut config = match &cli.config {
        Some(path) => MapConfig::from_json_path(path)?,
        None => MapConfig::default(),
    };

    if let Some(data) = &cli.data { config.sources.dataset = Source::from(data.as_str()) }
    if let Some(states) = &cli.states { config.sources.states = Source::from(states.as_str()) }
    if let Some(counties) = &cli.counties { config.sources.counties = Source::from(counties.as_str()) }

    Ok(config)
}

/// Load everything and open a controller on the requested category.
pub fn controller(cli: &Cli, category: Option<&str>) -> Result<ViewController> {
    let config = config(cli)?;
    let atlas = load(&config).context("[loanmap] Failed to load map data")?;

    let mut controller = ViewController::new(atlas, config);
    if let Some(category) = category {
        controller.set_category(category)?;
    }
    Ok(controller)
}

pub fn parse_state(code: &str) -> Result<GeoId> {
    GeoId::new(GeoType::State, code).with_context(|| format!("[loanmap] Invalid state code {code:?}"))
}
