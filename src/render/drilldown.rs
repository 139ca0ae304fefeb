use crate::{
    aggregate::AggregateSlice,
    config::{Canvas, MapConfig},
    geom::{outline_rings, Feature, Projection},
    loader::Atlas,
    scale::ColorScale,
    types::GeoId,
    view::ViewState,
};

use super::{format_value, Layer, LayerKind, Scene, Shape, Tooltip};

/// Per-state projection fit to the state's counties. With no counties the preset is returned unfit.
pub fn state_projection(atlas: &Atlas, state: &GeoId, canvas: &Canvas) -> Projection {
    Projection::for_state(state).fit_size(
        canvas.inner_width(),
        canvas.inner_height(),
        atlas.counties_in(state).map(|county| &county.shape),
    )
}

/// Drill-down view: the state's counties colored on a scale of their own, a dark outline around
/// the state, and the national layer hidden.
pub fn render_state(atlas: &Atlas, slice: &AggregateSlice, state: &GeoId, projection: &Projection, config: &MapConfig) -> Scene {
    let style = &config.style;
    let counties: Vec<&Feature> = atlas.counties_in(state).collect();
    let scale = ColorScale::from_values(counties.iter().filter_map(|county| slice.county_value(&county.id)));

    let entries = counties.iter()
        .map(|county| {
            let value = slice.county_value(&county.id);
            let screen = projection.project_shape(&county.shape);
            let tooltip = Tooltip {
                title: slice.county_name(&county.id)
                    .or(county.name.as_deref())
                    .unwrap_or("Unknown county")
                    .to_string(),
                lines: vec![
                    format!("Race: {}", slice.category()),
                    format!("Avg (county): {}", format_value(value)),
                ],
            };

            let shape = Shape::region(county.id.clone(), &screen, scale.fill(value, &style.no_data_fill), &style.county_stroke)
                .with_tooltip(tooltip);
            (shape, screen)
        })
        .collect();

    let outline = match outline_rings(counties.iter().map(|county| &county.shape)) {
        Ok(rings) if !rings.is_empty() => {
            let rings: Vec<_> = rings.iter().map(|ring| projection.project_ring(ring)).collect();
            vec![(Shape::outline(&rings, &style.outline_stroke), geo::MultiPolygon(Vec::new()))]
        }
        Ok(_) => Vec::new(),
        Err(e) => {
            log::warn!("[render::drilldown] No outline for state {state}: {e:#}");
            Vec::new()
        }
    };

    log::debug!("[render::drilldown] state {state}: {} counties", counties.len());

    Scene::new(config.canvas, ViewState::StateDrilldown(state.clone()), slice.category(), vec![
        Layer::hidden(LayerKind::States),
        Layer::new(LayerKind::Counties, entries),
        Layer::new(LayerKind::Outline, outline),
    ])
}
