use crate::{
    aggregate::AggregateSlice,
    config::{Canvas, MapConfig},
    loader::Atlas,
    geom::Projection,
    scale::ColorScale,
    view::ViewState,
};

use super::{format_value, Action, Layer, LayerKind, Scene, Shape, Tooltip};

/// Composite US projection fit to every state boundary. Depends only on the boundaries, so it is
/// computed once per session.
pub fn national_projection(atlas: &Atlas, canvas: &Canvas) -> Projection {
    Projection::national().fit_size(
        canvas.inner_width(),
        canvas.inner_height(),
        atlas.states().iter().map(|state| &state.shape),
    )
}

/// National view: every state filled by its mean balance, clickable to drill down.
pub fn render_national(atlas: &Atlas, slice: &AggregateSlice, projection: &Projection, config: &MapConfig) -> Scene {
    let style = &config.style;
    let scale = ColorScale::from_values(slice.state_means().values().copied());

    let entries = atlas.states().iter()
        .map(|state| {
            let mean = slice.state_mean(&state.id);
            let screen = projection.project_shape(&state.shape);
            let tooltip = Tooltip {
                title: atlas.state_display_name(&state.id),
                lines: vec![
                    format!("Race: {}", slice.category()),
                    format!("Avg (state): {}", format_value(mean)),
                    "Click for counties".to_string(),
                ],
            };

            let shape = Shape::region(state.id.clone(), &screen, scale.fill(mean, &style.no_data_fill), &style.state_stroke)
                .with_tooltip(tooltip)
                .with_action(Action::DrillDown(state.id.clone()));
            (shape, screen)
        })
        .collect();

    Scene::new(config.canvas, ViewState::National, slice.category(), vec![
        Layer::new(LayerKind::States, entries),
        Layer::new(LayerKind::Counties, Vec::new()),
        Layer::new(LayerKind::Outline, Vec::new()),
    ])
}
