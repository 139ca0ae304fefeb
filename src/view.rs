//! Interactive state: which view is showing, for which category, and the scene it produced.

use std::{collections::BTreeMap, fmt};

use anyhow::{bail, ensure, Result};

use crate::{
    aggregate::AggregateSlice,
    config::MapConfig,
    geom::Projection,
    loader::Atlas,
    render::{national_projection, render_national, render_state, state_projection, Action, Scene, Tooltip},
    types::{GeoId, GeoType},
};

/// Which map is on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewState {
    National,
    StateDrilldown(GeoId),
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::National => write!(f, "national"),
            ViewState::StateDrilldown(state) => write!(f, "state:{state}"),
        }
    }
}

/// User input driving the view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    ClickState(GeoId),
    Back,
    ChangeCategory(String),
}

/// Owns the loaded data and the current view, and re-renders on every accepted event.
#[derive(Debug)]
pub struct ViewController {
    atlas: Atlas,
    config: MapConfig,
    categories: Vec<String>,
    category: String,
    slice: AggregateSlice,
    national: Projection,
    drill_projections: BTreeMap<GeoId, Projection>,
    view: ViewState,
    scene: Scene,
}

impl ViewController {
    /// Start in the national view with the default category.
    pub fn new(atlas: Atlas, config: MapConfig) -> Self {
        let categories = atlas.dataset().categories();
        let category = atlas.dataset().default_category(&config.default_category)
            .unwrap_or_else(|| config.default_category.clone());
        let slice = AggregateSlice::rebuild(atlas.dataset(), &category, config.percentile);
        let national = national_projection(&atlas, &config.canvas);
        let scene = render_national(&atlas, &slice, &national, &config);

        log::info!("[view] {} categories, starting with {category:?}", categories.len());

        Self {
            atlas,
            config,
            categories,
            category,
            slice,
            national,
            drill_projections: BTreeMap::new(),
            view: ViewState::National,
            scene,
        }
    }

    #[inline] pub fn atlas(&self) -> &Atlas { &self.atlas }

    /// Categories in selector order.
    #[inline] pub fn categories(&self) -> &[String] { &self.categories }

    #[inline] pub fn category(&self) -> &str { &self.category }

    #[inline] pub fn slice(&self) -> &AggregateSlice { &self.slice }

    #[inline] pub fn view(&self) -> &ViewState { &self.view }

    #[inline] pub fn scene(&self) -> &Scene { &self.scene }

    /// Projection of the current view.
    pub fn projection(&self) -> &Projection {
        match &self.view {
            ViewState::National => &self.national,
            ViewState::StateDrilldown(state) => self.drill_projections.get(state).unwrap_or(&self.national),
        }
    }

    /// Apply an event. Returns whether it was accepted; events that make no sense in the current
    /// view are ignored.
    pub fn handle(&mut self, event: Event) -> Result<bool> {
        match (&self.view, event) {
            (ViewState::National, Event::ClickState(state)) => {
                ensure!(state.ty == GeoType::State, "[view] {state} is not a state code");
                log::info!("[view] drilling down into {state}");
                self.view = ViewState::StateDrilldown(state);
            }
            (ViewState::StateDrilldown(_), Event::Back) => {
                log::info!("[view] back to national view");
                self.view = ViewState::National;
            }
            (_, Event::ChangeCategory(category)) => {
                if !self.atlas.dataset().has_category(&category) {
                    bail!("[view] Unknown category {category:?}");
                }
                log::info!("[view] category {category:?}");
                self.slice = AggregateSlice::rebuild(self.atlas.dataset(), &category, self.config.percentile);
                self.category = category;
            }
            (view, event) => {
                log::debug!("[view] ignoring {event:?} in {view}");
                return Ok(false);
            }
        }

        self.redraw();
        Ok(true)
    }

    /// Dispatch the action of the shape under a canvas point, if any.
    pub fn click(&mut self, x: f64, y: f64) -> Result<bool> {
        let action = self.scene.pick(x, y).and_then(|shape| shape.action.clone());
        match action {
            Some(Action::DrillDown(state)) => self.handle(Event::ClickState(state)),
            None => Ok(false),
        }
    }

    pub fn back(&mut self) -> Result<bool> {
        self.handle(Event::Back)
    }

    pub fn set_category(&mut self, category: &str) -> Result<bool> {
        self.handle(Event::ChangeCategory(category.to_string()))
    }

    /// Tooltip of the shape under a canvas point.
    pub fn hover(&self, x: f64, y: f64) -> Option<&Tooltip> {
        self.scene.pick(x, y).and_then(|shape| shape.tooltip.as_ref())
    }

    /// Full clear-and-redraw of the current view.
    fn redraw(&mut self) {
        self.scene = match &self.view {
            ViewState::National => render_national(&self.atlas, &self.slice, &self.national, &self.config),
            ViewState::StateDrilldown(state) => {
                let projection = self.drill_projections.entry(state.clone())
                    .or_insert_with(|| state_projection(&self.atlas, state, &self.config.canvas));
                render_state(&self.atlas, &self.slice, state, projection, &self.config)
            }
        };
    }
}
