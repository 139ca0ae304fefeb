use std::{io::Write, path::Path};

use anyhow::{Context, Result};
use geo::MultiPolygon;

use crate::{
    config::{Canvas, Stroke},
    geom::Geometries,
    io::svg::{
        escape_xml, multipolygon_to_path, rings_to_path,
        write_svg_footer, write_svg_header, write_svg_styles,
        SvgStringWriter, SvgWriter,
    },
    types::GeoId,
    view::ViewState,
};

/// The three stacked layers of the map, bottom to top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    States,
    Counties,
    Outline,
}

impl LayerKind {
    pub const ALL: [LayerKind; 3] = [LayerKind::States, LayerKind::Counties, LayerKind::Outline];

    #[inline]
    pub fn class(&self) -> &'static str {
        match self {
            LayerKind::States => "states-layer",
            LayerKind::Counties => "counties-layer",
            LayerKind::Outline => "outline-layer",
        }
    }
}

/// What happens when a shape is clicked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    DrillDown(GeoId),
}

/// Hover text: a bold title followed by detail lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tooltip {
    pub title: String,
    pub lines: Vec<String>,
}

impl Tooltip {
    /// Plain-text rendering, one line per entry.
    pub fn text(&self) -> String {
        std::iter::once(self.title.as_str())
            .chain(self.lines.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// HTML rendering with the title in bold.
    pub fn html(&self) -> String {
        std::iter::once(format!("<strong>{}</strong>", escape_xml(&self.title)))
            .chain(self.lines.iter().map(|line| escape_xml(line)))
            .collect::<Vec<_>>()
            .join("<br/>")
    }
}

/// One drawable path.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub id: Option<GeoId>,
    pub path: String,
    pub fill: Option<String>,
    pub stroke: Stroke,
    pub tooltip: Option<Tooltip>,
    pub action: Option<Action>,
}

impl Shape {
    /// Filled region from a MultiPolygon already in plot coordinates.
    pub fn region(id: GeoId, screen: &MultiPolygon<f64>, fill: String, stroke: &Stroke) -> Self {
        Self {
            id: Some(id),
            path: multipolygon_to_path(screen),
            fill: Some(fill),
            stroke: stroke.clone(),
            tooltip: None,
            action: None,
        }
    }

    /// Unfilled stroke along closed rings already in plot coordinates.
    pub fn outline(rings: &[geo::LineString<f64>], stroke: &Stroke) -> Self {
        Self {
            id: None,
            path: rings_to_path(rings),
            fill: None,
            stroke: stroke.clone(),
            tooltip: None,
            action: None,
        }
    }

    pub fn with_tooltip(mut self, tooltip: Tooltip) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    fn write_svg<W: Write>(&self, writer: &mut W) -> Result<()> {
        write!(writer, "<path")?;
        if let Some(id) = &self.id {
            write!(writer, r#" data-id="{id}""#)?;
        }
        write!(writer, r#" d="{}" fill="{}" stroke="{}" stroke-width="{}""#,
            self.path,
            escape_xml(self.fill.as_deref().unwrap_or("none")),
            escape_xml(&self.stroke.color),
            self.stroke.width,
        )?;
        match &self.tooltip {
            Some(tooltip) => writeln!(writer, "><title>{}</title></path>", escape_xml(&tooltip.text()))?,
            None => writeln!(writer, "/>")?,
        }
        Ok(())
    }
}

/// A group of shapes drawn together, with an index over their plot-space geometry for hit tests.
#[derive(Clone, Debug)]
pub struct Layer {
    kind: LayerKind,
    visible: bool,
    shapes: Vec<Shape>,
    hits: Geometries,
}

impl Layer {
    /// Visible layer. Each shape is paired with the plot-space geometry that receives the pointer;
    /// an empty geometry makes the shape inert.
    pub fn new(kind: LayerKind, entries: Vec<(Shape, MultiPolygon<f64>)>) -> Self {
        let (shapes, geometries): (Vec<_>, Vec<_>) = entries.into_iter().unzip();
        Self { kind, visible: true, shapes, hits: Geometries::new(geometries) }
    }

    /// Layer with nothing in it, not displayed.
    pub fn hidden(kind: LayerKind) -> Self {
        Self { kind, visible: false, shapes: Vec::new(), hits: Geometries::default() }
    }

    #[inline] pub fn kind(&self) -> LayerKind { self.kind }

    #[inline] pub fn visible(&self) -> bool { self.visible }

    #[inline] pub fn shapes(&self) -> &[Shape] { &self.shapes }

    #[inline] pub fn is_empty(&self) -> bool { self.shapes.is_empty() }

    /// Topmost shape under a plot-space point. Later shapes are drawn over earlier ones.
    fn pick(&self, x: f64, y: f64) -> Option<&Shape> {
        if !self.visible { return None }
        debug_assert_eq!(self.hits.len(), self.shapes.len());
        self.hits.locate(x, y).last().map(|&i| &self.shapes[i])
    }

    fn write_svg<W: Write>(&self, writer: &mut W) -> Result<()> {
        let display = if self.visible { "" } else { r#" display="none""# };
        writeln!(writer, r#"<g class="{}"{display}>"#, self.kind.class())?;
        for shape in &self.shapes {
            shape.write_svg(writer)?;
        }
        writeln!(writer, "</g>")?;
        Ok(())
    }
}

/// Everything on screen for one view of the map.
#[derive(Clone, Debug)]
pub struct Scene {
    canvas: Canvas,
    view: ViewState,
    category: String,
    layers: Vec<Layer>,
}

impl Scene {
    /// Layers missing from `layers` are added hidden, so every scene has all three in order.
    pub fn new(canvas: Canvas, view: ViewState, category: &str, mut layers: Vec<Layer>) -> Self {
        let layers = LayerKind::ALL.iter()
            .map(|&kind| match layers.iter().position(|layer| layer.kind == kind) {
                Some(i) => layers.swap_remove(i),
                None => Layer::hidden(kind),
            })
            .collect();

        Self { canvas, view, category: category.to_string(), layers }
    }

    #[inline] pub fn canvas(&self) -> &Canvas { &self.canvas }

    #[inline] pub fn view(&self) -> &ViewState { &self.view }

    #[inline] pub fn category(&self) -> &str { &self.category }

    #[inline] pub fn layers(&self) -> &[Layer] { &self.layers }

    /// The "Back to US" control is shown only in a drill-down.
    #[inline] pub fn back_visible(&self) -> bool { matches!(self.view, ViewState::StateDrilldown(_)) }

    pub fn layer(&self, kind: LayerKind) -> &Layer {
        // `new` always stores the layers in `LayerKind::ALL` order
        &self.layers[kind as usize]
    }

    /// Topmost interactive shape under a canvas point (margin included).
    pub fn pick(&self, x: f64, y: f64) -> Option<&Shape> {
        let (px, py) = (x - self.canvas.margin, y - self.canvas.margin);
        self.layers.iter().rev().find_map(|layer| layer.pick(px, py))
    }

    /// Write the scene as a standalone SVG document.
    pub fn write_svg<W: Write>(&self, writer: &mut W) -> Result<()> {
        let view = self.view.to_string();
        write_svg_header(writer, &self.canvas, &[("view", &view), ("category", &self.category)])?;
        write_svg_styles(writer)?;

        writeln!(writer, r#"<g transform="translate({m},{m})">"#, m = self.canvas.margin)?;
        for layer in &self.layers {
            layer.write_svg(writer)?;
        }
        writeln!(writer, "</g>")?;

        write_svg_footer(writer)
    }

    /// Save the scene to an SVG file.
    pub fn to_svg(&self, path: &Path) -> Result<()> {
        let mut writer = SvgWriter::new(path)?;
        self.write_svg(&mut writer)?;
        writer.flush().with_context(|| format!("[render::scene] Failed to write {}", path.display()))
    }

    /// Render the scene to an SVG string.
    pub fn to_svg_string(&self) -> Result<String> {
        let mut writer = SvgStringWriter::new();
        self.write_svg(&mut writer)?;
        writer.into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn square(x0: f64, y0: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: x0, y: y0), (x: x0 + 10.0, y: y0), (x: x0 + 10.0, y: y0 + 10.0), (x: x0, y: y0 + 10.0),
        ]])
    }

    fn stroke() -> Stroke {
        Stroke { color: "#fff".into(), width: 0.7 }
    }

    fn scene() -> Scene {
        let a = square(0.0, 0.0);
        let b = square(5.0, 0.0);
        let states = Layer::new(LayerKind::States, vec![
            (Shape::region(GeoId::state(1), &a, "#eee".into(), &stroke())
                .with_action(Action::DrillDown(GeoId::state(1))), a),
            (Shape::region(GeoId::state(2), &b, "rgb(1,2,3)".into(), &stroke())
                .with_tooltip(Tooltip { title: "B & Co".into(), lines: vec!["Race: Pooled".into()] }), b),
        ]);
        let canvas = Canvas { width: 100.0, height: 50.0, margin: 20.0 };
        Scene::new(canvas, ViewState::National, "Pooled", vec![states])
    }

    #[test]
    fn layers_are_always_in_draw_order() {
        let scene = scene();
        let kinds: Vec<_> = scene.layers().iter().map(Layer::kind).collect();
        assert_eq!(kinds, LayerKind::ALL);
        assert!(scene.layer(LayerKind::States).visible());
        assert!(!scene.layer(LayerKind::Counties).visible());
        assert!(!scene.back_visible());
    }

    #[test]
    fn pick_accounts_for_margin_and_draw_order() {
        let scene = scene();
        // overlap region: the later shape wins
        assert_eq!(scene.pick(27.0, 25.0).and_then(|s| s.id.clone()), Some(GeoId::state(2)));
        assert_eq!(scene.pick(22.0, 25.0).and_then(|s| s.id.clone()), Some(GeoId::state(1)));
        assert!(scene.pick(2.0, 5.0).is_none());
        assert!(scene.pick(90.0, 45.0).is_none());
    }

    #[test]
    fn svg_carries_view_layers_and_tooltips() {
        let svg = scene().to_svg_string().unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 100 50""#));
        assert!(svg.contains(r#"data-view="national""#));
        assert!(svg.contains(r#"data-category="Pooled""#));
        assert!(svg.contains(r#"<g class="states-layer">"#));
        assert!(svg.contains(r#"<g class="counties-layer" display="none">"#));
        assert!(svg.contains(r#"data-id="02""#));
        assert!(svg.contains("<title>B &amp; Co\nRace: Pooled</title>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn svg_file_matches_string() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.svg");
        let scene = scene();
        scene.to_svg(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), scene.to_svg_string().unwrap());
    }

    #[test]
    fn tooltip_renderings() {
        let tooltip = Tooltip { title: "Doña Ana".into(), lines: vec!["Avg (county): N/A".into()] };
        assert_eq!(tooltip.text(), "Doña Ana\nAvg (county): N/A");
        assert_eq!(tooltip.html(), "<strong>Doña Ana</strong><br/>Avg (county): N/A");
    }
}
