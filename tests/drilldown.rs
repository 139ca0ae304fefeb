//! End-to-end: load synthetic sources from disk, render both views, and drive the controller.

use std::{fs, path::Path};

use geo::Coord;
use loanmap::{
    load, national_projection, state_projection, Event, GeoId, LayerKind, MapConfig, Projection,
    Source, ViewController, ViewState,
};

const CSV: &str = "\
par_state,par_county,kid_race,par_pctile,county_name,shrunk_xkid_stubalance2020
48,1,Pooled,-9,Anderson County,10000
48,3,Pooled,-9,Andrews County,20000
6,1,Pooled,-9,Alameda County,30000
48,1,Hispanic,-9,Anderson County,12000
48,3,Hispanic,-9,Andrews County,NA
48,1,Pooled,50,Anderson County,99999
x,1,Pooled,-9,Broken,1
";

// Quantized in whole degrees from (-100, 30).
const STATES: &str = r#"{
  "type": "Topology",
  "transform": { "scale": [1, 1], "translate": [-100, 30] },
  "objects": { "states": { "type": "GeometryCollection", "geometries": [
    { "type": "Polygon", "id": 48, "arcs": [[0]] },
    { "type": "Polygon", "id": "06", "arcs": [[1]], "properties": { "name": "California" } }
  ] } },
  "arcs": [
    [[0, 0], [2, 0], [0, 2], [-2, 0], [0, -2]],
    [[4, 0], [1, 0], [0, 1], [-1, 0], [0, -1]]
  ]
}"#;

const COUNTIES: &str = r#"{
  "type": "Topology",
  "transform": { "scale": [1, 1], "translate": [-100, 30] },
  "objects": { "counties": { "type": "GeometryCollection", "geometries": [
    { "type": "Polygon", "id": 48001, "arcs": [[0, 1]] },
    { "type": "Polygon", "id": 48003, "arcs": [[2, -1]] },
    { "type": "Polygon", "id": 6001, "arcs": [[3]] }
  ] } },
  "arcs": [
    [[1, 0], [0, 2]],
    [[1, 2], [-1, 0], [0, -2], [1, 0]],
    [[1, 0], [1, 0], [0, 2], [-1, 0]],
    [[4, 0], [1, 0], [0, 1], [-1, 0], [0, -1]]
  ]
}"#;

fn write_config(dir: &Path) -> MapConfig {
    fs::write(dir.join("balances.csv"), CSV).unwrap();
    fs::write(dir.join("states.json"), STATES).unwrap();
    fs::write(dir.join("counties.json"), COUNTIES).unwrap();

    let mut config = MapConfig::default();
    config.sources.dataset = Source::Path(dir.join("balances.csv"));
    config.sources.states = Source::Path(dir.join("states.json"));
    config.sources.counties = Source::Path(dir.join("counties.json"));
    config
}

fn controller() -> ViewController {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let atlas = load(&config).unwrap();
    ViewController::new(atlas, config)
}

fn canvas_point(projection: &Projection, margin: f64, lon: f64, lat: f64) -> (f64, f64) {
    let (x, y) = projection.project(&Coord { x: lon, y: lat }).unwrap();
    (x + margin, y + margin)
}

#[test]
fn national_view_colors_states_by_mean() {
    let controller = controller();
    assert_eq!(controller.categories(), ["Pooled", "Hispanic"]);
    assert_eq!(controller.atlas().dataset().len(), 6);

    let svg = controller.scene().to_svg_string().unwrap();
    assert!(svg.contains(r#"data-view="national""#));
    // Texas is the low end of the domain, California the high end
    assert!(svg.contains(r#"data-id="48" d="#));
    assert!(svg.contains(r#"fill="rgb(255,245,240)""#));
    assert!(svg.contains(r#"fill="rgb(103,0,13)""#));
    assert!(svg.contains("<title>California\nRace: Pooled\nAvg (state): 30,000\nClick for counties</title>"));

    let config = MapConfig::default();
    let projection = national_projection(controller.atlas(), &config.canvas);
    let (x, y) = canvas_point(&projection, config.canvas.margin, -99.0, 31.0);
    let tooltip = controller.hover(x, y).unwrap();
    assert_eq!(tooltip.title, "Texas");
    assert_eq!(tooltip.lines[1], "Avg (state): 15,000");
}

#[test]
fn click_drill_down_and_back() {
    let mut controller = controller();
    let national = controller.scene().to_svg_string().unwrap();

    let config = MapConfig::default();
    let projection = national_projection(controller.atlas(), &config.canvas);
    let (x, y) = canvas_point(&projection, config.canvas.margin, -99.0, 31.0);
    assert!(controller.click(x, y).unwrap());
    assert_eq!(controller.view(), &ViewState::StateDrilldown(GeoId::state(48)));

    let scene = controller.scene();
    assert!(scene.back_visible());
    let ids: Vec<_> = scene.layer(LayerKind::Counties).shapes().iter()
        .filter_map(|shape| shape.id.as_ref().map(|id| id.id().to_string()))
        .collect();
    assert_eq!(ids, ["48001", "48003"]);

    // the shared county border cancels: one outline ring around the state
    let outline = scene.layer(LayerKind::Outline).shapes();
    assert_eq!(outline.len(), 1);
    assert_eq!(outline[0].path.matches('M').count(), 1);
    assert_eq!(outline[0].fill, None);

    let svg = scene.to_svg_string().unwrap();
    assert!(svg.contains(r#"data-view="state:48""#));
    assert!(svg.contains(r#"<g class="states-layer" display="none">"#));
    assert!(svg.contains("<title>Andrews County\nRace: Pooled\nAvg (county): 20,000</title>"));

    assert!(controller.back().unwrap());
    assert_eq!(controller.scene().to_svg_string().unwrap(), national);
}

#[test]
fn category_change_inside_a_state() {
    let mut controller = controller();
    controller.handle(Event::ClickState(GeoId::state(48))).unwrap();
    controller.set_category("Hispanic").unwrap();
    assert_eq!(controller.view(), &ViewState::StateDrilldown(GeoId::state(48)));

    let config = MapConfig::default();
    let projection = state_projection(controller.atlas(), &GeoId::state(48), &config.canvas);
    assert_eq!(controller.projection(), &projection);

    let (x, y) = canvas_point(&projection, config.canvas.margin, -98.5, 31.0);
    let tooltip = controller.hover(x, y).unwrap();
    assert_eq!(tooltip.title, "Andrews County");
    assert_eq!(tooltip.lines, ["Race: Hispanic", "Avg (county): N/A"]);

    let svg = controller.scene().to_svg_string().unwrap();
    assert!(svg.contains(r#"data-category="Hispanic""#));
    assert!(svg.contains(r##"fill="#eee""##));
}

#[test]
fn render_to_file() {
    let mut controller = controller();
    controller.handle(Event::ClickState(GeoId::state(6))).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ca.svg");
    controller.scene().to_svg(&path).unwrap();

    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains(r#"data-id="06001""#));
    assert!(svg.contains("Alameda County"));
}

#[test]
fn drill_down_colors_use_the_state_domain() {
    let mut controller = controller();
    controller.handle(Event::ClickState(GeoId::state(48))).unwrap();

    // California's 30,000 is outside Texas's 10,000..20,000 and must not stretch the scale
    let fills: Vec<_> = controller.scene().layer(LayerKind::Counties).shapes().iter()
        .map(|shape| (shape.id.as_ref().unwrap().id().to_string(), shape.fill.clone().unwrap()))
        .collect();
    assert_eq!(fills, [
        ("48001".to_string(), "rgb(255,245,240)".to_string()),
        ("48003".to_string(), "rgb(103,0,13)".to_string()),
    ]);
}
