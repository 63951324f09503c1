//! Scene file to SVG pipeline tests

use elbow_router::routing::RouteOptions;
use elbow_router::{
    render_svg, render_svg_with_stylesheet, route_scene, Point, Scene, Stylesheet, SvgConfig,
};

const SCENE_JSON: &str = r#"{
    "elements": [
        {"id": "client", "type": "rectangle", "x": 0, "y": 0, "width": 120, "height": 60},
        {"id": "server", "type": "rectangle", "x": 320, "y": 200, "width": 120, "height": 60},
        {"id": "cache", "type": "ellipse", "x": 320, "y": 0, "width": 100, "height": 60, "is_deleted": true}
    ],
    "arrows": [
        {
            "id": "request",
            "x": 120, "y": 30,
            "points": [{"x": 0, "y": 0}, {"x": 200, "y": 200}],
            "start_binding": {"element_id": "client", "fixed_point": {"x": 1, "y": 0.5}},
            "end_binding": {"element_id": "server", "fixed_point": {"x": 0, "y": 0.5}}
        }
    ]
}"#;

#[test]
fn scene_parses_and_routes() {
    let mut scene = Scene::from_json(SCENE_JSON).expect("scene should parse");
    assert_eq!(scene.elements.len(), 3);
    assert_eq!(scene.arrows.len(), 1);

    route_scene(&mut scene, &RouteOptions::default());

    let arrow = &scene.arrows[0];
    assert_eq!(arrow.points[0], Point::new(0.0, 0.0));
    assert!(arrow.points.len() >= 3);
    // Every segment of the routed arrow is axis-aligned
    for w in arrow.points.windows(2) {
        assert!(w[0].x == w[1].x || w[0].y == w[1].y);
    }
}

#[test]
fn routed_scene_renders_to_svg() {
    let mut scene = Scene::from_json(SCENE_JSON).expect("scene should parse");
    route_scene(&mut scene, &RouteOptions::default());

    let svg = render_svg(&scene, &SvgConfig::default());
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains(r#"id="client""#));
    assert!(svg.contains(r#"id="server""#));
    assert!(svg.contains(r#"id="request""#));
    // Deleted elements never render
    assert!(!svg.contains(r#"id="cache""#));
    assert!(svg.ends_with("</svg>\n"));
}

#[test]
fn custom_stylesheet_reaches_the_output() {
    let mut scene = Scene::from_json(SCENE_JSON).expect("scene should parse");
    let debug_bounds = route_scene(&mut scene, &RouteOptions::default());

    let stylesheet = Stylesheet::from_toml(
        r##"
        [colors]
        arrow-stroke = "#ff0000"
        "##,
    )
    .expect("stylesheet should parse");

    let svg = render_svg_with_stylesheet(
        &scene,
        &SvgConfig::default(),
        &stylesheet,
        &debug_bounds,
    );
    assert!(svg.contains("--arrow-stroke: #ff0000;"));
    // Debug overlay boxes are drawn for the routed arrow
    assert!(svg.contains("stroke-dasharray"));
}

#[test]
fn malformed_scene_is_an_error() {
    assert!(Scene::from_json("{not json").is_err());
    assert!(Scene::from_json(r#"{"elements": [{"id": "x"}]}"#).is_err());
}
