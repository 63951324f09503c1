//! Elbow Router - orthogonal arrow routing for diagram scenes
//!
//! Given two arrow endpoints, free or bound to shapes, the router produces
//! an axis-aligned polyline that avoids the endpoint shapes and turns as
//! few times as possible, then writes it back onto the arrow entity. The
//! renderer turns routed scenes into SVG for inspection.

pub mod binding;
pub mod elements;
pub mod error;
pub mod geometry;
pub mod renderer;
pub mod routing;
pub mod scene;
pub mod stylesheet;

pub use elements::{Binding, ElbowArrow, Element, ElementKind};
pub use error::SceneError;
pub use geometry::{Bounds, Point};
pub use renderer::{render_svg, render_svg_with_stylesheet, SvgConfig};
pub use routing::{
    plan_route, route, route_scene, BindingUpdates, ElbowRoute, Endpoint, Heading, RouteOptions,
};
pub use scene::{Scene, Snapshot};
pub use stylesheet::Stylesheet;
