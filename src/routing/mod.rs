//! The elbow-arrow routing pipeline
//!
//! [`route`] resolves the two arrow endpoints against the scene, plans an
//! orthogonal polyline between them, and applies the resulting update to
//! the arrow in one write. Planning composes the submodules in order:
//! headings, dynamic obstacle boxes, grid, A*, post-processing. A failed
//! search logs one diagnostic and leaves the arrow untouched.

pub mod astar;
pub mod endpoint;
pub mod grid;
pub mod heading;
pub mod heap;
pub mod obstacles;
pub mod post;

use std::collections::HashMap;

use log::{debug, error};

use crate::binding::{hovered_element_at, FIXED_BINDING_DISTANCE};
use crate::elements::{Binding, ElbowArrow, Element};
use crate::geometry::{Bounds, Point};
use crate::scene::{Scene, Snapshot};

pub use astar::{astar, estimated_bends};
pub use endpoint::resolve_endpoint;
pub use grid::{Grid, Node};
pub use heading::{bind_point_heading, heading_for_point_from_element, Heading, HEADINGS};
pub use heap::OpenSet;
pub use obstacles::{dongle_position, generate_dynamic_aabbs, offset_from_heading};
pub use post::{normalized_update, simplify, ElbowArrowUpdate};

/// Outward expansion of an endpoint shape's box in the heading direction
const HEAD_OFFSET: f64 = FIXED_BINDING_DISTANCE * 4.0;
/// Outward expansion on the remaining sides
const SIDE_OFFSET: f64 = FIXED_BINDING_DISTANCE / 2.0;

/// Options accepted by [`route`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteOptions<'a> {
    /// Overlay of elements stacked on top of the scene snapshot
    pub changed_elements: Option<&'a HashMap<String, Element>>,
    /// Re-evaluate bindings from the hovered element at each endpoint
    pub is_dragging: bool,
    /// Ignore shapes entirely and route between free points
    pub disable_binding: bool,
    /// Emit a mutation event for the applied update
    pub inform_mutation: bool,
}

/// Binding changes merged into the emitted update. The outer `Option`
/// distinguishes "leave unchanged" from "set (or clear)".
#[derive(Debug, Clone, Default)]
pub struct BindingUpdates {
    pub start_binding: Option<Option<Binding>>,
    pub end_binding: Option<Option<Binding>>,
}

/// A resolved arrow endpoint handed to the planner
#[derive(Debug, Clone, Copy)]
pub struct Endpoint<'a> {
    pub point: Point,
    pub heading: Heading,
    /// The shape this endpoint sits on, if any; used for obstacle shaping
    /// and for banning the search from entering the shape interior
    pub element: Option<&'a Element>,
}

/// A planned route in global coordinates, plus the obstacle boxes that
/// shaped it (exposed for debug drawing and tests)
#[derive(Debug, Clone)]
pub struct ElbowRoute {
    pub points: Vec<Point>,
    pub aabbs: [Bounds; 2],
}

fn endpoint_bounds(endpoint: &Endpoint) -> Bounds {
    match endpoint.element {
        Some(element) => crate::binding::aabb_for_element(
            element,
            offset_from_heading(endpoint.heading, HEAD_OFFSET, SIDE_OFFSET),
        ),
        None => Bounds::around(endpoint.point, FIXED_BINDING_DISTANCE),
    }
}

/// Plan an orthogonal polyline between two resolved endpoints.
///
/// Returns `None` when the search cannot reach the end, which the caller
/// reports; the scene and arrow are never touched here.
pub fn plan_route(start: Endpoint, end: Endpoint) -> Option<ElbowRoute> {
    let a = endpoint_bounds(&start);
    let b = endpoint_bounds(&end);
    let common = a.union(&b);

    let aabbs = generate_dynamic_aabbs(
        a,
        b,
        common,
        offset_from_heading(start.heading, HEAD_OFFSET, SIDE_OFFSET),
        offset_from_heading(end.heading, HEAD_OFFSET, SIDE_OFFSET),
    );

    let start_dongle = dongle_position(aabbs[0], start.heading, start.point);
    let end_dongle = dongle_position(aabbs[1], end.heading, end.point);

    let mut grid = Grid::calculate(
        &aabbs,
        start_dongle,
        start.heading,
        end_dongle,
        end.heading,
        common,
    );

    // Ban the true endpoint nodes so the search cannot traverse into the
    // endpoint shapes
    if end.element.is_some() {
        if let Some(node) = grid.node_at(end.point) {
            grid.data[node].closed = true;
        }
    }
    if start.element.is_some() {
        if let Some(node) = grid.node_at(start.point) {
            grid.data[node].closed = true;
        }
    }

    let start_node = grid.node_at(start_dongle).or_else(|| grid.node_at(start.point))?;
    let end_node = grid.node_at(end_dongle).or_else(|| grid.node_at(end.point))?;

    // When a dongle lands inside the opposite box the corridor between the
    // boxes is gone; route unobstructed rather than fail
    let dongle_overlap = aabbs[1].contains_point_strict(start_dongle)
        || aabbs[0].contains_point_strict(end_dongle);
    let obstacles: &[Bounds] = if dongle_overlap { &[] } else { &aabbs };

    let path = astar(
        &mut grid,
        start_node,
        end_node,
        start.heading,
        end.heading,
        obstacles,
    )?;

    let mut points: Vec<Point> = path.iter().map(|&i| grid.data[i].pos).collect();
    if grid.data[start_node].pos != start.point {
        points.insert(0, start.point);
    }
    if grid.data[end_node].pos != end.point {
        points.push(end.point);
    }

    Some(ElbowRoute {
        points: simplify(points),
        aabbs,
    })
}

/// Route an arrow and write the result back onto it.
///
/// `next_points` are proposed arrow-local points; only the first and last
/// are consulted. `offset` is an optional global translation applied
/// before routing. On failure the arrow keeps its previous state.
pub fn route(
    arrow: &mut ElbowArrow,
    scene: &Scene,
    next_points: &[Point],
    offset: Option<Point>,
    updates: &BindingUpdates,
    options: &RouteOptions,
) {
    let Some(route) = plan_arrow_route(arrow, scene, next_points, offset, options) else {
        error!("Elbow arrow cannot find a route");
        return;
    };
    let update = normalized_update(&route.points);
    apply_update(arrow, update, updates, options.inform_mutation);
}

/// Plan the route for an arrow without mutating it. This is the read-only
/// half of [`route`]; the renderer uses it for debug overlays.
pub fn plan_arrow_route(
    arrow: &ElbowArrow,
    scene: &Scene,
    next_points: &[Point],
    offset: Option<Point>,
    options: &RouteOptions,
) -> Option<ElbowRoute> {
    let snapshot = Snapshot::new(scene, options.changed_elements);
    let offset = offset.unwrap_or_default();

    let first = next_points.first().copied().unwrap_or_default();
    let last = next_points.last().copied().unwrap_or(first);
    let orig_start = Point::new(arrow.x + first.x + offset.x, arrow.y + first.y + offset.y);
    let orig_end = Point::new(arrow.x + last.x + offset.x, arrow.y + last.y + offset.y);

    let hovered_start = hovered_endpoint_element(
        orig_start,
        arrow.start_binding.as_ref(),
        &snapshot,
        options,
    );
    let hovered_end =
        hovered_endpoint_element(orig_end, arrow.end_binding.as_ref(), &snapshot, options);

    let start_point = resolve_endpoint(
        orig_start,
        arrow.start_binding.as_ref(),
        hovered_start,
        options.is_dragging,
        &snapshot,
    );
    let end_point = resolve_endpoint(
        orig_end,
        arrow.end_binding.as_ref(),
        hovered_end,
        options.is_dragging,
        &snapshot,
    );

    let start_heading = bind_point_heading(start_point, end_point, hovered_start);
    let end_heading = bind_point_heading(end_point, start_point, hovered_end);

    plan_route(
        Endpoint {
            point: start_point,
            heading: start_heading,
            element: hovered_start,
        },
        Endpoint {
            point: end_point,
            heading: end_heading,
            element: hovered_end,
        },
    )
}

fn hovered_endpoint_element<'a>(
    p: Point,
    binding: Option<&Binding>,
    snapshot: &Snapshot<'a>,
    options: &RouteOptions,
) -> Option<&'a Element> {
    if options.disable_binding {
        return None;
    }
    if options.is_dragging {
        hovered_element_at(p, snapshot, false)
    } else {
        binding.and_then(|b| snapshot.element(&b.element_id))
    }
}

/// Apply a routed update plus any binding changes to the arrow in a single
/// write
pub fn apply_update(
    arrow: &mut ElbowArrow,
    update: ElbowArrowUpdate,
    bindings: &BindingUpdates,
    inform_mutation: bool,
) {
    arrow.points = update.points;
    arrow.x = update.x;
    arrow.y = update.y;
    arrow.width = update.width;
    arrow.height = update.height;
    arrow.angle = update.angle;
    arrow.roundness = update.roundness;
    if let Some(start) = &bindings.start_binding {
        arrow.start_binding = start.clone();
    }
    if let Some(end) = &bindings.end_binding {
        arrow.end_binding = end.clone();
    }
    if inform_mutation {
        debug!(
            "elbow arrow {} rerouted with {} points",
            arrow.id,
            arrow.points.len()
        );
    }
}

/// Route every arrow in a scene in place. Returns the obstacle boxes of
/// each successful plan, for debug rendering.
pub fn route_scene(scene: &mut Scene, options: &RouteOptions) -> Vec<Bounds> {
    let mut arrows = std::mem::take(&mut scene.arrows);
    let mut debug_bounds = Vec::new();
    for arrow in &mut arrows {
        let next_points = arrow.points.clone();
        if let Some(plan) = plan_arrow_route(arrow, scene, &next_points, None, options) {
            debug_bounds.extend(plan.aabbs);
            let update = normalized_update(&plan.points);
            apply_update(arrow, update, &BindingUpdates::default(), options.inform_mutation);
        } else {
            error!("Elbow arrow cannot find a route");
        }
    }
    scene.arrows = arrows;
    debug_bounds
}
