//! Outline snapping and hit-testing utilities for arrow bindings
//!
//! All element-relative math happens in the element's local (unrotated)
//! frame: points are rotated back around the element center, resolved
//! against the axis-aligned outline, then rotated forward again.

use crate::elements::{Element, ElementKind};
use crate::geometry::{nearest_point_on_segment, Bounds, Point};
use crate::scene::Snapshot;

/// Gap kept between a bound arrow endpoint and the shape outline
pub const FIXED_BINDING_DISTANCE: f64 = 2.0;

/// Radius of the binding hit zone around a shape outline
pub const BINDING_GAP: f64 = FIXED_BINDING_DISTANCE * 4.0;

fn to_local(element: &Element, p: Point) -> Point {
    p.rotate_around(element.center(), -element.angle)
}

fn from_local(element: &Element, p: Point) -> Point {
    p.rotate_around(element.center(), element.angle)
}

/// Axis-aligned bounding box of the rotated element, grown by per-side
/// outward offsets in `[up, right, down, left]` order
pub fn aabb_for_element(element: &Element, offsets: [f64; 4]) -> Bounds {
    let center = element.center();
    let corners = element.bounds().corners();
    let mut bounds = Bounds::new(f64::MAX, f64::MAX, f64::MIN, f64::MIN);
    for corner in corners {
        let rotated = corner.rotate_around(center, element.angle);
        bounds = bounds.expand_to_include(rotated);
    }
    let [up, right, down, left] = offsets;
    Bounds::new(
        bounds.x_min - left,
        bounds.y_min - up,
        bounds.x_max + right,
        bounds.y_max + down,
    )
}

/// The four outline vertices of a diamond in local coordinates,
/// top / right / bottom / left order
fn diamond_vertices(element: &Element) -> [Point; 4] {
    let b = element.bounds();
    let c = element.center();
    [
        Point::new(c.x, b.y_min),
        Point::new(b.x_max, c.y),
        Point::new(c.x, b.y_max),
        Point::new(b.x_min, c.y),
    ]
}

fn nearest_on_rect_outline(b: &Bounds, p: Point) -> Point {
    if b.contains_point(p) {
        // Push to the nearest edge
        let d_left = p.x - b.x_min;
        let d_right = b.x_max - p.x;
        let d_top = p.y - b.y_min;
        let d_bottom = b.y_max - p.y;
        let min = d_left.min(d_right).min(d_top).min(d_bottom);
        if min == d_left {
            Point::new(b.x_min, p.y)
        } else if min == d_right {
            Point::new(b.x_max, p.y)
        } else if min == d_top {
            Point::new(p.x, b.y_min)
        } else {
            Point::new(p.x, b.y_max)
        }
    } else {
        Point::new(p.x.clamp(b.x_min, b.x_max), p.y.clamp(b.y_min, b.y_max))
    }
}

fn nearest_on_ellipse_outline(element: &Element, p: Point) -> Point {
    let c = element.center();
    let rx = element.width / 2.0;
    let ry = element.height / 2.0;
    let dx = p.x - c.x;
    let dy = p.y - c.y;
    if dx == 0.0 && dy == 0.0 {
        return Point::new(c.x + rx, c.y);
    }
    // Radial projection onto the ellipse, exact enough for binding
    let k = 1.0 / ((dx / rx).powi(2) + (dy / ry).powi(2)).sqrt();
    Point::new(c.x + dx * k, c.y + dy * k)
}

fn nearest_on_diamond_outline(element: &Element, p: Point) -> Point {
    let v = diamond_vertices(element);
    let mut best = v[0];
    let mut best_dist = f64::MAX;
    for i in 0..4 {
        let candidate = nearest_point_on_segment(p, v[i], v[(i + 1) % 4]);
        let dist = candidate.distance(p);
        if dist < best_dist {
            best_dist = dist;
            best = candidate;
        }
    }
    best
}

fn nearest_on_outline_local(element: &Element, p: Point) -> Point {
    match element.kind {
        ElementKind::Ellipse => nearest_on_ellipse_outline(element, p),
        ElementKind::Diamond => nearest_on_diamond_outline(element, p),
        _ => nearest_on_rect_outline(&element.bounds(), p),
    }
}

/// Snap a global point to the nearest point on the element outline
pub fn snap_to_outline(element: &Element, p: Point) -> Point {
    let local = to_local(element, p);
    from_local(element, nearest_on_outline_local(element, local))
}

/// Distance from a global point to the element outline
pub fn distance_to_element(element: &Element, p: Point) -> f64 {
    let local = to_local(element, p);
    nearest_on_outline_local(element, local).distance(local)
}

/// Whether a global point lies inside the element's occupiable area
pub fn element_contains(element: &Element, p: Point) -> bool {
    let local = to_local(element, p);
    let b = element.bounds();
    match element.kind {
        ElementKind::Ellipse => {
            let c = element.center();
            let rx = element.width / 2.0;
            let ry = element.height / 2.0;
            if rx == 0.0 || ry == 0.0 {
                return false;
            }
            ((local.x - c.x) / rx).powi(2) + ((local.y - c.y) / ry).powi(2) <= 1.0
        }
        ElementKind::Diamond => {
            let c = element.center();
            let rx = element.width / 2.0;
            let ry = element.height / 2.0;
            if rx == 0.0 || ry == 0.0 {
                return false;
            }
            ((local.x - c.x) / rx).abs() + ((local.y - c.y) / ry).abs() <= 1.0
        }
        _ => b.contains_point(local),
    }
}

/// Move a rectanguloid outline point out of the corner zones, so arrows
/// exit through an edge rather than a corner. Non-rectanguloid elements are
/// returned unchanged.
pub fn avoid_corner(element: &Element, p: Point) -> Point {
    if !element.is_rectanguloid() {
        return p;
    }
    let pad = BINDING_GAP;
    let b = element.bounds();
    let center = element.center();
    let mut local = to_local(element, p);
    for corner in b.corners() {
        if local.distance(corner) >= pad {
            continue;
        }
        if (local.x - corner.x).abs() <= (local.y - corner.y).abs() {
            // Point sits on a vertical edge, push along y toward the middle
            let dir = if corner.y < center.y { 1.0 } else { -1.0 };
            local = Point::new(corner.x, corner.y + dir * pad);
        } else {
            let dir = if corner.x < center.x { 1.0 } else { -1.0 };
            local = Point::new(corner.x + dir * pad, corner.y);
        }
        break;
    }
    from_local(element, local)
}

/// Fraction of the half-edge around each edge midpoint that snaps to it
const MID_SNAP_TOLERANCE: f64 = 0.27;

/// Snap an outline point to the nearest edge midpoint when it already sits
/// in the midpoint corridor of that edge
pub fn snap_to_mid(element: &Element, p: Point) -> Point {
    let b = element.bounds();
    let c = element.center();
    let local = to_local(element, p);
    let x_band = MID_SNAP_TOLERANCE * element.width / 2.0;
    let y_band = MID_SNAP_TOLERANCE * element.height / 2.0;
    let near = BINDING_GAP;

    let snapped = if (local.x - b.x_min).abs() < near && (local.y - c.y).abs() <= y_band {
        Point::new(b.x_min, c.y)
    } else if (local.x - b.x_max).abs() < near && (local.y - c.y).abs() <= y_band {
        Point::new(b.x_max, c.y)
    } else if (local.y - b.y_min).abs() < near && (local.x - c.x).abs() <= x_band {
        Point::new(c.x, b.y_min)
    } else if (local.y - b.y_max).abs() < near && (local.x - c.x).abs() <= x_band {
        Point::new(c.x, b.y_max)
    } else {
        local
    };
    from_local(element, snapped)
}

/// Topmost bindable element whose binding zone contains the point. With
/// `fully_inside` the point must lie inside the shape itself; otherwise the
/// zone extends [`binding_gap`] past the outline.
pub fn hovered_element_at<'a>(
    p: Point,
    snapshot: &Snapshot<'a>,
    fully_inside: bool,
) -> Option<&'a Element> {
    snapshot
        .non_deleted_elements()
        .into_iter()
        .rev()
        .find(|el| {
            el.is_bindable()
                && if fully_inside {
                    element_contains(el, p)
                } else {
                    element_contains(el, p) || distance_to_element(el, p) <= BINDING_GAP
                }
        })
}
