//! Cardinal headings and the outward-heading classifier

use crate::elements::{Element, ElementKind};
use crate::geometry::{triangle_includes_point, Bounds, Point};

/// One of the four axis directions an arrow endpoint can face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Up,
    Right,
    Down,
    Left,
}

/// Neighbor iteration order used throughout the router
pub const HEADINGS: [Heading; 4] = [Heading::Up, Heading::Right, Heading::Down, Heading::Left];

impl Heading {
    /// The opposite heading
    pub fn reverse(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Right => Heading::Left,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
        }
    }

    /// Unit vector in screen coordinates (y grows downward)
    pub fn vector(self) -> Point {
        match self {
            Heading::Up => Point::new(0.0, -1.0),
            Heading::Right => Point::new(1.0, 0.0),
            Heading::Down => Point::new(0.0, 1.0),
            Heading::Left => Point::new(-1.0, 0.0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Heading::Left | Heading::Right)
    }

    /// Classify a vector into its dominant-axis heading. Ties between the
    /// axes resolve to the horizontal heading.
    pub fn from_vector(dx: f64, dy: f64) -> Heading {
        if dx.abs() >= dy.abs() {
            if dx > 0.0 {
                Heading::Right
            } else {
                Heading::Left
            }
        } else if dy > 0.0 {
            Heading::Down
        } else {
            Heading::Up
        }
    }

    /// Heading of the step from one point toward another
    pub fn from_points(from: Point, to: Point) -> Heading {
        Heading::from_vector(to.x - from.x, to.y - from.y)
    }
}

/// How far past the shape AABB the classification cone reaches
const SEARCH_CONE_MULTIPLIER: f64 = 2.0;

/// Map a diamond edge to the heading its bound points exit through. The
/// edge angle in degrees selects the quadrant: `[315, 45)` is up, `[45,
/// 135)` right, `[135, 225)` down, the rest left.
fn heading_for_diamond_edge(a: Point, b: Point) -> Heading {
    let angle = (b.y - a.y).atan2(b.x - a.x).to_degrees().rem_euclid(360.0);
    if !(45.0..315.0).contains(&angle) {
        Heading::Up
    } else if angle < 135.0 {
        Heading::Right
    } else if angle < 225.0 {
        Heading::Down
    } else {
        Heading::Left
    }
}

/// Outward heading from the element center through `p`.
///
/// Non-diamond shapes test the point against the four center-anchored
/// triangles of the cone-scaled AABB corners; boundary points resolve in
/// up, right, down, left order. Diamonds classify by the rotated edge the
/// point sits on.
pub fn heading_for_point_from_element(element: &Element, aabb: Bounds, p: Point) -> Heading {
    let mid = aabb.center();

    if element.kind == ElementKind::Diamond {
        // A point clear of the bounding box on exactly one side exits that way
        let outside = [
            p.y < element.y,
            p.x > element.x + element.width,
            p.y > element.y + element.height,
            p.x < element.x,
        ];
        if outside.iter().filter(|o| **o).count() == 1 {
            for (heading, hit) in HEADINGS.iter().zip(outside) {
                if hit {
                    return *heading;
                }
            }
        }

        let center = element.center();
        let half_w = element.width / 2.0;
        let half_h = element.height / 2.0;
        let tip = |dx: f64, dy: f64| {
            Point::new(center.x + dx * half_w, center.y + dy * half_h)
                .rotate_around(center, element.angle)
                .scale_from(mid, SEARCH_CONE_MULTIPLIER)
        };
        let top = tip(0.0, -1.0);
        let right = tip(1.0, 0.0);
        let bottom = tip(0.0, 1.0);
        let left = tip(-1.0, 0.0);

        return if triangle_includes_point(top, right, mid, p) {
            heading_for_diamond_edge(top, right)
        } else if triangle_includes_point(right, bottom, mid, p) {
            heading_for_diamond_edge(right, bottom)
        } else if triangle_includes_point(bottom, left, mid, p) {
            heading_for_diamond_edge(bottom, left)
        } else {
            heading_for_diamond_edge(left, top)
        };
    }

    let [top_left, top_right, bottom_right, bottom_left] =
        aabb.corners().map(|c| c.scale_from(mid, SEARCH_CONE_MULTIPLIER));

    if triangle_includes_point(top_left, top_right, mid, p) {
        Heading::Up
    } else if triangle_includes_point(top_right, bottom_right, mid, p) {
        Heading::Right
    } else if triangle_includes_point(bottom_right, bottom_left, mid, p) {
        Heading::Down
    } else {
        Heading::Left
    }
}

/// Outward heading for a resolved endpoint. Bound endpoints classify
/// against their shape; free endpoints face the opposite endpoint.
pub fn bind_point_heading(p: Point, other: Point, hovered: Option<&Element>) -> Heading {
    match hovered {
        Some(element) => {
            let distance = crate::binding::distance_to_element(element, p);
            let aabb = crate::binding::aabb_for_element(element, [distance; 4]);
            heading_for_point_from_element(element, aabb, p)
        }
        None => Heading::from_points(p, other),
    }
}
