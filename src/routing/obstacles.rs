//! Dynamic obstacle boxes around the two arrow endpoints
//!
//! The router never avoids arbitrary scene elements; it carves the plane
//! into two disjoint rectangles shaped by the endpoint headings and the
//! separation between the endpoints. A* then hugs those rectangles, which
//! is what makes the resulting elbows look intentional.

use crate::geometry::{bounds_overlap, Bounds, Point};

use super::heading::Heading;

/// Extra slack pushed onto the outer sides when the two endpoint boxes
/// already overlap
const OVERLAP_PADDING: f64 = 40.0;

/// Per-side offsets `[up, right, down, left]` with `head` in the heading
/// direction and `side` on the remaining three sides
pub fn offset_from_heading(heading: Heading, head: f64, side: f64) -> [f64; 4] {
    match heading {
        Heading::Up => [head, side, side, side],
        Heading::Right => [side, head, side, side],
        Heading::Down => [side, side, head, side],
        Heading::Left => [side, side, side, head],
    }
}

/// Project an endpoint onto the outer edge of its dynamic box along its
/// heading; the result is the A* source or target for that endpoint
pub fn dongle_position(bounds: Bounds, heading: Heading, p: Point) -> Point {
    match heading {
        Heading::Up => Point::new(p.x, bounds.y_min),
        Heading::Right => Point::new(bounds.x_max, p.y),
        Heading::Down => Point::new(p.x, bounds.y_max),
        Heading::Left => Point::new(bounds.x_min, p.y),
    }
}

fn cross(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    x1 * y2 - y1 * x2
}

/// Build the two disjoint obstacle boxes for the endpoint boxes `a` and
/// `b` with common bounds `common`.
///
/// Overlapping endpoint boxes are pushed outward by [`OVERLAP_PADDING`] on
/// the sides that coincide with the common bounds. Separated boxes meet at
/// the midpoint of their gap, clamped so each still reaches its heading
/// offset past the endpoint. A corner-touching result is split along the
/// common center so the returned boxes never overlap.
pub fn generate_dynamic_aabbs(
    a: Bounds,
    b: Bounds,
    common: Bounds,
    start_offsets: [f64; 4],
    end_offsets: [f64; 4],
) -> [Bounds; 2] {
    if bounds_overlap(&a, &b) {
        let grow = |bounds: Bounds| {
            Bounds::new(
                if bounds.x_min == common.x_min {
                    bounds.x_min - OVERLAP_PADDING
                } else {
                    bounds.x_min
                },
                if bounds.y_min == common.y_min {
                    bounds.y_min - OVERLAP_PADDING
                } else {
                    bounds.y_min
                },
                if bounds.x_max == common.x_max {
                    bounds.x_max + OVERLAP_PADDING
                } else {
                    bounds.x_max
                },
                if bounds.y_max == common.y_max {
                    bounds.y_max + OVERLAP_PADDING
                } else {
                    bounds.y_max
                },
            )
        };
        return [grow(a), grow(b)];
    }

    let first = candidate(a, b, common, start_offsets);
    let second = candidate(b, a, common, end_offsets);

    // Corner-touching candidates still overlap on both axes; split them
    // along the common center so the corridor stays two disjoint rectangles
    let c = first.union(&second);
    let epsilon = 1e-11;
    if first.width() + second.width() > c.width() + epsilon
        && first.height() + second.height() > c.height() + epsilon
    {
        let end_center = second.center();
        let anti = cross(
            a.x_max - end_center.x,
            a.y_min - end_center.y,
            a.x_min - end_center.x,
            a.y_max - end_center.y,
        );
        let main = cross(
            a.x_min - end_center.x,
            a.y_min - end_center.y,
            a.x_max - end_center.x,
            a.y_max - end_center.y,
        );

        if b.x_min > a.x_max && a.y_min > b.y_max {
            // End box above and to the right of the start box
            let c_x = first.x_max + (second.x_min - first.x_max) / 2.0;
            let c_y = second.y_max + (first.y_min - second.y_max) / 2.0;
            if anti > 0.0 {
                return [
                    Bounds::new(first.x_min, first.y_min, c_x, first.y_max),
                    Bounds::new(c_x, second.y_min, second.x_max, second.y_max),
                ];
            }
            return [
                Bounds::new(first.x_min, c_y, first.x_max, first.y_max),
                Bounds::new(second.x_min, second.y_min, second.x_max, c_y),
            ];
        } else if a.x_max < b.x_min && a.y_max < b.y_min {
            // End box below and to the right
            let c_x = first.x_max + (second.x_min - first.x_max) / 2.0;
            let c_y = first.y_max + (second.y_min - first.y_max) / 2.0;
            if main > 0.0 {
                return [
                    Bounds::new(first.x_min, first.y_min, first.x_max, c_y),
                    Bounds::new(second.x_min, c_y, second.x_max, second.y_max),
                ];
            }
            return [
                Bounds::new(first.x_min, first.y_min, c_x, first.y_max),
                Bounds::new(c_x, second.y_min, second.x_max, second.y_max),
            ];
        } else if a.x_min > b.x_max && a.y_max < b.y_min {
            // End box below and to the left
            let c_x = second.x_max + (first.x_min - second.x_max) / 2.0;
            let c_y = first.y_max + (second.y_min - first.y_max) / 2.0;
            if anti > 0.0 {
                return [
                    Bounds::new(c_x, first.y_min, first.x_max, first.y_max),
                    Bounds::new(second.x_min, second.y_min, c_x, second.y_max),
                ];
            }
            return [
                Bounds::new(first.x_min, first.y_min, first.x_max, c_y),
                Bounds::new(second.x_min, c_y, second.x_max, second.y_max),
            ];
        } else if a.x_min > b.x_max && a.y_min > b.y_max {
            // End box above and to the left
            let c_x = second.x_max + (first.x_min - second.x_max) / 2.0;
            let c_y = second.y_max + (first.y_min - second.y_max) / 2.0;
            if main > 0.0 {
                return [
                    Bounds::new(c_x, first.y_min, first.x_max, first.y_max),
                    Bounds::new(second.x_min, second.y_min, c_x, second.y_max),
                ];
            }
            return [
                Bounds::new(first.x_min, c_y, first.x_max, first.y_max),
                Bounds::new(second.x_min, second.y_min, second.x_max, c_y),
            ];
        }
    }

    [first, second]
}

/// One candidate box, per coordinate: midpoint of the gap when the boxes
/// are separated on that axis (clamped by the heading offset when they are
/// also separated on the other axis), otherwise the box's own edge or the
/// common edge pushed out by the offset.
fn candidate(a: Bounds, b: Bounds, common: Bounds, offsets: [f64; 4]) -> Bounds {
    let [up, right, down, left] = offsets;
    let separated_vertically = a.y_min > b.y_max || a.y_max < b.y_min;
    let separated_horizontally = a.x_min > b.x_max || a.x_max < b.x_min;

    Bounds::new(
        if a.x_min > b.x_max {
            if separated_vertically {
                ((a.x_min + b.x_max) / 2.0).min(a.x_min - left)
            } else {
                (a.x_min + b.x_max) / 2.0
            }
        } else if a.x_min > b.x_min {
            a.x_min - left
        } else {
            common.x_min - left
        },
        if a.y_min > b.y_max {
            if separated_horizontally {
                ((a.y_min + b.y_max) / 2.0).min(a.y_min - up)
            } else {
                (a.y_min + b.y_max) / 2.0
            }
        } else if a.y_min > b.y_min {
            a.y_min - up
        } else {
            common.y_min - up
        },
        if a.x_max < b.x_min {
            if separated_vertically {
                ((a.x_max + b.x_min) / 2.0).max(a.x_max + right)
            } else {
                (a.x_max + b.x_min) / 2.0
            }
        } else if a.x_max < b.x_max {
            a.x_max + right
        } else {
            common.x_max + right
        },
        if a.y_max < b.y_min {
            if separated_horizontally {
                ((a.y_max + b.y_min) / 2.0).max(a.y_max + down)
            } else {
                (a.y_max + b.y_min) / 2.0
            }
        } else if a.y_max < b.y_max {
            a.y_max + down
        } else {
            common.y_max + down
        },
    )
}
