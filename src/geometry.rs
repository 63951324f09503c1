//! Geometric primitives shared by the routing pipeline

use serde::{Deserialize, Serialize};

/// A 2D point in global scene coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by a delta
    pub fn translate(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Midpoint between this point and another
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Rotate around a center by an angle in radians (clockwise positive in
    /// screen coordinates, where y grows downward)
    pub fn rotate_around(self, center: Point, angle: f64) -> Point {
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        let (sin, cos) = angle.sin_cos();
        Point::new(
            center.x + dx * cos - dy * sin,
            center.y + dx * sin + dy * cos,
        )
    }

    /// Scale away from (or toward) an origin point
    pub fn scale_from(self, origin: Point, factor: f64) -> Point {
        Point::new(
            origin.x + (self.x - origin.x) * factor,
            origin.y + (self.y - origin.y) * factor,
        )
    }

    /// Manhattan distance to another point
    pub fn manhattan(self, other: Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An axis-aligned bounding box with `x_min <= x_max` and `y_min <= y_max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// A square of the given half-extent centered on a point
    pub fn around(p: Point, half: f64) -> Self {
        Self::new(p.x - half, p.y - half, p.x + half, p.y + half)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Whether the point lies strictly inside (boundary excluded)
    pub fn contains_point_strict(&self, p: Point) -> bool {
        p.x > self.x_min && p.x < self.x_max && p.y > self.y_min && p.y < self.y_max
    }

    /// Whether the point lies inside or on the boundary
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }

    /// The smallest bounds enclosing both boxes
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.x_min.min(other.x_min),
            self.y_min.min(other.y_min),
            self.x_max.max(other.x_max),
            self.y_max.max(other.y_max),
        )
    }

    /// Grow the bounds to include a point
    pub fn expand_to_include(&self, p: Point) -> Bounds {
        Bounds::new(
            self.x_min.min(p.x),
            self.y_min.min(p.y),
            self.x_max.max(p.x),
            self.y_max.max(p.y),
        )
    }

    /// The four corners in top-left, top-right, bottom-right, bottom-left order
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x_min, self.y_min),
            Point::new(self.x_max, self.y_min),
            Point::new(self.x_max, self.y_max),
            Point::new(self.x_min, self.y_max),
        ]
    }
}

/// Whether two boxes overlap, tested as any corner of one lying strictly
/// inside the other. Touching edges do not count as overlap.
pub fn bounds_overlap(a: &Bounds, b: &Bounds) -> bool {
    a.corners().iter().any(|c| b.contains_point_strict(*c))
        || b.corners().iter().any(|c| a.contains_point_strict(*c))
}

fn triangle_sign(p: Point, a: Point, b: Point) -> f64 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}

/// Whether `p` lies inside the triangle `(a, b, c)`, boundary included
pub fn triangle_includes_point(a: Point, b: Point, c: Point, p: Point) -> bool {
    let d1 = triangle_sign(p, a, b);
    let d2 = triangle_sign(p, b, c);
    let d3 = triangle_sign(p, c, a);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Nearest point to `p` on the segment from `a` to `b`
pub fn nearest_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return a;
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    Point::new(a.x + t * dx, a.y + t * dy)
}

/// Intersection point of two segments, if any.
///
/// Solves `p + t*r = q + u*s` where `r` runs along the first segment and `s`
/// along the second; an intersection exists when both parameters land in
/// `[0, 1]`. Collinear overlapping segments report no single intersection.
pub fn segments_intersect_at(first: (Point, Point), second: (Point, Point)) -> Option<Point> {
    let (p, p2) = first;
    let (q, q2) = second;
    let r = Point::new(p2.x - p.x, p2.y - p.y);
    let s = Point::new(q2.x - q.x, q2.y - q.y);
    let denom = r.x * s.y - r.y * s.x;
    if denom == 0.0 {
        return None;
    }
    let qp = Point::new(q.x - p.x, q.y - p.y);
    let t = (qp.x * s.y - qp.y * s.x) / denom;
    let u = (qp.x * r.y - qp.y * r.x) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Point::new(p.x + t * r.x, p.y + t * r.y))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_midpoint() {
        let m = Point::new(0.0, 0.0).midpoint(Point::new(10.0, 4.0));
        assert_eq!(m, Point::new(5.0, 2.0));
    }

    #[test]
    fn test_point_manhattan() {
        assert_eq!(Point::new(1.0, 2.0).manhattan(Point::new(4.0, -2.0)), 7.0);
    }

    #[test]
    fn test_point_rotate_quarter_turn() {
        let p = Point::new(10.0, 0.0).rotate_around(Point::new(0.0, 0.0), std::f64::consts::FRAC_PI_2);
        assert!((p.x - 0.0).abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_scale_from_origin() {
        let p = Point::new(3.0, 4.0).scale_from(Point::new(1.0, 2.0), 2.0);
        assert_eq!(p, Point::new(5.0, 6.0));
    }

    #[test]
    fn test_bounds_center_and_extent() {
        let b = Bounds::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(b.width(), 100.0);
        assert_eq!(b.height(), 50.0);
        assert_eq!(b.center(), Point::new(50.0, 25.0));
    }

    #[test]
    fn test_bounds_strict_containment_excludes_boundary() {
        let b = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(b.contains_point_strict(Point::new(5.0, 5.0)));
        assert!(!b.contains_point_strict(Point::new(0.0, 5.0)));
        assert!(!b.contains_point_strict(Point::new(5.0, 10.0)));
        assert!(b.contains_point(Point::new(0.0, 5.0)));
    }

    #[test]
    fn test_bounds_union() {
        let a = Bounds::new(0.0, 0.0, 50.0, 50.0);
        let b = Bounds::new(100.0, 20.0, 150.0, 70.0);
        assert_eq!(a.union(&b), Bounds::new(0.0, 0.0, 150.0, 70.0));
    }

    #[test]
    fn test_bounds_overlap() {
        let a = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let b = Bounds::new(50.0, 50.0, 150.0, 150.0);
        let c = Bounds::new(200.0, 200.0, 250.0, 250.0);
        assert!(bounds_overlap(&a, &b));
        assert!(!bounds_overlap(&a, &c));
    }

    #[test]
    fn test_bounds_touching_edges_do_not_overlap() {
        let a = Bounds::new(0.0, 0.0, 50.0, 50.0);
        let b = Bounds::new(50.0, 0.0, 100.0, 50.0);
        assert!(!bounds_overlap(&a, &b));
    }

    #[test]
    fn test_triangle_includes_point() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let c = Point::new(5.0, 10.0);
        assert!(triangle_includes_point(a, b, c, Point::new(5.0, 3.0)));
        assert!(triangle_includes_point(a, b, c, Point::new(5.0, 0.0)));
        assert!(!triangle_includes_point(a, b, c, Point::new(-1.0, 1.0)));
    }

    #[test]
    fn test_nearest_point_on_segment_clamps_to_ends() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(nearest_point_on_segment(Point::new(-5.0, 3.0), a, b), a);
        assert_eq!(nearest_point_on_segment(Point::new(15.0, 3.0), a, b), b);
        assert_eq!(
            nearest_point_on_segment(Point::new(4.0, 3.0), a, b),
            Point::new(4.0, 0.0)
        );
    }

    #[test]
    fn test_segments_intersect_at_crossing() {
        let hit = segments_intersect_at(
            (Point::new(0.0, 0.0), Point::new(10.0, 10.0)),
            (Point::new(0.0, 10.0), Point::new(10.0, 0.0)),
        );
        assert_eq!(hit, Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_segments_intersect_at_disjoint() {
        let hit = segments_intersect_at(
            (Point::new(0.0, 0.0), Point::new(1.0, 1.0)),
            (Point::new(5.0, 0.0), Point::new(6.0, 1.0)),
        );
        assert_eq!(hit, None);
    }
}
