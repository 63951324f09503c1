//! Data model for diagram elements and elbow arrows

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point};

/// Shape kind of a diagram element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Rectangle,
    Ellipse,
    Diamond,
    Image,
    Frame,
}

/// A positioned diagram element. Rotation is about the geometric center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in radians
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub is_deleted: bool,
}

impl Element {
    /// Unrotated bounding box
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether arrows may bind to this element
    pub fn is_bindable(&self) -> bool {
        matches!(
            self.kind,
            ElementKind::Rectangle
                | ElementKind::Ellipse
                | ElementKind::Diamond
                | ElementKind::Image
        )
    }

    /// Whether the occupiable area is rectangular (as opposed to an ellipse
    /// or diamond outline)
    pub fn is_rectanguloid(&self) -> bool {
        matches!(
            self.kind,
            ElementKind::Rectangle | ElementKind::Image | ElementKind::Frame
        )
    }

    /// Resolve a fixed point (each coordinate in `[0, 1]`, parameterizing the
    /// local bounding box) to a global point, honoring rotation.
    pub fn point_at_fixed(&self, fixed: Point) -> Point {
        let local = Point::new(self.x + fixed.x * self.width, self.y + fixed.y * self.height);
        local.rotate_around(self.center(), self.angle)
    }
}

/// Association of an arrow endpoint with an element and a parameterized
/// point on that element's local bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub element_id: String,
    pub fixed_point: Point,
}

/// An elbow arrow entity. `points` are arrow-local; by convention the first
/// point is `(0, 0)` and `(x, y)` is its global position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElbowArrow {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub angle: f64,
    pub points: Vec<Point>,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub roundness: Option<f64>,
    #[serde(default)]
    pub start_binding: Option<Binding>,
    #[serde(default)]
    pub end_binding: Option<Binding>,
}
