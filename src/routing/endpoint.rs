//! Resolving raw arrow endpoints to global outline points

use crate::binding::{avoid_corner, snap_to_mid, snap_to_outline};
use crate::elements::{Binding, Element};
use crate::geometry::Point;
use crate::scene::Snapshot;

/// Resolve one raw endpoint to its global point.
///
/// While dragging, the point snaps to the hovered shape's outline, and for
/// rectanguloids further away from corners and into the edge-midpoint
/// corridor. A bound endpoint resolves its fixed point against the bound
/// shape outline. Free endpoints pass through unchanged.
pub fn resolve_endpoint(
    raw: Point,
    binding: Option<&Binding>,
    hovered: Option<&Element>,
    is_dragging: bool,
    snapshot: &Snapshot,
) -> Point {
    if is_dragging {
        return match hovered {
            Some(element) => {
                let snapped = snap_to_outline(element, raw);
                if element.is_rectanguloid() {
                    snap_to_mid(element, avoid_corner(element, snapped))
                } else {
                    snapped
                }
            }
            None => raw,
        };
    }
    if let Some(binding) = binding {
        if let Some(element) = snapshot.element(&binding.element_id) {
            let fixed = element.point_at_fixed(binding.fixed_point);
            let snapped = snap_to_outline(element, fixed);
            return if element.is_rectanguloid() {
                avoid_corner(element, snapped)
            } else {
                snapped
            };
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::ElementKind;
    use crate::scene::Scene;

    fn scene_with_rect() -> Scene {
        let mut scene = Scene::new();
        scene.elements.push(Element {
            id: "rect".to_string(),
            kind: ElementKind::Rectangle,
            x: 0.0,
            y: 0.0,
            width: 50.0,
            height: 50.0,
            angle: 0.0,
            is_deleted: false,
        });
        scene
    }

    #[test]
    fn test_free_endpoint_passes_through() {
        let scene = Scene::new();
        let snapshot = Snapshot::new(&scene, None);
        let raw = Point::new(12.0, 34.0);
        assert_eq!(resolve_endpoint(raw, None, None, false, &snapshot), raw);
    }

    #[test]
    fn test_bound_endpoint_resolves_fixed_point() {
        let scene = scene_with_rect();
        let snapshot = Snapshot::new(&scene, None);
        let binding = Binding {
            element_id: "rect".to_string(),
            fixed_point: Point::new(1.0, 0.5),
        };
        let resolved =
            resolve_endpoint(Point::new(999.0, 999.0), Some(&binding), None, false, &snapshot);
        assert_eq!(resolved, Point::new(50.0, 25.0));
    }

    #[test]
    fn test_bound_endpoint_avoids_corner() {
        let scene = scene_with_rect();
        let snapshot = Snapshot::new(&scene, None);
        let binding = Binding {
            element_id: "rect".to_string(),
            fixed_point: Point::new(1.0, 0.0),
        };
        let resolved =
            resolve_endpoint(Point::new(0.0, 0.0), Some(&binding), None, false, &snapshot);
        // The top-right corner is pushed down the right edge
        assert_eq!(resolved, Point::new(50.0, 8.0));
    }

    #[test]
    fn test_missing_bound_element_falls_back_to_raw() {
        let scene = Scene::new();
        let snapshot = Snapshot::new(&scene, None);
        let binding = Binding {
            element_id: "gone".to_string(),
            fixed_point: Point::new(0.5, 0.5),
        };
        let raw = Point::new(7.0, 8.0);
        assert_eq!(resolve_endpoint(raw, Some(&binding), None, false, &snapshot), raw);
    }

    #[test]
    fn test_dragging_snaps_to_hovered_outline_mid() {
        let scene = scene_with_rect();
        let snapshot = Snapshot::new(&scene, None);
        let element = scene.get_element("rect").unwrap();
        let resolved = resolve_endpoint(
            Point::new(58.0, 23.0),
            None,
            Some(element),
            true,
            &snapshot,
        );
        // Snapped to the right edge, then into the midpoint corridor
        assert_eq!(resolved, Point::new(50.0, 25.0));
    }
}
