//! SVG generation from routed scenes

use crate::binding::aabb_for_element;
use crate::elements::{ElbowArrow, Element, ElementKind};
use crate::geometry::{Bounds, Point};
use crate::scene::Scene;
use crate::stylesheet::Stylesheet;

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    defs: Vec<String>,
    styles: Vec<String>,
    elements: Vec<String>,
    connections: Vec<String>,
    background: Option<String>,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            defs: vec![],
            styles: vec![],
            elements: vec![],
            connections: vec![],
            background: None,
        }
    }

    /// Paint the whole canvas with a background color
    pub fn set_background(&mut self, color: impl Into<String>) {
        self.background = Some(color.into());
    }

    /// Add CSS custom properties from a stylesheet
    pub fn add_stylesheet(&mut self, stylesheet: &Stylesheet) {
        let mut css = String::from(":root {\n");
        let mut tokens: Vec<(&String, &String)> = stylesheet.colors.iter().collect();
        tokens.sort_by_key(|(token, _)| token.as_str());
        for (token, value) in tokens {
            css.push_str(&format!("    --{}: {};\n", token, value));
        }
        css.push_str("  }");
        self.styles.push(css);
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".to_string()
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add the arrowhead marker definition. The marker rotates to match the
    /// final segment direction and inherits the line's stroke color.
    pub fn add_arrow_marker(&mut self) {
        let prefix = self.prefix();
        self.defs.push(format!(
            r#"<marker id="{prefix}arrow" viewBox="0 0 10 10" refX="8" refY="5" markerWidth="5" markerHeight="5" markerUnits="strokeWidth" orient="auto">
      <path d="M0,0 L10,5 L0,10 Z" fill="context-stroke"/>
    </marker>"#
        ));
    }

    /// Add a rectangle element
    pub fn add_rect(
        &mut self,
        id: Option<&str>,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        classes: &[String],
        styles: &str,
    ) {
        let prefix = self.prefix();
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        let class_list = std::iter::once(format!("{}shape", prefix))
            .chain(std::iter::once(format!("{}rect", prefix)))
            .chain(classes.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");

        self.elements.push(format!(
            r#"{}<rect{} class="{}" x="{}" y="{}" width="{}" height="{}"{}/>"#,
            self.indent_str(),
            id_attr,
            class_list,
            x,
            y,
            w,
            h,
            styles
        ));
    }

    /// Add an ellipse element
    pub fn add_ellipse(
        &mut self,
        id: Option<&str>,
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        classes: &[String],
        styles: &str,
    ) {
        let prefix = self.prefix();
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        let class_list = std::iter::once(format!("{}shape", prefix))
            .chain(std::iter::once(format!("{}ellipse", prefix)))
            .chain(classes.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");

        self.elements.push(format!(
            r#"{}<ellipse{} class="{}" cx="{}" cy="{}" rx="{}" ry="{}"{}/>"#,
            self.indent_str(),
            id_attr,
            class_list,
            cx,
            cy,
            rx,
            ry,
            styles
        ));
    }

    /// Add a polygon element
    pub fn add_polygon(
        &mut self,
        id: Option<&str>,
        points: &[Point],
        classes: &[String],
        styles: &str,
    ) {
        let prefix = self.prefix();
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        let class_list = std::iter::once(format!("{}shape", prefix))
            .chain(std::iter::once(format!("{}polygon", prefix)))
            .chain(classes.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");

        let points_str: String = points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");

        self.elements.push(format!(
            r#"{}<polygon{} class="{}" points="{}"{}/>"#,
            self.indent_str(),
            id_attr,
            class_list,
            points_str,
            styles
        ));
    }

    /// Add a debug rectangle with a dashed border
    pub fn add_debug_rect(&mut self, bounds: &Bounds, color: &str) {
        self.elements.push(format!(
            r#"{}<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="0.5" stroke-dasharray="2,2" opacity="0.7"/>"#,
            self.indent_str(),
            bounds.x_min,
            bounds.y_min,
            bounds.width(),
            bounds.height(),
            color
        ));
    }

    /// Add a routed arrow polyline with an arrowhead at the end
    pub fn add_arrow_path(&mut self, id: Option<&str>, points: &[Point], styles: &str) {
        if points.len() < 2 {
            return;
        }
        let prefix = self.prefix();
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        let mut d = format!("M{} {}", points[0].x, points[0].y);
        for p in &points[1..] {
            d.push_str(&format!(" L{} {}", p.x, p.y));
        }
        self.connections.push(format!(
            r#"{}<path{} class="{}connection" d="{}" fill="none"{} marker-end="url(#{}arrow)"/>"#,
            self.indent_str(),
            id_attr,
            prefix,
            d,
            styles,
            prefix
        ));
    }

    /// Build the final SVG string
    pub fn build(self, viewbox: Bounds) -> String {
        let padding = self.config.viewbox_padding;
        let vb_x = viewbox.x_min - padding;
        let vb_y = viewbox.y_min - padding;
        let vb_w = viewbox.width() + 2.0 * padding;
        let vb_h = viewbox.height() + 2.0 * padding;

        let nl = self.newline();
        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            vb_x, vb_y, vb_w, vb_h
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        if !self.defs.is_empty() {
            svg.push_str("  <defs>");
            svg.push_str(nl);
            for def in &self.defs {
                svg.push_str("    ");
                svg.push_str(def);
                svg.push_str(nl);
            }
            svg.push_str("  </defs>");
            svg.push_str(nl);
        }

        if let Some(color) = &self.background {
            svg.push_str(&format!(
                r#"{}<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                self.indent_str(),
                vb_x,
                vb_y,
                vb_w,
                vb_h,
                color
            ));
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }
        for conn in &self.connections {
            svg.push_str(conn);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg.push_str(nl);
        svg
    }
}

fn element_styles(element: &Element) -> String {
    let mut styles = String::from(
        r#" fill="var(--shape-fill)" stroke="var(--shape-stroke)" stroke-width="2""#,
    );
    if element.angle != 0.0 {
        let c = element.center();
        styles.push_str(&format!(
            r#" transform="rotate({} {} {})""#,
            element.angle.to_degrees(),
            c.x,
            c.y
        ));
    }
    styles
}

fn arrow_global_points(arrow: &ElbowArrow) -> Vec<Point> {
    arrow
        .points
        .iter()
        .map(|p| p.translate(arrow.x, arrow.y))
        .collect()
}

fn scene_viewbox(scene: &Scene) -> Bounds {
    let mut bounds: Option<Bounds> = None;
    let mut include = |b: Bounds| {
        bounds = Some(match bounds {
            Some(existing) => existing.union(&b),
            None => b,
        });
    };
    for element in scene.non_deleted_elements() {
        include(aabb_for_element(element, [0.0; 4]));
    }
    for arrow in &scene.arrows {
        for p in arrow_global_points(arrow) {
            include(Bounds::new(p.x, p.y, p.x, p.y));
        }
    }
    bounds.unwrap_or(Bounds::new(0.0, 0.0, 0.0, 0.0))
}

/// Render a scene with the default stylesheet
pub fn render_svg(scene: &Scene, config: &SvgConfig) -> String {
    render_svg_with_stylesheet(scene, config, &Stylesheet::default(), &[])
}

/// Render a scene with a custom stylesheet. `debug_bounds` boxes are drawn
/// as dashed overlays on top of the shapes.
pub fn render_svg_with_stylesheet(
    scene: &Scene,
    config: &SvgConfig,
    stylesheet: &Stylesheet,
    debug_bounds: &[Bounds],
) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_stylesheet(stylesheet);
    builder.add_arrow_marker();
    if config.draw_background {
        builder.set_background(stylesheet.resolve_or_default("background"));
    }

    for element in scene.non_deleted_elements() {
        let styles = element_styles(element);
        match element.kind {
            ElementKind::Ellipse => {
                let c = element.center();
                builder.add_ellipse(
                    Some(&element.id),
                    c.x,
                    c.y,
                    element.width / 2.0,
                    element.height / 2.0,
                    &[],
                    &styles,
                );
            }
            ElementKind::Diamond => {
                let b = element.bounds();
                let c = element.center();
                builder.add_polygon(
                    Some(&element.id),
                    &[
                        Point::new(c.x, b.y_min),
                        Point::new(b.x_max, c.y),
                        Point::new(c.x, b.y_max),
                        Point::new(b.x_min, c.y),
                    ],
                    &[],
                    &styles,
                );
            }
            _ => {
                builder.add_rect(
                    Some(&element.id),
                    element.x,
                    element.y,
                    element.width,
                    element.height,
                    &[],
                    &styles,
                );
            }
        }
    }

    let debug_color = stylesheet.resolve_or_default("debug");
    for bounds in debug_bounds {
        builder.add_debug_rect(bounds, &debug_color);
    }

    for arrow in &scene.arrows {
        builder.add_arrow_path(
            Some(&arrow.id),
            &arrow_global_points(arrow),
            r#" stroke="var(--arrow-stroke)" stroke-width="2""#,
        );
    }

    builder.build(scene_viewbox(scene))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_scene() -> Scene {
        let mut scene = Scene::new();
        scene.elements.push(Element {
            id: "a".to_string(),
            kind: ElementKind::Rectangle,
            x: 0.0,
            y: 0.0,
            width: 50.0,
            height: 50.0,
            angle: 0.0,
            is_deleted: false,
        });
        scene.elements.push(Element {
            id: "d".to_string(),
            kind: ElementKind::Diamond,
            x: 200.0,
            y: 0.0,
            width: 50.0,
            height: 50.0,
            angle: 0.0,
            is_deleted: false,
        });
        scene.arrows.push(ElbowArrow {
            id: "arrow".to_string(),
            x: 50.0,
            y: 25.0,
            angle: 0.0,
            points: vec![Point::new(0.0, 0.0), Point::new(150.0, 0.0)],
            width: 150.0,
            height: 0.0,
            roundness: None,
            start_binding: None,
            end_binding: None,
        });
        scene
    }

    #[test]
    fn test_render_contains_shapes_and_arrow() {
        let svg = render_svg(&sample_scene(), &SvgConfig::default());
        assert!(svg.contains("<rect"));
        assert!(svg.contains("<polygon"));
        assert!(svg.contains(r#"class="er-connection""#));
        assert!(svg.contains("M50 25 L200 25"));
        assert!(svg.contains("marker-end"));
    }

    #[test]
    fn test_render_skips_deleted_elements() {
        let mut scene = sample_scene();
        scene.elements[0].is_deleted = true;
        let svg = render_svg(&scene, &SvgConfig::default());
        assert!(!svg.contains(r#"id="a""#));
        assert!(svg.contains(r#"id="d""#));
    }

    #[test]
    fn test_render_debug_bounds() {
        let scene = sample_scene();
        let debug = [Bounds::new(0.0, 0.0, 10.0, 10.0)];
        let svg = render_svg_with_stylesheet(
            &scene,
            &SvgConfig::default(),
            &Stylesheet::default(),
            &debug,
        );
        assert!(svg.contains("stroke-dasharray"));
    }

    #[test]
    fn test_background_rect_uses_stylesheet_token() {
        let svg = render_svg(&sample_scene(), &SvgConfig::default().with_background());
        assert!(svg.contains(r##"fill="#ffffff"/>"##));
    }

    #[test]
    fn test_render_rotated_element_gets_transform() {
        let mut scene = sample_scene();
        scene.elements[0].angle = std::f64::consts::FRAC_PI_2;
        let svg = render_svg(&scene, &SvgConfig::default());
        assert!(svg.contains("rotate(90 25 25"));
    }

    #[test]
    fn test_compact_output_drops_declaration_and_indentation() {
        let svg = render_svg(
            &sample_scene(),
            &SvgConfig::default().with_pretty_print(false).with_standalone(false),
        );
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(!svg.contains("\n<rect"));
    }
}
