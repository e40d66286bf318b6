//! SVG serialization of committed shapes.
//!
//! Pure formatting: every committed `(shape, color)` pair maps to one SVG
//! element, lines styled by stroke and everything else by fill.

use crate::color::Color;
use crate::model::ShapeResult;
use crate::shapes::Shape;

/// Whole-document export: background rectangle, then every shape in commit order
pub fn export_document(
    width: u32,
    height: u32,
    background: Color,
    results: &[ShapeResult],
) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.2\" baseProfile=\"tiny\" \
         width=\"{width}\" height=\"{height}\">\n\
         <rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" {}></rect>\n\
         {}\n</svg>\n",
        fill_for_color(background),
        export_shapes(results),
    )
}

/// Newline-joined elements for a batch of results
pub fn export_shapes(results: &[ShapeResult]) -> String {
    results
        .iter()
        .map(export_shape)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_shape(result: &ShapeResult) -> String {
    let style = styles_for_shape(result);
    match &result.shape {
        Shape::Rectangle(r) => {
            let x = r.x1.min(r.x2);
            let y = r.y1.min(r.y2);
            format!(
                "<rect x=\"{x}\" y=\"{y}\" width=\"{}\" height=\"{}\" {style} />",
                r.x1.max(r.x2) - x,
                r.y1.max(r.y2) - y,
            )
        }
        Shape::RotatedRectangle(r) => {
            let points = r
                .corners()
                .iter()
                .map(|p| format!("{} {}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ");
            format!("<polygon points=\"{points}\" {style}/>")
        }
        Shape::Triangle(t) => format!(
            "<polygon points=\"{},{} {},{} {},{}\" {style}/>",
            t.x1, t.y1, t.x2, t.y2, t.x3, t.y3,
        ),
        Shape::Ellipse(e) => format!(
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" {style} />",
            e.x, e.y, e.rx, e.ry,
        ),
        Shape::RotatedEllipse(e) => {
            // Identity parts of the transform are skipped
            let mut transform = String::new();
            if e.x != 0 || e.y != 0 {
                transform.push_str(&format!("translate({} {}) ", e.x, e.y));
            }
            if e.angle != 0 {
                transform.push_str(&format!("rotate({}) ", e.angle));
            }
            transform.push_str(&format!("scale({} {})", e.rx, e.ry));
            format!("<g transform=\"{transform}\"><ellipse rx=\"1\" ry=\"1\" {style} /></g>")
        }
        Shape::Circle(c) => format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {style} />",
            c.x, c.y, c.r,
        ),
        Shape::Line(l) => format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" {style} />",
            l.x1, l.y1, l.x2, l.y2,
        ),
    }
}

fn styles_for_shape(result: &ShapeResult) -> String {
    match result.shape {
        Shape::Line(_) => format!(
            "{} stroke-width=\"1\" fill=\"none\" {}",
            stroke_for_color(result.color),
            stroke_opacity_for_alpha(result.color.a()),
        ),
        _ => format!(
            "{} {}",
            fill_for_color(result.color),
            fill_opacity_for_alpha(result.color.a()),
        ),
    }
}

/// #rgb short form, high nibble per channel
fn rgb_for_color(color: Color) -> String {
    format!(
        "#{:x}{:x}{:x}",
        color.r() >> 4,
        color.g() >> 4,
        color.b() >> 4
    )
}

fn fill_for_color(color: Color) -> String {
    format!("fill=\"{}\"", rgb_for_color(color))
}

fn stroke_for_color(color: Color) -> String {
    format!("stroke=\"{}\"", rgb_for_color(color))
}

/// Omitted entirely once the shape is effectively opaque
fn fill_opacity_for_alpha(alpha: u8) -> String {
    if alpha >= 250 {
        String::new()
    } else {
        format!("fill-opacity=\"{:.2}\"", alpha as f64 / 255.0)
    }
}

fn stroke_opacity_for_alpha(alpha: u8) -> String {
    format!("stroke-opacity=\"{:.2}\"", alpha as f64 / 255.0)
}
