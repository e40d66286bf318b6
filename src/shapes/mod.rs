//! Geometric primitives the optimizer searches over.
//!
//! The set of kinds is fixed, so `Shape` is a closed sum type rather than an
//! open trait hierarchy; each variant lives in its own module and exposes the
//! same surface: `random`, `rasterize`, `mutate`.

mod circle;
mod ellipse;
mod line;
mod rectangle;
mod rotated_ellipse;
mod rotated_rectangle;
mod triangle;

pub use circle::Circle;
pub use ellipse::Ellipse;
pub use line::Line;
pub use rectangle::Rectangle;
pub use rotated_ellipse::RotatedEllipse;
pub use rotated_rectangle::RotatedRectangle;
pub use triangle::Triangle;

use crate::rng::Rng;
use crate::scanline::Scanline;

/// Shape kind tags; the numeric ids (0-6) are part of the wire protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    RotatedRectangle,
    Triangle,
    Ellipse,
    RotatedEllipse,
    Circle,
    Line,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Rectangle,
        ShapeKind::RotatedRectangle,
        ShapeKind::Triangle,
        ShapeKind::Ellipse,
        ShapeKind::RotatedEllipse,
        ShapeKind::Circle,
        ShapeKind::Line,
    ];

    /// Resolve a wire id to a kind
    pub fn from_id(id: u8) -> Option<ShapeKind> {
        match id {
            0 => Some(ShapeKind::Rectangle),
            1 => Some(ShapeKind::RotatedRectangle),
            2 => Some(ShapeKind::Triangle),
            3 => Some(ShapeKind::Ellipse),
            4 => Some(ShapeKind::RotatedEllipse),
            5 => Some(ShapeKind::Circle),
            6 => Some(ShapeKind::Line),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        match self {
            ShapeKind::Rectangle => 0,
            ShapeKind::RotatedRectangle => 1,
            ShapeKind::Triangle => 2,
            ShapeKind::Ellipse => 3,
            ShapeKind::RotatedEllipse => 4,
            ShapeKind::Circle => 5,
            ShapeKind::Line => 6,
        }
    }
}

/// One geometric primitive with its canvas bounds baked in
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle(Rectangle),
    RotatedRectangle(RotatedRectangle),
    Triangle(Triangle),
    Ellipse(Ellipse),
    RotatedEllipse(RotatedEllipse),
    Circle(Circle),
    Line(Line),
}

impl Shape {
    /// Uniform random shape of the given kind within the canvas bounds
    pub fn random(kind: ShapeKind, x_bound: i32, y_bound: i32, rng: &mut Rng) -> Shape {
        match kind {
            ShapeKind::Rectangle => Shape::Rectangle(Rectangle::random(x_bound, y_bound, rng)),
            ShapeKind::RotatedRectangle => {
                Shape::RotatedRectangle(RotatedRectangle::random(x_bound, y_bound, rng))
            }
            ShapeKind::Triangle => Shape::Triangle(Triangle::random(x_bound, y_bound, rng)),
            ShapeKind::Ellipse => Shape::Ellipse(Ellipse::random(x_bound, y_bound, rng)),
            ShapeKind::RotatedEllipse => {
                Shape::RotatedEllipse(RotatedEllipse::random(x_bound, y_bound, rng))
            }
            ShapeKind::Circle => Shape::Circle(Circle::random(x_bound, y_bound, rng)),
            ShapeKind::Line => Shape::Line(Line::random(x_bound, y_bound, rng)),
        }
    }

    /// Random kind from a non-empty set, then a random shape of that kind
    pub fn random_of(kinds: &[ShapeKind], x_bound: i32, y_bound: i32, rng: &mut Rng) -> Shape {
        let kind = kinds[rng.below(kinds.len() as i32) as usize];
        Shape::random(kind, x_bound, y_bound, rng)
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::RotatedRectangle(_) => ShapeKind::RotatedRectangle,
            Shape::Triangle(_) => ShapeKind::Triangle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::RotatedEllipse(_) => ShapeKind::RotatedEllipse,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Line(_) => ShapeKind::Line,
        }
    }

    /// Clipped coverage spans for this shape
    pub fn rasterize(&self) -> Vec<Scanline> {
        match self {
            Shape::Rectangle(s) => s.rasterize(),
            Shape::RotatedRectangle(s) => s.rasterize(),
            Shape::Triangle(s) => s.rasterize(),
            Shape::Ellipse(s) => s.rasterize(),
            Shape::RotatedEllipse(s) => s.rasterize(),
            Shape::Circle(s) => s.rasterize(),
            Shape::Line(s) => s.rasterize(),
        }
    }

    /// Perturb one randomly chosen parameter in place
    pub fn mutate(&mut self, rng: &mut Rng) {
        match self {
            Shape::Rectangle(s) => s.mutate(rng),
            Shape::RotatedRectangle(s) => s.mutate(rng),
            Shape::Triangle(s) => s.mutate(rng),
            Shape::Ellipse(s) => s.mutate(rng),
            Shape::RotatedEllipse(s) => s.mutate(rng),
            Shape::Circle(s) => s.mutate(rng),
            Shape::Line(s) => s.mutate(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ids_roundtrip() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(ShapeKind::from_id(7), None);
    }

    #[test]
    fn test_random_shapes_rasterize_in_bounds() {
        let mut rng = Rng::new(1234);
        let (w, h) = (40, 30);
        for kind in ShapeKind::ALL {
            for _ in 0..50 {
                let shape = Shape::random(kind, w, h, &mut rng);
                for line in shape.rasterize() {
                    assert!(line.y >= 0 && line.y < h, "{kind:?} row {}", line.y);
                    assert!(line.x1 >= 0 && line.x1 <= line.x2 && line.x2 < w,
                        "{kind:?} span {}..{}", line.x1, line.x2);
                }
            }
        }
    }

    #[test]
    fn test_mutation_keeps_shapes_rasterizable() {
        let mut rng = Rng::new(99);
        let (w, h) = (25, 25);
        for kind in ShapeKind::ALL {
            let mut shape = Shape::random(kind, w, h, &mut rng);
            for _ in 0..200 {
                shape.mutate(&mut rng);
                for line in shape.rasterize() {
                    assert!(line.y >= 0 && line.y < h);
                    assert!(line.x1 >= 0 && line.x1 <= line.x2 && line.x2 < w);
                }
            }
        }
    }
}
