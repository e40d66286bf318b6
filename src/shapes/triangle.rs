use crate::raster::{scanlines_for_polygon, Point};
use crate::rng::Rng;
use crate::scanline::Scanline;

/// Triangle over three vertices
///
/// Random construction scatters the second and third vertex around the first;
/// vertices may land outside the canvas and rely on clipping.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub x3: i32,
    pub y3: i32,
    pub x_bound: i32,
    pub y_bound: i32,
}

impl Triangle {
    pub fn random(x_bound: i32, y_bound: i32, rng: &mut Rng) -> Self {
        let x1 = rng.below(x_bound);
        let y1 = rng.below(y_bound);
        Self {
            x1,
            y1,
            x2: x1 - 16 + rng.below(33),
            y2: y1 - 16 + rng.below(33),
            x3: x1 - 16 + rng.below(33),
            y3: y1 - 16 + rng.below(33),
            x_bound,
            y_bound,
        }
    }

    pub fn rasterize(&self) -> Vec<Scanline> {
        let points = [
            Point {
                x: self.x1,
                y: self.y1,
            },
            Point {
                x: self.x2,
                y: self.y2,
            },
            Point {
                x: self.x3,
                y: self.y3,
            },
        ];
        Scanline::trim(scanlines_for_polygon(&points), self.x_bound, self.y_bound)
    }

    pub fn mutate(&mut self, rng: &mut Rng) {
        match rng.below(3) {
            0 => {
                self.x1 = (self.x1 - 16 + rng.below(33)).clamp(0, self.x_bound - 1);
                self.y1 = (self.y1 - 16 + rng.below(33)).clamp(0, self.y_bound - 1);
            }
            1 => {
                self.x2 = (self.x2 - 16 + rng.below(33)).clamp(0, self.x_bound - 1);
                self.y2 = (self.y2 - 16 + rng.below(33)).clamp(0, self.y_bound - 1);
            }
            _ => {
                self.x3 = (self.x3 - 16 + rng.below(33)).clamp(0, self.x_bound - 1);
                self.y3 = (self.y3 - 16 + rng.below(33)).clamp(0, self.y_bound - 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_triangle_rows_narrow_toward_apex() {
        let tri = Triangle {
            x1: 0,
            y1: 0,
            x2: 0,
            y2: 4,
            x3: 4,
            y3: 4,
            x_bound: 10,
            y_bound: 10,
        };
        let lines = tri.rasterize();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], Scanline::new(0, 0, 0));
        assert_eq!(lines[4], Scanline::new(4, 0, 4));
    }

    #[test]
    fn test_offscreen_triangle_clips_to_nothing() {
        let tri = Triangle {
            x1: -20,
            y1: -20,
            x2: -10,
            y2: -25,
            x3: -15,
            y3: -5,
            x_bound: 10,
            y_bound: 10,
        };
        assert!(tri.rasterize().is_empty());
    }

    #[test]
    fn test_degenerate_triangle_is_a_line() {
        let tri = Triangle {
            x1: 1,
            y1: 1,
            x2: 5,
            y2: 1,
            x3: 3,
            y3: 1,
            x_bound: 10,
            y_bound: 10,
        };
        let lines = tri.rasterize();
        assert_eq!(lines, vec![Scanline::new(1, 1, 5)]);
    }
}
