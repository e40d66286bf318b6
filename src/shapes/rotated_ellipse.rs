use crate::raster::{scanlines_for_polygon, Point};
use crate::rng::Rng;
use crate::scanline::Scanline;

/// Number of perimeter samples used to approximate the ellipse outline
const POINT_COUNT: i32 = 20;

/// Ellipse rotated about its center by an angle in degrees
///
/// Rasterized by sampling the perimeter into a polygon and scan-filling that,
/// which is exact enough at shape-search scale.
#[derive(Debug, Clone, PartialEq)]
pub struct RotatedEllipse {
    pub x: i32,
    pub y: i32,
    pub rx: i32,
    pub ry: i32,
    pub angle: i32,
    pub x_bound: i32,
    pub y_bound: i32,
}

impl RotatedEllipse {
    pub fn random(x_bound: i32, y_bound: i32, rng: &mut Rng) -> Self {
        Self {
            x: rng.below(x_bound),
            y: rng.below(y_bound),
            rx: rng.below(32) + 1,
            ry: rng.below(32) + 1,
            angle: rng.below(360),
            x_bound,
            y_bound,
        }
    }

    /// Perimeter samples transformed through the rotation
    pub fn perimeter(&self) -> Vec<Point> {
        let rads = self.angle as f64 * std::f64::consts::PI / 180.0;
        let c = rads.cos();
        let s = rads.sin();
        let mut points = Vec::with_capacity(POINT_COUNT as usize);
        for i in 0..POINT_COUNT {
            let rot = (360.0 / POINT_COUNT as f64) * i as f64 * std::f64::consts::PI / 180.0;
            let crx = self.rx as f64 * rot.cos();
            let cry = self.ry as f64 * rot.sin();
            points.push(Point {
                x: (crx * c - cry * s + self.x as f64) as i32,
                y: (crx * s + cry * c + self.y as f64) as i32,
            });
        }
        points
    }

    pub fn rasterize(&self) -> Vec<Scanline> {
        Scanline::trim(
            scanlines_for_polygon(&self.perimeter()),
            self.x_bound,
            self.y_bound,
        )
    }

    pub fn mutate(&mut self, rng: &mut Rng) {
        match rng.below(4) {
            0 => {
                self.x = (self.x - 16 + rng.below(33)).clamp(0, self.x_bound - 1);
                self.y = (self.y - 16 + rng.below(33)).clamp(0, self.y_bound - 1);
            }
            1 => {
                self.rx = (self.rx - 16 + rng.below(33)).clamp(1, self.x_bound - 1);
            }
            2 => {
                self.ry = (self.ry - 16 + rng.below(33)).clamp(1, self.y_bound - 1);
            }
            _ => {
                self.angle = (self.angle - 4 + rng.below(9)).clamp(0, 360);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perimeter_has_fixed_sample_count() {
        let ellipse = RotatedEllipse {
            x: 10,
            y: 10,
            rx: 6,
            ry: 3,
            angle: 45,
            x_bound: 30,
            y_bound: 30,
        };
        assert_eq!(ellipse.perimeter().len(), 20);
    }

    #[test]
    fn test_unrotated_coverage_centers_on_origin_point() {
        let ellipse = RotatedEllipse {
            x: 15,
            y: 15,
            rx: 5,
            ry: 5,
            angle: 0,
            x_bound: 30,
            y_bound: 30,
        };
        let lines = ellipse.rasterize();
        assert!(!lines.is_empty());
        let center = lines.iter().find(|l| l.y == 15).unwrap();
        assert!(center.x1 <= 10 && center.x2 >= 20);
    }
}
