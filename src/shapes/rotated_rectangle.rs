use crate::raster::{scanlines_for_polygon, Point};
use crate::rng::Rng;
use crate::scanline::Scanline;

/// Rectangle rotated about its center by an angle in degrees
#[derive(Debug, Clone, PartialEq)]
pub struct RotatedRectangle {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub angle: i32,
    pub x_bound: i32,
    pub y_bound: i32,
}

impl RotatedRectangle {
    pub fn random(x_bound: i32, y_bound: i32, rng: &mut Rng) -> Self {
        let x1 = rng.below(x_bound);
        let y1 = rng.below(y_bound);
        let x2 = (x1 + rng.below(32) + 1).clamp(0, x_bound);
        let y2 = (y1 + rng.below(32) + 1).clamp(0, y_bound);
        Self {
            x1,
            y1,
            x2,
            y2,
            angle: rng.below(361),
            x_bound,
            y_bound,
        }
    }

    /// The four corners after rotating the normalized rectangle about its center
    pub fn corners(&self) -> [Point; 4] {
        let xm1 = self.x1.min(self.x2);
        let xm2 = self.x1.max(self.x2);
        let ym1 = self.y1.min(self.y2);
        let ym2 = self.y1.max(self.y2);
        let cx = (xm1 + xm2) / 2;
        let cy = (ym1 + ym2) / 2;
        let ox1 = (xm1 - cx) as f64;
        let ox2 = (xm2 - cx) as f64;
        let oy1 = (ym1 - cy) as f64;
        let oy2 = (ym2 - cy) as f64;
        let rads = self.angle as f64 * std::f64::consts::PI / 180.0;
        let c = rads.cos();
        let s = rads.sin();
        let rotate = |ox: f64, oy: f64| Point {
            x: (ox * c - oy * s + cx as f64) as i32,
            y: (ox * s + oy * c + cy as f64) as i32,
        };
        [
            rotate(ox1, oy1),
            rotate(ox2, oy1),
            rotate(ox2, oy2),
            rotate(ox1, oy2),
        ]
    }

    pub fn rasterize(&self) -> Vec<Scanline> {
        Scanline::trim(
            scanlines_for_polygon(&self.corners()),
            self.x_bound,
            self.y_bound,
        )
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
                self.angle = (self.angle - 4 + rng.below(9)).clamp(0, 360);
            }
        }
    }
}
