use crate::rng::Rng;
use crate::scanline::Scanline;

/// Circle centered on (x, y)
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub x: i32,
    pub y: i32,
    pub r: i32,
    pub x_bound: i32,
    pub y_bound: i32,
}

impl Circle {
    pub fn random(x_bound: i32, y_bound: i32, rng: &mut Rng) -> Self {
        Self {
            x: rng.below(x_bound),
            y: rng.below(y_bound),
            r: rng.below(32) + 1,
            x_bound,
            y_bound,
        }
    }

    pub fn rasterize(&self) -> Vec<Scanline> {
        let mut lines = Vec::new();
        let (w, h) = (self.x_bound, self.y_bound);
        for dy in 0..self.r {
            let y1 = self.y - dy;
            let y2 = self.y + dy;
            if (y1 < 0 || y1 >= h) && (y2 < 0 || y2 >= h) {
                continue;
            }
            let s = ((self.r * self.r - dy * dy) as f64).sqrt() as i32;
            let x1 = (self.x - s).max(0);
            let x2 = (self.x + s).min(w - 1);
            if y1 >= 0 && y1 < h {
                lines.push(Scanline::new(y1, x1, x2));
            }
            if y2 >= 0 && y2 < h && dy > 0 {
                lines.push(Scanline::new(y2, x1, x2));
            }
        }
        lines
    }

    pub fn mutate(&mut self, rng: &mut Rng) {
        match rng.below(2) {
            0 => {
                self.x = (self.x - 16 + rng.below(33)).clamp(0, self.x_bound - 1);
                self.y = (self.y - 16 + rng.below(33)).clamp(0, self.y_bound - 1);
            }
            _ => {
                self.r = (self.r - 16 + rng.below(33)).clamp(1, self.x_bound - 1);
            }
        }
    }
}
