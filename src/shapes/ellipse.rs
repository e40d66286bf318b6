use crate::rng::Rng;
use crate::scanline::Scanline;

/// Axis-aligned ellipse centered on (x, y)
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub x: i32,
    pub y: i32,
    pub rx: i32,
    pub ry: i32,
    pub x_bound: i32,
    pub y_bound: i32,
}

impl Ellipse {
    pub fn random(x_bound: i32, y_bound: i32, rng: &mut Rng) -> Self {
        Self {
            x: rng.below(x_bound),
            y: rng.below(y_bound),
            rx: rng.below(32) + 1,
            ry: rng.below(32) + 1,
            x_bound,
            y_bound,
        }
    }

    /// Per-row half-chord via sqrt(ry^2 - dy^2) scaled by the aspect ratio,
    /// emitting the mirrored row pair and suppressing the duplicate equator
    pub fn rasterize(&self) -> Vec<Scanline> {
        let mut lines = Vec::new();
        let aspect = self.rx as f64 / self.ry as f64;
        let (w, h) = (self.x_bound, self.y_bound);
        for dy in 0..self.ry {
            let y1 = self.y - dy;
            let y2 = self.y + dy;
            if (y1 < 0 || y1 >= h) && (y2 < 0 || y2 >= h) {
                continue;
            }
            let s = (((self.ry * self.ry - dy * dy) as f64).sqrt() * aspect) as i32;
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
        match rng.below(3) {
            0 => {
                self.x = (self.x - 16 + rng.below(33)).clamp(0, self.x_bound - 1);
                self.y = (self.y - 16 + rng.below(33)).clamp(0, self.y_bound - 1);
            }
            1 => {
                self.rx = (self.rx - 16 + rng.below(33)).clamp(1, self.x_bound - 1);
            }
            _ => {
                self.ry = (self.ry - 16 + rng.below(33)).clamp(1, self.y_bound - 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_come_in_mirrored_pairs() {
        let ellipse = Ellipse {
            x: 10,
            y: 10,
            rx: 4,
            ry: 3,
            x_bound: 20,
            y_bound: 20,
        };
        let lines = ellipse.rasterize();
        // dy = 0 gives one row, dy = 1..3 give two each
        assert_eq!(lines.len(), 5);
        assert_eq!(lines.iter().filter(|l| l.y == 10).count(), 1);
        assert_eq!(lines.iter().filter(|l| l.y == 9).count(), 1);
        assert_eq!(lines.iter().filter(|l| l.y == 11).count(), 1);
    }

    #[test]
    fn test_equator_is_widest() {
        let ellipse = Ellipse {
            x: 10,
            y: 10,
            rx: 5,
            ry: 5,
            x_bound: 20,
            y_bound: 20,
        };
        let lines = ellipse.rasterize();
        let widest = lines.iter().max_by_key(|l| l.x2 - l.x1).unwrap();
        assert_eq!(widest.y, 10);
        assert_eq!((widest.x1, widest.x2), (5, 15));
    }

    #[test]
    fn test_spans_clamp_to_canvas() {
        let ellipse = Ellipse {
            x: 0,
            y: 0,
            rx: 30,
            ry: 30,
            x_bound: 10,
            y_bound: 10,
        };
        for line in ellipse.rasterize() {
            assert!(line.y >= 0 && line.y < 10);
            assert!(line.x1 >= 0 && line.x2 < 10);
        }
    }
}
