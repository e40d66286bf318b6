use crate::raster::bresenham;
use crate::rng::Rng;
use crate::scanline::Scanline;

/// Unit-width line segment between two points
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub x_bound: i32,
    pub y_bound: i32,
}

impl Line {
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
            x_bound,
            y_bound,
        }
    }

    /// One single-pixel scanline per traced point
    pub fn rasterize(&self) -> Vec<Scanline> {
        let lines = bresenham(self.x1, self.y1, self.x2, self.y2)
            .into_iter()
            .map(|point| Scanline::new(point.y, point.x, point.x))
            .collect();
        Scanline::trim(lines, self.x_bound, self.y_bound)
    }

    pub fn mutate(&mut self, rng: &mut Rng) {
        match rng.below(4) {
            0 => {
                self.x1 = (self.x1 - 16 + rng.below(33)).clamp(0, self.x_bound - 1);
                self.y1 = (self.y1 - 16 + rng.below(33)).clamp(0, self.y_bound - 1);
            }
            1 => {
                self.x2 = (self.x2 - 16 + rng.below(33)).clamp(0, self.x_bound - 1);
                self.y2 = (self.y2 - 16 + rng.below(33)).clamp(0, self.y_bound - 1);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line_is_unit_height() {
        let line = Line {
            x1: 1,
            y1: 3,
            x2: 6,
            y2: 3,
            x_bound: 10,
            y_bound: 10,
        };
        let lines = line.rasterize();
        assert_eq!(lines.len(), 6);
        for (i, scanline) in lines.iter().enumerate() {
            assert_eq!(scanline.y, 3);
            assert_eq!(scanline.x1, 1 + i as i32);
            assert_eq!(scanline.x1, scanline.x2);
        }
    }

    #[test]
    fn test_line_clips_to_canvas() {
        let line = Line {
            x1: 8,
            y1: 8,
            x2: 15,
            y2: 15,
            x_bound: 10,
            y_bound: 10,
        };
        for scanline in line.rasterize() {
            assert!(scanline.y < 10);
            assert!(scanline.x2 < 10);
        }
    }
}
