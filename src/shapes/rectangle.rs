use crate::rng::Rng;
use crate::scanline::Scanline;

/// Axis-aligned rectangle spanning two corners
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub x_bound: i32,
    pub y_bound: i32,
}

impl Rectangle {
    pub fn random(x_bound: i32, y_bound: i32, rng: &mut Rng) -> Self {
        let x1 = rng.below(x_bound);
        let y1 = rng.below(y_bound);
        let x2 = (x1 + rng.below(32) + 1).clamp(0, x_bound - 1);
        let y2 = (y1 + rng.below(32) + 1).clamp(0, y_bound - 1);
        Self {
            x1,
            y1,
            x2,
            y2,
            x_bound,
            y_bound,
        }
    }

    /// One span per row in `y1..y2`; a zero-width rectangle covers nothing
    pub fn rasterize(&self) -> Vec<Scanline> {
        let mut lines = Vec::new();
        for y in self.y1..self.y2 {
            if self.x1 != self.x2 {
                lines.push(Scanline::new(y, self.x1.min(self.x2), self.x1.max(self.x2)));
            }
        }
        Scanline::trim(lines, self.x_bound, self.y_bound)
    }

    pub fn mutate(&mut self, rng: &mut Rng) {
        match rng.below(2) {
            0 => {
                self.x1 = (self.x1 - 16 + rng.below(33)).clamp(0, self.x_bound - 1);
                self.y1 = (self.y1 - 16 + rng.below(33)).clamp(0, self.y_bound - 1);
            }
            _ => {
                self.x2 = (self.x2 - 16 + rng.below(33)).clamp(0, self.x_bound - 1);
                self.y2 = (self.y2 - 16 + rng.below(33)).clamp(0, self.y_bound - 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rasterize_rows_are_half_open() {
        let rect = Rectangle {
            x1: 1,
            y1: 1,
            x2: 3,
            y2: 4,
            x_bound: 10,
            y_bound: 10,
        };
        let lines = rect.rasterize();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], Scanline::new(1, 1, 3));
        assert_eq!(lines[2], Scanline::new(3, 1, 3));
    }

    #[test]
    fn test_zero_width_covers_nothing() {
        let rect = Rectangle {
            x1: 2,
            y1: 0,
            x2: 2,
            y2: 5,
            x_bound: 10,
            y_bound: 10,
        };
        assert!(rect.rasterize().is_empty());
    }

    #[test]
    fn test_inverted_corners_normalize_per_row() {
        let rect = Rectangle {
            x1: 5,
            y1: 0,
            x2: 2,
            y2: 2,
            x_bound: 10,
            y_bound: 10,
        };
        for line in rect.rasterize() {
            assert_eq!((line.x1, line.x2), (2, 5));
        }
    }
}
