//! Owns the canvas state and commits one winning shape per step.

use crate::bitmap::Bitmap;
use crate::blend::draw_scanlines;
use crate::color::Color;
use crate::error::Error;
use crate::optimize::best_hill_climb_state;
use crate::rng::Rng;
use crate::score::{difference_full, difference_partial};
use crate::shapes::{Shape, ShapeKind};
use crate::solver::solve_color;

/// Per-step search configuration
#[derive(Debug, Clone)]
pub struct StepConfig {
    /// Opacity every candidate is drawn with
    pub alpha: u8,
    /// Random shapes sampled per step
    pub candidate_shapes_per_step: u32,
    /// Maximum consecutive failed mutations before the climb settles
    pub shape_mutations_per_step: u32,
    /// Shape kinds the sampler may draw from
    pub shape_types: Vec<ShapeKind>,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            alpha: 128,
            candidate_shapes_per_step: 50,
            shape_mutations_per_step: 100,
            shape_types: ShapeKind::ALL.to_vec(),
        }
    }
}

/// One committed step: the shape, its solved color, and the score after it
#[derive(Debug, Clone)]
pub struct ShapeResult {
    pub score: f64,
    pub color: Color,
    pub shape: Shape,
}

/// The canvas being built up, one shape at a time
///
/// Owns the target, the committed canvas, and a scratch buffer for trial
/// blends. Trials only ever write the scratch buffer; `add_shape` is the one
/// place `current` and `score` change.
pub struct Model {
    target: Bitmap,
    current: Bitmap,
    buffer: Bitmap,
    score: f64,
}

impl Model {
    /// Start from a flat background color
    pub fn new(target: Bitmap, background: Color) -> Result<Self, Error> {
        let current = Bitmap::filled(target.width(), target.height(), background);
        let buffer = current.clone();
        let score = difference_full(&target, &current)?;
        Ok(Self {
            target,
            current,
            buffer,
            score,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.target.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.target.height()
    }

    /// Normalized RMSE between target and the committed canvas
    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[inline]
    pub fn target(&self) -> &Bitmap {
        &self.target
    }

    #[inline]
    pub fn current(&self) -> &Bitmap {
        &self.current
    }

    /// Search for the best shape under `config` and commit it
    pub fn step(&mut self, config: &StepConfig, rng: &mut Rng) -> Result<ShapeResult, Error> {
        if config.shape_types.is_empty() {
            return Err(Error::EmptyShapeTypes);
        }
        if config.candidate_shapes_per_step == 0 {
            return Err(Error::ZeroCandidates);
        }
        let state = best_hill_climb_state(
            &config.shape_types,
            config.alpha,
            config.candidate_shapes_per_step,
            config.shape_mutations_per_step,
            &self.target,
            &self.current,
            &mut self.buffer,
            self.score,
            rng,
        );
        Ok(self.add_shape(state.shape, state.alpha))
    }

    /// Permanently composite a shape into the canvas and update the score
    ///
    /// Re-solves the color against the committed canvas, blends in place, and
    /// rescores incrementally against a snapshot of the touched region's
    /// previous contents.
    pub fn add_shape(&mut self, shape: Shape, alpha: u8) -> ShapeResult {
        let before = self.current.clone();
        let lines = shape.rasterize();
        let color = solve_color(&self.target, &self.current, &lines, alpha);
        draw_scanlines(&mut self.current, color, &lines);
        self.score = difference_partial(&self.target, &before, &self.current, self.score, &lines);
        ShapeResult {
            score: self.score,
            color,
            shape,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Rectangle;

    const RED: Color = Color(0xff0000ff);
    const WHITE: Color = Color(0xffffffff);

    #[test]
    fn test_initial_score_is_the_full_difference() {
        let model = Model::new(Bitmap::filled(4, 4, RED), WHITE).unwrap();
        // Red vs white: G and B each differ by 255 on every pixel
        assert_eq!(model.score(), (32512.5_f64).sqrt() / 255.0);
    }

    #[test]
    fn test_full_canvas_opaque_commit_zeroes_the_score() {
        let mut model = Model::new(Bitmap::filled(4, 4, RED), WHITE).unwrap();
        // Rows are half-open, so covering all four needs y2 == height
        let rect = Rectangle {
            x1: 0,
            y1: 0,
            x2: 3,
            y2: 4,
            x_bound: 4,
            y_bound: 4,
        };
        let result = model.add_shape(Shape::Rectangle(rect), 255);
        assert_eq!(result.color, RED);
        assert_eq!(result.score, 0.0);
        assert_eq!(model.score(), 0.0);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(model.current().get(x, y), Some(RED));
            }
        }
    }

    #[test]
    fn test_step_rejects_empty_shape_set() {
        let mut model = Model::new(Bitmap::filled(4, 4, RED), WHITE).unwrap();
        let config = StepConfig {
            shape_types: Vec::new(),
            ..StepConfig::default()
        };
        assert!(matches!(
            model.step(&config, &mut Rng::new(1)),
            Err(Error::EmptyShapeTypes)
        ));
    }

    #[test]
    fn test_step_rejects_zero_candidates() {
        let mut model = Model::new(Bitmap::filled(4, 4, RED), WHITE).unwrap();
        let config = StepConfig {
            candidate_shapes_per_step: 0,
            ..StepConfig::default()
        };
        assert!(matches!(
            model.step(&config, &mut Rng::new(1)),
            Err(Error::ZeroCandidates)
        ));
    }

    #[test]
    fn test_steps_reduce_score_toward_target() {
        let mut target = Bitmap::filled(16, 16, WHITE);
        for y in 4..12 {
            for x in 4..12 {
                target.set(x, y, RED);
            }
        }
        let background = target.average_color();
        let mut model = Model::new(target, background).unwrap();
        let mut rng = Rng::new(2024);
        let config = StepConfig::default();
        let initial = model.score();
        for _ in 0..5 {
            model.step(&config, &mut rng).unwrap();
        }
        assert!(model.score() <= initial);
    }

    #[test]
    fn test_same_seed_reproduces_the_run() {
        let mut target = Bitmap::filled(8, 8, WHITE);
        target.set(3, 3, RED);
        target.set(4, 4, RED);
        let config = StepConfig {
            candidate_shapes_per_step: 10,
            shape_mutations_per_step: 10,
            ..StepConfig::default()
        };

        let mut a = Model::new(target.clone(), WHITE).unwrap();
        let mut b = Model::new(target, WHITE).unwrap();
        let mut rng_a = Rng::new(555);
        let mut rng_b = Rng::new(555);
        for _ in 0..3 {
            let ra = a.step(&config, &mut rng_a).unwrap();
            let rb = b.step(&config, &mut rng_b).unwrap();
            assert_eq!(ra.shape, rb.shape);
            assert_eq!(ra.color, rb.color);
            assert_eq!(ra.score, rb.score);
        }
    }
}
