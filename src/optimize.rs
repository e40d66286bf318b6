//! Stochastic shape search: random sampling followed by hill climbing.

use crate::bitmap::Bitmap;
use crate::blend::{copy_scanlines, draw_scanlines};
use crate::rng::Rng;
use crate::score::difference_partial;
use crate::shapes::{Shape, ShapeKind};
use crate::solver::solve_color;

/// A candidate shape with its lazily computed, memoized energy
#[derive(Debug, Clone)]
pub struct State {
    pub shape: Shape,
    pub alpha: u8,
    score: Option<f64>,
}

impl State {
    pub fn new(shape: Shape, alpha: u8) -> Self {
        Self {
            shape,
            alpha,
            score: None,
        }
    }

    /// Reconstruction error after trial-blending this shape; lower is better
    ///
    /// Computed once per shape configuration, then reused until `mutate`
    /// invalidates it.
    pub fn energy(
        &mut self,
        target: &Bitmap,
        current: &Bitmap,
        buffer: &mut Bitmap,
        last_score: f64,
    ) -> f64 {
        if let Some(score) = self.score {
            return score;
        }
        let score = energy(&self.shape, self.alpha, target, current, buffer, last_score);
        self.score = Some(score);
        score
    }

    /// Perturb the shape in place, returning the pre-mutation state for rollback
    pub fn mutate(&mut self, rng: &mut Rng) -> State {
        let undo = self.clone();
        self.shape.mutate(rng);
        self.score = None;
        undo
    }
}

/// Score one trial without touching the canvas
///
/// Solves the shape's color, rebuilds the touched region of the scratch
/// buffer from `current`, blends the trial there, and recomputes error over
/// just the covered lines.
pub fn energy(
    shape: &Shape,
    alpha: u8,
    target: &Bitmap,
    current: &Bitmap,
    buffer: &mut Bitmap,
    last_score: f64,
) -> f64 {
    let lines = shape.rasterize();
    let color = solve_color(target, current, &lines, alpha);
    copy_scanlines(buffer, current, &lines);
    draw_scanlines(buffer, color, &lines);
    difference_partial(target, current, buffer, last_score, &lines)
}

/// Best of `n` independently sampled random shapes
///
/// Strict `<` comparison: the first candidate wins ties. Callers guarantee
/// `n >= 1` and a non-empty kind set.
pub fn best_random_state(
    kinds: &[ShapeKind],
    alpha: u8,
    n: u32,
    target: &Bitmap,
    current: &Bitmap,
    buffer: &mut Bitmap,
    last_score: f64,
    rng: &mut Rng,
) -> State {
    let (w, h) = (current.width() as i32, current.height() as i32);
    let mut best_state = State::new(Shape::random_of(kinds, w, h, rng), alpha);
    let mut best_energy = best_state.energy(target, current, buffer, last_score);
    for _ in 1..n {
        let mut state = State::new(Shape::random_of(kinds, w, h, rng), alpha);
        let energy = state.energy(target, current, buffer, last_score);
        if energy < best_energy {
            best_energy = energy;
            best_state = state;
        }
    }
    best_state
}

/// Local search from `state`: accept only strictly improving mutations
///
/// Stops after `max_age` consecutive non-improving attempts; `max_age == 0`
/// returns the input unchanged.
pub fn hill_climb(
    state: &State,
    max_age: u32,
    target: &Bitmap,
    current: &Bitmap,
    buffer: &mut Bitmap,
    last_score: f64,
    rng: &mut Rng,
) -> State {
    let mut state = state.clone();
    let mut best_state = state.clone();
    let mut best_energy = state.energy(target, current, buffer, last_score);
    let mut age = 0;
    while age < max_age {
        let undo = state.mutate(rng);
        let energy = state.energy(target, current, buffer, last_score);
        if energy < best_energy {
            best_energy = energy;
            best_state = state.clone();
            age = 0;
        } else {
            state = undo;
            age += 1;
        }
    }
    best_state
}

/// One full search step: sample `n` candidates, then climb from the best
pub fn best_hill_climb_state(
    kinds: &[ShapeKind],
    alpha: u8,
    n: u32,
    max_age: u32,
    target: &Bitmap,
    current: &Bitmap,
    buffer: &mut Bitmap,
    last_score: f64,
    rng: &mut Rng,
) -> State {
    let state = best_random_state(kinds, alpha, n, target, current, buffer, last_score, rng);
    hill_climb(&state, max_age, target, current, buffer, last_score, rng)
}
