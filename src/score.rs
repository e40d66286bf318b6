//! Reconstruction error scoring: whole-image and incremental.

use crate::bitmap::Bitmap;
use crate::error::Error;
use crate::scanline::Scanline;

/// Sum of squared channel differences for one pixel pair
#[inline]
fn pixel_error(a: u32, b: u32) -> i64 {
    let dr = (a >> 24 & 255) as i64 - (b >> 24 & 255) as i64;
    let dg = (a >> 16 & 255) as i64 - (b >> 16 & 255) as i64;
    let db = (a >> 8 & 255) as i64 - (b >> 8 & 255) as i64;
    let da = (a & 255) as i64 - (b & 255) as i64;
    dr * dr + dg * dg + db * db + da * da
}

/// Normalized RMSE over every pixel of two equally sized bitmaps, in [0, 1]
pub fn difference_full(first: &Bitmap, second: &Bitmap) -> Result<f64, Error> {
    if first.width() != second.width() || first.height() != second.height() {
        return Err(Error::SizeMismatch {
            expected_width: second.width(),
            expected_height: second.height(),
            actual_width: first.width(),
            actual_height: first.height(),
        });
    }
    let mut total: i64 = 0;
    for (&f, &s) in first.pixels().iter().zip(second.pixels()) {
        total += pixel_error(f, s);
    }
    let rgba_count = (first.width() * first.height() * 4) as f64;
    Ok((total as f64 / rgba_count).sqrt() / 255.0)
}

/// Updated RMSE after replacing `before` with `after` on the covered lines
///
/// Reconstructs the total squared error implied by `prior_score`, swaps out
/// the contribution of the touched pixels, and re-normalizes. Trial cost is
/// proportional to shape area instead of image area, which is what makes the
/// per-step search affordable. `before` must be the bitmap `prior_score` was
/// computed against, and `lines` must cover every pixel that differs.
pub fn difference_partial(
    target: &Bitmap,
    before: &Bitmap,
    after: &Bitmap,
    prior_score: f64,
    lines: &[Scanline],
) -> f64 {
    let rgba_count = (target.width() * target.height() * 4) as f64;
    // The true total is a sum of integer squared differences; rounding undoes
    // the rounding picked up across the prior sqrt/normalize round-trip.
    let mut total = (prior_score * prior_score * 255.0 * 255.0 * rgba_count).round();
    let width = target.width() as usize;
    let target_pixels = target.pixels();
    let before_pixels = before.pixels();
    let after_pixels = after.pixels();
    for line in lines {
        let row = line.y as usize * width;
        for x in line.x1..=line.x2 {
            let idx = row + x as usize;
            let t = target_pixels[idx];
            total -= pixel_error(t, before_pixels[idx]) as f64;
            total += pixel_error(t, after_pixels[idx]) as f64;
        }
    }
    (total / rgba_count).sqrt() / 255.0
}
