//! Least-squares color solving for a candidate shape.

use crate::bitmap::Bitmap;
use crate::color::Color;
use crate::scanline::Scanline;

/// Best blend color for the covered pixels at a fixed alpha
///
/// Blending is affine in the source color, so the per-channel least-squares
/// optimum is the alpha-corrected average of `(target - current) * scale +
/// current * 257` over the coverage. The integer truncation here (floored
/// scale factor, truncating average, arithmetic shift) is deliberate: it
/// keeps solver output bit-for-bit consistent with the compositor's
/// fixed-point blend.
///
/// A shape that covers no pixels gets transparent black at the requested
/// alpha - degenerate geometry is a weak candidate, not an error.
pub fn solve_color(target: &Bitmap, current: &Bitmap, lines: &[Scanline], alpha: u8) -> Color {
    let mut total_red: i64 = 0;
    let mut total_green: i64 = 0;
    let mut total_blue: i64 = 0;
    let mut count: i64 = 0;
    let scale = if alpha == 0 { 0 } else { 65535 / alpha as i64 };

    let width = target.width() as usize;
    let target_pixels = target.pixels();
    let current_pixels = current.pixels();
    for line in lines {
        let row = line.y as usize * width;
        for x in line.x1..=line.x2 {
            let t = target_pixels[row + x as usize];
            let c = current_pixels[row + x as usize];
            let tr = (t >> 24 & 255) as i64;
            let tg = (t >> 16 & 255) as i64;
            let tb = (t >> 8 & 255) as i64;
            let cr = (c >> 24 & 255) as i64;
            let cg = (c >> 16 & 255) as i64;
            let cb = (c >> 8 & 255) as i64;
            total_red += (tr - cr) * scale + cr * 257;
            total_green += (tg - cg) * scale + cg * 257;
            total_blue += (tb - cb) * scale + cb * 257;
            count += 1;
        }
    }

    if count == 0 {
        return Color::rgba(0, 0, 0, alpha as i32);
    }
    Color::rgba(
        ((total_red / count) >> 8) as i32,
        ((total_green / count) >> 8) as i32,
        ((total_blue / count) >> 8) as i32,
        alpha as i32,
    )
}
