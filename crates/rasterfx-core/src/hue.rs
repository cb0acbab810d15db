//! Whole-buffer hue operations: replace, shift, and selective color.
//!
//! Every pixel goes RGB → HSV → RGB. Alpha is always passed through.

use crate::color::{Hsv, hsv_to_rgb, pixel_to_hsv};
use crate::image::PixelBuffer;

/// Replace every pixel's hue with `hue` degrees, keeping saturation and value.
pub fn colorize(buffer: &mut PixelBuffer, hue: f32) {
    remap_hsv(buffer, |hsv| Hsv { h: hue, ..hsv });
}

/// Rotate every pixel's hue by `delta` degrees.
///
/// The shifted hue is not normalized. Results of 360 and above wrap in
/// [`hsv_to_rgb`]; results below -60 fall outside every sector and turn
/// the pixel gray at `v − s·v` (black for fully saturated colors).
pub fn hue_shift(buffer: &mut PixelBuffer, delta: f32) {
    remap_hsv(buffer, |hsv| Hsv {
        h: hsv.h + delta,
        ..hsv
    });
}

/// Keep colors whose hue is within `tolerance` degrees of `target_hue` and
/// desaturate everything else to gray (value kept).
///
/// `target_hue` is taken modulo 360 and `tolerance` modulo 180.
pub fn keep_color(buffer: &mut PixelBuffer, target_hue: f32, tolerance: f32) {
    let target = target_hue % 360.0;
    let tolerance = tolerance % 180.0;
    remap_hsv(buffer, |hsv| {
        if hue_distance(hsv.h, target) <= tolerance {
            hsv
        } else {
            Hsv { s: 0.0, ..hsv }
        }
    });
}

/// Circular distance between two hues, in degrees.
pub fn hue_distance(a: f32, b: f32) -> f32 {
    let diff = (a - b).abs();
    diff.min(360.0 - diff)
}

fn remap_hsv(buffer: &mut PixelBuffer, f: impl Fn(Hsv) -> Hsv) {
    buffer.map_in_place(|px| hsv_to_rgb(f(pixel_to_hsv(px)), px.a));
}
