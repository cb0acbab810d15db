//! RGB ↔ HSV conversion on 8-bit channels.
//!
//! # Algorithm
//! `rgb_to_hsv` picks the hue formula from whichever channel is the maximum
//! (60° sectors). `hsv_to_rgb` walks the HSV hexagon:
//! ```text
//! t = trunc((h / 60) % 6)
//! C = s × v
//! X = C × (1 − |((h / 60) % 2) − 1|)
//! m = v − C
//! ```
//! and assigns `(C, X, 0)` permutations per sector before adding `m`.
//!
//! Both `%` are truncating remainders that keep the sign of `h`. Hues of 360
//! and above wrap into the matching sector. A negative hue (for example
//! after [`crate::hue::hue_shift`] with a negative delta) gives a sector
//! index below 0, which matches no sector: the pixel becomes the gray `m`.
//! Hues in `(-60, 0)` still use sector 0 with a negative `X`, which the
//! channel clamp absorbs.

use serde::{Deserialize, Serialize};

use crate::image::Rgba8;

/// Transient per-pixel HSV value.
///
/// `h` in degrees, `s` and `v` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

/// Convert 8-bit RGB to HSV. Hue lands in `[0, 360)`.
pub fn rgb_to_hsv(red: u8, green: u8, blue: u8) -> Hsv {
    let r = red as f32 / 255.0;
    let g = green as f32 / 255.0;
    let b = blue as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        let h = 60.0 * ((g - b) / delta) + 360.0;
        if h >= 360.0 { h - 360.0 } else { h }
    } else if max == g {
        60.0 * ((b - r) / delta) + 120.0
    } else {
        60.0 * ((r - g) / delta) + 240.0
    };

    let s = if max == 0.0 { 0.0 } else { 1.0 - min / max };

    Hsv { h, s, v: max }
}

/// Convert HSV back to a packed pixel, passing `alpha` through.
///
/// Channels are rounded and clamped into `[0, 255]`.
pub fn hsv_to_rgb(hsv: Hsv, alpha: u8) -> Rgba8 {
    let sector_pos = hsv.h / 60.0;
    let t = (sector_pos % 6.0) as i32;
    let c = hsv.s * hsv.v;
    let x = c * (1.0 - ((sector_pos % 2.0) - 1.0).abs());
    let m = hsv.v - c;

    let (r, g, b) = match t {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        5 => (c, 0.0, x),
        _ => (0.0, 0.0, 0.0),
    };

    Rgba8::new(to_channel(r + m), to_channel(g + m), to_channel(b + m), alpha)
}

/// Convenience: HSV of a packed pixel (alpha ignored).
pub fn pixel_to_hsv(px: Rgba8) -> Hsv {
    rgb_to_hsv(px.r, px.g, px.b)
}

fn to_channel(unit: f32) -> u8 {
    let scaled = (unit * 255.0).round();
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, 255.0) as u8
}
