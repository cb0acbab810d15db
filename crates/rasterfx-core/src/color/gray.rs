//! Weighted gray-level conversion.
//!
//! The weight named `green` multiplies the **blue** channel and the weight
//! named `blue` multiplies the **green** channel. This binding is kept as-is
//! so results match existing gray-level output; callers wanting the
//! conventional mapping swap the two weights themselves.

use serde::{Deserialize, Serialize};

use crate::image::{PixelBuffer, Rgba8, clamp_channel};

/// Per-channel proportions for [`gray_level`]. Each is clamped into `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrayWeights {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl GrayWeights {
    /// 0.3 / 0.59 / 0.11, the weights behind the natural gray histogram.
    pub const NATURAL: Self = Self {
        red: 0.3,
        green: 0.59,
        blue: 0.11,
    };

    /// Copy with every weight clamped into `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self {
            red: clamp_unit(self.red),
            green: clamp_unit(self.green),
            blue: clamp_unit(self.blue),
        }
    }

    /// Gray scalar of one pixel, truncated and clamped into `[0, 255]`.
    pub fn gray_of(&self, px: Rgba8) -> u8 {
        let gray = self.red * px.r as f64 + self.green * px.b as f64 + self.blue * px.g as f64;
        clamp_channel(gray.floor())
    }
}

impl Default for GrayWeights {
    fn default() -> Self {
        Self::NATURAL
    }
}

fn clamp_unit(w: f64) -> f64 {
    if w.is_nan() { 0.0 } else { w.clamp(0.0, 1.0) }
}

/// Natural gray scalar: `floor(0.3 R + 0.59 B + 0.11 G)`.
pub fn natural_gray(px: Rgba8) -> u8 {
    GrayWeights::NATURAL.gray_of(px)
}

/// Replace every pixel with its weighted gray level, alpha unchanged.
pub fn gray_level(buffer: &mut PixelBuffer, weights: GrayWeights) {
    let weights = weights.clamped();
    buffer.map_in_place(|px| Rgba8::gray(weights.gray_of(px), px.a));
}
