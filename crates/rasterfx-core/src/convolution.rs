//! Square-kernel spatial filtering.
//!
//! Pixels closer than half a kernel side to any edge are not computed from
//! neighbours: their R, G, B become 0 and alpha is kept. Interior pixels get
//! the weighted sum of their neighbourhood per channel, truncated and clamped
//! into `[0, 255]`. Alpha is never convolved.
//!
//! # Complexity
//! O(width × height × side²)

use serde::{Deserialize, Serialize};

use crate::error::KernelError;
use crate::image::{PixelBuffer, Rgba8, clamp_channel};

/// Square convolution kernel, row-major weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kernel {
    side: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Build a kernel from `side × side` row-major weights.
    ///
    /// The side must be odd and `weights.len()` must equal `side²`.
    pub fn new(side: usize, weights: Vec<f64>) -> Result<Self, KernelError> {
        let kernel = Self { side, weights };
        kernel.validate()?;
        Ok(kernel)
    }

    /// Uniform box filter of the given side, every weight `1 / side²`.
    ///
    /// An even side is lowered by one; anything below 1 becomes 1.
    pub fn box_filter(intensity: usize) -> Self {
        let side = if intensity % 2 == 0 {
            intensity.saturating_sub(1)
        } else {
            intensity
        }
        .max(1);
        let weight = 1.0 / (side * side) as f64;
        Self {
            side,
            weights: vec![weight; side * side],
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Distance from the center to the kernel edge.
    pub fn radius(&self) -> usize {
        self.side / 2
    }

    fn validate(&self) -> Result<(), KernelError> {
        if self.side == 0 || self.weights.is_empty() {
            return Err(KernelError::Empty);
        }
        if self.weights.len() != self.side * self.side {
            return Err(KernelError::NotSquare {
                side: self.side,
                len: self.weights.len(),
            });
        }
        if self.side % 2 == 0 {
            return Err(KernelError::EvenSide { side: self.side });
        }
        Ok(())
    }
}

/// Convolve the buffer with `kernel` in place.
///
/// A malformed kernel (deserialized or built by hand) is rejected and logged
/// and the buffer is left as it was.
pub fn convolute(buffer: &mut PixelBuffer, kernel: &Kernel) -> Result<(), KernelError> {
    if let Err(e) = kernel.validate() {
        tracing::warn!("convolution rejected: {e}");
        return Err(e);
    }
    filter(buffer, kernel);
    Ok(())
}

/// Weighted-sum pass for a kernel that is already known to be well formed.
fn filter(buffer: &mut PixelBuffer, kernel: &Kernel) {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let radius = kernel.radius();
    let src = buffer.pixels().to_vec();
    let out = buffer.pixels_mut();

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let alpha = src[idx].a;
            let on_border = x < radius || y < radius || x + radius >= width || y + radius >= height;
            if on_border {
                out[idx] = Rgba8::new(0, 0, 0, alpha);
                continue;
            }

            let mut acc = [0.0_f64; 3];
            for ky in 0..kernel.side {
                let row = (y + ky - radius) * width;
                for kx in 0..kernel.side {
                    let w = kernel.weights[ky * kernel.side + kx];
                    let px = src[row + x + kx - radius];
                    acc[0] += w * px.r as f64;
                    acc[1] += w * px.g as f64;
                    acc[2] += w * px.b as f64;
                }
            }
            out[idx] = Rgba8::new(
                clamp_channel(acc[0] + ROUNDING_SLACK),
                clamp_channel(acc[1] + ROUNDING_SLACK),
                clamp_channel(acc[2] + ROUNDING_SLACK),
                alpha,
            );
        }
    }
}

/// Added before truncation so `n × (1/n) × v` sums land on `v`, not `v − ε`.
const ROUNDING_SLACK: f64 = 1e-9;

/// Box blur with a square kernel of side `intensity` (forced odd, at least 1).
pub fn box_blur(buffer: &mut PixelBuffer, intensity: usize) {
    filter(buffer, &Kernel::box_filter(intensity));
}
