//! Execution backends for the per-pixel effects.
//!
//! A backend runs the per-pixel operation set on a caller-owned buffer.
//! Backends are interchangeable: picking one is a dispatch decision made by
//! the caller, and every backend must produce the same pixels as
//! [`SoftwareBackend`]. Backends keep no scratch state between calls.

use crate::color::{self, GrayWeights};
use crate::effect::Effect;
use crate::error::{EffectError, EffectOutcome};
use crate::hue;
use crate::image::PixelBuffer;

/// The operation set an alternate execution path must provide.
pub trait EffectBackend {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    fn gray_level(&self, buffer: &mut PixelBuffer, weights: GrayWeights);

    fn colorize(&self, buffer: &mut PixelBuffer, hue: f32);

    fn hue_shift(&self, buffer: &mut PixelBuffer, delta: f32);

    fn keep_color(&self, buffer: &mut PixelBuffer, hue: f32, tolerance: f32);

    /// Run `effect`, routing the per-pixel effects through this backend and
    /// everything else through the software path.
    fn run(&self, effect: &Effect, buffer: &mut PixelBuffer) -> Result<EffectOutcome, EffectError> {
        match effect {
            Effect::Gray { weights } => self.gray_level(buffer, *weights),
            Effect::Colorize { hue } => self.colorize(buffer, *hue),
            Effect::HueShift { delta } => self.hue_shift(buffer, *delta),
            Effect::KeepColor { hue, tolerance } => self.keep_color(buffer, *hue, *tolerance),
            _ => return effect.apply(buffer),
        }
        tracing::debug!("{} ran {}", self.name(), effect.kind().label());
        Ok(EffectOutcome::Applied)
    }
}

/// Plain CPU implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareBackend;

impl EffectBackend for SoftwareBackend {
    fn name(&self) -> &'static str {
        "software"
    }

    fn gray_level(&self, buffer: &mut PixelBuffer, weights: GrayWeights) {
        color::gray_level(buffer, weights);
    }

    fn colorize(&self, buffer: &mut PixelBuffer, hue: f32) {
        hue::colorize(buffer, hue);
    }

    fn hue_shift(&self, buffer: &mut PixelBuffer, delta: f32) {
        hue::hue_shift(buffer, delta);
    }

    fn keep_color(&self, buffer: &mut PixelBuffer, hue: f32, tolerance: f32) {
        hue::keep_color(buffer, hue, tolerance);
    }
}
