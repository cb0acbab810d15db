//! Serializable effect descriptions.
//!
//! `Effect` is the single description of "what to do to the buffer": UIs
//! build one from their controls, persist it as JSON, and hand it to
//! [`Effect::apply`] or to a backend.

use serde::{Deserialize, Serialize};

use crate::color::{GrayWeights, gray_level};
use crate::convolution::{Kernel, box_blur, convolute};
use crate::error::{EffectError, EffectOutcome};
use crate::histogram::HistogramKind;
use crate::hue::{colorize, hue_shift, keep_color};
use crate::image::PixelBuffer;
use crate::tone_map::{equalize, linear_stretch};

/// Effect family, without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Gray,
    Hue,
    HueShift,
    KeepColor,
    LinearExtension,
    Flattening,
    Blur,
    Convolve,
}

impl EffectKind {
    /// Human-readable label for menus and logs.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Gray => "Gray level",
            Self::Hue => "Colorize",
            Self::HueShift => "Hue shift",
            Self::KeepColor => "Keep color",
            Self::LinearExtension => "Linear extension",
            Self::Flattening => "Histogram flattening",
            Self::Blur => "Box blur",
            Self::Convolve => "Convolution",
        }
    }

    pub fn all() -> &'static [Self] {
        const ALL: [EffectKind; 8] = [
            EffectKind::Gray,
            EffectKind::Hue,
            EffectKind::HueShift,
            EffectKind::KeepColor,
            EffectKind::LinearExtension,
            EffectKind::Flattening,
            EffectKind::Blur,
            EffectKind::Convolve,
        ];
        &ALL
    }
}

/// One fully parameterized effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    Gray {
        #[serde(default)]
        weights: GrayWeights,
    },
    Colorize {
        hue: f32,
    },
    HueShift {
        delta: f32,
    },
    KeepColor {
        hue: f32,
        tolerance: f32,
    },
    LinearStretch {
        kind: HistogramKind,
    },
    Equalize {
        kind: HistogramKind,
    },
    BoxBlur {
        intensity: usize,
    },
    Convolve {
        kernel: Kernel,
    },
}

impl Effect {
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::Gray { .. } => EffectKind::Gray,
            Self::Colorize { .. } => EffectKind::Hue,
            Self::HueShift { .. } => EffectKind::HueShift,
            Self::KeepColor { .. } => EffectKind::KeepColor,
            Self::LinearStretch { .. } => EffectKind::LinearExtension,
            Self::Equalize { .. } => EffectKind::Flattening,
            Self::BoxBlur { .. } => EffectKind::Blur,
            Self::Convolve { .. } => EffectKind::Convolve,
        }
    }

    /// Run this effect on `buffer` with the software implementation.
    ///
    /// A malformed [`Effect::Convolve`] kernel fails with
    /// [`EffectError::Kernel`] and leaves the buffer untouched.
    pub fn apply(&self, buffer: &mut PixelBuffer) -> Result<EffectOutcome, EffectError> {
        tracing::debug!(
            "applying {} to {}x{}",
            self.kind().label(),
            buffer.width(),
            buffer.height()
        );
        match self {
            Self::Gray { weights } => gray_level(buffer, *weights),
            Self::Colorize { hue } => colorize(buffer, *hue),
            Self::HueShift { delta } => hue_shift(buffer, *delta),
            Self::KeepColor { hue, tolerance } => keep_color(buffer, *hue, *tolerance),
            Self::LinearStretch { kind } => return Ok(linear_stretch(buffer, *kind)),
            Self::Equalize { kind } => return Ok(equalize(buffer, *kind)),
            Self::BoxBlur { intensity } => box_blur(buffer, *intensity),
            Self::Convolve { kernel } => convolute(buffer, kernel)?,
        }
        Ok(EffectOutcome::Applied)
    }

    /// Parse an effect from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, EffectError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, EffectError> {
        Ok(serde_json::to_string(self)?)
    }
}
