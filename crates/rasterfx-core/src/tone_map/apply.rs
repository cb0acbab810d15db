//! Applying LUTs to a buffer, per histogram kind.
//!
//! - **Luminance**: remap the HSV value channel, convert back, alpha kept
//! - **GrayNatural**: remap the natural gray scalar and write it to R, G, B
//!   (this desaturates the image)
//! - **Rgb**: remap each channel through its own LUT, no color conversion

use crate::color::{hsv_to_rgb, natural_gray, pixel_to_hsv};
use crate::error::{EffectOutcome, SkipReason};
use crate::histogram::{self, HistogramKind, Histograms, value_bin};
use crate::image::{PixelBuffer, Rgba8};
use crate::tone_map::lut::Lut;

/// Per-channel LUTs for [`HistogramKind::Rgb`]. `None` leaves a channel as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RgbLuts {
    pub red: Option<Lut>,
    pub green: Option<Lut>,
    pub blue: Option<Lut>,
}

impl RgbLuts {
    fn is_empty(&self) -> bool {
        self.red.is_none() && self.green.is_none() && self.blue.is_none()
    }
}

/// Apply a single LUT according to `kind`.
///
/// [`HistogramKind::Rgb`] needs three tables; passing it here is a no-op
/// reported as [`SkipReason::UnsupportedKind`].
pub fn apply_lut(buffer: &mut PixelBuffer, kind: HistogramKind, lut: &Lut) -> EffectOutcome {
    match kind {
        HistogramKind::Luminance => {
            buffer.map_in_place(|px| {
                let mut hsv = pixel_to_hsv(px);
                hsv.v = lut.map(value_bin(px)) as f32 / 255.0;
                hsv_to_rgb(hsv, px.a)
            });
            EffectOutcome::Applied
        }
        HistogramKind::GrayNatural => {
            buffer.map_in_place(|px| Rgba8::gray(lut.map(natural_gray(px)), px.a));
            EffectOutcome::Applied
        }
        HistogramKind::Rgb => {
            tracing::debug!("single LUT cannot be applied to an RGB histogram kind");
            EffectOutcome::Skipped(SkipReason::UnsupportedKind)
        }
    }
}

/// Remap R, G and B independently.
pub fn apply_rgb_luts(buffer: &mut PixelBuffer, luts: &RgbLuts) -> EffectOutcome {
    if luts.is_empty() {
        return EffectOutcome::Skipped(SkipReason::UniformChannel);
    }
    let remap = |lut: &Option<Lut>, value: u8| lut.as_ref().map_or(value, |l| l.map(value));
    buffer.map_in_place(|px| {
        Rgba8::new(
            remap(&luts.red, px.r),
            remap(&luts.green, px.g),
            remap(&luts.blue, px.b),
            px.a,
        )
    });
    EffectOutcome::Applied
}

/// Measure `kind` on the buffer and stretch it to the full `[0, 255]` range.
///
/// Uniform channels are skipped. For RGB the stretch is applied to every
/// channel that is not uniform.
pub fn linear_stretch(buffer: &mut PixelBuffer, kind: HistogramKind) -> EffectOutcome {
    remap_with(buffer, kind, "linear stretch", Lut::linear_stretch)
}

/// Measure `kind` on the buffer and flatten its distribution.
pub fn equalize(buffer: &mut PixelBuffer, kind: HistogramKind) -> EffectOutcome {
    remap_with(buffer, kind, "equalize", Lut::flatten)
}

fn remap_with(
    buffer: &mut PixelBuffer,
    kind: HistogramKind,
    op: &str,
    build: impl Fn(&histogram::Histogram) -> Option<Lut>,
) -> EffectOutcome {
    if buffer.is_empty() {
        return EffectOutcome::Skipped(SkipReason::EmptyBuffer);
    }

    let outcome = match histogram::compute(buffer, kind) {
        Histograms::Luminance(h) | Histograms::GrayNatural(h) => match build(&h) {
            Some(lut) => apply_lut(buffer, kind, &lut),
            None => EffectOutcome::Skipped(SkipReason::UniformChannel),
        },
        Histograms::Rgb { red, green, blue } => {
            let luts = RgbLuts {
                red: build(&red),
                green: build(&green),
                blue: build(&blue),
            };
            apply_rgb_luts(buffer, &luts)
        }
    };

    if let EffectOutcome::Skipped(reason) = outcome {
        tracing::debug!("{op} ({kind}) skipped: {reason}");
    }
    outcome
}
