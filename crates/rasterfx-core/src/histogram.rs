//! Per-channel frequency tables over a pixel buffer.
//!
//! Three measurement kinds are supported:
//! - **Luminance**: bucket = `floor(v × 255)` of the HSV value channel
//! - **GrayNatural**: bucket = [`natural_gray`] of the pixel
//! - **Rgb**: one independent histogram per R, G, B channel
//!
//! Computing a histogram never touches the buffer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::{natural_gray, pixel_to_hsv};
use crate::image::{PixelBuffer, Rgba8};

/// Number of bins in every histogram.
pub const BINS: usize = 256;

/// What a histogram measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistogramKind {
    /// HSV value channel.
    Luminance,
    /// Weighted gray scalar, see [`natural_gray`].
    GrayNatural,
    /// Red, green and blue measured independently.
    Rgb,
}

impl HistogramKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Luminance => "luminance",
            Self::GrayNatural => "gray natural",
            Self::Rgb => "rgb",
        }
    }
}

impl fmt::Display for HistogramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 256 ordered bin counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct Histogram {
    counts: Vec<u32>,
}

impl Histogram {
    /// All-zero histogram.
    pub fn new() -> Self {
        Self {
            counts: vec![0; BINS],
        }
    }

    /// Histogram from explicit counts.
    pub fn from_counts(counts: [u32; BINS]) -> Self {
        Self {
            counts: counts.to_vec(),
        }
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Count in bin `index` (0 when out of range).
    pub fn get(&self, index: usize) -> u32 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// Sum of all bins.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Lowest and highest non-empty bin, or `None` if every bin is zero.
    pub fn min_max(&self) -> Option<(usize, usize)> {
        let min = self.counts.iter().position(|&c| c != 0)?;
        let max = self.counts.iter().rposition(|&c| c != 0)?;
        Some((min, max))
    }

    /// Highest single bin count.
    pub fn peak(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    fn increment(&mut self, bin: u8) {
        self.counts[bin as usize] += 1;
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<u32>> for Histogram {
    type Error = String;

    fn try_from(counts: Vec<u32>) -> Result<Self, Self::Error> {
        if counts.len() != BINS {
            return Err(format!("histogram needs {BINS} bins, got {}", counts.len()));
        }
        Ok(Self { counts })
    }
}

impl From<Histogram> for Vec<u32> {
    fn from(h: Histogram) -> Self {
        h.counts
    }
}

/// Result of [`compute`]: one histogram, or three for [`HistogramKind::Rgb`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Histograms {
    Luminance(Histogram),
    GrayNatural(Histogram),
    Rgb {
        red: Histogram,
        green: Histogram,
        blue: Histogram,
    },
}

impl Histograms {
    pub fn kind(&self) -> HistogramKind {
        match self {
            Self::Luminance(_) => HistogramKind::Luminance,
            Self::GrayNatural(_) => HistogramKind::GrayNatural,
            Self::Rgb { .. } => HistogramKind::Rgb,
        }
    }

    /// The histograms in order (one entry, or R, G, B).
    pub fn channels(&self) -> Vec<&Histogram> {
        match self {
            Self::Luminance(h) | Self::GrayNatural(h) => vec![h],
            Self::Rgb { red, green, blue } => vec![red, green, blue],
        }
    }
}

/// HSV value bucket of a pixel: `floor(v × 255)`.
pub(crate) fn value_bin(px: Rgba8) -> u8 {
    let v = pixel_to_hsv(px).v;
    (v * 255.0).floor().clamp(0.0, 255.0) as u8
}

/// Compute the histogram(s) of `kind` over `buffer`.
pub fn compute(buffer: &PixelBuffer, kind: HistogramKind) -> Histograms {
    match kind {
        HistogramKind::Luminance => {
            let mut h = Histogram::new();
            for &px in buffer.pixels() {
                h.increment(value_bin(px));
            }
            Histograms::Luminance(h)
        }
        HistogramKind::GrayNatural => {
            let mut h = Histogram::new();
            for &px in buffer.pixels() {
                h.increment(natural_gray(px));
            }
            Histograms::GrayNatural(h)
        }
        HistogramKind::Rgb => {
            let mut red = Histogram::new();
            let mut green = Histogram::new();
            let mut blue = Histogram::new();
            for &px in buffer.pixels() {
                red.increment(px.r);
                green.increment(px.g);
                blue.increment(px.b);
            }
            Histograms::Rgb { red, green, blue }
        }
    }
}

/// Dump a histogram at debug level as comma-separated counts plus its total.
pub fn log_histogram(name: &str, histogram: &Histogram) {
    let joined = histogram
        .counts()
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",");
    tracing::debug!("{name}: {joined}");
    tracing::debug!("{name}: total pixels {}", histogram.total());
}
