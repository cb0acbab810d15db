//! 1D lookup tables derived from a histogram.
//!
//! # Algorithm
//! - **Linear stretch**: with `min`/`max` the lowest/highest non-empty bins,
//!   `LUT[i] = floor(255 × (i − min) / (max − min))`.
//! - **Flatten** (equalization): with `cumu[i] = Σ_{j≤i} hist[j]` and
//!   `N = Σ hist`, `LUT[i] = floor(cumu[i] × 255 / N)`.
//!
//! Entries are clamped into `[0, 255]`; bins outside `[min, max]` never
//! occur in the measured buffer, so clamping them is invisible.

use serde::{Deserialize, Serialize};

use crate::histogram::{BINS, Histogram};

/// 256-entry remap table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Lut {
    entries: Vec<u8>,
}

impl Lut {
    /// `LUT[i] = i`.
    pub fn identity() -> Self {
        Self {
            entries: (0..BINS).map(|i| i as u8).collect(),
        }
    }

    /// Build from explicit entries.
    pub fn from_entries(entries: [u8; BINS]) -> Self {
        Self {
            entries: entries.to_vec(),
        }
    }

    /// Linear stretch of `histogram`.
    ///
    /// Returns `None` for a uniform (`min == max`) or empty histogram; the
    /// caller skips that channel.
    pub fn linear_stretch(histogram: &Histogram) -> Option<Self> {
        let (min, max) = histogram.min_max()?;
        if min == max {
            return None;
        }
        let (min, span) = (min as i64, (max - min) as i64);
        let entries = (0..BINS as i64)
            .map(|i| (255 * (i - min) / span).clamp(0, 255) as u8)
            .collect();
        Some(Self { entries })
    }

    /// Cumulative-distribution flattening of `histogram`.
    ///
    /// Returns `None` when the histogram is empty (`N == 0`).
    pub fn flatten(histogram: &Histogram) -> Option<Self> {
        let total = histogram.total();
        if total == 0 {
            return None;
        }
        let mut cumu = 0_u64;
        let entries = histogram
            .counts()
            .iter()
            .map(|&count| {
                cumu += count as u64;
                (cumu * 255 / total).min(255) as u8
            })
            .collect();
        Some(Self { entries })
    }

    /// Remap one 8-bit value.
    pub fn map(&self, value: u8) -> u8 {
        self.entries[value as usize]
    }

    pub fn entries(&self) -> &[u8] {
        &self.entries
    }
}

impl Default for Lut {
    fn default() -> Self {
        Self::identity()
    }
}

impl TryFrom<Vec<u8>> for Lut {
    type Error = String;

    fn try_from(entries: Vec<u8>) -> Result<Self, Self::Error> {
        if entries.len() != BINS {
            return Err(format!("LUT needs {BINS} entries, got {}", entries.len()));
        }
        Ok(Self { entries })
    }
}

impl From<Lut> for Vec<u8> {
    fn from(lut: Lut) -> Self {
        lut.entries
    }
}
