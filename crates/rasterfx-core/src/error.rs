//! Error taxonomy and non-fatal effect outcomes.
//!
//! Degenerate input (a uniform histogram, an empty buffer, a histogram kind
//! the applier does not handle) is not an error: the effect reports
//! [`EffectOutcome::Skipped`] and leaves the buffer as it was. Malformed
//! kernels are rejected with [`KernelError`] before any pixel is written.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why an effect left the buffer unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The histogram's lowest and highest non-empty bins coincide.
    UniformChannel,
    /// The applier does not handle this histogram kind.
    UnsupportedKind,
    /// There are no pixels to measure.
    EmptyBuffer,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UniformChannel => write!(f, "uniform channel"),
            Self::UnsupportedKind => write!(f, "unsupported histogram kind"),
            Self::EmptyBuffer => write!(f, "empty buffer"),
        }
    }
}

/// Observable result of an effect that may legitimately do nothing.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectOutcome {
    /// The buffer was rewritten.
    Applied,
    /// The buffer was left untouched.
    Skipped(SkipReason),
}

impl EffectOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// A convolution kernel that cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KernelError {
    #[error("kernel has no weights")]
    Empty,
    #[error("kernel is not square: {len} weights for side {side}")]
    NotSquare { side: usize, len: usize },
    #[error("kernel side {side} is even")]
    EvenSide { side: usize },
}

/// Errors raised while obtaining pixels from an image source.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("decoded image has no pixels")]
    EmptyImage,
    #[error("buffer has no source to reload from")]
    NoSource,
}

/// Top-level error for effect dispatch.
#[derive(Debug, thiserror::Error)]
pub enum EffectError {
    #[error("convolution rejected: {0}")]
    Kernel(#[from] KernelError),
    #[error("invalid effect description: {0}")]
    Config(#[from] serde_json::Error),
}
