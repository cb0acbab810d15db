//! Rasterfx Core — pixel-buffer effects engine.
//!
//! This crate contains the color-space math, histogram and LUT machinery,
//! hue operations, and box convolution that rewrite an 8-bit RGBA buffer in
//! place, plus the snapshot/restore state effects run against. No display
//! or UI dependencies.
//!
//! Every operation is synchronous and rewrites the whole buffer before
//! returning. A buffer must not be mutated from two threads at once;
//! independent buffers (a full-size image and its preview) can be processed
//! in parallel by the caller.

pub mod backend;
pub mod color;
pub mod convolution;
pub mod effect;
pub mod error;
pub mod histogram;
pub mod hue;
pub mod image;
pub mod loader;
pub mod state;
pub mod tone_map;

// Re-exports for convenience.
pub use backend::{EffectBackend, SoftwareBackend};
pub use effect::{Effect, EffectKind};
pub use error::{EffectError, EffectOutcome, KernelError, LoadError, SkipReason};
pub use histogram::{Histogram, HistogramKind, Histograms};
pub use image::{PixelBuffer, Rgba8};
pub use state::BufferState;
pub use tone_map::Lut;
