//! Histogram-driven tone mapping — LUT construction and application.

pub mod apply;
pub mod lut;

pub use apply::{RgbLuts, apply_lut, apply_rgb_luts, equalize, linear_stretch};
pub use lut::Lut;
