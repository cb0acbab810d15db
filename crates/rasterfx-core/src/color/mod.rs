//! Color math: HSV conversion and gray-level reduction.

pub mod gray;
pub mod hsv;

pub use gray::{GrayWeights, gray_level, natural_gray};
pub use hsv::{Hsv, hsv_to_rgb, pixel_to_hsv, rgb_to_hsv};
