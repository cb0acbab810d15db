//! Behavioural properties of the effects engine, exercised through the
//! public API.
//!
//! Run with: `cargo test -p rasterfx-core`

use rasterfx_core::color::{GrayWeights, Hsv, gray_level, hsv_to_rgb, pixel_to_hsv, rgb_to_hsv};
use rasterfx_core::convolution::{Kernel, box_blur, convolute};
use rasterfx_core::histogram::{self, BINS, Histogram, HistogramKind};
use rasterfx_core::hue::{hue_shift, keep_color};
use rasterfx_core::tone_map::Lut;
use rasterfx_core::{Effect, EffectError, PixelBuffer, Rgba8};

/// Deterministic pseudo-random buffer (xorshift), so failures reproduce.
fn noise_buffer(width: u32, height: u32, seed: u32) -> PixelBuffer {
    let mut state = seed.max(1);
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };
    let pixels = (0..width * height)
        .map(|_| {
            let v = next();
            Rgba8::new(v as u8, (v >> 8) as u8, (v >> 16) as u8, (v >> 24) as u8)
        })
        .collect();
    PixelBuffer::from_pixels(width, height, pixels).expect("sized")
}

#[test]
fn test_gray_level_equalizes_channels_for_any_weights() {
    let steps = [0.0, 0.25, 0.5, 0.9, 1.0, 1.7];
    for (seed, &red) in steps.iter().enumerate() {
        for &green in &steps {
            for &blue in &steps {
                let original = noise_buffer(7, 5, seed as u32 + 1);
                let mut buffer = original.clone();
                gray_level(&mut buffer, GrayWeights { red, green, blue });
                for (before, after) in original.pixels().iter().zip(buffer.pixels()) {
                    assert_eq!(after.r, after.g);
                    assert_eq!(after.g, after.b);
                    assert_eq!(after.a, before.a);
                }
            }
        }
    }
}

#[test]
fn test_hsv_roundtrip_keeps_alpha_and_is_within_one() {
    let buffer = noise_buffer(64, 64, 0xC0FFEE);
    for &px in buffer.pixels() {
        let back = hsv_to_rgb(pixel_to_hsv(px), px.a);
        assert_eq!(back.a, px.a);
        for (a, b) in px.rgb().into_iter().zip(back.rgb()) {
            assert!((a as i16 - b as i16).abs() <= 1, "{px:?} -> {back:?}");
        }
    }
}

#[test]
fn test_histograms_sum_to_pixel_count() {
    let buffer = noise_buffer(13, 11, 99);
    let expected = 13 * 11;
    for kind in [
        HistogramKind::Luminance,
        HistogramKind::GrayNatural,
        HistogramKind::Rgb,
    ] {
        let histograms = histogram::compute(&buffer, kind);
        assert_eq!(histograms.kind(), kind);
        let channels = histograms.channels();
        assert_eq!(channels.len(), if kind == HistogramKind::Rgb { 3 } else { 1 });
        for h in channels {
            assert_eq!(h.total(), expected);
        }
    }
}

#[test]
fn test_gray_natural_scenario_has_four_single_buckets() {
    let buffer = PixelBuffer::from_pixels(
        2,
        2,
        vec![
            Rgba8::new(255, 0, 0, 255),
            Rgba8::new(0, 255, 0, 255),
            Rgba8::new(0, 0, 255, 255),
            Rgba8::new(255, 255, 255, 255),
        ],
    )
    .expect("2x2");
    let histograms = histogram::compute(&buffer, HistogramKind::GrayNatural);
    let h = histograms.channels()[0];
    for bin in [76, 150, 28, 255] {
        assert_eq!(h.get(bin), 1, "bin {bin}");
    }
    assert_eq!(h.counts().iter().filter(|&&c| c != 0).count(), 4);
}

#[test]
fn test_linear_stretch_pins_extremes() {
    for (m, big_m) in [(0, 1), (3, 250), (100, 101), (17, 255)] {
        let mut counts = [0u32; BINS];
        counts[m] = 4;
        counts[big_m] = 9;
        if big_m - m > 2 {
            counts[(m + big_m) / 2] = 1;
        }
        let lut = Lut::linear_stretch(&Histogram::from_counts(counts)).expect("distinct");
        assert_eq!(lut.map(m as u8), 0);
        assert_eq!(lut.map(big_m as u8), 255);
    }
}

#[test]
fn test_flatten_is_non_decreasing_and_saturates() {
    let buffer = noise_buffer(20, 20, 7);
    let histograms = histogram::compute(&buffer, HistogramKind::Rgb);
    for h in histograms.channels() {
        let lut = Lut::flatten(h).expect("non-empty");
        assert!(lut.entries().windows(2).all(|w| w[0] <= w[1]));
        let (_, max) = h.min_max().expect("non-empty");
        assert_eq!(lut.map(max as u8), 255);
        assert_eq!(lut.map(255), 255);
    }
}

#[test]
fn test_box_blur_border_ring_goes_black_and_interior_averages() {
    let mut buffer = PixelBuffer::new(5, 5, Rgba8::default());
    for y in 0..5 {
        for x in 0..5 {
            let v = (y * 5 + x) as u8;
            buffer.set(x, y, Rgba8::new(v * 10, v * 3, 255 - v, 100 + v));
        }
    }
    let source = buffer.clone();
    box_blur(&mut buffer, 3);

    for y in 0..5u32 {
        for x in 0..5u32 {
            let src = source.get(x, y).expect("in bounds");
            let got = buffer.get(x, y).expect("in bounds");
            assert_eq!(got.a, src.a);
            if x == 0 || y == 0 || x == 4 || y == 4 {
                assert_eq!(got, Rgba8::new(0, 0, 0, src.a), "border ({x},{y})");
                continue;
            }
            let mut sum = [0u32; 3];
            for ny in y - 1..=y + 1 {
                for nx in x - 1..=x + 1 {
                    let n = source.get(nx, ny).expect("in bounds");
                    sum[0] += n.r as u32;
                    sum[1] += n.g as u32;
                    sum[2] += n.b as u32;
                }
            }
            let expected = Rgba8::new((sum[0] / 9) as u8, (sum[1] / 9) as u8, (sum[2] / 9) as u8, src.a);
            assert_eq!(got, expected, "interior ({x},{y})");
        }
    }
}

#[test]
fn test_even_kernel_rejected_without_writing() {
    let mut buffer = noise_buffer(6, 6, 3);
    let before = buffer.clone();
    assert!(Kernel::new(4, vec![1.0 / 16.0; 16]).is_err());
    let bad: Kernel = serde_json::from_str(r#"{"side":3,"weights":[1.0,1.0]}"#).expect("json");
    assert!(convolute(&mut buffer, &bad).is_err());
    assert_eq!(buffer, before);

    let err = Effect::Convolve { kernel: bad }.apply(&mut buffer).unwrap_err();
    assert!(matches!(err, EffectError::Kernel(_)));
    assert_eq!(buffer, before);
}

#[test]
fn test_hue_shift_sector_math_outside_zero_to_360() {
    let red = Rgba8::new(255, 0, 0, 200);
    for (delta, expected) in [
        (360.0, Rgba8::new(255, 0, 0, 200)),
        (480.0, Rgba8::new(0, 255, 0, 200)),
        (-30.0, Rgba8::new(255, 0, 0, 200)),
        (-120.0, Rgba8::new(0, 0, 0, 200)),
        (-300.0, Rgba8::new(0, 0, 0, 200)),
    ] {
        let mut buffer = PixelBuffer::new(1, 1, red);
        hue_shift(&mut buffer, delta);
        assert_eq!(buffer.pixels()[0], expected, "delta {delta}");
    }
}

#[test]
fn test_keep_color_scenario() {
    let far = hsv_to_rgb(
        Hsv {
            h: 200.0,
            s: 0.8,
            v: 0.9,
        },
        255,
    );
    let near = hsv_to_rgb(
        Hsv {
            h: 5.0,
            s: 0.8,
            v: 0.9,
        },
        255,
    );
    let mut buffer = PixelBuffer::from_pixels(2, 1, vec![far, near]).expect("2x1");
    keep_color(&mut buffer, 0.0, 10.0);

    let far_after = buffer.pixels()[0];
    assert_eq!(rgb_to_hsv(far_after.r, far_after.g, far_after.b).s, 0.0);
    let near_after = buffer.pixels()[1];
    let s_before = rgb_to_hsv(near.r, near.g, near.b).s;
    let s_after = rgb_to_hsv(near_after.r, near_after.g, near_after.b).s;
    assert!((s_before - s_after).abs() < 0.01, "{s_before} vs {s_after}");
    assert!(s_after > 0.5);
}
