//! Ordered-dither threshold table and quantisation helpers.
//!
//! The 8x8 Bayer matrix below is duplicated verbatim in
//! `shaders/retro_postprocess.wgsl`; the Rust copy is the CPU mirror used by
//! the tests. Keep the two in sync.

/// Default number of evenly spaced levels each colour channel is rounded to.
pub const COLOUR_LEVELS: f32 = 6.0;

/// Fixed scale applied to the centred Bayer threshold before quantisation.
/// Kept below half a quantisation step so re-filtering an already quantised
/// image reproduces the same levels.
pub const DITHER_STRENGTH: f32 = 0.06;

/// 8x8 ordered dither threshold table, row-major, values 0..63.
pub const BAYER_8X8: [u32; 64] = [
    0, 32, 8, 40, 2, 34, 10, 42, //
    48, 16, 56, 24, 50, 18, 58, 26, //
    12, 44, 4, 36, 14, 46, 6, 38, //
    60, 28, 52, 20, 62, 30, 54, 22, //
    3, 35, 11, 43, 1, 33, 9, 41, //
    51, 19, 59, 27, 49, 17, 57, 25, //
    15, 47, 7, 39, 13, 45, 5, 37, //
    63, 31, 55, 23, 61, 29, 53, 21,
];

/// Centred dither threshold in [-0.5, 0.5) for a screen pixel, indexed by the
/// pixel's coordinate modulo 8.
pub fn bayer_threshold(x: u32, y: u32) -> f32 {
    let cell = BAYER_8X8[((y % 8) * 8 + (x % 8)) as usize];
    cell as f32 / 64.0 - 0.5
}

/// Round one channel to the nearest of `levels` evenly spaced values in [0, 1].
pub fn quantise_channel(value: f32, levels: f32) -> f32 {
    let steps = (levels - 1.0).max(1.0);
    (value.clamp(0.0, 1.0) * steps).round() / steps
}

/// Full per-pixel retro transform for one channel: perturb by the pixel's
/// dither threshold, then posterise.
pub fn dither_quantise(value: f32, x: u32, y: u32, levels: f32, strength: f32) -> f32 {
    quantise_channel(value + bayer_threshold(x, y) * strength, levels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bayer_matrix_is_a_permutation_of_0_to_63() {
        let mut seen = [false; 64];
        for &v in BAYER_8X8.iter() {
            assert!(v < 64);
            assert!(!seen[v as usize], "duplicate threshold {v}");
            seen[v as usize] = true;
        }
    }

    #[test]
    fn thresholds_are_centred() {
        for y in 0..8 {
            for x in 0..8 {
                let t = bayer_threshold(x, y);
                assert!((-0.5..0.5).contains(&t));
            }
        }
    }

    #[test]
    fn quantise_produces_expected_level_count() {
        let mut levels = std::collections::BTreeSet::new();
        for i in 0..=1000 {
            let q = quantise_channel(i as f32 / 1000.0, COLOUR_LEVELS);
            levels.insert((q * 1e6).round() as i64);
        }
        assert_eq!(levels.len(), COLOUR_LEVELS as usize);
    }

    #[test]
    fn dithering_already_quantised_colour_is_idempotent() {
        // Default strength is below half a quantisation step, so a second
        // pass lands on the same levels regardless of pixel coordinate.
        for level in 0..COLOUR_LEVELS as u32 {
            let value = level as f32 / (COLOUR_LEVELS - 1.0);
            for y in 0..8 {
                for x in 0..8 {
                    let once = dither_quantise(value, x, y, COLOUR_LEVELS, DITHER_STRENGTH);
                    let twice = dither_quantise(once, x, y, COLOUR_LEVELS, DITHER_STRENGTH);
                    assert_eq!(once, twice);
                    assert_eq!(once, value);
                }
            }
        }
    }
}
