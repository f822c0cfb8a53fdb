//! Deterministic 2-D gradient noise and its fractal sum.
//!
//! This is the CPU mirror of the noise in
//! `shaders/terrain_height_compute.wgsl`: same pcg2d hash, same gradient
//! derivation, same quintic fade. The kernel produces the rendered height
//! field; this copy answers the caster's height-above-ground query and backs
//! the tests. Keep the two implementations in sync constant-for-constant.

use bevy::math::{IVec2, UVec2, Vec2};

/// 2 * pi / 2^32, maps a 32-bit hash to an angle.
const HASH_TO_ANGLE: f32 = 1.462_918_1e-9;

fn pcg2d(p: UVec2) -> UVec2 {
    let mut v = UVec2::new(
        p.x.wrapping_mul(1_664_525).wrapping_add(1_013_904_223),
        p.y.wrapping_mul(1_664_525).wrapping_add(1_013_904_223),
    );
    v.x = v.x.wrapping_add(v.y.wrapping_mul(1_664_525));
    v.y = v.y.wrapping_add(v.x.wrapping_mul(1_664_525));
    v.x ^= v.x >> 16;
    v.y ^= v.y >> 16;
    v.x = v.x.wrapping_add(v.y.wrapping_mul(1_664_525));
    v.y = v.y.wrapping_add(v.x.wrapping_mul(1_664_525));
    v.x ^= v.x >> 16;
    v.y ^= v.y >> 16;
    v
}

/// Unit pseudo-gradient for a lattice cell.
fn gradient(cell: IVec2) -> Vec2 {
    let h = pcg2d(UVec2::new(cell.x as u32, cell.y as u32));
    let angle = h.x as f32 * HASH_TO_ANGLE;
    Vec2::new(angle.cos(), angle.sin())
}

fn fade(t: Vec2) -> Vec2 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Single-octave gradient noise, roughly in [-1, 1]. Same input always yields
/// the same output; there is no state beyond the hash.
pub fn gradient_noise(p: Vec2) -> f32 {
    let cell = p.floor();
    let frac = p - cell;
    let c = cell.as_ivec2();
    let u = fade(frac);

    let n00 = gradient(c).dot(frac);
    let n10 = gradient(c + IVec2::new(1, 0)).dot(frac - Vec2::new(1.0, 0.0));
    let n01 = gradient(c + IVec2::new(0, 1)).dot(frac - Vec2::new(0.0, 1.0));
    let n11 = gradient(c + IVec2::new(1, 1)).dot(frac - Vec2::new(1.0, 1.0));

    lerp(lerp(n00, n10, u.x), lerp(n01, n11, u.x), u.y)
}

/// Fractal sum over `octaves` iterations: each octave samples at the current
/// frequency and amplitude, then multiplies frequency by `lacunarity` and
/// amplitude by `persistence`. `octaves <= 0` contributes nothing; negative
/// amplitudes or frequencies are accepted as-is and simply invert or fold
/// the pattern.
pub fn fbm(
    p: Vec2,
    octaves: i32,
    frequency: f32,
    amplitude: f32,
    lacunarity: f32,
    persistence: f32,
) -> f32 {
    let mut total = 0.0;
    let mut frequency = frequency;
    let mut amplitude = amplitude;
    for _ in 0..octaves.max(0) {
        total += gradient_noise(p * frequency) * amplitude;
        frequency *= lacunarity;
        amplitude *= persistence;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_is_deterministic() {
        let p = Vec2::new(12.625, -4031.375);
        let a = gradient_noise(p);
        let b = gradient_noise(p);
        assert_eq!(a.to_bits(), b.to_bits());

        let f1 = fbm(p, 5, 0.06, 0.2, 2.0, 0.5);
        let f2 = fbm(p, 5, 0.06, 0.2, 2.0, 0.5);
        assert_eq!(f1.to_bits(), f2.to_bits());
    }

    #[test]
    fn zero_octaves_yields_zero() {
        assert_eq!(fbm(Vec2::new(3.0, 7.0), 0, 0.06, 0.2, 2.0, 0.5), 0.0);
    }

    #[test]
    fn negative_octave_count_is_treated_as_zero_iterations() {
        assert_eq!(fbm(Vec2::new(3.0, 7.0), -4, 0.06, 0.2, 2.0, 0.5), 0.0);
    }

    #[test]
    fn single_octave_equals_scaled_noise_sample() {
        let p = Vec2::new(17.5, -3.25);
        let expected = gradient_noise(p * 0.06) * 0.2;
        assert_eq!(fbm(p, 1, 0.06, 0.2, 2.0, 0.5), expected);
    }

    #[test]
    fn noise_output_stays_in_gradient_range() {
        for i in -50..50 {
            for j in -50..50 {
                let v = gradient_noise(Vec2::new(i as f32 * 0.37, j as f32 * 0.53));
                assert!(v.abs() <= 1.0, "noise out of range: {v}");
            }
        }
    }

    #[test]
    fn negative_amplitude_inverts_the_pattern() {
        let p = Vec2::new(9.125, 2.75);
        let pos = fbm(p, 3, 0.06, 0.2, 2.0, 0.5);
        let neg = fbm(p, 3, 0.06, -0.2, 2.0, 0.5);
        assert_eq!(pos, -neg);
    }
}
