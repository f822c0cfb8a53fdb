//! CPU mirror of the height-field and shading math.
//!
//! The height compute kernel and the surface shader are the source of what
//! ends up on screen; the functions here re-state the same formulas for the
//! CPU-side consumers (snap offset, caster height-above-ground) and for the
//! tests. Pure functions only, no ECS access.

use bevy::math::Vec2;

use super::noise;
use super::params::{HorizonParams, NoiseParams, ShadowParams};
use constants::terrain_defaults::SHADOW_MIN_SCALE;

/// Quantise the camera's planar position to the nearest grid cell. Both
/// components are exact multiples of `cell_size`; consumers must not assume
/// frame-to-frame continuity.
pub fn snap_offset(camera_xz: Vec2, cell_size: f32) -> Vec2 {
    Vec2::new(
        (camera_xz.x / cell_size).floor() * cell_size,
        (camera_xz.y / cell_size).floor() * cell_size,
    )
}

/// Height drop as a function of planar distance from the camera; makes the
/// world edge fall away like a curved horizon.
pub fn horizon_drop(world_xz: Vec2, camera_xz: Vec2, horizon: &HorizonParams) -> f32 {
    let t = world_xz.distance(camera_xz) / horizon.distance;
    t * t * t * t * horizon.curve * 100.0
}

/// Height before curvature: fractal noise plus offset, scaled.
pub fn raw_height(world_xz: Vec2, noise_params: &NoiseParams) -> f32 {
    let n = noise::fbm(
        world_xz,
        noise_params.octaves,
        noise_params.frequency,
        noise_params.amplitude,
        noise_params.lacunarity,
        noise_params.persistence,
    );
    (n + noise_params.height_offset) * noise_params.height_scale
}

/// Final displaced height at a world position: raw height and water floor are
/// both curved by the horizon drop, then clamped so water never dips below
/// its own curved floor.
pub fn surface_height(
    world_xz: Vec2,
    camera_xz: Vec2,
    noise_params: &NoiseParams,
    horizon: &HorizonParams,
) -> f32 {
    let drop = horizon_drop(world_xz, camera_xz, horizon);
    let curved = raw_height(world_xz, noise_params) - drop;
    let curved_floor = noise_params.water_floor - drop;
    curved.max(curved_floor)
}

/// Caster altitude above the curvature-corrected terrain directly below it.
/// Never negative; a desynchronised caster below ground reads as zero.
pub fn height_above_ground(
    caster_xz: Vec2,
    caster_y: f32,
    camera_xz: Vec2,
    noise_params: &NoiseParams,
    horizon: &HorizonParams,
) -> f32 {
    (caster_y - surface_height(caster_xz, camera_xz, noise_params, horizon)).max(0.0)
}

/// Smoothstep-style ease between two thresholds. With `end < start` the ramp
/// reverses; with `end == start` the result is a degenerate zero-width blend.
pub fn band_ramp(start: f32, end: f32, value: f32) -> f32 {
    let t = ((value - start) / (end - start)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Fog mix factor from horizontal distance.
pub fn fog_factor(near: f32, far: f32, planar_distance: f32) -> f32 {
    band_ramp(near, far, planar_distance)
}

/// Decal radius for a caster at the given altitude: grows with height, with a
/// floored multiplier so the scale never collapses to zero.
pub fn shadow_radius(base_radius: f32, height_above_ground: f32) -> f32 {
    base_radius * (height_above_ground / 10.0 + 1.0).max(SHADOW_MIN_SCALE)
}

/// Normalised decal coordinate for a fragment, or `None` when the fragment
/// falls outside the decal's [0,1]^2 footprint (no wrap, no tiling).
pub fn shadow_uv(
    frag_xz: Vec2,
    caster_xz: Vec2,
    caster_yaw: f32,
    forward_offset: f32,
    radius: f32,
) -> Option<Vec2> {
    let forward = Vec2::new(caster_yaw.sin(), caster_yaw.cos());
    let centre = caster_xz + forward * forward_offset;
    let local = frag_xz - centre;
    let (s, c) = (-caster_yaw).sin_cos();
    let rotated = Vec2::new(local.x * c - local.y * s, local.x * s + local.y * c);
    let uv = rotated / (radius * 2.0) + Vec2::splat(0.5);
    if (0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y) {
        Some(uv)
    } else {
        None
    }
}

/// Multiplicative darkening factor applied to the shaded colour: 1.0 means
/// untouched, lower values darken. Never lightens.
pub fn shadow_multiplier(
    decal_alpha: f32,
    height_above_ground: f32,
    shadow: &ShadowParams,
) -> f32 {
    let fade = 1.0 - band_ramp(0.0, shadow.fade_height, height_above_ground);
    1.0 - (decal_alpha * fade * shadow.opacity).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec2;
    use constants::grid::CELL_SIZE;

    fn scenario_noise() -> NoiseParams {
        NoiseParams {
            octaves: 1,
            frequency: 0.06,
            amplitude: 0.2,
            lacunarity: 2.0,
            persistence: 0.5,
            height_scale: 35.0,
            height_offset: 0.09,
            water_floor: -2.0,
        }
    }

    fn flat_horizon() -> HorizonParams {
        HorizonParams {
            distance: 280.0,
            curve: 0.0,
        }
    }

    #[test]
    fn snap_offset_components_are_cell_multiples() {
        for &(x, z) in &[
            (0.0, 0.0),
            (13.7, -42.1),
            (-0.001, 9999.5),
            (123456.78, -98765.4),
        ] {
            let snap = snap_offset(Vec2::new(x, z), CELL_SIZE);
            let rx = snap.x / CELL_SIZE;
            let rz = snap.y / CELL_SIZE;
            assert_eq!(rx, rx.round());
            assert_eq!(rz, rz.round());
            assert!(x - snap.x < CELL_SIZE && x - snap.x >= 0.0);
            assert!(z - snap.y < CELL_SIZE && z - snap.y >= 0.0);
        }
    }

    #[test]
    fn snap_offset_holds_until_the_cell_boundary_is_crossed() {
        let at_origin = snap_offset(Vec2::ZERO, CELL_SIZE);
        let just_inside = snap_offset(Vec2::new(CELL_SIZE - 0.01, 0.0), CELL_SIZE);
        assert_eq!(at_origin, just_inside);

        let just_over = snap_offset(Vec2::new(CELL_SIZE + 0.01, 0.0), CELL_SIZE);
        assert_eq!(just_over.x - at_origin.x, CELL_SIZE);
        assert_eq!(just_over.y, at_origin.y);
    }

    #[test]
    fn scenario_height_matches_the_closed_form() {
        let noise_params = scenario_noise();
        let horizon = flat_horizon();
        let expected = ((super::noise::gradient_noise(Vec2::ZERO) * 0.2 + 0.09) * 35.0).max(-2.0);
        let got = surface_height(Vec2::ZERO, Vec2::ZERO, &noise_params, &horizon);
        assert_eq!(got, expected);
    }

    #[test]
    fn final_height_never_dips_below_the_curved_water_floor() {
        let noise_params = NoiseParams::default();
        let horizon = HorizonParams::default();
        let camera = Vec2::new(37.0, -12.0);
        for i in -20..20 {
            for j in -20..20 {
                let world = Vec2::new(i as f32 * 13.0, j as f32 * 13.0);
                let h = surface_height(world, camera, &noise_params, &horizon);
                let floor = noise_params.water_floor - horizon_drop(world, camera, &horizon);
                assert!(h >= floor, "height {h} below curved floor {floor} at {world}");
            }
        }
    }

    #[test]
    fn horizon_drop_is_zero_with_flat_curve() {
        let horizon = flat_horizon();
        assert_eq!(
            horizon_drop(Vec2::new(500.0, -300.0), Vec2::ZERO, &horizon),
            0.0
        );
    }

    #[test]
    fn band_ramp_is_monotonic_inside_the_band() {
        let mut prev = band_ramp(1.0, 3.0, 1.0);
        for i in 1..=100 {
            let h = 1.0 + 2.0 * i as f32 / 100.0;
            let r = band_ramp(1.0, 3.0, h);
            assert!(r >= prev, "ramp decreased at height {h}");
            prev = r;
        }
        assert_eq!(band_ramp(1.0, 3.0, 0.0), 0.0);
        assert_eq!(band_ramp(1.0, 3.0, 5.0), 1.0);
    }

    #[test]
    fn inverted_band_reverses_the_blend_without_faulting() {
        // end < start: ramp runs backwards, still clamped to [0, 1].
        let low = band_ramp(3.0, 1.0, 0.5);
        let high = band_ramp(3.0, 1.0, 3.5);
        assert_eq!(low, 1.0);
        assert_eq!(high, 0.0);
    }

    #[test]
    fn zero_opacity_leaves_the_colour_untouched() {
        let shadow = ShadowParams {
            opacity: 0.0,
            ..ShadowParams::default()
        };
        for alpha in [0.0, 0.3, 1.0] {
            for h in [0.0, 5.0, 500.0] {
                assert_eq!(shadow_multiplier(alpha, h, &shadow), 1.0);
            }
        }
    }

    #[test]
    fn fragments_outside_the_decal_footprint_contribute_nothing() {
        let caster = Vec2::new(10.0, -4.0);
        let radius = shadow_radius(6.0, 0.0);
        // Far outside the decal in any direction, for several yaws.
        for yaw in [0.0, 0.7, 2.9, -1.3] {
            let far = caster + Vec2::new(radius * 10.0, 0.0);
            assert_eq!(shadow_uv(far, caster, yaw, 2.0, radius), None);
        }
        // Directly under the caster centre with zero forward offset.
        let centre = shadow_uv(caster, caster, 1.1, 0.0, radius).unwrap();
        assert!((centre - Vec2::splat(0.5)).length() < 1e-6);
    }

    #[test]
    fn shadow_scale_is_floored_for_degenerate_heights() {
        // The multiplier never collapses even for nonsense altitudes.
        assert!(shadow_radius(6.0, -1000.0) >= 6.0 * 0.2);
        assert!(shadow_radius(6.0, 0.0) == 6.0);
        assert!(shadow_radius(6.0, 10.0) == 12.0);
    }

    #[test]
    fn shadow_grows_and_fades_with_altitude() {
        let shadow = ShadowParams::default();
        let near_ground = shadow_multiplier(1.0, 0.0, &shadow);
        let mid_air = shadow_multiplier(1.0, shadow.fade_height * 0.5, &shadow);
        let above_fade = shadow_multiplier(1.0, shadow.fade_height * 2.0, &shadow);
        assert!(near_ground < mid_air);
        assert_eq!(above_fade, 1.0);
        assert!(shadow_radius(shadow.radius, 20.0) > shadow_radius(shadow.radius, 0.0));
    }

    #[test]
    fn height_above_ground_is_never_negative() {
        let noise_params = scenario_noise();
        let horizon = flat_horizon();
        let h = height_above_ground(Vec2::ZERO, -1000.0, Vec2::ZERO, &noise_params, &horizon);
        assert_eq!(h, 0.0);
    }
}
