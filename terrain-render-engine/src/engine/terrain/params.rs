//! Runtime parameter blocks for the terrain pipeline.
//!
//! These resources are the whole configuration surface of the engine: the
//! JSON preset (and any future UI collaborator) overwrites individual fields,
//! the per-frame systems read the latest values. Nothing here is validated;
//! degenerate values degrade the picture but never fault.

use bevy::prelude::*;
use bevy::render::extract_resource::ExtractResource;

use constants::terrain_defaults as defaults;

/// Fractal height-field parameters, consumed by the height compute kernel and
/// mirrored on the CPU by [`super::field`].
#[derive(Debug, Clone, Copy)]
pub struct NoiseParams {
    /// Fractal iteration count; negative values run zero iterations.
    pub octaves: i32,
    pub frequency: f32,
    pub amplitude: f32,
    pub lacunarity: f32,
    pub persistence: f32,
    /// Multiplier applied after noise summation and height offset.
    pub height_scale: f32,
    /// Added to the raw noise sum before scaling.
    pub height_offset: f32,
    /// Heights never dip below this (curvature-corrected) floor; produces the
    /// flat apparent water plane.
    pub water_floor: f32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            octaves: defaults::OCTAVES,
            frequency: defaults::FREQUENCY,
            amplitude: defaults::AMPLITUDE,
            lacunarity: defaults::LACUNARITY,
            persistence: defaults::PERSISTENCE,
            height_scale: defaults::HEIGHT_SCALE,
            height_offset: defaults::HEIGHT_OFFSET,
            water_floor: defaults::WATER_FLOOR,
        }
    }
}

/// World-edge curvature: a "drop" subtracted from raw height as a function of
/// planar distance from the camera.
#[derive(Debug, Clone, Copy)]
pub struct HorizonParams {
    pub distance: f32,
    pub curve: f32,
}

impl Default for HorizonParams {
    fn default() -> Self {
        Self {
            distance: defaults::HORIZON_DISTANCE,
            curve: defaults::HORIZON_CURVE,
        }
    }
}

/// Parameters shared by the compute kernel and the CPU field mirror.
/// Extracted to the render world every frame.
#[derive(Resource, Debug, Clone, Copy, Default, ExtractResource)]
pub struct TerrainParams {
    pub noise: NoiseParams,
    pub horizon: HorizonParams,
}

/// Four ordered biome band boundaries. `*_start <= *_end` is the caller's
/// responsibility; inverted ranges silently produce a zero-width or reversed
/// blend.
#[derive(Debug, Clone, Copy)]
pub struct BiomeThresholds {
    pub sand_start: f32,
    pub sand_end: f32,
    pub grass_start: f32,
    pub grass_end: f32,
    pub rock_start: f32,
    pub rock_end: f32,
}

impl Default for BiomeThresholds {
    fn default() -> Self {
        Self {
            sand_start: defaults::SAND_START,
            sand_end: defaults::SAND_END,
            grass_start: defaults::GRASS_START,
            grass_end: defaults::GRASS_END,
            rock_start: defaults::ROCK_START,
            rock_end: defaults::ROCK_END,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FogParams {
    pub near: f32,
    pub far: f32,
    pub color: Vec4,
}

impl Default for FogParams {
    fn default() -> Self {
        Self {
            near: defaults::FOG_NEAR,
            far: defaults::FOG_FAR,
            color: Vec4::from_array(defaults::FOG_COLOR),
        }
    }
}

/// Shadow decal shape parameters. The caster's per-frame pose arrives
/// separately through [`FrameInputs`].
#[derive(Debug, Clone, Copy)]
pub struct ShadowParams {
    pub radius: f32,
    pub opacity: f32,
    /// Decal centre offset along the caster's forward axis.
    pub forward_offset: f32,
    /// Altitude at which the shadow has fully faded out.
    pub fade_height: f32,
}

impl Default for ShadowParams {
    fn default() -> Self {
        Self {
            radius: defaults::SHADOW_RADIUS,
            opacity: defaults::SHADOW_OPACITY,
            forward_offset: defaults::SHADOW_FORWARD_OFFSET,
            fade_height: defaults::SHADOW_FADE_HEIGHT,
        }
    }
}

/// Parameters consumed only by the fragment stage.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ShadingParams {
    pub biome: BiomeThresholds,
    pub fog: FogParams,
    pub shadow: ShadowParams,
    /// World units to texture repeats for the biome textures.
    pub texture_scale: f32,
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self {
            biome: BiomeThresholds::default(),
            fog: FogParams::default(),
            shadow: ShadowParams::default(),
            texture_scale: defaults::TEXTURE_SCALE,
        }
    }
}

/// Per-frame scalar/vector inputs from the collaborators (camera, flying
/// caster). Gathered once in `Update` before the material uniform is written
/// and the compute uniform is extracted, so both GPU stages see one
/// consistent snapshot per frame.
#[derive(Resource, Debug, Clone, Copy, Default, ExtractResource)]
pub struct FrameInputs {
    pub camera_position: Vec3,
    /// Camera position quantised to the nearest grid cell; moves in discrete
    /// `CELL_SIZE` steps only.
    pub snap_offset: Vec2,
    pub caster_position: Vec3,
    pub caster_yaw: f32,
    /// Caster altitude above the curvature-corrected terrain directly below
    /// it, from the CPU field mirror.
    pub caster_height_above_ground: f32,
}
