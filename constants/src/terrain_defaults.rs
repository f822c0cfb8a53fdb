//! Default terrain parameter values. The JSON preset and any later
//! configuration collaborator overwrite these at runtime; nothing validates
//! them (degenerate values degrade the picture, they never fault).

// Fractal noise
pub const OCTAVES: i32 = 4;
pub const FREQUENCY: f32 = 0.06;
pub const AMPLITUDE: f32 = 0.2;
pub const LACUNARITY: f32 = 2.0;
pub const PERSISTENCE: f32 = 0.5;
pub const HEIGHT_SCALE: f32 = 35.0;
pub const HEIGHT_OFFSET: f32 = 0.09;
pub const WATER_FLOOR: f32 = -2.0;

// Horizon curvature
pub const HORIZON_DISTANCE: f32 = 280.0;
pub const HORIZON_CURVE: f32 = 0.6;

// Biome band thresholds (start <= end is the caller's responsibility)
pub const SAND_START: f32 = -1.2;
pub const SAND_END: f32 = 0.4;
pub const GRASS_START: f32 = 1.0;
pub const GRASS_END: f32 = 2.8;
pub const ROCK_START: f32 = 7.0;
pub const ROCK_END: f32 = 11.0;

// Atmosphere
pub const FOG_NEAR: f32 = 90.0;
pub const FOG_FAR: f32 = 270.0;
pub const FOG_COLOR: [f32; 4] = [0.74, 0.80, 0.88, 1.0];

// Biome texture tiling, world units per repeat.
pub const TEXTURE_SCALE: f32 = 0.08;

// Shadow decal
pub const SHADOW_RADIUS: f32 = 6.0;
pub const SHADOW_OPACITY: f32 = 0.55;
pub const SHADOW_FORWARD_OFFSET: f32 = 2.0;
pub const SHADOW_FADE_HEIGHT: f32 = 60.0;
/// Floor for the altitude-driven radius multiplier; guards the divide-by-zero
/// path when the caster's height above ground is ill-defined.
pub const SHADOW_MIN_SCALE: f32 = 0.25;
