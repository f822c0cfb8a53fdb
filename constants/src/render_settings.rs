use bevy::prelude::*;
use bevy::render::extract_component::ExtractComponent;

use crate::dither::{COLOUR_LEVELS, DITHER_STRENGTH};

/// Per-camera settings for the retro post-process pass (ordered dithering +
/// colour posterisation). Attached to the camera entity and extracted to the
/// render world as a uniform.
#[derive(
    Component, Clone, Copy, ExtractComponent, bevy::render::render_resource::ShaderType,
)]
pub struct RetroSettings {
    /// Evenly spaced quantisation levels per colour channel.
    pub levels: f32,
    /// Scale applied to the centred Bayer threshold.
    pub dither_strength: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl Default for RetroSettings {
    fn default() -> Self {
        RETRO_SETTINGS
    }
}

pub const RETRO_SETTINGS: RetroSettings = RetroSettings {
    levels: COLOUR_LEVELS,
    dither_strength: DITHER_STRENGTH,
    _pad0: 0.0,
    _pad1: 0.0,
};
