//! JSON parameter preset, the engine-side half of the configuration
//! collaborator boundary. Every field is optional: absent fields leave the
//! current value untouched, values are applied without validation.

use bevy::prelude::*;
use serde::Deserialize;

use super::params::{ShadingParams, TerrainParams};

const PRESET_PATH: &str = "config/default.terrain.json";

#[derive(Asset, TypePath, Deserialize, Clone, Default)]
pub struct TerrainPreset {
    pub octaves: Option<i32>,
    pub frequency: Option<f32>,
    pub amplitude: Option<f32>,
    pub lacunarity: Option<f32>,
    pub persistence: Option<f32>,
    pub height_scale: Option<f32>,
    pub height_offset: Option<f32>,
    pub water_floor: Option<f32>,
    pub horizon_distance: Option<f32>,
    pub horizon_curve: Option<f32>,
    pub sand_start: Option<f32>,
    pub sand_end: Option<f32>,
    pub grass_start: Option<f32>,
    pub grass_end: Option<f32>,
    pub rock_start: Option<f32>,
    pub rock_end: Option<f32>,
    pub fog_near: Option<f32>,
    pub fog_far: Option<f32>,
    pub fog_color: Option<[f32; 4]>,
    pub texture_scale: Option<f32>,
    pub shadow_radius: Option<f32>,
    pub shadow_opacity: Option<f32>,
    pub shadow_forward_offset: Option<f32>,
    pub shadow_fade_height: Option<f32>,
}

#[derive(Resource, Default)]
pub struct PresetLoader {
    handle: Option<Handle<TerrainPreset>>,
    applied: bool,
}

/// Starts loading the preset on the first run, then applies it once when the
/// asset resolves. A missing or malformed preset file simply leaves the
/// defaults in place.
pub fn apply_terrain_preset(
    mut loader: ResMut<PresetLoader>,
    asset_server: Res<AssetServer>,
    presets: Res<Assets<TerrainPreset>>,
    mut terrain: ResMut<TerrainParams>,
    mut shading: ResMut<ShadingParams>,
) {
    if loader.handle.is_none() {
        loader.handle = Some(asset_server.load(PRESET_PATH));
        return;
    }
    if loader.applied {
        return;
    }

    let Some(handle) = &loader.handle else {
        return;
    };
    let Some(preset) = presets.get(handle) else {
        return;
    };

    apply_preset(preset, &mut terrain, &mut shading);
    loader.applied = true;
    info!("Applied terrain preset from {PRESET_PATH}");
}

fn apply_preset(preset: &TerrainPreset, terrain: &mut TerrainParams, shading: &mut ShadingParams) {
    let noise = &mut terrain.noise;
    set(&mut noise.octaves, preset.octaves);
    set(&mut noise.frequency, preset.frequency);
    set(&mut noise.amplitude, preset.amplitude);
    set(&mut noise.lacunarity, preset.lacunarity);
    set(&mut noise.persistence, preset.persistence);
    set(&mut noise.height_scale, preset.height_scale);
    set(&mut noise.height_offset, preset.height_offset);
    set(&mut noise.water_floor, preset.water_floor);

    set(&mut terrain.horizon.distance, preset.horizon_distance);
    set(&mut terrain.horizon.curve, preset.horizon_curve);

    let biome = &mut shading.biome;
    set(&mut biome.sand_start, preset.sand_start);
    set(&mut biome.sand_end, preset.sand_end);
    set(&mut biome.grass_start, preset.grass_start);
    set(&mut biome.grass_end, preset.grass_end);
    set(&mut biome.rock_start, preset.rock_start);
    set(&mut biome.rock_end, preset.rock_end);

    set(&mut shading.fog.near, preset.fog_near);
    set(&mut shading.fog.far, preset.fog_far);
    if let Some(color) = preset.fog_color {
        shading.fog.color = Vec4::from_array(color);
    }
    set(&mut shading.texture_scale, preset.texture_scale);

    let shadow = &mut shading.shadow;
    set(&mut shadow.radius, preset.shadow_radius);
    set(&mut shadow.opacity, preset.shadow_opacity);
    set(&mut shadow.forward_offset, preset.shadow_forward_offset);
    set(&mut shadow.fade_height, preset.shadow_fade_height);
}

fn set<T: Copy>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_leave_prior_values_unchanged() {
        let mut terrain = TerrainParams::default();
        let mut shading = ShadingParams::default();
        let before = terrain;

        apply_preset(&TerrainPreset::default(), &mut terrain, &mut shading);

        assert_eq!(terrain.noise.octaves, before.noise.octaves);
        assert_eq!(terrain.noise.frequency, before.noise.frequency);
        assert_eq!(terrain.horizon.distance, before.horizon.distance);
    }

    #[test]
    fn present_fields_overwrite_independently() {
        let mut terrain = TerrainParams::default();
        let mut shading = ShadingParams::default();
        let preset = TerrainPreset {
            octaves: Some(7),
            fog_near: Some(42.0),
            ..TerrainPreset::default()
        };

        let frequency_before = terrain.noise.frequency;
        apply_preset(&preset, &mut terrain, &mut shading);

        assert_eq!(terrain.noise.octaves, 7);
        assert_eq!(shading.fog.near, 42.0);
        assert_eq!(terrain.noise.frequency, frequency_before);
    }
}
