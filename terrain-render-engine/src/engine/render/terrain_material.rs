//! Terrain surface material.
//!
//! The vertex stage fetches the computed world position from the position
//! texture by vertex index; the fragment stage re-derives the horizon drop
//! from the interpolated world position (it never reads the compute buffer),
//! blends the four biome textures by smooth height thresholds, applies
//! distance fog and composites the shadow decal.

use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::prelude::*;
use bevy::reflect::TypePath;
use bevy::render::mesh::MeshVertexBufferLayoutRef;
use bevy::render::render_resource::{
    AsBindGroup, RenderPipelineDescriptor, ShaderRef, ShaderType, SpecializedMeshPipelineError,
};

use crate::engine::terrain::params::{FrameInputs, ShadingParams, TerrainParams};

/// Shading parameter block, packed into vec4 lanes so the WGSL-side layout is
/// unambiguous. Mirrors `TerrainShadingUniform` in `terrain_surface.wgsl`.
#[derive(Debug, Clone, Copy, Default, ShaderType)]
pub struct TerrainShadingUniform {
    /// camera x, camera z, horizon distance, horizon curve
    pub camera_horizon: Vec4,
    /// fog near, fog far, 0, 0
    pub fog_distances: Vec4,
    pub fog_color: Vec4,
    /// sand start, sand end, grass start, grass end
    pub band_sand_grass: Vec4,
    /// rock start, rock end, texture scale, 0
    pub band_rock_scale: Vec4,
    /// caster x, caster z, caster yaw, height above ground
    pub shadow_pose: Vec4,
    /// radius, opacity, forward offset, fade height
    pub shadow_shape: Vec4,
}

#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct TerrainMaterial {
    /// Written by the height compute kernel each frame; read here in the
    /// vertex stage only.
    #[texture(0, visibility(vertex), sample_type = "float", filterable = false)]
    pub position_texture: Handle<Image>,

    #[texture(1)]
    #[sampler(2)]
    pub water_texture: Handle<Image>,

    #[texture(3)]
    #[sampler(4)]
    pub sand_texture: Handle<Image>,

    #[texture(5)]
    #[sampler(6)]
    pub grass_texture: Handle<Image>,

    #[texture(7)]
    #[sampler(8)]
    pub rock_texture: Handle<Image>,

    #[texture(9)]
    #[sampler(10)]
    pub shadow_decal_texture: Handle<Image>,

    #[uniform(11)]
    pub shading: TerrainShadingUniform,
}

impl Material for TerrainMaterial {
    fn vertex_shader() -> ShaderRef {
        "shaders/terrain_surface.wgsl".into()
    }

    fn fragment_shader() -> ShaderRef {
        "shaders/terrain_surface.wgsl".into()
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        _layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        // Displaced geometry has no stable winding near the water clamp.
        descriptor.primitive.cull_mode = None;
        Ok(())
    }
}

/// Writes the frame's shading snapshot into the material. Runs after
/// `gather_frame_inputs`, so the fragment stage and the compute kernel see
/// the same camera and caster state for the frame.
pub fn update_terrain_shading(
    mut materials: ResMut<Assets<TerrainMaterial>>,
    terrain: Res<TerrainParams>,
    shading: Res<ShadingParams>,
    inputs: Res<FrameInputs>,
) {
    for (_, material) in materials.iter_mut() {
        material.shading = TerrainShadingUniform {
            camera_horizon: Vec4::new(
                inputs.camera_position.x,
                inputs.camera_position.z,
                terrain.horizon.distance,
                terrain.horizon.curve,
            ),
            fog_distances: Vec4::new(shading.fog.near, shading.fog.far, 0.0, 0.0),
            fog_color: shading.fog.color,
            band_sand_grass: Vec4::new(
                shading.biome.sand_start,
                shading.biome.sand_end,
                shading.biome.grass_start,
                shading.biome.grass_end,
            ),
            band_rock_scale: Vec4::new(
                shading.biome.rock_start,
                shading.biome.rock_end,
                shading.texture_scale,
                0.0,
            ),
            shadow_pose: Vec4::new(
                inputs.caster_position.x,
                inputs.caster_position.z,
                inputs.caster_yaw,
                inputs.caster_height_above_ground,
            ),
            shadow_shape: Vec4::new(
                shading.shadow.radius,
                shading.shadow.opacity,
                shading.shadow.forward_offset,
                shading.shadow.fade_height,
            ),
        };
    }
}
