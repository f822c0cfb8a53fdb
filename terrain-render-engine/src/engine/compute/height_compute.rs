//! Height compute stage: one GPU thread per terrain vertex.
//!
//! Every frame, each thread reads its immutable base offset, applies the
//! camera snap offset, evaluates the fractal height field and the horizon
//! drop, clamps against the curved water floor, and writes the final world
//! position into the position texture. The dispatch is submitted in
//! `RenderSet::Queue`, before the main pass consumes the texture, so the two
//! phases are ordered by submission rather than locked.

use crate::engine::terrain::assets::TerrainAssets;
use crate::engine::terrain::params::{FrameInputs, TerrainParams};

use bevy::prelude::*;
use bevy::render::extract_resource::ExtractResourcePlugin;
use bevy::render::{
    Render, RenderApp, RenderSet,
    render_asset::RenderAssets,
    render_resource::{
        BindGroupEntry, BindGroupLayout, BindGroupLayoutEntry, BindingResource, BindingType,
        BufferBindingType, BufferInitDescriptor, BufferUsages, CachedComputePipelineId,
        ComputePassDescriptor, ComputePipelineDescriptor, PipelineCache, ShaderStages,
        StorageTextureAccess, TextureFormat, TextureSampleType, TextureViewDimension,
    },
    renderer::{RenderDevice, RenderQueue},
    texture::GpuImage,
};

use constants::grid::height_compute_workgroups;

const HEIGHT_COMPUTE_SHADER_PATH: &str = "shaders/terrain_height_compute.wgsl";

pub struct HeightComputePlugin;

/// Runtime state for the height compute pipeline: lazily created pipeline ID
/// and bind group layout. Lives in the render world only, so extraction never
/// resets the cached pipeline.
#[derive(Resource, Default, Clone)]
pub struct HeightComputeState {
    pub pipeline: Option<CachedComputePipelineId>,
    pub bind_group_layout: Option<BindGroupLayout>,
}

impl Plugin for HeightComputePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ExtractResourcePlugin::<TerrainParams>::default())
            .add_plugins(ExtractResourcePlugin::<FrameInputs>::default())
            .add_plugins(ExtractResourcePlugin::<TerrainAssets>::default());

        let Some(render_app) = app.get_sub_app_mut(RenderApp) else {
            return;
        };

        render_app
            .init_resource::<HeightComputeState>()
            .add_systems(Render, run_height_compute.in_set(RenderSet::Queue));
    }
}

/// Dispatches the height kernel for the current frame. The camera moves every
/// frame, so the whole position buffer is rewritten unconditionally; there is
/// no partial or incremental update path.
pub fn run_height_compute(
    mut state: ResMut<HeightComputeState>,
    terrain: Res<TerrainParams>,
    inputs: Res<FrameInputs>,
    assets: Res<TerrainAssets>,
    render_device: Res<RenderDevice>,
    render_queue: Res<RenderQueue>,
    pipeline_cache: Res<PipelineCache>,
    gpu_images: Res<RenderAssets<GpuImage>>,
    asset_server: Res<AssetServer>,
) {
    if state.bind_group_layout.is_none() {
        initialise_compute_pipeline(&mut state, &render_device, &pipeline_cache, &asset_server);
    }

    let Some(bind_group_layout) = &state.bind_group_layout else {
        return;
    };
    let Some(pipeline_id) = state.pipeline else {
        return;
    };
    let Some(pipeline) = pipeline_cache.get_compute_pipeline(pipeline_id) else {
        return;
    };
    let Some(base_gpu) = gpu_images.get(&assets.base_offset_texture) else {
        return;
    };
    let Some(position_gpu) = gpu_images.get(&assets.position_texture) else {
        return;
    };

    let params_buffer = create_kernel_params_buffer(&render_device, &terrain, &inputs);

    let bind_group = render_device.create_bind_group(
        "terrain_height_bind_group",
        bind_group_layout,
        &[
            BindGroupEntry {
                binding: 0,
                resource: BindingResource::TextureView(&base_gpu.texture_view),
            },
            BindGroupEntry {
                binding: 1,
                resource: BindingResource::TextureView(&position_gpu.texture_view),
            },
            BindGroupEntry {
                binding: 2,
                resource: params_buffer.as_entire_binding(),
            },
        ],
    );

    let mut encoder = render_device.create_command_encoder(&Default::default());
    {
        let mut pass = encoder.begin_compute_pass(&ComputePassDescriptor {
            label: Some("terrain_height_compute"),
            timestamp_writes: None,
        });
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        let workgroups = height_compute_workgroups();
        pass.dispatch_workgroups(workgroups, workgroups, 1);
    }
    render_queue.submit([encoder.finish()]);
}

/// Bindings: 0 base-offset texture (read), 1 position storage texture
/// (write), 2 kernel parameter uniform.
fn initialise_compute_pipeline(
    state: &mut HeightComputeState,
    render_device: &RenderDevice,
    pipeline_cache: &PipelineCache,
    asset_server: &AssetServer,
) {
    let bind_group_layout = render_device.create_bind_group_layout(
        "terrain_height_compute_layout",
        &[
            BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::COMPUTE,
                ty: BindingType::Texture {
                    sample_type: TextureSampleType::Float { filterable: false },
                    view_dimension: TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            BindGroupLayoutEntry {
                binding: 1,
                visibility: ShaderStages::COMPUTE,
                ty: BindingType::StorageTexture {
                    access: StorageTextureAccess::WriteOnly,
                    format: TextureFormat::Rgba32Float,
                    view_dimension: TextureViewDimension::D2,
                },
                count: None,
            },
            BindGroupLayoutEntry {
                binding: 2,
                visibility: ShaderStages::COMPUTE,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    );

    let shader = asset_server.load(HEIGHT_COMPUTE_SHADER_PATH);
    let pipeline = pipeline_cache.queue_compute_pipeline(ComputePipelineDescriptor {
        label: Some("terrain_height_compute".into()),
        layout: vec![bind_group_layout.clone()],
        push_constant_ranges: Vec::new(),
        shader,
        shader_defs: vec![],
        entry_point: "main".into(),
        zero_initialize_workgroup_memory: true,
    });

    state.bind_group_layout = Some(bind_group_layout);
    state.pipeline = Some(pipeline);
}

fn create_kernel_params_buffer(
    render_device: &RenderDevice,
    terrain: &TerrainParams,
    inputs: &FrameInputs,
) -> bevy::render::render_resource::Buffer {
    use bytemuck::{Pod, Zeroable};

    // Layout mirrors HeightKernelParams in terrain_height_compute.wgsl.
    #[repr(C)]
    #[derive(Clone, Copy, Pod, Zeroable)]
    struct HeightKernelUniform {
        camera_pos: [f32; 2],
        snap_offset: [f32; 2],
        octaves: i32,
        frequency: f32,
        amplitude: f32,
        lacunarity: f32,
        persistence: f32,
        height_scale: f32,
        height_offset: f32,
        water_floor: f32,
        horizon_distance: f32,
        horizon_curve: f32,
        _pad: [f32; 2],
    }

    let noise = &terrain.noise;
    let uniform = HeightKernelUniform {
        camera_pos: [inputs.camera_position.x, inputs.camera_position.z],
        snap_offset: inputs.snap_offset.to_array(),
        octaves: noise.octaves,
        frequency: noise.frequency,
        amplitude: noise.amplitude,
        lacunarity: noise.lacunarity,
        persistence: noise.persistence,
        height_scale: noise.height_scale,
        height_offset: noise.height_offset,
        water_floor: noise.water_floor,
        horizon_distance: terrain.horizon.distance,
        horizon_curve: terrain.horizon.curve,
        _pad: [0.0; 2],
    };

    render_device.create_buffer_with_data(&BufferInitDescriptor {
        label: Some("terrain_height_kernel_params"),
        contents: bytemuck::cast_slice(&[uniform]),
        usage: BufferUsages::UNIFORM,
    })
}
