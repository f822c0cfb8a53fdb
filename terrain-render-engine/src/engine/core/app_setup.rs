use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::camera::fly_camera::{FlyCamera, camera_controller};
use crate::engine::compute::height_compute::HeightComputePlugin;
use crate::engine::render::retro_post_processing::RetroPostProcessPlugin;
use crate::engine::render::terrain_material::{
    TerrainMaterial, TerrainShadingUniform, update_terrain_shading,
};
use crate::engine::scene::caster::{drive_shadow_caster, spawn_shadow_caster};
use crate::engine::scene::frame_inputs::gather_frame_inputs;
use crate::engine::terrain::assets::{
    TerrainAssets, create_biome_placeholder, create_shadow_decal,
};
use crate::engine::terrain::grid::{
    TerrainSurface, create_base_offset_image, create_position_image, create_terrain_grid_mesh,
};
use crate::engine::terrain::params::{FrameInputs, ShadingParams, TerrainParams};
use crate::engine::terrain::preset::{PresetLoader, TerrainPreset, apply_terrain_preset};

use constants::render_settings::RETRO_SETTINGS;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(MaterialPlugin::<TerrainMaterial>::default())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(JsonAssetPlugin::<TerrainPreset>::new(&["terrain.json"]))
        .add_plugins(HeightComputePlugin)
        .add_plugins(RetroPostProcessPlugin);

    app.init_resource::<TerrainParams>()
        .init_resource::<ShadingParams>()
        .init_resource::<FrameInputs>()
        .init_resource::<TerrainAssets>()
        .init_resource::<FlyCamera>()
        .init_resource::<PresetLoader>()
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                apply_terrain_preset,
                camera_controller,
                drive_shadow_caster,
                gather_frame_inputs,
                update_terrain_shading,
            )
                .chain(),
        )
        .add_systems(Update, fps_text_update_system);

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(super::window_config::create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}

/// Creates the grid textures, the terrain surface entity, the camera with the
/// retro filter attached, and the shadow-casting rig.
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut terrain_materials: ResMut<Assets<TerrainMaterial>>,
    mut standard_materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    fly: Res<FlyCamera>,
) {
    let assets = TerrainAssets {
        base_offset_texture: images.add(create_base_offset_image()),
        position_texture: images.add(create_position_image()),
        water_texture: images.add(create_biome_placeholder([0.10, 0.26, 0.45], 0.04, 11.0)),
        sand_texture: images.add(create_biome_placeholder([0.76, 0.68, 0.47], 0.06, 23.0)),
        grass_texture: images.add(create_biome_placeholder([0.22, 0.46, 0.20], 0.08, 37.0)),
        rock_texture: images.add(create_biome_placeholder([0.42, 0.40, 0.39], 0.10, 53.0)),
        shadow_decal_texture: images.add(create_shadow_decal()),
    };

    let material = terrain_materials.add(TerrainMaterial {
        position_texture: assets.position_texture.clone(),
        water_texture: assets.water_texture.clone(),
        sand_texture: assets.sand_texture.clone(),
        grass_texture: assets.grass_texture.clone(),
        rock_texture: assets.rock_texture.clone(),
        shadow_decal_texture: assets.shadow_decal_texture.clone(),
        shading: TerrainShadingUniform::default(),
    });

    // Vertex positions come from the compute stage, so the mesh's own AABB is
    // meaningless for culling.
    commands.spawn((
        TerrainSurface,
        Mesh3d(meshes.add(create_terrain_grid_mesh())),
        MeshMaterial3d(material),
        NoFrustumCulling,
    ));

    commands.insert_resource(assets);

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(fly.position),
        RETRO_SETTINGS,
    ));

    spawn_shadow_caster(&mut commands, &mut meshes, &mut standard_materials);
    spawn_ui(&mut commands);
}

#[derive(Component)]
struct FpsText;

fn spawn_ui(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    for mut text in &mut query {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                text.0 = format!("FPS: {value:.1}");
            }
        }
    }
}
