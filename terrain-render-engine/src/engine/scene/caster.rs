//! Stand-in flying actor that casts the terrain shadow decal.
//!
//! The real actor controller is an external collaborator; the engine only
//! needs a per-frame pose. This rig circles the camera above the terrain so
//! the decal path is always exercised.

use bevy::prelude::*;

use crate::engine::camera::fly_camera::FlyCamera;
use crate::engine::terrain::field;
use crate::engine::terrain::params::TerrainParams;

const ORBIT_RADIUS: f32 = 45.0;
const ORBIT_RATE: f32 = 0.22;
const HOVER_ALTITUDE: f32 = 12.0;

/// Marker for the entity whose pose drives the shadow decal.
#[derive(Component)]
pub struct ShadowCaster;

pub fn spawn_shadow_caster(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        ShadowCaster,
        Mesh3d(meshes.add(Capsule3d::new(1.2, 3.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.85, 0.3, 0.2),
            unlit: true,
            ..default()
        })),
        Transform::from_xyz(ORBIT_RADIUS, 20.0, 0.0),
    ));
}

/// Circles the caster around the camera, hugging the curvature-corrected
/// terrain height below it, yaw facing along the direction of motion.
pub fn drive_shadow_caster(
    mut caster_query: Query<&mut Transform, With<ShadowCaster>>,
    fly: Res<FlyCamera>,
    terrain: Res<TerrainParams>,
    time: Res<Time>,
) {
    let Ok(mut transform) = caster_query.single_mut() else {
        return;
    };

    let angle = time.elapsed_secs() * ORBIT_RATE;
    let camera_xz = Vec2::new(fly.position.x, fly.position.z);
    let xz = camera_xz + Vec2::new(angle.cos(), angle.sin()) * ORBIT_RADIUS;

    let ground = field::surface_height(xz, camera_xz, &terrain.noise, &terrain.horizon);
    let bob = (time.elapsed_secs() * 0.9).sin() * 2.0;
    transform.translation = Vec3::new(xz.x, ground + HOVER_ALTITUDE + bob, xz.y);

    // Tangent of the orbit; forward axis convention is (sin yaw, cos yaw).
    let velocity = Vec2::new(-angle.sin(), angle.cos());
    let yaw = velocity.x.atan2(velocity.y);
    transform.rotation = Quat::from_rotation_y(yaw);
}
