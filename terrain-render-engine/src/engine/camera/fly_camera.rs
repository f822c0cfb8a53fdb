//! Free-flight viewpoint controller.
//!
//! Stands in for the excluded movement collaborator: the terrain engine only
//! consumes the camera's world position, so any controller that moves the
//! camera exercises the floating-origin path. Right-drag to look, WASD/QE to
//! move, shift/ctrl to scale speed.

use bevy::input::mouse::MouseMotion;
use bevy::math::EulerRot;
use bevy::prelude::*;

#[derive(Resource)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 28.0, 0.0),
            yaw: 0.0,
            pitch: -0.35,
            speed: 40.0,
        }
    }
}

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut fly: ResMut<FlyCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
        let yaw_sens = 0.0035;
        let pitch_sens = 0.0030;
        fly.yaw += -mouse_delta.x * yaw_sens;
        fly.pitch += -mouse_delta.y * pitch_sens;
        fly.pitch = fly.pitch.clamp(-1.55, 1.55);
    }

    let mut move_input = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        move_input.z -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        move_input.z += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        move_input.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        move_input.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyE) {
        move_input.y += 1.0; // Up
    }
    if keyboard.pressed(KeyCode::KeyQ) {
        move_input.y -= 1.0; // Down
    }

    if move_input != Vec3::ZERO {
        let view_rot = Quat::from_euler(EulerRot::YXZ, fly.yaw, fly.pitch, 0.0);
        let forward = (view_rot * Vec3::Z).normalize();
        let right = (view_rot * Vec3::X).normalize();
        let up = Vec3::Y;

        // Shift = faster, ctrl = slower.
        let mut speed = fly.speed;
        if keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
            speed *= 3.5;
        }
        if keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]) {
            speed *= 0.25;
        }

        let world_delta = right * move_input.x + up * move_input.y + forward * move_input.z;
        fly.position += world_delta.normalize() * speed * time.delta_secs();
    }

    camera_transform.translation = fly.position;
    camera_transform.rotation = Quat::from_euler(EulerRot::YXZ, fly.yaw, fly.pitch, 0.0);
}
