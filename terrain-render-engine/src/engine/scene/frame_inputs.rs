//! Per-frame input gathering.
//!
//! Collapses the collaborators' state (camera pose, caster pose) into the
//! `FrameInputs` snapshot once per frame, before the material uniform is
//! written and before extraction to the render world. Both GPU phases of the
//! frame therefore read one consistent set of inputs.

use bevy::prelude::*;

use super::caster::ShadowCaster;
use crate::engine::terrain::field;
use crate::engine::terrain::params::{FrameInputs, TerrainParams};
use constants::grid::CELL_SIZE;

pub fn gather_frame_inputs(
    mut inputs: ResMut<FrameInputs>,
    terrain: Res<TerrainParams>,
    camera_query: Query<&Transform, (With<Camera3d>, Without<ShadowCaster>)>,
    caster_query: Query<&Transform, With<ShadowCaster>>,
) {
    let Ok(camera_transform) = camera_query.single() else {
        return;
    };

    let camera_position = camera_transform.translation;
    let camera_xz = Vec2::new(camera_position.x, camera_position.z);

    inputs.camera_position = camera_position;
    inputs.snap_offset = field::snap_offset(camera_xz, CELL_SIZE);

    let Ok(caster_transform) = caster_query.single() else {
        return;
    };

    let caster_position = caster_transform.translation;
    let caster_xz = Vec2::new(caster_position.x, caster_position.z);
    let (yaw, _, _) = caster_transform.rotation.to_euler(EulerRot::YXZ);

    inputs.caster_position = caster_position;
    inputs.caster_yaw = yaw;
    inputs.caster_height_above_ground = field::height_above_ground(
        caster_xz,
        caster_position.y,
        camera_xz,
        &terrain.noise,
        &terrain.horizon,
    );
}
