/// Segments per side of the terrain tile. The mesh topology is
/// `(GRID_SEGMENTS + 1)^2` vertices and never changes after creation.
pub const GRID_SEGMENTS: usize = 256;

/// World-space side length of the terrain tile in metres.
pub const TILE_SIZE: f32 = 600.0;

/// Vertices per side of the tile; also the side length of the base-offset
/// and position textures consumed by the height compute kernel.
pub const VERTEX_DIM: usize = GRID_SEGMENTS + 1;

/// World-space size of one grid cell. The camera snap offset moves in
/// discrete steps of this value, never continuously.
pub const CELL_SIZE: f32 = TILE_SIZE / GRID_SEGMENTS as f32;

/// Compute shader workgroup side; dispatch counts are derived from this.
pub const HEIGHT_COMPUTE_WORKGROUP_SIZE: u32 = 8;

/// Workgroups per axis needed to cover every vertex texel.
pub const fn height_compute_workgroups() -> u32 {
    (VERTEX_DIM as u32).div_ceil(HEIGHT_COMPUTE_WORKGROUP_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_size_divides_tile_exactly() {
        assert_eq!(CELL_SIZE * GRID_SEGMENTS as f32, TILE_SIZE);
    }

    #[test]
    fn workgroups_cover_every_vertex() {
        let covered = height_compute_workgroups() * HEIGHT_COMPUTE_WORKGROUP_SIZE;
        assert!(covered >= VERTEX_DIM as u32);
        assert!(covered - HEIGHT_COMPUTE_WORKGROUP_SIZE < VERTEX_DIM as u32);
    }
}
