//! Fixed-topology terrain grid: mesh, base-offset texture, position texture.
//!
//! The topology never changes after creation. Per-vertex world positions are
//! produced every frame by the height compute kernel into the position
//! texture; the surface material's vertex stage fetches them by vertex index.

use bevy::asset::RenderAssetUsages;
use bevy::image::{ImageFilterMode, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_resource::{
    Extent3d, TextureDimension, TextureFormat, TextureUsages,
};

use constants::grid::{GRID_SEGMENTS, TILE_SIZE, VERTEX_DIM};

/// Marker for the single terrain surface entity.
#[derive(Component)]
pub struct TerrainSurface;

/// Immutable local offset of one grid vertex within the tile, centred on the
/// tile's own origin. Assigned once at creation, never mutated.
pub fn base_offset(col: usize, row: usize) -> Vec2 {
    Vec2::new(
        (col as f32 / GRID_SEGMENTS as f32 - 0.5) * TILE_SIZE,
        (row as f32 / GRID_SEGMENTS as f32 - 0.5) * TILE_SIZE,
    )
}

/// Build the terrain mesh. `ATTRIBUTE_POSITION` carries the base buffer (the
/// local offsets); the vertex shader replaces it with the computed world
/// position, so the attribute only fixes the vertex buffer layout and the
/// vertex count.
pub fn create_terrain_grid_mesh() -> Mesh {
    let mut positions = Vec::with_capacity(VERTEX_DIM * VERTEX_DIM);
    for row in 0..VERTEX_DIM {
        for col in 0..VERTEX_DIM {
            let offset = base_offset(col, row);
            positions.push([offset.x, 0.0, offset.y]);
        }
    }

    let mut indices = Vec::with_capacity(GRID_SEGMENTS * GRID_SEGMENTS * 6);
    for row in 0..GRID_SEGMENTS as u32 {
        for col in 0..GRID_SEGMENTS as u32 {
            let i = row * VERTEX_DIM as u32 + col;
            let below = i + VERTEX_DIM as u32;
            indices.extend_from_slice(&[i, below, i + 1, i + 1, below, below + 1]);
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Upload the base buffer as an `Rgba32Float` texture read by the compute
/// kernel: texel (col, row) holds (offset.x, 0, offset.z, 1).
pub fn create_base_offset_image() -> Image {
    let mut data = Vec::with_capacity(VERTEX_DIM * VERTEX_DIM * 4 * 4);
    for row in 0..VERTEX_DIM {
        for col in 0..VERTEX_DIM {
            let offset = base_offset(col, row);
            for v in [offset.x, 0.0, offset.y, 1.0] {
                data.extend_from_slice(&v.to_le_bytes());
            }
        }
    }

    let mut image = Image::new(
        vertex_extent(),
        TextureDimension::D2,
        data,
        TextureFormat::Rgba32Float,
        RenderAssetUsages::RENDER_WORLD,
    );
    image.texture_descriptor.usage = TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST;
    image.sampler = nearest_sampler();
    image
}

/// Position buffer: written exclusively by the compute kernel each frame,
/// read exclusively by the surface material's vertex stage of the same frame.
pub fn create_position_image() -> Image {
    let mut image = Image::new_uninit(
        vertex_extent(),
        TextureDimension::D2,
        TextureFormat::Rgba32Float,
        RenderAssetUsages::RENDER_WORLD,
    );
    image.texture_descriptor.usage =
        TextureUsages::TEXTURE_BINDING | TextureUsages::STORAGE_BINDING;
    image.sampler = nearest_sampler();
    image
}

fn vertex_extent() -> Extent3d {
    Extent3d {
        width: VERTEX_DIM as u32,
        height: VERTEX_DIM as u32,
        depth_or_array_layers: 1,
    }
}

fn nearest_sampler() -> ImageSampler {
    ImageSampler::Descriptor(ImageSamplerDescriptor {
        mag_filter: ImageFilterMode::Nearest,
        min_filter: ImageFilterMode::Nearest,
        ..default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_has_fixed_vertex_and_index_counts() {
        let mesh = create_terrain_grid_mesh();
        assert_eq!(mesh.count_vertices(), VERTEX_DIM * VERTEX_DIM);
        let index_count = mesh.indices().map(|i| i.len()).unwrap_or(0);
        assert_eq!(index_count, GRID_SEGMENTS * GRID_SEGMENTS * 6);
    }

    #[test]
    fn base_offsets_span_the_tile_symmetrically() {
        let first = base_offset(0, 0);
        let last = base_offset(GRID_SEGMENTS, GRID_SEGMENTS);
        assert_eq!(first, Vec2::splat(-TILE_SIZE / 2.0));
        assert_eq!(last, Vec2::splat(TILE_SIZE / 2.0));

        let centre = base_offset(GRID_SEGMENTS / 2, GRID_SEGMENTS / 2);
        assert_eq!(centre, Vec2::ZERO);
    }

    #[test]
    fn every_index_references_a_valid_vertex() {
        let mesh = create_terrain_grid_mesh();
        let max = (VERTEX_DIM * VERTEX_DIM) as usize;
        if let Some(indices) = mesh.indices() {
            assert!(indices.iter().all(|i| i < max));
        } else {
            panic!("grid mesh must be indexed");
        }
    }
}
