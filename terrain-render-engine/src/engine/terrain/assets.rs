//! GPU-side assets owned by the terrain pipeline.
//!
//! Real surface textures are the business of the (excluded) asset-loading
//! collaborator; until it provides them the engine synthesises small
//! placeholder tiles at startup so shading always has something valid to
//! sample. The decal is authored here as a radial falloff disc.

use bevy::asset::RenderAssetUsages;
use bevy::image::{ImageAddressMode, ImageFilterMode, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::render::extract_resource::ExtractResource;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use super::noise;

const PLACEHOLDER_SIZE: usize = 64;
const DECAL_SIZE: usize = 128;

/// Handles to every texture the terrain pipeline touches. Extracted to the
/// render world so the compute stage can resolve its GPU images.
#[derive(Resource, Clone, Default, ExtractResource)]
pub struct TerrainAssets {
    /// Immutable base buffer (local vertex offsets), uploaded once.
    pub base_offset_texture: Handle<Image>,
    /// Per-frame output of the height compute kernel.
    pub position_texture: Handle<Image>,
    pub water_texture: Handle<Image>,
    pub sand_texture: Handle<Image>,
    pub grass_texture: Handle<Image>,
    pub rock_texture: Handle<Image>,
    pub shadow_decal_texture: Handle<Image>,
}

/// Mottled single-hue placeholder tile for one biome band.
pub fn create_biome_placeholder(base: [f32; 3], variation: f32, seed: f32) -> Image {
    let mut data = Vec::with_capacity(PLACEHOLDER_SIZE * PLACEHOLDER_SIZE * 4);
    for y in 0..PLACEHOLDER_SIZE {
        for x in 0..PLACEHOLDER_SIZE {
            let p = Vec2::new(x as f32 * 0.23 + seed, y as f32 * 0.23 - seed);
            let mottle = noise::gradient_noise(p) * variation;
            for channel in base {
                let v = ((channel + mottle).clamp(0.0, 1.0) * 255.0) as u8;
                data.push(v);
            }
            data.push(255);
        }
    }

    let mut image = Image::new(
        square_extent(PLACEHOLDER_SIZE),
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    );
    image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
        address_mode_u: ImageAddressMode::Repeat,
        address_mode_v: ImageAddressMode::Repeat,
        mag_filter: ImageFilterMode::Linear,
        min_filter: ImageFilterMode::Linear,
        ..default()
    });
    image
}

/// Soft radial shadow decal: opaque at the centre, fading to fully
/// transparent before the rim so the [0,1]^2 edge never shows a seam.
pub fn create_shadow_decal() -> Image {
    let mut data = Vec::with_capacity(DECAL_SIZE * DECAL_SIZE * 4);
    let half = DECAL_SIZE as f32 / 2.0;
    for y in 0..DECAL_SIZE {
        for x in 0..DECAL_SIZE {
            let r = Vec2::new(x as f32 + 0.5 - half, y as f32 + 0.5 - half).length() / half;
            let alpha = (1.0 - ((r - 0.25) / 0.7).clamp(0.0, 1.0)).powi(2);
            data.extend_from_slice(&[0, 0, 0, (alpha * 255.0) as u8]);
        }
    }

    let mut image = Image::new(
        square_extent(DECAL_SIZE),
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8Unorm,
        RenderAssetUsages::RENDER_WORLD,
    );
    image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
        address_mode_u: ImageAddressMode::ClampToEdge,
        address_mode_v: ImageAddressMode::ClampToEdge,
        mag_filter: ImageFilterMode::Linear,
        min_filter: ImageFilterMode::Linear,
        ..default()
    });
    image
}

fn square_extent(size: usize) -> Extent3d {
    Extent3d {
        width: size as u32,
        height: size as u32,
        depth_or_array_layers: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decal_alpha_vanishes_at_the_rim() {
        let image = create_shadow_decal();
        let data = image.data.as_ref().expect("decal has CPU-side data");
        // Corner texel is outside the disc entirely.
        assert_eq!(data[3], 0);
        // Centre texel is fully opaque.
        let centre = (DECAL_SIZE / 2 * DECAL_SIZE + DECAL_SIZE / 2) * 4;
        assert_eq!(data[centre + 3], 255);
    }

    #[test]
    fn biome_placeholder_is_opaque_and_tileable_in_format() {
        let image = create_biome_placeholder([0.2, 0.5, 0.2], 0.08, 3.0);
        let data = image.data.as_ref().expect("placeholder has CPU-side data");
        assert_eq!(data.len(), PLACEHOLDER_SIZE * PLACEHOLDER_SIZE * 4);
        assert!(data.chunks_exact(4).all(|px| px[3] == 255));
    }
}
