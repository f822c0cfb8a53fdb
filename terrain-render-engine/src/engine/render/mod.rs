pub mod retro_post_processing;
pub mod terrain_material;
