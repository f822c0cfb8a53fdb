pub mod dither;
pub mod grid;
pub mod render_settings;
pub mod terrain_defaults;
