pub mod camera;
pub mod compute;
pub mod core;
pub mod render;
pub mod scene;
pub mod terrain;
