pub mod assets;
pub mod field;
pub mod grid;
pub mod noise;
pub mod params;
pub mod preset;
