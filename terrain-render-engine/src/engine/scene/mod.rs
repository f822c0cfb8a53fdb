pub mod caster;
pub mod frame_inputs;
