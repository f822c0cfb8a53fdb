pub mod fly_camera;
