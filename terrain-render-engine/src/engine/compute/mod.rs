pub mod height_compute;
