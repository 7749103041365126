pub mod camera;
pub mod field;
pub mod generation;
pub mod meshing;
pub mod raster;
pub mod settings;
pub mod ui;

pub use field::SampleField;
pub use raster::Raster;
