use bevy::prelude::*;

use crate::raster::Raster;

/// Which field the grid builder samples.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HeightSource {
    Sine,
    Perlin,
    Image,
}

/// All overlay-bound viewer state. One writer (the overlay systems), replaced
/// field-by-field between frames, never from another thread.
#[derive(Resource)]
pub struct ViewerSettings {
    pub file_path: String,
    pub loaded_file: Option<String>,
    pub grid_n: u32,
    pub grid_m: u32,
    /// Slider value in [0, 100]; divided by 100 before it reaches the builder.
    pub height_scale: f32,
    pub source: HeightSource,
    pub seed: u32,
    pub base_color: [f32; 3],
    pub wireframe: bool,
    pub vsync: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            file_path: String::new(),
            loaded_file: None,
            grid_n: 40,
            grid_m: 20,
            height_scale: 30.0,
            source: HeightSource::Sine,
            seed: 2,
            base_color: [1.0, 1.0, 1.0],
            wireframe: false,
            vsync: true,
        }
    }
}

impl ViewerSettings {
    pub fn normalized_height_scale(&self) -> f32 {
        self.height_scale / 100.0
    }
}

/// The currently decoded image, if any. Only a successful load replaces it.
#[derive(Resource, Default)]
pub struct LoadedRaster(pub Option<Raster>);

#[derive(Resource)]
pub struct LightSettings {
    pub direction: Vec3,
    pub ambient_color: [f32; 3],
    pub ambient_brightness: f32,
    pub sun_color: [f32; 3],
    pub illuminance: f32,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-0.2, -1.0, 0.3),
            ambient_color: [0.5, 0.5, 0.5],
            ambient_brightness: 0.05,
            sun_color: [1.0, 1.0, 1.0],
            illuminance: 10_000.0,
        }
    }
}

/// Fired by the overlay's Generate Grid action; the rebuild system replaces
/// the mesh asset wholesale in the same frame.
pub struct RegenerateMesh;
