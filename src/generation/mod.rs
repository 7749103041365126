use ndarray::prelude::*;
use noise::{NoiseFn, Perlin};

pub struct NoiseSettings {
    scale: f32,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self { scale: 0.15 }
    }
}

/// Fractal noise heights precomputed over the grid, normalized to [0, 1].
pub struct PerlinField {
    data: Array2<f32>,
}

impl PerlinField {
    pub fn height_at(&self, i: u32, j: u32) -> f32 {
        let (rows, cols) = self.data.dim();
        if (i as usize) < rows && (j as usize) < cols {
            self.data[[i as usize, j as usize]]
        } else {
            0.0
        }
    }
}

pub fn perlin_field(
    (rows, cols): (usize, usize),
    seed: u32,
    noise_settings: NoiseSettings,
) -> PerlinField {
    let octaves = 8;
    let scale_start = noise_settings.scale;

    let perlin = Perlin::new(seed);

    let mut data = Array::zeros((rows, cols));

    for i in 0..rows {
        for j in 0..cols {
            let mut scale = 1.;

            for octave in 0..octaves {
                data[[i, j]] += scale
                    * perlin.get([
                        (octave as f32 * 1000. + scale_start / scale * i as f32) as f64,
                        (scale_start / scale * j as f32) as f64,
                    ]) as f32;
                scale /= 2.;
            }
        }
    }

    // Maximum possible magnitude of the octave sum
    let (max_magnitude, _) = (0..octaves).fold((0.0, 1.0), |(max_magnitude, scale), _| {
        (max_magnitude + scale, scale / 2.0)
    });

    // Convert the values from -max_magnitude..max_magnitude to 0..1
    PerlinField {
        data: (data / max_magnitude + 1.) / 2.,
    }
}
