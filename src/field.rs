use std::f32::consts::PI;

use crate::generation::PerlinField;
use crate::raster::Raster;

/// Height source queried by the grid builder at each (i, j) grid coordinate.
///
/// Samples are raw field values; the builder applies the height scale factor
/// exactly once on top of them.
pub enum SampleField<'a> {
    /// Crossed sine waves over the normalized grid.
    Analytic,
    /// Fractal noise precomputed for the current grid resolution.
    Perlin(PerlinField),
    /// Per-pixel intensity of the loaded raster. Sampling with no raster
    /// loaded, or past the raster bounds, yields a neutral height of 0.
    Image(Option<&'a Raster>),
}

pub fn sample_analytic(x: f32, y: f32) -> f32 {
    (x * 2.0 * PI).sin() * (y * 2.0 * PI).sin() * 0.1
}

impl SampleField<'_> {
    pub fn sample(&self, i: u32, j: u32, n: u32, m: u32) -> f32 {
        match self {
            SampleField::Analytic => {
                let x = j as f32 / n as f32;
                let y = i as f32 / m as f32;
                sample_analytic(x, y)
            }
            SampleField::Perlin(field) => field.height_at(i, j),
            SampleField::Image(Some(raster)) => raster.intensity(i, j).unwrap_or(0.0),
            SampleField::Image(None) => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analytic_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(sample_analytic(0.3, 0.7), sample_analytic(0.3, 0.7));
        }
    }

    #[test]
    fn analytic_is_zero_at_sine_crossings() {
        for &x in &[0.0, 0.5, 1.0] {
            for &y in &[0.0, 0.5, 1.0] {
                assert!(sample_analytic(x, y).abs() < 1e-6);
            }
        }
        // and anywhere one axis sits on a crossing
        assert!(sample_analytic(0.5, 0.123).abs() < 1e-6);
    }

    #[test]
    fn analytic_peak_amplitude() {
        let z = sample_analytic(0.25, 0.25);
        assert!((z - 0.1).abs() < 1e-6);
    }

    #[test]
    fn image_field_without_raster_is_flat() {
        let field = SampleField::Image(None);
        assert_eq!(field.sample(0, 0, 4, 4), 0.0);
        assert_eq!(field.sample(3, 2, 4, 4), 0.0);
    }

    #[test]
    fn image_field_fails_closed_past_raster_bounds() {
        let raster = Raster::from_rgba8(2, 2, vec![255; 16]);
        let field = SampleField::Image(Some(&raster));
        // inside the raster
        assert_eq!(field.sample(1, 1, 4, 4), 1.0);
        // grid coordinates beyond the 2x2 raster
        assert_eq!(field.sample(3, 0, 4, 4), 0.0);
        assert_eq!(field.sample(0, 3, 4, 4), 0.0);
    }
}
