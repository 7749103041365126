use bevy::prelude::{UVec3, Vec3};

use crate::field::SampleField;

/// Builds the full N×M cell grid over the sample field.
///
/// Vertices are emitted row-major (i outer, j inner) at x = j/N, y = i/M with
/// z = sample * height_scale; the index pass below depends on exactly this
/// ordering. z is never clamped here; the settings panel keeps the scale
/// factor itself in range before calling in.
pub fn build_grid(
    n: u32,
    m: u32,
    field: &SampleField,
    height_scale: f32,
) -> (Vec<Vec3>, Vec<UVec3>) {
    debug_assert!(n >= 1 && m >= 1);

    let mut vertices = Vec::with_capacity(((n + 1) * (m + 1)) as usize);

    for i in 0..=n {
        for j in 0..=m {
            let x = j as f32 / n as f32;
            let y = i as f32 / m as f32;
            let z = field.sample(i, j, n, m) * height_scale;
            vertices.push(Vec3::new(x, y, z));
        }
    }

    let mut indices = Vec::with_capacity((2 * n * m) as usize);

    for j in 0..n {
        for i in 0..m {
            let row1 = j * (m + 1);
            let row2 = (j + 1) * (m + 1);

            indices.push(UVec3::new(row1 + i, row1 + i + 1, row2 + i + 1));
            indices.push(UVec3::new(row1 + i, row2 + i + 1, row2 + i));
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts_hold(n: u32, m: u32) {
        let (vertices, indices) = build_grid(n, m, &SampleField::Analytic, 1.0);
        assert_eq!(vertices.len(), ((n + 1) * (m + 1)) as usize);
        assert_eq!(indices.len(), (2 * n * m) as usize);
        for tri in &indices {
            assert!(tri.x < vertices.len() as u32);
            assert!(tri.y < vertices.len() as u32);
            assert!(tri.z < vertices.len() as u32);
        }
    }

    #[test]
    fn vertex_and_triangle_counts() {
        for (n, m) in [(1, 1), (1, 5), (3, 5), (7, 2), (40, 20)] {
            counts_hold(n, m);
        }
    }

    #[test]
    fn vertices_are_row_major() {
        let n = 2;
        let m = 3;
        let (vertices, _) = build_grid(n, m, &SampleField::Analytic, 1.0);
        for i in 0..=n {
            for j in 0..=m {
                let k = (i * (m + 1) + j) as usize;
                assert_eq!(vertices[k].x, j as f32 / n as f32);
                assert_eq!(vertices[k].y, i as f32 / m as f32);
            }
        }
    }

    #[test]
    fn first_cell_winding() {
        let m = 3;
        let (_, indices) = build_grid(2, m, &SampleField::Analytic, 1.0);
        assert_eq!(indices[0], UVec3::new(0, 1, m + 2));
        assert_eq!(indices[1], UVec3::new(0, m + 2, m + 1));
    }

    #[test]
    fn white_raster_unit_scale_gives_unit_heights() {
        use crate::raster::Raster;

        let raster = Raster::from_rgba8(2, 2, vec![255; 16]);
        let field = SampleField::Image(Some(&raster));
        let (vertices, indices) = build_grid(1, 1, &field, 1.0);

        assert_eq!(vertices.len(), 4);
        assert_eq!(indices.len(), 2);
        for v in &vertices {
            assert_eq!(v.z, 1.0);
        }
    }

    #[test]
    fn height_scale_multiplies_samples() {
        let raster = crate::raster::Raster::from_rgba8(2, 2, vec![255; 16]);
        let field = SampleField::Image(Some(&raster));
        let (vertices, _) = build_grid(1, 1, &field, 0.3);
        for v in &vertices {
            assert!((v.z - 0.3).abs() < 1e-6);
        }
    }

    #[test]
    fn undersized_raster_fails_closed() {
        let raster = crate::raster::Raster::from_rgba8(2, 2, vec![255; 16]);
        let field = SampleField::Image(Some(&raster));
        let n = 4;
        let m = 4;
        let (vertices, _) = build_grid(n, m, &field, 1.0);
        for i in 0..=n {
            for j in 0..=m {
                let v = vertices[(i * (m + 1) + j) as usize];
                if i < 2 && j < 2 {
                    assert_eq!(v.z, 1.0);
                } else {
                    assert_eq!(v.z, 0.0);
                }
            }
        }
    }
}
