use bevy::prelude::Vec3;

/// Approximates per-vertex normals from the six row-major neighbors at
/// offsets {-N-1, -N, +1, +N+1, +N, -1} around each vertex.
///
/// A neighbor counts only if its derived (row, col) = (p/N, p%N) lands inside
/// [0,N] x [0,M] and p addresses the vertex slice; everything else contributes
/// a zero vector. The normal is the normalized sum of the valid neighbor
/// positions with the z component forced upward, which is biased but
/// qualitatively right for a surface with no overhangs.
pub fn estimate_normals(vertices: &[Vec3], n: u32, m: u32) -> Vec<Vec3> {
    let n = n as i64;
    let m = m as i64;
    let len = vertices.len() as i64;
    let offsets = [-n - 1, -n, 1, n + 1, n, -1];

    let mut normals = Vec::with_capacity(vertices.len());

    for k in 0..len {
        let mut sum = Vec3::ZERO;

        for offset in offsets {
            let p = k + offset;
            if p < 0 || p >= len {
                continue;
            }

            let row = p / n;
            let col = p % n;
            if row >= 0 && col >= 0 && row <= n && col <= m {
                sum += vertices[p as usize];
            }
        }

        if sum.z < 0.0 {
            sum.z = -sum.z;
        }

        normals.push(sum.try_normalize().unwrap_or(Vec3::Z));
    }

    normals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::SampleField;
    use crate::meshing::grid::build_grid;

    #[test]
    fn output_matches_input_length_and_is_unit() {
        for (n, m) in [(1, 1), (4, 4), (5, 9)] {
            let (vertices, _) = build_grid(n, m, &SampleField::Analytic, 1.0);
            let normals = estimate_normals(&vertices, n, m);
            assert_eq!(normals.len(), vertices.len());
            for normal in &normals {
                let unit = (normal.length() - 1.0).abs() < 1e-5;
                assert!(unit || *normal == Vec3::Z, "non-unit normal {normal:?}");
            }
        }
    }

    #[test]
    fn normals_never_point_downward() {
        let (vertices, _) = build_grid(6, 6, &SampleField::Analytic, 1.0);
        for normal in estimate_normals(&vertices, 6, 6) {
            assert!(normal.z >= 0.0);
        }
    }

    #[test]
    fn zero_neighbor_sum_falls_back_to_up() {
        let vertices = vec![Vec3::ZERO; 4];
        for normal in estimate_normals(&vertices, 1, 1) {
            assert_eq!(normal, Vec3::Z);
        }
    }

    #[test]
    fn flat_interior_normal_is_finite() {
        // A flat grid at z = 0: sums are in-plane, the forced |z| keeps them
        // there, and the result must still normalize without NaN.
        let (vertices, _) = build_grid(3, 3, &SampleField::Image(None), 1.0);
        for normal in estimate_normals(&vertices, 3, 3) {
            assert!(normal.is_finite());
        }
    }
}
