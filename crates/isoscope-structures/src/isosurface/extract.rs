//! Marching cubes over a 3D field.

use glam::Vec3;
use isoscope_core::tables::{EDGE_CORNERS_3D, TRIANGLE_TABLE};
use isoscope_core::{Field3, ScalarField};

use crate::cache::ExtractionStats;
use crate::color::ValueColor;
use crate::contour::case_code;
use crate::interp::edge_weight;
use crate::vertex::MeshVertex;

/// Extracts the `threshold` isosurface of `field` into `out`.
///
/// `out` is cleared first and receives three vertices per triangle, each
/// with the triangle's flat normal (pointing towards higher values) and the
/// color of the threshold normalized into the field's value range. Voxels
/// with a non-finite corner are skipped.
pub fn marching_cubes<F: Field3>(
    field: &F,
    threshold: f32,
    color: &ValueColor,
    out: &mut Vec<MeshVertex>,
) -> ExtractionStats {
    out.clear();
    let mut stats = ExtractionStats::default();
    let color_norm = field.scalars().normalize(threshold);
    let rgba = color.color(color_norm);

    for cell in 0..field.num_cells() {
        stats.cells_visited += 1;
        let corners = field.cell(cell);
        let values = corners.map(|c| field.point_scalar(c));
        if values.iter().any(|v| !v.is_finite()) {
            stats.degenerate_cells += 1;
            continue;
        }

        let entry = &TRIANGLE_TABLE[case_code(&values, threshold)];
        if entry.is_empty() {
            continue;
        }
        stats.crossing_cells += 1;

        let positions = corners.map(|c| field.point(c));
        let crossing = |e: u8| -> Vec3 {
            let (a, b) = EDGE_CORNERS_3D[e as usize];
            let (a, b) = (a as usize, b as usize);
            positions[a].lerp(positions[b], edge_weight(values[a], values[b], threshold))
        };

        for tri in entry.points().chunks_exact(3) {
            // Triangle entries only reference edge crossings.
            let [Some(e0), Some(e1), Some(e2)] = [tri[0].edge(), tri[1].edge(), tri[2].edge()]
            else {
                continue;
            };
            let [p0, p1, p2] = [crossing(e0), crossing(e1), crossing(e2)];
            let normal = (p1 - p0).cross(p2 - p0).normalize_or_zero();
            out.extend(
                [p0, p1, p2].map(|p| MeshVertex::new(p, normal, color_norm, rgba)),
            );
            stats.primitives += 1;
        }
    }

    log::debug!(
        "marching cubes at {threshold}: {} of {} voxels crossed, {} degenerate, {} triangles",
        stats.crossing_cells,
        stats.cells_visited,
        stats.degenerate_cells,
        stats.primitives
    );
    stats
}
