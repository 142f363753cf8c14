//! Marching squares over a 2D field.

use glam::Vec2;
use isoscope_core::tables::{EDGE_CORNERS_2D, FILL_TABLE, SEGMENT_TABLE};
use isoscope_core::{Field2, PointRef, ScalarField};

use super::{ContourPlacement, ContourSettings, ContourStyle};
use crate::cache::ExtractionStats;
use crate::interp::edge_weight;
use crate::vertex::ContourVertex;

/// Extracts the `threshold` level set of `field` into `out`.
///
/// `out` is cleared first. Lines emit two vertices per segment, filled
/// bands three per triangle. Cells with a non-finite corner are skipped.
pub fn marching_squares<F: Field2>(
    field: &F,
    threshold: f32,
    settings: &ContourSettings,
    out: &mut Vec<ContourVertex>,
) -> ExtractionStats {
    out.clear();
    let mut stats = ExtractionStats::default();
    let per_primitive = match settings.style {
        ContourStyle::Lines => 2,
        ContourStyle::Filled => 3,
    };

    for cell in 0..field.num_cells() {
        stats.cells_visited += 1;
        let corners = field.cell(cell);
        let values = corners.map(|c| field.point_scalar(c));
        if values.iter().any(|v| !v.is_finite()) {
            stats.degenerate_cells += 1;
            continue;
        }

        let code = case_code(&values, threshold);
        let points = match settings.style {
            ContourStyle::Lines => SEGMENT_TABLE[code].points(),
            ContourStyle::Filled => FILL_TABLE[code].points(),
        };
        if points.is_empty() {
            continue;
        }
        stats.crossing_cells += 1;
        stats.primitives += points.len() / per_primitive;

        let positions = corners.map(|c| field.point(c));
        let weights = EDGE_CORNERS_2D.map(|(a, b)| {
            edge_weight(values[a as usize], values[b as usize], threshold)
        });
        let color = settings.color.color(&values, threshold);

        for &point in points {
            let (xy, stored) = match point {
                PointRef::Corner(c) => (positions[c as usize], Some(values[c as usize])),
                PointRef::Edge(e) => (edge_point(&positions, &weights, e as usize), None),
                PointRef::Center => (center_point(&positions, &weights), None),
            };
            let z = height(field, settings.placement, xy, stored, threshold);
            out.push(ContourVertex::new(xy.extend(z), color));
        }
    }

    log::debug!(
        "marching squares at {threshold}: {} of {} cells crossed, {} degenerate, {} primitives",
        stats.crossing_cells,
        stats.cells_visited,
        stats.degenerate_cells,
        stats.primitives
    );
    stats
}

/// Bit `j` is set when corner `j` lies above the threshold.
pub(crate) fn case_code<const N: usize>(values: &[f32; N], threshold: f32) -> usize {
    values
        .iter()
        .enumerate()
        .fold(0, |code, (j, v)| code | (usize::from(*v > threshold) << j))
}

fn edge_point(positions: &[Vec2; 4], weights: &[f32; 4], edge: usize) -> Vec2 {
    let (a, b) = EDGE_CORNERS_2D[edge];
    positions[a as usize].lerp(positions[b as usize], weights[edge])
}

fn center_point(positions: &[Vec2; 4], weights: &[f32; 4]) -> Vec2 {
    let sum: Vec2 = EDGE_CORNERS_2D
        .iter()
        .zip(weights)
        .map(|(&(a, b), &w)| positions[a as usize].lerp(positions[b as usize], w.clamp(0.0, 1.0)))
        .sum();
    sum / 4.0
}

fn height<F: Field2>(
    field: &F,
    placement: ContourPlacement,
    xy: Vec2,
    stored: Option<f32>,
    threshold: f32,
) -> f32 {
    match placement {
        ContourPlacement::Plane(z) => z,
        ContourPlacement::Surface { depth_scale } => {
            let value = stored.unwrap_or_else(|| field.evaluate(xy));
            let value = if value.is_finite() { value } else { threshold };
            value * depth_scale
        }
    }
}
