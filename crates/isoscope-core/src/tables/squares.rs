//! Marching squares tables.
//!
//! Corners are numbered counter-clockwise from the bottom left and edge `j`
//! runs from corner `j` to corner `(j + 1) % 4`:
//!
//! ```text
//!   3 --- E2 --- 2
//!   |            |
//!  E3            E1
//!   |            |
//!   0 --- E0 --- 1
//! ```
//!
//! Segments are oriented so the above-threshold region lies on their left.
//! Saddles (codes 5 and 10) isolate each above-threshold corner with its own
//! segment.

use super::{CaseEntry, PointRef};

use PointRef::{Center as C, Corner, Edge};

/// Corner pairs `(from, to)` of the four quad edges.
pub const EDGE_CORNERS_2D: [(u8, u8); 4] = [(0, 1), (1, 2), (2, 3), (3, 0)];

const E0: PointRef = Edge(0);
const E1: PointRef = Edge(1);
const E2: PointRef = Edge(2);
const E3: PointRef = Edge(3);
const C0: PointRef = Corner(0);
const C1: PointRef = Corner(1);
const C2: PointRef = Corner(2);
const C3: PointRef = Corner(3);

/// Contour segments per case code, two references per segment.
pub static SEGMENT_TABLE: [CaseEntry<4>; 16] = [
    CaseEntry::EMPTY,
    CaseEntry::new(&[E0, E3]),
    CaseEntry::new(&[E1, E0]),
    CaseEntry::new(&[E1, E3]),
    CaseEntry::new(&[E2, E1]),
    CaseEntry::new(&[E0, E3, E2, E1]),
    CaseEntry::new(&[E2, E0]),
    CaseEntry::new(&[E2, E3]),
    CaseEntry::new(&[E3, E2]),
    CaseEntry::new(&[E0, E2]),
    CaseEntry::new(&[E1, E0, E3, E2]),
    CaseEntry::new(&[E1, E2]),
    CaseEntry::new(&[E3, E1]),
    CaseEntry::new(&[E0, E1]),
    CaseEntry::new(&[E3, E0]),
    CaseEntry::EMPTY,
];

/// Counter-clockwise triangles covering the above-threshold part of a cell.
///
/// Three-corner cases fan around the cell center.
#[rustfmt::skip]
pub static FILL_TABLE: [CaseEntry<15>; 16] = [
    CaseEntry::EMPTY,
    CaseEntry::new(&[C0, E0, E3]),
    CaseEntry::new(&[E0, C1, E1]),
    CaseEntry::new(&[C0, C1, E1,  C0, E1, E3]),
    CaseEntry::new(&[E1, C2, E2]),
    CaseEntry::new(&[C0, E0, E3,  E1, C2, E2]),
    CaseEntry::new(&[E0, C1, C2,  E0, C2, E2]),
    CaseEntry::new(&[C, C0, C1,  C, C1, C2,  C, C2, E2,  C, E2, E3,  C, E3, C0]),
    CaseEntry::new(&[E2, C3, E3]),
    CaseEntry::new(&[C0, E0, E2,  C0, E2, C3]),
    CaseEntry::new(&[E0, C1, E1,  E2, C3, E3]),
    CaseEntry::new(&[C, C0, C1,  C, C1, E1,  C, E1, E2,  C, E2, C3,  C, C3, C0]),
    CaseEntry::new(&[E1, C2, C3,  E1, C3, E3]),
    CaseEntry::new(&[C, C0, E0,  C, E0, E1,  C, E1, C2,  C, C2, C3,  C, C3, C0]),
    CaseEntry::new(&[C, E0, C1,  C, C1, C2,  C, C2, C3,  C, C3, E3,  C, E3, E0]),
    CaseEntry::EMPTY,
];

#[cfg(test)]
mod tests {
    use super::*;

    fn above(code: usize, corner: u8) -> bool {
        (code >> corner) & 1 == 1
    }

    fn straddles(code: usize, edge: u8) -> bool {
        let (a, b) = EDGE_CORNERS_2D[edge as usize];
        above(code, a) != above(code, b)
    }

    fn unit_position(p: PointRef) -> (f32, f32) {
        match p {
            Corner(0) => (0.0, 0.0),
            Corner(1) => (1.0, 0.0),
            Corner(2) => (1.0, 1.0),
            Corner(3) => (0.0, 1.0),
            Edge(0) => (0.5, 0.0),
            Edge(1) => (1.0, 0.5),
            Edge(2) => (0.5, 1.0),
            Edge(3) => (0.0, 0.5),
            C => (0.5, 0.5),
            other => panic!("invalid point {other:?}"),
        }
    }

    fn signed_area(tri: &[PointRef]) -> f32 {
        let (ax, ay) = unit_position(tri[0]);
        let (bx, by) = unit_position(tri[1]);
        let (cx, cy) = unit_position(tri[2]);
        ((bx - ax) * (cy - ay) - (by - ay) * (cx - ax)) / 2.0
    }

    #[test]
    fn test_trivial_codes_are_empty() {
        assert!(SEGMENT_TABLE[0].is_empty());
        assert!(SEGMENT_TABLE[15].is_empty());
        assert!(FILL_TABLE[0].is_empty());
        assert!(FILL_TABLE[15].is_empty());
    }

    #[test]
    fn test_segment_counts() {
        for (code, entry) in SEGMENT_TABLE.iter().enumerate() {
            assert_eq!(entry.len() % 2, 0, "code {code}");
            let expected = match code {
                0 | 15 => 0,
                5 | 10 => 4,
                _ => 2,
            };
            assert_eq!(entry.len(), expected, "code {code}");
        }
    }

    #[test]
    fn test_segments_use_straddling_edges() {
        for (code, entry) in SEGMENT_TABLE.iter().enumerate() {
            for p in entry.points() {
                let Edge(e) = *p else {
                    panic!("code {code}: segment endpoint {p:?} is not an edge");
                };
                assert!(straddles(code, e), "code {code}: edge {e} does not straddle");
            }
        }
    }

    #[test]
    fn test_complement_reverses_segment() {
        for code in (1..15).filter(|c| *c != 5 && *c != 10) {
            let a = SEGMENT_TABLE[code].points();
            let b = SEGMENT_TABLE[15 - code].points();
            assert_eq!(a, &[b[1], b[0]], "code {code}");
        }
    }

    #[test]
    fn test_above_region_on_left() {
        for code in (1..15).filter(|c| *c != 5 && *c != 10) {
            let seg = SEGMENT_TABLE[code].points();
            let (ax, ay) = unit_position(seg[0]);
            let (bx, by) = unit_position(seg[1]);
            for corner in 0..4 {
                let (px, py) = unit_position(Corner(corner));
                let side = (bx - ax) * (py - ay) - (by - ay) * (px - ax);
                assert_eq!(side > 0.0, above(code, corner), "code {code} corner {corner}");
            }
        }
    }

    #[test]
    fn test_saddles_isolate_above_corners() {
        // Code 5: corners 0 and 2 above, each cut off on its own.
        assert_eq!(SEGMENT_TABLE[5].points(), &[E0, E3, E2, E1]);
        assert_eq!(SEGMENT_TABLE[10].points(), &[E1, E0, E3, E2]);
    }

    #[test]
    fn test_fill_triangles_are_ccw_and_above() {
        for (code, entry) in FILL_TABLE.iter().enumerate() {
            assert_eq!(entry.len() % 3, 0, "code {code}");
            for tri in entry.points().chunks(3) {
                assert!(signed_area(tri) > 0.0, "code {code}: {tri:?}");
                for p in tri {
                    match *p {
                        Corner(c) => assert!(above(code, c), "code {code}: corner {c}"),
                        Edge(e) => assert!(straddles(code, e), "code {code}: edge {e}"),
                        C => {}
                    }
                }
            }
        }
    }

    #[test]
    fn test_fill_complements_tile_cell() {
        for code in (1..15).filter(|c| *c != 5 && *c != 10) {
            let area: f32 = FILL_TABLE[code]
                .points()
                .chunks(3)
                .chain(FILL_TABLE[15 - code].points().chunks(3))
                .map(signed_area)
                .sum();
            assert!((area - 1.0).abs() < 1e-6, "code {code}: area {area}");
        }
    }
}
