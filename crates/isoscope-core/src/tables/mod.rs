//! Static case tables for marching squares and marching cubes.
//!
//! A cell's case code has bit `j` set when corner `j` lies above the
//! threshold. Each table maps a code to an ordered list of [`PointRef`]s,
//! grouped into primitives: pairs for line segments, triples for triangles.
//! The tables are total over their code domains; codes 0 and all-set map to
//! empty entries.

mod cubes;
mod squares;

pub use cubes::{CORNER_OFFSETS, EDGE_CORNERS_3D, TRIANGLE_TABLE};
pub use squares::{EDGE_CORNERS_2D, FILL_TABLE, SEGMENT_TABLE};

/// An abstract point of a cell, resolved to coordinates by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointRef {
    /// Cell corner `n`.
    Corner(u8),
    /// Threshold crossing on cell edge `n`.
    Edge(u8),
    /// Average of the four edge crossings of a quad cell.
    Center,
}

impl PointRef {
    /// Returns the edge index of an edge crossing.
    #[must_use]
    pub const fn edge(self) -> Option<u8> {
        match self {
            Self::Edge(e) => Some(e),
            Self::Corner(_) | Self::Center => None,
        }
    }
}

/// Case table entry holding up to `N` point references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseEntry<const N: usize> {
    points: [PointRef; N],
    len: u8,
}

impl<const N: usize> CaseEntry<N> {
    /// An entry with no primitives.
    pub const EMPTY: Self = Self {
        points: [PointRef::Center; N],
        len: 0,
    };

    /// Builds an entry from a point list.
    ///
    /// # Panics
    ///
    /// Panics (at compile time in const contexts) if `points` holds more
    /// than `N` references.
    #[must_use]
    pub const fn new(points: &[PointRef]) -> Self {
        assert!(points.len() <= N, "case entry overflow");
        let mut entry = Self::EMPTY;
        let mut i = 0;
        while i < points.len() {
            entry.points[i] = points[i];
            i += 1;
        }
        #[allow(clippy::cast_possible_truncation)]
        let len = points.len() as u8;
        entry.len = len;
        entry
    }

    /// Returns the point references in emission order.
    #[must_use]
    pub fn points(&self) -> &[PointRef] {
        &self.points[..self.len as usize]
    }

    /// Returns the number of point references.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns true for codes that emit nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_holds_given_points() {
        const ENTRY: CaseEntry<4> = CaseEntry::new(&[PointRef::Edge(1), PointRef::Corner(2)]);
        assert_eq!(ENTRY.len(), 2);
        assert_eq!(ENTRY.points(), &[PointRef::Edge(1), PointRef::Corner(2)]);
        assert!(CaseEntry::<4>::EMPTY.is_empty());
    }

    #[test]
    fn test_edge_index() {
        assert_eq!(PointRef::Edge(7).edge(), Some(7));
        assert_eq!(PointRef::Corner(7).edge(), None);
        assert_eq!(PointRef::Center.edge(), None);
    }
}
