//! Marching cubes tables.
//!
//! Voxel corner `i` sits at offset `(i & 1, (i >> 1) & 1, (i >> 2) & 1)` from
//! the minimum corner. The twelve edges are grouped by axis: four along x,
//! four along y and four along z (see [`EDGE_CORNERS_3D`]).
//!
//! Triangles are wound so that their `(b - a) x (c - a)` normals point
//! towards the above-threshold side. Face ambiguities are not resolved: each
//! code takes the classic triangulation.

#![allow(clippy::unreadable_literal, clippy::cast_possible_truncation)]

use glam::UVec3;

use super::{CaseEntry, PointRef};

/// Offsets of the eight voxel corners from the cell's minimum corner.
pub const CORNER_OFFSETS: [UVec3; 8] = [
    UVec3::new(0, 0, 0),
    UVec3::new(1, 0, 0),
    UVec3::new(0, 1, 0),
    UVec3::new(1, 1, 0),
    UVec3::new(0, 0, 1),
    UVec3::new(1, 0, 1),
    UVec3::new(0, 1, 1),
    UVec3::new(1, 1, 1),
];

/// Corner pairs of the twelve voxel edges.
pub const EDGE_CORNERS_3D: [(u8, u8); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Triangles per case code, three edge references per triangle.
pub static TRIANGLE_TABLE: [CaseEntry<15>; 256] = decode_all();

const fn decode_all() -> [CaseEntry<15>; 256] {
    let mut table = [CaseEntry::EMPTY; 256];
    let mut code = 0;
    while code < 256 {
        table[code] = decode(PACKED_TRIANGLES[code]);
        code += 1;
    }
    table
}

/// Bits `[3:0]` hold the triangle count, followed by one 4-bit edge index
/// per triangle vertex.
const fn decode(packed: u64) -> CaseEntry<15> {
    let mut entry = CaseEntry::EMPTY;
    let len = (packed & 0xF) as usize * 3;
    let mut i = 0;
    while i < len {
        entry.points[i] = PointRef::Edge(((packed >> (4 + 4 * i)) & 0xF) as u8);
        i += 1;
    }
    entry.len = len as u8;
    entry
}

/// Packed triangulations indexed by case code (bit `j` set when corner `j`
/// is above the threshold).
#[rustfmt::skip]
const PACKED_TRIANGLES: [u64; 256] = [
    0, 18433, 2385, 143955266,
    42001, 176259090, 1436604830452292, 724147968595,
    5553, 100608342969108, 162574594, 591509145619,
    73030562, 801204361987, 668566030659, 163101314,
    34337, 73425410, 727199575803140, 362478212387,
    2323440239468964, 137742672547, 1900908618382410757, 2623783208098404,
    95520290, 12775311047932294245, 7103874718248233397, 2728339631923524,
    2901063790822564949, 1443359556281892, 2923200302876740, 801441490467,
    10129, 2538193642857604, 122834978, 503707084675,
    127050770, 8721082628082003989, 11820349930268368933, 2280890014640004,
    2165106320445780, 2860543885641537797, 69275726195, 2165106202149444,
    2860446751369014181, 2295263717447940, 43570095105972, 724700725875,
    108558722, 302601798803, 443829749251, 122971970,
    1900945754488837749, 27584723588724, 1436350466655236, 504228368803,
    1554158691063110021, 2165424908404116, 195059004769796, 443529919251,
    2175279159592324, 382447549283, 567044449971, 195459938,
    27185, 1305138421793636, 156265010, 3928064910068824213,
    105070898, 5103845475, 10743689387941597493, 339991010498708,
    3155990846772900, 3928124806469601813, 7644494644932993285, 3156382366321172,
    430945547955, 1601657732871812, 110616894681956, 668013605731,
    144876322, 214799000387, 5802089162353039525, 2588613720361524,
    82160664963, 52433666, 726936420696196, 215036012883,
    6572336607016932133, 100103641866564, 3151866750863876, 692616541075,
    891861543990356, 138295313843, 35596216627, 162736434,
    978168444447012, 333446212255967269, 11779770265620358997, 1305410032576132,
    10550024711307499077, 977710670185060, 1428768988226596, 165479003923,
    1554184567314086709, 2167161349491220, 679678845236084, 447235128115,
    1568257451898804, 529092143139, 239280858627, 58419234,
    655681091891, 2132572377842852, 2059003085103236, 362778151475,
    1991870397907988, 81608128403, 277045793139, 122763026,
    2838550742137652, 382310500883, 770695537027, 169097138,
    529245952323, 129208402, 129205250, 45937,
    15217, 192104450, 3184439197724820, 4274926723105633605,
    482966828984116, 8333659837799955077, 680170263324308757, 2660352816454484,
    91321106, 9248164405801223541, 210504348563, 408509245114388,
    298306479155, 1531044293118596, 2659758091419812, 591272318771,
    2015093490989156, 13198752741767688709, 4274848857537943333, 1754182023747364,
    2900953068249785909, 482784926917540, 3185463219618820, 777701008947,
    9671606099636618005, 2005882975110676, 147361150235284, 492093858627,
    2014821863433780, 427920028243, 566996932387, 104474994,
    194220594, 5198438490361643573, 9399128243, 628107696687956,
    4734473194086550421, 2535169275963444, 1024968212107700, 117482600995,
    150627258963, 360743481544788, 36712706, 211025400963,
    1005252473234484, 619854856867, 150327278147, 176306722,
    796909779811, 1694042660682596, 3184439127991172, 302080811955,
    2323825233181284, 250912709379, 713778574611, 28681778,
    868078761575828, 23964357683, 69575510115, 73602098,
    713842853011, 93365810, 138437538, 42545,
    179746658, 333380770766129845, 680242583802939237, 2663607373704004,
    508001629971, 3097834205243396, 1136111028516116, 777781811075,
    375363605923, 1830001131721892, 291789778348404, 318240155763,
    91518530, 508238522371, 431498018963, 124295042,
    595804498035, 570691368417972, 3184943915608436, 649165714851,
    3220959471609924, 4866906995, 649105605635, 158486962,
    433581536604804, 88675058979, 178117478419, 158485010,
    374810899075, 91358498, 43484162, 29329,
    737032694307, 2538311371089956, 651646838401572, 447393122899,
    3256298596865604, 559958167731, 350847647843, 189884450,
    1567994331701604, 318136408323, 8877909667, 109224258,
    298069416227, 136709522, 104867330, 26657,
    194554754, 797430812739, 736732689667, 88782242,
    655980856339, 193993474, 67640146, 20913,
    595283255635, 5851666, 144771090, 18961,
    159668546, 36945, 33793, 0,];

#[cfg(test)]
mod tests {
    use super::*;

    fn above(code: usize, corner: u8) -> bool {
        (code >> corner) & 1 == 1
    }

    fn edge(p: PointRef) -> usize {
        match p {
            PointRef::Edge(e) => e as usize,
            other => panic!("unexpected point {other:?}"),
        }
    }

    fn midpoint(e: usize) -> glam::Vec3 {
        let (a, b) = EDGE_CORNERS_3D[e];
        (CORNER_OFFSETS[a as usize].as_vec3() + CORNER_OFFSETS[b as usize].as_vec3()) * 0.5
    }

    #[test]
    fn test_edges_connect_adjacent_corners() {
        for (a, b) in EDGE_CORNERS_3D {
            let d = CORNER_OFFSETS[b as usize] - CORNER_OFFSETS[a as usize];
            assert_eq!(d.x + d.y + d.z, 1);
        }
    }

    #[test]
    fn test_trivial_codes_are_empty() {
        assert!(TRIANGLE_TABLE[0].is_empty());
        assert!(TRIANGLE_TABLE[255].is_empty());
        for code in 1..255 {
            assert!(!TRIANGLE_TABLE[code].is_empty(), "code {code}");
        }
    }

    #[test]
    fn test_counts_are_whole_triangles() {
        for (code, entry) in TRIANGLE_TABLE.iter().enumerate() {
            assert_eq!(entry.len() % 3, 0, "code {code}");
            assert!(entry.len() <= 15, "code {code}");
        }
    }

    #[test]
    fn test_referenced_edges_are_exactly_the_straddling_edges() {
        for (code, entry) in TRIANGLE_TABLE.iter().enumerate() {
            let mut used = [false; 12];
            for p in entry.points() {
                assert!(p.edge().is_some(), "code {code} references {p:?}");
                used[edge(*p)] = true;
            }
            for (e, (a, b)) in EDGE_CORNERS_3D.iter().enumerate() {
                let straddles = above(code, *a) != above(code, *b);
                assert_eq!(used[e], straddles, "code {code} edge {e}");
            }
        }
    }

    #[test]
    fn test_single_corner_cases() {
        for corner in 0..8u8 {
            let code = 1usize << corner;
            let entry = &TRIANGLE_TABLE[code];
            assert_eq!(entry.len(), 3, "corner {corner}");
            for p in entry.points() {
                let (a, b) = EDGE_CORNERS_3D[edge(*p)];
                assert!(a == corner || b == corner, "corner {corner}");
            }
        }
    }

    #[test]
    fn test_single_corner_normal_points_above() {
        for corner in 0..8u8 {
            let tri = TRIANGLE_TABLE[1usize << corner].points();
            let (a, b, c) = (midpoint(edge(tri[0])), midpoint(edge(tri[1])), midpoint(edge(tri[2])));
            let n = (b - a).cross(c - a);
            let to_corner = CORNER_OFFSETS[corner as usize].as_vec3() - a;
            assert!(n.dot(to_corner) > 0.0, "corner {corner}");
        }
    }
}
