//! Edge interpolation shared by both extractors.

/// Fraction along the edge from `v1` to `v2` where the field crosses `threshold`.
///
/// Returns `(v1 - threshold) / (v1 - v2)`, which is 0 when `v1` equals the
/// threshold and 1 when `v2` does. Equal endpoint values cannot straddle the
/// threshold and yield the edge midpoint instead of dividing by zero.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn edge_weight(v1: f32, v2: f32, threshold: f32) -> f32 {
    if v1 == v2 {
        return 0.5;
    }
    (v1 - threshold) / (v1 - v2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_endpoint_at_threshold() {
        assert_eq!(edge_weight(5.0, 10.0, 5.0), 0.0);
        assert_eq!(edge_weight(0.0, 5.0, 5.0), 1.0);
    }

    #[test]
    fn test_equal_values_do_not_divide_by_zero() {
        assert_eq!(edge_weight(3.0, 3.0, 3.0), 0.5);
        assert_eq!(edge_weight(3.0, 3.0, 1.0), 0.5);
    }

    #[test]
    fn test_midpoint_crossing() {
        assert!((edge_weight(0.0, 10.0, 5.0) - 0.5).abs() < 1e-6);
        assert!((edge_weight(10.0, 0.0, 5.0) - 0.5).abs() < 1e-6);
        assert!((edge_weight(0.0, 4.0, 1.0) - 0.25).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_straddling_weight_in_unit_interval(
            a in -1.0e3_f32..1.0e3,
            b in -1.0e3_f32..1.0e3,
            s in 0.0_f32..=1.0,
        ) {
            prop_assume!((a - b).abs() > 1e-3);
            let t = a + (b - a) * s;
            let w = edge_weight(a, b, t);
            prop_assert!((-1e-4..=1.0 + 1e-4).contains(&w), "w = {}", w);
        }
    }
}
