//! Planar slices through 3D fields.

use glam::{Vec2, Vec3};

/// A plane used to cut a 2D grid out of a 3D field.
///
/// The plane is defined by a point (origin) and a normal direction. Grid
/// coordinates `(u, v)` map to `origin + u * u_axis + v * v_axis`, where the
/// two in-plane axes form a right-handed frame with the normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlicePlane {
    origin: Vec3,
    normal: Vec3,
    u_axis: Vec3,
    v_axis: Vec3,
}

impl SlicePlane {
    /// Creates a slice plane through `origin` with the given normal.
    ///
    /// A zero normal falls back to +Z.
    #[must_use]
    pub fn new(origin: Vec3, normal: Vec3) -> Self {
        let normal = normal.try_normalize().unwrap_or(Vec3::Z);
        let reference = if normal.y.abs() < 0.99 { Vec3::Y } else { Vec3::Z };
        let u_axis = reference.cross(normal).normalize();
        let v_axis = normal.cross(u_axis);
        Self {
            origin,
            normal,
            u_axis,
            v_axis,
        }
    }

    /// Creates the plane `a*x + b*y + c*z + d = 0`.
    #[must_use]
    pub fn from_coefficients(a: f32, b: f32, c: f32, d: f32) -> Self {
        let n = Vec3::new(a, b, c);
        let len_sq = n.length_squared();
        if len_sq == 0.0 {
            return Self::new(Vec3::ZERO, Vec3::Z);
        }
        // Closest point on the plane to the world origin.
        let origin = -n * (d / len_sq);
        Self::new(origin, n)
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Returns the unit normal of the plane.
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Returns the in-plane axes `(u, v)`.
    #[must_use]
    pub fn axes(&self) -> (Vec3, Vec3) {
        (self.u_axis, self.v_axis)
    }

    /// Maps in-plane coordinates to world space.
    #[must_use]
    pub fn to_world(&self, uv: Vec2) -> Vec3 {
        self.origin + uv.x * self.u_axis + uv.y * self.v_axis
    }

    /// Returns the signed distance from `point` to the plane.
    #[must_use]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        (point - self.origin).dot(self.normal)
    }
}

impl Default for SlicePlane {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_plane_maps_to_xy() {
        let plane = SlicePlane::default();
        let p = plane.to_world(Vec2::new(0.25, -0.5));
        assert!((p - Vec3::new(0.25, -0.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_frame_is_orthonormal() {
        let plane = SlicePlane::new(Vec3::ONE, Vec3::new(1.0, 0.0, 1.0));
        let (u, v) = plane.axes();
        let n = plane.normal();
        assert!(u.dot(v).abs() < 1e-6);
        assert!(u.dot(n).abs() < 1e-6);
        assert!(v.dot(n).abs() < 1e-6);
        assert!((u.cross(v) - n).length() < 1e-5);
    }

    #[test]
    fn test_points_lie_on_plane() {
        let plane = SlicePlane::from_coefficients(1.0, 0.0, 1.0, -2.0);
        for &(u, v) in &[(0.0, 0.0), (1.0, -3.0), (-0.5, 2.5)] {
            let p = plane.to_world(Vec2::new(u, v));
            assert!((p.x + p.z - 2.0).abs() < 1e-5);
            assert!(plane.signed_distance(p).abs() < 1e-5);
        }
    }

    #[test]
    fn test_vertical_normal_uses_z_reference() {
        let plane = SlicePlane::new(Vec3::ZERO, Vec3::Y);
        let (u, v) = plane.axes();
        assert!(u.is_normalized());
        assert!(v.is_normalized());
        assert!(u.dot(Vec3::Y).abs() < 1e-6);
    }
}
