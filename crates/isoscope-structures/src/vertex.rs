//! Vertex records uploaded unchanged by the renderer.

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};

/// One contour vertex: position plus RGBA color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ContourVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl ContourVertex {
    #[must_use]
    pub fn new(position: Vec3, color: Vec4) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// One isosurface vertex.
///
/// `color_norm` is the threshold normalized into the field's value range,
/// for renderers that look colors up in-shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color_norm: f32,
    pub color: [f32; 4],
}

impl MeshVertex {
    #[must_use]
    pub fn new(position: Vec3, normal: Vec3, color_norm: f32, color: Vec4) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color_norm,
            color: color.to_array(),
        }
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    #[must_use]
    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layouts_are_tightly_packed() {
        assert_eq!(std::mem::size_of::<ContourVertex>(), 7 * 4);
        assert_eq!(std::mem::size_of::<MeshVertex>(), 11 * 4);
        let vertices = [ContourVertex::new(Vec3::ONE, Vec4::W); 2];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 2 * 28);
    }
}
