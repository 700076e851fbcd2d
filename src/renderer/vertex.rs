//! Vertex types and unit-cube geometry

use bytemuck::{Pod, Zeroable};

use super::{BufferHandle, RenderError, Renderer};

/// Homogeneous 3D vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z, 1.0],
        }
    }
}

/// Unit cube spanning [-1, 1] on every axis, four vertices per face
pub const CUBE_VERTICES: [Vertex; 24] = [
    // Bottom
    Vertex::new(-1.0, -1.0, 1.0),
    Vertex::new(-1.0, -1.0, -1.0),
    Vertex::new(1.0, -1.0, -1.0),
    Vertex::new(1.0, -1.0, 1.0),
    // Left
    Vertex::new(-1.0, 1.0, 1.0),
    Vertex::new(-1.0, 1.0, -1.0),
    Vertex::new(-1.0, -1.0, -1.0),
    Vertex::new(-1.0, -1.0, 1.0),
    // Right
    Vertex::new(1.0, 1.0, 1.0),
    Vertex::new(1.0, 1.0, -1.0),
    Vertex::new(1.0, -1.0, -1.0),
    Vertex::new(1.0, -1.0, 1.0),
    // Front
    Vertex::new(-1.0, 1.0, 1.0),
    Vertex::new(-1.0, -1.0, 1.0),
    Vertex::new(1.0, -1.0, 1.0),
    Vertex::new(1.0, 1.0, 1.0),
    // Back
    Vertex::new(-1.0, 1.0, -1.0),
    Vertex::new(-1.0, -1.0, -1.0),
    Vertex::new(1.0, -1.0, -1.0),
    Vertex::new(1.0, 1.0, -1.0),
    // Top
    Vertex::new(-1.0, 1.0, 1.0),
    Vertex::new(-1.0, 1.0, -1.0),
    Vertex::new(1.0, 1.0, -1.0),
    Vertex::new(1.0, 1.0, 1.0),
];

/// Two triangles per face
pub const CUBE_TRIANGLE_INDICES: [u16; 36] = [
    0, 1, 2, 2, 3, 0, // Bottom
    4, 5, 6, 6, 7, 4, // Left
    8, 9, 10, 10, 11, 8, // Right
    12, 13, 14, 14, 15, 12, // Front
    16, 17, 18, 18, 19, 16, // Back
    20, 21, 22, 22, 23, 20, // Top
];

/// Face outlines, then a cross over the front face
pub const CUBE_LINE_INDICES: [u16; 52] = [
    0, 1, 1, 2, 2, 3, 0, 3, // Bottom
    4, 5, 5, 6, 6, 7, 4, 7, // Left
    8, 9, 9, 10, 10, 11, 8, 11, // Right
    12, 13, 13, 14, 14, 15, 12, 15, // Front
    16, 17, 17, 18, 18, 19, 16, 19, // Back
    20, 21, 21, 22, 22, 23, 20, 23, // Top
    12, 14, 13, 15, // Front X
];

/// Index count for outlines only
pub const CUBE_OUTLINE_INDEX_COUNT: u32 = 48;
/// Index count for outlines plus the front cross
pub const CUBE_CROSSED_INDEX_COUNT: u32 = CUBE_LINE_INDICES.len() as u32;

/// Backend buffers for the unit cube
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubeGeometry {
    pub vertices: BufferHandle,
    /// Filled faces for backends that draw solid cubes; the scene itself
    /// only draws `line_indices`
    pub triangle_indices: BufferHandle,
    pub line_indices: BufferHandle,
}

impl CubeGeometry {
    pub fn upload(renderer: &mut dyn Renderer) -> Result<Self, RenderError> {
        Ok(Self {
            vertices: renderer.create_vertex_buffer(&CUBE_VERTICES)?,
            triangle_indices: renderer.create_index_buffer(&CUBE_TRIANGLE_INDICES)?,
            line_indices: renderer.create_index_buffer(&CUBE_LINE_INDICES)?,
        })
    }
}
