//! Rendering interface
//!
//! The game only needs a handful of operations from a graphics backend:
//! buffer creation, indexed line drawing, text drawing, viewport updates and
//! frame submission. Each backend implements `Renderer`; the scene is drawn
//! once per real frame and never from the simulation step.

pub mod recording;
pub mod scene;
pub mod vertex;

pub use recording::{DrawCommand, RecordingRenderer};
pub use scene::draw_scene;
pub use vertex::{CubeGeometry, Vertex};

use glam::Mat4;
use thiserror::Error;

use crate::Color;

/// Opaque backend buffer id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Center,
    Left,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("failed to create {kind} buffer: {reason}")]
    BufferCreation { kind: &'static str, reason: String },
}

pub trait Renderer {
    fn create_vertex_buffer(&mut self, vertices: &[Vertex]) -> Result<BufferHandle, RenderError>;

    fn create_index_buffer(&mut self, indices: &[u16]) -> Result<BufferHandle, RenderError>;

    fn update_viewport(&mut self, width: u32, height: u32);

    /// Draw `index_count` indices from `indices` as a line list
    fn draw_lines_by_indices(
        &mut self,
        transform: Mat4,
        vertices: BufferHandle,
        indices: BufferHandle,
        index_count: u32,
        color: Color,
    );

    fn draw_text(
        &mut self,
        transform: Mat4,
        color: Color,
        scale: f32,
        text: &str,
        align: TextAlign,
    );

    /// Present everything drawn since the last submission
    fn submit_frame(&mut self);

    /// Whether presentation already waits for vertical sync
    fn vsync(&self) -> bool {
        true
    }
}
