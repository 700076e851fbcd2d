//! Backend that records draw calls instead of touching a GPU
//!
//! Used headless and in tests to inspect what a frame would draw.

use glam::Mat4;

use super::{BufferHandle, RenderError, Renderer, TextAlign, Vertex};
use crate::Color;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Lines {
        transform: Mat4,
        vertices: BufferHandle,
        indices: BufferHandle,
        index_count: u32,
        color: Color,
    },
    Text {
        transform: Mat4,
        color: Color,
        scale: f32,
        text: String,
        align: TextAlign,
    },
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    vertex_buffers: Vec<Vec<Vertex>>,
    index_buffers: Vec<Vec<u16>>,
    pending: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    frames_submitted: u64,
    viewport: (u32, u32),
    vsync: bool,
}

impl RecordingRenderer {
    pub fn new(vsync: bool) -> Self {
        Self {
            vsync,
            ..Self::default()
        }
    }

    /// Commands of the most recently submitted frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    pub fn frames_submitted(&self) -> u64 {
        self.frames_submitted
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Text strings of the last frame, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.last_frame
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                DrawCommand::Lines { .. } => None,
            })
            .collect()
    }

    /// Color a text string was drawn with in the last frame
    pub fn text_color(&self, wanted: &str) -> Option<Color> {
        self.last_frame.iter().find_map(|cmd| match cmd {
            DrawCommand::Text { text, color, .. } if text == wanted => Some(*color),
            _ => None,
        })
    }

    /// Line draws of the last frame
    pub fn line_draws(&self) -> impl Iterator<Item = (&Mat4, u32, Color)> {
        self.last_frame.iter().filter_map(|cmd| match cmd {
            DrawCommand::Lines {
                transform,
                index_count,
                color,
                ..
            } => Some((transform, *index_count, *color)),
            DrawCommand::Text { .. } => None,
        })
    }

    fn check_index_range(
        &self,
        vertices: BufferHandle,
        indices: BufferHandle,
        count: u32,
    ) -> bool {
        let (Some(verts), Some(idx)) = (
            self.vertex_buffers.get(vertices.0 as usize),
            self.index_buffers.get(indices.0 as usize),
        ) else {
            return false;
        };
        count as usize <= idx.len() && idx.iter().all(|&i| (i as usize) < verts.len())
    }
}

impl Renderer for RecordingRenderer {
    fn create_vertex_buffer(&mut self, vertices: &[Vertex]) -> Result<BufferHandle, RenderError> {
        if vertices.is_empty() {
            return Err(RenderError::BufferCreation {
                kind: "vertex",
                reason: "no vertices".to_string(),
            });
        }
        self.vertex_buffers.push(vertices.to_vec());
        Ok(BufferHandle(self.vertex_buffers.len() as u32 - 1))
    }

    fn create_index_buffer(&mut self, indices: &[u16]) -> Result<BufferHandle, RenderError> {
        if indices.is_empty() {
            return Err(RenderError::BufferCreation {
                kind: "index",
                reason: "no indices".to_string(),
            });
        }
        self.index_buffers.push(indices.to_vec());
        Ok(BufferHandle(self.index_buffers.len() as u32 - 1))
    }

    fn update_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    fn draw_lines_by_indices(
        &mut self,
        transform: Mat4,
        vertices: BufferHandle,
        indices: BufferHandle,
        index_count: u32,
        color: Color,
    ) {
        if !self.check_index_range(vertices, indices, index_count) {
            log::warn!("Dropping line draw with bad buffers {vertices:?}/{indices:?}");
            return;
        }
        self.pending.push(DrawCommand::Lines {
            transform,
            vertices,
            indices,
            index_count,
            color,
        });
    }

    fn draw_text(
        &mut self,
        transform: Mat4,
        color: Color,
        scale: f32,
        text: &str,
        align: TextAlign,
    ) {
        self.pending.push(DrawCommand::Text {
            transform,
            color,
            scale,
            text: text.to_string(),
            align,
        });
    }

    fn submit_frame(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_submitted += 1;
    }

    fn vsync(&self) -> bool {
        self.vsync
    }
}
