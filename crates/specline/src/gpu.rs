//! Per-frame GPU vertex buffers.
//!
//! Buffers for one prepared frame are owned by a [`FrameResources`] scope.
//! Dropping the scope destroys every buffer through the render context, so
//! replacing the frame or tearing down the compositor releases GPU memory
//! immediately instead of waiting for the device to reclaim it.

use crate::batch::FrameGeometry;
use crate::grid::Background;
use crate::series::SeriesLayer;
use specline_core::profiling::profile_function;
use specline_render::wgpu::{BufferDescriptor, BufferUsages};
use specline_render::{GpuBuffer, LineVertex, RenderContext};
use std::sync::Arc;

/// One uploaded vertex run.
#[derive(Debug)]
pub struct GpuDrawable {
    /// `None` for the background grid.
    pub layer: Option<SeriesLayer>,
    pub buffer: GpuBuffer,
    pub vertex_count: u32,
}

/// Vertex buffers for one frame, in draw order.
pub struct FrameResources {
    context: Arc<dyn RenderContext>,
    drawables: Vec<GpuDrawable>,
}

impl FrameResources {
    /// Upload the background and every drawable that has at least one
    /// segment.
    pub fn upload(
        context: Arc<dyn RenderContext>,
        background: &Background,
        geometry: &FrameGeometry,
    ) -> Self {
        profile_function!();

        let max_size = context.capabilities().max_buffer_size;
        let mut resources = Self {
            context,
            drawables: Vec::with_capacity(geometry.draw_call_count() + 1),
        };

        resources.push(None, background.vertices(), max_size);
        for drawable in geometry.drawables() {
            resources.push(Some(drawable.layer), &drawable.vertices, max_size);
        }

        tracing::trace!("Uploaded {} vertex buffers", resources.drawables.len());
        resources
    }

    /// Upload one vertex run, splitting it at break markers when it exceeds
    /// the device buffer limit. A polyline never straddles two buffers; one
    /// that cannot fit on its own is skipped.
    fn push(&mut self, layer: Option<SeriesLayer>, vertices: &[LineVertex], max_size: u64) {
        if specline_render::segments(vertices).next().is_none() {
            return;
        }

        if vertices.len() as u64 * LineVertex::STRIDE <= max_size {
            self.push_chunk(layer, vertices);
            return;
        }

        let max_vertices = (max_size / LineVertex::STRIDE) as usize;
        let mut boundaries: Vec<usize> = vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_break())
            .map(|(i, _)| i + 1)
            .collect();
        if vertices.last().is_some_and(|v| !v.is_break()) {
            boundaries.push(vertices.len());
        }

        let mut start = 0;
        let mut end = 0;
        for boundary in boundaries {
            if boundary - start > max_vertices {
                if end > start {
                    self.push_chunk(layer, &vertices[start..end]);
                    start = end;
                }
                if boundary - start > max_vertices {
                    tracing::warn!(
                        "Skipping {} polyline of {} vertices (device limit {} bytes)",
                        layer.map_or("Background", SeriesLayer::name),
                        boundary - start,
                        max_size
                    );
                    start = boundary;
                }
            }
            end = boundary;
        }
        if end > start {
            self.push_chunk(layer, &vertices[start..end]);
        }
    }

    fn push_chunk(&mut self, layer: Option<SeriesLayer>, vertices: &[LineVertex]) {
        if specline_render::segments(vertices).next().is_none() {
            return;
        }

        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        let label = match layer {
            Some(SeriesLayer::Original) => "Specline Original Lines",
            Some(SeriesLayer::Normal) => "Specline Normal Lines",
            Some(SeriesLayer::Selected) => "Specline Selected Lines",
            Some(SeriesLayer::Pinned) => "Specline Pinned Lines",
            None => "Specline Background",
        };
        let buffer = self.context.create_buffer(&BufferDescriptor {
            label: Some(label),
            size: bytes.len() as u64,
            usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        self.context.write_buffer(&buffer, 0, bytes);

        self.drawables.push(GpuDrawable {
            layer,
            buffer,
            vertex_count: vertices.len() as u32,
        });
    }

    pub fn drawables(&self) -> &[GpuDrawable] {
        &self.drawables
    }

    pub fn buffer_count(&self) -> usize {
        self.drawables.len()
    }
}

impl Drop for FrameResources {
    fn drop(&mut self) {
        for drawable in &self.drawables {
            self.context.destroy_buffer(&drawable.buffer);
        }
        tracing::trace!("Released {} vertex buffers", self.drawables.len());
    }
}
