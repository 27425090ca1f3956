//! Implementation of the RenderContext trait for GraphicsContext.
//!
//! This allows GraphicsContext to be used polymorphically with the
//! RenderContext trait, enabling testing with MockRenderContext.

use crate::context::GraphicsContext;
use specline_test_utils::{DeviceCapabilities, GpuBuffer, RenderContext};
use wgpu::BufferDescriptor;

impl RenderContext for GraphicsContext {
    fn capabilities(&self) -> DeviceCapabilities {
        let limits = self.device.limits();
        DeviceCapabilities {
            adapter_name: self.adapter.get_info().name,
            max_buffer_size: limits.max_buffer_size,
            max_vertex_buffers: limits.max_vertex_buffers,
        }
    }

    fn create_buffer(&self, desc: &BufferDescriptor) -> GpuBuffer {
        GpuBuffer::from_wgpu(self.device.create_buffer(desc))
    }

    fn write_buffer(&self, buffer: &GpuBuffer, offset: u64, data: &[u8]) {
        match buffer.as_wgpu() {
            Some(wgpu_buffer) => self.queue.write_buffer(wgpu_buffer, offset, data),
            None => tracing::warn!("Ignoring write to a non-wgpu buffer"),
        }
    }

    fn destroy_buffer(&self, buffer: &GpuBuffer) {
        if let Some(wgpu_buffer) = buffer.as_wgpu() {
            wgpu_buffer.destroy();
        }
    }
}
