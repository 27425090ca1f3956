//! Trait abstracting GPU buffer operations.
//!
//! The `RenderContext` trait covers exactly what the line compositor needs
//! from a device: capability reporting at startup, and the buffer lifecycle
//! (create, write, destroy) for per-frame geometry.

use crate::gpu_types::GpuBuffer;
use wgpu::BufferDescriptor;

/// Device capabilities reported once at initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCapabilities {
    /// Human-readable adapter name (for diagnostics).
    pub adapter_name: String,
    /// Largest buffer the device accepts, in bytes.
    pub max_buffer_size: u64,
    /// Number of vertex buffer slots a pipeline may bind.
    pub max_vertex_buffers: u32,
}

impl DeviceCapabilities {
    /// Capabilities of a device that cannot render anything.
    pub fn none() -> Self {
        Self {
            adapter_name: String::from("none"),
            max_buffer_size: 0,
            max_vertex_buffers: 0,
        }
    }
}

/// Trait abstracting GPU resource creation and release.
///
/// Methods take `&self` and return owned handles, so a context can be shared
/// behind an `Arc<dyn RenderContext>` and mocked with interior mutability.
///
/// # Example
///
/// ```rust,no_run
/// use specline_test_utils::RenderContext;
/// use wgpu::{BufferDescriptor, BufferUsages};
///
/// fn upload(ctx: &dyn RenderContext, bytes: &[u8]) {
///     let buffer = ctx.create_buffer(&BufferDescriptor {
///         label: Some("Upload"),
///         size: bytes.len() as u64,
///         usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
///         mapped_at_creation: false,
///     });
///     ctx.write_buffer(&buffer, 0, bytes);
///     ctx.destroy_buffer(&buffer);
/// }
/// ```
pub trait RenderContext: Send + Sync {
    /// Report what the device can do.
    fn capabilities(&self) -> DeviceCapabilities;

    /// Create a GPU buffer.
    fn create_buffer(&self, desc: &BufferDescriptor) -> GpuBuffer;

    /// Write data to a buffer.
    ///
    /// For real buffers, this maps to `queue.write_buffer()`.
    /// For mock buffers, this records the operation for test verification.
    fn write_buffer(&self, buffer: &GpuBuffer, offset: u64, data: &[u8]);

    /// Release the backing memory of a buffer immediately.
    ///
    /// The handle must not be used for drawing afterwards.
    fn destroy_buffer(&self, buffer: &GpuBuffer);
}
