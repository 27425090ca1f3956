//! Mock implementation of RenderContext for testing.
//!
//! Records buffer operations without touching a GPU, and tracks which
//! buffers are still alive so tests can verify scoped release.

use crate::{gpu_types::GpuBuffer, render_context::*};
use parking_lot::Mutex;
use wgpu::*;

/// Records a GPU operation call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    CreateBuffer {
        id: usize,
        label: Option<String>,
        size: u64,
        usage: BufferUsages,
    },
    WriteBuffer {
        buffer_id: usize,
        offset: u64,
        size: usize,
    },
    DestroyBuffer {
        buffer_id: usize,
    },
}

#[derive(Debug, Clone)]
struct MockBuffer {
    label: Option<String>,
    alive: bool,
}

/// Mock implementation of RenderContext for testing.
///
/// Uses `parking_lot::Mutex` for interior mutability since trait methods
/// take `&self` and the trait requires `Send + Sync`.
///
/// # Example
///
/// ```rust
/// use specline_test_utils::{MockRenderContext, RenderContext};
/// use wgpu::*;
///
/// let mock = MockRenderContext::new();
/// let buffer = mock.create_buffer(&BufferDescriptor {
///     label: None,
///     size: 64,
///     usage: BufferUsages::VERTEX,
///     mapped_at_creation: false,
/// });
/// assert!(buffer.is_mock());
/// assert_eq!(mock.count_buffer_creates(), 1);
/// ```
pub struct MockRenderContext {
    capabilities: DeviceCapabilities,
    calls: Mutex<Vec<RenderCall>>,
    buffers: Mutex<Vec<MockBuffer>>,
}

impl MockRenderContext {
    /// Create a new mock render context with generous capabilities.
    pub fn new() -> Self {
        Self::with_capabilities(DeviceCapabilities {
            adapter_name: String::from("Mock Adapter"),
            max_buffer_size: 256 * 1024 * 1024,
            max_vertex_buffers: 8,
        })
    }

    /// Create a mock context reporting the given capabilities.
    pub fn with_capabilities(capabilities: DeviceCapabilities) -> Self {
        Self {
            capabilities,
            calls: Mutex::new(Vec::new()),
            buffers: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock context for a device that cannot render.
    pub fn unsupported() -> Self {
        Self::with_capabilities(DeviceCapabilities::none())
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().clone()
    }

    /// Count buffer create operations.
    pub fn count_buffer_creates(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, RenderCall::CreateBuffer { .. }))
            .count()
    }

    /// Count buffer write operations.
    pub fn count_buffer_writes(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, RenderCall::WriteBuffer { .. }))
            .count()
    }

    /// Count buffer destroy operations.
    pub fn count_buffer_destroys(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, RenderCall::DestroyBuffer { .. }))
            .count()
    }

    /// Number of buffers created and not yet destroyed.
    pub fn live_buffer_count(&self) -> usize {
        self.buffers.lock().iter().filter(|b| b.alive).count()
    }

    /// Labels of buffers created and not yet destroyed.
    pub fn live_buffer_labels(&self) -> Vec<String> {
        self.buffers
            .lock()
            .iter()
            .filter(|b| b.alive)
            .map(|b| b.label.clone().unwrap_or_default())
            .collect()
    }

    /// Clear recorded calls (useful between test steps).
    ///
    /// Live buffer tracking is not affected.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Get total number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl Default for MockRenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderContext for MockRenderContext {
    fn capabilities(&self) -> DeviceCapabilities {
        self.capabilities.clone()
    }

    fn create_buffer(&self, desc: &BufferDescriptor) -> GpuBuffer {
        let mut buffers = self.buffers.lock();
        let id = buffers.len();
        let label = desc.label.map(|s| s.to_string());

        buffers.push(MockBuffer {
            label: label.clone(),
            alive: true,
        });

        self.calls.lock().push(RenderCall::CreateBuffer {
            id,
            label,
            size: desc.size,
            usage: desc.usage,
        });

        GpuBuffer::mock(id, desc.size)
    }

    fn write_buffer(&self, buffer: &GpuBuffer, offset: u64, data: &[u8]) {
        if let Some(buffer_id) = buffer.mock_id() {
            self.calls.lock().push(RenderCall::WriteBuffer {
                buffer_id,
                offset,
                size: data.len(),
            });
        }
    }

    fn destroy_buffer(&self, buffer: &GpuBuffer) {
        if let Some(buffer_id) = buffer.mock_id() {
            if let Some(entry) = self.buffers.lock().get_mut(buffer_id) {
                entry.alive = false;
            }
            self.calls
                .lock()
                .push(RenderCall::DestroyBuffer { buffer_id });
        }
    }
}
