//! Test utilities for Specline.
//!
//! This crate provides the GPU seam used by the line compositor:
//!
//! - [`RenderContext`] - Trait abstracting GPU buffer allocation, upload and release
//! - [`GpuBuffer`] - Owned buffer handle that can be real or mock
//! - `MockRenderContext` - Recording implementation for tests (requires `mock` feature)
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use specline_test_utils::{MockRenderContext, RenderContext};
//! use wgpu::*;
//!
//! let mock = MockRenderContext::new();
//!
//! let buffer = mock.create_buffer(&BufferDescriptor {
//!     label: Some("test_buffer"),
//!     size: 1024,
//!     usage: BufferUsages::VERTEX,
//!     mapped_at_creation: false,
//! });
//! assert_eq!(mock.live_buffer_count(), 1);
//!
//! mock.destroy_buffer(&buffer);
//! assert_eq!(mock.live_buffer_count(), 0);
//! # }
//! ```
//!
//! # Design
//!
//! Buffers are owned values with no lifetime parameters. Release is explicit:
//! whoever owns a [`GpuBuffer`] hands it back through
//! [`RenderContext::destroy_buffer`] when the geometry it holds is superseded.
//! The mock counts creates and destroys so tests can assert nothing leaks.

pub mod gpu_types;
#[cfg(feature = "mock")]
pub mod mock_render;
pub mod render_context;

pub use gpu_types::*;
#[cfg(feature = "mock")]
pub use mock_render::*;
pub use render_context::*;
