//! Specline Render
//!
//! GPU plumbing for the line compositor:
//! - [`GraphicsContext`] - wgpu device creation with a fallible capability probe
//! - [`PolylineRenderer`] - instanced segment pipeline that draws many disjoint
//!   polylines from one vertex buffer in a single draw call
//! - [`Projection`] - aspect-correct orthographic mapping of the normalized plot
//! - [`Pixmap`] - software rasterizer used when no GPU backend is available

mod color;
mod context;
mod context_impl;
mod polyline_renderer;
mod raster;
mod transform;
mod vertex;

pub use color::*;
pub use context::*;
pub use polyline_renderer::*;
pub use raster::*;
pub use transform::*;
pub use vertex::*;

// Re-export the GPU seam so downstream crates need only one import path.
pub use specline_test_utils::{DeviceCapabilities, GpuBuffer, RenderContext};
pub use wgpu;
