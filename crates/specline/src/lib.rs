//! Specline - interactive rendering of thousands of spectral line series
//!
//! This crate provides:
//! - Quality tiers that trade point budget and styling for dataset size
//! - View-aware LTTB decimation into normalized plot space
//! - Color-grouped, layered line batching with break markers
//! - A pan/zoom viewport controller with change notification
//! - A compositor that ties these together over a GPU or software target
//!
//! # Example
//!
//! ```
//! use specline::*;
//!
//! let mut compositor = RenderCompositor::software(CompositorConfig::default());
//! compositor.set_series(vec![
//!     Series::new(0, vec![400.0, 500.0, 600.0], vec![0.1, 0.8, 0.3], Color::RED),
//!     Series::new(1, vec![400.0, 500.0, 600.0], vec![0.2, 0.4, 0.9], Color::BLUE),
//! ]);
//! compositor.apply_selection(&Selection::new().with_pinned([1]));
//! compositor.prepare();
//!
//! let size = compositor.render_size();
//! let mut pixmap = Pixmap::new(size.width, size.height);
//! compositor.rasterize(&mut pixmap);
//! ```

// Data
mod error;
mod range;
mod series;

// Pipeline stages
mod batch;
mod cache;
mod decimate;
mod grid;
mod quality;

// Interaction
mod pick;
mod viewport;

// Frame orchestration
mod compositor;
mod gpu;

pub use error::*;
pub use range::*;
pub use series::*;

pub use batch::*;
pub use cache::*;
pub use decimate::*;
pub use grid::*;
pub use quality::*;

pub use pick::*;
pub use viewport::*;

pub use compositor::*;
pub use gpu::*;

pub use specline_render::{Color, Pixmap, PolylineRenderer, Projection, SurfaceSize};
