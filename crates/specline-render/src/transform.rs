//! Aspect-correct projection of the normalized plot onto a surface.
//!
//! Decimated geometry lives in a normalized plot space where the visible
//! data window maps to `[0, 1] x [0, 1]` (y up). The logical scene is that
//! square plus a margin on every side. When the surface is not square, the
//! longer axis is extended symmetrically so the data never appears
//! stretched.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec4};

/// Size of a render surface in logical pixels.
///
/// Pointer input is expected in the same logical units. The physical render
/// target is `logical * pixel ratio`, see [`SurfaceSize::scaled`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    /// Width in logical pixels.
    pub width: u32,
    /// Height in logical pixels.
    pub height: u32,
    /// Device pixel ratio reported by the windowing layer.
    pub scale_factor: f32,
}

impl SurfaceSize {
    /// Create a surface size with a scale factor of 1.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            scale_factor: 1.0,
        }
    }

    /// Set the device pixel ratio.
    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Whether the surface has a drawable area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Physical size at `ratio` device pixels per logical pixel.
    pub fn scaled(&self, ratio: f32) -> SurfaceSize {
        let ratio = if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 };
        SurfaceSize {
            width: (self.width as f32 * ratio).round() as u32,
            height: (self.height as f32 * ratio).round() as u32,
            scale_factor: 1.0,
        }
    }

    /// Width / height.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Orthographic bounds in normalized plot space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    surface: Vec2,
}

impl Projection {
    /// Fit the unit plot plus `margin` into `surface`.
    pub fn fit(surface: SurfaceSize, margin: f32) -> Self {
        let extent = 1.0 + 2.0 * margin;
        let aspect = surface.aspect();

        let (half_w, half_h) = if aspect >= 1.0 {
            (extent * aspect * 0.5, extent * 0.5)
        } else {
            (extent * 0.5, extent / aspect * 0.5)
        };

        Self {
            left: 0.5 - half_w,
            right: 0.5 + half_w,
            bottom: 0.5 - half_h,
            top: 0.5 + half_h,
            surface: Vec2::new(surface.width as f32, surface.height as f32),
        }
    }

    /// Width of the projected region in plot units.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the projected region in plot units.
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// Pixels per plot unit. Equal on both axes by construction.
    pub fn pixels_per_unit(&self) -> f32 {
        self.surface.x / self.width()
    }

    /// Width of the `[0, 1]` plot area in surface pixels.
    pub fn plot_pixel_width(&self) -> f32 {
        self.pixels_per_unit()
    }

    /// Map a normalized plot position to surface pixels (y down).
    pub fn to_pixel(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            (p.x - self.left) / self.width() * self.surface.x,
            (self.top - p.y) / self.height() * self.surface.y,
        )
    }

    /// Map surface pixels back to a normalized plot position.
    pub fn to_plot(&self, pixel: Vec2) -> Vec2 {
        Vec2::new(
            self.left + pixel.x / self.surface.x * self.width(),
            self.top - pixel.y / self.surface.y * self.height(),
        )
    }

    /// Orthographic matrix for the GPU.
    pub fn matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(self.left, self.right, self.bottom, self.top, -1.0, 1.0)
    }

    /// Uniform block for [`PolylineRenderer`](crate::PolylineRenderer).
    pub fn uniform(&self) -> ProjectionUniform {
        ProjectionUniform {
            view_proj: self.matrix().to_cols_array_2d(),
            viewport: self.surface.to_array(),
            _padding: [0.0; 2],
        }
    }

    /// Project through the matrix, returning clip-space xy.
    pub fn to_clip(&self, p: Vec2) -> Vec2 {
        let clip = self.matrix() * Vec4::new(p.x, p.y, 0.0, 1.0);
        Vec2::new(clip.x, clip.y)
    }
}

/// GPU uniform for the polyline pipeline.
///
/// Layout (80 bytes, 16-byte aligned):
/// ```text
/// offset 0:  mat4x4<f32> view_proj  (64 bytes)
/// offset 64: vec2<f32>   viewport    (8 bytes)
/// offset 72: vec2<f32>   padding     (8 bytes)
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable, PartialEq)]
pub struct ProjectionUniform {
    pub view_proj: [[f32; 4]; 4],
    pub viewport: [f32; 2],
    _padding: [f32; 2],
}
