//! Vertex layout shared by the GPU pipeline and the software rasterizer.

use crate::Color;
use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// One polyline vertex.
///
/// A vertex with `pen == 0.0` is a discontinuity marker: no segment is drawn
/// into or out of it. This lets unrelated lines share one buffer and one
/// draw call without being joined.
///
/// Layout (32 bytes):
/// ```text
/// offset 0:  vec2<f32> position
/// offset 8:  vec4<f32> color
/// offset 24: f32       width (pixels)
/// offset 28: f32       pen (1 = draw, 0 = break)
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
    pub width: f32,
    pub pen: f32,
}

impl LineVertex {
    /// Size of one vertex in bytes.
    pub const STRIDE: u64 = std::mem::size_of::<LineVertex>() as u64;

    /// A drawable vertex.
    pub fn new(position: Vec2, color: Color, width: f32) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
            width,
            pen: 1.0,
        }
    }

    /// The discontinuity marker.
    pub const fn break_marker() -> Self {
        Self {
            position: [0.0, 0.0],
            color: [0.0; 4],
            width: 0.0,
            pen: 0.0,
        }
    }

    /// Whether this vertex is a discontinuity marker.
    #[inline]
    pub fn is_break(&self) -> bool {
        self.pen == 0.0
    }

    /// Position as a glam vector.
    #[inline]
    pub fn point(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }
}

/// Iterate over the drawable segments of a vertex run.
///
/// Pairs that touch a discontinuity marker are skipped, matching what the
/// GPU pipeline does.
pub fn segments(vertices: &[LineVertex]) -> impl Iterator<Item = (&LineVertex, &LineVertex)> {
    vertices
        .windows(2)
        .filter(|w| !w[0].is_break() && !w[1].is_break())
        .map(|w| (&w[0], &w[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_size() {
        assert_eq!(LineVertex::STRIDE, 32);
    }

    #[test]
    fn test_segments_skip_breaks() {
        let v = |x: f32| LineVertex::new(Vec2::new(x, 0.0), Color::WHITE, 1.0);
        let run = [
            v(0.0),
            v(1.0),
            v(2.0),
            LineVertex::break_marker(),
            v(10.0),
            v(11.0),
            LineVertex::break_marker(),
        ];

        let segs: Vec<_> = segments(&run)
            .map(|(a, b)| (a.position[0], b.position[0]))
            .collect();
        assert_eq!(segs, vec![(0.0, 1.0), (1.0, 2.0), (10.0, 11.0)]);
    }
}
