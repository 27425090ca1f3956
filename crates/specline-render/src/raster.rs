//! Software rasterizer for hosts without a usable GPU.
//!
//! Renders the same [`LineVertex`] runs the GPU pipeline consumes into an
//! RGBA8 buffer, honoring discontinuity markers, widths, and draw order.
//! Blending is non-premultiplied source-over.

use crate::{Color, LineVertex, Projection, vertex::segments};
use glam::Vec2;

/// An owned RGBA8 pixel buffer (row-major, top-down, 4 bytes per pixel).
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Pixmap {
    /// Create a transparent pixmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Color) {
        let rgba = color.to_rgba_u8();
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Read a pixel, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = self.offset(x, y);
        Some([
            self.data[off],
            self.data[off + 1],
            self.data[off + 2],
            self.data[off + 3],
        ])
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Blend `color` into one pixel with the given coverage in `0..=1`.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, cover: f32) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }

        let alpha = (color.a * cover).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }

        let off = self.offset(x as u32, y as u32);
        let src = [color.r, color.g, color.b];
        for (i, s) in src.iter().enumerate() {
            let dst = self.data[off + i] as f32 / 255.0;
            let out = s * alpha + dst * (1.0 - alpha);
            self.data[off + i] = (out.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        let dst_a = self.data[off + 3] as f32 / 255.0;
        let out_a = alpha + dst_a * (1.0 - alpha);
        self.data[off + 3] = (out_a.clamp(0.0, 1.0) * 255.0).round() as u8;
    }

    /// Rasterize a thick segment given in pixel coordinates.
    ///
    /// Coverage falls off linearly over one pixel at the segment edge, so
    /// pixels within `width / 2 - 0.5` of the center line are fully covered.
    pub fn draw_segment(&mut self, a: Vec2, b: Vec2, width: f32, color: Color) {
        let half = width.max(1.0) * 0.5;
        let reach = half + 1.0;

        let min = a.min(b) - Vec2::splat(reach);
        let max = a.max(b) + Vec2::splat(reach);

        let x0 = min.x.floor().max(0.0) as i32;
        let y0 = min.y.floor().max(0.0) as i32;
        let x1 = (max.x.ceil() as i32).min(self.width as i32 - 1);
        let y1 = (max.y.ceil() as i32).min(self.height as i32 - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let d = distance_to_segment(center, a, b);
                let cover = (half + 0.5 - d).clamp(0.0, 1.0);
                if cover > 0.0 {
                    self.blend_pixel(x, y, color, cover);
                }
            }
        }
    }

    /// Rasterize a vertex run in normalized plot space.
    ///
    /// `pixel_scale` multiplies widths (the device pixel ratio).
    pub fn draw_polylines(
        &mut self,
        vertices: &[LineVertex],
        projection: &Projection,
        pixel_scale: f32,
    ) {
        for (start, end) in segments(vertices) {
            let a = projection.to_pixel(start.point());
            let b = projection.to_pixel(end.point());
            self.draw_segment(a, b, start.width * pixel_scale, Color::from(start.color));
        }
    }
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SurfaceSize;

    #[test]
    fn test_fill_and_read() {
        let mut pixmap = Pixmap::new(4, 3);
        pixmap.fill(Color::WHITE);
        assert_eq!(pixmap.pixel(3, 2), Some([255, 255, 255, 255]));
        assert_eq!(pixmap.pixel(4, 0), None);
    }

    #[test]
    fn test_opaque_blend_replaces() {
        let mut pixmap = Pixmap::new(2, 2);
        pixmap.fill(Color::WHITE);
        pixmap.blend_pixel(1, 1, Color::RED, 1.0);
        assert_eq!(pixmap.pixel(1, 1), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_half_alpha_blend() {
        let mut pixmap = Pixmap::new(1, 1);
        pixmap.fill(Color::BLACK);
        pixmap.blend_pixel(0, 0, Color::WHITE.with_alpha(0.5), 1.0);
        let [r, _, _, a] = pixmap.pixel(0, 0).unwrap_or_default();
        assert!((127..=128).contains(&r));
        assert_eq!(a, 255);
    }

    #[test]
    fn test_horizontal_segment_covers_center_row() {
        let mut pixmap = Pixmap::new(20, 20);
        pixmap.fill(Color::BLACK);
        pixmap.draw_segment(Vec2::new(2.0, 10.5), Vec2::new(18.0, 10.5), 3.0, Color::GREEN);

        assert_eq!(pixmap.pixel(10, 10), Some([0, 255, 0, 255]));
        assert_eq!(pixmap.pixel(10, 2), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_break_markers_are_not_joined() {
        let surface = SurfaceSize::new(100, 100);
        let projection = Projection::fit(surface, 0.0);
        let mut pixmap = Pixmap::new(100, 100);
        pixmap.fill(Color::BLACK);

        let v = |x: f32, y: f32| LineVertex::new(Vec2::new(x, y), Color::WHITE, 1.0);
        let run = [
            v(0.1, 0.1),
            v(0.2, 0.1),
            LineVertex::break_marker(),
            v(0.8, 0.9),
            v(0.9, 0.9),
            LineVertex::break_marker(),
        ];
        pixmap.draw_polylines(&run, &projection, 1.0);

        // The diagonal a joined run would have drawn through the center stays empty
        let mid = projection.to_pixel(Vec2::new(0.5, 0.5));
        assert_eq!(pixmap.pixel(mid.x as u32, mid.y as u32), Some([0, 0, 0, 255]));
    }
}
