//! Color-grouped, layered line geometry.
//!
//! Series sharing a color on a batched layer are concatenated into one
//! vertex run separated by break markers, so thousands of series cost a
//! handful of draw calls. Selected series stay individual so they can be
//! styled and picked on their own.

use crate::decimate::DecimatedBuffer;
use crate::quality::QualityConfig;
use crate::series::SeriesLayer;
use ahash::AHashMap;
use specline_core::profiling::profile_function;
use specline_render::{Color, LineVertex, Pixmap, Projection};

/// Per-layer styling on top of the quality tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerStyle {
    /// Multiplier on the tier's normal opacity for original spectra.
    pub original_opacity_scale: f32,
    /// Multiplier on the tier's selected width for pinned series.
    pub pinned_width_scale: f32,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            original_opacity_scale: 0.5,
            pinned_width_scale: 1.25,
        }
    }
}

impl LayerStyle {
    pub fn with_original_opacity_scale(mut self, scale: f32) -> Self {
        self.original_opacity_scale = scale;
        self
    }

    pub fn with_pinned_width_scale(mut self, scale: f32) -> Self {
        self.pinned_width_scale = scale;
        self
    }

    /// Width in logical pixels and opacity for a layer.
    pub fn resolve(&self, layer: SeriesLayer, quality: &QualityConfig) -> (f32, f32) {
        match layer {
            SeriesLayer::Original => (
                quality.normal_line_width,
                quality.normal_opacity * self.original_opacity_scale,
            ),
            SeriesLayer::Normal => (quality.normal_line_width, quality.normal_opacity),
            SeriesLayer::Selected => (quality.selected_line_width, 1.0),
            SeriesLayer::Pinned => (quality.selected_line_width * self.pinned_width_scale, 1.0),
        }
    }
}

/// One series ready for batching.
#[derive(Debug, Clone, Copy)]
pub struct BatchItem<'a> {
    pub index: u32,
    pub color: Color,
    pub layer: SeriesLayer,
    pub buffer: &'a DecimatedBuffer,
}

/// Series that share one draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorGroup {
    pub layer: SeriesLayer,
    pub color: Color,
    /// Positions into the batch input, in input order.
    pub members: Vec<usize>,
}

/// Partition `items` into draw groups.
///
/// Within a batched layer, items with an identical color share a group.
/// Selected items get one group each. Groups are ordered by layer, then by
/// first appearance in `items`, so the output is deterministic. Every item
/// lands in exactly one group.
pub fn group_by_color(items: &[BatchItem<'_>]) -> Vec<ColorGroup> {
    let mut groups: Vec<ColorGroup> = Vec::new();

    for layer in SeriesLayer::ALL {
        let mut by_color: AHashMap<[u32; 4], usize> = AHashMap::new();

        for (pos, item) in items.iter().enumerate().filter(|(_, i)| i.layer == layer) {
            if layer.is_batched()
                && let Some(&group) = by_color.get(&item.color.to_bits())
            {
                groups[group].members.push(pos);
                continue;
            }

            by_color.insert(item.color.to_bits(), groups.len());
            groups.push(ColorGroup {
                layer,
                color: item.color,
                members: vec![pos],
            });
        }
    }

    groups
}

/// One draw call worth of line geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub layer: SeriesLayer,
    /// Final color including layer opacity.
    pub color: Color,
    /// Line width in physical pixels.
    pub width: f32,
    /// Series indices in this drawable, in vertex order.
    pub series: Vec<u32>,
    /// Each member's points followed by a break marker.
    pub vertices: Vec<LineVertex>,
}

impl Drawable {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of line segments the drawable will emit.
    pub fn segment_count(&self) -> usize {
        specline_render::segments(&self.vertices).count()
    }
}

/// Ordered drawables for one frame, back to front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameGeometry {
    drawables: Vec<Drawable>,
}

impl FrameGeometry {
    pub fn drawables(&self) -> &[Drawable] {
        &self.drawables
    }

    pub fn draw_call_count(&self) -> usize {
        self.drawables.len()
    }

    pub fn layer(&self, layer: SeriesLayer) -> impl Iterator<Item = &Drawable> {
        self.drawables.iter().filter(move |d| d.layer == layer)
    }

    pub fn vertex_count(&self) -> usize {
        self.drawables.iter().map(Drawable::vertex_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// Draw every drawable into `pixmap` in layer order.
    pub fn rasterize(&self, pixmap: &mut Pixmap, projection: &Projection) {
        for drawable in &self.drawables {
            pixmap.draw_polylines(&drawable.vertices, projection, 1.0);
        }
    }
}

/// Builds [`FrameGeometry`] from decimated series.
#[derive(Debug, Clone, Copy)]
pub struct GeometryBatcher {
    quality: QualityConfig,
    style: LayerStyle,
    pixel_ratio: f32,
}

impl GeometryBatcher {
    pub fn new(quality: QualityConfig, style: LayerStyle, pixel_ratio: f32) -> Self {
        Self {
            quality,
            style,
            pixel_ratio,
        }
    }

    pub fn build(&self, items: &[BatchItem<'_>]) -> FrameGeometry {
        profile_function!();

        let drawables = group_by_color(items)
            .into_iter()
            .map(|group| self.build_drawable(items, &group))
            .collect();

        FrameGeometry { drawables }
    }

    fn build_drawable(&self, items: &[BatchItem<'_>], group: &ColorGroup) -> Drawable {
        let (width, opacity) = self.style.resolve(group.layer, &self.quality);
        let width = width * self.pixel_ratio;
        let color = group.color.fade(opacity);

        let capacity = group
            .members
            .iter()
            .map(|&m| items[m].buffer.len() + 1)
            .sum();
        let mut vertices = Vec::with_capacity(capacity);
        let mut series = Vec::with_capacity(group.members.len());

        for &member in &group.members {
            let item = &items[member];
            series.push(item.index);
            vertices.extend(
                item.buffer
                    .points()
                    .iter()
                    .map(|&p| LineVertex::new(p, color, width)),
            );
            vertices.push(LineVertex::break_marker());
        }

        Drawable {
            layer: group.layer,
            color,
            width,
            series,
            vertices,
        }
    }
}
