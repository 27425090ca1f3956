//! Frame orchestration.
//!
//! [`RenderCompositor`] owns the series, the viewport and everything
//! derived from them. Each [`prepare`](RenderCompositor::prepare) call
//! brings the derived state up to date, doing only the work the dirty
//! flags ask for: decimation, batching, background, upload and the pick
//! index. Drawing is then either a GPU pass through
//! [`render`](RenderCompositor::render) or a software
//! [`rasterize`](RenderCompositor::rasterize).
//!
//! # Example
//!
//! ```no_run
//! use specline::{CompositorConfig, RenderCompositor, RenderError, Series};
//! use specline_render::{Color, GraphicsContext};
//!
//! let config = CompositorConfig::default();
//! let mut compositor = match GraphicsContext::new_owned_sync()
//!     .map_err(RenderError::from)
//!     .and_then(|gpu| RenderCompositor::new(gpu, config.clone()))
//! {
//!     Ok(compositor) => compositor,
//!     Err(err) => {
//!         tracing::warn!("Falling back to software rendering: {}", err);
//!         RenderCompositor::software(config)
//!     }
//! };
//!
//! compositor.set_series(vec![Series::new(
//!     0,
//!     vec![400.0, 500.0, 600.0],
//!     vec![0.1, 0.8, 0.3],
//!     Color::from_hex(0x1F77B4),
//! )]);
//! compositor.prepare();
//! ```

use crate::batch::{BatchItem, FrameGeometry, GeometryBatcher, LayerStyle};
use crate::cache::{DecimationCache, FrameDirtyFlags};
use crate::decimate::{DecimatedBuffer, decimate};
use crate::error::RenderError;
use crate::gpu::FrameResources;
use crate::grid::{Background, GridConfig, TickLabel};
use crate::pick::{PickHit, SpatialIndex};
use crate::quality::{QualityOverride, QualitySelection, QualityTier, select_quality};
use crate::range::DataRange;
use crate::series::{Selection, Series};
use crate::viewport::{PointerEvent, ViewportChanged, ViewportConfig, ViewportController};
use glam::Vec2;
use specline_core::profiling::{profile_function, profile_scope};
use specline_render::{
    Color, LineVertex, Pixmap, PolylineRenderer, Projection, RenderContext, SurfaceSize, wgpu,
};
use std::sync::Arc;

/// Surface size assumed until the host reports one.
const DEFAULT_SURFACE: SurfaceSize = SurfaceSize {
    width: 800,
    height: 600,
    scale_factor: 1.0,
};

/// Compositor configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositorConfig {
    pub viewport: ViewportConfig,
    pub grid: GridConfig,
    pub layers: LayerStyle,
    /// Reuse decimated buffers across frames when their inputs match.
    pub cache_decimation: bool,
    pub clear_color: Color,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            grid: GridConfig::default(),
            layers: LayerStyle::default(),
            cache_decimation: true,
            clear_color: Color::rgb(0.08, 0.08, 0.1),
        }
    }
}

impl CompositorConfig {
    pub fn with_viewport(mut self, viewport: ViewportConfig) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_layers(mut self, layers: LayerStyle) -> Self {
        self.layers = layers;
        self
    }

    pub fn with_cache_decimation(mut self, enabled: bool) -> Self {
        self.cache_decimation = enabled;
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }
}

/// Summary of the last prepared frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub series_total: usize,
    /// Valid series with at least one visible point.
    pub series_drawn: usize,
    /// Series that failed validation.
    pub series_rejected: usize,
    pub points_drawn: usize,
    /// Draw calls including the background.
    pub draw_calls: usize,
    /// Whether the last `prepare` rebuilt anything.
    pub rebuilt: bool,
}

/// Renders many spectral series with pan, zoom and quality control.
pub struct RenderCompositor {
    context: Option<Arc<dyn RenderContext>>,
    config: CompositorConfig,
    series: Vec<Series>,
    valid: Vec<usize>,
    samples_per_series: usize,
    quality_request: QualityOverride,
    quality: QualitySelection,
    surface: SurfaceSize,
    viewport: ViewportController,
    view_version: u64,
    cache: DecimationCache,
    dirty: FrameDirtyFlags,
    decimated: Vec<(usize, Arc<DecimatedBuffer>)>,
    geometry: FrameGeometry,
    background: Background,
    resources: Option<FrameResources>,
    pick_index: Option<SpatialIndex>,
    stats: FrameStats,
}

impl RenderCompositor {
    /// Create a GPU-backed compositor.
    ///
    /// Fails with [`RenderError::CapabilityUnavailable`] when the device
    /// cannot run the line pipeline. Callers are expected to fall back to
    /// [`software`](Self::software) in that case.
    pub fn new(
        context: Arc<dyn RenderContext>,
        config: CompositorConfig,
    ) -> Result<Self, RenderError> {
        let caps = context.capabilities();

        if caps.max_vertex_buffers < PolylineRenderer::REQUIRED_VERTEX_BUFFERS {
            return Err(RenderError::CapabilityUnavailable(format!(
                "adapter '{}' offers {} vertex buffer slots, {} required",
                caps.adapter_name,
                caps.max_vertex_buffers,
                PolylineRenderer::REQUIRED_VERTEX_BUFFERS
            )));
        }
        if caps.max_buffer_size < LineVertex::STRIDE * 2 {
            return Err(RenderError::CapabilityUnavailable(format!(
                "adapter '{}' cannot hold a single line segment",
                caps.adapter_name
            )));
        }

        tracing::info!("Line compositor using adapter '{}'", caps.adapter_name);
        Ok(Self::build(Some(context), config))
    }

    /// Create a compositor that only renders through [`rasterize`](Self::rasterize).
    pub fn software(config: CompositorConfig) -> Self {
        tracing::info!("Line compositor running without a GPU backend");
        Self::build(None, config)
    }

    fn build(context: Option<Arc<dyn RenderContext>>, config: CompositorConfig) -> Self {
        let request = QualityOverride::Auto;
        let mut compositor = Self {
            context,
            viewport: ViewportController::new(config.viewport),
            config,
            series: Vec::new(),
            valid: Vec::new(),
            samples_per_series: 0,
            quality_request: request,
            quality: select_quality(0, 0, request),
            surface: DEFAULT_SURFACE,
            view_version: 0,
            cache: DecimationCache::new(),
            dirty: FrameDirtyFlags::all(),
            decimated: Vec::new(),
            geometry: FrameGeometry::default(),
            background: Background::default(),
            resources: None,
            pick_index: None,
            stats: FrameStats::default(),
        };
        let plot_pixels = compositor.input_projection().plot_pixel_width();
        compositor.viewport.set_plot_pixels(plot_pixels);
        compositor
    }

    /// Whether frames are uploaded to a GPU.
    pub fn is_gpu(&self) -> bool {
        self.context.is_some()
    }

    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CompositorConfig) {
        if config.viewport != self.config.viewport {
            self.viewport.set_config(config.viewport);
        }
        if config.grid != self.config.grid
            || config.layers != self.config.layers
            || config.clear_color != self.config.clear_color
        {
            self.dirty |= FrameDirtyFlags::STYLE;
        }
        if config.cache_decimation != self.config.cache_decimation {
            self.cache.clear();
        }
        self.config = config;
    }

    /// Replace every series.
    ///
    /// Invalid series are logged and excluded from drawing; they do not
    /// affect the others. A changed x extent resets the view.
    pub fn set_series(&mut self, series: Vec<Series>) {
        profile_function!();

        let mut x: Option<DataRange> = None;
        let mut y: Option<DataRange> = None;
        let mut valid = Vec::with_capacity(series.len());
        let mut samples = 0;

        for (pos, s) in series.iter().enumerate() {
            if let Err(err) = s.validate() {
                tracing::warn!("Series {} excluded: {}", s.index, err);
                continue;
            }
            valid.push(pos);
            samples = samples.max(s.len());
            if let Some(r) = s.x_range() {
                x = Some(x.map_or(r, |x| x.union(r)));
            }
            if let Some(r) = s.y_range() {
                y = Some(y.map_or(r, |y| y.union(r)));
            }
        }

        tracing::debug!(
            "Loaded {} series ({} valid, up to {} samples each)",
            series.len(),
            valid.len(),
            samples
        );

        self.series = series;
        self.valid = valid;
        self.samples_per_series = samples;

        if let (Some(x), Some(y)) = (x, y) {
            self.viewport.set_data_range(x, y);
            let spacing = (samples > 1).then(|| x.width() / (samples - 1) as f64);
            self.viewport.set_sample_spacing(spacing);
        }

        self.refresh_quality();
        self.dirty |= FrameDirtyFlags::DATA;
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Apply a selection snapshot to the series flags.
    pub fn apply_selection(&mut self, selection: &Selection) {
        if selection.apply(&mut self.series) {
            self.dirty |= FrameDirtyFlags::STYLE;
        }
    }

    pub fn set_quality_override(&mut self, request: QualityOverride) {
        self.quality_request = request;
        self.refresh_quality();
    }

    fn refresh_quality(&mut self) {
        let selection = select_quality(
            self.valid.len(),
            self.samples_per_series,
            self.quality_request,
        );
        if selection.effective != self.quality.effective {
            tracing::info!(
                "Quality tier {} -> {} ({:?})",
                self.quality.effective,
                selection.effective,
                selection.requested
            );
            self.dirty |= FrameDirtyFlags::QUALITY;
        }
        self.quality = selection;
    }

    pub fn quality(&self) -> &QualitySelection {
        &self.quality
    }

    /// Tier currently applied, whether chosen automatically or forced.
    pub fn effective_tier(&self) -> QualityTier {
        self.quality.effective
    }

    /// MSAA sample count the [`PolylineRenderer`] should be created with.
    pub fn sample_count(&self) -> u32 {
        self.quality.config.sample_count()
    }

    /// Report the logical surface size and device pixel ratio.
    pub fn set_surface(&mut self, surface: SurfaceSize) -> Result<(), RenderError> {
        if surface.is_empty() {
            return Err(RenderError::InvalidSurface {
                width: surface.width,
                height: surface.height,
            });
        }
        if surface != self.surface {
            self.surface = surface;
            self.dirty |= FrameDirtyFlags::SURFACE;
            let plot_pixels = self.input_projection().plot_pixel_width();
            self.viewport.set_plot_pixels(plot_pixels);
        }
        Ok(())
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    /// Device pixel ratio after the tier's cap.
    pub fn pixel_ratio(&self) -> f32 {
        self.quality.config.pixel_ratio(self.surface.scale_factor)
    }

    /// Physical size the render target should have.
    pub fn render_size(&self) -> SurfaceSize {
        self.surface.scaled(self.pixel_ratio())
    }

    /// Projection onto the render target.
    pub fn projection(&self) -> Projection {
        Projection::fit(self.render_size(), self.config.grid.margin)
    }

    /// Projection onto the logical surface, used for pointer input.
    pub fn input_projection(&self) -> Projection {
        Projection::fit(self.surface, self.config.grid.margin)
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    /// Direct access for programmatic zoom, pan, mirror and listeners.
    pub fn viewport_mut(&mut self) -> &mut ViewportController {
        &mut self.viewport
    }

    pub fn zoom_ratio(&self) -> f64 {
        self.viewport.zoom_ratio()
    }

    /// Route pointer input, given in logical surface pixels.
    pub fn handle_event(&mut self, event: PointerEvent) -> Option<ViewportChanged> {
        let projection = self.input_projection();
        self.viewport.handle_event(event, &projection)
    }

    /// Bring derived frame state up to date.
    pub fn prepare(&mut self) -> &FrameStats {
        profile_function!();

        if self.viewport.version() != self.view_version {
            self.view_version = self.viewport.version();
            self.dirty |= FrameDirtyFlags::VIEW;
        }

        if !self.dirty.needs_rebuild() {
            self.stats.rebuilt = false;
            return &self.stats;
        }

        if self.dirty.needs_decimation() {
            self.decimate_all();
        }
        self.rebuild_geometry();
        self.upload();
        self.rebuild_pick_index();

        self.stats = FrameStats {
            series_total: self.series.len(),
            series_drawn: self.decimated.iter().filter(|(_, b)| !b.is_empty()).count(),
            series_rejected: self.series.len() - self.valid.len(),
            points_drawn: self.decimated.iter().map(|(_, b)| b.len()).sum(),
            draw_calls: self
                .resources
                .as_ref()
                .map_or(self.geometry.draw_call_count() + 1, FrameResources::buffer_count),
            rebuilt: true,
        };

        tracing::debug!(
            "Prepared frame: {:?}, {} series, {} points, {} draw calls",
            self.dirty,
            self.stats.series_drawn,
            self.stats.points_drawn,
            self.stats.draw_calls
        );

        self.dirty = FrameDirtyFlags::empty();
        &self.stats
    }

    fn decimate_all(&mut self) {
        profile_scope!("decimate");

        let view = self.viewport.visible();
        let y = self.viewport.y_range();
        let budget = self.quality.config.max_points_per_series;

        self.decimated.clear();
        if self.config.cache_decimation {
            self.cache.begin_frame();
        }

        for &pos in &self.valid {
            let series = &self.series[pos];
            let buffer = if self.config.cache_decimation {
                self.cache.get_or_decimate(series, view, y, budget)
            } else {
                Arc::new(decimate(series.xs(), series.ys(), budget, view, y))
            };
            self.decimated.push((pos, buffer));
        }

        if self.config.cache_decimation {
            self.cache.end_frame();
        }
    }

    fn rebuild_geometry(&mut self) {
        let ratio = self.pixel_ratio();

        {
            profile_scope!("batch");
            let items: Vec<BatchItem<'_>> = self
                .decimated
                .iter()
                .map(|(pos, buffer)| {
                    let series = &self.series[*pos];
                    BatchItem {
                        index: series.index,
                        color: series.color,
                        layer: series.layer(),
                        buffer: buffer.as_ref(),
                    }
                })
                .collect();
            let batcher = GeometryBatcher::new(self.quality.config, self.config.layers, ratio);
            self.geometry = batcher.build(&items);
        }

        profile_scope!("background");
        self.background = Background::build(
            self.viewport.visible(),
            self.viewport.y_range(),
            &self.config.grid,
            ratio,
        );
    }

    fn upload(&mut self) {
        let Some(context) = &self.context else {
            return;
        };
        profile_scope!("upload");

        // Release the previous frame before allocating the next one.
        self.resources = None;
        self.resources = Some(FrameResources::upload(
            context.clone(),
            &self.background,
            &self.geometry,
        ));
    }

    fn rebuild_pick_index(&mut self) {
        let projection = self.input_projection();
        let size = Vec2::new(self.surface.width as f32, self.surface.height as f32);
        let mut index = SpatialIndex::new(size);

        for (pos, buffer) in &self.decimated {
            let series = &self.series[*pos];
            let layer = series.layer();
            for (sample, point) in buffer.iter() {
                index.insert(projection.to_pixel(point), series.index, sample, layer);
            }
        }
        self.pick_index = Some(index);
    }

    /// Nearest drawn point within `radius` logical pixels, as of the last
    /// [`prepare`](Self::prepare).
    pub fn pick(&self, position: Vec2, radius: f32) -> Option<PickHit> {
        self.pick_index.as_ref()?.nearest(position, radius)
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn dirty(&self) -> FrameDirtyFlags {
        self.dirty
    }

    pub fn geometry(&self) -> &FrameGeometry {
        &self.geometry
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn labels(&self) -> &[TickLabel] {
        self.background.labels()
    }

    pub fn resources(&self) -> Option<&FrameResources> {
        self.resources.as_ref()
    }

    /// Decimated buffers of the last frame, by series index.
    pub fn decimated(&self) -> impl Iterator<Item = (u32, &DecimatedBuffer)> {
        self.decimated
            .iter()
            .map(|(pos, buffer)| (self.series[*pos].index, buffer.as_ref()))
    }

    /// Record draws for the prepared frame into `pass`.
    ///
    /// The pass must target a surface of [`render_size`](Self::render_size)
    /// with [`sample_count`](Self::sample_count) samples.
    pub fn render(&self, pass: &mut wgpu::RenderPass, renderer: &PolylineRenderer) {
        profile_function!();

        let Some(resources) = &self.resources else {
            return;
        };
        renderer.set_projection(&self.projection());
        for drawable in resources.drawables() {
            renderer.draw(pass, &drawable.buffer, drawable.vertex_count);
        }
    }

    /// Draw the prepared frame in software.
    pub fn rasterize(&self, pixmap: &mut Pixmap) {
        profile_function!();

        let target = SurfaceSize::new(pixmap.width(), pixmap.height());
        let projection = Projection::fit(target, self.config.grid.margin);
        pixmap.fill(self.config.clear_color);
        self.background.rasterize(pixmap, &projection);
        self.geometry.rasterize(pixmap, &projection);
    }

    /// Free GPU buffers and cached decimation. The next `prepare` rebuilds
    /// everything.
    pub fn release(&mut self) {
        self.resources = None;
        self.pick_index = None;
        self.cache.clear();
        self.decimated.clear();
        self.dirty = FrameDirtyFlags::all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::SeriesFlags;
    use crate::viewport::ZoomDirection;
    use specline_test_utils::MockRenderContext;

    fn dataset(count: u32, samples: usize) -> Vec<Series> {
        let palette = [Color::RED, Color::GREEN, Color::BLUE];
        (0..count)
            .map(|i| {
                let xs: Vec<f64> = (0..samples).map(|s| 400.0 + s as f64).collect();
                let ys: Vec<f64> = (0..samples)
                    .map(|s| ((s as f64) * 0.01 + i as f64).sin())
                    .collect();
                Series::new(i, xs, ys, palette[i as usize % 3])
            })
            .collect()
    }

    fn mock_compositor() -> (Arc<MockRenderContext>, RenderCompositor) {
        let ctx = Arc::new(MockRenderContext::new());
        let compositor = RenderCompositor::new(ctx.clone(), CompositorConfig::default()).unwrap();
        (ctx, compositor)
    }

    #[test]
    fn test_capability_check() {
        let ctx = Arc::new(MockRenderContext::unsupported());
        let result = RenderCompositor::new(ctx, CompositorConfig::default());
        assert!(matches!(result, Err(RenderError::CapabilityUnavailable(_))));
    }

    #[test]
    fn test_invalid_surface() {
        let mut compositor = RenderCompositor::software(CompositorConfig::default());
        assert_eq!(
            compositor.set_surface(SurfaceSize::new(0, 100)),
            Err(RenderError::InvalidSurface {
                width: 0,
                height: 100
            })
        );
        assert!(compositor.set_surface(SurfaceSize::new(640, 480)).is_ok());
    }

    #[test]
    fn test_prepare_skips_when_clean() {
        let (_, mut compositor) = mock_compositor();
        compositor.set_series(dataset(6, 500));
        assert!(compositor.prepare().rebuilt);
        assert!(!compositor.prepare().rebuilt);
    }

    #[test]
    fn test_batching_by_color() {
        let (ctx, mut compositor) = mock_compositor();
        compositor.set_series(dataset(300, 200));
        let stats = *compositor.prepare();
        // One batch per palette color plus the background.
        assert_eq!(stats.draw_calls, 4);
        assert_eq!(ctx.live_buffer_count(), 4);
        assert_eq!(stats.series_drawn, 300);
    }

    #[test]
    fn test_previous_frame_released() {
        let (ctx, mut compositor) = mock_compositor();
        compositor.set_series(dataset(9, 500));
        compositor.prepare();
        let first = ctx.live_buffer_count();

        compositor.viewport_mut().zoom(0.5, ZoomDirection::In);
        compositor.prepare();
        assert_eq!(ctx.live_buffer_count(), first);
        assert_eq!(ctx.count_buffer_destroys(), first);

        drop(compositor);
        assert_eq!(ctx.live_buffer_count(), 0);
    }

    #[test]
    fn test_release_frees_buffers() {
        let (ctx, mut compositor) = mock_compositor();
        compositor.set_series(dataset(3, 100));
        compositor.prepare();
        compositor.release();
        assert_eq!(ctx.live_buffer_count(), 0);
        assert!(compositor.prepare().rebuilt);
        assert!(ctx.live_buffer_count() > 0);
    }

    #[test]
    fn test_invalid_series_isolated() {
        let mut series = dataset(3, 100);
        series.push(Series::new(3, vec![1.0, 2.0], vec![f64::NAN, 0.0], Color::RED));
        series.push(Series::new(4, vec![1.0, 2.0, 3.0], vec![0.0], Color::RED));

        let mut compositor = RenderCompositor::software(CompositorConfig::default());
        compositor.set_series(series);
        let stats = *compositor.prepare();
        assert_eq!(stats.series_total, 5);
        assert_eq!(stats.series_rejected, 2);
        assert_eq!(stats.series_drawn, 3);
        // The NaN series does not stretch the x extent.
        assert_eq!(compositor.viewport().full(), DataRange::new(400.0, 499.0));
    }

    #[test]
    fn test_auto_quality_and_override() {
        let mut compositor = RenderCompositor::software(CompositorConfig::default());
        compositor.set_series(dataset(120, 1000));
        assert_eq!(compositor.effective_tier(), QualityTier::Medium);
        compositor.prepare();
        assert!(compositor.decimated().all(|(_, b)| b.len() == 300));

        compositor.set_quality_override(QualityOverride::Tier(QualityTier::Low));
        assert_eq!(compositor.effective_tier(), QualityTier::Low);
        assert!(compositor.dirty().contains(FrameDirtyFlags::QUALITY));
        compositor.prepare();
        assert!(compositor.decimated().all(|(_, b)| b.len() == 100));
        assert_eq!(compositor.sample_count(), 1);
    }

    #[test]
    fn test_selection_marks_style_only() {
        let mut compositor = RenderCompositor::software(CompositorConfig::default());
        compositor.set_series(dataset(4, 200));
        compositor.prepare();

        compositor.apply_selection(&Selection::new().with_selected([2]));
        assert_eq!(compositor.dirty(), FrameDirtyFlags::STYLE);
        assert_eq!(compositor.series()[2].flags, SeriesFlags::SELECTED);
        compositor.prepare();
        let selected: Vec<_> = compositor
            .geometry()
            .layer(crate::series::SeriesLayer::Selected)
            .collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].series, vec![2]);
    }

    #[test]
    fn test_zoom_keeps_point_budget() {
        let mut compositor = RenderCompositor::software(CompositorConfig::default());
        compositor.set_series(dataset(10, 10_000));
        compositor.prepare();
        for _ in 0..5 {
            compositor.viewport_mut().zoom(0.5, ZoomDirection::In);
        }
        compositor.prepare();
        let budget = compositor.quality().config.max_points_per_series;
        assert!(compositor.decimated().all(|(_, b)| b.len() == budget));
    }

    #[test]
    fn test_pixel_ratio_capped_by_tier() {
        let mut compositor = RenderCompositor::software(CompositorConfig::default());
        compositor.set_series(dataset(2, 100));
        compositor
            .set_surface(SurfaceSize::new(400, 300).with_scale_factor(3.0))
            .unwrap();
        assert_eq!(compositor.effective_tier(), QualityTier::High);
        assert_eq!(compositor.pixel_ratio(), 2.0);
        let size = compositor.render_size();
        assert_eq!((size.width, size.height), (800, 600));
    }

    #[test]
    fn test_pick_returns_drawn_sample() {
        let xs = vec![0.0, 1.0, 2.0];
        let ys = vec![0.0, 1.0, 0.0];
        let mut compositor = RenderCompositor::software(CompositorConfig::default());
        compositor.set_surface(SurfaceSize::new(500, 500)).unwrap();
        compositor.set_series(vec![Series::new(7, xs, ys, Color::RED)]);
        compositor.prepare();

        let projection = compositor.input_projection();
        let y = compositor.viewport().y_range();
        let peak = projection.to_pixel(Vec2::new(0.5, y.normalize(1.0) as f32));
        let hit = compositor.pick(peak + Vec2::new(2.0, 1.0), 6.0).unwrap();
        assert_eq!(hit.series_index, 7);
        assert_eq!(hit.sample_index, 1);
        assert!(compositor.pick(Vec2::new(-100.0, -100.0), 6.0).is_none());
    }

    #[test]
    fn test_rasterize_uses_clear_color() {
        let config = CompositorConfig::default().with_clear_color(Color::BLACK);
        let mut compositor = RenderCompositor::software(config);
        compositor.prepare();
        let mut pixmap = Pixmap::new(32, 32);
        compositor.rasterize(&mut pixmap);
        assert_eq!(pixmap.pixel(0, 0), Some([0, 0, 0, 255]));
    }
}
