//! Visible x window, pan/zoom interaction and change notification.
//!
//! The controller owns the visible window exclusively. Every update is
//! clamped into the full data range and validated; an update that would
//! produce an invalid window is logged and dropped, leaving the previous
//! window in place.

use crate::error::ViewportError;
use crate::range::DataRange;
use glam::Vec2;
use specline_render::Projection;

/// Relative tolerance for deciding that the dataset range changed.
const DATA_RANGE_TOLERANCE: f64 = 1e-9;
/// Window updates smaller than this fraction of the width are dropped.
const NOOP_TOLERANCE: f64 = 1e-12;

/// Interaction tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    /// Width multiplier for one zoom-in step.
    pub zoom_in_factor: f64,
    /// Width multiplier for one zoom-out step.
    pub zoom_out_factor: f64,
    /// Narrowest window as a fraction of the full range.
    pub min_zoom_fraction: f64,
    /// Zooming out past this fraction of the full range snaps to it.
    pub snap_fraction: f64,
    /// Lower bound on on-screen pixels per raw sample. Caps how far the
    /// window may widen when the sample spacing is known.
    pub min_pixels_per_sample: f64,
    /// Fraction of the y extent added above and below.
    pub y_padding: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            zoom_in_factor: 0.87,
            zoom_out_factor: 1.15,
            min_zoom_fraction: 0.05,
            snap_fraction: 0.99,
            min_pixels_per_sample: 0.02,
            y_padding: 0.05,
        }
    }
}

impl ViewportConfig {
    pub fn with_zoom_factors(mut self, zoom_in: f64, zoom_out: f64) -> Self {
        self.zoom_in_factor = zoom_in;
        self.zoom_out_factor = zoom_out;
        self
    }

    pub fn with_min_zoom_fraction(mut self, fraction: f64) -> Self {
        self.min_zoom_fraction = fraction;
        self
    }

    pub fn with_min_pixels_per_sample(mut self, pixels: f64) -> Self {
        self.min_pixels_per_sample = pixels;
        self
    }

    pub fn with_y_padding(mut self, padding: f64) -> Self {
        self.y_padding = padding;
        self
    }
}

/// Current view of the dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Union of every series' x extent.
    pub full: DataRange,
    /// Currently visible x window. Always inside `full`.
    pub visible: DataRange,
    /// Padded y range used for normalization.
    pub y: DataRange,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            full: DataRange::UNIT,
            visible: DataRange::UNIT,
            y: DataRange::UNIT,
        }
    }
}

impl Viewport {
    /// `full.width / visible.width`. 1.0 when fully zoomed out, growing
    /// as the view zooms in.
    pub fn zoom_ratio(&self) -> f64 {
        let visible = self.visible.width();
        if visible > 0.0 {
            self.full.width() / visible
        } else {
            1.0
        }
    }

    pub fn is_full(&self) -> bool {
        self.visible == self.full
    }

    /// Check that `candidate` is a usable visible window for this view.
    pub fn validate(&self, candidate: DataRange) -> Result<(), ViewportError> {
        if !candidate.min.is_finite() || !candidate.max.is_finite() {
            return Err(ViewportError::NonFinite);
        }
        if candidate.min >= candidate.max && !self.full.is_degenerate() {
            return Err(ViewportError::Inverted {
                min: candidate.min,
                max: candidate.max,
            });
        }
        if !self.full.covers(&candidate) {
            return Err(ViewportError::OutOfBounds {
                min: candidate.min,
                max: candidate.max,
            });
        }
        Ok(())
    }
}

/// What triggered a viewport change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    Zoom,
    Pan,
    Reset,
    DataChanged,
    Mirror,
}

/// Notification sent to subscribers after the visible window changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportChanged {
    pub visible: DataRange,
    pub full: DataRange,
    pub zoom_ratio: f64,
    pub cause: ChangeCause,
}

/// Handle returned by [`ViewportController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Pointer input in logical surface pixels (y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { position: Vec2, button: PointerButton },
    Move { position: Vec2 },
    Up { button: PointerButton },
    /// Positive `delta` scrolls down (zoom out).
    Wheel { position: Vec2, delta: f32 },
    DoubleClick { position: Vec2 },
}

/// Interaction state. Panning and wheel zoom are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Panning { last: Vec2 },
}

type Listener = Box<dyn FnMut(&ViewportChanged)>;

/// Owns the visible window and turns input into window updates.
pub struct ViewportController {
    config: ViewportConfig,
    viewport: Viewport,
    state: InteractionState,
    sample_spacing: Option<f64>,
    plot_pixels: f64,
    version: u64,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl std::fmt::Debug for ViewportController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportController")
            .field("viewport", &self.viewport)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ViewportController {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            config,
            viewport: Viewport::default(),
            state: InteractionState::Idle,
            sample_spacing: None,
            plot_pixels: 0.0,
            version: 0,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ViewportConfig) {
        self.config = config;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn visible(&self) -> DataRange {
        self.viewport.visible
    }

    pub fn full(&self) -> DataRange {
        self.viewport.full
    }

    pub fn y_range(&self) -> DataRange {
        self.viewport.y
    }

    pub fn zoom_ratio(&self) -> f64 {
        self.viewport.zoom_ratio()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Increments on every accepted change to the view.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Typical x distance between raw samples, if known.
    pub fn set_sample_spacing(&mut self, spacing: Option<f64>) {
        self.sample_spacing = spacing.filter(|s| s.is_finite() && *s > 0.0);
    }

    /// Width of the plot area in pixels.
    pub fn set_plot_pixels(&mut self, pixels: f32) {
        if pixels.is_finite() && pixels > 0.0 {
            self.plot_pixels = pixels as f64;
        }
    }

    /// Update the dataset extents.
    ///
    /// `y` is padded by the configured fraction. A meaningful change of
    /// the x extent resets the window to the new full range.
    pub fn set_data_range(&mut self, full: DataRange, y: DataRange) {
        if !full.is_valid() || !y.is_valid() {
            tracing::warn!("Ignoring invalid data range x={:?} y={:?}", full, y);
            return;
        }

        let padded = y.padded(self.config.y_padding);
        let y_changed = padded != self.viewport.y;
        self.viewport.y = padded;

        if full.differs_from(&self.viewport.full, DATA_RANGE_TOLERANCE) {
            tracing::debug!("Data range changed to [{}, {}], resetting view", full.min, full.max);
            self.viewport.full = full;
            self.viewport.visible = full;
            self.commit(ChangeCause::DataChanged);
        } else if y_changed {
            self.version += 1;
        }
    }

    /// Range of widths the window may take.
    fn width_bounds(&self) -> (f64, f64) {
        let full = self.viewport.full.width();
        let min = full * self.config.min_zoom_fraction.clamp(0.0, 1.0);
        let mut max = full;

        if let Some(spacing) = self.sample_spacing
            && self.plot_pixels > 0.0
            && self.config.min_pixels_per_sample > 0.0
        {
            let cap = self.plot_pixels * spacing / self.config.min_pixels_per_sample;
            if cap >= min {
                max = max.min(cap);
            }
        }

        (min, max)
    }

    /// Zoom one step around the pointer.
    ///
    /// `pointer` is the pointer's horizontal position within the plot,
    /// `0.0` at the left edge and `1.0` at the right.
    pub fn zoom(&mut self, pointer: f64, direction: ZoomDirection) -> Option<ViewportChanged> {
        let factor = match direction {
            ZoomDirection::In => self.config.zoom_in_factor,
            ZoomDirection::Out => self.config.zoom_out_factor,
        };
        self.zoom_by(pointer, factor)
    }

    /// Scale the window width by `factor`, keeping the data x under the
    /// pointer fixed.
    pub fn zoom_by(&mut self, pointer: f64, factor: f64) -> Option<ViewportChanged> {
        if !factor.is_finite() || factor <= 0.0 || !pointer.is_finite() {
            tracing::warn!("Ignoring zoom with factor {} at {}", factor, pointer);
            return None;
        }

        let full = self.viewport.full;
        let visible = self.viewport.visible;
        let (min_width, max_width) = self.width_bounds();
        let width = (visible.width() * factor).clamp(min_width, max_width.max(min_width));

        if width >= full.width() * self.config.snap_fraction {
            return self.set_visible(full, ChangeCause::Zoom);
        }

        let t = pointer.clamp(0.0, 1.0);
        let anchor = visible.min + t * visible.width();
        let min = (anchor - t * width).min(full.max - width).max(full.min);
        let max = (min + width).min(full.max);

        self.set_visible(DataRange::new(min, max), ChangeCause::Zoom)
    }

    /// Shift the window by a pointer drag of `delta_px` across a plot
    /// `plot_px` pixels wide. Dragging right reveals data to the left.
    ///
    /// The window keeps its width; hitting either edge stops the shift.
    pub fn pan(&mut self, delta_px: f32, plot_px: f32) -> Option<ViewportChanged> {
        if !delta_px.is_finite() || !plot_px.is_finite() || plot_px <= 0.0 || delta_px == 0.0 {
            return None;
        }

        let full = self.viewport.full;
        let visible = self.viewport.visible;
        let width = visible.width();
        let shift = -(delta_px as f64) * width / plot_px as f64;

        // The edge that overflows is pinned and the other derived from it,
        // so repeated clamped pans keep the width bit-for-bit.
        let min = visible.min + shift;
        let candidate = if min + width >= full.max {
            DataRange::new((full.max - width).max(full.min), full.max)
        } else if min <= full.min {
            DataRange::new(full.min, (full.min + width).min(full.max))
        } else {
            DataRange::new(min, min + width)
        };

        self.set_visible(candidate, ChangeCause::Pan)
    }

    /// Return to the full data range.
    pub fn reset(&mut self) -> Option<ViewportChanged> {
        let full = self.viewport.full;
        self.set_visible(full, ChangeCause::Reset)
    }

    /// Adopt a window from another view without notifying subscribers.
    ///
    /// The window is clamped into this view's full range. Used to keep
    /// linked views in sync without echoing the change back.
    pub fn mirror(&mut self, visible: DataRange) -> Result<(), ViewportError> {
        if !visible.min.is_finite() || !visible.max.is_finite() {
            return Err(ViewportError::NonFinite);
        }
        let full = self.viewport.full;
        let min = visible.min.max(full.min);
        let max = visible.max.min(full.max);
        let candidate = DataRange::new(min, max);

        self.viewport.validate(candidate)?;
        if candidate != self.viewport.visible {
            self.viewport.visible = candidate;
            self.version += 1;
        }
        Ok(())
    }

    /// Feed one pointer event through the interaction state machine.
    pub fn handle_event(
        &mut self,
        event: PointerEvent,
        projection: &Projection,
    ) -> Option<ViewportChanged> {
        self.set_plot_pixels(projection.plot_pixel_width());

        match (self.state, event) {
            (
                InteractionState::Idle,
                PointerEvent::Down {
                    position,
                    button: PointerButton::Primary,
                },
            ) => {
                self.state = InteractionState::Panning { last: position };
                None
            }
            (InteractionState::Panning { last }, PointerEvent::Move { position }) => {
                self.state = InteractionState::Panning { last: position };
                self.pan(position.x - last.x, projection.plot_pixel_width())
            }
            (
                InteractionState::Panning { .. },
                PointerEvent::Up {
                    button: PointerButton::Primary,
                },
            ) => {
                self.state = InteractionState::Idle;
                None
            }
            (InteractionState::Idle, PointerEvent::Wheel { position, delta }) => {
                if delta == 0.0 || !delta.is_finite() {
                    return None;
                }
                let pointer = projection.to_plot(position).x as f64;
                let direction = if delta < 0.0 {
                    ZoomDirection::In
                } else {
                    ZoomDirection::Out
                };
                self.zoom(pointer, direction)
            }
            (InteractionState::Idle, PointerEvent::DoubleClick { .. }) => self.reset(),
            _ => None,
        }
    }

    /// Register a change listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&ViewportChanged) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn set_visible(&mut self, candidate: DataRange, cause: ChangeCause) -> Option<ViewportChanged> {
        if let Err(err) = self.viewport.validate(candidate) {
            tracing::warn!("Rejected viewport update ({:?}): {}", cause, err);
            return None;
        }
        if !candidate.differs_from(&self.viewport.visible, NOOP_TOLERANCE) {
            return None;
        }
        self.viewport.visible = candidate;
        self.commit(cause)
    }

    fn commit(&mut self, cause: ChangeCause) -> Option<ViewportChanged> {
        self.version += 1;
        let change = ViewportChanged {
            visible: self.viewport.visible,
            full: self.viewport.full,
            zoom_ratio: self.viewport.zoom_ratio(),
            cause,
        };
        tracing::trace!(
            "Viewport [{}, {}] zoom {:.3} ({:?})",
            change.visible.min,
            change.visible.max,
            change.zoom_ratio,
            cause
        );
        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specline_render::SurfaceSize;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn controller(min: f64, max: f64) -> ViewportController {
        let mut c = ViewportController::default();
        c.set_data_range(DataRange::new(min, max), DataRange::new(0.0, 1.0));
        c
    }

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_new_data_resets_view() {
        let c = controller(0.0, 100.0);
        assert_eq!(c.visible(), DataRange::new(0.0, 100.0));
        assert_eq!(c.zoom_ratio(), 1.0);
    }

    #[test]
    fn test_y_padding() {
        let c = controller(0.0, 100.0);
        assert!(approx(c.y_range().min, -0.05, 1e-12));
        assert!(approx(c.y_range().max, 1.05, 1e-12));
    }

    #[test]
    fn test_zoom_in_keeps_pointer_anchor() {
        let mut c = controller(0.0, 100.0);
        let change = c.zoom(0.5, ZoomDirection::In).unwrap();
        assert_eq!(change.cause, ChangeCause::Zoom);
        assert!(approx(c.visible().width(), 87.0, 1e-9));
        assert!(approx(c.visible().center(), 50.0, 1e-9));
    }

    #[test]
    fn test_zoom_anchor_off_center() {
        let mut c = controller(0.0, 100.0);
        c.zoom(0.5, ZoomDirection::In);
        c.zoom(0.5, ZoomDirection::In);
        let before = c.visible();
        let anchor = before.denormalize(0.25);
        c.zoom(0.25, ZoomDirection::In);
        let after = c.visible();
        assert!(approx(after.denormalize(0.25), anchor, 1e-9));
    }

    #[test]
    fn test_zoom_in_then_out_restores_width() {
        let mut c = controller(0.0, 1000.0);
        for _ in 0..4 {
            c.zoom(0.5, ZoomDirection::In);
        }
        let width = c.visible().width();
        c.zoom(0.5, ZoomDirection::In);
        c.zoom(0.5, ZoomDirection::Out);
        assert!((c.visible().width() - width).abs() / width < 1e-3);
    }

    #[test]
    fn test_zoom_in_stops_at_min_width() {
        let mut c = controller(0.0, 100.0);
        for _ in 0..100 {
            c.zoom(0.3, ZoomDirection::In);
        }
        assert!(approx(c.visible().width(), 5.0, 1e-9));
        assert!(c.zoom(0.3, ZoomDirection::In).is_none());
    }

    #[test]
    fn test_zoom_out_snaps_to_full() {
        let mut c = controller(0.0, 100.0);
        c.zoom(0.5, ZoomDirection::In);
        c.zoom(0.5, ZoomDirection::In);
        let mut steps = 0;
        while c.zoom(0.9, ZoomDirection::Out).is_some() {
            steps += 1;
            assert!(c.full().covers(&c.visible()));
        }
        assert!(steps > 0);
        assert_eq!(c.visible(), DataRange::new(0.0, 100.0));
        assert_eq!(c.zoom_ratio(), 1.0);
    }

    #[test]
    fn test_zoom_near_edge_stays_in_bounds() {
        let mut c = controller(0.0, 100.0);
        for _ in 0..10 {
            c.zoom(0.0, ZoomDirection::In);
        }
        assert_eq!(c.visible().min, 0.0);
        c.zoom(1.0, ZoomDirection::Out);
        assert!(c.full().covers(&c.visible()));
    }

    #[test]
    fn test_pan_right_drag_moves_view_left() {
        let mut c = controller(0.0, 100.0);
        c.mirror(DataRange::new(40.0, 60.0)).unwrap();
        c.pan(100.0, 1000.0).unwrap();
        assert!(approx(c.visible().min, 38.0, 1e-9));
        assert!(approx(c.visible().max, 58.0, 1e-9));
    }

    #[test]
    fn test_pan_clamps_and_preserves_width() {
        let mut c = controller(0.0, 100.0);
        c.mirror(DataRange::new(10.0, 30.0)).unwrap();
        c.pan(5000.0, 100.0);
        assert_eq!(c.visible(), DataRange::new(0.0, 20.0));

        c.pan(-50_000.0, 100.0);
        assert_eq!(c.visible(), DataRange::new(80.0, 100.0));
    }

    #[test]
    fn test_clamped_pans_keep_width_exactly() {
        let mut c = controller(0.0, 1000.0);
        c.mirror(DataRange::new(12.345678901234, 184.108287413)).unwrap();
        let before = c.visible().width();

        c.pan(50_000.0, 100.0);
        assert_eq!(c.visible().min, 0.0);
        assert_eq!(c.visible().width(), before);

        c.pan(-50_000.0, 100.0);
        assert_eq!(c.visible().max, 1000.0);
        let pinned = c.visible().width();

        for delta in [-70_000.0, 90_000.0, -1.0e6, 3.0e5, -12_345.0] {
            c.pan(delta, 100.0);
            assert_eq!(c.visible().width(), pinned);
            assert!(c.visible().min >= 0.0 && c.visible().max <= 1000.0);
        }
    }

    #[test]
    fn test_pan_at_full_range_is_noop() {
        let mut c = controller(0.0, 100.0);
        assert!(c.pan(40.0, 400.0).is_none());
        assert_eq!(c.visible(), DataRange::new(0.0, 100.0));
    }

    #[test]
    fn test_reset() {
        let mut c = controller(0.0, 100.0);
        c.zoom(0.2, ZoomDirection::In);
        let change = c.reset().unwrap();
        assert_eq!(change.cause, ChangeCause::Reset);
        assert_eq!(c.visible(), c.full());
        assert!(c.reset().is_none());
    }

    #[test]
    fn test_invalid_update_keeps_previous() {
        let mut c = controller(0.0, 100.0);
        c.zoom(0.5, ZoomDirection::In);
        let before = c.visible();
        assert!(c.zoom_by(0.5, f64::NAN).is_none());
        assert!(c.zoom_by(f64::INFINITY, 0.5).is_none());
        assert!(c.pan(f32::NAN, 100.0).is_none());
        assert_eq!(c.visible(), before);
    }

    #[test]
    fn test_mirror_does_not_notify() {
        let mut c = controller(0.0, 100.0);
        let count = Rc::new(RefCell::new(0));
        let seen = count.clone();
        c.subscribe(move |_| *seen.borrow_mut() += 1);

        c.mirror(DataRange::new(20.0, 40.0)).unwrap();
        assert_eq!(*count.borrow(), 0);
        assert_eq!(c.visible(), DataRange::new(20.0, 40.0));

        c.zoom(0.5, ZoomDirection::In);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_mirror_clamps_and_rejects() {
        let mut c = controller(0.0, 100.0);
        c.mirror(DataRange::new(-50.0, 30.0)).unwrap();
        assert_eq!(c.visible(), DataRange::new(0.0, 30.0));
        assert!(matches!(
            c.mirror(DataRange::new(200.0, 300.0)),
            Err(ViewportError::Inverted { .. })
        ));
        assert_eq!(
            c.mirror(DataRange::new(f64::NAN, 1.0)),
            Err(ViewportError::NonFinite)
        );
        assert_eq!(c.visible(), DataRange::new(0.0, 30.0));
    }

    #[test]
    fn test_unsubscribe() {
        let mut c = controller(0.0, 100.0);
        let hits = Rc::new(RefCell::new(Vec::new()));
        let sink = hits.clone();
        let id = c.subscribe(move |change| sink.borrow_mut().push(change.zoom_ratio));

        c.zoom(0.5, ZoomDirection::In);
        assert!(c.unsubscribe(id));
        assert!(!c.unsubscribe(id));
        c.zoom(0.5, ZoomDirection::In);

        assert_eq!(hits.borrow().len(), 1);
        assert!(approx(hits.borrow()[0], 1.0 / 0.87, 1e-9));
        assert_eq!(c.listener_count(), 0);
    }

    #[test]
    fn test_sample_density_caps_width() {
        let mut c = controller(0.0, 10_000.0);
        c.set_config(ViewportConfig::default().with_min_pixels_per_sample(1.0));
        c.set_sample_spacing(Some(1.0));
        c.set_plot_pixels(1000.0);
        c.mirror(DataRange::new(0.0, 900.0)).unwrap();
        c.zoom(0.0, ZoomDirection::Out);
        assert!(approx(c.visible().width(), 1000.0, 1e-9));
        // Reset is not subject to the cap.
        c.reset();
        assert_eq!(c.visible().width(), 10_000.0);
    }

    #[test]
    fn test_version_tracks_changes() {
        let mut c = controller(0.0, 100.0);
        let v = c.version();
        c.zoom(0.5, ZoomDirection::In);
        assert_eq!(c.version(), v + 1);
        c.zoom_by(0.5, f64::NAN);
        assert_eq!(c.version(), v + 1);
    }

    #[test]
    fn test_state_machine() {
        let projection = Projection::fit(SurfaceSize::new(1000, 1000), 0.0);
        let mut c = controller(0.0, 100.0);
        c.mirror(DataRange::new(40.0, 60.0)).unwrap();

        let down = PointerEvent::Down {
            position: Vec2::new(500.0, 500.0),
            button: PointerButton::Primary,
        };
        assert!(c.handle_event(down, &projection).is_none());
        assert!(matches!(c.state(), InteractionState::Panning { .. }));

        // Wheel is ignored while panning.
        let wheel = PointerEvent::Wheel {
            position: Vec2::new(500.0, 500.0),
            delta: -1.0,
        };
        assert!(c.handle_event(wheel, &projection).is_none());
        assert_eq!(c.visible(), DataRange::new(40.0, 60.0));

        let drag = PointerEvent::Move {
            position: Vec2::new(600.0, 500.0),
        };
        let change = c.handle_event(drag, &projection).unwrap();
        assert_eq!(change.cause, ChangeCause::Pan);
        assert!(approx(c.visible().min, 38.0, 1e-6));

        let up = PointerEvent::Up {
            button: PointerButton::Primary,
        };
        c.handle_event(up, &projection);
        assert_eq!(c.state(), InteractionState::Idle);

        let change = c.handle_event(wheel, &projection).unwrap();
        assert_eq!(change.cause, ChangeCause::Zoom);

        let dbl = PointerEvent::DoubleClick {
            position: Vec2::new(10.0, 10.0),
        };
        c.handle_event(dbl, &projection);
        assert_eq!(c.visible(), c.full());
    }

    #[test]
    fn test_same_data_range_keeps_zoom() {
        let mut c = controller(0.0, 100.0);
        c.zoom(0.5, ZoomDirection::In);
        let zoomed = c.visible();
        c.set_data_range(DataRange::new(0.0, 100.0), DataRange::new(0.0, 2.0));
        assert_eq!(c.visible(), zoomed);
        c.set_data_range(DataRange::new(0.0, 200.0), DataRange::new(0.0, 2.0));
        assert_eq!(c.visible(), DataRange::new(0.0, 200.0));
    }
}
