//! End-to-end frame tests against the mock render context and the software
//! rasterizer.

use glam::Vec2;
use specline::{
    ChangeCause, Color, CompositorConfig, DataRange, FrameDirtyFlags, Pixmap, PointerButton,
    PointerEvent, QualityOverride, QualityTier, RenderCompositor, Selection, Series, SeriesLayer,
    SurfaceSize, ZoomDirection,
};
use specline_test_utils::{MockRenderContext, RenderCall};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

fn spectra(count: u32, samples: usize, palette: &[Color]) -> Vec<Series> {
    (0..count)
        .map(|i| {
            let xs: Vec<f64> = (0..samples).map(|s| 4000.0 - s as f64 * 0.5).rev().collect();
            let ys: Vec<f64> = (0..samples)
                .map(|s| (s as f64 * 0.05 + i as f64 * 0.1).cos() * (1.0 + i as f64 * 0.01))
                .collect();
            Series::new(i, xs, ys, palette[i as usize % palette.len()])
        })
        .collect()
}

// ====================
// Batching
// ====================

#[test]
fn test_thousand_series_five_colors() {
    let palette = [
        Color::from_hex(0x1F77B4),
        Color::from_hex(0xFF7F0E),
        Color::from_hex(0x2CA02C),
        Color::from_hex(0xD62728),
        Color::from_hex(0x9467BD),
    ];
    let ctx = Arc::new(MockRenderContext::new());
    let mut compositor = RenderCompositor::new(ctx.clone(), CompositorConfig::default()).unwrap();
    compositor.set_series(spectra(1000, 50, &palette));
    let stats = *compositor.prepare();

    let normal = compositor.geometry().layer(SeriesLayer::Normal).count();
    assert_eq!(normal, 5, "one batched draw per color");
    assert_eq!(stats.draw_calls, 6, "five batches plus the background");
    assert_eq!(ctx.count_buffer_creates(), 6);

    for drawable in compositor.geometry().drawables() {
        assert_eq!(drawable.vertex_count(), drawable.series.len() * (50 + 1));
    }
}

#[test]
fn test_only_malformed_series_draws_background() {
    let ctx = Arc::new(MockRenderContext::new());
    let mut compositor = RenderCompositor::new(ctx.clone(), CompositorConfig::default()).unwrap();
    compositor.set_series(vec![
        Series::new(0, vec![1.0, 2.0, 3.0], vec![0.1, f64::NAN, 0.3], Color::RED),
        Series::new(1, vec![1.0, 2.0, 3.0], vec![0.1, 0.2], Color::RED),
        Series::new(2, Vec::<f64>::new(), Vec::<f64>::new(), Color::BLUE),
    ]);
    let stats = *compositor.prepare();

    assert_eq!(stats.series_rejected, 3);
    assert_eq!(stats.series_drawn, 0);
    assert_eq!(stats.draw_calls, 1);
    assert!(compositor.geometry().is_empty());
    assert!(!compositor.labels().is_empty());

    let created: Vec<Option<String>> = ctx
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            RenderCall::CreateBuffer { label, .. } => Some(label),
            _ => None,
        })
        .collect();
    assert_eq!(created, vec![Some(String::from("Specline Background"))]);
    assert_eq!(ctx.count_buffer_writes(), 1);
    assert_eq!(ctx.live_buffer_count(), 1);
}

#[test]
fn test_pinned_visible_over_normal() {
    let xs: Vec<f64> = (0..100).map(|i| i as f64).collect();
    let flat = vec![0.5; 100];
    let mut series = vec![
        Series::new(0, xs.clone(), flat.clone(), Color::RED),
        Series::new(1, xs.clone(), flat.clone(), Color::BLUE),
    ];
    // Give the y range some height so the lines sit mid-plot.
    series.push(Series::new(2, vec![0.0, 99.0], vec![0.0, 1.0], Color::GREEN));

    let mut compositor = RenderCompositor::software(CompositorConfig::default());
    compositor.set_surface(SurfaceSize::new(300, 300)).unwrap();
    compositor.set_series(series);
    compositor.apply_selection(&Selection::new().with_pinned([1]).with_original([2]));
    compositor.prepare();

    let mut pixmap = Pixmap::new(300, 300);
    compositor.rasterize(&mut pixmap);

    let projection = compositor.projection();
    let y = compositor.viewport().y_range().normalize(0.5) as f32;
    let center = projection.to_pixel(Vec2::new(0.5, y));
    let pixel = pixmap.pixel(center.x as u32, center.y as u32).unwrap();
    assert_eq!(pixel, [0, 0, 255, 255]);
}

// ====================
// Viewport
// ====================

#[test]
fn test_wheel_zoom_then_reset() {
    let mut compositor = RenderCompositor::software(CompositorConfig::default());
    compositor.set_surface(SurfaceSize::new(800, 600)).unwrap();
    compositor.set_series(spectra(20, 2000, &[Color::RED]));
    compositor.prepare();

    let full = compositor.viewport().full();
    let center = compositor.input_projection().to_pixel(Vec2::new(0.5, 0.5));
    let change = compositor
        .handle_event(PointerEvent::Wheel {
            position: center,
            delta: -120.0,
        })
        .unwrap();
    assert_eq!(change.cause, ChangeCause::Zoom);
    assert!((change.zoom_ratio - 1.0 / 0.87).abs() < 1e-6);

    compositor.prepare();
    assert!(compositor.stats().rebuilt);

    compositor.handle_event(PointerEvent::DoubleClick { position: center });
    assert_eq!(compositor.viewport().visible(), full);
}

#[test]
fn test_drag_pans_within_bounds() {
    let mut compositor = RenderCompositor::software(CompositorConfig::default());
    compositor.set_series(spectra(5, 1000, &[Color::RED]));
    compositor.viewport_mut().zoom(0.1, ZoomDirection::In);
    compositor.viewport_mut().zoom(0.1, ZoomDirection::In);
    let width = compositor.viewport().visible().width();

    let start = Vec2::new(400.0, 300.0);
    compositor.handle_event(PointerEvent::Down {
        position: start,
        button: PointerButton::Primary,
    });
    for step in 1..=20 {
        compositor.handle_event(PointerEvent::Move {
            position: start + Vec2::new(step as f32 * 50.0, 0.0),
        });
        let visible = compositor.viewport().visible();
        assert!(compositor.viewport().full().covers(&visible));
        assert!((visible.width() - width).abs() < 1e-9 * width.max(1.0));
    }
    compositor.handle_event(PointerEvent::Up {
        button: PointerButton::Primary,
    });

    assert_eq!(
        compositor.viewport().visible().min,
        compositor.viewport().full().min
    );
}

#[test]
fn test_linked_views_do_not_echo() {
    let series = spectra(3, 500, &[Color::RED]);
    let mut left = RenderCompositor::software(CompositorConfig::default());
    let mut right = RenderCompositor::software(CompositorConfig::default());
    left.set_series(series.clone());
    right.set_series(series);

    let forwarded: Rc<RefCell<Vec<DataRange>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = forwarded.clone();
    left.viewport_mut()
        .subscribe(move |change| sink.borrow_mut().push(change.visible));

    let echoed = Rc::new(RefCell::new(0));
    let counter = echoed.clone();
    right
        .viewport_mut()
        .subscribe(move |_| *counter.borrow_mut() += 1);

    left.viewport_mut().zoom(0.3, ZoomDirection::In);
    for visible in forwarded.borrow().iter() {
        right.viewport_mut().mirror(*visible).unwrap();
    }

    assert_eq!(right.viewport().visible(), left.viewport().visible());
    assert_eq!(*echoed.borrow(), 0);

    right.prepare();
    assert!(right.stats().rebuilt);
}

// ====================
// Quality and lifecycle
// ====================

#[test]
fn test_quality_change_rebuilds_with_new_budget() {
    let ctx = Arc::new(MockRenderContext::new());
    let mut compositor = RenderCompositor::new(ctx.clone(), CompositorConfig::default()).unwrap();
    compositor.set_series(spectra(600, 1000, &[Color::RED, Color::BLUE]));
    assert_eq!(compositor.effective_tier(), QualityTier::Low);
    compositor.prepare();
    assert_eq!(compositor.stats().points_drawn, 600 * 100);

    compositor.set_quality_override(QualityOverride::Tier(QualityTier::High));
    assert!(compositor.dirty().contains(FrameDirtyFlags::QUALITY));
    compositor.prepare();
    assert_eq!(compositor.stats().points_drawn, 600 * 1000);
    assert_eq!(compositor.quality().automatic, QualityTier::Low);
}

#[test]
fn test_teardown_destroys_every_buffer() {
    let ctx = Arc::new(MockRenderContext::new());
    {
        let mut compositor =
            RenderCompositor::new(ctx.clone(), CompositorConfig::default()).unwrap();
        compositor.set_series(spectra(10, 300, &[Color::RED, Color::GREEN]));
        compositor.apply_selection(&Selection::new().with_selected([3, 4]));
        for _ in 0..3 {
            compositor.viewport_mut().zoom(0.5, ZoomDirection::In);
            compositor.prepare();
        }
    }

    assert_eq!(ctx.live_buffer_count(), 0);
    let created = ctx.count_buffer_creates();
    let destroyed = ctx
        .calls()
        .iter()
        .filter(|c| matches!(c, RenderCall::DestroyBuffer { .. }))
        .count();
    assert_eq!(created, destroyed);
}
