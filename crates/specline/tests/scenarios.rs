//! Decimation and viewport scenarios from the behavioral contract.

use specline::{DataRange, ViewportController, ZoomDirection, decimate};

fn wave(n: usize, start: f64, step: f64) -> (Vec<f64>, Vec<f64>) {
    let xs: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
    let ys: Vec<f64> = (0..n).map(|i| (i as f64 * 0.07).sin() * 3.0 + 1.0).collect();
    (xs, ys)
}

#[test]
fn test_three_series_full_view() {
    let y = DataRange::new(-2.0, 4.0);
    for phase in 0..3 {
        let (xs, mut ys) = wave(1000, 0.0, 1.0);
        for v in ys.iter_mut() {
            *v += phase as f64 * 0.1;
        }
        let view = DataRange::new(0.0, 999.0);
        let out = decimate(&xs, &ys, 100, view, y);

        assert_eq!(out.len(), 100);
        let first = out.points()[0];
        let last = out.points()[99];
        assert_eq!(first.x, 0.0);
        assert_eq!(last.x, 1.0);
        assert_eq!(first.y, y.normalize(ys[0]) as f32);
        assert_eq!(last.y, y.normalize(ys[999]) as f32);
    }
}

#[test]
fn test_series_outside_view_is_empty() {
    let (xs, ys) = wave(101, 0.0, 1.0);
    assert_eq!(xs[100], 100.0);
    let out = decimate(&xs, &ys, 100, DataRange::new(200.0, 400.0), DataRange::new(-2.0, 4.0));
    assert!(out.is_empty());
}

#[test]
fn test_decimation_bound_holds_for_any_budget() {
    let (xs, ys) = wave(2500, 10.0, 0.4);
    let view = DataRange::new(200.0, 700.0);
    let in_view = xs.iter().filter(|x| view.contains(**x)).count();

    for budget in [3, 4, 10, 99, 100, 1000, in_view - 1, in_view, in_view + 1, 5000] {
        let out = decimate(&xs, &ys, budget, view, DataRange::new(-2.0, 4.0));
        assert_eq!(out.len(), in_view.min(budget), "budget {}", budget);
        let sources = out.source_indices();
        assert!(view.contains(xs[sources[0]]));
        assert!(view.contains(xs[sources[sources.len() - 1]]));
        assert!(sources.iter().all(|&i| view.contains(xs[i])));
    }
}

#[test]
fn test_zoom_out_snaps_without_overshoot() {
    let mut controller = ViewportController::default();
    controller.set_data_range(DataRange::new(0.0, 1000.0), DataRange::new(0.0, 1.0));
    controller.mirror(DataRange::new(450.0, 550.0)).unwrap();

    let mut widths = vec![controller.visible().width()];
    while controller.zoom(0.5, ZoomDirection::Out).is_some() {
        let visible = controller.visible();
        assert!(visible.width() <= 1000.0);
        assert!(controller.full().covers(&visible));
        widths.push(visible.width());
    }

    assert_eq!(controller.visible(), DataRange::new(0.0, 1000.0));
    assert!(widths.windows(2).all(|w| w[1] > w[0]));
    // The step before the snap was still short of the threshold.
    assert!(widths[widths.len() - 2] < 990.0);
}

#[test]
fn test_large_pan_never_escapes() {
    let mut controller = ViewportController::default();
    controller.set_data_range(DataRange::new(-50.0, 50.0), DataRange::new(0.0, 1.0));
    controller.mirror(DataRange::new(-10.0, 10.0)).unwrap();

    for delta in [1e6_f32, -1e9, 3.5, -7.25, f32::MAX, -f32::MAX] {
        controller.pan(delta, 640.0);
        let visible = controller.visible();
        assert!(controller.full().covers(&visible));
        assert!((visible.width() - 20.0).abs() < 1e-9);
    }
}
