//! View-aware Largest-Triangle-Three-Buckets decimation.
//!
//! Samples outside the visible x window are dropped, the rest are
//! normalized into `[0, 1]` on both axes and reduced to a point budget
//! while keeping the visual shape (peaks and troughs) of the curve.

use crate::range::DataRange;
use glam::Vec2;
use specline_core::profiling::profile_function;

/// Decimated, normalized points of one series for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecimatedBuffer {
    points: Vec<Vec2>,
    source_indices: Vec<usize>,
}

impl DecimatedBuffer {
    /// Points in normalized plot space, x ascending.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Index into the raw samples for each point.
    pub fn source_indices(&self) -> &[usize] {
        &self.source_indices
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Vec2)> + '_ {
        self.source_indices
            .iter()
            .copied()
            .zip(self.points.iter().copied())
    }
}

/// Reduce one series to at most `target_count` points inside `view_x`.
///
/// Output x is normalized against `view_x` and y against `range_y`; a
/// zero-width range maps to `0.5`. When the visible sample count does not
/// exceed `target_count`, or `target_count < 3`, every visible sample is
/// returned. Otherwise the output has exactly `target_count` points and
/// always keeps the first and last visible sample.
///
/// Pure: identical inputs give bit-identical output.
pub fn decimate(
    xs: &[f64],
    ys: &[f64],
    target_count: usize,
    view_x: DataRange,
    range_y: DataRange,
) -> DecimatedBuffer {
    profile_function!();

    let (indices, points): (Vec<usize>, Vec<[f64; 2]>) = xs
        .iter()
        .zip(ys.iter())
        .enumerate()
        .filter(|(_, (x, _))| view_x.contains(**x))
        .map(|(i, (x, y))| (i, [view_x.normalize(*x), range_y.normalize(*y)]))
        .unzip();

    let selected = lttb_indices(&points, target_count);

    DecimatedBuffer {
        points: selected
            .iter()
            .map(|&i| Vec2::new(points[i][0] as f32, points[i][1] as f32))
            .collect(),
        source_indices: selected.iter().map(|&i| indices[i]).collect(),
    }
}

/// Indices of the points LTTB keeps.
///
/// Buckets cover the interior points `1..n-1`; bucket `i` spans
/// `1 + i * (n - 2) / (target - 2) .. 1 + (i + 1) * (n - 2) / (target - 2)`
/// in integer arithmetic, so the last bucket always ends at `n - 1` and
/// every interior point belongs to exactly one bucket. Each bucket
/// contributes the point
/// forming the largest triangle with the previously kept point and the
/// centroid of the next bucket. Ties keep the earliest point.
fn lttb_indices(points: &[[f64; 2]], target_count: usize) -> Vec<usize> {
    let n = points.len();

    if n <= target_count || target_count < 3 {
        return (0..n).collect();
    }

    let mut result = Vec::with_capacity(target_count);
    result.push(0);

    let interior = n - 2;
    let buckets = target_count - 2;
    let bound = |i: usize| 1 + i * interior / buckets;
    let mut a = 0usize;

    for i in 0..buckets {
        let bucket_start = bound(i);
        let bucket_end = bound(i + 1);

        let next_start = bucket_end;
        let next_end = if i + 1 == buckets { n } else { bound(i + 2) };

        let mut avg = [0.0, 0.0];
        let count = next_end - next_start;
        if count > 0 {
            for p in &points[next_start..next_end] {
                avg[0] += p[0];
                avg[1] += p[1];
            }
            avg[0] /= count as f64;
            avg[1] /= count as f64;
        }

        let pa = points[a];
        let mut max_area = -1.0;
        let mut max_idx = bucket_start;

        for (offset, p) in points[bucket_start..bucket_end].iter().enumerate() {
            let area = ((pa[0] - avg[0]) * (p[1] - pa[1]) - (pa[0] - p[0]) * (avg[1] - pa[1]))
                .abs();
            if area > max_area {
                max_area = area;
                max_idx = bucket_start + offset;
            }
        }

        result.push(max_idx);
        a = max_idx;
    }

    result.push(n - 1);
    result
}
