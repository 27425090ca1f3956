//! Hit testing against the decimated geometry of the last frame.

use crate::series::SeriesLayer;
use glam::Vec2;

/// Pixel size of one index cell.
const CELL_SIZE: f32 = 16.0;

/// Nearest decimated point to a pick position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub series_index: u32,
    /// Index into the series' raw samples.
    pub sample_index: usize,
    pub layer: SeriesLayer,
    /// Point position in surface pixels.
    pub position: Vec2,
    /// Distance from the pick position in pixels.
    pub distance: f32,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    position: Vec2,
    series_index: u32,
    sample_index: usize,
    layer: SeriesLayer,
}

/// Uniform grid over the surface, bucketing points by pixel position.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    cells: Vec<Vec<Entry>>,
    cols: usize,
    rows: usize,
    size: Vec2,
}

impl SpatialIndex {
    /// Create an empty index covering a surface of `size` pixels.
    pub fn new(size: Vec2) -> Self {
        let cols = ((size.x / CELL_SIZE).ceil() as usize).max(1);
        let rows = ((size.y / CELL_SIZE).ceil() as usize).max(1);
        Self {
            cells: vec![Vec::new(); cols * rows],
            cols,
            rows,
            size,
        }
    }

    fn cell(&self, position: Vec2) -> (usize, usize) {
        let col = (position.x.max(0.0) / CELL_SIZE) as usize;
        let row = (position.y.max(0.0) / CELL_SIZE) as usize;
        (col.min(self.cols - 1), row.min(self.rows - 1))
    }

    /// Insert a point. Points off the surface are ignored.
    pub fn insert(
        &mut self,
        position: Vec2,
        series_index: u32,
        sample_index: usize,
        layer: SeriesLayer,
    ) {
        let inside = position.x >= 0.0
            && position.y >= 0.0
            && position.x <= self.size.x
            && position.y <= self.size.y;
        if !inside {
            return;
        }
        let (col, row) = self.cell(position);
        self.cells[row * self.cols + col].push(Entry {
            position,
            series_index,
            sample_index,
            layer,
        });
    }

    pub fn len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Vec::is_empty)
    }

    /// Nearest point within `radius` pixels of `position`.
    ///
    /// On equal distance the point on the higher layer wins, since it is
    /// the one drawn on top.
    pub fn nearest(&self, position: Vec2, radius: f32) -> Option<PickHit> {
        if !position.is_finite() || radius.is_nan() || radius < 0.0 {
            return None;
        }

        let (min_col, min_row) = self.cell(position - Vec2::splat(radius));
        let (max_col, max_row) = self.cell(position + Vec2::splat(radius));

        let mut best: Option<PickHit> = None;
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                for entry in &self.cells[row * self.cols + col] {
                    let distance = entry.position.distance(position);
                    if distance > radius {
                        continue;
                    }
                    let better = match &best {
                        None => true,
                        Some(b) => {
                            distance < b.distance
                                || (distance == b.distance && entry.layer > b.layer)
                        }
                    };
                    if better {
                        best = Some(PickHit {
                            series_index: entry.series_index,
                            sample_index: entry.sample_index,
                            layer: entry.layer,
                            position: entry.position,
                            distance,
                        });
                    }
                }
            }
        }
        best
    }
}
