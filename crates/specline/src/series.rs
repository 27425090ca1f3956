//! Spectral series and selection state.

use crate::error::SeriesError;
use crate::range::DataRange;
use ahash::AHashSet;
use bitflags::bitflags;
use specline_render::Color;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

bitflags! {
    /// Highlight state of a series.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SeriesFlags: u8 {
        const SELECTED = 1 << 0;
        const PINNED = 1 << 1;
        /// The unprocessed reference spectrum.
        const ORIGINAL = 1 << 2;
    }
}

/// Draw layer of a series, in back-to-front order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeriesLayer {
    Original,
    Normal,
    Selected,
    Pinned,
}

impl SeriesLayer {
    /// All layers in draw order.
    pub const ALL: [SeriesLayer; 4] = [
        SeriesLayer::Original,
        SeriesLayer::Normal,
        SeriesLayer::Selected,
        SeriesLayer::Pinned,
    ];

    /// Resolve the layer for a flag set.
    ///
    /// A series carrying several flags lands on the topmost one:
    /// pinned, then selected, then original.
    pub fn from_flags(flags: SeriesFlags) -> Self {
        if flags.contains(SeriesFlags::PINNED) {
            SeriesLayer::Pinned
        } else if flags.contains(SeriesFlags::SELECTED) {
            SeriesLayer::Selected
        } else if flags.contains(SeriesFlags::ORIGINAL) {
            SeriesLayer::Original
        } else {
            SeriesLayer::Normal
        }
    }

    /// Whether series on this layer share draw calls by color.
    pub fn is_batched(self) -> bool {
        !matches!(self, SeriesLayer::Selected)
    }

    pub fn name(self) -> &'static str {
        match self {
            SeriesLayer::Original => "Original",
            SeriesLayer::Normal => "Normal",
            SeriesLayer::Selected => "Selected",
            SeriesLayer::Pinned => "Pinned",
        }
    }
}

/// One spectrum: ordered `(x, y)` samples plus presentation state.
///
/// Samples are immutable once constructed. Cloning a series shares the
/// sample storage and keeps its revision, so caches keyed by revision stay
/// valid across clones.
#[derive(Debug, Clone)]
pub struct Series {
    pub index: u32,
    pub color: Color,
    pub flags: SeriesFlags,
    xs: Arc<[f64]>,
    ys: Arc<[f64]>,
    revision: u64,
}

impl Series {
    /// Create a series. `xs` is expected to be ascending.
    pub fn new(
        index: u32,
        xs: impl Into<Arc<[f64]>>,
        ys: impl Into<Arc<[f64]>>,
        color: Color,
    ) -> Self {
        Self {
            index,
            color,
            flags: SeriesFlags::empty(),
            xs: xs.into(),
            ys: ys.into(),
            revision: NEXT_REVISION.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Create a series from `(x, y)` pairs.
    pub fn from_points(index: u32, points: &[(f64, f64)], color: Color) -> Self {
        let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
        Self::new(index, xs, ys, color)
    }

    pub fn with_flags(mut self, flags: SeriesFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of samples. Uses the shorter axis if lengths disagree.
    pub fn len(&self) -> usize {
        self.xs.len().min(self.ys.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identity of the sample data. Changes whenever new samples are supplied.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn layer(&self) -> SeriesLayer {
        SeriesLayer::from_flags(self.flags)
    }

    /// Check that the series can be decimated.
    pub fn validate(&self) -> Result<(), SeriesError> {
        if self.xs.len() != self.ys.len() {
            return Err(SeriesError::LengthMismatch {
                xs: self.xs.len(),
                ys: self.ys.len(),
            });
        }
        if self.xs.is_empty() {
            return Err(SeriesError::Empty);
        }
        match self
            .xs
            .iter()
            .zip(self.ys.iter())
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            Some(index) => Err(SeriesError::NonFinite { index }),
            None => Ok(()),
        }
    }

    pub fn x_range(&self) -> Option<DataRange> {
        DataRange::from_values(self.xs.iter().copied())
    }

    pub fn y_range(&self) -> Option<DataRange> {
        DataRange::from_values(self.ys.iter().copied())
    }
}

/// Selection snapshot handed over by the selection owner.
///
/// The compositor never mutates selection; it only reads the flags derived
/// from the latest snapshot.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: AHashSet<u32>,
    pinned: AHashSet<u32>,
    original: AHashSet<u32>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selected(mut self, indices: impl IntoIterator<Item = u32>) -> Self {
        self.selected.extend(indices);
        self
    }

    pub fn with_pinned(mut self, indices: impl IntoIterator<Item = u32>) -> Self {
        self.pinned.extend(indices);
        self
    }

    pub fn with_original(mut self, indices: impl IntoIterator<Item = u32>) -> Self {
        self.original.extend(indices);
        self
    }

    pub fn flags_for(&self, index: u32) -> SeriesFlags {
        let mut flags = SeriesFlags::empty();
        flags.set(SeriesFlags::SELECTED, self.selected.contains(&index));
        flags.set(SeriesFlags::PINNED, self.pinned.contains(&index));
        flags.set(SeriesFlags::ORIGINAL, self.original.contains(&index));
        flags
    }

    /// Overwrite the flags of every series. Returns whether any changed.
    pub fn apply(&self, series: &mut [Series]) -> bool {
        let mut changed = false;
        for s in series.iter_mut() {
            let flags = self.flags_for(s.index);
            if s.flags != flags {
                s.flags = flags;
                changed = true;
            }
        }
        changed
    }
}
