//! Frame invalidation and decimation memoization.
//!
//! The compositor only rebuilds geometry when something it depends on has
//! changed, and only re-runs decimation for series whose inputs changed.

use crate::decimate::{DecimatedBuffer, decimate};
use crate::range::DataRange;
use crate::series::Series;
use ahash::AHashMap;
use std::sync::Arc;

bitflags::bitflags! {
    /// What changed since the last prepared frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FrameDirtyFlags: u8 {
        /// Series were replaced.
        const DATA = 0b0000_0001;
        /// Visible window or y range changed.
        const VIEW = 0b0000_0010;
        /// Quality tier changed.
        const QUALITY = 0b0000_0100;
        /// Surface resized or pixel ratio changed.
        const SURFACE = 0b0000_1000;
        /// Selection, colors or grid styling changed.
        const STYLE = 0b0001_0000;
    }
}

impl FrameDirtyFlags {
    /// Whether decimated buffers must be recomputed.
    pub fn needs_decimation(&self) -> bool {
        self.intersects(Self::DATA | Self::VIEW | Self::QUALITY)
    }

    /// Whether batched geometry must be rebuilt.
    pub fn needs_rebuild(&self) -> bool {
        !self.is_empty()
    }
}

/// Everything a decimated buffer depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimationKey {
    pub series: u32,
    pub revision: u64,
    pub view: [u64; 2],
    pub y: [u64; 2],
    pub budget: usize,
}

impl DecimationKey {
    pub fn new(series: &Series, view_x: DataRange, range_y: DataRange, budget: usize) -> Self {
        Self {
            series: series.index,
            revision: series.revision(),
            view: view_x.to_bits(),
            y: range_y.to_bits(),
            budget,
        }
    }
}

struct CacheEntry {
    buffer: Arc<DecimatedBuffer>,
    frame: u64,
}

/// Memoizes decimation across frames.
///
/// Entries not touched during a frame are evicted when the frame ends, so
/// the cache never holds more than one frame's worth of buffers plus the
/// previous frame's until [`end_frame`](Self::end_frame).
#[derive(Default)]
pub struct DecimationCache {
    entries: AHashMap<DecimationKey, CacheEntry>,
    frame: u64,
    hits: u64,
    misses: u64,
}

impl DecimationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    /// Return the decimated buffer for `series`, computing it on a miss.
    ///
    /// The buffer is shared with the cache and is never mutated after
    /// decimation.
    pub fn get_or_decimate(
        &mut self,
        series: &Series,
        view_x: DataRange,
        range_y: DataRange,
        budget: usize,
    ) -> Arc<DecimatedBuffer> {
        let key = DecimationKey::new(series, view_x, range_y, budget);
        let frame = self.frame;

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.frame = frame;
            self.hits += 1;
            return Arc::clone(&entry.buffer);
        }

        self.misses += 1;
        let buffer = Arc::new(decimate(series.xs(), series.ys(), budget, view_x, range_y));
        self.entries.insert(
            key,
            CacheEntry {
                buffer: Arc::clone(&buffer),
                frame,
            },
        );
        buffer
    }

    /// Drop entries not used during the current frame.
    pub fn end_frame(&mut self) {
        let frame = self.frame;
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.frame == frame);
        let evicted = before - self.entries.len();
        if evicted > 0 {
            tracing::trace!("Evicted {} decimation cache entries", evicted);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
