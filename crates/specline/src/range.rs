//! Closed data intervals.

/// A closed interval `[min, max]` in data units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataRange {
    pub min: f64,
    pub max: f64,
}

impl DataRange {
    pub const UNIT: DataRange = DataRange { min: 0.0, max: 1.0 };

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Smallest range covering every value, or `None` if the iterator is
    /// empty or holds no finite value.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut range: Option<DataRange> = None;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            range = Some(match range {
                Some(r) => r.include(v),
                None => DataRange::new(v, v),
            });
        }
        range
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    /// Both bounds finite and `min <= max`.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// Zero width.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0
    }

    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn covers(&self, other: &DataRange) -> bool {
        other.min >= self.min && other.max <= self.max
    }

    pub fn include(self, v: f64) -> Self {
        Self::new(self.min.min(v), self.max.max(v))
    }

    pub fn union(self, other: DataRange) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Grow both ends by `fraction` of the width. Degenerate ranges are
    /// returned unchanged.
    pub fn padded(self, fraction: f64) -> Self {
        let pad = self.width() * fraction;
        Self::new(self.min - pad, self.max + pad)
    }

    /// Map `v` into `[0, 1]` relative to this range.
    ///
    /// A degenerate range maps every value to `0.5`.
    #[inline]
    pub fn normalize(&self, v: f64) -> f64 {
        let width = self.width();
        if width == 0.0 {
            0.5
        } else {
            (v - self.min) / width
        }
    }

    /// Inverse of [`normalize`](Self::normalize).
    #[inline]
    pub fn denormalize(&self, t: f64) -> f64 {
        self.min + t * self.width()
    }

    /// Whether the bounds differ by more than `tolerance` times the width.
    pub fn differs_from(&self, other: &DataRange, tolerance: f64) -> bool {
        let scale = self.width().abs().max(other.width().abs()).max(f64::MIN_POSITIVE);
        (self.min - other.min).abs() > scale * tolerance
            || (self.max - other.max).abs() > scale * tolerance
    }

    /// Exact bit pattern, for use in hash keys.
    pub fn to_bits(&self) -> [u64; 2] {
        let bits = |v: f64| if v == 0.0 { 0 } else { v.to_bits() };
        [bits(self.min), bits(self.max)]
    }
}

impl Default for DataRange {
    fn default() -> Self {
        Self::UNIT
    }
}
