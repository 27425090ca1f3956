//! Rendering quality tiers.
//!
//! A tier bundles the per-frame point budget with line styling. The
//! automatic rule picks a tier from dataset complexity; an explicit user
//! choice bypasses it.

use std::fmt;

/// Complexity above which the low tier is chosen.
pub const LOW_TIER_COMPLEXITY: usize = 500_000;
/// Complexity above which the medium tier is chosen.
pub const MEDIUM_TIER_COMPLEXITY: usize = 100_000;

/// Quality level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QualityTier {
    Low,
    Medium,
    High,
}

impl QualityTier {
    /// Pick a tier from `series_count * samples_per_series`.
    ///
    /// Boundaries are strict: exactly 500,000 is medium and exactly
    /// 100,000 is high.
    pub fn auto_select(series_count: usize, samples_per_series: usize) -> Self {
        let complexity = series_count.saturating_mul(samples_per_series);
        if complexity > LOW_TIER_COMPLEXITY {
            QualityTier::Low
        } else if complexity > MEDIUM_TIER_COMPLEXITY {
            QualityTier::Medium
        } else {
            QualityTier::High
        }
    }

    /// Fixed configuration of this tier.
    pub const fn config(self) -> QualityConfig {
        match self {
            QualityTier::Low => QualityConfig {
                max_points_per_series: 100,
                normal_line_width: 1.0,
                selected_line_width: 2.0,
                normal_opacity: 0.5,
                antialias: false,
                max_device_pixel_ratio: 1.0,
            },
            QualityTier::Medium => QualityConfig {
                max_points_per_series: 300,
                normal_line_width: 1.0,
                selected_line_width: 2.5,
                normal_opacity: 0.6,
                antialias: true,
                max_device_pixel_ratio: 1.5,
            },
            QualityTier::High => QualityConfig {
                max_points_per_series: 1000,
                normal_line_width: 1.5,
                selected_line_width: 3.0,
                normal_opacity: 0.7,
                antialias: true,
                max_device_pixel_ratio: 2.0,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            QualityTier::Low => "low",
            QualityTier::Medium => "medium",
            QualityTier::High => "high",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Requested quality: automatic or a fixed tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityOverride {
    #[default]
    Auto,
    Tier(QualityTier),
}

/// Per-tier rendering parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityConfig {
    /// Point budget handed to the decimator for every series.
    pub max_points_per_series: usize,
    /// Width of unselected lines in logical pixels.
    pub normal_line_width: f32,
    /// Width of selected lines in logical pixels.
    pub selected_line_width: f32,
    /// Alpha applied to unselected lines.
    pub normal_opacity: f32,
    pub antialias: bool,
    /// Upper bound on the device pixel ratio used for the render target.
    pub max_device_pixel_ratio: f32,
}

impl QualityConfig {
    /// Clamp the reported device pixel ratio to this tier's cap.
    pub fn pixel_ratio(&self, device_pixel_ratio: f32) -> f32 {
        if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(self.max_device_pixel_ratio)
        } else {
            1.0
        }
    }

    /// MSAA sample count for the line pipeline.
    pub fn sample_count(&self) -> u32 {
        if self.antialias { 4 } else { 1 }
    }
}

/// Outcome of quality resolution for one dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualitySelection {
    pub requested: QualityOverride,
    /// Tier the automatic rule would pick.
    pub automatic: QualityTier,
    /// Tier actually applied.
    pub effective: QualityTier,
    pub config: QualityConfig,
}

impl QualitySelection {
    pub fn is_override(&self) -> bool {
        matches!(self.requested, QualityOverride::Tier(_))
    }
}

/// Resolve the tier for a dataset.
pub fn select_quality(
    series_count: usize,
    samples_per_series: usize,
    requested: QualityOverride,
) -> QualitySelection {
    let automatic = QualityTier::auto_select(series_count, samples_per_series);
    let effective = match requested {
        QualityOverride::Auto => automatic,
        QualityOverride::Tier(tier) => tier,
    };
    QualitySelection {
        requested,
        automatic,
        effective,
        config: effective.config(),
    }
}
