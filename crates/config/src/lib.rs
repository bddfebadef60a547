//! Shared configuration for the focus indicator
//!
//! This crate is the single source of truth for every tunable constant the
//! indicator uses: placement distances, filter window size, animation
//! blend, lock threshold, scaling curve and the classic-style geometry.
//! Both the pure core and the Bevy plugin read from [`FocusConfig`].

use serde::{Deserialize, Serialize};

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

/// Distance in front of the camera used when nothing is hit
pub const DEFAULT_PLACEMENT_DISTANCE: f32 = 1.0;

/// Number of recent alignment classifications kept for voting
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Largest history window a configuration may ask for
pub const MAX_HISTORY_CAPACITY: usize = 1024;

/// Slerp factor applied every animating frame
pub const DEFAULT_ALIGNMENT_BLEND: f32 = 0.15;

/// Dot product at which two orientations count as converged
pub const DEFAULT_CONVERGENCE_DOT: f32 = 0.999;

/// Up-vector y below which a plane hit is treated as a ceiling
pub const DEFAULT_CEILING_UP_THRESHOLD: f32 = -0.9;

/// Lock snaps when the indicator is closer than this to the reference point
pub const DEFAULT_LOCK_THRESHOLD: f32 = 0.05;

/// Lock is only evaluated once the scene holds more anchors than this
pub const DEFAULT_LOCK_MIN_ANCHOR_COUNT: usize = 5;

/// Base edge size of the indicator in meters
pub const DEFAULT_SIZE: f32 = 0.17;

/// Stroke thickness of an outer segment (positioning-space units)
pub const DEFAULT_THICKNESS: f32 = 0.018;

/// Errors reported by [`FocusConfig::validate`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("history capacity must be at least 1")]
    EmptyHistory,

    #[error("history capacity {0} exceeds the maximum of {max}", max = MAX_HISTORY_CAPACITY)]
    HistoryTooLarge(usize),

    #[error("convergence dot must be in (0, 1], got {0}")]
    InvalidConvergence(f32),

    #[error("open segment length {open} exceeds the closed length {closed}")]
    OpenSegmentTooLong { open: f32, closed: f32 },

    #[error("alignment blend must be in (0, 1], got {0}")]
    InvalidBlend(f32),

    #[error("scale distance range is empty: min {min} >= max {max}")]
    EmptyDistanceRange { min: f32, max: f32 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("at least one raycast target must be allowed")]
    NoRaycastTargets,
}

/// Kind of surface a raycast may hit, in the host tracking subsystem's terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaycastTarget {
    /// A detected plane, limited to its measured extent
    ExistingPlaneGeometry,
    /// A detected plane treated as infinite
    ExistingPlaneInfinite,
    /// A surface estimated from feature points, no anchor yet
    EstimatedPlane,
}

/// Distance-to-scale curve parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleCurve {
    /// Distances below this clamp to `near_scale`
    pub min_distance: f32,
    /// Distances above this clamp to `far_scale`
    pub max_distance: f32,
    /// Scale at `min_distance`
    pub near_scale: f32,
    /// Scale at `max_distance`
    pub far_scale: f32,
}

impl Default for ScaleCurve {
    fn default() -> Self {
        Self {
            min_distance: 0.2,
            max_distance: 1.5,
            near_scale: 1.2,
            far_scale: 0.8,
        }
    }
}

/// Geometry and colors of the classic square style
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassicStyle {
    /// Base edge size of the whole indicator
    pub size: f32,
    /// Stroke thickness of one segment
    pub thickness: f32,
    /// Full length of a segment (closed square)
    pub segment_length: f32,
    /// Shortened length of a segment (open square)
    pub open_segment_length: f32,
    /// Extra factor applied to the positioning scale while closed
    pub scale_for_closed_square: f32,
    /// Radius of the inner pointer sphere
    pub inner_pointer_radius: f32,
    /// Segment color while the hit lies on a detected plane (RGBA)
    pub on_plane_color: [f32; 4],
    /// Segment color while off-plane (RGBA)
    pub off_plane_color: [f32; 4],
    /// Inner pointer base color (RGB, opacity is driven per frame)
    pub inner_pointer_color: [f32; 3],
}

impl Default for ClassicStyle {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            thickness: DEFAULT_THICKNESS,
            segment_length: 0.5,
            open_segment_length: 0.2,
            scale_for_closed_square: 0.97,
            inner_pointer_radius: 0.03,
            on_plane_color: [1.0, 0.82, 0.0, 1.0],
            off_plane_color: [1.0, 1.0, 1.0, 1.0],
            inner_pointer_color: [1.0, 1.0, 1.0],
        }
    }
}

/// Full configuration for one focus indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[cfg_attr(feature = "bevy", derive(Resource))]
pub struct FocusConfig {
    /// Placement distance when the center ray hits nothing
    pub default_distance: f32,
    /// Alignment history window size
    pub history_capacity: usize,
    /// Slerp factor per animating frame
    pub alignment_blend: f32,
    /// Convergence threshold for the orientation animation
    pub convergence_dot: f32,
    /// Up-vector y below which a plane hit is treated as a ceiling
    pub ceiling_up_threshold: f32,
    /// Lock distance to the reference point
    pub lock_threshold: f32,
    /// Lock evaluation requires strictly more anchors than this
    pub lock_min_anchor_count: usize,
    /// Raycast targets tried in order by the smart raycast
    pub allowed_raycasts: Vec<RaycastTarget>,
    /// Distance-to-scale curve
    pub scale: ScaleCurve,
    /// Classic square geometry and colors
    pub style: ClassicStyle,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            default_distance: DEFAULT_PLACEMENT_DISTANCE,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            alignment_blend: DEFAULT_ALIGNMENT_BLEND,
            convergence_dot: DEFAULT_CONVERGENCE_DOT,
            ceiling_up_threshold: DEFAULT_CEILING_UP_THRESHOLD,
            lock_threshold: DEFAULT_LOCK_THRESHOLD,
            lock_min_anchor_count: DEFAULT_LOCK_MIN_ANCHOR_COUNT,
            allowed_raycasts: vec![
                RaycastTarget::ExistingPlaneGeometry,
                RaycastTarget::ExistingPlaneInfinite,
                RaycastTarget::EstimatedPlane,
            ],
            scale: ScaleCurve::default(),
            style: ClassicStyle::default(),
        }
    }
}

impl FocusConfig {
    /// Check that every value is usable by the per-frame math
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::EmptyHistory);
        }
        if self.history_capacity > MAX_HISTORY_CAPACITY {
            return Err(ConfigError::HistoryTooLarge(self.history_capacity));
        }
        if !(self.alignment_blend > 0.0 && self.alignment_blend <= 1.0) {
            return Err(ConfigError::InvalidBlend(self.alignment_blend));
        }
        // Agreement of two unit vectors never exceeds 1
        if !(self.convergence_dot > 0.0 && self.convergence_dot <= 1.0) {
            return Err(ConfigError::InvalidConvergence(self.convergence_dot));
        }
        if self.scale.min_distance >= self.scale.max_distance {
            return Err(ConfigError::EmptyDistanceRange {
                min: self.scale.min_distance,
                max: self.scale.max_distance,
            });
        }
        if self.allowed_raycasts.is_empty() {
            return Err(ConfigError::NoRaycastTargets);
        }

        let positive = [
            ("default_distance", self.default_distance),
            ("lock_threshold", self.lock_threshold),
            ("style.size", self.style.size),
            ("style.segment_length", self.style.segment_length),
            ("style.open_segment_length", self.style.open_segment_length),
            ("style.scale_for_closed_square", self.style.scale_for_closed_square),
            ("style.thickness", self.style.thickness),
            ("style.inner_pointer_radius", self.style.inner_pointer_radius),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if self.style.open_segment_length > self.style.segment_length {
            return Err(ConfigError::OpenSegmentTooLong {
                open: self.style.open_segment_length,
                closed: self.style.segment_length,
            });
        }

        Ok(())
    }

    /// Positioning scale of the square in its open (off-plane) look
    pub fn open_square_scale(&self) -> f32 {
        self.style.size
    }

    /// Positioning scale of the square in its closed (on-plane) look
    pub fn closed_square_scale(&self) -> f32 {
        self.style.size * self.style.scale_for_closed_square
    }
}
