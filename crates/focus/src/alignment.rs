//! Plane alignment classification and the history-based filter.
//!
//! A raw classification comes from the tracked raycast result: the plane
//! anchor's measured alignment when an anchor was hit, otherwise the
//! alignment the host declared for the estimated surface. The filter then
//! votes over the recent history before the indicator is allowed to
//! switch.

use glam::Quat;
use std::f32::consts::PI;
use tracing::trace;

use crate::history::AlignmentHistory;
use crate::math::{rotate_about_vertical, up_vector};
use crate::types::{Alignment, RaycastResult, TargetAlignment};

/// Classification of one tracked raycast result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentSample {
    /// Raw alignment for this frame, if the hit declares one
    pub alignment: Option<Alignment>,
    /// Orientation the indicator should converge to
    pub target_orientation: Quat,
    /// Whether the ray struck a plane anchor (authoritative signal)
    pub hit_plane_anchor: bool,
}

/// Outcome of filtering one sample against the history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    /// Adopt this alignment and update the orientation
    Accept(Alignment),
    /// Disagrees with the history; keep everything as it is this frame
    Retain,
}

/// Derive the raw alignment and target orientation from a raycast result.
///
/// When the hit lies on a plane anchor whose up vector points almost
/// straight down (a ceiling), the target is turned half way around the
/// vertical axis so the square does not appear mirrored.
pub fn classify_alignment(result: &RaycastResult, ceiling_up_threshold: f32) -> AlignmentSample {
    let mut target_orientation = result.orientation();

    let alignment = match result.anchor {
        Some(anchor) => {
            if up_vector(target_orientation).y < ceiling_up_threshold {
                target_orientation = rotate_about_vertical(target_orientation, PI);
            }
            Some(anchor.alignment)
        }
        None => match result.target_alignment {
            TargetAlignment::Horizontal => Some(Alignment::Horizontal),
            TargetAlignment::Vertical => Some(Alignment::Vertical),
            TargetAlignment::Any => None,
        },
    };

    AlignmentSample {
        alignment,
        target_orientation,
        hit_plane_anchor: result.anchor.is_some(),
    }
}

/// Record the sample in the history and decide whether to act on it.
pub fn filter_alignment(history: &mut AlignmentHistory, sample: &AlignmentSample) -> FilterDecision {
    let Some(alignment) = sample.alignment else {
        return FilterDecision::Retain;
    };
    history.push(alignment);

    trace!(
        "alignment vote: {:?} (horizontal {}, vertical {}, window {})",
        alignment,
        history.count(Alignment::Horizontal),
        history.count(Alignment::Vertical),
        history.len()
    );

    if sample.hit_plane_anchor || history.supports(alignment) {
        FilterDecision::Accept(alignment)
    } else {
        FilterDecision::Retain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PlaneAnchor, RaycastTarget};
    use glam::Vec3;

    const EPSILON: f32 = 1e-5;

    fn estimated(alignment: TargetAlignment) -> RaycastResult {
        RaycastResult::new(Vec3::ZERO, Quat::IDENTITY, RaycastTarget::EstimatedPlane)
            .with_target_alignment(alignment)
    }

    fn on_plane(orientation: Quat, alignment: Alignment) -> RaycastResult {
        RaycastResult::new(Vec3::ZERO, orientation, RaycastTarget::ExistingPlaneGeometry)
            .with_anchor(PlaneAnchor { id: 1, alignment })
    }

    #[test]
    fn test_classify_uses_declared_alignment_without_anchor() {
        let sample = classify_alignment(&estimated(TargetAlignment::Vertical), -0.9);
        assert_eq!(sample.alignment, Some(Alignment::Vertical));
        assert!(!sample.hit_plane_anchor);

        let sample = classify_alignment(&estimated(TargetAlignment::Any), -0.9);
        assert_eq!(sample.alignment, None);
    }

    #[test]
    fn test_classify_prefers_anchor_alignment() {
        let result = on_plane(Quat::IDENTITY, Alignment::Vertical)
            .with_target_alignment(TargetAlignment::Horizontal);
        let sample = classify_alignment(&result, -0.9);
        assert_eq!(sample.alignment, Some(Alignment::Vertical));
        assert!(sample.hit_plane_anchor);
        assert!(sample.target_orientation.abs_diff_eq(Quat::IDENTITY, EPSILON));
    }

    #[test]
    fn test_ceiling_flip_rotates_half_turn() {
        // Tilt about X until up.y == -0.95
        let tilted = Quat::from_rotation_x((-0.95f32).acos());
        assert!((up_vector(tilted).y + 0.95).abs() < EPSILON);

        let sample = classify_alignment(&on_plane(tilted, Alignment::Horizontal), -0.9);
        let expected = tilted * Quat::from_rotation_y(PI);
        assert!(sample.target_orientation.abs_diff_eq(expected, EPSILON));
    }

    #[test]
    fn test_no_ceiling_flip_above_threshold() {
        let tilted = Quat::from_rotation_x((-0.85f32).acos());
        let sample = classify_alignment(&on_plane(tilted, Alignment::Horizontal), -0.9);
        assert!(sample.target_orientation.abs_diff_eq(tilted, EPSILON));
    }

    #[test]
    fn test_no_ceiling_flip_without_anchor() {
        let tilted = Quat::from_rotation_x((-0.95f32).acos());
        let result = RaycastResult::new(Vec3::ZERO, tilted, RaycastTarget::EstimatedPlane)
            .with_target_alignment(TargetAlignment::Horizontal);
        let sample = classify_alignment(&result, -0.9);
        assert!(sample.target_orientation.abs_diff_eq(tilted, EPSILON));
    }

    #[test]
    fn test_filter_ignores_unclassified() {
        let mut history = AlignmentHistory::new(20);
        let sample = classify_alignment(&estimated(TargetAlignment::Any), -0.9);
        assert_eq!(filter_alignment(&mut history, &sample), FilterDecision::Retain);
        assert!(history.is_empty());
    }

    #[test]
    fn test_filter_needs_consensus_for_estimated_hits() {
        let mut history = AlignmentHistory::new(20);
        let horizontal = classify_alignment(&estimated(TargetAlignment::Horizontal), -0.9);
        let vertical = classify_alignment(&estimated(TargetAlignment::Vertical), -0.9);

        // First sample: 1 > 0, accepted
        assert_eq!(
            filter_alignment(&mut history, &horizontal),
            FilterDecision::Accept(Alignment::Horizontal)
        );
        // H, V: vertical 1 > 1 fails
        assert_eq!(filter_alignment(&mut history, &vertical), FilterDecision::Retain);
        // H, V, V: vertical 2 > 1 passes
        assert_eq!(
            filter_alignment(&mut history, &vertical),
            FilterDecision::Accept(Alignment::Vertical)
        );
        // H, V, V, H: horizontal 2 > 3 fails
        assert_eq!(filter_alignment(&mut history, &horizontal), FilterDecision::Retain);
        assert_eq!(history.len(), 4);
    }

    #[test]
    fn test_filter_plane_anchor_overrides_vote() {
        let mut history = AlignmentHistory::new(20);
        for _ in 0..10 {
            history.push(Alignment::Horizontal);
        }
        let sample = classify_alignment(&on_plane(Quat::IDENTITY, Alignment::Vertical), -0.9);
        assert_eq!(
            filter_alignment(&mut history, &sample),
            FilterDecision::Accept(Alignment::Vertical)
        );
    }
}
