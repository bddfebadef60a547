//! Proximity lock onto a tracked reference point.
//!
//! Once the scene has enough anchors, the indicator locks when it comes
//! within a fixed 3D distance of the reference point: the inner pointer
//! snaps onto the point and the host gets exactly one feedback pulse. The
//! pulse fires again only when the lock releases.

use glam::Vec3;
use tracing::debug;

/// Direction of a lock state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockTransition {
    Engaged,
    Released,
}

/// What to do with the inner pointer after a lock evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerSnap {
    /// Leave the pointer where it is (lock was not evaluated)
    Keep,
    /// Move the pointer back to the indicator center
    Origin,
    /// Move the pointer onto this world-space point
    WorldPoint(Vec3),
}

/// Result of one lock evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LockOutcome {
    pub locked: bool,
    pub snap: PointerSnap,
    /// Set only on the frame the lock state flips
    pub transition: Option<LockTransition>,
}

/// Tracks lock state across frames
#[derive(Debug, Clone)]
pub struct LockResolver {
    threshold: f32,
    min_anchor_count: usize,
    locked: bool,
}

impl LockResolver {
    pub fn new(threshold: f32, min_anchor_count: usize) -> Self {
        Self {
            threshold,
            min_anchor_count,
            locked: false,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Update tuning without resetting the lock state
    pub fn retune(&mut self, threshold: f32, min_anchor_count: usize) {
        self.threshold = threshold;
        self.min_anchor_count = min_anchor_count;
    }

    /// Evaluate the lock for this frame.
    ///
    /// Only runs when `anchor_count` exceeds the configured minimum. Without
    /// enough anchors or without a reference point the frame counts as
    /// unlocked, so a held lock releases.
    pub fn evaluate(
        &mut self,
        indicator_world: Vec3,
        anchor_count: usize,
        reference_point: Option<Vec3>,
    ) -> LockOutcome {
        let (locked, snap) = if anchor_count > self.min_anchor_count {
            match reference_point {
                Some(point) if (indicator_world - point).length() < self.threshold => {
                    (true, PointerSnap::WorldPoint(point))
                }
                _ => (false, PointerSnap::Origin),
            }
        } else {
            (false, PointerSnap::Keep)
        };

        let transition = match (self.locked, locked) {
            (false, true) => Some(LockTransition::Engaged),
            (true, false) => Some(LockTransition::Released),
            _ => None,
        };
        if let Some(transition) = transition {
            debug!("Focus lock {:?}", transition);
        }
        self.locked = locked;

        LockOutcome {
            locked,
            snap,
            transition,
        }
    }
}

impl Default for LockResolver {
    fn default() -> Self {
        Self::new(
            focus_config::DEFAULT_LOCK_THRESHOLD,
            focus_config::DEFAULT_LOCK_MIN_ANCHOR_COUNT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_at(distance: f32) -> Option<Vec3> {
        Some(Vec3::new(distance, 0.0, 0.0))
    }

    #[test]
    fn test_transitions_fire_once_per_crossing() {
        let mut resolver = LockResolver::default();
        let distances = [0.10, 0.03, 0.02, 0.06, 0.01];

        let transitions: Vec<(usize, LockTransition)> = distances
            .iter()
            .enumerate()
            .filter_map(|(i, d)| {
                resolver
                    .evaluate(Vec3::ZERO, 6, point_at(*d))
                    .transition
                    .map(|t| (i, t))
            })
            .collect();

        assert_eq!(
            transitions,
            vec![
                (1, LockTransition::Engaged),
                (3, LockTransition::Released),
                (4, LockTransition::Engaged),
            ]
        );
        assert!(resolver.is_locked());
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut resolver = LockResolver::new(0.05, 5);
        let outcome = resolver.evaluate(Vec3::ZERO, 6, point_at(0.05));
        assert!(!outcome.locked);
        assert_eq!(outcome.snap, PointerSnap::Origin);
    }

    #[test]
    fn test_locked_snaps_to_point() {
        let mut resolver = LockResolver::default();
        let point = Vec3::new(0.0, 0.02, -1.0);
        let outcome = resolver.evaluate(Vec3::new(0.0, 0.0, -1.0), 6, Some(point));
        assert!(outcome.locked);
        assert_eq!(outcome.snap, PointerSnap::WorldPoint(point));
        assert_eq!(outcome.transition, Some(LockTransition::Engaged));
    }

    #[test]
    fn test_uses_full_3d_distance() {
        let mut resolver = LockResolver::default();
        // Same x/y, far away in depth
        let outcome = resolver.evaluate(Vec3::ZERO, 6, Some(Vec3::new(0.0, 0.0, 0.3)));
        assert!(!outcome.locked);
    }

    #[test]
    fn test_anchor_guard_is_strict() {
        let mut resolver = LockResolver::default();
        let outcome = resolver.evaluate(Vec3::ZERO, 5, point_at(0.0));
        assert!(!outcome.locked);
        assert_eq!(outcome.snap, PointerSnap::Keep);
        assert_eq!(outcome.transition, None);
    }

    #[test]
    fn test_losing_anchors_releases_lock_once() {
        let mut resolver = LockResolver::default();
        assert!(resolver.evaluate(Vec3::ZERO, 6, point_at(0.0)).locked);

        let released = resolver.evaluate(Vec3::ZERO, 2, point_at(0.0));
        assert_eq!(released.transition, Some(LockTransition::Released));
        let again = resolver.evaluate(Vec3::ZERO, 2, point_at(0.0));
        assert_eq!(again.transition, None);
    }

    #[test]
    fn test_missing_reference_point_unlocks() {
        let mut resolver = LockResolver::default();
        resolver.evaluate(Vec3::ZERO, 6, point_at(0.0));
        let outcome = resolver.evaluate(Vec3::ZERO, 6, None);
        assert!(!outcome.locked);
        assert_eq!(outcome.snap, PointerSnap::Origin);
        assert_eq!(outcome.transition, Some(LockTransition::Released));
    }
}
