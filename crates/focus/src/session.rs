//! Seam to the host AR session.
//!
//! The host tracking subsystem owns the camera, anchors and raycasting.
//! The indicator only reads from it through [`ArSession`], once per frame.

use glam::Vec3;

use crate::math::camera_forward;
use crate::types::{CameraTransform, RaycastResult, RaycastTarget, TargetAlignment};

/// A ray query against the tracked environment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastQuery {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Surface kind the query allows
    pub target: RaycastTarget,
    pub alignment: TargetAlignment,
}

/// Read-only view of the host AR session for one frame
pub trait ArSession {
    /// Current camera pose, if tracking has one
    fn camera_transform(&self) -> Option<CameraTransform>;

    /// Number of anchors currently in the scene
    fn anchor_count(&self) -> usize;

    /// Raycast from the middle of the screen
    fn raycast_from_screen_center(
        &self,
        target: RaycastTarget,
        alignment: TargetAlignment,
    ) -> Vec<RaycastResult>;

    /// Raycast along an arbitrary world-space ray
    fn raycast(&self, query: &RaycastQuery) -> Vec<RaycastResult>;
}

/// Raycast along the camera's forward ray, trying each allowed target in
/// order and returning the first result that matches the target asked for.
pub fn smart_raycast(
    session: &dyn ArSession,
    camera: &CameraTransform,
    allowed_targets: &[RaycastTarget],
) -> Option<RaycastResult> {
    let direction = camera_forward(camera);
    allowed_targets.iter().find_map(|target| {
        let query = RaycastQuery {
            origin: camera.translation,
            direction,
            target: *target,
            alignment: TargetAlignment::Any,
        };
        session
            .raycast(&query)
            .into_iter()
            .find(|result| result.target == *target)
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use glam::Quat;
    use std::cell::RefCell;

    /// Scripted session for deterministic tests
    #[derive(Default)]
    pub(crate) struct MockSession {
        pub camera: Option<CameraTransform>,
        pub anchors: usize,
        pub center_hits: Vec<RaycastResult>,
        pub tracked: Vec<RaycastResult>,
        pub queries: RefCell<Vec<RaycastTarget>>,
    }

    impl ArSession for MockSession {
        fn camera_transform(&self) -> Option<CameraTransform> {
            self.camera
        }

        fn anchor_count(&self) -> usize {
            self.anchors
        }

        fn raycast_from_screen_center(
            &self,
            _target: RaycastTarget,
            _alignment: TargetAlignment,
        ) -> Vec<RaycastResult> {
            self.center_hits.clone()
        }

        fn raycast(&self, query: &RaycastQuery) -> Vec<RaycastResult> {
            self.queries.borrow_mut().push(query.target);
            self.tracked.clone()
        }
    }

    fn hit(target: RaycastTarget, z: f32) -> RaycastResult {
        RaycastResult::new(Vec3::new(0.0, 0.0, z), Quat::IDENTITY, target)
    }

    #[test]
    fn test_smart_raycast_prefers_first_allowed_target() {
        let session = MockSession {
            tracked: vec![
                hit(RaycastTarget::EstimatedPlane, -1.0),
                hit(RaycastTarget::ExistingPlaneGeometry, -2.0),
            ],
            ..Default::default()
        };
        let camera = CameraTransform::default();
        let result = smart_raycast(
            &session,
            &camera,
            &[RaycastTarget::ExistingPlaneGeometry, RaycastTarget::EstimatedPlane],
        );
        assert_eq!(result.map(|r| r.target), Some(RaycastTarget::ExistingPlaneGeometry));
        assert_eq!(session.queries.borrow().len(), 1);
    }

    #[test]
    fn test_smart_raycast_falls_through_targets() {
        let session = MockSession {
            tracked: vec![hit(RaycastTarget::EstimatedPlane, -1.0)],
            ..Default::default()
        };
        let camera = CameraTransform::default();
        let result = smart_raycast(
            &session,
            &camera,
            &[
                RaycastTarget::ExistingPlaneGeometry,
                RaycastTarget::ExistingPlaneInfinite,
                RaycastTarget::EstimatedPlane,
            ],
        );
        assert_eq!(result.map(|r| r.target), Some(RaycastTarget::EstimatedPlane));
        assert_eq!(
            *session.queries.borrow(),
            vec![
                RaycastTarget::ExistingPlaneGeometry,
                RaycastTarget::ExistingPlaneInfinite,
                RaycastTarget::EstimatedPlane,
            ]
        );
    }

    #[test]
    fn test_smart_raycast_none_when_nothing_matches() {
        let session = MockSession {
            tracked: vec![hit(RaycastTarget::EstimatedPlane, -1.0)],
            ..Default::default()
        };
        let camera = CameraTransform::default();
        let result = smart_raycast(&session, &camera, &[RaycastTarget::ExistingPlaneInfinite]);
        assert!(result.is_none());
    }
}
