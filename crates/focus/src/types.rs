use glam::{Affine3A, Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

pub use focus_config::RaycastTarget;

/// Surface classification relative to gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    Horizontal,
    Vertical,
}

/// Alignment a raycast asked for, or reported for an estimated surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TargetAlignment {
    Horizontal,
    Vertical,
    #[default]
    Any,
}

/// Lifecycle of the indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FocusState {
    /// No tracked surface yet; only the position follows the camera
    #[default]
    Initializing,
    /// A surface is tracked; alignment and orientation are updated too
    Tracking,
}

/// A detected flat surface tracked by the host session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneAnchor {
    /// Host-assigned anchor identifier
    pub id: u64,
    /// Alignment the host measured for the plane
    pub alignment: Alignment,
}

/// One intersection report from the host tracking subsystem
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastResult {
    /// World transform of the hit; rotation encodes the surface orientation
    pub world_transform: Affine3A,
    /// Kind of surface that produced the hit
    pub target: RaycastTarget,
    /// Alignment the host declares for the hit surface
    pub target_alignment: TargetAlignment,
    /// Plane anchor the ray struck, if any
    pub anchor: Option<PlaneAnchor>,
}

impl RaycastResult {
    /// Create a hit at `position` with surface orientation `orientation`
    pub fn new(position: Vec3, orientation: Quat, target: RaycastTarget) -> Self {
        Self {
            world_transform: Affine3A::from_rotation_translation(orientation, position),
            target,
            target_alignment: TargetAlignment::Any,
            anchor: None,
        }
    }

    /// Set the declared target alignment
    pub fn with_target_alignment(mut self, alignment: TargetAlignment) -> Self {
        self.target_alignment = alignment;
        self
    }

    /// Attach the plane anchor the ray struck
    pub fn with_anchor(mut self, anchor: PlaneAnchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// World-space hit point
    pub fn translation(&self) -> Vec3 {
        Vec3::from(self.world_transform.translation)
    }

    /// World-space orientation of the hit surface
    pub fn orientation(&self) -> Quat {
        Quat::from_mat3a(&self.world_transform.matrix3).normalize()
    }
}

/// Camera pose supplied by the host each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransform {
    /// World position of the camera
    pub translation: Vec3,
    /// Camera rotation; the third column points backwards
    pub rotation: Mat3,
}

impl CameraTransform {
    pub fn new(translation: Vec3, rotation: Mat3) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Build from a rotation quaternion
    pub fn from_rotation_translation(rotation: Quat, translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Mat3::from_quat(rotation),
        }
    }

    /// Camera looking down -Z from `translation`
    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Mat3::IDENTITY)
    }

    /// Unit direction the camera looks along
    pub fn forward(&self) -> Vec3 {
        crate::math::camera_forward(self)
    }
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self::from_translation(Vec3::ZERO)
    }
}
