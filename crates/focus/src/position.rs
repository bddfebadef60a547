//! Screen-centered placement of the indicator.
//!
//! The indicator always sits on the camera's forward ray so it stays in
//! the middle of the screen. A hit only decides how far along that ray:
//! the distance from the camera to the hit point is reused, not the hit
//! point itself.

use glam::Vec3;

use crate::math::{camera_forward, distance};
use crate::types::{CameraTransform, RaycastResult};

/// Where the indicator goes this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionResolution {
    /// World-space position on the camera forward ray
    pub position: Vec3,
    /// Whether a center raycast hit was used
    pub has_hit: bool,
}

/// Resolve the indicator position from the center raycast results.
///
/// Uses the first hit if there is one, otherwise `default_distance`.
pub fn resolve_position(
    hits: &[RaycastResult],
    camera: &CameraTransform,
    default_distance: f32,
) -> PositionResolution {
    let forward = camera_forward(camera);
    let origin = camera.translation;

    match hits.first() {
        Some(hit) => {
            let along = distance(hit.translation(), origin);
            PositionResolution {
                position: origin + forward * along,
                has_hit: true,
            }
        }
        None => PositionResolution {
            position: origin + forward * default_distance,
            has_hit: false,
        },
    }
}

/// Inner pointer opacity: fully opaque on a hit, invisible otherwise.
pub fn inner_pointer_opacity(has_hit: bool) -> f32 {
    if has_hit { 1.0 } else { 0.0 }
}
