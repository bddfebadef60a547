//! Distance-based scaling.
//!
//! The indicator grows when close to the camera and shrinks when far so
//! its on-screen size changes less than perspective alone would make it.
//! A half-cosine ease between the clamped distances avoids visible pops.

use std::f32::consts::PI;

use focus_config::ScaleCurve;
use glam::Vec3;

use crate::math::distance;
use crate::types::CameraTransform;

/// Scale factor for a camera distance.
pub fn scale_for_distance(distance: f32, curve: &ScaleCurve) -> f32 {
    let clamped = distance.clamp(curve.min_distance, curve.max_distance);
    let t = (clamped - curve.min_distance) / (curve.max_distance - curve.min_distance);
    curve.near_scale + (curve.far_scale - curve.near_scale) * (1.0 - (PI * t).cos()) / 2.0
}

/// Scale factor for an indicator at `position`; 1.0 without a camera.
pub fn scale_based_on_distance(
    position: Vec3,
    camera: Option<&CameraTransform>,
    curve: &ScaleCurve,
) -> f32 {
    match camera {
        Some(camera) => scale_for_distance(distance(position, camera.translation), curve),
        None => 1.0,
    }
}
