//! Small vector and quaternion helpers shared by the indicator modules.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::{Quat, Vec3};

use crate::types::CameraTransform;

/// Unit diagonal probe used to compare two orientations.
///
/// All three components are equal, so no single rotation axis dominates
/// the comparison.
pub const ORIENTATION_PROBE: Vec3 = Vec3::splat(0.577_350_26);

/// Shortest-path spherical interpolation, renormalized.
pub fn slerp(from: Quat, to: Quat, t: f32) -> Quat {
    from.slerp(to, t).normalize()
}

/// Direction the camera looks along: the negated third rotation column.
pub fn camera_forward(camera: &CameraTransform) -> Vec3 {
    -camera.rotation.z_axis
}

/// Euclidean distance between two points.
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    (a - b).length()
}

/// Rotate `orientation` about its local vertical axis.
pub fn rotate_about_vertical(orientation: Quat, angle: f32) -> Quat {
    orientation * Quat::from_rotation_y(angle)
}

/// World up vector of a rotated frame.
pub fn up_vector(orientation: Quat) -> Vec3 {
    orientation * Vec3::Y
}

/// How closely two orientations agree: 1.0 when identical.
pub fn orientation_agreement(a: Quat, b: Quat) -> f32 {
    (a * ORIENTATION_PROBE).dot(b * ORIENTATION_PROBE)
}

/// Shift `angle` in quarter turns until it is within 45 degrees of `reference`.
///
/// The indicator is a square, so any quarter turn looks identical; this
/// picks the representative that needs the least rotation.
pub fn normalize_for_minimal_rotation(angle: f32, reference: f32) -> f32 {
    if !angle.is_finite() || !reference.is_finite() {
        return angle;
    }

    let step = if angle > reference { -FRAC_PI_2 } else { FRAC_PI_2 };
    let mut normalized = angle;
    while (normalized - reference).abs() > FRAC_PI_4 {
        normalized += step;
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat3;
    use std::f32::consts::PI;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_probe_is_unit_length() {
        assert!((ORIENTATION_PROBE.length() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_camera_forward_identity_looks_down_negative_z() {
        let camera = CameraTransform::new(Vec3::ZERO, Mat3::IDENTITY);
        assert!(camera_forward(&camera).abs_diff_eq(Vec3::NEG_Z, EPSILON));
    }

    #[test]
    fn test_camera_forward_follows_yaw() {
        let camera =
            CameraTransform::from_rotation_translation(Quat::from_rotation_y(FRAC_PI_2), Vec3::ZERO);
        // Quarter turn left: -Z rotates onto -X
        assert!(camera_forward(&camera).abs_diff_eq(Vec3::NEG_X, EPSILON));
    }

    #[test]
    fn test_distance() {
        assert!((distance(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0)) - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_rotate_about_vertical_half_turn_flips_forward() {
        let q = rotate_about_vertical(Quat::IDENTITY, PI);
        assert!((q * Vec3::Z).abs_diff_eq(Vec3::NEG_Z, EPSILON));
        assert!(up_vector(q).abs_diff_eq(Vec3::Y, EPSILON));
    }

    #[test]
    fn test_slerp_halfway() {
        let to = Quat::from_rotation_y(FRAC_PI_2);
        let mid = slerp(Quat::IDENTITY, to, 0.5);
        assert!(mid.abs_diff_eq(Quat::from_rotation_y(FRAC_PI_4), EPSILON));
    }

    #[test]
    fn test_orientation_agreement() {
        let q = Quat::from_rotation_x(0.3);
        assert!((orientation_agreement(q, q) - 1.0).abs() < EPSILON);
        assert!(orientation_agreement(Quat::IDENTITY, Quat::from_rotation_x(PI)) < 0.0);
    }

    #[test]
    fn test_normalize_already_close() {
        assert!((normalize_for_minimal_rotation(0.2, 0.0) - 0.2).abs() < EPSILON);
    }

    #[test]
    fn test_normalize_steps_down() {
        let normalized = normalize_for_minimal_rotation(PI, 0.1);
        assert!((normalized - 0.0).abs() < EPSILON);
    }

    #[test]
    fn test_normalize_steps_up() {
        let normalized = normalize_for_minimal_rotation(-2.0, 0.0);
        assert!((normalized - (-2.0 + FRAC_PI_2)).abs() < EPSILON);
        assert!((normalized - 0.0).abs() <= FRAC_PI_4);
    }

    #[test]
    fn test_normalize_non_finite_passthrough() {
        assert!(normalize_for_minimal_rotation(f32::NAN, 0.0).is_nan());
    }
}
