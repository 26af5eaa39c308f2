//! Small math helpers for the traveler controller.

use bevy::math::{Quat, Vec3};

/// Smooth `current` toward `target` with a critically damped spring.
///
/// `damp_velocity` is the smoothing state carried between calls. `smooth_time`
/// is roughly the time to cover ~63% of the remaining distance; the target can
/// move every call.
pub fn smooth_damp(
    current: Vec3,
    target: Vec3,
    damp_velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    // Pade-style approximation of exp(-x), stable for the step sizes we run.
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*damp_velocity + change * omega) * dt;
    *damp_velocity = (*damp_velocity - temp * omega) * exp;
    target + (change + temp) * exp
}

/// The minimal rotation taking `orientation`'s local up onto `target_up`,
/// with a yaw twist about the new up applied afterwards.
///
/// Pure function of its inputs so re-orientation is unit-testable without a
/// live transform. `target_up` must be normalized; a zero `yaw` is the
/// airborne (yaw-locked) case.
pub fn reorient(orientation: Quat, target_up: Vec3, yaw: f32) -> Quat {
    let current_up = orientation * Vec3::Y;
    let aligned = (Quat::from_rotation_arc(current_up, target_up) * orientation).normalize();
    if yaw == 0.0 {
        return aligned;
    }
    (Quat::from_axis_angle(aligned * Vec3::Y, yaw) * aligned).normalize()
}
