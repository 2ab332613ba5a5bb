//! Angle math for yaw smoothing and heading computation.

use glam::Vec3;
use std::f32::consts::PI;

/// Wrap an angle into (-PI, PI].
pub fn normalize_angle(mut angle: f32) -> f32 {
    while angle > PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Interpolate between two yaw angles along the shortest arc.
///
/// Both endpoints are normalized first; when they are more than PI apart the
/// nearer endpoint is shifted by a full turn so the blend never travels the
/// long way around. The result is normalized again.
pub fn lerp_angle(start: f32, end: f32, t: f32) -> f32 {
    let mut start = normalize_angle(start);
    let mut end = normalize_angle(end);

    if (end - start).abs() > PI {
        if end > start {
            start += 2.0 * PI;
        } else {
            end += 2.0 * PI;
        }
    }

    normalize_angle(start + (end - start) * t)
}

/// Horizontal unit vector for a yaw angle. Yaw 0 faces +Z, increasing toward +X.
pub fn yaw_direction(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_angle_wraps_into_range() {
        assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-6);
        assert!((normalize_angle(-3.0 * PI) - PI).abs() < 1e-6);
        assert_eq!(normalize_angle(0.5), 0.5);
    }

    #[test]
    fn lerp_angle_takes_short_arc_across_pi() {
        // From just below PI to just above -PI the short way is through PI,
        // not back through zero.
        let start = PI - 0.1;
        let end = -PI + 0.1;
        let mid = lerp_angle(start, end, 0.5);
        assert!(mid.abs() > PI - 0.15, "midpoint {} went the long way", mid);
    }

    #[test]
    fn lerp_angle_never_rotates_the_long_way() {
        // A half blend between any pair of headings moves at most a
        // quarter turn; going the long way around would exceed it.
        let angles = [-3.0, -1.5, -0.2, 0.0, 0.4, 1.9, 3.1];
        for &a in &angles {
            for &b in &angles {
                let moved = normalize_angle(lerp_angle(a, b, 0.5) - normalize_angle(a)).abs();
                assert!(
                    moved <= PI / 2.0 + 1e-5,
                    "half step from {} to {} moved {}",
                    a,
                    b,
                    moved
                );
            }
        }
    }

    #[test]
    fn lerp_angle_endpoints() {
        assert!((lerp_angle(0.2, 1.0, 0.0) - 0.2).abs() < 1e-6);
        assert!((lerp_angle(0.2, 1.0, 1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn yaw_direction_is_unit_and_forward_at_zero() {
        let d = yaw_direction(0.0);
        assert!((d - Vec3::Z).length() < 1e-6);
        for yaw in [-2.0_f32, 0.3, 1.7] {
            assert!((yaw_direction(yaw).length() - 1.0).abs() < 1e-6);
        }
    }
}
