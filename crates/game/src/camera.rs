//! Third-person follow camera.
//!
//! The camera mount and look target ride on the character's facing
//! container; both smoothed points chase their attach points with the same
//! exponential factor, which gives the lagged, spring-like follow motion
//! without any explicit spring physics.

use engine_core::{Quat, Vec3};

/// Camera mount point in container space: up and behind the character.
pub const FOLLOW_OFFSET: Vec3 = Vec3::new(0.0, 4.0, -4.0);
/// Look target in container space: slightly ahead of the character.
pub const LOOK_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 1.5);
/// Exponential approach factor per frame.
const SMOOTHING: f32 = 0.1;

/// Smoothed camera transform: a position and the point it looks at.
#[derive(Debug, Clone, Copy)]
pub struct FollowCamera {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl FollowCamera {
    /// Start the camera directly on its attach points so the first frames
    /// don't swoop in from the origin.
    pub fn new(anchor: Vec3, container_yaw: f32) -> Self {
        let rotation = Quat::from_rotation_y(container_yaw);
        Self {
            position: anchor + rotation * FOLLOW_OFFSET,
            look_at: anchor + rotation * LOOK_OFFSET,
        }
    }

    /// Chase the attach points for the current character anchor and
    /// container yaw.
    pub fn update(&mut self, anchor: Vec3, container_yaw: f32) {
        let rotation = Quat::from_rotation_y(container_yaw);
        let target_position = anchor + rotation * FOLLOW_OFFSET;
        let target_look = anchor + rotation * LOOK_OFFSET;
        self.position = self.position.lerp(target_position, SMOOTHING);
        self.look_at = self.look_at.lerp(target_look, SMOOTHING);
    }

    /// Unit view direction, for the audio listener.
    pub fn forward(&self) -> Vec3 {
        (self.look_at - self.position).normalize_or_zero()
    }
}
