//! Character locomotion: animation state, heading, jumping, and the yaw
//! smoothing that drives the facing container.

use engine_core::lerp_angle;
use input::CharacterIntent;
use physics::{PhysicsWorld, RigidBodyHandle};

use crate::config::GameConfig;
use crate::state::GameState;

/// Exponential approach factor per frame for yaw smoothing.
const SMOOTHING: f32 = 0.1;
/// |vertical velocity| below this counts as grounded.
pub const GROUNDED_EPSILON: f32 = 0.1;
/// Seconds the shoot pose overrides the movement animation.
pub const SHOOT_ANIM_SECONDS: f32 = 0.3;

/// Animation states the character model can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterAnimation {
    Idle,
    Walk,
    Run,
    Jump,
    Shoot,
}

/// Drives the character body from per-frame intent and publishes the
/// resulting transform into the shared state.
pub struct CharacterController {
    pub body: RigidBodyHandle,
    pub animation: CharacterAnimation,
    is_jumping: bool,
    /// Countdown for the shoot pose. Tracked per frame so teardown can
    /// never orphan a pending reversion.
    shoot_anim_remaining: f32,
    /// Intent-derived local heading the visual yaw chases.
    character_rotation_target: f32,
    /// Smoothed visual yaw, local to the container.
    character_rotation: f32,
    /// Base yaw of the facing container.
    rotation_target: f32,
    /// Camera yaw accumulated from look-dragging. Unbounded by design; the
    /// container lerp below must therefore stay linear, not shortest-arc.
    camera_rotation_target: f32,
    /// Smoothed container yaw published to the shared state.
    container_rotation: f32,
}

impl CharacterController {
    pub fn new(body: RigidBodyHandle) -> Self {
        Self {
            body,
            animation: CharacterAnimation::Idle,
            is_jumping: false,
            shoot_anim_remaining: 0.0,
            character_rotation_target: 0.0,
            character_rotation: 0.0,
            rotation_target: 0.0,
            camera_rotation_target: 0.0,
            container_rotation: 0.0,
        }
    }

    /// World-space facing yaw: container plus smoothed local yaw. Used as
    /// the launch heading for the bazooka.
    pub fn world_yaw(&self) -> f32 {
        self.container_rotation + self.character_rotation
    }

    /// Put the character into the shoot pose for the fixed override window,
    /// starting this frame.
    pub fn trigger_shoot_anim(&mut self) {
        self.shoot_anim_remaining = SHOOT_ANIM_SECONDS;
        self.animation = CharacterAnimation::Shoot;
    }

    /// Run one locomotion pass: jump, heading, velocity, yaw smoothing,
    /// and the unconditional transform publish.
    pub fn update(
        &mut self,
        physics: &mut PhysicsWorld,
        intent: &CharacterIntent,
        config: &GameConfig,
        state: &mut GameState,
        dt: f32,
    ) {
        self.camera_rotation_target += intent.camera_yaw_delta * config.camera_rotation_speed;

        // A missing body (not yet spawned, or torn down) skips the velocity
        // work for this frame; the container and publish still run.
        if let Some(mut velocity) = physics.linvel(self.body) {
            let grounded = velocity.y.abs() < GROUNDED_EPSILON;

            if grounded && self.is_jumping {
                self.is_jumping = false;
            }
            if intent.jump && grounded && !self.is_jumping {
                velocity.y = config.jump_force;
                self.is_jumping = true;
                self.animation = CharacterAnimation::Jump;
            }

            let speed = if intent.run {
                config.run_speed
            } else {
                config.walk_speed
            };

            if intent.is_moving() {
                let input_angle = intent.move_x.atan2(intent.move_z);
                let world_angle =
                    input_angle + self.rotation_target + self.camera_rotation_target;
                self.character_rotation_target = input_angle;

                velocity.x = world_angle.sin() * speed;
                velocity.z = world_angle.cos() * speed;
                if !self.is_jumping {
                    self.animation = if intent.run {
                        CharacterAnimation::Run
                    } else {
                        CharacterAnimation::Walk
                    };
                }
            } else if !self.is_jumping {
                self.animation = CharacterAnimation::Idle;
            }

            physics.set_linvel(self.body, velocity);
        }

        // Shoot pose overrides whatever the movement logic picked, for the
        // fixed window, then reverts on its own.
        if self.shoot_anim_remaining > 0.0 {
            self.shoot_anim_remaining = (self.shoot_anim_remaining - dt).max(0.0);
            self.animation = CharacterAnimation::Shoot;
        }

        self.character_rotation = lerp_angle(
            self.character_rotation,
            self.character_rotation_target,
            SMOOTHING,
        );

        let container_target = self.rotation_target + self.camera_rotation_target;
        self.container_rotation += (container_target - self.container_rotation) * SMOOTHING;

        state.container_rotation = self.container_rotation;
        state.character_position = physics
            .translation(self.body)
            .unwrap_or(state.character_position);
    }
}
